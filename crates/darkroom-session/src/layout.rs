//! On-disk layout of a session directory.
//!
//! ```text
//! <root>/<session-id>/
//!     original.png
//!     01_final.png
//!     01_final_preview.png
//!     ...
//!     semantic_01.png
//! ```

use std::path::{Path, PathBuf};

use crate::error::SessionError;
use crate::session::SessionId;

pub const ORIGINAL: &str = "original.png";

/// Output of iteration `k`.
#[must_use]
pub fn final_name(k: u32) -> String {
    format!("{k:02}_final.png")
}

/// Preview of iteration `k`.
#[must_use]
pub fn preview_name(k: u32) -> String {
    format!("{k:02}_final_preview.png")
}

/// Output of semantic edit `n`.
#[must_use]
pub fn semantic_name(n: u32) -> String {
    format!("semantic_{n:02}.png")
}

#[must_use]
pub fn session_dir(root: &Path, id: SessionId) -> PathBuf {
    root.join(id.to_string())
}

/// Check that `name` is a plain file name: no separators, not `.` or
/// `..`, not empty.
///
/// # Errors
///
/// Returns [`SessionError::InvalidBaseName`] otherwise.
pub fn validate_base_name(name: &str) -> Result<&str, SessionError> {
    let bare = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && Path::new(name).file_name().is_some_and(|f| f == name);
    if bare {
        Ok(name)
    } else {
        Err(SessionError::InvalidBaseName(name.to_owned()))
    }
}
