//! Untrusted parameter values as they arrive from a suggestion source.
//!
//! [`RawValue`] is the tagged union every normalizer consumes. It is
//! built from arbitrary JSON so that any shape a model may emit (bare
//! numbers, numeric strings, nested objects, point lists, `null`) is
//! representable without failing. Lookups never fail either: a missing
//! key, a wrong shape, and an unparsable string all read as "absent".

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::types::Color;

/// A loosely-typed parameter value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    /// `null` or a missing key.
    #[default]
    Absent,
    /// Any JSON number.
    Number(f64),
    /// A string token (booleans are carried as `"true"`/`"false"`).
    Text(String),
    /// A JSON array.
    Sequence(Vec<Self>),
    /// A JSON object.
    Mapping(BTreeMap<String, Self>),
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Absent,
            serde_json::Value::Bool(b) => Self::Text(b.to_string()),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Absent, Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl RawValue {
    /// `true` for [`RawValue::Absent`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// `true` for a number or a string that parses as one.
    #[must_use]
    pub fn is_scalar_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Read as a number.
    ///
    /// Numeric strings (`"0.5"`, `" 50 "`, `"NaN"`) parse; anything else
    /// is `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Read as a string token.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Read as an object.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Read as an array.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up `key` in a mapping. Absent values read as `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping()?
            .get(key)
            .filter(|value| !value.is_absent())
    }

    /// The first of `keys` whose value reads as a number.
    #[must_use]
    pub fn first_number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .find_map(|key| self.get(key).and_then(Self::as_number))
    }

    /// The first of `keys` whose value is a string token.
    #[must_use]
    pub fn first_text(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key).and_then(Self::as_text))
    }

    /// The first of `keys` whose value reads as a color.
    #[must_use]
    pub fn first_color(&self, keys: &[&str]) -> Option<Color> {
        keys.iter().find_map(|key| self.get(key).and_then(Self::as_color))
    }

    /// The first of `keys` whose value reads as an `[R, G, B]` color.
    #[must_use]
    pub fn first_rgb(&self, keys: &[&str]) -> Option<Color> {
        keys.iter().find_map(|key| self.get(key).and_then(Self::as_rgb))
    }

    /// Read a `[B, G, R]` triple (extra elements are ignored).
    ///
    /// Channels are rounded and saturated into `0..=255`; NaN channels
    /// read as 0.
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        self.channels().map(Color::from_bgr)
    }

    /// Read an `[R, G, B]` triple, saturated like [`RawValue::as_color`].
    ///
    /// Split-toning zone colors arrive in this order.
    #[must_use]
    pub fn as_rgb(&self) -> Option<Color> {
        self.channels().map(|[r, g, b]| Color::rgb(r, g, b))
    }

    /// The first three elements as saturated channels, in wire order.
    fn channels(&self) -> Option<[u8; 3]> {
        let items = self.as_sequence()?;
        if items.len() < 3 {
            return None;
        }
        let mut channels = [0_u8; 3];
        for (slot, item) in channels.iter_mut().zip(items) {
            *slot = saturate_channel(item.as_number()?);
        }
        Some(channels)
    }

    /// Read an `[x, y]` coordinate pair.
    #[must_use]
    pub fn as_point(&self) -> Option<(f64, f64)> {
        match self.as_sequence()? {
            [x, y, ..] => Some((x.as_number()?, y.as_number()?)),
            _ => None,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn saturate_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// A full parameter payload: tool name to raw value.
///
/// Non-object payloads deserialize to an empty set, which normalizes to
/// neutral basic adjustments and no creative tools.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawParams(BTreeMap<String, RawValue>);

impl RawParams {
    /// An empty payload.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace one tool entry.
    #[must_use]
    pub fn with(mut self, tool: &str, value: impl Into<RawValue>) -> Self {
        self.0.insert(tool.to_owned(), value.into());
        self
    }

    /// The raw value for `tool`, [`RawValue::Absent`] when missing.
    #[must_use]
    pub fn get(&self, tool: &str) -> &RawValue {
        static ABSENT: RawValue = RawValue::Absent;
        self.0.get(tool).unwrap_or(&ABSENT)
    }

    /// Iterate over `(tool name, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of tool entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when there are no tool entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<serde_json::Value> for RawParams {
    fn from(value: serde_json::Value) -> Self {
        match RawValue::from(value) {
            RawValue::Mapping(map) => Self(map),
            _ => Self::new(),
        }
    }
}

impl<'de> Deserialize<'de> for RawParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}
