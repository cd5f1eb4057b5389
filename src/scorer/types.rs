use crate::consts::{KEY_MAXSPEED, KEY_SEPARATION_LEVEL, KEY_STREET_CLASSIFICATION};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A posted speed as it arrives from the data: usually numeric, sometimes
/// text such as `"25"` or `"25 mph"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeedValue {
    Number(f64),
    Text(String),
}

impl SpeedValue {
    /// Coerces to a finite number. Text keeps only its leading integer, so
    /// `"25 mph"` and `"25.9"` both read as 25.
    pub fn as_mph(&self) -> Option<f64> {
        let value = match self {
            SpeedValue::Number(n) => *n,
            SpeedValue::Text(s) => leading_integer(s)?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for SpeedValue {
    fn from(v: f64) -> Self {
        SpeedValue::Number(v)
    }
}

impl From<&str> for SpeedValue {
    fn from(s: &str) -> Self {
        SpeedValue::Text(s.to_string())
    }
}

fn leading_integer(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let digits_start = usize::from(s.starts_with(['-', '+']));
    let end = s[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + digits_start);
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}
