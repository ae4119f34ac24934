//! Values supplied to message formatting

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;

/// The value map passed to [`crate::MessageFormatter::format`]
pub type FormatArgs = HashMap<String, FormatValue>;

/// One value usable in a message
#[derive(Debug, Clone, PartialEq)]
pub enum FormatValue {
    /// Text, used by interpolation and `select`
    String(String),
    /// Integral number
    Int(i64),
    /// Floating-point number
    Number(f64),
    /// Point in time, used by `date` and `time`
    DateTime(DateTime<Utc>),
}

impl FormatValue {
    /// Render the value the way plain `{name}` interpolation does.
    ///
    /// Deliberately locale-independent: the fast substitution path and the
    /// full parser both use this, so their outputs stay byte-identical.
    pub fn as_plain_string(&self) -> String {
        match self {
            Self::String(text) => text.clone(),
            Self::Int(n) => n.to_string(),
            Self::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Self::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Numeric view, used by plural/number arguments
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Datetime view, used by date/time arguments
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

impl From<&str> for FormatValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FormatValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FormatValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FormatValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<u32> for FormatValue {
    fn from(value: u32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for FormatValue {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for FormatValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for FormatValue {
    fn from(value: f32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<DateTime<Utc>> for FormatValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// Build a [`FormatArgs`] map from key-value pairs
///
/// ```rust
/// use lingx_format::format_values;
///
/// let values = format_values!["name" => "Alice", "count" => 3];
/// assert_eq!(values.len(), 2);
/// ```
#[macro_export]
macro_rules! format_values {
    () => {
        $crate::FormatArgs::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut values = $crate::FormatArgs::new();
        $(
            values.insert($key.to_string(), $crate::FormatValue::from($value));
        )+
        values
    }};
}
