//! Typed cell values produced by column accessors.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Placeholder shown for a missing value.
pub const MISSING_PLACEHOLDER: &str = "—";

/// The value a column reads out of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free-form text.
    Text(String),
    /// One of a fixed set of options (statuses, kinds).
    Enum(String),
    /// A number. `NaN` is treated as non-comparable.
    Number(f64),
    /// A point in time.
    DateTime(DateTime<Utc>),
    /// The record has no value for this column.
    Missing,
}

impl CellValue {
    /// Text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text value, or `Missing` for `None`.
    pub fn opt_text(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, |s| Self::Text(s.to_owned()))
    }

    /// Enum value.
    pub fn enumeration(value: impl Into<String>) -> Self {
        Self::Enum(value.into())
    }

    /// Numeric value.
    pub fn number(value: impl Into<f64>) -> Self {
        Self::Number(value.into())
    }

    /// Timestamp, or `Missing` for `None`.
    pub fn opt_datetime(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Missing, Self::DateTime)
    }

    /// Best-effort conversion from raw command output.
    ///
    /// Strings that parse as RFC 3339 become timestamps; `null` becomes
    /// `Missing`; arrays and objects are kept as their JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(dt) => Self::DateTime(dt.with_timezone(&Utc)),
                Err(_) => Self::Text(s.clone()),
            },
            Value::Number(n) => n.as_f64().map_or(Self::Missing, Self::Number),
            Value::Bool(b) => Self::Text(b.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    /// Whether the value is absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Whether the value can take part in ordering.
    pub fn is_comparable(&self) -> bool {
        match self {
            Self::Missing => false,
            Self::Number(n) => !n.is_nan(),
            _ => true,
        }
    }

    /// Typed equality used by exact filters. Text and enum values compare by
    /// their string content.
    pub fn loosely_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a) | Self::Enum(a), Self::Text(b) | Self::Enum(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Missing, Self::Missing) => true,
            _ => false,
        }
    }

    /// Orders two comparable values. Returns `None` when either side is not
    /// comparable; callers place those last.
    ///
    /// Strings compare case-insensitively first so "apple" sorts next to
    /// "Apple". Values of different kinds order text < number < time.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        if !self.is_comparable() || !other.is_comparable() {
            return None;
        }
        let ord = match (self, other) {
            (Self::Text(a) | Self::Enum(a), Self::Text(b) | Self::Enum(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b)?,
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        };
        Some(ord)
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Text(_) | Self::Enum(_) => 0,
            Self::Number(_) => 1,
            Self::DateTime(_) => 2,
            Self::Missing => 3,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Enum(s) => f.write_str(s),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Missing => f.write_str(MISSING_PLACEHOLDER),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}
