use std::fmt;

use chrono::{DateTime, FixedOffset, Timelike};

/// Three-valued logic result.
///
/// Distinct from both `Boolean` and `Null`: a comparison against NULL
/// yields `Unknown`, which is not the same thing as "no value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ternary {
    True,
    False,
    Unknown,
}

impl Ternary {
    pub fn from_bool(b: bool) -> Self {
        if b { Ternary::True } else { Ternary::False }
    }

    /// Collapse to a boolean. `Unknown` has no boolean counterpart.
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Ternary::True => Some(true),
            Ternary::False => Some(false),
            Ternary::Unknown => None,
        }
    }
}

impl fmt::Display for Ternary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ternary::True => f.write_str("TRUE"),
            Ternary::False => f.write_str("FALSE"),
            Ternary::Unknown => f.write_str("UNKNOWN"),
        }
    }
}

/// Scalar value flowing through the engine.
///
/// Closed set: every consumer matches exhaustively, so a new kind of
/// scalar cannot be added without touching the converter and each encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Ternary(Ternary),
    /// Nanosecond precision, offset-aware.
    Datetime(DateTime<FixedOffset>),
    Null,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Explicit logical interpretation. Only booleans and ternaries carry
    /// a truth value; everything else is `Unknown`.
    pub fn to_ternary(&self) -> Ternary {
        match self {
            Value::Boolean(b) => Ternary::from_bool(*b),
            Value::Ternary(t) => *t,
            Value::String(_)
            | Value::Integer(_)
            | Value::Float(_)
            | Value::Datetime(_)
            | Value::Null => Ternary::Unknown,
        }
    }
}

/// Locale-free float text: shortest round-trip form, never exponent notation.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f.is_sign_positive() { "+Inf" } else { "-Inf" }.to_string();
    }
    format!("{f}")
}

/// RFC 3339 with the fractional part trimmed of trailing zeros.
///
/// - `2012-02-03T09:18:15Z`
/// - `2012-02-03T09:18:15.123Z`
/// - `2012-02-03T09:18:15.000000001+09:00`
pub fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
    let mut s = dt.format("%Y-%m-%dT%H:%M:%S").to_string();

    let nanos = dt.nanosecond() % 1_000_000_000;
    if nanos > 0 {
        let frac = format!("{nanos:09}");
        s.push('.');
        s.push_str(frac.trim_end_matches('0'));
    }

    let offset = dt.offset().local_minus_utc();
    if offset == 0 {
        s.push('Z');
    } else {
        let sign = if offset < 0 { '-' } else { '+' };
        let abs = offset.abs();
        s.push_str(&format!("{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60));
    }
    s
}
