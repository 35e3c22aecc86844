//! Typed option values.
//!
//! Every option owns one [`TypedValue`] cell. The cell knows how to print
//! itself, reset to its zero form, export a JSON value for the preferences
//! document and parse itself back from command line text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;
use thiserror::Error;

/// Literals accepted by boolean options.
const TRUE_LITERALS: &[&str] = &["1", "t", "T", "true", "TRUE", "True"];
const FALSE_LITERALS: &[&str] = &["0", "f", "F", "false", "FALSE", "False"];

/// Failure to parse option text into a typed value.
#[derive(Error, Debug)]
pub enum ValueError {
    #[error("not a boolean: {0}")]
    Bool(String),

    #[error("not a 64-bit integer: {0}")]
    Integer(String),

    #[error("not a floating point number: {0}")]
    Float(String),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid JSON string array: {0}")]
    List(#[from] serde_json::Error),
}

/// The kind of value an option holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
    Bytes,
    StringList,
}

impl ValueKind {
    /// Returns a short name for this kind, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::StringList => "string list",
        }
    }
}

/// Current value of an option.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Appended to by [`TypedValue::parse_from`].
    StringList(Vec<String>),
}

impl TypedValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::StringList(_) => ValueKind::StringList,
        }
    }

    /// Formats the value as text.
    ///
    /// An empty string list formats as the empty string, a non-empty one as
    /// a JSON array.
    pub fn to_text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => format_float(*f),
            Self::String(s) => s.clone(),
            Self::Bytes(bytes) => STANDARD.encode(bytes),
            Self::StringList(list) if list.is_empty() => String::new(),
            Self::StringList(list) => serde_json::to_string(list).unwrap_or_default(),
        }
    }

    /// Resets the value to the zero form of its kind.
    pub fn reset(&mut self) {
        match self {
            Self::Bool(b) => *b = false,
            Self::Int(i) => *i = 0,
            Self::Float(f) => *f = 0.0,
            Self::String(s) => s.clear(),
            Self::Bytes(bytes) => bytes.clear(),
            Self::StringList(list) => list.clear(),
        }
    }

    /// Returns the value as it is written into the preferences document.
    ///
    /// Returns `None` for NaN and infinite floats, which JSON cannot hold.
    pub fn native_value(&self) -> Option<Value> {
        let value = match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Value::Number(serde_json::Number::from_f64(*f)?),
            Self::String(s) => Value::String(s.clone()),
            Self::Bytes(bytes) => Value::String(STANDARD.encode(bytes)),
            Self::StringList(list) if list.is_empty() => Value::Null,
            Self::StringList(list) => {
                Value::Array(list.iter().cloned().map(Value::String).collect())
            }
        };
        Some(value)
    }

    /// Parses `text` into the value.
    ///
    /// String lists append `text` as one element. On failure the value is
    /// left untouched.
    pub fn parse_from(&mut self, text: &str) -> Result<(), ValueError> {
        match self {
            Self::Bool(b) => *b = parse_bool(text)?,
            Self::Int(i) => *i = parse_int(text)?,
            Self::Float(f) => *f = parse_float(text)?,
            Self::String(s) => *s = text.to_string(),
            Self::Bytes(bytes) => *bytes = STANDARD.decode(text)?,
            Self::StringList(list) => list.push(text.to_string()),
        }
        Ok(())
    }

}

/// Parses the text form of a string list. Empty text is the empty list.
pub fn parse_list_text(text: &str) -> Result<Vec<String>, ValueError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(text)?)
}

/// Formats a float in its shortest form, switching to an exponent for very
/// large or very small magnitudes.
pub fn format_float(f: f64) -> String {
    let magnitude = f.abs();
    if !f.is_finite() || f == 0.0 || (1e-4..1e21).contains(&magnitude) {
        f.to_string()
    } else {
        format!("{f:e}")
    }
}

/// Parses one of the accepted boolean literals.
pub fn parse_bool(text: &str) -> Result<bool, ValueError> {
    if TRUE_LITERALS.contains(&text) {
        Ok(true)
    } else if FALSE_LITERALS.contains(&text) {
        Ok(false)
    } else {
        Err(ValueError::Bool(text.to_string()))
    }
}

/// Parses a signed 64-bit integer, detecting the base from its prefix.
///
/// `0x`/`0X` selects base 16, a leading `0` base 8, anything else base 10.
pub fn parse_int(text: &str) -> Result<i64, ValueError> {
    let invalid = || ValueError::Integer(text.to_string());

    let (sign, unsigned) = match text.as_bytes().first() {
        Some(b'-') => ("-", &text[1..]),
        Some(b'+') => ("", &text[1..]),
        _ => ("", text),
    };

    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };

    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(invalid());
    }

    i64::from_str_radix(&format!("{sign}{digits}"), radix).map_err(|_| invalid())
}

/// Parses a 64-bit float.
pub fn parse_float(text: &str) -> Result<f64, ValueError> {
    text.parse::<f64>()
        .map_err(|_| ValueError::Float(text.to_string()))
}
