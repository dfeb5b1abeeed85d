use std::fmt;

use crate::expr::SourcePos;

// ═══════════════════════════════════════════════════════════════
//  Resolution errors
// ═══════════════════════════════════════════════════════════════

/// Location prefix of a resolution error: `[L:3 C:7]`, or `[L:- C:-]`
/// when the expression carries no source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location(pub Option<SourcePos>);

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(pos) => write!(f, "[L:{} C:{}]", pos.line, pos.column),
            None => f.write_str("[L:- C:-]"),
        }
    }
}

/// Failure to bind a field reference to exactly one header column.
///
/// Always recoverable: the query evaluator reports these as query-time
/// diagnostics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("{location} field {field} is ambiguous")]
    FieldAmbiguous { field: String, location: Location },

    #[error("{location} field {field} does not exist")]
    FieldNotExist { field: String, location: Location },

    #[error("{location} field length does not match")]
    FieldLengthNotMatch { location: Location },

    #[error("{location} field name {name} is a duplicate")]
    DuplicateFieldName { name: String, location: Location },
}

impl ResolveError {
    pub fn ambiguous(field: impl fmt::Display, pos: Option<SourcePos>) -> Self {
        ResolveError::FieldAmbiguous { field: field.to_string(), location: Location(pos) }
    }

    pub fn not_exist(field: impl fmt::Display, pos: Option<SourcePos>) -> Self {
        ResolveError::FieldNotExist { field: field.to_string(), location: Location(pos) }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Encoding errors
// ═══════════════════════════════════════════════════════════════

/// Category of an encoder failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Encoder could not be built from its options (e.g. bad LTSV label).
    Config,
    /// Destination stream rejected a write.
    Io,
    /// A value cannot be represented in the target format or encoding.
    Format,
    /// Table → structured document conversion failed.
    Structure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Config => f.write_str("config"),
            ErrorKind::Io => f.write_str("io"),
            ErrorKind::Format => f.write_str("format"),
            ErrorKind::Structure => f.write_str("structure"),
        }
    }
}

/// Error returned by every `ViewEncoder`.
///
/// `From` impls assign the kind automatically so encoders can use `?`
/// on stream writes.
#[derive(Clone)]
pub struct EncodeError {
    kind: ErrorKind,
    message: String,
}

impl EncodeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Config, message: msg.into() }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Io, message: msg.into() }
    }

    pub fn format_err(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Format, message: msg.into() }
    }

    pub fn structure(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Structure, message: msg.into() }
    }

    /// Prefix the message, preserving the kind: `"ctx: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self { kind: self.kind, message: format!("{ctx}: {}", self.message) }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EncodeError {}

impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> Self { Self { kind: ErrorKind::Io, message: e.to_string() } }
}

impl From<serde_json::Error> for EncodeError {
    fn from(e: serde_json::Error) -> Self { Self { kind: ErrorKind::Structure, message: e.to_string() } }
}
