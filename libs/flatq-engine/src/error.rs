use flatq_api::{ArityError, EncodeError, ResolveError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Encode(#[from] EncodeError),

    /// Nothing to render. Recoverable; the caller decides what to show.
    #[error("empty result set")]
    EmptyResultSet,

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ArityError> for EngineError {
    fn from(e: ArityError) -> Self {
        EngineError::Encode(EncodeError::structure(e.to_string()))
    }
}

impl EngineError {
    pub fn is_empty_result_set(&self) -> bool {
        matches!(self, EngineError::EmptyResultSet)
    }

    /// Add context to the error.
    ///
    /// For `Encode`, context goes to the inner `EncodeError`. Resolution
    /// and empty-result errors are returned as they are.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Encode(e) => EngineError::Encode(e.with_context(ctx)),
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(EngineError::EmptyResultSet.to_string(), "empty result set");
        assert!(EngineError::EmptyResultSet.is_empty_result_set());

        let e = EngineError::from(ResolveError::not_exist("t.c", None));
        assert_eq!(e.to_string(), "[L:- C:-] field t.c does not exist");
        assert!(!e.is_empty_result_set());

        let e = EngineError::Config("bad".into()).with_context("flags.toml");
        assert_eq!(e.to_string(), "config error: flags.toml: bad");
    }
}
