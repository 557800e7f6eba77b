use cpl_types::ReturnCode;

/// Failure reported by a provenance engine.
///
/// Carries the engine's result code and, optionally, a message with more
/// detail for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct EngineError {
    /// The engine result code.
    pub code: ReturnCode,
    /// Optional diagnostic detail.
    pub message: Option<String>,
}

impl EngineError {
    /// An error carrying only a code.
    pub fn new(code: ReturnCode) -> Self {
        Self {
            code,
            message: None,
        }
    }

    /// An error carrying a code and a diagnostic message.
    pub fn with_message(code: ReturnCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    /// Shorthand for a `NotFound` error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(ReturnCode::NotFound, message)
    }

    /// Shorthand for an `InvalidArgument` error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::with_message(ReturnCode::InvalidArgument, message)
    }

    /// Returns `true` if the engine reported that nothing matched.
    pub fn is_not_found(&self) -> bool {
        self.code == ReturnCode::NotFound
    }
}

impl From<ReturnCode> for EngineError {
    fn from(code: ReturnCode) -> Self {
        Self::new(code)
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
