use thiserror::Error;
use tracing::warn;

use cpl_engine::{EngineError, EngineResult};
use cpl_types::ReturnCode;

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Errors surfaced by the provenance client.
///
/// Every variant except `Config` originates from an engine result code,
/// recoverable through [`CplError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CplError {
    /// The natural key or identifier resolves to nothing.
    #[error("object not found{}", detail(.message))]
    NotFound { message: Option<String> },

    /// The engine rejected the input as malformed.
    #[error("invalid argument{}", detail(.message))]
    InvalidArgument { message: Option<String> },

    /// Any other engine failure.
    #[error("engine failure: {code}{}", detail(.message))]
    Engine {
        code: ReturnCode,
        message: Option<String>,
    },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CplError {
    /// The engine result code behind this error, if any.
    pub fn code(&self) -> Option<ReturnCode> {
        match self {
            Self::NotFound { .. } => Some(ReturnCode::NotFound),
            Self::InvalidArgument { .. } => Some(ReturnCode::InvalidArgument),
            Self::Engine { code, .. } => Some(*code),
            Self::Config(_) => None,
        }
    }

    /// Returns `true` for [`CplError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<EngineError> for CplError {
    fn from(err: EngineError) -> Self {
        let EngineError { code, message } = err;
        match code {
            ReturnCode::NotFound => Self::NotFound { message },
            ReturnCode::InvalidArgument => Self::InvalidArgument { message },
            code => Self::Engine { code, message },
        }
    }
}

/// Map an engine outcome, logging hard failures.
pub(crate) fn relay<T>(operation: &'static str, result: EngineResult<T>) -> CplResult<T> {
    result.map_err(|err| {
        warn!(operation, code = %err.code, error = %err, "engine call failed");
        CplError::from(err)
    })
}

/// Result alias for client operations.
pub type CplResult<T> = Result<T, CplError>;
