use std::fmt;

use serde::{Deserialize, Serialize};

/// Result code reported by the provenance engine.
///
/// The known codes carry stable raw values so they can cross an FFI or wire
/// boundary. Anything else is preserved verbatim in [`ReturnCode::Other`].
/// Non-negative raw values denote success.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnCode {
    Ok,
    InvalidArgument,
    InsufficientResources,
    DbConnection,
    NotImplemented,
    Internal,
    BackendInternal,
    NotFound,
    AlreadyExists,
    /// A code outside the known set.
    Other(i32),
}

impl ReturnCode {
    /// Map a raw engine value to a code.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Ok,
            -1 => Self::InvalidArgument,
            -2 => Self::InsufficientResources,
            -3 => Self::DbConnection,
            -4 => Self::NotImplemented,
            -9 => Self::Internal,
            -10 => Self::BackendInternal,
            -11 => Self::NotFound,
            -12 => Self::AlreadyExists,
            other => Self::Other(other),
        }
    }

    /// The raw engine value.
    pub fn as_raw(&self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::InvalidArgument => -1,
            Self::InsufficientResources => -2,
            Self::DbConnection => -3,
            Self::NotImplemented => -4,
            Self::Internal => -9,
            Self::BackendInternal => -10,
            Self::NotFound => -11,
            Self::AlreadyExists => -12,
            Self::Other(raw) => *raw,
        }
    }

    /// Returns `true` for success codes (raw value >= 0).
    pub fn is_ok(&self) -> bool {
        self.as_raw() >= 0
    }

    /// Returns `true` for failure codes.
    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    /// Human-readable description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::InvalidArgument => "invalid argument",
            Self::InsufficientResources => "insufficient resources",
            Self::DbConnection => "database connection error",
            Self::NotImplemented => "not implemented",
            Self::Internal => "internal error",
            Self::BackendInternal => "internal backend error",
            Self::NotFound => "not found",
            Self::AlreadyExists => "already exists",
            Self::Other(raw) if *raw >= 0 => "success",
            Self::Other(_) => "unknown error",
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_raw())
    }
}

impl From<i32> for ReturnCode {
    fn from(raw: i32) -> Self {
        Self::from_raw(raw)
    }
}
