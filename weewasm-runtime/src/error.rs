//! Bridge error taxonomy
//!
//! Every variant is fatal to the current run: the host glue hands it to the
//! engine as a trap and nothing inside the bridge tries to recover.

use thiserror::Error;

/// Result alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// An object handle was required but something else was supplied
    #[error("{0}")]
    InvalidReference(&'static str),

    /// A property operation received the null reference as its key
    #[error("null key")]
    InvalidKey,

    /// An unbox was applied to a reference carrying the wrong tag
    #[error("{0}")]
    TypeMismatch(&'static str),
}

impl BridgeError {
    pub const NULL_REFERENCE: Self = Self::InvalidReference("null reference");
    pub const NOT_AN_OBJECT: Self = Self::InvalidReference("not a wee object");
    pub const FOREIGN_REFERENCE: Self = Self::InvalidReference("foreign reference");
    pub const NOT_AN_I32: Self = Self::TypeMismatch("not an i32");
    pub const NOT_AN_F64: Self = Self::TypeMismatch("not an f64");

    /// Short name of the error kind, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidReference(_) => "invalid_reference",
            Self::InvalidKey => "invalid_key",
            Self::TypeMismatch(_) => "type_mismatch",
        }
    }
}
