//! Crate-level error types.
//!
//! Each layer (scanner, plan engine, writer) owns its own error enum;
//! [`Error`] composes them for the public `parse`/`write` entry points,
//! following the teacher's `error.rs` / `parser/error.rs` split.

use thiserror::Error;

pub use crate::decode::plan::PlanError;
pub use crate::decode::scanner::ScanError;
pub use crate::encode::writer::EncodeError;

/// Top-level error returned by [`crate::parse`] and friends.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("byte source returned zero bytes while more input was required")]
    UnexpectedEndOfInput,

    #[error("trailing non-whitespace data after the decoded value")]
    TrailingData,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
