//! The plan engine: per-target-shape resumable state machines.
//!
//! A [`Plan`] consumes scanner [`Token`]s one at a time and either persists
//! (needs more tokens) or completes with a value of its associated
//! `Output` type. The distilled spec describes three plan operations —
//! `feed`, `cleanup`, `destroy` — but only `feed` is realized as a trait
//! method here: `cleanup`/`destroy` are exactly what `Drop` already gives
//! every Rust value for free, so an abandoned plan (the driver hit an
//! error and stops driving it) simply goes out of scope and its
//! partially-built `String`/`Vec`/`Box` fields are released by ordinary
//! destructors. See `SPEC_FULL.md` §3/§9.

use thiserror::Error;

use super::token::Token;

/// Result of feeding one token to a [`Plan`].
#[derive(Debug)]
pub enum PlanStep<T> {
    /// The plan is not yet complete; feed it the next token.
    Persists,
    /// The plan is complete.
    Done(T),
}

/// A resumable, per-target-shape decoder.
pub trait Plan {
    type Output;

    /// Consumes one token. Returns `Persists` if the plan needs more
    /// tokens, `Done(value)` once complete, or a [`PlanError`] on mismatch.
    fn feed(&mut self, token: Token) -> Result<PlanStep<Self::Output>, PlanError>;
}

/// A type that can be materialized by the plan engine.
///
/// This is the crate's stand-in for the "compile-time schema reflection"
/// the distilled spec's Design Notes describe as an alternative to native
/// derive macros: each `Decode` impl names the `Plan` type that knows how
/// to assemble it from a token stream. See `plans/struct_.rs` for the
/// struct-shaped case, which additionally needs a compile-time field-name
/// map (realized with the `syrup_record!` declarative macro).
pub trait Decode: Sized {
    type Plan: Plan<Output = Self> + Default;
}

/// Errors raised while materializing a typed value from the token stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("unexpected token: expected {expected}")]
    UnexpectedToken { expected: &'static str },

    #[error("value does not fit the target type: {reason}")]
    IllFit { reason: &'static str },

    #[error("string or symbol payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("duplicate dictionary key: {0}")]
    KeyFoundBefore(String),

    #[error("unknown key for target schema: {0}")]
    UnknownKey(String),

    #[error("expected dictionary start")]
    ExpectedDictionaryStart,

    #[error("expected dictionary end")]
    ExpectedDictionaryEnd,

    /// Raised when `DictEnd` arrives before every required field's presence
    /// bit has been set. This is the dedicated error the distilled spec's
    /// Open Question (b) recommends in place of a generic `UnexpectedToken`.
    #[error("missing required key: {0}")]
    MissingKey(&'static str),

    /// A tagged-variant record's label Symbol did not match any variant name
    /// declared in the target enum's `syrup_enum!` invocation.
    #[error("unknown variant tag: {0}")]
    UnknownVariant(String),

    #[error("decimal magnitude accumulator overflowed usize")]
    Overflow,
}
