//! Encoding and streaming decoding for two related data-interchange
//! formats that share one abstract value model: the Syrup textual format
//! and the Preserves Binary format.
//!
//! - [`parse`] / [`parse_with_buffer`] drive a resumable scanner and a
//!   per-type [`Decode`] plan over a pull-based [`std::io::Read`] source,
//!   targeting the Syrup text format (decoding the binary format is out of
//!   scope — see `SPEC_FULL.md` §1).
//! - [`write`] / [`write_binary`] serialize any [`Encode`] type to either
//!   format, honoring canonical dictionary-key/set-member ordering and
//!   minimum-width binary integers.
//! - [`Value`] is the untyped universe both formats serialize; it
//!   implements both traits, so `parse::<Value>(..)` and `write(.., &value)`
//!   round-trip arbitrary documents without a host schema.

pub mod bytes;
pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod ordering;
pub mod value;

/// Re-exported so `$crate::paste!` inside the [`syrup_record!`] macro
/// resolves without requiring downstream crates to depend on `paste`
/// themselves.
#[doc(hidden)]
pub use paste::paste;

pub use bytes::Bytes;
pub use decode::{Decode, Plan, PlanError, PlanStep, Scanner};
pub use encode::{struct_value, union_value, Encode, EncodeError};
pub use error::Error;
pub use options::{Format, ReadOptions};
pub use value::{Record, Symbol, Value};

use std::io::Read;

use decode::driver::Driver;

/// Parses one `T` from `source`, using the default 64-byte refill buffer.
///
/// # Errors
///
/// See [`Driver::drive`].
pub fn parse<T: Decode>(source: &mut dyn Read) -> Result<T, Error> {
    Driver::new(source, ReadOptions::default()).drive()
}

/// As [`parse`], with an explicit refill-buffer size.
///
/// # Errors
///
/// See [`Driver::drive`].
pub fn parse_with_buffer<T: Decode>(source: &mut dyn Read, buffer_size: usize) -> Result<T, Error> {
    let options = ReadOptions { refill_buffer_size: buffer_size, ..ReadOptions::default() };
    Driver::new(source, options).drive()
}

/// Writes `value` in the Syrup textual format.
///
/// # Errors
///
/// Returns [`EncodeError::Io`] if `sink` fails.
pub fn write<T: Encode + ?Sized>(sink: &mut dyn std::io::Write, value: &T) -> Result<(), EncodeError> {
    encode::write(sink, value)
}

/// Writes `value` in the Preserves Binary format.
///
/// # Errors
///
/// Returns [`EncodeError::Io`] if `sink` fails.
pub fn write_binary<T: Encode + ?Sized>(sink: &mut dyn std::io::Write, value: &T) -> Result<(), EncodeError> {
    encode::write_binary(sink, value)
}

/// Writes `value` in whichever format `format` selects.
///
/// # Errors
///
/// Returns [`EncodeError::Io`] if `sink` fails.
pub fn write_with_format<T: Encode + ?Sized>(sink: &mut dyn std::io::Write, value: &T, format: Format) -> Result<(), EncodeError> {
    encode::writer::write_with_format(sink, value, format)
}
