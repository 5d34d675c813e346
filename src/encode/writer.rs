//! The composing writer: a schema-driven layer atop either encoder.
//!
//! Every [`Encode`] impl produces an intermediate [`Value`] via `to_value`,
//! and the two stateless encoders (`text`, `binary`) take it from there. This
//! is a deliberate simplification of the distilled spec's "emits an encoding
//! directly from a type descriptor" architecture: routing everything through
//! one abstract value means the dictionary-key/set-member canonicalization
//! contract only has to be implemented once (in `encode_value`, not once per
//! format), at the cost of an intermediate allocation per write. See
//! `DESIGN.md`.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;
use std::io::Write as IoWrite;

use num_bigint::BigInt;
use thiserror::Error;

use crate::bytes::Bytes;
use crate::options::Format;
use crate::value::{Symbol, Value};

/// Errors raised while writing.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A type that can be converted to the abstract value model and written in
/// either concrete format.
///
/// A host type overrides the default "struct" shape's record label by
/// setting [`Encode::RECORD_LABEL`]; `syrup_record!` sets this automatically
/// to the declared name, standing in for the distilled spec's "overriding
/// constant" extensibility point. `syrup_enum!`'s union shape has no single
/// label to override — each variant's own name is its Record label — so its
/// generated impl leaves `RECORD_LABEL` at the default. The "custom hook"
/// extensibility point is just overriding `to_value` directly.
pub trait Encode {
    /// Defaults to the empty string, meaning "no struct shape; `to_value`
    /// does not need a label."
    const RECORD_LABEL: &'static str = "";

    fn to_value(&self) -> Value;

    fn encode_text(&self, out: &mut Vec<u8>) {
        crate::encode::text::encode_value(out, &self.to_value());
    }

    fn encode_binary(&self, out: &mut Vec<u8>) {
        crate::encode::binary::encode_value(out, &self.to_value());
    }
}

macro_rules! impl_encode_for_int {
    ($($t:ty),*) => {
        $(impl Encode for $t {
            fn to_value(&self) -> Value {
                Value::Integer(BigInt::from(*self))
            }
        })*
    };
}

impl_encode_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Encode for bool {
    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl Encode for f32 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Encode for f64 {
    fn to_value(&self) -> Value {
        Value::Double(*self)
    }
}

impl Encode for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl Encode for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Encode for Symbol {
    fn to_value(&self) -> Value {
        Value::Symbol(self.clone())
    }
}

impl Encode for BigInt {
    fn to_value(&self) -> Value {
        Value::Integer(self.clone())
    }
}

impl Encode for Bytes {
    fn to_value(&self) -> Value {
        Value::Binary(self.0.clone())
    }
}

impl Encode for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: Encode> Encode for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Boolean(false),
        }
    }
}

impl<T: Encode> Encode for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(Encode::to_value).collect())
    }
}

impl<T: Encode> Encode for [T] {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(Encode::to_value).collect())
    }
}

impl<T: Encode + Eq + Hash> Encode for HashSet<T> {
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(Encode::to_value).collect())
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Dictionary(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }
}

/// Builds the `Value::Record` a "union" (tagged-variant) shape writes: the
/// variant-name Symbol as label, the payload as the sole field.
#[must_use]
pub fn union_value(variant_name: &str, payload: Value) -> Value {
    Value::record(Value::Symbol(Symbol::new(variant_name)), vec![payload])
}

/// Builds the `Value::Dictionary` a "struct" shape writes, sorting
/// `(name, value)` pairs by the canonical byte order of the name's Symbol
/// encoding (see `SPEC_FULL.md` §4.4's canonicalization contract). Used by
/// `syrup_record!`.
#[must_use]
pub fn struct_value(fields: Vec<(&'static str, Value)>) -> Value {
    Value::Dictionary(
        fields
            .into_iter()
            .map(|(name, value)| (Value::Symbol(Symbol::new(name)), value))
            .collect(),
    )
}

/// Writes `value` in the Syrup textual format.
///
/// # Errors
///
/// Returns [`EncodeError::Io`] if `sink` fails.
pub fn write<T: Encode + ?Sized>(sink: &mut dyn IoWrite, value: &T) -> Result<(), EncodeError> {
    let mut buf = Vec::new();
    value.encode_text(&mut buf);
    sink.write_all(&buf)?;
    Ok(())
}

/// Writes `value` in the Preserves Binary format.
///
/// # Errors
///
/// Returns [`EncodeError::Io`] if `sink` fails.
pub fn write_binary<T: Encode + ?Sized>(sink: &mut dyn IoWrite, value: &T) -> Result<(), EncodeError> {
    let mut buf = Vec::new();
    value.encode_binary(&mut buf);
    sink.write_all(&buf)?;
    Ok(())
}

/// Writes `value` in whichever format `format` selects, per §2's format
/// selector.
///
/// # Errors
///
/// Returns [`EncodeError::Io`] if `sink` fails.
pub fn write_with_format<T: Encode + ?Sized>(sink: &mut dyn IoWrite, value: &T, format: Format) -> Result<(), EncodeError> {
    match format {
        Format::Text => write(sink, value),
        Format::Binary => write_binary(sink, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_roundtrips_through_vec_sink() {
        let mut sink = Vec::new();
        write(&mut sink, &true).unwrap();
        assert_eq!(sink, b"t");
    }

    #[test]
    fn write_binary_roundtrips_through_vec_sink() {
        let mut sink = Vec::new();
        write_binary(&mut sink, &0i64).unwrap();
        assert_eq!(sink, vec![crate::encode::binary::TAG_INTEGER, 0x00]);
    }

    #[test]
    fn write_with_format_selects_the_requested_format() {
        let mut text = Vec::new();
        write_with_format(&mut text, &true, Format::Text).unwrap();
        assert_eq!(text, b"t");

        let mut binary = Vec::new();
        write_with_format(&mut binary, &true, Format::Binary).unwrap();
        assert_eq!(binary, vec![crate::encode::binary::TAG_BOOLEAN_TRUE]);
    }

    #[test]
    fn struct_value_sorts_fields_by_canonical_name_order() {
        let v = struct_value(vec![("p2", Value::from(2i64)), ("p1", Value::from(1i64))]);
        let mut out = Vec::new();
        crate::encode::text::encode_value(&mut out, &v);
        assert_eq!(out, b"{2'p11+2'p22+}".to_vec());
    }
}
