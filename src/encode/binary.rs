//! Stateless emission of the Preserves Binary format.
//!
//! Every function here writes directly to a `Vec<u8>` and never allocates
//! beyond what it appends; there is no writer-level state. The [`Value`]
//! recursion (`encode_value`) is also the substrate [`canonical_bytes`] uses
//! to compute the sort key `Set`/`Dictionary` canonicalization needs, so
//! this module is depended on by both `writer.rs` and `value.rs`.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::value::{Symbol, Value};

pub const TAG_BOOLEAN_FALSE: u8 = 0x80;
pub const TAG_BOOLEAN_TRUE: u8 = 0x81;
/// Shared by Float and Double: the two are distinguished purely by the
/// LEB128 length that follows (4 for Float, 8 for Double), not by tag byte.
pub const TAG_FLOATING: u8 = 0x87;
pub const TAG_INTEGER: u8 = 0xB0;
pub const TAG_STRING: u8 = 0xB1;
pub const TAG_BINARY: u8 = 0xB2;
pub const TAG_SYMBOL: u8 = 0xB3;
pub const TAG_RECORD: u8 = 0xB4;
pub const TAG_SEQUENCE: u8 = 0xB5;
pub const TAG_SET: u8 = 0xB6;
pub const TAG_DICTIONARY: u8 = 0xB7;
pub const TAG_END: u8 = 0x84;

/// Appends `n` as unsigned LEB128.
pub fn write_leb128(out: &mut Vec<u8>, mut n: u64) {
    loop {
        let byte = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

pub fn write_boolean(out: &mut Vec<u8>, b: bool) {
    out.push(if b { TAG_BOOLEAN_TRUE } else { TAG_BOOLEAN_FALSE });
}

pub fn write_float(out: &mut Vec<u8>, v: f32) {
    out.push(TAG_FLOATING);
    write_leb128(out, 4);
    out.extend_from_slice(&v.to_be_bytes());
}

pub fn write_double(out: &mut Vec<u8>, v: f64) {
    out.push(TAG_FLOATING);
    write_leb128(out, 8);
    out.extend_from_slice(&v.to_be_bytes());
}

/// Minimum-width two's-complement signed integer, per §4.3/§8 scenario 4:
/// zero is an empty payload, non-zero uses `ceil((bitlen(|v|)+1)/8)` bytes.
pub fn write_integer(out: &mut Vec<u8>, v: &BigInt) {
    out.push(TAG_INTEGER);
    if v.is_zero() {
        write_leb128(out, 0);
        return;
    }
    let bytes = v.to_signed_bytes_be();
    write_leb128(out, bytes.len() as u64);
    out.extend_from_slice(&bytes);
}

pub fn write_binary(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(TAG_BINARY);
    write_leb128(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

pub fn write_string(out: &mut Vec<u8>, s: &str) {
    out.push(TAG_STRING);
    write_leb128(out, s.len() as u64);
    out.extend_from_slice(s.as_bytes());
}

pub fn write_symbol(out: &mut Vec<u8>, s: &Symbol) {
    out.push(TAG_SYMBOL);
    write_leb128(out, s.as_str().len() as u64);
    out.extend_from_slice(s.as_str().as_bytes());
}

/// Sorts `items` by the lexicographic byte order of each `canonical_bytes`
/// encoding (see `ordering::compare_bytes`), then writes them in that order.
fn write_sorted<'a, T>(out: &mut Vec<u8>, items: impl Iterator<Item = &'a T>, key: impl Fn(&'a T) -> Vec<u8>, emit: impl Fn(&mut Vec<u8>, &'a T))
where
    T: 'a,
{
    let mut tagged: Vec<(Vec<u8>, &T)> = items.map(|item| (key(item), item)).collect();
    tagged.sort_by(|(a, _), (b, _)| crate::ordering::compare_bytes(a, b));
    for (_, item) in tagged {
        emit(out, item);
    }
}

/// Recursively encodes `value` in canonical binary form. This is the sort
/// key substrate for `Set`/`Dictionary` canonicalization (see `value.rs`)
/// and the core of the binary writer (see `writer.rs`).
pub fn encode_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Boolean(b) => write_boolean(out, *b),
        Value::Float(f) => write_float(out, *f),
        Value::Double(d) => write_double(out, *d),
        Value::Integer(n) => write_integer(out, n),
        Value::Binary(b) => write_binary(out, b),
        Value::String(s) => write_string(out, s),
        Value::Symbol(s) => write_symbol(out, s),
        Value::Sequence(items) => {
            out.push(TAG_SEQUENCE);
            for item in items {
                encode_value(out, item);
            }
            out.push(TAG_END);
        }
        Value::Set(members) => {
            out.push(TAG_SET);
            write_sorted(out, members.iter(), canonical_bytes, encode_value);
            out.push(TAG_END);
        }
        Value::Dictionary(entries) => {
            out.push(TAG_DICTIONARY);
            write_sorted(
                out,
                entries.iter(),
                |(k, _)| canonical_bytes(k),
                |out, (k, v)| {
                    encode_value(out, k);
                    encode_value(out, v);
                },
            );
            out.push(TAG_END);
        }
        Value::Record(record) => {
            out.push(TAG_RECORD);
            encode_value(out, &record.label);
            for field in &record.fields {
                encode_value(out, field);
            }
            out.push(TAG_END);
        }
    }
}

/// The canonical binary encoding of `value`, used as a sort key by
/// `Set`/`Dictionary` ordering and by `Value`'s order-insensitive `PartialEq`.
#[must_use]
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    encode_value(&mut out, value);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leb128_multi_byte() {
        let mut out = Vec::new();
        write_leb128(&mut out, 300);
        assert_eq!(out, vec![0xAC, 0x02]);
    }

    #[test]
    fn integer_boundary_scenario() {
        let mut out = Vec::new();
        write_integer(&mut out, &BigInt::from(-34203));
        assert_eq!(out, vec![TAG_INTEGER, 0x03, 0xFF, 0x7A, 0x65]);

        let mut out = Vec::new();
        write_integer(&mut out, &BigInt::from(0));
        assert_eq!(out, vec![TAG_INTEGER, 0x00]);
    }

    #[test]
    fn canonical_bytes_is_order_independent_over_set_members() {
        let a = Value::Set(vec![Value::from(1i64), Value::from(2i64)]);
        let b = Value::Set(vec![Value::from(2i64), Value::from(1i64)]);
        assert_eq!(canonical_bytes(&a), canonical_bytes(&b));
    }
}
