//! Stateless emission of the Syrup textual format.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::value::{Symbol, Value};

pub fn write_boolean(out: &mut Vec<u8>, b: bool) {
    out.push(if b { b't' } else { b'f' });
}

pub fn write_float(out: &mut Vec<u8>, v: f32) {
    out.push(b'F');
    out.extend_from_slice(&v.to_be_bytes());
}

pub fn write_double(out: &mut Vec<u8>, v: f64) {
    out.push(b'D');
    out.extend_from_slice(&v.to_be_bytes());
}

pub fn write_integer(out: &mut Vec<u8>, v: &BigInt) {
    let magnitude = v.abs();
    out.extend_from_slice(magnitude.to_string().as_bytes());
    out.push(if v.is_negative() { b'-' } else { b'+' });
}

pub fn write_binary(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes.len().to_string().as_bytes());
    out.push(b':');
    out.extend_from_slice(bytes);
}

pub fn write_string(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.len().to_string().as_bytes());
    out.push(b'"');
    out.extend_from_slice(s.as_bytes());
}

pub fn write_symbol(out: &mut Vec<u8>, s: &Symbol) {
    out.extend_from_slice(s.as_str().len().to_string().as_bytes());
    out.push(b'\'');
    out.extend_from_slice(s.as_str().as_bytes());
}

/// This format's own canonical encoding of `value`, used only as a sort key
/// for `Set`/`Dictionary` members. Canonical order is defined over each
/// format's own bytes (see `ordering.rs`), so this must not be the binary
/// format's `canonical_bytes` — the two formats don't agree on integer byte
/// order (e.g. `10` sorts before `2` as text but after it as binary).
fn canonical_bytes(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    encode_value(&mut out, value);
    out
}

/// Sorts `items` by the lexicographic byte order of each `canonical_bytes`
/// encoding, then writes them with `emit` in that order.
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

/// Recursively encodes `value` in canonical textual form.
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
            out.push(b'[');
            for item in items {
                encode_value(out, item);
            }
            out.push(b']');
        }
        Value::Set(members) => {
            out.push(b'#');
            write_sorted(out, members.iter(), canonical_bytes, encode_value);
            out.push(b'$');
        }
        Value::Dictionary(entries) => {
            out.push(b'{');
            write_sorted(
                out,
                entries.iter(),
                |(k, _)| canonical_bytes(k),
                |out, (k, v)| {
                    encode_value(out, k);
                    encode_value(out, v);
                },
            );
            out.push(b'}');
        }
        Value::Record(record) => {
            out.push(b'<');
            encode_value(out, &record.label);
            for field in &record.fields {
                encode_value(out, field);
            }
            out.push(b'>');
        }
    }
}
