//! The ordering primitive: lexicographic byte-order comparison.
//!
//! Both dictionary-key sorting and set-member sorting reduce to this one
//! function applied to each member's encoded-byte representation — in
//! whichever format is being written (`encode::binary::canonical_bytes` for
//! the binary format, `encode::text`'s own private `canonical_bytes` for the
//! textual one). The two formats' canonical orders are not interchangeable:
//! e.g. binary-encoded integers sort by magnitude-then-sign, but
//! text-encoded integers sort by decimal digit string, so `10` precedes `2`
//! as text but follows it as binary.

use std::cmp::Ordering;

/// Compares two byte sequences lexicographically: at the first differing
/// index the smaller byte wins; if one is a strict prefix of the other, the
/// shorter sequence is smaller; equal sequences compare equal.
#[must_use]
pub fn compare_bytes(a: &[u8], b: &[u8]) -> Ordering {
    let min_len = a.len().min(b.len());
    match a[..min_len].cmp(&b[..min_len]) {
        Ordering::Equal => a.len().cmp(&b.len()),
        other => other,
    }
}
