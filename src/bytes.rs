//! A byte-string newtype, distinguished from a general sequence of `u8`.
//!
//! Plain `Vec<u8>` encodes/decodes as a `Sequence` of `Integer` atoms (the
//! "Array, slice of non-byte element" shape applies uniformly whether the
//! element type is `u8` or not, since Rust gives no special treatment to
//! byte slices at the type level). Wrap in [`Bytes`] to get the `Binary`
//! atom instead — the same disambiguation the wider ecosystem reaches for
//! with a dedicated byte-string wrapper rather than specializing `Vec<u8>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Bytes(v)
    }
}

impl From<&[u8]> for Bytes {
    fn from(v: &[u8]) -> Self {
        Bytes(v.to_vec())
    }
}
