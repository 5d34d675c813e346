//! Encoders and the composing writer.

pub mod binary;
pub mod text;
pub mod writer;

pub use writer::{struct_value, union_value, write, write_binary, write_with_format, Encode, EncodeError};
