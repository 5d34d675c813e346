//! The concrete `Plan` implementations for every `Decode`-able shape named
//! in §4.5: scalars, the three byte-payload atoms, `Optional`, owned
//! pointers, struct-shaped records (via `syrup_record!`), tagged-variant
//! records (via `syrup_enum!`), and the generic `Value` plan (§4.5
//! Supplemented / Open Question (c)).

pub mod bytes;
pub mod enum_;
pub mod optional;
pub mod ptr;
pub mod scalar;
pub mod struct_;
pub mod value;
