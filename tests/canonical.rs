//! Canonicalization property from §8: encoding the same Set or Dictionary
//! twice, via different in-memory orderings, yields byte-identical output.

use syrup::{write, write_binary, Value};

#[test]
fn set_canonicalizes_regardless_of_insertion_order() {
    let a = Value::Set(vec![Value::from(3i64), Value::from(1i64), Value::from(2i64)]);
    let b = Value::Set(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)]);

    let mut out_a = Vec::new();
    let mut out_b = Vec::new();
    write(&mut out_a, &a).unwrap();
    write(&mut out_b, &b).unwrap();
    assert_eq!(out_a, out_b);

    let mut bin_a = Vec::new();
    let mut bin_b = Vec::new();
    write_binary(&mut bin_a, &a).unwrap();
    write_binary(&mut bin_b, &b).unwrap();
    assert_eq!(bin_a, bin_b);
}

#[test]
fn dictionary_canonicalizes_regardless_of_insertion_order() {
    let a = Value::Dictionary(vec![
        (Value::from("zeta"), Value::from(1i64)),
        (Value::from("alpha"), Value::from(2i64)),
    ]);
    let b = Value::Dictionary(vec![
        (Value::from("alpha"), Value::from(2i64)),
        (Value::from("zeta"), Value::from(1i64)),
    ]);

    let mut out_a = Vec::new();
    let mut out_b = Vec::new();
    write(&mut out_a, &a).unwrap();
    write(&mut out_b, &b).unwrap();
    assert_eq!(out_a, out_b);
}

#[test]
fn nested_sets_canonicalize_at_every_level() {
    let a = Value::Sequence(vec![
        Value::Set(vec![Value::from(2i64), Value::from(1i64)]),
        Value::Set(vec![Value::from(4i64), Value::from(3i64)]),
    ]);
    let b = Value::Sequence(vec![
        Value::Set(vec![Value::from(1i64), Value::from(2i64)]),
        Value::Set(vec![Value::from(3i64), Value::from(4i64)]),
    ]);

    let mut out_a = Vec::new();
    let mut out_b = Vec::new();
    write(&mut out_a, &a).unwrap();
    write(&mut out_b, &b).unwrap();
    assert_eq!(out_a, out_b);
}
