//! Dedicated tests for the tagged-variant plan `syrup_enum!` generates: the
//! union-shaped counterpart to `tests/struct_decode.rs`'s dictionary-shaped
//! one, covering its round trip and its `UnknownVariant` error path.

use syrup::decode::{Plan, PlanStep, Scanner};
use syrup::{parse, syrup_enum, write, PlanError};

syrup_enum! {
    enum Shape {
        Circle(i64),
        Square(i64),
    }
}

fn drive(bytes: &[u8]) -> Result<Shape, PlanError> {
    let mut scanner = Scanner::new();
    scanner.feed(bytes);
    let mut plan = ShapePlan::default();
    loop {
        let token = scanner.next().expect("test input is a complete token stream");
        match plan.feed(token)? {
            PlanStep::Persists => continue,
            PlanStep::Done(shape) => return Ok(shape),
        }
    }
}

#[test]
fn round_trips_the_matching_variant() {
    let mut out = Vec::new();
    write(&mut out, &Shape::Circle(5)).unwrap();
    assert_eq!(out, b"<6'Circle5+>".to_vec());

    let mut src: &[u8] = &out;
    let decoded: Shape = parse(&mut src).unwrap();
    assert_eq!(decoded, Shape::Circle(5));
}

#[test]
fn decodes_the_second_declared_variant() {
    let decoded = drive(b"<6'Square3+>").unwrap();
    assert_eq!(decoded, Shape::Square(3));
}

#[test]
fn unknown_variant_tag_is_rejected() {
    let err = drive(b"<5'Wrong5+>").unwrap_err();
    assert_eq!(err, PlanError::UnknownVariant("Wrong".to_owned()));
}

#[test]
fn anything_other_than_a_record_start_is_rejected() {
    let err = drive(b"t").unwrap_err();
    assert_eq!(err, PlanError::UnexpectedToken { expected: "record start" });
}
