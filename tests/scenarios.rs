//! The distilled spec's six concrete worked scenarios (§8), driven through
//! the public `parse`/`write` surface rather than the internal scanner/plan
//! types directly.

use syrup::decode::{ScanError, Scanner, Token};
use syrup::{parse, syrup_record, write, Value};

#[test]
fn scenario_1_textual_boolean_pair() {
    let mut scanner = Scanner::new();
    scanner.feed(b"tf");
    assert_eq!(scanner.next(), Ok(Token::Boolean(true)));
    assert_eq!(scanner.next(), Ok(Token::Boolean(false)));
    assert_eq!(scanner.next(), Err(ScanError::BufferUnderrun));
}

syrup_record! {
    struct Scenario3 as "unused" {
        p1: u32,
        p2: i32,
        p3: String,
    }
}

#[test]
fn scenario_3_textual_struct_round_trip() {
    let mut src: &[u8] = b"{2'p11923+2'p243-2'p35\"Hello}";
    let decoded: Scenario3 = parse(&mut src).unwrap();
    assert_eq!(decoded.p1, 1923);
    assert_eq!(decoded.p2, -43);
    assert_eq!(decoded.p3, "Hello");

    let mut out = Vec::new();
    write(&mut out, &decoded).unwrap();
    assert_eq!(out, b"{2'p11923+2'p243-2'p35\"Hello}".to_vec());
}

#[test]
fn scenario_4_binary_integer_boundary() {
    let mut out = Vec::new();
    syrup::write_binary(&mut out, &-34203i64).unwrap();
    assert_eq!(out, vec![0xB0, 0x03, 0xFF, 0x7A, 0x65]);

    let mut out = Vec::new();
    syrup::write_binary(&mut out, &0i64).unwrap();
    assert_eq!(out, vec![0xB0, 0x00]);
}

#[test]
fn scenario_5_set_canonical_order() {
    let set = Value::Set((0..34i64).map(Value::from).collect());
    let mut out = Vec::new();
    write(&mut out, &set).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "#0+1+10+11+12+13+14+15+16+17+18+19+2+20+21+22+23+24+25+26+27+28+29+3+30+31+32+33+4+5+6+7+8+9+$"
    );
}

#[test]
fn scenario_6_empty_record_is_invalid() {
    let mut src: &[u8] = b"<>";
    let err = parse::<Value>(&mut src).unwrap_err();
    assert!(matches!(err, syrup::Error::Scan(syrup::decode::ScanError::Syntax(b'>'))));
}
