//! Resumability property from §8: for every byte split of a valid encoded
//! message into k ≥ 1 chunks, feeding them successively to the scanner
//! yields the same token stream as feeding the concatenation.
//!
//! `BufferUnderrun` is deliberately excluded from the recorded stream: it is
//! the resumption signal itself, not part of the abstract token stream the
//! property is stated over, and different splits trigger it a different
//! number of times by construction.

use quickcheck_macros::quickcheck;
use syrup::decode::{ScanError, Scanner, Token};

const DOCUMENTS: &[&[u8]] = &[
    b"tf",
    b"{2'p11923+2'p243-2'p35\"Hello}",
    b"<3'point3+5+>",
    b"#0+1+2+$",
    b"29'Mechanically stabilized earth",
    b"[tf[t[f]]]",
    b"0:0\"0'",
];

/// Drains `scanner` until it either runs out of buffered input
/// (`BufferUnderrun`) or reaches a genuinely quiescent stop (an error or
/// `EndOfDocument`). Returns whether it reached such a stop.
fn drain_until_quiescent(scanner: &mut Scanner<'_>, out: &mut Vec<Result<Token, ScanError>>) -> bool {
    loop {
        match scanner.next() {
            Err(ScanError::BufferUnderrun) => return false,
            Ok(Token::EndOfDocument) => {
                out.push(Ok(Token::EndOfDocument));
                return true;
            }
            Ok(token) => out.push(Ok(token)),
            Err(err) => {
                out.push(Err(err));
                return true;
            }
        }
    }
}

fn tokenize_in_chunks(doc: &[u8], splits: &[usize]) -> Vec<Result<Token, ScanError>> {
    let mut scanner = Scanner::new();
    let mut out = Vec::new();
    let mut idx = 0;
    let mut splits = splits.iter().copied();

    while idx < doc.len() {
        let remaining = doc.len() - idx;
        let take = match splits.next() {
            Some(s) => 1 + (s % remaining),
            None => remaining,
        };
        let end = idx + take;
        scanner.feed(&doc[idx..end]);
        idx = end;
        if drain_until_quiescent(&mut scanner, &mut out) {
            return out;
        }
    }
    scanner.end_input();
    drain_until_quiescent(&mut scanner, &mut out);
    out
}

#[quickcheck]
fn resumability_matches_unsplit_token_stream(doc_index: usize, splits: Vec<usize>) -> bool {
    let doc = DOCUMENTS[doc_index % DOCUMENTS.len()];
    let whole = tokenize_in_chunks(doc, &[]);
    let chunked = tokenize_in_chunks(doc, &splits);
    whole == chunked
}

#[quickcheck]
fn resumability_holds_one_byte_at_a_time(doc_index: usize) -> bool {
    let doc = DOCUMENTS[doc_index % DOCUMENTS.len()];
    let whole = tokenize_in_chunks(doc, &[]);
    let one_byte_splits = vec![0usize; doc.len()];
    let chunked = tokenize_in_chunks(doc, &one_byte_splits);
    whole == chunked
}
