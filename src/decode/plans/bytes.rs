//! Plans for the three length-prefixed byte payloads: `String`, `Symbol`,
//! `Binary`.
//!
//! All three share one accumulation strategy (§4.5): the first `Partial*`
//! token sizes the buffer to `remaining + slice.len()` and copies; later
//! `Partial*` tokens append; the terminating full token finalizes. If the
//! full token arrives first with no preceding partial, its bytes are copied
//! directly. UTF-8 validation for `String`/`Symbol` happens once, at
//! finalization, not per fragment (see `SPEC_FULL.md` §7).

use crate::bytes::Bytes;
use crate::decode::plan::{Decode, Plan, PlanError, PlanStep};
use crate::decode::token::Token;
use crate::value::Symbol;

#[derive(Default)]
struct ByteAccumulator {
    buf: Vec<u8>,
}

impl ByteAccumulator {
    fn push_partial(&mut self, slice: &[u8], remaining: usize) {
        if self.buf.is_empty() {
            self.buf.reserve(remaining + slice.len());
        }
        self.buf.extend_from_slice(slice);
    }

    fn push_final(&mut self, chunk: &[u8]) -> Vec<u8> {
        self.buf.extend_from_slice(chunk);
        std::mem::take(&mut self.buf)
    }
}

#[derive(Default)]
pub struct BinaryPlan(ByteAccumulator);

impl Plan for BinaryPlan {
    type Output = Bytes;

    fn feed(&mut self, token: Token) -> Result<PlanStep<Self::Output>, PlanError> {
        match token {
            Token::PartialBinary { slice, remaining } => {
                self.0.push_partial(&slice, remaining);
                Ok(PlanStep::Persists)
            }
            Token::Binary(chunk) => Ok(PlanStep::Done(Bytes(self.0.push_final(&chunk)))),
            _ => Err(PlanError::UnexpectedToken { expected: "Binary" }),
        }
    }
}

impl Decode for Bytes {
    type Plan = BinaryPlan;
}

#[derive(Default)]
pub struct StringPlan(ByteAccumulator);

impl Plan for StringPlan {
    type Output = String;

    fn feed(&mut self, token: Token) -> Result<PlanStep<Self::Output>, PlanError> {
        match token {
            Token::PartialString { slice, remaining } => {
                self.0.push_partial(&slice, remaining);
                Ok(PlanStep::Persists)
            }
            Token::String(chunk) => {
                let bytes = self.0.push_final(&chunk);
                String::from_utf8(bytes).map(PlanStep::Done).map_err(|_| PlanError::InvalidUtf8)
            }
            _ => Err(PlanError::UnexpectedToken { expected: "String" }),
        }
    }
}

impl Decode for String {
    type Plan = StringPlan;
}

#[derive(Default)]
pub struct SymbolPlan(ByteAccumulator);

impl Plan for SymbolPlan {
    type Output = Symbol;

    fn feed(&mut self, token: Token) -> Result<PlanStep<Self::Output>, PlanError> {
        match token {
            Token::PartialSymbol { slice, remaining } => {
                self.0.push_partial(&slice, remaining);
                Ok(PlanStep::Persists)
            }
            Token::Symbol(chunk) => {
                let bytes = self.0.push_final(&chunk);
                String::from_utf8(bytes)
                    .map(|s| PlanStep::Done(Symbol::new(s)))
                    .map_err(|_| PlanError::InvalidUtf8)
            }
            _ => Err(PlanError::UnexpectedToken { expected: "Symbol" }),
        }
    }
}

impl Decode for Symbol {
    type Plan = SymbolPlan;
}
