//! Resumable scanner for the Syrup textual format.
//!
//! `Scanner` consumes an arbitrary slice of input per `feed()` call and
//! yields one [`Token`] per `next()` call, including `Partial*` tokens when
//! a length-prefixed payload straddles a buffer boundary. It never requires
//! the caller to buffer the whole document, and it never itself buffers
//! payload history across feeds: each emitted fragment carries only the
//! bytes consumed during that call (see `token.rs`).
//!
//! Internal state is exactly the five-tuple the distilled spec names:
//! `(state, cursor, input, prefixed_length, end_seen)`. `prefixed_length` is
//! reused for two purposes depending on `state`, mirroring the spec's own
//! description of the field: the accumulated decimal magnitude while
//! scanning a `Number`, or the remaining payload byte count while consuming
//! a length-prefixed or fixed-width atom.

pub use super::token::{ScanError, Sign, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Value,
    RecordLabel,
    Number,
    Float,
    Double,
    Binary,
    StringLit,
    SymbolLit,
}

/// A resumable textual-format tokenizer.
///
/// # Examples
///
/// ```
/// use syrup::decode::scanner::{Scanner, Token};
///
/// let mut s = Scanner::new();
/// s.feed(b"tf");
/// assert_eq!(s.next(), Ok(Token::Boolean(true)));
/// assert_eq!(s.next(), Ok(Token::Boolean(false)));
/// assert_eq!(s.next(), Err(syrup::decode::scanner::ScanError::BufferUnderrun));
/// ```
pub struct Scanner<'input> {
    state: State,
    input: &'input [u8],
    cursor: usize,
    prefixed_length: usize,
    end_seen: bool,
}

impl<'input> Default for Scanner<'input> {
    fn default() -> Self {
        Self::new()
    }
}

enum PayloadStep<'a> {
    Final(&'a [u8]),
    Partial(&'a [u8]),
}

impl<'input> Scanner<'input> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Value,
            input: &[],
            cursor: 0,
            prefixed_length: 0,
            end_seen: false,
        }
    }

    /// Replaces the unread input with `bytes`. A no-op once `end_input` has
    /// been called.
    ///
    /// # Panics
    ///
    /// Panics (in debug builds) if called while unread bytes from a
    /// previous feed remain — the caller must fully consume a slice
    /// (drive `next()` to `BufferUnderrun`) before refilling, per the
    /// scanner's lifecycle contract.
    pub fn feed(&mut self, bytes: &'input [u8]) {
        if self.end_seen {
            return;
        }
        debug_assert!(
            self.cursor >= self.input.len(),
            "feed() called with unread input still pending"
        );
        self.input = bytes;
        self.cursor = 0;
    }

    /// Marks that no further bytes will ever be fed.
    pub fn end_input(&mut self) {
        self.end_seen = true;
    }

    /// Returns the unread tail of the current input and clears it.
    pub fn drain(&mut self) -> &'input [u8] {
        let tail = &self.input[self.cursor..];
        self.input = &[];
        self.cursor = 0;
        tail
    }

    #[must_use]
    pub fn at_document_boundary(&self) -> bool {
        self.state == State::Value
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.cursor).copied()
    }

    fn bump(&mut self) -> u8 {
        let b = self.input[self.cursor];
        self.cursor += 1;
        b
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.cursor += 1;
        }
    }

    /// Consumes the next, possibly-partial, chunk of the current
    /// length-prefixed payload (tracked via `prefixed_length`).
    fn payload_step(&mut self) -> Result<PayloadStep<'input>, ScanError> {
        let available = self.input.len() - self.cursor;
        if available == 0 {
            return Err(if self.end_seen {
                ScanError::UnexpectedEndOfInput
            } else {
                ScanError::BufferUnderrun
            });
        }
        let take = self.prefixed_length.min(available);
        let start = self.cursor;
        self.cursor += take;
        self.prefixed_length -= take;
        let chunk = &self.input[start..self.cursor];
        Ok(if self.prefixed_length == 0 {
            PayloadStep::Final(chunk)
        } else {
            PayloadStep::Partial(chunk)
        })
    }

    /// Runs the state machine until a token can be returned, an error
    /// occurs, or input is exhausted (`BufferUnderrun`).
    pub fn next(&mut self) -> Result<Token, ScanError> {
        loop {
            match self.state {
                State::Value => {
                    self.skip_whitespace();
                    let Some(b) = self.peek() else {
                        if self.end_seen {
                            return Ok(Token::EndOfDocument);
                        }
                        return Err(ScanError::BufferUnderrun);
                    };
                    match b {
                        b't' => {
                            self.bump();
                            return Ok(Token::Boolean(true));
                        }
                        b'f' => {
                            self.bump();
                            return Ok(Token::Boolean(false));
                        }
                        b'F' => {
                            self.bump();
                            self.state = State::Float;
                            self.prefixed_length = 4;
                        }
                        b'D' => {
                            self.bump();
                            self.state = State::Double;
                            self.prefixed_length = 8;
                        }
                        b'{' => {
                            self.bump();
                            return Ok(Token::DictStart);
                        }
                        b'}' => {
                            self.bump();
                            return Ok(Token::DictEnd);
                        }
                        b'[' => {
                            self.bump();
                            return Ok(Token::SeqStart);
                        }
                        b']' => {
                            self.bump();
                            return Ok(Token::SeqEnd);
                        }
                        b'<' => {
                            self.bump();
                            self.state = State::RecordLabel;
                            return Ok(Token::RecStart);
                        }
                        b'>' => {
                            self.bump();
                            return Ok(Token::RecEnd);
                        }
                        b'#' => {
                            self.bump();
                            return Ok(Token::SetStart);
                        }
                        b'$' => {
                            self.bump();
                            return Ok(Token::SetEnd);
                        }
                        b'0'..=b'9' => {
                            // Do not consume here: the `Number` state's digit
                            // loop consumes it so that the first fragment's
                            // `digits` slice includes it.
                            self.prefixed_length = 0;
                            self.state = State::Number;
                        }
                        other => return Err(ScanError::Syntax(other)),
                    }
                }
                State::RecordLabel => {
                    let Some(b) = self.peek() else {
                        return Err(if self.end_seen {
                            ScanError::UnexpectedEndOfInput
                        } else {
                            ScanError::BufferUnderrun
                        });
                    };
                    if b == b'>' {
                        return Err(ScanError::Syntax(b));
                    }
                    // Not consumed: reprocess this byte as an ordinary value.
                    self.state = State::Value;
                }
                State::Number => {
                    let start = self.cursor;
                    loop {
                        match self.peek() {
                            Some(b @ b'0'..=b'9') => {
                                self.bump();
                                self.prefixed_length = self
                                    .prefixed_length
                                    .checked_mul(10)
                                    .and_then(|v| v.checked_add(usize::from(b - b'0')))
                                    .ok_or(ScanError::Overflow)?;
                            }
                            _ => break,
                        }
                    }
                    let digits = &self.input[start..self.cursor];
                    match self.peek() {
                        None if self.end_seen => return Err(ScanError::UnexpectedEndOfInput),
                        None if digits.is_empty() => return Err(ScanError::BufferUnderrun),
                        None => return Ok(Token::PartialNumber { digits: digits.into() }),
                        Some(b'+' | b'-') => {
                            let sign = if self.bump() == b'+' {
                                Sign::Positive
                            } else {
                                Sign::Negative
                            };
                            let magnitude = self.prefixed_length;
                            self.state = State::Value;
                            return Ok(Token::Integer {
                                digits: digits.into(),
                                magnitude,
                                sign,
                            });
                        }
                        Some(b':') => {
                            self.bump();
                            return self.enter_payload(State::Binary, Token::Binary);
                        }
                        Some(b'"') => {
                            self.bump();
                            return self.enter_payload(State::StringLit, Token::String);
                        }
                        Some(b'\'') => {
                            self.bump();
                            return self.enter_payload(State::SymbolLit, Token::Symbol);
                        }
                        Some(other) => return Err(ScanError::Syntax(other)),
                    }
                }
                State::Float => match self.payload_step()? {
                    PayloadStep::Final(chunk) => {
                        self.state = State::Value;
                        return Ok(Token::Float(chunk.into()));
                    }
                    PayloadStep::Partial(chunk) => {
                        return Ok(Token::PartialFloat {
                            slice: chunk.into(),
                            remaining: self.prefixed_length,
                        })
                    }
                },
                State::Double => match self.payload_step()? {
                    PayloadStep::Final(chunk) => {
                        self.state = State::Value;
                        return Ok(Token::Double(chunk.into()));
                    }
                    PayloadStep::Partial(chunk) => {
                        return Ok(Token::PartialDouble {
                            slice: chunk.into(),
                            remaining: self.prefixed_length,
                        })
                    }
                },
                State::Binary => match self.payload_step()? {
                    PayloadStep::Final(chunk) => {
                        self.state = State::Value;
                        return Ok(Token::Binary(chunk.into()));
                    }
                    PayloadStep::Partial(chunk) => {
                        return Ok(Token::PartialBinary {
                            slice: chunk.into(),
                            remaining: self.prefixed_length,
                        })
                    }
                },
                State::StringLit => match self.payload_step()? {
                    PayloadStep::Final(chunk) => {
                        self.state = State::Value;
                        return Ok(Token::String(chunk.into()));
                    }
                    PayloadStep::Partial(chunk) => {
                        return Ok(Token::PartialString {
                            slice: chunk.into(),
                            remaining: self.prefixed_length,
                        })
                    }
                },
                State::SymbolLit => match self.payload_step()? {
                    PayloadStep::Final(chunk) => {
                        self.state = State::Value;
                        return Ok(Token::Symbol(chunk.into()));
                    }
                    PayloadStep::Partial(chunk) => {
                        return Ok(Token::PartialSymbol {
                            slice: chunk.into(),
                            remaining: self.prefixed_length,
                        })
                    }
                },
            }
        }
    }

    /// Transitions into a length-prefixed payload state, special-casing the
    /// zero-length payload (no bytes to read at all).
    fn enter_payload(
        &mut self,
        state: State,
        full: impl FnOnce(Box<[u8]>) -> Token,
    ) -> Result<Token, ScanError> {
        if self.prefixed_length == 0 {
            self.state = State::Value;
            return Ok(full(Box::default()));
        }
        self.state = state;
        self.next()
    }
}
