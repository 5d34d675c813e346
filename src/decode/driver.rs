//! Drives a [`Scanner`] against a pull-based byte source and feeds the
//! resulting tokens to a [`Plan`], refilling on [`ScanError::BufferUnderrun`]
//! and erroring on a genuine end-of-input mid-value (§4.5, §7).
//!
//! The scanner and its refill buffer live as plain locals inside
//! [`Driver::drive`] rather than as struct fields: `Scanner<'input>` borrows
//! whichever slice was most recently fed to it, and a helper method that
//! took the buffer as a reborrowed `&mut [u8]` parameter could not hand that
//! borrow to `scanner.feed` without shrinking it to the helper call's own
//! lifetime. Reading bytes and feeding them to the scanner therefore both
//! happen directly in `drive`'s own loop.

use std::io::Read;

use crate::decode::plan::{Decode, Plan, PlanStep};
use crate::decode::scanner::{ScanError, Scanner, Token};
use crate::error::Error;
use crate::options::ReadOptions;

/// Drives a typed parse of one value from a byte source.
pub struct Driver<'src> {
    source: &'src mut dyn Read,
    options: ReadOptions,
}

impl<'src> Driver<'src> {
    #[must_use]
    pub fn new(source: &'src mut dyn Read, options: ReadOptions) -> Self {
        Self { source, options }
    }

    /// Parses one `T` from the source, per §4.5's pull/refill loop.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the source errs, [`Error::Scan`] /
    /// [`Error::Plan`] on malformed input, [`Error::UnexpectedEndOfInput`] if
    /// the source is exhausted before a complete value is assembled, and
    /// [`Error::TrailingData`] if non-whitespace bytes follow the value and
    /// `options.allow_trailing_data` is `false`.
    pub fn drive<T: Decode>(&mut self) -> Result<T, Error> {
        let mut plan = T::Plan::default();
        let mut scanner = Scanner::new();
        let mut buf = vec![0u8; self.options.refill_buffer_size];

        let value = loop {
            match scanner.next() {
                Ok(Token::EndOfDocument) => return Err(Error::UnexpectedEndOfInput),
                Ok(token) => {
                    if let PlanStep::Done(value) = plan.feed(token)? {
                        break value;
                    }
                }
                Err(ScanError::BufferUnderrun) => {
                    let n = self.source.read(&mut buf)?;
                    if n == 0 {
                        scanner.end_input();
                    } else {
                        scanner.feed(&buf[..n]);
                    }
                }
                Err(err) => return Err(err.into()),
            }
        };

        if self.options.allow_trailing_data {
            return Ok(value);
        }
        loop {
            match scanner.next() {
                Ok(Token::EndOfDocument) => return Ok(value),
                Ok(_) => return Err(Error::TrailingData),
                Err(ScanError::BufferUnderrun) => {
                    let n = self.source.read(&mut buf)?;
                    if n == 0 {
                        scanner.end_input();
                    } else {
                        scanner.feed(&buf[..n]);
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::*;

    use super::*;
    use crate::value::Value;

    #[rstest]
    #[timeout(Duration::from_millis(250))]
    fn drives_a_simple_value_from_a_slow_reader() {
        let mut src: &[u8] = b"t";
        let mut driver = Driver::new(&mut src, ReadOptions::default());
        let value: Value = driver.drive().unwrap();
        assert_eq!(value, Value::Boolean(true));
    }

    #[test]
    fn rejects_trailing_non_whitespace_by_default() {
        let mut src: &[u8] = b"t f";
        let mut driver = Driver::new(&mut src, ReadOptions::default());
        let err = driver.drive::<Value>().unwrap_err();
        assert!(matches!(err, Error::TrailingData));
    }

    #[test]
    fn allows_trailing_data_when_configured() {
        let mut src: &[u8] = b"t f";
        let opts = ReadOptions { allow_trailing_data: true, ..ReadOptions::default() };
        let mut driver = Driver::new(&mut src, opts);
        let value: Value = driver.drive().unwrap();
        assert_eq!(value, Value::Boolean(true));
    }

    #[test]
    fn errors_on_truncated_input() {
        let mut src: &[u8] = b"3\"hi";
        let mut driver = Driver::new(&mut src, ReadOptions::default());
        let err = driver.drive::<Value>().unwrap_err();
        assert!(matches!(err, Error::Scan(ScanError::UnexpectedEndOfInput)));
    }

    #[rstest]
    #[timeout(Duration::from_millis(250))]
    fn refills_across_a_tiny_buffer() {
        let mut src: &[u8] = b"<3'point3+5+>";
        let opts = ReadOptions { refill_buffer_size: 2, ..ReadOptions::default() };
        let mut driver = Driver::new(&mut src, opts);
        let value: Value = driver.drive().unwrap();
        assert_eq!(
            value,
            Value::record(
                Value::Symbol(crate::value::Symbol::new("point")),
                vec![Value::from(3i64), Value::from(5i64)]
            )
        );
    }
}
