//! Configuration knobs for the reader and writer.
//!
//! Mirrors the teacher's struct-of-flags-with-`Default` idiom
//! (`ParserOptions`) rather than a builder: every option has a sensible
//! default and the structs are `Copy`, so call sites that don't care can
//! just use `..Default::default()`.

/// Options controlling the typed-reader driver.
///
/// # Examples
///
/// ```
/// use syrup::ReadOptions;
///
/// let opts = ReadOptions {
///     refill_buffer_size: 256,
///     allow_trailing_data: true,
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Size, in bytes, of the buffer the driver uses to refill the scanner
    /// on `BufferUnderrun`.
    ///
    /// # Default
    ///
    /// `64`, per the programmatic surface's documented default.
    pub refill_buffer_size: usize,

    /// Whether trailing bytes after the parsed value are tolerated.
    ///
    /// When `false` (the default), `parse` drains the source once more after
    /// the root plan completes and treats any non-whitespace byte found
    /// there as a syntax error.
    pub allow_trailing_data: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            refill_buffer_size: 64,
            allow_trailing_data: false,
        }
    }
}

/// Which concrete wire format a write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// The textual Syrup format.
    #[default]
    Text,
    /// The binary Preserves format.
    Binary,
}
