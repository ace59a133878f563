//! The reader surface: CRLF line reads and length-exact raw-byte reads over
//! one shared byte position.


use std::fmt;
use std::io::Read;

use crate::codec::Codec;
use crate::error::{ConfigError, ReadError};
use crate::staging::{Staging, read_retrying};

/// Window capacities for a [`WireReader`].
///
/// # Default
///
/// A 1024-byte raw window and a 1024-char decoded window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderOptions {
    /// Raw byte window capacity, at least 2 so a CRLF terminator split
    /// across two fills always fits. The window must also be able to hold
    /// one complete multi-byte sequence of the active codec, or decoding
    /// stalls with [`ReadError::Saturated`].
    pub byte_capacity: usize,
    /// Decoded char window capacity, at least 1. Resolving a `\r` whose
    /// successor arrives in a later fill needs room for both characters, so
    /// anything below 2 only suits terminator-free traffic.
    pub char_capacity: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            byte_capacity: 1024,
            char_capacity: 1024,
        }
    }
}

/// Streaming text reader over a blocking byte source.
///
/// One reader binds one source and one initial codec for its whole lifetime.
/// It is not reentrant and performs no locking; every read may block on the
/// source. Dropping the reader does not close the source — hand over `&mut`
/// of an owned source (any `&mut R` is itself [`Read`]) or reclaim it with
/// [`WireReader::into_inner`].
pub struct WireReader<R> {
    source: R,
    staging: Staging,
}

impl<R: Read> WireReader<R> {
    /// Creates a reader with the default window capacities.
    pub fn new(source: R, codec: Box<dyn Codec>) -> Self {
        let options = ReaderOptions::default();
        Self {
            source,
            staging: Staging::new(codec, options.byte_capacity, options.char_capacity),
        }
    }

    /// Creates a reader with explicit window capacities.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when a capacity is below its minimum.
    pub fn with_options(
        source: R,
        codec: Box<dyn Codec>,
        options: ReaderOptions,
    ) -> Result<Self, ConfigError> {
        if options.byte_capacity < 2 {
            return Err(ConfigError::ByteCapacity(options.byte_capacity));
        }
        if options.char_capacity < 1 {
            return Err(ConfigError::CharCapacity(options.char_capacity));
        }
        Ok(Self {
            source,
            staging: Staging::new(codec, options.byte_capacity, options.char_capacity),
        })
    }

    /// Redeclares the encoding for data already in flight but not yet read
    /// as text.
    ///
    /// Bytes buffered but unconsumed re-decode immediately under the new
    /// codec — the headers-then-body charset switch — while bytes already
    /// returned keep whatever interpretation they were read under. The old
    /// codec's carry state is discarded.
    pub fn set_codec(&mut self, codec: Box<dyn Codec>) {
        self.staging.set_codec(codec);
    }

    /// The active codec.
    #[must_use]
    pub fn codec(&self) -> &dyn Codec {
        self.staging.codec()
    }

    /// Reads one line, decoded under the active codec, with the CR-then-LF
    /// terminator stripped.
    ///
    /// A `\r` not followed by `\n` is ordinary content, not a terminator.
    /// When the source is exhausted, any accumulated text — including a
    /// previously held trailing `\r`, which is then known to be final — is
    /// returned once as the last line; afterwards every call returns
    /// `Ok(None)`. Exhaustion is a normal terminal condition on this path,
    /// never an error.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if the source fails, [`ReadError::Saturated`] if
    /// the buffered data can make no progress (see [`ReaderOptions`]).
    pub fn read_line(&mut self) -> Result<Option<String>, ReadError> {
        let mut line = String::new();
        loop {
            if self.scan(&mut line) {
                return Ok(Some(line));
            }
            if self.staging.fill(&mut self.source)? == 0 {
                if self.staging.has_undecoded() {
                    // pinned char window; the remaining bytes can never
                    // surface as text
                    return Err(ReadError::Saturated {
                        byte_capacity: self.staging.byte_capacity(),
                    });
                }
                if !self.staging.chars().is_empty() {
                    // only a held \r can remain, and it is final content now
                    debug_assert!(matches!(self.staging.chars(), ['\r']));
                    line.push('\r');
                    self.staging.compact(1);
                }
                return Ok(if line.is_empty() { None } else { Some(line) });
            }
        }
    }

    /// Reads exactly `n` raw bytes.
    ///
    /// Buffered bytes are drained first; any remainder is read directly from
    /// the source in window-sized chunks, bypassing decoding entirely. The
    /// char window stays aligned through codec-computed character counts, so
    /// a later [`read_line`](WireReader::read_line) resumes at the right
    /// position.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfStream`] if the source exhausts before `n` bytes
    /// arrive — the exact-length contract admits no truncation, even one
    /// byte short of the total. [`ReadError::Io`] if the source fails.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, ReadError> {
        let mut out = Vec::with_capacity(n);
        let buffered = self.staging.buffered_bytes();
        if buffered >= n {
            self.staging.take(n, &mut out);
            return Ok(out);
        }

        self.staging.take(buffered, &mut out);
        let mut missing = n - buffered;
        while missing > 0 {
            let chunk = missing.min(self.staging.byte_capacity());
            let scratch = self.staging.scratch();
            let got = read_retrying(&mut self.source, &mut scratch[..chunk])?;
            if got == 0 {
                return Err(ReadError::EndOfStream { missing });
            }
            out.extend_from_slice(&scratch[..got]);
            missing -= got;
        }
        Ok(out)
    }

    /// Reads exactly `n` raw bytes and decodes them standalone under the
    /// active codec, independent of the streaming decoder's carry state.
    ///
    /// The caller is responsible for requesting a byte count aligned to
    /// character boundaries; a misaligned request yields truncated or
    /// malformed trailing text rather than an error.
    ///
    /// # Errors
    ///
    /// As for [`read_bytes`](WireReader::read_bytes).
    pub fn read_bytes_as_text(&mut self, n: usize) -> Result<String, ReadError> {
        let bytes = self.read_bytes(n)?;
        Ok(self.staging.codec().decode(&bytes))
    }

    /// One SCANNING pass over the char window, moving characters into
    /// `line`. Returns `true` once a complete terminator was consumed. A
    /// lone trailing `\r` is left as the window's first character (the
    /// HOLD-CR state), so the next pass sees it together with its successor.
    fn scan(&mut self, line: &mut String) -> bool {
        loop {
            let chars = self.staging.chars();
            let available = chars.len();
            let mut consumed = 0;
            let mut terminated = false;
            while consumed < available {
                let c = chars[consumed];
                if c == '\r' {
                    if consumed + 1 == available {
                        break; // HOLD-CR: the successor is unknown
                    }
                    if chars[consumed + 1] == '\n' {
                        terminated = true;
                        break;
                    }
                    // bare \r is ordinary content on this wire
                }
                line.push(c);
                consumed += 1;
            }
            if terminated {
                self.staging.compact(consumed + 2);
                return true;
            }
            self.staging.compact(consumed);
            if self.staging.chars().len() == available - consumed {
                // compacting surfaced nothing new; a fill is required
                return false;
            }
        }
    }

    /// The borrowed source.
    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// The borrowed source, mutably. Reading from it directly desynchronizes
    /// the reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Unwraps the reader, returning the source. Buffered, unconsumed bytes
    /// are discarded.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R> fmt::Debug for WireReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireReader")
            .field("staging", &self.staging)
            .finish_non_exhaustive()
    }
}
