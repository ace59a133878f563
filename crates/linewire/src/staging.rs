//! The dual staging windows: raw bytes and decoded characters in lockstep.

use std::fmt;
use std::io::{self, Read};

use bstr::ByteSlice;

use crate::codec::{Codec, Decoder};
use crate::error::ReadError;

/// Byte and char windows advanced in lockstep, plus the active codec and its
/// streaming decoder.
///
/// Invariant: `chars[..n_c]` is exactly the decode, under the active codec,
/// of `bytes[..codec.byte_len(&chars[..n_c])]`; window bytes beyond that
/// point are the decoder's in-flight carry followed by the undecoded tail.
/// Every consumption funnels through [`Staging::compact`] or
/// [`Staging::take`] — neither window ever moves alone.
pub(crate) struct Staging {
    codec: Box<dyn Codec>,
    decoder: Box<dyn Decoder>,
    bytes: Box<[u8]>,
    n_b: usize,
    /// Count of front bytes already fed to the streaming decoder: the bytes
    /// of every completed character plus the decoder's carry.
    decoded: usize,
    chars: Box<[char]>,
    n_c: usize,
}

impl Staging {
    pub(crate) fn new(codec: Box<dyn Codec>, byte_capacity: usize, char_capacity: usize) -> Self {
        let decoder = codec.decoder();
        Self {
            codec,
            decoder,
            bytes: vec![0; byte_capacity].into_boxed_slice(),
            n_b: 0,
            decoded: 0,
            chars: vec!['\0'; char_capacity].into_boxed_slice(),
            n_c: 0,
        }
    }

    pub(crate) fn codec(&self) -> &dyn Codec {
        &*self.codec
    }

    pub(crate) fn byte_capacity(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn buffered_bytes(&self) -> usize {
        self.n_b
    }

    /// The decoded, unconsumed characters.
    pub(crate) fn chars(&self) -> &[char] {
        &self.chars[..self.n_c]
    }

    /// True while the window holds bytes the decoder has not seen yet — only
    /// possible once the char window is full.
    pub(crate) fn has_undecoded(&self) -> bool {
        self.decoded < self.n_b
    }

    /// Byte window storage, for use as a chunk-sized scratch buffer by the
    /// direct read path. Callers must only touch it while both windows are
    /// empty.
    pub(crate) fn scratch(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Replaces the active codec: carry state is discarded and the whole
    /// unconsumed byte range re-decodes from offset 0 under the new codec,
    /// overwriting any previously decoded-but-unconsumed characters.
    pub(crate) fn set_codec(&mut self, codec: Box<dyn Codec>) {
        self.codec = codec;
        self.decoder = self.codec.decoder();
        self.decoded = 0;
        self.n_c = 0;
        self.decode_pending();
    }

    /// The resynchronization primitive: consumes `chars_consumed` characters
    /// together with the bytes that encoded them, left-shifting both
    /// windows, then continues decoding into the freed char space.
    pub(crate) fn compact(&mut self, chars_consumed: usize) {
        let bytes_consumed = self.codec.byte_len(&self.chars[..chars_consumed]);
        self.bytes.copy_within(bytes_consumed..self.n_b, 0);
        self.n_b -= bytes_consumed;
        self.decoded -= bytes_consumed;
        self.chars.copy_within(chars_consumed..self.n_c, 0);
        self.n_c -= chars_consumed;
        self.decode_pending();
    }

    /// Reads once from `source` into the byte window's free tail and decodes
    /// what arrived. Returns the byte count, 0 meaning the source is
    /// exhausted.
    pub(crate) fn fill(&mut self, source: &mut impl Read) -> Result<usize, ReadError> {
        if self.n_b == self.bytes.len() {
            return Err(ReadError::Saturated {
                byte_capacity: self.bytes.len(),
            });
        }
        let n = read_retrying(source, &mut self.bytes[self.n_b..])?;
        self.n_b += n;
        self.decode_pending();
        Ok(n)
    }

    /// Splices the first `n` buffered bytes (`n <= buffered_bytes()`) into
    /// `out`, resynchronizing the char window through codec-computed counts
    /// rather than by streaming-decoding the raw path.
    pub(crate) fn take(&mut self, n: usize, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.bytes[..n]);
        let complete = self.decoded - self.decoder.pending();
        if n < complete {
            // The request lies inside the fully decoded front region. A
            // count that splits a multi-byte character consumes through the
            // whole split character; misaligned requests are documented as
            // lossy.
            let chars = self.codec.char_len(&self.bytes[..n]).min(self.n_c);
            self.compact(chars);
        } else {
            // The request swallows the decode frontier: every decoded char
            // and the carry belong to the drained bytes. Keep the raw tail
            // and re-decode it from a fresh state.
            self.bytes.copy_within(n..self.n_b, 0);
            self.n_b -= n;
            self.n_c = 0;
            self.decoded = 0;
            self.decoder.reset();
            self.decode_pending();
        }
    }

    /// Feeds undecoded tail bytes through the streaming decoder into the
    /// char window's free tail.
    fn decode_pending(&mut self) {
        let step = self
            .decoder
            .decode(&self.bytes[self.decoded..self.n_b], &mut self.chars[self.n_c..]);
        self.decoded += step.bytes_read;
        self.n_c += step.chars_written;
    }
}

impl fmt::Debug for Staging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Staging")
            .field("codec", &self.codec.name())
            .field("bytes", &self.bytes[..self.n_b].as_bstr())
            .field("decoded", &self.decoded)
            .field("chars", &self.chars[..self.n_c].iter().collect::<String>())
            .finish()
    }
}

/// One source read, retried through `ErrorKind::Interrupted`.
pub(crate) fn read_retrying(source: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match source.read(buf) {
            Ok(n) => return Ok(n),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
}
