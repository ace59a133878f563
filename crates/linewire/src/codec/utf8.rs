use std::str;

use super::{Codec, Decoded, Decoder, REPLACEMENT};

/// UTF-8, substituting [`REPLACEMENT`] for malformed sequences the way
/// [`String::from_utf8_lossy`] does.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8;

impl Codec for Utf8 {
    fn name(&self) -> &'static str {
        "utf-8"
    }

    fn decoder(&self) -> Box<dyn Decoder> {
        Box::new(Utf8Decoder::default())
    }

    fn decode(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn byte_len(&self, chars: &[char]) -> usize {
        chars.iter().map(|c| c.len_utf8()).sum()
    }

    fn char_len(&self, bytes: &[u8]) -> usize {
        let mut count = 0;
        let mut rest = bytes;
        loop {
            match str::from_utf8(rest) {
                Ok(tail) => return count + tail.chars().count(),
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    count += str::from_utf8(valid).map_or(0, |s| s.chars().count());
                    // one substitution per malformed prefix; a dangling
                    // partial sequence at the end also substitutes, exactly
                    // as the standalone decode counts it
                    count += 1;
                    let skip = err.error_len().unwrap_or(after.len()).max(1);
                    rest = &after[skip.min(after.len())..];
                }
            }
        }
    }
}

/// Incremental UTF-8 decoder carrying at most one partial scalar (up to
/// three bytes) between calls.
#[derive(Debug, Default)]
struct Utf8Decoder {
    stash: [u8; 4],
    stash_len: u8,
}

/// Sequence length a lead byte announces; `None` for bytes that can never
/// start a scalar.
fn seq_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl Utf8Decoder {
    /// Drops `n` bytes from the front of the assembled view: stashed bytes
    /// first, then fresh input (accounted through `read`).
    fn advance(&mut self, n: usize, read: &mut usize) {
        let stashed = usize::from(self.stash_len);
        if n < stashed {
            self.stash.copy_within(n..stashed, 0);
            self.stash_len = (stashed - n) as u8;
        } else {
            *read += n - stashed;
            self.stash_len = 0;
        }
    }
}

impl Decoder for Utf8Decoder {
    fn decode(&mut self, input: &[u8], output: &mut [char]) -> Decoded {
        let mut read = 0;
        let mut written = 0;
        while written < output.len() {
            // Assemble the next candidate scalar from the carry plus unread
            // input, at most four bytes.
            let stashed = usize::from(self.stash_len);
            let mut seq = [0u8; 4];
            seq[..stashed].copy_from_slice(&self.stash[..stashed]);
            let fresh = (input.len() - read).min(4 - stashed);
            seq[stashed..stashed + fresh].copy_from_slice(&input[read..read + fresh]);
            let avail = stashed + fresh;
            if avail == 0 {
                break;
            }

            let Some(want) = seq_len(seq[0]) else {
                output[written] = REPLACEMENT;
                written += 1;
                self.advance(1, &mut read);
                continue;
            };
            if avail < want {
                // partial scalar: carry it until more input arrives
                self.stash[..avail].copy_from_slice(&seq[..avail]);
                self.stash_len = avail as u8;
                read += fresh;
                break;
            }
            match str::from_utf8(&seq[..want]) {
                Ok(s) => {
                    output[written] = s.chars().next().unwrap_or(REPLACEMENT);
                    written += 1;
                    self.advance(want, &mut read);
                }
                Err(err) => {
                    output[written] = REPLACEMENT;
                    written += 1;
                    self.advance(err.error_len().unwrap_or(1).max(1), &mut read);
                }
            }
        }
        Decoded {
            bytes_read: read,
            chars_written: written,
        }
    }

    fn pending(&self) -> usize {
        usize::from(self.stash_len)
    }

    fn reset(&mut self) {
        self.stash_len = 0;
    }
}
