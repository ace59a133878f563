use super::{Codec, Decoded, Decoder, REPLACEMENT};

/// US-ASCII. Bytes above `0x7F` decode to [`REPLACEMENT`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascii;

impl Codec for Ascii {
    fn name(&self) -> &'static str {
        "us-ascii"
    }

    fn decoder(&self) -> Box<dyn Decoder> {
        Box::new(AsciiDecoder)
    }

    fn decode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| decode_byte(b)).collect()
    }

    fn byte_len(&self, chars: &[char]) -> usize {
        chars.len()
    }

    fn char_len(&self, bytes: &[u8]) -> usize {
        bytes.len()
    }
}

// One byte, one char; nothing to carry.
#[derive(Debug, Default)]
struct AsciiDecoder;

impl Decoder for AsciiDecoder {
    fn decode(&mut self, input: &[u8], output: &mut [char]) -> Decoded {
        let n = input.len().min(output.len());
        for (dst, &b) in output.iter_mut().zip(&input[..n]) {
            *dst = decode_byte(b);
        }
        Decoded {
            bytes_read: n,
            chars_written: n,
        }
    }

    fn pending(&self) -> usize {
        0
    }

    fn reset(&mut self) {}
}

fn decode_byte(b: u8) -> char {
    if b.is_ascii() { char::from(b) } else { REPLACEMENT }
}
