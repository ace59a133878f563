use super::{Codec, Decoded, Decoder};

/// ISO-8859-1. Every byte maps 1:1 onto `U+0000..=U+00FF`, so decoding is
/// total and never substitutes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1;

impl Codec for Latin1 {
    fn name(&self) -> &'static str {
        "iso-8859-1"
    }

    fn decoder(&self) -> Box<dyn Decoder> {
        Box::new(Latin1Decoder)
    }

    fn decode(&self, bytes: &[u8]) -> String {
        bytes.iter().copied().map(char::from).collect()
    }

    fn byte_len(&self, chars: &[char]) -> usize {
        chars.len()
    }

    fn char_len(&self, bytes: &[u8]) -> usize {
        bytes.len()
    }
}

#[derive(Debug, Default)]
struct Latin1Decoder;

impl Decoder for Latin1Decoder {
    fn decode(&mut self, input: &[u8], output: &mut [char]) -> Decoded {
        let n = input.len().min(output.len());
        for (dst, &b) in output.iter_mut().zip(&input[..n]) {
            *dst = char::from(b);
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
