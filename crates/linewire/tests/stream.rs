//! Stream-level properties: chunking invariance across window capacities and
//! the no-skip/no-duplicate guarantee under interleaved read shapes.

use std::io::Cursor;

use linewire::{Ascii, Latin1, ReaderOptions, Utf8, WireReader};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rstest::rstest;

fn reader_with(
    bytes: Vec<u8>,
    codec: Box<dyn linewire::Codec>,
    byte_capacity: usize,
    char_capacity: usize,
) -> WireReader<Cursor<Vec<u8>>> {
    WireReader::with_options(
        Cursor::new(bytes),
        codec,
        ReaderOptions {
            byte_capacity,
            char_capacity,
        },
    )
    .unwrap()
}

#[rstest]
fn four_lines_reproduce_at_any_capacity(
    #[values(2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 24, 32)]
    capacity: usize,
) {
    let wire = "First line\r\nSecond line\r\nThird line\r\nThis is the fourth and last line\r\n";
    let mut reader = reader_with(wire.into(), Box::new(Ascii), capacity, capacity);
    for expected in [
        "First line",
        "Second line",
        "Third line",
        "This is the fourth and last line",
    ] {
        assert_eq!(reader.read_line().unwrap().as_deref(), Some(expected));
    }
    assert!(reader.read_line().unwrap().is_none());
}

#[rstest]
fn two_byte_scalars_survive_any_fill_alignment(
    #[values(2, 3, 4, 5, 6, 7, 8, 11, 16, 32)] capacity: usize,
) {
    let wire = "Gr\u{fc}\u{df}e aus K\u{f6}ln\r\n\u{fc}ber die Stra\u{df}e\r\n";
    let mut reader = reader_with(wire.into(), Box::new(Utf8), capacity, capacity);
    assert_eq!(
        reader.read_line().unwrap().as_deref(),
        Some("Gr\u{fc}\u{df}e aus K\u{f6}ln")
    );
    assert_eq!(
        reader.read_line().unwrap().as_deref(),
        Some("\u{fc}ber die Stra\u{df}e")
    );
    assert!(reader.read_line().unwrap().is_none());
}

#[rstest]
fn four_byte_scalars_need_only_a_window_they_fit_in(
    #[values(4, 5, 6, 7, 9, 16)] capacity: usize,
) {
    let wire = "\u{1f697} \u{1f699}\r\n";
    let mut reader = reader_with(wire.into(), Box::new(Utf8), capacity, capacity);
    assert_eq!(
        reader.read_line().unwrap().as_deref(),
        Some("\u{1f697} \u{1f699}")
    );
}

/// Line content for the round-trip property: printable, terminator-free.
#[derive(Clone, Debug)]
struct LineText(String);

impl Arbitrary for LineText {
    fn arbitrary(g: &mut Gen) -> Self {
        const ALPHABET: &[char] = &[
            'a', 'b', 'c', 'x', 'y', 'z', 'A', 'Z', '0', '9', ' ', ':', '/', '-', '.',
        ];
        let len = usize::arbitrary(g) % 12;
        LineText((0..len).map(|_| *g.choose(ALPHABET).unwrap()).collect())
    }
}

#[quickcheck]
fn lines_reproduce_regardless_of_capacity(
    lines: Vec<LineText>,
    byte_seed: u8,
    char_seed: u8,
) -> bool {
    let byte_capacity = 2 + usize::from(byte_seed) % 31;
    let char_capacity = 2 + usize::from(char_seed) % 31;
    let mut wire = String::new();
    for line in &lines {
        wire.push_str(&line.0);
        wire.push_str("\r\n");
    }
    let mut reader = reader_with(wire.into(), Box::new(Ascii), byte_capacity, char_capacity);
    for line in &lines {
        if reader.read_line().unwrap().as_deref() != Some(line.0.as_str()) {
            return false;
        }
    }
    reader.read_line().unwrap().is_none()
}

#[quickcheck]
fn interleaved_reads_account_for_every_byte(ops: Vec<(bool, u8)>, payload: Vec<u8>) -> bool {
    // CR-free payload, so the final line read can only return the whole
    // remainder: every byte is attributable to exactly one read. Latin1 maps
    // bytes and chars 1:1, making the concatenation comparable.
    let payload: Vec<u8> = payload.into_iter().filter(|&b| b != b'\r').collect();
    let mut reader = reader_with(payload.clone(), Box::new(Latin1), 8, 8);

    let mut collected = Vec::new();
    let mut remaining = payload.len();
    for (as_text, len) in ops {
        let len = usize::from(len % 5).min(remaining);
        if as_text {
            let text = reader.read_bytes_as_text(len).unwrap();
            collected.extend(text.chars().map(|c| c as u8));
        } else {
            collected.extend(reader.read_bytes(len).unwrap());
        }
        remaining -= len;
    }
    if let Some(rest) = reader.read_line().unwrap() {
        collected.extend(rest.chars().map(|c| c as u8));
    }
    collected == payload
}
