//! A streaming line and raw-byte reader for CRLF-delimited wire protocols.
//!
//! [`WireReader`] is the lowest-level parsing primitive for protocols such as
//! HTTP, where a message is a run of CRLF-terminated text lines followed by a
//! body whose length is announced in advance. It layers two structurally
//! different read shapes over one blocking byte source:
//!
//! - [`WireReader::read_line`] — decoded text up to the next CR-then-LF
//!   terminator;
//! - [`WireReader::read_bytes`] / [`WireReader::read_bytes_as_text`] —
//!   exactly `n` raw bytes, verbatim or decoded standalone.
//!
//! Both shapes advance the same underlying byte position, so a length-based
//! read resumes exactly where the previous line read stopped, and vice versa.
//! The text encoding is a replaceable [`Codec`] capability: headers can be
//! read under one encoding and a body segment redeclared under another via
//! [`WireReader::set_codec`], without losing or re-fetching bytes already in
//! flight.
//!
//! Internally the reader keeps a bounded raw-byte window and a bounded
//! decoded-character window in lockstep across partial fills, partial
//! multi-byte sequences, and encoding swaps; no byte is ever consumed twice
//! or skipped, however the two read shapes are interleaved.
//!
//! ```
//! use std::io::Cursor;
//!
//! use linewire::{Ascii, WireReader};
//!
//! let message = b"Content-Length: 2\r\n\r\nok";
//! let mut reader = WireReader::new(Cursor::new(&message[..]), Box::new(Ascii));
//!
//! assert_eq!(reader.read_line().unwrap().as_deref(), Some("Content-Length: 2"));
//! assert_eq!(reader.read_line().unwrap().as_deref(), Some(""));
//! assert_eq!(reader.read_bytes_as_text(2).unwrap(), "ok");
//! assert!(reader.read_line().unwrap().is_none());
//! ```
//!
//! The reader is fully synchronous and single-threaded: any read may block
//! for the duration of one or more source reads, and no cancellation or
//! timeout primitive is provided. Wrap the source before handing it over if
//! bounded reads are required. The source is borrowed for the reader's
//! lifetime and never closed by it.

pub mod codec;
mod error;
mod reader;
mod staging;

pub use codec::{Ascii, Codec, Decoded, Decoder, Latin1, Utf8};
pub use error::{ConfigError, ReadError};
pub use reader::{ReaderOptions, WireReader};
