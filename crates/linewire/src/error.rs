use std::io;

use thiserror::Error;

/// Rejected reader configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The raw byte window must be able to hold a terminator split across
    /// two fills.
    #[error("byte capacity must be >= 2, got {0}")]
    ByteCapacity(usize),
    /// The decoded char window must be able to hold at least one character.
    #[error("char capacity must be >= 1, got {0}")]
    CharCapacity(usize),
}

/// Failure of a read operation.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The source was exhausted before a length-exact raw-byte request was
    /// satisfied.
    ///
    /// Raw reads declare an exact-length contract: a shortfall — even of a
    /// single byte — is a protocol violation and is raised rather than
    /// silently truncated. Line reads never produce this error; for them,
    /// exhaustion is the `None` sentinel.
    #[error("{missing} more bytes couldn't be read from the stream")]
    EndOfStream {
        /// Bytes still outstanding when the source reported exhaustion.
        missing: usize,
    },

    /// A fill step could not make progress: the unconsumed data saturated
    /// the staging windows.
    ///
    /// Raised when the byte window is full while the source still has data,
    /// or when the source ends with buffered bytes the char window can never
    /// absorb. This is a configuration fault — the char window is too small
    /// for the traffic, or the byte window cannot hold one complete
    /// multi-byte sequence of the active codec — and is reported as its own
    /// condition instead of being passed off as end of input.
    #[error("buffered data saturated the {byte_capacity}-byte window without making progress")]
    Saturated {
        /// Capacity of the raw byte window.
        byte_capacity: usize,
    },

    /// The underlying source failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
