//! Error type for analysis

use crate::arch::h8::Address;
use std::{io, result};
use thiserror::Error;

/// Error type for analysis.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying cause of error is I/O related
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No opcode table entry matches the bytes being decoded.
    #[error("invalid instruction")]
    UnknownOpcode,

    /// The bytes being decoded end before the instruction they start does.
    #[error("instruction runs past the end of its input")]
    Truncated,

    /// The instruction names an operand that the current processor mode does
    /// not have, such as `exr` or the MAC registers on an H8/300H.
    #[error("operand is not available in this processor mode")]
    IllegalOperandForMode,

    /// Decoding was requested at an address no segment covers.
    #[error("address ${0:06X} is not in any segment")]
    OutOfSegment(Address),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            e => io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
