//! Traits for analysis

use crate::analysis::{Error, Result};
use crate::arch::h8::{self, Address, Frame, Instruction};
use crate::arch::Mode;

/// Read-only view of the analysis database.
///
/// This is everything the emulator and frame builder are allowed to know
/// about the program beyond the instruction in front of them. Nothing in
/// `arch::h8` writes through this trait; effects are handed back as data and
/// applied by whoever owns the database.
pub trait DatabaseView {
    /// Read up to `len` bytes starting at `address`.
    ///
    /// Reads stop early at the end of the segment containing `address`. An
    /// unmapped address reads as no bytes.
    fn read_bytes(&self, address: Address, len: usize) -> Vec<u8>;

    /// Determine if any segment contains `address`.
    fn is_mapped(&self, address: Address) -> bool;

    /// The start of the instruction that immediately precedes `address`, if
    /// that instruction is known and ends exactly at `address`.
    fn prev_head(&self, address: Address) -> Option<Address>;

    /// Determine if any code reference targets `address`.
    fn has_code_refs_to(&self, address: Address) -> bool;

    /// The stack frame of the function containing `address`, if one has been
    /// built.
    fn frame_for(&self, _address: Address) -> Option<&Frame> {
        None
    }

    /// Read a big-endian word.
    fn read_word(&self, address: Address) -> Option<u16> {
        match self.read_bytes(address, 2).as_slice() {
            [hi, lo] => Some(u16::from_be_bytes([*hi, *lo])),
            _ => None,
        }
    }

    /// Read a big-endian long word.
    fn read_long(&self, address: Address) -> Option<u32> {
        match self.read_bytes(address, 4).as_slice() {
            [a, b, c, d] => Some(u32::from_be_bytes([*a, *b, *c, *d])),
            _ => None,
        }
    }

    /// Decode the instruction at `address`.
    fn decode_at(&self, address: Address, mode: Mode) -> Result<Instruction> {
        if !self.is_mapped(address) {
            return Err(Error::OutOfSegment(address));
        }

        let bytes = self.read_bytes(address, h8::MAX_INSTRUCTION_LENGTH);

        h8::decode(&bytes, address, mode)
    }
}
