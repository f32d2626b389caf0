//! Decoded H8 operands

use crate::arch::h8::{Address, Encoding, Register, Width};

/// A single decoded operand.
///
/// Addresses carried by `Absolute` and `PcRelative` operands are already
/// resolved into the linear address space of the mode they were decoded in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// A register named directly.
    Register(Register),

    /// A contiguous range of 32-bit registers, as used by `ldm` and `stm`.
    RegisterList { first: Register, count: u8 },

    /// An immediate value.
    Immediate { value: u32, width: Width },

    /// An absolute memory address.
    Absolute { address: Address, encoding: Encoding },

    /// `@ERn`
    Indirect(Register),

    /// `@(d,ERn)`
    Displacement {
        base: Register,
        disp: i32,
        encoding: Encoding,
    },

    /// `@ERn+`
    PostIncrement(Register),

    /// `@-ERn`
    PreDecrement(Register),

    /// A branch target, relative to the address of the next instruction.
    PcRelative {
        target: Address,
        disp: i32,
        encoding: Encoding,
    },

    /// `@@aa:8`, a pointer stored in the vector area.
    MemoryIndirect(u8),

    /// A bit number, for bit manipulation instructions.
    Bit(u8),
}

impl Operand {
    /// The register named by a direct register operand.
    pub fn as_register(&self) -> Option<Register> {
        match self {
            Operand::Register(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_immediate(&self) -> Option<u32> {
        match self {
            Operand::Immediate { value, .. } => Some(*value),
            _ => None,
        }
    }
}
