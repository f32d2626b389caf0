//! Instruction decoding

use crate::analysis::{Error, Result};
use crate::arch::h8::table::{self, Field, Match, Opcode};
use crate::arch::h8::{
    Address, Condition, Encoding, Flags, Instruction, Mnemonic, Operand, Register, Width,
};
use crate::arch::{Cpu, Mode};
use tracing::debug;

/// The longest encoded instruction, in bytes.
pub const MAX_INSTRUCTION_LENGTH: usize = 10;

/// Decode a single instruction.
///
/// `bytes` holds the encoded instruction starting at `address`; it may run
/// past the end of the instruction. Decoding only reads as many bytes as the
/// matched encoding needs.
pub fn decode(bytes: &[u8], address: Address, mode: Mode) -> Result<Instruction> {
    let first = match bytes.first() {
        Some(first) => *first,
        None => return Err(Error::Truncated),
    };

    let mut truncated = false;
    let mut illegal = false;

    for opcode in table::candidates(first) {
        if !mode.supports(opcode.entry.cpu) {
            continue;
        }

        match opcode.pattern.matches(bytes) {
            Match::Mismatch => continue,
            Match::Partial => {
                truncated = true;
                continue;
            }
            Match::Full => {}
        }

        match build(opcode, bytes, address, mode) {
            Ok(instr) => return Ok(instr),
            Err(Error::IllegalOperandForMode) => illegal = true,
            Err(_) => {}
        }
    }

    let err = if illegal {
        Error::IllegalOperandForMode
    } else if truncated {
        Error::Truncated
    } else {
        Error::UnknownOpcode
    };

    debug!(address, first, mode = mode.short_name(), "decode failed: {}", err);

    Err(err)
}

/// Resolve an `@aa:8` operand, which always addresses the top page.
pub fn high_page(aa: u8, mode: Mode) -> Address {
    (0xFFFF_FF00 | aa as Address) & mode.address_mask()
}

/// Resolve an `@aa:16` operand, which is sign extended in advanced mode.
pub fn short_absolute(aa: u16, mode: Mode) -> Address {
    (aa as i16 as i32 as Address) & mode.address_mask()
}

/// Resolve a 3 or 4 byte absolute address. The reserved top byte of the
/// 4 byte form never contributes to the address.
pub fn long_absolute(aa: u32, mode: Mode) -> Address {
    aa & 0x00FF_FFFF & mode.address_mask()
}

fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;

    ((value << shift) as i32) >> shift
}

fn build(opcode: &Opcode, bytes: &[u8], address: Address, mode: Mode) -> Result<Instruction> {
    let entry = opcode.entry;
    let length = opcode.pattern.len();
    let next = address.wrapping_add(length as Address);
    let get = |letter: char| opcode.pattern.field(letter, bytes);

    let mut mnemonic = entry.mnemonic;
    let mut flags = Flags {
        long_form: false,
        h8s_only: entry.cpu == Cpu::H8S,
    };
    let mut operands = Vec::with_capacity(entry.operands.len());

    for field in entry.operands {
        let operand = match *field {
            Field::Cond(c) => {
                mnemonic = Mnemonic::Bcc(Condition::from_field(get(c) as u8));
                continue;
            }
            Field::Reg8(c) => Operand::Register(Register::byte(get(c) as u8)),
            Field::Reg16(c) => Operand::Register(Register::word(get(c) as u8)),
            Field::Reg32(c) => Operand::Register(Register::long(get(c) as u8)),
            Field::Control(reg) => {
                if reg.is_h8s_only() && !mode.is_h8s() {
                    return Err(Error::IllegalOperandForMode);
                }

                Operand::Register(reg)
            }
            Field::Imm(c, width) => Operand::Immediate {
                value: get(c),
                width,
            },
            Field::Const(value) => Operand::Immediate {
                value,
                width: Width::Byte,
            },
            Field::Bit(c) => Operand::Bit(get(c) as u8),
            Field::Ind(c) => Operand::Indirect(Register::long(get(c) as u8)),
            Field::PostInc(c) => Operand::PostIncrement(Register::long(get(c) as u8)),
            Field::PreDec(c) => Operand::PreDecrement(Register::long(get(c) as u8)),
            Field::SpPostInc => Operand::PostIncrement(Register::ER7),
            Field::SpPreDec => Operand::PreDecrement(Register::ER7),
            Field::Disp16(e, r) => Operand::Displacement {
                base: Register::long(get(r) as u8),
                disp: sign_extend(get(e), 16),
                encoding: Encoding::E16,
            },
            Field::DispLong(e, r) => {
                flags.long_form = true;

                Operand::Displacement {
                    base: Register::long(get(r) as u8),
                    disp: sign_extend(get(e) & 0x00FF_FFFF, 24),
                    encoding: Encoding::long_form(mode),
                }
            }
            Field::Abs8(c) => Operand::Absolute {
                address: high_page(get(c) as u8, mode),
                encoding: Encoding::E8,
            },
            Field::Abs16(c) => Operand::Absolute {
                address: short_absolute(get(c) as u16, mode),
                encoding: Encoding::E16,
            },
            Field::Abs24(c) => Operand::Absolute {
                address: long_absolute(get(c), mode),
                encoding: Encoding::E24,
            },
            Field::AbsLong(c) => {
                flags.long_form = true;

                Operand::Absolute {
                    address: long_absolute(get(c), mode),
                    encoding: Encoding::long_form(mode),
                }
            }
            Field::Rel8(c) => {
                let disp = sign_extend(get(c), 8);

                Operand::PcRelative {
                    target: next.wrapping_add(disp as Address) & mode.address_mask(),
                    disp,
                    encoding: Encoding::E8,
                }
            }
            Field::Rel16(c) => {
                let disp = sign_extend(get(c), 16);

                Operand::PcRelative {
                    target: next.wrapping_add(disp as Address) & mode.address_mask(),
                    disp,
                    encoding: Encoding::E16,
                }
            }
            Field::Vector(c) => Operand::MemoryIndirect(get(c) as u8),
            Field::LdmList(n, k) => {
                let count = get(k) as u8 + 1;
                let last = get(n) as u8;

                if last + 1 < count {
                    return Err(Error::UnknownOpcode);
                }

                Operand::RegisterList {
                    first: Register::long(last + 1 - count),
                    count,
                }
            }
            Field::StmList(n, k) => {
                let count = get(k) as u8 + 1;
                let first = get(n) as u8;

                if first + count > 8 {
                    return Err(Error::UnknownOpcode);
                }

                Operand::RegisterList {
                    first: Register::long(first),
                    count,
                }
            }
        };

        operands.push(operand);
    }

    Ok(Instruction::new(
        address,
        length as u8,
        mnemonic,
        entry.width,
        operands,
        flags,
    ))
}
