//! Heuristics for telling code from data

use crate::analysis::DatabaseView;
use crate::arch::h8::emu::sp_delta;
use crate::arch::h8::{Address, Condition, Instruction, Mnemonic, Operand, Register, Width};
use crate::arch::Mode;

/// Byte sequences that always encode a return: `rte` and `rts`.
pub const RETURN_SEQUENCES: [[u8; 2]; 2] = [[0x56, 0x70], [0x54, 0x70]];

/// Check for a return instruction without decoding.
pub fn is_return_sequence(bytes: &[u8]) -> bool {
    RETURN_SEQUENCES.iter().any(|seq| bytes.starts_with(seq))
}

/// Only the properties every real instruction has.
pub const SANITY_BASIC: u8 = 0;

/// Also reject encodings compilers never produce.
pub const SANITY_STRICT: u8 = 1;

/// Also reject padding and erased memory.
pub const SANITY_PARANOID: u8 = 2;

/// How likely it is that a function starts with `insn`, from 0 to 100.
pub fn may_be_func(insn: &Instruction) -> u8 {
    let saves = matches!(insn.mnemonic(), Mnemonic::Push | Mnemonic::Stm)
        || matches!(
            (insn.mnemonic(), insn.operands()),
            (Mnemonic::Mov, [Operand::Register(_), Operand::PreDecrement(sp)]) if sp.is_sp()
        );

    if saves {
        return 90;
    }

    if matches!(sp_delta(insn), Some(delta) if delta < 0) {
        return 70;
    }

    match (insn.mnemonic(), insn.operands()) {
        (Mnemonic::Mov, [Operand::Register(src), Operand::Register(dst)])
            if src.is_sp() && !dst.is_sp() =>
        {
            60
        }
        (Mnemonic::Nop, _) => 0,
        _ => 10,
    }
}

/// Are word and long accesses through absolute or stack operands aligned?
fn aligned_access(insn: &Instruction) -> bool {
    if matches!(insn.width(), Some(Width::Byte) | None) {
        return true;
    }

    insn.operands().iter().all(|op| match op {
        Operand::Absolute { address, .. } => address % 2 == 0,
        Operand::Displacement { base, disp, .. } if base.is_sp() => disp % 2 == 0,
        _ => true,
    })
}

/// Can `ldm`/`stm` move this register range?
///
/// Two registers must start on an even register; three or four must start
/// at `er0` or `er4`.
fn legal_register_list(first: Register, count: u8) -> bool {
    let n = match first.number() {
        Some(n) => n,
        None => return false,
    };

    match count {
        2 => n % 2 == 0,
        3 | 4 => n % 4 == 0,
        _ => false,
    }
}

/// Does the instruction look like something a real program contains?
///
/// Higher `level`s are stricter; see the `SANITY_*` constants.
pub fn is_sane_insn(insn: &Instruction, level: u8) -> bool {
    if insn.address() % 2 != 0 {
        return false;
    }

    if level >= SANITY_STRICT {
        let pops_sp = match (insn.mnemonic(), insn.operands()) {
            (Mnemonic::Pop, [Operand::Register(reg)]) => reg.is_sp(),
            (Mnemonic::Mov, [Operand::PostIncrement(src), Operand::Register(dst)]) => {
                src.is_sp() && dst.is_sp()
            }
            (Mnemonic::Ldm, [_, Operand::RegisterList { first, count }]) => {
                first.number().map_or(true, |n| n + count > 7)
            }
            _ => false,
        };

        if pops_sp {
            return false;
        }

        let bad_list = insn.operands().iter().any(|op| match op {
            Operand::RegisterList { first, count } => !legal_register_list(*first, *count),
            _ => false,
        });

        if bad_list || !aligned_access(insn) {
            return false;
        }
    }

    if level >= SANITY_PARANOID {
        if insn.mnemonic() == Mnemonic::Nop {
            return false;
        }

        let erased = insn.mnemonic() == Mnemonic::Mov
            && matches!(
                insn.operands(),
                [Operand::Immediate { value: 0xFF, .. }, Operand::Register(Register::R7L)]
            );

        if erased {
            return false;
        }
    }

    true
}

/// If the function at `entry` does nothing but jump elsewhere, find where.
pub fn is_jump_func<D>(entry: Address, db: &D, mode: Mode) -> Option<Address>
where
    D: DatabaseView + ?Sized,
{
    let insn = db.decode_at(entry, mode).ok()?;

    match (insn.mnemonic(), insn.operand(0)) {
        (Mnemonic::Jmp, Some(Operand::Absolute { address, .. })) => Some(*address),
        (Mnemonic::Bcc(Condition::Always), Some(Operand::PcRelative { target, .. })) => {
            Some(*target)
        }
        _ => None,
    }
}

/// The length of the alignment padding instruction at `address`, or 0 if
/// there isn't one.
pub fn is_align_insn<D>(address: Address, db: &D, mode: Mode) -> usize
where
    D: DatabaseView + ?Sized,
{
    match db.decode_at(address, mode) {
        Ok(insn) if insn.mnemonic() == Mnemonic::Nop => insn.len() as usize,
        _ => 0,
    }
}
