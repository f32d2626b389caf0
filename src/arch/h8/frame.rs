//! Stack frame recovery from function prologues

use crate::analysis::DatabaseView;
use crate::arch::h8::emu::sp_delta;
use crate::arch::h8::{Address, Instruction, Mnemonic, Operand, Register};
use crate::arch::Mode;
use std::fmt;
use tracing::debug;

/// How many prologue instructions the builder will look at.
pub const PROLOGUE_BUDGET: usize = 32;

/// The size of a return address pushed by `jsr` or `bsr`.
pub fn get_frame_retsize(mode: Mode) -> u32 {
    if mode.is_advanced() {
        4
    } else {
        2
    }
}

/// What a stack slot holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlotRole {
    SavedRegister,
    Local,
    ReturnAddress,
    IncomingArgument,
}

/// One region of a stack frame.
///
/// Offsets are relative to the stack pointer at function entry, where the
/// return address lives. Saved registers and locals sit at negative offsets;
/// incoming arguments sit above the return address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameEntry {
    pub offset: i32,
    pub size: u32,
    pub role: SlotRole,
}

impl FrameEntry {
    pub fn contains(&self, offset: i32) -> bool {
        offset >= self.offset && (offset as i64) < self.offset as i64 + self.size as i64
    }
}

/// Why a frame could not be built. These are results, not errors: plenty of
/// functions have no prologue at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameFailure {
    /// The prologue did not end within the instruction budget.
    BudgetExceeded,

    /// The function does not start with any prologue instruction.
    NoRecognizedPrologue,
}

impl fmt::Display for FrameFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameFailure::BudgetExceeded => write!(f, "prologue too long"),
            FrameFailure::NoRecognizedPrologue => write!(f, "no recognized prologue"),
        }
    }
}

/// A function's stack frame, as established by its prologue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    entry: Address,
    retsize: u32,
    entries: Vec<FrameEntry>,
    frame_pointer: Option<(Register, i32)>,
    sp_offset: i32,
    prologue_end: Address,
}

impl Frame {
    /// Address of the function this frame belongs to.
    pub fn entry(&self) -> Address {
        self.entry
    }

    pub fn retsize(&self) -> u32 {
        self.retsize
    }

    /// Frame regions, return address first, then in the order the prologue
    /// creates them.
    pub fn entries(&self) -> &[FrameEntry] {
        &self.entries
    }

    /// The register holding the frame pointer, if the prologue sets one up.
    pub fn frame_pointer(&self) -> Option<Register> {
        self.frame_pointer.map(|(reg, _)| reg)
    }

    /// The entry-relative offset the frame pointer points at.
    pub fn frame_pointer_offset(&self) -> Option<i32> {
        self.frame_pointer.map(|(_, offset)| offset)
    }

    /// The stack pointer once the prologue is done, relative to entry.
    pub fn sp_offset(&self) -> i32 {
        self.sp_offset
    }

    /// Address of the first instruction after the prologue.
    pub fn prologue_end(&self) -> Address {
        self.prologue_end
    }

    /// Total size of saved registers and locals.
    pub fn frame_size(&self) -> u32 {
        self.sp_offset.min(0).unsigned_abs()
    }

    /// What lives at an entry-relative stack offset.
    pub fn classify(&self, offset: i32) -> SlotRole {
        if offset >= self.retsize as i32 {
            return SlotRole::IncomingArgument;
        }

        self.entries
            .iter()
            .find(|e| e.contains(offset))
            .map_or(SlotRole::Local, |e| e.role)
    }

    /// Resolve a stack operand to an entry-relative offset.
    ///
    /// `sp_offset` is the stack pointer at the instruction using `op`,
    /// relative to entry. Frame pointer relative operands don't need it.
    pub fn slot_offset(&self, op: &Operand, sp_offset: i32) -> Option<i32> {
        match op {
            Operand::Displacement { base, disp, .. } if base.is_sp() => {
                Some(sp_offset.wrapping_add(*disp))
            }
            Operand::Displacement { base, disp, .. } => {
                let (fp, fp_offset) = self.frame_pointer?;

                if base.number() == fp.number() {
                    Some(fp_offset.wrapping_add(*disp))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Is this instruction `mov.l sp,ERn` or `mov.w sp,Rn`?
fn frame_pointer_setup(insn: &Instruction) -> Option<Register> {
    match (insn.mnemonic(), insn.operands()) {
        (Mnemonic::Mov, [Operand::Register(src), Operand::Register(dst)])
            if src.is_sp() && !dst.is_sp() =>
        {
            Some(*dst)
        }
        _ => None,
    }
}

/// Which role a stack adjustment in a prologue plays.
fn prologue_role(insn: &Instruction) -> Option<SlotRole> {
    match insn.mnemonic() {
        Mnemonic::Push | Mnemonic::Stm => Some(SlotRole::SavedRegister),
        Mnemonic::Mov => match insn.operands() {
            [Operand::Register(_), Operand::PreDecrement(sp)] if sp.is_sp() => {
                Some(SlotRole::SavedRegister)
            }
            _ => None,
        },
        Mnemonic::Subs | Mnemonic::Sub | Mnemonic::Dec | Mnemonic::Add | Mnemonic::Adds => {
            Some(SlotRole::Local)
        }
        _ => None,
    }
}

/// Recover the stack frame of the function at `entry`.
///
/// The prologue is read forward from `entry`: register saves, `stm`, stack
/// pointer decrements and frame pointer setup. Every stack adjustment adds a
/// frame entry at the running offset. The walk stops at the first
/// instruction that is not part of a prologue, or at any address other than
/// `entry` that something else jumps to.
pub fn build_frame<D>(entry: Address, db: &D, mode: Mode) -> Result<Frame, FrameFailure>
where
    D: DatabaseView + ?Sized,
{
    let retsize = get_frame_retsize(mode);
    let mut frame = Frame {
        entry,
        retsize,
        entries: vec![FrameEntry {
            offset: 0,
            size: retsize,
            role: SlotRole::ReturnAddress,
        }],
        frame_pointer: None,
        sp_offset: 0,
        prologue_end: entry,
    };

    let mut address = entry;
    let mut recognized = 0;

    loop {
        if address != entry && db.has_code_refs_to(address) {
            break;
        }

        let insn = match db.decode_at(address, mode) {
            Ok(insn) => insn,
            Err(_) => break,
        };

        let fp = frame_pointer_setup(&insn);
        let slot = match fp {
            Some(_) => None,
            None => match (prologue_role(&insn), sp_delta(&insn)) {
                (Some(role), Some(delta)) if delta < 0 => Some((role, delta)),
                _ => break,
            },
        };

        if recognized == PROLOGUE_BUDGET {
            debug!(entry, "prologue exceeds budget");
            return Err(FrameFailure::BudgetExceeded);
        }

        if let Some(fp) = fp {
            frame.frame_pointer = Some((fp, frame.sp_offset));
        }

        if let Some((role, delta)) = slot {
            frame.sp_offset = frame.sp_offset.wrapping_add(delta);
            frame.entries.push(FrameEntry {
                offset: frame.sp_offset,
                size: delta.unsigned_abs(),
                role,
            });
        }

        recognized += 1;
        address = insn.next_address();
        frame.prologue_end = address;
    }

    if recognized == 0 {
        return Err(FrameFailure::NoRecognizedPrologue);
    }

    Ok(frame)
}
