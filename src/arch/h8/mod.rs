//! The Hitachi H8/300H and H8S
//!
//! Decoding is table driven (see `table`). Everything downstream of the
//! decoder works on `Instruction` values and never looks at raw bytes again,
//! except for the jump table reader in `switch`.

mod dis;
mod emu;
mod frame;
mod heuristics;
mod instr;
mod operand;
mod render;
mod switch;
pub mod table;
mod types;

#[cfg(test)]
mod tests;

pub use dis::{decode, high_page, long_absolute, short_absolute, MAX_INSTRUCTION_LENGTH};
pub use emu::{
    emulate, is_sp_based, is_stack_var, sp_delta, trap_vector, Edge, EffectSet, StackTracker,
};
pub use frame::{
    build_frame, get_frame_retsize, Frame, FrameEntry, FrameFailure, SlotRole, PROLOGUE_BUDGET,
};
pub use heuristics::{
    is_align_insn, is_jump_func, is_return_sequence, is_sane_insn, may_be_func,
    RETURN_SEQUENCES, SANITY_BASIC, SANITY_PARANOID, SANITY_STRICT,
};
pub use instr::{Flags, Instruction, Mnemonic};
pub use operand::Operand;
pub use render::{render, RenderContext, Rendered};
pub use switch::{find_switch, SwitchTable, MAX_SWITCH_CASES, SWITCH_WINDOW};
pub use types::*;
