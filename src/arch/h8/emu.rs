//! Static emulation of a single instruction's effects

use crate::analysis::{DatabaseView, Flow, Reference, ReferenceKind};
use crate::arch::h8::switch::{find_switch, SwitchTable};
use crate::arch::h8::{Address, Condition, Frame, Instruction, Mnemonic, Operand, Width};
use crate::arch::Mode;
use tracing::trace;

/// A control-flow edge leaving an instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Execution continues at the next instruction.
    Fallthrough(Address),

    /// Unconditional transfer. `None` when the target is only known at run
    /// time.
    Jump(Option<Address>),

    /// Conditional transfer; always paired with a fallthrough edge.
    ConditionalJump(Address),

    /// Subroutine call; always paired with a fallthrough edge.
    Call(Option<Address>),

    /// Return from subroutine or exception.
    Return,
}

/// Everything the analysis layer needs to know about an instruction's
/// effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectSet {
    /// Outgoing control-flow edges.
    pub edges: Vec<Edge>,

    /// Addresses read or written through absolute and memory-indirect
    /// operands.
    pub data_refs: Vec<Address>,

    /// How much the instruction moves the stack pointer, if at all.
    pub sp_delta: Option<i32>,

    /// For each operand, whether it addresses a stack slot.
    pub stack_operands: Vec<bool>,

    /// A jump table feeding an indirect jump.
    pub switch: Option<SwitchTable>,
}

impl EffectSet {
    /// Summarize the edges as a `Flow`.
    pub fn flow(&self) -> Flow {
        let falls = self
            .edges
            .iter()
            .any(|e| matches!(e, Edge::Fallthrough(_)));
        let branches = self
            .edges
            .iter()
            .any(|e| matches!(e, Edge::Jump(_) | Edge::ConditionalJump(_)));

        if self.edges.contains(&Edge::Return) {
            Flow::Returning
        } else if branches {
            Flow::Branching(falls)
        } else {
            Flow::Normal
        }
    }

    /// Every reference made by the instruction at `from`.
    ///
    /// Fallthrough edges are not references. Recognized switch targets are
    /// code references and the table itself is a data reference.
    pub fn references(&self, from: Address) -> Vec<Reference> {
        let mut refs = Vec::new();

        for edge in &self.edges {
            match edge {
                Edge::Jump(Some(to)) | Edge::ConditionalJump(to) => {
                    refs.push(Reference::new_static_ref(from, *to, ReferenceKind::Code))
                }
                Edge::Call(Some(to)) => refs.push(Reference::new_static_ref(
                    from,
                    *to,
                    ReferenceKind::Subroutine,
                )),
                Edge::Jump(None) if self.switch.is_none() => {
                    refs.push(Reference::new_dyn_ref(from, ReferenceKind::Code))
                }
                Edge::Call(None) => {
                    refs.push(Reference::new_dyn_ref(from, ReferenceKind::Subroutine))
                }
                _ => {}
            }
        }

        for to in &self.data_refs {
            refs.push(Reference::new_static_ref(from, *to, ReferenceKind::Data));
        }

        if let Some(switch) = &self.switch {
            refs.push(Reference::new_static_ref(
                from,
                switch.table,
                ReferenceKind::Data,
            ));

            for to in &switch.targets {
                refs.push(Reference::new_static_ref(from, *to, ReferenceKind::Code));
            }
        }

        refs
    }
}

/// The vector a `trapa #n` instruction dispatches through.
pub fn trap_vector(n: u32, mode: Mode) -> Address {
    (8 + n) * mode.ptr_size()
}

/// Compute the effects of an instruction.
///
/// Emulation never fails. Targets that cannot be resolved statically are
/// reported as unknown and an unrecognized jump table is simply absent.
pub fn emulate<D>(insn: &Instruction, db: &D, mode: Mode) -> EffectSet
where
    D: DatabaseView + ?Sized,
{
    let next = insn.next_address();
    let mut effects = EffectSet {
        sp_delta: sp_delta(insn),
        ..EffectSet::default()
    };

    let target = match insn.operand(0) {
        Some(Operand::PcRelative { target, .. }) => Some(*target),
        Some(Operand::Absolute { address, .. }) => Some(*address),
        _ => None,
    };

    match insn.mnemonic() {
        Mnemonic::Rts | Mnemonic::Rte => effects.edges.push(Edge::Return),
        Mnemonic::Bcc(Condition::Never) => effects.edges.push(Edge::Fallthrough(next)),
        Mnemonic::Bcc(Condition::Always) => effects.edges.push(Edge::Jump(target)),
        Mnemonic::Bcc(_) => {
            if let Some(target) = target {
                effects.edges.push(Edge::ConditionalJump(target));
            }

            effects.edges.push(Edge::Fallthrough(next));
        }
        Mnemonic::Jmp => {
            effects.edges.push(Edge::Jump(target));

            if let Some(Operand::Indirect(_)) = insn.operand(0) {
                effects.switch = find_switch(insn, db, mode);
            }
        }
        Mnemonic::Bsr | Mnemonic::Jsr => {
            effects.edges.push(Edge::Call(target));
            effects.edges.push(Edge::Fallthrough(next));
        }
        Mnemonic::Trapa => {
            if let Some(n) = insn.operand(0).and_then(|o| o.as_immediate()) {
                effects.data_refs.push(trap_vector(n, mode));
            }

            effects.edges.push(Edge::Call(None));
            effects.edges.push(Edge::Fallthrough(next));
        }
        _ => effects.edges.push(Edge::Fallthrough(next)),
    }

    let is_transfer = matches!(insn.mnemonic(), Mnemonic::Jmp | Mnemonic::Jsr);

    for op in insn.operands() {
        match op {
            Operand::Absolute { address, .. } if !is_transfer => effects.data_refs.push(*address),
            Operand::MemoryIndirect(vector) => effects.data_refs.push(*vector as Address),
            _ => {}
        }
    }

    let frame = db.frame_for(insn.address());

    effects.stack_operands = insn
        .operands()
        .iter()
        .map(|op| is_stack_var(op, frame))
        .collect();

    effects
}

/// True if `op` addresses memory relative to the stack pointer.
pub fn is_sp_based(op: &Operand) -> bool {
    matches!(op, Operand::Displacement { base, .. } if base.is_sp())
}

/// True if `op` addresses a stack slot, through either the stack pointer or
/// the frame pointer `frame` establishes.
pub fn is_stack_var(op: &Operand, frame: Option<&Frame>) -> bool {
    if is_sp_based(op) {
        return true;
    }

    let fp = match frame.and_then(|f| f.frame_pointer()) {
        Some(fp) => fp,
        None => return false,
    };

    matches!(op, Operand::Displacement { base, .. } if base.number() == fp.number())
}

fn sp_destination(insn: &Instruction) -> bool {
    insn.destination()
        .and_then(|d| d.as_register())
        .map_or(false, |r| r.is_sp())
}

fn immediate_source(insn: &Instruction) -> Option<u32> {
    insn.source().and_then(|s| s.as_immediate())
}

/// How far an instruction moves the stack pointer.
///
/// Negative values grow the stack. Immediates are applied with wrapping in
/// the width of the operation.
pub fn sp_delta(insn: &Instruction) -> Option<i32> {
    let width = insn.width().unwrap_or(Width::Long);

    let delta = match insn.mnemonic() {
        Mnemonic::Push => Some(-(width.bytes() as i32)),
        Mnemonic::Pop => Some(width.bytes() as i32),
        Mnemonic::Stm | Mnemonic::Ldm => insn.operands().iter().find_map(|op| match op {
            Operand::RegisterList { count, .. } => {
                let bytes = 4 * *count as i32;

                Some(if insn.mnemonic() == Mnemonic::Stm {
                    -bytes
                } else {
                    bytes
                })
            }
            _ => None,
        }),
        Mnemonic::Adds | Mnemonic::Inc if sp_destination(insn) => {
            immediate_source(insn).map(|v| width.wrap(v as i64))
        }
        Mnemonic::Subs | Mnemonic::Dec if sp_destination(insn) => {
            immediate_source(insn).map(|v| width.wrap(-(v as i64)))
        }
        Mnemonic::Add if sp_destination(insn) => {
            immediate_source(insn).map(|v| width.wrap(v as i64))
        }
        Mnemonic::Sub if sp_destination(insn) => {
            immediate_source(insn).map(|v| width.wrap(-(v as i64)))
        }
        Mnemonic::Mov | Mnemonic::Stc | Mnemonic::Ldc => {
            insn.operands().iter().find_map(|op| match op {
                Operand::PreDecrement(r) if r.is_sp() => Some(-(width.bytes() as i32)),
                Operand::PostIncrement(r) if r.is_sp() => Some(width.bytes() as i32),
                _ => None,
            })
        }
        _ => None,
    };

    if let Some(delta) = delta {
        trace!(address = insn.address(), delta, "stack pointer adjusted");
    }

    delta
}

/// Folds stack pointer deltas along the straight-line path from a function
/// entry.
#[derive(Copy, Clone, Debug)]
pub struct StackTracker {
    mode: Mode,
    budget: usize,
}

impl StackTracker {
    pub const DEFAULT_BUDGET: usize = 256;

    pub fn new(mode: Mode) -> Self {
        StackTracker {
            mode,
            budget: Self::DEFAULT_BUDGET,
        }
    }

    pub fn with_budget(mode: Mode, budget: usize) -> Self {
        StackTracker { mode, budget }
    }

    /// The stack pointer at `target`, relative to its value at `entry`.
    ///
    /// Walks forward from `entry` through fallthrough edges only. Yields
    /// `None` if `target` is not reached within the budget, or the walk hits
    /// an undecodable instruction or a transfer of control first.
    pub fn sp_offset_at<D>(&self, db: &D, entry: Address, target: Address) -> Option<i32>
    where
        D: DatabaseView + ?Sized,
    {
        let mut offset: i32 = 0;
        let mut address = entry;

        for _ in 0..self.budget {
            if address == target {
                return Some(offset);
            }

            let insn = db.decode_at(address, self.mode).ok()?;

            if let Some(delta) = sp_delta(&insn) {
                offset = offset.wrapping_add(delta);
            }

            if !emulate(&insn, db, self.mode).flow().falls_through() {
                return None;
            }

            address = insn.next_address();
        }

        Some(offset).filter(|_| address == target)
    }
}
