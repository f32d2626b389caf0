//! Jump table recognition

use crate::analysis::DatabaseView;
use crate::arch::h8::dis::short_absolute;
use crate::arch::h8::{Address, Condition, Instruction, Mnemonic, Operand, Width};
use crate::arch::Mode;
use tracing::debug;

/// How many instructions, counting the jump itself, a switch idiom may span.
pub const SWITCH_WINDOW: usize = 8;

/// Tables claiming more cases than this are not believed.
pub const MAX_SWITCH_CASES: u32 = 256;

/// A recognized jump table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchTable {
    /// Address of the indirect jump the table feeds.
    pub jump: Address,

    /// Address of the first table element.
    pub table: Address,

    /// Size of each element in bytes: 2 or 4.
    pub element_size: u32,

    /// Number of elements.
    pub count: u32,

    /// Where out-of-range values go.
    pub default: Address,

    /// Every element of the table, in order.
    pub targets: Vec<Address>,
}

/// How much an instruction scales the index register numbered `index`, if it
/// is one of the scaling steps of a switch idiom.
fn scale_step(insn: &Instruction, index: u8) -> Option<u32> {
    let is_index = |op: &Operand| op.as_register().and_then(|r| r.number()) == Some(index);

    match (insn.mnemonic(), insn.operands()) {
        (Mnemonic::Extu, [reg]) if is_index(reg) => Some(1),
        (Mnemonic::Add, [src, dst]) if is_index(src) && src == dst => Some(2),
        (Mnemonic::Shll, [reg]) | (Mnemonic::Shal, [reg]) if is_index(reg) => Some(2),
        (Mnemonic::Shll, [Operand::Immediate { value: 2, .. }, reg])
        | (Mnemonic::Shal, [Operand::Immediate { value: 2, .. }, reg])
            if is_index(reg) =>
        {
            Some(4)
        }
        _ => None,
    }
}

/// Try to recognize the jump table feeding `jump`, an indirect `jmp @ERn`.
///
/// The instructions leading up to the jump are found by walking backwards
/// through the database's known instruction heads and must read, in program
/// order:
///
/// ```text
/// cmp.{b,w,l} #N, Rx
/// bhi default        (N + 1 cases) or bhs default (N cases)
/// extu / add Rx,Rx / shll Rx      (any number, scaling to the element size)
/// mov.{w,l} @(table,ERx), Ry
/// jmp @ERy
/// ```
///
/// Anything else, or a table element that cannot be read, means no table.
pub fn find_switch<D>(jump: &Instruction, db: &D, mode: Mode) -> Option<SwitchTable>
where
    D: DatabaseView + ?Sized,
{
    let target_reg = match (jump.mnemonic(), jump.operand(0)) {
        (Mnemonic::Jmp, Some(Operand::Indirect(reg))) => reg.number()?,
        _ => return None,
    };

    let mut window = Vec::with_capacity(SWITCH_WINDOW - 1);
    let mut address = jump.address();

    while window.len() < SWITCH_WINDOW - 1 {
        let prev = match db.prev_head(address) {
            Some(prev) => prev,
            None => break,
        };

        match db.decode_at(prev, mode) {
            Ok(insn) if insn.next_address() == address => window.push(insn),
            _ => break,
        }

        address = prev;
    }

    let mut preceding = window.iter();

    let load = preceding.next()?;
    let (table, index, element_size) = match (load.mnemonic(), load.width(), load.operands()) {
        (
            Mnemonic::Mov,
            Some(width @ Width::Word),
            [Operand::Displacement { base, disp, .. }, Operand::Register(dst)],
        )
        | (
            Mnemonic::Mov,
            Some(width @ Width::Long),
            [Operand::Displacement { base, disp, .. }, Operand::Register(dst)],
        ) if dst.number() == Some(target_reg) => (
            (*disp as Address) & mode.address_mask(),
            base.number()?,
            width.bytes(),
        ),
        _ => return None,
    };

    let mut scale = 1;
    let mut insn = preceding.next()?;

    while let Some(factor) = scale_step(insn, index) {
        scale *= factor;
        insn = preceding.next()?;
    }

    if scale != element_size {
        return None;
    }

    let (inclusive, default) = match (insn.mnemonic(), insn.operand(0)) {
        (Mnemonic::Bcc(Condition::Higher), Some(Operand::PcRelative { target, .. })) => {
            (true, *target)
        }
        (Mnemonic::Bcc(Condition::CarryClear), Some(Operand::PcRelative { target, .. })) => {
            (false, *target)
        }
        _ => return None,
    };

    let cmp = preceding.next()?;
    let bound = match (cmp.mnemonic(), cmp.operands()) {
        (Mnemonic::Cmp, [Operand::Immediate { value, .. }, Operand::Register(reg)])
            if reg.number() == Some(index) =>
        {
            *value
        }
        _ => return None,
    };

    let count = if inclusive {
        bound.checked_add(1)?
    } else {
        bound
    };

    if count == 0 || count > MAX_SWITCH_CASES {
        return None;
    }

    let mut targets = Vec::with_capacity(count as usize);

    for i in 0..count {
        let at = table.wrapping_add(i * element_size);
        let target = if element_size == 2 {
            short_absolute(db.read_word(at)?, mode)
        } else {
            db.read_long(at)? & mode.address_mask()
        };

        targets.push(target);
    }

    debug!(
        jump = jump.address(),
        table,
        count,
        "recognized switch table"
    );

    Some(SwitchTable {
        jump: jump.address(),
        table,
        element_size,
        count,
        default,
        targets,
    })
}
