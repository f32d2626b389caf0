//! Conversion of decoded instructions into assembler tokens

use crate::arch::h8::{Address, Encoding, Instruction, Mnemonic, Operand, Register};
use crate::arch::Mode;
use crate::ast;
use crate::database::PortDatabase;

/// Everything rendering needs to know beyond the instruction itself.
#[derive(Copy, Clone, Debug)]
pub struct RenderContext<'a> {
    pub mode: Mode,

    /// Names for memory-mapped I/O registers, if a device is selected.
    pub ports: Option<&'a PortDatabase>,
}

impl<'a> RenderContext<'a> {
    pub fn new(mode: Mode) -> Self {
        RenderContext { mode, ports: None }
    }

    pub fn with_ports(mode: Mode, ports: &'a PortDatabase) -> Self {
        RenderContext {
            mode,
            ports: Some(ports),
        }
    }
}

/// A rendered instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub instr: ast::Instruction,

    /// How many bytes of the program the instruction covers.
    pub consumed_length: u32,
}

/// Render an absolute address, preferring the name of an I/O port.
fn address_token(address: Address, is_code: bool, ctx: &RenderContext) -> ast::Operand {
    if let Some(name) = ctx.ports.and_then(|p| p.find_sym(address)) {
        return ast::Operand::sym(name);
    }

    if is_code {
        ast::Operand::cptr(address)
    } else {
        ast::Operand::dptr(address)
    }
}

fn render_operand(op: &Operand, is_transfer: bool, ctx: &RenderContext) -> ast::Operand {
    match op {
        Operand::Register(reg) => ast::Operand::sym(reg.name()),
        Operand::RegisterList { first, count } => {
            let last = Register::long(first.number().unwrap_or(0) + count - 1);

            ast::Operand::wrap(
                "(",
                vec![ast::Operand::infix(
                    ast::Operand::sym(first.name()),
                    "-",
                    ast::Operand::sym(last.name()),
                )],
                ")",
            )
        }
        Operand::Immediate { value, .. } => ast::Operand::pref("#", ast::Operand::int(*value)),
        Operand::Bit(bit) => ast::Operand::pref("#", ast::Operand::int(*bit)),
        Operand::Absolute { address, encoding } => ast::Operand::pref(
            "@",
            ast::Operand::suff(address_token(*address, is_transfer, ctx), encoding.suffix()),
        ),
        Operand::Indirect(reg) => ast::Operand::pref("@", ast::Operand::sym(reg.name())),
        Operand::Displacement {
            base,
            disp,
            encoding,
        } => ast::Operand::pref(
            "@",
            ast::Operand::wrap(
                "(",
                vec![
                    ast::Operand::suff(ast::Operand::sint(*disp), encoding.suffix()),
                    ast::Operand::sym(base.name()),
                ],
                ")",
            ),
        ),
        Operand::PostIncrement(reg) => ast::Operand::pref(
            "@",
            ast::Operand::suff(ast::Operand::sym(reg.name()), "+"),
        ),
        Operand::PreDecrement(reg) => ast::Operand::pref("@-", ast::Operand::sym(reg.name())),
        Operand::PcRelative {
            target, encoding, ..
        } => match encoding {
            Encoding::E8 => ast::Operand::cptr(*target),
            _ => ast::Operand::suff(ast::Operand::cptr(*target), encoding.suffix()),
        },
        Operand::MemoryIndirect(vector) => ast::Operand::pref(
            "@@",
            ast::Operand::suff(ast::Operand::dptr(*vector as Address), ":8"),
        ),
    }
}

/// Render a decoded instruction into assembler tokens.
///
/// This never fails: every operand a decode can produce has a rendering.
/// Radix and directive spelling are left to the assembler syntax that emits
/// the tokens.
pub fn render(insn: &Instruction, ctx: &RenderContext) -> Rendered {
    let is_transfer = matches!(insn.mnemonic(), Mnemonic::Jmp | Mnemonic::Jsr);
    let operands = insn
        .operands()
        .iter()
        .map(|op| render_operand(op, is_transfer, ctx))
        .collect();

    Rendered {
        instr: ast::Instruction::new(&insn.opcode(), operands),
        consumed_length: insn.len(),
    }
}
