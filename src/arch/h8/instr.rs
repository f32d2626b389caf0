//! Decoded H8 instructions

use crate::arch::h8::{Address, Condition, Operand, Width};
use std::fmt;

/// Every H8/300H and H8S instruction mnemonic.
///
/// Conditional branches fold their condition into the mnemonic.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Mnemonic {
    Add,
    Adds,
    Addx,
    And,
    Andc,
    Band,
    Bcc(Condition),
    Bclr,
    Biand,
    Bild,
    Bior,
    Bist,
    Bixor,
    Bld,
    Bnot,
    Bor,
    Bset,
    Bsr,
    Bst,
    Btst,
    Bxor,
    Clrmac,
    Cmp,
    Daa,
    Das,
    Dec,
    Divxs,
    Divxu,
    Eepmov,
    Exts,
    Extu,
    Inc,
    Jmp,
    Jsr,
    Ldc,
    Ldm,
    Ldmac,
    Mac,
    Mov,
    Movfpe,
    Movtpe,
    Mulxs,
    Mulxu,
    Neg,
    Nop,
    Not,
    Or,
    Orc,
    Pop,
    Push,
    Rotl,
    Rotr,
    Rotxl,
    Rotxr,
    Rte,
    Rts,
    Shal,
    Shar,
    Shll,
    Shlr,
    Sleep,
    Stc,
    Stm,
    Stmac,
    Sub,
    Subs,
    Subx,
    Tas,
    Trapa,
    Xor,
    Xorc,
}

impl Mnemonic {
    pub fn name(self) -> &'static str {
        use Mnemonic::*;

        match self {
            Add => "add",
            Adds => "adds",
            Addx => "addx",
            And => "and",
            Andc => "andc",
            Band => "band",
            Bcc(cond) => cond.mnemonic(),
            Bclr => "bclr",
            Biand => "biand",
            Bild => "bild",
            Bior => "bior",
            Bist => "bist",
            Bixor => "bixor",
            Bld => "bld",
            Bnot => "bnot",
            Bor => "bor",
            Bset => "bset",
            Bsr => "bsr",
            Bst => "bst",
            Btst => "btst",
            Bxor => "bxor",
            Clrmac => "clrmac",
            Cmp => "cmp",
            Daa => "daa",
            Das => "das",
            Dec => "dec",
            Divxs => "divxs",
            Divxu => "divxu",
            Eepmov => "eepmov",
            Exts => "exts",
            Extu => "extu",
            Inc => "inc",
            Jmp => "jmp",
            Jsr => "jsr",
            Ldc => "ldc",
            Ldm => "ldm",
            Ldmac => "ldmac",
            Mac => "mac",
            Mov => "mov",
            Movfpe => "movfpe",
            Movtpe => "movtpe",
            Mulxs => "mulxs",
            Mulxu => "mulxu",
            Neg => "neg",
            Nop => "nop",
            Not => "not",
            Or => "or",
            Orc => "orc",
            Pop => "pop",
            Push => "push",
            Rotl => "rotl",
            Rotr => "rotr",
            Rotxl => "rotxl",
            Rotxr => "rotxr",
            Rte => "rte",
            Rts => "rts",
            Shal => "shal",
            Shar => "shar",
            Shll => "shll",
            Shlr => "shlr",
            Sleep => "sleep",
            Stc => "stc",
            Stm => "stm",
            Stmac => "stmac",
            Sub => "sub",
            Subs => "subs",
            Subx => "subx",
            Tas => "tas",
            Trapa => "trapa",
            Xor => "xor",
            Xorc => "xorc",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Attributes of an instruction that do not change what it does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// The instruction uses a 4-byte address or displacement field.
    pub long_form: bool,

    /// The opcode only exists on the H8S.
    pub h8s_only: bool,
}

/// A single decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    address: Address,
    length: u8,
    mnemonic: Mnemonic,
    width: Option<Width>,
    operands: Vec<Operand>,
    flags: Flags,
}

impl Instruction {
    pub fn new(
        address: Address,
        length: u8,
        mnemonic: Mnemonic,
        width: Option<Width>,
        operands: Vec<Operand>,
        flags: Flags,
    ) -> Self {
        Instruction {
            address,
            length,
            mnemonic,
            width,
            operands,
            flags,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Length of the instruction in bytes.
    pub fn len(&self) -> u32 {
        self.length as u32
    }

    /// Address of the instruction that follows this one.
    pub fn next_address(&self) -> Address {
        self.address.wrapping_add(self.len())
    }

    pub fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    pub fn width(&self) -> Option<Width> {
        self.width
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn operand(&self, index: usize) -> Option<&Operand> {
        self.operands.get(index)
    }

    /// The source operand of a two-operand instruction.
    pub fn source(&self) -> Option<&Operand> {
        if self.operands.len() == 2 {
            self.operands.first()
        } else {
            None
        }
    }

    /// The last operand, which H8 syntax uses as the destination.
    pub fn destination(&self) -> Option<&Operand> {
        self.operands.last()
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The opcode as written in assembler syntax, with its size suffix.
    pub fn opcode(&self) -> String {
        match self.width {
            Some(width) => format!("{}{}", self.mnemonic, width.suffix()),
            None => self.mnemonic.name().to_string(),
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self.mnemonic, Mnemonic::Rts | Mnemonic::Rte)
    }
}
