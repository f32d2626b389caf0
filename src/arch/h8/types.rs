//! Types used in modeling the H8/300H and H8S

use crate::arch::Mode;
use std::{fmt, str};

/// A linear address on the H8 bus.
pub type Address = u32;

/// Enumeration of all architectural H8 registers.
///
/// Discriminants form a stable id namespace: sixteen-bit halves first, then
/// the extended halves, the byte registers, the 32-bit registers, and finally
/// the control registers. `R7` and `ER7` double as the stack pointer. `CS`
/// and `DS` are virtual segment registers; they never appear in a decoded
/// operand.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    E0,
    E1,
    E2,
    E3,
    E4,
    E5,
    E6,
    E7,
    R0H,
    R1H,
    R2H,
    R3H,
    R4H,
    R5H,
    R6H,
    R7H,
    R0L,
    R1L,
    R2L,
    R3L,
    R4L,
    R5L,
    R6L,
    R7L,
    ER0,
    ER1,
    ER2,
    ER3,
    ER4,
    ER5,
    ER6,
    ER7,
    MACL,
    MACH,
    PC,
    CCR,
    EXR,
    CS,
    DS,
}

const ALL_REGISTERS: [Register; 47] = {
    use Register::*;

    [
        R0, R1, R2, R3, R4, R5, R6, R7, E0, E1, E2, E3, E4, E5, E6, E7, R0H, R1H, R2H, R3H, R4H,
        R5H, R6H, R7H, R0L, R1L, R2L, R3L, R4L, R5L, R6L, R7L, ER0, ER1, ER2, ER3, ER4, ER5, ER6,
        ER7, MACL, MACH, PC, CCR, EXR, CS, DS,
    ]
};

const REGISTER_NAMES: [&str; 47] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "sp", "e0", "e1", "e2", "e3", "e4", "e5", "e6", "e7",
    "r0h", "r1h", "r2h", "r3h", "r4h", "r5h", "r6h", "r7h", "r0l", "r1l", "r2l", "r3l", "r4l",
    "r5l", "r6l", "r7l", "er0", "er1", "er2", "er3", "er4", "er5", "er6", "sp", "macl", "mach",
    "pc", "ccr", "exr", "cs", "ds",
];

impl Register {
    /// Every register, in id order.
    pub fn all() -> &'static [Register] {
        &ALL_REGISTERS
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Decode a 4-bit byte register field: `0-7` are `r0h-r7h`, `8-F` are
    /// `r0l-r7l`.
    pub fn byte(field: u8) -> Self {
        ALL_REGISTERS[16 + (field & 0xF) as usize]
    }

    /// Decode a 4-bit word register field: `0-7` are `r0-r7`, `8-F` are
    /// `e0-e7`.
    pub fn word(field: u8) -> Self {
        ALL_REGISTERS[(field & 0xF) as usize]
    }

    /// Decode a 3-bit long register field.
    pub fn long(field: u8) -> Self {
        ALL_REGISTERS[32 + (field & 0x7) as usize]
    }

    /// The general register number (0-7) this register is a part of.
    ///
    /// `r3h`, `r3l`, `r3`, `e3` and `er3` all share number 3. Control
    /// registers have no number.
    pub fn number(self) -> Option<u8> {
        let id = self.id();

        if id < 40 {
            Some(id % 8)
        } else {
            None
        }
    }

    /// The operand width of a general register, if any.
    pub fn width(self) -> Option<Width> {
        match self.id() {
            0..=15 => Some(Width::Word),
            16..=31 => Some(Width::Byte),
            32..=39 => Some(Width::Long),
            _ => None,
        }
    }

    /// True for `r7` and `er7`, the halves of the stack pointer that can be
    /// used to address memory.
    pub fn is_sp(self) -> bool {
        matches!(self, Register::R7 | Register::ER7)
    }

    /// True for registers that only exist on the H8S.
    pub fn is_h8s_only(self) -> bool {
        matches!(self, Register::EXR | Register::MACH | Register::MACL)
    }

    pub fn name(self) -> &'static str {
        REGISTER_NAMES[self as usize]
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl str::FromStr for Register {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();

        match lower.as_str() {
            "r7" => return Ok(Register::R7),
            "er7" => return Ok(Register::ER7),
            _ => {}
        }

        REGISTER_NAMES
            .iter()
            .position(|n| *n == lower)
            .map(|i| ALL_REGISTERS[i])
            .ok_or(())
    }
}

/// The size of an operation.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Width {
    Byte,
    Word,
    Long,
}

impl Width {
    pub fn bytes(self) -> u32 {
        match self {
            Width::Byte => 1,
            Width::Word => 2,
            Width::Long => 4,
        }
    }

    /// Mnemonic size suffix, including the dot.
    pub fn suffix(self) -> &'static str {
        match self {
            Width::Byte => ".b",
            Width::Word => ".w",
            Width::Long => ".l",
        }
    }

    /// Wrap a signed value into the range of this width.
    pub fn wrap(self, value: i64) -> i32 {
        match self {
            Width::Byte => value as i8 as i32,
            Width::Word => value as i16 as i32,
            Width::Long => value as i32,
        }
    }
}

/// The number of bits an encoded address or displacement field occupies.
///
/// Absolute and displacement operands keep this so they can be rendered with
/// the size the program was assembled with.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Encoding {
    E8,
    E16,
    E24,
    E32,
}

impl Encoding {
    pub fn bits(self) -> u32 {
        match self {
            Encoding::E8 => 8,
            Encoding::E16 => 16,
            Encoding::E24 => 24,
            Encoding::E32 => 32,
        }
    }

    /// The suffix naming this encoding in assembler syntax.
    pub fn suffix(self) -> &'static str {
        match self {
            Encoding::E8 => ":8",
            Encoding::E16 => ":16",
            Encoding::E24 => ":24",
            Encoding::E32 => ":32",
        }
    }

    /// The encoding a 4-byte address field is named with in a given mode.
    ///
    /// The H8/300H only has a 24-bit address bus and calls the 4-byte form
    /// `:24`; the H8S calls it `:32`.
    pub fn long_form(mode: Mode) -> Self {
        if mode.is_h8s() {
            Encoding::E32
        } else {
            Encoding::E24
        }
    }
}

/// Branch conditions, in the order they are encoded in a `Bcc` opcode.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Condition {
    Always,
    Never,
    Higher,
    LowerOrSame,
    CarryClear,
    CarrySet,
    NotEqual,
    Equal,
    OverflowClear,
    OverflowSet,
    Plus,
    Minus,
    GreaterOrEqual,
    Less,
    Greater,
    LessOrEqual,
}

const CONDITIONS: [Condition; 16] = {
    use Condition::*;

    [
        Always,
        Never,
        Higher,
        LowerOrSame,
        CarryClear,
        CarrySet,
        NotEqual,
        Equal,
        OverflowClear,
        OverflowSet,
        Plus,
        Minus,
        GreaterOrEqual,
        Less,
        Greater,
        LessOrEqual,
    ]
};

impl Condition {
    pub fn from_field(field: u8) -> Self {
        CONDITIONS[(field & 0xF) as usize]
    }

    /// The branch mnemonic with this condition folded in.
    pub fn mnemonic(self) -> &'static str {
        use Condition::*;

        match self {
            Always => "bra",
            Never => "brn",
            Higher => "bhi",
            LowerOrSame => "bls",
            CarryClear => "bcc",
            CarrySet => "bcs",
            NotEqual => "bne",
            Equal => "beq",
            OverflowClear => "bvc",
            OverflowSet => "bvs",
            Plus => "bpl",
            Minus => "bmi",
            GreaterOrEqual => "bge",
            Less => "blt",
            Greater => "bgt",
            LessOrEqual => "ble",
        }
    }
}
