//! Processor architectures that h8dis can analyze.
//!
//! Only one family ships today: the Hitachi (now Renesas) H8/300H and H8S
//! cores, which share an instruction encoding and differ in addressing mode
//! and a handful of H8S-only instructions. The `Mode` enumeration selects
//! between the four supported configurations.

pub mod h8;

use crate::asm;
use serde::Serialize;
use std::{fmt, str};

/// Enumeration of all processor modes h8dis understands.
///
/// A mode fixes both the CPU core (H8/300H or H8S) and the addressing mode
/// (normal, with 16-bit addresses, or advanced, with 24-bit addresses).
#[derive(Copy, Clone, Serialize, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// H8/300H, normal mode.
    H8300,

    /// H8/300H, advanced mode.
    H8300A,

    /// H8S, normal mode.
    H8S,

    /// H8S, advanced mode.
    H8SA,
}

/// The CPU core an instruction is defined on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cpu {
    /// Base instruction set shared by the H8/300H and H8S.
    H8300H,

    /// Instructions and operands only present on the H8S.
    H8S,
}

impl Mode {
    pub fn iter() -> impl IntoIterator<Item = Self> {
        vec![Mode::H8300, Mode::H8300A, Mode::H8S, Mode::H8SA]
    }

    /// The short processor name used on the command line and in project
    /// files.
    pub fn short_name(self) -> &'static str {
        match self {
            Mode::H8300 => "h8300",
            Mode::H8300A => "h8300a",
            Mode::H8S => "h8s300",
            Mode::H8SA => "h8s300a",
        }
    }

    pub fn long_name(self) -> &'static str {
        match self {
            Mode::H8300 => "Hitachi H8/300H normal",
            Mode::H8300A => "Hitachi H8/300H advanced",
            Mode::H8S => "Hitachi H8S normal",
            Mode::H8SA => "Hitachi H8S advanced",
        }
    }

    /// Advanced modes have a 24-bit address space.
    pub fn is_advanced(self) -> bool {
        matches!(self, Mode::H8300A | Mode::H8SA)
    }

    pub fn is_h8s(self) -> bool {
        matches!(self, Mode::H8S | Mode::H8SA)
    }

    /// Determine if an instruction or operand defined on `cpu` is available.
    pub fn supports(self, cpu: Cpu) -> bool {
        match cpu {
            Cpu::H8300H => true,
            Cpu::H8S => self.is_h8s(),
        }
    }

    /// Mask covering every valid linear address.
    pub fn address_mask(self) -> u32 {
        if self.is_advanced() {
            0x00FF_FFFF
        } else {
            0x0000_FFFF
        }
    }

    /// Size of a code pointer in memory, in bytes.
    pub fn ptr_size(self) -> u32 {
        if self.is_advanced() {
            4
        } else {
            2
        }
    }

    /// Width of the virtual segment registers, in bits.
    pub fn segment_bits(self) -> u32 {
        if self.is_advanced() {
            32
        } else {
            16
        }
    }

    /// Determine the default assembler syntax for this mode.
    pub fn default_asm(self) -> asm::AssemblerName {
        asm::AssemblerName::Gas
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl str::FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "h8300" | "h8300h" => Ok(Mode::H8300),
            "h8300a" | "h8300ha" => Ok(Mode::H8300A),
            "h8s300" | "h8s" => Ok(Mode::H8S),
            "h8s300a" | "h8sa" => Ok(Mode::H8SA),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(Mode, "valid H8 processor mode");
