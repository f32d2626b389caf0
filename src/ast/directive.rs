//! Generic assembler directives for the AST

use crate::arch::h8::Address;
use crate::ast::{Instruction, Label, Operand};

/// Represents a particular assembler directive.
///
/// An assembler directive consists of a particular command to the assembler
/// that either:
///
/// 1. Generates data, such as an instruction mnemonic or raw data stream
/// 2. Moves the assembled code's location around, or adds spaces to the stream
/// 3. Creates new labels in the generated assembly
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Generate an instruction in the resulting instruction stream, along
    /// with the size of its encoding.
    EmitInstr(Instruction, u32),

    /// Generate raw data in the resulting instruction stream.
    EmitData(Vec<u8>),

    /// Generate a table of pointers, each `u32` bytes wide.
    EmitPointers(Vec<Operand>, u32),

    /// Declare an empty space of some size
    EmitSpace(u32),

    /// Declare a new label.
    DeclareLabel(Label),

    /// Declare the location of future instructions.
    DeclareOrg(Address),

    /// Declare a comment.
    DeclareComment(String),
}
