//! Instruction AST type

use crate::ast::{Label, Operand};
use crate::arch::h8::Address;
use std::slice;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// The instruction being executed
    opcode: String,
    /// Operands for the instruction, if any
    operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(opcode: &str, operands: Vec<Operand>) -> Self {
        Instruction {
            opcode: opcode.to_string(),
            operands,
        }
    }

    pub fn opcode(&self) -> &str {
        &self.opcode
    }

    pub fn iter_operands(&self) -> slice::Iter<Operand> {
        self.operands.iter()
    }

    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }

    /// Replace pointer literals with labels, as `Operand::replace_pointers`.
    pub fn replace_pointers<F>(self, mut lookup: F) -> Self
    where
        F: FnMut(Address, bool) -> Option<Label>,
    {
        Instruction {
            opcode: self.opcode,
            operands: self
                .operands
                .into_iter()
                .map(|op| op.replace_pointers(&mut lookup))
                .collect(),
        }
    }
}
