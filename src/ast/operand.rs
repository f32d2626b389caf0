//! Operand AST type

use crate::arch::h8::Address;
use crate::ast::{Label, Literal};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// The name of an architecturally defined register, or some derivative of
    /// that register, or another non-register operand defined by the
    /// architecture.
    Symbol(String),

    /// A literal constant value.
    Literal(Literal),

    /// A reference to a user-defined label.
    Label(Label),

    /// An operand which constitutes a data reference.
    DataReference(Box<Operand>),

    /// An operand which constitutes a code reference.
    CodeReference(Box<Operand>),

    /// Some infix operand, e.g. +, * etc
    Infix(Box<Operand>, String, Box<Operand>),

    ///A symbol prefixed to an operand
    PrefixSymbol(String, Box<Operand>),

    ///A symbol suffixed to an operand
    SuffixSymbol(Box<Operand>, String),

    ///A symbol that wraps a comma separated list of operands
    WrapperSymbol(String, Vec<Operand>, String),
}

impl Operand {
    pub fn sym(sym: &str) -> Self {
        Operand::Symbol(sym.to_string())
    }

    pub fn int<MI>(int: MI) -> Self
    where
        Literal: From<MI>,
    {
        Operand::Literal(Literal::from(int))
    }

    pub fn sint(int: i32) -> Self {
        Operand::Literal(Literal::SignedInteger(int))
    }

    pub fn dptr(ptr: Address) -> Self {
        Operand::DataReference(Box::new(Operand::Literal(Literal::Pointer(ptr))))
    }

    pub fn cptr(ptr: Address) -> Self {
        Operand::CodeReference(Box::new(Operand::Literal(Literal::Pointer(ptr))))
    }

    pub fn dlbl(label: Label) -> Self {
        Operand::DataReference(Box::new(Operand::Label(label)))
    }

    pub fn clbl(label: Label) -> Self {
        Operand::CodeReference(Box::new(Operand::Label(label)))
    }

    pub fn str(s: &str) -> Self {
        Operand::Literal(Literal::String(s.to_string()))
    }

    pub fn infix(op1: Self, infix_sym: &str, op2: Self) -> Self {
        Operand::Infix(Box::new(op1), infix_sym.to_string(), Box::new(op2))
    }

    pub fn pref(sym: &str, op: Self) -> Self {
        Operand::PrefixSymbol(sym.to_string(), Box::new(op))
    }

    pub fn suff(op: Self, sym: &str) -> Self {
        Operand::SuffixSymbol(Box::new(op), sym.to_string())
    }

    pub fn wrap(sym1: &str, ops: Vec<Self>, sym2: &str) -> Self {
        Operand::WrapperSymbol(sym1.to_string(), ops, sym2.to_string())
    }

    /// Rewrite every code or data reference to a pointer literal.
    ///
    /// `lookup` is given the pointer and whether it is a code reference; if it
    /// yields a label, the pointer is replaced by that label.
    pub fn replace_pointers<F>(self, lookup: &mut F) -> Self
    where
        F: FnMut(Address, bool) -> Option<Label>,
    {
        match self {
            Operand::DataReference(inner) => match *inner {
                Operand::Literal(Literal::Pointer(ptr)) => match lookup(ptr, false) {
                    Some(label) => Operand::dlbl(label),
                    None => Operand::dptr(ptr),
                },
                other => Operand::DataReference(Box::new(other.replace_pointers(lookup))),
            },
            Operand::CodeReference(inner) => match *inner {
                Operand::Literal(Literal::Pointer(ptr)) => match lookup(ptr, true) {
                    Some(label) => Operand::clbl(label),
                    None => Operand::cptr(ptr),
                },
                other => Operand::CodeReference(Box::new(other.replace_pointers(lookup))),
            },
            Operand::Infix(op1, sym, op2) => Operand::Infix(
                Box::new(op1.replace_pointers(lookup)),
                sym,
                Box::new(op2.replace_pointers(lookup)),
            ),
            Operand::PrefixSymbol(sym, op) => {
                Operand::PrefixSymbol(sym, Box::new(op.replace_pointers(lookup)))
            }
            Operand::SuffixSymbol(op, sym) => {
                Operand::SuffixSymbol(Box::new(op.replace_pointers(lookup)), sym)
            }
            Operand::WrapperSymbol(sym1, ops, sym2) => Operand::WrapperSymbol(
                sym1,
                ops.into_iter().map(|op| op.replace_pointers(lookup)).collect(),
                sym2,
            ),
            other => other,
        }
    }
}
