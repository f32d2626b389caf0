//! AST type for literal values

use crate::arch::h8::Address;

/// A literal value, before an assembler syntax has decided how to spell it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Integer(u32),
    SignedInteger(i32),
    Pointer(Address),
    String(String),
}

impl Literal {
    /// Yields `true` if this literal is a pointer.
    pub fn is_pointer(&self) -> bool {
        matches!(self, Literal::Pointer(_))
    }

    /// If this literal represents a pointer value, then return it's pointer
    /// value. Otherwise, destroy the literal.
    pub fn into_pointer(self) -> Option<Address> {
        match self {
            Literal::Pointer(p) => Some(p),
            _ => None,
        }
    }
}

impl From<u8> for Literal {
    fn from(v: u8) -> Self {
        Self::Integer(v.into())
    }
}

impl From<u16> for Literal {
    fn from(v: u16) -> Self {
        Self::Integer(v.into())
    }
}

impl From<u32> for Literal {
    fn from(v: u32) -> Self {
        Self::Integer(v)
    }
}

impl From<i8> for Literal {
    fn from(v: i8) -> Self {
        Self::SignedInteger(v.into())
    }
}

impl From<i16> for Literal {
    fn from(v: i16) -> Self {
        Self::SignedInteger(v.into())
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Self::SignedInteger(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}
