//! Types needed to analyze references

use crate::arch::h8::Address;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    Unknown,
    Data,
    Code,
    Subroutine,
}

impl Display for ReferenceKind {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ReferenceKind::Unknown => write!(f, "UNK"),
            ReferenceKind::Data => write!(f, "DAT"),
            ReferenceKind::Code => write!(f, "LOC"),
            ReferenceKind::Subroutine => write!(f, "FUN"),
        }
    }
}

/// A reference from one instruction to another location.
///
/// References whose target could not be determined statically (register
/// indirect jumps, for example) are dynamic and have no target.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    from: Address,
    to: Option<Address>,
    reftype: ReferenceKind,
}

impl Reference {
    pub fn new_static_ref(from: Address, to: Address, kind: ReferenceKind) -> Self {
        Reference {
            from,
            to: Some(to),
            reftype: kind,
        }
    }

    pub fn new_dyn_ref(from: Address, kind: ReferenceKind) -> Self {
        Reference {
            from,
            to: None,
            reftype: kind,
        }
    }

    pub fn as_source(&self) -> Address {
        self.from
    }

    pub fn as_target(&self) -> Option<Address> {
        self.to
    }

    pub fn kind(&self) -> ReferenceKind {
        self.reftype
    }

    pub fn is_code(&self) -> bool {
        matches!(self.reftype, ReferenceKind::Code | ReferenceKind::Subroutine)
    }
}
