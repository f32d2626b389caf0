//! Interop with different assembler syntaxes

pub mod gas;
pub mod hew;
mod traits;

#[cfg(test)]
mod tests;

pub use traits::Assembler;

use serde::Serialize;
use std::str;

#[derive(Copy, Clone, Serialize, Debug, PartialEq, Eq)]
pub enum AssemblerName {
    Gas,
    Hew,
}

impl str::FromStr for AssemblerName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "gas" | "gnu" => Ok(AssemblerName::Gas),
            "hew" | "renesas" => Ok(AssemblerName::Hew),
            _ => Err(()),
        }
    }
}

impl AssemblerName {
    pub fn iter() -> impl IntoIterator<Item = Self> {
        vec![Self::Gas, Self::Hew]
    }

    pub fn friendly_name(self) -> &'static str {
        match self {
            Self::Gas => "GNU as",
            Self::Hew => "Renesas HEW",
        }
    }

    /// Construct the syntax this name refers to.
    pub fn assembler(self) -> Box<dyn Assembler> {
        match self {
            Self::Gas => Box::new(gas::Gas),
            Self::Hew => Box::new(hew::Hew),
        }
    }
}

derive_deserialize_from_str!(AssemblerName, "valid assembler name");
