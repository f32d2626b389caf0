//! Types to represent endianness.

use num_traits::PrimInt;
use std::mem;

/// Indicates the byte (or memory unit) order when reading words from memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endianness {
    /// Words are stored in memory least significant bit first.
    ///
    /// This is "backwards" compared to how English writes numbers.
    LittleEndian,

    /// Words are stored in memory most significant bit first.
    ///
    /// This is the same order as how English writes numbers, and how the H8
    /// stores everything.
    BigEndian,
}

impl Endianness {
    /// Assemble a word out of memory units.
    ///
    /// Yields `None` if `units` does not hold exactly one word of type `T`.
    pub fn assemble<T>(self, units: &[u8]) -> Option<T>
    where
        T: PrimInt,
    {
        if units.len() != mem::size_of::<T>() {
            return None;
        }

        let fold = |acc: Option<T>, unit: &u8| -> Option<T> {
            let unit = T::from(*unit)?;

            Some((acc? << 8) | unit)
        };

        match self {
            Endianness::BigEndian => units.iter().fold(Some(T::zero()), fold),
            Endianness::LittleEndian => units.iter().rev().fold(Some(T::zero()), fold),
        }
    }
}
