//! A set of types which allow analysis to model memory correctly.

mod endianness;
mod region;

pub use endianness::Endianness;
pub use region::{Memory, Segment};

#[cfg(test)]
mod tests;
