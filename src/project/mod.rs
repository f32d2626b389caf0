//! Project file structures

mod program;
mod repr;

#[cfg(test)]
mod tests;

pub use program::Program;
pub use repr::Project;
