//! Control flow classification

/// How control leaves an instruction, as far as the enclosing function is
/// concerned.
///
/// Calls and traps come back to the next instruction, so they count as
/// `Normal`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Execution continues at the next instruction.
    Normal,

    /// Execution may transfer elsewhere. The flag is set when the next
    /// instruction is also a possible successor, as for a conditional branch.
    Branching(bool),

    /// The function ends here.
    Returning,
}

impl Flow {
    /// True if the next instruction can execute after this one.
    pub fn falls_through(self) -> bool {
        match self {
            Flow::Normal => true,
            Flow::Branching(with_next) => with_next,
            Flow::Returning => false,
        }
    }
}
