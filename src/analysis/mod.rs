//! Tools for analysis of disassembled program code

mod error;
mod flow;
mod passes;
mod reference;
mod traits;

pub use error::Error;
pub use error::Result;
pub use flow::Flow;
pub use passes::{disassemble_range, scan, ScanReport};
pub use reference::Reference;
pub use reference::ReferenceKind;
pub use traits::DatabaseView;
