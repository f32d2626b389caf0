//! Machine-code front end for the Hitachi/Renesas H8/300H and H8S processor
//! families.
//!
//! The core (`arch::h8`) decodes, emulates and renders single instructions
//! and recovers stack frames. The rest of the crate is the plumbing around it:
//! a memory model, an analysis database, assembler syntaxes, a project file
//! and a command line front end.

#[macro_use]
extern crate clap;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

pub mod analysis;
pub mod arch;
pub mod asm;
pub mod ast;
pub mod cli;
pub mod database;
pub mod input;
pub mod memory;
pub mod processor;
pub mod project;

pub use processor::{Config, Processor};
