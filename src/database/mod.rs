//! Analysis database - Allows accumulation of program facts as disassembly
//! passes run on the program.

mod db;
mod error;
mod ports;

#[cfg(test)]
mod tests;

pub use db::Database;
pub use error::{Error, Result};
pub use ports::{Device, Port, PortDatabase};
