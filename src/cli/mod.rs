//! CLI commands

mod common;
mod decode;
mod dis;
mod frame;
mod main;

pub use common::{load_session, resolve_program, Command};
pub use decode::decode;
pub use dis::dis;
pub use frame::frame;
pub use main::main;
