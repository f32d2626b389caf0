//! Common utilities for command implementations

use crate::analysis::DatabaseView;
use crate::arch::h8::Address;
use crate::database::Database;
use crate::input;
use crate::memory::Memory;
use crate::processor::Processor;
use crate::project::{Program, Project};
use clap::{App, Arg, SubCommand};
use std::path::Path;
use std::str::FromStr;
use std::{fs, io};
use tracing::{debug, warn};

/// Enumeration of all CLI commands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Disassemble,
    Frame,
    Decode,
}

impl Command {
    /// Enumerate all commands that h8dis recognizes.
    pub fn enumerate() -> Vec<Self> {
        use Command::*;

        vec![Disassemble, Frame, Decode]
    }

    /// Construct the subcommand object for this particular `Command`.
    pub fn into_clap_subcommand<'a, 'b>(self) -> App<'a, 'b> {
        match self {
            Command::Disassemble => SubCommand::with_name("dis")
                .about("Scan and list code for a given address or label")
                .arg(
                    Arg::with_name("start_pc")
                        .value_name("1234")
                        .index(1)
                        .required(true)
                        .help("The address or label to list code for"),
                )
                .arg(
                    Arg::with_name("end_pc")
                        .value_name("1300")
                        .index(2)
                        .help("Where to stop listing; defaults to the end of the scanned code"),
                ),
            Command::Frame => SubCommand::with_name("frame")
                .about("Recover the stack frame of the function at a given address")
                .arg(
                    Arg::with_name("start_pc")
                        .value_name("1234")
                        .index(1)
                        .required(true)
                        .help("The function entry address or label"),
                ),
            Command::Decode => SubCommand::with_name("decode")
                .about("Decode a single instruction from hex bytes")
                .arg(
                    Arg::with_name("bytes")
                        .value_name("6A 28 00 12 34 56")
                        .index(1)
                        .required(true)
                        .multiple(true)
                        .help("The instruction bytes, in hexadecimal"),
                )
                .arg(
                    Arg::with_name("at")
                        .long("at")
                        .value_name("ADDR")
                        .takes_value(true)
                        .help("The address the bytes are decoded at"),
                ),
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "dis" => Ok(Command::Disassemble),
            "frame" => Ok(Command::Frame),
            "decode" => Ok(Command::Decode),
            _ => Err(()),
        }
    }
}

/// Pick the program to work on and apply command line overrides to it.
pub fn resolve_program(project: &Project, name: Option<&str>, cli: &Program) -> io::Result<Program> {
    let base = match name {
        Some(name) => project.program(name).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Program {} is missing from project file", name),
            )
        })?,
        None => project
            .default_program()
            .map(|(_, p)| p.clone())
            .unwrap_or_default(),
    };

    Ok(base.apply_override(cli))
}

/// Configure a processor and load the program image into a fresh database.
pub fn load_session(prog: &Program, base_dir: &Path) -> io::Result<(Processor, Database)> {
    let mut processor = Processor::new(prog.to_config(base_dir));

    processor.reload_symbols()?;

    let image = prog.iter_images().next().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "Did not specify an image")
    })?;
    let mut file = fs::File::open(base_dir.join(image))?;
    let memory = Memory::from_image(&mut file, prog.load_address())?;

    debug!(image, load_address = prog.load_address(), "loaded program image");

    Ok((processor, Database::new(memory)))
}

/// Every address analysis should start from: the program's configured entry
/// points and the handlers named by the device's vector entries.
pub fn entry_points(prog: &Program, processor: &Processor, db: &Database) -> Vec<Address> {
    let mut entries = Vec::new();

    for spec in prog.iter_entry_points() {
        match input::parse_address(spec, Some(db)) {
            Some(address) => entries.push(address),
            None => warn!(entry = spec, "ignoring unparseable entry point"),
        }
    }

    let mode = processor.mode();

    if let Some(ports) = processor.ports() {
        for vector in ports.entries() {
            let handler = if mode.is_advanced() {
                db.read_long(vector.address())
            } else {
                db.read_word(vector.address()).map(Address::from)
            };

            if let Some(handler) = handler.map(|h| h & mode.address_mask()) {
                if db.is_mapped(handler) {
                    entries.push(handler);
                }
            }
        }
    }

    entries
}
