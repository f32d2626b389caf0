//! CLI command: dis

use crate::analysis;
use crate::arch::h8::Address;
use crate::cli::common::{entry_points, load_session};
use crate::database::Database;
use crate::input;
use crate::project::Program;
use clap::ArgMatches;
use std::io;
use std::path::Path;
use tracing::warn;

/// The end of the run of instructions starting at `start`.
fn end_of_code(db: &Database, start: Address) -> Address {
    let mut pc = start;

    while let Some(len) = db.head(pc) {
        pc += len;
    }

    pc
}

/// Scan a program from an address and list the code found there.
pub fn dis(prog: &Program, base_dir: &Path, argv: &ArgMatches) -> io::Result<()> {
    let (processor, mut db) = load_session(prog, base_dir)?;
    let start_spec = argv.value_of("start_pc").unwrap_or("0");
    let start = input::parse_address(start_spec, Some(&db)).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "Must specify a valid address to analyze",
        )
    })?;

    let mut entries = vec![start];

    entries.extend(entry_points(prog, &processor, &db));

    let report = analysis::scan(&mut db, &entries, processor.mode());

    for (pc, error) in report.failures.iter() {
        warn!("Could not decode code at ${:06X}: {}", pc, error);
    }

    let end = match argv.value_of("end_pc") {
        Some(spec) => input::parse_address(spec, Some(&db)).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "Invalid end address")
        })?,
        None => end_of_code(&db, start),
    };

    let section = analysis::disassemble_range(&db, start, end, &processor.render_context());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    processor.assembler().emit_section(&mut out, &section)
}
