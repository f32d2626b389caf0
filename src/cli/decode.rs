//! CLI command: decode

use crate::arch::h8::Edge;
use crate::database::Database;
use crate::input;
use crate::memory::{Memory, Segment};
use crate::processor::Processor;
use crate::project::Program;
use clap::ArgMatches;
use std::io::{self, Write};
use std::path::Path;

/// Decode one instruction given on the command line and describe it.
pub fn decode(prog: &Program, base_dir: &Path, argv: &ArgMatches) -> io::Result<()> {
    let mut processor = Processor::new(prog.to_config(base_dir));

    processor.reload_symbols()?;

    let text = argv
        .values_of("bytes")
        .map_or_else(String::new, |v| v.collect::<Vec<_>>().join(" "));
    let bytes = input::parse_hex_bytes(&text).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "Bytes must be given in hex")
    })?;
    let address = match argv.value_of("at") {
        Some(spec) => input::parse_address(spec, None).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "Invalid address")
        })?,
        None => prog.load_address(),
    };

    let insn = processor.decode(&bytes, address)?;

    let mut memory = Memory::new();
    memory.install_segment(Segment::new("INPUT", address, bytes));

    let db = Database::new(memory);
    let effects = processor.emulate(&insn, &db);
    let rendered = processor.render(&insn);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    processor.assembler().emit_instr(&mut out, &rendered.instr)?;
    writeln!(out, "  length {}", insn.len())?;

    for edge in effects.edges.iter() {
        match edge {
            Edge::Fallthrough(to) => writeln!(out, "  falls through to ${:06X}", to)?,
            Edge::Jump(Some(to)) => writeln!(out, "  jumps to ${:06X}", to)?,
            Edge::Jump(None) => writeln!(out, "  jumps to an unknown target")?,
            Edge::ConditionalJump(to) => writeln!(out, "  may branch to ${:06X}", to)?,
            Edge::Call(Some(to)) => writeln!(out, "  calls ${:06X}", to)?,
            Edge::Call(None) => writeln!(out, "  calls an unknown target")?,
            Edge::Return => writeln!(out, "  returns")?,
        }
    }

    for to in effects.data_refs.iter() {
        writeln!(out, "  references data at ${:06X}", to)?;
    }

    if let Some(delta) = effects.sp_delta {
        writeln!(out, "  moves sp by {:+}", delta)?;
    }

    Ok(())
}
