//! CLI command: frame

use crate::analysis;
use crate::arch::h8::SlotRole;
use crate::cli::common::load_session;
use crate::input;
use crate::project::Program;
use clap::ArgMatches;
use std::io::{self, Write};
use std::path::Path;

fn role_name(role: SlotRole) -> &'static str {
    match role {
        SlotRole::SavedRegister => "saved register",
        SlotRole::Local => "local",
        SlotRole::ReturnAddress => "return address",
        SlotRole::IncomingArgument => "argument",
    }
}

/// Print the stack frame of the function at an address.
pub fn frame(prog: &Program, base_dir: &Path, argv: &ArgMatches) -> io::Result<()> {
    let (processor, mut db) = load_session(prog, base_dir)?;
    let start_spec = argv.value_of("start_pc").unwrap_or("0");
    let entry = input::parse_address(start_spec, Some(&db)).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "Must specify a valid function address",
        )
    })?;

    analysis::scan(&mut db, &[entry], processor.mode());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let frame = match processor.build_frame(entry, &db) {
        Ok(frame) => frame,
        Err(why) => return writeln!(out, "${:06X}: {}", entry, why),
    };

    writeln!(
        out,
        "${:06X}: {} byte frame, prologue ends at ${:06X}",
        entry,
        frame.frame_size(),
        frame.prologue_end()
    )?;

    if let (Some(fp), Some(offset)) = (frame.frame_pointer(), frame.frame_pointer_offset()) {
        writeln!(out, "  frame pointer {} = sp{:+}", fp, offset)?;
    }

    for slot in frame.entries() {
        writeln!(
            out,
            "  {:+5} {:3} {}",
            slot.offset,
            slot.size,
            role_name(slot.role)
        )?;
    }

    Ok(())
}
