//! CLI support for non-command bits

use crate::cli::common::{resolve_program, Command};
use crate::{cli, project};
use clap::{Arg, ArgSettings};
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::Level;

/// Map the number of `-v` flags to a log level.
fn verbosity(occurrences: u64) -> Level {
    match occurrences {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn main() -> io::Result<()> {
    let mut app = app_from_crate!();
    app = app.arg(
        Arg::with_name("program")
            .long("program")
            .value_name("myapp")
            .takes_value(true)
            .help("Which program to analyze")
            .set(ArgSettings::Global),
    );
    app = project::Program::configure_app(app);
    app = app.arg(
        Arg::with_name("project")
            .long("project")
            .value_name("h8dis.json")
            .takes_value(true)
            .help("The project file to load")
            .set(ArgSettings::Global),
    );
    app = app.arg(
        Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .help("Log more; may be repeated")
            .set(ArgSettings::Global),
    );

    for cmd in Command::enumerate().iter() {
        app = app.subcommand(cmd.into_clap_subcommand());
    }

    let matches = app.get_matches();

    tracing_subscriber::fmt()
        .with_max_level(verbosity(matches.occurrences_of("verbose")))
        .with_writer(io::stderr)
        .init();

    let project_filename = Path::new(matches.value_of("project").unwrap_or("h8dis.json"));
    let project = match project::Project::read(project_filename) {
        Ok(project) => project,
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => project::Project::default(),
        Err(e) => return Err(e),
    };

    let cli_prog = project::Program::from_arg_matches(&matches);
    let prog = resolve_program(&project, matches.value_of("program"), &cli_prog)?;
    let base_dir = project.base_dir();

    let (command, submatches) = matches.subcommand();
    let submatches = submatches.ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "No command given; try --help")
    })?;

    match Command::from_str(command) {
        Ok(Command::Disassemble) => cli::dis(&prog, base_dir, submatches),
        Ok(Command::Frame) => cli::frame(&prog, base_dir, submatches),
        Ok(Command::Decode) => cli::decode(&prog, base_dir, submatches),
        Err(()) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Unknown command {}", command),
        )),
    }
}
