//! Program identifier

use crate::arch::h8::Address;
use crate::arch::Mode;
use crate::asm::AssemblerName;
use crate::input::parse_int;
use crate::processor::Config;
use clap::{App, Arg, ArgMatches, ArgSettings};
use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    mode: Option<Mode>,
    assembler: Option<AssemblerName>,
    images: Vec<String>,

    #[serde(skip)]
    name: Option<String>,

    /// Address the first image byte is loaded at.
    #[serde(default)]
    load_address: Option<Address>,

    /// Device to pick out of the port configuration.
    #[serde(default)]
    device: Option<String>,

    /// Port configuration file, relative to the project file.
    #[serde(default)]
    port_config: Option<RelativePathBuf>,

    /// Addresses or labels analysis starts from.
    #[serde(default)]
    entry_points: Vec<String>,

    #[serde(default)]
    enum_size: Option<u32>,
}

impl Program {
    pub fn configure_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("image")
                .long("image")
                .value_name("image.bin")
                .help("The program image file to analyze.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("mode")
                .long("mode")
                .value_name("MODE")
                .help("Processor mode: h8300, h8300a, h8s300 or h8s300a.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("asm")
                .long("asm")
                .value_name("ASM")
                .help("What assembler syntax to output: gas or hew.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("load_address")
                .long("load-address")
                .value_name("ADDR")
                .help("Where the image is loaded in memory.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("device")
                .long("device")
                .value_name("DEVICE")
                .help("Which device's I/O port names to use.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("ports")
                .long("ports")
                .value_name("h8.cfg")
                .help("The I/O port configuration file.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
    }

    /// Construct a Program from clap ArgMatches
    pub fn from_arg_matches(args: &ArgMatches) -> Program {
        Program {
            mode: args.value_of("mode").and_then(|s| Mode::from_str(s).ok()),
            assembler: args
                .value_of("asm")
                .and_then(|s| AssemblerName::from_str(s).ok()),
            images: args
                .values_of("image")
                .map_or(Vec::new(), |v| v.map(|s| s.to_string()).collect()),
            name: None,
            load_address: args.value_of("load_address").and_then(parse_int),
            device: args.value_of("device").map(|s| s.to_string()),
            port_config: args.value_of("ports").map(RelativePathBuf::from),
            entry_points: Vec::new(),
            enum_size: None,
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = Some(mode);
    }

    pub fn assembler(&self) -> Option<AssemblerName> {
        self.assembler
    }

    pub fn set_assembler(&mut self, asm: AssemblerName) {
        self.assembler = Some(asm);
    }

    /// List all the image files related to a given program.
    pub fn iter_images(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|s| s.as_ref())
    }

    pub fn add_image_path(&mut self, path: &str) {
        self.images.push(path.to_string());
    }

    pub fn load_address(&self) -> Address {
        self.load_address.unwrap_or(0)
    }

    pub fn iter_entry_points(&self) -> impl Iterator<Item = &str> {
        self.entry_points.iter().map(|s| s.as_ref())
    }

    pub fn as_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Layer settings given in `other` (usually from the command line) over
    /// this program's.
    pub fn apply_override(&self, other: &Program) -> Program {
        Program {
            mode: other.mode.or(self.mode),
            assembler: other.assembler.or(self.assembler),
            name: other.name.clone().or_else(|| self.name.clone()),
            images: match other.images.len() {
                0 => self.images.clone(),
                _ => other.images.clone(),
            },
            load_address: other.load_address.or(self.load_address),
            device: other.device.clone().or_else(|| self.device.clone()),
            port_config: other
                .port_config
                .clone()
                .or_else(|| self.port_config.clone()),
            entry_points: match other.entry_points.len() {
                0 => self.entry_points.clone(),
                _ => other.entry_points.clone(),
            },
            enum_size: other.enum_size.or(self.enum_size),
        }
    }

    /// Build the processor configuration this program asks for.
    ///
    /// Relative paths are resolved against `base_dir`, the directory of the
    /// project file.
    pub fn to_config(&self, base_dir: &Path) -> Config {
        let defaults = Config::default();
        let mode = self.mode.unwrap_or(defaults.mode);

        Config {
            mode,
            assembler: self.assembler.unwrap_or_else(|| mode.default_asm()),
            device: self.device.clone(),
            port_config: self.port_config.as_ref().map(|p| p.to_path(base_dir)),
            enum_size: self.enum_size.unwrap_or(defaults.enum_size),
        }
    }
}
