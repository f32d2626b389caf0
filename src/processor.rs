//! The processor module: configuration, lifecycle and capability queries.
//!
//! Everything mode dependent that the rest of the crate consults lives in a
//! `Config` owned by the `Processor`. It only ever changes through the
//! methods below.

use crate::analysis::{self, DatabaseView};
use crate::arch::h8::{self, Address, EffectSet, Frame, FrameFailure, Instruction, Mnemonic};
use crate::arch::h8::{Register, RenderContext, Rendered};
use crate::arch::Mode;
use crate::asm::{Assembler, AssemblerName};
use crate::database::{self, PortDatabase};
use std::path::PathBuf;
use tracing::{debug, info};

/// Mode and symbol settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub assembler: AssemblerName,

    /// Device to select from the port configuration. `None` uses the file's
    /// default device.
    pub device: Option<String>,

    /// Port configuration file, usually called `h8.cfg`.
    pub port_config: Option<PathBuf>,

    /// Size of an `enum` in bytes.
    pub enum_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: Mode::H8300A,
            assembler: AssemblerName::Gas,
            device: None,
            port_config: None,
            enum_size: 2,
        }
    }
}

/// A configured H8 processor.
#[derive(Debug, Default)]
pub struct Processor {
    config: Config,
    ports: Option<PortDatabase>,
}

impl Processor {
    pub fn new(config: Config) -> Self {
        Processor {
            config,
            ports: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn ports(&self) -> Option<&PortDatabase> {
        self.ports.as_ref()
    }

    /// Switch processor modes.
    pub fn set_mode(&mut self, mode: Mode) {
        debug!(mode = mode.short_name(), "processor mode set");

        self.config.mode = mode;

        if let Some(ports) = self.ports.as_mut() {
            ports.set_address_mask(mode.address_mask());
        }
    }

    /// Reread the port configuration file and select the configured device.
    ///
    /// With no port configuration, port names are simply not available.
    pub fn reload_symbols(&mut self) -> database::Result<()> {
        let path = match &self.config.port_config {
            Some(path) => path,
            None => {
                self.ports = None;
                return Ok(());
            }
        };

        let mut ports = PortDatabase::from_file(path)?;

        if let Some(device) = &self.config.device {
            ports.select_device(device)?;
        }

        ports.set_address_mask(self.config.mode.address_mask());

        info!(
            device = ports.active_device().map_or("(none)", |d| d.name()),
            "loaded port symbols"
        );

        self.ports = Some(ports);

        Ok(())
    }

    /// Change the selected device.
    pub fn select_device(&mut self, name: &str) -> database::Result<()> {
        if let Some(ports) = self.ports.as_mut() {
            ports.select_device(name)?;
        }

        self.config.device = Some(name.to_string());

        Ok(())
    }

    /// Drop loaded symbols and return to the default configuration.
    pub fn teardown(&mut self) {
        self.ports = None;
        self.config = Config::default();
    }

    /// Largest pointer the processor can produce, including a segment byte.
    pub fn max_ptr_size(&self) -> u32 {
        4 + 1
    }

    /// Width of the code and data segment registers in the current mode.
    pub fn segment_bits(&self) -> u32 {
        self.config.mode.segment_bits()
    }

    /// Bytes removed from the stack by a callee, for any calling convention.
    pub fn calc_purged_bytes(&self) -> u32 {
        2
    }

    /// The H8 has no based pointers.
    pub fn based_ptr(&self, _insn: &Instruction) -> Option<(u32, Address)> {
        None
    }

    pub fn default_enum_size(&self) -> u32 {
        self.config.enum_size
    }

    /// Names need no decoration. `None` means the name is used as given.
    pub fn decorate_name(&self, _name: &str) -> Option<String> {
        None
    }

    pub fn register_names(&self) -> Vec<&'static str> {
        Register::all().iter().map(|r| r.name()).collect()
    }

    /// The instruction that returns from a subroutine.
    pub fn return_mnemonic(&self) -> Mnemonic {
        Mnemonic::Rts
    }

    pub fn short_name(&self) -> &'static str {
        self.config.mode.short_name()
    }

    pub fn long_name(&self) -> &'static str {
        self.config.mode.long_name()
    }

    pub fn assembler(&self) -> Box<dyn Assembler> {
        self.config.assembler.assembler()
    }

    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            mode: self.config.mode,
            ports: self.ports.as_ref(),
        }
    }

    pub fn decode(&self, bytes: &[u8], address: Address) -> analysis::Result<Instruction> {
        h8::decode(bytes, address, self.config.mode)
    }

    pub fn emulate<D>(&self, insn: &Instruction, db: &D) -> EffectSet
    where
        D: DatabaseView + ?Sized,
    {
        h8::emulate(insn, db, self.config.mode)
    }

    pub fn render(&self, insn: &Instruction) -> Rendered {
        h8::render(insn, &self.render_context())
    }

    pub fn build_frame<D>(&self, entry: Address, db: &D) -> Result<Frame, FrameFailure>
    where
        D: DatabaseView + ?Sized,
    {
        h8::build_frame(entry, db, self.config.mode)
    }

    pub fn get_frame_retsize(&self) -> u32 {
        h8::get_frame_retsize(self.config.mode)
    }
}
