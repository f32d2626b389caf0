//! I/O port symbol files
//!
//! Port configuration files describe the memory-mapped registers of each
//! device in a processor family. The format is line based:
//!
//! ```text
//! ; comment
//! .default H8S2633
//!
//! .H8S2633
//! area DATA RAM 0xFFB000:0xFFF000
//! entry RESET 0x0000 Power-on reset
//! SMR0 0xFFFF78 Serial mode register 0
//! ```
//!
//! A line starting with `.` opens the section for the named device, except
//! for `.default`, which names the device selected when nothing else is
//! asked for. Port lines outside any section are shared by every device.

use crate::arch::h8::Address;
use crate::database::{Error, Result};
use crate::input::parse_int;
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use tracing::{trace, warn};

/// A named address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Port {
    name: String,
    address: Address,
    comment: Option<String>,
}

impl Port {
    pub fn new(name: &str, address: Address, comment: Option<&str>) -> Self {
        Port {
            name: name.to_string(),
            address,
            comment: comment.map(|c| c.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Everything known about one device.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Device {
    name: String,
    ports: Vec<Port>,
    entries: Vec<Port>,
}

impl Device {
    fn new(name: &str) -> Self {
        Device {
            name: name.to_string(),
            ..Device::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Interrupt and reset vectors the device declares.
    pub fn entries(&self) -> &[Port] {
        &self.entries
    }
}

/// The port symbols of a processor family, with one device selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortDatabase {
    /// Ports listed outside of any device section.
    common: Device,
    devices: Vec<Device>,
    default: Option<String>,
    active: Option<usize>,
    address_mask: Address,
}

/// Split the next whitespace delimited word off of a line.
fn next_word(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();

    if line.is_empty() {
        return None;
    }

    match line.find(char::is_whitespace) {
        Some(end) => Some((&line[..end], line[end..].trim())),
        None => Some((line, "")),
    }
}

/// Parse `NAME address [comment]`.
fn parse_port(line: &str) -> Option<Port> {
    let (name, rest) = next_word(line)?;
    let (address, comment) = next_word(rest)?;
    let address = parse_int(address)?;

    Some(Port::new(
        name,
        address,
        Some(comment).filter(|c| !c.is_empty()),
    ))
}

impl Default for PortDatabase {
    fn default() -> Self {
        PortDatabase::new()
    }
}

impl PortDatabase {
    pub fn new() -> Self {
        PortDatabase {
            common: Device::default(),
            devices: Vec::new(),
            default: None,
            active: None,
            address_mask: Address::MAX,
        }
    }

    /// Parse a port configuration file.
    ///
    /// Lines that cannot be understood are skipped with a warning. The
    /// default device, if the file names one that exists, starts out
    /// selected.
    pub fn parse<R>(reader: R) -> io::Result<Self>
    where
        R: BufRead,
    {
        let mut db = PortDatabase::new();
        let mut current: Option<usize> = None;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let line = match line.find(';') {
                Some(comment) => &line[..comment],
                None => &line[..],
            };
            let (keyword, rest) = match next_word(line) {
                Some(words) => words,
                None => continue,
            };

            if keyword == ".default" {
                match next_word(rest) {
                    Some((name, _)) => db.default = Some(name.to_string()),
                    None => warn!(line = lineno + 1, ".default without a device name"),
                }

                continue;
            }

            if let Some(name) = keyword.strip_prefix('.') {
                current = Some(match db.devices.iter().position(|d| d.name == name) {
                    Some(existing) => existing,
                    None => {
                        db.devices.push(Device::new(name));
                        db.devices.len() - 1
                    }
                });

                continue;
            }

            let device = match current {
                Some(index) => &mut db.devices[index],
                None => &mut db.common,
            };

            match keyword {
                "area" => trace!(line = lineno + 1, "ignoring area declaration"),
                "entry" => match parse_port(rest) {
                    Some(entry) => device.entries.push(entry),
                    None => warn!(line = lineno + 1, "malformed entry line"),
                },
                _ => match parse_port(line) {
                    Some(port) => device.ports.push(port),
                    None => warn!(line = lineno + 1, "malformed port line"),
                },
            }
        }

        if let Some(default) = db.default.clone() {
            if db.select_device(&default).is_err() {
                warn!(device = default.as_str(), "default device has no section");
            }
        }

        Ok(db)
    }

    /// Read a port configuration file from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;

        Ok(Self::parse(io::BufReader::new(file))?)
    }

    /// Names of every device the file describes.
    pub fn devices(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(|d| d.name())
    }

    pub fn default_device(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn active_device(&self) -> Option<&Device> {
        self.active.and_then(|i| self.devices.get(i))
    }

    /// Select the device whose ports `find_sym` reports.
    pub fn select_device(&mut self, name: &str) -> Result<()> {
        match self.devices.iter().position(|d| d.name == name) {
            Some(index) => {
                self.active = Some(index);
                Ok(())
            }
            None => Err(Error::UnknownDevice(name.to_string())),
        }
    }

    /// Restrict port lookups to the address bits the processor decodes.
    ///
    /// Port files list addresses in the advanced mode address space; a
    /// normal mode program reaches the same registers through 16 bits.
    pub fn set_address_mask(&mut self, mask: Address) {
        self.address_mask = mask;
    }

    /// Find the port at an address, in the active device or the shared
    /// ports.
    pub fn find_port(&self, address: Address) -> Option<&Port> {
        let mask = self.address_mask;
        let matches = |p: &&Port| p.address & mask == address & mask;

        self.active_device()
            .and_then(|d| d.ports.iter().find(matches))
            .or_else(|| self.common.ports.iter().find(matches))
    }

    pub fn find_sym(&self, address: Address) -> Option<&str> {
        self.find_port(address).map(|p| p.name())
    }

    /// Vector entries of the active device and the shared section.
    pub fn entries(&self) -> impl Iterator<Item = &Port> {
        self.common
            .entries
            .iter()
            .chain(self.active_device().into_iter().flat_map(|d| d.entries.iter()))
    }
}
