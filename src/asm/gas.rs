//! Assembler support for GNU as.

use crate::arch::h8::Address;
use crate::asm::traits::{is_text, Assembler};
use crate::ast::{Label, Operand};
use std::io::{Result, Write};

#[derive(Copy, Clone, Debug, Default)]
pub struct Gas;

impl Gas {
    fn emit_list(&self, stream: &mut dyn Write, directive: &str, items: &[String]) -> Result<()> {
        writeln!(stream, "    {} {}", directive, items.join(", "))
    }
}

impl Assembler for Gas {
    fn format_hex(&self, value: u32) -> String {
        if value < 10 {
            format!("{}", value)
        } else {
            format!("0x{:X}", value)
        }
    }

    fn emit_org(&self, stream: &mut dyn Write, _section_name: &str, where_to: Address) -> Result<()> {
        writeln!(stream, "    .org {}", self.format_hex(where_to))
    }

    fn emit_space(&self, stream: &mut dyn Write, space: u32) -> Result<()> {
        writeln!(stream, "    .space {}", space)
    }

    fn emit_data(&self, stream: &mut dyn Write, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        if is_text(data) {
            let text: String = data.iter().map(|b| *b as char).collect();

            return writeln!(stream, "    .ascii {}", self.format_string(&text));
        }

        let bytes: Vec<String> = data.iter().map(|b| format!("0x{:02X}", b)).collect();

        self.emit_list(stream, ".byte", &bytes)
    }

    fn emit_pointers(&self, stream: &mut dyn Write, targets: &[Operand], size: u32) -> Result<()> {
        let directive = if size == 2 { ".word" } else { ".long" };

        for target in targets {
            write!(stream, "    {} ", directive)?;
            self.emit_operand(stream, target)?;
            writeln!(stream)?;
        }

        Ok(())
    }

    fn emit_equ(&self, stream: &mut dyn Write, name: &str, value: u32) -> Result<()> {
        writeln!(stream, "{} = {}", name, self.format_hex(value))
    }

    fn emit_align(&self, stream: &mut dyn Write, to: u32) -> Result<()> {
        writeln!(stream, "    .align {}", to)
    }

    fn emit_global(&self, stream: &mut dyn Write, label: &Label) -> Result<()> {
        writeln!(stream, "    .globl {}", label.name())
    }

    fn emit_extern(&self, stream: &mut dyn Write, label: &Label) -> Result<()> {
        writeln!(stream, "    .extern {}", label.name())
    }

    fn emit_comm(&self, stream: &mut dyn Write, label: &Label, size: u32) -> Result<()> {
        writeln!(stream, "    .comm {}, {}", label.name(), size)
    }
}
