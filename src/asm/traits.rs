//! Assembler trait

use crate::arch::h8::Address;
use crate::ast::{Directive, Instruction, Label, Literal, Operand, Section};
use std::io::{Result, Write};

/// Trait which represents a particular assembler syntax.
///
/// Operand punctuation (`@`, `#`, parentheses, size suffixes) is fixed by the
/// processor and already present in the AST, so the wrapper methods have
/// default implementations. Syntaxes differ in how they spell numbers and
/// directives.
pub trait Assembler {
    /// Spell an unsigned number.
    fn format_hex(&self, value: u32) -> String;

    /// Spell a string constant.
    fn format_string(&self, value: &str) -> String {
        format!("\"{}\"", value.escape_default())
    }

    /// Emit a comment into the disassembly stream.
    fn emit_comment(&self, stream: &mut dyn Write, comment_data: &str) -> Result<()> {
        writeln!(stream, "; {}", comment_data)
    }

    /// Emit an org statement into the disassembly stream.
    fn emit_org(&self, stream: &mut dyn Write, section_name: &str, where_to: Address)
        -> Result<()>;

    /// Emit a label declaration into the disassembly stream.
    fn emit_label_decl(&self, stream: &mut dyn Write, label: &Label) -> Result<()> {
        writeln!(stream, "{}:", label.name())
    }

    /// Emit empty space declarations into the disassembly stream.
    fn emit_space(&self, stream: &mut dyn Write, space: u32) -> Result<()>;

    /// Emit constant byte data into the disassembly stream.
    fn emit_data(&self, stream: &mut dyn Write, data: &[u8]) -> Result<()>;

    /// Emit a table of pointers, `size` bytes each.
    fn emit_pointers(&self, stream: &mut dyn Write, targets: &[Operand], size: u32)
        -> Result<()>;

    /// Give a name to a constant.
    fn emit_equ(&self, stream: &mut dyn Write, name: &str, value: u32) -> Result<()>;

    /// Align the location counter to a multiple of `to` bytes.
    fn emit_align(&self, stream: &mut dyn Write, to: u32) -> Result<()>;

    /// Export a label.
    fn emit_global(&self, stream: &mut dyn Write, label: &Label) -> Result<()>;

    /// Import a label defined elsewhere.
    fn emit_extern(&self, stream: &mut dyn Write, label: &Label) -> Result<()>;

    /// Reserve a common block of `size` bytes.
    fn emit_comm(&self, stream: &mut dyn Write, label: &Label, size: u32) -> Result<()> {
        self.emit_label_decl(stream, label)?;
        self.emit_space(stream, size)
    }

    /// Emit any instruction whitespace necessary for the start of an
    /// instruction.
    fn emit_instr_start(&self, stream: &mut dyn Write, _instr: &Instruction) -> Result<()> {
        write!(stream, "    ")
    }

    /// Emit an instruction's opcode.
    fn emit_instr_opcode(&self, stream: &mut dyn Write, opcode: &str) -> Result<()> {
        write!(stream, "{}", opcode)
    }

    /// Emit any operand whitespace necessary for the start of an operand.
    fn emit_operand_start(
        &self,
        stream: &mut dyn Write,
        _instr: &Instruction,
        operand_index: usize,
    ) -> Result<()> {
        if operand_index == 0 {
            write!(stream, " ")
        } else {
            write!(stream, ",")
        }
    }

    /// Emit an architecturally-defined symbol.
    fn emit_symbol(&self, stream: &mut dyn Write, symbol: &str) -> Result<()> {
        write!(stream, "{}", symbol)
    }

    /// Emit a literal.
    fn emit_literal(&self, stream: &mut dyn Write, literal: &Literal) -> Result<()> {
        match literal {
            Literal::Integer(i) => write!(stream, "{}", self.format_hex(*i)),
            Literal::SignedInteger(i) if *i < 0 => {
                write!(stream, "-{}", self.format_hex(i.unsigned_abs()))
            }
            Literal::SignedInteger(i) => write!(stream, "{}", self.format_hex(*i as u32)),
            Literal::Pointer(p) => write!(stream, "{}", self.format_hex(*p)),
            Literal::String(s) => write!(stream, "{}", self.format_string(s)),
        }
    }

    /// Emit a label operand (not a label declaration).
    fn emit_label_operand(&self, stream: &mut dyn Write, label: &Label) -> Result<()> {
        write!(stream, "{}", label.name())
    }

    /// Emit the start of an operand that wraps other operands.
    ///
    /// This should not render the wrapped operands, merely any symbols that
    /// appear at the start of the operand.
    fn emit_operand_wrapper_start(&self, stream: &mut dyn Write, operand: &Operand) -> Result<()> {
        match operand {
            Operand::PrefixSymbol(s, _op) => write!(stream, "{}", s),
            Operand::WrapperSymbol(s1, _op, _s2) => write!(stream, "{}", s1),
            _ => Ok(()),
        }
    }

    /// Emit dividers that appear between operands wrapped by another.
    ///
    /// The index given is the index of the last operand rendered.
    fn emit_operand_wrapper_infix(
        &self,
        stream: &mut dyn Write,
        operand: &Operand,
        _index: usize,
    ) -> Result<()> {
        match operand {
            Operand::Infix(_, infix_sym, _) => write!(stream, "{}", infix_sym),
            Operand::WrapperSymbol(_s1, _op, _s2) => write!(stream, ","),
            _ => Ok(()),
        }
    }

    /// Emit the end of an operand that wraps other operands.
    fn emit_operand_wrapper_end(&self, stream: &mut dyn Write, operand: &Operand) -> Result<()> {
        match operand {
            Operand::SuffixSymbol(_op, s) => write!(stream, "{}", s),
            Operand::WrapperSymbol(_s1, _op, s2) => write!(stream, "{}", s2),
            _ => Ok(()),
        }
    }

    /// Emit any operand whitespace necessary for the end of an operand.
    fn emit_operand_end(
        &self,
        _stream: &mut dyn Write,
        _instr: &Instruction,
        _operand_index: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Emit an entire operand.
    fn emit_operand(&self, stream: &mut dyn Write, operand: &Operand) -> Result<()> {
        match operand {
            Operand::Symbol(symbol) => self.emit_symbol(stream, symbol)?,
            Operand::Literal(literal) => self.emit_literal(stream, literal)?,
            Operand::Label(label) => self.emit_label_operand(stream, label)?,
            Operand::DataReference(opr)
            | Operand::CodeReference(opr)
            | Operand::PrefixSymbol(_, opr)
            | Operand::SuffixSymbol(opr, _) => {
                self.emit_operand_wrapper_start(stream, operand)?;
                self.emit_operand(stream, opr)?;
                self.emit_operand_wrapper_end(stream, operand)?;
            }
            Operand::Infix(opr1, _infix, opr2) => {
                self.emit_operand_wrapper_start(stream, operand)?;
                self.emit_operand(stream, opr1)?;
                self.emit_operand_wrapper_infix(stream, operand, 0)?;
                self.emit_operand(stream, opr2)?;
                self.emit_operand_wrapper_end(stream, operand)?;
            }
            Operand::WrapperSymbol(_prefix, operands, _suffix) => {
                self.emit_operand_wrapper_start(stream, operand)?;

                for (i, inner_opr) in operands.iter().enumerate() {
                    self.emit_operand(stream, inner_opr)?;

                    if i + 1 < operands.len() {
                        self.emit_operand_wrapper_infix(stream, operand, i)?;
                    }
                }

                self.emit_operand_wrapper_end(stream, operand)?;
            }
        }

        Ok(())
    }

    /// Emit any instruction whitespace necessary for the end of an
    /// instruction.
    fn emit_instr_end(&self, stream: &mut dyn Write, _instr: &Instruction) -> Result<()> {
        writeln!(stream)
    }

    /// Emit an entire instruction.
    fn emit_instr(&self, stream: &mut dyn Write, instr: &Instruction) -> Result<()> {
        self.emit_instr_start(stream, instr)?;
        self.emit_instr_opcode(stream, instr.opcode())?;

        for (i, operand) in instr.iter_operands().enumerate() {
            self.emit_operand_start(stream, instr, i)?;
            self.emit_operand(stream, operand)?;
            self.emit_operand_end(stream, instr, i)?;
        }

        self.emit_instr_end(stream, instr)?;

        Ok(())
    }

    /// Emit an entire section.
    fn emit_section(&self, stream: &mut dyn Write, section: &Section) -> Result<()> {
        for (directive, _loc) in section.iter_directives() {
            match directive {
                Directive::DeclareComment(comment) => self.emit_comment(stream, comment)?,
                Directive::DeclareLabel(label) => self.emit_label_decl(stream, label)?,
                Directive::DeclareOrg(org) => self.emit_org(stream, section.section_name(), *org)?,
                Directive::EmitData(data) => self.emit_data(stream, data)?,
                Directive::EmitPointers(targets, size) => {
                    self.emit_pointers(stream, targets, *size)?
                }
                Directive::EmitInstr(instr, _size) => self.emit_instr(stream, instr)?,
                Directive::EmitSpace(space) => self.emit_space(stream, *space)?,
            }
        }

        Ok(())
    }
}

/// Printable runs at least this long are emitted as strings.
pub const MIN_STRING_RUN: usize = 4;

/// Determine if a data run reads as text.
pub fn is_text(data: &[u8]) -> bool {
    data.len() >= MIN_STRING_RUN && data.iter().all(|b| (0x20..0x7F).contains(b))
}
