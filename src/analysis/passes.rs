//! Analysis passes which populate the database and turn it back into
//! assembly.

use crate::analysis::{DatabaseView, Error, ReferenceKind};
use crate::arch::h8::{self, Address, RenderContext};
use crate::arch::Mode;
use crate::ast;
use crate::database::Database;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// How many bytes a single data directive holds before another is started.
const DATA_RUN: usize = 16;

/// What a scan found.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Number of instructions newly marked.
    pub instructions: usize,

    /// Entry points of every function reached.
    pub functions: Vec<Address>,

    /// Number of jump tables recognized.
    pub switches: usize,

    /// Locations control flow reached that could not be decoded.
    pub failures: Vec<(Address, Error)>,
}

/// Recursively trace code from a set of function entry points.
///
/// Every decoded instruction is marked as a head in the database and its
/// references are recorded. Direct jump and branch targets, fallthroughs and
/// recognized jump table targets are followed; call targets are followed and
/// marked as functions. Once flow is exhausted, each function gets a frame
/// and every referenced location gets a generated label.
pub fn scan(db: &mut Database, entries: &[Address], mode: Mode) -> ScanReport {
    let mut report = ScanReport::default();
    let mut pending: Vec<Address> = Vec::new();
    let mut visited = HashSet::new();
    let mut targets = Vec::new();

    for entry in entries.iter().rev() {
        db.insert_function(*entry);
        pending.push(*entry);
    }

    while let Some(pc) = pending.pop() {
        if !visited.insert(pc) || db.head(pc).is_some() {
            continue;
        }

        let insn = match db.decode_at(pc, mode) {
            Ok(insn) => insn,
            Err(e) => {
                debug!(pc, error = %e, "flow reached undecodable bytes");
                report.failures.push((pc, e));
                continue;
            }
        };

        if !db.insert_head(pc, insn.len()) {
            warn!(pc, "instruction overlaps one already decoded");
            continue;
        }

        report.instructions += 1;

        let effects = h8::emulate(&insn, &*db, mode);

        if let Some(switch) = &effects.switch {
            report.switches += 1;
            db.insert_switch(switch.clone());
        }

        let fallthrough = Some(insn.next_address()).filter(|_| effects.flow().falls_through());

        for xref in effects.references(pc) {
            if let Some(to) = xref.as_target() {
                match xref.kind() {
                    ReferenceKind::Subroutine => {
                        db.insert_function(to);
                        pending.push(to);
                    }
                    ReferenceKind::Code => pending.push(to),
                    _ => {}
                }

                targets.push((to, xref.kind()));
            }

            db.insert_crossreference(xref);
        }

        if let Some(next) = fallthrough {
            pending.push(next);
        }
    }

    report.functions = db.iter_functions().collect();

    for entry in report.functions.iter() {
        db.insert_placeholder_label(*entry, ReferenceKind::Subroutine);

        match h8::build_frame(*entry, &*db, mode) {
            Ok(frame) => db.insert_frame(frame),
            Err(why) => debug!(entry, "no frame: {}", why),
        }
    }

    for (to, kind) in targets {
        if db.is_mapped(to) {
            db.insert_placeholder_label(to, kind);
        }
    }

    info!(
        instructions = report.instructions,
        functions = report.functions.len(),
        "scan complete"
    );

    report
}

/// Start of the next segment after `pc`, or `end`.
fn next_mapped(db: &Database, pc: Address, end: Address) -> Address {
    db.memory()
        .iter_segments()
        .map(|s| s.start())
        .filter(|s| *s > pc)
        .min()
        .map_or(end, |s| s.min(end))
}

fn flush_data(section: &mut ast::Section, data: &mut Vec<u8>, data_start: Address) {
    if !data.is_empty() {
        section.append_directive(ast::Directive::EmitData(data.split_off(0)), data_start);
    }
}

/// Produce an assembly listing for `start..end`.
///
/// Known instructions are rendered with every pointer that has a label
/// replaced by it. Recognized jump tables become pointer tables, other bytes
/// no instruction covers become data directives and unmapped ranges become
/// reserved space.
pub fn disassemble_range(
    db: &Database,
    start: Address,
    end: Address,
    ctx: &RenderContext,
) -> ast::Section {
    let mut section = ast::Section::new(&format!("seg_{:X}", start));
    let mut data = Vec::new();
    let mut data_start = start;
    let mut pc = start;

    section.append_directive(ast::Directive::DeclareOrg(start), start);

    while pc < end {
        if let Some(label) = db.pointer_symbol(pc) {
            flush_data(&mut section, &mut data, data_start);

            if let Some(frame) = db.frame(pc) {
                section.append_directive(
                    ast::Directive::DeclareComment(format!(
                        "frame: {} bytes, {} saved",
                        frame.frame_size(),
                        frame
                            .entries()
                            .iter()
                            .filter(|e| e.role == h8::SlotRole::SavedRegister)
                            .count()
                    )),
                    pc,
                );
            }

            section.append_directive(ast::Directive::DeclareLabel(label.clone()), pc);
        }

        if !db.is_mapped(pc) {
            flush_data(&mut section, &mut data, data_start);

            let resume = next_mapped(db, pc, end);

            section.append_directive(ast::Directive::EmitSpace(resume - pc), pc);
            pc = resume;
            continue;
        }

        if let Some(switch) = db.switch_table(pc).filter(|_| db.head(pc).is_none()) {
            flush_data(&mut section, &mut data, data_start);

            let targets = switch
                .targets
                .iter()
                .map(|t| match db.pointer_symbol(*t) {
                    Some(label) => ast::Operand::clbl(label.clone()),
                    None => ast::Operand::cptr(*t),
                })
                .collect();

            section.append_directive(
                ast::Directive::EmitPointers(targets, switch.element_size),
                pc,
            );
            pc = pc.saturating_add(switch.count * switch.element_size);
            continue;
        }

        let insn = db.head(pc).and_then(|_| db.decode_at(pc, ctx.mode).ok());

        if let Some(insn) = insn {
            flush_data(&mut section, &mut data, data_start);

            let rendered = h8::render(&insn, ctx);
            let instr = rendered
                .instr
                .replace_pointers(|ptr, _| db.pointer_symbol(ptr).cloned());

            section.append_directive(
                ast::Directive::EmitInstr(instr, rendered.consumed_length),
                pc,
            );
            pc = pc.saturating_add(rendered.consumed_length);
            continue;
        }

        if data.is_empty() {
            data_start = pc;
        }

        data.extend(db.read_bytes(pc, 1));
        pc += 1;

        if data.len() >= DATA_RUN {
            flush_data(&mut section, &mut data, data_start);
        }
    }

    flush_data(&mut section, &mut data, data_start);

    section
}
