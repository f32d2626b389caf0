use crate::asm::gas::Gas;
use crate::asm::hew::Hew;
use crate::asm::traits::is_text;
use crate::asm::{Assembler, AssemblerName};
use crate::ast::{Directive, Label, Operand, Section};
use std::io::Result;

fn emit<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> Result<()>,
{
    let mut out = Vec::new();

    f(&mut out).unwrap();

    String::from_utf8(out).unwrap()
}

#[test]
fn asm_names() {
    assert_eq!("gas".parse(), Ok(AssemblerName::Gas));
    assert_eq!("GNU".parse(), Ok(AssemblerName::Gas));
    assert_eq!("hew".parse(), Ok(AssemblerName::Hew));
    assert_eq!("Renesas".parse(), Ok(AssemblerName::Hew));
    assert_eq!("armips".parse::<AssemblerName>(), Err(()));
    assert_eq!(AssemblerName::iter().into_iter().count(), 2);
    assert_eq!(AssemblerName::Hew.assembler().format_hex(0x10), "H'10");
}

#[test]
fn asm_is_text() {
    assert!(is_text(b"ROM v1.0"));
    assert!(!is_text(b"abc"));
    assert!(!is_text(b"abc\0"));
    assert!(!is_text(&[0x80, 0x41, 0x42, 0x43]));
}

#[test]
fn asm_numbers() {
    assert_eq!(Gas.format_hex(9), "9");
    assert_eq!(Gas.format_hex(10), "0xA");
    assert_eq!(Gas.format_hex(0xFFFF78), "0xFFFF78");
    assert_eq!(Hew.format_hex(4), "4");
    assert_eq!(Hew.format_hex(0x1234), "H'1234");
    assert_eq!(Gas.format_string("a\"b"), "\"a\\\"b\"");
}

#[test]
fn gas_directives() {
    assert_eq!(emit(|s| Gas.emit_org(s, "ROM", 0x1000)), "    .org 0x1000\n");
    assert_eq!(emit(|s| Gas.emit_space(s, 16)), "    .space 16\n");
    assert_eq!(
        emit(|s| Gas.emit_data(s, &[0x00, 0x12, 0xFF])),
        "    .byte 0x00, 0x12, 0xFF\n"
    );
    assert_eq!(emit(|s| Gas.emit_data(s, b"BOOT")), "    .ascii \"BOOT\"\n");
    assert_eq!(emit(|s| Gas.emit_data(s, &[])), "");
    assert_eq!(emit(|s| Gas.emit_equ(s, "SMR0", 0xFFFF78)), "SMR0 = 0xFFFF78\n");
    assert_eq!(emit(|s| Gas.emit_align(s, 2)), "    .align 2\n");
    assert_eq!(
        emit(|s| Gas.emit_global(s, &Label::new("main"))),
        "    .globl main\n"
    );
    assert_eq!(
        emit(|s| Gas.emit_extern(s, &Label::new("puts"))),
        "    .extern puts\n"
    );
    assert_eq!(
        emit(|s| Gas.emit_comm(s, &Label::new("buf"), 32)),
        "    .comm buf, 32\n"
    );
    assert_eq!(emit(|s| Gas.emit_comment(s, "vectors")), "; vectors\n");
}

#[test]
fn hew_directives() {
    assert_eq!(emit(|s| Hew.emit_org(s, "ROM", 0x1000)), "    .ORG H'1000\n");
    assert_eq!(emit(|s| Hew.emit_space(s, 16)), "    .RES.B 16\n");
    assert_eq!(
        emit(|s| Hew.emit_data(s, &[0x00, 0x12, 0xFF])),
        "    .DATA.B H'00,H'12,H'FF\n"
    );
    assert_eq!(emit(|s| Hew.emit_data(s, b"BOOT")), "    .SDATA \"BOOT\"\n");
    assert_eq!(emit(|s| Hew.emit_equ(s, "SMR0", 0xFFFF78)), "SMR0: .EQU H'FFFF78\n");
    assert_eq!(
        emit(|s| Hew.emit_global(s, &Label::new("main"))),
        "    .EXPORT main\n"
    );
    assert_eq!(
        emit(|s| Hew.emit_extern(s, &Label::new("puts"))),
        "    .IMPORT puts\n"
    );
    assert_eq!(
        emit(|s| Hew.emit_comm(s, &Label::new("buf"), 32)),
        "buf:\n    .RES.B 32\n"
    );
}

#[test]
fn asm_pointers() {
    let targets = vec![Operand::clbl(Label::new("loc_1030")), Operand::cptr(0x1032)];

    assert_eq!(
        emit(|s| Gas.emit_pointers(s, &targets, 4)),
        "    .long loc_1030\n    .long 0x1032\n"
    );
    assert_eq!(
        emit(|s| Gas.emit_pointers(s, &targets, 2)),
        "    .word loc_1030\n    .word 0x1032\n"
    );
    assert_eq!(
        emit(|s| Hew.emit_pointers(s, &targets, 4)),
        "    .DATA.L loc_1030\n    .DATA.L H'1032\n"
    );
}

#[test]
fn asm_operands() {
    let displacement = Operand::wrap(
        "@(",
        vec![Operand::suff(Operand::sint(-16), ":16"), Operand::sym("sp")],
        ")",
    );

    assert_eq!(
        emit(|s| Gas.emit_operand(s, &displacement)),
        "@(-0x10:16,sp)"
    );
    assert_eq!(
        emit(|s| Gas.emit_operand(s, &Operand::pref("#", Operand::int(3u32)))),
        "#3"
    );
    assert_eq!(
        emit(|s| Hew.emit_operand(s, &Operand::pref("@", Operand::dptr(0xFF10)))),
        "@H'FF10"
    );
}

#[test]
fn asm_section() {
    let mut section = Section::new("ROM");

    section.append_directive(Directive::DeclareOrg(0x100), 0x100);
    section.append_directive(Directive::DeclareLabel(Label::new("start")), 0x100);
    section.append_directive(Directive::EmitData(vec![0x01, 0x02]), 0x100);
    section.append_directive(Directive::EmitSpace(4), 0x102);

    assert_eq!(
        emit(|s| Gas.emit_section(s, &section)),
        "    .org 0x100\nstart:\n    .byte 0x01, 0x02\n    .space 4\n"
    );
}
