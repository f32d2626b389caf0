use super::{mark_heads, rom};
use crate::analysis::{disassemble_range, scan, DatabaseView};
use crate::arch::h8::{emulate, find_switch, RenderContext, SwitchTable, MAX_SWITCH_CASES};
use crate::arch::Mode;
use crate::asm::gas::Gas;
use crate::asm::Assembler;

/// A four way `switch` on `r0l` through a table of long pointers.
fn long_table() -> Vec<u8> {
    let mut image = vec![
        0xA8, 0x03, // cmp.b #3,r0l
        0x42, 0x10, // bhi 0x1014
        0x17, 0x50, // extu.w r0
        0x17, 0x70, // extu.l er0
        0x10, 0x30, // shll.l er0
        0x10, 0x30, // shll.l er0
        0x01, 0x00, 0x6F, 0x00, 0x10, 0x20, // mov.l @(0x1020:16,er0),er0
        0x59, 0x00, // jmp @er0
        0x54, 0x70, // rts
    ];

    image.resize(0x20, 0);
    image.extend_from_slice(&[
        0x00, 0x00, 0x10, 0x30, 0x00, 0x00, 0x10, 0x32, 0x00, 0x00, 0x10, 0x34, 0x00, 0x00, 0x10,
        0x36,
    ]);
    image.extend_from_slice(&[0x54, 0x70, 0x54, 0x70, 0x54, 0x70, 0x54, 0x70]);

    image
}

/// A two way `switch` on `r0` through a table of word pointers.
fn word_table(cmp_register: u8) -> Vec<u8> {
    let mut image = vec![
        0x79,
        0x20 | cmp_register,
        0x00,
        0x02, // cmp.w #2,rN
        0x44, 0x08, // bcc 0x10E
        0x09, 0x00, // add.w r0,r0
        0x6F, 0x00, 0x01, 0x20, // mov.w @(0x120:16,er0),r0
        0x59, 0x00, // jmp @er0
        0x54, 0x70, // rts
    ];

    image.resize(0x20, 0);
    image.extend_from_slice(&[0x01, 0x30, 0x01, 0x32]);
    image.resize(0x30, 0);
    image.extend_from_slice(&[0x54, 0x70, 0x54, 0x70]);

    image
}

#[test]
fn h8_switch_long() {
    let mode = Mode::H8SA;
    let mut db = rom(0x1000, &long_table());

    mark_heads(&mut db, 0x1000, 0x1014, mode);

    let jump = db.decode_at(0x1012, mode).unwrap();

    assert_eq!(
        find_switch(&jump, &db, mode),
        Some(SwitchTable {
            jump: 0x1012,
            table: 0x1020,
            element_size: 4,
            count: 4,
            default: 0x1014,
            targets: vec![0x1030, 0x1032, 0x1034, 0x1036],
        })
    );
    assert!(emulate(&jump, &db, mode).switch.is_some());
}

#[test]
fn h8_switch_word() {
    let mode = Mode::H8300;
    let mut db = rom(0x100, &word_table(0));

    mark_heads(&mut db, 0x100, 0x10E, mode);

    let jump = db.decode_at(0x10C, mode).unwrap();
    let switch = find_switch(&jump, &db, mode).unwrap();

    assert_eq!(switch.table, 0x120);
    assert_eq!(switch.element_size, 2);
    assert_eq!(switch.count, 2);
    assert_eq!(switch.default, 0x10E);
    assert_eq!(switch.targets, vec![0x130, 0x132]);
}

#[test]
fn h8_switch_rejects() {
    let mode = Mode::H8300;

    let mut db = rom(0x100, &word_table(1));

    mark_heads(&mut db, 0x100, 0x10E, mode);

    let jump = db.decode_at(0x10C, mode).unwrap();

    assert_eq!(find_switch(&jump, &db, mode), None);

    let db = rom(0x100, &word_table(0));
    let jump = db.decode_at(0x10C, mode).unwrap();

    assert_eq!(find_switch(&jump, &db, mode), None);
    assert!(emulate(&jump, &db, mode).switch.is_none());

    let rts = db.decode_at(0x10E, mode).unwrap();

    assert_eq!(find_switch(&rts, &db, mode), None);
}

#[test]
fn h8_switch_scan() {
    let mode = Mode::H8SA;
    let mut db = rom(0x1000, &long_table());
    let report = scan(&mut db, &[0x1000], mode);

    assert_eq!(report.instructions, 13);
    assert_eq!(report.switches, 1);
    assert_eq!(report.functions, vec![0x1000]);
    assert!(report.failures.is_empty());

    for target in &[0x1030, 0x1032, 0x1034, 0x1036] {
        assert_eq!(db.head(*target), Some(2));
    }

    let section = disassemble_range(&db, 0x1000, 0x1038, &RenderContext::new(mode));
    let mut out = Vec::new();

    Gas.emit_section(&mut out, &section).unwrap();

    let expected = "    .org 0x1000
sub_1000:
    cmp.b #3,r0l
    bhi loc_1014
    extu.w r0
    extu.l er0
    shll.l er0
    shll.l er0
    mov.l @(0x1020:16,er0),er0
    jmp @er0
loc_1014:
    rts
    .byte 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00
dat_1020:
    .long loc_1030
    .long loc_1032
    .long loc_1034
    .long loc_1036
loc_1030:
    rts
loc_1032:
    rts
loc_1034:
    rts
loc_1036:
    rts
";

    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

/// `word_table` with its `cmp.w` bound replaced and room for `bound` entries.
fn wide_table(bound: u16) -> Vec<u8> {
    let mut image = word_table(0);

    image[2..4].copy_from_slice(&bound.to_be_bytes());
    image.resize(0x20 + 2 * bound as usize, 0x01);

    image
}

#[test]
fn h8_switch_case_limit() {
    let mode = Mode::H8300;

    let mut db = rom(0x100, &wide_table(MAX_SWITCH_CASES as u16));

    mark_heads(&mut db, 0x100, 0x10E, mode);

    let jump = db.decode_at(0x10C, mode).unwrap();
    let switch = find_switch(&jump, &db, mode).unwrap();

    assert_eq!(switch.count, MAX_SWITCH_CASES);
    assert_eq!(switch.targets.len(), 256);

    let mut db = rom(0x100, &wide_table(MAX_SWITCH_CASES as u16 + 1));

    mark_heads(&mut db, 0x100, 0x10E, mode);

    let jump = db.decode_at(0x10C, mode).unwrap();

    assert_eq!(find_switch(&jump, &db, mode), None);
}
