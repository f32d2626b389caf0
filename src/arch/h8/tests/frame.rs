use super::rom;
use crate::analysis::{Reference, ReferenceKind};
use crate::arch::h8::{
    build_frame, get_frame_retsize, Encoding, FrameEntry, FrameFailure, Operand, Register,
    SlotRole, PROLOGUE_BUDGET,
};
use crate::arch::Mode;

const PROLOGUE: [u8; 14] = [
    0x01, 0x00, 0x6D, 0xF6, // push.l er6
    0x0F, 0xF6, // mov.l sp,er6
    0x7A, 0x37, 0x00, 0x00, 0x00, 0x10, // sub.l #16,sp
    0x54, 0x70, // rts
];

#[test]
fn h8_frame_push_sub() {
    let db = rom(0x1000, &PROLOGUE);
    let frame = build_frame(0x1000, &db, Mode::H8300A).unwrap();

    assert_eq!(frame.entry(), 0x1000);
    assert_eq!(frame.retsize(), 4);
    assert_eq!(
        frame.entries(),
        &[
            FrameEntry {
                offset: 0,
                size: 4,
                role: SlotRole::ReturnAddress
            },
            FrameEntry {
                offset: -4,
                size: 4,
                role: SlotRole::SavedRegister
            },
            FrameEntry {
                offset: -20,
                size: 16,
                role: SlotRole::Local
            },
        ][..]
    );
    assert_eq!(frame.frame_pointer(), Some(Register::ER6));
    assert_eq!(frame.frame_pointer_offset(), Some(-4));
    assert_eq!(frame.sp_offset(), -20);
    assert_eq!(frame.frame_size(), 20);
    assert_eq!(frame.prologue_end(), 0x100C);
}

#[test]
fn h8_frame_classify() {
    let db = rom(0x1000, &PROLOGUE);
    let frame = build_frame(0x1000, &db, Mode::H8300A).unwrap();

    assert_eq!(frame.classify(0), SlotRole::ReturnAddress);
    assert_eq!(frame.classify(3), SlotRole::ReturnAddress);
    assert_eq!(frame.classify(4), SlotRole::IncomingArgument);
    assert_eq!(frame.classify(-2), SlotRole::SavedRegister);
    assert_eq!(frame.classify(-8), SlotRole::Local);

    let fp_local = Operand::Displacement {
        base: Register::ER6,
        disp: -8,
        encoding: Encoding::E16,
    };
    let sp_arg = Operand::Displacement {
        base: Register::ER7,
        disp: 24,
        encoding: Encoding::E16,
    };

    assert_eq!(frame.slot_offset(&fp_local, 0), Some(-12));
    assert_eq!(frame.slot_offset(&sp_arg, -20), Some(4));
    assert_eq!(frame.classify(4), SlotRole::IncomingArgument);
    assert_eq!(frame.slot_offset(&Operand::Register(Register::ER6), 0), None);
}

#[test]
fn h8_frame_normal_mode() {
    assert_eq!(get_frame_retsize(Mode::H8300), 2);
    assert_eq!(get_frame_retsize(Mode::H8S), 2);
    assert_eq!(get_frame_retsize(Mode::H8SA), 4);

    let data = [
        0x6D, 0xF6, // push.w r6
        0x79, 0x37, 0x00, 0x08, // sub.w #8,r7
        0x54, 0x70, // rts
    ];
    let db = rom(0x100, &data);
    let frame = build_frame(0x100, &db, Mode::H8300).unwrap();

    assert_eq!(frame.retsize(), 2);
    assert_eq!(frame.entries()[0].size, 2);
    assert_eq!(frame.sp_offset(), -10);
    assert_eq!(frame.frame_pointer(), None);
    assert_eq!(frame.prologue_end(), 0x106);
}

#[test]
fn h8_frame_stm() {
    let data = [
        0x01, 0x10, 0x6D, 0xF4, // stm.l (er4-er5),@-sp
        0x1B, 0x97, // subs #4,sp
        0x54, 0x70, // rts
    ];
    let db = rom(0x1000, &data);
    let frame = build_frame(0x1000, &db, Mode::H8SA).unwrap();

    assert_eq!(frame.entries().len(), 3);
    assert_eq!(
        frame.entries()[1],
        FrameEntry {
            offset: -8,
            size: 8,
            role: SlotRole::SavedRegister
        }
    );
    assert_eq!(
        frame.entries()[2],
        FrameEntry {
            offset: -12,
            size: 4,
            role: SlotRole::Local
        }
    );
}

#[test]
fn h8_frame_stops_at_join() {
    let mut db = rom(0x1000, &PROLOGUE);

    db.insert_crossreference(Reference::new_static_ref(0x2000, 0x1004, ReferenceKind::Code));

    let frame = build_frame(0x1000, &db, Mode::H8300A).unwrap();

    assert_eq!(frame.entries().len(), 2);
    assert_eq!(frame.prologue_end(), 0x1004);
    assert_eq!(frame.frame_pointer(), None);
}

#[test]
fn h8_frame_failures() {
    let db = rom(0x1000, &[0x54, 0x70]);

    assert_eq!(
        build_frame(0x1000, &db, Mode::H8300A),
        Err(FrameFailure::NoRecognizedPrologue)
    );

    let db = rom(0x1000, &[0x01, 0x23]);

    assert_eq!(
        build_frame(0x1000, &db, Mode::H8300A),
        Err(FrameFailure::NoRecognizedPrologue)
    );

    let pushes: Vec<u8> = [0x6D, 0xF0].iter().copied().cycle().take(80).collect();
    let db = rom(0x1000, &pushes);

    assert_eq!(
        build_frame(0x1000, &db, Mode::H8300A),
        Err(FrameFailure::BudgetExceeded)
    );
}

/// `count` word pushes followed by `rts`.
fn pushes_then_return(count: usize) -> Vec<u8> {
    let mut image: Vec<u8> = [0x6D, 0xF0].iter().copied().cycle().take(count * 2).collect();

    image.extend_from_slice(&[0x54, 0x70]);

    image
}

#[test]
fn h8_frame_budget_edge() {
    let db = rom(0x1000, &pushes_then_return(PROLOGUE_BUDGET));
    let frame = build_frame(0x1000, &db, Mode::H8300A).unwrap();

    assert_eq!(frame.sp_offset(), -64);
    assert_eq!(frame.entries().len(), PROLOGUE_BUDGET + 1);
    assert_eq!(frame.prologue_end(), 0x1040);

    let db = rom(0x1000, &pushes_then_return(PROLOGUE_BUDGET + 1));

    assert_eq!(
        build_frame(0x1000, &db, Mode::H8300A),
        Err(FrameFailure::BudgetExceeded)
    );
}
