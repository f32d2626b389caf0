use super::rom;
use crate::analysis::scan;
use crate::arch::h8::{
    decode, is_return_sequence, render, sp_delta, RenderContext, StackTracker,
    MAX_INSTRUCTION_LENGTH,
};
use crate::arch::Mode;
use proptest::prelude::*;

fn any_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::H8300),
        Just(Mode::H8300A),
        Just(Mode::H8S),
        Just(Mode::H8SA),
    ]
}

/// Instructions that move the stack pointer and always fall through.
const STACK_OPS: [&[u8]; 8] = [
    &[0x01, 0x00, 0x6D, 0xF6], // push.l er6
    &[0x01, 0x00, 0x6D, 0x76], // pop.l er6
    &[0x6D, 0xF0], // push.w r0
    &[0x1B, 0x97], // subs #4,sp
    &[0x0B, 0x87], // adds #2,sp
    &[0x7A, 0x37, 0x00, 0x00, 0x00, 0x20], // sub.l #32,sp
    &[0x0F, 0xF6], // mov.l sp,er6
    &[0x00, 0x00], // nop
];

proptest! {
    #[test]
    fn decode_is_deterministic(
        bytes in prop::collection::vec(any::<u8>(), 0..12),
        address in 0u32..0x0100_0000,
        mode in any_mode(),
    ) {
        let first = format!("{:?}", decode(&bytes, address, mode));
        let second = format!("{:?}", decode(&bytes, address, mode));

        prop_assert_eq!(first, second);
    }

    #[test]
    fn decode_length_is_bounded(
        bytes in prop::collection::vec(any::<u8>(), 0..12),
        mode in any_mode(),
    ) {
        if let Ok(insn) = decode(&bytes, 0x1000, mode) {
            prop_assert!(insn.len() >= 2);
            prop_assert!(insn.len() as usize <= bytes.len());
            prop_assert!(insn.len() as usize <= MAX_INSTRUCTION_LENGTH);
            prop_assert_eq!(insn.len() % 2, 0);
        }
    }

    #[test]
    fn render_covers_decoded_length(
        bytes in prop::collection::vec(any::<u8>(), 2..12),
        mode in any_mode(),
    ) {
        if let Ok(insn) = decode(&bytes, 0x1000, mode) {
            let rendered = render(&insn, &RenderContext::new(mode));

            prop_assert_eq!(rendered.consumed_length, insn.len());
            prop_assert_eq!(rendered.instr.operand_count(), insn.operands().len());
        }
    }

    #[test]
    fn return_sequences_agree_with_decode(
        bytes in prop::collection::vec(any::<u8>(), 2..12),
        mode in any_mode(),
    ) {
        let decodes_to_return = decode(&bytes, 0x1000, mode)
            .map_or(false, |insn| insn.is_return());

        prop_assert_eq!(is_return_sequence(&bytes), decodes_to_return);
    }

    #[test]
    fn scanned_heads_never_overlap(
        bytes in prop::collection::vec(any::<u8>(), 2..96),
        mode in any_mode(),
    ) {
        let mut db = rom(0x1000, &bytes);

        scan(&mut db, &[0x1000], mode);

        let heads: Vec<_> = db.iter_heads().collect();

        for pair in heads.windows(2) {
            prop_assert!(pair[0].0 + pair[0].1 <= pair[1].0);
        }
    }

    #[test]
    fn sp_offsets_compose(
        ops in prop::collection::vec(0..STACK_OPS.len(), 1..24),
        split in any::<prop::sample::Index>(),
        mode in any_mode(),
    ) {
        let mut image = Vec::new();
        let mut starts = Vec::new();
        let mut total = 0i32;

        for op in &ops {
            starts.push(0x1000 + image.len() as u32);
            image.extend_from_slice(STACK_OPS[*op]);
        }

        let end = 0x1000 + image.len() as u32;

        image.extend_from_slice(&[0x54, 0x70]);

        let db = rom(0x1000, &image);

        for start in &starts {
            let insn = decode(&image[(*start - 0x1000) as usize..], *start, mode).unwrap();

            total = total.wrapping_add(sp_delta(&insn).unwrap_or(0));
        }

        let mid = starts[split.index(starts.len())];
        let tracker = StackTracker::new(mode);
        let whole = tracker.sp_offset_at(&db, 0x1000, end);
        let head = tracker.sp_offset_at(&db, 0x1000, mid);
        let tail = tracker.sp_offset_at(&db, mid, end);

        prop_assert_eq!(whole, Some(total));
        prop_assert_eq!(head.zip(tail).map(|(h, t)| h.wrapping_add(t)), whole);
    }
}
