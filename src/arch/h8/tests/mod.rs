//! H8 test suite

use crate::arch::h8::{decode, Address, Instruction};
use crate::arch::Mode;
use crate::database::Database;
use crate::memory::{Memory, Segment};

mod frame;
mod props;
mod render;
mod switch;

/// A database holding a single ROM segment.
fn rom(start: Address, data: &[u8]) -> Database {
    let mut memory = Memory::new();

    memory.install_segment(Segment::new("ROM", start, data.to_vec()));

    Database::new(memory)
}

/// Decode an instruction at 0x1000.
fn insn(data: &[u8], mode: Mode) -> Instruction {
    decode(data, 0x1000, mode).unwrap()
}

/// Mark every instruction between `start` and `end` as a head, the way a
/// scan would.
fn mark_heads(db: &mut Database, start: Address, end: Address, mode: Mode) {
    use crate::analysis::DatabaseView;

    let mut pc = start;

    while pc < end {
        let insn = db.decode_at(pc, mode).unwrap();

        assert!(db.insert_head(pc, insn.len()));
        pc = insn.next_address();
    }
}
