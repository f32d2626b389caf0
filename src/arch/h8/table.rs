//! The H8/300H and H8S opcode table.
//!
//! Each entry is written as a bit pattern, most significant bit first. A
//! pattern is a whitespace separated list of tokens:
//!
//!  * `0xHH` - one fixed byte
//!  * `x16` - a letter followed by a count: that many bits of field `x`
//!  * anything else - one character per bit; `0` and `1` are fixed bits and
//!    letters are bits of the field with that name
//!
//! Fields are referenced by letter from the entry's operand list. The table
//! is compiled into a first-byte index the first time an instruction is
//! decoded.

use crate::arch::h8::{Mnemonic, Register, Width};
use crate::arch::Cpu;
use std::cmp::Reverse;

/// How to build one operand out of the fields of an encoded instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    /// A 4-bit byte register field.
    Reg8(char),

    /// A 4-bit word register field.
    Reg16(char),

    /// A 3-bit long register field.
    Reg32(char),

    /// A control register implied by the opcode.
    Control(Register),

    /// An immediate of the given width.
    Imm(char, Width),

    /// A constant implied by the opcode, e.g. `adds #4`.
    Const(u32),

    /// A 3-bit bit number.
    Bit(char),

    Ind(char),
    PostInc(char),
    PreDec(char),

    /// `@sp+`, implied by `ldm`.
    SpPostInc,

    /// `@-sp`, implied by `stm`.
    SpPreDec,

    /// `@(d:16,ERn)`: displacement field, then base register field.
    Disp16(char, char),

    /// `@(d:24,ERn)` stored in four bytes: displacement field, then base.
    DispLong(char, char),

    Abs8(char),
    Abs16(char),

    /// A three byte absolute address, as used by `jmp` and `jsr`.
    Abs24(char),

    /// A four byte absolute address with a reserved top byte.
    AbsLong(char),

    Rel8(char),
    Rel16(char),

    /// `@@aa:8`
    Vector(char),

    /// `ldm` register range: the field names the last register.
    LdmList(char, char),

    /// `stm` register range: the field names the first register.
    StmList(char, char),

    /// A branch condition that is folded into the mnemonic instead of being
    /// emitted as an operand.
    Cond(char),
}

/// One line of the opcode table.
#[derive(Debug)]
pub struct Entry {
    pub pattern: &'static str,
    pub mnemonic: Mnemonic,
    pub width: Option<Width>,
    pub operands: &'static [Field],
    pub cpu: Cpu,
}

/// Result of comparing an encoded instruction against a pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Match {
    /// At least one fixed bit disagrees.
    Mismatch,

    /// Every available byte agrees, but the pattern is longer than the input.
    Partial,

    /// The whole pattern is present and agrees.
    Full,
}

/// A pattern compiled into fixed bits and field bit positions.
#[derive(Clone, Debug)]
pub struct Pattern {
    value: Vec<u8>,
    mask: Vec<u8>,
    fields: Vec<(char, Vec<u16>)>,
}

impl Pattern {
    /// Compile a textual pattern.
    pub fn parse(text: &str) -> Result<Pattern, String> {
        let mut bits: Vec<char> = Vec::new();

        for token in text.split_whitespace() {
            if let Some(hex) = token.strip_prefix("0x") {
                let byte = u8::from_str_radix(hex, 16)
                    .map_err(|_| format!("bad fixed byte {}", token))?;

                for i in (0..8).rev() {
                    bits.push(if byte & (1 << i) != 0 { '1' } else { '0' });
                }
            } else if token.len() > 1
                && token.starts_with(|c: char| c.is_ascii_lowercase())
                && token[1..].chars().all(|c| c.is_ascii_digit())
            {
                let letter = token.chars().next().unwrap_or('?');
                let count: usize = token[1..]
                    .parse()
                    .map_err(|_| format!("bad field width {}", token))?;

                bits.extend(std::iter::repeat(letter).take(count));
            } else {
                for c in token.chars() {
                    if c == '0' || c == '1' || c.is_ascii_lowercase() {
                        bits.push(c);
                    } else {
                        return Err(format!("bad pattern character {:?}", c));
                    }
                }
            }
        }

        if bits.is_empty() || bits.len() % 8 != 0 {
            return Err(format!("pattern is {} bits long", bits.len()));
        }

        let mut value = vec![0; bits.len() / 8];
        let mut mask = vec![0; bits.len() / 8];
        let mut fields: Vec<(char, Vec<u16>)> = Vec::new();

        for (pos, bit) in bits.iter().enumerate() {
            let (byte, shift) = (pos / 8, 7 - (pos % 8));

            match bit {
                '0' => mask[byte] |= 1 << shift,
                '1' => {
                    mask[byte] |= 1 << shift;
                    value[byte] |= 1 << shift;
                }
                letter => match fields.iter_mut().find(|(l, _)| l == letter) {
                    Some((_, positions)) => positions.push(pos as u16),
                    None => fields.push((*letter, vec![pos as u16])),
                },
            }
        }

        Ok(Pattern {
            value,
            mask,
            fields,
        })
    }

    /// Length of an instruction matching this pattern, in bytes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// The number of fixed bits, which is how specific the pattern is.
    pub fn fixed_bits(&self) -> u32 {
        self.mask.iter().map(|m| m.count_ones()).sum()
    }

    /// True if the pattern's first byte can be `byte`.
    pub fn admits_first(&self, byte: u8) -> bool {
        byte & self.mask[0] == self.value[0]
    }

    pub fn matches(&self, bytes: &[u8]) -> Match {
        for (i, byte) in bytes.iter().take(self.len()).enumerate() {
            if byte & self.mask[i] != self.value[i] {
                return Match::Mismatch;
            }
        }

        if bytes.len() < self.len() {
            Match::Partial
        } else {
            Match::Full
        }
    }

    pub fn has_field(&self, letter: char) -> bool {
        self.fields.iter().any(|(l, _)| *l == letter)
    }

    /// Extract a field's value from a fully matching instruction.
    ///
    /// Field bits are gathered most significant first. Unknown fields read
    /// as zero.
    pub fn field(&self, letter: char, bytes: &[u8]) -> u32 {
        let mut out: u64 = 0;

        if let Some((_, positions)) = self.fields.iter().find(|(l, _)| *l == letter) {
            for pos in positions {
                let (byte, shift) = (*pos as usize / 8, 7 - (*pos as usize % 8));
                let bit = bytes.get(byte).map_or(0, |b| (b >> shift) & 1);

                out = (out << 1) | bit as u64;
            }
        }

        out as u32
    }
}

/// A table entry along with its compiled pattern.
#[derive(Debug)]
pub struct Opcode {
    pub entry: &'static Entry,
    pub pattern: Pattern,
}

struct OpcodeIndex {
    opcodes: Vec<Opcode>,
    buckets: Vec<Vec<usize>>,
}

impl OpcodeIndex {
    fn build() -> Self {
        let opcodes: Vec<Opcode> = ENTRIES
            .iter()
            .map(|entry| Opcode {
                entry,
                pattern: Pattern::parse(entry.pattern).unwrap_or_else(|e| {
                    panic!("malformed opcode pattern {:?}: {}", entry.pattern, e)
                }),
            })
            .collect();

        let mut buckets = Vec::with_capacity(256);

        for first in 0..=255u8 {
            let mut bucket: Vec<usize> = (0..opcodes.len())
                .filter(|i| opcodes[*i].pattern.admits_first(first))
                .collect();

            bucket.sort_by_key(|i| {
                let pattern = &opcodes[*i].pattern;

                (Reverse(pattern.fixed_bits()), Reverse(pattern.len()))
            });

            buckets.push(bucket);
        }

        OpcodeIndex { opcodes, buckets }
    }
}

lazy_static! {
    static ref INDEX: OpcodeIndex = OpcodeIndex::build();
}

/// All opcodes whose first byte can be `first`, most specific first.
pub fn candidates(first: u8) -> impl Iterator<Item = &'static Opcode> {
    let index: &'static OpcodeIndex = &INDEX;

    index.buckets[first as usize]
        .iter()
        .map(move |i| &index.opcodes[*i])
}

/// Every opcode in the table, in table order.
pub fn opcodes() -> &'static [Opcode] {
    &INDEX.opcodes
}

macro_rules! op {
    ($pat:expr, $mn:expr, $w:expr, [$($f:expr),*]) => {
        op!($pat, $mn, $w, [$($f),*], Cpu::H8300H)
    };
    ($pat:expr, $mn:expr, $w:expr, [$($f:expr),*], $cpu:expr) => {
        Entry {
            pattern: $pat,
            mnemonic: $mn,
            width: $w,
            operands: &[$($f),*],
            cpu: $cpu,
        }
    };
}

const B: Option<Width> = Some(Width::Byte);
const W: Option<Width> = Some(Width::Word);
const L: Option<Width> = Some(Width::Long);
const N: Option<Width> = None;

const IB: Width = Width::Byte;
const IW: Width = Width::Word;
const IL: Width = Width::Long;

const CCR: Field = Field::Control(Register::CCR);
const EXR: Field = Field::Control(Register::EXR);
const MACH: Field = Field::Control(Register::MACH);
const MACL: Field = Field::Control(Register::MACL);

const H8S: Cpu = Cpu::H8S;

use crate::arch::h8::Condition::Always;
use Field::*;
use Mnemonic::*;

#[rustfmt::skip]
static ENTRIES: &[Entry] = &[
    // Data transfer
    op!("0x0C ssssdddd", Mov, B, [Reg8('s'), Reg8('d')]),
    op!("0x0D ssssdddd", Mov, W, [Reg16('s'), Reg16('d')]),
    op!("0x0F 1sss0ddd", Mov, L, [Reg32('s'), Reg32('d')]),
    op!("1111dddd i8", Mov, B, [Imm('i', IB), Reg8('d')]),
    op!("0x79 0000dddd i16", Mov, W, [Imm('i', IW), Reg16('d')]),
    op!("0x7A 00000ddd i32", Mov, L, [Imm('i', IL), Reg32('d')]),
    op!("0x68 0sssdddd", Mov, B, [Ind('s'), Reg8('d')]),
    op!("0x68 1dddssss", Mov, B, [Reg8('s'), Ind('d')]),
    op!("0x69 0sssdddd", Mov, W, [Ind('s'), Reg16('d')]),
    op!("0x69 1dddssss", Mov, W, [Reg16('s'), Ind('d')]),
    op!("0x01 0x00 0x69 0sss0ddd", Mov, L, [Ind('s'), Reg32('d')]),
    op!("0x01 0x00 0x69 1ddd0sss", Mov, L, [Reg32('s'), Ind('d')]),
    op!("0x6E 0sssdddd e16", Mov, B, [Disp16('e', 's'), Reg8('d')]),
    op!("0x6E 1dddssss e16", Mov, B, [Reg8('s'), Disp16('e', 'd')]),
    op!("0x6F 0sssdddd e16", Mov, W, [Disp16('e', 's'), Reg16('d')]),
    op!("0x6F 1dddssss e16", Mov, W, [Reg16('s'), Disp16('e', 'd')]),
    op!("0x01 0x00 0x6F 0sss0ddd e16", Mov, L, [Disp16('e', 's'), Reg32('d')]),
    op!("0x01 0x00 0x6F 1ddd0sss e16", Mov, L, [Reg32('s'), Disp16('e', 'd')]),
    op!("0x78 0sss0000 0x6A 0010dddd e32", Mov, B, [DispLong('e', 's'), Reg8('d')]),
    op!("0x78 0ddd0000 0x6A 1010ssss e32", Mov, B, [Reg8('s'), DispLong('e', 'd')]),
    op!("0x78 0sss0000 0x6B 0010dddd e32", Mov, W, [DispLong('e', 's'), Reg16('d')]),
    op!("0x78 0ddd0000 0x6B 1010ssss e32", Mov, W, [Reg16('s'), DispLong('e', 'd')]),
    op!("0x01 0x00 0x78 0sss0000 0x6B 00100ddd e32", Mov, L, [DispLong('e', 's'), Reg32('d')]),
    op!("0x01 0x00 0x78 0ddd0000 0x6B 10100sss e32", Mov, L, [Reg32('s'), DispLong('e', 'd')]),
    op!("0x6C 0sssdddd", Mov, B, [PostInc('s'), Reg8('d')]),
    op!("0x6C 1dddssss", Mov, B, [Reg8('s'), PreDec('d')]),
    op!("0x6D 0sssdddd", Mov, W, [PostInc('s'), Reg16('d')]),
    op!("0x6D 1dddssss", Mov, W, [Reg16('s'), PreDec('d')]),
    op!("0x6D 0111dddd", Pop, W, [Reg16('d')]),
    op!("0x6D 1111ssss", Push, W, [Reg16('s')]),
    op!("0x01 0x00 0x6D 0sss0ddd", Mov, L, [PostInc('s'), Reg32('d')]),
    op!("0x01 0x00 0x6D 1ddd0sss", Mov, L, [Reg32('s'), PreDec('d')]),
    op!("0x01 0x00 0x6D 01110ddd", Pop, L, [Reg32('d')]),
    op!("0x01 0x00 0x6D 11110sss", Push, L, [Reg32('s')]),
    op!("0010dddd a8", Mov, B, [Abs8('a'), Reg8('d')]),
    op!("0011ssss a8", Mov, B, [Reg8('s'), Abs8('a')]),
    op!("0x6A 0000dddd a16", Mov, B, [Abs16('a'), Reg8('d')]),
    op!("0x6A 0010dddd a32", Mov, B, [AbsLong('a'), Reg8('d')]),
    op!("0x6A 1000ssss a16", Mov, B, [Reg8('s'), Abs16('a')]),
    op!("0x6A 1010ssss a32", Mov, B, [Reg8('s'), AbsLong('a')]),
    op!("0x6B 0000dddd a16", Mov, W, [Abs16('a'), Reg16('d')]),
    op!("0x6B 0010dddd a32", Mov, W, [AbsLong('a'), Reg16('d')]),
    op!("0x6B 1000ssss a16", Mov, W, [Reg16('s'), Abs16('a')]),
    op!("0x6B 1010ssss a32", Mov, W, [Reg16('s'), AbsLong('a')]),
    op!("0x01 0x00 0x6B 00000ddd a16", Mov, L, [Abs16('a'), Reg32('d')]),
    op!("0x01 0x00 0x6B 00100ddd a32", Mov, L, [AbsLong('a'), Reg32('d')]),
    op!("0x01 0x00 0x6B 10000sss a16", Mov, L, [Reg32('s'), Abs16('a')]),
    op!("0x01 0x00 0x6B 10100sss a32", Mov, L, [Reg32('s'), AbsLong('a')]),
    op!("0x6A 0100dddd a16", Movfpe, N, [Abs16('a'), Reg8('d')]),
    op!("0x6A 1100ssss a16", Movtpe, N, [Reg8('s'), Abs16('a')]),
    op!("0x7B 0x5C 0x59 0x8F", Eepmov, B, []),
    op!("0x7B 0xD4 0x59 0x8F", Eepmov, W, []),

    // Arithmetic
    op!("1000dddd i8", Add, B, [Imm('i', IB), Reg8('d')]),
    op!("0x08 ssssdddd", Add, B, [Reg8('s'), Reg8('d')]),
    op!("0x79 0001dddd i16", Add, W, [Imm('i', IW), Reg16('d')]),
    op!("0x09 ssssdddd", Add, W, [Reg16('s'), Reg16('d')]),
    op!("0x7A 00010ddd i32", Add, L, [Imm('i', IL), Reg32('d')]),
    op!("0x0A 1sss0ddd", Add, L, [Reg32('s'), Reg32('d')]),
    op!("0x0B 00000ddd", Adds, N, [Const(1), Reg32('d')]),
    op!("0x0B 10000ddd", Adds, N, [Const(2), Reg32('d')]),
    op!("0x0B 10010ddd", Adds, N, [Const(4), Reg32('d')]),
    op!("1001dddd i8", Addx, N, [Imm('i', IB), Reg8('d')]),
    op!("0x0E ssssdddd", Addx, N, [Reg8('s'), Reg8('d')]),
    op!("0x0F 0000dddd", Daa, N, [Reg8('d')]),
    op!("0x0A 0000dddd", Inc, B, [Reg8('d')]),
    op!("0x0B 0101dddd", Inc, W, [Const(1), Reg16('d')]),
    op!("0x0B 1101dddd", Inc, W, [Const(2), Reg16('d')]),
    op!("0x0B 01110ddd", Inc, L, [Const(1), Reg32('d')]),
    op!("0x0B 11110ddd", Inc, L, [Const(2), Reg32('d')]),
    op!("0x18 ssssdddd", Sub, B, [Reg8('s'), Reg8('d')]),
    op!("0x79 0011dddd i16", Sub, W, [Imm('i', IW), Reg16('d')]),
    op!("0x19 ssssdddd", Sub, W, [Reg16('s'), Reg16('d')]),
    op!("0x7A 00110ddd i32", Sub, L, [Imm('i', IL), Reg32('d')]),
    op!("0x1A 1sss0ddd", Sub, L, [Reg32('s'), Reg32('d')]),
    op!("0x1B 00000ddd", Subs, N, [Const(1), Reg32('d')]),
    op!("0x1B 10000ddd", Subs, N, [Const(2), Reg32('d')]),
    op!("0x1B 10010ddd", Subs, N, [Const(4), Reg32('d')]),
    op!("1011dddd i8", Subx, N, [Imm('i', IB), Reg8('d')]),
    op!("0x1E ssssdddd", Subx, N, [Reg8('s'), Reg8('d')]),
    op!("0x1F 0000dddd", Das, N, [Reg8('d')]),
    op!("0x1A 0000dddd", Dec, B, [Reg8('d')]),
    op!("0x1B 0101dddd", Dec, W, [Const(1), Reg16('d')]),
    op!("0x1B 1101dddd", Dec, W, [Const(2), Reg16('d')]),
    op!("0x1B 01110ddd", Dec, L, [Const(1), Reg32('d')]),
    op!("0x1B 11110ddd", Dec, L, [Const(2), Reg32('d')]),
    op!("1010dddd i8", Cmp, B, [Imm('i', IB), Reg8('d')]),
    op!("0x1C ssssdddd", Cmp, B, [Reg8('s'), Reg8('d')]),
    op!("0x79 0010dddd i16", Cmp, W, [Imm('i', IW), Reg16('d')]),
    op!("0x1D ssssdddd", Cmp, W, [Reg16('s'), Reg16('d')]),
    op!("0x7A 00100ddd i32", Cmp, L, [Imm('i', IL), Reg32('d')]),
    op!("0x1F 1sss0ddd", Cmp, L, [Reg32('s'), Reg32('d')]),
    op!("0x17 1000dddd", Neg, B, [Reg8('d')]),
    op!("0x17 1001dddd", Neg, W, [Reg16('d')]),
    op!("0x17 10110ddd", Neg, L, [Reg32('d')]),
    op!("0x17 0101dddd", Extu, W, [Reg16('d')]),
    op!("0x17 01110ddd", Extu, L, [Reg32('d')]),
    op!("0x17 1101dddd", Exts, W, [Reg16('d')]),
    op!("0x17 11110ddd", Exts, L, [Reg32('d')]),
    op!("0x50 ssssdddd", Mulxu, B, [Reg8('s'), Reg16('d')]),
    op!("0x52 ssss0ddd", Mulxu, W, [Reg16('s'), Reg32('d')]),
    op!("0x51 ssssdddd", Divxu, B, [Reg8('s'), Reg16('d')]),
    op!("0x53 ssss0ddd", Divxu, W, [Reg16('s'), Reg32('d')]),
    op!("0x01 0xC0 0x50 ssssdddd", Mulxs, B, [Reg8('s'), Reg16('d')]),
    op!("0x01 0xC0 0x52 ssss0ddd", Mulxs, W, [Reg16('s'), Reg32('d')]),
    op!("0x01 0xD0 0x51 ssssdddd", Divxs, B, [Reg8('s'), Reg16('d')]),
    op!("0x01 0xD0 0x53 ssss0ddd", Divxs, W, [Reg16('s'), Reg32('d')]),

    // Logic
    op!("1110dddd i8", And, B, [Imm('i', IB), Reg8('d')]),
    op!("0x16 ssssdddd", And, B, [Reg8('s'), Reg8('d')]),
    op!("0x79 0110dddd i16", And, W, [Imm('i', IW), Reg16('d')]),
    op!("0x66 ssssdddd", And, W, [Reg16('s'), Reg16('d')]),
    op!("0x7A 01100ddd i32", And, L, [Imm('i', IL), Reg32('d')]),
    op!("0x01 0xF0 0x66 0sss0ddd", And, L, [Reg32('s'), Reg32('d')]),
    op!("1100dddd i8", Or, B, [Imm('i', IB), Reg8('d')]),
    op!("0x14 ssssdddd", Or, B, [Reg8('s'), Reg8('d')]),
    op!("0x79 0100dddd i16", Or, W, [Imm('i', IW), Reg16('d')]),
    op!("0x64 ssssdddd", Or, W, [Reg16('s'), Reg16('d')]),
    op!("0x7A 01000ddd i32", Or, L, [Imm('i', IL), Reg32('d')]),
    op!("0x01 0xF0 0x64 0sss0ddd", Or, L, [Reg32('s'), Reg32('d')]),
    op!("1101dddd i8", Xor, B, [Imm('i', IB), Reg8('d')]),
    op!("0x15 ssssdddd", Xor, B, [Reg8('s'), Reg8('d')]),
    op!("0x79 0101dddd i16", Xor, W, [Imm('i', IW), Reg16('d')]),
    op!("0x65 ssssdddd", Xor, W, [Reg16('s'), Reg16('d')]),
    op!("0x7A 01010ddd i32", Xor, L, [Imm('i', IL), Reg32('d')]),
    op!("0x01 0xF0 0x65 0sss0ddd", Xor, L, [Reg32('s'), Reg32('d')]),
    op!("0x17 0000dddd", Not, B, [Reg8('d')]),
    op!("0x17 0001dddd", Not, W, [Reg16('d')]),
    op!("0x17 00110ddd", Not, L, [Reg32('d')]),

    // Shifts and rotates
    op!("0x10 0000dddd", Shll, B, [Reg8('d')]),
    op!("0x10 0001dddd", Shll, W, [Reg16('d')]),
    op!("0x10 00110ddd", Shll, L, [Reg32('d')]),
    op!("0x10 1000dddd", Shal, B, [Reg8('d')]),
    op!("0x10 1001dddd", Shal, W, [Reg16('d')]),
    op!("0x10 10110ddd", Shal, L, [Reg32('d')]),
    op!("0x11 0000dddd", Shlr, B, [Reg8('d')]),
    op!("0x11 0001dddd", Shlr, W, [Reg16('d')]),
    op!("0x11 00110ddd", Shlr, L, [Reg32('d')]),
    op!("0x11 1000dddd", Shar, B, [Reg8('d')]),
    op!("0x11 1001dddd", Shar, W, [Reg16('d')]),
    op!("0x11 10110ddd", Shar, L, [Reg32('d')]),
    op!("0x12 0000dddd", Rotxl, B, [Reg8('d')]),
    op!("0x12 0001dddd", Rotxl, W, [Reg16('d')]),
    op!("0x12 00110ddd", Rotxl, L, [Reg32('d')]),
    op!("0x12 1000dddd", Rotl, B, [Reg8('d')]),
    op!("0x12 1001dddd", Rotl, W, [Reg16('d')]),
    op!("0x12 10110ddd", Rotl, L, [Reg32('d')]),
    op!("0x13 0000dddd", Rotxr, B, [Reg8('d')]),
    op!("0x13 0001dddd", Rotxr, W, [Reg16('d')]),
    op!("0x13 00110ddd", Rotxr, L, [Reg32('d')]),
    op!("0x13 1000dddd", Rotr, B, [Reg8('d')]),
    op!("0x13 1001dddd", Rotr, W, [Reg16('d')]),
    op!("0x13 10110ddd", Rotr, L, [Reg32('d')]),
    op!("0x10 0100dddd", Shll, B, [Const(2), Reg8('d')], H8S),
    op!("0x10 0101dddd", Shll, W, [Const(2), Reg16('d')], H8S),
    op!("0x10 01110ddd", Shll, L, [Const(2), Reg32('d')], H8S),
    op!("0x10 1100dddd", Shal, B, [Const(2), Reg8('d')], H8S),
    op!("0x10 1101dddd", Shal, W, [Const(2), Reg16('d')], H8S),
    op!("0x10 11110ddd", Shal, L, [Const(2), Reg32('d')], H8S),
    op!("0x11 0100dddd", Shlr, B, [Const(2), Reg8('d')], H8S),
    op!("0x11 0101dddd", Shlr, W, [Const(2), Reg16('d')], H8S),
    op!("0x11 01110ddd", Shlr, L, [Const(2), Reg32('d')], H8S),
    op!("0x11 1100dddd", Shar, B, [Const(2), Reg8('d')], H8S),
    op!("0x11 1101dddd", Shar, W, [Const(2), Reg16('d')], H8S),
    op!("0x11 11110ddd", Shar, L, [Const(2), Reg32('d')], H8S),
    op!("0x12 0100dddd", Rotxl, B, [Const(2), Reg8('d')], H8S),
    op!("0x12 0101dddd", Rotxl, W, [Const(2), Reg16('d')], H8S),
    op!("0x12 01110ddd", Rotxl, L, [Const(2), Reg32('d')], H8S),
    op!("0x12 1100dddd", Rotl, B, [Const(2), Reg8('d')], H8S),
    op!("0x12 1101dddd", Rotl, W, [Const(2), Reg16('d')], H8S),
    op!("0x12 11110ddd", Rotl, L, [Const(2), Reg32('d')], H8S),
    op!("0x13 0100dddd", Rotxr, B, [Const(2), Reg8('d')], H8S),
    op!("0x13 0101dddd", Rotxr, W, [Const(2), Reg16('d')], H8S),
    op!("0x13 01110ddd", Rotxr, L, [Const(2), Reg32('d')], H8S),
    op!("0x13 1100dddd", Rotr, B, [Const(2), Reg8('d')], H8S),
    op!("0x13 1101dddd", Rotr, W, [Const(2), Reg16('d')], H8S),
    op!("0x13 11110ddd", Rotr, L, [Const(2), Reg32('d')], H8S),

    // Bit manipulation on registers
    op!("0x70 0bbbdddd", Bset, N, [Bit('b'), Reg8('d')]),
    op!("0x71 0bbbdddd", Bnot, N, [Bit('b'), Reg8('d')]),
    op!("0x72 0bbbdddd", Bclr, N, [Bit('b'), Reg8('d')]),
    op!("0x73 0bbbdddd", Btst, N, [Bit('b'), Reg8('d')]),
    op!("0x60 nnnndddd", Bset, N, [Reg8('n'), Reg8('d')]),
    op!("0x61 nnnndddd", Bnot, N, [Reg8('n'), Reg8('d')]),
    op!("0x62 nnnndddd", Bclr, N, [Reg8('n'), Reg8('d')]),
    op!("0x63 nnnndddd", Btst, N, [Reg8('n'), Reg8('d')]),
    op!("0x74 0bbbdddd", Bor, N, [Bit('b'), Reg8('d')]),
    op!("0x74 1bbbdddd", Bior, N, [Bit('b'), Reg8('d')]),
    op!("0x75 0bbbdddd", Bxor, N, [Bit('b'), Reg8('d')]),
    op!("0x75 1bbbdddd", Bixor, N, [Bit('b'), Reg8('d')]),
    op!("0x76 0bbbdddd", Band, N, [Bit('b'), Reg8('d')]),
    op!("0x76 1bbbdddd", Biand, N, [Bit('b'), Reg8('d')]),
    op!("0x77 0bbbdddd", Bld, N, [Bit('b'), Reg8('d')]),
    op!("0x77 1bbbdddd", Bild, N, [Bit('b'), Reg8('d')]),
    op!("0x67 0bbbdddd", Bst, N, [Bit('b'), Reg8('d')]),
    op!("0x67 1bbbdddd", Bist, N, [Bit('b'), Reg8('d')]),

    // Bit manipulation on @ERd
    op!("0x7C 0ddd0000 0x73 0bbb0000", Btst, N, [Bit('b'), Ind('d')]),
    op!("0x7C 0ddd0000 0x63 nnnn0000", Btst, N, [Reg8('n'), Ind('d')]),
    op!("0x7C 0ddd0000 0x74 0bbb0000", Bor, N, [Bit('b'), Ind('d')]),
    op!("0x7C 0ddd0000 0x74 1bbb0000", Bior, N, [Bit('b'), Ind('d')]),
    op!("0x7C 0ddd0000 0x75 0bbb0000", Bxor, N, [Bit('b'), Ind('d')]),
    op!("0x7C 0ddd0000 0x75 1bbb0000", Bixor, N, [Bit('b'), Ind('d')]),
    op!("0x7C 0ddd0000 0x76 0bbb0000", Band, N, [Bit('b'), Ind('d')]),
    op!("0x7C 0ddd0000 0x76 1bbb0000", Biand, N, [Bit('b'), Ind('d')]),
    op!("0x7C 0ddd0000 0x77 0bbb0000", Bld, N, [Bit('b'), Ind('d')]),
    op!("0x7C 0ddd0000 0x77 1bbb0000", Bild, N, [Bit('b'), Ind('d')]),
    op!("0x7D 0ddd0000 0x70 0bbb0000", Bset, N, [Bit('b'), Ind('d')]),
    op!("0x7D 0ddd0000 0x71 0bbb0000", Bnot, N, [Bit('b'), Ind('d')]),
    op!("0x7D 0ddd0000 0x72 0bbb0000", Bclr, N, [Bit('b'), Ind('d')]),
    op!("0x7D 0ddd0000 0x60 nnnn0000", Bset, N, [Reg8('n'), Ind('d')]),
    op!("0x7D 0ddd0000 0x61 nnnn0000", Bnot, N, [Reg8('n'), Ind('d')]),
    op!("0x7D 0ddd0000 0x62 nnnn0000", Bclr, N, [Reg8('n'), Ind('d')]),
    op!("0x7D 0ddd0000 0x67 0bbb0000", Bst, N, [Bit('b'), Ind('d')]),
    op!("0x7D 0ddd0000 0x67 1bbb0000", Bist, N, [Bit('b'), Ind('d')]),

    // Bit manipulation on @aa:8
    op!("0x7E a8 0x73 0bbb0000", Btst, N, [Bit('b'), Abs8('a')]),
    op!("0x7E a8 0x63 nnnn0000", Btst, N, [Reg8('n'), Abs8('a')]),
    op!("0x7E a8 0x74 0bbb0000", Bor, N, [Bit('b'), Abs8('a')]),
    op!("0x7E a8 0x74 1bbb0000", Bior, N, [Bit('b'), Abs8('a')]),
    op!("0x7E a8 0x75 0bbb0000", Bxor, N, [Bit('b'), Abs8('a')]),
    op!("0x7E a8 0x75 1bbb0000", Bixor, N, [Bit('b'), Abs8('a')]),
    op!("0x7E a8 0x76 0bbb0000", Band, N, [Bit('b'), Abs8('a')]),
    op!("0x7E a8 0x76 1bbb0000", Biand, N, [Bit('b'), Abs8('a')]),
    op!("0x7E a8 0x77 0bbb0000", Bld, N, [Bit('b'), Abs8('a')]),
    op!("0x7E a8 0x77 1bbb0000", Bild, N, [Bit('b'), Abs8('a')]),
    op!("0x7F a8 0x70 0bbb0000", Bset, N, [Bit('b'), Abs8('a')]),
    op!("0x7F a8 0x71 0bbb0000", Bnot, N, [Bit('b'), Abs8('a')]),
    op!("0x7F a8 0x72 0bbb0000", Bclr, N, [Bit('b'), Abs8('a')]),
    op!("0x7F a8 0x60 nnnn0000", Bset, N, [Reg8('n'), Abs8('a')]),
    op!("0x7F a8 0x61 nnnn0000", Bnot, N, [Reg8('n'), Abs8('a')]),
    op!("0x7F a8 0x62 nnnn0000", Bclr, N, [Reg8('n'), Abs8('a')]),
    op!("0x7F a8 0x67 0bbb0000", Bst, N, [Bit('b'), Abs8('a')]),
    op!("0x7F a8 0x67 1bbb0000", Bist, N, [Bit('b'), Abs8('a')]),

    // Branches
    op!("0100cccc p8", Bcc(Always), N, [Cond('c'), Rel8('p')]),
    op!("0x58 cccc0000 p16", Bcc(Always), N, [Cond('c'), Rel16('p')]),
    op!("0x55 p8", Bsr, N, [Rel8('p')]),
    op!("0x5C 0x00 p16", Bsr, N, [Rel16('p')]),
    op!("0x59 0sss0000", Jmp, N, [Ind('s')]),
    op!("0x5A a24", Jmp, N, [Abs24('a')]),
    op!("0x5B v8", Jmp, N, [Vector('v')]),
    op!("0x5D 0sss0000", Jsr, N, [Ind('s')]),
    op!("0x5E a24", Jsr, N, [Abs24('a')]),
    op!("0x5F v8", Jsr, N, [Vector('v')]),
    op!("0x54 0x70", Rts, N, []),
    op!("0x56 0x70", Rte, N, []),

    // System control
    op!("0x57 00vv0000", Trapa, N, [Imm('v', IB)]),
    op!("0x01 0x80", Sleep, N, []),
    op!("0x00 0x00", Nop, N, []),
    op!("0x07 i8", Ldc, B, [Imm('i', IB), CCR]),
    op!("0x01 0x41 0x07 i8", Ldc, B, [Imm('i', IB), EXR]),
    op!("0x03 0000ssss", Ldc, B, [Reg8('s'), CCR]),
    op!("0x03 0001ssss", Ldc, B, [Reg8('s'), EXR]),
    op!("0x02 0000dddd", Stc, B, [CCR, Reg8('d')]),
    op!("0x02 0001dddd", Stc, B, [EXR, Reg8('d')]),
    op!("0x06 i8", Andc, N, [Imm('i', IB), CCR]),
    op!("0x01 0x41 0x06 i8", Andc, N, [Imm('i', IB), EXR]),
    op!("0x04 i8", Orc, N, [Imm('i', IB), CCR]),
    op!("0x01 0x41 0x04 i8", Orc, N, [Imm('i', IB), EXR]),
    op!("0x05 i8", Xorc, N, [Imm('i', IB), CCR]),
    op!("0x01 0x41 0x05 i8", Xorc, N, [Imm('i', IB), EXR]),
    op!("0x01 0x40 0x69 0sss0000", Ldc, W, [Ind('s'), CCR]),
    op!("0x01 0x40 0x6F 0sss0000 e16", Ldc, W, [Disp16('e', 's'), CCR]),
    op!("0x01 0x40 0x78 0sss0000 0x6B 0x20 e32", Ldc, W, [DispLong('e', 's'), CCR]),
    op!("0x01 0x40 0x6D 0sss0000", Ldc, W, [PostInc('s'), CCR]),
    op!("0x01 0x40 0x6B 0x00 a16", Ldc, W, [Abs16('a'), CCR]),
    op!("0x01 0x40 0x6B 0x20 a32", Ldc, W, [AbsLong('a'), CCR]),
    op!("0x01 0x40 0x69 1ddd0000", Stc, W, [CCR, Ind('d')]),
    op!("0x01 0x40 0x6F 1ddd0000 e16", Stc, W, [CCR, Disp16('e', 'd')]),
    op!("0x01 0x40 0x78 0ddd0000 0x6B 0xA0 e32", Stc, W, [CCR, DispLong('e', 'd')]),
    op!("0x01 0x40 0x6D 1ddd0000", Stc, W, [CCR, PreDec('d')]),
    op!("0x01 0x40 0x6B 0x80 a16", Stc, W, [CCR, Abs16('a')]),
    op!("0x01 0x40 0x6B 0xA0 a32", Stc, W, [CCR, AbsLong('a')]),
    op!("0x01 0x41 0x69 0sss0000", Ldc, W, [Ind('s'), EXR]),
    op!("0x01 0x41 0x6F 0sss0000 e16", Ldc, W, [Disp16('e', 's'), EXR]),
    op!("0x01 0x41 0x78 0sss0000 0x6B 0x20 e32", Ldc, W, [DispLong('e', 's'), EXR]),
    op!("0x01 0x41 0x6D 0sss0000", Ldc, W, [PostInc('s'), EXR]),
    op!("0x01 0x41 0x6B 0x00 a16", Ldc, W, [Abs16('a'), EXR]),
    op!("0x01 0x41 0x6B 0x20 a32", Ldc, W, [AbsLong('a'), EXR]),
    op!("0x01 0x41 0x69 1ddd0000", Stc, W, [EXR, Ind('d')]),
    op!("0x01 0x41 0x6F 1ddd0000 e16", Stc, W, [EXR, Disp16('e', 'd')]),
    op!("0x01 0x41 0x78 0ddd0000 0x6B 0xA0 e32", Stc, W, [EXR, DispLong('e', 'd')]),
    op!("0x01 0x41 0x6D 1ddd0000", Stc, W, [EXR, PreDec('d')]),
    op!("0x01 0x41 0x6B 0x80 a16", Stc, W, [EXR, Abs16('a')]),
    op!("0x01 0x41 0x6B 0xA0 a32", Stc, W, [EXR, AbsLong('a')]),

    // H8S only
    op!("0x01 00kk0000 0x6D 01110nnn", Ldm, L, [SpPostInc, LdmList('n', 'k')], H8S),
    op!("0x01 00kk0000 0x6D 11110nnn", Stm, L, [StmList('n', 'k'), SpPreDec], H8S),
    op!("0x01 0xE0 0x7B 0ddd1100", Tas, N, [Ind('d')], H8S),
    op!("0x01 0xA0", Clrmac, N, [], H8S),
    op!("0x01 0x60 0x6D 0sss0ddd", Mac, N, [PostInc('s'), PostInc('d')], H8S),
    op!("0x03 00100sss", Ldmac, N, [Reg32('s'), MACH]),
    op!("0x03 00110sss", Ldmac, N, [Reg32('s'), MACL]),
    op!("0x02 00100ddd", Stmac, N, [MACH, Reg32('d')]),
    op!("0x02 00110ddd", Stmac, N, [MACL, Reg32('d')]),
];
