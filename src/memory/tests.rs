use crate::memory::{Endianness, Memory, Segment};
use std::io::Cursor;

fn two_segments() -> Memory {
    let mut memory = Memory::new();

    memory.install_segment(Segment::new("ROM", 0x0000, vec![0x12, 0x34, 0x56, 0x78]));
    memory.install_segment(Segment::new("RAM", 0xFF00, vec![0xAA; 0x10]));

    memory
}

#[test]
fn segment_bounds() {
    let segment = Segment::new("ROM", 0x100, vec![0; 0x10]);

    assert_eq!(segment.name(), "ROM");
    assert_eq!(segment.start(), 0x100);
    assert_eq!(segment.end(), 0x110);
    assert_eq!(segment.len(), 0x10);
    assert!(!segment.is_empty());
    assert!(segment.contains(0x100));
    assert!(segment.contains(0x10F));
    assert!(!segment.contains(0x110));
    assert!(!segment.contains(0xFF));
}

#[test]
fn memory_reads() {
    let memory = two_segments();

    assert_eq!(memory.read_unit(0x0001), Some(0x34));
    assert_eq!(memory.read_unit(0x0004), None);
    assert_eq!(memory.read_unit(0xFF0F), Some(0xAA));
    assert_eq!(memory.read_bytes(0x0002, 8), vec![0x56, 0x78]);
    assert_eq!(memory.read_bytes(0x8000, 8), Vec::<u8>::new());
    assert_eq!(memory.segment_containing(0xFF04).map(|s| s.name()), Some("RAM"));
    assert_eq!(memory.iter_segments().count(), 2);
}

#[test]
fn memory_words_are_big_endian() {
    let memory = two_segments();

    assert_eq!(memory.read_word::<u16>(0x0000), Some(0x1234));
    assert_eq!(memory.read_word::<u32>(0x0000), Some(0x1234_5678));
    assert_eq!(memory.read_word::<u16>(0x0003), None);
    assert_eq!(memory.read_word::<u32>(0x0001), None);
}

#[test]
fn endianness_assembly() {
    let units = [0x12, 0x34];

    assert_eq!(Endianness::BigEndian.assemble::<u16>(&units), Some(0x1234));
    assert_eq!(Endianness::LittleEndian.assemble::<u16>(&units), Some(0x3412));
    assert_eq!(Endianness::BigEndian.assemble::<u32>(&units), None);
}

#[test]
fn image_loading() {
    let mut image = Cursor::new(vec![0x54, 0x70, 0x56, 0x70]);
    let memory = Memory::from_image(&mut image, 0x2000).unwrap();

    assert_eq!(memory.read_bytes(0x2000, 4), vec![0x54, 0x70, 0x56, 0x70]);
    assert_eq!(memory.read_unit(0x1FFF), None);
    assert_eq!(memory.segment_containing(0x2003).map(|s| s.name()), Some("ROM"));
}
