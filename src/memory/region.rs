//! Segments of program memory.

use crate::arch::h8::Address;
use crate::memory::Endianness;
use num_traits::PrimInt;
use std::io::{self, Read};
use std::mem;

/// A contiguous range of memory backed by a program image.
#[derive(Clone, Debug)]
pub struct Segment {
    name: String,
    start: Address,
    data: Vec<u8>,
}

impl Segment {
    pub fn new(name: &str, start: Address, data: Vec<u8>) -> Self {
        Segment {
            name: name.to_string(),
            start,
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> Address {
        self.start
    }

    /// The first address past the end of the segment.
    pub fn end(&self) -> Address {
        self.start.saturating_add(self.data.len() as Address)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, address: Address) -> bool {
        self.start <= address && address < self.end()
    }

    /// Every byte from `address` to the end of the segment.
    fn tail(&self, address: Address) -> &[u8] {
        if self.contains(address) {
            &self.data[(address - self.start) as usize..]
        } else {
            &[]
        }
    }
}

/// The memory visible to the program under analysis.
#[derive(Clone, Debug)]
pub struct Memory {
    segments: Vec<Segment>,
    endianness: Endianness,
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            segments: Vec::new(),
            endianness: Endianness::BigEndian,
        }
    }

    /// Construct memory holding a single raw program image.
    pub fn from_image<R>(image: &mut R, load_address: Address) -> io::Result<Self>
    where
        R: Read,
    {
        let mut data = Vec::new();

        image.read_to_end(&mut data)?;

        let mut memory = Memory::new();
        memory.install_segment(Segment::new("ROM", load_address, data));

        Ok(memory)
    }

    /// Add a segment. Earlier segments win where segments overlap.
    pub fn install_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn iter_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn segment_containing(&self, address: Address) -> Option<&Segment> {
        self.segments.iter().find(|s| s.contains(address))
    }

    pub fn read_unit(&self, address: Address) -> Option<u8> {
        self.segment_containing(address)
            .and_then(|s| s.tail(address).first().copied())
    }

    /// Read up to `len` bytes, stopping at the end of the segment.
    pub fn read_bytes(&self, address: Address, len: usize) -> Vec<u8> {
        match self.segment_containing(address) {
            Some(segment) => segment.tail(address).iter().take(len).copied().collect(),
            None => Vec::new(),
        }
    }

    /// Read a word in the memory's byte order.
    pub fn read_word<T>(&self, address: Address) -> Option<T>
    where
        T: PrimInt,
    {
        let units = self.read_bytes(address, mem::size_of::<T>());

        self.endianness.assemble(&units)
    }
}
