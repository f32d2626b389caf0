//! Implementation of core database type

use crate::analysis::{DatabaseView, Reference, ReferenceKind};
use crate::arch::h8::{Address, Frame, SwitchTable};
use crate::ast;
use crate::memory::Memory;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// A repository of information obtained from the program under analysis.
#[derive(Clone, Debug)]
pub struct Database {
    memory: Memory,

    /// Length of every known instruction, by start address.
    heads: BTreeMap<Address, u32>,

    /// Named locations.
    symbols: Vec<(ast::Label, Address)>,

    /// A list of all labels in the program.
    label_symbols: HashMap<ast::Label, usize>,

    /// A list of all addresses in the program which have a label.
    pointer_symbols: HashMap<Address, usize>,

    /// A list of all cross-references in the program.
    xrefs: Vec<Reference>,

    /// Crossreferences sorted by source address.
    xref_source_index: BTreeMap<Address, HashSet<usize>>,

    /// Crossreferences sorted by target address.
    xref_target_index: BTreeMap<Address, HashSet<usize>>,

    /// Entry points of known functions.
    functions: BTreeSet<Address>,

    /// Stack frames, keyed by function entry.
    frames: BTreeMap<Address, Frame>,

    /// Recognized jump tables, keyed by table address.
    switches: BTreeMap<Address, SwitchTable>,
}

impl Database {
    pub fn new(memory: Memory) -> Self {
        Database {
            memory,
            heads: BTreeMap::new(),
            symbols: Vec::new(),
            label_symbols: HashMap::new(),
            pointer_symbols: HashMap::new(),
            xrefs: Vec::new(),
            xref_source_index: BTreeMap::new(),
            xref_target_index: BTreeMap::new(),
            functions: BTreeSet::new(),
            frames: BTreeMap::new(),
            switches: BTreeMap::new(),
        }
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mark an instruction of `len` bytes at `address`.
    ///
    /// Fails, returning false, if the instruction would overlap one that is
    /// already known.
    pub fn insert_head(&mut self, address: Address, len: u32) -> bool {
        if let Some(existing) = self.heads.get(&address) {
            return *existing == len;
        }

        let end = address.saturating_add(len);
        let overlaps_prev = self
            .heads
            .range(..address)
            .next_back()
            .map_or(false, |(start, len)| start.saturating_add(*len) > address);
        let overlaps_next = self.heads.range(address..end).next().is_some();

        if overlaps_prev || overlaps_next {
            return false;
        }

        self.heads.insert(address, len);

        true
    }

    /// Length of the instruction starting at `address`, if one is known.
    pub fn head(&self, address: Address) -> Option<u32> {
        self.heads.get(&address).copied()
    }

    /// The known instruction covering `address`, as its start and length.
    pub fn head_containing(&self, address: Address) -> Option<(Address, u32)> {
        self.heads
            .range(..=address)
            .next_back()
            .filter(|(start, len)| start.saturating_add(**len) > address)
            .map(|(start, len)| (*start, *len))
    }

    pub fn iter_heads(&self) -> impl Iterator<Item = (Address, u32)> + '_ {
        self.heads.iter().map(|(a, l)| (*a, *l))
    }

    /// Create a new symbol association.
    pub fn insert_symbol(&mut self, label: ast::Label, address: Address) {
        let id = self.symbols.len();

        self.symbols.push((label.clone(), address));
        self.label_symbols.insert(label, id);
        self.pointer_symbols.insert(address, id);
    }

    /// Ensure a symbol exists with a given label and address.
    ///
    /// An existing label is repointed to the new address rather than
    /// duplicated. A generated name for the same address is replaced.
    pub fn upsert_symbol(&mut self, label: ast::Label, address: Address) {
        if let Some(id) = self.label_symbols.get(&label).copied() {
            let old = self.symbols[id].1;

            if old != address {
                self.pointer_symbols.remove(&old);
                self.pointer_symbols.insert(address, id);
                self.symbols[id].1 = address;
            }
        } else if let Some(id) = self.pointer_symbols.get(&address).copied() {
            if !is_placeholder(&self.symbols[id].0) {
                return self.insert_symbol(label, address);
            }

            self.label_symbols.remove(&self.symbols[id].0);
            self.label_symbols.insert(label.clone(), id);
            self.symbols[id].0 = label;
        } else {
            self.insert_symbol(label, address);
        }
    }

    pub fn pointer_symbol(&self, address: Address) -> Option<&ast::Label> {
        self.pointer_symbols
            .get(&address)
            .map(|id| &self.symbols[*id].0)
    }

    pub fn label_symbol(&self, label: &ast::Label) -> Option<Address> {
        self.label_symbols.get(label).map(|id| self.symbols[*id].1)
    }

    pub fn iter_symbols(&self) -> impl Iterator<Item = (&ast::Label, Address)> {
        self.symbols.iter().map(|(l, a)| (l, *a))
    }

    /// Create a label for a location that is not named in the database.
    ///
    /// Returns the existing label if the location already has one.
    pub fn insert_placeholder_label(
        &mut self,
        address: Address,
        kind: ReferenceKind,
    ) -> ast::Label {
        if let Some(label) = self.pointer_symbol(address) {
            return label.clone();
        }

        let prefix = match kind {
            ReferenceKind::Subroutine => "sub",
            ReferenceKind::Code => "loc",
            ReferenceKind::Data => "dat",
            ReferenceKind::Unknown => "unk",
        };
        let label = ast::Label::new(&format!("{}_{:X}", prefix, address));

        self.insert_symbol(label.clone(), address);

        label
    }

    /// Record a crossreference. Duplicates are dropped.
    pub fn insert_crossreference(&mut self, xref: Reference) {
        let id = self.xrefs.len();
        let source_bucket = self
            .xref_source_index
            .entry(xref.as_source())
            .or_insert_with(HashSet::new);

        for other_id in source_bucket.iter() {
            if self.xrefs[*other_id] == xref {
                return;
            }
        }

        source_bucket.insert(id);

        if let Some(target) = xref.as_target() {
            self.xref_target_index
                .entry(target)
                .or_insert_with(HashSet::new)
                .insert(id);
        }

        self.xrefs.push(xref);
    }

    pub fn xref(&self, id: usize) -> Option<&Reference> {
        self.xrefs.get(id)
    }

    /// All xrefs originating from a memory range.
    pub fn find_xrefs_from(&self, start: Address, len: u32) -> impl Iterator<Item = &Reference> {
        self.xref_source_index
            .range(start..start.saturating_add(len))
            .flat_map(|(_, ids)| ids.iter())
            .map(move |id| &self.xrefs[*id])
    }

    /// All xrefs targeting a memory range.
    pub fn find_xrefs_to(&self, start: Address, len: u32) -> impl Iterator<Item = &Reference> {
        self.xref_target_index
            .range(start..start.saturating_add(len))
            .flat_map(|(_, ids)| ids.iter())
            .map(move |id| &self.xrefs[*id])
    }

    pub fn insert_function(&mut self, entry: Address) -> bool {
        self.functions.insert(entry)
    }

    pub fn is_function(&self, entry: Address) -> bool {
        self.functions.contains(&entry)
    }

    pub fn iter_functions(&self) -> impl Iterator<Item = Address> + '_ {
        self.functions.iter().copied()
    }

    pub fn insert_frame(&mut self, frame: Frame) {
        self.frames.insert(frame.entry(), frame);
    }

    pub fn frame(&self, entry: Address) -> Option<&Frame> {
        self.frames.get(&entry)
    }

    pub fn insert_switch(&mut self, switch: SwitchTable) {
        self.switches.insert(switch.table, switch);
    }

    /// The jump table stored at `table`, if one was recognized.
    pub fn switch_table(&self, table: Address) -> Option<&SwitchTable> {
        self.switches.get(&table)
    }
}

/// Generated labels are `sub_`, `loc_`, `dat_` or `unk_` followed by the
/// address they name.
fn is_placeholder(label: &ast::Label) -> bool {
    let name = label.name();

    ["sub_", "loc_", "dat_", "unk_"].iter().any(|prefix| {
        name.strip_prefix(prefix)
            .map_or(false, |rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit()))
    })
}

impl DatabaseView for Database {
    fn read_bytes(&self, address: Address, len: usize) -> Vec<u8> {
        self.memory.read_bytes(address, len)
    }

    fn is_mapped(&self, address: Address) -> bool {
        self.memory.segment_containing(address).is_some()
    }

    fn prev_head(&self, address: Address) -> Option<Address> {
        self.heads
            .range(..address)
            .next_back()
            .filter(|(start, len)| start.wrapping_add(**len) == address)
            .map(|(start, _)| *start)
    }

    fn has_code_refs_to(&self, address: Address) -> bool {
        self.xref_target_index
            .get(&address)
            .map_or(false, |ids| ids.iter().any(|id| self.xrefs[*id].is_code()))
    }

    fn frame_for(&self, address: Address) -> Option<&Frame> {
        let entry = self.functions.range(..=address).next_back()?;

        self.frames.get(entry)
    }

    fn read_word(&self, address: Address) -> Option<u16> {
        self.memory.read_word(address)
    }

    fn read_long(&self, address: Address) -> Option<u32> {
        self.memory.read_word(address)
    }
}
