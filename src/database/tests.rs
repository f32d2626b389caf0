use crate::analysis::{DatabaseView, Reference, ReferenceKind};
use crate::ast::Label;
use crate::database::{Database, Error, PortDatabase};
use crate::memory::{Memory, Segment};

const PORTS: &str = "; H8S family port file
.default H8S2633

VECTOR_BASE 0x0000 Shared by every device

.H8S2633
area DATA RAM 0xFFB000:0xFFF000
entry RESET 0x0000 Power-on reset
entry NMI 0x001C
SMR0 0xFFFF78 Serial mode register 0
BRR0 0xFFFF79

.H8S2238
SMR0 0xFFFF80 Serial mode register 0
this line is not a port
";

fn rom() -> Database {
    let mut memory = Memory::new();

    memory.install_segment(Segment::new("ROM", 0x1000, vec![0; 0x100]));

    Database::new(memory)
}

#[test]
fn ports_parse() {
    let ports = PortDatabase::parse(PORTS.as_bytes()).unwrap();

    assert_eq!(ports.devices().collect::<Vec<_>>(), vec!["H8S2633", "H8S2238"]);
    assert_eq!(ports.default_device(), Some("H8S2633"));
    assert_eq!(ports.active_device().map(|d| d.name()), Some("H8S2633"));

    let device = ports.active_device().unwrap();

    assert_eq!(device.ports().len(), 2);
    assert_eq!(device.ports()[0].name(), "SMR0");
    assert_eq!(device.ports()[0].address(), 0xFFFF78);
    assert_eq!(device.ports()[0].comment(), Some("Serial mode register 0"));
    assert_eq!(device.ports()[1].comment(), None);
    assert_eq!(device.entries().len(), 2);
}

#[test]
fn ports_lookup() {
    let mut ports = PortDatabase::parse(PORTS.as_bytes()).unwrap();

    assert_eq!(ports.find_sym(0xFFFF78), Some("SMR0"));
    assert_eq!(ports.find_sym(0xFFFF79), Some("BRR0"));
    assert_eq!(ports.find_sym(0xFFFF80), None);
    assert_eq!(ports.find_sym(0x0000), Some("VECTOR_BASE"));
    assert_eq!(ports.find_port(0xFFFF78).and_then(|p| p.comment()), Some("Serial mode register 0"));

    ports.select_device("H8S2238").unwrap();

    assert_eq!(ports.find_sym(0xFFFF78), None);
    assert_eq!(ports.find_sym(0xFFFF80), Some("SMR0"));

    assert!(matches!(
        ports.select_device("H8S9999"),
        Err(Error::UnknownDevice(name)) if name == "H8S9999"
    ));
    assert_eq!(ports.active_device().map(|d| d.name()), Some("H8S2238"));
}

#[test]
fn ports_address_mask() {
    let mut ports = PortDatabase::parse(PORTS.as_bytes()).unwrap();

    assert_eq!(ports.find_sym(0xFF78), None);

    ports.set_address_mask(0xFFFF);

    assert_eq!(ports.find_sym(0xFF78), Some("SMR0"));
}

#[test]
fn ports_entries() {
    let ports = PortDatabase::parse(PORTS.as_bytes()).unwrap();
    let entries: Vec<_> = ports.entries().map(|e| (e.name(), e.address())).collect();

    assert_eq!(entries, vec![("RESET", 0x0000), ("NMI", 0x001C)]);

    let empty = PortDatabase::new();

    assert_eq!(empty.entries().count(), 0);
    assert_eq!(empty.find_sym(0), None);
    assert_eq!(empty.active_device(), None);
}

#[test]
fn db_heads() {
    let mut db = rom();

    assert!(db.insert_head(0x1000, 2));
    assert!(db.insert_head(0x1002, 4));
    assert!(db.insert_head(0x1000, 2));
    assert!(!db.insert_head(0x1000, 4));
    assert!(!db.insert_head(0x1004, 2));
    assert!(!db.insert_head(0x0FFF, 2));

    assert_eq!(db.head(0x1002), Some(4));
    assert_eq!(db.head(0x1004), None);
    assert_eq!(db.head_containing(0x1005), Some((0x1002, 4)));
    assert_eq!(db.head_containing(0x1006), None);
    assert_eq!(db.iter_heads().collect::<Vec<_>>(), vec![(0x1000, 2), (0x1002, 4)]);

    assert_eq!(db.prev_head(0x1002), Some(0x1000));
    assert_eq!(db.prev_head(0x1006), Some(0x1002));
    assert_eq!(db.prev_head(0x1008), None);
    assert_eq!(db.prev_head(0x1000), None);
}

#[test]
fn db_symbols() {
    let mut db = rom();

    assert_eq!(
        db.insert_placeholder_label(0x1010, ReferenceKind::Code),
        Label::new("loc_1010")
    );
    assert_eq!(
        db.insert_placeholder_label(0x1010, ReferenceKind::Subroutine),
        Label::new("loc_1010")
    );
    assert_eq!(
        db.insert_placeholder_label(0x1020, ReferenceKind::Data),
        Label::new("dat_1020")
    );

    db.upsert_symbol(Label::new("main"), 0x1010);

    assert_eq!(db.pointer_symbol(0x1010), Some(&Label::new("main")));
    assert_eq!(db.label_symbol(&Label::new("main")), Some(0x1010));
    assert_eq!(db.label_symbol(&Label::new("loc_1010")), None);

    db.upsert_symbol(Label::new("main"), 0x1030);

    assert_eq!(db.label_symbol(&Label::new("main")), Some(0x1030));
    assert_eq!(db.pointer_symbol(0x1010), None);
    assert_eq!(db.iter_symbols().count(), 2);
}

#[test]
fn db_xrefs() {
    let mut db = rom();
    let call = Reference::new_static_ref(0x1000, 0x1040, ReferenceKind::Subroutine);
    let data = Reference::new_static_ref(0x1004, 0x1080, ReferenceKind::Data);

    db.insert_crossreference(call.clone());
    db.insert_crossreference(call.clone());
    db.insert_crossreference(data.clone());
    db.insert_crossreference(Reference::new_dyn_ref(0x1008, ReferenceKind::Code));

    assert_eq!(db.find_xrefs_from(0x1000, 8).count(), 2);
    assert_eq!(db.find_xrefs_from(0x1000, 0x10).count(), 3);
    assert_eq!(db.find_xrefs_to(0x1040, 1).collect::<Vec<_>>(), vec![&call]);
    assert_eq!(db.xref(1), Some(&data));

    assert!(db.has_code_refs_to(0x1040));
    assert!(!db.has_code_refs_to(0x1080));
    assert!(!db.has_code_refs_to(0x1000));
}

#[test]
fn db_functions() {
    let mut db = rom();

    assert!(db.insert_function(0x1000));
    assert!(!db.insert_function(0x1000));
    assert!(db.insert_function(0x1080));
    assert!(db.is_function(0x1080));
    assert!(!db.is_function(0x1040));
    assert_eq!(db.iter_functions().collect::<Vec<_>>(), vec![0x1000, 0x1080]);
    assert!(db.frame_for(0x1004).is_none());
}

#[test]
fn db_view() {
    let mut memory = Memory::new();

    memory.install_segment(Segment::new("ROM", 0x1000, vec![0x12, 0x34, 0x56, 0x78]));

    let db = Database::new(memory);

    assert!(db.is_mapped(0x1003));
    assert!(!db.is_mapped(0x1004));
    assert_eq!(db.read_bytes(0x1002, 4), vec![0x56, 0x78]);
    assert_eq!(db.read_word(0x1000), Some(0x1234));
    assert_eq!(db.read_long(0x1000), Some(0x1234_5678));
    assert_eq!(db.read_long(0x1002), None);
}
