use crate::arch::Mode;
use crate::asm::AssemblerName;
use crate::project::{Program, Project};
use std::path::{Path, PathBuf};

const PROJECT: &str = r#"{
    "programs": {
        "firmware": {
            "mode": "h8s300a",
            "assembler": "hew",
            "images": ["firmware.bin"],
            "load_address": 4096,
            "device": "H8S2633",
            "port_config": "cfg/h8.cfg",
            "entry_points": ["0x1000", "main"],
            "enum_size": 4
        },
        "boot": {
            "images": ["boot.bin", "boot2.bin"]
        }
    }
}"#;

fn project() -> Project {
    Project::from_reader(PROJECT.as_bytes()).unwrap()
}

#[test]
fn project_parse() {
    let project = project();
    let firmware = project.program("firmware").unwrap();

    assert_eq!(firmware.as_name(), Some("firmware"));
    assert_eq!(firmware.mode(), Some(Mode::H8SA));
    assert_eq!(firmware.assembler(), Some(AssemblerName::Hew));
    assert_eq!(firmware.iter_images().collect::<Vec<_>>(), vec!["firmware.bin"]);
    assert_eq!(firmware.load_address(), 0x1000);
    assert_eq!(
        firmware.iter_entry_points().collect::<Vec<_>>(),
        vec!["0x1000", "main"]
    );

    let boot = project.program("boot").unwrap();

    assert_eq!(boot.mode(), None);
    assert_eq!(boot.load_address(), 0);
    assert_eq!(boot.iter_images().count(), 2);

    assert!(project.program("missing").is_none());
    assert_eq!(
        project.iter_programs().map(|(n, _)| n).collect::<Vec<_>>(),
        vec!["boot", "firmware"]
    );
    assert_eq!(project.default_program().map(|(n, _)| n.as_str()), Some("boot"));
}

#[test]
fn project_rejects_bad_mode() {
    let text = r#"{ "programs": { "x": { "mode": "z80", "images": [] } } }"#;

    assert!(Project::from_reader(text.as_bytes()).is_err());
}

#[test]
fn program_override() {
    let project = project();
    let firmware = project.program("firmware").unwrap();
    let mut cli = Program::default();

    cli.set_mode(Mode::H8300A);
    cli.add_image_path("patched.bin");

    let merged = firmware.apply_override(&cli);

    assert_eq!(merged.mode(), Some(Mode::H8300A));
    assert_eq!(merged.assembler(), Some(AssemblerName::Hew));
    assert_eq!(merged.iter_images().collect::<Vec<_>>(), vec!["patched.bin"]);
    assert_eq!(merged.load_address(), 0x1000);
    assert_eq!(merged.iter_entry_points().count(), 2);
    assert_eq!(merged.as_name(), Some("firmware"));

    assert_eq!(firmware.apply_override(&Program::default()), *firmware);
}

#[test]
fn program_config() {
    let project = project();
    let config = project
        .program("firmware")
        .unwrap()
        .to_config(Path::new("/work/project"));

    assert_eq!(config.mode, Mode::H8SA);
    assert_eq!(config.assembler, AssemblerName::Hew);
    assert_eq!(config.device.as_deref(), Some("H8S2633"));
    assert_eq!(
        config.port_config,
        Some(PathBuf::from("/work/project/cfg/h8.cfg"))
    );
    assert_eq!(config.enum_size, 4);

    let config = project
        .program("boot")
        .unwrap()
        .to_config(Path::new("/work/project"));

    assert_eq!(config.mode, Mode::H8300A);
    assert_eq!(config.assembler, AssemblerName::Gas);
    assert_eq!(config.device, None);
    assert_eq!(config.port_config, None);
    assert_eq!(config.enum_size, 2);
}
