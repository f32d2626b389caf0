//! Project configuration file representation

use crate::project::program::Program;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// In-memory representation of the current project configuration.
///
/// This file is typically read from a file named `h8dis.json`, and it
/// describes every program image in the project.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Project {
    programs: BTreeMap<String, Program>,

    /// Directory relative paths in the project file are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Project {
    pub fn read(filename: &Path) -> io::Result<Self> {
        let project_file = fs::File::open(filename)?;
        let mut project = Self::from_reader(project_file)?;

        project.base_dir = filename
            .parent()
            .map_or_else(PathBuf::new, |p| p.to_path_buf());

        Ok(project)
    }

    /// Parse a project file's contents.
    pub fn from_reader<R>(reader: R) -> io::Result<Self>
    where
        R: io::Read,
    {
        let mut project: Self = serde_json::from_reader(reader)?;

        for (name, prog) in project.programs.iter_mut() {
            if prog.as_name().is_none() {
                prog.set_name(name);
            }
        }

        Ok(project)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the program with the given name within the project.
    pub fn program(&self, name: &str) -> Option<&Program> {
        self.programs.get(name)
    }

    /// Get the project's default program.
    pub fn default_program(&self) -> Option<(&String, &Program)> {
        self.programs.iter().next()
    }

    pub fn iter_programs(&self) -> impl Iterator<Item = (&str, &Program)> {
        self.programs.iter().map(|(k, v)| (k.as_str(), v))
    }
}
