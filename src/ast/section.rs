//! Top-level AST type which represents a single section.

use crate::arch::h8::Address;
use crate::ast::Directive;

type FixedDirective = (Directive, Address);

#[derive(Clone, Debug)]
pub struct Section {
    name: String,
    directives: Vec<FixedDirective>,
}

impl Section {
    pub fn new(name: &str) -> Self {
        Section {
            name: name.to_string(),
            directives: Vec::new(),
        }
    }

    pub fn iter_directives(&self) -> impl Iterator<Item = &FixedDirective> {
        self.directives.iter()
    }

    pub fn append_directive(&mut self, dir: Directive, loc: Address) {
        self.directives.push((dir, loc));
    }

    pub fn section_name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}
