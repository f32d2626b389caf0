//! Label AST type

use std::{fmt, str};

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Label {
    /// Name of the label.
    name: String,
}

impl Label {
    pub fn new(name: &str) -> Label {
        Label {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl str::FromStr for Label {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid_start = s
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic() || c == '_' || c == '.');

        if valid_start && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
            Ok(Label::new(s))
        } else {
            Err(())
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
