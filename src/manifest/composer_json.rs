//! composer.json document
//!
//! The document is kept as an ordered key-value tree so that fields this
//! tool does not understand (autoload, scripts, extra, ...) round-trip
//! unchanged. Only the `require` and `require-dev` sections get typed
//! accessors.

use std::io::{self, Write};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Dependency section of composer.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Require,
    RequireDev,
}

impl Section {
    /// Sections in reading order; a later section overrides an earlier one
    pub const ALL: [Section; 2] = [Section::Require, Section::RequireDev];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Require => "require",
            Section::RequireDev => "require-dev",
        }
    }
}

/// Parsed composer.json with preserved field order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComposerJson {
    fields: IndexMap<String, Value>,
}

impl ComposerJson {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    fn section(&self, section: Section) -> Option<&Map<String, Value>> {
        self.fields.get(section.key()).and_then(Value::as_object)
    }

    /// Iterate over `(package, constraint)` pairs of a section in file order.
    ///
    /// Entries whose constraint is not a string are skipped.
    pub fn constraints(&self, section: Section) -> impl Iterator<Item = (&str, &str)> {
        self.section(section)
            .into_iter()
            .flat_map(|entries| entries.iter())
            .filter_map(|(name, value)| value.as_str().map(|c| (name.as_str(), c)))
    }

    /// Get the constraint declared for a package in a section
    pub fn constraint(&self, section: Section, package_name: &str) -> Option<&str> {
        self.section(section)?.get(package_name)?.as_str()
    }

    /// Find the section a package was read from.
    ///
    /// Sections are checked in reverse reading order, so a package declared
    /// in both resolves to `require-dev`, matching what loading reports.
    pub fn section_of(&self, package_name: &str) -> Option<Section> {
        Section::ALL
            .into_iter()
            .rev()
            .find(|section| self.constraint(*section, package_name).is_some())
    }

    /// Replace an existing constraint in place. Returns true if the value changed.
    ///
    /// Packages missing from the section are left alone.
    pub fn set_constraint(&mut self, section: Section, package_name: &str, constraint: &str) -> bool {
        let Some(entry) = self
            .fields
            .get_mut(section.key())
            .and_then(Value::as_object_mut)
            .and_then(|entries| entries.get_mut(package_name))
        else {
            return false;
        };

        if entry.as_str() == Some(constraint) {
            return false;
        }
        *entry = Value::String(constraint.to_string());
        true
    }

    /// Serialize with four-space indentation, unescaped slashes and a trailing newline
    pub fn write_pretty<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)?;
        writer.write_all(b"\n")
    }
}
