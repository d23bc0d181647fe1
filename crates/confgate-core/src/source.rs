// crates/confgate-core/src/source.rs
// ============================================================================
// Module: Config Sources
// Description: Read-only views of sectioned key/value documents.
// Purpose: Decouple the engine from any particular file format.
// Dependencies: toml
// ============================================================================

//! ## Overview
//! The engine reads documents through [`ConfigSource`]: an ordered list of
//! section names and, per section, an ordered list of raw string entries.
//! [`ConfigDocument`] is an in-memory source for callers that parse their own
//! format. `toml::Table` is a source too: top-level tables are sections,
//! string values are passed through raw, and other values are rendered as
//! TOML text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;

use toml::Table;
use toml::Value;

// ============================================================================
// SECTION: Source Contract
// ============================================================================

/// Read-only access to a sectioned document
///
/// # Invariants
/// - Section names are unique and returned in document order.
/// - Keys within a section are unique and returned in document order.
/// - Asking for entries of an unknown section yields an empty list.
pub trait ConfigSource {
    /// Returns section names in document order
    fn section_names(&self) -> Vec<&str>;

    /// Returns `(key, raw value)` pairs of a section in document order
    fn section_entries(&self, section: &str) -> Vec<(&str, Cow<'_, str>)>;
}

// ============================================================================
// SECTION: In-Memory Document
// ============================================================================

/// One section of a [`ConfigDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct DocumentSection {
    /// Section name.
    name: String,
    /// Entries in insertion order.
    entries: Vec<(String, String)>,
}

/// In-memory sectioned document
///
/// # Invariants
/// - Re-adding a section reuses the existing one.
/// - Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    /// Sections in insertion order.
    sections: Vec<DocumentSection>,
}

impl ConfigDocument {
    /// Creates an empty document
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Adds an empty section unless it already exists
    pub fn add_section(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.section_index(&name);
        self
    }

    /// Sets a value, creating the section when missing
    pub fn set(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        let section = section.into();
        let key = key.into();
        let value = value.into();
        let index = self.section_index(&section);
        if let Some(target) = self.sections.get_mut(index) {
            match target.entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => target.entries.push((key, value)),
            }
        }
        self
    }

    /// Adds a section with entries, consuming and returning the document
    #[must_use]
    pub fn with_section<I, K, V>(mut self, name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        self.add_section(name.clone());
        for (key, value) in entries {
            self.set(name.clone(), key, value);
        }
        self
    }

    /// Returns the number of sections
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true when the document has no sections
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns a raw value
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|candidate| candidate.name == section)?
            .entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the index of `name`, appending an empty section when missing.
    fn section_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.sections.iter().position(|section| section.name == name) {
            return index;
        }
        self.sections.push(DocumentSection {
            name: name.to_string(),
            entries: Vec::new(),
        });
        self.sections.len() - 1
    }
}

impl ConfigSource for ConfigDocument {
    fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|section| section.name.as_str()).collect()
    }

    fn section_entries(&self, section: &str) -> Vec<(&str, Cow<'_, str>)> {
        self.sections
            .iter()
            .find(|candidate| candidate.name == section)
            .map(|found| {
                found
                    .entries
                    .iter()
                    .map(|(key, value)| (key.as_str(), Cow::Borrowed(value.as_str())))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// SECTION: TOML Documents
// ============================================================================

impl ConfigSource for Table {
    fn section_names(&self) -> Vec<&str> {
        self.iter().filter(|(_, value)| value.is_table()).map(|(name, _)| name.as_str()).collect()
    }

    fn section_entries(&self, section: &str) -> Vec<(&str, Cow<'_, str>)> {
        match self.get(section) {
            Some(Value::Table(entries)) => {
                entries.iter().map(|(key, value)| (key.as_str(), render_value(value))).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Returns strings verbatim and everything else as TOML text.
fn render_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(raw) => Cow::Borrowed(raw.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use toml::Value;

    use super::render_value;

    #[test]
    fn strings_render_raw_and_scalars_render_as_toml() {
        assert_eq!(render_value(&Value::String("a \"b\"".to_string())), "a \"b\"");
        assert_eq!(render_value(&Value::Integer(42)), "42");
        assert_eq!(render_value(&Value::Boolean(true)), "true");
        assert_eq!(render_value(&Value::Float(1.5)), "1.5");
    }
}
