//! Section/key index derived from a [`RawDocument`].
//!
//! The model is never edited directly; it is rebuilt from the document with
//! [`ParsedModel::build`] whenever the document changes, so it cannot drift
//! from what a fresh parse of the persisted file would produce.

use serde::Serialize;

use super::classify::{LineKind, classify};
use super::document::RawDocument;

/// One named group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Returns the section name as first written in the document.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value for a key, matched case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Iterates entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the section has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or overwrites a key. A later occurrence keeps the original
    /// position but takes over both value and key casing.
    fn upsert(&mut self, key: &str, value: &str) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            key.clone_into(&mut entry.0);
            value.clone_into(&mut entry.1);
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }
}

/// Where the parser is while scanning.
enum Scope {
    /// Inside the section at this index.
    Section(usize),
    /// After a malformed header; nothing is indexed until the next header.
    Orphaned,
}

/// Mapping from section name to ordered key/value entries.
///
/// The global section (name `""`) always exists and is always first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedModel {
    sections: Vec<Section>,
}

impl Default for ParsedModel {
    fn default() -> Self {
        Self {
            sections: vec![Section::new("")],
        }
    }
}

impl ParsedModel {
    /// Builds the model in a single pass over the document.
    ///
    /// Comments, blank lines and unparseable lines are skipped. When a key
    /// repeats inside a section, the last occurrence wins.
    #[must_use]
    pub fn build(document: &RawDocument) -> Self {
        let mut model = Self::default();
        let mut scope = Scope::Section(0);

        for (index, line) in document.lines().iter().enumerate() {
            match classify(line) {
                LineKind::Blank | LineKind::Comment => {}
                LineKind::Header(name) => {
                    scope = Scope::Section(model.register(name));
                }
                LineKind::MalformedHeader => {
                    tracing::warn!(
                        line = index + 1,
                        "Malformed section header, ignoring entries until the next header"
                    );
                    scope = Scope::Orphaned;
                }
                LineKind::Entry { key, value, .. } => {
                    if let Scope::Section(section) = scope {
                        model.sections[section].upsert(key, value);
                    }
                }
                LineKind::Garbage => {
                    tracing::trace!(line = index + 1, "Unparseable line preserved verbatim");
                }
            }
        }

        model
    }

    fn register(&mut self, name: &str) -> usize {
        if let Some(index) = self.position(name) {
            return index;
        }
        self.sections.push(Section::new(name));
        self.sections.len() - 1
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Returns a section by name, matched case-insensitively.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.position(name).map(|index| &self.sections[index])
    }

    /// Returns `true` if the section exists. Always `true` for `""`.
    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Looks up one value.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Iterates sections in first-seen order, global section first.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Returns the total number of indexed keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Returns an owned, serializable copy of the model.
    ///
    /// The global section is omitted when it has no keys.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let sections = self
            .sections
            .iter()
            .filter(|s| !(s.name.is_empty() && s.is_empty()))
            .map(|s| SectionSnapshot {
                name: s.name.clone(),
                entries: s
                    .entries()
                    .map(|(key, value)| EntrySnapshot {
                        key: key.to_string(),
                        value: value.to_string(),
                    })
                    .collect(),
            })
            .collect();

        StoreSnapshot { sections }
    }
}

/// Serializable view of a parsed model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    /// Sections in document order.
    pub sections: Vec<SectionSnapshot>,
}

/// Serializable view of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSnapshot {
    /// Section name; empty for the global section.
    pub name: String,
    /// Entries in document order.
    pub entries: Vec<EntrySnapshot>,
}

/// Serializable view of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    /// Key as last written.
    pub key: String,
    /// Value text.
    pub value: String,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
