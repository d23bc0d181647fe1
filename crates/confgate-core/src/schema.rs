// crates/confgate-core/src/schema.rs
// ============================================================================
// Module: Config Schema Model
// Description: Declarative two-level schema for sectioned key/value documents.
// Purpose: Hold required/optional entries and unknown-name policy per level.
// Dependencies: confgate-logic
// ============================================================================

//! ## Overview
//! A [`ConfigSchema`] lists section entries; each section entry carries a
//! [`SectionValidator`] listing value entries. Both levels share
//! [`SchemaNode`]: ordered required and optional [`ValidatorItem`]s plus a
//! flag that rejects names no entry claims.
//!
//! Entry order is declaration order. It decides which entry claims a name
//! when several could (first match wins) and is otherwise only diagnostic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use confgate_logic::Validator;

// ============================================================================
// SECTION: Schema Node
// ============================================================================

/// One schema entry: a key validator paired with a value validator
///
/// # Invariants
/// - `key` tests names (section names or value keys).
/// - `value` tests or recurses into the content behind a matched name.
#[derive(Debug, Clone)]
pub struct ValidatorItem<V> {
    /// Validator applied to names.
    pub key: Validator,
    /// Validator applied to matched content.
    pub value: V,
}

/// Required and optional entries for one level of the document
#[derive(Debug, Clone)]
pub struct SchemaNode<V> {
    /// Entries that must each claim at least one name.
    required: Vec<ValidatorItem<V>>,
    /// Entries that may claim names.
    optional: Vec<ValidatorItem<V>>,
    /// Whether unclaimed names fail validation.
    reject_unknown: bool,
}

impl<V> SchemaNode<V> {
    /// Creates an empty node that tolerates unknown names
    #[must_use]
    pub const fn new() -> Self {
        Self {
            required: Vec::new(),
            optional: Vec::new(),
            reject_unknown: false,
        }
    }

    /// Appends an entry to the required or optional list
    pub fn push(&mut self, key: Validator, value: V, required: bool) {
        let item = ValidatorItem {
            key,
            value,
        };
        if required {
            self.required.push(item);
        } else {
            self.optional.push(item);
        }
    }

    /// Returns required entries in declaration order
    #[must_use]
    pub fn required(&self) -> &[ValidatorItem<V>] {
        &self.required
    }

    /// Returns optional entries in declaration order
    #[must_use]
    pub fn optional(&self) -> &[ValidatorItem<V>] {
        &self.optional
    }

    /// Returns whether unclaimed names fail validation
    #[must_use]
    pub const fn rejects_unknown(&self) -> bool {
        self.reject_unknown
    }

    /// Makes unclaimed names fail validation
    pub const fn set_reject_unknown(&mut self) {
        self.reject_unknown = true;
    }

    /// Returns the total number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    /// Returns true when no entries are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for SchemaNode<V> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SECTION: Section Validator
// ============================================================================

/// Schema for the values inside one section
#[derive(Debug, Clone, Default)]
pub struct SectionValidator {
    /// Value entries.
    node: SchemaNode<Validator>,
}

impl SectionValidator {
    /// Creates a section schema with no value entries
    #[must_use]
    pub const fn new() -> Self {
        Self {
            node: SchemaNode::new(),
        }
    }

    /// Declares a value entry
    ///
    /// Bare strings for `key` or `value` become exact-match validators.
    #[must_use]
    pub fn declare_value(
        mut self,
        key: impl Into<Validator>,
        required: bool,
        value: impl Into<Validator>,
    ) -> Self {
        self.node.push(key.into(), value.into(), required);
        self
    }

    /// Declares a required value that may hold anything
    #[must_use]
    pub fn value(self, key: impl Into<Validator>) -> Self {
        self.declare_value(key, true, Validator::Any)
    }

    /// Declares an optional value that may hold anything
    #[must_use]
    pub fn optional_value(self, key: impl Into<Validator>) -> Self {
        self.declare_value(key, false, Validator::Any)
    }

    /// Rejects keys no entry claims
    #[must_use]
    pub const fn reject_unknown(mut self) -> Self {
        self.node.set_reject_unknown();
        self
    }

    /// Returns the underlying node
    #[must_use]
    pub const fn node(&self) -> &SchemaNode<Validator> {
        &self.node
    }
}

// ============================================================================
// SECTION: Config Schema
// ============================================================================

/// Root schema: section entries for a whole document
#[derive(Debug, Clone, Default)]
pub struct ConfigSchema {
    /// Section entries.
    node: SchemaNode<SectionValidator>,
}

impl ConfigSchema {
    /// Creates an empty schema
    #[must_use]
    pub const fn new() -> Self {
        Self {
            node: SchemaNode::new(),
        }
    }

    /// Starts declaring a section; call [`SectionBuilder::finish`] to attach it
    pub fn declare_section(
        &mut self,
        key: impl Into<Validator>,
        required: bool,
    ) -> SectionBuilder<'_> {
        SectionBuilder {
            schema: self,
            key: key.into(),
            required,
            section: SectionValidator::new(),
        }
    }

    /// Attaches a prebuilt section schema
    pub fn add_section(
        &mut self,
        key: impl Into<Validator>,
        required: bool,
        section: SectionValidator,
    ) -> &mut Self {
        self.node.push(key.into(), section, required);
        self
    }

    /// Rejects section names no entry claims
    pub const fn reject_unknown(&mut self) -> &mut Self {
        self.node.set_reject_unknown();
        self
    }

    /// Returns the underlying node
    #[must_use]
    pub const fn node(&self) -> &SchemaNode<SectionValidator> {
        &self.node
    }
}

// ============================================================================
// SECTION: Section Builder
// ============================================================================

/// Section under construction, attached to its schema by [`Self::finish`]
#[must_use = "a section is only attached to the schema by `finish`"]
pub struct SectionBuilder<'s> {
    /// Schema receiving the section.
    schema: &'s mut ConfigSchema,
    /// Validator for the section name.
    key: Validator,
    /// Whether the section entry is required.
    required: bool,
    /// Value entries collected so far.
    section: SectionValidator,
}

impl<'s> SectionBuilder<'s> {
    /// Declares a value entry
    pub fn declare_value(
        mut self,
        key: impl Into<Validator>,
        required: bool,
        value: impl Into<Validator>,
    ) -> Self {
        self.section = self.section.declare_value(key, required, value);
        self
    }

    /// Declares a required value that may hold anything
    pub fn value(self, key: impl Into<Validator>) -> Self {
        self.declare_value(key, true, Validator::Any)
    }

    /// Declares an optional value that may hold anything
    pub fn optional_value(self, key: impl Into<Validator>) -> Self {
        self.declare_value(key, false, Validator::Any)
    }

    /// Rejects keys no entry of this section claims
    pub fn reject_unknown(mut self) -> Self {
        self.section = self.section.reject_unknown();
        self
    }

    /// Attaches the section to the schema
    pub fn finish(self) -> &'s mut ConfigSchema {
        let Self {
            schema,
            key,
            required,
            section,
        } = self;
        schema.add_section(key, required, section)
    }
}
