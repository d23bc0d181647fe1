// crates/confgate-core/src/engine.rs
// ============================================================================
// Module: Schema Validation Engine
// Description: Two-level matching of document names against schema entries.
// Purpose: Decide whether a document satisfies a schema, fail-closed.
// Dependencies: confgate-logic, crate::{audit, config, error, schema, source, trace}
// ============================================================================

//! ## Overview
//! One matcher serves both levels. For each name in document order it asks
//! the required entries, then the optional entries, for the first key
//! validator that accepts; the claiming entry's value is then checked (a
//! section schema at the top level, a value validator at the leaves). Names
//! nobody claims are collected. Afterwards the node is satisfied when every
//! required entry claimed something and every key validator's teardown holds.
//!
//! # Invariants
//! - Each name is claimed by at most one entry; required entries are asked first.
//! - Predicate errors count as rejection at every step and never escape as
//!   panics.
//! - The first violation ends the run. A failure while descending into a
//!   section surfaces before the coverage checks of the enclosing level.
//! - Size limits apply only when configured with
//!   [`ConfigSchemaValidator::with_limits`].
//! - Key validator pass state is created fresh for every node visit; the
//!   schema itself is never mutated, so one validator can serve concurrent
//!   runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use confgate_logic::PassState;
use confgate_logic::Validator;
use confgate_logic::safe_call;

use crate::audit::ValidationAuditEvent;
use crate::audit::ValidationAuditSink;
use crate::config::ValidationLimits;
use crate::error::ValidationError;
use crate::schema::ConfigSchema;
use crate::schema::SchemaNode;
use crate::schema::SectionValidator;
use crate::schema::ValidatorItem;
use crate::source::ConfigSource;
use crate::trace::EntryKind;
use crate::trace::NoopTrace;
use crate::trace::Scope;
use crate::trace::ValidationTrace;

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Validates documents against a borrowed [`ConfigSchema`]
pub struct ConfigSchemaValidator<'s> {
    /// Schema to enforce.
    schema: &'s ConfigSchema,
    /// Size limits checked before matching; unbounded when unset.
    limits: Option<ValidationLimits>,
    /// Optional audit destination.
    audit: Option<&'s dyn ValidationAuditSink>,
}

impl<'s> ConfigSchemaValidator<'s> {
    /// Creates a validator with no size limits and no audit sink
    #[must_use]
    pub const fn new(schema: &'s ConfigSchema) -> Self {
        Self {
            schema,
            limits: None,
            audit: None,
        }
    }

    /// Enforces `limits` before matching
    #[must_use]
    pub const fn with_limits(mut self, limits: ValidationLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Emits one audit event per run to `sink`
    #[must_use]
    pub fn with_audit(mut self, sink: &'s dyn ValidationAuditSink) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Returns the enforced limits, if any
    #[must_use]
    pub const fn limits(&self) -> Option<&ValidationLimits> {
        self.limits.as_ref()
    }

    /// Validates a document
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate<S>(&self, source: &S) -> Result<(), ValidationError>
    where
        S: ConfigSource + ?Sized,
    {
        self.validate_with_trace(source, &mut NoopTrace)
    }

    /// Validates a document, reporting progress to `trace`
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate_with_trace<S, T>(&self, source: &S, trace: &mut T) -> Result<(), ValidationError>
    where
        S: ConfigSource + ?Sized,
        T: ValidationTrace + ?Sized,
    {
        let sections = source.section_names();
        let result = self.validate_sections(source, &sections, trace);
        if let Some(sink) = self.audit {
            sink.record(&ValidationAuditEvent::from_result(&result, sections.len()));
        }
        result
    }

    /// Matches section names against section entries and descends into each.
    fn validate_sections<S, T>(
        &self,
        source: &S,
        sections: &[&str],
        trace: &mut T,
    ) -> Result<(), ValidationError>
    where
        S: ConfigSource + ?Sized,
        T: ValidationTrace + ?Sized,
    {
        if let Some(limits) = &self.limits {
            limits.check_sections(sections.len())?;
            for name in sections {
                limits.check_name(None, name)?;
            }
        }

        let node = self.schema.node();
        let outcome = match_items(
            sections.iter().map(|name| (*name, ())),
            node,
            Scope::Config,
            trace,
            |trace, name, (), section| self.validate_section(source, name, section, trace),
        )?;

        if !outcome.satisfied {
            return Err(ValidationError::MissingRequiredSections);
        }
        if node.rejects_unknown() && !outcome.unexpected.is_empty() {
            return Err(ValidationError::UnexpectedSections {
                names: outcome.unexpected,
            });
        }
        Ok(())
    }

    /// Matches the keys of one section against its value entries.
    fn validate_section<S, T>(
        &self,
        source: &S,
        name: &str,
        section: &SectionValidator,
        trace: &mut T,
    ) -> Result<(), ValidationError>
    where
        S: ConfigSource + ?Sized,
        T: ValidationTrace + ?Sized,
    {
        let entries = source.section_entries(name);
        if let Some(limits) = &self.limits {
            limits.check_values(name, entries.len())?;
            for (key, _) in &entries {
                limits.check_name(Some(name), key)?;
            }
        }

        let node = section.node();
        let outcome = match_items(
            entries.iter().map(|(key, raw)| (*key, &**raw)),
            node,
            Scope::Section(name),
            trace,
            |trace, key, raw, validator| check_value(name, key, raw, validator, trace),
        )?;

        if !outcome.satisfied {
            return Err(ValidationError::MissingRequiredValues {
                section: name.to_string(),
            });
        }
        if node.rejects_unknown() && !outcome.unexpected.is_empty() {
            return Err(ValidationError::UnexpectedValues {
                section: name.to_string(),
                names: outcome.unexpected,
            });
        }
        Ok(())
    }
}

/// Validates a document with no size limits and no audit sink
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate<S>(schema: &ConfigSchema, source: &S) -> Result<(), ValidationError>
where
    S: ConfigSource + ?Sized,
{
    ConfigSchemaValidator::new(schema).validate(source)
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Result of matching one level's names.
struct MatchOutcome {
    /// Every required entry claimed a name and every key teardown held.
    satisfied: bool,
    /// Unclaimed names in document order.
    unexpected: Vec<String>,
}

/// Runs the shared matching algorithm over one level.
///
/// `descend` is invoked for each claimed name with the claiming entry's value;
/// its first error aborts the level.
fn match_items<'a, C, V, I, T, D>(
    items: I,
    node: &SchemaNode<V>,
    scope: Scope<'_>,
    trace: &mut T,
    mut descend: D,
) -> Result<MatchOutcome, ValidationError>
where
    I: IntoIterator<Item = (&'a str, C)>,
    T: ValidationTrace + ?Sized,
    D: FnMut(&mut T, &'a str, C, &V) -> Result<(), ValidationError>,
{
    let mut required_states = setup_states(node.required());
    let mut optional_states = setup_states(node.optional());
    let mut covered = vec![false; node.required().len()];
    let mut unexpected = Vec::new();

    for (name, content) in items {
        if let Some((index, item)) = first_match(node.required(), &mut required_states, name) {
            if let Some(flag) = covered.get_mut(index) {
                *flag = true;
            }
            trace.on_entry_matched(scope, name, EntryKind::Required(index));
            descend(trace, name, content, &item.value)?;
        } else if let Some((index, item)) =
            first_match(node.optional(), &mut optional_states, name)
        {
            trace.on_entry_matched(scope, name, EntryKind::Optional(index));
            descend(trace, name, content, &item.value)?;
        } else {
            trace.on_unexpected(scope, name);
            unexpected.push(name.to_string());
        }
    }

    let all_covered = covered.iter().all(|flag| *flag);
    let all_torn_down = teardown_all(node.required(), &required_states)
        && teardown_all(node.optional(), &optional_states);
    let satisfied = all_covered && all_torn_down;
    trace.on_node_finished(scope, satisfied);
    Ok(MatchOutcome {
        satisfied,
        unexpected,
    })
}

/// Starts a pass on every key validator of an entry list.
fn setup_states<V>(items: &[ValidatorItem<V>]) -> Vec<PassState> {
    items.iter().map(|item| item.key.setup()).collect()
}

/// Returns the first entry whose key validator accepts `name`.
///
/// Entries after the match are not consulted, so their counters are not
/// advanced by this name.
fn first_match<'n, V>(
    items: &'n [ValidatorItem<V>],
    states: &mut [PassState],
    name: &str,
) -> Option<(usize, &'n ValidatorItem<V>)> {
    let index = items
        .iter()
        .zip(states.iter_mut())
        .position(|(item, state)| safe_call(item.key.call(state, name)))?;
    items.get(index).map(|item| (index, item))
}

/// Ends the pass on every key validator of an entry list.
fn teardown_all<V>(items: &[ValidatorItem<V>], states: &[PassState]) -> bool {
    items.iter().zip(states).all(|(item, state)| item.key.teardown(state))
}

/// Checks one raw value with a fresh pass of its value validator.
fn check_value<T>(
    section: &str,
    key: &str,
    raw: &str,
    validator: &Validator,
    trace: &mut T,
) -> Result<(), ValidationError>
where
    T: ValidationTrace + ?Sized,
{
    let mut state = validator.setup();
    let verdict = validator.call(&mut state, raw);
    trace.on_value_checked(section, key, matches!(verdict, Ok(true)));
    let source = match verdict {
        Ok(true) => return Ok(()),
        Ok(false) => None,
        Err(err) => Some(err),
    };
    Err(ValidationError::ValueValidationFailed {
        section: section.to_string(),
        key: key.to_string(),
        value: raw.to_string(),
        validator: validator.to_string(),
        source,
    })
}
