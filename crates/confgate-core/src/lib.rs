// crates/confgate-core/src/lib.rs
// ============================================================================
// Module: Confgate Core Root
// Description: Public API surface for schema validation of sectioned documents.
// Purpose: Wire together schema, sources, engine, configuration, and audit.
// Dependencies: crate::{audit, config, engine, error, schema, source, trace}
// ============================================================================

//! ## Overview
//! `confgate-core` checks sectioned key/value documents (TOML tables, the
//! in-memory [`ConfigDocument`], or anything implementing [`ConfigSource`]) against a
//! two-level [`ConfigSchema`]. Section names and value keys are claimed by
//! schema entries through `confgate-logic` validators; claimed values are
//! checked by value validators. Validation fails closed on the first
//! violation with a [`ValidationError`].
//!
//! ```
//! use confgate_core::ConfigDocument;
//! use confgate_core::ConfigSchema;
//! use confgate_core::Validator;
//! use confgate_core::validate;
//!
//! let mut schema = ConfigSchema::new();
//! schema
//!     .declare_section("server", true)
//!     .declare_value("port", true, Validator::non_negative())
//!     .optional_value("host")
//!     .reject_unknown()
//!     .finish();
//!
//! let doc = ConfigDocument::new().with_section("server", [("port", "8080")]);
//! assert!(validate(&schema, &doc).is_ok());
//!
//! let bad = ConfigDocument::new().with_section("server", [("port", "-1")]);
//! assert!(validate(&schema, &bad).is_err());
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod schema;
pub mod source;
pub mod trace;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ValidationAuditEvent;
pub use audit::ValidationAuditEventParams;
pub use audit::ValidationAuditSink;
pub use audit::ValidationOutcome;
pub use config::AuditConfig;
pub use config::AuditSinkKind;
pub use config::ValidationConfig;
pub use config::ValidationConfigError;
pub use config::ValidationLimits;
pub use confgate_logic::CountCheck;
pub use confgate_logic::PredicateError;
pub use confgate_logic::Validator;
pub use engine::ConfigSchemaValidator;
pub use engine::validate;
pub use error::LimitKind;
pub use error::ValidationError;
pub use schema::ConfigSchema;
pub use schema::SchemaNode;
pub use schema::SectionBuilder;
pub use schema::SectionValidator;
pub use schema::ValidatorItem;
pub use source::ConfigDocument;
pub use source::ConfigSource;
pub use trace::EntryKind;
pub use trace::NoopTrace;
pub use trace::RecordingTrace;
pub use trace::Scope;
pub use trace::TraceEvent;
pub use trace::ValidationTrace;
