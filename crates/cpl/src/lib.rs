//! Core Provenance Library.
//!
//! Provides object identity and create/lookup semantics over a
//! [`ProvenanceEngine`]. This is the main entry point for applications that
//! record provenance.
//!
//! - [`Cpl`] creates objects and resolves natural keys
//!   `(originator, name, type)` to objects.
//! - [`CplObject`] is a process-local handle: an [`ObjectId`] plus a cache of
//!   the object's descriptive attributes. Handles compare and hash by id
//!   alone and own nothing on the engine side.
//!
//! ```
//! use cpl::Cpl;
//!
//! let cpl = Cpl::in_memory();
//! let file = cpl.create_object("app1", "input.csv", "file", None).unwrap();
//! let found = cpl.try_lookup_object("app1", "input.csv", "file").unwrap();
//! assert_eq!(found, Some(file));
//! assert!(cpl.try_lookup_object("app1", "missing.csv", "file").unwrap().is_none());
//! ```

pub mod attribute;
pub mod client;
pub mod config;
pub mod error;
pub mod object;

pub use attribute::{Attribute, ObjectKey};
pub use client::Cpl;
pub use config::CplConfig;
pub use error::{CplError, CplResult};
pub use object::CplObject;

// Re-export key types
pub use cpl_engine::{EngineConfig, EngineError, EngineResult, InMemoryEngine, ProvenanceEngine};
pub use cpl_types::{AncestryEntry, DependencyKind, Direction, ObjectId, ObjectInfo, ReturnCode};
