//! Provenance engine interface for the Core Provenance Library.
//!
//! The engine is the durable store that owns object state: it mints object
//! identifiers, resolves natural keys, records dependency edges, and answers
//! ancestry queries. The client layer reaches it only through the
//! [`ProvenanceEngine`] trait.
//!
//! # Engines
//!
//! - [`InMemoryEngine`] -- `HashMap`-based engine for tests and embedding
//!
//! # Design Rules
//!
//! 1. Identifiers are assigned by the engine only, never by callers.
//! 2. The null identifier is never assigned to a real object.
//! 3. A single create or lookup call is atomic.
//! 4. Every failure carries a [`ReturnCode`](cpl_types::ReturnCode).

pub mod config;
pub mod error;
pub mod memory;
pub mod traits;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use memory::InMemoryEngine;
pub use traits::ProvenanceEngine;
