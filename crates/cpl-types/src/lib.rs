//! Foundation types for the Core Provenance Library (CPL).
//!
//! This crate provides the identity and record types shared by the engine
//! interface and the client. Every other CPL crate depends on `cpl-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`] — 128-bit engine-assigned object identifier
//! - [`ReturnCode`] — Engine result code (success, not-found, failures)
//! - [`ObjectInfo`] — Full descriptive record of a provenance object
//! - [`AncestryEntry`] — One dependency edge as seen from a queried object

pub mod code;
pub mod info;
pub mod object;

pub use code::ReturnCode;
pub use info::{AncestryEntry, DependencyKind, Direction, ObjectInfo};
pub use object::ObjectId;
