//! # Shared Types Crate
//!
//! This crate contains the entities that cross subsystem boundaries in the
//! discovery workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Data types, collections, callers and
//!   permission shapes are defined once, here.
//! - **Per-request values**: `DataTypePermission` and `Caller` are built fresh
//!   for every request and never persisted.
//! - **Censored output only**: `Bin` is the only aggregate shape that leaves
//!   the subsystem, and it is always produced after censorship.

pub mod entities;
pub mod errors;
pub mod security;

pub use entities::*;
pub use errors::*;
pub use security::*;
