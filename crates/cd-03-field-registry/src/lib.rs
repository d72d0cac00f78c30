//! # CD-03 Field Registry
//!
//! The discovery configuration: which fields are public, how they map onto
//! the storage collaborator, how they are binned, and the configured
//! disclosure rules.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure types, no I/O
//!   - `document`: the raw JSON shape
//!   - `path`: typed `(collection, segments)` field paths
//!   - `schema`: the `FieldSchema` port mappings are checked against
//!   - `descriptor`: validated field descriptors
//! - **Registry** (`registry`): load-time validation and lookups
//! - **Adapters** (`adapters/`): loading the document from disk
//!
//! ## Lifecycle
//!
//! The registry is built once at process start and never mutated. Callers
//! share it behind an `Arc`. A missing or empty document is not an error: it
//! leaves discovery unconfigured.
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: Every field's mapping parses to a known collection and
//!   is accepted by the storage schema.
//! - **INVARIANT-2**: Every number field's bins are generated successfully at
//!   load. Every date field bins by month.
//! - **INVARIANT-3**: Every field referenced by an overview chart or a search
//!   section exists, and searchable fields filter individuals.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod registry;

pub use adapters::load_registry;
pub use domain::{
    DiscoveryDocument, FieldDatatype, FieldDescriptor, FieldKind, FieldPath, FieldSchema,
    OverviewChart, OverviewSection, PermissiveSchema, RawField, SearchSection, StaticSchema,
    EXTRA_PROPERTIES,
};
pub use error::ConfigurationError;
pub use registry::{data_types_of, FieldRegistry};
