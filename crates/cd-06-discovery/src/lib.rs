//! # CD-06 Discovery
//!
//! Public, censored discovery over the configured fields of a node.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): request outcomes and response payloads
//! - **Ports Layer** (`ports/`): `DiscoveryApi` (inbound), consumed by an HTTP binding
//! - **Service Layer** (`service`): `DiscoveryService`, wiring the field
//!   registry, the aggregation queriers and the permission composer
//! - **Settings / Metrics**: env-driven `DiscoverySettings`, atomic
//!   `DiscoveryMetrics`
//!
//! ## Request flow
//!
//! ```text
//! caller ──► resolve permissions (one concurrent lookup per data type)
//!        ──► NotConfigured? ──► Forbidden?
//!        ──► one aggregation per field, concurrently, each censored with
//!            the threshold of its own data type
//!        ──► response + disclosure rules of the least-privileged data type
//! ```
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: The registry is loaded once and never mutated; it is
//!   shared by `Arc` into the service at construction.
//! - **INVARIANT-2**: A caller without counts permission on a data type never
//!   receives a number derived from it. Listings drop such fields, overviews
//!   omit their data and totals.
//! - **INVARIANT-3**: Disclosure rules are derived conjunctively over every
//!   implicated data type.
//! - **INVARIANT-4**: Authorization failures resolve to no permissions.

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod settings;

pub use domain::{
    DiscoveryOutcome, EntityCounts, FieldWithData, FieldWithOptions, OutcomeKind, OverviewResponse, SearchCount,
    SearchFieldsResponse, SearchFieldsSection, SearchFilter, NO_PUBLIC_DATA_AVAILABLE, NO_PUBLIC_FIELDS_CONFIGURED,
};
pub use error::{DiscoveryError, ValidationError};
pub use metrics::{DiscoveryMetrics, MetricsSnapshot, Operation};
pub use ports::DiscoveryApi;
pub use service::DiscoveryService;
pub use settings::DiscoverySettings;
