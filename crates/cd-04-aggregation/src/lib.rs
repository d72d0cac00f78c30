//! # CD-04 Aggregation
//!
//! Censored statistics for configured discovery fields.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): bin assembly and filter conditions, pure
//! - **Ports Layer** (`ports/`):
//!   - `AggregationApi` (inbound): field stats, options, totals, search counts
//!   - `RecordStore` (outbound): read-only grouped/range/prefix counts
//! - **Service Layer** (`service/`): `StatsService`, one storage round trip
//!   per query (bins of a numeric field are counted concurrently)
//! - **Adapters** (`adapters/`): `InMemoryRecordStore` over JSON documents
//!
//! ## Per-datatype behaviour
//!
//! | Datatype | Bins | Missing bucket |
//! |----------|------|----------------|
//! | string | declared enum order, else observed values sorted case-insensitively | records with no value |
//! | number | generated `[floor, ceil)` ranges | total minus records in any bin |
//! | date | every month between first and last observed | absent or non-ISO values |
//!
//! The missing bucket is appended last, and only when its censored count is
//! nonzero.
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: Every emitted count passed through a `Censor`.
//! - **INVARIANT-2**: Derived labels with a censored count of zero are never
//!   emitted; declared labels always are.
//! - **INVARIANT-3**: Month histograms have no gaps between the first and last
//!   observed month.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::InMemoryRecordStore;
pub use domain::{Condition, Groups, Predicate};
pub use error::{AggregationError, InvalidFilterValue, StorageError};
pub use ports::{AggregationApi, RecordStore};
pub use service::StatsService;
