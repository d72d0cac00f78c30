//! Outbound Ports (Driven Ports)
//!
//! The read-only aggregate queries this subsystem needs from the record
//! store. Nothing here writes, locks or opens a transaction.

use async_trait::async_trait;
use cd_03_field_registry::FieldPath;
use shared_types::Collection;

use crate::domain::{Condition, Groups};
use crate::error::StorageError;

/// Aggregate queries over stored records (Driven Port).
///
/// Counts are raw. Censoring happens in this crate's service layer, never in
/// the store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records of `path.collection` grouped by the value at `path`.
    ///
    /// Records without a value are grouped under `None`.
    async fn group_count(&self, path: &FieldPath) -> Result<Groups, StorageError>;

    /// Records whose numeric value at `path` lies in `[floor, ceil)`.
    async fn count_in_range(
        &self,
        path: &FieldPath,
        floor: Option<i64>,
        ceil: Option<i64>,
    ) -> Result<u64, StorageError>;

    /// Total records in a collection.
    async fn count_records(&self, collection: Collection) -> Result<u64, StorageError>;

    /// Records grouped by the first `len` characters of the string at `path`.
    async fn group_count_by_prefix(&self, path: &FieldPath, len: usize) -> Result<Groups, StorageError>;

    /// Lexicographically first and last distinct values at `path`, if any.
    async fn distinct_bounds(&self, path: &FieldPath) -> Result<Option<(String, String)>, StorageError>;

    /// Records of `collection` satisfying every condition.
    async fn count_matching(
        &self,
        collection: Collection,
        conditions: &[Condition],
    ) -> Result<u64, StorageError>;
}
