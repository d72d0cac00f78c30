//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use shared_types::{Caller, DataType};
use std::collections::BTreeSet;

use crate::domain::DataTypePermissions;

/// Resolves what a caller may see, per data type (Driving Port).
#[async_trait]
pub trait PermissionApi: Send + Sync {
    /// Permissions for every data type in `data_types`.
    ///
    /// Never fails: a data type whose lookup fails resolves to no permissions.
    async fn resolve(&self, caller: &Caller, data_types: &BTreeSet<DataType>) -> DataTypePermissions;
}
