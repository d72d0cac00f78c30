//! Domain layer for the Field Registry subsystem.

pub mod descriptor;
pub mod document;
pub mod path;
pub mod schema;

pub use descriptor::{FieldDescriptor, FieldKind};
pub use document::{
    DiscoveryDocument, FieldDatatype, OverviewChart, OverviewSection, RawField, SearchSection,
};
pub use path::{FieldPath, PathParseError, EXTRA_PROPERTIES, PATH_SEPARATOR};
pub use schema::{FieldSchema, PermissiveSchema, StaticSchema};
