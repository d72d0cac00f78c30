//! Adapters for the Field Registry subsystem.

pub mod file;

pub use file::load_registry;
