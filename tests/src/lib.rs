//! # Cohort Discovery Test Suite
//!
//! Unified test crate for behaviour that spans subsystems.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared discovery document and record cohort
//! └── integration/
//!     ├── scenarios.rs  # Binning, censorship, permission and gap-fill scenarios
//!     └── flows.rs      # End-to-end invariants and fail-closed behaviour
//!
//! tests/benches/
//! └── discovery_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cd-tests
//!
//! # By category
//! cargo test -p cd-tests integration::scenarios
//! cargo test -p cd-tests integration::flows
//!
//! # Benchmarks
//! cargo bench -p cd-tests
//! ```

pub mod fixtures;
pub mod integration;
