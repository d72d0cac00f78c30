//! # CD-02 Censorship
//!
//! Small-cell suppression for aggregate counts.
//!
//! Any count at or below the effective threshold is rounded down to zero
//! before it leaves the subsystem. A censored zero is indistinguishable from
//! a true zero; nothing signals that suppression happened.
//!
//! ## Components
//!
//! - `DisclosureRules`: the `(count_threshold, max_query_parameters)` pair and
//!   its three tiers (no permissions, configured partial, full permissions)
//! - `CensorshipPolicy`: resolves the effective threshold for a request
//! - `Censor`: applies one threshold to counts and labels
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: `censor.count(n) == 0 || censor.count(n) > threshold`
//! - **INVARIANT-2**: A derived (data-driven) label whose censored count is 0
//!   is dropped, never emitted as `{label, 0}`: its mere presence would prove
//!   the true count lies in `(0, threshold]`.
//! - **INVARIANT-3**: Higher privilege never raises the threshold nor lowers
//!   the allowed parameter count.

pub mod policy;
pub mod rules;

pub use policy::{Censor, CensorshipPolicy, LabelOrigin};
pub use rules::{DisclosureRules, DisclosureTier, UNBOUNDED};
