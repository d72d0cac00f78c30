//! Error types for the Permissions subsystem

use std::time::Duration;
use thiserror::Error;

/// Failures talking to the authorization service.
///
/// None of these reach callers: the composer logs them and treats the
/// affected data type as having no permissions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthzError {
    #[error("Authorization service unavailable: {0}")]
    Unavailable(String),

    #[error("Authorization service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Authorization service answered {got} decisions for {expected} resources")]
    MalformedAnswer { expected: usize, got: usize },
}
