// vim: tw=80
//! Error taxonomy: configuration mistakes, configured faults, and assertion
//! failures.
//!
//! Nothing here is raised during ordinary dispatch.  An unmatched call is
//! not an error, and dummy-production failures degrade silently to a
//! default value.

use thiserror::Error;

/// A malformed configuration, rejected at registration time.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The constraint list cannot line up with the member's declared
    /// parameters.
    #[error("{member}: expected {expected} argument constraints but got {actual}")]
    ConstraintCount {
        member: String,
        expected: usize,
        actual: usize,
    },
}

/// The failure a rule was explicitly configured to raise.  It propagates
/// from dispatch unchanged; ref/out write-back is skipped when it fires.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct Fault {
    pub message: String,
}

/// A failed verification.  `Display` yields the exact diagnostic text,
/// suitable for asserting on literally.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{diagnostic}")]
pub struct AssertionFailure {
    pub diagnostic: String,
}
