//! Error types for harqbuf.
//!
//! Only configuration problems are `Error`s: they are fatal and the pool
//! refuses to be built. A failed reservation is an expected real-time
//! condition, not an error - it surfaces as an invalid
//! [`UniqueTxBuffer`](crate::pool::UniqueTxBuffer) plus a diagnostic event
//! tagged with a [`ReserveFailureReason`].

use std::fmt;

use thiserror::Error;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal construction-time errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The pool was configured with zero buffers.
    #[error("pool must contain at least one buffer")]
    EmptyPool,

    /// The expiry timeout was configured as zero slots.
    #[error("expiry timeout must be at least one slot")]
    InvalidTimeout,

    /// Buffers were configured to hold zero codeblocks.
    #[error("buffers must hold at least one codeblock")]
    InvalidCodeblockCapacity,
}

/// Machine-readable reason a reservation returned an invalid handle.
///
/// Carried by the diagnostic event emitted on every failure path and counted
/// in [`PoolStats`](crate::pool::PoolStats). Non-fatal by definition: the
/// caller skips this transmission opportunity and tries again later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveFailureReason {
    /// No reserved buffer matched the identifier and the free set was empty.
    PoolExhausted,

    /// A buffer (matched or fresh) rejected the requested codeblock count.
    RebindRejected,
}

impl fmt::Display for ReserveFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReserveFailureReason::PoolExhausted => {
                write!(f, "insufficient buffers in the pool")
            }
            ReserveFailureReason::RebindRejected => {
                write!(f, "codeblock count exceeds buffer capacity")
            }
        }
    }
}
