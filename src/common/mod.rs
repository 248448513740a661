//! Common types and utilities shared across harqbuf.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration (pool sizing, expiry timeout)
//! - Error types and reservation failure reasons
//! - Identifiers (BufferId) and slot-time arithmetic (Slot)

pub mod config;
pub mod error;
mod ident;
mod slot;

pub use config::TxBufferPoolConfig;
pub use error::{Error, ReserveFailureReason, Result};
pub use ident::BufferId;
pub use slot::Slot;
