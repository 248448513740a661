//! Transmit soft-buffer pool.
//!
//! The pool is the scarce-resource manager of the downlink HARQ transmit
//! path: a fixed arena of soft buffers, reserved per identifier and recycled
//! by a once-per-slot sweep.
//!
//! # Components
//! - [`TxBufferPool`] - the reservation and recycling core
//! - [`SoftBuffer`] - one arena slot holding per-codeblock combining state
//! - [`UniqueTxBuffer`] - handle returned on successful reservation
//! - [`PoolStats`] - reservation and recycling statistics

mod handle;
mod soft_buffer;
mod stats;
mod tx_buffer_pool;

pub use handle::UniqueTxBuffer;
pub use soft_buffer::{CapacityExceeded, SoftBuffer};
pub use stats::{PoolStats, StatsSnapshot};
pub use tx_buffer_pool::TxBufferPool;
