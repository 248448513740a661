//! harqbuf - transmit soft-buffer pool for HARQ retransmission state.
//!
//! A shared downlink channel's forward-error-correction retransmission state
//! is a scarce, fixed-size resource: only a bounded number of in-flight
//! contexts exist at once, yet each must survive across transmission
//! opportunities until acknowledged or timed out. This crate provides the
//! pool that manages those contexts.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          harqbuf                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  scheduler ──reserve(slot, id, codeblocks)──┐               │
//! │                                             ▼               │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │                TxBufferPool (pool/)                  │   │
//! │  │   free ⊎ reserved index partition, one mutex        │   │
//! │  │   [SoftBuffer] [SoftBuffer] [SoftBuffer] ...        │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │                                             ▲               │
//! │  timing driver ──run_slot(slot)─────────────┘               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (BufferId, Slot, config, errors)
//! - [`pool`] - The pool core, soft buffers, handles, statistics
//!
//! # Quick start
//! ```
//! use harqbuf::{BufferId, Slot, TxBufferPool, TxBufferPoolConfig};
//!
//! let pool = TxBufferPool::new(TxBufferPoolConfig {
//!     nof_buffers: 16,
//!     max_nof_codeblocks: 8,
//!     expire_timeout_slots: 10,
//! })
//! .unwrap();
//!
//! // One transmission opportunity:
//! let now = Slot::new(0);
//! let buffer = pool.reserve(now, BufferId::new(0x4601, 0), 4);
//! if buffer.is_valid() {
//!     buffer.record_transmission(0);
//! }
//!
//! // Once per slot, from the timing driver:
//! pool.run_slot(now + 1);
//! ```

pub mod common;
pub mod pool;

// Re-export commonly used items at crate root for convenience
pub use common::config::MAX_NOF_HARQ_PROCESSES;
pub use common::{BufferId, Error, ReserveFailureReason, Result, Slot, TxBufferPoolConfig};
pub use pool::{CapacityExceeded, PoolStats, SoftBuffer, StatsSnapshot, TxBufferPool, UniqueTxBuffer};
