//! Transmit buffer pool - the core reservation and recycling layer.
//!
//! The [`TxBufferPool`] owns a fixed arena of [`SoftBuffer`]s and keeps the
//! index partition between the *free* and *reserved* sets behind one
//! exclusive lock. Reservation requests resolve by identifier match first,
//! fresh allocation second; recycling is driven purely by the once-per-slot
//! sweep.

use std::collections::VecDeque;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::common::{BufferId, ReserveFailureReason, Result, Slot, TxBufferPoolConfig};
use crate::pool::{PoolStats, SoftBuffer, UniqueTxBuffer};

/// The free/reserved index partition.
///
/// Invariant: `free` and `reserved` are disjoint and their union is exactly
/// `0..buffers.len()` at every observation point. Both reservation entry
/// points and the sweep mutate the partition only while holding the one
/// mutex wrapping this struct.
#[derive(Debug)]
struct PoolState {
    /// Free buffer indices, picked last-in-first-out for locality.
    free: Vec<usize>,

    /// Reserved buffer indices in sweep order (front is visited first).
    reserved: VecDeque<usize>,
}

/// Pool of transmit soft buffers for downlink HARQ retransmission state.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │                        TxBufferPool                         │
/// │  ┌────────────────────────────────────────────────────┐     │
/// │  │          buffers: Vec<Arc<SoftBuffer>>             │     │
/// │  │     [Buf0] [Buf1] [Buf2] ... (fixed at startup)    │     │
/// │  └────────────────────────────────────────────────────┘     │
/// │  ┌──────────────────────────────┐  ┌───────────────┐        │
/// │  │  Mutex<PoolState>            │  │  PoolStats    │        │
/// │  │  free: Vec / reserved: Deque │  │  (atomics)    │        │
/// │  └──────────────────────────────┘  └───────────────┘        │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// # Thread safety
/// `reserve`, `reserve_one_shot` and `run_slot` may be called from different
/// threads; each serializes on the single pool mutex, so every call observes
/// a consistent partition. No call waits on anything but that mutex and the
/// work under it is O(pool size), so no entry point blocks unboundedly.
///
/// # Usage
/// ```
/// use harqbuf::{BufferId, Slot, TxBufferPool, TxBufferPoolConfig};
///
/// let pool = TxBufferPool::new(TxBufferPoolConfig {
///     nof_buffers: 8,
///     max_nof_codeblocks: 4,
///     expire_timeout_slots: 10,
/// })
/// .unwrap();
///
/// let now = Slot::new(100);
/// let handle = pool.reserve(now, BufferId::new(0x4601, 0), 2);
/// assert!(handle.is_valid());
///
/// // Timing driver, once per slot:
/// pool.run_slot(now + 1);
/// ```
#[derive(Debug)]
pub struct TxBufferPool {
    /// Fixed arena of soft buffers allocated at construction.
    buffers: Vec<Arc<SoftBuffer>>,

    /// Free/reserved partition, guarded by the pool-wide exclusive lock.
    state: Mutex<PoolState>,

    /// Reservation lifetime added to `now` on every keyed reservation.
    expire_timeout_slots: u32,

    /// Reservation and recycling counters.
    stats: PoolStats,
}

impl TxBufferPool {
    /// Create a pool from a validated configuration.
    ///
    /// All buffer storage is allocated here, once, for the pool's lifetime.
    ///
    /// # Errors
    /// Returns the corresponding [`Error`](crate::common::Error) if the
    /// configuration names zero buffers, zero codeblocks per buffer, or a
    /// zero expiry timeout.
    pub fn new(config: TxBufferPoolConfig) -> Result<Self> {
        config.validate()?;

        let buffers: Vec<Arc<SoftBuffer>> = (0..config.nof_buffers)
            .map(|_| SoftBuffer::new(config.max_nof_codeblocks))
            .collect();

        // All indices start free, in LIFO order.
        let free: Vec<usize> = (0..config.nof_buffers).collect();

        Ok(Self {
            buffers,
            state: Mutex::new(PoolState {
                free,
                reserved: VecDeque::with_capacity(config.nof_buffers),
            }),
            expire_timeout_slots: config.expire_timeout_slots,
            stats: PoolStats::new(),
        })
    }

    // ========================================================================
    // Public API: Reservation
    // ========================================================================

    /// Reserve a buffer for identifier `id` at slot `now`.
    ///
    /// A buffer already reserved for `id` is re-reserved in place, extending
    /// its expiry to `now + expire_timeout_slots` and preserving its retained
    /// combining state; otherwise a free buffer is bound fresh. Returns an
    /// invalid handle when the pool is exhausted or the codeblock count is
    /// rejected - the caller skips this transmission opportunity; the pool
    /// partition and every unrelated binding are left exactly as they were.
    pub fn reserve(&self, now: Slot, id: BufferId, nof_codeblocks: usize) -> UniqueTxBuffer {
        let expire = now + self.expire_timeout_slots;
        let mut state = self.state.lock();

        // Identifier match takes precedence over a fresh allocation.
        for &index in state.reserved.iter() {
            let buffer = &self.buffers[index];
            if !buffer.matches(id) {
                continue;
            }

            return match buffer.reserve(id, expire, nof_codeblocks) {
                Ok(()) => {
                    self.stats.reservations.fetch_add(1, Ordering::Relaxed);
                    self.stats.reuses.fetch_add(1, Ordering::Relaxed);
                    UniqueTxBuffer::new(Arc::clone(buffer))
                }
                Err(cause) => {
                    self.reserve_failed(now, id, ReserveFailureReason::RebindRejected, &cause);
                    UniqueTxBuffer::invalid()
                }
            };
        }

        self.reserve_fresh(&mut state, now, id, expire, nof_codeblocks)
    }

    /// Reserve a buffer for a one-shot, non-retransmitted transmission.
    ///
    /// The buffer is bound to the anonymous identifier and expires at
    /// `now + 1`: valid for exactly the next slot. Anonymous reservations
    /// never match each other, so every call consumes a distinct free buffer.
    pub fn reserve_one_shot(&self, now: Slot, nof_codeblocks: usize) -> UniqueTxBuffer {
        let mut state = self.state.lock();
        self.reserve_fresh(&mut state, now, BufferId::ANONYMOUS, now + 1, nof_codeblocks)
    }

    // ========================================================================
    // Public API: Recycling sweep
    // ========================================================================

    /// Run the recycling sweep for slot `now`.
    ///
    /// Each index reserved at entry is evaluated exactly once: lapsed or
    /// completed buffers move back to the free set, the rest stay reserved.
    /// Cost is O(reserved count); the pool lock is held for the whole sweep,
    /// serializing it against reservations.
    pub fn run_slot(&self, now: Slot) {
        let mut state = self.state.lock();

        // Bounding the loop by the entry count guarantees indices re-enqueued
        // at the back are not revisited within this sweep.
        let count = state.reserved.len();
        for _ in 0..count {
            let index = match state.reserved.pop_front() {
                Some(index) => index,
                None => break,
            };

            let buffer = &self.buffers[index];
            if buffer.run_slot(now) {
                state.reserved.push_back(index);
            } else {
                if buffer.is_completed() {
                    self.stats.completions.fetch_add(1, Ordering::Relaxed);
                } else {
                    self.stats.expirations.fetch_add(1, Ordering::Relaxed);
                }
                debug!(buffer = index, %now, "recycled soft buffer");
                state.free.push(index);
            }
        }
    }

    // ========================================================================
    // Public API: Observability
    // ========================================================================

    /// Number of buffers in the pool.
    pub fn nof_buffers(&self) -> usize {
        self.buffers.len()
    }

    /// Number of buffers currently free.
    pub fn free_count(&self) -> usize {
        self.state.lock().free.len()
    }

    /// Number of buffers currently reserved.
    pub fn reserved_count(&self) -> usize {
        self.state.lock().reserved.len()
    }

    /// Reservation and recycling statistics.
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Bind a buffer from the free set, moving its index to reserved on
    /// success. Failure leaves the partition untouched: the candidate is
    /// inspected in place and only popped once its reservation succeeded.
    fn reserve_fresh(
        &self,
        state: &mut PoolState,
        now: Slot,
        id: BufferId,
        expire: Slot,
        nof_codeblocks: usize,
    ) -> UniqueTxBuffer {
        let index = match state.free.last() {
            Some(&index) => index,
            None => {
                self.reserve_failed(
                    now,
                    id,
                    ReserveFailureReason::PoolExhausted,
                    &ReserveFailureReason::PoolExhausted,
                );
                return UniqueTxBuffer::invalid();
            }
        };

        let buffer = &self.buffers[index];
        match buffer.reserve(id, expire, nof_codeblocks) {
            Ok(()) => {
                state.free.pop();
                state.reserved.push_back(index);
                self.stats.reservations.fetch_add(1, Ordering::Relaxed);
                UniqueTxBuffer::new(Arc::clone(buffer))
            }
            Err(cause) => {
                self.reserve_failed(now, id, ReserveFailureReason::RebindRejected, &cause);
                UniqueTxBuffer::invalid()
            }
        }
    }

    /// Emit the diagnostic event for a failed reservation.
    fn reserve_failed(
        &self,
        now: Slot,
        id: BufferId,
        reason: ReserveFailureReason,
        cause: &dyn std::fmt::Display,
    ) {
        let counter = match reason {
            ReserveFailureReason::PoolExhausted => &self.stats.exhaustion_failures,
            ReserveFailureReason::RebindRejected => &self.stats.rebind_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        warn!(%id, %now, ?reason, "DL HARQ failed to reserve: {}", cause);
    }
}
