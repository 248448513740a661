//! SoftBuffer - one slot of the transmit buffer pool.
//!
//! A [`SoftBuffer`] retains the combining state of one downlink transmission
//! across retransmissions. The pool only ever asks three things of it:
//! match an identifier, (re-)reserve, and evaluate once per slot whether the
//! reservation is still needed.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::common::{BufferId, Slot};

/// Reservation rejected: the requested codeblock count does not fit.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("requested {requested} codeblocks exceeds buffer capacity {max}")]
pub struct CapacityExceeded {
    /// Codeblock count the caller asked for.
    pub requested: usize,
    /// Fixed maximum this buffer can track.
    pub max: usize,
}

/// Per-codeblock retained combining state.
///
/// The bit-level soft values live in the rate matcher; the pool side only
/// tracks how many transmissions have been combined into each codeblock.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CodeblockState {
    nof_transmissions: u32,
}

/// Mutable reservation state, guarded by the buffer's own mutex.
#[derive(Debug)]
struct BufferState {
    reserved: bool,
    completed: bool,
    id: BufferId,
    expire: Slot,
    codeblocks: Vec<CodeblockState>,
}

/// A soft buffer slot.
///
/// Storage is allocated once, at pool construction, and lives for the pool's
/// entire lifetime; only the binding (identifier, codeblock count, expiry)
/// cycles between free and reserved. All methods take `&self`: state sits
/// behind an internal mutex so the pool and an outstanding
/// [`UniqueTxBuffer`](crate::pool::UniqueTxBuffer) can touch the buffer from
/// different threads without data races.
///
/// # State retention contract
/// Rebinding to a different identifier, or to the same identifier with a
/// different codeblock count, discards all retained combining state: state
/// must never leak between unrelated transmissions, and combining across a
/// different codeblock segmentation is meaningless. Re-reserving the same
/// identifier with the same count preserves the accumulated state, which is
/// what lets retransmission combining work.
#[derive(Debug)]
pub struct SoftBuffer {
    /// Fixed maximum codeblock count (immutable after construction).
    max_nof_codeblocks: usize,

    state: Mutex<BufferState>,
}

impl SoftBuffer {
    /// Create an unreserved buffer that can track up to `max_nof_codeblocks`.
    pub fn new(max_nof_codeblocks: usize) -> Arc<Self> {
        Arc::new(Self {
            max_nof_codeblocks,
            state: Mutex::new(BufferState {
                reserved: false,
                completed: false,
                id: BufferId::ANONYMOUS,
                expire: Slot::new(0),
                codeblocks: Vec::with_capacity(max_nof_codeblocks),
            }),
        })
    }

    /// Fixed maximum codeblock count.
    #[inline]
    pub fn max_nof_codeblocks(&self) -> usize {
        self.max_nof_codeblocks
    }

    /// True iff the buffer is reserved and bound to `id`.
    ///
    /// The anonymous identifier never matches: an anonymous reservation
    /// carries no distinguishing information, so every anonymous request is
    /// treated as fresh.
    pub fn matches(&self, id: BufferId) -> bool {
        if id.is_anonymous() {
            return false;
        }
        let state = self.state.lock();
        state.reserved && state.id == id
    }

    /// Bind (or rebind) the buffer to `id` with the given expiry and
    /// codeblock count.
    ///
    /// Rejects, touching nothing, if `nof_codeblocks` exceeds the fixed
    /// maximum. On a same-binding re-reservation the expiry only ever moves
    /// forward (the later of the old and new values is kept).
    pub fn reserve(
        &self,
        id: BufferId,
        expire: Slot,
        nof_codeblocks: usize,
    ) -> Result<(), CapacityExceeded> {
        if nof_codeblocks > self.max_nof_codeblocks {
            return Err(CapacityExceeded {
                requested: nof_codeblocks,
                max: self.max_nof_codeblocks,
            });
        }

        let mut state = self.state.lock();

        let same_binding = state.reserved
            && !id.is_anonymous()
            && state.id == id
            && state.codeblocks.len() == nof_codeblocks;

        if same_binding {
            state.expire = state.expire.later(expire);
        } else {
            state.id = id;
            state.expire = expire;
            state.codeblocks.clear();
            state
                .codeblocks
                .resize(nof_codeblocks, CodeblockState::default());
        }

        state.reserved = true;
        state.completed = false;
        Ok(())
    }

    /// Evaluate the reservation at slot `now`.
    ///
    /// Returns `true` while the reservation is still needed. Returns `false`,
    /// clearing the reservation, once the expiry slot has been reached or the
    /// transmission was marked completed. Unreserved buffers report `false`.
    pub fn run_slot(&self, now: Slot) -> bool {
        let mut state = self.state.lock();
        if !state.reserved {
            return false;
        }

        let lapsed = state.completed || now.is_at_or_after(state.expire);
        if lapsed {
            state.reserved = false;
        }
        !lapsed
    }

    /// Signal that the transmission was delivered; the next sweep recycles
    /// the buffer without waiting for its expiry.
    pub fn mark_completed(&self) {
        let mut state = self.state.lock();
        if state.reserved {
            state.completed = true;
        }
    }

    /// True iff the buffer is currently reserved.
    pub fn is_reserved(&self) -> bool {
        self.state.lock().reserved
    }

    /// True iff the last reservation was marked completed.
    pub(crate) fn is_completed(&self) -> bool {
        self.state.lock().completed
    }

    /// Currently bound identifier, while reserved.
    pub fn id(&self) -> Option<BufferId> {
        let state = self.state.lock();
        state.reserved.then_some(state.id)
    }

    /// Current expiry slot, while reserved.
    pub fn expires_at(&self) -> Option<Slot> {
        let state = self.state.lock();
        state.reserved.then_some(state.expire)
    }

    /// Codeblock count of the current binding.
    pub fn nof_codeblocks(&self) -> usize {
        self.state.lock().codeblocks.len()
    }

    /// Record one more combined transmission for a codeblock.
    ///
    /// Returns `false` if the codeblock index is out of range.
    pub fn record_transmission(&self, codeblock: usize) -> bool {
        let mut state = self.state.lock();
        match state.codeblocks.get_mut(codeblock) {
            Some(cb) => {
                cb.nof_transmissions += 1;
                true
            }
            None => false,
        }
    }

    /// Number of transmissions combined into a codeblock, or `None` if the
    /// index is out of range.
    pub fn nof_transmissions(&self, codeblock: usize) -> Option<u32> {
        let state = self.state.lock();
        state.codeblocks.get(codeblock).map(|cb| cb.nof_transmissions)
    }
}
