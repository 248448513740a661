//! Exclusive-access token for a reserved soft buffer.

use std::sync::Arc;

use crate::common::{BufferId, Slot};
use crate::pool::SoftBuffer;

/// Handle to a reserved [`SoftBuffer`].
///
/// Returned by the pool's reserve calls. An invalid (empty) handle is the
/// explicit representation of "no buffer obtained" - check with
/// [`is_valid`](Self::is_valid) before use; accessors on an invalid handle
/// answer as if the buffer were absent rather than panicking.
///
/// # Lifetime
/// The handle's lifetime is independent of the reservation's: dropping it
/// does not release the buffer. Recycling is driven solely by slot time (or
/// completion) through the pool's sweep. Downstream pipelines may therefore
/// keep the handle past the reserve call, but must not use it across a
/// boundary where the sweep could already have recycled the buffer, unless
/// the surrounding scheduling discipline rules that out.
#[derive(Default)]
pub struct UniqueTxBuffer {
    buffer: Option<Arc<SoftBuffer>>,
}

impl UniqueTxBuffer {
    /// Wrap a reserved buffer. Called by the pool on successful reservation.
    pub(crate) fn new(buffer: Arc<SoftBuffer>) -> Self {
        Self { buffer: Some(buffer) }
    }

    /// The empty handle: no buffer obtained.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// True iff the handle refers to a buffer.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.buffer.is_some()
    }

    /// Identifier the buffer is bound to, while reserved.
    pub fn id(&self) -> Option<BufferId> {
        self.buffer.as_ref().and_then(|b| b.id())
    }

    /// Expiry slot of the reservation, while reserved.
    pub fn expires_at(&self) -> Option<Slot> {
        self.buffer.as_ref().and_then(|b| b.expires_at())
    }

    /// Codeblock count of the current binding (zero for an invalid handle).
    pub fn nof_codeblocks(&self) -> usize {
        self.buffer.as_ref().map_or(0, |b| b.nof_codeblocks())
    }

    /// Record one more combined transmission for a codeblock.
    ///
    /// Returns `false` for an invalid handle or an out-of-range index.
    pub fn record_transmission(&self, codeblock: usize) -> bool {
        self.buffer
            .as_ref()
            .is_some_and(|b| b.record_transmission(codeblock))
    }

    /// Number of transmissions combined into a codeblock.
    pub fn nof_transmissions(&self, codeblock: usize) -> Option<u32> {
        self.buffer.as_ref().and_then(|b| b.nof_transmissions(codeblock))
    }

    /// Signal successful delivery; the next sweep recycles the buffer
    /// without waiting for its expiry.
    pub fn mark_completed(&self) {
        if let Some(buffer) = &self.buffer {
            buffer.mark_completed();
        }
    }
}
