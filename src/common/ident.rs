//! Transmit buffer identifier type.

use std::fmt;

/// Identifies one retransmittable downlink transmission context.
///
/// The key is the pair of the radio network temporary identifier (the
/// per-user link address) and the HARQ process number selecting which of the
/// link's concurrent retransmission processes is meant.
///
/// The all-zero value is the anonymous identifier, used for one-shot
/// transmissions that are never retransmitted. Anonymous reservations carry
/// no distinguishing information, so they never match an existing
/// reservation - see [`SoftBuffer::matches`](crate::pool::SoftBuffer::matches).
///
/// # Example
/// ```
/// use harqbuf::BufferId;
///
/// let id = BufferId::new(0x4601, 3);
/// assert!(!id.is_anonymous());
/// assert!(BufferId::ANONYMOUS.is_anonymous());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId {
    /// Radio link identifier (RNTI).
    pub rnti: u16,
    /// HARQ process number within the link.
    pub harq_id: u8,
}

impl BufferId {
    /// Identifier for one-shot, non-retransmitted allocations.
    pub const ANONYMOUS: BufferId = BufferId { rnti: 0, harq_id: 0 };

    /// Create a new identifier.
    #[inline]
    pub const fn new(rnti: u16, harq_id: u8) -> Self {
        BufferId { rnti, harq_id }
    }

    /// Check whether this is the anonymous identifier.
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        *self == Self::ANONYMOUS
    }
}

impl Default for BufferId {
    fn default() -> Self {
        Self::ANONYMOUS
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rnti={:#06x} h_id={}", self.rnti, self.harq_id)
    }
}
