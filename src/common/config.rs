//! Pool configuration.

use crate::common::{Error, Result};

/// Maximum number of downlink HARQ processes per radio link.
///
/// NR allows up to 16 downlink HARQ processes per UE, so a pool sized as
/// `active_links * MAX_NOF_HARQ_PROCESSES` can hold every in-flight
/// retransmission context simultaneously.
pub const MAX_NOF_HARQ_PROCESSES: u8 = 16;

/// Configuration of a [`TxBufferPool`](crate::pool::TxBufferPool).
///
/// All three parameters must be at least one; [`validate`](Self::validate)
/// rejects anything else. A pool that cannot hold a buffer, or whose
/// reservations would expire in the slot they were made, has no defined
/// behavior, so construction refuses such configurations outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxBufferPoolConfig {
    /// Number of soft buffers in the pool.
    pub nof_buffers: usize,

    /// Maximum number of codeblocks a single buffer can track.
    pub max_nof_codeblocks: usize,

    /// Reservation lifetime in slots. A buffer reserved at slot `t` is
    /// recycled by the first sweep at or after `t + expire_timeout_slots`
    /// unless re-reserved in the meantime.
    pub expire_timeout_slots: u32,
}

impl TxBufferPoolConfig {
    /// Check the configuration for fatal construction-time errors.
    pub fn validate(&self) -> Result<()> {
        if self.nof_buffers == 0 {
            return Err(Error::EmptyPool);
        }
        if self.max_nof_codeblocks == 0 {
            return Err(Error::InvalidCodeblockCapacity);
        }
        if self.expire_timeout_slots == 0 {
            return Err(Error::InvalidTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> TxBufferPoolConfig {
        TxBufferPoolConfig {
            nof_buffers: 8,
            max_nof_codeblocks: 4,
            expire_timeout_slots: 10,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_zero_buffers_rejected() {
        let cfg = TxBufferPoolConfig { nof_buffers: 0, ..valid() };
        assert!(matches!(cfg.validate(), Err(Error::EmptyPool)));
    }

    #[test]
    fn test_zero_codeblocks_rejected() {
        let cfg = TxBufferPoolConfig { max_nof_codeblocks: 0, ..valid() };
        assert!(matches!(cfg.validate(), Err(Error::InvalidCodeblockCapacity)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let cfg = TxBufferPoolConfig { expire_timeout_slots: 0, ..valid() };
        assert!(matches!(cfg.validate(), Err(Error::InvalidTimeout)));
    }
}
