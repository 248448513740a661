//! Behavioral tests for the transmit buffer pool public contract.

use harqbuf::{BufferId, Error, Slot, TxBufferPool, TxBufferPoolConfig};

fn create_pool(nof_buffers: usize, expire_timeout_slots: u32) -> TxBufferPool {
    TxBufferPool::new(TxBufferPoolConfig {
        nof_buffers,
        max_nof_codeblocks: 8,
        expire_timeout_slots,
    })
    .unwrap()
}

#[test]
fn test_invalid_configurations_refused() {
    let err = TxBufferPool::new(TxBufferPoolConfig {
        nof_buffers: 0,
        max_nof_codeblocks: 8,
        expire_timeout_slots: 10,
    })
    .unwrap_err();
    assert_eq!(err, Error::EmptyPool);

    let err = TxBufferPool::new(TxBufferPoolConfig {
        nof_buffers: 4,
        max_nof_codeblocks: 8,
        expire_timeout_slots: 0,
    })
    .unwrap_err();
    assert_eq!(err, Error::InvalidTimeout);

    let err = TxBufferPool::new(TxBufferPoolConfig {
        nof_buffers: 4,
        max_nof_codeblocks: 0,
        expire_timeout_slots: 10,
    })
    .unwrap_err();
    assert_eq!(err, Error::InvalidCodeblockCapacity);
}

#[test]
fn test_reservation_round_trip() {
    let pool = create_pool(4, 10);
    let id = BufferId::new(0x4601, 5);

    let first = pool.reserve(Slot::new(100), id, 3);
    assert!(first.is_valid());
    let free_after_first = pool.free_count();

    first.record_transmission(2);

    let second = pool.reserve(Slot::new(101), id, 3);
    assert!(second.is_valid());

    // Same underlying buffer (retained state visible through the new
    // handle) and no additional buffer consumed.
    assert_eq!(second.nof_transmissions(2), Some(1));
    assert_eq!(pool.free_count(), free_after_first);
}

#[test]
fn test_expiry_sweep_timing() {
    // Pool of one buffer, two-slot timeout: reserved at slot 10, the buffer
    // survives the sweeps at slots 10 and 11 and is recycled at slot 12.
    let pool = create_pool(1, 2);

    let handle = pool.reserve(Slot::new(10), BufferId::new(0x17, 0), 1);
    assert!(handle.is_valid());

    pool.run_slot(Slot::new(10));
    assert_eq!(pool.free_count(), 0);

    pool.run_slot(Slot::new(11));
    assert_eq!(pool.free_count(), 0);

    pool.run_slot(Slot::new(12));
    assert_eq!(pool.free_count(), 1);
}

#[test]
fn test_exhaustion() {
    let nof_buffers = 4;
    let pool = create_pool(nof_buffers, 10);

    for rnti in 0..nof_buffers as u16 {
        let handle = pool.reserve(Slot::new(10), BufferId::new(rnti + 1, 0), 2);
        assert!(handle.is_valid());
    }
    assert_eq!(pool.free_count(), 0);

    let overflow = pool.reserve(Slot::new(10), BufferId::new(0x99, 0), 2);
    assert!(!overflow.is_valid());
    assert_eq!(pool.free_count(), 0);
    assert_eq!(pool.reserved_count(), nof_buffers);
    assert_eq!(pool.stats().snapshot().exhaustion_failures, 1);
}

#[test]
fn test_anonymous_independence() {
    let pool = create_pool(4, 10);

    let a = pool.reserve_one_shot(Slot::new(10), 2);
    let b = pool.reserve_one_shot(Slot::new(10), 2);
    assert!(a.is_valid());
    assert!(b.is_valid());

    // Both carry the anonymous identifier, yet each consumed its own buffer.
    assert_eq!(pool.free_count(), 2);

    a.record_transmission(0);
    assert_eq!(a.nof_transmissions(0), Some(1));
    assert_eq!(b.nof_transmissions(0), Some(0));
}

#[test]
fn test_failure_is_a_no_op() {
    let pool = create_pool(2, 10);
    let held = BufferId::new(0x4601, 1);

    let first = pool.reserve(Slot::new(10), held, 4);
    assert!(first.is_valid());
    let expire_before = first.expires_at();
    let free_before = pool.free_count();

    // Rebind rejection: same identifier, codeblock count over the maximum.
    assert!(!pool.reserve(Slot::new(11), held, 9).is_valid());

    // Fresh-allocation rejection: new identifier, count over the maximum.
    assert!(!pool.reserve(Slot::new(11), BufferId::new(0x4602, 1), 9).is_valid());

    // The unrelated reservation is untouched, the partition unchanged.
    assert_eq!(first.expires_at(), expire_before);
    assert_eq!(first.nof_codeblocks(), 4);
    assert_eq!(pool.free_count(), free_before);
    assert_eq!(pool.reserved_count(), 1);
    assert_eq!(pool.stats().snapshot().rebind_failures, 2);
}

#[test]
fn test_re_reservation_extends_expiry() {
    let pool = create_pool(2, 2);
    let id = BufferId::new(0x17, 0);

    pool.reserve(Slot::new(10), id, 1);
    let renewed = pool.reserve(Slot::new(11), id, 1);
    assert_eq!(renewed.expires_at(), Some(Slot::new(13)));

    // The original expiry (slot 12) no longer applies.
    pool.run_slot(Slot::new(12));
    assert_eq!(pool.reserved_count(), 1);

    pool.run_slot(Slot::new(13));
    assert_eq!(pool.reserved_count(), 0);
}

#[test]
fn test_completion_frees_buffer_early() {
    let pool = create_pool(2, 100);

    let handle = pool.reserve(Slot::new(10), BufferId::new(0x17, 0), 1);
    handle.mark_completed();

    pool.run_slot(Slot::new(11));
    assert_eq!(pool.free_count(), 2);
    assert_eq!(pool.stats().snapshot().completions, 1);
}

#[test]
fn test_expiry_across_slot_wraparound() {
    let pool = create_pool(1, 4);
    let now = Slot::new(u32::MAX - 1);

    let handle = pool.reserve(now, BufferId::new(0x17, 0), 1);
    assert!(handle.is_valid());

    // Expiry is at wrapped slot 2.
    pool.run_slot(now + 1); // slot 0
    pool.run_slot(now + 2); // slot 1
    assert_eq!(pool.reserved_count(), 1);

    pool.run_slot(now + 3); // slot 2
    assert_eq!(pool.free_count(), 1);
}

#[test]
fn test_recycled_buffer_is_reusable() {
    let pool = create_pool(1, 2);

    let first = pool.reserve(Slot::new(10), BufferId::new(1, 0), 1);
    assert!(first.is_valid());
    pool.run_slot(Slot::new(12));

    let second = pool.reserve(Slot::new(13), BufferId::new(2, 0), 1);
    assert!(second.is_valid());
    assert_eq!(second.id(), Some(BufferId::new(2, 0)));
    assert_eq!(second.nof_transmissions(0), Some(0));
}

#[test]
fn test_stats_reuse_rate() {
    let pool = create_pool(4, 10);
    let id = BufferId::new(0x17, 0);

    pool.reserve(Slot::new(10), id, 1);
    pool.reserve(Slot::new(11), id, 1);
    pool.reserve(Slot::new(12), id, 1);
    pool.reserve_one_shot(Slot::new(12), 1);

    let snapshot = pool.stats().snapshot();
    assert_eq!(snapshot.reservations, 4);
    assert_eq!(snapshot.reuses, 2);
    assert_eq!(snapshot.reuse_rate(), 0.5);
}
