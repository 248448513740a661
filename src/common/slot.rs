//! Slot - the logical timing unit of the pool.

use std::fmt;
use std::ops::Add;

/// One fixed-duration timing tick ("slot") of the baseband clock.
///
/// The counter is a `u32` that wraps around, so ordering uses serial-number
/// (half-range) arithmetic: slot `a` is at or after slot `b` when the
/// wrapping distance `a - b` is less than half the counter range. This keeps
/// expiry comparisons correct across the wrap boundary, at the cost of a
/// total order - which is why `Slot` deliberately does not implement `Ord`.
///
/// # Example
/// ```
/// use harqbuf::Slot;
///
/// let now = Slot::new(u32::MAX);
/// let expire = now + 2; // wraps to Slot(1)
/// assert!(expire.is_at_or_after(now));
/// assert!(!now.is_at_or_after(expire));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(pub u32);

impl Slot {
    /// Create a new slot value.
    #[inline]
    pub const fn new(count: u32) -> Self {
        Slot(count)
    }

    /// Raw counter value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// True iff `self` is at or after `other` under wrapping order.
    #[inline]
    pub fn is_at_or_after(self, other: Slot) -> bool {
        self.0.wrapping_sub(other.0) < (1 << 31)
    }

    /// True iff `self` is strictly before `other` under wrapping order.
    #[inline]
    pub fn is_before(self, other: Slot) -> bool {
        !self.is_at_or_after(other)
    }

    /// The later of two slots under wrapping order.
    #[inline]
    pub fn later(self, other: Slot) -> Slot {
        if self.is_at_or_after(other) {
            self
        } else {
            other
        }
    }
}

impl Add<u32> for Slot {
    type Output = Slot;

    #[inline]
    fn add(self, offset: u32) -> Slot {
        Slot(self.0.wrapping_add(offset))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot={}", self.0)
    }
}
