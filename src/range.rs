use serde::Serialize;

/// Inclusive index interval `[low, high]` awaiting or undergoing work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub low: usize,
    pub high: usize,
}

impl Range {
    #[inline]
    pub const fn new(low: usize, high: usize) -> Self {
        Self { low, high }
    }

    /// The range covering a whole buffer of length `len`, or `None` for an empty buffer.
    #[inline]
    pub fn full(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|high| Self::new(0, high))
    }

    /// Split point used by merge sort. The left half is `[low, mid]`, the right `[mid + 1, high]`.
    #[inline]
    pub const fn mid(&self) -> usize {
        self.low + (self.high - self.low) / 2
    }

    #[inline]
    pub const fn len(&self) -> usize {
        if self.high < self.low {
            0
        } else {
            self.high - self.low + 1
        }
    }

    /// Empty and singleton ranges are already sorted.
    #[inline]
    pub const fn is_trivial(&self) -> bool {
        self.low >= self.high
    }

    /// Ranges left and right of a pivot that landed at `pivot`.
    ///
    /// A pivot at index 0 has no representable `pivot - 1`, the left child then collapses to the
    /// trivial `[0, 0]`.
    #[inline]
    pub fn split_at_pivot(&self, pivot: usize) -> (Self, Self) {
        debug_assert!(self.low <= pivot && pivot <= self.high);

        (
            Self::new(self.low, pivot.saturating_sub(1)),
            Self::new(pivot + 1, self.high),
        )
    }
}
