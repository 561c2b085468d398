/// Capacity to grow to when appending into a full vector.
///
/// Doubles the current capacity, starting from a single slot. Saturates at `usize::MAX` instead of
/// overflowing; the caller reports a full buffer at that ceiling as an allocation error.
#[must_use]
pub(crate) fn grown_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        1
    } else {
        capacity.saturating_mul(2)
    }
}

/// Determines whether and how a [`Vector`][crate::Vector] releases capacity when items are
/// removed from it.
///
/// # Examples
///
/// ```
/// use growable_vector::{ShrinkPolicy, Vector};
///
/// let vector = Vector::<u32>::builder()
///     .shrink_policy(ShrinkPolicy::Never)
///     .build()
///     .unwrap();
///
/// assert_eq!(vector.shrink_policy(), ShrinkPolicy::Never);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum ShrinkPolicy {
    /// When a removal leaves the vector exactly one quarter full, the capacity is halved (to a
    /// minimum of one slot). This is the default.
    ///
    /// A vector that is already at its minimum capacity of one slot is left alone instead of
    /// being reallocated to the same capacity.
    #[default]
    QuarterFull,

    /// Removals never release capacity.
    Never,
}

impl ShrinkPolicy {
    /// Capacity to shrink to after a removal left `len` items in a buffer of `capacity` slots,
    /// or `None` if the buffer should be kept as is.
    #[must_use]
    pub(crate) fn shrunk_capacity(self, len: usize, capacity: usize) -> Option<usize> {
        match self {
            Self::QuarterFull => {
                #[expect(
                    clippy::integer_division,
                    reason = "the quarter and half thresholds are defined in whole slots"
                )]
                let (quarter, half) = (capacity / 4, capacity / 2);

                if capacity == 0 || len != quarter {
                    return None;
                }

                let target = half.max(1);

                // Minimum capacity reached, reallocating would only copy into an equal buffer.
                (target < capacity).then_some(target)
            }
            Self::Never => None,
        }
    }
}
