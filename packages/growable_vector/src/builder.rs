use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{Result, ShrinkPolicy, Vector};

/// Builder for creating an instance of [`Vector`].
///
/// You only need to use this builder if you want to customize the vector configuration.
/// The default configuration used by [`Vector::new()`][1] allocates nothing up front and
/// shrinks according to [`ShrinkPolicy::QuarterFull`].
///
/// # Examples
///
/// ```
/// use growable_vector::{ShrinkPolicy, Vector};
///
/// let vector = Vector::<u32>::builder()
///     .capacity(16)
///     .shrink_policy(ShrinkPolicy::QuarterFull)
///     .build()
///     .unwrap();
///
/// assert_eq!(vector.capacity(), 16);
/// ```
///
/// [1]: Vector::new
#[must_use]
pub struct VectorBuilder<T> {
    capacity: usize,
    shrink_policy: ShrinkPolicy,

    _item: PhantomData<T>,
}

impl<T> fmt::Debug for VectorBuilder<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorBuilder")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &self.capacity)
            .field("shrink_policy", &self.shrink_policy)
            .finish()
    }
}

impl<T> VectorBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            capacity: 0,
            shrink_policy: ShrinkPolicy::default(),
            _item: PhantomData,
        }
    }

    /// Sets the number of items to allocate storage for up front. Defaults to zero, in which case
    /// nothing is allocated until the first item is added.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the [shrink policy][ShrinkPolicy] for the vector. This governs whether removing items
    /// releases capacity.
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
    /// ```
    pub fn shrink_policy(mut self, policy: ShrinkPolicy) -> Self {
        self.shrink_policy = policy;
        self
    }

    /// Builds the vector with the specified configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`][crate::Error::AllocationFailure] if the requested
    /// initial capacity cannot be allocated.
    pub fn build(self) -> Result<Vector<T>> {
        Vector::new_inner(self.capacity, self.shrink_policy)
    }
}
