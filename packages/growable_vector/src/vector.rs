use std::any::type_name;
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use crate::{Error, RawBuffer, Result, ShrinkPolicy, VectorBuilder, grown_capacity};

/// A growable collection that stores its items contiguously in a single owned buffer.
///
/// Appending is amortized constant time: when the buffer is full, its capacity is doubled
/// (starting from one slot) and the existing items are moved into the new buffer. Removing the
/// last item may release capacity again, as governed by the [shrink policy][ShrinkPolicy].
///
/// Every operation that changes capacity is fallible. When memory cannot be obtained, the
/// operation returns [`Error::AllocationFailure`] and the vector is left exactly as it was
/// before the call.
///
/// # Access
///
/// Items are accessed by index in one of two ways with deliberately different contracts:
///
/// * [`at()`][1] and [`at_mut()`][2] - checked. Return [`Error::IndexOutOfRange`] if the index
///   is not less than [`len()`][3].
/// * [`get_unchecked()`][4] and [`get_unchecked_mut()`][5] - unchecked. The caller promises that
///   the index is in range. Violating the promise is undefined behavior.
///
/// Indexing with `vector[index]` is also supported and panics on an out of range index.
///
/// # Ownership
///
/// A vector exclusively owns its buffer. Moving a vector transfers the buffer without touching
/// any items; [`take()`][6] does the same while leaving an empty vector behind. Copying via
/// [`try_clone()`][7] or [`Clone`] creates an independent buffer with clones of the items.
///
/// # Example
///
/// ```
/// use growable_vector::Vector;
///
/// let mut vector = Vector::new();
///
/// for value in 1..=5 {
///     vector.push(value).unwrap();
/// }
///
/// assert_eq!(vector.len(), 5);
/// assert_eq!(vector.capacity(), 8);
///
/// vector.pop().unwrap();
/// vector.pop().unwrap();
///
/// assert_eq!(vector.to_string(), "Vector(size=3, capacity=8) [1, 2, 3]");
/// ```
///
/// [1]: Self::at
/// [2]: Self::at_mut
/// [3]: Self::len
/// [4]: Self::get_unchecked
/// [5]: Self::get_unchecked_mut
/// [6]: Self::take
/// [7]: Self::try_clone
pub struct Vector<T> {
    /// Slots `[0, len)` hold initialized items, the rest of the buffer is uninitialized.
    buffer: RawBuffer<T>,

    len: usize,

    shrink_policy: ShrinkPolicy,
}

impl<T> Vector<T> {
    /// Creates an empty vector. No memory is allocated until the first item is added.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::Vector;
    ///
    /// let vector = Vector::<String>::new();
    ///
    /// assert!(vector.is_empty());
    /// assert_eq!(vector.capacity(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::empty(ShrinkPolicy::QuarterFull)
    }

    const fn empty(shrink_policy: ShrinkPolicy) -> Self {
        Self {
            buffer: RawBuffer::empty(),
            len: 0,
            shrink_policy,
        }
    }

    /// Creates an empty vector with storage for exactly `capacity` items.
    ///
    /// A capacity of zero allocates nothing and is equivalent to [`new()`][Self::new].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the storage cannot be allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::Vector;
    ///
    /// let vector = Vector::<u64>::with_capacity(10).unwrap();
    ///
    /// assert_eq!(vector.len(), 0);
    /// assert_eq!(vector.capacity(), 10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::builder().capacity(capacity).build()
    }

    /// Starts building a new [`Vector`].
    ///
    /// Use this when you want to customize the vector configuration beyond the defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::{ShrinkPolicy, Vector};
    ///
    /// let vector = Vector::<u32>::builder()
    ///     .capacity(4)
    ///     .shrink_policy(ShrinkPolicy::Never)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(vector.capacity(), 4);
    /// ```
    pub fn builder() -> VectorBuilder<T> {
        VectorBuilder::new()
    }

    pub(crate) fn new_inner(capacity: usize, shrink_policy: ShrinkPolicy) -> Result<Self> {
        Ok(Self {
            buffer: RawBuffer::allocate(capacity)?,
            len: 0,
            shrink_policy,
        })
    }

    /// The number of items in the vector.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of items the vector can hold before it needs to grow.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Whether the vector contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The policy that governs whether removals release capacity.
    #[must_use]
    pub fn shrink_policy(&self) -> ShrinkPolicy {
        self.shrink_policy
    }

    /// Appends an item to the end of the vector, taking ownership of it.
    ///
    /// If the vector is full, its capacity is doubled first (or set to one if it was zero).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the vector needed to grow and the new storage
    /// could not be allocated, or if the capacity is already at `usize::MAX` (only reachable with
    /// zero-sized items). The vector is unchanged and `value` is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::Vector;
    ///
    /// let mut vector = Vector::new();
    /// vector.push("hello".to_string()).unwrap();
    ///
    /// assert_eq!(vector.at(0).unwrap(), "hello");
    /// ```
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.len == self.capacity() {
            self.grow()?;
        }

        // SAFETY: The vector is not full, so slot `len` is in bounds and uninitialized.
        unsafe {
            self.buffer.slot_ptr(self.len).write(value);
        }

        self.len = self
            .len
            .checked_add(1)
            .expect("guarded by len < capacity above");

        Ok(())
    }

    /// Appends a clone of `value` to the end of the vector. The original remains with the caller.
    ///
    /// Apart from cloning the value, this behaves exactly like [`push()`][Self::push].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the vector needed to grow and the new storage
    /// could not be allocated. The vector is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::Vector;
    ///
    /// let greeting = "hello".to_string();
    ///
    /// let mut vector = Vector::new();
    /// vector.push_cloned(&greeting).unwrap();
    ///
    /// assert_eq!(vector.at(0).unwrap(), &greeting);
    /// ```
    pub fn push_cloned(&mut self, value: &T) -> Result<()>
    where
        T: Clone,
    {
        self.push(value.clone())
    }

    /// Inserts an item at `index`, shifting the items at `index` and after it one slot toward
    /// the end. An `index` equal to [`len()`][Self::len] appends.
    ///
    /// Grows the vector the same way as [`push()`][Self::push] if it is full.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is greater than the length, or
    /// [`Error::AllocationFailure`] if the vector needed to grow and could not, as described for
    /// [`push()`][Self::push]. In both cases the vector is unchanged and `value` is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::Vector;
    ///
    /// let mut vector = Vector::new();
    /// vector.push(1).unwrap();
    /// vector.push(3).unwrap();
    /// vector.insert(1, 2).unwrap();
    ///
    /// assert_eq!(vector.to_string(), "Vector(size=3, capacity=4) [1, 2, 3]");
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let Some(tail_len) = self.len.checked_sub(index) else {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        };

        if self.len == self.capacity() {
            self.grow()?;
        }

        let slot = self.buffer.slot_ptr(index);

        if tail_len > 0 {
            // SAFETY: The vector is not full, so the shifted range `[index + 1, len + 1)` is
            // in bounds. The source range `[index, len)` holds initialized items.
            let next_slot = unsafe { slot.add(1) };

            // SAFETY: Both ranges are in bounds (see above). They overlap, which `copy` allows.
            unsafe {
                slot.copy_to(next_slot, tail_len);
            }
        }

        // SAFETY: The item previously at `index` was moved one slot over, so the slot is
        // logically uninitialized and we may overwrite it without dropping.
        unsafe {
            slot.write(value);
        }

        self.len = self
            .len
            .checked_add(1)
            .expect("guarded by len < capacity above");

        Ok(())
    }

    /// Removes the last item from the vector and returns it, or returns `None` if the vector
    /// is empty. Removing from an empty vector is not an error.
    ///
    /// The removed item is handed to the caller; the vector never drops it.
    ///
    /// If the removal leaves the vector exactly one quarter full, the buffer is halved
    /// (see [`ShrinkPolicy::QuarterFull`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the vector needed to shrink and the new storage
    /// could not be allocated. The removed item is put back, so the vector is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::Vector;
    ///
    /// let mut vector = Vector::new();
    /// vector.push(42).unwrap();
    ///
    /// assert_eq!(vector.pop().unwrap(), Some(42));
    /// assert_eq!(vector.pop().unwrap(), None);
    /// ```
    pub fn pop(&mut self) -> Result<Option<T>> {
        let Some(new_len) = self.len.checked_sub(1) else {
            return Ok(None);
        };

        let slot = self.buffer.slot_ptr(new_len);

        // SAFETY: `new_len` is less than the old length, so the slot holds an initialized item.
        // Lowering the length below makes the slot logically uninitialized, so the item is not
        // duplicated.
        let value = unsafe { slot.read() };
        let old_len = self.len;
        self.len = new_len;

        let Some(target) = self.shrink_policy.shrunk_capacity(new_len, self.capacity()) else {
            return Ok(Some(value));
        };

        if let Err(error) = self.reallocate(target) {
            // The buffer is untouched after a failed reallocation, so the slot is still ours.
            // SAFETY: The slot is in bounds and logically uninitialized since we read from it.
            unsafe {
                slot.write(value);
            }

            self.len = old_len;
            return Err(error);
        }

        Ok(Some(value))
    }

    /// Returns a reference to the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not less than the length.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::{Error, Vector};
    ///
    /// let mut vector = Vector::new();
    /// vector.push(7).unwrap();
    ///
    /// assert_eq!(vector.at(0), Ok(&7));
    /// assert!(matches!(vector.at(1), Err(Error::IndexOutOfRange { .. })));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;

        // SAFETY: Bounds checked above.
        Ok(unsafe { self.get_unchecked(index) })
    }

    /// Returns an exclusive reference to the item at `index`, which may be used to replace it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not less than the length.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::Vector;
    ///
    /// let mut vector = Vector::new();
    /// vector.push(7).unwrap();
    ///
    /// *vector.at_mut(0).unwrap() = 8;
    ///
    /// assert_eq!(vector.at(0), Ok(&8));
    /// ```
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_index(index)?;

        // SAFETY: Bounds checked above.
        Ok(unsafe { self.get_unchecked_mut(index) })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Returns a reference to the item at `index` without bounds checking.
    ///
    /// For a checked alternative, see [`at()`][Self::at].
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len()`][Self::len]. Calling this with an out of range index
    /// is undefined behavior even if the resulting reference is not used.
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);

        // SAFETY: The caller guarantees `index < len <= capacity`.
        let slot = unsafe { self.buffer.slot_ptr_unchecked(index) };

        // SAFETY: Slots below `len` hold initialized items and the reference borrows `self`.
        unsafe { slot.as_ref() }
    }

    /// Returns an exclusive reference to the item at `index` without bounds checking.
    ///
    /// For a checked alternative, see [`at_mut()`][Self::at_mut].
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len()`][Self::len]. Calling this with an out of range index
    /// is undefined behavior even if the resulting reference is not used.
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);

        // SAFETY: The caller guarantees `index < len <= capacity`.
        let mut slot = unsafe { self.buffer.slot_ptr_unchecked(index) };

        // SAFETY: Slots below `len` hold initialized items and the reference borrows `self`
        // exclusively, so no other reference to the item can exist.
        unsafe { slot.as_mut() }
    }

    /// Moves all items out into a new vector, leaving this vector empty with no allocation.
    ///
    /// The buffer is transferred as a whole; no item is moved or cloned individually.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::Vector;
    ///
    /// let mut source = Vector::new();
    /// source.push(1).unwrap();
    ///
    /// let destination = source.take();
    ///
    /// assert_eq!(destination.len(), 1);
    /// assert_eq!(source.len(), 0);
    /// assert_eq!(source.capacity(), 0);
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        let empty = Self::empty(self.shrink_policy);
        mem::replace(self, empty)
    }

    /// Creates an independent copy of the vector with the same capacity and clones of its items.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the storage for the copy cannot be allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::Vector;
    ///
    /// let mut original = Vector::new();
    /// original.push(1).unwrap();
    ///
    /// let mut copy = original.try_clone().unwrap();
    /// copy.push(2).unwrap();
    ///
    /// assert_eq!(original.len(), 1);
    /// assert_eq!(copy.len(), 2);
    /// ```
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        trace!(
            len = self.len,
            capacity = self.capacity(),
            item_type = type_name::<T>(),
            "copying vector"
        );

        let mut copy = Self::new_inner(self.capacity(), self.shrink_policy)?;

        for item in self.as_slice() {
            // SAFETY: The copy has the same capacity as `self` and fewer than `self.len` items
            // so far, so slot `copy.len` is in bounds and uninitialized.
            unsafe {
                copy.buffer.slot_ptr(copy.len).write(item.clone());
            }

            // Incremented per item, so a panicking `clone()` leaves a consistent copy to drop.
            copy.len = copy
                .len
                .checked_add(1)
                .expect("guarded by copy.len < self.len");
        }

        Ok(copy)
    }

    /// Replaces the contents of this vector with a copy of `source`.
    ///
    /// The replacement storage is fully populated before the current storage is released.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the storage for the copy cannot be allocated.
    /// This vector is unchanged in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use growable_vector::Vector;
    ///
    /// let mut source = Vector::new();
    /// source.push(1).unwrap();
    ///
    /// let mut destination = Vector::new();
    /// destination.push(7).unwrap();
    /// destination.push(8).unwrap();
    ///
    /// destination.try_clone_from(&source).unwrap();
    ///
    /// assert_eq!(destination.to_string(), "Vector(size=1, capacity=1) [1]");
    /// assert_eq!(source.to_string(), "Vector(size=1, capacity=1) [1]");
    /// ```
    pub fn try_clone_from(&mut self, source: &Self) -> Result<()>
    where
        T: Clone,
    {
        *self = source.try_clone()?;
        Ok(())
    }

    /// Doubles the capacity of a full vector.
    ///
    /// Growth saturates at `usize::MAX`. Buffers of sized items fail to allocate long before that,
    /// but zero-sized items never allocate, so a full buffer at the ceiling is reported here.
    fn grow(&mut self) -> Result<()> {
        let new_capacity = grown_capacity(self.capacity());

        if new_capacity == self.capacity() {
            return Err(Error::AllocationFailure {
                capacity: new_capacity,
                item_type: type_name::<T>(),
            });
        }

        self.reallocate(new_capacity)
    }

    /// Moves the items into a fresh buffer of `new_capacity` slots and releases the old buffer.
    ///
    /// Does nothing if `new_capacity` could not hold more than the current items, so that live
    /// items can never be truncated.
    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.len {
            return Ok(());
        }

        debug!(
            from_capacity = self.capacity(),
            to_capacity = new_capacity,
            item_type = type_name::<T>(),
            "reallocating vector buffer"
        );

        let mut replacement = RawBuffer::allocate(new_capacity)?;

        // SAFETY: The first `len` slots of our buffer hold items, `len` is less than both
        // capacities and the replacement is freshly allocated so holds no items.
        unsafe {
            self.buffer.move_prefix_into(&mut replacement, self.len);
        }

        // The old buffer now only holds moved-from slots, so dropping it merely frees memory.
        self.buffer = replacement;

        Ok(())
    }

    fn as_slice(&self) -> &[T] {
        // SAFETY: Slots `[0, len)` hold initialized items.
        unsafe { self.buffer.prefix(self.len) }
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // SAFETY: Slots `[0, len)` hold initialized items and nothing can use them after this.
        unsafe {
            self.buffer.drop_prefix(self.len);
        }

        // The buffer field releases the memory itself when it is dropped after us.
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// # Panics
    ///
    /// Panics if the storage for the copy cannot be allocated. Use
    /// [`try_clone()`][Vector::try_clone] to handle this as an error instead.
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|error| panic!("{error}"))
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(error) = self.try_clone_from(source) {
            panic!("{error}");
        }
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is not less than the length.
    fn index(&self, index: usize) -> &Self::Output {
        self.at(index)
            .unwrap_or_else(|error| panic!("{error} in Vector of {}", type_name::<T>()))
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    /// # Panics
    ///
    /// Panics if `index` is not less than the length.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.at_mut(index)
            .unwrap_or_else(|error| panic!("{error} in Vector of {}", type_name::<T>()))
    }
}

/// Renders the size, the capacity and the items in order, e.g.
/// `Vector(size=3, capacity=8) [1, 2, 3]`. Intended for diagnostics, not as a stable format.
impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vector(size={}, capacity={}) [",
            self.len,
            self.capacity()
        )?;

        for (position, item) in self.as_slice().iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{item}")?;
        }

        write!(f, "]")
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("shrink_policy", &self.shrink_policy)
            .field("items", &self.as_slice())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        reason = "we do not need to worry about these things when writing test code"
    )]

    use std::cell::Cell;
    use std::rc::Rc;
    use std::thread;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(Vector<u32>: Send, Clone, Default);
    assert_not_impl_any!(Vector<u32>: Sync);
    assert_not_impl_any!(Vector<Rc<u32>>: Send);

    /// Counts how many times instances were dropped, to detect leaks and double drops.
    #[derive(Clone, Debug)]
    struct DropCounter {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn smoke_test() {
        let mut vector = Vector::<u32>::new();

        assert_eq!(vector.len(), 0);
        assert!(vector.is_empty());

        vector.push(42).unwrap();
        vector.push(43).unwrap();
        vector.push(44).unwrap();

        assert_eq!(vector.len(), 3);
        assert!(!vector.is_empty());
        assert!(vector.capacity() >= 3);

        assert_eq!(*vector.at(0).unwrap(), 42);
        assert_eq!(*vector.at(1).unwrap(), 43);
        assert_eq!(*vector.at(2).unwrap(), 44);

        assert_eq!(vector.pop().unwrap(), Some(44));
        assert_eq!(vector.len(), 2);
    }

    #[test]
    fn new_does_not_allocate() {
        let vector = Vector::<u64>::new();

        assert_eq!(vector.capacity(), 0);
        assert_eq!(vector.len(), 0);
    }

    #[test]
    fn with_zero_capacity_is_empty_state() {
        let vector = Vector::<u64>::with_capacity(0).unwrap();

        assert_eq!(vector.capacity(), 0);
        assert_eq!(vector.len(), 0);
    }

    #[test]
    fn with_capacity_is_exact() {
        let vector = Vector::<u64>::with_capacity(7).unwrap();

        assert_eq!(vector.capacity(), 7);
        assert_eq!(vector.len(), 0);
    }

    #[test]
    fn with_unrepresentable_capacity_is_allocation_failure() {
        let result = Vector::<u64>::with_capacity(usize::MAX);

        assert!(matches!(result, Err(Error::AllocationFailure { .. })));
    }

    #[test]
    fn growth_sequence_doubles() {
        let mut vector = Vector::new();
        let mut observed = Vec::new();

        for value in 1..=5 {
            vector.push(value).unwrap();
            observed.push(vector.capacity());
        }

        assert_eq!(observed, [1, 2, 4, 4, 8]);
    }

    #[test]
    fn growth_from_initial_capacity() {
        let mut vector = Vector::with_capacity(3).unwrap();

        for value in 0..3 {
            vector.push(value).unwrap();
        }
        assert_eq!(vector.capacity(), 3);

        vector.push(3).unwrap();
        assert_eq!(vector.capacity(), 6);
    }

    #[test]
    fn push_preserves_order_across_growth() {
        let mut vector = Vector::new();

        for value in 0..100 {
            vector.push(value).unwrap();
        }

        assert_eq!(vector.len(), 100);

        for index in 0..100 {
            assert_eq!(vector[index], index);
        }
    }

    #[test]
    fn push_cloned_keeps_original() {
        let original = "hello".to_string();
        let mut vector = Vector::new();

        vector.push_cloned(&original).unwrap();
        vector.push_cloned(&original).unwrap();

        assert_eq!(original, "hello");
        assert_eq!(vector.len(), 2);
        assert_eq!(vector[0], "hello");
        assert_eq!(vector[1], "hello");
    }

    #[test]
    fn scenario_from_empty() {
        let mut vector = Vector::new();

        for value in 1..=5 {
            vector.push(value).unwrap();
        }

        assert_eq!(vector.len(), 5);
        assert_eq!(vector.capacity(), 8);

        vector.pop().unwrap();
        vector.pop().unwrap();

        assert_eq!(vector.len(), 3);
        assert_eq!(vector.to_string(), "Vector(size=3, capacity=8) [1, 2, 3]");
    }

    #[test]
    fn pop_on_empty_is_noop() {
        let mut vector = Vector::<u32>::with_capacity(4).unwrap();

        assert_eq!(vector.pop().unwrap(), None);
        assert_eq!(vector.len(), 0);
        assert_eq!(vector.capacity(), 4);

        let mut vector = Vector::<u32>::new();

        assert_eq!(vector.pop().unwrap(), None);
        assert_eq!(vector.capacity(), 0);
    }

    #[test]
    fn pop_shrinks_at_quarter() {
        let mut vector = Vector::new();

        for value in 0..8 {
            vector.push(value).unwrap();
        }
        assert_eq!(vector.capacity(), 8);

        // 8 -> 3 items: not yet a quarter.
        for _ in 0..5 {
            vector.pop().unwrap();
            assert_eq!(vector.capacity(), 8);
        }

        // 2 == 8 / 4.
        assert_eq!(vector.pop().unwrap(), Some(2));
        assert_eq!(vector.len(), 2);
        assert_eq!(vector.capacity(), 4);

        // 1 == 4 / 4.
        assert_eq!(vector.pop().unwrap(), Some(1));
        assert_eq!(vector.capacity(), 2);

        // 0 == 2 / 4.
        assert_eq!(vector.pop().unwrap(), Some(0));
        assert_eq!(vector.capacity(), 1);

        assert_eq!(vector.pop().unwrap(), None);
        assert_eq!(vector.capacity(), 1);
    }

    #[test]
    fn pop_at_minimum_capacity_keeps_buffer() {
        let mut vector = Vector::new();

        // Alternating at capacity 1 must not shrink below one slot.
        for value in 0..10 {
            vector.push(value).unwrap();
            assert_eq!(vector.capacity(), 1);

            assert_eq!(vector.pop().unwrap(), Some(value));
            assert_eq!(vector.capacity(), 1);
        }
    }

    #[test]
    fn pop_preserves_remaining_items_across_shrink() {
        let mut vector = Vector::new();

        for value in 0..16 {
            vector.push(value.to_string()).unwrap();
        }

        while vector.len() > 1 {
            vector.pop().unwrap();

            for index in 0..vector.len() {
                assert_eq!(vector[index], index.to_string());
            }
        }
    }

    #[test]
    fn never_policy_does_not_shrink() {
        let mut vector = Vector::builder()
            .shrink_policy(ShrinkPolicy::Never)
            .build()
            .unwrap();

        for value in 0..8 {
            vector.push(value).unwrap();
        }

        while vector.pop().unwrap().is_some() {}

        assert_eq!(vector.capacity(), 8);
    }

    #[test]
    fn insert_shifts_tail() {
        let mut vector = Vector::new();

        vector.insert(0, 'b').unwrap();
        vector.insert(0, 'a').unwrap();
        vector.insert(2, 'd').unwrap();
        vector.insert(2, 'c').unwrap();

        assert_eq!(vector.to_string(), "Vector(size=4, capacity=4) [a, b, c, d]");
    }

    #[test]
    fn insert_grows_when_full() {
        let mut vector = Vector::with_capacity(2).unwrap();
        vector.push(1).unwrap();
        vector.push(3).unwrap();

        vector.insert(1, 2).unwrap();

        assert_eq!(vector.capacity(), 4);
        assert_eq!(vector.to_string(), "Vector(size=3, capacity=4) [1, 2, 3]");
    }

    #[test]
    fn insert_past_end_is_error() {
        let mut vector = Vector::new();
        vector.push(1).unwrap();

        assert_eq!(
            vector.insert(2, 5),
            Err(Error::IndexOutOfRange { index: 2, len: 1 })
        );
        assert_eq!(vector.len(), 1);
        assert_eq!(vector.capacity(), 1);
    }

    #[test]
    fn at_out_of_range_is_error() {
        let mut vector = Vector::new();

        assert_eq!(vector.at(0), Err(Error::IndexOutOfRange { index: 0, len: 0 }));

        vector.push(10).unwrap();
        vector.push(20).unwrap();

        for index in [2, 3, 100, usize::MAX] {
            assert_eq!(vector.at(index), Err(Error::IndexOutOfRange { index, len: 2 }));
            assert!(matches!(
                vector.at_mut(index),
                Err(Error::IndexOutOfRange { len: 2, .. })
            ));
        }
    }

    #[test]
    fn at_out_of_range_within_capacity_is_error() {
        let mut vector = Vector::new();

        for value in 0..3 {
            vector.push(value).unwrap();
        }
        assert_eq!(vector.capacity(), 4);

        assert_eq!(vector.at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn at_mut_writes() {
        let mut vector = Vector::new();
        vector.push(1).unwrap();

        *vector.at_mut(0).unwrap() = 2;

        assert_eq!(vector[0], 2);
    }

    #[test]
    fn unchecked_access() {
        let mut vector = Vector::new();
        vector.push(1).unwrap();
        vector.push(2).unwrap();

        // SAFETY: Index is less than the length.
        unsafe {
            *vector.get_unchecked_mut(1) = 3;
        }

        // SAFETY: Index is less than the length.
        let item = unsafe { vector.get_unchecked(1) };
        assert_eq!(*item, 3);
    }

    #[test]
    fn index_mut_writes() {
        let mut vector = Vector::new();
        vector.push(1).unwrap();

        vector[0] = 5;

        assert_eq!(vector[0], 5);
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let vector = Vector::<u32>::new();

        _ = vector[0];
    }

    #[test]
    fn take_leaves_empty_state() {
        let mut source = Vector::new();
        source.push(1).unwrap();
        source.push(2).unwrap();

        let destination = source.take();

        assert_eq!(destination.to_string(), "Vector(size=2, capacity=2) [1, 2]");
        assert_eq!(source.len(), 0);
        assert_eq!(source.capacity(), 0);

        // The source remains usable.
        source.push(3).unwrap();
        assert_eq!(source.to_string(), "Vector(size=1, capacity=1) [3]");
    }

    #[test]
    fn take_preserves_shrink_policy() {
        let mut source = Vector::<u32>::builder()
            .shrink_policy(ShrinkPolicy::Never)
            .build()
            .unwrap();

        let destination = source.take();

        assert_eq!(source.shrink_policy(), ShrinkPolicy::Never);
        assert_eq!(destination.shrink_policy(), ShrinkPolicy::Never);
    }

    #[test]
    fn self_take_assignment_is_unchanged() {
        let mut vector = Vector::new();
        vector.push(1).unwrap();
        vector.push(2).unwrap();

        vector = vector.take();

        assert_eq!(vector.to_string(), "Vector(size=2, capacity=2) [1, 2]");
    }

    #[test]
    fn try_clone_is_independent() {
        let mut original = Vector::new();
        for value in 1..=3 {
            original.push(value.to_string()).unwrap();
        }

        let mut copy = original.try_clone().unwrap();
        assert_eq!(copy.capacity(), original.capacity());

        copy.push("4".to_string()).unwrap();
        copy[0] = "changed".to_string();

        assert_eq!(original.len(), 3);
        assert_eq!(original.capacity(), 4);
        assert_eq!(original[0], "1");
        assert_eq!(copy.len(), 4);
    }

    #[test]
    fn clone_of_empty_does_not_allocate() {
        let original = Vector::<String>::new();

        let copy = original.clone();

        assert_eq!(copy.capacity(), 0);
        assert!(copy.is_empty());
    }

    #[test]
    fn clone_from_replaces_contents() {
        let mut source = Vector::new();
        source.push(1).unwrap();

        let mut destination = Vector::new();
        for value in 10..15 {
            destination.push(value).unwrap();
        }

        destination.clone_from(&source);

        assert_eq!(destination.to_string(), "Vector(size=1, capacity=1) [1]");
    }

    #[test]
    #[allow(
        clippy::redundant_clone,
        clippy::assigning_clones,
        reason = "self-assignment of a copy is the scenario under test"
    )]
    fn self_clone_assignment_is_unchanged() {
        let mut vector = Vector::new();
        vector.push(1).unwrap();
        vector.push(2).unwrap();

        vector = vector.clone();

        assert_eq!(vector.to_string(), "Vector(size=2, capacity=2) [1, 2]");
    }

    #[test]
    fn drops_each_live_item_once() {
        let drops = Rc::new(Cell::new(0));

        {
            let mut vector = Vector::new();

            for _ in 0..5 {
                vector
                    .push(DropCounter {
                        drops: Rc::clone(&drops),
                    })
                    .unwrap();
            }

            // Growth moves items, it must not drop them.
            assert_eq!(drops.get(), 0);

            // Popped items belong to the caller, the vector does not drop them.
            let popped = vector.pop().unwrap();
            assert_eq!(drops.get(), 0);

            drop(popped);
            assert_eq!(drops.get(), 1);
        }

        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn shrink_does_not_drop_items() {
        let drops = Rc::new(Cell::new(0));
        let mut vector = Vector::new();

        for _ in 0..8 {
            vector
                .push(DropCounter {
                    drops: Rc::clone(&drops),
                })
                .unwrap();
        }

        let mut popped = Vec::new();
        while vector.len() > 2 {
            popped.push(vector.pop().unwrap());
        }

        assert_eq!(vector.capacity(), 4);
        assert_eq!(drops.get(), 0);
    }

    #[test]
    fn take_does_not_drop_items() {
        let drops = Rc::new(Cell::new(0));
        let mut source = Vector::new();

        source
            .push(DropCounter {
                drops: Rc::clone(&drops),
            })
            .unwrap();

        let destination = source.take();
        drop(source);
        assert_eq!(drops.get(), 0);

        drop(destination);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn zero_sized_items() {
        let mut vector = Vector::new();

        for _ in 0..10 {
            vector.push(()).unwrap();
        }

        assert_eq!(vector.len(), 10);
        assert_eq!(vector.capacity(), 16);
        assert_eq!(vector.at(9), Ok(&()));

        while vector.pop().unwrap().is_some() {}

        assert!(vector.is_empty());
    }

    #[test]
    fn zero_sized_items_stop_growing_at_capacity_ceiling() {
        let mut vector = Vector::<()>::with_capacity(usize::MAX).unwrap();

        // Every slot of a zero-sized item type is trivially initialized, so the length can be
        // raised without writing items.
        vector.len = usize::MAX;

        assert_eq!(
            vector.push(()),
            Err(Error::AllocationFailure {
                capacity: usize::MAX,
                item_type: "()",
            })
        );
        assert_eq!(
            vector.insert(0, ()),
            Err(Error::AllocationFailure {
                capacity: usize::MAX,
                item_type: "()",
            })
        );
        assert_eq!(vector.len(), usize::MAX);
        assert_eq!(vector.capacity(), usize::MAX);

        vector.len = 0;
    }

    #[test]
    fn display_of_empty() {
        let vector = Vector::<u32>::new();

        assert_eq!(vector.to_string(), "Vector(size=0, capacity=0) []");
    }

    #[test]
    fn moves_between_threads() {
        let mut vector = Vector::new();
        vector.push(1).unwrap();

        let vector = thread::spawn(move || {
            vector.push(2).unwrap();
            vector
        })
        .join()
        .unwrap();

        assert_eq!(vector.to_string(), "Vector(size=2, capacity=2) [1, 2]");
    }
}
