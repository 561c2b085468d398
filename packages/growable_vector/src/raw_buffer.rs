use std::alloc::{Layout, alloc, dealloc};
use std::any::type_name;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::slice;

use crate::{Error, Result};

/// Exclusively owned, uninitialized storage for `capacity` items of type `T`.
///
/// The buffer only manages memory. It never reads, writes or drops items on its own; tracking
/// which slots hold initialized items is the responsibility of the owner. Dropping the buffer
/// releases the memory exactly once.
///
/// A buffer with zero capacity owns no allocation. Zero-sized item types never allocate
/// either, regardless of capacity.
pub(crate) struct RawBuffer<T> {
    first_slot_ptr: NonNull<T>,
    capacity: usize,

    _items: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    /// A buffer with no capacity and no allocation.
    #[must_use]
    pub(crate) const fn empty() -> Self {
        Self {
            first_slot_ptr: NonNull::dangling(),
            capacity: 0,
            _items: PhantomData,
        }
    }

    /// Allocates storage for exactly `capacity` items.
    ///
    /// Returns an error if the memory cannot be obtained or if the capacity is too large to be
    /// expressed as a memory layout.
    pub(crate) fn allocate(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Ok(Self::empty());
        }

        let layout = Self::layout(capacity).ok_or(Error::AllocationFailure {
            capacity,
            item_type: type_name::<T>(),
        })?;

        if layout.size() == 0 {
            return Ok(Self {
                first_slot_ptr: NonNull::dangling(),
                capacity,
                _items: PhantomData,
            });
        }

        // SAFETY: The layout is valid for `capacity` items of `T` and we checked above
        // that it is not zero-sized.
        let ptr = unsafe { alloc(layout) };

        let first_slot_ptr = NonNull::new(ptr.cast::<T>()).ok_or(Error::AllocationFailure {
            capacity,
            item_type: type_name::<T>(),
        })?;

        Ok(Self {
            first_slot_ptr,
            capacity,
            _items: PhantomData,
        })
    }

    #[must_use]
    fn layout(capacity: usize) -> Option<Layout> {
        Layout::array::<T>(capacity).ok()
    }

    #[must_use]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pointer to the slot at `index`. The slot may or may not hold an initialized item.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than the capacity.
    #[must_use]
    pub(crate) fn slot_ptr(&self, index: usize) -> NonNull<T> {
        assert!(
            index < self.capacity,
            "slot {index} out of bounds in buffer of {} {}",
            self.capacity,
            type_name::<T>()
        );

        // SAFETY: Guarded by bounds check above, so the offset stays within the allocation.
        unsafe { self.first_slot_ptr.add(index) }
    }

    /// Pointer to the slot at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than the capacity.
    #[must_use]
    pub(crate) unsafe fn slot_ptr_unchecked(&self, index: usize) -> NonNull<T> {
        debug_assert!(index < self.capacity);

        // SAFETY: Forwarding guarantee from the caller that the index is in bounds.
        unsafe { self.first_slot_ptr.add(index) }
    }

    /// Moves the first `count` items of this buffer into the first `count` slots of `target`,
    /// preserving order. Afterwards the moved-from slots in `self` are logically uninitialized.
    ///
    /// # Safety
    ///
    /// The first `count` slots of `self` must hold initialized items and `count` must not exceed
    /// the capacity of either buffer. The first `count` slots of `target` must not hold items
    /// that still need to be dropped.
    #[allow(
        clippy::needless_pass_by_ref_mut,
        reason = "mutation happens through the slot pointers, which the lint cannot see"
    )]
    pub(crate) unsafe fn move_prefix_into(&self, target: &mut Self, count: usize) {
        debug_assert!(count <= self.capacity);
        debug_assert!(count <= target.capacity);

        // SAFETY: Both buffers are valid for `count` items per the caller's guarantee and two
        // distinct buffers never overlap because each owns its own allocation.
        unsafe {
            ptr::copy_nonoverlapping(
                self.first_slot_ptr.as_ptr(),
                target.first_slot_ptr.as_ptr(),
                count,
            );
        }
    }

    /// The first `len` slots as a slice.
    ///
    /// # Safety
    ///
    /// The first `len` slots must hold initialized items and `len` must not exceed the capacity.
    #[must_use]
    pub(crate) unsafe fn prefix(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.capacity);

        // SAFETY: Forwarding guarantee from the caller that the slots are initialized.
        unsafe { slice::from_raw_parts(self.first_slot_ptr.as_ptr(), len) }
    }

    /// Drops the items in the first `len` slots in place, leaving the slots uninitialized.
    ///
    /// # Safety
    ///
    /// The first `len` slots must hold initialized items and `len` must not exceed the capacity.
    /// The items must not be used again afterwards.
    #[allow(
        clippy::needless_pass_by_ref_mut,
        reason = "mutation happens through the slot pointers, which the lint cannot see"
    )]
    pub(crate) unsafe fn drop_prefix(&mut self, len: usize) {
        debug_assert!(len <= self.capacity);

        let items = ptr::slice_from_raw_parts_mut(self.first_slot_ptr.as_ptr(), len);

        // SAFETY: Forwarding guarantee from the caller that the slots are initialized
        // and will not be used again.
        unsafe {
            ptr::drop_in_place(items);
        }
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.capacity == 0 || size_of::<T>() == 0 {
            return;
        }

        let layout = Self::layout(self.capacity)
            .expect("layout was calculable when the buffer was allocated");

        // SAFETY: The layout must match between alloc and dealloc. It does.
        unsafe {
            dealloc(self.first_slot_ptr.as_ptr().cast(), layout);
        }
    }
}

// SAFETY: Yes, there are raw pointers involved here but nothing inherently non-thread-mobile
// about it, so as long as T itself can move between threads, the buffer can do so, too.
unsafe impl<T: Send> Send for RawBuffer<T> {}
