#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A growable collection that stores its items contiguously in a single owned buffer, with
//! fallible allocation and explicit growth and shrink policies.
//!
//! This crate provides [`Vector`], which offers amortized constant time appends, indexed access
//! and automatic capacity management:
//!
//! * Appending into a full vector doubles its capacity, starting from a single slot.
//! * Removing the last item may halve the capacity again once the vector is only a quarter full,
//!   as governed by the configurable [`ShrinkPolicy`].
//! * Every capacity change allocates the new buffer and moves the items into it before the old
//!   buffer is released. If memory cannot be obtained, the operation returns
//!   [`Error::AllocationFailure`] and the vector is left untouched.
//!
//! # Checked and unchecked access
//!
//! Items can be accessed either through the checked [`Vector::at()`] (returning
//! [`Error::IndexOutOfRange`] for an invalid index) or through the `unsafe`
//! [`Vector::get_unchecked()`], which skips bounds checking entirely and is undefined behavior
//! when misused. The asymmetry is deliberate: the unchecked form has the cost of raw array access.
//!
//! # Example
//!
//! ```
//! use growable_vector::Vector;
//!
//! let mut vector = Vector::new();
//!
//! for value in 1..=5 {
//!     vector.push(value).unwrap();
//! }
//!
//! vector.pop().unwrap();
//! vector.pop().unwrap();
//!
//! assert_eq!(vector.to_string(), "Vector(size=3, capacity=8) [1, 2, 3]");
//! ```
//!
//! # Thread safety
//!
//! A [`Vector`] can be moved between threads if its items can, but it cannot be shared between
//! threads without external synchronization.

mod builder;
mod error;
mod policy;
mod raw_buffer;
mod vector;

pub use builder::*;
pub use error::*;
pub use policy::ShrinkPolicy;
pub(crate) use policy::grown_capacity;
pub(crate) use raw_buffer::*;
pub use vector::*;
