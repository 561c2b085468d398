use thiserror::Error;

/// Errors that can occur when operating on a [`Vector`][crate::Vector].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Storage for the requested number of items could not be obtained, either because the
    /// allocator returned no memory or because the requested capacity does not fit in the
    /// address space.
    ///
    /// The operation that returned this error has not modified the vector.
    #[error("failed to allocate storage for {capacity} items of {item_type}")]
    AllocationFailure {
        /// The capacity (in items) that was requested.
        capacity: usize,

        /// Name of the item type, for diagnostics.
        item_type: &'static str,
    },

    /// A checked access or insertion used an index that is not valid for the current length.
    #[error("index {index} is out of range for a vector of length {len}")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,

        /// The length of the vector at the time of the request.
        len: usize,
    },
}

/// A specialized `Result` type for vector operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
