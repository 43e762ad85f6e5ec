//! Error handling.

use core::alloc::LayoutError;
use core::fmt;

/// An enumeration of errors raised when the backing store cannot be
/// allocated or resized
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// A memory allocation failed
    AllocError,
    /// The requested capacity cannot be represented
    CapacityLimit,
    /// The provided layout was not allocatable
    LayoutError(LayoutError),
}

impl StorageError {
    /// Generic description of this error
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllocError => "Allocation error",
            Self::CapacityLimit => "Exceeded storage capacity limit",
            Self::LayoutError(_) => "Layout error",
        }
    }

    /// Generate a panic with this error as the reason
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}", self.as_str());
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LayoutError> for StorageError {
    fn from(err: LayoutError) -> Self {
        Self::LayoutError(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

/// An error raised by insertion operations when appropriate storage
/// was not available. Includes the value that was to be inserted.
#[derive(Clone)]
pub struct InsertionError<T> {
    pub(crate) error: StorageError,
    pub(crate) value: T,
}

impl<T> InsertionError<T> {
    pub(crate) fn new(error: StorageError, value: T) -> Self {
        Self { error, value }
    }

    /// Generic description of this error
    pub fn as_str(&self) -> &'static str {
        "Insertion error"
    }

    /// Get a reference to the contained `StorageError`
    pub fn error(&self) -> &StorageError {
        &self.error
    }

    /// Unwrap the inner value of this error
    pub fn into_value(self) -> T {
        self.value
    }

    /// Generate a panic with this error as the reason
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}: {}", self.as_str(), self.error.as_str());
    }
}

impl<T> fmt::Debug for InsertionError<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertionError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for InsertionError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}: {}", self.as_str(), self.error))
    }
}

#[cfg(feature = "std")]
impl<T> std::error::Error for InsertionError<T> {}

/// An error raised by a bounds-checked operation when the index, position
/// or range falls outside the live elements of the array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutOfRange {
    /// An element index was not below the length
    Index {
        /// The requested index
        index: usize,
        /// The length of the array
        length: usize,
    },
    /// An insertion position was beyond the end of the array
    Position {
        /// The requested position
        position: usize,
        /// The length of the array
        length: usize,
    },
    /// A range was reversed or extended past the end of the array
    Range {
        /// The first index of the range
        start: usize,
        /// One past the last index of the range
        end: usize,
        /// The length of the array
        length: usize,
    },
    /// A range bound was `usize::MAX` and one past it cannot be represented
    RangeOverflow {
        /// The length of the array
        length: usize,
    },
    /// The array had no elements to remove
    Empty,
}

impl OutOfRange {
    /// Generic description of this error
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index { .. } => "Index out of range",
            Self::Position { .. } => "Insertion position out of range",
            Self::Range { .. } => "Range out of range",
            Self::RangeOverflow { .. } => "Range bound overflows usize",
            Self::Empty => "Array is empty",
        }
    }

    /// Generate a panic with this error as the reason
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}", self);
    }
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index { index, length } => {
                write!(f, "{}: index {index}, length {length}", self.as_str())
            }
            Self::Position { position, length } => {
                write!(f, "{}: position {position}, length {length}", self.as_str())
            }
            Self::Range { start, end, length } => {
                write!(f, "{}: {start}..{end}, length {length}", self.as_str())
            }
            Self::RangeOverflow { length } => write!(f, "{}, length {length}", self.as_str()),
            Self::Empty => f.write_str(self.as_str()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRange {}
