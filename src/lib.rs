//! A growable, contiguous array with bounds-checked and unchecked access
#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod array;

pub mod capacity;

pub(crate) mod error;

pub(crate) mod storage;

pub use {
    self::array::{DynArray, IntoIter},
    self::capacity::{Grow, GrowDoubling, GrowExact},
    self::error::{InsertionError, OutOfRange, StorageError},
};
