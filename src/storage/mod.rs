//! Backing storage for arrays.

use core::mem::size_of;
use core::ptr::NonNull;

use alloc::alloc::{alloc as raw_alloc, dealloc as raw_dealloc, realloc as raw_realloc};

use crate::error::StorageError;

pub(crate) mod utils;

use self::utils::array_layout;

/// An allocation with room for `capacity` values of `T`.
///
/// The buffer does not track which slots are initialized and never drops
/// its contents; it only releases the allocation.
#[derive(Debug)]
pub(crate) struct RawBuffer<T> {
    data: NonNull<T>,
    capacity: usize,
}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = size_of::<T>() == 0;

    /// An empty buffer. Zero-sized types never allocate and report an
    /// unlimited capacity.
    pub const NEW: Self = Self {
        data: NonNull::dangling(),
        capacity: if Self::IS_ZST { usize::MAX } else { 0 },
    };

    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        let mut buf = Self::NEW;
        if capacity > buf.capacity {
            buf.try_resize(capacity)?;
        }
        Ok(buf)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn data_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn data_ptr_mut(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    /// Resize the allocation to hold exactly `capacity` values.
    ///
    /// Slots below the smaller of the old and new capacity keep their
    /// contents. On failure the existing allocation is left untouched.
    pub fn try_resize(&mut self, capacity: usize) -> Result<(), StorageError> {
        if Self::IS_ZST || capacity == self.capacity {
            return Ok(());
        }
        if capacity == 0 {
            self.release();
            return Ok(());
        }
        let new_layout = array_layout::<T>(capacity)?;
        let ptr = if self.capacity == 0 {
            unsafe { raw_alloc(new_layout) }
        } else {
            let old_layout = array_layout::<T>(self.capacity)?;
            unsafe { raw_realloc(self.data.as_ptr().cast(), old_layout, new_layout.size()) }
        };
        let Some(data) = NonNull::new(ptr.cast::<T>()) else {
            return Err(StorageError::AllocError);
        };
        self.data = data;
        self.capacity = capacity;
        Ok(())
    }

    fn release(&mut self) {
        if Self::IS_ZST || self.capacity == 0 {
            return;
        }
        // the layout was validated when the allocation was made
        if let Ok(layout) = array_layout::<T>(self.capacity) {
            unsafe { raw_dealloc(self.data.as_ptr().cast(), layout) };
        }
        self.data = NonNull::dangling();
        self.capacity = 0;
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        self.release();
    }
}
