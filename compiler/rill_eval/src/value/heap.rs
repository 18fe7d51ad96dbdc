//! Reference-counted storage for composite values.
//!
//! `Heap<T>` is the only way a [`Value`](super::Value) holds heap data. The
//! constructor is `pub(super)`, so composites are always created through the
//! factory methods on `Value`.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Shared handle to a heap payload with copy-on-write mutation.
///
/// Cloning a `Heap` clones the handle, not the payload. [`Heap::make_mut`]
/// detaches the handle before the first write, so a mutation made through
/// one binding is never observed through another.
#[repr(transparent)]
pub struct Heap<T>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }

    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Mutable access to the payload if this is the only handle to it.
    #[inline]
    pub(super) fn get_mut(&mut self) -> Option<&mut T> {
        Rc::get_mut(&mut self.0)
    }
}

impl<T: Clone> Heap<T> {
    /// Mutable access to the payload, copying it first if it is shared.
    #[inline]
    pub(crate) fn make_mut(&mut self) -> &mut T {
        Rc::make_mut(&mut self.0)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        Heap::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
