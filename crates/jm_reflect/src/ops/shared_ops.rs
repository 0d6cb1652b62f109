use alloc::boxed::Box;
use core::ops::Deref;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use crate::Reflect;

// -----------------------------------------------------------------------------
// Shared

/// A reference that several owners may hold, guarded by a lock.
///
/// Shared references are how an object graph reaches the same node twice,
/// so [`shared_addr`](Shared::shared_addr) identifies the pointee rather than
/// the handle. Callers that walk a graph should check the address before
/// calling [`read`](Shared::read): re-entering a lock held further up the
/// walk would block.
///
/// ```
/// use std::sync::{Arc, RwLock};
/// use jm_reflect::ops::Shared;
///
/// let a = Arc::new(RwLock::new(5_i32));
/// let b = a.clone();
///
/// assert_eq!(a.shared_addr(), b.shared_addr());
/// assert_eq!(a.read().downcast_ref::<i32>(), Some(&5));
/// ```
pub trait Shared: Reflect {
    /// Returns the address of the shared pointee.
    fn shared_addr(&self) -> usize;

    /// Locks the pointee for reading.
    fn read(&self) -> Box<dyn Deref<Target = dyn Reflect> + '_>;
}

// -----------------------------------------------------------------------------
// SharedReadGuard

/// A read guard viewing the locked value as `dyn Reflect`.
pub struct SharedReadGuard<'a, T: Reflect>(RwLockReadGuard<'a, T>);

impl<'a, T: Reflect> SharedReadGuard<'a, T> {
    /// Locks `lock` for reading.
    ///
    /// A poisoned lock is still read: the walk only inspects the value.
    #[inline]
    pub fn lock(lock: &'a RwLock<T>) -> Self {
        Self(lock.read().unwrap_or_else(PoisonError::into_inner))
    }
}

impl<T: Reflect> Deref for SharedReadGuard<'_, T> {
    type Target = dyn Reflect;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
