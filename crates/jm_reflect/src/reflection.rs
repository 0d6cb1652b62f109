use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::info::{DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime reflection.
///
/// A `dyn Reflect` value can be inspected without knowing its concrete type:
/// [`reflect_ref`](Reflect::reflect_ref) and [`reflect_mut`](Reflect::reflect_mut)
/// cast it to one of the [kinds](ReflectKind) (object, enum, list, map ...),
/// and [`reflect_type_info`](DynamicTyped::reflect_type_info) returns the static
/// [`TypeInfo`](crate::info::TypeInfo) of the underlying type.
///
/// It is strongly recommended to use [the derive macro](crate::derive::Reflect)
/// instead of implementing this trait by hand. Leaf value types can use
/// [`impl_reflect_scalar!`](crate::impl_reflect_scalar).
///
/// # Type Identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the id of the box itself.
/// Use [`Reflect::ty_id`] instead:
///
/// ```
/// use jm_reflect::Reflect;
/// use core::any::{Any, TypeId};
///
/// let x: Box<dyn Reflect> = Box::new(32_i32);
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
pub trait Reflect: DynamicTyped + Send + Sync + Any {
    /// Casts this type to a fully-reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable, fully-reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Moves this value into a `Box<dyn Reflect>`.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the [kind](ReflectKind) of this value.
    fn reflect_kind(&self) -> ReflectKind;

    /// Returns an immutable view of this value as its [kind](ReflectRef).
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable view of this value as its [kind](ReflectMut).
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Performs a type-checked assignment of a reflected value to this value.
    ///
    /// If `value` is not of the same type, it is handed back unchanged.
    ///
    /// ```
    /// use jm_reflect::Reflect;
    ///
    /// let mut x = 1_u8;
    /// assert!(x.set(Box::new(7_u8)).is_ok());
    /// assert!(x.set(Box::new(7_i64)).is_err());
    /// assert_eq!(x, 7);
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }

    /// Takes the value out of the box as `T`,
    /// or returns the box unchanged if the type does not match.
    pub fn take<T: Any>(self: Box<Self>) -> Result<T, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type id was checked before the downcast"),
        }
    }

    /// Returns the address of the value, used as its identity.
    ///
    /// Two values of different types may share an address (a struct and its
    /// first field), so identity comparisons should pair this with [`Reflect::ty_id`].
    #[inline]
    pub fn addr(&self) -> usize {
        (self as *const dyn Reflect).cast::<()>() as usize
    }
}

impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Reflect({}: {})",
            self.reflect_kind(),
            self.reflect_type_info().type_path()
        )
    }
}

/// Implement `set`, `reflect_kind`, `reflect_ref` and `reflect_mut` for a kind.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
