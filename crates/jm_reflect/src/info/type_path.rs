use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// Static names of a type.
///
/// For generic types the names include the arguments, e.g.
/// `Vec<i32>` has path `alloc::vec::Vec<i32>`, name `Vec<i32>` and ident `Vec`.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect).
pub trait TypePath: 'static {
    /// Full path, e.g. `my_crate::model::Car`.
    fn type_path() -> &'static str;

    /// Short name with generics, e.g. `Car` or `Vec<u8>`.
    fn type_name() -> &'static str;

    /// Bare identifier without generics, e.g. `Vec`.
    fn type_ident() -> &'static str;
}

// -----------------------------------------------------------------------------
// Type

/// The identity of a type: its [`TypeId`] and its names.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: &'static str,
    ident: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path(),
            name: T::type_name(),
            ident: T::type_ident(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the short type name, generics included.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the bare identifier, generics excluded.
    #[inline]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

/// Implement `ty`, `type_id`, `type_path`, `type_name`, `type_ident` and `type_is`.
///
/// With a field name, `ty` reads that `Type` field. Without one, the caller
/// provides `ty` itself.
macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the [`Type`](crate::info::Type) identity.
        #[inline]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        $crate::info::impl_type_fn!();
    };
    () => {
        /// Returns the [`TypeId`](core::any::TypeId).
        #[inline]
        pub const fn type_id(&self) -> ::core::any::TypeId {
            self.ty().id()
        }

        /// Returns the full type path.
        #[inline]
        pub const fn type_path(&self) -> &'static str {
            self.ty().path()
        }

        /// Returns the short type name.
        #[inline]
        pub const fn type_name(&self) -> &'static str {
            self.ty().name()
        }

        /// Returns the bare identifier.
        #[inline]
        pub const fn type_ident(&self) -> &'static str {
            self.ty().ident()
        }

        /// Check if the given type matches this one.
        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.ty().is::<T>()
        }
    };
}

pub(crate) use impl_type_fn;
