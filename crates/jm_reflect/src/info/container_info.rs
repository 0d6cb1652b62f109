use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{Generics, Type, TypeInfo, TypePath, Typed, impl_type_fn};

// -----------------------------------------------------------------------------
// ElementInfo

/// The element type of a container: its identity and a lazy [`TypeInfo`].
#[derive(Clone, Copy, Debug)]
pub struct ElementInfo {
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
}

impl ElementInfo {
    impl_type_fn!(ty);

    /// Creates the element info of `T`.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            type_info: T::type_info,
        }
    }

    /// Returns the [`TypeInfo`] of the element type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

// -----------------------------------------------------------------------------
// ListInfo

/// Type information of an ordered sequence, such as `Vec<T>`.
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    generics: Generics,
    item: ElementInfo,
    empty: fn() -> Box<dyn Reflect>,
}

impl ListInfo {
    impl_type_fn!(ty);

    /// Creates the info of list `T` holding `Item`.
    #[inline]
    pub fn new<T: Reflect + TypePath + Default, Item: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            generics: Generics::new(),
            item: ElementInfo::of::<Item>(),
            empty: empty_of::<T>,
        }
    }

    /// Replaces the generic parameters.
    #[inline]
    pub fn with_generics(self, generics: Generics) -> Self {
        Self { generics, ..self }
    }

    /// Returns the generic parameters.
    #[inline]
    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    /// Returns the element type.
    #[inline]
    pub fn item(&self) -> &ElementInfo {
        &self.item
    }

    /// Creates an empty list of this type.
    #[inline]
    pub fn empty(&self) -> Box<dyn Reflect> {
        (self.empty)()
    }
}

// -----------------------------------------------------------------------------
// SetInfo

/// Type information of a set, such as `BTreeSet<T>`.
#[derive(Clone, Debug)]
pub struct SetInfo {
    ty: Type,
    generics: Generics,
    item: ElementInfo,
    ordered: bool,
    empty: fn() -> Box<dyn Reflect>,
}

impl SetInfo {
    impl_type_fn!(ty);

    /// Creates the info of set `T` holding `Item`.
    ///
    /// The set is taken to iterate in no particular order.
    #[inline]
    pub fn new<T: Reflect + TypePath + Default, Item: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            generics: Generics::new(),
            item: ElementInfo::of::<Item>(),
            ordered: false,
            empty: empty_of::<T>,
        }
    }

    /// Replaces the generic parameters.
    #[inline]
    pub fn with_generics(self, generics: Generics) -> Self {
        Self { generics, ..self }
    }

    /// Marks the set as iterating in a stable order, such as `BTreeSet<T>`.
    #[inline]
    pub fn ordered(self) -> Self {
        Self { ordered: true, ..self }
    }

    /// Returns `true` if iteration order depends only on the contents.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Returns the generic parameters.
    #[inline]
    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    /// Returns the element type.
    #[inline]
    pub fn item(&self) -> &ElementInfo {
        &self.item
    }

    /// Creates an empty set of this type.
    #[inline]
    pub fn empty(&self) -> Box<dyn Reflect> {
        (self.empty)()
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Type information of a key-value map, such as `BTreeMap<K, V>`.
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    generics: Generics,
    key: ElementInfo,
    value: ElementInfo,
    ordered: bool,
    empty: fn() -> Box<dyn Reflect>,
}

impl MapInfo {
    impl_type_fn!(ty);

    /// Creates the info of map `T` from `K` to `V`.
    ///
    /// The map is taken to iterate in no particular order.
    #[inline]
    pub fn new<T: Reflect + TypePath + Default, K: Typed, V: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            generics: Generics::new(),
            key: ElementInfo::of::<K>(),
            value: ElementInfo::of::<V>(),
            ordered: false,
            empty: empty_of::<T>,
        }
    }

    /// Replaces the generic parameters.
    #[inline]
    pub fn with_generics(self, generics: Generics) -> Self {
        Self { generics, ..self }
    }

    /// Marks the map as iterating in key order, such as `BTreeMap<K, V>`.
    #[inline]
    pub fn ordered(self) -> Self {
        Self { ordered: true, ..self }
    }

    /// Returns `true` if iteration order depends only on the contents.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Returns the generic parameters.
    #[inline]
    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    /// Returns the key type.
    #[inline]
    pub fn key(&self) -> &ElementInfo {
        &self.key
    }

    /// Returns the value type.
    #[inline]
    pub fn value(&self) -> &ElementInfo {
        &self.value
    }

    /// Creates an empty map of this type.
    #[inline]
    pub fn empty(&self) -> Box<dyn Reflect> {
        (self.empty)()
    }
}

// -----------------------------------------------------------------------------
// OptionalInfo

/// Type information of an optional value, `Option<T>`.
///
/// JSON `null` maps to [`none`](OptionalInfo::none).
#[derive(Clone, Debug)]
pub struct OptionalInfo {
    ty: Type,
    generics: Generics,
    some: ElementInfo,
    make_none: fn() -> Box<dyn Reflect>,
    make_some: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

impl OptionalInfo {
    impl_type_fn!(ty);

    /// Creates the info of `Option<T>`.
    #[inline]
    pub fn new<T: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<Option<T>>(),
            generics: Generics::new(),
            some: ElementInfo::of::<T>(),
            make_none: || Box::new(None::<T>),
            make_some: |value| value.take::<T>().map(|v| Box::new(Some(v)) as Box<dyn Reflect>),
        }
    }

    /// Replaces the generic parameters.
    #[inline]
    pub fn with_generics(self, generics: Generics) -> Self {
        Self { generics, ..self }
    }

    /// Returns the generic parameters.
    #[inline]
    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    /// Returns the type of the present value.
    #[inline]
    pub fn some_type(&self) -> &ElementInfo {
        &self.some
    }

    /// Creates an absent value.
    #[inline]
    pub fn none(&self) -> Box<dyn Reflect> {
        (self.make_none)()
    }

    /// Wraps `value` as a present value.
    ///
    /// Returns the value unchanged if it is not of the inner type.
    #[inline]
    pub fn some(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.make_some)(value)
    }
}

// -----------------------------------------------------------------------------
// SharedInfo

/// Type information of a shared, lockable reference, `Arc<RwLock<T>>`.
///
/// Shared references are the only way for a graph to reach a node twice,
/// so they are where cycles can appear.
#[derive(Clone, Debug)]
pub struct SharedInfo {
    ty: Type,
    generics: Generics,
    inner: ElementInfo,
    wrap: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

impl SharedInfo {
    impl_type_fn!(ty);

    /// Creates the info of shared type `T` around `Inner`.
    #[inline]
    pub fn new<T: TypePath, Inner: Typed>(
        wrap: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            generics: Generics::new(),
            inner: ElementInfo::of::<Inner>(),
            wrap,
        }
    }

    /// Replaces the generic parameters.
    #[inline]
    pub fn with_generics(self, generics: Generics) -> Self {
        Self { generics, ..self }
    }

    /// Returns the generic parameters.
    #[inline]
    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    /// Returns the type behind the reference.
    #[inline]
    pub fn inner(&self) -> &ElementInfo {
        &self.inner
    }

    /// Moves `value` into a new shared reference.
    ///
    /// Returns the value unchanged if it is not of the inner type.
    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(value)
    }
}

fn empty_of<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}
