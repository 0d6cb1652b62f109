use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId};

use jm_utils::hash::HashMap;

use crate::Reflect;
use crate::info::{CustomAttributes, Generics, Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::{ConstructError, NamedArgs};

// -----------------------------------------------------------------------------
// FieldInfo

/// Information of a declared (named) field.
///
/// # Examples
///
/// ```
/// use jm_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Foo {
///     field_a: f32,
/// }
///
/// let info = Foo::type_info().as_object().unwrap();
/// let field = info.field_at(0).unwrap();
///
/// assert!(field.type_is::<f32>());
/// assert_eq!(field.name(), "field_a");
/// ```
#[derive(Clone, Debug)]
pub struct FieldInfo {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    // Use `Option` to avoid a heap allocation for fields without attributes.
    custom_attributes: Option<Arc<CustomAttributes>>,
}

impl FieldInfo {
    /// Creates a new [`FieldInfo`] for the given field `name` and type `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name,
            type_info: T::type_info,
            custom_attributes: None,
        }
    }

    /// Replaces stored attributes (overwrite, do not merge).
    ///
    /// Used by the proc-macro crate.
    pub fn with_custom_attributes(self, attributes: CustomAttributes) -> Self {
        if attributes.is_empty() {
            Self {
                custom_attributes: None,
                ..self
            }
        } else {
            Self {
                custom_attributes: Some(Arc::new(attributes)),
                ..self
            }
        }
    }

    /// Returns the field name as declared.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the `TypeId` of the field type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the field type is `T`.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the attributes attached by `#[reflect(@expr)]`.
    #[inline]
    pub fn custom_attributes(&self) -> &CustomAttributes {
        match &self.custom_attributes {
            Some(attrs) => attrs,
            None => CustomAttributes::EMPTY,
        }
    }

    /// Returns the attribute of type `T`, if present.
    #[inline]
    pub fn get_attribute<T: Any>(&self) -> Option<&T> {
        self.custom_attributes().get::<T>()
    }
}

// -----------------------------------------------------------------------------
// Constructor

/// A constructor taking every value at once, by parameter name.
///
/// Types that cannot be default-constructed and mutated afterwards expose
/// one of these (`#[reflect(constructor)]`).
#[derive(Clone, Debug)]
pub struct Constructor {
    params: Box<[&'static str]>,
    func: fn(NamedArgs) -> Result<Box<dyn Reflect>, ConstructError>,
}

impl Constructor {
    /// Creates a constructor with the given parameter names.
    #[inline]
    pub fn new(
        params: &[&'static str],
        func: fn(NamedArgs) -> Result<Box<dyn Reflect>, ConstructError>,
    ) -> Self {
        Self {
            params: params.into(),
            func,
        }
    }

    /// Returns the parameter names in declaration order.
    #[inline]
    pub fn params(&self) -> &[&'static str] {
        &self.params
    }

    /// Invokes the constructor once with the collected arguments.
    #[inline]
    pub fn call(&self, args: NamedArgs) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.func)(args)
    }
}

// -----------------------------------------------------------------------------
// ObjectInfo

/// Type information of a struct with named fields.
///
/// Besides the ordered field list, it records how the type can be
/// instantiated: through a `default` function (fields assigned afterwards),
/// through a named-argument [`Constructor`], both, or neither.
#[derive(Clone, Debug)]
pub struct ObjectInfo {
    ty: Type,
    generics: Generics,
    fields: Box<[FieldInfo]>,
    field_indices: HashMap<&'static str, usize>,
    default: Option<fn() -> Box<dyn Reflect>>,
    constructor: Option<Constructor>,
}

impl ObjectInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ObjectInfo`] with fields in declaration order.
    pub fn new<T: TypePath + ?Sized>(fields: &[FieldInfo]) -> Self {
        let field_indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name(), index))
            .collect();

        Self {
            ty: Type::of::<T>(),
            generics: Generics::new(),
            fields: fields.into(),
            field_indices,
            default: None,
            constructor: None,
        }
    }

    /// Replaces the generic parameters.
    #[inline]
    pub fn with_generics(self, generics: Generics) -> Self {
        Self { generics, ..self }
    }

    /// Registers a no-argument constructor.
    #[inline]
    pub fn with_default(self, default: fn() -> Box<dyn Reflect>) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    /// Registers a named-argument constructor.
    #[inline]
    pub fn with_constructor(self, constructor: Constructor) -> Self {
        Self {
            constructor: Some(constructor),
            ..self
        }
    }

    /// Returns the generic parameters.
    #[inline]
    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    /// Returns all fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Returns the field with the given name.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.index_of(name).map(|index| &self.fields[index])
    }

    /// Returns the field at the given index.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Returns the index of the field with the given name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the no-argument constructor, if any.
    #[inline]
    pub fn default_fn(&self) -> Option<fn() -> Box<dyn Reflect>> {
        self.default
    }

    /// Returns the named-argument constructor, if any.
    #[inline]
    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }
}
