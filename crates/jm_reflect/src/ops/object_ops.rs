use crate::Reflect;

// -----------------------------------------------------------------------------
// Object

/// Access to the named fields of a struct.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) for structs
/// with named fields. Field order is declaration order.
///
/// # Examples
///
/// ```
/// use jm_reflect::{derive::Reflect, ops::Object};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Foo { a: i32, b: bool }
///
/// let mut foo = Foo { a: 1, b: true };
///
/// assert!(foo.field("a").is_some());
/// assert!(foo.field("c").is_none());
///
/// *foo.field_mut("a").unwrap().downcast_mut::<i32>().unwrap() = 42;
/// assert_eq!(foo.a, 42);
/// ```
pub trait Object: Reflect {
    /// Returns the field at `index`, or `None` if out of bounds.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index` mutably, or `None` if out of bounds.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the number of fields.
    fn field_len(&self) -> usize;

    /// Returns the field named `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect> {
        let index = self.reflect_type_info().as_object()?.index_of(name)?;
        self.field_at(index)
    }

    /// Returns the field named `name` mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect> {
        let index = self.reflect_type_info().as_object()?.index_of(name)?;
        self.field_at_mut(index)
    }

    /// Returns the name of the field at `index`.
    fn name_at(&self, index: usize) -> Option<&'static str> {
        let info = self.reflect_type_info().as_object()?;
        info.field_at(index).map(|field| field.name())
    }
}

impl<'a> IntoIterator for &'a dyn Object {
    type Item = (&'static str, &'a dyn Reflect);
    type IntoIter = ObjectFieldIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        ObjectFieldIter::new(self)
    }
}

impl dyn Object {
    /// Returns an iterator over `(name, value)` pairs in declaration order.
    #[inline]
    pub fn iter_fields(&self) -> ObjectFieldIter<'_> {
        ObjectFieldIter::new(self)
    }
}

// -----------------------------------------------------------------------------
// ObjectFieldIter

/// An iterator over the fields of an [`Object`].
pub struct ObjectFieldIter<'a> {
    object: &'a dyn Object,
    index: usize,
}

impl<'a> ObjectFieldIter<'a> {
    /// Creates an iterator starting at the first field.
    #[inline(always)]
    pub const fn new(object: &'a dyn Object) -> Self {
        Self { object, index: 0 }
    }
}

impl<'a> Iterator for ObjectFieldIter<'a> {
    type Item = (&'static str, &'a dyn Reflect);

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.object.field_at(self.index)?;
        let name = self.object.name_at(self.index)?;
        self.index += 1;
        Some((name, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let hint = self.object.field_len().saturating_sub(self.index);
        (hint, Some(hint))
    }
}

impl ExactSizeIterator for ObjectFieldIter<'_> {}
