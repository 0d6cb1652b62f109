use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, impl_type_path};
use crate::info::{Generics, ListInfo, TypeInfo, TypeParamInfo, Typed};
use crate::ops::List;
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_reflect_for_list {
    ($ident:ident) => {
        impl<T: Reflect + Typed> Typed for $ident<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::List(
                        ListInfo::new::<Self, T>()
                            .with_generics(Generics::from_params(&[TypeParamInfo::new::<T>("T")])),
                    )
                })
            }
        }

        impl<T: Reflect + Typed> Reflect for $ident<T> {
            impl_reflect_cast_fn!(List);
        }
    };
}

impl_type_path!((in "alloc::vec") Vec<T>);
impl_type_path!((in "alloc::collections") VecDeque<T>);

impl_reflect_for_list!(Vec);
impl_reflect_for_list!(VecDeque);

// `get` and `iter` of `Vec` live on the slice, so they are called through it.
impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice().get_mut(index).map(Reflect::as_reflect_mut)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.as_slice().iter().map(Reflect::as_reflect))
    }

    #[inline]
    fn clear(&mut self) {
        Self::clear(self);
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Self::push(self, value.take::<T>()?);
        Ok(())
    }
}

impl<T: Reflect + Typed> List for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        Self::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        Self::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(Self::iter(self).map(Reflect::as_reflect))
    }

    #[inline]
    fn clear(&mut self) {
        Self::clear(self);
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Self::push_back(self, value.take::<T>()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};

    #[test]
    fn list_names() {
        assert_eq!(<Vec<i32>>::type_path(), "alloc::vec::Vec<i32>");
        assert_eq!(<Vec<i32>>::type_name(), "Vec<i32>");
        assert_eq!(<Vec<i32>>::type_ident(), "Vec");

        let info = <VecDeque<u8>>::type_info().as_list().unwrap();
        assert!(info.item().type_is::<u8>());
        assert_eq!(info.generics()[0].name(), "T");
    }

    #[test]
    fn list_refill() {
        let mut list = vec![1_i32, 2, 3];
        let ops = list.reflect_mut().as_list().unwrap();

        ops.clear();
        ops.push(Box::new(9_i32)).unwrap();
        assert!(ops.push(Box::new(1_u8)).is_err());
        assert_eq!(ops.len(), 1);

        assert_eq!(list, [9]);
    }

    #[test]
    fn list_empty_factory() {
        let info = <Vec<u16>>::type_info().as_list().unwrap();
        let empty = info.empty().take::<Vec<u16>>().unwrap();
        assert!(empty.is_empty());
    }
}
