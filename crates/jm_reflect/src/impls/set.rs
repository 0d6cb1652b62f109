use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use core::hash::Hash;
use std::collections::HashSet;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, impl_type_path};
use crate::info::{Generics, SetInfo, TypeInfo, TypeParamInfo, Typed};
use crate::ops::Set;
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_reflect_for_set {
    ($ident:ident, ordered: $ordered:literal, $($bound:tt)+) => {
        impl<T: Reflect + Typed + $($bound)+> Typed for $ident<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let info = SetInfo::new::<Self, T>()
                        .with_generics(Generics::from_params(&[TypeParamInfo::new::<T>("T")]));
                    TypeInfo::Set(if $ordered { info.ordered() } else { info })
                })
            }
        }

        impl<T: Reflect + Typed + $($bound)+> Reflect for $ident<T> {
            impl_reflect_cast_fn!(Set);
        }

        impl<T: Reflect + Typed + $($bound)+> Set for $ident<T> {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(Self::iter(self).map(Reflect::as_reflect))
            }

            #[inline]
            fn clear(&mut self) {
                Self::clear(self);
            }

            fn insert(&mut self, value: Box<dyn Reflect>) -> Result<bool, Box<dyn Reflect>> {
                Ok(Self::insert(self, value.take::<T>()?))
            }
        }
    };
}

impl_type_path!((in "alloc::collections") BTreeSet<T>);
impl_type_path!((in "std::collections") HashSet<T>);

impl_reflect_for_set!(BTreeSet, ordered: true, Ord);
impl_reflect_for_set!(HashSet, ordered: false, Eq + Hash);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::Typed;

    #[test]
    fn set_iter_and_insert() {
        let mut set: BTreeSet<String> = ["b", "a"].into_iter().map(String::from).collect();

        let ops = set.reflect_ref().as_set().unwrap();
        let items: Vec<&str> = ops
            .iter()
            .map(|item| item.downcast_ref::<String>().unwrap().as_str())
            .collect();
        assert_eq!(items, ["a", "b"]);

        let ops = set.reflect_mut().as_set().unwrap();
        assert_eq!(ops.insert(Box::new(String::from("a"))).ok(), Some(false));
        assert_eq!(ops.insert(Box::new(String::from("c"))).ok(), Some(true));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn set_info() {
        let info = <BTreeSet<i8>>::type_info().as_set().unwrap();
        assert!(info.item().type_is::<i8>());
        assert_eq!(info.type_name(), "BTreeSet<i8>");
        assert!(info.is_ordered());
        assert!(!<std::collections::HashSet<i8>>::type_info().as_set().unwrap().is_ordered());
    }
}
