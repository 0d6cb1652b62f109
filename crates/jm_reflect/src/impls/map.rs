use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::Hash;
use std::collections::HashMap;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, impl_type_path};
use crate::info::{Generics, MapInfo, TypeInfo, TypeParamInfo, Typed};
use crate::ops::Map;
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_reflect_for_map {
    ($ident:ident, ordered: $ordered:literal, $($bound:tt)+) => {
        impl<K, V> Typed for $ident<K, V>
        where
            K: Reflect + Typed + $($bound)+,
            V: Reflect + Typed,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let info = MapInfo::new::<Self, K, V>().with_generics(Generics::from_params(&[
                        TypeParamInfo::new::<K>("K"),
                        TypeParamInfo::new::<V>("V"),
                    ]));
                    TypeInfo::Map(if $ordered { info.ordered() } else { info })
                })
            }
        }

        impl<K, V> Reflect for $ident<K, V>
        where
            K: Reflect + Typed + $($bound)+,
            V: Reflect + Typed,
        {
            impl_reflect_cast_fn!(Map);
        }

        impl<K, V> Map for $ident<K, V>
        where
            K: Reflect + Typed + $($bound)+,
            V: Reflect + Typed,
        {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(Self::iter(self).map(|(key, value)| (key.as_reflect(), value.as_reflect())))
            }

            #[inline]
            fn clear(&mut self) {
                Self::clear(self);
            }

            fn insert(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
                let key = match key.take::<K>() {
                    Ok(key) => key,
                    Err(key) => return Err((key, value)),
                };
                let value = match value.take::<V>() {
                    Ok(value) => value,
                    Err(value) => return Err((Box::new(key) as Box<dyn Reflect>, value)),
                };
                Self::insert(self, key, value);
                Ok(())
            }
        }
    };
}

impl_type_path!((in "alloc::collections") BTreeMap<K, V>);
impl_type_path!((in "std::collections") HashMap<K, V>);

impl_reflect_for_map!(BTreeMap, ordered: true, Ord);
impl_reflect_for_map!(HashMap, ordered: false, Eq + Hash);
