use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, impl_type_path};
use crate::info::{Generics, OptionalInfo, TypeInfo, TypeParamInfo, Typed};
use crate::ops::Optional;
use crate::reflection::impl_reflect_cast_fn;

impl_type_path!((in "core::option") Option<T>);

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Optional(
                OptionalInfo::new::<T>()
                    .with_generics(Generics::from_params(&[TypeParamInfo::new::<T>("T")])),
            )
        })
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    impl_reflect_cast_fn!(Optional);
}

impl<T: Reflect + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(Reflect::as_reflect_mut)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use crate::Reflect;
    use crate::info::Typed;

    #[test]
    fn optional_factories() {
        let info = <Option<u32>>::type_info().as_optional().unwrap();
        assert!(info.some_type().type_is::<u32>());

        let none = info.none().take::<Option<u32>>().unwrap();
        assert_eq!(none, None);

        let some = info.some(Box::new(5_u32)).unwrap();
        assert_eq!(some.take::<Option<u32>>().unwrap(), Some(5));

        assert!(info.some(Box::new(5_i64)).is_err());
    }

    #[test]
    fn optional_view() {
        let value = Some(3_u8);
        let ops = value.reflect_ref().as_optional().unwrap();
        assert_eq!(ops.value().unwrap().downcast_ref::<u8>(), Some(&3));
        assert!(None::<u8>.reflect_ref().as_optional().is_some_and(|ops| !ops.is_some()));
    }
}
