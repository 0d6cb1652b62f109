use alloc::boxed::Box;
use alloc::sync::Arc;
use core::ops::Deref;
use std::sync::RwLock;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{Generics, SharedInfo, TypeInfo, TypeParamInfo, TypePath, Typed};
use crate::ops::{Shared, SharedReadGuard};
use crate::reflection::impl_reflect_cast_fn;

impl<T: TypePath> TypePath for Arc<RwLock<T>> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["alloc::sync::Arc<std::sync::RwLock<", T::type_path(), ">>"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Arc<RwLock<", T::type_name(), ">>"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Arc"
    }
}

impl<T: Reflect + Typed> Typed for Arc<RwLock<T>> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Shared(
                SharedInfo::new::<Self, T>(wrap::<T>)
                    .with_generics(Generics::from_params(&[TypeParamInfo::new::<T>("T")])),
            )
        })
    }
}

fn wrap<T: Reflect + Typed>(value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    let value = value.take::<T>()?;
    Ok(Box::new(Arc::new(RwLock::new(value))))
}

impl<T: Reflect + Typed> Reflect for Arc<RwLock<T>> {
    impl_reflect_cast_fn!(Shared);
}

impl<T: Reflect + Typed> Shared for Arc<RwLock<T>> {
    #[inline]
    fn shared_addr(&self) -> usize {
        Arc::as_ptr(self).cast::<()>() as usize
    }

    fn read(&self) -> Box<dyn Deref<Target = dyn Reflect> + '_> {
        Box::new(SharedReadGuard::lock(self))
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::sync::Arc;
    use std::sync::RwLock;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};

    #[test]
    fn shared_identity() {
        let a = Arc::new(RwLock::new(1_i32));
        let b = Arc::clone(&a);
        let c = Arc::new(RwLock::new(1_i32));

        let addr = |value: &Arc<RwLock<i32>>| value.reflect_ref().as_shared().unwrap().shared_addr();
        assert_eq!(addr(&a), addr(&b));
        assert_ne!(addr(&a), addr(&c));
    }

    #[test]
    fn shared_read_and_wrap() {
        let a = Arc::new(RwLock::new(String::from("x")));
        let ops = a.reflect_ref().as_shared().unwrap();
        assert_eq!(ops.read().downcast_ref::<String>().unwrap(), "x");

        let info = <Arc<RwLock<u8>>>::type_info().as_shared().unwrap();
        assert_eq!(<Arc<RwLock<u8>>>::type_name(), "Arc<RwLock<u8>>");
        let wrapped = info.wrap(Box::new(4_u8)).unwrap();
        let shared = wrapped.take::<Arc<RwLock<u8>>>().unwrap();
        assert_eq!(*shared.read().unwrap(), 4);
    }
}
