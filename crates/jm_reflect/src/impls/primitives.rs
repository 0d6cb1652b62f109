use crate::info::ScalarInfo;

macro_rules! impl_primitive {
    ($($ty:ident)*) => {
        $(
            crate::impl_reflect_scalar!(
                @impl $ty,
                stringify!($ty),
                stringify!($ty),
                stringify!($ty),
                ScalarInfo::new::<$ty>().with_serde::<$ty>()
            );
        )*
    };
}

impl_primitive!(bool char u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize f32 f64);

crate::impl_reflect_scalar!(
    @impl ::alloc::string::String,
    "alloc::string::String",
    "String",
    "String",
    ScalarInfo::new::<::alloc::string::String>().with_serde::<::alloc::string::String>()
);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};

    #[test]
    fn primitive_names() {
        assert_eq!(<u8 as crate::info::TypePath>::type_path(), "u8");
        assert_eq!(String::type_info().type_path(), "alloc::string::String");
        assert_eq!(String::type_info().type_name(), "String");
        assert_eq!(f64::type_info().kind(), ReflectKind::Scalar);
    }

    #[test]
    fn primitive_serde_hooks() {
        let info = i64::type_info().as_scalar().unwrap();
        assert!(info.has_serde());

        let value = serde_json::to_value(info.serializable(&42_i64).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!(42));

        let back = info.deserialize(serde_json::json!(7)).unwrap().unwrap();
        assert_eq!(back.take::<i64>().unwrap(), 7);
    }

    #[test]
    fn set_checks_type() {
        let mut s = String::from("a");
        assert!(s.set(Box::new(String::from("b"))).is_ok());
        assert_eq!(s, "b");

        let rejected = s.set(Box::new(1_u8)).unwrap_err();
        assert!(rejected.is::<u8>());
    }
}
