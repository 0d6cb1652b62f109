use crate::info::ScalarInfo;

macro_rules! impl_foreign_scalar {
    ($($ty:ty => $path:literal, $name:literal, $ident:literal;)*) => {
        $(
            crate::impl_reflect_scalar!(@impl $ty, $path, $name, $ident, ScalarInfo::new::<$ty>());
        )*
    };
}

// These types have no `serde` hooks. Their JSON form is owned by the
// dedicated converters of the mapping engine.
impl_foreign_scalar! {
    chrono::NaiveDateTime => "chrono::naive::NaiveDateTime", "NaiveDateTime", "NaiveDateTime";
    chrono::NaiveDate => "chrono::naive::NaiveDate", "NaiveDate", "NaiveDate";
    chrono::DateTime<chrono::Utc> => "chrono::DateTime<chrono::offset::Utc>", "DateTime<Utc>", "DateTime";
    rust_decimal::Decimal => "rust_decimal::Decimal", "Decimal", "Decimal";
    bytes::Bytes => "bytes::Bytes", "Bytes", "Bytes";
    http::Uri => "http::uri::Uri", "Uri", "Uri";
    regex::Regex => "regex::Regex", "Regex", "Regex";
}

#[cfg(test)]
mod tests {
    use crate::info::{ReflectKind, Typed};

    #[test]
    fn foreign_scalars_have_no_serde() {
        let info = <chrono::DateTime<chrono::Utc>>::type_info();
        assert_eq!(info.kind(), ReflectKind::Scalar);
        assert_eq!(info.type_ident(), "DateTime");
        assert!(!info.as_scalar().unwrap().has_serde());
        assert!(!bytes::Bytes::type_info().as_scalar().unwrap().has_serde());
    }
}
