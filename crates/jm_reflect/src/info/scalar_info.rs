use alloc::boxed::Box;

use serde_core::Deserializer;
use serde_core::de::DeserializeOwned;

use crate::Reflect;
use crate::info::{Type, TypePath, impl_type_fn};

// -----------------------------------------------------------------------------
// ScalarInfo

/// Type information of a leaf value (number, string, date, ...).
///
/// A scalar may carry `serde` hooks, which give it a native JSON form. The
/// engine's pass-through converter uses them; scalars without hooks need a
/// dedicated converter.
#[derive(Clone, Debug)]
pub struct ScalarInfo {
    ty: Type,
    serialize: Option<fn(&dyn Reflect) -> Option<&dyn erased_serde::Serialize>>,
    deserialize: Option<
        fn(&mut dyn erased_serde::Deserializer<'_>) -> Result<Box<dyn Reflect>, erased_serde::Error>,
    >,
}

impl ScalarInfo {
    impl_type_fn!(ty);

    /// Creates the info of a scalar without `serde` hooks.
    #[inline]
    pub fn new<T: TypePath + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
            serialize: None,
            deserialize: None,
        }
    }

    /// Attaches `serde` hooks of `T`.
    #[inline]
    pub fn with_serde<T>(self) -> Self
    where
        T: Reflect + erased_serde::Serialize + DeserializeOwned,
    {
        Self {
            serialize: Some(serialize_scalar::<T>),
            deserialize: Some(deserialize_scalar::<T>),
            ..self
        }
    }

    /// Returns `true` if the scalar carries `serde` hooks.
    #[inline]
    pub fn has_serde(&self) -> bool {
        self.serialize.is_some() && self.deserialize.is_some()
    }

    /// Returns `value` as a `serde` serializable, if hooks exist and the type matches.
    #[inline]
    pub fn serializable<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn erased_serde::Serialize> {
        (self.serialize?)(value)
    }

    /// Deserializes a value of this scalar type, if hooks exist.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        &self,
        deserializer: D,
    ) -> Option<Result<Box<dyn Reflect>, D::Error>> {
        let func = self.deserialize?;
        let mut erased = <dyn erased_serde::Deserializer>::erase(deserializer);
        Some(func(&mut erased).map_err(<D::Error as serde_core::de::Error>::custom))
    }
}

fn serialize_scalar<T: Reflect + erased_serde::Serialize>(
    value: &dyn Reflect,
) -> Option<&dyn erased_serde::Serialize> {
    value
        .downcast_ref::<T>()
        .map(|val| val as &dyn erased_serde::Serialize)
}

fn deserialize_scalar<T: Reflect + DeserializeOwned>(
    deserializer: &mut dyn erased_serde::Deserializer<'_>,
) -> Result<Box<dyn Reflect>, erased_serde::Error> {
    Ok(Box::new(erased_serde::deserialize::<T>(deserializer)?))
}
