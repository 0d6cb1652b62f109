use alloc::boxed::Box;
use alloc::vec::Vec;

use thiserror::Error;

use crate::Reflect;
use crate::info::Typed;

// -----------------------------------------------------------------------------
// ConstructError

/// Failure of a named-argument [`Constructor`](crate::info::Constructor).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConstructError {
    /// A required argument was not supplied.
    #[error("missing argument `{name}`")]
    MissingArgument { name: &'static str },
    /// An argument was supplied with the wrong type.
    #[error("argument `{name}` expects `{expected}`, found `{found}`")]
    ArgumentType {
        name: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

// -----------------------------------------------------------------------------
// NamedArgs

/// Argument values collected for a named-argument constructor.
///
/// # Examples
///
/// ```
/// use jm_reflect::ops::NamedArgs;
///
/// let mut args = NamedArgs::new();
/// args.insert("x", Box::new(3_i32));
///
/// assert_eq!(args.take::<i32>("x").unwrap(), 3);
/// assert!(args.take::<i32>("x").is_err());
/// assert_eq!(args.take_or_default::<i32>("y").unwrap(), 0);
/// ```
#[derive(Debug, Default)]
pub struct NamedArgs {
    args: Vec<(&'static str, Box<dyn Reflect>)>,
}

impl NamedArgs {
    /// Creates an empty argument list.
    #[inline]
    pub const fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Adds an argument, replacing an earlier one with the same name.
    pub fn insert(&mut self, name: &'static str, value: Box<dyn Reflect>) {
        match self.args.iter_mut().find(|(arg, _)| *arg == name) {
            Some((_, slot)) => *slot = value,
            None => self.args.push((name, value)),
        }
    }

    /// Returns the number of supplied arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns `true` if no argument was supplied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Returns `true` if an argument named `name` was supplied.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.args.iter().any(|(arg, _)| *arg == name)
    }

    /// Removes the argument `name` and returns it as `T`.
    pub fn take<T: Reflect + Typed>(&mut self, name: &'static str) -> Result<T, ConstructError> {
        self.take_opt(name)?
            .ok_or(ConstructError::MissingArgument { name })
    }

    /// Removes the argument `name` and returns it as `T`,
    /// or `T::default()` if it was not supplied.
    pub fn take_or_default<T: Reflect + Typed + Default>(
        &mut self,
        name: &'static str,
    ) -> Result<T, ConstructError> {
        Ok(self.take_opt(name)?.unwrap_or_default())
    }

    fn take_opt<T: Reflect + Typed>(&mut self, name: &'static str) -> Result<Option<T>, ConstructError> {
        let Some(position) = self.args.iter().position(|(arg, _)| *arg == name) else {
            return Ok(None);
        };
        let (_, value) = self.args.swap_remove(position);
        value.take::<T>().map(Some).map_err(|value| ConstructError::ArgumentType {
            name,
            expected: T::type_path(),
            found: value.reflect_type_info().type_path(),
        })
    }
}
