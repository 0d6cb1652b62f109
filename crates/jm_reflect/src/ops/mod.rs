//! Kind-specific access to reflected values.
//!
//! [`Reflect::reflect_ref`](crate::Reflect::reflect_ref) and
//! [`Reflect::reflect_mut`](crate::Reflect::reflect_mut) split a value into
//! one of the views below:
//!
//! - [`Object`]: a struct with named fields (e.g. `Car { .. }`).
//! - [`Enum`]: a field-less enum variant (e.g. `Color::Red`).
//! - [`List`]: an ordered sequence (e.g. `Vec<i32>`).
//! - [`Set`]: a set (e.g. `BTreeSet<String>`).
//! - [`Map`]: a key-value map (e.g. `BTreeMap<String, i32>`).
//! - [`Optional`]: an optional value (e.g. `Option<i32>`).
//! - [`Shared`]: a shared lockable reference (e.g. `Arc<RwLock<Node>>`).
//!
//! Scalars have no dedicated view; they are handled as plain `dyn Reflect`.
//!
//! [`NamedArgs`] and [`ConstructError`] support types that are built through
//! a named-argument constructor instead of field assignment.

// -----------------------------------------------------------------------------
// Modules

mod construct;
mod enum_ops;
mod kind;
mod list_ops;
mod map_ops;
mod object_ops;
mod optional_ops;
mod set_ops;
mod shared_ops;

// -----------------------------------------------------------------------------
// Exports

pub use construct::{ConstructError, NamedArgs};
pub use enum_ops::Enum;
pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::List;
pub use map_ops::Map;
pub use object_ops::{Object, ObjectFieldIter};
pub use optional_ops::Optional;
pub use set_ops::Set;
pub use shared_ops::{Shared, SharedReadGuard};
