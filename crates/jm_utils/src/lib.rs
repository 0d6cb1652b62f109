//! Small shared utilities for the `jm` crates.
//!
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId), used by
//!   every per-type cache in the workspace.
//! - [`hash`]: fixed and no-op hash states on top of *hashbrown* and *foldhash*.
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
