//! Helpers shared by container implementations.

mod hash;

pub use hash::*;
