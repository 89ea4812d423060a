//! Containers implementing the traversal and mutation contracts.

mod cursor;
mod hashed_set;
mod list;
#[cfg(feature = "shared")]
mod shared;
mod sorted_set;
mod unmodifiable;

pub use cursor::{RemoveElement, SnapshotCursor};
pub use hashed_set::HashedSet;
pub use list::{ListCursor, VecList};
#[cfg(feature = "shared")]
pub use shared::{SharedCursor, SharedList};
pub use sorted_set::SortedSet;
pub use unmodifiable::{ReadOnly, Unmodifiable};
