//! # Goal
//! The main goal of this library is to provide the contracts through which
//! containers expose their elements, so that generic code can traverse,
//! mutate in bulk, and split work over any container without knowing how it
//! stores them.
//!
//! # Features
//! - Sequential traversal, through `SequenceProducer` and `Traversable`.
//!      - Responsible for: What is the next element and can I remove it?
//! - Bulk queries and mutation, through `Container` and `MutableContainer`.
//!      - Responsible for: Which of the optional operations does this container support?
//! - Splitting for parallel processing, through `Decomposer`.
//!      - Responsible for: How to hand off part of the elements and how many remain?
//! - Detection of structural changes during traversal, through `ModCount`.
//!
//! # Errors
//! Every operation that can fail returns `CollectionError`. Mutations a
//! container doesn't support fail with `Unsupported` and leave it unchanged.
//! Bulk operations interrupted by an error keep the changes made before it.
//!
//! # Cargo features
//! - `collections` (default): containers over std storage and a read-only view.
//! - `shared` (default): `SharedList`, list storage shared by several handles.

pub mod core;
pub mod util;

#[cfg(feature = "collections")]
pub mod collections;

pub use crate::core::*;

/// Traits needed to work with containers.
pub mod prelude {
    pub use crate::core::{
        Container, Decomposer, MutableContainer, SequenceProducer, Traversable, TraversableMut,
    };
}
