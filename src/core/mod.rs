mod container;
pub mod decomposer;
mod error;
mod fail_fast;
mod producer;
mod traversable;

pub use container::*;
pub use decomposer::{
    ArrayDecomposer, Characteristics, Decomposer, DecomposerConfig, SizeEstimate,
    SizedDecomposer, SliceDecomposer, UnsizedDecomposer,
};
pub use error::*;
pub use fail_fast::*;
pub use producer::{Cloned, IterProducer, SequenceProducer};
pub(crate) use producer::LastProduced;
pub use traversable::*;
