//! Splittable ranges of elements for single pass or parallel traversal.
//!
//! A decomposer is owned by one worker at a time. `try_split` hands a disjoint
//! prefix of the remaining elements to the caller who can then pass it to another
//! worker. Splitting never duplicates nor drops elements.

mod array;
mod iter;
mod slice;

pub use array::ArrayDecomposer;
pub use iter::{SizedDecomposer, UnsizedDecomposer};
pub use slice::SliceDecomposer;

use super::Result;
use getset::CopyGetters;
use modular_bitfield::prelude::*;

pub trait Decomposer: Sized {
    type Element;

    /// Type of split off prefixes.
    type Split: Decomposer<Element = Self::Element>;

    /// Moves a prefix of remaining elements into a new decomposer.
    /// None if it's not possible or not worth it.
    fn try_split(&mut self) -> Option<Self::Split>;

    /// Applies action to exactly one remaining element.
    /// Ok(false) if exhausted.
    fn try_advance<F: FnOnce(&Self::Element)>(&mut self, action: F) -> Result<bool>;

    /// Applies action to all remaining elements.
    fn for_each_remaining<F: FnMut(&Self::Element)>(&mut self, mut action: F) -> Result<()> {
        while self.try_advance(&mut action)? {}
        Ok(())
    }

    /// A hint for splitting heuristics, never for correctness.
    fn estimate_size(&self) -> SizeEstimate;

    fn characteristics(&self) -> Characteristics;

    /// Some only if decomposer is `sized`.
    fn exact_size(&self) -> Option<usize> {
        if self.characteristics().sized() {
            self.estimate_size().count()
        } else {
            None
        }
    }

    fn has_characteristics(&self, characteristics: Characteristics) -> bool {
        self.characteristics().contains(characteristics)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeEstimate {
    Exact(usize),
    Approximate(usize),
    /// Finite but unknown.
    Unknown,
    Infinite,
}

impl SizeEstimate {
    pub fn count(self) -> Option<usize> {
        match self {
            SizeEstimate::Exact(n) | SizeEstimate::Approximate(n) => Some(n),
            SizeEstimate::Unknown | SizeEstimate::Infinite => None,
        }
    }

    /// Estimate as a number, unknown sizes are saturated.
    pub fn hint(self) -> usize {
        self.count().unwrap_or(usize::MAX)
    }

    pub fn is_finite(self) -> bool {
        !matches!(self, SizeEstimate::Infinite)
    }
}

/// Properties of a decomposer and its elements.
///
/// - ordered: encounter order is significant.
/// - distinct: no two elements are equal.
/// - sorted: encounter order follows element ordering.
/// - sized: `estimate_size` is exact.
/// - subsized: all split off decomposers are `sized`.
/// - immutable: source can't be structurally changed during traversal.
/// - concurrent: source can be safely changed during traversal.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Characteristics {
    pub ordered: bool,
    pub distinct: bool,
    pub sorted: bool,
    pub sized: bool,
    pub subsized: bool,
    pub immutable: bool,
    pub concurrent: bool,
    #[skip]
    __: B1,
}

impl Characteristics {
    pub fn union(self, other: Self) -> Self {
        let [a] = self.into_bytes();
        let [b] = other.into_bytes();
        Self::from_bytes([a | b])
    }

    pub fn without(self, other: Self) -> Self {
        let [a] = self.into_bytes();
        let [b] = other.into_bytes();
        Self::from_bytes([a & !b])
    }

    /// True if all of other's flags are set.
    pub fn contains(self, other: Self) -> bool {
        let [a] = self.into_bytes();
        let [b] = other.into_bytes();
        a & b == b
    }

    /// Flags of an exactly sized, ordered, range of elements.
    pub fn sequence() -> Self {
        Self::new()
            .with_ordered(true)
            .with_sized(true)
            .with_subsized(true)
    }
}

/// Batching of decomposers that split by copying elements out of a producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct DecomposerConfig {
    /// Batch size increment between consecutive splits.
    batch_unit: usize,
    /// Upper limit of a batch.
    max_batch: usize,
}

impl DecomposerConfig {
    pub const BATCH_UNIT: usize = 1 << 10;
    pub const MAX_BATCH: usize = 1 << 25;

    pub fn new(batch_unit: usize, max_batch: usize) -> Self {
        let batch_unit = batch_unit.max(1);
        Self {
            batch_unit,
            max_batch: max_batch.max(batch_unit),
        }
    }

    pub fn with_batch_unit(self, batch_unit: usize) -> Self {
        Self::new(batch_unit, self.max_batch)
    }

    pub fn with_max_batch(self, max_batch: usize) -> Self {
        Self::new(self.batch_unit, max_batch)
    }
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self::new(Self::BATCH_UNIT, Self::MAX_BATCH)
    }
}
