use super::{Characteristics, Decomposer, SizeEstimate};
use crate::core::Result;
use log::*;

/// Decomposer over borrowed contiguous elements.
/// Splits in halves.
#[derive(Debug, Clone)]
pub struct SliceDecomposer<'a, E> {
    slice: &'a [E],
    characteristics: Characteristics,
}

impl<'a, E> SliceDecomposer<'a, E> {
    /// Slices are always ordered and exactly sized, extra characteristics
    /// are added to that.
    pub fn new(slice: &'a [E], extra: Characteristics) -> Self {
        Self {
            slice,
            characteristics: Characteristics::sequence().union(extra),
        }
    }

    /// Remaining elements.
    pub fn as_slice(&self) -> &'a [E] {
        self.slice
    }
}

impl<'a, E> Decomposer for SliceDecomposer<'a, E> {
    type Element = E;

    type Split = Self;

    fn try_split(&mut self) -> Option<Self> {
        if self.slice.len() < 2 {
            return None;
        }

        let (prefix, rest) = self.slice.split_at(self.slice.len() / 2);
        trace!("Split {} slice elements off {}", prefix.len(), rest.len());
        self.slice = rest;
        Some(Self {
            slice: prefix,
            characteristics: self.characteristics,
        })
    }

    fn try_advance<F: FnOnce(&E)>(&mut self, action: F) -> Result<bool> {
        match self.slice.split_first() {
            Some((first, rest)) => {
                self.slice = rest;
                action(first);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn for_each_remaining<F: FnMut(&E)>(&mut self, action: F) -> Result<()> {
        let slice = std::mem::take(&mut self.slice);
        slice.iter().for_each(action);
        Ok(())
    }

    fn estimate_size(&self) -> SizeEstimate {
        SizeEstimate::Exact(self.slice.len())
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}
