use super::{Characteristics, Decomposer, SizeEstimate};
use crate::core::Result;
use log::*;
use std::collections::VecDeque;

/// Decomposer that owns its elements.
/// Splits in halves.
#[derive(Debug, Clone)]
pub struct ArrayDecomposer<E> {
    elements: VecDeque<E>,
    characteristics: Characteristics,
}

impl<E> ArrayDecomposer<E> {
    pub fn new(elements: impl Into<VecDeque<E>>, extra: Characteristics) -> Self {
        Self {
            elements: elements.into(),
            characteristics: Characteristics::new()
                .with_sized(true)
                .with_subsized(true)
                .union(extra),
        }
    }

    pub fn into_inner(self) -> VecDeque<E> {
        self.elements
    }
}

impl<E> Decomposer for ArrayDecomposer<E> {
    type Element = E;

    type Split = Self;

    fn try_split(&mut self) -> Option<Self> {
        if self.elements.len() < 2 {
            return None;
        }

        let rest = self.elements.split_off(self.elements.len() / 2);
        let prefix = std::mem::replace(&mut self.elements, rest);
        trace!(
            "Split {} array elements off {}",
            prefix.len(),
            self.elements.len()
        );
        Some(Self {
            elements: prefix,
            characteristics: self.characteristics,
        })
    }

    fn try_advance<F: FnOnce(&E)>(&mut self, action: F) -> Result<bool> {
        match self.elements.pop_front() {
            Some(element) => {
                action(&element);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn for_each_remaining<F: FnMut(&E)>(&mut self, mut action: F) -> Result<()> {
        for element in self.elements.drain(..) {
            action(&element);
        }
        Ok(())
    }

    fn estimate_size(&self) -> SizeEstimate {
        SizeEstimate::Exact(self.elements.len())
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}
