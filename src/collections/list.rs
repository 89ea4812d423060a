use crate::core::*;
use crate::util::ordered_hash;
use log::*;
use std::hash::{Hash, Hasher};

/// List of elements in insertion order, backed by a `Vec`.
///
/// Structural changes are counted in an explicit generation counter which
/// removal cursors check on each operation.
#[derive(Debug, Clone)]
pub struct VecList<E> {
    items: Vec<E>,
    mod_count: ModCount,
}

impl<E> VecList<E> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            mod_count: ModCount::new(),
        }
    }

    pub fn as_slice(&self) -> &[E] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<E> {
        self.items
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.items.get(index)
    }

    /// Number of structural changes so far.
    pub fn generation(&self) -> u64 {
        self.mod_count.current()
    }
}

impl<E> Default for VecList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> From<Vec<E>> for VecList<E> {
    fn from(items: Vec<E>) -> Self {
        Self {
            items,
            mod_count: ModCount::new(),
        }
    }
}

impl<E> FromIterator<E> for VecList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<E: PartialEq> PartialEq for VecList<E> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<E: Eq> Eq for VecList<E> {}

impl<E: Hash> Hash for VecList<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(ordered_hash(&self.items));
    }
}

impl<E> Traversable for VecList<E> {
    type Element = E;

    type Producer<'a> = IterProducer<'a, E, std::slice::Iter<'a, E>>
    where
        Self: 'a;

    type Decomposer<'a> = SliceDecomposer<'a, E>
    where
        Self: 'a;

    fn producer(&self) -> Self::Producer<'_> {
        IterProducer::new(self.items.iter())
    }

    /// List can't change while borrowed, so decomposer is `immutable`.
    fn decomposer(&self) -> Self::Decomposer<'_> {
        SliceDecomposer::new(&self.items, Characteristics::new().with_immutable(true))
    }
}

impl<E> TraversableMut for VecList<E> {
    type ProducerMut<'a> = ListCursor<'a, E>
    where
        Self: 'a;

    fn producer_mut(&mut self) -> Self::ProducerMut<'_> {
        ListCursor::new(self)
    }
}

impl<E: PartialEq> Container for VecList<E> {
    fn size(&self) -> usize {
        self.items.len()
    }

    fn contains(&self, element: &E) -> bool {
        self.items.contains(element)
    }

    fn to_vec(&self) -> Result<Vec<E>>
    where
        E: Clone,
    {
        Ok(self.items.clone())
    }

    fn variant(&self) -> Variant {
        Variant::Sequence
    }
}

impl<E: PartialEq> MutableContainer for VecList<E> {
    fn add(&mut self, element: E) -> Result<bool> {
        self.items.push(element);
        self.mod_count.bump();
        Ok(true)
    }

    /// Single compaction pass instead of shifting on each removal.
    fn try_remove_if<X, F>(&mut self, mut predicate: F) -> Result<bool, X>
    where
        F: FnMut(&Self::Element) -> Result<bool, X>,
        X: From<CollectionError>,
    {
        let before = self.items.len();
        let mut failure = None;
        self.items.retain(|element| {
            if failure.is_some() {
                return true;
            }
            match predicate(element) {
                Ok(remove) => !remove,
                Err(error) => {
                    failure = Some(error);
                    true
                }
            }
        });

        let removed = before - self.items.len();
        if removed > 0 {
            self.mod_count.bump();
        }
        debug!("Removed {} of {} list elements", removed, before);

        match failure {
            Some(error) => Err(error),
            None => Ok(removed > 0),
        }
    }

    fn clear(&mut self) -> Result<()> {
        if !self.items.is_empty() {
            self.items.clear();
            self.mod_count.bump();
        }
        Ok(())
    }
}

/// Removal capable producer of `VecList`.
pub struct ListCursor<'a, E> {
    list: &'a mut VecList<E>,
    index: usize,
    last: LastProduced<usize>,
    generation: Generation,
}

impl<'a, E> ListCursor<'a, E> {
    fn new(list: &'a mut VecList<E>) -> Self {
        let generation = list.mod_count.generation();
        Self {
            list,
            index: 0,
            last: LastProduced::none(),
            generation,
        }
    }
}

impl<E> SequenceProducer for ListCursor<'_, E> {
    type Element = E;

    fn has_more(&self) -> bool {
        self.index < self.list.items.len()
    }

    fn produce_next(&mut self) -> Result<&E> {
        self.generation.check(&self.list.mod_count)?;
        let element = self
            .list
            .items
            .get(self.index)
            .ok_or(CollectionError::Exhausted)?;
        self.last.set(self.index);
        self.index += 1;
        Ok(element)
    }

    fn remove_last(&mut self) -> Result<()> {
        self.generation.check(&self.list.mod_count)?;
        let index = self.last.take()?;
        self.list.items.remove(index);
        self.list.mod_count.bump();
        self.generation.resync(&self.list.mod_count);
        self.index = index;
        Ok(())
    }
}
