use super::SnapshotCursor;
use crate::core::*;
use crate::util::unordered_hash;
use log::*;
use std::{
    collections::{hash_set, HashSet},
    hash::{BuildHasher, Hash, Hasher},
};

/// Set of distinct elements in no particular order.
#[derive(Debug, Clone)]
pub struct HashedSet<E, S = ahash::RandomState> {
    items: HashSet<E, S>,
}

impl<E, S: Default> HashedSet<E, S> {
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<E, S> HashedSet<E, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            items: HashSet::with_hasher(hasher),
        }
    }

    pub fn as_set(&self) -> &HashSet<E, S> {
        &self.items
    }

    pub fn into_set(self) -> HashSet<E, S> {
        self.items
    }
}

impl<E, S: Default> Default for HashedSet<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> From<HashSet<E, S>> for HashedSet<E, S> {
    fn from(items: HashSet<E, S>) -> Self {
        Self { items }
    }
}

impl<E: Eq + Hash, S: BuildHasher + Default> FromIterator<E> for HashedSet<E, S> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<E: Eq + Hash, S: BuildHasher> PartialEq for HashedSet<E, S> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<E: Eq + Hash, S: BuildHasher> Eq for HashedSet<E, S> {}

impl<E: Eq + Hash, S: BuildHasher> Hash for HashedSet<E, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(unordered_hash(&self.items));
    }
}

impl<E: Eq + Hash + Clone, S: BuildHasher> Traversable for HashedSet<E, S> {
    type Element = E;

    type Producer<'a> = IterProducer<'a, E, hash_set::Iter<'a, E>>
    where
        Self: 'a;

    type Decomposer<'a> = SizedDecomposer<Self::Producer<'a>>
    where
        Self: 'a;

    fn producer(&self) -> Self::Producer<'_> {
        IterProducer::new(self.items.iter())
    }

    fn decomposer(&self) -> Self::Decomposer<'_> {
        SizedDecomposer::new(
            self.producer(),
            self.items.len(),
            Characteristics::new()
                .with_distinct(true)
                .with_immutable(true),
        )
    }
}

impl<E: Eq + Hash + Clone, S: BuildHasher> TraversableMut for HashedSet<E, S> {
    type ProducerMut<'a> = SnapshotCursor<'a, HashSet<E, S>, E>
    where
        Self: 'a;

    fn producer_mut(&mut self) -> Self::ProducerMut<'_> {
        let snapshot = self.items.iter().cloned().collect();
        SnapshotCursor::new(&mut self.items, snapshot)
    }
}

impl<E: Eq + Hash + Clone, S: BuildHasher> Container for HashedSet<E, S> {
    fn size(&self) -> usize {
        self.items.len()
    }

    fn contains(&self, element: &E) -> bool {
        self.items.contains(element)
    }

    fn variant(&self) -> Variant {
        Variant::Set
    }
}

impl<E: Eq + Hash + Clone, S: BuildHasher> MutableContainer for HashedSet<E, S> {
    /// Ok(false) if equal element is already present.
    fn add(&mut self, element: E) -> Result<bool> {
        Ok(self.items.insert(element))
    }

    fn remove(&mut self, element: &E) -> Result<bool>
    where
        E: PartialEq,
    {
        Ok(self.items.remove(element))
    }

    fn try_remove_if<X, F>(&mut self, mut predicate: F) -> Result<bool, X>
    where
        F: FnMut(&Self::Element) -> Result<bool, X>,
        X: From<CollectionError>,
    {
        let before = self.items.len();
        let mut failure = None;
        self.items.retain(|element| {
            failure.is_some()
                || match predicate(element) {
                    Ok(remove) => !remove,
                    Err(error) => {
                        failure = Some(error);
                        true
                    }
                }
        });

        let removed = before - self.items.len();
        debug!("Removed {} of {} set elements", removed, before);

        match failure {
            Some(error) => Err(error),
            None => Ok(removed > 0),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.items.clear();
        Ok(())
    }
}
