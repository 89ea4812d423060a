use super::SnapshotCursor;
use crate::core::*;
use crate::util::unordered_hash;
use log::*;
use std::{
    collections::{btree_set, BTreeSet},
    hash::{Hash, Hasher},
    ops::{Bound, RangeBounds},
};

/// Set of distinct elements traversed in ascending order.
///
/// Can be restricted to a range, then `add` rejects elements outside of it.
#[derive(Debug, Clone)]
pub struct SortedSet<E: Ord> {
    items: BTreeSet<E>,
    range: (Bound<E>, Bound<E>),
}

impl<E: Ord> SortedSet<E> {
    pub fn new() -> Self {
        Self::from(BTreeSet::new())
    }

    /// Empty set accepting only elements within `range`.
    pub fn with_range(range: impl RangeBounds<E>) -> Self
    where
        E: Clone,
    {
        Self {
            items: BTreeSet::new(),
            range: (range.start_bound().cloned(), range.end_bound().cloned()),
        }
    }

    pub fn in_range(&self, element: &E) -> bool {
        self.range.contains(element)
    }

    pub fn as_set(&self) -> &BTreeSet<E> {
        &self.items
    }

    pub fn into_set(self) -> BTreeSet<E> {
        self.items
    }

    /// Smallest element.
    pub fn first(&self) -> Option<&E> {
        self.items.iter().next()
    }

    /// Largest element.
    pub fn last(&self) -> Option<&E> {
        self.items.iter().next_back()
    }
}

impl<E: Ord> Default for SortedSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Ord> From<BTreeSet<E>> for SortedSet<E> {
    fn from(items: BTreeSet<E>) -> Self {
        Self {
            items,
            range: (Bound::Unbounded, Bound::Unbounded),
        }
    }
}

impl<E: Ord> FromIterator<E> for SortedSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<BTreeSet<_>>())
    }
}

/// Equal if elements are equal, range is not compared.
impl<E: Ord> PartialEq for SortedSet<E> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<E: Ord> Eq for SortedSet<E> {}

/// Same as hash of any other set with equal elements.
impl<E: Ord + Hash> Hash for SortedSet<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(unordered_hash(&self.items));
    }
}

impl<E: Ord + Clone> Traversable for SortedSet<E> {
    type Element = E;

    type Producer<'a> = IterProducer<'a, E, btree_set::Iter<'a, E>>
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
                .with_ordered(true)
                .with_sorted(true)
                .with_distinct(true)
                .with_immutable(true),
        )
    }
}

impl<E: Ord + Clone> TraversableMut for SortedSet<E> {
    type ProducerMut<'a> = SnapshotCursor<'a, BTreeSet<E>, E>
    where
        Self: 'a;

    fn producer_mut(&mut self) -> Self::ProducerMut<'_> {
        let snapshot = self.items.iter().cloned().collect();
        SnapshotCursor::new(&mut self.items, snapshot)
    }
}

impl<E: Ord + Clone> Container for SortedSet<E> {
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

impl<E: Ord + Clone> MutableContainer for SortedSet<E> {
    /// Ok(false) if equal element is already present.
    /// Err(Rejected) if element is outside of the range of the set.
    fn add(&mut self, element: E) -> Result<bool> {
        if !self.in_range(&element) {
            debug!("Rejected element outside of sorted set range");
            return Err(CollectionError::out_of_range());
        }
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
        debug!("Removed {} of {} sorted set elements", removed, before);

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::HashedSet;

    #[test]
    fn ascending_traversal() {
        let set = [5, 1, 4, 1, 3].into_iter().collect::<SortedSet<u32>>();
        assert_eq!(set.size(), 4);
        assert_eq!(set.to_vec(), Ok(vec![1, 3, 4, 5]));
        assert_eq!(set.first(), Some(&1));
        assert_eq!(set.last(), Some(&5));
    }

    #[test]
    fn characteristics() {
        let set = (0..10).collect::<SortedSet<u32>>();
        let characteristics = set.decomposer().characteristics();
        assert!(characteristics.sorted());
        assert!(characteristics.ordered());
        assert!(characteristics.distinct());
        assert!(characteristics.sized());
        assert!(characteristics.immutable());
    }

    #[test]
    fn split_preserves_order() {
        let set = (0..50).collect::<SortedSet<u32>>();
        let mut decomposer = set.decomposer();

        let mut out = Vec::new();
        while let Some(mut prefix) = decomposer.try_split() {
            prefix.for_each_remaining(|&e| out.push(e)).unwrap();
        }
        decomposer.for_each_remaining(|&e| out.push(e)).unwrap();
        assert_eq!(out, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn range_rejects_outside_elements() {
        let mut set = SortedSet::with_range(10..20);
        assert_eq!(set.add(10), Ok(true));
        assert_eq!(set.add(10), Ok(false));
        assert_eq!(set.add(20), Err(CollectionError::out_of_range()));
        assert_eq!(set.add(3), Err(CollectionError::out_of_range()));
        assert!(!set.contains(&20));

        // Elements before the rejected one stay added.
        let result = set.extend_from([15, 19, 25, 12]);
        assert_eq!(result, Err(CollectionError::out_of_range()));
        assert!(result.unwrap_err().recoverable());
        assert_eq!(set.to_vec(), Ok(vec![10, 15, 19]));

        // Range is not part of equality.
        assert_eq!(set, [10, 15, 19].into_iter().collect::<SortedSet<u32>>());
    }

    #[test]
    fn try_remove_if_partial() {
        let mut set = (1..=6).collect::<SortedSet<u32>>();
        let result = set.try_remove_if(|&e| {
            if e == 4 {
                Err(CollectionError::constraint("four"))
            } else {
                Ok(e % 2 == 0)
            }
        });
        assert!(result.is_err());
        assert_eq!(set.to_vec(), Ok(vec![1, 3, 4, 5, 6]));
    }

    #[test]
    fn equal_to_hashed_set() {
        let sorted = (0..20).collect::<SortedSet<u32>>();
        let hashed = (0..20).rev().collect::<HashedSet<u32>>();
        assert_eq!(content_eq(&sorted, &hashed), Ok(true));
        assert_eq!(content_eq(&hashed, &sorted), Ok(true));
        assert_eq!(content_hash(&sorted), content_hash(&hashed));
    }

    #[test]
    fn doppelganger() {
        use rand::*;
        let ops = 5000;

        let mut set = SortedSet::new();
        let mut doppelganger = BTreeSet::new();
        let mut rand = thread_rng();
        for _ in 0..ops {
            let val = rand.gen_range(0..200u32);
            match rand.gen_range(0..4) {
                0 | 1 => assert_eq!(set.add(val), Ok(doppelganger.insert(val))),
                2 => assert_eq!(set.remove(&val), Ok(doppelganger.remove(&val))),
                _ => assert_eq!(set.contains(&val), doppelganger.contains(&val)),
            }
        }
        assert_eq!(set.into_set(), doppelganger);
    }
}
