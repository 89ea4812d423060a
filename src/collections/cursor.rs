use crate::core::*;
use std::{
    collections::{BTreeSet, HashSet},
    hash::{BuildHasher, Hash},
};

/// Storage that can remove an element by value.
pub trait RemoveElement<E> {
    /// True if element was present.
    fn remove_element(&mut self, element: &E) -> bool;
}

impl<E: Eq + Hash, S: BuildHasher> RemoveElement<E> for HashSet<E, S> {
    fn remove_element(&mut self, element: &E) -> bool {
        self.remove(element)
    }
}

impl<E: Ord> RemoveElement<E> for BTreeSet<E> {
    fn remove_element(&mut self, element: &E) -> bool {
        self.remove(element)
    }
}

/// Removal capable producer over storage whose own iterators can't remove.
///
/// Produces from a snapshot of elements taken at creation and removes by
/// value from the storage. Storage is exclusively borrowed for the lifetime
/// of the cursor so the snapshot stays accurate.
pub struct SnapshotCursor<'a, S: ?Sized, E> {
    storage: &'a mut S,
    pending: std::vec::IntoIter<E>,
    current: Option<E>,
    last: LastProduced<()>,
}

impl<'a, S: RemoveElement<E> + ?Sized, E> SnapshotCursor<'a, S, E> {
    pub fn new(storage: &'a mut S, snapshot: Vec<E>) -> Self {
        Self {
            storage,
            pending: snapshot.into_iter(),
            current: None,
            last: LastProduced::none(),
        }
    }
}

impl<S: RemoveElement<E> + ?Sized, E> SequenceProducer for SnapshotCursor<'_, S, E> {
    type Element = E;

    fn has_more(&self) -> bool {
        !self.pending.as_slice().is_empty()
    }

    fn produce_next(&mut self) -> Result<&E> {
        let next = self.pending.next().ok_or(CollectionError::Exhausted)?;
        self.last.set(());
        Ok(self.current.insert(next))
    }

    fn remove_last(&mut self) -> Result<()> {
        self.last.take()?;
        let current = self
            .current
            .as_ref()
            .ok_or(CollectionError::invalid_state("no produced element"))?;
        self.storage.remove_element(current);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_from_storage() {
        let mut storage = (1..=5).collect::<BTreeSet<u32>>();
        let snapshot = storage.iter().copied().collect();
        let mut cursor = SnapshotCursor::new(&mut storage, snapshot);

        while cursor.has_more() {
            if cursor.produce_next().unwrap() % 2 == 1 {
                cursor.remove_last().unwrap();
            }
        }
        assert_eq!(cursor.produce_next(), Err(CollectionError::Exhausted));
        assert_eq!(storage.into_iter().collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn protocol() {
        let mut storage = [7u8].into_iter().collect::<HashSet<_>>();
        let mut cursor = SnapshotCursor::new(&mut storage, vec![7]);

        assert!(cursor.remove_last().is_err());
        assert_eq!(cursor.produce_next(), Ok(&7));
        assert_eq!(cursor.remove_last(), Ok(()));
        assert!(cursor.remove_last().is_err());
        assert!(storage.is_empty());
    }
}
