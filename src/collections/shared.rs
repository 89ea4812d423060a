use crate::core::*;
use crate::util::ordered_hash;
use log::*;
use std::{
    cell::RefCell,
    hash::{Hash, Hasher},
    rc::Rc,
};

/// List whose storage is shared by any number of handles.
///
/// A change through one handle is visible through all of them. Producers hold
/// their own handle, so a change made through another handle during traversal
/// is detected with the generation counter and reported as
/// `ConcurrentModification`.
///
/// Optionally bounded, `add` past the limit is rejected.
pub struct SharedList<E> {
    storage: Rc<RefCell<Vec<E>>>,
    mod_count: Rc<ModCount>,
    limit: Option<usize>,
}

impl<E> SharedList<E> {
    pub fn new() -> Self {
        Self {
            storage: Rc::new(RefCell::new(Vec::new())),
            mod_count: Rc::new(ModCount::new()),
            limit: None,
        }
    }

    /// At most `limit` elements.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new()
        }
    }

    /// New handle to the same storage.
    pub fn share(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            mod_count: self.mod_count.clone(),
            limit: self.limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn generation(&self) -> u64 {
        self.mod_count.current()
    }

    /// Number of handles to the storage.
    pub fn handles(&self) -> usize {
        Rc::strong_count(&self.storage)
    }

    fn cursor(&self, removable: bool) -> SharedCursor<E> {
        SharedCursor {
            storage: self.storage.clone(),
            mod_count: self.mod_count.clone(),
            generation: self.mod_count.generation(),
            index: 0,
            current: None,
            last: LastProduced::none(),
            removable,
        }
    }
}

impl<E> Default for SharedList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> From<Vec<E>> for SharedList<E> {
    fn from(items: Vec<E>) -> Self {
        Self {
            storage: Rc::new(RefCell::new(items)),
            ..Self::new()
        }
    }
}

impl<E> FromIterator<E> for SharedList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for SharedList<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedList")
            .field("storage", &self.storage)
            .field("generation", &self.generation())
            .field("limit", &self.limit)
            .finish()
    }
}

/// Compares current contents of the storages.
impl<E: PartialEq> PartialEq for SharedList<E> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
            || *self.storage.borrow() == *other.storage.borrow()
    }
}

impl<E: Eq> Eq for SharedList<E> {}

impl<E: Hash> Hash for SharedList<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(ordered_hash(self.storage.borrow().iter()));
    }
}

impl<E: Clone + PartialEq> Traversable for SharedList<E> {
    type Element = E;

    type Producer<'a> = SharedCursor<E>
    where
        Self: 'a;

    type Decomposer<'a> = SizedDecomposer<SharedCursor<E>>
    where
        Self: 'a;

    fn producer(&self) -> Self::Producer<'_> {
        self.cursor(false)
    }

    fn decomposer(&self) -> Self::Decomposer<'_> {
        self.sized_decomposer(Characteristics::new().with_ordered(true))
    }
}

impl<E: Clone + PartialEq> TraversableMut for SharedList<E> {
    type ProducerMut<'a> = SharedCursor<E>
    where
        Self: 'a;

    fn producer_mut(&mut self) -> Self::ProducerMut<'_> {
        self.cursor(true)
    }
}

impl<E: Clone + PartialEq> Container for SharedList<E> {
    fn size(&self) -> usize {
        self.storage.borrow().len()
    }

    fn contains(&self, element: &E) -> bool {
        self.storage.borrow().contains(element)
    }

    fn variant(&self) -> Variant {
        Variant::Sequence
    }
}

impl<E: Clone + PartialEq> MutableContainer for SharedList<E> {
    /// Err(Rejected) if the list is at its limit.
    fn add(&mut self, element: E) -> Result<bool> {
        let mut storage = self.storage.borrow_mut();
        if let Some(limit) = self.limit {
            if storage.len() >= limit {
                debug!("Rejected element, shared list is at its limit of {}", limit);
                return Err(CollectionError::capacity(limit));
            }
        }
        storage.push(element);
        self.mod_count.bump();
        Ok(true)
    }

    fn clear(&mut self) -> Result<()> {
        let mut storage = self.storage.borrow_mut();
        if !storage.is_empty() {
            storage.clear();
            self.mod_count.bump();
        }
        Ok(())
    }
}

/// Producer of `SharedList`.
///
/// Holds a handle to the storage and a clone of the most recently produced element.
pub struct SharedCursor<E> {
    storage: Rc<RefCell<Vec<E>>>,
    mod_count: Rc<ModCount>,
    generation: Generation,
    index: usize,
    current: Option<E>,
    last: LastProduced<usize>,
    removable: bool,
}

impl<E: Clone> SequenceProducer for SharedCursor<E> {
    type Element = E;

    fn has_more(&self) -> bool {
        self.index < self.storage.borrow().len()
    }

    fn produce_next(&mut self) -> Result<&E> {
        self.generation.check(&self.mod_count)?;
        let element = self
            .storage
            .borrow()
            .get(self.index)
            .cloned()
            .ok_or(CollectionError::Exhausted)?;
        self.last.set(self.index);
        self.index += 1;
        Ok(self.current.insert(element))
    }

    fn remove_last(&mut self) -> Result<()> {
        if !self.removable {
            return Err(CollectionError::unsupported("remove_last"));
        }
        self.generation.check(&self.mod_count)?;
        let index = self.last.take()?;
        self.storage.borrow_mut().remove(index);
        self.mod_count.bump();
        self.generation.resync(&self.mod_count);
        self.index = index;
        Ok(())
    }
}
