use super::{
    Characteristics, CollectionError, Result, SequenceProducer, SizedDecomposer, Traversable,
    TraversableMut,
};
use crate::util::ContentHasher;
use log::*;
use std::hash::Hash;

/// Equality rules of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Order sensitive, duplicates allowed.
    Sequence,
    /// Order insensitive, no duplicates.
    Set,
    /// Order insensitive, duplicates allowed.
    Bag,
}

/// A group of elements.
///
/// All methods are queries of current state. Mutation is in `MutableContainer`.
pub trait Container: Traversable {
    /// Number of elements, capped at `usize::MAX`.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn contains(&self, element: &Self::Element) -> bool;

    /// True if all elements of other are contained in this.
    fn contains_all<O>(&self, other: &O) -> Result<bool>
    where
        O: Traversable<Element = Self::Element> + ?Sized,
    {
        let mut producer = other.producer();
        while producer.has_more() {
            if !self.contains(producer.produce_next()?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Independent copy of elements in traversal order.
    fn to_vec(&self) -> Result<Vec<Self::Element>>
    where
        Self::Element: Clone,
    {
        self.to_vec_in(Vec::new())
    }

    /// Like `to_vec` but reuses given buffer.
    /// Previous content of the buffer is discarded.
    fn to_vec_in(&self, mut buffer: Vec<Self::Element>) -> Result<Vec<Self::Element>>
    where
        Self::Element: Clone,
    {
        buffer.clear();
        buffer.reserve(self.size());
        self.for_each(|element| {
            buffer.push(element.clone());
            Ok::<_, CollectionError>(())
        })?;
        Ok(buffer)
    }

    /// Variant this container follows for `content_eq` and `content_hash`.
    fn variant(&self) -> Variant {
        Variant::Bag
    }

    /// Default decomposer of a container.
    /// Size is taken from `size` and splits copy batches of elements.
    fn sized_decomposer(
        &self,
        characteristics: Characteristics,
    ) -> SizedDecomposer<Self::Producer<'_>>
    where
        Self::Element: Clone,
    {
        SizedDecomposer::new(self.producer(), self.size(), characteristics)
    }
}

/// Container that can be changed.
///
/// Each operation is optional. Those that aren't supported fail with
/// `Unsupported` and leave the container unchanged.
///
/// Bulk operations interrupted by an error keep all changes made before it.
pub trait MutableContainer: Container + TraversableMut {
    /// Ensures the element is present.
    /// Ok(false) if container doesn't allow duplicates and it's already present.
    /// Err(Rejected) for any other refusal.
    fn add(&mut self, _element: Self::Element) -> Result<bool> {
        Err(CollectionError::unsupported("add"))
    }

    /// Adds clones of all elements of other.
    /// True if container changed.
    fn add_all<O>(&mut self, other: &O) -> Result<bool>
    where
        O: Traversable<Element = Self::Element> + ?Sized,
        Self::Element: Clone,
    {
        let mut changed = false;
        let mut producer = other.producer();
        while producer.has_more() {
            changed |= self.add(producer.produce_next()?.clone())?;
        }
        Ok(changed)
    }

    /// Adds all given elements.
    /// True if container changed.
    fn extend_from<I>(&mut self, elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = Self::Element>,
    {
        let mut changed = false;
        for element in elements {
            changed |= self.add(element)?;
        }
        Ok(changed)
    }

    /// Removes at most one equal element.
    fn remove(&mut self, element: &Self::Element) -> Result<bool>
    where
        Self::Element: PartialEq,
    {
        let mut producer = self.producer_mut();
        while producer.has_more() {
            if producer.produce_next()? == element {
                producer.remove_last()?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Removes every element contained in other.
    fn remove_all<O>(&mut self, other: &O) -> Result<bool>
    where
        O: Container<Element = Self::Element> + ?Sized,
    {
        self.remove_if(|element| other.contains(element))
    }

    /// Keeps only elements contained in other.
    fn retain_all<O>(&mut self, other: &O) -> Result<bool>
    where
        O: Container<Element = Self::Element> + ?Sized,
    {
        self.remove_if(|element| !other.contains(element))
    }

    /// Removes every element satisfying the predicate.
    fn remove_if<F>(&mut self, mut predicate: F) -> Result<bool>
    where
        F: FnMut(&Self::Element) -> bool,
    {
        self.try_remove_if(|element| Ok::<_, CollectionError>(predicate(element)))
    }

    /// Removes every element for which the predicate returns true.
    ///
    /// Error of the predicate stops the operation, elements matched before it
    /// stay removed.
    fn try_remove_if<X, F>(&mut self, mut predicate: F) -> Result<bool, X>
    where
        F: FnMut(&Self::Element) -> Result<bool, X>,
        X: From<CollectionError>,
    {
        let mut removed = 0usize;
        let mut producer = self.producer_mut();
        while producer.has_more() {
            if predicate(producer.produce_next()?)? {
                producer.remove_last()?;
                removed += 1;
            }
        }
        debug!("Removed {} elements by predicate", removed);
        Ok(removed > 0)
    }

    /// Removes all elements.
    fn clear(&mut self) -> Result<()> {
        let mut producer = self.producer_mut();
        while producer.has_more() {
            producer.produce_next()?;
            producer.remove_last()?;
        }
        Ok(())
    }
}

/// Equality of content across container types.
///
/// Containers of different variants are never equal. Otherwise:
/// - sequences: same elements in same order.
/// - sets: same size and all elements of one contained in the other.
/// - bags: same number of occurrences of every element.
pub fn content_eq<A, B>(a: &A, b: &B) -> Result<bool>
where
    A: Container + ?Sized,
    B: Container<Element = A::Element> + ?Sized,
    A::Element: PartialEq,
{
    if a.variant() != b.variant() || a.size() != b.size() {
        return Ok(false);
    }

    match a.variant() {
        Variant::Sequence => {
            let mut left = a.producer();
            let mut right = b.producer();
            while left.has_more() && right.has_more() {
                if left.produce_next()? != right.produce_next()? {
                    return Ok(false);
                }
            }
            Ok(left.has_more() == right.has_more())
        }
        Variant::Set => b.contains_all(a),
        Variant::Bag => {
            let mut producer = a.producer();
            while producer.has_more() {
                let element = producer.produce_next()?;
                if occurrences(a, element)? != occurrences(b, element)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

/// Hash of content consistent with `content_eq`.
pub fn content_hash<C>(container: &C) -> Result<u64>
where
    C: Container + ?Sized,
    C::Element: Hash,
{
    let mut hasher = match container.variant() {
        Variant::Sequence => ContentHasher::ordered(),
        Variant::Set | Variant::Bag => ContentHasher::unordered(),
    };
    container.for_each(|element| {
        hasher.add(element);
        Ok::<_, CollectionError>(())
    })?;
    Ok(hasher.finish())
}

fn occurrences<C>(container: &C, element: &C::Element) -> Result<usize>
where
    C: Traversable + ?Sized,
    C::Element: PartialEq,
{
    let mut count = 0;
    container.for_each(|e| {
        if e == element {
            count += 1;
        }
        Ok::<_, CollectionError>(())
    })?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        unsized_decomposer, Decomposer, IterProducer, LastProduced, UnsizedDecomposer,
    };

    /// Minimal bag relying on every default of the container traits.
    #[derive(Debug, Default)]
    struct Bag {
        items: Vec<i32>,
        variant: Option<Variant>,
        locked: bool,
    }

    impl Bag {
        fn of(items: &[i32]) -> Self {
            Bag {
                items: items.to_vec(),
                ..Default::default()
            }
        }

        fn with_variant(mut self, variant: Variant) -> Self {
            self.variant = Some(variant);
            self
        }
    }

    struct BagCursor<'a> {
        bag: &'a mut Bag,
        index: usize,
        last: LastProduced<usize>,
    }

    impl SequenceProducer for BagCursor<'_> {
        type Element = i32;

        fn has_more(&self) -> bool {
            self.index < self.bag.items.len()
        }

        fn produce_next(&mut self) -> Result<&i32> {
            let element = self
                .bag
                .items
                .get(self.index)
                .ok_or(CollectionError::Exhausted)?;
            self.last.set(self.index);
            self.index += 1;
            Ok(element)
        }

        fn remove_last(&mut self) -> Result<()> {
            if self.bag.locked {
                return Err(CollectionError::unsupported("remove_last"));
            }
            let index = self.last.take()?;
            self.bag.items.remove(index);
            self.index = index;
            Ok(())
        }
    }

    impl Traversable for Bag {
        type Element = i32;

        type Producer<'a> = IterProducer<'a, i32, std::slice::Iter<'a, i32>>
        where
            Self: 'a;

        type Decomposer<'a> = UnsizedDecomposer<Self::Producer<'a>>
        where
            Self: 'a;

        fn producer(&self) -> Self::Producer<'_> {
            IterProducer::new(self.items.iter())
        }

        fn decomposer(&self) -> Self::Decomposer<'_> {
            unsized_decomposer(self)
        }
    }

    impl TraversableMut for Bag {
        type ProducerMut<'a> = BagCursor<'a>
        where
            Self: 'a;

        fn producer_mut(&mut self) -> Self::ProducerMut<'_> {
            BagCursor {
                bag: self,
                index: 0,
                last: LastProduced::none(),
            }
        }
    }

    impl Container for Bag {
        fn size(&self) -> usize {
            self.items.len()
        }

        fn contains(&self, element: &i32) -> bool {
            self.items.contains(element)
        }

        fn variant(&self) -> Variant {
            self.variant.unwrap_or(Variant::Bag)
        }
    }

    impl MutableContainer for Bag {}

    #[test]
    fn add_is_unsupported_by_default() {
        let mut bag = Bag::of(&[1]);
        assert!(bag.add(2).unwrap_err().is_unsupported());
        assert_eq!(bag.items, vec![1]);

        // Nothing to add, nothing to refuse.
        assert_eq!(bag.add_all(&Bag::default()), Ok(false));
        assert!(bag.add_all(&Bag::of(&[3])).unwrap_err().is_unsupported());
    }

    #[test]
    fn queries() {
        let bag = Bag::of(&[1, 2, 2]);
        assert_eq!(bag.size(), 3);
        assert!(!bag.is_empty());
        assert!(Bag::default().is_empty());
        assert!(bag.contains(&2));
        assert!(!bag.contains(&5));
        assert_eq!(bag.contains_all(&Bag::of(&[2, 1])), Ok(true));
        assert_eq!(bag.contains_all(&Bag::of(&[2, 4])), Ok(false));
        assert_eq!(bag.contains_all(&Bag::default()), Ok(true));
    }

    #[test]
    fn snapshot_is_independent() {
        let mut bag = Bag::of(&[1, 2, 3]);
        let mut snapshot = bag.to_vec().unwrap();
        assert_eq!(snapshot.len(), bag.size());

        bag.remove(&2).unwrap();
        assert_eq!(snapshot, vec![1, 2, 3]);
        snapshot.push(9);
        assert_eq!(bag.items, vec![1, 3]);
    }

    #[test]
    fn snapshot_into_buffer() {
        let bag = Bag::of(&[4, 5]);
        let buffer = bag.to_vec_in(vec![1, 2, 3]).unwrap();
        assert_eq!(buffer, vec![4, 5]);
    }

    #[test]
    fn remove_single_occurrence() {
        let mut bag = Bag::of(&[1, 2, 1]);
        assert_eq!(bag.remove(&1), Ok(true));
        assert_eq!(bag.items, vec![2, 1]);
        assert_eq!(bag.remove(&7), Ok(false));
    }

    #[test]
    fn remove_if() {
        let mut bag = Bag::of(&[1, 2, 3, 4]);
        assert_eq!(bag.remove_if(|e| e % 2 == 0), Ok(true));
        assert_eq!(bag.items, vec![1, 3]);
        assert_eq!(bag.remove_if(|e| *e > 10), Ok(false));
    }

    #[test]
    fn try_remove_if_keeps_partial_removal() {
        let mut bag = Bag::of(&[2, 4, 5, 6]);
        let result = bag.try_remove_if(|&e| {
            if e == 5 {
                Err(CollectionError::constraint("five"))
            } else {
                Ok(e % 2 == 0)
            }
        });

        assert_eq!(result, Err(CollectionError::constraint("five")));
        assert_eq!(bag.items, vec![5, 6]);
    }

    #[test]
    fn unsupported_removal_leaves_unchanged() {
        let mut bag = Bag::of(&[1, 2, 3]);
        bag.locked = true;

        assert!(bag.remove_if(|_| true).unwrap_err().is_unsupported());
        assert!(bag.clear().unwrap_err().is_unsupported());
        assert_eq!(bag.items, vec![1, 2, 3]);
    }

    #[test]
    fn bulk_removal() {
        let mut bag = Bag::of(&[1, 2, 3, 2]);
        assert_eq!(bag.remove_all(&Bag::of(&[2])), Ok(true));
        assert_eq!(bag.items, vec![1, 3]);

        let mut bag = Bag::of(&[1, 2, 3]);
        assert_eq!(bag.retain_all(&Bag::of(&[2, 3, 4])), Ok(true));
        assert_eq!(bag.items, vec![2, 3]);
        assert_eq!(bag.retain_all(&Bag::of(&[2, 3, 4])), Ok(false));

        bag.clear().unwrap();
        assert!(bag.is_empty());
    }

    #[test]
    fn bag_equality() {
        let a = Bag::of(&[1, 2, 2, 3]);
        let b = Bag::of(&[2, 3, 2, 1]);
        let c = Bag::of(&[1, 2, 3, 3]);
        assert_eq!(content_eq(&a, &b), Ok(true));
        assert_eq!(content_eq(&a, &c), Ok(false));
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn sequence_equality() {
        let a = Bag::of(&[1, 2, 3]).with_variant(Variant::Sequence);
        let b = Bag::of(&[1, 2, 3]).with_variant(Variant::Sequence);
        let c = Bag::of(&[3, 2, 1]).with_variant(Variant::Sequence);
        assert_eq!(content_eq(&a, &b), Ok(true));
        assert_eq!(content_eq(&a, &c), Ok(false));
        assert_eq!(content_hash(&a), content_hash(&b));
        assert_ne!(content_hash(&a), content_hash(&c));
    }

    #[test]
    fn variants_do_not_mix() {
        let sequence = Bag::of(&[1, 2]).with_variant(Variant::Sequence);
        let set = Bag::of(&[1, 2]).with_variant(Variant::Set);
        let bag = Bag::of(&[1, 2]);
        assert_eq!(content_eq(&sequence, &set), Ok(false));
        assert_eq!(content_eq(&set, &bag), Ok(false));
        let other_set = Bag::of(&[2, 1]).with_variant(Variant::Set);
        assert_eq!(content_eq(&set, &other_set), Ok(true));
    }

    #[test]
    fn sized_decomposer() {
        let bag = Bag::of(&[1, 2, 3, 4]);
        let mut decomposer = bag.sized_decomposer(Characteristics::new());
        assert_eq!(decomposer.exact_size(), Some(4));

        let mut prefix = decomposer.try_split().unwrap();
        let mut seen = Vec::new();
        prefix.for_each_remaining(|&e| seen.push(e)).unwrap();
        decomposer.for_each_remaining(|&e| seen.push(e)).unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }
}
