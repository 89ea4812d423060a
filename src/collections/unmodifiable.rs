use crate::core::*;

/// Read only view of a container.
///
/// Every query is delegated to the viewed container while every mutation
/// fails with `Unsupported` before touching it, even when it would change
/// nothing.
#[derive(Debug)]
pub struct Unmodifiable<'c, C: ?Sized> {
    inner: &'c C,
}

impl<'c, C: ?Sized> Unmodifiable<'c, C> {
    pub fn new(inner: &'c C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &'c C {
        self.inner
    }
}

impl<C: ?Sized> Clone for Unmodifiable<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for Unmodifiable<'_, C> {}

impl<'c, C: Container + ?Sized + 'c> Traversable for Unmodifiable<'c, C> {
    type Element = C::Element;

    type Producer<'a> = C::Producer<'c>
    where
        Self: 'a;

    type Decomposer<'a> = C::Decomposer<'c>
    where
        Self: 'a;

    fn producer(&self) -> Self::Producer<'_> {
        self.inner.producer()
    }

    /// Characteristics of the viewed container, the view doesn't freeze it.
    fn decomposer(&self) -> Self::Decomposer<'_> {
        self.inner.decomposer()
    }
}

/// Producers of the view never remove.
impl<'c, C: Container + ?Sized + 'c> TraversableMut for Unmodifiable<'c, C> {
    type ProducerMut<'a> = ReadOnly<C::Producer<'c>>
    where
        Self: 'a;

    fn producer_mut(&mut self) -> Self::ProducerMut<'_> {
        ReadOnly(self.inner.producer())
    }
}

impl<'c, C: Container + ?Sized + 'c> Container for Unmodifiable<'c, C> {
    fn size(&self) -> usize {
        self.inner.size()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn contains(&self, element: &Self::Element) -> bool {
        self.inner.contains(element)
    }

    fn variant(&self) -> Variant {
        self.inner.variant()
    }
}

impl<'c, C: Container + ?Sized + 'c> MutableContainer for Unmodifiable<'c, C> {
    fn add(&mut self, _: Self::Element) -> Result<bool> {
        Err(CollectionError::unsupported("add"))
    }

    fn add_all<O>(&mut self, _: &O) -> Result<bool>
    where
        O: Traversable<Element = Self::Element> + ?Sized,
        Self::Element: Clone,
    {
        Err(CollectionError::unsupported("add_all"))
    }

    fn extend_from<I>(&mut self, _: I) -> Result<bool>
    where
        I: IntoIterator<Item = Self::Element>,
    {
        Err(CollectionError::unsupported("extend_from"))
    }

    fn remove(&mut self, _: &Self::Element) -> Result<bool>
    where
        Self::Element: PartialEq,
    {
        Err(CollectionError::unsupported("remove"))
    }

    fn remove_all<O>(&mut self, _: &O) -> Result<bool>
    where
        O: Container<Element = Self::Element> + ?Sized,
    {
        Err(CollectionError::unsupported("remove_all"))
    }

    fn retain_all<O>(&mut self, _: &O) -> Result<bool>
    where
        O: Container<Element = Self::Element> + ?Sized,
    {
        Err(CollectionError::unsupported("retain_all"))
    }

    fn remove_if<F>(&mut self, _: F) -> Result<bool>
    where
        F: FnMut(&Self::Element) -> bool,
    {
        Err(CollectionError::unsupported("remove_if"))
    }

    fn try_remove_if<X, F>(&mut self, _: F) -> Result<bool, X>
    where
        F: FnMut(&Self::Element) -> Result<bool, X>,
        X: From<CollectionError>,
    {
        Err(CollectionError::unsupported("remove_if").into())
    }

    fn clear(&mut self) -> Result<()> {
        Err(CollectionError::unsupported("clear"))
    }
}

/// Producer wrapper that refuses removal.
#[derive(Debug, Clone)]
pub struct ReadOnly<P>(P);

impl<P: SequenceProducer> SequenceProducer for ReadOnly<P> {
    type Element = P::Element;

    fn has_more(&self) -> bool {
        self.0.has_more()
    }

    fn produce_next(&mut self) -> Result<&P::Element> {
        self.0.produce_next()
    }
}
