use super::{CollectionError, Decomposer, Result, SequenceProducer, UnsizedDecomposer};

/// Anything that can produce its elements.
pub trait Traversable {
    type Element;

    /// Read only producer, `remove_last` is not supported through it.
    type Producer<'a>: SequenceProducer<Element = Self::Element>
    where
        Self: 'a;

    type Decomposer<'a>: Decomposer<Element = Self::Element>
    where
        Self: 'a;

    /// Each call returns an independent producer positioned at the start of traversal.
    fn producer(&self) -> Self::Producer<'_>;

    /// Decomposer over all elements.
    ///
    /// Implementations without better knowledge use `unsized_decomposer`, or
    /// `Container::sized_decomposer` for containers. Those with known size or
    /// cheap splitting provide their own.
    fn decomposer(&self) -> Self::Decomposer<'_>;

    /// Applies action to every element in traversal order.
    fn for_each<X, F>(&self, action: F) -> Result<(), X>
    where
        F: FnMut(&Self::Element) -> Result<(), X>,
        X: From<CollectionError>,
    {
        self.producer().consume_remaining(action)
    }
}

/// Traversal through which elements can be removed.
pub trait TraversableMut: Traversable {
    /// `remove_last` may still be unsupported if container forbids removal.
    type ProducerMut<'a>: SequenceProducer<Element = Self::Element>
    where
        Self: 'a;

    fn producer_mut(&mut self) -> Self::ProducerMut<'_>;
}

/// Default decomposer of any traversable.
/// Unknown size and never splits.
pub fn unsized_decomposer<T: Traversable + ?Sized>(
    traversable: &T,
) -> UnsizedDecomposer<T::Producer<'_>> {
    UnsizedDecomposer::new(traversable.producer())
}
