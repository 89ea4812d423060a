use super::{CollectionError, Result};

/// Produces elements of one traversal one at a time.
///
/// A producer is bound to a single traversal and is discarded after it.
/// Dropping it at any point is always fine, that is the only way to stop early.
///
/// Produced element is lent until the next call on the producer.
pub trait SequenceProducer {
    type Element;

    /// True iff following `produce_next` would succeed.
    /// Repeatable and free of side effects.
    fn has_more(&self) -> bool;

    /// Next element in traversal order.
    /// Err(Exhausted) if `has_more` is false.
    fn produce_next(&mut self) -> Result<&Self::Element>;

    /// Removes element most recently returned by `produce_next` from the backing container.
    ///
    /// Errors:
    /// - Unsupported if backing container doesn't allow removal through this producer.
    /// - InvalidState if there was no production or the produced element was already removed.
    fn remove_last(&mut self) -> Result<()> {
        Err(CollectionError::unsupported("remove_last"))
    }

    /// Applies action to every element not yet produced, in traversal order.
    ///
    /// Error of the action is returned immediately and remaining elements are left unconsumed.
    fn consume_remaining<X, F>(&mut self, mut action: F) -> Result<(), X>
    where
        F: FnMut(&Self::Element) -> Result<(), X>,
        X: From<CollectionError>,
    {
        while self.has_more() {
            let element = self.produce_next()?;
            action(element)?;
        }
        Ok(())
    }

    /// Clones remaining elements out of the producer.
    fn cloned_elements(self) -> Cloned<Self>
    where
        Self: Sized,
        Self::Element: Clone,
    {
        Cloned {
            producer: self,
            failed: false,
        }
    }
}

impl<P: SequenceProducer + ?Sized> SequenceProducer for &mut P {
    type Element = P::Element;

    fn has_more(&self) -> bool {
        (**self).has_more()
    }

    fn produce_next(&mut self) -> Result<&Self::Element> {
        (**self).produce_next()
    }

    fn remove_last(&mut self) -> Result<()> {
        (**self).remove_last()
    }
}

/// One slot "produced, not yet removed" record of removal capable producers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LastProduced<T>(Option<T>);

impl<T> LastProduced<T> {
    pub(crate) fn none() -> Self {
        LastProduced(None)
    }

    pub(crate) fn set(&mut self, last: T) {
        self.0 = Some(last);
    }

    /// Consumes the record for removal.
    pub(crate) fn take(&mut self) -> Result<T> {
        self.0.take().ok_or(CollectionError::invalid_state(
            "remove_last without a pending produced element",
        ))
    }
}

/// Producer over iterator of references.
///
/// Keeps one element of lookahead so that `has_more` doesn't need `&mut`.
/// Read only, so `remove_last` is not supported.
#[derive(Debug, Clone)]
pub struct IterProducer<'a, E, I> {
    iter: I,
    next: Option<&'a E>,
}

impl<'a, E, I: Iterator<Item = &'a E>> IterProducer<'a, E, I> {
    pub fn new(mut iter: I) -> Self {
        let next = iter.next();
        Self { iter, next }
    }
}

impl<'a, E, I: Iterator<Item = &'a E>> SequenceProducer for IterProducer<'a, E, I> {
    type Element = E;

    fn has_more(&self) -> bool {
        self.next.is_some()
    }

    fn produce_next(&mut self) -> Result<&E> {
        let element = self.next.take().ok_or(CollectionError::Exhausted)?;
        self.next = self.iter.next();
        Ok(element)
    }
}

impl<'a, E, I: Iterator<Item = &'a E>> Iterator for IterProducer<'a, E, I> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        let element = self.next.take()?;
        self.next = self.iter.next();
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let extra = self.next.is_some() as usize;
        let (min, max) = self.iter.size_hint();
        (
            min.saturating_add(extra),
            max.and_then(|max| max.checked_add(extra)),
        )
    }
}

/// Iterator of clones of remaining elements of a producer.
/// Stops after first error.
pub struct Cloned<P> {
    producer: P,
    failed: bool,
}

impl<P: SequenceProducer> Cloned<P>
where
    P::Element: Clone,
{
    pub fn into_inner(self) -> P {
        self.producer
    }
}

impl<P: SequenceProducer> Iterator for Cloned<P>
where
    P::Element: Clone,
{
    type Item = Result<P::Element>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.producer.has_more() {
            return None;
        }
        let next = self.producer.produce_next().cloned();
        self.failed = next.is_err();
        Some(next)
    }
}
