use super::{ArrayDecomposer, Characteristics, Decomposer, DecomposerConfig, SizeEstimate};
use crate::core::{CollectionError, Result, SequenceProducer};
use log::*;

/// Decomposer of unknown size over a producer.
/// Never splits.
#[derive(Debug, Clone)]
pub struct UnsizedDecomposer<P> {
    producer: P,
    characteristics: Characteristics,
}

impl<P: SequenceProducer> UnsizedDecomposer<P> {
    pub fn new(producer: P) -> Self {
        Self::with_characteristics(producer, Characteristics::new())
    }

    /// `sized` and `subsized` are dropped from given characteristics.
    pub fn with_characteristics(producer: P, characteristics: Characteristics) -> Self {
        Self {
            producer,
            characteristics: characteristics.without(
                Characteristics::new().with_sized(true).with_subsized(true),
            ),
        }
    }
}

impl<P: SequenceProducer> Decomposer for UnsizedDecomposer<P> {
    type Element = P::Element;

    type Split = Self;

    fn try_split(&mut self) -> Option<Self> {
        None
    }

    fn try_advance<F: FnOnce(&P::Element)>(&mut self, action: F) -> Result<bool> {
        if self.producer.has_more() {
            action(self.producer.produce_next()?);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn for_each_remaining<F: FnMut(&P::Element)>(&mut self, mut action: F) -> Result<()> {
        self.producer.consume_remaining(|element| {
            action(element);
            Ok::<_, CollectionError>(())
        })
    }

    fn estimate_size(&self) -> SizeEstimate {
        SizeEstimate::Unknown
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}

/// Decomposer over a producer of known size.
///
/// Splits by copying a batch of elements out of the producer into an
/// `ArrayDecomposer`. Each consecutive batch is larger by `batch_unit`,
/// up to `max_batch`.
#[derive(Debug, Clone)]
pub struct SizedDecomposer<P> {
    producer: P,
    remaining: usize,
    batch: usize,
    characteristics: Characteristics,
    config: DecomposerConfig,
    /// Error that interrupted a split, returned on next advance.
    pending: Option<CollectionError>,
}

impl<P: SequenceProducer> SizedDecomposer<P> {
    /// Size must be the number of elements the producer will produce.
    /// `sized` and `subsized` are added to given characteristics,
    /// unless they contain `concurrent`.
    pub fn new(producer: P, size: usize, characteristics: Characteristics) -> Self {
        Self::with_config(producer, size, characteristics, DecomposerConfig::default())
    }

    pub fn with_config(
        producer: P,
        size: usize,
        characteristics: Characteristics,
        config: DecomposerConfig,
    ) -> Self {
        let characteristics = if characteristics.concurrent() {
            characteristics
        } else {
            characteristics.with_sized(true).with_subsized(true)
        };
        Self {
            producer,
            remaining: size,
            batch: 0,
            characteristics,
            config,
            pending: None,
        }
    }

    fn take_pending(&mut self) -> Result<()> {
        match self.pending.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl<P: SequenceProducer> Decomposer for SizedDecomposer<P>
where
    P::Element: Clone,
{
    type Element = P::Element;

    type Split = ArrayDecomposer<P::Element>;

    fn try_split(&mut self) -> Option<Self::Split> {
        if self.remaining <= 1 || self.pending.is_some() || !self.producer.has_more() {
            return None;
        }

        let n = (self.batch + self.config.batch_unit())
            .min(self.remaining)
            .min(self.config.max_batch());
        let mut batch = Vec::with_capacity(n);
        while batch.len() < n && self.producer.has_more() {
            match self.producer.produce_next() {
                Ok(element) => batch.push(element.clone()),
                Err(error) => {
                    self.pending = Some(error);
                    break;
                }
            }
        }
        if batch.is_empty() {
            return None;
        }

        self.batch = batch.len();
        self.remaining = self.remaining.saturating_sub(batch.len());
        trace!(
            "Split batch of {} elements, {} remaining",
            batch.len(),
            self.remaining
        );

        Some(ArrayDecomposer::new(batch, self.characteristics))
    }

    fn try_advance<F: FnOnce(&P::Element)>(&mut self, action: F) -> Result<bool> {
        self.take_pending()?;
        if self.producer.has_more() {
            action(self.producer.produce_next()?);
            self.remaining = self.remaining.saturating_sub(1);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn for_each_remaining<F: FnMut(&P::Element)>(&mut self, mut action: F) -> Result<()> {
        self.take_pending()?;
        let remaining = &mut self.remaining;
        self.producer.consume_remaining(|element| {
            action(element);
            *remaining = remaining.saturating_sub(1);
            Ok::<_, CollectionError>(())
        })
    }

    fn estimate_size(&self) -> SizeEstimate {
        if self.characteristics.sized() {
            SizeEstimate::Exact(self.remaining)
        } else {
            SizeEstimate::Approximate(self.remaining)
        }
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IterProducer;

    struct Failing {
        produced: usize,
        fail_at: usize,
        slot: usize,
    }

    impl SequenceProducer for Failing {
        type Element = usize;

        fn has_more(&self) -> bool {
            true
        }

        fn produce_next(&mut self) -> Result<&usize> {
            if self.produced == self.fail_at {
                return Err(CollectionError::concurrent_modification(0, 1));
            }
            self.slot = self.produced;
            self.produced += 1;
            Ok(&self.slot)
        }
    }

    #[test]
    fn unsized_never_splits() {
        let data = [1, 2, 3];
        let mut decomposer = UnsizedDecomposer::new(IterProducer::new(data.iter()));

        assert!(decomposer.try_split().is_none());
        assert_eq!(decomposer.estimate_size(), SizeEstimate::Unknown);
        assert_eq!(decomposer.exact_size(), None);

        let mut seen = Vec::new();
        decomposer.for_each_remaining(|&e| seen.push(e)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn unsized_drops_sized() {
        let decomposer = UnsizedDecomposer::with_characteristics(
            IterProducer::new([1].iter()),
            Characteristics::sequence(),
        );
        assert!(decomposer.characteristics().ordered());
        assert!(!decomposer.characteristics().sized());
    }

    #[test]
    fn growing_batches() {
        let data = (0..20).collect::<Vec<u32>>();
        let mut decomposer = SizedDecomposer::with_config(
            IterProducer::new(data.iter()),
            data.len(),
            Characteristics::new().with_ordered(true),
            DecomposerConfig::new(2, 5),
        );

        let sizes = std::iter::from_fn(|| decomposer.try_split())
            .map(|split| split.exact_size().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(sizes, vec![2, 4, 5, 5, 4]);
        assert_eq!(decomposer.exact_size(), Some(0));
    }

    #[test]
    fn split_keeps_every_element_once() {
        let data = (0..100).collect::<Vec<u32>>();
        let mut decomposer = SizedDecomposer::with_config(
            IterProducer::new(data.iter()),
            data.len(),
            Characteristics::new(),
            DecomposerConfig::new(7, 30),
        );

        let mut out = Vec::new();
        let mut prefix = decomposer.try_split().unwrap();
        prefix.for_each_remaining(|&e| out.push(e)).unwrap();
        assert!(decomposer.try_advance(|&e| out.push(e)).unwrap());
        let mut second = decomposer.try_split().unwrap();
        while second.try_advance(|&e| out.push(e)).unwrap() {}
        decomposer.for_each_remaining(|&e| out.push(e)).unwrap();

        assert_eq!(out, data);
        assert_eq!(decomposer.exact_size(), Some(0));
    }

    #[test]
    fn split_error_surfaces_on_advance() {
        let producer = Failing {
            produced: 0,
            fail_at: 3,
            slot: 0,
        };
        let mut decomposer = SizedDecomposer::with_config(
            producer,
            10,
            Characteristics::new(),
            DecomposerConfig::new(5, 5),
        );

        let prefix = decomposer.try_split().unwrap();
        assert_eq!(prefix.exact_size(), Some(3));
        assert!(decomposer.try_split().is_none());
        assert_eq!(
            decomposer.try_advance(|_| ()),
            Err(CollectionError::concurrent_modification(0, 1))
        );
    }

    #[test]
    fn concurrent_is_not_sized() {
        let data = [1, 2];
        let decomposer = SizedDecomposer::new(
            IterProducer::new(data.iter()),
            2,
            Characteristics::new().with_concurrent(true),
        );
        assert_eq!(decomposer.estimate_size(), SizeEstimate::Approximate(2));
        assert_eq!(decomposer.exact_size(), None);
    }
}
