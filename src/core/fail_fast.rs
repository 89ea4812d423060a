use super::{CollectionError, Result};
use getset::CopyGetters;
use log::*;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter of structural modifications of a container.
///
/// Every structural change (addition, removal, clear) must `bump` it.
/// Producers take a `Generation` when created and `check` it on each operation.
#[derive(Debug, Default)]
pub struct ModCount(AtomicU64);

impl ModCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Records one structural modification.
    /// Returns the new generation.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }

    /// Generation as observed now.
    pub fn generation(&self) -> Generation {
        Generation {
            expected: self.current(),
        }
    }
}

impl Clone for ModCount {
    fn clone(&self) -> Self {
        ModCount(AtomicU64::new(self.current()))
    }
}

/// Generation a producer expects its container to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Generation {
    expected: u64,
}

impl Generation {
    /// Err(ConcurrentModification) if container was structurally modified
    /// since this generation was taken, or last resynchronized.
    pub fn check(&self, count: &ModCount) -> Result<()> {
        let found = count.current();
        if found == self.expected {
            Ok(())
        } else {
            warn!(
                "Container modified during traversal, expected generation {} found {}",
                self.expected, found
            );
            Err(CollectionError::concurrent_modification(
                self.expected,
                found,
            ))
        }
    }

    /// Accepts current generation of the container.
    /// Producers call this after their own removal.
    pub fn resync(&mut self, count: &ModCount) {
        self.expected = count.current();
    }
}
