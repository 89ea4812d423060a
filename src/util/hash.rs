use ahash::RandomState;
use std::hash::{BuildHasher, Hash, Hasher};

/// Fixed so that equal elements hash the same in every container.
const SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

pub fn element_hash<E: Hash + ?Sized>(element: &E) -> u64 {
    let [k0, k1, k2, k3] = SEEDS;
    let mut hasher = RandomState::with_seeds(k0, k1, k2, k3).build_hasher();
    element.hash(&mut hasher);
    hasher.finish()
}

/// Accumulates element hashes into a content hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentHasher {
    /// Depends on order of elements.
    Ordered(u64),
    /// Independent of order of elements.
    Unordered(u64),
}

impl ContentHasher {
    pub fn ordered() -> Self {
        ContentHasher::Ordered(1)
    }

    pub fn unordered() -> Self {
        ContentHasher::Unordered(0)
    }

    pub fn add<E: Hash + ?Sized>(&mut self, element: &E) {
        let hash = element_hash(element);
        match self {
            ContentHasher::Ordered(acc) => *acc = acc.wrapping_mul(31).wrapping_add(hash),
            ContentHasher::Unordered(acc) => *acc = acc.wrapping_add(hash),
        }
    }

    pub fn finish(self) -> u64 {
        match self {
            ContentHasher::Ordered(acc) | ContentHasher::Unordered(acc) => acc,
        }
    }
}

pub fn ordered_hash<'a, E: Hash + 'a>(elements: impl IntoIterator<Item = &'a E>) -> u64 {
    let mut hasher = ContentHasher::ordered();
    elements.into_iter().for_each(|e| hasher.add(e));
    hasher.finish()
}

pub fn unordered_hash<'a, E: Hash + 'a>(elements: impl IntoIterator<Item = &'a E>) -> u64 {
    let mut hasher = ContentHasher::unordered();
    elements.into_iter().for_each(|e| hasher.add(e));
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(element_hash(&42u32), element_hash(&42u32));
        assert_eq!(element_hash("a"), element_hash(&String::from("a")));
    }

    #[test]
    fn order() {
        let a = [1, 2, 3];
        let b = [3, 2, 1];
        assert_ne!(ordered_hash(&a), ordered_hash(&b));
        assert_eq!(unordered_hash(&a), unordered_hash(&b));
    }

    #[test]
    fn empty() {
        let empty: [u8; 0] = [];
        assert_eq!(ordered_hash(&empty), 1);
        assert_eq!(unordered_hash(&empty), 0);
    }
}
