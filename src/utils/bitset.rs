//! A fixed-capacity bit vector for closure sets.
//!
//! The closure table uses bit sets twice: as the scratch "already collected" marker while
//! rows are built, and as the storage of rows that cover a large share of all components.
//! Membership tests are a single word load.
//!
//! # Example
//!
//! ```rust
//! use ontoreach::utils::BitSet;
//!
//! let mut set = BitSet::new(100);
//! set.insert(0);
//! set.insert(50);
//! set.insert(99);
//!
//! assert!(set.contains(50));
//! assert_eq!(set.count(), 3);
//! assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 50, 99]);
//! ```

const WORD_BITS: usize = 64;

/// A bit vector with a fixed number of addressable bits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    /// The bits, stored as a vector of words.
    words: Vec<u64>,
    /// The number of addressable bits.
    len: usize,
}

impl BitSet {
    /// Creates a new empty bit set able to hold indices `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            len: capacity,
        }
    }

    /// Creates a bit set of the given capacity with exactly one bit on.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[must_use]
    pub fn singleton(capacity: usize, index: usize) -> Self {
        let mut set = Self::new(capacity);
        set.insert(index);
        set
    }

    /// Returns the capacity of this bit set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Sets the bit at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn insert(&mut self, index: usize) {
        assert!(index < self.len, "index out of bounds");
        self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
    }

    /// Clears the bit at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn remove(&mut self, index: usize) {
        assert!(index < self.len, "index out of bounds");
        self.words[index / WORD_BITS] &= !(1u64 << (index % WORD_BITS));
    }

    /// Returns `true` if the bit at the given index is set.
    ///
    /// Indices beyond the capacity are reported as absent.
    #[must_use]
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len && (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Returns the number of bits set.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Bytes of heap storage held by the set.
    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    /// Computes the union with another bit set (in place).
    ///
    /// Returns `true` if `self` changed.
    ///
    /// # Panics
    ///
    /// Panics if the two sets have different capacities.
    pub fn union_with(&mut self, other: &Self) -> bool {
        assert_eq!(self.len, other.len, "bit sets must have same length");
        let mut changed = false;
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            let old = *a;
            *a |= *b;
            changed |= old != *a;
        }
        changed
    }

    /// Returns an iterator over the indices of set bits, in ascending order.
    pub fn iter(&self) -> BitSetIter<'_> {
        BitSetIter {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the set bits in a [`BitSet`].
pub struct BitSetIter<'a> {
    words: &'a [u64],
    word_idx: usize,
    /// Remaining bits of the word at `word_idx`
    current: u64,
}

impl Iterator for BitSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.word_idx * WORD_BITS + bit);
            }
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitset_basic() {
        let mut bs = BitSet::new(100);
        assert!(bs.is_empty());
        assert_eq!(bs.count(), 0);

        bs.insert(0);
        bs.insert(50);
        bs.insert(99);

        assert!(!bs.is_empty());
        assert_eq!(bs.count(), 3);
        assert!(bs.contains(0));
        assert!(bs.contains(50));
        assert!(bs.contains(99));
        assert!(!bs.contains(1));
    }

    #[test]
    fn test_bitset_remove() {
        let mut bs = BitSet::new(130);
        for i in [0, 64, 129] {
            bs.insert(i);
        }
        bs.remove(64);
        bs.remove(3);
        assert_eq!(bs.iter().collect::<Vec<_>>(), vec![0, 129]);
        assert_eq!(bs.heap_bytes(), 3 * 8);
    }

    #[test]
    fn test_bitset_contains_out_of_range() {
        let bs = BitSet::singleton(10, 3);
        assert!(bs.contains(3));
        assert!(!bs.contains(10));
        assert!(!bs.contains(usize::MAX));
    }

    #[test]
    fn test_bitset_zero_capacity() {
        let bs = BitSet::new(0);
        assert!(bs.is_empty());
        assert_eq!(bs.len(), 0);
        assert_eq!(bs.iter().count(), 0);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_bitset_insert_out_of_range() {
        let mut bs = BitSet::new(4);
        bs.insert(4);
    }

    #[test]
    fn test_bitset_union() {
        let mut a = BitSet::new(100);
        let mut b = BitSet::new(100);

        a.insert(0);
        a.insert(1);
        b.insert(1);
        b.insert(2);

        assert!(a.union_with(&b));
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![0, 1, 2]);

        // Second union adds nothing new
        assert!(!a.union_with(&b));
    }

    #[test]
    fn test_bitset_iter_across_words() {
        let mut bs = BitSet::new(200);
        for i in [5, 63, 64, 127, 128, 199] {
            bs.insert(i);
        }

        let bits: Vec<_> = bs.iter().collect();
        assert_eq!(bits, vec![5, 63, 64, 127, 128, 199]);
    }

    #[test]
    fn test_bitset_debug() {
        let mut bs = BitSet::new(8);
        bs.insert(1);
        bs.insert(6);
        assert_eq!(format!("{bs:?}"), "{1, 6}");
    }
}
