//! Packed bit-vector sets.
//!
//! [`Bits`] is a growable set of small non-negative integers stored one bit
//! per member in `u64` words. It is the shared currency of the region index
//! (coverage tracking during cross-referencing) and the reference graph
//! (adjacency rows, closures, visited markers).
//!
//! # Performance
//! - Membership testing: O(1) word lookup and mask
//! - Set algebra: O(words), one bitwise op per word
//! - Iteration: O(words + members) via `trailing_zeros`
//!
//! Members are plain `usize` values. The set grows on insertion; equality and
//! hashing ignore trailing zero words, so two sets with the same members are
//! equal regardless of how much capacity either has reserved.

mod encoding;
mod ops;

use std::fmt;
use std::hash::{Hash, Hasher};

const WORD_BITS: usize = u64::BITS as usize;

/// Whether structural invariant checks run.
///
/// Always on under `debug_assertions`; the `strict-invariants` feature turns
/// them on in release builds as well. Graph symmetry and sorted name tables
/// are checked only when this returns `true`.
#[inline]
pub const fn strict_invariants() -> bool {
    cfg!(any(debug_assertions, feature = "strict-invariants"))
}

#[inline]
const fn word_index(bit: usize) -> usize {
    bit / WORD_BITS
}

#[inline]
const fn bit_mask(bit: usize) -> u64 {
    1u64 << (bit % WORD_BITS)
}

#[inline]
const fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// A growable set of `usize` stored as packed bits.
#[derive(Clone, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Bits {
    words: Vec<u64>,
}

impl Bits {
    /// Create an empty set.
    #[inline]
    pub const fn new() -> Self {
        Bits { words: Vec::new() }
    }

    /// Create an empty set with room for members `0..bits` without growing.
    pub fn with_capacity(bits: usize) -> Self {
        Bits {
            words: vec![0; words_for(bits)],
        }
    }

    /// Create a set containing every member of `0..size`.
    pub fn full(size: usize) -> Self {
        let mut bits = Bits::with_capacity(size);
        bits.set_range(0, size);
        bits
    }

    /// Create a set containing a single member.
    pub fn single(bit: usize) -> Self {
        let mut bits = Bits::with_capacity(bit + 1);
        bits.insert(bit);
        bits
    }

    /// Number of members the set can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    fn grow_to_word(&mut self, word: usize) {
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
    }

    /// Add `bit` to the set. Returns `true` if it was not already present.
    #[inline]
    pub fn insert(&mut self, bit: usize) -> bool {
        let word = word_index(bit);
        self.grow_to_word(word);
        let mask = bit_mask(bit);
        let was_set = self.words[word] & mask != 0;
        self.words[word] |= mask;
        !was_set
    }

    /// Remove `bit` from the set. Returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, bit: usize) -> bool {
        let word = word_index(bit);
        match self.words.get_mut(word) {
            Some(w) => {
                let mask = bit_mask(bit);
                let was_set = *w & mask != 0;
                *w &= !mask;
                was_set
            }
            None => false,
        }
    }

    /// Check whether `bit` is a member.
    #[inline]
    pub fn contains(&self, bit: usize) -> bool {
        self.words
            .get(word_index(bit))
            .is_some_and(|w| w & bit_mask(bit) != 0)
    }

    /// Add every member of `start..end`.
    pub fn set_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        self.grow_to_word(word_index(end - 1));
        let first = word_index(start);
        let last = word_index(end - 1);
        for word in first..=last {
            let lo = if word == first { start % WORD_BITS } else { 0 };
            let hi = if word == last {
                (end - 1) % WORD_BITS
            } else {
                WORD_BITS - 1
            };
            let mask = (u64::MAX >> (WORD_BITS - 1 - hi)) & (u64::MAX << lo);
            self.words[word] |= mask;
        }
    }

    /// Remove every member, keeping the allocation.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Number of members (cardinality).
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Drop trailing zero words so the allocation matches the largest member.
    pub fn shrink_to_fit(&mut self) {
        let used = self.trimmed().len();
        self.words.truncate(used);
        self.words.shrink_to_fit();
    }

    fn trimmed(&self) -> &[u64] {
        let used = self
            .words
            .iter()
            .rposition(|&w| w != 0)
            .map_or(0, |last| last + 1);
        &self.words[..used]
    }

    /// Add every member of `other` to this set.
    pub fn union_with(&mut self, other: &Bits) {
        let other = other.trimmed();
        if other.len() > self.words.len() {
            self.words.resize(other.len(), 0);
        }
        for (w, o) in self.words.iter_mut().zip(other) {
            *w |= o;
        }
    }

    /// Keep only members also present in `other`.
    pub fn intersect_with(&mut self, other: &Bits) {
        for (i, w) in self.words.iter_mut().enumerate() {
            *w &= other.words.get(i).copied().unwrap_or(0);
        }
    }

    /// Remove every member of `other` from this set.
    pub fn difference_with(&mut self, other: &Bits) {
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w &= !o;
        }
    }

    /// Keep members present in exactly one of the two sets.
    pub fn symmetric_difference_with(&mut self, other: &Bits) {
        let other = other.trimmed();
        if other.len() > self.words.len() {
            self.words.resize(other.len(), 0);
        }
        for (w, o) in self.words.iter_mut().zip(other) {
            *w ^= o;
        }
    }

    /// Check whether the two sets share at least one member.
    pub fn intersects(&self, other: &Bits) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .any(|(a, b)| a & b != 0)
    }

    /// Check whether every member of this set is also in `other`.
    pub fn is_subset(&self, other: &Bits) -> bool {
        self.words
            .iter()
            .enumerate()
            .all(|(i, w)| w & !other.words.get(i).copied().unwrap_or(0) == 0)
    }

    /// Iterate members in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            word: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Smallest member `>= from`, if any.
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        let mut word = word_index(from);
        let mut bits = self.words.get(word)? & (u64::MAX << (from % WORD_BITS));
        loop {
            if bits != 0 {
                return Some(word * WORD_BITS + bits.trailing_zeros() as usize);
            }
            word += 1;
            bits = *self.words.get(word)?;
        }
    }

    /// Smallest non-member `>= from`. Always exists since the set is finite.
    pub fn next_clear_bit(&self, from: usize) -> usize {
        let mut word = word_index(from);
        let Some(&first) = self.words.get(word) else {
            return from;
        };
        let mut inverted = !first & (u64::MAX << (from % WORD_BITS));
        loop {
            if inverted != 0 {
                return word * WORD_BITS + inverted.trailing_zeros() as usize;
            }
            word += 1;
            match self.words.get(word) {
                Some(&w) => inverted = !w,
                None => return word * WORD_BITS,
            }
        }
    }

    /// Smallest member, if any.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.next_set_bit(0)
    }

    /// Largest member, if any.
    pub fn last(&self) -> Option<usize> {
        let trimmed = self.trimmed();
        let word = trimmed.len().checked_sub(1)?;
        let top = WORD_BITS - 1 - trimmed[word].leading_zeros() as usize;
        Some(word * WORD_BITS + top)
    }

    /// The members of `0..size` that are *not* in this set.
    #[must_use]
    pub fn complement(&self, size: usize) -> Bits {
        let mut result = Bits::full(size);
        result.difference_with(self);
        result
    }

    /// Sum of `weights[i]` over every member `i`.
    ///
    /// Members beyond the end of `weights` contribute nothing.
    pub fn weighted_sum(&self, weights: &[f64]) -> f64 {
        self.iter()
            .take_while(|&i| i < weights.len())
            .map(|i| weights[i])
            .sum()
    }

    /// Collect the members into a `Vec` in ascending order.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl PartialEq for Bits {
    fn eq(&self, other: &Self) -> bool {
        self.trimmed() == other.trimmed()
    }
}

impl Eq for Bits {}

impl Hash for Bits {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.trimmed().hash(state);
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for Bits {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut bits = Bits::new();
        bits.extend(iter);
        bits
    }
}

impl Extend<usize> for Bits {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for bit in iter {
            self.insert(bit);
        }
    }
}

impl<'a> IntoIterator for &'a Bits {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the members of a [`Bits`].
pub struct Iter<'a> {
    words: &'a [u64],
    word: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current == 0 {
            self.word += 1;
            self.current = *self.words.get(self.word)?;
        }
        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1; // Clear the lowest set bit
        Some(self.word * WORD_BITS + bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest: usize = self
            .words
            .get(self.word + 1..)
            .unwrap_or_default()
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum();
        let count = self.current.count_ones() as usize + rest;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Iter<'_> {}
