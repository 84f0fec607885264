//! Operator forms of the set algebra on [`Bits`].
//!
//! Operators take references and allocate a fresh set; the `*_with` methods
//! on [`Bits`] are the in-place equivalents.

use std::ops::{BitAnd, BitOr, BitXor, Sub};

use crate::Bits;

impl Bits {
    /// Members of either set.
    #[must_use]
    pub fn union(&self, other: &Bits) -> Bits {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    /// Members of both sets.
    #[must_use]
    pub fn intersection(&self, other: &Bits) -> Bits {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Members of this set that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Bits) -> Bits {
        let mut result = self.clone();
        result.difference_with(other);
        result
    }

    /// Members of exactly one of the two sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Bits) -> Bits {
        let mut result = self.clone();
        result.symmetric_difference_with(other);
        result
    }
}

impl BitOr for &Bits {
    type Output = Bits;

    fn bitor(self, rhs: &Bits) -> Bits {
        self.union(rhs)
    }
}

impl BitAnd for &Bits {
    type Output = Bits;

    fn bitand(self, rhs: &Bits) -> Bits {
        self.intersection(rhs)
    }
}

impl BitXor for &Bits {
    type Output = Bits;

    fn bitxor(self, rhs: &Bits) -> Bits {
        self.symmetric_difference(rhs)
    }
}

impl Sub for &Bits {
    type Output = Bits;

    fn sub(self, rhs: &Bits) -> Bits {
        self.difference(rhs)
    }
}
