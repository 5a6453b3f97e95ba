//! Outcome flags for ellipse-ellipse intersection and overlap.

use std::ops::{BitOr, BitOrAssign};

/// Bit flags describing the topology found by [`crate::ell_ell_intersect`]
/// and [`crate::ell_ell_overlap`].
///
/// A strong newtype with named constants; the raw bits are stable and
/// surfaced to callers that fold them into per-observation flag words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntersectFlags(u32);

impl IntersectFlags {
    /// The boundaries cross at exactly two points.
    pub const TWO_INTERSECTS: Self = Self(1 << 0);
    /// The boundaries cross at four points.
    pub const FOUR_INTERSECTS: Self = Self(1 << 1);
    /// The first ellipse lies entirely inside the second.
    pub const ONE_INSIDE_TWO: Self = Self(1 << 2);
    /// The second ellipse lies entirely inside the first.
    pub const TWO_INSIDE_ONE: Self = Self(1 << 3);
    /// The ellipses coincide within tolerance.
    pub const IDENTICAL: Self = Self(1 << 4);
    /// The interiors are disjoint (or the overlap is below tolerance).
    pub const NO_OVERLAP: Self = Self(1 << 5);
    /// A result was produced but root polishing hit its accuracy floor.
    pub const WARN_INACCURATE: Self = Self(1 << 6);
    /// Root finding failed; the result is unusable.
    pub const ERROR: Self = Self(1 << 7);

    /// Creates an empty flag set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Raw bit pattern.
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Tests whether all bits of `other` are set.
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the bits of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitOr for IntersectFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for IntersectFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_algebra() {
        let mut f = IntersectFlags::empty();
        assert!(!f.contains(IntersectFlags::TWO_INTERSECTS));

        f.insert(IntersectFlags::TWO_INTERSECTS);
        f |= IntersectFlags::WARN_INACCURATE;

        assert!(f.contains(IntersectFlags::TWO_INTERSECTS));
        assert!(f.contains(IntersectFlags::WARN_INACCURATE));
        assert!(!f.contains(IntersectFlags::ERROR));
        assert_eq!(
            f.bits(),
            IntersectFlags::TWO_INTERSECTS.bits() | IntersectFlags::WARN_INACCURATE.bits()
        );
    }
}
