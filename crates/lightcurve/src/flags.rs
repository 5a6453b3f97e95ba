//! Per-observation classification flag word.

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Classification and diagnostic bits attached to every observation.
///
/// The bit layout is stable and externally visible:
///
/// | bit | meaning |
/// |-----|---------------------------|
/// | 0   | eclipse in progress       |
/// | 1   | star 1 eclipsed           |
/// | 2   | star 2 eclipsed           |
/// | 3   | total eclipse             |
/// | 4   | transit                   |
/// | 5   | double-partial geometry   |
/// | 11  | overlapping spots, star 1 |
/// | 12  | overlapping spots, star 2 |
/// | 14  | numerical failure         |
/// | 15  | warning                   |
/// | 16  | invalid input             |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObsFlags(u32);

impl ObsFlags {
    /// An eclipse is in progress.
    pub const ECLIPSE: Self = Self(1 << 0);
    /// Star 1 is (partly) hidden by star 2.
    pub const STAR1_ECLIPSED: Self = Self(1 << 1);
    /// Star 2 is (partly) hidden by star 1.
    pub const STAR2_ECLIPSED: Self = Self(1 << 2);
    /// The eclipsed star is fully hidden.
    pub const TOTAL: Self = Self(1 << 3);
    /// The eclipsing star's disc lies fully inside the eclipsed disc.
    pub const TRANSIT: Self = Self(1 << 4);
    /// The projected discs cross at four points.
    pub const DOUBLE_PARTIAL: Self = Self(1 << 5);
    /// Two spots on star 1 overlap; their additive fluxes may be unphysical.
    pub const WARN_SPOT_1: Self = Self(1 << 11);
    /// Two spots on star 2 overlap.
    pub const WARN_SPOT_2: Self = Self(1 << 12);
    /// A numeric primitive failed for this observation.
    pub const FAIL: Self = Self(1 << 14);
    /// Advisory condition; the result is still usable.
    pub const WARNING: Self = Self(1 << 15);
    /// Invalid input; outputs carry the sentinel value.
    pub const ERROR: Self = Self(1 << 16);

    /// Creates an empty flag word.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Raw bits, as stored in the output column.
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Builds a flag word from raw bits.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Tests whether all bits of `other` are set.
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the bits of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// True when an eclipse is in progress.
    pub fn is_eclipse(&self) -> bool {
        self.contains(Self::ECLIPSE)
    }

    /// True when the observation could not be computed.
    pub fn is_bad(&self) -> bool {
        self.contains(Self::FAIL) || self.contains(Self::ERROR)
    }
}

impl BitOr for ObsFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ObsFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
