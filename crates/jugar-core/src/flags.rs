//! Surface creation flags passed to `set_mode`.

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Bit flags controlling how the display mode is set up.
///
/// # Example
///
/// ```
/// use jugar_core::SurfaceFlags;
///
/// let flags = SurfaceFlags::DISABLE_SMOOTHING;
/// assert!(flags.contains(SurfaceFlags::DISABLE_SMOOTHING));
/// assert!(!SurfaceFlags::NONE.contains(SurfaceFlags::DISABLE_SMOOTHING));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceFlags(u32);

impl SurfaceFlags {
    /// No flags set; pixel smoothing stays enabled.
    pub const NONE: Self = Self(0);

    /// Disable pixel smoothing on the surface's drawing context.
    pub const DISABLE_SMOOTHING: Self = Self(1);

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build flags from a raw bit representation. Unknown bits are kept.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Check whether all bits of `other` are set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether no flags are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for SurfaceFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SurfaceFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
