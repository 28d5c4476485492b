//! Timeline type tags and packed property identifiers.

use serde::{Deserialize, Serialize};

/// Stable per-variant tag. The discriminants are part of [`PropertyId`] and
/// must not be reordered.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum TimelineType {
    Rotate = 0,
    Translate = 1,
    Scale = 2,
    Shear = 3,
    Attachment = 4,
    Color = 5,
    Deform = 6,
    Event = 7,
    DrawOrder = 8,
    IkConstraint = 9,
}

/// Packed `(type, target)` key: the type tag lives in the high byte, the
/// target index in the low 24 bits.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub u32);

impl PropertyId {
    pub const TARGET_BITS: u32 = 24;
    pub const MAX_TARGET: usize = (1 << Self::TARGET_BITS) - 1;

    /// Panics when `target` does not fit in the low 24 bits.
    #[inline]
    pub fn new(kind: TimelineType, target: usize) -> Self {
        assert!(
            target <= Self::MAX_TARGET,
            "target index {target} does not fit a property id"
        );
        PropertyId(((kind as u32) << Self::TARGET_BITS) + target as u32)
    }

    #[inline]
    pub fn target(self) -> usize {
        (self.0 & Self::MAX_TARGET as u32) as usize
    }

    #[inline]
    pub fn type_tag(self) -> u8 {
        (self.0 >> Self::TARGET_BITS) as u8
    }
}
