use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Which sides of a match were widened when its token window was cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum WindowShape {
    /// Marker on both sides: wide look-back and wide look-ahead.
    Wide = 0,
    /// Marker behind the match only.
    WideBack = 1,
    /// Marker ahead of the match only.
    WideAhead = 2,
    /// No marker nearby.
    Narrow = 3,
}

impl WindowShape {
    pub const fn has_marker(self) -> bool {
        !matches!(self, WindowShape::Narrow)
    }

    pub const fn from_sides(back: bool, ahead: bool) -> Self {
        match (back, ahead) {
            (true, true) => WindowShape::Wide,
            (true, false) => WindowShape::WideBack,
            (false, true) => WindowShape::WideAhead,
            (false, false) => WindowShape::Narrow,
        }
    }
}
