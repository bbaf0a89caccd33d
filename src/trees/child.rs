//! Sign-encoded child references.
//!
//! Child arrays store two kinds of reference in one `i32`:
//! - `v >= 0`: index of another internal node
//! - `v < 0`: leaf output index `!v` (ones' complement, i.e. `-v - 1`)

use std::fmt;

/// Decoded child reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildRef {
    /// Index into the internal-node arrays.
    Internal(usize),
    /// Index into the leaf output array.
    Leaf(usize),
}

impl ChildRef {
    /// Decode a raw child value.
    #[inline]
    pub fn decode(value: i32) -> Self {
        if value >= 0 {
            ChildRef::Internal(value as usize)
        } else {
            ChildRef::Leaf(!value as usize)
        }
    }

    /// Encode back into the raw sign convention.
    ///
    /// Indices beyond `i32::MAX` cannot be produced by [`decode`](Self::decode).
    #[inline]
    pub fn encode(self) -> i32 {
        match self {
            ChildRef::Internal(idx) => idx as i32,
            ChildRef::Leaf(idx) => !(idx as i32),
        }
    }
}

/// Which side of its parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Left,
    Right,
}

impl Branch {
    /// Numeric tag used in the slot layout: `1` = left, `0` = right.
    #[inline]
    pub fn tag(self) -> u8 {
        match self {
            Branch::Left => 1,
            Branch::Right => 0,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Branch::Left),
            0 => Some(Branch::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
