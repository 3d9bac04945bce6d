//! Cube faces and their orderings
//!
//! Two static orderings exist:
//! - render order, the fixed identifiers 0-5 (back, left, front, right, top, bottom)
//! - packed order, the canonical import layout (right, left, up, down, forward, backward)
//!
//! Both are explicit tables; neither is derived from enum declaration order.

use serde::{Deserialize, Serialize};

/// Number of faces in a cubemap.
pub const CUBEMAP_FACE_COUNT: usize = 6;

/// One face of the cube, viewed from its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Back,
    Left,
    Front,
    Right,
    Top,
    Bottom,
}

/// Render order, indexed by [`Face::index`].
pub const RENDER_ORDER: [Face; CUBEMAP_FACE_COUNT] = [
    Face::Back,
    Face::Left,
    Face::Front,
    Face::Right,
    Face::Top,
    Face::Bottom,
];

/// Face stored in each slot of a packed cubemap.
pub const PACKED_ORDER: [Face; CUBEMAP_FACE_COUNT] = [
    Face::Right,
    Face::Left,
    Face::Top,
    Face::Bottom,
    Face::Front,
    Face::Back,
];

impl Face {
    /// Fixed render identifier (0-5)
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Back => 0,
            Self::Left => 1,
            Self::Front => 2,
            Self::Right => 3,
            Self::Top => 4,
            Self::Bottom => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        RENDER_ORDER.get(index).copied()
    }

    /// Name used for per-face output files
    pub const fn name(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Left => "left",
            Self::Front => "front",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Name in the packed layout's vocabulary
    pub const fn packed_name(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Top => "up",
            Self::Bottom => "down",
            Self::Front => "forward",
            Self::Back => "backward",
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
