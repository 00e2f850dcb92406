//! Integer grid coordinates.
//!
//! `x` is the column and `y` is the row.  Coordinates are signed so that
//! neighbor offsets can be computed before bounds checking; the grid rejects
//! anything outside `0..width` × `0..height`.

use std::fmt;

/// A cell address on the warehouse grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

/// Orthogonal unit offsets, in the order neighbors are expanded.
pub const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Sum of absolute coordinate differences.
    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// King-move distance; `1` means the cells touch, diagonals included.
    #[inline]
    pub fn chebyshev(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> GridPos {
        GridPos::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbors, unchecked against any bounds.
    pub fn orthogonal_neighbors(self) -> impl Iterator<Item = GridPos> {
        ORTHOGONAL.into_iter().map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// `true` if `other` shares an edge with `self`.
    #[inline]
    pub fn is_orthogonal_to(self, other: GridPos) -> bool {
        self.manhattan(other) == 1
    }

    #[inline]
    pub fn as_array(self) -> [i32; 2] {
        [self.x, self.y]
    }
}

impl From<(i32, i32)> for GridPos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
