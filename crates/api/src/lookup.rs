use crate::models::{Direction, GridPos, Node};

/// Read-only view of the block grid.
///
/// Implementations decide which blocks count as network nodes: `node_at` must return `Some` only
/// for blocks the estimator can classify. No type inspection happens past this boundary.
pub trait SpatialLookup {
    /// The node present at `pos`, if any.
    fn node_at(&self, pos: GridPos) -> Option<Node>;

    /// The position adjacent to `pos` in `direction`.
    fn neighbor(&self, pos: GridPos, direction: Direction) -> GridPos {
        pos.offset(direction)
    }
}

// Blanket implementation for references
impl<T: SpatialLookup + ?Sized> SpatialLookup for &T {
    fn node_at(&self, pos: GridPos) -> Option<Node> {
        (**self).node_at(pos)
    }

    fn neighbor(&self, pos: GridPos, direction: Direction) -> GridPos {
        (**self).neighbor(pos, direction)
    }
}
