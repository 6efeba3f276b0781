//! Origin selection: an explicit lock, a live pointer target, or lock-then-pointer.

use kinemeter_api::{GridPos, Node, OriginSelector, SpatialLookup};

/// Reach used by the pointer selector when none is configured, in blocks.
pub const DEFAULT_MAX_REACH: f64 = 20.0;

/// An explicitly locked position. Re-resolved on every call, so a block broken after locking
/// resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedOrigin {
    pub pos: GridPos,
}

impl PinnedOrigin {
    pub fn new(pos: GridPos) -> Self {
        Self { pos }
    }
}

impl OriginSelector for PinnedOrigin {
    fn resolve(&self, lookup: &dyn SpatialLookup) -> Option<Node> {
        lookup.node_at(self.pos)
    }
}

/// The block under the viewer's pointer, as last reported by the host's raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerOrigin {
    pub viewer: GridPos,
    pub target: Option<GridPos>,
    pub max_reach: f64,
}

impl PointerOrigin {
    pub fn new(viewer: GridPos, target: Option<GridPos>) -> Self {
        Self {
            viewer,
            target,
            max_reach: DEFAULT_MAX_REACH,
        }
    }

    pub fn with_reach(mut self, max_reach: f64) -> Self {
        self.max_reach = max_reach;
        self
    }

    fn in_reach(&self, target: &GridPos) -> bool {
        let reach = self.max_reach.max(0.0);
        (self.viewer.distance_sq(target) as f64) <= reach * reach
    }
}

impl Default for PointerOrigin {
    fn default() -> Self {
        Self::new(GridPos::ORIGIN, None)
    }
}

impl OriginSelector for PointerOrigin {
    fn resolve(&self, lookup: &dyn SpatialLookup) -> Option<Node> {
        let target = self.target?;
        if !self.in_reach(&target) {
            return None;
        }
        lookup.node_at(target)
    }
}

/// Lock-first origin selection with the pointer as fallback.
///
/// While a lock is held the pointer is ignored entirely, even when the locked block no longer
/// resolves.
#[derive(Debug, Clone, Default)]
pub struct OriginTracker {
    locked: Option<PinnedOrigin>,
    pointer: PointerOrigin,
}

impl OriginTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reach(max_reach: f64) -> Self {
        Self {
            locked: None,
            pointer: PointerOrigin::default().with_reach(max_reach),
        }
    }

    /// Locks onto `pos`. Returns `true` when the lock target changed.
    pub fn lock(&mut self, pos: GridPos) -> bool {
        let next = Some(PinnedOrigin::new(pos));
        let changed = self.locked != next;
        self.locked = next;
        changed
    }

    /// Locks onto whatever the pointer currently resolves to.
    pub fn lock_pointer(&mut self, lookup: &dyn SpatialLookup) -> Option<GridPos> {
        let node = self.pointer.resolve(lookup)?;
        self.lock(node.pos);
        Some(node.pos)
    }

    /// Releases the lock. Returns `true` if a lock was held.
    pub fn unlock(&mut self) -> bool {
        self.locked.take().is_some()
    }

    pub fn locked(&self) -> Option<GridPos> {
        self.locked.map(|pinned| pinned.pos)
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    pub fn set_pointer(&mut self, viewer: GridPos, target: Option<GridPos>) {
        self.pointer.viewer = viewer;
        self.pointer.target = target;
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.target = None;
    }

    pub fn pointer(&self) -> &PointerOrigin {
        &self.pointer
    }
}

impl OriginSelector for OriginTracker {
    fn resolve(&self, lookup: &dyn SpatialLookup) -> Option<Node> {
        match &self.locked {
            Some(pinned) => pinned.resolve(lookup),
            None => self.pointer.resolve(lookup),
        }
    }
}
