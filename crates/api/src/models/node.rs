use super::grid::GridPos;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A kinetic block resolved at a grid position.
///
/// Nodes are never owned by the estimator; a [`crate::SpatialLookup`] hands them out on demand and
/// only for blocks the estimator understands.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Node {
    pub pos: GridPos,
    /// Registry id of the block, e.g. `create:encased_fan`.
    #[serde(with = "super::util::serde_arc_str")]
    pub block_id: Arc<str>,
    /// Rotational speed in RPM as reported by the host. Negative is counter-clockwise.
    #[serde(default)]
    pub speed: f32,
}

impl Node {
    pub fn new(pos: GridPos, block_id: impl Into<Arc<str>>) -> Self {
        Self {
            pos,
            block_id: block_id.into(),
            speed: 0.0,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_defaults_to_stationary() {
        let node: Node =
            serde_json::from_str(r#"{"pos": [1, 2, 3], "block_id": "create:shaft"}"#).unwrap();
        assert_eq!(node.speed, 0.0);
        assert_eq!(Node::new(GridPos::ORIGIN, "create:shaft").with_speed(-32.0).speed, -32.0);
    }
}
