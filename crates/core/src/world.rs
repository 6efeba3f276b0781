//! In-memory block grid and its JSON world-file format.
//!
//! `BlockGrid` is the reference [`SpatialLookup`]: it stores every block, kinetic or not, and only
//! surfaces kinetic ones as network nodes.

use crate::error::{KinemeterError, Result};
use kinemeter_api::{GridPos, Node, SpatialLookup};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: Arc<str>,
    /// Whether the block takes part in a kinetic network.
    pub kinetic: bool,
    /// RPM handed to nodes resolved from this block.
    pub speed: f32,
}

impl Block {
    pub fn kinetic(id: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            kinetic: true,
            speed: 0.0,
        }
    }

    pub fn solid(id: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            kinetic: false,
            speed: 0.0,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

/// On-disk representation of a single block.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct BlockEntry {
    pos: GridPos,
    id: String,
    #[serde(default = "default_kinetic")]
    kinetic: bool,
    #[serde(default, skip_serializing_if = "is_stationary")]
    speed: f32,
}

fn default_kinetic() -> bool {
    true
}

fn is_stationary(speed: &f32) -> bool {
    *speed == 0.0
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct WorldFile {
    #[serde(default)]
    blocks: Vec<BlockEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct BlockGrid {
    blocks: HashMap<GridPos, Block>,
}

impl BlockGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `block` at `pos`, returning whatever was there before.
    pub fn insert(&mut self, pos: GridPos, block: Block) -> Option<Block> {
        self.blocks.insert(pos, block)
    }

    pub fn insert_kinetic(&mut self, pos: GridPos, id: &str) -> Option<Block> {
        self.insert(pos, Block::kinetic(id))
    }

    pub fn insert_solid(&mut self, pos: GridPos, id: &str) -> Option<Block> {
        self.insert(pos, Block::solid(id))
    }

    pub fn remove(&mut self, pos: GridPos) -> Option<Block> {
        self.blocks.remove(&pos)
    }

    pub fn get(&self, pos: GridPos) -> Option<&Block> {
        self.blocks.get(&pos)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn kinetic_count(&self) -> usize {
        self.blocks.values().filter(|b| b.kinetic).count()
    }

    /// Fills the inclusive box spanned by `min` and `max` with kinetic `id` blocks.
    /// Returns the number of cells written.
    pub fn filled_box(&mut self, min: GridPos, max: GridPos, id: &str) -> usize {
        let id: Arc<str> = Arc::from(id);
        let mut written = 0;
        for x in min.x.min(max.x)..=min.x.max(max.x) {
            for y in min.y.min(max.y)..=min.y.max(max.y) {
                for z in min.z.min(max.z)..=min.z.max(max.z) {
                    self.blocks.insert(
                        GridPos::new(x, y, z),
                        Block {
                            id: id.clone(),
                            kinetic: true,
                            speed: 0.0,
                        },
                    );
                    written += 1;
                }
            }
        }
        written
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let grid = Self::from_json_str(&content)?;
        info!(
            "Loaded world {} ({} blocks, {} kinetic)",
            path.display(),
            grid.len(),
            grid.kinetic_count()
        );
        Ok(grid)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: WorldFile = serde_json::from_str(content)?;
        let mut grid = Self::new();
        for entry in file.blocks {
            let block = Block {
                id: Arc::from(entry.id.as_str()),
                kinetic: entry.kinetic,
                speed: entry.speed,
            };
            if grid.insert(entry.pos, block).is_some() {
                return Err(KinemeterError::World(format!(
                    "duplicate block at {}",
                    entry.pos
                )));
            }
        }
        Ok(grid)
    }

    /// Serializes the grid in position order so output is stable.
    pub fn to_json_string(&self) -> Result<String> {
        let mut blocks: Vec<BlockEntry> = self
            .blocks
            .iter()
            .map(|(pos, block)| BlockEntry {
                pos: *pos,
                id: block.id.to_string(),
                kinetic: block.kinetic,
                speed: block.speed,
            })
            .collect();
        blocks.sort_by_key(|entry| entry.pos);
        Ok(serde_json::to_string_pretty(&WorldFile { blocks })?)
    }
}

impl SpatialLookup for BlockGrid {
    fn node_at(&self, pos: GridPos) -> Option<Node> {
        self.blocks
            .get(&pos)
            .filter(|block| block.kinetic)
            .map(|block| Node {
                pos,
                block_id: block.id.clone(),
                speed: block.speed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_kinetic_blocks_resolve() {
        let mut grid = BlockGrid::new();
        grid.insert_kinetic(GridPos::new(0, 0, 0), "create:shaft");
        grid.insert_solid(GridPos::new(1, 0, 0), "minecraft:stone");

        assert_eq!(
            grid.node_at(GridPos::new(0, 0, 0)).map(|n| n.block_id.to_string()),
            Some("create:shaft".to_string())
        );
        assert!(grid.node_at(GridPos::new(1, 0, 0)).is_none());
        assert!(grid.node_at(GridPos::new(2, 0, 0)).is_none());
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.kinetic_count(), 1);
    }

    #[test]
    fn test_filled_box_accepts_swapped_corners() {
        let mut grid = BlockGrid::new();
        let written = grid.filled_box(GridPos::new(1, 1, 1), GridPos::new(0, 0, 0), "create:shaft");
        assert_eq!(written, 8);
        assert_eq!(grid.kinetic_count(), 8);
    }

    #[test]
    fn test_world_json() {
        let json = r#"{
            "blocks": [
                {"pos": [0, 64, 0], "id": "create:creative_motor", "speed": -64.0},
                {"pos": [0, 65, 0], "id": "create:shaft"},
                {"pos": [1, 64, 0], "id": "minecraft:stone", "kinetic": false}
            ]
        }"#;
        let grid = BlockGrid::from_json_str(json).unwrap();
        let motor = grid.node_at(GridPos::new(0, 64, 0)).unwrap();
        assert_eq!(motor.speed, -64.0);
        assert_eq!(grid.node_at(GridPos::new(0, 65, 0)).unwrap().speed, 0.0);
        assert!(grid.node_at(GridPos::new(1, 64, 0)).is_none());

        let reparsed = BlockGrid::from_json_str(&grid.to_json_string().unwrap()).unwrap();
        assert_eq!(reparsed.len(), 3);
        assert_eq!(reparsed.get(GridPos::new(0, 64, 0)).unwrap().speed, -64.0);
        assert_eq!(reparsed.get(GridPos::new(1, 64, 0)), grid.get(GridPos::new(1, 64, 0)));
    }

    #[test]
    fn test_duplicate_positions_are_rejected() {
        let json = r#"{"blocks": [
            {"pos": [0, 0, 0], "id": "create:shaft"},
            {"pos": [0, 0, 0], "id": "create:cogwheel"}
        ]}"#;
        let err = BlockGrid::from_json_str(json).unwrap_err();
        assert!(matches!(err, KinemeterError::World(_)));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = BlockGrid::from_json_str("{\"blocks\": [").unwrap_err();
        assert!(matches!(err, KinemeterError::Json(_)));
    }
}
