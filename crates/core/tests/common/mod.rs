#![allow(dead_code)]

use kinemeter_api::{GridPos, Node, SpatialLookup};
use kinemeter_core::BlockGrid;
use std::cell::Cell;

pub const MOTOR: &str = "create:creative_motor";
pub const FAN: &str = "create:encased_fan";
pub const PRESS: &str = "create:mechanical_press";
pub const SHAFT: &str = "create:shaft";

/// Wraps a grid and counts `node_at` calls.
pub struct CountingLookup {
    pub grid: BlockGrid,
    calls: Cell<u32>,
}

impl CountingLookup {
    pub fn new(grid: BlockGrid) -> Self {
        Self {
            grid,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }

    pub fn reset(&self) {
        self.calls.set(0);
    }
}

impl SpatialLookup for CountingLookup {
    fn node_at(&self, pos: GridPos) -> Option<Node> {
        self.calls.set(self.calls.get() + 1);
        self.grid.node_at(pos)
    }
}

/// A generator at the origin with two consumers and a shaft attached, plus a stone block that
/// must not be counted.
pub fn generator_scenario() -> BlockGrid {
    let mut grid = BlockGrid::new();
    grid.insert_kinetic(GridPos::new(0, 0, 0), MOTOR);
    grid.insert_kinetic(GridPos::new(1, 0, 0), FAN);
    grid.insert_kinetic(GridPos::new(-1, 0, 0), PRESS);
    grid.insert_kinetic(GridPos::new(0, 1, 0), SHAFT);
    grid.insert_solid(GridPos::new(0, -1, 0), "minecraft:stone");
    grid
}

/// A solid `size`^3 cube of shafts anchored at the origin.
pub fn shaft_cube(size: i32) -> BlockGrid {
    let mut grid = BlockGrid::new();
    grid.filled_box(
        GridPos::new(0, 0, 0),
        GridPos::new(size - 1, size - 1, size - 1),
        SHAFT,
    );
    grid
}
