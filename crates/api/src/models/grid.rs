use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cell of the 3-dimensional integer block grid.
///
/// Serialized as a compact `[x, y, z]` triple.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    pub const ORIGIN: GridPos = GridPos { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The position one unit step away in `direction`.
    pub fn offset(self, direction: Direction) -> GridPos {
        let (dx, dy, dz) = direction.delta();
        GridPos {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            z: self.z.wrapping_add(dz),
        }
    }

    pub fn distance_sq(&self, other: &GridPos) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        let dz = i64::from(self.z) - i64::from(other.z);
        dx * dx + dy * dy + dz * dz
    }
}

impl From<[i32; 3]> for GridPos {
    fn from([x, y, z]: [i32; 3]) -> Self {
        GridPos { x, y, z }
    }
}

impl From<GridPos> for [i32; 3] {
    fn from(pos: GridPos) -> Self {
        [pos.x, pos.y, pos.z]
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for GridPos {
    type Err = ApiError;

    /// Parses `x,y,z` (whitespace around components is ignored).
    fn from_str(s: &str) -> ApiResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ApiError::InvalidArgument(format!(
                "expected `x,y,z`, got `{}`",
                s
            )));
        }

        let mut coords = [0i32; 3];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                ApiError::InvalidArgument(format!("`{}` is not a valid coordinate", part))
            })?;
        }
        Ok(GridPos::from(coords))
    }
}

/// One of the six axis-aligned unit steps.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit offset as `(dx, dy, dz)`. North is -z, west is -x.
    pub const fn delta(self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_distinct_unit_steps() {
        let pos = GridPos::new(3, -7, 12);
        let neighbours: Vec<GridPos> = Direction::ALL.iter().map(|dir| pos.offset(*dir)).collect();
        for (i, neighbour) in neighbours.iter().enumerate() {
            assert_eq!(neighbour.distance_sq(&pos), 1);
            assert!(!neighbours[i + 1..].contains(neighbour));
        }
        assert_eq!(pos.offset(Direction::North), GridPos::new(3, -7, 11));
        assert_eq!(pos.offset(Direction::West), GridPos::new(2, -7, 12));
    }

    #[test]
    fn test_parse_position() {
        assert_eq!("1, -2,3".parse::<GridPos>().unwrap(), GridPos::new(1, -2, 3));
        assert!("1,2".parse::<GridPos>().is_err());
        assert!("1,2,z".parse::<GridPos>().is_err());
    }

    #[test]
    fn test_serializes_as_triple() {
        let json = serde_json::to_string(&GridPos::new(4, 5, -6)).unwrap();
        assert_eq!(json, "[4,5,-6]");
        let back: GridPos = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GridPos::new(4, 5, -6));
    }
}
