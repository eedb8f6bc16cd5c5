use std::{collections::HashMap, fmt::Display};

use itertools::Itertools;

use crate::{
    error::{Error, Result},
    point::Point2,
    walk::Pos,
    Direction,
};

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Tile {
    Open,
    Wall,
}

impl Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tile::Open => '.',
            Tile::Wall => '#',
        }
        .fmt(f)
    }
}

/// The unfolded net: every occupied tile, keyed by its position. Anything not in the map is outside the net.
#[derive(Clone, Debug)]
pub struct Board {
    tiles: HashMap<Point2, Tile>,
    dim: (i32, i32),
}

impl Board {
    pub fn from_tiles(tiles: HashMap<Point2, Tile>) -> Self {
        let dim = tiles
            .keys()
            .fold((0, 0), |(w, h), &Point2(x, y)| (w.max(x + 1), h.max(y + 1)));

        Self { tiles, dim }
    }

    /// Width and height of the bounding box of the net, starting from the origin.
    pub const fn dims(&self) -> (i32, i32) {
        self.dim
    }

    pub fn get(&self, p: Point2) -> Option<Tile> {
        self.tiles.get(&p).copied()
    }

    pub fn contains(&self, p: Point2) -> bool {
        self.tiles.contains_key(&p)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.tiles.keys().copied()
    }

    /// The leftmost open tile on the topmost row, facing right.
    pub fn spawn(&self) -> Result<Pos> {
        self.tiles
            .iter()
            .filter(|&(_, &t)| t == Tile::Open)
            .map(|(&p, _)| p)
            .min_by_key(|&Point2(x, y)| (y, x))
            .filter(|&Point2(_, y)| y == self.top())
            .map(|pos| Pos {
                pos,
                dir: Direction::Right,
            })
            .ok_or(Error::NoSpawn)
    }

    fn top(&self) -> i32 {
        self.tiles
            .keys()
            .map(|&Point2(_, y)| y)
            .min()
            .unwrap_or_default()
    }

    /// Side of a face, assuming the net is made of six square faces.
    pub fn infer_face_size(&self) -> Result<i32> {
        let tiles = self.len();

        if tiles == 0 || tiles % 6 != 0 {
            return Err(Error::FaceSize { tiles });
        }

        let area = tiles / 6;
        let side = (1..=area)
            .find(|s| s * s >= area)
            .filter(|s| s * s == area)
            .ok_or(Error::FaceSize { tiles })?;

        i32::try_from(side).map_err(|_| Error::FaceSize { tiles })
    }

    /// First and last occupied column of row `y`.
    pub fn row_span(&self, y: i32) -> Option<(i32, i32)> {
        self.tiles
            .keys()
            .filter(|p| p.1 == y)
            .map(|p| p.0)
            .minmax()
            .into_option()
    }

    /// First and last occupied row of column `x`.
    pub fn column_span(&self, x: i32) -> Option<(i32, i32)> {
        self.tiles
            .keys()
            .filter(|p| p.0 == x)
            .map(|p| p.1)
            .minmax()
            .into_option()
    }
}
