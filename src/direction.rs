use std::fmt::Display;

use num::FromPrimitive;
use num_derive::FromPrimitive;
use strum::{EnumCount, EnumIter};

use crate::point::Point2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i8)]
pub enum Rotate {
    Left = -1,
    Right = 1,
}

/// Heading of the cursor on the net.
///
/// Variants are listed in clockwise order, as seen on a map whose rows grow downwards; the discriminant is also
/// the heading code used when scoring a final position.
#[repr(u8)]
#[derive(Clone, Copy, Debug, EnumCount, EnumIter, Eq, FromPrimitive, Hash, PartialEq)]
pub enum Direction {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
}

impl Direction {
    pub const fn turn_clockwise(self) -> Self {
        use Direction::*;

        match self {
            Right => Down,
            Down => Left,
            Left => Up,
            Up => Right,
        }
    }

    pub const fn turn_counterclockwise(self) -> Self {
        use Direction::*;

        match self {
            Right => Up,
            Up => Left,
            Left => Down,
            Down => Right,
        }
    }

    pub const fn opposite(self) -> Self {
        use Direction::*;

        match self {
            Right => Left,
            Down => Up,
            Left => Right,
            Up => Down,
        }
    }

    pub const fn turn(self, rot: Rotate) -> Self {
        match rot {
            Rotate::Left => self.turn_counterclockwise(),
            Rotate::Right => self.turn_clockwise(),
        }
    }

    /// Number of clockwise quarter turns (0..4) needed to go from `self` to `other`.
    pub const fn quarter_turns_to(self, other: Self) -> u8 {
        (other as u8 + Self::COUNT as u8 - self as u8) % Self::COUNT as u8
    }

    /// `self` turned clockwise `n` times.
    pub fn rotated(self, n: u8) -> Self {
        Self::from_u8((self as u8 + n) % Self::COUNT as u8).expect("index is reduced modulo COUNT")
    }

    pub const fn versor(self) -> Point2 {
        use Direction::*;

        match self {
            Right => Point2(1, 0),
            Down => Point2(0, 1),
            Left => Point2(-1, 0),
            Up => Point2(0, -1),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Direction::*;

        match self {
            Right => '>',
            Down => 'v',
            Left => '<',
            Up => '^',
        }
        .fmt(f)
    }
}
