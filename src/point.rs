use std::{
    fmt::Display,
    num::TryFromIntError,
    ops::{Add, AddAssign, Mul, Sub},
};

use crate::direction::Direction;

/// A point on the net: `.0` is the column, `.1` the row (growing downwards).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Point2(pub i32, pub i32);

impl Point2 {
    /// The point `n` steps away in direction `dir`.
    pub fn over(self, dir: Direction, n: i32) -> Self {
        self + dir.versor() * n
    }

    /// Floor division of both coordinates by `side`, scaled back; the corner of the `side`-sized block holding
    /// this point.
    pub fn block(self, side: i32) -> Self {
        let Self(x, y) = self;

        Self(x.div_euclid(side) * side, y.div_euclid(side) * side)
    }
}

impl Add for Point2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl AddAssign for Point2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl Add<Direction> for Point2 {
    type Output = Self;

    fn add(self, rhs: Direction) -> Self::Output {
        self + rhs.versor()
    }
}

impl AddAssign<Direction> for Point2 {
    fn add_assign(&mut self, rhs: Direction) {
        *self += rhs.versor()
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Sub<Direction> for Point2 {
    type Output = Self;

    fn sub(self, rhs: Direction) -> Self::Output {
        self - rhs.versor()
    }
}

impl Mul<i32> for Point2 {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Self(self.0 * rhs, self.1 * rhs)
    }
}

impl Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self(x, y) = self;

        write!(f, "({x}, {y})")
    }
}

impl From<(i32, i32)> for Point2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self(x, y)
    }
}

impl TryFrom<(usize, usize)> for Point2 {
    type Error = TryFromIntError;

    fn try_from((x, y): (usize, usize)) -> Result<Self, Self::Error> {
        Ok(Self(x.try_into()?, y.try_into()?))
    }
}
