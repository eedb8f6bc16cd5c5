use nom::error::Error as NomError;
use thiserror::Error;

use crate::{direction::Direction, point::Point2};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Folding reached a fixed point with at least one edge left unglued
    #[error("net does not fold into a cube: face at {anchor} has no neighbour towards {missing:?}")]
    MalformedNet { anchor: Point2, missing: Direction },
    /// A step or a crossing landed somewhere outside the net
    #[error("cursor left the cube at {0}")]
    OffCube(Point2),
    #[error("face size cannot be inferred from {tiles} tiles")]
    FaceSize { tiles: usize },
    #[error("face size must be positive, got {0}")]
    ZeroFaceSize(i32),
    #[error("no open tile on the top row of the map")]
    NoSpawn,
    #[error("malformed notes: {0}")]
    Parse(#[from] nom::Err<NomError<String>>),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
