//! Walks over the net of a cube as if it were folded.
//!
//! The net is split into square faces; which edges glue together (and how the cursor turns when it crosses them)
//! is inferred from the layout alone, starting from the edges that already touch in the flat net.

pub mod board;
pub mod cube;
pub mod direction;
pub mod error;
pub mod parse;
pub mod point;
pub mod walk;

pub use board::{Board, Tile};
pub use cube::{FaceGraph, Link};
pub use direction::{Direction, Rotate};
pub use error::{Error, Result};
pub use point::Point2;
pub use walk::{walk, Command, FlatWrap, Pos, Walk, Wrap};
