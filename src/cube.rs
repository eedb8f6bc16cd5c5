use std::{collections::HashMap, fmt::Display, iter::zip};

use itertools::Itertools;
use log::{debug, trace, warn};
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    board::Board,
    direction::{Direction, Rotate},
    error::{Error, Result},
    point::Point2,
    walk::{Pos, Wrap},
};

/// A glued edge: the face on the other side and the heading the cursor has once it steps onto it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Link {
    pub face: usize,
    pub heading: Direction,
}

#[derive(Clone, Debug)]
struct Face {
    anchor: Point2,
    neighs: [Option<Link>; Direction::COUNT],
}

/// Faces of a net whose adjacencies are still being inferred.
#[derive(Debug)]
struct Faces {
    side: i32,
    faces: Vec<Face>,
    by_anchor: HashMap<Point2, usize>,
}

/// Partitions the net into `side`-sized blocks. Every block holding at least one tile is a face; faces are numbered
/// in reading order.
fn extract_faces(board: &Board, side: i32) -> Faces {
    let faces: Vec<_> = board
        .points()
        .map(|p| p.block(side))
        .unique()
        .sorted_by_key(|&Point2(x, y)| (y, x))
        .map(|anchor| Face {
            anchor,
            neighs: [None; Direction::COUNT],
        })
        .collect();

    let by_anchor = faces
        .iter()
        .enumerate()
        .map(|(i, f)| (f.anchor, i))
        .collect();

    Faces {
        side,
        faces,
        by_anchor,
    }
}

impl Faces {
    // records both halves of an edge: leaving `from` towards `dir` enters `to` heading `heading`, and leaving `to`
    // against `heading` enters `from` heading against `dir`
    fn link(&mut self, from: usize, dir: Direction, to: usize, heading: Direction) {
        self.faces[from].neighs[dir as usize] = Some(Link { face: to, heading });
        self.faces[to].neighs[heading.opposite() as usize] = Some(Link {
            face: from,
            heading: dir.opposite(),
        });
    }

    /// Glues the edges that touch in the flat net; these keep their orientation.
    fn seed(&mut self) {
        for from in 0..self.faces.len() {
            let anchor = self.faces[from].anchor;

            for dir in [Direction::Right, Direction::Down] {
                if let Some(&to) = self.by_anchor.get(&anchor.over(dir, self.side)) {
                    self.link(from, dir, to, dir);
                }
            }
        }
    }

    /// One pass of corner closure. Walking from `F` to `N` and then turning towards a side of `N` reaches the face
    /// sharing the corner between `F` and `N`, which must also border `F` on the same side.
    /// Returns whether any edge was added.
    fn close_corners(&mut self) -> bool {
        let mut changed = false;

        for f in 0..self.faces.len() {
            for d in Direction::iter() {
                let Some(Link { face: n, heading: hn }) = self.faces[f].neighs[d as usize] else {
                    continue;
                };

                for rot in [Rotate::Right, Rotate::Left] {
                    let side = d.turn(rot);

                    if self.faces[f].neighs[side as usize].is_some() {
                        continue;
                    }

                    let Some(Link { face: m, heading: hm }) = self.faces[n].neighs[hn.turn(rot) as usize]
                    else {
                        continue;
                    };

                    // the shared corner ends up on the other hand once we're in M
                    let heading = match rot {
                        Rotate::Right => hm.turn(Rotate::Left),
                        Rotate::Left => hm.turn(Rotate::Right),
                    };

                    trace!(
                        "corner: face {f} -{side:?}-> face {m} (via {n}), entering {heading:?}"
                    );

                    self.link(f, side, m, heading);
                    changed = true;
                }
            }
        }

        changed
    }

    fn is_complete(&self) -> bool {
        self.faces
            .iter()
            .all(|f| f.neighs.iter().all(Option::is_some))
    }

    fn resolve(self) -> Result<FaceGraph> {
        let Self {
            side,
            faces,
            by_anchor,
        } = self;

        let mut nodes = Vec::with_capacity(faces.len());

        for Face { anchor, neighs } in faces {
            let mut resolved = [Link {
                face: 0,
                heading: Direction::Right,
            }; Direction::COUNT];

            for (slot, (link, missing)) in zip(&mut resolved, zip(neighs, Direction::iter())) {
                *slot = link.ok_or(Error::MalformedNet { anchor, missing })?;
            }

            nodes.push(FaceNode {
                anchor,
                neighs: resolved,
            });
        }

        Ok(FaceGraph {
            side,
            faces: nodes,
            by_anchor,
        })
    }
}

#[derive(Clone, Debug)]
struct FaceNode {
    anchor: Point2,
    neighs: [Link; Direction::COUNT],
}

/// The net folded into a cube: every face knows what lies beyond each of its four edges.
#[derive(Clone, Debug)]
pub struct FaceGraph {
    side: i32,
    faces: Vec<FaceNode>,
    by_anchor: HashMap<Point2, usize>,
}

impl FaceGraph {
    /// Infers how the faces of `board` glue together once folded.
    ///
    /// Only the edges touching in the flat net are known upfront; the others are found by walking around the
    /// corners of already glued edges until nothing changes. A net that does not fold into a cube (or a wrong
    /// `side`) fails with [`Error::MalformedNet`].
    pub fn fold(board: &Board, side: i32) -> Result<Self> {
        if side <= 0 {
            return Err(Error::ZeroFaceSize(side));
        }

        let mut faces = extract_faces(board, side);

        if faces.faces.len() != 6 {
            warn!("net has {} faces of side {side}", faces.faces.len());
        }

        faces.seed();

        let mut passes = 0;

        while !faces.is_complete() && faces.close_corners() {
            passes += 1;
        }

        debug!(
            "folded {} faces of side {side} after {passes} corner passes",
            faces.faces.len()
        );

        faces.resolve()
    }

    pub const fn side(&self) -> i32 {
        self.side
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn anchor(&self, face: usize) -> Point2 {
        self.faces[face].anchor
    }

    pub fn neighbour(&self, face: usize, dir: Direction) -> Link {
        self.faces[face].neighs[dir as usize]
    }

    /// The face holding `p`, if any.
    pub fn face_of(&self, p: Point2) -> Option<usize> {
        self.by_anchor.get(&p.block(self.side)).copied()
    }

    /// Steps off the edge of the face under `from`, onto the neighbour glued there.
    pub fn cross(&self, Pos { pos, dir }: Pos) -> Result<Pos> {
        let face = self.face_of(pos).ok_or(Error::OffCube(pos))?;
        let Link { face: next, heading } = self.neighbour(face, dir);

        let Point2(x, y) = pos - self.anchor(face) + dir;
        let entry = Point2(x.rem_euclid(self.side), y.rem_euclid(self.side));

        let local = rotate_local(entry, dir.quarter_turns_to(heading), self.side);

        Ok(Pos {
            pos: self.anchor(next) + local,
            dir: heading,
        })
    }

    /// Renders the net with each tile replaced by the index of its face.
    pub fn face_map<'a>(&'a self, board: &'a Board) -> FaceMap<'a> {
        FaceMap { graph: self, board }
    }
}

impl Wrap for FaceGraph {
    fn wrap(&self, _board: &Board, from: Pos) -> Result<Pos> {
        let to = self.cross(from)?;

        trace!("crossing {} {} -> {} {}", from.pos, from.dir, to.pos, to.dir);

        Ok(to)
    }
}

/// Rotates a face-local point clockwise by `quarter_turns` quarter turns about the centre of a `side`-sized face.
fn rotate_local(Point2(x, y): Point2, quarter_turns: u8, side: i32) -> Point2 {
    let last = side - 1;

    match quarter_turns % 4 {
        0 => Point2(x, y),
        1 => Point2(last - y, x),
        2 => Point2(last - x, last - y),
        _ => Point2(y, last - x),
    }
}

pub struct FaceMap<'a> {
    graph: &'a FaceGraph,
    board: &'a Board,
}

impl Display for FaceMap<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (dim_x, dim_y) = self.board.dims();

        for y in 0..dim_y {
            let row = (0..dim_x)
                .map(|x| Point2(x, y))
                .map(|p| match self.graph.face_of(p) {
                    Some(face) if self.board.contains(p) => face.to_string(),
                    _ => " ".to_string(),
                })
                .join("");

            writeln!(f, "{}", row.trim_end())?;
        }

        Ok(())
    }
}
