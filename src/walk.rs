use std::{collections::HashMap, fmt::Display};

use log::debug;

use crate::{
    board::{Board, Tile},
    direction::{Direction, Rotate},
    error::{Error, Result},
    point::Point2,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Forward(usize),
    Turn(Rotate),
}

/// The cursor: where it stands and where it's looking at.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Pos {
    pub pos: Point2,
    pub dir: Direction,
}

impl Pos {
    /// `1000 * row + 4 * column + heading`, with 1-based rows and columns.
    pub const fn password(self) -> i64 {
        let Self {
            pos: Point2(x, y),
            dir,
        } = self;

        let (x, y, dir) = (x as i64 + 1, y as i64 + 1, dir as i64);

        1000 * y + 4 * x + dir
    }

    pub const fn rotate(self, rot: Rotate) -> Self {
        Self {
            pos: self.pos,
            dir: self.dir.turn(rot),
        }
    }
}

/// What lies beyond the edge of the net.
pub trait Wrap {
    /// Where a step from `from` lands when the tile straight ahead is not on `board`.
    fn wrap(&self, board: &Board, from: Pos) -> Result<Pos>;
}

/// Leaving the net re-enters it from the opposite end of the same row or column.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatWrap;

impl Wrap for FlatWrap {
    fn wrap(&self, board: &Board, from @ Pos { pos, dir }: Pos) -> Result<Pos> {
        use Direction::*;

        let Point2(x, y) = pos;

        let pos = match dir {
            Right => board.row_span(y).map(|(start, _)| Point2(start, y)),
            Left => board.row_span(y).map(|(_, end)| Point2(end, y)),
            Down => board.column_span(x).map(|(start, _)| Point2(x, start)),
            Up => board.column_span(x).map(|(_, end)| Point2(x, end)),
        }
        .ok_or(Error::OffCube(from.pos))?;

        Ok(Pos { pos, dir })
    }
}

/// Outcome of a walk: the final cursor and the last heading held on every tile walked upon.
#[derive(Clone, Debug)]
pub struct Walk {
    pub end: Pos,
    pub trail: HashMap<Point2, Direction>,
}

impl Walk {
    pub fn trail_view<'a>(&'a self, board: &'a Board) -> TrailView<'a> {
        TrailView { walk: self, board }
    }
}

/// Executes `cmds` one at a time, starting from `start`.
///
/// A step that would leave the net asks `wrap` where to go instead; the cursor only takes the new position and
/// heading if the tile there is open. A wall ends the current move.
pub fn walk<W: Wrap + ?Sized>(
    board: &Board,
    wrap: &W,
    start: Pos,
    cmds: &[Command],
) -> Result<Walk> {
    if board.get(start.pos).is_none() {
        return Err(Error::OffCube(start.pos));
    }

    let mut cur = start;
    let mut trail = HashMap::from_iter([(cur.pos, cur.dir)]);

    for cmd in cmds {
        cur = match *cmd {
            Command::Forward(count) => forward(board, wrap, cur, count, &mut trail)?,
            Command::Turn(rot) => cur.rotate(rot),
        };

        trail.insert(cur.pos, cur.dir);
    }

    debug!(
        "walked {} commands, ended at {} facing {:?}",
        cmds.len(),
        cur.pos,
        cur.dir
    );

    Ok(Walk { end: cur, trail })
}

fn forward<W: Wrap + ?Sized>(
    board: &Board,
    wrap: &W,
    mut cur: Pos,
    count: usize,
    trail: &mut HashMap<Point2, Direction>,
) -> Result<Pos> {
    for _ in 0..count {
        let ahead = cur.pos + cur.dir;

        let next = if board.contains(ahead) {
            Pos {
                pos: ahead,
                dir: cur.dir,
            }
        } else {
            wrap.wrap(board, cur)?
        };

        match board.get(next.pos) {
            Some(Tile::Wall) => break,
            Some(Tile::Open) => {
                trail.insert(cur.pos, cur.dir);

                cur = next;
            }
            None => return Err(Error::OffCube(next.pos)),
        }
    }

    Ok(cur)
}

pub struct TrailView<'a> {
    walk: &'a Walk,
    board: &'a Board,
}

impl Display for TrailView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (dim_x, dim_y) = self.board.dims();

        for y in 0..dim_y {
            let mut row = String::with_capacity(dim_x as usize);

            for x in 0..dim_x {
                let p = Point2(x, y);

                match (self.walk.trail.get(&p), self.board.get(p)) {
                    (Some(dir), _) => row.push_str(&dir.to_string()),
                    (None, Some(tile)) => row.push_str(&tile.to_string()),
                    (None, None) => row.push(' '),
                }
            }

            writeln!(f, "{}", row.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        board::tests::{example_board, EXAMPLE},
        cube::{tests::open_net, FaceGraph},
        parse,
    };

    fn at(x: i32, y: i32, dir: Direction) -> Pos {
        Pos {
            pos: Point2(x, y),
            dir,
        }
    }

    fn example() -> (Board, Vec<Command>) {
        parse::notes(EXAMPLE).unwrap()
    }

    /// Runs `cmds` one by one, collecting the cursor after each of them.
    fn positions<W: Wrap>(board: &Board, wrap: &W, cmds: &[Command]) -> Vec<Pos> {
        let mut cur = board.spawn().unwrap();

        cmds.iter()
            .map(|cmd| {
                cur = walk(board, wrap, cur, std::slice::from_ref(cmd)).unwrap().end;
                cur
            })
            .collect()
    }

    #[test]
    fn password() {
        assert_eq!(at(7, 5, Direction::Right).password(), 6032);
        assert_eq!(at(6, 4, Direction::Up).password(), 5031);
        assert_eq!(at(0, 0, Direction::Left).password(), 1006);
    }

    #[test]
    fn flat_example() {
        let (board, cmds) = example();

        let walk = walk(&board, &FlatWrap, board.spawn().unwrap(), &cmds).unwrap();

        assert_eq!(walk.end, at(7, 5, Direction::Right));
        assert_eq!(walk.end.password(), 6032);
    }

    #[test]
    fn flat_example_steps() {
        use Direction::*;

        let (board, cmds) = example();

        assert_eq!(
            positions(&board, &FlatWrap, &cmds),
            [
                at(10, 0, Right),
                at(10, 0, Down),
                at(10, 5, Down),
                at(10, 5, Right),
                at(3, 5, Right),
                at(3, 5, Down),
                at(3, 7, Down),
                at(3, 7, Right),
                at(7, 7, Right),
                at(7, 7, Down),
                at(7, 5, Down),
                at(7, 5, Right),
                at(7, 5, Right),
            ]
        );
    }

    #[test]
    fn cube_example() {
        let (board, cmds) = example();
        let graph = FaceGraph::fold(&board, 4).unwrap();

        let walk = walk(&board, &graph, board.spawn().unwrap(), &cmds).unwrap();

        assert_eq!(walk.end, at(6, 4, Direction::Up));
        assert_eq!(walk.end.password(), 5031);
    }

    #[test]
    fn cube_example_steps() {
        use Direction::*;

        let (board, cmds) = example();
        let graph = FaceGraph::fold(&board, 4).unwrap();

        assert_eq!(
            positions(&board, &graph, &cmds),
            [
                at(10, 0, Right),
                at(10, 0, Down),
                at(10, 5, Down),
                at(10, 5, Right),
                at(14, 10, Down),
                at(14, 10, Left),
                at(10, 10, Left),
                at(10, 10, Down),
                at(1, 5, Up),
                at(1, 5, Right),
                at(6, 5, Right),
                at(6, 5, Up),
                at(6, 4, Up),
            ]
        );
    }

    #[test]
    fn single_quarter_turn_crossing() {
        let board = example_board();
        let graph = FaceGraph::fold(&board, 4).unwrap();

        let cmds = parse::path("1").unwrap();
        let walk = walk(&board, &graph, at(11, 7, Direction::Right), &cmds).unwrap();

        assert_eq!(walk.end, at(12, 8, Direction::Down));
    }

    #[test]
    fn wall_behind_edge_keeps_heading() {
        let board = example_board();
        let graph = FaceGraph::fold(&board, 4).unwrap();

        // going up from the spawn point lands on the wall at (3, 4), upside down
        assert_eq!(
            graph.cross(at(8, 0, Direction::Up)).unwrap(),
            at(3, 4, Direction::Down)
        );

        let cmds = parse::path("L5").unwrap();
        let walk = walk(&board, &graph, board.spawn().unwrap(), &cmds).unwrap();

        assert_eq!(walk.end, at(8, 0, Direction::Up));

        // the same move on a flat board wraps to the bottom of the column
        let flat = super::walk(&board, &FlatWrap, board.spawn().unwrap(), &cmds).unwrap();

        assert_eq!(flat.end, at(8, 7, Direction::Up));
    }

    #[test]
    fn four_turns_stay_put() {
        let board = example_board();
        let graph = FaceGraph::fold(&board, 4).unwrap();
        let start = at(10, 5, Direction::Left);

        for path in ["RRRR", "LLLL"] {
            let cmds = parse::path(path).unwrap();

            assert_eq!(walk(&board, &graph, start, &cmds).unwrap().end, start);
        }
    }

    #[test]
    fn start_off_board() {
        let board = example_board();

        assert!(matches!(
            walk(&board, &FlatWrap, at(0, 0, Direction::Right), &[]),
            Err(Error::OffCube(Point2(0, 0)))
        ));
    }

    #[test]
    fn trail_rendering() {
        let (board, _) = example();
        let cmds = parse::path("2R1").unwrap();

        let walk = walk(&board, &FlatWrap, board.spawn().unwrap(), &cmds).unwrap();
        let view = walk.trail_view(&board).to_string();
        let mut rows = view.lines();

        assert_eq!(rows.next(), Some("        >>v#"));
        assert_eq!(rows.next(), Some("        .#v."));
    }

    #[test]
    fn around_the_cube() {
        // four faces in a row are a belt around the cube: walking 4 * side comes back home
        let board = open_net(crate::cube::tests::NETS[0], 3, false);
        let graph = FaceGraph::fold(&board, 3).unwrap();

        for start in [at(0, 4, Direction::Right), at(1, 0, Direction::Down)] {
            let walk = walk(&board, &graph, start, &[Command::Forward(12)]).unwrap();

            assert_eq!(walk.end, start);
        }
    }

    fn command() -> impl Strategy<Value = Command> {
        prop_oneof![
            (0usize..20).prop_map(Command::Forward),
            Just(Command::Turn(Rotate::Left)),
            Just(Command::Turn(Rotate::Right)),
        ]
    }

    proptest! {
        #[test]
        fn cube_walks_stay_on_open_tiles(cmds in prop::collection::vec(command(), 0..40)) {
            let board = example_board();
            let graph = FaceGraph::fold(&board, 4).unwrap();

            let walk = walk(&board, &graph, board.spawn().unwrap(), &cmds).unwrap();

            prop_assert_eq!(board.get(walk.end.pos), Some(Tile::Open));
            prop_assert!(walk.trail.keys().all(|&p| board.get(p) == Some(Tile::Open)));
        }

        #[test]
        fn turning_in_place_is_periodic(start in 0usize..4, rights in 0usize..12) {
            let board = example_board();
            let graph = FaceGraph::fold(&board, 4).unwrap();
            let dir = Direction::Right.rotated(start as u8);
            let origin = at(10, 5, dir);

            let cmds = vec![Command::Turn(Rotate::Right); rights];
            let end = walk(&board, &graph, origin, &cmds).unwrap().end;

            prop_assert_eq!(end.pos, origin.pos);
            prop_assert_eq!(end.dir, dir.rotated((rights % 4) as u8));
        }
    }
}
