use std::{collections::HashMap, fs, path::Path, str::FromStr};

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, line_ending, multispace0},
    combinator::{all_consuming, map, map_res, value},
    error::Error as NomError,
    multi::{fold_many0, many0, many1},
    sequence::{separated_pair, terminated},
    IResult,
};
use num::Unsigned;

use crate::{
    board::{Board, Tile},
    direction::Rotate,
    error::Result,
    point::Point2,
    walk::Command,
};

const fn is_int_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn unsigned<N: Unsigned + FromStr>(input: &str) -> IResult<&str, N> {
    map_res(take_while1(is_int_digit), str::parse)(input)
}

fn row(input: &str) -> IResult<&str, Vec<Option<Tile>>> {
    terminated(
        many1(alt((
            value(None, char(' ')),
            value(Some(Tile::Open), char('.')),
            value(Some(Tile::Wall), char('#')),
        ))),
        line_ending,
    )(input)
}

fn board(input: &str) -> IResult<&str, Board> {
    map(
        fold_many0(
            row,
            || (0usize, HashMap::new()),
            |(y, mut tiles), cr| {
                for (x, tile) in cr.into_iter().enumerate() {
                    if let (Some(tile), Ok(p)) = (tile, Point2::try_from((x, y))) {
                        tiles.insert(p, tile);
                    }
                }

                (y + 1, tiles)
            },
        ),
        |(_, tiles)| Board::from_tiles(tiles),
    )(input)
}

pub fn commands(input: &str) -> IResult<&str, Vec<Command>> {
    use Command::*;
    use Rotate::*;

    terminated(
        many0(alt((
            map(unsigned, Forward),
            value(Turn(Left), char('L')),
            value(Turn(Right), char('R')),
        ))),
        multispace0,
    )(input)
}

fn notes_inner(input: &str) -> IResult<&str, (Board, Vec<Command>)> {
    all_consuming(terminated(
        separated_pair(board, line_ending, commands),
        multispace0,
    ))(input)
}

/// Parses the map and the path below it.
pub fn notes(input: &str) -> Result<(Board, Vec<Command>)> {
    let (_, parsed) =
        notes_inner(input).map_err(|e| e.map(|e| NomError::new(e.input.to_string(), e.code)))?;

    Ok(parsed)
}

pub fn read_notes(path: impl AsRef<Path>) -> Result<(Board, Vec<Command>)> {
    notes(&fs::read_to_string(path)?)
}

/// Parses a bare path, such as `10R5L5`.
pub fn path(input: &str) -> Result<Vec<Command>> {
    let (_, parsed) = all_consuming(commands)(input)
        .map_err(|e| e.map(|e| NomError::new(e.input.to_string(), e.code)))?;

    Ok(parsed)
}
