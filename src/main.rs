use std::error::Error;

use clap::Parser;
use log::info;

use cubewalk::{parse, walk, FaceGraph, FlatWrap, Wrap};

/// Walks a path over a map of open tiles and walls, either flat or folded into a cube
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to parse
    file: String,

    /// Fold the map into a cube instead of wrapping around its rows and columns
    #[arg(long)]
    cube: bool,

    /// Side of a cube face; inferred from the number of tiles if missing
    #[arg(long)]
    face_size: Option<i32>,

    /// Print the faces and the walked path
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let Args {
        file,
        cube,
        face_size,
        dump,
    } = Args::parse();

    let (board, cmds) = parse::read_notes(file)?;

    info!("{} tiles, {} commands", board.len(), cmds.len());

    let start = board.spawn()?;

    let wrap: Box<dyn Wrap> = if cube {
        let side = match face_size {
            Some(side) => side,
            None => board.infer_face_size()?,
        };

        // fails before any movement if the map does not fold
        let graph = FaceGraph::fold(&board, side)?;

        if dump {
            println!("{}", graph.face_map(&board));
        }

        Box::new(graph)
    } else {
        Box::new(FlatWrap)
    };

    let walk = walk(&board, wrap.as_ref(), start, &cmds)?;

    if dump {
        println!("{}", walk.trail_view(&board));
    }

    println!("{:?}, password = {}", walk.end, walk.end.password());

    Ok(())
}
