//! Command-line driver for the tiepath puzzle demos.
//!
//! Run: cargo run --bin tiepath -- maze input.txt

use std::path::PathBuf;

use structopt::StructOpt;
use tiepath_demos::{
    Error, count_cheats, falling_bytes, first_blocking_byte, keypad_complexity, parse_bytes, read_input,
    reindeer_maze, wall_removal_savings,
};
use tiepath_maps::{MazeCosts, TileMap};
use tiepath_paths::Cost;

#[derive(Debug, StructOpt)]
#[structopt(name = "tiepath", about = "Shortest-path puzzle demos")]
enum Opt {
    #[structopt(about = "Lowest reindeer score and the tiles on any best route")]
    Maze {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Cost of one step forward
        #[structopt(long, default_value = "1")]
        step: Cost,
        /// Cost of a 90 degree turn
        #[structopt(long, default_value = "1000")]
        turn: Cost,
    },
    #[structopt(about = "Count race track cheats that save enough time")]
    Race {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Longest cheat, in steps
        #[structopt(long, default_value = "2")]
        cheat: i32,
        /// Minimum saving for a cheat to count
        #[structopt(long, default_value = "100")]
        save: Cost,
        /// Tally single wall removals instead of cheats
        #[structopt(long)]
        remove_walls: bool,
    },
    #[structopt(about = "Sum of door code complexities through a robot chain")]
    Keypad {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Directional keypads operated by robots
        #[structopt(long, default_value = "2")]
        robots: usize,
    },
    #[structopt(about = "Escape a grid while bytes keep falling into it")]
    Bytes {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Coordinate of the exit corner; the grid spans 0..=size
        #[structopt(long, default_value = "70")]
        size: i32,
        /// Bytes that have fallen before the escape
        #[structopt(long, default_value = "1024")]
        fallen: usize,
    },
}

fn main() -> Result<(), Error> {
    match Opt::from_args() {
        Opt::Maze { input, step, turn } => {
            let map = TileMap::parse(&read_input(input)?)?;
            match reindeer_maze(&map, MazeCosts { step, turn })? {
                Some(report) => {
                    println!("score: {}", report.score);
                    println!("tiles on best routes: {}", report.tiles);
                }
                None => println!("no route to the end tile"),
            }
        }
        Opt::Race {
            input,
            cheat,
            save,
            remove_walls,
        } => {
            let map = TileMap::parse(&read_input(input)?)?;
            if remove_walls {
                let savings = wall_removal_savings(&map, save)?;
                for (saving, walls) in &savings {
                    println!("{walls} wall(s) save {saving}");
                }
                println!("total: {}", savings.values().sum::<usize>());
            } else {
                println!("{}", count_cheats(&map, cheat, save)?);
            }
        }
        Opt::Keypad { input, robots } => {
            let codes = read_input(input)?;
            println!("{}", keypad_complexity(codes.lines(), robots)?);
        }
        Opt::Bytes { input, size, fallen } => {
            let bytes = parse_bytes(&read_input(input)?)?;
            match falling_bytes(&bytes, size, fallen)? {
                Some(steps) => println!("steps after {fallen} bytes: {steps}"),
                None => println!("no way out after {fallen} bytes"),
            }
            match first_blocking_byte(&bytes, size)? {
                Some(b) => println!("first blocking byte: {},{}", b.x, b.y),
                None => println!("the exit is never cut off"),
            }
        }
    }
    Ok(())
}
