//! Puzzle drivers built on the tiepath crates.
//!
//! Each driver turns a puzzle input into a graph, runs the shortest-path
//! engine and reduces the result to the puzzle's answer:
//!
//! - [`reindeer_maze`]: lowest score through a maze where turning is
//!   expensive, plus the number of cells on any best route
//! - [`count_cheats`] / [`wall_removal_savings`]: race-track shortcuts
//! - [`keypad_complexity`]: door codes typed through a chain of robots
//! - [`falling_bytes`] / [`first_blocking_byte`]: escaping a grid that
//!   fills up one byte at a time

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use tiepath_core::{Heading, Point};
use tiepath_maps::{
    KeypadChain, KeypadError, MapError, MazeCosts, Pose, Tile, TileMap, cardinal_graph, oriented_graph,
};
use tiepath_paths::{Cost, GraphError, PathFinder, UNREACHABLE, manhattan};

/// Read a whole puzzle input.
pub fn read_input(path: impl AsRef<Path>) -> Result<String, Error> {
    Ok(fs::read_to_string(path)?)
}

/// Answer to the reindeer maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeReport {
    /// Lowest possible score from `S` facing east to `E`.
    pub score: Cost,
    /// Distinct cells on at least one lowest-score route.
    pub tiles: usize,
}

/// Solve the reindeer maze. Returns `None` if `E` cannot be reached.
pub fn reindeer_maze(map: &TileMap, costs: MazeCosts) -> Result<Option<MazeReport>, Error> {
    let start = Pose::new(map.start()?, Heading::East);
    let end = map.end()?;
    let graph = oriented_graph(map, costs)?;
    let targets: Vec<Pose> = Heading::ALL.iter().map(|&h| Pose::new(end, h)).collect();

    let Some(best) = PathFinder::new(&graph).best_paths(&start, &targets) else {
        return Ok(None);
    };
    let mut cells: Vec<Point> = best.nodes().into_iter().map(|pose| pose.pos).collect();
    cells.sort_unstable();
    cells.dedup();
    Ok(Some(MazeReport {
        score: best.cost(),
        tiles: cells.len(),
    }))
}

/// Count cheats on a single-lane race track.
///
/// A cheat leaves the track at one cell and rejoins it at another at most
/// `max_cheat` steps away (Manhattan distance, walls ignored). Only cheats
/// saving at least `min_saving` steps over the honest route are counted, and
/// never ones that save nothing.
pub fn count_cheats(map: &TileMap, max_cheat: i32, min_saving: Cost) -> Result<usize, Error> {
    let start = map.start()?;
    let end = map.end()?;
    let graph = cardinal_graph(map)?;
    let mut pf = PathFinder::new(&graph);
    let from_start = pf.distances(&start);
    // Moves are symmetric, so distances from the end are distances to it.
    let to_end = pf.distances(&end);

    let honest = from_start.get(&end);
    if honest == UNREACHABLE {
        return Ok(0);
    }

    let mut count = 0;
    for (&a, da) in from_start.reached() {
        for dy in -max_cheat..=max_cheat {
            let span = max_cheat - dy.abs();
            for dx in -span..=span {
                let b = a.shift(dx, dy);
                let db = to_end.get(&b);
                if db == UNREACHABLE {
                    continue;
                }
                let saving = honest - (da + Cost::from(manhattan(a, b)) + db);
                if saving > 0 && saving >= min_saving {
                    count += 1;
                }
            }
        }
    }
    log::debug!("race: honest time {honest}, {count} cheat(s) save >= {min_saving}");
    Ok(count)
}

/// Remove each wall in turn, re-run the race, and tally the savings.
///
/// Returns `saving -> number of walls` for savings of at least `min_saving`
/// (and always more than zero).
pub fn wall_removal_savings(map: &TileMap, min_saving: Cost) -> Result<BTreeMap<Cost, usize>, Error> {
    let start = map.start()?;
    let end = map.end()?;
    let graph = cardinal_graph(map)?;
    let honest = PathFinder::new(&graph).distance(&start, &end);
    let mut savings = BTreeMap::new();
    if honest == UNREACHABLE {
        return Ok(savings);
    }

    let mut trial = map.clone();
    for (p, tile) in map.iter() {
        if tile != Tile::Wall {
            continue;
        }
        trial.set(p, Tile::Open);
        let graph = cardinal_graph(&trial)?;
        let time = PathFinder::new(&graph).distance(&start, &end);
        trial.set(p, Tile::Wall);

        let saving = honest - time;
        if saving > 0 && saving >= min_saving {
            *savings.entry(saving).or_insert(0) += 1;
        }
    }
    Ok(savings)
}

/// Sum of complexities of `codes` typed through `robots` directional
/// keypads.
pub fn keypad_complexity<'a>(codes: impl IntoIterator<Item = &'a str>, robots: usize) -> Result<Cost, Error> {
    let chain = KeypadChain::new(robots)?;
    let mut total: Cost = 0;
    for code in codes {
        let code = code.trim();
        if code.is_empty() {
            continue;
        }
        let c = chain.complexity(code).map_err(|e| match e {
            KeypadError::Overflow => Error::Overflow,
            _ => Error::Code(code.to_string()),
        })?;
        total = total.checked_add(c).ok_or(Error::Overflow)?;
    }
    Ok(total)
}

/// Parse one `x,y` byte position per line.
pub fn parse_bytes(input: &str) -> Result<Vec<Point>, Error> {
    let mut bytes = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let bad = || Error::Coordinate {
            line: i + 1,
            text: line.to_string(),
        };
        let (x, y) = line.split_once(',').ok_or_else(bad)?;
        let x = x.trim().parse().map_err(|_| bad())?;
        let y = y.trim().parse().map_err(|_| bad())?;
        bytes.push(Point::new(x, y));
    }
    Ok(bytes)
}

/// Steps from `(0, 0)` to `(size, size)` once the first `fallen` bytes have
/// landed, or `None` if they cut the way off.
///
/// The grid spans `0..=size` on both axes. Bytes outside it are ignored.
pub fn falling_bytes(bytes: &[Point], size: i32, fallen: usize) -> Result<Option<Cost>, Error> {
    let side = size.saturating_add(1);
    let mut map = TileMap::filled(side, side, Tile::Open);
    for &b in bytes.iter().take(fallen) {
        if map.set(b, Tile::Wall).is_none() {
            log::debug!("byte {b} falls outside the {side}x{side} grid");
        }
    }
    let graph = cardinal_graph(&map)?;
    let steps = PathFinder::new(&graph).distance(&Point::new(0, 0), &Point::new(size, size));
    Ok((steps != UNREACHABLE).then_some(steps))
}

/// The first byte whose landing leaves no way from `(0, 0)` to
/// `(size, size)`. `None` if the exit stays reachable after every byte, or
/// was never reachable to begin with.
///
/// Blocking is monotone in the number of fallen bytes, so the answer is
/// found by bisection over that number.
pub fn first_blocking_byte(bytes: &[Point], size: i32) -> Result<Option<Point>, Error> {
    if falling_bytes(bytes, size, bytes.len())?.is_some() {
        return Ok(None);
    }
    // Open with `lo` fallen, blocked with `hi` fallen.
    let (mut lo, mut hi) = (0, bytes.len());
    if falling_bytes(bytes, size, lo)?.is_none() {
        return Ok(None);
    }
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if falling_bytes(bytes, size, mid)?.is_some() {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    log::debug!("bytes: exit blocked once {hi} of {} have fallen", bytes.len());
    Ok(Some(bytes[hi - 1]))
}

/// Errors raised by the puzzle drivers.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Map(MapError),
    Graph(GraphError),
    Keypad(KeypadError),
    /// A keypad code that cannot be typed.
    Code(String),
    /// An answer too large for a [`Cost`].
    Overflow,
    /// A byte position that is not `x,y`.
    Coordinate { line: usize, text: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "read input: {e}"),
            Self::Map(e) => write!(f, "{e}"),
            Self::Graph(e) => write!(f, "{e}"),
            Self::Keypad(e) => write!(f, "{e}"),
            Self::Code(code) => write!(f, "cannot type code {code:?}"),
            Self::Overflow => write!(f, "answer overflows"),
            Self::Coordinate { line, text } => write!(f, "line {line}: expected x,y, found {text:?}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Map(e) => Some(e),
            Self::Graph(e) => Some(e),
            Self::Keypad(e) => Some(e),
            Self::Code(_) | Self::Overflow | Self::Coordinate { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<MapError> for Error {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}

impl From<GraphError> for Error {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

impl From<KeypadError> for Error {
    fn from(e: KeypadError) -> Self {
        match e {
            KeypadError::Overflow => Self::Overflow,
            e => Self::Keypad(e),
        }
    }
}
