//! Tile maps parsed from ASCII text.
//!
//! ```text
//! #####
//! #S..#
//! #.#E#
//! #####
//! ```

use std::fmt;

use tiepath_core::{Bounds, Point};

/// What occupies one map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    Wall,
    Open,
    Start,
    End,
}

impl Tile {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Open),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => '.',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    /// Whether a walker may stand on this tile.
    #[inline]
    pub const fn passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// A rectangular map of [`Tile`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    tiles: Vec<Tile>,
    bounds: Bounds,
}

impl TileMap {
    /// Parse a map. Leading/trailing whitespace is trimmed from the whole
    /// string; every line must then have the same width.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let s = s.trim();
        let mut tiles = Vec::with_capacity(s.len());
        let mut width: Option<i32> = None;
        let mut height = 0;

        for (y, line) in s.lines().enumerate() {
            let mut x = 0;
            for ch in line.chars() {
                let tile = Tile::from_char(ch).ok_or(MapError::InvalidRune {
                    ch,
                    pos: Point::new(x, y as i32),
                })?;
                tiles.push(tile);
                x += 1;
            }
            match width {
                None => width = Some(x),
                Some(w) if w != x => {
                    return Err(MapError::InconsistentSize {
                        line: y as i32,
                        expected: w,
                        found: x,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        let bounds = Bounds::new(width.unwrap_or(0), height);
        log::debug!("parsed {bounds} tile map");
        Ok(Self { tiles, bounds })
    }

    /// A map of the given size where every tile is `fill`.
    pub fn filled(width: i32, height: i32, fill: Tile) -> Self {
        let bounds = Bounds::new(width, height);
        Self {
            tiles: vec![fill; bounds.len()],
            bounds,
        }
    }

    /// Returns the (width, height) size of the map.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.bounds.index(p)
    }

    /// The tile at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// Whether `p` is inside the map and not a wall.
    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::passable)
    }

    /// Set the tile at `p`. Returns the previous tile, or `None` (and does
    /// nothing) if out of bounds.
    pub fn set(&mut self, p: Point, tile: Tile) -> Option<Tile> {
        let i = self.index(p)?;
        Some(std::mem::replace(&mut self.tiles[i], tile))
    }

    /// Iterate over `(Point, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }

    /// First position holding `tile`, in row-major order.
    pub fn find(&self, tile: Tile) -> Option<Point> {
        self.iter().find(|&(_, t)| t == tile).map(|(p, _)| p)
    }

    pub fn start(&self) -> Result<Point, MapError> {
        self.find(Tile::Start).ok_or(MapError::Missing(Tile::Start))
    }

    pub fn end(&self) -> Result<Point, MapError> {
        self.find(Tile::End).ok_or(MapError::Missing(Tile::End))
    }

    /// Number of tiles satisfying `f`.
    pub fn count(&self, f: impl Fn(Tile) -> bool) -> usize {
        self.tiles.iter().filter(|&&t| f(t)).count()
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, tile) in self.iter() {
            if p.x == 0 && p.y > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", tile.to_char())?;
        }
        Ok(())
    }
}

/// Errors that can occur when parsing or querying a tile map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A line's width differs from the first line's.
    InconsistentSize { line: i32, expected: i32, found: i32 },
    /// A character that is not a known tile.
    InvalidRune { ch: char, pos: Point },
    /// The map has no tile of this kind.
    Missing(Tile),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(f, "map line {line} has width {found}, expected {expected}"),
            Self::InvalidRune { ch, pos } => {
                write!(f, "map contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::Missing(tile) => write!(f, "map has no \u{201c}{}\u{201d} tile", tile.to_char()),
        }
    }
}

impl std::error::Error for MapError {}
