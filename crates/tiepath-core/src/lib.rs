//! **tiepath-core**: geometry primitives shared across the *tiepath* crates.
//!
//! Grid-shaped puzzles describe their state spaces in terms of cells
//! ([`Point`]), grid extents ([`Bounds`]) and facing directions
//! ([`Heading`]). Nothing in here knows about graphs; that lives in
//! `tiepath-paths`.

pub mod geom;
pub mod heading;

pub use geom::{Bounds, Cells, Point};
pub use heading::Heading;
