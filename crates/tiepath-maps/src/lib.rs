//! Building search graphs out of puzzle inputs.
//!
//! - [`TileMap`]: ASCII maps of walls and open floor with start/end markers
//! - [`cardinal_graph`] / [`oriented_graph`]: grid state spaces for the
//!   `tiepath-paths` engine
//! - [`KeypadChain`]: layered press-cost tables for keypads driving keypads

pub mod build;
pub mod keypad;
pub mod tile;

pub use build::{MazeCosts, Pose, cardinal_graph, oriented_graph};
pub use keypad::{Keypad, KeypadChain, KeypadError};
pub use tile::{MapError, Tile, TileMap};
