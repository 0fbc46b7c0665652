//! Grid state spaces as [`Graph`]s.

use tiepath_core::{Heading, Point};
use tiepath_paths::{Cost, Graph, GraphError};

use crate::tile::TileMap;

/// A walker's cell together with the direction it faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub pos: Point,
    pub heading: Heading,
}

impl Pose {
    pub const fn new(pos: Point, heading: Heading) -> Self {
        Self { pos, heading }
    }
}

/// Movement costs for [`oriented_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeCosts {
    /// Moving one cell forward.
    pub step: Cost,
    /// Turning a quarter turn in place.
    pub turn: Cost,
}

impl Default for MazeCosts {
    fn default() -> Self {
        Self { step: 1, turn: 1000 }
    }
}

/// Unit-cost graph over the passable cells of `map`, linking 4-neighbours.
pub fn cardinal_graph(map: &TileMap) -> Result<Graph<Point>, GraphError> {
    let mut graph = Graph::with_capacity(map.bounds().len());
    for (p, tile) in map.iter() {
        if !tile.passable() {
            continue;
        }
        graph.add_node(p);
        for n in p.neighbors_4() {
            if map.passable(n) {
                graph.add_edge(p, n, 1)?;
            }
        }
    }
    log::debug!(
        "cardinal graph: {} nodes, {} edges",
        graph.len(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Graph over `(cell, heading)` poses of the passable cells of `map`.
///
/// From every pose the walker may step forward into a passable cell for
/// `costs.step`, or make a quarter turn either way for `costs.turn`.
pub fn oriented_graph(map: &TileMap, costs: MazeCosts) -> Result<Graph<Pose>, GraphError> {
    let mut graph = Graph::with_capacity(map.bounds().len() * 4);
    for (p, tile) in map.iter() {
        if !tile.passable() {
            continue;
        }
        for h in Heading::ALL {
            let here = Pose::new(p, h);
            graph.add_edge(here, Pose::new(p, h.clockwise()), costs.turn)?;
            graph.add_edge(here, Pose::new(p, h.counter_clockwise()), costs.turn)?;
            let ahead = p + h.delta();
            if map.passable(ahead) {
                graph.add_edge(here, Pose::new(ahead, h), costs.step)?;
            }
        }
    }
    log::debug!(
        "oriented graph: {} poses, {} edges",
        graph.len(),
        graph.edge_count()
    );
    Ok(graph)
}
