//! Arena-backed weighted directed graph.
//!
//! Callers describe their state space with any hashable node type. Each node
//! is interned once and afterwards referred to by a dense [`NodeId`], so the
//! search code works on flat vectors instead of hash maps.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Edge weight / accumulated path cost.
pub type Cost = i64;

/// Sentinel value meaning "unreachable" in distance tables.
///
/// It doubles as the largest cost a search can represent: a path whose
/// total would reach or exceed it is reported as unreachable. Single edges
/// may not cost this much.
pub const UNREACHABLE: Cost = Cost::MAX;

/// Dense index of a node inside one [`Graph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its graph's arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Outgoing edge stored in a node's adjacency list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub to: NodeId,
    pub cost: Cost,
}

/// A directed graph with non-negative integer edge costs.
///
/// There is at most one edge per ordered pair of nodes: adding the same
/// `(from, to)` pair again replaces its cost. Nodes that only ever appear as
/// edge targets are interned with an empty adjacency list and act as dead
/// ends.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    nodes: Vec<N>,
    ids: HashMap<N, NodeId>,
    edges: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            ids: HashMap::new(),
            edges: Vec::new(),
            edge_count: 0,
        }
    }
}

impl<N: Eq + Hash + Clone> Graph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            ids: HashMap::with_capacity(nodes),
            edges: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Build a graph from a map-of-maps style description:
    /// `node -> [(neighbor, cost), ...]`.
    pub fn from_adjacency<I, E>(adjacency: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (N, E)>,
        E: IntoIterator<Item = (N, Cost)>,
    {
        let mut graph = Self::new();
        for (node, neighbors) in adjacency {
            let from = graph.add_node(node);
            for (to, cost) in neighbors {
                let to = graph.add_node(to);
                graph.add_edge_ids(from, to, cost)?;
            }
        }
        Ok(graph)
    }

    /// Intern `node`, returning its id. Adding a node twice is a no-op.
    pub fn add_node(&mut self, node: N) -> NodeId {
        if let Some(&id) = self.ids.get(&node) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.ids.insert(node.clone(), id);
        self.nodes.push(node);
        self.edges.push(Vec::new());
        id
    }

    /// Add (or re-weight) the edge `from -> to`, interning both ends.
    ///
    /// Negative costs, and costs equal to [`UNREACHABLE`], are rejected
    /// before anything is interned.
    pub fn add_edge(&mut self, from: N, to: N, cost: Cost) -> Result<(), GraphError> {
        check_cost(cost)?;
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.add_edge_ids(from, to, cost)
    }

    /// Id-based form of [`add_edge`](Self::add_edge).
    pub fn add_edge_ids(&mut self, from: NodeId, to: NodeId, cost: Cost) -> Result<(), GraphError> {
        check_cost(cost)?;
        for id in [from, to] {
            if id.0 >= self.nodes.len() {
                return Err(GraphError::UnknownNode(id));
            }
        }
        let out = &mut self.edges[from.0];
        match out.iter_mut().find(|e| e.to == to) {
            Some(edge) => edge.cost = cost,
            None => {
                out.push(Edge { to, cost });
                self.edge_count += 1;
            }
        }
        Ok(())
    }

    /// Id of `node`, if it has been interned.
    #[inline]
    pub fn id(&self, node: &N) -> Option<NodeId> {
        self.ids.get(node).copied()
    }

    #[inline]
    pub fn contains(&self, node: &N) -> bool {
        self.ids.contains_key(node)
    }

    /// Cost of the edge `from -> to`, if present.
    pub fn cost(&self, from: &N, to: &N) -> Option<Cost> {
        let from = self.id(from)?;
        let to = self.id(to)?;
        self.edges[from.0].iter().find(|e| e.to == to).map(|e| e.cost)
    }
}

impl<N> Graph<N> {
    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &N {
        &self.nodes[id.0]
    }

    /// Outgoing edges of `id`.
    #[inline]
    pub fn edges(&self, id: NodeId) -> &[Edge] {
        &self.edges[id.0]
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct directed edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All nodes with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

fn check_cost(cost: Cost) -> Result<(), GraphError> {
    if cost < 0 {
        log::trace!("rejecting edge with negative cost {cost}");
        return Err(GraphError::NegativeCost(cost));
    }
    if cost == UNREACHABLE {
        log::trace!("rejecting edge with unreachable cost");
        return Err(GraphError::InfiniteCost);
    }
    Ok(())
}

/// Graph construction precondition violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Shortest-path search is undefined with negative edge costs.
    NegativeCost(Cost),
    /// An edge as expensive as [`UNREACHABLE`], which no search could take.
    InfiniteCost,
    /// An id that does not belong to this graph.
    UnknownNode(NodeId),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeCost(cost) => write!(f, "edge cost {cost} is negative"),
            Self::InfiniteCost => write!(f, "edge cost equals the unreachable sentinel"),
            Self::UnknownNode(id) => write!(f, "node id {} is not in the graph", id.0),
        }
    }
}

impl std::error::Error for GraphError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_interns() {
        let mut g = Graph::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        assert_ne!(a, b);
        assert_eq!(g.add_node("a"), a);
        assert_eq!(g.len(), 2);
        assert_eq!(g.id(&"b"), Some(b));
        assert_eq!(*g.node(b), "b");
    }

    #[test]
    fn add_edge_replaces_same_pair() {
        let mut g = Graph::new();
        g.add_edge('a', 'b', 5).unwrap();
        g.add_edge('a', 'b', 2).unwrap();
        g.add_edge('a', 'c', 1).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.cost(&'a', &'b'), Some(2));
        assert_eq!(g.cost(&'b', &'a'), None);
    }

    #[test]
    fn neighbors_become_dead_ends() {
        let mut g = Graph::new();
        g.add_edge(1, 2, 1).unwrap();
        let two = g.id(&2).unwrap();
        assert!(g.contains(&2));
        assert!(g.edges(two).is_empty());
    }

    #[test]
    fn negative_cost_fails_fast() {
        let mut g = Graph::new();
        assert_eq!(g.add_edge('a', 'b', -1), Err(GraphError::NegativeCost(-1)));
        // Nothing was interned.
        assert!(g.is_empty());
        let err = Graph::from_adjacency([('a', vec![('b', 3), ('c', -2)])]).unwrap_err();
        assert_eq!(err.to_string(), "edge cost -2 is negative");
    }

    #[test]
    fn sentinel_cost_rejected() {
        let mut g = Graph::new();
        assert_eq!(g.add_edge('a', 'b', UNREACHABLE), Err(GraphError::InfiniteCost));
        assert!(g.is_empty());
        g.add_edge('a', 'b', UNREACHABLE - 1).unwrap();
        assert_eq!(g.cost(&'a', &'b'), Some(UNREACHABLE - 1));
    }

    #[test]
    fn unknown_id_rejected() {
        let mut g: Graph<char> = Graph::new();
        let a = g.add_node('a');
        assert_eq!(
            g.add_edge_ids(a, NodeId(7), 1),
            Err(GraphError::UnknownNode(NodeId(7)))
        );
    }

    #[test]
    fn from_adjacency_keeps_insertion_order() {
        let g = Graph::from_adjacency([
            ("A", vec![("B", 1), ("C", 1)]),
            ("B", vec![("D", 1)]),
            ("C", vec![("D", 1)]),
            ("D", vec![]),
        ])
        .unwrap();
        let names: Vec<_> = g.iter().map(|(_, n)| *n).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
        assert_eq!(g.edge_count(), 4);
    }
}
