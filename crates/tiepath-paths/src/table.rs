use std::hash::Hash;

use crate::graph::{Cost, Graph, NodeId, UNREACHABLE};

/// A node with an associated cost, as listed by [`DistanceTable::to_nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode<N> {
    pub node: N,
    pub cost: Cost,
}

/// Minimum distances from the source(s) of one search.
///
/// The table is owned by the caller; it only borrows the graph to translate
/// between nodes and ids.
#[derive(Debug, Clone)]
pub struct DistanceTable<'g, N> {
    graph: &'g Graph<N>,
    dist: Vec<Cost>,
}

impl<'g, N> DistanceTable<'g, N> {
    pub(crate) fn new(graph: &'g Graph<N>, dist: Vec<Cost>) -> Self {
        Self { graph, dist }
    }

    /// Distance of the node behind `id`, or [`UNREACHABLE`].
    #[inline]
    pub fn get_id(&self, id: NodeId) -> Cost {
        self.dist.get(id.index()).copied().unwrap_or(UNREACHABLE)
    }

    /// Iterate over reached nodes and their distances, in graph order.
    pub fn reached(&self) -> impl Iterator<Item = (&'g N, Cost)> + '_ {
        let graph = self.graph;
        self.dist
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d != UNREACHABLE)
            .map(move |(i, &d)| (graph.node(NodeId(i)), d))
    }

    /// Number of nodes with a finite distance.
    pub fn len_reached(&self) -> usize {
        self.dist.iter().filter(|&&d| d != UNREACHABLE).count()
    }

    /// Raw distances indexed by [`NodeId::index`].
    #[inline]
    pub fn as_slice(&self) -> &[Cost] {
        &self.dist
    }
}

impl<N: Eq + Hash + Clone> DistanceTable<'_, N> {
    /// Distance of `node`. Nodes that are not in the graph, or that the
    /// search never reached, report [`UNREACHABLE`].
    #[inline]
    pub fn get(&self, node: &N) -> Cost {
        match self.graph.id(node) {
            Some(id) => self.get_id(id),
            None => UNREACHABLE,
        }
    }

    #[inline]
    pub fn is_reachable(&self, node: &N) -> bool {
        self.get(node) != UNREACHABLE
    }

    /// Reached nodes sorted by increasing cost (ties in graph order).
    pub fn to_nodes(&self) -> Vec<PathNode<N>> {
        let mut out: Vec<PathNode<N>> = self
            .reached()
            .map(|(node, cost)| PathNode {
                node: node.clone(),
                cost,
            })
            .collect();
        out.sort_by_key(|n| n.cost);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(graph: &Graph<char>) -> DistanceTable<'_, char> {
        DistanceTable::new(graph, vec![0, UNREACHABLE, 7, 3])
    }

    #[test]
    fn lookups() {
        let mut g = Graph::new();
        for c in ['a', 'b', 'c', 'd'] {
            g.add_node(c);
        }
        let t = table(&g);
        assert_eq!(t.get(&'a'), 0);
        assert_eq!(t.get(&'b'), UNREACHABLE);
        assert!(!t.is_reachable(&'b'));
        assert_eq!(t.get(&'z'), UNREACHABLE);
        assert_eq!(t.len_reached(), 3);
    }

    #[test]
    fn to_nodes_sorted_by_cost() {
        let mut g = Graph::new();
        for c in ['a', 'b', 'c', 'd'] {
            g.add_node(c);
        }
        let nodes = table(&g).to_nodes();
        let order: Vec<_> = nodes.iter().map(|n| (n.node, n.cost)).collect();
        assert_eq!(order, [('a', 0), ('d', 3), ('c', 7)]);
    }
}
