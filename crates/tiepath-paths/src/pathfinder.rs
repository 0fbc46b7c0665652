use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use crate::graph::{Cost, Graph, NodeId, UNREACHABLE};

// ---------------------------------------------------------------------------
// Priority queue entry
// ---------------------------------------------------------------------------

/// Tentative distance of a node, ordered for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct QueueEntry {
    pub(crate) node: NodeId,
    pub(crate) cost: Cost,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest cost first;
        // lower ids win ties so runs are deterministic.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Search bookkeeping
// ---------------------------------------------------------------------------

/// What a search records besides distances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Track {
    Distances,
    /// One parent per node, enough to rebuild a single optimal path.
    Parent,
    /// Every predecessor that yields an optimal distance.
    Predecessors,
}

/// Working tables of one search run.
pub(crate) struct Search {
    pub(crate) dist: Vec<Cost>,
    pub(crate) parent: Vec<Option<NodeId>>,
    pub(crate) preds: Vec<Vec<NodeId>>,
    /// First goal popped from the queue (the nearest one).
    pub(crate) goal: Option<NodeId>,
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Shortest-path searches over one [`Graph`].
///
/// A `PathFinder` borrows its graph immutably, so it can be reused for any
/// number of queries without touching the caller's data. It keeps the queue
/// allocation between runs, plus an explicit per-source memo of distance
/// tables used by [`memo_distance`](Self::memo_distance). Apart from that
/// memo, every query is independent of the ones before it.
pub struct PathFinder<'g, N> {
    pub(crate) graph: &'g Graph<N>,
    pub(crate) open: BinaryHeap<QueueEntry>,
    pub(crate) memo: HashMap<NodeId, Vec<Cost>>,
}

impl<'g, N: Eq + Hash + Clone> PathFinder<'g, N> {
    pub fn new(graph: &'g Graph<N>) -> Self {
        Self {
            graph,
            open: BinaryHeap::new(),
            memo: HashMap::new(),
        }
    }

    /// The graph being searched.
    #[inline]
    pub fn graph(&self) -> &'g Graph<N> {
        self.graph
    }

    /// Resolve nodes to ids, dropping the ones the graph does not know.
    pub(crate) fn ids(&self, nodes: &[N]) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = Vec::with_capacity(nodes.len());
        for n in nodes {
            match self.graph.id(n) {
                Some(id) if !ids.contains(&id) => ids.push(id),
                Some(_) => {}
                None => log::debug!("ignoring node that is not in the graph"),
            }
        }
        ids
    }

    /// Run Dijkstra from `sources`.
    ///
    /// With no `goals` the queue is drained. Otherwise the run stops when the
    /// first goal is popped, or, when tracking predecessors, as soon as the
    /// popped cost exceeds the nearest goal's cost, so every tie at that cost
    /// is still collected.
    pub(crate) fn run(&mut self, sources: &[NodeId], goals: &[NodeId], track: Track) -> Search {
        let n = self.graph.len();
        let mut search = Search {
            dist: vec![UNREACHABLE; n],
            parent: if track == Track::Parent {
                vec![None; n]
            } else {
                Vec::new()
            },
            preds: if track == Track::Predecessors {
                vec![Vec::new(); n]
            } else {
                Vec::new()
            },
            goal: None,
        };
        let mut is_goal = vec![false; n];
        for g in goals {
            is_goal[g.index()] = true;
        }

        self.open.clear();
        for &src in sources {
            if search.dist[src.index()] != 0 {
                search.dist[src.index()] = 0;
                self.open.push(QueueEntry { node: src, cost: 0 });
            }
        }

        let mut bound = UNREACHABLE;
        let mut settled = 0usize;

        while let Some(QueueEntry { node, cost }) = self.open.pop() {
            // Skip stale entries.
            if cost > search.dist[node.index()] {
                continue;
            }
            if cost > bound {
                break;
            }
            settled += 1;

            if is_goal[node.index()] && search.goal.is_none() {
                search.goal = Some(node);
                if track != Track::Predecessors {
                    break;
                }
                bound = cost;
            }

            for edge in self.graph.edges(node) {
                let Some(candidate) = cost.checked_add(edge.cost) else {
                    continue;
                };
                let ni = edge.to.index();
                if candidate < search.dist[ni] {
                    search.dist[ni] = candidate;
                    match track {
                        Track::Distances => {}
                        Track::Parent => search.parent[ni] = Some(node),
                        Track::Predecessors => {
                            search.preds[ni].clear();
                            search.preds[ni].push(node);
                        }
                    }
                    self.open.push(QueueEntry {
                        node: edge.to,
                        cost: candidate,
                    });
                } else if candidate == search.dist[ni]
                    && track == Track::Predecessors
                    && !search.preds[ni].contains(&node)
                {
                    search.preds[ni].push(node);
                }
            }
        }

        log::debug!(
            "dijkstra: settled {settled} of {n} nodes from {} source(s), {} goal(s)",
            sources.len(),
            goals.len()
        );
        search
    }

    /// Forget every memoized distance table.
    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }

    /// Number of sources with a memoized distance table.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_pops_smallest_cost_first() {
        let mut heap = BinaryHeap::new();
        for (i, c) in [(0, 5), (1, 1), (2, 3), (3, 1)] {
            heap.push(QueueEntry {
                node: NodeId(i),
                cost: c,
            });
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|e| (e.node.index(), e.cost))
            .collect();
        assert_eq!(order, [(1, 1), (3, 1), (2, 3), (0, 5)]);
    }

    #[test]
    fn ids_skips_unknown_and_duplicates() {
        let mut g = Graph::new();
        g.add_edge('a', 'b', 1).unwrap();
        let pf = PathFinder::new(&g);
        let ids = pf.ids(&['b', 'z', 'b', 'a']);
        assert_eq!(ids, [g.id(&'b').unwrap(), g.id(&'a').unwrap()]);
    }

    #[test]
    fn predecessor_run_collects_ties() {
        let g = Graph::from_adjacency([
            ('A', vec![('B', 1), ('C', 1)]),
            ('B', vec![('D', 1)]),
            ('C', vec![('D', 1)]),
        ])
        .unwrap();
        let id = |c| g.id(&c).unwrap();
        let mut pf = PathFinder::new(&g);
        let s = pf.run(&[id('A')], &[id('D')], Track::Predecessors);
        assert_eq!(s.goal, Some(id('D')));
        assert_eq!(s.dist[id('D').index()], 2);
        assert_eq!(s.preds[id('D').index()], [id('B'), id('C')]);
    }

    #[test]
    fn parent_run_stops_at_goal() {
        let g = Graph::from_adjacency([('A', vec![('B', 1)]), ('B', vec![('C', 10)])]).unwrap();
        let id = |c| g.id(&c).unwrap();
        let mut pf = PathFinder::new(&g);
        let s = pf.run(&[id('A')], &[id('B')], Track::Parent);
        assert_eq!(s.goal, Some(id('B')));
        assert_eq!(s.parent[id('B').index()], Some(id('A')));
        // B was never expanded.
        assert_eq!(s.dist[id('C').index()], UNREACHABLE);
    }
}
