//! All tied-optimal paths.
//!
//! Instead of copying whole path lists on every relaxation, the search keeps
//! for each node the set of predecessors through which its optimal distance
//! is reached. Paths are only materialized when asked for, by walking those
//! sets backwards from a target to the source.

use std::hash::Hash;

use crate::PathFinder;
use crate::graph::{Cost, Graph, NodeId};
use crate::pathfinder::Track;

/// Result of [`PathFinder::best_paths`].
#[derive(Debug, Clone)]
pub struct BestPaths<'g, N> {
    graph: &'g Graph<N>,
    source: NodeId,
    cost: Cost,
    targets: Vec<NodeId>,
    dist: Vec<Cost>,
    preds: Vec<Vec<NodeId>>,
}

impl<'g, N: Eq + Hash + Clone> PathFinder<'g, N> {
    /// Minimum cost from `source` to any of `targets`, together with every
    /// optimal path to each target achieving it.
    ///
    /// Returns `None` if `source` is unknown or no target is reachable.
    ///
    /// The number of tied paths can grow exponentially with graph size; the
    /// search itself stays polynomial, but enumerating [`BestPaths::paths`]
    /// on such graphs is the caller's responsibility.
    pub fn best_paths(&mut self, source: &N, targets: &[N]) -> Option<BestPaths<'g, N>> {
        let s = self.graph.id(source)?;
        let goals = self.ids(targets);
        let search = self.run(&[s], &goals, Track::Predecessors);
        let nearest = search.goal?;
        let cost = search.dist[nearest.index()];
        let targets = goals
            .into_iter()
            .filter(|g| search.dist[g.index()] == cost)
            .collect();
        Some(BestPaths {
            graph: self.graph,
            source: s,
            cost,
            targets,
            dist: search.dist,
            preds: search.preds,
        })
    }
}

impl<'g, N: Clone> BestPaths<'g, N> {
    /// The optimal cost shared by every returned path.
    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    #[inline]
    pub fn source(&self) -> &'g N {
        self.graph.node(self.source)
    }

    /// The targets reached at [`cost`](Self::cost), in the order given.
    pub fn targets(&self) -> impl Iterator<Item = &'g N> + '_ {
        let graph = self.graph;
        self.targets.iter().map(move |&id| graph.node(id))
    }

    /// Every optimal path to every optimal target, source first.
    pub fn paths(&self) -> Vec<Vec<N>> {
        let mut out = Vec::new();
        for &t in &self.targets {
            self.collect_paths(t, &mut out);
        }
        out
    }

    /// Every node lying on at least one optimal path, in graph order.
    ///
    /// Computed by walking predecessor sets backwards from the targets, so it
    /// stays cheap even when the number of paths is huge.
    pub fn nodes(&self) -> Vec<&'g N> {
        let mut seen = vec![false; self.graph.len()];
        let mut stack: Vec<NodeId> = Vec::new();
        for &t in &self.targets {
            if !seen[t.index()] {
                seen[t.index()] = true;
                stack.push(t);
            }
        }
        while let Some(id) = stack.pop() {
            if id == self.source {
                continue;
            }
            for &p in &self.preds[id.index()] {
                if !seen[p.index()] {
                    seen[p.index()] = true;
                    stack.push(p);
                }
            }
        }
        seen.iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(i, _)| self.graph.node(NodeId(i)))
            .collect()
    }

    /// Enumerate simple paths from the source to `target` by a depth-first
    /// walk over predecessor sets.
    fn collect_paths(&self, target: NodeId, out: &mut Vec<Vec<N>>) {
        let mut on_trail = vec![false; self.graph.len()];
        let mut stack: Vec<(NodeId, usize)> = vec![(target, 0)];
        on_trail[target.index()] = true;

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            if node == self.source {
                out.push(
                    stack
                        .iter()
                        .rev()
                        .map(|&(id, _)| self.graph.node(id).clone())
                        .collect(),
                );
                on_trail[node.index()] = false;
                stack.pop();
                continue;
            }
            let next = self.preds[node.index()].get(top.1).copied();
            top.1 += 1;
            match next {
                Some(p) if !on_trail[p.index()] => {
                    on_trail[p.index()] = true;
                    stack.push((p, 0));
                }
                Some(_) => {}
                None => {
                    on_trail[node.index()] = false;
                    stack.pop();
                }
            }
        }
    }
}

impl<N: Eq + Hash + Clone> BestPaths<'_, N> {
    /// Optimal paths ending at `node`.
    ///
    /// Any node whose distance is at most [`cost`](Self::cost) can be
    /// queried; nodes farther away were not settled and yield no paths.
    pub fn paths_to(&self, node: &N) -> Vec<Vec<N>> {
        let mut out = Vec::new();
        if let Some(id) = self.graph.id(node) {
            if self.dist[id.index()] <= self.cost {
                self.collect_paths(id, &mut out);
            }
        }
        out
    }
}
