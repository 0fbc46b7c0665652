use std::hash::Hash;

use crate::PathFinder;
use crate::graph::{Cost, UNREACHABLE};
use crate::pathfinder::Track;
use crate::table::DistanceTable;

impl<'g, N: Eq + Hash + Clone> PathFinder<'g, N> {
    /// Minimum distance from `source` to every node.
    ///
    /// A source that is not in the graph reaches nothing: every entry of the
    /// returned table is [`UNREACHABLE`].
    pub fn distances(&mut self, source: &N) -> DistanceTable<'g, N> {
        self.distances_from(std::slice::from_ref(source))
    }

    /// Multi-source distance table: every known source starts at cost 0.
    pub fn distances_from(&mut self, sources: &[N]) -> DistanceTable<'g, N> {
        let sources = self.ids(sources);
        let search = self.run(&sources, &[], Track::Distances);
        DistanceTable::new(self.graph, search.dist)
    }

    /// Minimum distance from `source` to `target`, or [`UNREACHABLE`].
    ///
    /// The search stops as soon as `target` is settled.
    pub fn distance(&mut self, source: &N, target: &N) -> Cost {
        let (Some(s), Some(t)) = (self.graph.id(source), self.graph.id(target)) else {
            return UNREACHABLE;
        };
        let search = self.run(&[s], &[t], Track::Distances);
        search.dist[t.index()]
    }

    /// One optimal path from `source` to the nearest of `targets`.
    ///
    /// Returns the path cost and the nodes along it, source first, or `None`
    /// if no target is reachable.
    pub fn shortest_path(&mut self, source: &N, targets: &[N]) -> Option<(Cost, Vec<N>)> {
        let s = self.graph.id(source)?;
        let goals = self.ids(targets);
        let search = self.run(&[s], &goals, Track::Parent);
        let goal = search.goal?;

        let mut path = Vec::new();
        let mut cur = Some(goal);
        while let Some(id) = cur {
            path.push(self.graph.node(id).clone());
            cur = search.parent[id.index()];
        }
        path.reverse();
        Some((search.dist[goal.index()], path))
    }

    /// Distance from `source` to `target` through the memo.
    ///
    /// The first query for a given source computes and stores its whole
    /// distance table; later queries from the same source are lookups.
    pub fn memo_distance(&mut self, source: &N, target: &N) -> Cost {
        let (Some(s), Some(t)) = (self.graph.id(source), self.graph.id(target)) else {
            return UNREACHABLE;
        };
        if !self.memo.contains_key(&s) {
            let search = self.run(&[s], &[], Track::Distances);
            self.memo.insert(s, search.dist);
        }
        self.memo
            .get(&s)
            .map_or(UNREACHABLE, |dist| dist[t.index()])
    }
}
