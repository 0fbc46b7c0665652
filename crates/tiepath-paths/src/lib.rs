//! Shortest paths over caller-built weighted graphs.
//!
//! Callers intern their own node type (grid cells, cell + heading poses,
//! keypad states, ...) into a [`Graph`] and query it through a
//! [`PathFinder`]:
//!
//! - **Distance tables** from one or many sources ([`PathFinder::distances`],
//!   [`PathFinder::distances_from`])
//! - **Single target** searches with early exit ([`PathFinder::distance`],
//!   [`PathFinder::shortest_path`])
//! - **All tied-optimal paths** to the cheapest of several targets
//!   ([`PathFinder::best_paths`])
//! - **Memoized** per-source tables for query loops
//!   ([`PathFinder::memo_distance`])
//!
//! Edge costs are non-negative integers; [`Graph`] refuses negative ones at
//! construction time. Searches never mutate the graph.

mod best;
mod dijkstra;
mod distance;
mod graph;
mod pathfinder;
mod table;

use std::hash::Hash;

pub use best::BestPaths;
pub use distance::manhattan;
pub use graph::{Cost, Edge, Graph, GraphError, NodeId, UNREACHABLE};
pub use pathfinder::PathFinder;
pub use table::{DistanceTable, PathNode};

/// Distance table from `source` using a throwaway [`PathFinder`].
pub fn distances<'g, N: Eq + Hash + Clone>(graph: &'g Graph<N>, source: &N) -> DistanceTable<'g, N> {
    PathFinder::new(graph).distances(source)
}

/// All optimal paths from `source` to the cheapest of `targets`, using a
/// throwaway [`PathFinder`].
pub fn best_paths<'g, N: Eq + Hash + Clone>(
    graph: &'g Graph<N>,
    source: &N,
    targets: &[N],
) -> Option<BestPaths<'g, N>> {
    PathFinder::new(graph).best_paths(source, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, RngExt, SeedableRng};
    use std::collections::HashSet;

    const NODES: usize = 7;

    fn random_graph(rng: &mut impl Rng, min_cost: Cost) -> Graph<usize> {
        let mut g = Graph::new();
        for n in 0..NODES {
            g.add_node(n);
        }
        let edges = rng.random_range(0..NODES * 3);
        for _ in 0..edges {
            let from = rng.random_range(0..NODES);
            let to = rng.random_range(0..NODES);
            let cost = rng.random_range(min_cost..4);
            g.add_edge(from, to, cost).unwrap();
        }
        g
    }

    fn bellman_ford(g: &Graph<usize>, source: usize) -> Vec<Cost> {
        let mut dist = vec![UNREACHABLE; NODES];
        dist[source] = 0;
        for _ in 0..NODES {
            for (id, &from) in g.iter() {
                if dist[from] == UNREACHABLE {
                    continue;
                }
                for e in g.edges(id) {
                    let to = *g.node(e.to);
                    dist[to] = dist[to].min(dist[from] + e.cost);
                }
            }
        }
        dist
    }

    fn path_cost(g: &Graph<usize>, path: &[usize]) -> Cost {
        path.windows(2).map(|w| g.cost(&w[0], &w[1]).unwrap()).sum()
    }

    /// Every simple path from `source` to `target` with cost `best`.
    fn brute_force_paths(g: &Graph<usize>, source: usize, target: usize, best: Cost) -> HashSet<Vec<usize>> {
        fn walk(g: &Graph<usize>, trail: &mut Vec<usize>, target: usize, best: Cost, out: &mut HashSet<Vec<usize>>) {
            let last = trail[trail.len() - 1];
            if last == target {
                if path_cost(g, trail) == best {
                    out.insert(trail.clone());
                }
                return;
            }
            let id = g.id(&last).unwrap();
            for e in g.edges(id) {
                let next = *g.node(e.to);
                if !trail.contains(&next) {
                    trail.push(next);
                    walk(g, trail, target, best, out);
                    trail.pop();
                }
            }
        }
        let mut out = HashSet::new();
        walk(g, &mut vec![source], target, best, &mut out);
        out
    }

    #[test]
    fn distances_match_bellman_ford() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let g = random_graph(&mut rng, 0);
            let source = rng.random_range(0..NODES);
            let table = distances(&g, &source);
            let expected = bellman_ford(&g, source);
            for n in 0..NODES {
                assert_eq!(table.get(&n), expected[n], "node {n} from {source} in {g:?}");
            }
        }
    }

    #[test]
    fn best_paths_are_optimal_and_complete() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let g = random_graph(&mut rng, 0);
            let source = rng.random_range(0..NODES);
            let target = rng.random_range(0..NODES);
            let expected = bellman_ford(&g, source)[target];

            let Some(best) = best_paths(&g, &source, &[target]) else {
                assert_eq!(expected, UNREACHABLE);
                continue;
            };
            assert_eq!(best.cost(), expected);

            let paths = best.paths();
            let unique: HashSet<Vec<usize>> = paths.iter().cloned().collect();
            assert_eq!(unique.len(), paths.len(), "duplicate paths in {paths:?}");
            for p in &paths {
                assert_eq!(p[0], source);
                assert_eq!(p[p.len() - 1], target);
                assert_eq!(path_cost(&g, p), expected);
            }
            assert_eq!(unique, brute_force_paths(&g, source, target, expected));

            let on_paths: HashSet<usize> = paths.iter().flatten().copied().collect();
            let nodes: HashSet<usize> = best.nodes().into_iter().copied().collect();
            assert!(on_paths.is_subset(&nodes));
            if !has_free_edges(&g) {
                assert_eq!(on_paths, nodes);
            }
        }
    }

    fn has_free_edges(g: &Graph<usize>) -> bool {
        g.iter().any(|(id, _)| g.edges(id).iter().any(|e| e.cost == 0))
    }

    #[test]
    fn best_nodes_are_exact_with_positive_costs() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let mut checked = 0;
        for _ in 0..200 {
            let g = random_graph(&mut rng, 1);
            let source = rng.random_range(0..NODES);
            let target = rng.random_range(0..NODES);
            let Some(best) = best_paths(&g, &source, &[target]) else {
                continue;
            };
            let on_paths: HashSet<usize> = best.paths().into_iter().flatten().collect();
            let nodes: HashSet<usize> = best.nodes().into_iter().copied().collect();
            assert_eq!(on_paths, nodes, "{source} -> {target} in {g:?}");
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn searches_leave_the_graph_untouched() {
        let g = Graph::from_adjacency([(1, vec![(2, 3), (3, 1)]), (3, vec![(2, 1)])]).unwrap();
        let before = format!("{g:?}");
        let mut pf = PathFinder::new(&g);
        let _ = pf.distances(&1);
        let _ = pf.best_paths(&1, &[2]);
        let _ = pf.shortest_path(&1, &[2]);
        assert_eq!(format!("{g:?}"), before);
    }
}
