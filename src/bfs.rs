use fxhash::FxBuildHasher;
/// This module implements an unweighted counterpart of
/// [pathfinding's bfs function](https://docs.rs/pathfinding/latest/pathfinding/directed/bfs/index.html)
/// over an abstract successor function, so the graph representation stays
/// out of the search core.
use indexmap::map::Entry::Vacant;
use indexmap::IndexMap;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::warn;
use std::collections::VecDeque;

use std::hash::Hash;

fn reverse_path<N>(parents: &FxIndexMap<N, usize>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, &parent)| {
            *i = parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Searches breadth-first from `start` until `success` holds and returns
/// the node sequence walked. Every edge counts the same, so the first
/// visit to a node is along a fewest-edge route and the node is never
/// revisited; successor order decides between routes of equal length.
pub fn bfs<N, FN, IN, FS>(start: &N, mut successors: FN, mut success: FS) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FS: FnMut(&N) -> bool,
{
    let mut frontier = VecDeque::new();
    frontier.push_back(0);
    let mut parents: FxIndexMap<N, usize> = FxIndexMap::default();
    parents.insert(start.clone(), usize::MAX);
    while let Some(index) = frontier.pop_front() {
        let successors = {
            let (node, _) = parents.get_index(index).unwrap();
            if success(node) {
                return Some(reverse_path(&parents, index));
            }
            successors(node)
        };
        for successor in successors {
            if let Vacant(e) = parents.entry(successor) {
                frontier.push_back(e.index());
                e.insert(index);
            }
        }
    }
    warn!("Reachable goal could not be pathed to, is reachable graph correct?");
    None
}
