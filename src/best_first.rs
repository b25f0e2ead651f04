//! Best-first search over an implicit graph, in the style of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! The frontier is ordered by a priority key fixed at push time (step cost
//! plus heuristic estimate); exact priority ties are broken by push order so
//! that repeated searches of the same grid yield the same path.

use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

/// One frontier occupant. `priority` conflates the step cost with the
/// heuristic estimate recorded when the holder was pushed; `cost` is the raw
/// step cost at that same moment. Ordering uses `priority` only, while
/// best-cost comparisons during expansion use `cost`, never `priority`.
struct FrontierHolder<K> {
    priority: K,
    cost: K,
    seq: usize,
    index: usize,
}

impl<K: PartialEq> Eq for FrontierHolder<K> {}

impl<K: PartialEq> PartialEq for FrontierHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.priority.eq(&other.priority) && self.seq == other.seq
    }
}

impl<K: Ord> PartialOrd for FrontierHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for FrontierHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest priority; equal
        // priorities pop in push order, first pushed first.
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

/// Arena entry for a discovered node: lowest step cost found so far, arena
/// index of the predecessor it was reached from (`usize::MAX` for the seed)
/// and whether the node has already been expanded. Predecessor links always
/// point at earlier arena entries, forming a tree.
struct NodeEntry<K> {
    parent: usize,
    best_cost: K,
    expanded: bool,
}

fn reverse_path<N, V, F>(nodes: &FxIndexMap<N, V>, mut parent: F, goal: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(goal, |i| {
        nodes.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until `success` holds for an extracted node,
/// returning the node sequence from `start` to the goal and its step cost,
/// or [None] once the frontier runs dry.
///
/// `successors` yields reachable neighbours with their move costs; nodes that
/// have already been expanded are filtered here and a neighbour is only
/// (re)pushed when it is reached strictly cheaper than before. A node can
/// therefore sit in the frontier several times with different costs; whichever
/// holder is extracted first wins and later ones expand to nothing.
pub fn best_first_search<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut frontier = BinaryHeap::new();
    let mut seq: usize = 0;
    frontier.push(FrontierHolder {
        priority: Zero::zero(),
        cost: Zero::zero(),
        seq,
        index: 0,
    });
    let mut nodes: FxIndexMap<N, NodeEntry<C>> = FxIndexMap::default();
    nodes.insert(
        start.clone(),
        NodeEntry {
            parent: usize::MAX,
            best_cost: Zero::zero(),
            expanded: false,
        },
    );
    while let Some(FrontierHolder { cost, index, .. }) = frontier.pop() {
        let successor_list = {
            let (node, _) = nodes.get_index(index).unwrap();
            if success(node) {
                let path = reverse_path(&nodes, |e| e.parent, index);
                return Some((path, cost));
            }
            successors(node)
        };
        nodes.get_index_mut(index).unwrap().1.expanded = true;
        for (successor, move_cost) in successor_list {
            // The extracted holder's own cost feeds the new cost, not the
            // table's. A stale holder computes costs its neighbours already
            // beat, so re-expanding it pushes nothing.
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match nodes.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(NodeEntry {
                        parent: index,
                        best_cost: new_cost,
                        expanded: false,
                    });
                }
                Occupied(mut e) => {
                    if e.get().expanded || e.get().best_cost <= new_cost {
                        continue;
                    }
                    h = heuristic(e.key());
                    n = e.index();
                    let entry = e.get_mut();
                    entry.parent = index;
                    entry.best_cost = new_cost;
                }
            }

            seq += 1;
            frontier.push(FrontierHolder {
                priority: new_cost + h,
                cost: new_cost,
                seq,
                index: n,
            });
        }
    }
    None
}
