//! Topology algorithms over an edge list.
//!
//! Both functions derive their adjacency and in-degree from the edges they
//! are given. Nothing is cached between calls.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::{GraphError, GraphResult};
use crate::id::NodeId;

use super::Edge;

/// Successors of every node, in edge insertion order.
fn successors(edges: &[Edge]) -> BTreeMap<NodeId, Vec<NodeId>> {
    let mut successors: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for edge in edges {
        successors.entry(edge.from.node).or_default().push(edge.to.node);
    }
    successors
}

/// Nodes reachable from `root` along outgoing edges, root included.
pub fn breadth_first(root: NodeId, edges: &[Edge]) -> BTreeSet<NodeId> {
    let successors = successors(edges);
    let mut visited = BTreeSet::from([root]);
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        for &next in successors.get(&node).into_iter().flatten() {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Order `nodes` so that every edge between them points forward.
///
/// Kahn's algorithm. Zero in-degree nodes are seeded in ascending id order
/// and successors are released in edge insertion order, so the result is
/// deterministic. Edges with an endpoint outside `nodes` are ignored.
///
/// # Errors
///
/// Returns [`GraphError::NotAcyclic`] if any node keeps a non-zero
/// in-degree once the queue is empty.
pub fn topological_sort(nodes: &BTreeSet<NodeId>, edges: &[Edge]) -> GraphResult<Vec<NodeId>> {
    let edges: Vec<Edge> = edges
        .iter()
        .filter(|e| nodes.contains(&e.from.node) && nodes.contains(&e.to.node))
        .copied()
        .collect();
    let successors = successors(&edges);

    let mut in_degree: BTreeMap<NodeId, usize> = nodes.iter().map(|&id| (id, 0)).collect();
    for edge in &edges {
        *in_degree.entry(edge.to.node).or_default() += 1;
    }

    let mut queue: VecDeque<NodeId> = in_degree
        .iter()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &next in successors.get(&node).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(&next) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    if in_degree.values().any(|&degree| degree > 0) {
        return Err(GraphError::NotAcyclic);
    }
    Ok(order)
}
