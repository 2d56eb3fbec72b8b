// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-first nearest-neighbor traversal.
//!
//! Nodes are queued by the squared distance from the query to their bounds, which
//! never exceeds the distance to any point inside them. Points are queued by
//! their exact squared distance. Since the queue always yields its minimum, a
//! point is popped only once nothing still queued can hold a closer one, so points
//! come out in ascending distance order.

use alloc::vec::Vec;

use glam::Vec3;

use crate::node::{Kind, Node};
use crate::queue::PriorityQueue;

enum Candidate<'a> {
    Node(&'a Node),
    Point(Vec3),
}

/// Collect up to `k` points closest to `query`, nearest first.
///
/// With `max_distance_sq` set, anything whose key is not strictly below it is
/// never queued, so every result lies strictly inside that radius.
pub(crate) fn best_first(
    root: &Node,
    query: Vec3,
    k: usize,
    max_distance_sq: Option<f32>,
) -> Vec<Vec3> {
    let admits = |d: f32| max_distance_sq.is_none_or(|m| d < m);
    let mut out = Vec::new();
    if k == 0 {
        return out;
    }
    let Some(root_bounds) = root.bounds() else {
        return out;
    };
    let d = root_bounds.distance_squared(query);
    if !admits(d) {
        return out;
    }

    let mut queue = PriorityQueue::new();
    queue.push(Candidate::Node(root), d);
    while out.len() < k {
        let Some((candidate, _)) = queue.pop() else {
            break;
        };
        match candidate {
            Candidate::Point(p) => out.push(p),
            Candidate::Node(node) => match &node.kind {
                Kind::Leaf(points) => {
                    for &p in points {
                        let d = p.distance_squared(query);
                        if admits(d) {
                            queue.push(Candidate::Point(p), d);
                        }
                    }
                }
                Kind::Internal { children, .. } => {
                    for child in children.iter() {
                        let Some(b) = child.bounds() else {
                            continue;
                        };
                        let d = b.distance_squared(query);
                        if admits(d) {
                            queue.push(Candidate::Node(child), d);
                        }
                    }
                }
            },
        }
    }
    out
}
