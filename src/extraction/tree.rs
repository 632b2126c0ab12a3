//! Trust-guided BFS tree over the filtered n-gram graph.
//!
//! From one root, breadth-first traversal claims every reachable node once.
//! At each dequeue the out-neighbors are sorted by descending trust (ties by
//! label) before they are claimed, so the highest-trust successor becomes
//! the first child and gets to claim shared descendants before its siblings.
//!
//! ```text
//!            "the cat"                 root
//!            /       \
//!      "cat sat"   "cat ran"           children in trust order
//!         |
//!     "sat down"                       leaf
//! ```
//!
//! Every root-to-leaf path decodes back into text by taking the first token
//! of each n-gram plus the trailing tokens of the last one:
//! `["the cat", "cat sat", "sat down"]` → `"the cat sat down"`.

use std::collections::VecDeque;
use std::sync::Arc;

use petgraph::graph::NodeIndex;
use petgraph::visit::{VisitMap, Visitable};

use crate::graph::WordGraph;
use crate::types::{by_score_desc, score_of, RankScores};

/// One node of the tree arena.
#[derive(Debug, Clone)]
struct TreeNode {
    label: Arc<str>,
    depth: usize,
    /// Arena indices, in discovery order
    children: Vec<usize>,
}

/// BFS spanning tree rooted at a single n-gram.
///
/// Nodes live in an arena (`nodes[0]` is the root); the visited set used
/// during construction is a bitset over graph node indices. The tree is
/// read-only once built.
#[derive(Debug, Clone)]
pub struct ExtractionTree {
    nodes: Vec<TreeNode>,
}

impl ExtractionTree {
    /// Build the tree for `root`.
    ///
    /// `max_depth` bounds how many edges a path may follow from the root.
    /// A root that is absent from `graph` yields a single-node tree.
    pub fn build(
        graph: &WordGraph,
        trust: &RankScores,
        root: &str,
        max_depth: Option<usize>,
    ) -> Self {
        let mut nodes = vec![TreeNode {
            label: graph
                .index_of(root)
                .and_then(|idx| graph.label(idx).cloned())
                .unwrap_or_else(|| Arc::from(root)),
            depth: 0,
            children: Vec::new(),
        }];

        let Some(root_idx) = graph.index_of(root) else {
            tracing::debug!(root, "root not in filtered graph, single-node tree");
            return Self { nodes };
        };

        let mut visited = graph.inner().visit_map();
        visited.visit(root_idx);

        let mut frontier: VecDeque<(usize, NodeIndex)> = VecDeque::new();
        frontier.push_back((0, root_idx));

        while let Some((slot, current)) = frontier.pop_front() {
            let depth = nodes[slot].depth;
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }

            let mut candidates: Vec<(NodeIndex, &Arc<str>)> = graph
                .out_edges(current)
                .into_iter()
                .filter_map(|(target, _)| graph.label(target).map(|label| (target, label)))
                .collect();
            candidates.sort_by(|a, b| {
                by_score_desc(
                    (a.1.as_ref(), score_of(trust, a.1)),
                    (b.1.as_ref(), score_of(trust, b.1)),
                )
            });

            for (target, label) in candidates {
                // visit() is false when already claimed
                if !visited.visit(target) {
                    continue;
                }
                let child = nodes.len();
                nodes.push(TreeNode {
                    label: Arc::clone(label),
                    depth: depth + 1,
                    children: Vec::new(),
                });
                nodes[slot].children.push(child);
                frontier.push_back((child, target));
            }
        }

        Self { nodes }
    }

    pub fn root(&self) -> &Arc<str> {
        &self.nodes[0].label
    }

    /// Number of nodes in the tree, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Parent label -> child labels, for every node that has children.
    /// Parents appear in discovery order.
    pub fn child_map(&self) -> Vec<(Arc<str>, Vec<Arc<str>>)> {
        self.nodes
            .iter()
            .filter(|node| !node.children.is_empty())
            .map(|node| {
                let children = node
                    .children
                    .iter()
                    .map(|&c| Arc::clone(&self.nodes[c].label))
                    .collect();
                (Arc::clone(&node.label), children)
            })
            .collect()
    }

    /// Every root-to-leaf path, depth-first off a stack.
    ///
    /// Children are pushed in discovery order and popped last-first, so the
    /// last child's subtree is emitted before its earlier siblings.
    pub fn paths(&self) -> Vec<Vec<Arc<str>>> {
        let mut paths = Vec::new();
        let mut stack: Vec<(usize, Vec<usize>)> = vec![(0, vec![0])];

        while let Some((slot, path)) = stack.pop() {
            let children = &self.nodes[slot].children;
            if children.is_empty() {
                paths.push(
                    path.iter()
                        .map(|&i| Arc::clone(&self.nodes[i].label))
                        .collect(),
                );
                continue;
            }
            // Pushed in discovery order, so the last child's leaves come first
            for &child in children {
                let mut next = path.clone();
                next.push(child);
                stack.push((child, next));
            }
        }

        paths
    }

    /// Decoded text of every root-to-leaf path, in [`Self::paths`] order.
    pub fn texts(&self) -> Vec<String> {
        self.paths()
            .iter()
            .map(|path| decode_path(path.as_slice()))
            .collect()
    }
}

/// Reassemble the word sequence covered by a chain of overlapping n-grams.
///
/// Takes the first token of every n-gram, then the remaining tokens of the
/// last one.
pub fn decode_path<S: AsRef<str>>(path: &[S]) -> String {
    let mut words: Vec<&str> = path
        .iter()
        .filter_map(|gram| gram.as_ref().split_whitespace().next())
        .collect();

    if let Some(last) = path.last() {
        words.extend(last.as_ref().split_whitespace().skip(1));
    }

    words.join(" ")
}
