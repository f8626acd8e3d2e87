//! Huffman tree construction.
//!
//! Leaves are queued in the frequency map's symbol order. The two lowest
//! priority nodes are merged until one remains; equal priorities are
//! resolved by queue insertion order, so the same map always produces the
//! same tree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyMap;

/// A node of the construction tree.
///
/// Leaves carry a symbol; internal nodes carry none. Every internal node
/// built by merging has two children. The only exception is the synthetic
/// root of a single-symbol tree, which has just a left child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildNode {
    pub symbol: Option<char>,
    /// Summed frequency of the subtree
    pub priority: u64,
    pub left: Option<Box<BuildNode>>,
    pub right: Option<Box<BuildNode>>,
}

impl BuildNode {
    /// Create a leaf.
    pub fn leaf(symbol: char, priority: u64) -> Self {
        Self {
            symbol: Some(symbol),
            priority,
            left: None,
            right: None,
        }
    }

    /// Merge two nodes; `left` was extracted first.
    pub fn merge(left: BuildNode, right: BuildNode) -> Self {
        Self {
            symbol: None,
            priority: left.priority + right.priority,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }
}

/// A node waiting in the priority queue.
#[derive(Debug)]
struct QueuedNode {
    node: BuildNode,
    /// Insertion sequence number, for stable tie-breaking
    seq: u64,
}

// Implement ordering for the heap (min-heap: lowest priority first, then
// earliest insertion)
impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.node.priority == other.node.priority && self.seq == other.seq
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap pops the smallest key
        (other.node.priority, other.seq).cmp(&(self.node.priority, self.seq))
    }
}

/// Stable min-priority queue of build nodes.
#[derive(Debug, Default)]
struct NodeQueue {
    heap: BinaryHeap<QueuedNode>,
    next_seq: u64,
}

impl NodeQueue {
    fn push(&mut self, node: BuildNode) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueuedNode { node, seq });
    }

    fn pop(&mut self) -> Option<BuildNode> {
        self.heap.pop().map(|queued| queued.node)
    }
}

/// A Huffman tree whose leaves are exactly the symbols of a frequency map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: BuildNode,
}

impl HuffmanTree {
    /// Build a tree from a non-empty frequency map.
    ///
    /// # Errors
    /// `HuffmanError::EmptyFrequencyTable` if the map has no symbols.
    pub fn build(frequencies: &FrequencyMap) -> Result<Self> {
        let mut queue = NodeQueue::default();
        for (symbol, count) in frequencies.iter() {
            queue.push(BuildNode::leaf(symbol, count));
        }

        let mut root = loop {
            let first = queue.pop().ok_or(HuffmanError::EmptyFrequencyTable)?;
            match queue.pop() {
                Some(second) => queue.push(BuildNode::merge(first, second)),
                None => break first,
            }
        };

        // A lone leaf still needs a one-bit code
        if root.is_leaf() {
            root = BuildNode {
                symbol: None,
                priority: root.priority,
                left: Some(Box::new(root)),
                right: None,
            };
        }

        debug!(
            symbols = frequencies.len(),
            weight = root.priority,
            "built huffman tree"
        );
        Ok(Self { root })
    }

    pub fn root(&self) -> &BuildNode {
        &self.root
    }

    /// Total weight (sum of all symbol frequencies).
    pub fn weight(&self) -> u64 {
        self.root.priority
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                count += 1;
            }
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        count
    }
}
