
//! The Huffman tree: a strict binary tree whose leaves hold byte values.
//! Going left appends a `0` bit to a code, going right appends a `1` bit.

use crate::frequency::FrequencyTable;
use crate::queue::{PriorityQueue, Weighted};
use crate::code::CodeTable;
use crate::ALPHABET_SIZE;


/// A node of the Huffman tree.
/// Internal nodes always have exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {

    /// Holds one symbol. Weight is its frequency,
    /// or zero if the tree was read from a compressed stream.
    Leaf { symbol: u8, weight: u64 },

    /// Holds the sum of the weights of both children.
    Internal { weight: u64, left: Box<Node>, right: Box<Node> },
}

impl Node {

    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new parent, `left` taking the `0` branch.
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest path from this node down to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Append all symbols of this subtree, left to right.
    fn collect_symbols(&self, symbols: &mut Vec<u8>) {
        match self {
            Node::Leaf { symbol, .. } => symbols.push(*symbol),
            Node::Internal { left, right, .. } => {
                left.collect_symbols(symbols);
                right.collect_symbols(symbols);
            }
        }
    }
}

impl Weighted for Node {
    fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }
}


/// A complete Huffman tree, owning all of its nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {

    /// Wrap an already built root node.
    pub fn from_root(root: Node) -> Self {
        HuffmanTree { root }
    }

    /// Build the tree by repeatedly merging the two lightest subtrees.
    /// Returns `None` if no symbol occurs at all.
    ///
    /// If only a single symbol occurs, a second leaf with weight zero
    /// is added for an unused symbol, such that every code has at least one bit.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Self> {
        let mut queue = PriorityQueue::with_capacity(ALPHABET_SIZE);

        for (symbol, count) in frequencies.used_symbols() {
            queue.insert(Node::leaf(symbol, count));
        }

        if queue.is_empty() {
            return None;
        }

        if queue.len() == 1 {
            let unused = if frequencies.count(0) == 0 { 0 } else { 1 };
            queue.insert(Node::leaf(unused, 0));
        }

        while queue.len() > 1 {
            let left = queue.extract_min().expect("queue holds at least two nodes");
            let right = queue.extract_min().expect("queue holds at least two nodes");
            queue.insert(Node::merge(left, right));
        }

        let root = queue.extract_min().expect("queue holds the root");
        debug_assert!(queue.is_empty());

        let tree = HuffmanTree { root };
        tracing::trace!(leaves = tree.leaf_count(), depth = tree.depth(), "built huffman tree");
        Some(tree)
    }

    /// Count the bytes and build the tree for them.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Sum of the weights of all leaves.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// All symbols of the leaves, left to right.
    pub fn symbols(&self) -> Vec<u8> {
        let mut symbols = Vec::with_capacity(ALPHABET_SIZE);
        self.root.collect_symbols(&mut symbols);
        symbols
    }

    /// Derive the bit sequence of every leaf.
    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }
}
