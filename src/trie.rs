
//! Writes and reads the shape of a Huffman tree,
//! so that an expander can rebuild it without knowing any frequencies.
//!
//! The tree is written in pre-order. A leaf is a `1` bit followed by its eight symbol bits.
//! An internal node is a `0` bit followed by its left and then its right subtree.

use crate::error::{Error, Result, UnitResult};
use crate::io::{BitReader, BitWriter, Read, Write};
use crate::tree::{HuffmanTree, Node};
use crate::ALPHABET_SIZE;

const LEAF: bool = true;
const INTERNAL: bool = false;


/// Append the tree shape and its symbols to the stream.
pub fn write_tree(tree: &HuffmanTree, writer: &mut BitWriter<impl Write>) -> UnitResult {
    write_node(tree.root(), writer)
}

fn write_node(node: &Node, writer: &mut BitWriter<impl Write>) -> UnitResult {
    match node {
        Node::Leaf { symbol, .. } => {
            writer.write_bit(LEAF)?;
            writer.write_u8(*symbol)
        },

        Node::Internal { left, right, .. } => {
            writer.write_bit(INTERNAL)?;
            write_node(left, writer)?;
            write_node(right, writer)
        }
    }
}

/// Number of bits `write_tree` produces for this tree.
pub fn tree_bit_count(tree: &HuffmanTree) -> u64 {
    let leaves = tree.leaf_count() as u64;
    let internal_nodes = leaves - 1;
    leaves * (1 + 8) + internal_nodes
}


/// Rebuild a tree from the stream. All weights are zero.
///
/// A valid tree has at most one leaf per symbol,
/// so deeper or larger trees are rejected before they can exhaust the stack.
pub fn read_tree(reader: &mut BitReader<impl Read>) -> Result<HuffmanTree> {
    let mut leaf_count = 0;
    let root = read_node(reader, 0, &mut leaf_count)?;
    Ok(HuffmanTree::from_root(root))
}

fn read_node(reader: &mut BitReader<impl Read>, depth: usize, leaf_count: &mut usize) -> Result<Node> {
    if depth >= ALPHABET_SIZE {
        return Err(Error::invalid("huffman tree too deep"));
    }

    if reader.read_bit()? == LEAF {
        *leaf_count += 1;

        if *leaf_count > ALPHABET_SIZE {
            return Err(Error::invalid("huffman tree has too many leaves"));
        }

        Ok(Node::leaf(reader.read_u8()?, 0))
    }
    else {
        let left = read_node(reader, depth + 1, leaf_count)?;
        let right = read_node(reader, depth + 1, leaf_count)?;
        Ok(Node::merge(left, right))
    }
}
