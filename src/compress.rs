
//! Compress and expand complete byte streams.
//!
//! A compressed stream consists of the serialized Huffman tree,
//! the number of original bytes as a 32-bit integer,
//! and the codes of all original bytes. Bits are packed most significant bit first,
//! and the last byte is padded with zeroes.

use crate::code::CodeTable;
use crate::error::{usize_to_u32, Error, Result, UnitResult};
use crate::frequency::FrequencyTable;
use crate::io::{BitReader, BitWriter, Read, Write};
use crate::tree::{HuffmanTree, Node};
use crate::trie;

/// Expanded bytes are allocated in steps of at most this size,
/// such that a damaged length field cannot allocate gigabytes up front.
const OUTPUT_SOFT_MAX: usize = 8 * 1024 * 1024;

/// The symbol of the placeholder tree written for empty input.
const EMPTY_INPUT_SYMBOL: u8 = 0;


/// Sizes of one compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {

    /// Number of uncompressed bytes.
    pub original_bytes: u64,

    /// Number of leaves in the tree.
    pub distinct_symbols: usize,

    /// Number of bits of the serialized tree.
    pub header_bits: u64,

    /// Number of bits of all codes, excluding tree, length and padding.
    pub payload_bits: u64,

    /// Total size of the stream, including padding.
    pub compressed_bytes: u64,
}

impl Summary {

    /// Compressed size divided by original size.
    /// Returns `None` for empty input.
    pub fn ratio(&self) -> Option<f64> {
        if self.original_bytes == 0 { None }
        else { Some(self.compressed_bytes as f64 / self.original_bytes as f64) }
    }
}


/// Compress the input and write the stream.
/// The last byte is padded with zeroes and the writer is flushed.
pub fn compress(input: &[u8], write: impl Write) -> Result<Summary> {
    let length = usize_to_u32(input.len())?;
    let mut writer = BitWriter::new(write);

    let frequencies = FrequencyTable::from_bytes(input);

    let summary = match HuffmanTree::from_frequencies(&frequencies) {
        None => {
            // a length of zero means the expander never descends the tree
            let placeholder = HuffmanTree::from_root(Node::leaf(EMPTY_INPUT_SYMBOL, 0));
            trie::write_tree(&placeholder, &mut writer)?;
            let header_bits = writer.bit_count();

            writer.write_u32(length)?;
            summarize(&writer, 0, 0, header_bits)
        },

        Some(tree) => {
            let codes = tree.code_table();
            debug_assert!(codes.iter().all(|(_, code)| !code.is_empty()));

            trie::write_tree(&tree, &mut writer)?;
            let header_bits = writer.bit_count();

            writer.write_u32(length)?;
            write_codes(input, &codes, &mut writer)?;

            summarize(&writer, input.len(), tree.leaf_count(), header_bits)
        }
    };

    writer.close()?;

    tracing::debug!(
        original_bytes = summary.original_bytes,
        compressed_bytes = summary.compressed_bytes,
        distinct_symbols = summary.distinct_symbols,
        "compressed"
    );

    Ok(summary)
}

fn write_codes(input: &[u8], codes: &CodeTable, writer: &mut BitWriter<impl Write>) -> UnitResult {
    for &byte in input {
        let code = codes.get(byte)
            .ok_or_else(|| Error::invalid("symbol missing from huffman tree"))?;

        code.write(writer)?;
    }

    Ok(())
}

fn summarize(writer: &BitWriter<impl Write>, original_bytes: usize, distinct_symbols: usize, header_bits: u64) -> Summary {
    let total_bits = writer.bit_count();

    Summary {
        original_bytes: original_bytes as u64,
        distinct_symbols,
        header_bits,
        payload_bits: total_bits - header_bits - 32,
        compressed_bytes: (total_bits + 7) / 8,
    }
}

/// Read the whole input into memory, then compress it.
pub fn compress_read(mut read: impl Read, write: impl Write) -> Result<Summary> {
    let mut input = Vec::new();
    read.read_to_end(&mut input)?;
    compress(&input, write)
}

/// Compress the input into a new byte vector.
pub fn compress_bytes(input: &[u8]) -> Result<Vec<u8>> {
    let mut compressed = Vec::with_capacity(input.len() / 2 + 64);
    compress(input, &mut compressed)?;
    Ok(compressed)
}


/// Read a compressed stream and write the original bytes.
/// Returns the number of bytes written.
pub fn expand(read: impl Read, mut write: impl Write) -> Result<usize> {
    let mut reader = BitReader::new(read);
    let output = expand_from(&mut reader)?;

    write.write_all(&output)?;
    write.flush()?;

    if has_trailing_bytes(&mut reader) {
        tracing::debug!("ignoring trailing bytes after the compressed stream");
    }

    Ok(output.len())
}

/// Whether whole bytes follow the padding of the last code.
fn has_trailing_bytes(reader: &mut BitReader<impl Read>) -> bool {
    reader.skip_padding();
    !reader.is_exhausted()
}

/// Expand a compressed stream into a new byte vector.
pub fn expand_bytes(compressed: &[u8]) -> Result<Vec<u8>> {
    expand_from(&mut BitReader::new(compressed))
}

fn expand_from(reader: &mut BitReader<impl Read>) -> Result<Vec<u8>> {
    let tree = trie::read_tree(reader)?;
    let length = reader.read_u32()? as usize;

    if length != 0 && tree.root().is_leaf() {
        return Err(Error::invalid("single leaf tree cannot encode any bytes"));
    }

    let mut output = Vec::with_capacity(length.min(OUTPUT_SOFT_MAX));

    for _ in 0 .. length {
        output.push(decode_symbol(tree.root(), reader)?);
    }

    tracing::debug!(
        expanded_bytes = output.len(),
        distinct_symbols = tree.leaf_count(),
        "expanded"
    );

    Ok(output)
}

/// Descend from the root, left on `0` and right on `1`, until a leaf is reached.
#[inline]
fn decode_symbol(root: &Node, reader: &mut BitReader<impl Read>) -> Result<u8> {
    let mut node = root;

    loop {
        match node {
            Node::Leaf { symbol, .. } => return Ok(*symbol),
            Node::Internal { left, right, .. } => {
                node = if reader.read_bit()? { &**right } else { &**left };
            }
        }
    }
}
