
//! Maps each symbol to its bit sequence, derived from a Huffman tree.

use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use crate::error::UnitResult;
use crate::frequency::FrequencyTable;
use crate::io::{BitWriter, Write};
use crate::tree::{HuffmanTree, Node};
use crate::ALPHABET_SIZE;


/// The bits of a single code, in the order they are written.
/// Most codes are short enough to never allocate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    bits: SmallVec<[bool; 24]>,
}

impl Code {

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Whether `other` starts with all bits of this code.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// Append all bits to the stream.
    #[inline]
    pub fn write(&self, writer: &mut BitWriter<impl Write>) -> UnitResult {
        for &bit in &self.bits {
            writer.write_bit(bit)?;
        }

        Ok(())
    }
}

impl Display for Code {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            formatter.write_str(if bit { "1" } else { "0" })?;
        }

        Ok(())
    }
}


/// The code of every symbol present in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {

    /// Walk the tree, appending `0` for left and `1` for right,
    /// and record the path to every leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; ALPHABET_SIZE];
        let mut prefix = Code::default();
        collect_codes(tree.root(), &mut prefix, &mut codes);
        CodeTable { codes }
    }

    /// The code of the symbol, or `None` if the tree has no leaf for it.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[usize::from(symbol)].as_ref()
    }

    /// All symbols with their code, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        (0 ..= u8::MAX).zip(&self.codes)
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol, code)))
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bits needed to encode an input with these frequencies.
    /// Symbols without a code are not counted.
    pub fn encoded_bit_count(&self, frequencies: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| frequencies.count(symbol) * code.len() as u64)
            .sum()
    }

    /// Whether no code starts with another complete code.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.iter().map(|(_, code)| code).collect();

        codes.iter().enumerate().all(|(index, code)| {
            codes.iter().enumerate()
                .all(|(other_index, other)| index == other_index || !code.is_prefix_of(other))
        })
    }
}

fn collect_codes(node: &Node, prefix: &mut Code, codes: &mut [Option<Code>]) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes[usize::from(*symbol)] = Some(prefix.clone());
        },

        Node::Internal { left, right, .. } => {
            prefix.bits.push(false);
            collect_codes(left, prefix, codes);
            prefix.bits.pop();

            prefix.bits.push(true);
            collect_codes(right, prefix, codes);
            prefix.bits.pop();
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn code_string(table: &CodeTable, symbol: u8) -> String {
        table.get(symbol).unwrap().to_string()
    }

    #[test]
    fn aaabbc(){
        let table = HuffmanTree::from_bytes(b"AAABBC").unwrap().code_table();

        assert_eq!(table.len(), 3);
        assert_eq!(code_string(&table, b'A'), "0");
        assert_eq!(code_string(&table, b'C'), "10");
        assert_eq!(code_string(&table, b'B'), "11");
        assert_eq!(table.get(b'D'), None);
        assert!(table.is_prefix_free());

        let frequencies = FrequencyTable::from_bytes(b"AAABBC");
        assert_eq!(table.encoded_bit_count(&frequencies), 3 + 2*2 + 2);
    }

    #[test]
    fn single_symbol_codes_have_one_bit(){
        let table = HuffmanTree::from_bytes(&[ 65; 1000 ]).unwrap().code_table();

        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert_eq!(code_string(&table, 0), "0");
        assert_eq!(code_string(&table, 65), "1");
    }

    #[test]
    fn full_alphabet_codes_are_bytes(){
        let bytes: Vec<u8> = (0 ..= u8::MAX).collect();
        let table = HuffmanTree::from_bytes(&bytes).unwrap().code_table();

        assert_eq!(table.len(), ALPHABET_SIZE);
        assert!(table.iter().all(|(_, code)| code.len() == 8));
        assert!(table.is_prefix_free());
    }

    #[test]
    fn skewed_frequencies_are_prefix_free(){
        // fibonacci weights produce the deepest possible trees
        let mut bytes = Vec::new();
        let (mut previous, mut current) = (1_usize, 1_usize);
        for symbol in 0 .. 20_u8 {
            bytes.extend(std::iter::repeat(symbol).take(current));
            let next = previous + current;
            previous = current;
            current = next;
        }

        let tree = HuffmanTree::from_bytes(&bytes).unwrap();
        let table = tree.code_table();

        assert_eq!(tree.depth(), 19);
        assert!(table.is_prefix_free());
        assert!(table.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn prefix_detection(){
        let table = HuffmanTree::from_bytes(b"AAABBC").unwrap().code_table();
        let a = table.get(b'A').unwrap();
        let b = table.get(b'B').unwrap();
        let c = table.get(b'C').unwrap();

        assert!(a.is_prefix_of(a));
        assert!(!a.is_prefix_of(b));
        assert!(!b.is_prefix_of(c));
    }

    #[test]
    fn codes_are_written_in_order(){
        let table = HuffmanTree::from_bytes(b"AAABBC").unwrap().code_table();
        let mut writer = BitWriter::new(Vec::new());

        for &byte in b"ACB" {
            table.get(byte).unwrap().write(&mut writer).unwrap();
        }

        assert_eq!(writer.bit_count(), 5);
        assert_eq!(writer.close().unwrap(), vec![ 0b0101_1000 ]);
    }
}
