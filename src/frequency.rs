
//! Counts how often each byte value occurs in the input.

use crate::ALPHABET_SIZE;


/// Number of occurrences of every possible byte value.
/// The sum of all counts equals the length of the counted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {

    /// Count all bytes of the input. An empty input yields all-zero counts.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut counts = [0_u64; ALPHABET_SIZE];

        for &byte in bytes {
            counts[usize::from(byte)] += 1;
        }

        FrequencyTable { counts }
    }

    /// How often the symbol occurred.
    #[inline]
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[usize::from(symbol)]
    }

    /// Number of counted bytes.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of symbols that occurred at least once.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count != 0).count()
    }

    /// All symbols with a non-zero count, in ascending symbol order.
    pub fn used_symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0 ..= u8::MAX)
            .map(move |symbol| (symbol, self.count(symbol)))
            .filter(|&(_, count)| count != 0)
    }

    /// The smallest symbol that did not occur, if any.
    pub fn first_unused_symbol(&self) -> Option<u8> {
        (0 ..= u8::MAX).find(|&symbol| self.count(symbol) == 0)
    }
}
