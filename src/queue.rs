
//! Min-ordered priority queue of weighted items.

use std::cmp::Ordering;
use std::collections::BinaryHeap;


/// Anything that can be ordered by a numeric weight.
pub trait Weighted {
    fn weight(&self) -> u64;
}

/// Item with its insertion sequence, used for the min heap.
/// Equal weights are resolved by insertion order, which keeps trees deterministic.
#[derive(Debug)]
struct Entry<T> {
    weight: u64,
    sequence: u64,
    item: T,
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // inverted, because `BinaryHeap` pops the largest element first
        other.weight.cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}


/// Always returns the item with the smallest weight first.
/// Among items with equal weight, the one inserted first is returned first.
#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_sequence: u64,
}

impl<T: Weighted> PriorityQueue<T> {

    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue { heap: BinaryHeap::with_capacity(capacity), next_sequence: 0 }
    }

    pub fn insert(&mut self, item: T) {
        let entry = Entry { weight: item.weight(), sequence: self.next_sequence, item };
        self.next_sequence += 1;
        self.heap.push(entry);
    }

    /// Remove the lightest item, or return `None` if the queue is empty.
    pub fn extract_min(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Weighted> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    #[derive(Debug, PartialEq)]
    struct Item(u64, &'static str);

    impl Weighted for Item {
        fn weight(&self) -> u64 { self.0 }
    }

    impl Weighted for u64 {
        fn weight(&self) -> u64 { *self }
    }

    #[test]
    fn extracts_in_ascending_weight(){
        let mut queue = PriorityQueue::new();
        for weight in [ 5_u64, 1, 4, 2, 3 ] {
            queue.insert(weight);
        }

        assert_eq!(queue.len(), 5);

        let extracted: Vec<u64> = std::iter::from_fn(|| queue.extract_min()).collect();
        assert_eq!(extracted, vec![ 1, 2, 3, 4, 5 ]);
        assert!(queue.is_empty());
        assert_eq!(queue.extract_min(), None);
    }

    #[test]
    fn equal_weights_keep_insertion_order(){
        let mut queue = PriorityQueue::new();
        queue.insert(Item(2, "first"));
        queue.insert(Item(1, "lightest"));
        queue.insert(Item(2, "second"));
        queue.insert(Item(2, "third"));

        assert_eq!(queue.extract_min(), Some(Item(1, "lightest")));
        assert_eq!(queue.extract_min(), Some(Item(2, "first")));
        assert_eq!(queue.extract_min(), Some(Item(2, "second")));
        assert_eq!(queue.extract_min(), Some(Item(2, "third")));
    }

    #[test]
    fn random_weights_come_out_sorted(){
        let mut random = StdRng::seed_from_u64(7);
        let mut queue = PriorityQueue::with_capacity(1000);

        let mut weights: Vec<u64> = (0 .. 1000).map(|_| random.gen_range(0 .. 64)).collect();
        for &weight in &weights {
            queue.insert(weight);
        }

        weights.sort_unstable();
        let extracted: Vec<u64> = std::iter::from_fn(|| queue.extract_min()).collect();
        assert_eq!(extracted, weights);
    }
}
