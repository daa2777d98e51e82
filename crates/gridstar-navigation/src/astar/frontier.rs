//! The OPEN set of the search: a min-heap of cell indices keyed by `f_score`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct FrontierEntry {
    pub(crate) f_score: u64,
    /// Insertion order; earlier entries win ties.
    pub(crate) seq: u64,
    /// Linear index of the cell in the grid.
    pub(crate) index: usize,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FrontierEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FrontierEntry {{ f_score: {}, seq: {}, index: {} }}",
            self.f_score, self.seq, self.index
        )
    }
}

/// Frontier owned by a single search run.
///
/// Improving a queued cell pushes a second entry instead of re-keying the old
/// one; the engine discards superseded entries when they surface.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, index: usize, f_score: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            f_score,
            seq,
            index,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lowest_score_first() {
        let mut frontier = Frontier::new();
        frontier.push(0, 42);
        frontier.push(1, 7);
        frontier.push(2, 19);

        let order: Vec<usize> = std::iter::from_fn(|| frontier.pop())
            .map(|e| e.index)
            .collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_are_fifo() {
        let mut frontier = Frontier::new();
        frontier.push(5, 34);
        frontier.push(3, 34);
        frontier.push(9, 34);
        frontier.push(1, 50);

        assert_eq!(frontier.len(), 4);
        assert_eq!(frontier.pop().map(|e| e.index), Some(5));
        assert_eq!(frontier.pop().map(|e| e.index), Some(3));
        assert_eq!(frontier.pop().map(|e| e.index), Some(9));
        assert_eq!(frontier.pop().map(|e| e.index), Some(1));
        assert_eq!(frontier.pop(), None);
    }
}
