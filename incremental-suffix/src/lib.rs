//! Lexicographic order of all suffixes of a sequence that grows and shrinks at
//! its front.
//!
//! Every suffix carries a floating-point [`Rank`]. A prepended suffix is placed
//! by comparing its first symbol and then the already known rank of its tail, so
//! each comparison is O(1). It receives the midpoint of its neighbours' ranks;
//! when the midpoint is no longer representable all ranks are respread in O(n).

mod error;
mod node;
mod window;

use std::fmt;

use log::{debug, trace};
use ordered_set::OrderedSet;
use window::Window;

pub use error::{Error, Result};
pub use node::{Rank, SuffixNode};
pub use suffix_array::{LcpArray, SuffixArray};

#[derive(Clone)]
pub struct IncrementalSuffixArray<T> {
    window: Window<T>,
    /// absolute indices of the live suffixes, in rank order
    order: OrderedSet<isize>,
    min_rank: Rank,
    max_rank: Rank,
    rebalances: usize,
}

impl<T> IncrementalSuffixArray<T> {
    /// Empty structure holding at most `capacity` symbols.
    pub fn new(capacity: usize) -> Self {
        Self {
            window: Window::new(capacity),
            order: OrderedSet::new(),
            min_rank: Rank::BASELINE,
            max_rank: Rank::BASELINE,
            rebalances: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Number of global rank rebalances performed so far.
    pub fn rebalances(&self) -> usize {
        self.rebalances
    }

    /// Symbol at `offset` from the front.
    pub fn symbol(&self, offset: usize) -> Option<&T> {
        let index = self.window.begin().checked_add_unsigned(offset)?;
        self.window.get(index).map(|node| &node.symbol)
    }

    /// Window contents, front to back.
    pub fn symbols(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.window.iter().map(|node| &node.symbol)
    }

    /// Live suffixes in lexicographic order.
    pub fn suffixes(&self) -> impl DoubleEndedIterator<Item = &SuffixNode<T>> + '_ {
        self.order.iter().filter_map(move |&q| self.window.get(q))
    }

    /// Removes the front symbol.
    pub fn delete_first(&mut self) -> Result<T> {
        let front = self.window.front().ok_or(Error::EmptyStructure)?;
        let (index, rank) = (front.index, front.rank);

        let window = &self.window;
        let removed = self
            .order
            .remove_by(|&q: &isize| Some(rank).cmp(&window.rank(q)));
        debug_assert_eq!(removed, Some(index));

        let node = self.window.pop_front()?;
        if rank == self.min_rank {
            self.min_rank = self.first_rank().unwrap_or(Rank::BASELINE);
        }
        if rank == self.max_rank {
            self.max_rank = self.last_rank().unwrap_or(Rank::BASELINE);
        }
        trace!("delete_first: index {index}, rank {rank}");
        Ok(node.symbol)
    }

    /// `sa[k]` is the offset from the front of the k-th smallest suffix.
    pub fn suffix_array(&self) -> SuffixArray {
        let begin = self.window.begin();
        SuffixArray::from_vec(
            self.order
                .iter()
                .map(|&index| (index - begin) as usize)
                .collect(),
        )
    }

    pub fn suffix_array_inverse(&self) -> Vec<usize> {
        self.suffix_array().inverse()
    }

    fn first_rank(&self) -> Option<Rank> {
        self.order.first().and_then(|&q| self.window.rank(q))
    }

    fn last_rank(&self) -> Option<Rank> {
        self.order.last().and_then(|&q| self.window.rank(q))
    }

    /// Relabels every live suffix with evenly bisected ranks, keeping their order.
    fn rebalance(&mut self) {
        let ranks = Rank::spread(self.order.len());
        for (&index, &rank) in self.order.iter().zip(&ranks) {
            self.window.set_rank(index, rank);
        }
        if let (Some(&min), Some(&max)) = (ranks.first(), ranks.last()) {
            self.min_rank = min;
            self.max_rank = max;
        }
        self.rebalances += 1;
        debug!(
            "rebalanced {} suffix ranks into [{}, {}]",
            ranks.len(),
            self.min_rank,
            self.max_rank
        );
    }
}

impl<T: Ord> IncrementalSuffixArray<T> {
    /// Prepends the symbols of `sequence` from last to first.
    pub fn from_sequence<I>(sequence: I, capacity: usize) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut this = Self::new(capacity);
        for symbol in sequence.into_iter().rev() {
            this.prepend(symbol)?;
        }
        Ok(this)
    }

    pub fn prepend(&mut self, symbol: T) -> Result<()> {
        // the real rank is assigned once the neighbours are known
        let index = self.window.push_front(symbol, Rank::BASELINE)?;

        let window = &self.window;
        let mut cmp = |&q: &isize| window.compare_by_tail(index, q);
        let prev = self.order.prev_by(&mut cmp).and_then(|&q| window.rank(q));
        let next = self.order.next_by(&mut cmp).and_then(|&q| window.rank(q));
        let inserted = self.order.insert_by(index, cmp);
        debug_assert!(inserted);

        let rank = match (prev, next) {
            (None, None) => Some(self.max_rank),
            (None, Some(_)) => self.min_rank.pred(),
            (Some(_), None) => self.max_rank.succ(),
            (Some(lo), Some(hi)) => Rank::between(lo, hi),
        };
        match rank {
            Some(rank) => {
                self.window.set_rank(index, rank);
                if prev.is_none() {
                    self.min_rank = rank;
                }
                if next.is_none() {
                    self.max_rank = rank;
                }
                trace!("prepend: index {index}, rank {rank}");
            }
            None => {
                trace!("prepend: index {index}, rank collision");
                self.rebalance();
            }
        }
        Ok(())
    }
}

impl<T: Eq> IncrementalSuffixArray<T> {
    /// Kasai's algorithm over the current window.
    pub fn lcp_array(&self) -> LcpArray {
        let text = self.symbols().collect::<Vec<_>>();
        self.suffix_array().lcp_array(&text)
    }

    pub fn count_distinct_substrings(&self) -> u64 {
        let text = self.symbols().collect::<Vec<_>>();
        let sa = self.suffix_array();
        let lcp = sa.lcp_array(&text);
        sa.count_distinct_substrings(&lcp)
    }
}

impl<T: fmt::Debug> IncrementalSuffixArray<T> {
    /// One line per suffix in rank order: its offset, a tab, then its symbols.
    pub fn debug_print(&self) -> String {
        let begin = self.window.begin();
        let mut out = String::new();
        for &index in &self.order {
            let suffix = self.window.suffix(index).collect::<Vec<_>>();
            out.push_str(&format!("{}\t{:?}\n", index - begin, suffix));
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for IncrementalSuffixArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let begin = self.window.begin();
        f.debug_map()
            .entries(self.order.iter().map(|&index| {
                (
                    index - begin,
                    self.window.suffix(index).collect::<Vec<_>>(),
                )
            }))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<T: Ord> IncrementalSuffixArray<T> {
        fn assert_invariants(&self) {
            let ranks = self
                .order
                .iter()
                .map(|&q| self.window.rank(q).unwrap())
                .collect::<Vec<_>>();
            assert_eq!(ranks.len(), self.len());
            assert!(ranks.windows(2).all(|w| w[0] < w[1]));
            if let (Some(&min), Some(&max)) = (ranks.first(), ranks.last()) {
                assert_eq!(self.min_rank, min);
                assert_eq!(self.max_rank, max);
            }
            let text = self.symbols().collect::<Vec<_>>();
            assert_eq!(self.suffix_array(), SuffixArray::new_simple(&text));
        }
    }

    #[test]
    fn banana() {
        let tree = IncrementalSuffixArray::from_sequence("banana".chars(), 100_000).unwrap();
        tree.assert_invariants();
        assert_eq!(tree.len(), 6);
        assert_eq!(&*tree.suffix_array(), &[5, 3, 1, 0, 4, 2]);
        assert_eq!(&*tree.lcp_array(), &[0, 1, 3, 0, 0, 2]);
        assert_eq!(tree.count_distinct_substrings(), 15);
    }

    #[test]
    fn repeated_symbol() {
        let tree = IncrementalSuffixArray::from_sequence("aaa".chars(), 3).unwrap();
        tree.assert_invariants();
        assert_eq!(&*tree.suffix_array(), &[2, 1, 0]);
        assert_eq!(&*tree.lcp_array(), &[0, 1, 2]);
        assert_eq!(tree.count_distinct_substrings(), 3);
    }

    #[test]
    fn integer_sequence() {
        let tree = IncrementalSuffixArray::from_sequence([1, 2, 3, 4], 100).unwrap();
        assert_eq!(tree.count_distinct_substrings(), 10);
        let tree = IncrementalSuffixArray::from_sequence(vec![3, 1, 3, 1, 2], 5).unwrap();
        tree.assert_invariants();
        assert_eq!(&*tree.suffix_array(), &[3, 1, 4, 2, 0]);
    }

    #[test]
    fn inverse_round_trip() {
        let tree = IncrementalSuffixArray::from_sequence("mississippi".bytes(), 11).unwrap();
        let sa = tree.suffix_array();
        let inv = tree.suffix_array_inverse();
        for k in 0..sa.len() {
            assert_eq!(inv[sa[k]], k);
        }
    }

    #[test]
    fn delete_then_prepend() {
        let mut tree = IncrementalSuffixArray::from_sequence("abc".chars(), 3).unwrap();
        assert_eq!(tree.delete_first(), Ok('a'));
        tree.assert_invariants();
        assert_eq!(tree.symbols().collect::<String>(), "bc");
        tree.prepend('x').unwrap();
        tree.assert_invariants();
        assert_eq!(tree.symbols().collect::<String>(), "xbc");
        assert_eq!(tree.suffix_array(), SuffixArray::new_simple(b"xbc"));
        assert_eq!(&*tree.suffix_array(), &[1, 2, 0]);
    }

    #[test]
    fn capacity_boundary() {
        let mut tree = IncrementalSuffixArray::from_sequence("cab".chars(), 3).unwrap();
        let sa = tree.suffix_array();
        let lcp = tree.lcp_array();
        assert_eq!(
            tree.prepend('z'),
            Err(Error::CapacityExceeded { capacity: 3 })
        );
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.suffix_array(), sa);
        assert_eq!(tree.lcp_array(), lcp);
        tree.assert_invariants();

        assert_eq!(
            IncrementalSuffixArray::from_sequence("abcd".chars(), 3).unwrap_err(),
            Error::CapacityExceeded { capacity: 3 }
        );

        let mut tree = IncrementalSuffixArray::<char>::new(2);
        assert_eq!(tree.delete_first(), Err(Error::EmptyStructure));
        tree.prepend('a').unwrap();
        assert_eq!(tree.delete_first(), Ok('a'));
        assert_eq!(tree.delete_first(), Err(Error::EmptyStructure));
        assert!(tree.is_empty());
        assert!(tree.suffix_array().is_empty());
        assert_eq!(tree.count_distinct_substrings(), 0);
    }

    #[test]
    fn empty_then_refill() {
        let mut tree = IncrementalSuffixArray::new(4);
        for _ in 0..3 {
            for c in "dcba".chars() {
                tree.prepend(c).unwrap();
                tree.assert_invariants();
            }
            while tree.delete_first().is_ok() {
                tree.assert_invariants();
            }
            assert_eq!(tree.min_rank, Rank::BASELINE);
            assert_eq!(tree.max_rank, Rank::BASELINE);
        }
    }

    #[test]
    fn rank_collision_triggers_rebalance() {
        // every other prepend lands just below the suffix "b"
        let text = "ab".repeat(200);
        let mut tree = IncrementalSuffixArray::new(text.len());
        for c in text.chars().rev() {
            let before = tree.order.iter().copied().collect::<Vec<_>>();
            let rebalances = tree.rebalances();
            tree.prepend(c).unwrap();
            if tree.rebalances() > rebalances {
                let after = tree
                    .order
                    .iter()
                    .copied()
                    .filter(|&q| q != tree.window.begin())
                    .collect::<Vec<_>>();
                assert_eq!(before, after);
            }
            assert!(tree
                .order
                .iter()
                .map(|&q| tree.window.rank(q).unwrap())
                .collect::<Vec<_>>()
                .windows(2)
                .all(|w| w[0] < w[1]));
        }
        assert!(tree.rebalances() > 0);
        tree.assert_invariants();
        let bytes = text.as_bytes();
        let sa = SuffixArray::new_simple(bytes);
        assert_eq!(
            tree.count_distinct_substrings(),
            sa.count_distinct_substrings(&sa.lcp_array(bytes))
        );
    }

    #[test]
    fn debug_print_lists_suffixes_in_order() {
        let tree = IncrementalSuffixArray::from_sequence("aba".chars(), 3).unwrap();
        assert_eq!(
            tree.debug_print(),
            "2\t['a']\n0\t['a', 'b', 'a']\n1\t['b', 'a']\n"
        );
        assert_eq!(
            format!("{tree:?}"),
            "{2: ['a'], 0: ['a', 'b', 'a'], 1: ['b', 'a']}"
        );
    }

    #[test]
    fn suffixes_carry_increasing_ranks() {
        let tree = IncrementalSuffixArray::from_sequence("cabca".chars(), 5).unwrap();
        let begin = tree.window.begin();
        let offsets = tree
            .suffixes()
            .map(|node| (node.index - begin) as usize)
            .collect::<Vec<_>>();
        assert_eq!(offsets, tree.suffix_array().into_vec());
        let ranks = tree.suffixes().map(|node| node.rank).collect::<Vec<_>>();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(tree.suffixes().next_back().map(|node| node.symbol), Some('c'));
    }

    #[test]
    fn symbol_by_offset() {
        let mut tree = IncrementalSuffixArray::from_sequence("xyz".chars(), 5).unwrap();
        assert_eq!(tree.symbol(0), Some(&'x'));
        assert_eq!(tree.symbol(2), Some(&'z'));
        assert_eq!(tree.symbol(3), None);
        tree.delete_first().unwrap();
        assert_eq!(tree.symbol(0), Some(&'y'));
    }
}
