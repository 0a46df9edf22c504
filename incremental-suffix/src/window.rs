use std::cmp::Ordering;

use crate::{
    error::{Error, Result},
    node::{Rank, SuffixNode},
};

/// Circular storage for the live symbols.
///
/// Live absolute indices are `begin..=end`. `end` stays put; `begin` moves down
/// on every prepend and back up on every delete, so indices may be negative.
#[derive(Clone, Debug)]
pub(crate) struct Window<T> {
    slots: Box<[Option<SuffixNode<T>>]>,
    max_len: usize,
    begin: isize,
    end: isize,
}

impl<T> Window<T> {
    pub fn new(max_len: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(2 * max_len).collect(),
            max_len,
            begin: 0,
            end: -1,
        }
    }

    pub fn len(&self) -> usize {
        (self.end - self.begin + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.begin > self.end
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.max_len
    }

    pub fn capacity(&self) -> usize {
        self.max_len
    }

    pub fn begin(&self) -> isize {
        self.begin
    }

    /// `index mod slots.len()` in `0..slots.len()`, for negative `index` too.
    /// The buffer must be non-empty.
    fn slot(&self, index: isize) -> usize {
        index.rem_euclid(self.slots.len() as isize) as usize
    }

    pub fn contains(&self, index: isize) -> bool {
        self.begin <= index && index <= self.end
    }

    /// `None` outside `begin..=end`.
    pub fn get(&self, index: isize) -> Option<&SuffixNode<T>> {
        if !self.contains(index) {
            return None;
        }
        self.slots[self.slot(index)].as_ref()
    }

    fn get_mut(&mut self, index: isize) -> Option<&mut SuffixNode<T>> {
        if !self.contains(index) {
            return None;
        }
        let slot = self.slot(index);
        self.slots[slot].as_mut()
    }

    pub fn rank(&self, index: isize) -> Option<Rank> {
        self.get(index).map(|node| node.rank)
    }

    pub fn set_rank(&mut self, index: isize, rank: Rank) {
        if let Some(node) = self.get_mut(index) {
            node.rank = rank;
        }
    }

    pub fn front(&self) -> Option<&SuffixNode<T>> {
        self.get(self.begin)
    }

    pub fn push_front(&mut self, symbol: T, rank: Rank) -> Result<isize> {
        if self.is_full() {
            return Err(Error::CapacityExceeded {
                capacity: self.max_len,
            });
        }
        let index = self.begin - 1;
        let slot = self.slot(index);
        self.slots[slot] = Some(SuffixNode {
            symbol,
            index,
            rank,
        });
        self.begin = index;
        Ok(index)
    }

    pub fn pop_front(&mut self) -> Result<SuffixNode<T>> {
        if self.is_empty() {
            return Err(Error::EmptyStructure);
        }
        let slot = self.slot(self.begin);
        let node = self.slots[slot].take().ok_or(Error::EmptyStructure)?;
        self.begin += 1;
        Ok(node)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SuffixNode<T>> + '_ {
        (self.begin..=self.end).filter_map(move |index| self.get(index))
    }

    /// Symbols of the suffix starting at `index`.
    pub fn suffix(&self, index: isize) -> impl Iterator<Item = &T> + '_ {
        (index.max(self.begin)..=self.end)
            .filter_map(move |i| self.get(i).map(|node| &node.symbol))
    }
}

impl<T: Ord> Window<T> {
    /// Orders the suffixes at `a` and `b` by their first symbol and then by the
    /// ranks of the suffixes at `a + 1` and `b + 1`. Only those two tail ranks are
    /// read, so `a`'s own rank may still be unassigned. A position outside the
    /// window is an exhausted suffix and sorts first.
    pub fn compare_by_tail(&self, a: isize, b: isize) -> Ordering {
        let symbol = |i| self.get(i).map(|node| &node.symbol);
        symbol(a)
            .cmp(&symbol(b))
            .then_with(|| self.rank(a + 1).cmp(&self.rank(b + 1)))
    }
}
