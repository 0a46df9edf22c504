use std::{cmp::Ordering, fmt};

/// Order label of a suffix. Only the relative order of ranks is meaningful.
#[derive(Clone, Copy, Debug)]
pub struct Rank(f64);

impl Rank {
    /// Rank given to the only suffix of a window that was empty.
    pub const BASELINE: Self = Self(10.0);
    /// Smallest rank handed out by a rebalance.
    pub const LOWEST: Self = Self(-((1u64 << 50) as f64));
    /// Largest rank handed out by a rebalance.
    pub const HIGHEST: Self = Self((1u64 << 50) as f64);

    pub const fn get(self) -> f64 {
        self.0
    }

    /// `None` once unit steps are no longer representable.
    pub(crate) fn pred(self) -> Option<Self> {
        let r = self.0 - 1.0;
        (r != self.0).then_some(Self(r))
    }

    pub(crate) fn succ(self) -> Option<Self> {
        let r = self.0 + 1.0;
        (r != self.0).then_some(Self(r))
    }

    /// Midpoint of `lo` and `hi`, or `None` if it collides with either end.
    pub(crate) fn between(lo: Self, hi: Self) -> Option<Self> {
        let mid = Self::midpoint(lo, hi);
        (mid.0 != lo.0 && mid.0 != hi.0).then_some(mid)
    }

    pub(crate) fn midpoint(lo: Self, hi: Self) -> Self {
        Self(lo.0 / 2.0 + hi.0 / 2.0)
    }

    /// `n` strictly increasing ranks from `LOWEST` to `HIGHEST`, each inner one
    /// the midpoint of the two ends of the range it bisects.
    pub(crate) fn spread(n: usize) -> Vec<Self> {
        fn bisect(ranks: &mut [Rank], i: usize, j: usize) {
            if j - i > 1 {
                let m = (i + j) / 2;
                ranks[m] = Rank::midpoint(ranks[i], ranks[j]);
                bisect(ranks, i, m);
                bisect(ranks, m, j);
            }
        }

        match n {
            0 => vec![],
            1 => vec![Self::BASELINE],
            _ => {
                let mut ranks = vec![Self::LOWEST; n];
                ranks[n - 1] = Self::HIGHEST;
                bisect(&mut ranks, 0, n - 1);
                ranks
            }
        }
    }
}

impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rank {}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One active suffix: `index` is the absolute position its symbol is stored at.
#[derive(Clone, Debug)]
pub struct SuffixNode<T> {
    pub symbol: T,
    pub index: isize,
    pub rank: Rank,
}
