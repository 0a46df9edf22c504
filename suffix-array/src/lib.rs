use std::ops::Deref;

/// Starting offsets of the suffixes of a text, in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuffixArray {
    data: Vec<usize>,
}

/// `lcp[k]` is the length of the longest common prefix of the suffixes at
/// `sa[k - 1]` and `sa[k]`; `lcp[0] == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LcpArray {
    data: Vec<usize>,
}

impl Deref for SuffixArray {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl Deref for LcpArray {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl SuffixArray {
    /// O(n^2 log n). Reference construction by sorting the suffixes themselves.
    pub fn new_simple<T: Ord>(text: &[T]) -> Self {
        let mut data = (0..text.len()).collect::<Vec<_>>();
        data.sort_unstable_by(|&i, &j| text[i..].cmp(&text[j..]));
        Self { data }
    }

    /// `data` must be a permutation of `0..data.len()`.
    pub fn from_vec(data: Vec<usize>) -> Self {
        debug_assert!({
            let mut seen = vec![false; data.len()];
            data.iter()
                .all(|&i| i < seen.len() && !std::mem::replace(&mut seen[i], true))
        });
        Self { data }
    }

    /// `inv[sa[k]] == k`
    pub fn inverse(&self) -> Vec<usize> {
        let mut inv = vec![0; self.data.len()];
        for (k, &i) in self.data.iter().enumerate() {
            inv[i] = k;
        }
        inv
    }

    /// Kasai's algorithm, O(n).
    ///
    /// Walks the suffixes in text order. The common prefix with the
    /// lexicographic predecessor shrinks by at most one from one suffix to the
    /// next, so `l` only ever restarts from `l - 1`.
    pub fn lcp_array<T: Eq>(&self, text: &[T]) -> LcpArray {
        let n = self.data.len();
        assert_eq!(
            text.len(),
            n,
            "text of length {} does not match suffix array of length {n}",
            text.len()
        );
        let inv = self.inverse();
        let mut lcp = vec![0; n];
        let mut l = 0usize;
        for (j, &k) in inv.iter().enumerate() {
            l = l.saturating_sub(1);
            if k == 0 {
                l = 0;
                continue;
            }
            let prev = self.data[k - 1];
            while j + l < n && prev + l < n && text[j + l] == text[prev + l] {
                l += 1;
            }
            lcp[k] = l;
        }
        LcpArray { data: lcp }
    }

    /// Sum over all suffixes of the prefixes not shared with the lexicographic predecessor.
    pub fn count_distinct_substrings(&self, lcp: &LcpArray) -> u64 {
        let n = self.data.len();
        assert_eq!(lcp.len(), n, "lcp array does not match suffix array");
        self.data
            .iter()
            .zip(lcp.iter())
            .map(|(&i, &l)| (n - i - l) as u64)
            .sum()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.data
    }
}

impl LcpArray {
    pub fn into_vec(self) -> Vec<usize> {
        self.data
    }
}
