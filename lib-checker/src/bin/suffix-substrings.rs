use std::io::{BufWriter, Write};

use incremental_suffix::IncrementalSuffixArray;
use proconio::{input, marker::Bytes};

// distinct-substring count of s[i..] for i = n-1, ..., 0
fn main() {
    env_logger::init();
    input! {
        s: Bytes,
    }
    let mut tree = IncrementalSuffixArray::new(s.len());
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for &c in s.iter().rev() {
        tree.prepend(c).unwrap();
        writeln!(out, "{}", tree.count_distinct_substrings()).unwrap();
    }
    log::debug!("{} rebalances for {} prepends", tree.rebalances(), s.len());
}
