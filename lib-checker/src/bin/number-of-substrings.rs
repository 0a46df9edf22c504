use incremental_suffix::IncrementalSuffixArray;
use proconio::{input, marker::Bytes};

fn main() {
    env_logger::init();
    input! {
        s: Bytes,
    }
    let tree = IncrementalSuffixArray::from_sequence(s.iter().copied(), s.len()).unwrap();
    println!("{}", tree.count_distinct_substrings());
}
