use incremental_suffix::IncrementalSuffixArray;
use proconio::{input, marker::Bytes};

fn main() {
    env_logger::init();
    input! {
        s: Bytes,
    }
    let tree = IncrementalSuffixArray::from_sequence(s.iter().copied(), s.len()).unwrap();
    let sa = tree.suffix_array();
    let out = sa
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{out}");
}
