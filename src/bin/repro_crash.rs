//! Reproduce AFL crashes without AFL instrumentation
//!
//! Usage: cargo run --features fuzzing --bin repro_crash -- <crash_file>

use std::fs;

use rangetree::RangeTree;
use reference::affine::compose;
use reference::ops::{self, Op};
use reference::{Affine, RecursiveTree};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <crash_file>", args[0]);
        std::process::exit(1);
    }

    let data = match fs::read(&args[1]) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read {}: {}", args[1], err);
            std::process::exit(1);
        }
    };
    eprintln!("Input: {} bytes", data.len());
    eprintln!("Hex: {}", data.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" "));

    let (len, mut remaining) = ops::initial(&data);
    let leaves: Vec<Affine> = (0..len).map(|i| Affine::from_seed(i as u64)).collect();
    let mut tree = RangeTree::build(leaves.clone(), Affine::IDENTITY, compose).unwrap();
    let mut model = RecursiveTree::new(leaves, Affine::IDENTITY, compose);
    eprintln!("Built tree with {} leaves, {} nodes", tree.len(), tree.node_count());

    let mut op_num = 0;
    while let Some((op, rest)) = Op::from_bytes(remaining) {
        remaining = rest;
        op_num += 1;

        match op {
            Op::Update { pos_frac, seed } => {
                let index = ops::scale(pos_frac, len);
                let value = Affine::from_seed(seed as u64);
                eprintln!("Op {}: update leaf {} -> {:?}", op_num, index, value);
                let result = tree.update(index, value);
                model.update(index, value);
                eprintln!("  Result: {:?}, root now {:?}", result, tree.root());
            }
            Op::Query { start_frac, end_frac } => {
                let a = ops::scale(start_frac, len);
                let b = ops::scale(end_frac, len);
                let (start, end) = (a.min(b), a.max(b));
                let got = tree.query(start, end);
                let want = model.query(start, end);
                eprintln!("Op {}: query [{}, {}]", op_num, start, end);
                eprintln!("  Tree:      {:?}", got);
                eprintln!("  Reference: {:?}", want);
                if got != Ok(want) {
                    eprintln!("  MISMATCH");
                }
            }
            Op::Batch { pos_frac, count, seed } => {
                let first = ops::scale(pos_frac, len);
                let last = (first + count as usize).min(len);
                let writes: Vec<(usize, Affine)> = (first..last)
                    .map(|i| (i, Affine::from_seed(seed as u64 + i as u64)))
                    .collect();
                eprintln!("Op {}: batch of {} writes at {}..{}", op_num, writes.len(), first, last);
                let result = tree.update_many(writes.clone());
                for (index, value) in writes {
                    model.update(index, value);
                }
                eprintln!("  Result: {:?}", result);
            }
            Op::OutOfRange { past } => {
                let index = len + past as usize;
                eprintln!("Op {}: out of range write at {}", op_num, index);
                eprintln!("  Update: {:?}", tree.update(index, Affine::IDENTITY));
                eprintln!("  Query:  {:?}", tree.query(0, index));
            }
        }

        if !tree.is_consistent() {
            eprintln!("  Tree invariant broken!");
        }
    }

    eprintln!("\nFinal full fold: {:?}", tree.query(0, len - 1));
    eprintln!("Reference full fold: {:?}", model.query(0, len - 1));
}
