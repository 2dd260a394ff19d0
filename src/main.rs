use rangetree::RangeTree;

fn main() {
    let mut sums = RangeTree::sum([1, 2, 3, 4, 5, 6]).expect("six leaves");
    println!("sum tree:  {}", sums);
    println!("  [0, 2] = {:?}", sums.query(0, 2));
    println!("  [3, 5] = {:?}", sums.query(3, 5));
    println!("  [0, 5] = {:?}", sums.query(0, 5));

    sums.update(2, 10).expect("leaf 2 exists");
    println!("after leaf 2 = 10: {}", sums);
    println!("  [0, 2] = {:?}", sums.query(0, 2));
    println!("  [0, 5] = {:?}", sums.query(0, 5));

    let mut mins = RangeTree::min([5, 3, 8, 1, 9, 2]).expect("six leaves");
    println!("\nmin tree:  {}", mins);
    println!("  [0, 5] = {:?}", mins.query(0, 5));

    mins.update(3, 100).expect("leaf 3 exists");
    println!("after leaf 3 = 100: {}", mins);
    println!("  [0, 5] = {:?}", mins.query(0, 5));

    println!("\nrejected: {:?}", mins.query(0, 6));
    println!("rejected: {:?}", mins.update(6, 0));
}
