//! Operation stream decoded from raw fuzzer bytes.

/// Longest tree the fuzz model builds.
pub const MAX_LEAVES: usize = 64;

/// One step against a tree of `len` leaves. Positions are fractions of
/// `len` in 256ths so every byte string decodes to in-range operations,
/// except `OutOfRange`, which is meant to be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Replace one leaf.
    Update { pos_frac: u8, seed: u8 },
    /// Fold an inclusive range.
    Query { start_frac: u8, end_frac: u8 },
    /// Replace a run of leaves in one batch.
    Batch { pos_frac: u8, count: u8, seed: u8 },
    /// Write or read past the end; must fail without changing the tree.
    OutOfRange { past: u8 },
}

/// Map a 256ths fraction onto `0..len`.
pub fn scale(frac: u8, len: usize) -> usize {
    return (frac as usize * len / 256).min(len.saturating_sub(1));
}

impl Op {
    pub fn from_bytes(bytes: &[u8]) -> Option<(Op, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 4;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 2 => {
                let op = Op::Update {
                    pos_frac: rest[0],
                    seed: rest[1],
                };
                Some((op, &rest[2..]))
            }
            1 if rest.len() >= 2 => {
                let op = Op::Query {
                    start_frac: rest[0],
                    end_frac: rest[1],
                };
                Some((op, &rest[2..]))
            }
            2 if rest.len() >= 3 => {
                let op = Op::Batch {
                    pos_frac: rest[0],
                    count: (rest[1] % 8).saturating_add(1), // 1-8 leaves
                    seed: rest[2],
                };
                Some((op, &rest[3..]))
            }
            3 if !rest.is_empty() => Some((Op::OutOfRange { past: rest[0] % 4 }, &rest[1..])),
            _ => None,
        }
    }
}

/// Leaf count and leaf seeds for the initial tree: the first byte picks
/// the length, the following bytes (if any) seed the leaves.
pub fn initial(bytes: &[u8]) -> (usize, &[u8]) {
    match bytes.split_first() {
        Some((&first, rest)) => (1 + first as usize % MAX_LEAVES, rest),
        None => (1, bytes),
    }
}
