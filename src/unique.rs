//! The structural unique table used by one reduction pass.
//!
//! Maps the structural key of a decision node, `(variable, low, high)` with
//! children already reduced, to the identity of the node built for that key.
//! Because children are canonicalized before the parent's key is computed,
//! identity-equality of children implies structural equality of the subtrees
//! they root, which makes the key a valid canonical fingerprint.
//!
//! A table is created fresh for each top-level `reduce` call and shared
//! across all recursive invocations of that call. It is never shared between
//! reductions.

use std::cmp::min;

use crate::node::{Node, NodeId};
use crate::utils::MyHash;

struct Entry {
    node: Node,
    id: NodeId,
    /// Index of the next entry in the same bucket (0 = end of chain).
    next: usize,
}

pub(crate) struct UniqueTable {
    /// Chained entries; index 0 is a sentry so that 0 can mean "no entry".
    entries: Vec<Entry>,
    buckets: Vec<usize>,
    bitmask: u64,
}

impl UniqueTable {
    /// Create a new table with `2^bits` buckets.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bucket bits should be in the range 0..=31");

        let buckets_size = 1 << bits;
        let buckets = vec![0; buckets_size];
        let bitmask = (buckets_size - 1) as u64;

        let sentry = Entry {
            node: Node::Terminal(false),
            id: NodeId::ZERO,
            next: 0,
        };

        Self {
            entries: vec![sentry],
            buckets,
            bitmask,
        }
    }

    /// Create a table sized for reducing a tree of `n` nodes.
    pub fn with_capacity_for(n: usize) -> Self {
        let bits = min(16, n.next_power_of_two().trailing_zeros() as usize);
        Self::new(bits)
    }

    /// The number of interned nodes.
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    fn bucket_index(&self, node: &Node) -> usize {
        (node.hash() & self.bitmask) as usize
    }

    /// Look up `node` and return the identity interned for it, or intern the
    /// identity produced by `make` if the key is new.
    pub fn put_with<F>(&mut self, node: Node, make: F) -> NodeId
    where
        F: FnOnce() -> NodeId,
    {
        let bucket_index = self.bucket_index(&node);
        let mut index = self.buckets[bucket_index];

        if index == 0 {
            // Create new entry and put it into the bucket.
            let i = self.add(node, make());
            self.buckets[bucket_index] = i;
            return self.entries[i].id;
        }

        loop {
            assert!(index > 0);

            if node == self.entries[index].node {
                // The node already exists.
                return self.entries[index].id;
            }

            let next = self.entries[index].next;

            if next == 0 {
                // Create new entry and append it to the bucket.
                let i = self.add(node, make());
                self.entries[index].next = i;
                return self.entries[i].id;
            } else {
                // Go to the next entry in the bucket.
                index = next;
            }
        }
    }

    fn add(&mut self, node: Node, id: NodeId) -> usize {
        let index = self.entries.len();
        self.entries.push(Entry { node, id, next: 0 });
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Var;

    fn decision(variable: u32, low: usize, high: usize) -> Node {
        Node::Decision {
            variable: Var::new(variable),
            low: NodeId::new(low),
            high: NodeId::new(high),
        }
    }

    #[test]
    fn test_put_interns_once() {
        let mut table = UniqueTable::new(4);
        let a = table.put_with(decision(0, 0, 1), || NodeId::new(2));
        let b = table.put_with(decision(0, 0, 1), || panic!("must not be called"));
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_put_distinguishes_keys() {
        let mut table = UniqueTable::new(4);
        let a = table.put_with(decision(0, 0, 1), || NodeId::new(2));
        let b = table.put_with(decision(1, 0, 1), || NodeId::new(3));
        let c = table.put_with(decision(0, 1, 0), || NodeId::new(4));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_put_chains_on_bucket_collision() {
        // A single bucket forces every entry into one chain.
        let mut table = UniqueTable::new(0);
        let mut ids = Vec::new();
        for i in 0..16 {
            ids.push(table.put_with(decision(i, 0, 1), || NodeId::new(2 + i as usize)));
        }
        for (i, &id) in ids.iter().enumerate() {
            let again =
                table.put_with(decision(i as u32, 0, 1), || panic!("must not be called"));
            assert_eq!(id, again);
        }
        assert_eq!(table.len(), 16);
    }
}
