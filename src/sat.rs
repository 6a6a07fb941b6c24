//! Model queries over diagrams: one satisfying assignment, model counting.

use std::collections::HashMap;

use num_bigint::{BigUint, ToBigUint};

use crate::bdd::Bdd;
use crate::node::{Node, NodeId};
use crate::types::Var;

impl Bdd {
    /// Returns one satisfying path for a **reduced** diagram, if any exists.
    ///
    /// The path is returned as `(variable, value)` pairs for the variables
    /// tested along it; variables the function does not depend on are absent
    /// and may take either value. Returns `None` for the constant-false
    /// diagram.
    ///
    /// The greedy branch choice relies on the reduction invariant that any
    /// child other than the canonical `false` terminal is satisfiable, so
    /// this is only meaningful after [`Bdd::reduce`].
    pub fn one_sat(&self, root: NodeId) -> Option<Vec<(Var, bool)>> {
        let mut path = Vec::new();
        let mut current = root;

        loop {
            match self.node(current) {
                Node::Terminal(value) => return value.then_some(path),
                Node::Decision {
                    variable,
                    low,
                    high,
                } => {
                    // Prefer the high branch if satisfiable, otherwise take low.
                    if high != NodeId::ZERO {
                        path.push((variable, true));
                        current = high;
                    } else {
                        path.push((variable, false));
                        current = low;
                    }
                }
            }
        }
    }

    /// Counts the satisfying assignments of the diagram, out of `2^k` for
    /// the manager's `k` variables.
    ///
    /// Works on both full trees and reduced diagrams: every decision level
    /// halves the weight of its children, and a skipped variable simply
    /// never halves, which accounts for its free choice.
    pub fn sat_count(&self, root: NodeId) -> BigUint {
        let mut cache = HashMap::new();
        let two = 2.to_biguint().unwrap();
        let max = two.pow(self.order().len() as u32);
        self.sat_count_rec(root, &max, &mut cache)
    }

    fn sat_count_rec(
        &self,
        id: NodeId,
        max: &BigUint,
        cache: &mut HashMap<NodeId, BigUint>,
    ) -> BigUint {
        match self.node(id) {
            Node::Terminal(false) => BigUint::ZERO,
            Node::Terminal(true) => max.clone(),
            Node::Decision { low, high, .. } => {
                if let Some(count) = cache.get(&id) {
                    return count.clone();
                }

                let count_low = self.sat_count_rec(low, max, cache);
                let count_high = self.sat_count_rec(high, max, cache);
                let count: BigUint = (count_low + count_high) >> 1;

                cache.insert(id, count.clone());
                count
            }
        }
    }
}
