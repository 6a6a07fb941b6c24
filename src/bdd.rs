//! The diagram manager and the core algorithms.
//!
//! [`Bdd`] owns the variable order and an arena of [`Node`]s addressed by
//! stable [`NodeId`] indices. All diagrams, both the full trees produced by
//! [`Bdd::build`] and the canonical forms produced by [`Bdd::reduce`], live in
//! the same arena; sharing is simply multiple parents holding the same
//! `NodeId`. Nodes are never mutated or removed after creation.
//!
//! The two canonical terminals are allocated up front ([`NodeId::ZERO`] and
//! [`NodeId::ONE`]) and shared by every diagram the reducer produces.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt::Debug;

use log::debug;

use crate::node::{Node, NodeId};
use crate::oracle::Oracle;
use crate::types::Var;
use crate::unique::UniqueTable;
use crate::variables::{Assignment, VariableOrder};

pub struct Bdd {
    order: VariableOrder,
    nodes: RefCell<Vec<Node>>,
}

impl Bdd {
    /// Creates a manager for the given variable order.
    pub fn new(order: VariableOrder) -> Self {
        let nodes = vec![Node::Terminal(false), Node::Terminal(true)];
        Self {
            order,
            nodes: RefCell::new(nodes),
        }
    }

    /// The variable order this manager was created with.
    pub fn order(&self) -> &VariableOrder {
        &self.order
    }

    /// The canonical `false` terminal.
    pub fn zero(&self) -> NodeId {
        NodeId::ZERO
    }

    /// The canonical `true` terminal.
    pub fn one(&self) -> NodeId {
        NodeId::ONE
    }

    /// The total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// The node behind the given handle.
    pub fn node(&self, id: NodeId) -> Node {
        self.nodes.borrow()[id.index()]
    }

    /// Checks if the node is a terminal.
    pub fn is_terminal(&self, id: NodeId) -> bool {
        self.node(id).is_terminal()
    }

    /// The constant held by a terminal, or `None` for a decision node.
    pub fn terminal_value(&self, id: NodeId) -> Option<bool> {
        match self.node(id) {
            Node::Terminal(value) => Some(value),
            Node::Decision { .. } => None,
        }
    }

    /// The variable tested by a decision node, or `None` for a terminal.
    pub fn variable(&self, id: NodeId) -> Option<Var> {
        match self.node(id) {
            Node::Terminal(_) => None,
            Node::Decision { variable, .. } => Some(variable),
        }
    }

    /// The `low` (variable = false) child of a decision node.
    pub fn low(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id) {
            Node::Terminal(_) => None,
            Node::Decision { low, .. } => Some(low),
        }
    }

    /// The `high` (variable = true) child of a decision node.
    pub fn high(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id) {
            Node::Terminal(_) => None,
            Node::Decision { high, .. } => Some(high),
        }
    }

    fn alloc(&self, node: Node) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId::new(nodes.len());
        nodes.push(node);
        debug!("alloc {} = {:?}", id, node);
        id
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bdd")
            .field("variables", &self.order.len())
            .field("nodes", &self.node_count())
            .finish()
    }
}

impl Bdd {
    /// Builds the full (non-reduced) decision tree of the oracle's function.
    ///
    /// The tree has depth `k` (the number of variables in the order), one
    /// fresh leaf per complete assignment and no sharing: `2^k` terminal
    /// leaves, `2^k - 1` decision nodes. The oracle is invoked exactly once
    /// per assignment, depth-first, `false` branch before `true` branch.
    ///
    /// With an empty order the result is a single fresh terminal obtained
    /// from one oracle call on the empty assignment.
    pub fn build(&self, oracle: &impl Oracle) -> NodeId {
        debug!("build over {} variables", self.order.len());
        let mut assignment = Assignment::all_false(self.order.len());
        self.build_rec(oracle, &mut assignment, 0)
    }

    fn build_rec(&self, oracle: &impl Oracle, assignment: &mut Assignment, depth: usize) -> NodeId {
        if depth == self.order.len() {
            let value = oracle.evaluate(assignment);
            return self.alloc(Node::Terminal(value));
        }

        // One slot per recursion level, written before descending; deeper
        // levels overwrite their own slots, so no undo is needed.
        let variable = Var::new(depth as u32);
        assignment.set(variable, false);
        let low = self.build_rec(oracle, assignment, depth + 1);
        assignment.set(variable, true);
        let high = self.build_rec(oracle, assignment, depth + 1);

        self.alloc(Node::Decision {
            variable,
            low,
            high,
        })
    }

    /// Rewrites a diagram into its canonical reduced form (ROBDD).
    ///
    /// Non-destructive: the input diagram stays untouched in the arena; the
    /// result is built out of the canonical terminals and hash-consed
    /// decision nodes. Bottom-up, single pass:
    ///
    /// - terminals map to the canonical terminal of their constant;
    /// - a decision whose reduced children coincide (by identity) is elided
    ///   in favor of that child;
    /// - decisions with the same `(variable, low, high)` key are merged
    ///   through a structural unique table scoped to this call.
    ///
    /// The result is the unique ROBDD of the represented function for this
    /// manager's variable order. Reducing an already-reduced diagram yields a
    /// structurally identical diagram.
    ///
    /// The input must be acyclic, which every diagram produced by this
    /// manager is by construction.
    pub fn reduce(&self, root: NodeId) -> NodeId {
        let input_size = self.node_count();
        debug!("reduce({}) over arena of {} nodes", root, input_size);

        let mut memo: Vec<Option<NodeId>> = vec![None; input_size];
        let mut unique = UniqueTable::with_capacity_for(input_size);
        let result = self.reduce_rec(root, &mut memo, &mut unique);

        debug!(
            "reduce({}) -> {} ({} distinct decisions)",
            root,
            result,
            unique.len()
        );
        result
    }

    fn reduce_rec(
        &self,
        id: NodeId,
        memo: &mut [Option<NodeId>],
        unique: &mut UniqueTable,
    ) -> NodeId {
        if let Some(result) = memo[id.index()] {
            return result;
        }

        let result = match self.node(id) {
            Node::Terminal(false) => NodeId::ZERO,
            Node::Terminal(true) => NodeId::ONE,
            Node::Decision {
                variable,
                low,
                high,
            } => {
                let low = self.reduce_rec(low, memo, unique);
                let high = self.reduce_rec(high, memo, unique);

                if low == high {
                    // The test is irrelevant on this path. Children are
                    // already canonical, so identity comparison subsumes the
                    // equal-terminals case.
                    debug!("reduce: redundant test on {} at {}", variable, id);
                    low
                } else {
                    let node = Node::Decision {
                        variable,
                        low,
                        high,
                    };
                    unique.put_with(node, || self.alloc(node))
                }
            }
        };

        memo[id.index()] = Some(result);
        result
    }

    /// Checks two diagrams for structural equivalence.
    ///
    /// Identical handles are equivalent immediately (a valid short-circuit
    /// exploiting sharing); terminals are compared by constant; decisions on
    /// the same variable are compared child-wise.
    ///
    /// Structural equivalence coincides with semantic (truth-table)
    /// equivalence only when both diagrams were built over the same variable
    /// order and have each been through [`Bdd::reduce`]. This method never
    /// reduces its inputs; that is the caller's responsibility. Comparing
    /// two full trees is still a well-defined structural match, it just buys
    /// nothing over enumerating assignments.
    pub fn equivalent(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }
        match (self.node(a), self.node(b)) {
            (Node::Terminal(x), Node::Terminal(y)) => x == y,
            (
                Node::Decision {
                    variable: va,
                    low: la,
                    high: ha,
                },
                Node::Decision {
                    variable: vb,
                    low: lb,
                    high: hb,
                },
            ) => va == vb && self.equivalent(la, lb) && self.equivalent(ha, hb),
            _ => false,
        }
    }

    /// Evaluates a diagram under a complete assignment.
    ///
    /// Follows decisions from `root` down to a terminal. Works on both full
    /// and reduced diagrams.
    pub fn evaluate(&self, root: NodeId, assignment: &Assignment) -> bool {
        let mut current = root;
        loop {
            match self.node(current) {
                Node::Terminal(value) => return value,
                Node::Decision {
                    variable,
                    low,
                    high,
                } => {
                    current = if assignment.value(variable) { high } else { low };
                }
            }
        }
    }

    /// All nodes reachable from the given roots, in depth-first discovery
    /// order, each exactly once.
    pub fn descendants(&self, roots: impl IntoIterator<Item = NodeId>) -> Vec<NodeId> {
        let mut visited = HashSet::new();
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = roots.into_iter().collect();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            result.push(id);
            if let Node::Decision { low, high, .. } = self.node(id) {
                stack.push(high);
                stack.push(low);
            }
        }

        result
    }

    /// The number of distinct nodes in the diagram rooted at `root`.
    pub fn size(&self, root: NodeId) -> usize {
        self.descendants([root]).len()
    }

    /// The number of distinct decision nodes in the diagram rooted at `root`.
    pub fn decision_count(&self, root: NodeId) -> usize {
        self.descendants([root])
            .into_iter()
            .filter(|&id| !self.is_terminal(id))
            .count()
    }

    /// The number of distinct terminal instances in the diagram rooted at
    /// `root`.
    pub fn terminal_count(&self, root: NodeId) -> usize {
        self.descendants([root])
            .into_iter()
            .filter(|&id| self.is_terminal(id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell as TestCell;

    use test_log::test;

    fn order(names: &[&str]) -> VariableOrder {
        VariableOrder::new(names.iter().copied()).unwrap()
    }

    fn value_of(assignment: &Assignment, index: u32) -> bool {
        assignment.value(Var::new(index))
    }

    /// `A & B | !C`, scenario oracle 1.
    fn oracle1(a: &Assignment) -> bool {
        (value_of(a, 0) && value_of(a, 1)) || !value_of(a, 2)
    }

    /// `A & (B | !C)`, scenario oracle 2.
    fn oracle2(a: &Assignment) -> bool {
        value_of(a, 0) && (value_of(a, 1) || !value_of(a, 2))
    }

    #[test]
    fn test_build_produces_full_tree() {
        let bdd = Bdd::new(order(&["A", "B", "C"]));
        let root = bdd.build(&oracle1);

        // 2^3 fresh leaves, 2^3 - 1 decisions, no sharing.
        assert_eq!(bdd.size(root), 15);
        assert_eq!(bdd.terminal_count(root), 8);
        assert_eq!(bdd.decision_count(root), 7);
    }

    #[test]
    fn test_build_invokes_oracle_once_per_assignment_low_before_high() {
        let calls: TestCell<Vec<Vec<bool>>> = TestCell::new(Vec::new());
        let oracle = |a: &Assignment| {
            calls.borrow_mut().push(a.values().to_vec());
            true
        };

        let bdd = Bdd::new(order(&["A", "B", "C"]));
        bdd.build(&oracle);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 8);
        // Depth-first with the false branch first visits assignments in
        // binary-counter order, first variable as the most significant bit.
        for (i, assignment) in calls.iter().enumerate() {
            let expected: Vec<bool> = (0..3).map(|j| (i >> (2 - j)) & 1 == 1).collect();
            assert_eq!(assignment, &expected, "call #{}", i);
        }
    }

    #[test]
    fn test_build_zero_variables_is_single_terminal() {
        let bdd = Bdd::new(order(&[]));
        let root = bdd.build(&|_: &Assignment| true);

        assert!(bdd.is_terminal(root));
        assert_eq!(bdd.terminal_value(root), Some(true));
        assert_eq!(bdd.size(root), 1);
        // A fresh leaf, not the canonical terminal; reduction canonicalizes.
        assert_ne!(root, bdd.one());
        assert_eq!(bdd.reduce(root), bdd.one());
    }

    #[test]
    fn test_reduce_shares_canonical_terminals() {
        let bdd = Bdd::new(order(&["A", "B", "C"]));
        let root = bdd.reduce(bdd.build(&oracle1));

        let terminals: Vec<NodeId> = bdd
            .descendants([root])
            .into_iter()
            .filter(|&id| bdd.is_terminal(id))
            .collect();
        assert!(terminals.len() <= 2);
        for id in terminals {
            assert!(id == bdd.zero() || id == bdd.one());
        }
    }

    #[test]
    fn test_reduce_leaves_no_redundant_tests() {
        let bdd = Bdd::new(order(&["A", "B", "C"]));
        let root = bdd.reduce(bdd.build(&oracle2));

        for id in bdd.descendants([root]) {
            if let Node::Decision { low, high, .. } = bdd.node(id) {
                assert_ne!(low, high, "redundant test survived at {}", id);
            }
        }
    }

    #[test]
    fn test_reduce_leaves_no_duplicate_subgraphs() {
        let bdd = Bdd::new(order(&["A", "B", "C"]));
        let root = bdd.reduce(bdd.build(&oracle1));

        let mut keys = HashSet::new();
        for id in bdd.descendants([root]) {
            if let Node::Decision {
                variable,
                low,
                high,
            } = bdd.node(id)
            {
                assert!(
                    keys.insert((variable, low, high)),
                    "duplicate key at {}",
                    id
                );
            }
        }
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let bdd = Bdd::new(order(&["A", "B", "C"]));
        let once = bdd.reduce(bdd.build(&oracle1));
        let twice = bdd.reduce(once);

        assert!(bdd.equivalent(once, twice));
        assert_eq!(bdd.size(once), bdd.size(twice));
        assert_eq!(bdd.decision_count(once), bdd.decision_count(twice));
    }

    #[test]
    fn test_reduce_preserves_semantics() {
        let bdd = Bdd::new(order(&["A", "B", "C"]));
        let tree = bdd.build(&oracle1);
        let reduced = bdd.reduce(tree);

        for assignment in bdd.order().assignments() {
            assert_eq!(
                bdd.evaluate(reduced, &assignment),
                oracle1(&assignment),
                "mismatch at {:?}",
                assignment.values()
            );
            assert_eq!(
                bdd.evaluate(tree, &assignment),
                bdd.evaluate(reduced, &assignment)
            );
        }
    }

    #[test]
    fn test_scenario_a_inequivalent_expressions() {
        // `A & B | !C` vs `A & (B | !C)` differ at A=0, B=0, C=0.
        let bdd = Bdd::new(order(&["A", "B", "C"]));
        let f = bdd.reduce(bdd.build(&oracle1));
        let g = bdd.reduce(bdd.build(&oracle2));

        assert!(!bdd.equivalent(f, g));

        let witness = Assignment::all_false(3);
        assert!(bdd.evaluate(f, &witness));
        assert!(!bdd.evaluate(g, &witness));
    }

    #[test]
    fn test_scenario_b_conjunction_ignores_untested_variable() {
        // f = g = `A & B` over [A, B, C]: equivalent, C never tested, one
        // decision node per tested variable, canonical terminals only.
        let conj = |a: &Assignment| value_of(a, 0) && value_of(a, 1);
        let bdd = Bdd::new(order(&["A", "B", "C"]));
        let f = bdd.reduce(bdd.build(&conj));
        let g = bdd.reduce(bdd.build(&conj));

        assert!(bdd.equivalent(f, g));
        assert_eq!(bdd.decision_count(f), 2);
        assert!(bdd.terminal_count(f) <= 2);

        let tested: Vec<&str> = bdd
            .descendants([f])
            .into_iter()
            .filter_map(|id| bdd.variable(id))
            .map(|v| bdd.order().name(v))
            .collect();
        assert!(tested.contains(&"A"));
        assert!(tested.contains(&"B"));
        assert!(!tested.contains(&"C"));
    }

    #[test]
    fn test_scenario_c_constant_function_reduces_to_terminal() {
        let bdd = Bdd::new(order(&["A", "B"]));
        let root = bdd.reduce(bdd.build(&|_: &Assignment| true));

        assert_eq!(root, bdd.one());
        assert_eq!(bdd.decision_count(root), 0);
        assert_eq!(bdd.size(root), 1);
    }

    #[test]
    fn test_semantic_equivalence_law_all_two_variable_functions() {
        // Every boolean function of two variables, identified by its truth
        // table: equivalence of canonical forms must coincide exactly with
        // truth-table equality.
        let bdd = Bdd::new(order(&["A", "B"]));

        let function = |table: u32| {
            move |a: &Assignment| {
                let row = ((a.value(Var::new(0)) as u32) << 1) | a.value(Var::new(1)) as u32;
                (table >> row) & 1 == 1
            }
        };

        let reduced: Vec<NodeId> = (0..16)
            .map(|table| bdd.reduce(bdd.build(&function(table))))
            .collect();

        for (ft, &f) in reduced.iter().enumerate() {
            for (gt, &g) in reduced.iter().enumerate() {
                assert_eq!(
                    bdd.equivalent(f, g),
                    ft == gt,
                    "tables {:04b} vs {:04b}",
                    ft,
                    gt
                );
            }
        }
    }

    #[test]
    fn test_equivalent_short_circuits_on_shared_handles() {
        let bdd = Bdd::new(order(&["A", "B", "C"]));
        let f = bdd.reduce(bdd.build(&oracle2));
        assert!(bdd.equivalent(f, f));
    }

    #[test]
    fn test_traversal_contract() {
        let bdd = Bdd::new(order(&["A", "B"]));
        let conj = |a: &Assignment| value_of(a, 0) && value_of(a, 1);
        let root = bdd.reduce(bdd.build(&conj));

        assert!(!bdd.is_terminal(root));
        assert_eq!(bdd.terminal_value(root), None);
        assert_eq!(bdd.variable(root), Some(Var::new(0)));
        assert_eq!(bdd.low(root), Some(bdd.zero()));

        let high = bdd.high(root).unwrap();
        assert_eq!(bdd.variable(high), Some(Var::new(1)));
        assert_eq!(bdd.low(high), Some(bdd.zero()));
        assert_eq!(bdd.high(high), Some(bdd.one()));

        assert!(bdd.is_terminal(bdd.one()));
        assert_eq!(bdd.terminal_value(bdd.one()), Some(true));
        assert_eq!(bdd.variable(bdd.one()), None);
        assert_eq!(bdd.low(bdd.one()), None);
        assert_eq!(bdd.high(bdd.one()), None);
    }
}
