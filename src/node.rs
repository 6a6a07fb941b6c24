use std::fmt;

use crate::types::Var;
use crate::utils::{pairing3, MyHash};

/// A stable handle to a node in the manager's arena.
///
/// Node identity *is* index identity: two handles are the same node exactly
/// when their indices are equal. Nodes are never mutated or removed, so a
/// `NodeId` stays valid for the lifetime of its [`Bdd`][crate::bdd::Bdd].
/// Indices also serve as the structural-hash key component, which keeps
/// hashes deterministic and independent of allocator behavior.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The canonical `false` terminal, pre-allocated by every manager.
    pub const ZERO: NodeId = NodeId(0);
    /// The canonical `true` terminal, pre-allocated by every manager.
    pub const ONE: NodeId = NodeId(1);

    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Returns the index of this node in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A diagram node: either a terminal constant or a decision on one variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Node {
    /// A leaf holding a boolean constant.
    Terminal(bool),
    /// An inner node testing `variable`, branching to `low` when the variable
    /// is assigned `false` and to `high` when it is assigned `true`.
    Decision {
        variable: Var,
        low: NodeId,
        high: NodeId,
    },
}

impl Node {
    /// Checks if this node is a terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        match *self {
            // Terminals never enter a structural table, but give them stable
            // hashes anyway.
            Node::Terminal(value) => value as u64,
            Node::Decision {
                variable,
                low,
                high,
            } => pairing3(variable.id() as u64, low.0 as u64, high.0 as u64),
        }
    }
}
