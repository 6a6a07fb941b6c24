//! Diagram to DOT (Graphviz) conversion.
//!
//! Builds on the read-only traversal contract only (`node`, `descendants`,
//! the accessors); rendering the DOT text to an image is left to external
//! tooling (`dot -Tpng out.dot -o out.png`).
//!
//! Conventions:
//! - terminal nodes are squares labeled `0`/`1`, placed at the bottom (sink
//!   rank); in a full tree every leaf instance is its own square, in a
//!   reduced diagram only the shared canonical terminals remain
//! - decision nodes are circles labeled with their variable name, grouped by
//!   variable level
//! - solid edges are `high` (variable = true) branches, dashed edges are
//!   `low` (variable = false) branches
//! - roots are rendered as rectangles at the top (source rank)

use std::collections::BTreeMap;

use crate::bdd::Bdd;
use crate::node::{Node, NodeId};

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for decision nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for terminal nodes (default: "square")
    pub terminal_shape: &'static str,
    /// Shape for root markers (default: "rect")
    pub root_shape: &'static str,
    /// Style for high (then) edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low (else) edges (default: "dashed")
    pub low_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            root_shape: "rect",
            high_edge_style: "solid",
            low_edge_style: "dashed",
        }
    }
}

impl Bdd {
    /// Converts the diagrams rooted at `roots` to DOT (Graphviz) format.
    ///
    /// All nodes reachable from the roots are included; nodes shared between
    /// roots are rendered once. Works on full trees and reduced diagrams
    /// alike.
    ///
    /// # Examples
    ///
    /// ```
    /// use robdd::bdd::Bdd;
    /// use robdd::types::Var;
    /// use robdd::variables::{Assignment, VariableOrder};
    ///
    /// let bdd = Bdd::new(VariableOrder::new(["A", "B"]).unwrap());
    /// let conj = |a: &Assignment| a.value(Var::new(0)) && a.value(Var::new(1));
    /// let root = bdd.reduce(bdd.build(&conj));
    ///
    /// let dot = bdd.to_dot(&[root]).unwrap();
    /// assert!(dot.starts_with("graph {"));
    /// ```
    pub fn to_dot(&self, roots: &[NodeId]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    /// Converts diagrams to DOT format with custom configuration.
    pub fn to_dot_with_config(
        &self,
        roots: &[NodeId],
        config: &DotConfig,
    ) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}, fixedsize=true];", config.node_shape)?;

        let all_nodes = self.descendants(roots.iter().copied());

        // Terminal instances at the bottom.
        writeln!(dot, "{{ rank=sink")?;
        for &id in all_nodes.iter() {
            if let Some(value) = self.terminal_value(id) {
                writeln!(
                    dot,
                    "{} [shape={}, label=\"{}\"];",
                    id.index(),
                    config.terminal_shape,
                    value as u8
                )?;
            }
        }
        writeln!(dot, "}}")?;

        // Decision nodes grouped by variable level for proper ranking.
        let mut levels = BTreeMap::<usize, Vec<NodeId>>::new();
        for &id in all_nodes.iter() {
            if let Some(variable) = self.variable(id) {
                levels.entry(variable.index()).or_default().push(id);
            }
        }
        for level in levels.values() {
            writeln!(dot, "{{ rank=same")?;
            for &id in level.iter() {
                let variable = self.variable(id).unwrap();
                writeln!(
                    dot,
                    "{} [label=\"{}\"];",
                    id.index(),
                    self.order().name(variable)
                )?;
            }
            writeln!(dot, "}}")?;
        }

        // Edges: solid high, dashed low.
        for &id in all_nodes.iter() {
            if let Node::Decision { low, high, .. } = self.node(id) {
                writeln!(
                    dot,
                    "{} -- {} [style={}];",
                    id.index(),
                    high.index(),
                    config.high_edge_style
                )?;
                writeln!(
                    dot,
                    "{} -- {} [style={}];",
                    id.index(),
                    low.index(),
                    config.low_edge_style
                )?;
            }
        }

        // Root markers at the top.
        writeln!(dot, "{{ rank=source")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} [shape={}, label=\"{}\"];", i, config.root_shape, root)?;
        }
        writeln!(dot, "}}")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} -- {};", i, root.index())?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::Var;
    use crate::variables::{Assignment, VariableOrder};

    fn conj(a: &Assignment) -> bool {
        a.value(Var::new(0)) && a.value(Var::new(1))
    }

    #[test]
    fn test_to_dot_basic() {
        let bdd = Bdd::new(VariableOrder::new(["A", "B"]).unwrap());
        let root = bdd.reduce(bdd.build(&conj));

        let dot = bdd.to_dot(&[root]).unwrap();

        assert!(dot.starts_with("graph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("label=\"A\""));
        assert!(dot.contains("label=\"B\""));
    }

    #[test]
    fn test_to_dot_full_tree_renders_every_leaf() {
        let bdd = Bdd::new(VariableOrder::new(["A", "B"]).unwrap());
        let tree = bdd.build(&conj);

        let dot = bdd.to_dot(&[tree]).unwrap();
        let squares = dot.matches("shape=square").count();
        assert_eq!(squares, 4);
    }

    #[test]
    fn test_to_dot_multiple_roots_share_nodes() {
        let bdd = Bdd::new(VariableOrder::new(["A", "B"]).unwrap());
        let f = bdd.reduce(bdd.build(&conj));
        let g = bdd.reduce(bdd.build(&|a: &Assignment| a.value(Var::new(0))));

        let dot = bdd.to_dot(&[f, g]).unwrap();
        assert!(dot.contains("r0"));
        assert!(dot.contains("r1"));
    }

    #[test]
    fn test_to_dot_with_config() {
        let bdd = Bdd::new(VariableOrder::new(["A", "B"]).unwrap());
        let root = bdd.reduce(bdd.build(&conj));

        let config = DotConfig {
            node_shape: "ellipse",
            ..DotConfig::default()
        };
        let dot = bdd.to_dot_with_config(&[root], &config).unwrap();
        assert!(dot.contains("node [shape=ellipse, fixedsize=true];"));
    }
}
