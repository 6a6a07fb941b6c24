//! # robdd: canonical Reduced Ordered Binary Decision Diagrams
//!
//! **`robdd`** represents boolean functions of a fixed, ordered set of named
//! variables as Binary Decision Diagrams (BDDs) and reduces them to
//! canonical, maximally-shared **ROBDDs**. Because the canonical form is
//! unique for a given variable order, two functions are semantically equal
//! exactly when their reduced diagrams are structurally equivalent. That is
//! what this crate is for: equivalence checking by canonicalization.
//!
//! ## How it works
//!
//! - **Manager-centric architecture**: all nodes live in the arena of a
//!   [`Bdd`][crate::bdd::Bdd] manager and are addressed by stable
//!   [`NodeId`][crate::node::NodeId] indices. Identity of indices is identity
//!   of diagrams, and indices double as deterministic structural-hash keys.
//! - **Build, then reduce**: [`build`][crate::bdd::Bdd::build] enumerates all
//!   `2^k` assignments of the order depth-first against a caller-supplied
//!   [`Oracle`][crate::oracle::Oracle] and materializes the full decision
//!   tree; [`reduce`][crate::bdd::Bdd::reduce] rewrites it bottom-up into the
//!   unique ROBDD by sharing terminals, eliding redundant tests and merging
//!   isomorphic subgraphs through a structural unique table.
//! - **Equivalence checking**: [`equivalent`][crate::bdd::Bdd::equivalent]
//!   compares two reduced diagrams structurally, short-circuiting on shared
//!   nodes.
//!
//! This is deliberately a small engine for small, fixed variable sets: the
//! full tree has `2^k` leaves. There is no variable reordering, no
//! complemented edges and no operation caching. For industrial-scale
//! symbolic manipulation, reach for a full BDD package instead.
//!
//! ## Basic usage
//!
//! ```rust
//! use robdd::bdd::Bdd;
//! use robdd::expr::{Expr, ExprOracle};
//! use robdd::variables::VariableOrder;
//!
//! // 1. Fix the variable order (duplicates are rejected).
//! let order = VariableOrder::new(["A", "B", "C"]).unwrap();
//!
//! // 2. Parse two expressions and bind them to the order.
//! let f: Expr = "A & B | !C".parse().unwrap();
//! let g: Expr = "A & (B | !C)".parse().unwrap();
//! let f = ExprOracle::new(&f, &order).unwrap();
//! let g = ExprOracle::new(&g, &order).unwrap();
//!
//! // 3. Build full trees and reduce them to canonical form.
//! let bdd = Bdd::new(order);
//! let f = bdd.reduce(bdd.build(&f));
//! let g = bdd.reduce(bdd.build(&g));
//!
//! // 4. Canonical forms are equal iff the functions are equal.
//! assert!(!bdd.equivalent(f, g)); // they differ at A=0, B=0, C=0
//! ```
//!
//! Any closure over a complete [`Assignment`][crate::variables::Assignment]
//! is an oracle too, so diagrams can be built for functions that never
//! existed as expression strings.
//!
//! ## Core components
//!
//! - **[`bdd`]**: the manager, the builder, the reducer and the equivalence
//!   checker.
//! - **[`expr`]**: boolean-expression parsing and the oracle adapter.
//! - **[`dot`]**: Graphviz export of full and reduced diagrams.
//! - **[`sat`]**: satisfying-assignment queries over reduced diagrams.

pub mod bdd;
pub mod dot;
pub mod expr;
pub mod node;
pub mod oracle;
pub mod sat;
pub mod types;
pub mod utils;
pub mod variables;

mod unique;
