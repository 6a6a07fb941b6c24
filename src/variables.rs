//! Variable orders and complete assignments.
//!
//! A [`VariableOrder`] is the only configuration the engine consumes: an
//! ordered sequence of distinct variable names. The order is significant:
//! it defines the decision depth of every variable, and two diagrams built
//! with different orders are not directly comparable even when they represent
//! semantically equal functions.

use std::collections::HashMap;
use std::fmt;

use crate::types::Var;

/// An ordered sequence of distinct variable names.
///
/// Duplicate and empty names are rejected at construction (fail fast). An
/// empty order is permitted: every function over zero variables is a constant
/// and its diagram degenerates to a single terminal.
#[derive(Debug, Clone)]
pub struct VariableOrder {
    names: Vec<String>,
    index: HashMap<String, Var>,
}

/// Errors reported by [`VariableOrder::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableOrderError {
    /// The same name appeared twice in the order.
    Duplicate(String),
    /// A variable name was empty.
    EmptyName,
}

impl fmt::Display for VariableOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableOrderError::Duplicate(name) => {
                write!(f, "duplicate variable {:?} in the order", name)
            }
            VariableOrderError::EmptyName => write!(f, "variable names must not be empty"),
        }
    }
}

impl std::error::Error for VariableOrderError {}

impl VariableOrder {
    /// Creates a new order from the given names.
    ///
    /// Returns an error if a name repeats or is empty.
    pub fn new<I, S>(names: I) -> Result<Self, VariableOrderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut order = VariableOrder {
            names: Vec::new(),
            index: HashMap::new(),
        };
        for name in names {
            let name = name.into();
            if name.is_empty() {
                return Err(VariableOrderError::EmptyName);
            }
            let var = Var::new(order.names.len() as u32);
            if order.index.insert(name.clone(), var).is_some() {
                return Err(VariableOrderError::Duplicate(name));
            }
            order.names.push(name);
        }
        Ok(order)
    }

    /// The number of variables in the order.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Checks if the order has no variables.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Looks up a variable by name.
    pub fn var(&self, name: &str) -> Option<Var> {
        self.index.get(name).copied()
    }

    /// The name of the given variable.
    ///
    /// # Panics
    ///
    /// Panics if `var` is not a position in this order.
    pub fn name(&self, var: Var) -> &str {
        &self.names[var.index()]
    }

    /// Iterates over the variables in decision order.
    pub fn vars(&self) -> impl Iterator<Item = Var> + '_ {
        (0..self.names.len() as u32).map(Var::new)
    }

    /// Iterates over the names in decision order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Enumerates all `2^k` complete assignments of this order.
    ///
    /// The first variable of the order is the most significant bit: the first
    /// assignment is all-false, the last is all-true, and the `false` branch
    /// of each variable is visited before the `true` branch.
    pub fn assignments(&self) -> Assignments {
        Assignments {
            next: Some(Assignment::all_false(self.len())),
        }
    }
}

/// A complete assignment of boolean values to the variables of an order.
///
/// Backed by a fixed-size vector indexed by [`Var`]. The builder mutates one
/// slot per recursion level under depth-first stack discipline, so a slot is
/// always written before any deeper level reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    /// Creates an assignment of `len` variables, all set to `false`.
    pub fn all_false(len: usize) -> Self {
        Assignment {
            values: vec![false; len],
        }
    }

    /// Creates an assignment from explicit values, in variable order.
    pub fn from_values(values: Vec<bool>) -> Self {
        Assignment { values }
    }

    /// The number of variables covered by this assignment.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks if the assignment covers no variables.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value assigned to the given variable.
    ///
    /// # Panics
    ///
    /// Panics if `var` is out of range for this assignment.
    pub fn value(&self, var: Var) -> bool {
        self.values[var.index()]
    }

    /// Sets the value of the given variable.
    pub fn set(&mut self, var: Var, value: bool) {
        self.values[var.index()] = value;
    }

    /// The values in variable order.
    pub fn values(&self) -> &[bool] {
        &self.values
    }
}

/// Iterator over all complete assignments of an order, in canonical order.
///
/// See [`VariableOrder::assignments`].
pub struct Assignments {
    next: Option<Assignment>,
}

impl Iterator for Assignments {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        let current = self.next.take()?;
        // Binary increment with the last variable as the least significant
        // bit: flip trailing `true`s to `false`, then the first `false` to
        // `true`. All-true has no successor.
        let mut successor = current.clone();
        let mut done = true;
        for i in (0..successor.values.len()).rev() {
            if successor.values[i] {
                successor.values[i] = false;
            } else {
                successor.values[i] = true;
                done = false;
                break;
            }
        }
        if !done {
            self.next = Some(successor);
        }
        Some(current)
    }
}
