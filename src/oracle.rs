//! The boolean-function oracle consumed by the builder.

use crate::variables::Assignment;

/// A total boolean function over the complete assignments of a variable
/// order.
///
/// The builder invokes the oracle exactly once per complete assignment, in
/// depth-first low-before-high order, with no retries. The oracle is expected
/// to be synchronous and side-effect-free; a panic inside the oracle aborts
/// the `build` call and propagates to the caller unmodified.
///
/// Any closure `Fn(&Assignment) -> bool` is an oracle:
///
/// ```
/// use robdd::bdd::Bdd;
/// use robdd::types::Var;
/// use robdd::variables::VariableOrder;
///
/// let order = VariableOrder::new(["A", "B"]).unwrap();
/// let bdd = Bdd::new(order);
/// let root = bdd.build(&|a: &robdd::variables::Assignment| {
///     a.value(Var::new(0)) && a.value(Var::new(1))
/// });
/// assert_eq!(bdd.size(root), 7); // full tree over two variables
/// ```
pub trait Oracle {
    /// Evaluates the function on one complete assignment.
    fn evaluate(&self, assignment: &Assignment) -> bool;
}

impl<F> Oracle for F
where
    F: Fn(&Assignment) -> bool,
{
    fn evaluate(&self, assignment: &Assignment) -> bool {
        self(assignment)
    }
}
