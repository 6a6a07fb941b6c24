//! Boolean expressions: parsing, display, and adaptation into an oracle.
//!
//! Expressions are one source of oracles for the builder; any other total
//! boolean function works just as well. The grammar covers negation `!`,
//! conjunction `&`, disjunction `|`, exclusive or `^`, parentheses, the
//! constants `true`/`false`, and free-form variable names. Binding tightness
//! is `!`, then `^`, then `&`, then `|`; binary operators associate to the
//! right.

use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

use crate::oracle::Oracle;
use crate::types::Var;
use crate::variables::{Assignment, VariableOrder};

/// Characters that cannot appear in a variable name.
const NOT_IN_VAR_NAME: [char; 6] = ['!', '&', '|', '^', '(', ')'];

/// Recursive type for a boolean expression tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expr {
    Const(bool),
    Variable(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Xor(Box<Expr>, Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Not(inner) => write!(f, "!{}", inner),
            Expr::And(l, r) => write!(f, "({} & {})", l, r),
            Expr::Or(l, r) => write!(f, "({} | {})", l, r),
            Expr::Xor(l, r) => write!(f, "({} ^ {})", l, r),
        }
    }
}

/// Errors reported by the expression parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input (or a parenthesized group) contained no formula.
    Empty,
    /// A `)` without a matching `(`.
    UnexpectedClose,
    /// A `(` without a matching `)`.
    MissingClose,
    /// Leftover tokens where a single variable or group was expected.
    UnexpectedToken(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "expected a formula, found nothing"),
            ParseError::UnexpectedClose => write!(f, "unexpected ')'"),
            ParseError::MissingClose => write!(f, "expected ')'"),
            ParseError::UnexpectedToken(tokens) => {
                write!(f, "expected a variable name or (...), found {}", tokens)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let tokens = tokenize_group(&mut s.chars().peekable(), true)?;
        Ok(*parse_formula(&tokens)?)
    }
}

/// Tokens of the expression grammar. Parenthesized groups become nested
/// token vectors, so the parser works on a token tree.
#[derive(Debug, Eq, PartialEq)]
enum ExprToken {
    Not,                    // '!'
    And,                    // '&'
    Or,                     // '|'
    Xor,                    // '^'
    Id(String),             // variable name or constant
    Tokens(Vec<ExprToken>), // a block of tokens inside parentheses
}

/// Process a peekable iterator of characters into a vector of tokens.
///
/// The outer call consumes the opening parenthesis and the recursive call
/// consumes the closing one; `top_level` marks the call with no closing
/// parenthesis to expect.
fn tokenize_group(data: &mut Peekable<Chars>, top_level: bool) -> Result<Vec<ExprToken>, ParseError> {
    let mut output = Vec::new();
    while let Some(c) = data.next() {
        match c {
            c if c.is_whitespace() => {}
            '!' => output.push(ExprToken::Not),
            '&' => output.push(ExprToken::And),
            '|' => output.push(ExprToken::Or),
            '^' => output.push(ExprToken::Xor),
            ')' => {
                return if !top_level {
                    Ok(output)
                } else {
                    Err(ParseError::UnexpectedClose)
                };
            }
            '(' => {
                let tokens = tokenize_group(data, false)?;
                output.push(ExprToken::Tokens(tokens));
            }
            _ => {
                // Start of a variable name.
                let mut name = String::new();
                name.push(c);
                while let Some(c) = data.peek() {
                    if c.is_whitespace() || NOT_IN_VAR_NAME.contains(c) {
                        break;
                    }
                    name.push(*c);
                    data.next();
                }
                output.push(ExprToken::Id(name));
            }
        }
    }
    if top_level {
        Ok(output)
    } else {
        Err(ParseError::MissingClose)
    }
}

fn parse_formula(data: &[ExprToken]) -> Result<Box<Expr>, ParseError> {
    or(data)
}

/// Find the first occurrence of a specific token at the root of the tree.
fn index_of_first(data: &[ExprToken], token: ExprToken) -> Option<usize> {
    data.iter().position(|t| *t == token)
}

/// Parsing step 1: extract `|` operators.
fn or(data: &[ExprToken]) -> Result<Box<Expr>, ParseError> {
    if let Some(i) = index_of_first(data, ExprToken::Or) {
        Ok(Box::new(Expr::Or(and(&data[..i])?, or(&data[(i + 1)..])?)))
    } else {
        and(data)
    }
}

/// Parsing step 2: extract `&` operators.
fn and(data: &[ExprToken]) -> Result<Box<Expr>, ParseError> {
    if let Some(i) = index_of_first(data, ExprToken::And) {
        Ok(Box::new(Expr::And(xor(&data[..i])?, and(&data[(i + 1)..])?)))
    } else {
        xor(data)
    }
}

/// Parsing step 3: extract `^` operators.
fn xor(data: &[ExprToken]) -> Result<Box<Expr>, ParseError> {
    if let Some(i) = index_of_first(data, ExprToken::Xor) {
        Ok(Box::new(Expr::Xor(
            terminal(&data[..i])?,
            xor(&data[(i + 1)..])?,
        )))
    } else {
        terminal(data)
    }
}

/// Parsing step 4: extract terminals, negations and groups.
fn terminal(data: &[ExprToken]) -> Result<Box<Expr>, ParseError> {
    if data.is_empty() {
        Err(ParseError::Empty)
    } else if data[0] == ExprToken::Not {
        Ok(Box::new(Expr::Not(terminal(&data[1..])?)))
    } else if data.len() > 1 {
        Err(ParseError::UnexpectedToken(format!("{:?}", data)))
    } else {
        match &data[0] {
            ExprToken::Id(name) => match name.as_str() {
                "true" => Ok(Box::new(Expr::Const(true))),
                "false" => Ok(Box::new(Expr::Const(false))),
                _ => Ok(Box::new(Expr::Variable(name.clone()))),
            },
            ExprToken::Tokens(inner) => parse_formula(inner),
            _ => unreachable!("operators are consumed by the steps above"),
        }
    }
}

/// Error reported when an expression references a variable that is not part
/// of the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariable(pub String);

impl fmt::Display for UnknownVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variable {:?}", self.0)
    }
}

impl std::error::Error for UnknownVariable {}

/// An expression compiled against a variable order, usable as a builder
/// oracle.
///
/// Every variable name is resolved to its [`Var`] up front, so construction
/// fails fast on unknown names and evaluation is total.
///
/// # Examples
///
/// ```
/// use robdd::bdd::Bdd;
/// use robdd::expr::{Expr, ExprOracle};
/// use robdd::variables::VariableOrder;
///
/// let order = VariableOrder::new(["A", "B", "C"]).unwrap();
/// let expr: Expr = "A & B | !C".parse().unwrap();
/// let oracle = ExprOracle::new(&expr, &order).unwrap();
///
/// let bdd = Bdd::new(order);
/// let root = bdd.reduce(bdd.build(&oracle));
/// assert!(!bdd.is_terminal(root));
/// ```
#[derive(Debug)]
pub struct ExprOracle {
    compiled: Compiled,
}

#[derive(Debug)]
enum Compiled {
    Const(bool),
    Variable(Var),
    Not(Box<Compiled>),
    And(Box<Compiled>, Box<Compiled>),
    Or(Box<Compiled>, Box<Compiled>),
    Xor(Box<Compiled>, Box<Compiled>),
}

impl ExprOracle {
    /// Compiles `expr` against `order`, resolving every variable name.
    pub fn new(expr: &Expr, order: &VariableOrder) -> Result<Self, UnknownVariable> {
        Ok(ExprOracle {
            compiled: compile(expr, order)?,
        })
    }
}

fn compile(expr: &Expr, order: &VariableOrder) -> Result<Compiled, UnknownVariable> {
    Ok(match expr {
        Expr::Const(value) => Compiled::Const(*value),
        Expr::Variable(name) => {
            let var = order
                .var(name)
                .ok_or_else(|| UnknownVariable(name.clone()))?;
            Compiled::Variable(var)
        }
        Expr::Not(inner) => Compiled::Not(Box::new(compile(inner, order)?)),
        Expr::And(l, r) => Compiled::And(
            Box::new(compile(l, order)?),
            Box::new(compile(r, order)?),
        ),
        Expr::Or(l, r) => Compiled::Or(
            Box::new(compile(l, order)?),
            Box::new(compile(r, order)?),
        ),
        Expr::Xor(l, r) => Compiled::Xor(
            Box::new(compile(l, order)?),
            Box::new(compile(r, order)?),
        ),
    })
}

fn eval(compiled: &Compiled, assignment: &Assignment) -> bool {
    match compiled {
        Compiled::Const(value) => *value,
        Compiled::Variable(var) => assignment.value(*var),
        Compiled::Not(inner) => !eval(inner, assignment),
        Compiled::And(l, r) => eval(l, assignment) && eval(r, assignment),
        Compiled::Or(l, r) => eval(l, assignment) || eval(r, assignment),
        Compiled::Xor(l, r) => eval(l, assignment) != eval(r, assignment),
    }
}

impl Oracle for ExprOracle {
    fn evaluate(&self, assignment: &Assignment) -> bool {
        eval(&self.compiled, assignment)
    }
}
