//! Plural-form expression tree and evaluator.
//!
//! An [`Expression`] is built once by the [parser](crate::parser) and then
//! evaluated any number of times against a count `n`. Evaluation is a pure
//! function of the tree and `n`.
//!
//! Arithmetic follows 32-bit two's complement and wraps on overflow. Comparison
//! and logical operators yield `1` or `0`, and any non-zero value is true.

use std::fmt;
use std::str::FromStr;

use motext_core::error::{MotextError, MotextResult};

/// A prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-x`
    Negate,
    /// `!x`
    Not,
    /// `~x`
    BitNot,
}

impl UnaryOp {
    /// Returns the source text of this operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        }
    }

    fn apply(self, value: i32) -> i32 {
        match self {
            Self::Negate => value.wrapping_neg(),
            Self::Not => i32::from(value == 0),
            Self::BitNot => !value,
        }
    }
}

/// An infix operator that cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `*`
    Mul,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `&`
    BitAnd,
    /// `^`
    BitXor,
    /// `|`
    BitOr,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOp {
    /// Returns the source text of this operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Binding strength, from `1` (`||`) to `10` (`*`, `/`, `%`).
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul => 10,
            Self::Add | Self::Sub => 9,
            Self::Shl | Self::Shr => 8,
            Self::Lt | Self::Gt | Self::Le | Self::Ge => 7,
            Self::Eq | Self::Ne => 6,
            Self::BitAnd => 5,
            Self::BitXor => 4,
            Self::BitOr => 3,
            Self::And => 2,
            Self::Or => 1,
        }
    }

    // Shift counts are taken modulo 32, as `wrapping_shl` does.
    #[allow(clippy::cast_sign_loss)]
    fn apply(self, left: i32, right: i32) -> i32 {
        match self {
            Self::Mul => left.wrapping_mul(right),
            Self::Add => left.wrapping_add(right),
            Self::Sub => left.wrapping_sub(right),
            Self::Shl => left.wrapping_shl(right as u32),
            Self::Shr => left.wrapping_shr(right as u32),
            Self::Lt => i32::from(left < right),
            Self::Gt => i32::from(left > right),
            Self::Le => i32::from(left <= right),
            Self::Ge => i32::from(left >= right),
            Self::Eq => i32::from(left == right),
            Self::Ne => i32::from(left != right),
            Self::BitAnd => left & right,
            Self::BitXor => left ^ right,
            Self::BitOr => left | right,
            Self::And => i32::from(left != 0 && right != 0),
            Self::Or => i32::from(left != 0 || right != 0),
        }
    }
}

/// An infix operator that fails on a zero right operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DivisionOp {
    /// `/`
    Quotient,
    /// `%`
    Remainder,
}

impl DivisionOp {
    /// Returns the source text of this operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quotient => "/",
            Self::Remainder => "%",
        }
    }

    /// Division shares the multiplicative level.
    pub const fn precedence(self) -> u8 {
        10
    }

    fn apply(self, left: i32, right: i32) -> MotextResult<i32> {
        if right == 0 {
            return Err(MotextError::plural(match self {
                Self::Quotient => "division by zero",
                Self::Remainder => "modulo by zero",
            }));
        }
        Ok(match self {
            Self::Quotient => left.wrapping_div(right),
            Self::Remainder => left.wrapping_rem(right),
        })
    }
}

/// A compiled plural-form expression.
///
/// # Examples
///
/// ```
/// use motext_plural::Expression;
///
/// let rule: Expression = "n != 1".parse().unwrap();
/// assert_eq!(rule.evaluate(1).unwrap(), 0);
/// assert_eq!(rule.evaluate(5).unwrap(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// An integer constant.
    Literal(i32),
    /// The count `n`.
    Variable,
    /// A prefix operator applied to one operand.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expression>,
    },
    /// An infix operator that cannot fail.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },
    /// Division or remainder, checked for a zero divisor at evaluation time.
    Division {
        /// The operator.
        op: DivisionOp,
        /// Dividend.
        left: Box<Expression>,
        /// Divisor.
        right: Box<Expression>,
    },
    /// `condition ? then : otherwise`
    Conditional {
        /// Selects the branch.
        condition: Box<Expression>,
        /// Taken when the condition is non-zero.
        then: Box<Expression>,
        /// Taken when the condition is zero.
        otherwise: Box<Expression>,
    },
}

impl Expression {
    /// Compiles `source` with the default nesting limit.
    ///
    /// Shorthand for [`parser::parse`](crate::parser::parse).
    pub fn parse(source: &str) -> MotextResult<Self> {
        crate::parser::parse(source)
    }

    /// Evaluates the expression for the count `n`.
    ///
    /// Only the selected branch of a conditional is evaluated, and `&&`/`||`
    /// skip their right operand when the left one decides the result.
    ///
    /// # Errors
    ///
    /// Returns a `PluralFormError` if a division or remainder has a zero divisor.
    pub fn evaluate(&self, n: i32) -> MotextResult<i32> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::Variable => Ok(n),
            Self::Unary { op, operand } => Ok(op.apply(operand.evaluate(n)?)),
            Self::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => Ok(i32::from(left.evaluate(n)? != 0 && right.evaluate(n)? != 0)),
            Self::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => Ok(i32::from(left.evaluate(n)? != 0 || right.evaluate(n)? != 0)),
            Self::Binary { op, left, right } => Ok(op.apply(left.evaluate(n)?, right.evaluate(n)?)),
            Self::Division { op, left, right } => op.apply(left.evaluate(n)?, right.evaluate(n)?),
            Self::Conditional {
                condition,
                then,
                otherwise,
            } => {
                if condition.evaluate(n)? != 0 {
                    then.evaluate(n)
                } else {
                    otherwise.evaluate(n)
                }
            }
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Literal(_) | Self::Variable => 1,
            Self::Unary { operand, .. } => 1 + operand.depth(),
            Self::Binary { left, right, .. } | Self::Division { left, right, .. } => {
                1 + left.depth().max(right.depth())
            }
            Self::Conditional {
                condition,
                then,
                otherwise,
            } => 1 + condition.depth().max(then.depth()).max(otherwise.depth()),
        }
    }
}

impl FromStr for Expression {
    type Err = MotextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the expression fully parenthesised, so the output parses back to
/// an equal tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Variable => write!(f, "n"),
            Self::Unary { op, operand } => write!(f, "({}{operand})", op.as_str()),
            Self::Binary { op, left, right } => write!(f, "({left} {} {right})", op.as_str()),
            Self::Division { op, left, right } => write!(f, "({left} {} {right})", op.as_str()),
            Self::Conditional {
                condition,
                then,
                otherwise,
            } => write!(f, "({condition} ? {then} : {otherwise})"),
        }
    }
}
