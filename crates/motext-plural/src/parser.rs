//! Plural-form expression parser.
//!
//! A precedence-climbing parser over the C operator subset used by gettext
//! `Plural-Forms` rules. Binary levels run from `1` (`||`, loosest) to `10`
//! (`*`, `/`, `%`, tightest); level `11` is the unary/value layer. The
//! conditional `?:` sits above every binary level and is right-associative.
//!
//! ```text
//! conditional := logor ('?' conditional ':' conditional)?
//! level(k)    := level(k+1) (op_k level(k+1))*        k = 1..10
//! unary       := ('-' | '~' | '!') unary | value
//! value       := NUMBER | 'n' | '(' conditional ')'
//! ```
//!
//! Any error aborts the whole parse; there is no recovery.

use motext_core::error::{MotextError, MotextResult};
use motext_core::settings::DEFAULT_MAX_EXPRESSION_DEPTH;
use tracing::debug;

use crate::expression::{BinaryOp, DivisionOp, Expression, UnaryOp};
use crate::lexer::{Lexer, Pair, Token};

const LOOSEST_LEVEL: u8 = 1;
const UNARY_LEVEL: u8 = 11;

/// Ceiling on tree depth, independent of the nesting limit. Flat operator
/// chains grow the tree one level per operand and evaluation recurses on it.
pub const MAX_TREE_DEPTH: usize = 4096;

/// An infix operator as seen by the parser.
#[derive(Debug, Clone, Copy)]
enum Infix {
    Plain(BinaryOp),
    Checked(DivisionOp),
}

impl Infix {
    const fn from_token(token: Token) -> Option<Self> {
        let op = match token {
            Token::Char('*') => BinaryOp::Mul,
            Token::Char('/') => return Some(Self::Checked(DivisionOp::Quotient)),
            Token::Char('%') => return Some(Self::Checked(DivisionOp::Remainder)),
            Token::Char('+') => BinaryOp::Add,
            Token::Char('-') => BinaryOp::Sub,
            Token::Pair(Pair::ShiftLeft) => BinaryOp::Shl,
            Token::Pair(Pair::ShiftRight) => BinaryOp::Shr,
            Token::Char('<') => BinaryOp::Lt,
            Token::Char('>') => BinaryOp::Gt,
            Token::Pair(Pair::LessEqual) => BinaryOp::Le,
            Token::Pair(Pair::GreaterEqual) => BinaryOp::Ge,
            Token::Pair(Pair::Equal) => BinaryOp::Eq,
            Token::Pair(Pair::NotEqual) => BinaryOp::Ne,
            Token::Char('&') => BinaryOp::BitAnd,
            Token::Char('^') => BinaryOp::BitXor,
            Token::Char('|') => BinaryOp::BitOr,
            Token::Pair(Pair::LogicalAnd) => BinaryOp::And,
            Token::Pair(Pair::LogicalOr) => BinaryOp::Or,
            _ => return None,
        };
        Some(Self::Plain(op))
    }

    const fn precedence(self) -> u8 {
        match self {
            Self::Plain(op) => op.precedence(),
            Self::Checked(op) => op.precedence(),
        }
    }

    fn build(self, left: Expression, right: Expression) -> Expression {
        let (left, right) = (Box::new(left), Box::new(right));
        match self {
            Self::Plain(op) => Expression::Binary { op, left, right },
            Self::Checked(op) => Expression::Division { op, left, right },
        }
    }
}

/// A sub-tree together with its depth, so limits are checked without
/// walking the tree again.
struct Parsed {
    expr: Expression,
    depth: usize,
}

impl Parsed {
    const fn leaf(expr: Expression) -> Self {
        Self { expr, depth: 1 }
    }
}

/// Parser for one plural-form expression.
///
/// # Examples
///
/// ```
/// use motext_plural::parser::Parser;
///
/// let expr = Parser::new("n > 1 ? 1 : 0").with_max_depth(8).parse().unwrap();
/// assert_eq!(expr.evaluate(2).unwrap(), 1);
///
/// assert!(Parser::new("((((n))))").with_max_depth(2).parse().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    max_depth: usize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser for `source` with the default depth limit.
    pub const fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            max_depth: DEFAULT_MAX_EXPRESSION_DEPTH,
            nesting: 0,
        }
    }

    /// Limits the nesting of parentheses, prefix operators and conditional
    /// branches. Operator chains such as `a || b || c` do not nest.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses the whole input into an expression.
    ///
    /// # Errors
    ///
    /// Returns a `PluralFormError` on empty input, malformed syntax, input left
    /// over after a complete expression, nesting beyond the depth limit, or a
    /// tree deeper than [`MAX_TREE_DEPTH`].
    pub fn parse(mut self) -> MotextResult<Expression> {
        let parsed = self.conditional()?;
        match self.lexer.peek()? {
            Token::End => {
                debug!(depth = parsed.depth, "compiled plural rule");
                Ok(parsed.expr)
            }
            token => Err(MotextError::plural(format!(
                "trailing input: unexpected {token} at offset {}",
                self.lexer.offset()
            ))),
        }
    }

    fn conditional(&mut self) -> MotextResult<Parsed> {
        let condition = self.binary(LOOSEST_LEVEL)?;
        if self.lexer.peek()? != Token::Char('?') {
            return Ok(condition);
        }
        self.lexer.advance()?;

        self.enter()?;
        let then = self.conditional()?;
        self.expect(':')?;
        let otherwise = self.conditional()?;
        self.leave();

        let depth = 1 + condition.depth.max(then.depth).max(otherwise.depth);
        self.node(
            Expression::Conditional {
                condition: Box::new(condition.expr),
                then: Box::new(then.expr),
                otherwise: Box::new(otherwise.expr),
            },
            depth,
        )
    }

    fn binary(&mut self, level: u8) -> MotextResult<Parsed> {
        if level >= UNARY_LEVEL {
            return self.unary();
        }

        let mut left = self.binary(level + 1)?;
        while let Some(op) = Infix::from_token(self.lexer.peek()?) {
            if op.precedence() != level {
                break;
            }
            self.lexer.advance()?;
            let right = self.binary(level + 1)?;
            let depth = 1 + left.depth.max(right.depth);
            left = self.node(op.build(left.expr, right.expr), depth)?;
        }
        Ok(left)
    }

    fn unary(&mut self) -> MotextResult<Parsed> {
        let op = match self.lexer.peek()? {
            Token::Char('-') => UnaryOp::Negate,
            Token::Char('!') => UnaryOp::Not,
            Token::Char('~') => UnaryOp::BitNot,
            _ => return self.value(),
        };
        self.lexer.advance()?;

        self.enter()?;
        let operand = self.unary()?;
        self.leave();

        self.node(
            Expression::Unary {
                op,
                operand: Box::new(operand.expr),
            },
            operand.depth + 1,
        )
    }

    fn value(&mut self) -> MotextResult<Parsed> {
        let offset = self.lexer.offset();
        match self.lexer.advance()? {
            Token::Number(value) => Ok(Parsed::leaf(Expression::Literal(value))),
            Token::Variable => Ok(Parsed::leaf(Expression::Variable)),
            Token::Char('(') => {
                self.enter()?;
                let inner = self.conditional()?;
                self.expect(')')?;
                self.leave();
                Ok(inner)
            }
            Token::End => Err(MotextError::plural("unexpected end of expression")),
            token => Err(MotextError::plural(format!(
                "unexpected {token} at offset {offset}"
            ))),
        }
    }

    fn expect(&mut self, c: char) -> MotextResult<()> {
        let offset = self.lexer.offset();
        match self.lexer.advance()? {
            Token::Char(found) if found == c => Ok(()),
            token => Err(MotextError::plural(format!(
                "expected '{c}' but found {token} at offset {offset}"
            ))),
        }
    }

    fn enter(&mut self) -> MotextResult<()> {
        self.nesting += 1;
        if self.nesting > self.max_depth {
            return Err(self.too_deep());
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    fn node(&self, expr: Expression, depth: usize) -> MotextResult<Parsed> {
        if depth > MAX_TREE_DEPTH {
            return Err(MotextError::plural(format!(
                "expression tree deeper than {MAX_TREE_DEPTH} levels at offset {}",
                self.lexer.offset()
            )));
        }
        Ok(Parsed { expr, depth })
    }

    fn too_deep(&self) -> MotextError {
        MotextError::plural(format!(
            "expression nested deeper than {} levels",
            self.max_depth
        ))
    }
}

/// Parses `source` with the default depth limit.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse(source: &str) -> MotextResult<Expression> {
    Parser::new(source).parse()
}

/// Parses `source`, treating empty or all-whitespace input as "no rule".
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse_optional(source: &str, max_depth: usize) -> MotextResult<Option<Expression>> {
    if source.trim().is_empty() {
        return Ok(None);
    }
    Parser::new(source).with_max_depth(max_depth).parse().map(Some)
}
