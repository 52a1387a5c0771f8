//! # motext-plural
//!
//! The plural-form expression language of gettext catalogs: a C-like integer
//! expression over a single variable `n` that maps a count to the index of a
//! plural variant.
//!
//! ## Modules
//!
//! - [`lexer`] - Pull-based tokenizer
//! - [`parser`] - Precedence-climbing parser
//! - [`expression`] - Expression tree and evaluator
//!
//! ## Quick Start
//!
//! ```
//! use motext_plural::Expression;
//!
//! let rule = Expression::parse("n%10==1 && n%100!=11 ? 0 : n != 0 ? 1 : 2").unwrap();
//! assert_eq!(rule.evaluate(21).unwrap(), 0);
//! assert_eq!(rule.evaluate(11).unwrap(), 1);
//! assert_eq!(rule.evaluate(0).unwrap(), 2);
//! ```

pub mod expression;
pub mod lexer;
pub mod parser;

pub use expression::{BinaryOp, DivisionOp, Expression, UnaryOp};
pub use parser::{parse, parse_optional, Parser};
