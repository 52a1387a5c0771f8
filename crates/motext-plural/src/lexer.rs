//! Plural-form expression lexer.
//!
//! [`Lexer`] is a pull-based cursor over an expression string: each call to
//! [`Lexer::advance`] scans exactly one [`Token`], and [`Lexer::peek`] scans
//! one ahead without consuming it. A lexer cannot be rewound; build a new one
//! from the source to start over.

use std::fmt;

use motext_core::error::{MotextError, MotextResult};

/// A two-character operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pair {
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `&&`
    LogicalAnd,
    /// `||`
    LogicalOr,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
}

impl Pair {
    const ALL: [(&'static [u8; 2], Self); 8] = [
        (b"<<", Self::ShiftLeft),
        (b">>", Self::ShiftRight),
        (b"&&", Self::LogicalAnd),
        (b"||", Self::LogicalOr),
        (b"<=", Self::LessEqual),
        (b">=", Self::GreaterEqual),
        (b"==", Self::Equal),
        (b"!=", Self::NotEqual),
    ];

    /// Returns the source text of this operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }

    fn match_prefix(bytes: &[u8]) -> Option<Self> {
        let head = bytes.get(..2)?;
        Self::ALL
            .iter()
            .find(|(text, _)| head == text.as_slice())
            .map(|&(_, pair)| pair)
    }
}

/// A token produced by the expression lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A decimal integer literal.
    Number(i32),
    /// The free variable `n`.
    Variable,
    /// A two-character operator such as `&&` or `<=`.
    Pair(Pair),
    /// Any other single character: operators, parentheses, `?` and `:`.
    Char(char),
    /// End of input.
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "number {value}"),
            Self::Variable => write!(f, "'n'"),
            Self::Pair(pair) => write!(f, "'{}'", pair.as_str()),
            Self::Char(c) => write!(f, "'{c}'"),
            Self::End => write!(f, "end of expression"),
        }
    }
}

/// An on-demand token cursor over a plural-form expression.
///
/// # Examples
///
/// ```
/// use motext_plural::lexer::{Lexer, Pair, Token};
///
/// let mut lexer = Lexer::new("n != 1");
/// assert_eq!(lexer.advance().unwrap(), Token::Variable);
/// assert_eq!(lexer.peek().unwrap(), Token::Pair(Pair::NotEqual));
/// assert_eq!(lexer.advance().unwrap(), Token::Pair(Pair::NotEqual));
/// assert_eq!(lexer.advance().unwrap(), Token::Number(1));
/// assert_eq!(lexer.advance().unwrap(), Token::End);
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    peeked: Option<(usize, Token)>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `source`.
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            peeked: None,
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> MotextResult<Token> {
        if let Some((_, token)) = self.peeked {
            return Ok(token);
        }
        let (start, token) = self.scan()?;
        self.peeked = Some((start, token));
        Ok(token)
    }

    /// Consumes and returns the next token.
    ///
    /// Once the input is exhausted every further call returns [`Token::End`].
    pub fn advance(&mut self) -> MotextResult<Token> {
        match self.peeked.take() {
            Some((_, token)) => Ok(token),
            None => self.scan().map(|(_, token)| token),
        }
    }

    /// Byte offset of the next unconsumed token, for error messages.
    pub fn offset(&self) -> usize {
        self.peeked.map_or(self.pos, |(start, _)| start)
    }

    fn scan(&mut self) -> MotextResult<(usize, Token)> {
        let bytes = self.source.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let start = self.pos;
        self.scan_at(&bytes[start..]).map(|token| (start, token))
    }

    fn scan_at(&mut self, rest: &[u8]) -> MotextResult<Token> {
        let Some(&first) = rest.first() else {
            return Ok(Token::End);
        };

        if let Some(pair) = Pair::match_prefix(rest) {
            self.pos += 2;
            return Ok(Token::Pair(pair));
        }

        if first.is_ascii_digit() {
            let len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
            let digits = &self.source[self.pos..self.pos + len];
            let value = digits.parse::<i32>().map_err(|e| {
                MotextError::plural(format!(
                    "invalid number '{digits}' at offset {}: {e}",
                    self.pos
                ))
            })?;
            self.pos += len;
            return Ok(Token::Number(value));
        }

        if first == b'n' {
            self.pos += 1;
            return Ok(Token::Variable);
        }

        // Non-ASCII input is still a single (invalid) token, not a byte.
        let c = self.source[self.pos..].chars().next().unwrap_or('\0');
        self.pos += c.len_utf8();
        Ok(Token::Char(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.advance().unwrap();
            if token == Token::End {
                return out;
            }
            out.push(token);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \t ").is_empty());
    }

    #[test]
    fn test_number_and_variable() {
        assert_eq!(
            tokens("n 42 007"),
            vec![Token::Variable, Token::Number(42), Token::Number(7)]
        );
    }

    #[test]
    fn test_pairs_are_greedy() {
        assert_eq!(
            tokens("<<>>&&||<=>===!="),
            vec![
                Token::Pair(Pair::ShiftLeft),
                Token::Pair(Pair::ShiftRight),
                Token::Pair(Pair::LogicalAnd),
                Token::Pair(Pair::LogicalOr),
                Token::Pair(Pair::LessEqual),
                Token::Pair(Pair::GreaterEqual),
                Token::Pair(Pair::Equal),
                Token::Pair(Pair::NotEqual),
            ]
        );
    }

    #[test]
    fn test_single_characters() {
        assert_eq!(
            tokens("(n<1)?-~!:&|^"),
            vec![
                Token::Char('('),
                Token::Variable,
                Token::Char('<'),
                Token::Number(1),
                Token::Char(')'),
                Token::Char('?'),
                Token::Char('-'),
                Token::Char('~'),
                Token::Char('!'),
                Token::Char(':'),
                Token::Char('&'),
                Token::Char('|'),
                Token::Char('^'),
            ]
        );
    }

    #[test]
    fn test_unknown_characters_are_tokens() {
        assert_eq!(tokens("p;"), vec![Token::Char('p'), Token::Char(';')]);
        assert_eq!(tokens("é"), vec![Token::Char('é')]);
    }

    #[test]
    fn test_real_rule() {
        let toks = tokens("n%10==1 && n%100!=11 ? 0 : 1");
        assert_eq!(toks.len(), 15);
        assert_eq!(toks[1], Token::Char('%'));
        assert_eq!(toks[3], Token::Pair(Pair::Equal));
        assert_eq!(toks[5], Token::Pair(Pair::LogicalAnd));
    }

    #[test]
    fn test_number_overflow_is_plural_error() {
        let mut lexer = Lexer::new("99999999999");
        let err = lexer.advance().unwrap_err();
        assert!(matches!(err, MotextError::PluralFormError(_)));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new(" 5 n");
        assert_eq!(lexer.peek().unwrap(), Token::Number(5));
        assert_eq!(lexer.offset(), 1);
        assert_eq!(lexer.peek().unwrap(), Token::Number(5));
        assert_eq!(lexer.advance().unwrap(), Token::Number(5));
        assert_eq!(lexer.advance().unwrap(), Token::Variable);
        assert_eq!(lexer.advance().unwrap(), Token::End);
        assert_eq!(lexer.advance().unwrap(), Token::End);
    }
}
