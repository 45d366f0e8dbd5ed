//! Recursive-descent parser producing the expression syntax tree.
//!
//! ```text
//! union   = concat ( '+' concat )*
//! concat  = postfix ( '.' postfix )*
//! postfix = atom '*'*
//! atom    = NAME | '(' union ')'
//! ```
//!
//! Binary operators associate to the left. Grouping is checked over the
//! whole token stream before parsing starts, so an unmatched parenthesis is
//! always reported as such rather than as a missing operand.
//!
//! Every consumer of the tree walks it recursively, so the parser rejects
//! trees taller than `MAX_DEPTH` operators as well as parentheses nested
//! deeper than `MAX_NESTING`.

use std::fmt;

use super::lexer::{Token, TokenKind};
use crate::errors::{ExprError, invalid_expression};

/// Deepest parenthesis nesting accepted before parsing gives up.
const MAX_NESTING: usize = 256;

/// Most operators on any root-to-leaf path of the tree, stars included.
const MAX_DEPTH: usize = 512;

/// Syntax tree of a parsed expression.
///
/// A parenthesised operand keeps a [`Group`](Expr::Group) node so that a
/// group holding nothing but a name can be told apart from a name used as
/// an operand. [`Display`](fmt::Display) ignores groups and renders every
/// binary operation in parentheses instead, which makes the parsed
/// precedence visible.
///
/// # Examples
/// ```
/// use langcheck::parse_expression;
///
/// let expr = parse_expression("L1.L2* + L3").expect("expression is valid");
/// assert_eq!(expr.to_string(), "((L1 . L2*) + L3)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Reference to a registered language.
    Name {
        /// Name as written, whitespace removed.
        name: String,
        /// Byte offset of the name in the source expression.
        position: usize,
    },
    /// Kleene star of the operand.
    Star(Box<Expr>),
    /// Concatenation, `left . right`.
    Concat(Box<Expr>, Box<Expr>),
    /// Union, `left + right`.
    Union(Box<Expr>, Box<Expr>),
    /// Parenthesised sub-expression.
    Group(Box<Expr>),
}

impl Expr {
    /// Names referenced by the expression, left to right, with repeats.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'e>(&'e self, names: &mut Vec<&'e str>) {
        match self {
            Self::Name { name, .. } => names.push(name),
            Self::Star(inner) | Self::Group(inner) => inner.collect_names(names),
            Self::Concat(left, right) | Self::Union(left, right) => {
                left.collect_names(names);
                right.collect_names(names);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name { name, .. } => f.write_str(name),
            Self::Star(inner) => write!(f, "{inner}*"),
            Self::Concat(left, right) => write!(f, "({left} . {right})"),
            Self::Union(left, right) => write!(f, "({left} + {right})"),
            Self::Group(inner) => fmt::Display::fmt(inner, f),
        }
    }
}

pub(crate) fn parse_tokens(tokens: &[Token], source_len: usize) -> Result<Expr, ExprError> {
    check_grouping(tokens)?;
    if tokens.is_empty() {
        return Err(invalid_expression("empty expression", 0));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        source_len,
        depth: 0,
    };
    let (expr, _) = parser.union()?;
    if let Some(token) = parser.peek() {
        return Err(invalid_expression(
            "missing operator between operands",
            token.position,
        ));
    }
    Ok(expr)
}

fn check_grouping(tokens: &[Token]) -> Result<(), ExprError> {
    let mut open = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::Open => open.push(token.position),
            TokenKind::Close => {
                if open.pop().is_none() {
                    return Err(ExprError::UnbalancedGrouping {
                        delimiter: ')',
                        position: token.position,
                    });
                }
            }
            _ => {}
        }
    }
    match open.last() {
        Some(&position) => Err(ExprError::UnbalancedGrouping {
            delimiter: '(',
            position,
        }),
        None => Ok(()),
    }
}

/// A subtree and the number of operators on its deepest path.
type Parsed = (Expr, usize);

fn deepen(depth: usize, operator_position: usize) -> Result<usize, ExprError> {
    if depth >= MAX_DEPTH {
        return Err(invalid_expression(
            "expression nested too deeply",
            operator_position,
        ));
    }
    Ok(depth + 1)
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    source_len: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Consume the next token if it is `kind`, returning its position.
    fn next_if(&mut self, kind: &TokenKind) -> Option<usize> {
        let token = self.peek().filter(|token| token.kind == *kind)?;
        self.pos += 1;
        Some(token.position)
    }

    fn union(&mut self) -> Result<Parsed, ExprError> {
        let (mut expr, mut depth) = self.concat()?;
        while let Some(position) = self.next_if(&TokenKind::Plus) {
            let (rhs, rhs_depth) = self.concat()?;
            depth = deepen(depth.max(rhs_depth), position)?;
            expr = Expr::Union(Box::new(expr), Box::new(rhs));
        }
        Ok((expr, depth))
    }

    fn concat(&mut self) -> Result<Parsed, ExprError> {
        let (mut expr, mut depth) = self.postfix()?;
        while let Some(position) = self.next_if(&TokenKind::Dot) {
            let (rhs, rhs_depth) = self.postfix()?;
            depth = deepen(depth.max(rhs_depth), position)?;
            expr = Expr::Concat(Box::new(expr), Box::new(rhs));
        }
        Ok((expr, depth))
    }

    fn postfix(&mut self) -> Result<Parsed, ExprError> {
        let (mut expr, mut depth) = self.atom()?;
        while let Some(position) = self.next_if(&TokenKind::Star) {
            depth = deepen(depth, position)?;
            expr = Expr::Star(Box::new(expr));
        }
        Ok((expr, depth))
    }

    fn atom(&mut self) -> Result<Parsed, ExprError> {
        let Some(token) = self.peek() else {
            return Err(invalid_expression(
                "missing operand at end of expression",
                self.source_len,
            ));
        };
        match &token.kind {
            TokenKind::Name(name) => {
                self.pos += 1;
                let name = Expr::Name {
                    name: name.clone(),
                    position: token.position,
                };
                Ok((name, 0))
            }
            TokenKind::Open => {
                self.pos += 1;
                self.group(token.position)
            }
            TokenKind::Close => {
                let after_open = self
                    .pos
                    .checked_sub(1)
                    .and_then(|prev| self.tokens.get(prev))
                    .is_some_and(|prev| prev.kind == TokenKind::Open);
                let message = if after_open {
                    "empty parentheses"
                } else {
                    "missing operand before `)`"
                };
                Err(invalid_expression(message, token.position))
            }
            TokenKind::Plus | TokenKind::Dot => Err(invalid_expression(
                "missing operand before operator",
                token.position,
            )),
            TokenKind::Star => Err(invalid_expression(
                "`*` must follow an operand",
                token.position,
            )),
        }
    }

    fn group(&mut self, open_position: usize) -> Result<Parsed, ExprError> {
        if self.depth >= MAX_NESTING {
            return Err(invalid_expression(
                "parentheses nested too deeply",
                open_position,
            ));
        }
        self.depth += 1;
        let (inner, depth) = self.union()?;
        self.depth -= 1;
        match self.peek() {
            Some(Token {
                kind: TokenKind::Close,
                ..
            }) => {
                self.pos += 1;
                Ok((Expr::Group(Box::new(inner)), depth))
            }
            Some(token) => Err(invalid_expression(
                "missing operator between operands",
                token.position,
            )),
            None => Err(ExprError::UnbalancedGrouping {
                delimiter: '(',
                position: open_position,
            }),
        }
    }
}
