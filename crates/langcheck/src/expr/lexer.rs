//! Expression lexer converting source text into operator and name tokens.

use crate::errors::{ExprError, invalid_expression};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Name(String),
    Plus,
    Dot,
    Star,
    Open,
    Close,
}

/// A token and the byte offset where it starts in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Split `expression` into tokens.
///
/// Whitespace is dropped before anything else, so it may appear anywhere,
/// including between the `L` of a name and its digits.
pub(crate) fn lex_expression(expression: &str) -> Result<Vec<Token>, ExprError> {
    let chars: Vec<(usize, char)> = expression
        .char_indices()
        .filter(|(_, c)| !c.is_whitespace())
        .collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(&(position, c)) = chars.get(pos) {
        let kind = match c {
            '+' => TokenKind::Plus,
            '.' => TokenKind::Dot,
            '*' => TokenKind::Star,
            '(' => TokenKind::Open,
            ')' => TokenKind::Close,
            'L' => {
                let mut name = String::from('L');
                while let Some(&(_, digit)) = chars.get(pos + 1) {
                    if !digit.is_ascii_digit() {
                        break;
                    }
                    name.push(digit);
                    pos += 1;
                }
                if name.len() == 1 {
                    return Err(invalid_expression(
                        "expected digits after `L` in language name",
                        position,
                    ));
                }
                TokenKind::Name(name)
            }
            _ => {
                return Err(invalid_expression(
                    "unexpected character in expression",
                    position,
                ));
            }
        };
        tokens.push(Token { kind, position });
        pos += 1;
    }

    Ok(tokens)
}
