//! Error types shared by the expression compiler and the evaluator.

use std::fmt;
use thiserror::Error;

/// Additional context for a malformed expression.
///
/// # Examples
/// ```
/// use langcheck::ExprErrorInfo;
/// let info = ExprErrorInfo::new("missing operand after `+`", 3);
/// assert_eq!(info.position, 3);
/// assert_eq!(info.to_string(), "missing operand after `+` at byte 3 (zero-based)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprErrorInfo {
    /// Static description of what went wrong.
    pub message: &'static str,
    /// Byte offset into the expression as supplied by the caller.
    pub position: usize,
}

impl ExprErrorInfo {
    /// Create a new description for a malformed expression.
    #[must_use]
    pub fn new(message: &'static str, position: usize) -> Self {
        Self { message, position }
    }
}

impl fmt::Display for ExprErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {} (zero-based)", self.message, self.position)
    }
}

/// Errors surfaced while compiling an expression into a [`Language`].
///
/// Compilation stops at the first error; no partial result is produced.
///
/// [`Language`]: crate::Language
///
/// # Examples
/// ```
/// use langcheck::{ExprError, compile};
/// let Err(err) = compile("L1+L9") else {
///     panic!("L9 is not a built-in language");
/// };
/// assert!(matches!(err, ExprError::UndefinedReference { ref name, position: 3 } if name == "L9"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// An operand names a language that is not registered.
    #[error("language `{name}` is not defined (referenced at byte {position})")]
    UndefinedReference {
        /// The name as written, whitespace removed.
        name: String,
        /// Byte offset of the name in the expression.
        position: usize,
    },
    /// The expression does not reduce to a single language.
    #[error("invalid expression: {0}")]
    InvalidExpression(ExprErrorInfo),
    /// A parenthesis has no matching partner.
    #[error("unbalanced grouping: unmatched `{delimiter}` at byte {position} (zero-based)")]
    UnbalancedGrouping {
        /// The unmatched delimiter, `(` or `)`.
        delimiter: char,
        /// Byte offset of the delimiter in the expression.
        position: usize,
    },
}

impl ExprError {
    /// Byte offset in the expression the error points at.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::UndefinedReference { position, .. } | Self::UnbalancedGrouping { position, .. } => {
                *position
            }
            Self::InvalidExpression(info) => info.position,
        }
    }
}

pub(crate) fn invalid_expression(message: &'static str, position: usize) -> ExprError {
    ExprError::InvalidExpression(ExprErrorInfo::new(message, position))
}

/// Errors surfaced by bounded evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The candidate needed more node evaluations than the budget allows.
    #[error("evaluation gave up after exhausting the step budget of {limit}")]
    BudgetExhausted {
        /// The configured step limit.
        limit: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_invalid_expression_with_position() {
        let err = invalid_expression("empty expression", 0);
        assert_eq!(
            err.to_string(),
            "invalid expression: empty expression at byte 0 (zero-based)"
        );
    }

    #[test]
    fn formats_undefined_reference() {
        let err = ExprError::UndefinedReference {
            name: "L7".into(),
            position: 4,
        };
        assert_eq!(
            err.to_string(),
            "language `L7` is not defined (referenced at byte 4)"
        );
    }

    #[test]
    fn formats_unbalanced_grouping() {
        let err = ExprError::UnbalancedGrouping {
            delimiter: ')',
            position: 2,
        };
        assert_eq!(
            err.to_string(),
            "unbalanced grouping: unmatched `)` at byte 2 (zero-based)"
        );
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn formats_budget_exhaustion() {
        let err = EvalError::BudgetExhausted { limit: 10 };
        assert_eq!(
            err.to_string(),
            "evaluation gave up after exhausting the step budget of 10"
        );
    }
}
