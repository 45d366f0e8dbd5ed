//! Expression lexing, parsing and compilation.

mod compiler;
mod lexer;
mod parser;

use std::sync::LazyLock;

use tracing::debug;

use crate::errors::ExprError;
use crate::language::Language;
use crate::registry::Registry;

pub use parser::Expr;

static PRIMITIVES: LazyLock<Registry> = LazyLock::new(Registry::with_primitives);

/// Parse `expression` into its syntax tree without resolving names.
///
/// # Errors
/// Returns [`ExprError::InvalidExpression`] or
/// [`ExprError::UnbalancedGrouping`] when the text is malformed.
pub fn parse_expression(expression: &str) -> Result<Expr, ExprError> {
    let tokens = lexer::lex_expression(expression)?;
    parser::parse_tokens(&tokens, expression.len())
}

/// Compile `expression` against the built-in languages `L1` to `L4`.
///
/// # Errors
/// Returns [`ExprError`] when the expression is malformed or references a
/// language other than the built-in ones.
///
/// # Examples
/// ```
/// use langcheck::compile;
///
/// let language = compile("L1 + L4").expect("expression is valid");
/// assert!(language.contains("ab"));
/// assert!(!language.contains("abb"));
/// ```
pub fn compile(expression: &str) -> Result<Language, ExprError> {
    compile_with(expression, &PRIMITIVES)
}

/// Compile `expression`, resolving names against `registry`.
///
/// Structural errors are reported before any name is looked up.
///
/// # Errors
/// Returns [`ExprError`] when the expression is malformed or references a
/// name that `registry` does not bind.
pub fn compile_with(expression: &str, registry: &Registry) -> Result<Language, ExprError> {
    let expr = parse_expression(expression)?;
    let language = compiler::lower(&expr, registry)?;
    debug!(
        %expr,
        names = ?expr.names(),
        nodes = language.node_count(),
        "compiled expression"
    );
    Ok(language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::invalid_expression;

    #[test]
    fn structural_errors_win_over_undefined_names() {
        let Err(err) = compile("L9+") else {
            panic!("expression should fail");
        };
        assert_eq!(
            err,
            invalid_expression("missing operand at end of expression", 3)
        );
    }

    #[test]
    fn starred_undefined_name_is_a_reference_error() {
        let Err(err) = compile("L9*") else {
            panic!("expression should fail");
        };
        assert!(matches!(err, ExprError::UndefinedReference { ref name, .. } if name == "L9"));
    }

    #[test]
    fn bare_undefined_name_is_an_invalid_expression() {
        let Err(err) = compile("L9") else {
            panic!("expression should fail");
        };
        assert_eq!(err, invalid_expression("not a defined language", 0));
    }

    #[test]
    fn long_chains_fail_instead_of_overflowing() {
        let chain = format!("L1{}", ".L1".repeat(10_000));
        assert!(matches!(
            compile(&chain),
            Err(ExprError::InvalidExpression(_))
        ));
    }

    #[test]
    fn primitive_registry_is_shared_between_calls() {
        let first = compile("L2").map(|l| l.contains("ab"));
        let second = compile("L2").map(|l| l.contains("ab"));
        assert_eq!(first, Ok(true));
        assert_eq!(first, second);
    }
}
