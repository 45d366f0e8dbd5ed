//! Membership checking for languages built from primitives with union,
//! concatenation and Kleene star.
//!
//! An expression such as `(L1 + L4)* . L2` is parsed into a syntax tree,
//! every name is resolved against a [`Registry`], and the result is a
//! [`Language`]: an immutable membership test that can be applied to any
//! number of candidate strings.
//!
//! ```
//! use langcheck::compile;
//!
//! let language = compile("L1 . L4").expect("expression is valid");
//! assert!(language.contains("aab"));
//! assert!(!language.contains("b"));
//! ```

mod errors;
mod expr;
mod language;
mod primitive;
mod registry;

pub use errors::{EvalError, ExprError, ExprErrorInfo};
pub use expr::{Expr, compile, compile_with, parse_expression};
pub use language::{EvalBudget, Language};
pub use primitive::{Primitive, UnknownPrimitive};
pub use registry::{InvalidName, Registry, is_language_name};
