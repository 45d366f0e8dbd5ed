//! Command-line front end for `langcheck`.
//!
//! Reads an expression and a file, compiles the expression once, and writes
//! one verdict per trimmed, non-empty line:
//!
//! ```text
//! $ langcheck "L1 + L4" words.txt
//! Line 1: aab => ✅ Yes
//! Line 2: abb => ❌ No
//! ```
//!
//! # Configuration
//!
//! - `LANGCHECK_LOG_LEVEL`: log verbosity on stderr (trace, debug, info,
//!   warn, error)
//! - `LANGCHECK_STEP_LIMIT`: node evaluations allowed per line before the
//!   line is reported as undecided

pub mod cli;
pub mod config;
pub mod error;
mod input;
pub mod logging;
mod output;
