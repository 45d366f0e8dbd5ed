//! Argument parsing and the check loop behind the `langcheck` binary.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result, bail};
use langcheck::{compile, parse_expression};
use tracing::{info, warn};

use crate::config::{CliConfig, LogLevel, parse_step_limit};
use crate::error::CliError;
use crate::input::LineSource;
use crate::output::{
    Outcome, Verdict, write_explanation, write_json, write_outcome, write_primitives,
};

/// Check every non-empty line of a file for membership in a language.
///
/// Expressions combine the built-in languages L1 to L4 with `+` (union),
/// `.` (concatenation), postfix `*` (star) and parentheses.
#[derive(Parser, Debug)]
#[command(name = "langcheck", version, about)]
pub struct Cli {
    /// Language expression, for example "(L1 + L4)* . L2".
    #[arg(required_unless_present = "list")]
    pub expression: Option<String>,

    /// File whose trimmed, non-empty lines are checked.
    #[arg(required_unless_present = "list")]
    pub file: Option<PathBuf>,

    /// Emit a JSON array instead of one line per verdict.
    #[arg(long, conflicts_with = "explain")]
    pub json: bool,

    /// Print the parsed form of the expression before the verdicts.
    #[arg(long)]
    pub explain: bool,

    /// List the built-in languages and exit.
    #[arg(long, conflicts_with_all = ["expression", "file", "json", "explain"])]
    pub list: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Node evaluations allowed per line before it is reported as undecided.
    #[arg(long, value_parser = parse_step_limit)]
    pub step_limit: Option<u64>,
}

impl Cli {
    /// Resolve the run configuration: environment first, flags on top.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if an environment variable holds an
    /// invalid value.
    pub fn config(&self) -> Result<CliConfig, CliError> {
        Ok(CliConfig::from_env()?.apply_overrides(self.log_level, self.step_limit))
    }
}

/// Run one check, writing verdicts to `out`.
///
/// The input file is opened before the expression is compiled, so a missing
/// file is reported even when the expression is also wrong.
///
/// # Errors
///
/// Returns an error when the file is missing or unreadable, the expression
/// does not compile, or `out` cannot be written.
pub fn run(cli: &Cli, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    if cli.list {
        return write_primitives(out);
    }
    let (Some(expression), Some(path)) = (cli.expression.as_deref(), cli.file.as_deref()) else {
        bail!("an expression and an input file are required");
    };

    let source = LineSource::open(path)?;
    let compile_error = |source| CliError::Compile {
        expression: expression.to_string(),
        source,
    };
    if cli.explain {
        let expr = parse_expression(expression).map_err(compile_error)?;
        write_explanation(out, &expr)?;
    }
    let language = compile(expression).map_err(compile_error)?;
    let candidates = source.candidates()?;

    info!(
        path = %path.display(),
        lines = candidates.len(),
        "checking lines"
    );
    let budget = config.budget();
    let outcomes = candidates.into_iter().map(|candidate| {
        let verdict = Verdict::from_evaluation(language.evaluate(&candidate.text, budget));
        if verdict == Verdict::Undecided {
            warn!(line = candidate.line, "step budget exhausted, verdict undecided");
        }
        Outcome {
            line: candidate.line,
            text: candidate.text,
            verdict,
        }
    });

    let mut accepted = 0usize;
    if cli.json {
        let outcomes: Vec<Outcome> = outcomes.collect();
        accepted = outcomes.iter().filter(|o| o.verdict == Verdict::Yes).count();
        write_json(out, &outcomes)?;
    } else {
        for outcome in outcomes {
            if outcome.verdict == Verdict::Yes {
                accepted += 1;
            }
            write_outcome(out, &outcome)?;
        }
    }
    out.flush().wrap_err("failed to flush verdicts")?;
    info!(accepted, "finished");
    Ok(())
}
