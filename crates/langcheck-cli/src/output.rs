//! Helpers for rendering verdicts.

use std::io::Write;

use eyre::{Context, Result};
use langcheck::{EvalError, Expr, Primitive};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Verdict {
    Yes,
    No,
    Undecided,
}

impl Verdict {
    pub(crate) fn from_evaluation(result: Result<bool, EvalError>) -> Self {
        match result {
            Ok(true) => Self::Yes,
            Ok(false) => Self::No,
            Err(EvalError::BudgetExhausted { .. }) => Self::Undecided,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Yes => "✅ Yes",
            Self::No => "❌ No",
            Self::Undecided => "⚠️ Undecided (step budget exhausted)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Outcome {
    pub line: usize,
    pub text: String,
    pub verdict: Verdict,
}

pub(crate) fn write_outcome(writer: &mut dyn Write, outcome: &Outcome) -> Result<()> {
    writeln!(
        writer,
        "Line {}: {} => {}",
        outcome.line,
        outcome.text,
        outcome.verdict.label()
    )
    .wrap_err_with(|| format!("failed to write verdict for line {}", outcome.line))
}

pub(crate) fn write_json(writer: &mut dyn Write, outcomes: &[Outcome]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, outcomes)
        .wrap_err("failed to write JSON verdicts")?;
    writeln!(writer).wrap_err("failed to terminate JSON output")
}

pub(crate) fn write_explanation(writer: &mut dyn Write, expr: &Expr) -> Result<()> {
    writeln!(writer, "Parsed as: {expr}").wrap_err("failed to write parsed expression")
}

pub(crate) fn write_primitives(writer: &mut dyn Write) -> Result<()> {
    for primitive in Primitive::ALL {
        writeln!(writer, "{primitive}  {}", primitive.description())
            .wrap_err_with(|| format!("failed to describe {primitive}"))?;
    }
    Ok(())
}
