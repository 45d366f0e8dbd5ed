//! Memoised evaluation of a node arena against one candidate string.

use std::collections::HashMap;

use tracing::trace;

use super::{Node, NodeId};
use crate::errors::EvalError;

/// Upper bound on the work spent deciding one candidate.
///
/// A step is one node evaluated on one span of the candidate that was not
/// already cached. Star over an ambiguous operand is the only construct whose
/// cost grows quickly with the candidate length; the budget turns that cost
/// into an [`EvalError::BudgetExhausted`] instead of a stall.
///
/// # Examples
///
/// ```
/// use langcheck::EvalBudget;
///
/// assert_eq!(EvalBudget::unlimited().limit(), None);
/// assert_eq!(EvalBudget::steps(500).limit(), Some(500));
/// assert_eq!(EvalBudget::default(), EvalBudget::unlimited());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalBudget {
    limit: Option<u64>,
}

impl EvalBudget {
    /// No limit.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self { limit: None }
    }

    /// At most `limit` steps per candidate.
    #[must_use]
    pub const fn steps(limit: u64) -> Self {
        Self { limit: Some(limit) }
    }

    /// The configured step limit, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }
}

type Span = (usize, usize);

pub(super) struct Evaluator<'a> {
    nodes: &'a [Node],
    candidate: &'a str,
    /// Byte offsets of every char boundary, including the end of the string.
    bounds: Vec<usize>,
    memo: HashMap<(NodeId, Span), bool>,
    budget: EvalBudget,
    steps: u64,
}

impl<'a> Evaluator<'a> {
    pub(super) fn new(nodes: &'a [Node], candidate: &'a str, budget: EvalBudget) -> Self {
        let bounds = candidate
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(candidate.len()))
            .collect();
        Self {
            nodes,
            candidate,
            bounds,
            memo: HashMap::new(),
            budget,
            steps: 0,
        }
    }

    pub(super) fn run(mut self, root: NodeId) -> Result<bool, EvalError> {
        let end = self.bounds.len() - 1;
        self.eval(root, (0, end))
    }

    fn eval(&mut self, id: NodeId, span: Span) -> Result<bool, EvalError> {
        if let Some(&verdict) = self.memo.get(&(id, span)) {
            return Ok(verdict);
        }
        self.charge()?;
        let nodes = self.nodes;
        let Some(node) = nodes.get(id.index()) else {
            unreachable!("node ids are allocated by the arena that owns them");
        };
        let (start, end) = span;
        let verdict = match node {
            Node::Primitive(primitive) => primitive.contains(self.slice(span)),
            Node::Custom(predicate) => predicate(self.slice(span)),
            Node::Union(left, right) => self.eval(*left, span)? || self.eval(*right, span)?,
            Node::Concat(left, right) => self.concat(*left, *right, start, end)?,
            Node::Star(inner) => self.star(*inner, start, end)?,
        };
        self.memo.insert((id, span), verdict);
        Ok(verdict)
    }

    fn concat(
        &mut self,
        left: NodeId,
        right: NodeId,
        start: usize,
        end: usize,
    ) -> Result<bool, EvalError> {
        for split in start..=end {
            if self.eval(left, (start, split))? && self.eval(right, (split, end))? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Explore split positions reachable from `start` by consuming one
    /// non-empty piece of `inner` at a time.
    fn star(&mut self, inner: NodeId, start: usize, end: usize) -> Result<bool, EvalError> {
        if start == end {
            return Ok(true);
        }
        let mut reached = vec![false; end - start + 1];
        let mut pending = vec![start];
        while let Some(from) = pending.pop() {
            for to in (from + 1)..=end {
                if reached.get(to - start).copied().unwrap_or(true) {
                    continue;
                }
                if self.eval(inner, (from, to))? {
                    if to == end {
                        return Ok(true);
                    }
                    if let Some(slot) = reached.get_mut(to - start) {
                        *slot = true;
                    }
                    pending.push(to);
                }
            }
        }
        Ok(false)
    }

    fn slice(&self, (start, end): Span) -> &'a str {
        let byte_range = self
            .bounds
            .get(start)
            .zip(self.bounds.get(end))
            .map(|(&from, &to)| from..to);
        byte_range
            .and_then(|range| self.candidate.get(range))
            .unwrap_or_else(|| unreachable!("spans always lie on char boundaries"))
    }

    fn charge(&mut self) -> Result<(), EvalError> {
        self.steps += 1;
        match self.budget.limit() {
            Some(limit) if self.steps > limit => {
                trace!(limit, "step budget exhausted");
                Err(EvalError::BudgetExhausted { limit })
            }
            _ => Ok(()),
        }
    }
}
