//! Composable membership tests backed by a flat node arena.
//!
//! A [`Language`] owns every node it needs. Combinators copy their operands'
//! nodes into a fresh arena, so a built language never shares mutable state
//! with the languages it was built from.

mod eval;

use std::fmt;
use std::sync::Arc;

use crate::errors::EvalError;
use crate::primitive::Primitive;

pub use eval::EvalBudget;
use eval::Evaluator;

pub(crate) type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Index of a node inside the arena of one [`Language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }

    fn shifted(self, offset: usize) -> Self {
        Self(self.0 + offset)
    }
}

#[derive(Clone)]
pub(crate) enum Node {
    Primitive(Primitive),
    Custom(Predicate),
    Union(NodeId, NodeId),
    Concat(NodeId, NodeId),
    Star(NodeId),
}

impl Node {
    fn shifted(&self, offset: usize) -> Self {
        match self {
            Self::Primitive(p) => Self::Primitive(*p),
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
            Self::Union(l, r) => Self::Union(l.shifted(offset), r.shifted(offset)),
            Self::Concat(l, r) => Self::Concat(l.shifted(offset), r.shifted(offset)),
            Self::Star(inner) => Self::Star(inner.shifted(offset)),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "Primitive({p})"),
            Self::Custom(_) => f.write_str("Custom(..)"),
            Self::Union(l, r) => write!(f, "Union({}, {})", l.0, r.0),
            Self::Concat(l, r) => write!(f, "Concat({}, {})", l.0, r.0),
            Self::Star(inner) => write!(f, "Star({})", inner.0),
        }
    }
}

/// Arena under construction. Children are always pushed before their
/// parents, so every id a node refers to is smaller than its own.
#[derive(Debug, Default)]
pub(crate) struct ArenaBuilder {
    nodes: Vec<Node>,
}

impl ArenaBuilder {
    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Copy the nodes of `language` into this arena and return its new root.
    pub(crate) fn graft(&mut self, language: &Language) -> NodeId {
        let offset = self.nodes.len();
        self.nodes
            .extend(language.nodes.iter().map(|node| node.shifted(offset)));
        language.root.shifted(offset)
    }

    pub(crate) fn finish(self, root: NodeId) -> Language {
        Language {
            nodes: self.nodes.into(),
            root,
        }
    }
}

/// An immutable membership test over strings.
///
/// Languages are built from [`Primitive`]s or custom predicates with the
/// [`union`](Self::union), [`concat`](Self::concat) and [`star`](Self::star)
/// combinators, or compiled from an expression with [`crate::compile`].
///
/// # Examples
///
/// ```
/// use langcheck::{Language, Primitive};
///
/// let l1 = Language::primitive(Primitive::L1);
/// let l4 = Language::primitive(Primitive::L4);
/// let both = Language::concat(&l1, &l4);
/// assert!(both.contains("aab"));
/// assert!(Language::star(&l1).contains(""));
/// ```
#[derive(Clone)]
pub struct Language {
    nodes: Arc<[Node]>,
    root: NodeId,
}

impl Language {
    /// Language consisting of a single primitive.
    #[must_use]
    pub fn primitive(primitive: Primitive) -> Self {
        Self::leaf(Node::Primitive(primitive))
    }

    /// Language accepting exactly the strings for which `predicate` holds.
    ///
    /// The predicate must be pure: verdicts are cached per candidate span.
    ///
    /// # Examples
    ///
    /// ```
    /// use langcheck::Language;
    ///
    /// let only_a = Language::from_fn(|s| s == "a");
    /// assert!(Language::star(&only_a).contains("aaa"));
    /// ```
    #[must_use]
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::leaf(Node::Custom(Arc::new(predicate)))
    }

    /// Strings in `left` or in `right`.
    #[must_use]
    pub fn union(left: &Self, right: &Self) -> Self {
        Self::binary(left, right, Node::Union)
    }

    /// Strings that split into a prefix in `left` and a suffix in `right`.
    ///
    /// Every split point is considered, including the empty prefix and the
    /// empty suffix.
    #[must_use]
    pub fn concat(left: &Self, right: &Self) -> Self {
        Self::binary(left, right, Node::Concat)
    }

    /// Zero or more concatenated strings of `inner`. Always contains `""`.
    #[must_use]
    pub fn star(inner: &Self) -> Self {
        let mut arena = ArenaBuilder::default();
        let inner = arena.graft(inner);
        let root = arena.push(Node::Star(inner));
        arena.finish(root)
    }

    /// Test whether `candidate` belongs to the language.
    ///
    /// Evaluation is unbounded and never fails.
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        matches!(self.evaluate(candidate, EvalBudget::unlimited()), Ok(true))
    }

    /// Test membership within a step budget.
    ///
    /// # Errors
    /// Returns [`EvalError::BudgetExhausted`] when the candidate needs more
    /// node evaluations than `budget` allows.
    ///
    /// # Examples
    ///
    /// ```
    /// use langcheck::{EvalBudget, compile};
    ///
    /// let language = compile("(L4 + L1)*").expect("expression is valid");
    /// assert_eq!(language.evaluate("abba", EvalBudget::unlimited()), Ok(true));
    /// assert!(language.evaluate("abba", EvalBudget::steps(1)).is_err());
    /// ```
    pub fn evaluate(&self, candidate: &str, budget: EvalBudget) -> Result<bool, EvalError> {
        Evaluator::new(&self.nodes, candidate, budget).run(self.root)
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn leaf(node: Node) -> Self {
        let mut arena = ArenaBuilder::default();
        let root = arena.push(node);
        arena.finish(root)
    }

    fn binary(left: &Self, right: &Self, make: fn(NodeId, NodeId) -> Node) -> Self {
        let mut arena = ArenaBuilder::default();
        let l = arena.graft(left);
        let r = arena.graft(right);
        let root = arena.push(make(l, r));
        arena.finish(root)
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("root", &self.root.0)
            .field("nodes", &self.nodes)
            .finish()
    }
}
