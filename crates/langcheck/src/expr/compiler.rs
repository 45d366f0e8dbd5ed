//! Lower a syntax tree into a node arena, resolving names on the way.

use std::collections::HashMap;

use super::parser::Expr;
use crate::errors::{ExprError, invalid_expression};
use crate::language::{ArenaBuilder, Language, Node, NodeId};
use crate::registry::Registry;

/// Build the language denoted by `expr`.
///
/// Each registered language is grafted at most once; repeated references to
/// the same name share its nodes.
///
/// # Errors
/// Fails on the leftmost name that `registry` does not bind. A name used as
/// an operand of `*`, `.` or `+` gives [`ExprError::UndefinedReference`]; a
/// name standing alone, as the whole expression or the whole content of a
/// group, gives [`ExprError::InvalidExpression`].
pub(crate) fn lower(expr: &Expr, registry: &Registry) -> Result<Language, ExprError> {
    let mut lowering = Lowering {
        registry,
        arena: ArenaBuilder::default(),
        grafted: HashMap::new(),
    };
    let root = lowering.standalone(expr)?;
    Ok(lowering.arena.finish(root))
}

struct Lowering<'a> {
    registry: &'a Registry,
    arena: ArenaBuilder,
    grafted: HashMap<&'a str, NodeId>,
}

impl<'a> Lowering<'a> {
    fn standalone(&mut self, expr: &Expr) -> Result<NodeId, ExprError> {
        match expr {
            Expr::Name { name, position } => self
                .resolve(name)
                .ok_or_else(|| invalid_expression("not a defined language", *position)),
            Expr::Group(inner) => self.standalone(inner),
            operation => self.node(operation),
        }
    }

    fn node(&mut self, expr: &Expr) -> Result<NodeId, ExprError> {
        match expr {
            Expr::Name { name, position } => {
                self.resolve(name)
                    .ok_or_else(|| ExprError::UndefinedReference {
                        name: name.clone(),
                        position: *position,
                    })
            }
            Expr::Group(inner) => self.standalone(inner),
            Expr::Star(inner) => {
                let inner = self.node(inner)?;
                Ok(self.arena.push(Node::Star(inner)))
            }
            Expr::Concat(left, right) => {
                let (l, r) = (self.node(left)?, self.node(right)?);
                Ok(self.arena.push(Node::Concat(l, r)))
            }
            Expr::Union(left, right) => {
                let (l, r) = (self.node(left)?, self.node(right)?);
                Ok(self.arena.push(Node::Union(l, r)))
            }
        }
    }

    fn resolve(&mut self, name: &str) -> Option<NodeId> {
        if let Some(&id) = self.grafted.get(name) {
            return Some(id);
        }
        let registry: &'a Registry = self.registry;
        let (bound_name, language) = registry.entry(name)?;
        let id = self.arena.graft(language);
        self.grafted.insert(bound_name, id);
        Some(id)
    }
}
