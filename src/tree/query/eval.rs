//! Query evaluation
//!
//! Contexts are `Option<NodeId>`: `None` is the document node, the parent
//! of the root element.

use super::parser::{Axis, LocationPath, NodeTest, Operand, PredExpr, Predicate, Step};
use crate::tree::{NodeId, TreeDocument};

type Context = Option<NodeId>;

pub(super) fn evaluate_path(doc: &TreeDocument, path: &LocationPath, context: Context) -> Vec<Context> {
    let mut current = if path.absolute { vec![None] } else { vec![context] };
    for step in &path.steps {
        let mut next = Vec::new();
        for &ctx in &current {
            next.extend(evaluate_step(doc, step, ctx));
        }
        next.sort_unstable();
        next.dedup();
        current = next;
        if current.is_empty() {
            break;
        }
    }
    current
}

fn evaluate_step(doc: &TreeDocument, step: &Step, ctx: Context) -> Vec<Context> {
    let mut candidates: Vec<Context> = axis_nodes(doc, step.axis, ctx)
        .into_iter()
        .filter(|&c| matches_test(doc, &step.test, c))
        .collect();
    for predicate in &step.predicates {
        candidates = match predicate {
            Predicate::Position(n) => candidates.get(n - 1).copied().into_iter().collect(),
            Predicate::Expr(expr) => candidates
                .into_iter()
                .filter(|&c| evaluate_predicate(doc, expr, c))
                .collect(),
        };
    }
    candidates
}

fn axis_nodes(doc: &TreeDocument, axis: Axis, ctx: Context) -> Vec<Context> {
    match (axis, ctx) {
        (Axis::SelfNode, _) => vec![ctx],
        (Axis::Parent, None) => Vec::new(),
        (Axis::Parent, Some(id)) => vec![doc.node(id).and_then(|n| n.parent())],
        (Axis::Child, None) => doc.root().map(Some).into_iter().collect(),
        (Axis::Child, Some(id)) => doc
            .node(id)
            .map(|n| n.children().iter().copied().map(Some).collect())
            .unwrap_or_default(),
        (Axis::DescendantOrSelf, None) => {
            let mut nodes = vec![None];
            if let Some(root) = doc.root() {
                nodes.extend(doc.descendants(root).map(Some));
            }
            nodes
        }
        (Axis::DescendantOrSelf, Some(id)) => doc.descendants(id).map(Some).collect(),
    }
}

fn matches_test(doc: &TreeDocument, test: &NodeTest, ctx: Context) -> bool {
    match (test, ctx) {
        (NodeTest::AnyNode, _) => true,
        (_, None) => false,
        (NodeTest::Wildcard, Some(_)) => true,
        (NodeTest::Name(name), Some(id)) => doc[id].local_name() == name.as_str(),
    }
}

fn evaluate_predicate(doc: &TreeDocument, expr: &PredExpr, ctx: Context) -> bool {
    match expr {
        PredExpr::Or(lhs, rhs) => {
            evaluate_predicate(doc, lhs, ctx) || evaluate_predicate(doc, rhs, ctx)
        }
        PredExpr::And(lhs, rhs) => {
            evaluate_predicate(doc, lhs, ctx) && evaluate_predicate(doc, rhs, ctx)
        }
        PredExpr::Exists(operand) => !operand_values(doc, operand, ctx).is_empty(),
        PredExpr::Compare {
            operand,
            negated,
            value,
        } => operand_values(doc, operand, ctx)
            .iter()
            .any(|v| (v == value) != *negated),
    }
}

/// String values an operand yields; an empty list means the operand is absent.
fn operand_values<'d>(doc: &'d TreeDocument, operand: &Operand, ctx: Context) -> Vec<&'d str> {
    match operand {
        Operand::Attribute(name) => ctx
            .and_then(|id| doc[id].attribute(name))
            .into_iter()
            .collect(),
        Operand::Text => ctx.and_then(|id| doc[id].text()).into_iter().collect(),
        Operand::LocalName => ctx.map(|id| doc[id].local_name()).into_iter().collect(),
        Operand::Path(path) => evaluate_path(doc, path, ctx)
            .into_iter()
            .flatten()
            .map(|id| doc[id].text().unwrap_or_default())
            .collect(),
    }
}
