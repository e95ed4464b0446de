// crates/rectweb-core/src/dependency.rs
//! Finds the deferred-geometry leaves of an expression.
//!
//! An expression without deferred leaves is resolvable at generation time and
//! can be lowered to the stylesheet. Anything else has to be computed by the
//! runtime script once the browser has laid the document out.

use std::collections::BTreeSet;

use crate::expression::{DeferredLeaf, Expression, Leaf, Unit};

/// Lazy, left-to-right walk over the deferred leaves of an expression.
///
/// Only operator nodes are recursed into; numbers and unit leaves are skipped.
/// Every call to [`Expression::deferred_leaves`] starts a fresh walk.
pub struct DeferredLeaves<'a> {
    stack: Vec<&'a Expression>,
}

impl<'a> Iterator for DeferredLeaves<'a> {
    type Item = DeferredLeaf;

    fn next(&mut self) -> Option<DeferredLeaf> {
        while let Some(expr) = self.stack.pop() {
            match expr {
                Expression::Leaf(Leaf::Deferred(leaf)) => return Some(*leaf),
                Expression::BinaryOp { left, right, .. } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
                Expression::Leaf(Leaf::Unit(_)) | Expression::Number(_) => {}
            }
        }
        None
    }
}

impl Expression {
    pub fn deferred_leaves(&self) -> DeferredLeaves<'_> {
        DeferredLeaves { stack: vec![self] }
    }

    /// The distinct `(dimension, node)` pairs this expression depends on.
    pub fn collect_deferred_leaves(&self) -> BTreeSet<DeferredLeaf> {
        self.deferred_leaves().collect()
    }

    /// True when no deferred leaf occurs anywhere in the tree.
    pub fn is_resolvable(&self) -> bool {
        self.deferred_leaves().next().is_none()
    }

    pub fn uses_unit(&self, unit: Unit) -> bool {
        match self {
            Expression::Leaf(Leaf::Unit(found)) => *found == unit,
            Expression::BinaryOp { left, right, .. } => left.uses_unit(unit) || right.uses_unit(unit),
            Expression::Leaf(Leaf::Deferred(_)) | Expression::Number(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{max, Dimension, PARENT_EXTENT, VIEWPORT_WIDTH};
    use crate::NodeId;

    fn width_of(index: u32) -> Expression {
        Expression::deferred(Dimension::Width, NodeId::new(index))
    }

    fn height_of(index: u32) -> Expression {
        Expression::deferred(Dimension::Height, NodeId::new(index))
    }

    #[test]
    fn test_units_and_numbers_are_resolvable() {
        let expr = max(VIEWPORT_WIDTH * 0.5, 300) - 20;
        assert!(expr.is_resolvable());
        assert!(expr.collect_deferred_leaves().is_empty());
    }

    #[test]
    fn test_leaves_come_out_left_to_right() {
        let expr = (height_of(2) + width_of(1)) * 2 + height_of(3);
        let leaves: Vec<_> = expr.deferred_leaves().map(|leaf| leaf.node.index()).collect();
        assert_eq!(leaves, vec![2, 1, 3]);
    }

    #[test]
    fn test_repeated_leaves_collapse_in_the_set() {
        let expr = height_of(1) + height_of(1) * 2 - width_of(1);
        assert_eq!(expr.deferred_leaves().count(), 3);

        let set = expr.collect_deferred_leaves();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&DeferredLeaf { dimension: Dimension::Height, node: NodeId::new(1) }));
        assert!(set.contains(&DeferredLeaf { dimension: Dimension::Width, node: NodeId::new(1) }));
    }

    #[test]
    fn test_walk_is_restartable() {
        let expr = height_of(5) + 1;
        assert_eq!(expr.deferred_leaves().count(), 1);
        assert_eq!(expr.deferred_leaves().count(), 1);
        assert!(!expr.is_resolvable());
    }

    #[test]
    fn test_uses_unit() {
        let expr = height_of(1) + PARENT_EXTENT * 0.5;
        assert!(expr.uses_unit(Unit::ParentExtent));
        assert!(!expr.uses_unit(Unit::ViewportWidth));
    }
}
