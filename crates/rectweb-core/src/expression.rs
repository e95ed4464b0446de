// crates/rectweb-core/src/expression.rs
//! Symbolic layout expressions.
//!
//! An [`Expression`] is pure data: the arithmetic operators below only build
//! a new tree, they never evaluate anything. Evaluation happens later, either
//! by the browser (through the emitted stylesheet or script) or explicitly
//! through [`Expression::evaluate`] against a known [`Environment`].

use glam::Vec2;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::sync::Arc;

use crate::NodeId;

/// Binary operators an expression node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    FloatDiv,
    IntDiv,
    Mod,
    Pow,
    Min,
    Max,
}

impl Operator {
    /// Additive operators combine two lengths, so numeric operands under
    /// them are pixel lengths rather than bare factors.
    pub fn is_additive(self) -> bool {
        matches!(self, Operator::Add | Operator::Sub | Operator::Min | Operator::Max)
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::FloatDiv => lhs / rhs,
            Operator::IntDiv => (lhs / rhs).floor(),
            // Result takes the sign of the divisor.
            Operator::Mod => lhs - rhs * (lhs / rhs).floor(),
            Operator::Pow => lhs.powf(rhs),
            Operator::Min => lhs.min(rhs),
            Operator::Max => lhs.max(rhs),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mul => "mul",
            Operator::FloatDiv => "fdiv",
            Operator::IntDiv => "div",
            Operator::Mod => "mod",
            Operator::Pow => "pow",
            Operator::Min => "min",
            Operator::Max => "max",
        }
    }
}

/// Stylesheet units. Each leaf denotes one full unit, i.e. `100vw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    ViewportWidth,
    ViewportHeight,
    ViewportMin,
    ViewportMax,
    /// 100% of the parent's extent along the property's axis.
    ParentExtent,
}

impl Unit {
    pub fn css_suffix(self) -> &'static str {
        match self {
            Unit::ViewportWidth => "vw",
            Unit::ViewportHeight => "vh",
            Unit::ViewportMin => "vmin",
            Unit::ViewportMax => "vmax",
            Unit::ParentExtent => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Dimension::Width => 0,
            Dimension::Height => 1,
        }
    }
}

/// The rendered width or height of a specific, already constructed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeferredLeaf {
    pub dimension: Dimension,
    pub node: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leaf {
    Unit(Unit),
    Deferred(DeferredLeaf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A plain number; a pixel length in additive context, a factor otherwise.
    Number(f64),
    Leaf(Leaf),
    BinaryOp {
        op: Operator,
        left: Arc<Expression>,
        right: Arc<Expression>,
    },
}

pub const VIEWPORT_WIDTH: Expression = Expression::Leaf(Leaf::Unit(Unit::ViewportWidth));
pub const VIEWPORT_HEIGHT: Expression = Expression::Leaf(Leaf::Unit(Unit::ViewportHeight));
pub const VIEWPORT_MIN: Expression = Expression::Leaf(Leaf::Unit(Unit::ViewportMin));
pub const VIEWPORT_MAX: Expression = Expression::Leaf(Leaf::Unit(Unit::ViewportMax));
pub const PARENT_EXTENT: Expression = Expression::Leaf(Leaf::Unit(Unit::ParentExtent));

impl Expression {
    pub fn binary(op: Operator, left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Expression::BinaryOp {
            op,
            left: Arc::new(left.into()),
            right: Arc::new(right.into()),
        }
    }

    pub fn deferred(dimension: Dimension, node: NodeId) -> Self {
        Expression::Leaf(Leaf::Deferred(DeferredLeaf { dimension, node }))
    }

    /// Floor division (`//`).
    pub fn floor_div(self, rhs: impl Into<Expression>) -> Self {
        Expression::binary(Operator::IntDiv, self, rhs)
    }

    pub fn pow(self, rhs: impl Into<Expression>) -> Self {
        Expression::binary(Operator::Pow, self, rhs)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expression::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Expression::BinaryOp { .. })
    }

    /// Collapses every operator node whose operands are both numbers.
    pub fn fold(&self) -> Expression {
        match self {
            Expression::BinaryOp { op, left, right } => {
                let left = left.fold();
                let right = right.fold();
                match (left.as_number(), right.as_number()) {
                    (Some(lhs), Some(rhs)) => Expression::Number(op.apply(lhs, rhs)),
                    _ => Expression::binary(*op, left, right),
                }
            }
            other => other.clone(),
        }
    }

    /// Evaluates the tree against concrete geometry. Returns `None` when a
    /// deferred leaf has no known size in the environment.
    pub fn evaluate(&self, env: &Environment) -> Option<f64> {
        match self {
            Expression::Number(value) => Some(*value),
            Expression::Leaf(Leaf::Unit(unit)) => Some(env.unit_value(*unit)),
            Expression::Leaf(Leaf::Deferred(leaf)) => env.deferred.get(leaf).copied(),
            Expression::BinaryOp { op, left, right } => {
                Some(op.apply(left.evaluate(env)?, right.evaluate(env)?))
            }
        }
    }
}

pub fn min(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Expression {
    Expression::binary(Operator::Min, lhs, rhs)
}

pub fn max(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Expression {
    Expression::binary(Operator::Max, lhs, rhs)
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Number(value)
    }
}

impl From<f32> for Expression {
    fn from(value: f32) -> Self {
        Expression::Number(f64::from(value))
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Self {
        Expression::Number(f64::from(value))
    }
}

impl From<u32> for Expression {
    fn from(value: u32) -> Self {
        Expression::Number(f64::from(value))
    }
}

impl From<&Expression> for Expression {
    fn from(value: &Expression) -> Self {
        value.clone()
    }
}

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<Expression>> $trait<T> for Expression {
            type Output = Expression;

            fn $method(self, rhs: T) -> Expression {
                Expression::binary($op, self, rhs)
            }
        }

        impl<T: Into<Expression>> $trait<T> for &Expression {
            type Output = Expression;

            fn $method(self, rhs: T) -> Expression {
                Expression::binary($op, self.clone(), rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add, Operator::Add);
impl_binary_operator!(Sub, sub, Operator::Sub);
impl_binary_operator!(Mul, mul, Operator::Mul);
impl_binary_operator!(Div, div, Operator::FloatDiv);
impl_binary_operator!(Rem, rem, Operator::Mod);

// Numbers on the left-hand side. Multiplication keeps the expression first,
// so `0.3 * PARENT_EXTENT` reads `(100% * 0.3)` once emitted.
macro_rules! impl_number_lhs {
    ($($number:ty),*) => {$(
        impl Add<Expression> for $number {
            type Output = Expression;
            fn add(self, rhs: Expression) -> Expression {
                Expression::binary(Operator::Add, self, rhs)
            }
        }

        impl Sub<Expression> for $number {
            type Output = Expression;
            fn sub(self, rhs: Expression) -> Expression {
                Expression::binary(Operator::Sub, self, rhs)
            }
        }

        impl Mul<Expression> for $number {
            type Output = Expression;
            fn mul(self, rhs: Expression) -> Expression {
                Expression::binary(Operator::Mul, rhs, self)
            }
        }

        impl Div<Expression> for $number {
            type Output = Expression;
            fn div(self, rhs: Expression) -> Expression {
                Expression::binary(Operator::FloatDiv, self, rhs)
            }
        }

        impl Rem<Expression> for $number {
            type Output = Expression;
            fn rem(self, rhs: Expression) -> Expression {
                Expression::binary(Operator::Mod, self, rhs)
            }
        }
    )*};
}

impl_number_lhs!(f64, i32);

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        self * -1
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(value) => write!(f, "{}", value),
            Expression::Leaf(Leaf::Unit(unit)) => write!(f, "100{}", unit.css_suffix()),
            Expression::Leaf(Leaf::Deferred(leaf)) => {
                write!(f, "{}.{}", leaf.node, leaf.dimension.as_str())
            }
            Expression::BinaryOp { op, left, right } => {
                write!(f, "{}({}, {})", op.name(), left, right)
            }
        }
    }
}

/// Concrete geometry used to evaluate an expression outside the browser.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub viewport: Vec2,
    pub parent: Vec2,
    /// Axis of the property being evaluated; selects the parent extent.
    pub axis: Option<Dimension>,
    pub deferred: HashMap<DeferredLeaf, f64>,
}

impl Environment {
    pub fn new(viewport: Vec2, parent: Vec2) -> Self {
        Self {
            viewport,
            parent,
            axis: None,
            deferred: HashMap::new(),
        }
    }

    pub fn with_axis(mut self, axis: Dimension) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn with_deferred(mut self, leaf: DeferredLeaf, value: f64) -> Self {
        self.deferred.insert(leaf, value);
        self
    }

    pub fn unit_value(&self, unit: Unit) -> f64 {
        let value = match unit {
            Unit::ViewportWidth => self.viewport.x,
            Unit::ViewportHeight => self.viewport.y,
            Unit::ViewportMin => self.viewport.x.min(self.viewport.y),
            Unit::ViewportMax => self.viewport.x.max(self.viewport.y),
            Unit::ParentExtent => match self.axis.unwrap_or(Dimension::Width) {
                Dimension::Width => self.parent.x,
                Dimension::Height => self.parent.y,
            },
        };
        f64::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators_build_trees() {
        let expr = VIEWPORT_WIDTH - 20;
        match &expr {
            Expression::BinaryOp { op, left, right } => {
                assert_eq!(*op, Operator::Sub);
                assert_eq!(**left, VIEWPORT_WIDTH);
                assert_eq!(**right, Expression::Number(20.0));
            }
            other => panic!("expected an operator node, got {:?}", other),
        }
    }

    #[test]
    fn test_number_times_expression_keeps_expression_first() {
        let expr = 0.3 * PARENT_EXTENT;
        assert_eq!(expr, Expression::binary(Operator::Mul, PARENT_EXTENT, 0.3));

        let expr = 10 - VIEWPORT_HEIGHT;
        assert_eq!(expr, Expression::binary(Operator::Sub, 10, VIEWPORT_HEIGHT));
    }

    #[test]
    fn test_negation_multiplies_by_minus_one() {
        assert_eq!(-VIEWPORT_MIN, Expression::binary(Operator::Mul, VIEWPORT_MIN, -1));
    }

    #[test]
    fn test_fold_collapses_numeric_subtrees() {
        let expr = VIEWPORT_WIDTH + (Expression::from(2) * 3);
        assert_eq!(expr.fold(), Expression::binary(Operator::Add, VIEWPORT_WIDTH, 6.0));

        let expr = Expression::from(7).floor_div(2) + Expression::from(2).pow(3);
        assert_eq!(expr.fold(), Expression::Number(11.0));
    }

    #[test]
    fn test_mod_follows_divisor_sign() {
        assert_eq!(Operator::Mod.apply(-7.0, 3.0), 2.0);
        assert_eq!(Operator::Mod.apply(7.0, -3.0), -2.0);
    }

    #[test]
    fn test_evaluate_with_environment() {
        let env = Environment::new(Vec2::new(1280.0, 720.0), Vec2::new(400.0, 300.0))
            .with_axis(Dimension::Height);

        assert_eq!((VIEWPORT_WIDTH - 80).evaluate(&env), Some(1200.0));
        assert_eq!((0.5 * PARENT_EXTENT).evaluate(&env), Some(150.0));
        assert_eq!(max(VIEWPORT_MIN, 800).evaluate(&env), Some(800.0));
        assert_eq!(min(VIEWPORT_MAX, 800).evaluate(&env), Some(800.0));
    }

    #[test]
    fn test_evaluate_needs_deferred_sizes() {
        let leaf = DeferredLeaf { dimension: Dimension::Height, node: NodeId::new(4) };
        let expr = Expression::Leaf(Leaf::Deferred(leaf)) + 10;

        let env = Environment::default();
        assert_eq!(expr.evaluate(&env), None);

        let env = env.with_deferred(leaf, 32.0);
        assert_eq!(expr.evaluate(&env), Some(42.0));
    }
}
