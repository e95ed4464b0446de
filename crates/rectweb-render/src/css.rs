// crates/rectweb-render/src/css.rs
//! Stylesheet backend: lowers resolvable expressions to `calc()`.

use rectweb_core::{Expression, Leaf, Operator};

use crate::{format_number, CompileError, CompileResult, ExpressionBackend};

/// Emits CSS lengths.
///
/// A plain number becomes a pixel length without `calc()`; anything symbolic
/// is wrapped in `calc(...)`. Inside the expression a number is a pixel length
/// when its operator is additive (`+`, `-`, `min`, `max`) or `mod`, whose
/// operands must share a type, and a bare factor otherwise, since `calc()`
/// only multiplies and divides by unitless numbers. `pow()` is only valid
/// CSS when both of its operands are unitless.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssEmitter;

impl CssEmitter {
    pub fn new() -> Self {
        Self
    }

    fn term(&self, expr: &Expression, additive: bool) -> CompileResult<String> {
        match expr {
            Expression::Number(value) if additive => Ok(format!("{}px", format_number(*value))),
            Expression::Number(value) => Ok(format_number(*value)),
            Expression::Leaf(Leaf::Unit(unit)) => Ok(format!("100{}", unit.css_suffix())),
            Expression::Leaf(Leaf::Deferred(leaf)) => Err(CompileError::DeferredInStylesheet {
                node: leaf.node,
                dimension: leaf.dimension.as_str(),
            }),
            Expression::BinaryOp { op, left, right } => {
                let additive = op.is_additive() || matches!(op, Operator::Mod);
                let lhs = self.term(left, additive)?;
                let rhs = self.term(right, additive)?;
                Ok(match op {
                    Operator::Add => format!("({} + {})", lhs, rhs),
                    Operator::Sub => format!("({} - {})", lhs, rhs),
                    Operator::Mul => format!("({} * {})", lhs, rhs),
                    Operator::FloatDiv => format!("({} / {})", lhs, rhs),
                    Operator::IntDiv => format!("round(down, {} / {}, 1px)", lhs, rhs),
                    Operator::Mod => format!("mod({}, {})", lhs, rhs),
                    Operator::Pow => format!("pow({}, {})", lhs, rhs),
                    Operator::Min => format!("min({}, {})", lhs, rhs),
                    Operator::Max => format!("max({}, {})", lhs, rhs),
                })
            }
        }
    }
}

impl ExpressionBackend for CssEmitter {
    fn emit(&self, expr: &Expression) -> CompileResult<String> {
        match expr.fold() {
            Expression::Number(value) => Ok(format!("{}px", format_number(value))),
            folded => Ok(format!("calc({})", self.term(&folded, true)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rectweb_core::{
        max, min, Tree, ElementKind, Dimension, PARENT_EXTENT, VIEWPORT_HEIGHT, VIEWPORT_MAX,
        VIEWPORT_MIN, VIEWPORT_WIDTH,
    };

    fn emit(expr: Expression) -> String {
        CssEmitter::new().emit(&expr).unwrap()
    }

    #[test]
    fn test_numbers_are_pixels_without_calc() {
        assert_eq!(emit(Expression::from(100)), "100px");
        assert_eq!(emit(Expression::from(-12.5)), "-12.5px");
    }

    #[test]
    fn test_unit_leaves_are_one_full_unit() {
        assert_eq!(emit(VIEWPORT_WIDTH), "calc(100vw)");
        assert_eq!(emit(VIEWPORT_HEIGHT), "calc(100vh)");
        assert_eq!(emit(VIEWPORT_MIN), "calc(100vmin)");
        assert_eq!(emit(VIEWPORT_MAX), "calc(100vmax)");
        assert_eq!(emit(PARENT_EXTENT), "calc(100%)");
    }

    #[test]
    fn test_numbers_take_units_only_in_additive_context() {
        assert_eq!(emit(0.3 * PARENT_EXTENT), "calc((100% * 0.3))");
        assert_eq!(emit(VIEWPORT_WIDTH - 20), "calc((100vw - 20px))");
        assert_eq!(emit(VIEWPORT_WIDTH / 3), "calc((100vw / 3))");
        assert_eq!(
            emit(VIEWPORT_WIDTH * 0.5 + 10),
            "calc(((100vw * 0.5) + 10px))"
        );
    }

    #[test]
    fn test_min_and_max_are_functions() {
        assert_eq!(emit(min(VIEWPORT_WIDTH, 960)), "calc(min(100vw, 960px))");
        assert_eq!(
            emit(max(PARENT_EXTENT * 0.25, 200) - 16),
            "calc((max((100% * 0.25), 200px) - 16px))"
        );
    }

    #[test]
    fn test_remaining_operators() {
        assert_eq!(emit(VIEWPORT_WIDTH.floor_div(3)), "calc(round(down, 100vw / 3, 1px))");
        assert_eq!(emit(VIEWPORT_WIDTH % 7), "calc(mod(100vw, 7px))");
        assert_eq!(emit((PARENT_EXTENT * 0.5) % 12), "calc(mod((100% * 0.5), 12px))");
    }

    #[test]
    fn test_constants_are_folded_first() {
        assert_eq!(emit(Expression::from(748) - 200 - 30), "518px");
        assert_eq!(emit(VIEWPORT_WIDTH - Expression::from(2) * 8), "calc((100vw - 16px))");
    }

    #[test]
    fn test_deferred_leaves_are_rejected() {
        let mut tree = Tree::new();
        let id = tree.insert(tree.root(), Some("card"), None, ElementKind::Plain).unwrap();
        let height = tree[id].extent(Dimension::Height);

        assert_eq!(
            CssEmitter::new().emit(&(height + 10)),
            Err(CompileError::DeferredInStylesheet { node: id, dimension: "height" })
        );
    }
}
