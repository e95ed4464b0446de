// crates/rectweb-render/src/script.rs
//! Script backend: lowers expressions with deferred leaves to JavaScript.

use rectweb_core::{DeferredLeaf, Dimension, Expression, Leaf, Operator, Tree, Unit};

use crate::{format_number, CompileError, CompileResult, ExpressionBackend};

/// Emits a JavaScript number expression for a property along `axis`.
///
/// Deferred leaves read `<name>_<dimension>` variables that the surrounding
/// block declares. Stylesheet units map to their runtime equivalents; the
/// parent extent reads `$parent_width` or `$parent_height`.
#[derive(Debug, Clone, Copy)]
pub struct ScriptEmitter<'a> {
    tree: &'a Tree,
    axis: Dimension,
}

impl<'a> ScriptEmitter<'a> {
    pub fn new(tree: &'a Tree, axis: Dimension) -> Self {
        Self { tree, axis }
    }

    fn term(&self, expr: &Expression) -> CompileResult<String> {
        match expr {
            Expression::Number(value) => Ok(format_number(*value)),
            Expression::Leaf(Leaf::Unit(unit)) => Ok(unit_value(*unit, self.axis)),
            Expression::Leaf(Leaf::Deferred(leaf)) => variable_name(self.tree, *leaf),
            Expression::BinaryOp { op, left, right } => {
                let lhs = self.term(left)?;
                let rhs = self.term(right)?;
                Ok(match op {
                    Operator::Add => format!("({} + {})", lhs, rhs),
                    Operator::Sub => format!("({} - {})", lhs, rhs),
                    Operator::Mul => format!("({} * {})", lhs, rhs),
                    Operator::FloatDiv => format!("({} / {})", lhs, rhs),
                    Operator::IntDiv => format!("Math.floor({} / {})", lhs, rhs),
                    // JavaScript's % keeps the dividend's sign.
                    Operator::Mod => format!("((({} % {}) + {}) % {})", lhs, rhs, rhs, rhs),
                    // `**` rejects a unary minus on its base.
                    Operator::Pow => format!("Math.pow({}, {})", lhs, rhs),
                    Operator::Min => format!("Math.min({}, {})", lhs, rhs),
                    Operator::Max => format!("Math.max({}, {})", lhs, rhs),
                })
            }
        }
    }
}

impl ExpressionBackend for ScriptEmitter<'_> {
    fn emit(&self, expr: &Expression) -> CompileResult<String> {
        self.term(&expr.fold())
    }
}

/// Runtime variable holding the rendered size of a node.
pub fn variable_name(tree: &Tree, leaf: DeferredLeaf) -> CompileResult<String> {
    let name = tree.name(leaf.node).ok_or(CompileError::UnknownNode(leaf.node))?;
    Ok(format!("{}_{}", name, leaf.dimension.as_str()))
}

pub fn parent_variable(axis: Dimension) -> String {
    format!("$parent_{}", axis.as_str())
}

fn unit_value(unit: Unit, axis: Dimension) -> String {
    match unit {
        Unit::ViewportWidth => "window.innerWidth".to_string(),
        Unit::ViewportHeight => "window.innerHeight".to_string(),
        Unit::ViewportMin => "Math.min(window.innerWidth, window.innerHeight)".to_string(),
        Unit::ViewportMax => "Math.max(window.innerWidth, window.innerHeight)".to_string(),
        Unit::ParentExtent => parent_variable(axis),
    }
}
