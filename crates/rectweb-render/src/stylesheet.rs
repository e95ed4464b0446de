// crates/rectweb-render/src/stylesheet.rs
//! One `#name { ... }` rule per node.

use tracing::{debug, warn};

use rectweb_core::{css_color, Dimension, Expression, NodeId, Pivot, Tree};

use crate::{format_number, CompileError, CompileResult, CssEmitter, ExpressionBackend};

/// A position or size component together with the property it drives.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub property: &'static str,
    pub axis: Dimension,
    pub expr: &'a Expression,
}

/// Whether the node's own position is honoured. Children of a flow container
/// are placed by the browser instead.
pub fn is_positioned(tree: &Tree, id: NodeId) -> bool {
    let Some(node) = tree.node(id) else {
        return false;
    };
    node.has_position() && !parent_is_flex(tree, id)
}

fn parent_is_flex(tree: &Tree, id: NodeId) -> bool {
    tree.parent(id)
        .and_then(|parent| tree.node(parent))
        .map_or(false, |parent| parent.flow().is_flex())
}

/// Position components (when honoured) followed by size components, in
/// declaration order.
pub fn placements(tree: &Tree, id: NodeId) -> CompileResult<Vec<Placement<'_>>> {
    let node = tree.node(id).ok_or(CompileError::UnknownNode(id))?;
    let mut placements = Vec::new();

    if is_positioned(tree, id) {
        for axis in [Dimension::Width, Dimension::Height] {
            if let Some(expr) = node.position(axis) {
                placements.push(Placement {
                    property: node.pivot().offset_property(axis),
                    axis,
                    expr,
                });
            }
        }
    }

    for axis in [Dimension::Width, Dimension::Height] {
        if let Some(expr) = node.declared_size(axis) {
            placements.push(Placement {
                property: axis.as_str(),
                axis,
                expr,
            });
        }
    }

    Ok(placements)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl StyleRule {
    fn push(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.declarations.push((property.into(), value.into()));
    }

    pub fn render(&self, out: &mut String) {
        out.push_str(&self.selector);
        out.push_str(" {\n");
        for (property, value) in &self.declarations {
            out.push_str("    ");
            out.push_str(property);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(";\n");
        }
        out.push_str("}\n");
    }
}

/// Builds the rule for a single node. Components that depend on rendered
/// geometry are left out; the runtime script sets them.
pub fn node_rule(tree: &Tree, id: NodeId) -> CompileResult<StyleRule> {
    let entry = tree.entry(id).map_err(|_| CompileError::UnknownNode(id))?;
    let node = &entry.node;
    let parent_flex = parent_is_flex(tree, id);
    let css = CssEmitter::new();

    let mut rule = StyleRule {
        selector: format!("#{}", entry.name),
        declarations: Vec::new(),
    };

    if node.has_position() {
        if parent_flex {
            warn!("Ignoring position of '{}': its parent lays out its children", entry.name);
        } else {
            rule.push("position", "absolute");
        }
    }

    let placements = placements(tree, id)?;
    let (positions, sizes): (Vec<_>, Vec<_>) = placements
        .iter()
        .partition(|placement| placement.property != "width" && placement.property != "height");

    for placement in positions {
        emit_placement(&mut rule, &css, placement, &entry.name)?;
    }
    if is_positioned(tree, id) && node.pivot() == Pivot::Center {
        rule.push("transform", "translate(-50%, -50%)");
    }

    if let Some(direction) = node.flow().direction() {
        rule.push("display", "flex");
        rule.push("flex-direction", direction);
    }

    if let Some(grow) = node.grow() {
        if parent_flex {
            rule.push("flex-grow", format_number(grow));
        } else {
            warn!("Ignoring grow weight of '{}': its parent has no flow", entry.name);
        }
    }

    for placement in sizes {
        emit_placement(&mut rule, &css, placement, &entry.name)?;
    }

    if let Some(color) = node.fill_color() {
        rule.push("background-color", css_color(color));
    }
    if let Some(color) = node.text_color() {
        rule.push("color", css_color(color));
    }
    if let Some(font) = node.font() {
        rule.push("font-family", font);
    }
    if let Some(size) = node.font_size() {
        rule.push("font-size", format!("{}px", format_number(size)));
    }

    for (property, value) in node.style().iter() {
        rule.push(property, value);
    }

    Ok(rule)
}

fn emit_placement(
    rule: &mut StyleRule,
    css: &CssEmitter,
    placement: &Placement<'_>,
    name: &str,
) -> CompileResult<()> {
    if placement.expr.is_resolvable() {
        rule.push(placement.property, css.emit(placement.expr)?);
    } else {
        debug!("'{}' {} waits for layout", name, placement.property);
    }
    Ok(())
}

pub fn render_stylesheet(tree: &Tree) -> CompileResult<String> {
    let mut out = String::new();
    for (index, id) in tree.descendants(tree.root()).enumerate() {
        if index > 0 {
            out.push('\n');
        }
        node_rule(tree, id)?.render(&mut out);
    }
    Ok(out)
}
