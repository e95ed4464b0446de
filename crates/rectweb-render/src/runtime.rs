// crates/rectweb-render/src/runtime.rs
//! Runtime script for geometry the stylesheet cannot express.
//!
//! Every node with at least one deferred position or size component gets its
//! own block inside a single `load` handler. A block reads the rendered sizes
//! it depends on, then assigns the computed pixel values.

use tracing::debug;

use rectweb_core::{Dimension, NodeId, Tree, Unit};

use crate::script::{parent_variable, variable_name, ScriptEmitter};
use crate::stylesheet::{placements, Placement};
use crate::{CompileError, CompileResult, ExpressionBackend};

const ELEMENT: &str = "$element";

/// The statements of one node's block, without braces or indentation.
pub fn node_block(tree: &Tree, id: NodeId) -> CompileResult<Option<Vec<String>>> {
    let name = tree.name(id).ok_or(CompileError::UnknownNode(id))?;
    let deferred: Vec<Placement<'_>> = placements(tree, id)?
        .into_iter()
        .filter(|placement| !placement.expr.is_resolvable())
        .collect();
    if deferred.is_empty() {
        return Ok(None);
    }

    let mut lines = vec![format!("const {} = document.getElementById('{}');", ELEMENT, name)];

    for axis in [Dimension::Width, Dimension::Height] {
        let needs_parent = deferred
            .iter()
            .any(|placement| placement.axis == axis && placement.expr.uses_unit(Unit::ParentExtent));
        if needs_parent {
            lines.push(format!(
                "const {} = {}.parentElement.getBoundingClientRect().{};",
                parent_variable(axis),
                ELEMENT,
                axis.as_str()
            ));
        }
    }

    // First use wins; later references reuse the same variable.
    let mut queried: Vec<String> = Vec::new();
    for placement in &deferred {
        for leaf in placement.expr.deferred_leaves() {
            let variable = variable_name(tree, leaf)?;
            if queried.contains(&variable) {
                continue;
            }
            lines.push(format!(
                "const {} = {}.getBoundingClientRect().{};",
                variable,
                element_lookup(tree, leaf.node)?,
                leaf.dimension.as_str()
            ));
            queried.push(variable);
        }
    }

    for placement in &deferred {
        let value = ScriptEmitter::new(tree, placement.axis).emit(placement.expr)?;
        lines.push(format!("{}.style.{} = {} + 'px';", ELEMENT, placement.property, value));
    }

    debug!("'{}' gets {} runtime assignment(s)", name, deferred.len());
    Ok(Some(lines))
}

/// The body carries no id; it is reached through `document.body`.
fn element_lookup(tree: &Tree, id: NodeId) -> CompileResult<String> {
    if id == tree.root() {
        return Ok("document.body".to_string());
    }
    let name = tree.name(id).ok_or(CompileError::UnknownNode(id))?;
    Ok(format!("document.getElementById('{}')", name))
}

/// Blocks follow the markup order, so a node's block runs after the blocks
/// of the nodes that precede it in the document.
pub fn render_script(tree: &Tree) -> CompileResult<String> {
    let mut out = String::from("window.addEventListener('load', function() {\n");
    for id in tree.descendants(tree.root()) {
        if let Some(lines) = node_block(tree, id)? {
            out.push_str("    {\n");
            for line in lines {
                out.push_str("        ");
                out.push_str(&line);
                out.push('\n');
            }
            out.push_str("    }\n");
        }
    }
    out.push_str("});\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rectweb_core::{ElementKind, Expression, Pivot, PARENT_EXTENT};

    #[test]
    fn test_resolvable_nodes_have_no_block() {
        let mut tree = Tree::new();
        let id = tree.insert(tree.root(), Some("box"), None, ElementKind::Plain).unwrap();
        tree[id].set_size(100, 50);

        assert_eq!(node_block(&tree, id).unwrap(), None);
        assert_eq!(render_script(&tree).unwrap(), "window.addEventListener('load', function() {\n});\n");
    }

    #[test]
    fn test_block_queries_then_assigns() {
        let mut tree = Tree::new();
        let a = tree.insert(tree.root(), Some("A"), None, ElementKind::Plain).unwrap();
        let b = tree.insert(tree.root(), Some("B"), None, ElementKind::Plain).unwrap();
        let a_height = tree[a].extent(Dimension::Height);
        tree[b].set_size(40, a_height + 10);

        assert_eq!(
            node_block(&tree, b).unwrap().unwrap(),
            vec![
                "const $element = document.getElementById('B');",
                "const A_height = document.getElementById('A').getBoundingClientRect().height;",
                "$element.style.height = (A_height + 10) + 'px';",
            ]
        );
    }

    #[test]
    fn test_queries_are_deduplicated_in_first_use_order() {
        let mut tree = Tree::new();
        let a = tree.insert(tree.root(), Some("A"), None, ElementKind::Plain).unwrap();
        let c = tree.insert(tree.root(), Some("C"), None, ElementKind::Plain).unwrap();
        let b = tree.insert(tree.root(), Some("B"), None, ElementKind::Plain).unwrap();
        let a_width = tree[a].extent(Dimension::Width);
        let c_width = tree[c].extent(Dimension::Width);
        tree[b]
            .set_position(c_width.clone() + a_width.clone(), 0, Pivot::TopLeft)
            .set_width(a_width * 2 - c_width);

        let lines = node_block(&tree, b).unwrap().unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("const C_width = "));
        assert!(lines[2].starts_with("const A_width = "));
        assert_eq!(lines[3], "$element.style.left = (C_width + A_width) + 'px';");
        assert_eq!(lines[4], "$element.style.width = ((A_width * 2) - C_width) + 'px';");
    }

    #[test]
    fn test_parent_extent_is_queried_per_axis() {
        let mut tree = Tree::new();
        let a = tree.insert(tree.root(), Some("A"), None, ElementKind::Plain).unwrap();
        let b = tree.insert(tree.root(), Some("B"), None, ElementKind::Plain).unwrap();
        let a_height = tree[a].extent(Dimension::Height);
        tree[b].set_height(PARENT_EXTENT - a_height).set_width(PARENT_EXTENT * 0.5);

        let lines = node_block(&tree, b).unwrap().unwrap();
        assert_eq!(
            lines,
            vec![
                "const $element = document.getElementById('B');",
                "const $parent_height = $element.parentElement.getBoundingClientRect().height;",
                "const A_height = document.getElementById('A').getBoundingClientRect().height;",
                "$element.style.height = ($parent_height - A_height) + 'px';",
            ]
        );
    }

    #[test]
    fn test_body_size_is_read_from_document_body() {
        let mut tree = Tree::new();
        let child = tree.insert(tree.root(), Some("child"), None, ElementKind::Plain).unwrap();
        let body_height = tree[tree.root()].extent(Dimension::Height);
        tree[child].set_height(body_height - 10);

        assert_eq!(
            node_block(&tree, child).unwrap().unwrap(),
            vec![
                "const $element = document.getElementById('child');",
                "const body_height = document.body.getBoundingClientRect().height;",
                "$element.style.height = (body_height - 10) + 'px';",
            ]
        );
    }

    #[test]
    fn test_blocks_follow_document_order() {
        let mut tree = Tree::new();
        let a = tree.insert(tree.root(), Some("A"), None, ElementKind::Plain).unwrap();
        let outer = tree.insert(tree.root(), Some("outer"), None, ElementKind::Plain).unwrap();
        let inner = tree.insert(outer, Some("inner"), None, ElementKind::Plain).unwrap();
        let a_width = tree[a].extent(Dimension::Width);
        tree[inner].set_width(a_width.clone());
        tree[outer].set_width(a_width + Expression::from(1));

        let script = render_script(&tree).unwrap();
        let outer_at = script.find("getElementById('outer')").unwrap();
        let inner_at = script.find("getElementById('inner')").unwrap();
        assert!(outer_at < inner_at);
        assert_eq!(script.matches("    {\n").count(), 2);
    }
}
