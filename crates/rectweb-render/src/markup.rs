// crates/rectweb-render/src/markup.rs
//! HTML generation. One element per node, nested the way the tree is.

use tracing::warn;

use rectweb_core::{ElementKind, NodeId, Tree, TreeEntry};
use rectweb_layout::DocumentHead;

use crate::{CompileError, CompileResult};

const INDENT: &str = "    ";

/// Escapes a value for use inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            c => out.push(c),
        }
    }
    out
}

fn escape_text(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn render_markup(tree: &Tree, head: &DocumentHead) -> CompileResult<String> {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str(INDENT);
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(INDENT);
    out.push_str(&format!("<title>{}</title>\n", escape_text(&head.title)));
    out.push_str(INDENT);
    out.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        escape_attribute(&head.stylesheet_href)
    ));
    out.push_str(INDENT);
    out.push_str(&format!(
        "<script src=\"{}\"></script>\n",
        escape_attribute(&head.script_href)
    ));
    for line in &head.metadata {
        out.push_str(INDENT);
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("</head>\n<body>\n");

    for &child in tree.children(tree.root()) {
        render_element(tree, child, 1, &mut out)?;
    }

    out.push_str("</body>\n</html>\n");
    Ok(out)
}

fn render_element(tree: &Tree, id: NodeId, depth: usize, out: &mut String) -> CompileResult<()> {
    let entry = tree.get(id).ok_or(CompileError::UnknownNode(id))?;
    let node = &entry.node;
    let indent = INDENT.repeat(depth);

    if let Some(src) = node.image() {
        if node.text().is_some() || !entry.children.is_empty() {
            warn!("'{}' shows an image; its text and children are dropped", entry.name);
        }
        out.push_str(&indent);
        match node.link() {
            Some(href) => out.push_str(&format!(
                "<a{} href=\"{}\"><img src=\"{}\" alt=\"\"></a>\n",
                identity(entry),
                escape_attribute(href),
                escape_attribute(src)
            )),
            None => out.push_str(&format!(
                "<img{} src=\"{}\" alt=\"\">\n",
                identity(entry),
                escape_attribute(src)
            )),
        }
        return Ok(());
    }

    let (tag, extra) = opening(tree, id, entry)?;
    out.push_str(&indent);
    out.push_str(&format!("<{}{}{}>", tag, identity(entry), extra));

    // Void element: nothing inside and no closing tag.
    if tag == "input" {
        if node.text().is_some() || !entry.children.is_empty() {
            warn!("Input '{}' cannot hold text or children", entry.name);
        }
        out.push('\n');
        return Ok(());
    }

    let text = node.text().unwrap_or_default();
    if entry.children.is_empty() {
        out.push_str(text);
        out.push_str(&format!("</{}>\n", tag));
        return Ok(());
    }

    out.push('\n');
    if !text.is_empty() {
        out.push_str(&INDENT.repeat(depth + 1));
        out.push_str(text);
        out.push('\n');
    }
    for &child in &entry.children {
        render_element(tree, child, depth + 1, out)?;
    }
    out.push_str(&indent);
    out.push_str(&format!("</{}>\n", tag));
    Ok(())
}

/// ` id="..."` plus the class attribute when one is set.
fn identity(entry: &TreeEntry) -> String {
    match &entry.class_name {
        Some(class) => format!(" id=\"{}\" class=\"{}\"", entry.name, escape_attribute(class)),
        None => format!(" id=\"{}\"", entry.name),
    }
}

fn opening(tree: &Tree, id: NodeId, entry: &TreeEntry) -> CompileResult<(&'static str, String)> {
    let node = &entry.node;
    Ok(match node.kind() {
        ElementKind::Form => ("form", String::new()),
        ElementKind::Label => match tree.label_target(id) {
            Some(input) => {
                let target = tree.name(input).ok_or(CompileError::UnknownNode(input))?;
                ("label", format!(" for=\"{}\"", target))
            }
            None => ("label", String::new()),
        },
        ElementKind::Input(kind) => {
            let mut extra = format!(" name=\"{}\" type=\"{}\"", entry.name, kind.as_str());
            if let Some(value) = node.input_value() {
                extra.push_str(&format!(" value=\"{}\"", escape_attribute(value)));
            }
            if node.checked() {
                extra.push_str(" checked");
            }
            ("input", extra)
        }
        ElementKind::Plain => match node.link() {
            Some(href) => ("a", format!(" href=\"{}\"", escape_attribute(href))),
            None => ("div", String::new()),
        },
    })
}
