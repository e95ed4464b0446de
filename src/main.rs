use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rectweb_core::{Dimension, ElementKind, NodeId, Tree};
use rectweb_layout::{Application, DocumentHead};
use rectweb_render::Document;

mod site;

const MARKUP_FILE: &str = "index.html";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the generated files are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Print the rectangle tree instead of writing files
    #[arg(long)]
    tree: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut app = Application::new();
    if let Some(title) = &args.title {
        app.set_title(title.clone());
    }
    site::build(&mut app).context("Failed to build the demo document")?;
    info!("Built {} rectangles", app.tree().len());

    if args.tree {
        print!("{}", render_tree(app.tree()));
        return Ok(());
    }

    let mut document = rectweb_render::compile(&app).context("Failed to compile the document")?;
    document.stylesheet.push('\n');
    document.stylesheet.push_str(site::EXTRA_STYLESHEET);

    write_document(&document, app.head(), &args.out_dir)?;
    Ok(())
}

fn write_document(document: &Document, head: &DocumentHead, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    for (file, contents) in [
        (MARKUP_FILE, &document.markup),
        (head.stylesheet_href.as_str(), &document.stylesheet),
        (head.script_href.as_str(), &document.script),
    ] {
        let path = out_dir.join(file);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write to file: {}", path.display()))?;
        info!("Output written to: {}", path.display());
    }
    Ok(())
}

fn render_tree(tree: &Tree) -> String {
    let mut output = String::from("body\n");
    let children = tree.children(tree.root());
    for (index, &child) in children.iter().enumerate() {
        render_node(&mut output, tree, child, "", index + 1 == children.len());
    }
    output
}

fn render_node(output: &mut String, tree: &Tree, id: NodeId, prefix: &str, is_last: bool) {
    let Some(entry) = tree.get(id) else {
        return;
    };
    let branch = if is_last { "└── " } else { "├── " };

    output.push_str(prefix);
    output.push_str(branch);
    output.push_str(&entry.name);
    match entry.node.kind() {
        ElementKind::Plain => {}
        ElementKind::Label => output.push_str(" <label>"),
        ElementKind::Form => output.push_str(" <form>"),
        ElementKind::Input(kind) => output.push_str(&format!(" <input {}>", kind.as_str())),
    }
    if let Some(class) = &entry.class_name {
        output.push_str(&format!(" .{}", class));
    }

    let mut inline_props = Vec::new();
    for axis in [Dimension::Width, Dimension::Height] {
        if let Some(size) = entry.node.declared_size(axis) {
            inline_props.push(format!("{}:{}", axis.as_str(), size));
        }
    }
    if let Some(direction) = entry.node.flow().direction() {
        inline_props.push(format!("flow:{}", direction));
    }
    if let Some(grow) = entry.node.grow() {
        inline_props.push(format!("grow:{}", grow));
    }
    if !inline_props.is_empty() {
        output.push_str(&format!(" [{}]", inline_props.join(" ")));
    }
    output.push('\n');

    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
    for (index, &child) in entry.children.iter().enumerate() {
        render_node(output, tree, child, &child_prefix, index + 1 == entry.children.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rectweb_core::Flow;

    #[test]
    fn test_tree_dump() {
        let mut app = Application::new();
        {
            let mut row = app.rectangle("row").unwrap();
            row.node_mut().set_layout(Flow::Row).set_height(30);
            row.rectangle_with_class("left", "side").unwrap();
            row.spacer().unwrap();
        }
        app.rectangle("after").unwrap();

        assert_eq!(
            render_tree(app.tree()),
            "body\n├── row [height:30 flow:row]\n│   ├── left .side\n│   └── rect_3 [grow:1]\n└── after\n"
        );
    }
}
