// crates/rectweb-render/src/compiler.rs

use tracing::info;

use rectweb_core::Tree;
use rectweb_layout::{Application, DocumentHead};

use crate::markup::render_markup;
use crate::runtime::render_script;
use crate::stylesheet::render_stylesheet;
use crate::CompileResult;

/// The three generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub markup: String,
    pub stylesheet: String,
    pub script: String,
}

/// Turns a finished tree into a [`Document`]. Compiling does not touch the
/// tree, so compiling twice yields identical output.
pub struct DocumentCompiler<'a> {
    tree: &'a Tree,
    head: &'a DocumentHead,
}

impl<'a> DocumentCompiler<'a> {
    pub fn new(tree: &'a Tree, head: &'a DocumentHead) -> Self {
        Self { tree, head }
    }

    pub fn compile(&self) -> CompileResult<Document> {
        let markup = render_markup(self.tree, self.head)?;
        let stylesheet = render_stylesheet(self.tree)?;
        let script = render_script(self.tree)?;

        info!(
            "Compiled {} nodes: {} bytes of markup, {} bytes of stylesheet, {} bytes of script",
            self.tree.len(),
            markup.len(),
            stylesheet.len(),
            script.len()
        );

        Ok(Document { markup, stylesheet, script })
    }
}

pub fn compile(app: &Application) -> CompileResult<Document> {
    DocumentCompiler::new(app.tree(), app.head()).compile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rectweb_core::{Dimension, Pivot, VIEWPORT_WIDTH};

    #[test]
    fn test_compile_is_repeatable() {
        let mut app = Application::new();
        {
            let mut header = app.rectangle("header").unwrap();
            header.node_mut().set_width(VIEWPORT_WIDTH);
            let height = header.size()[1].clone();
            let mut title = header.rectangle("title").unwrap();
            title.node_mut().set_position(10, height / 2, Pivot::TopLeft);
        }

        let first = compile(&app).unwrap();
        let second = compile(&app).unwrap();
        assert_eq!(first, second);
        assert!(first.stylesheet.contains("width: calc(100vw);"));
        assert!(first.script.contains("header_height"));
        assert!(first.markup.contains("<div id=\"title\"></div>"));
    }

    #[test]
    fn test_empty_application() {
        let app = Application::new();
        let document = compile(&app).unwrap();
        assert!(document.stylesheet.is_empty());
        assert!(document.markup.contains("<body>\n</body>"));
        assert_eq!(document.script, "window.addEventListener('load', function() {\n});\n");
    }

    #[test]
    fn test_separate_head() {
        let mut app = Application::new();
        app.set_title("Portfolio");
        drop(app.rectangle("main").unwrap());
        let head = DocumentHead {
            title: "Other".to_string(),
            ..DocumentHead::default()
        };

        let document = DocumentCompiler::new(app.tree(), &head).compile().unwrap();
        assert!(document.markup.contains("<title>Other</title>"));
        assert!(compile(&app).unwrap().markup.contains("<title>Portfolio</title>"));
        assert!(app.get_node(app.tree().find("main").unwrap()).unwrap().declared_size(Dimension::Width).is_none());
    }
}
