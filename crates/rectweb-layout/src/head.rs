// crates/rectweb-layout/src/head.rs

/// Stylesheet file the markup links to.
pub const DEFAULT_STYLESHEET: &str = "style.css";
/// Script file the markup loads.
pub const DEFAULT_SCRIPT: &str = "code.js";
pub const DEFAULT_TITLE: &str = "rectweb-generated document";

/// Document-level settings that end up in `<head>`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHead {
    pub title: String,
    /// Raw markup lines, emitted verbatim after the generated links.
    pub metadata: Vec<String>,
    pub stylesheet_href: String,
    pub script_href: String,
}

impl Default for DocumentHead {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            metadata: Vec::new(),
            stylesheet_href: DEFAULT_STYLESHEET.to_string(),
            script_href: DEFAULT_SCRIPT.to_string(),
        }
    }
}
