// crates/rectweb-render/src/lib.rs
//! Compiles a rectangle tree into markup, a stylesheet and a runtime script.

use rectweb_core::{Expression, NodeId};

pub mod css;
pub mod script;
pub mod markup;
pub mod stylesheet;
pub mod runtime;
pub mod compiler;

pub use css::CssEmitter;
pub use script::ScriptEmitter;
pub use compiler::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("The {dimension} of {node} is only known after layout and cannot be written to the stylesheet")]
    DeferredInStylesheet { node: NodeId, dimension: &'static str },

    #[error("Expression refers to {0}, which is not part of the tree")]
    UnknownNode(NodeId),
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Lowers an expression into one target language.
pub trait ExpressionBackend {
    fn emit(&self, expr: &Expression) -> CompileResult<String>;
}

/// Numbers as both target languages read them.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoids "-0".
        "0".to_string()
    } else {
        format!("{}", value)
    }
}
