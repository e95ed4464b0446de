// crates/rectweb-core/src/lib.rs
pub mod expression;
pub mod dependency;
pub mod elements;
pub mod style;
pub mod tree;

pub use expression::*;
pub use dependency::*;
pub use elements::*;
pub use style::*;
pub use tree::*;

/// Misuse of the construction API. Always fatal for the document being built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("'{helper}' can only be used inside a form")]
    OutsideForm { helper: &'static str },

    #[error("Form '{name}' would be nested inside another form")]
    NestedForm { name: String },

    #[error("{node} is not an input element")]
    NotAnInput { node: NodeId },

    #[error("{node} is a '{kind}' input, which has no checked state")]
    NotCheckable { node: NodeId, kind: &'static str },

    #[error("Grow weight {0} is outside [0, 1]")]
    GrowOutOfRange(f64),

    #[error("Invalid node name '{0}': names must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidName(String),

    #[error("Node name '{0}' is already taken")]
    DuplicateName(String),

    #[error("Spacers need a row or column flow container, but {0} has no flow")]
    SpacerOutsideFlow(NodeId),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
}

pub type BuildResult<T> = std::result::Result<T, BuildError>;
