// crates/rectweb-layout/src/lib.rs
//! Scoped construction of rectangle documents.
//!
//! An [`Application`] owns the node [`Tree`] and the construction [`Cursor`].
//! Opening a node returns a [`Scope`] guard; the node stays the implicit parent
//! of every node created through the guard until the guard is dropped, on any
//! exit path.

use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

use rectweb_core::{
    BuildError, BuildResult, Cursor, Dimension, ElementKind, Expression, Node, NodeId, Tree,
};

mod forms;
mod head;

pub use head::*;

#[derive(Debug, Default)]
pub struct Application {
    tree: Tree,
    cursor: Cursor,
    head: DocumentHead,
}

impl Application {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn head(&self) -> &DocumentHead {
        &self.head
    }

    pub fn head_mut(&mut self) -> &mut DocumentHead {
        &mut self.head
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.head.title = title.into();
    }

    /// Raw markup added to the document head.
    pub fn set_metadata(&mut self, markup: impl Into<String>) {
        self.head.metadata.push(markup.into());
    }

    /// The node new nodes are attached to.
    pub fn current(&self) -> NodeId {
        self.cursor.top()
    }

    pub fn cursor_depth(&self) -> usize {
        self.cursor.depth()
    }

    pub fn get_node(&self, id: NodeId) -> BuildResult<&Node> {
        self.tree.node(id).ok_or(BuildError::UnknownNode(id))
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> BuildResult<&mut Node> {
        self.tree.node_mut(id).ok_or(BuildError::UnknownNode(id))
    }

    /// Effective size of any node, usable before the node is laid out.
    pub fn get_size(&self, id: NodeId) -> BuildResult<[Expression; 2]> {
        Ok(self.get_node(id)?.size())
    }

    /// Creates a node under the current one and opens it.
    pub fn push_node(&mut self, name: Option<&str>, class_name: Option<&str>) -> BuildResult<Scope<'_>> {
        self.open(name, class_name, ElementKind::Plain)
    }

    pub fn rectangle(&mut self, name: &str) -> BuildResult<Scope<'_>> {
        self.push_node(Some(name), None)
    }

    pub fn rectangle_with_class(&mut self, name: &str, class_name: &str) -> BuildResult<Scope<'_>> {
        self.push_node(Some(name), Some(class_name))
    }

    /// An unnamed node; it gets a generated `rect_<id>` name.
    pub fn anonymous(&mut self) -> BuildResult<Scope<'_>> {
        self.push_node(None, None)
    }

    pub(crate) fn open(
        &mut self,
        name: Option<&str>,
        class_name: Option<&str>,
        kind: ElementKind,
    ) -> BuildResult<Scope<'_>> {
        let id = self.create(name, class_name, kind)?;
        self.cursor.push(id);
        Ok(Scope { app: self, id })
    }

    /// Creates a leaf under the current node without opening it.
    pub(crate) fn create(
        &mut self,
        name: Option<&str>,
        class_name: Option<&str>,
        kind: ElementKind,
    ) -> BuildResult<NodeId> {
        let parent = self.cursor.top();
        if let Some(node) = self.tree.node(parent) {
            if node.image().is_some() && node.link().is_none() {
                warn!("{} is an image; its children will not be rendered", parent);
            }
        }
        self.tree.insert(parent, name, class_name, kind)
    }

    /// A filler that takes up the free space of the enclosing flow container.
    pub fn spacer(&mut self) -> BuildResult<NodeId> {
        self.flow_axis()?;
        let id = self.create(None, None, ElementKind::Plain)?;
        self.get_node_mut(id)?.set_grow(1.0)?;
        debug!("Added flexible spacer {}", id);
        Ok(id)
    }

    /// A filler with a fixed extent along the container's main axis.
    pub fn fixed_spacer(&mut self, extent: impl Into<Expression>) -> BuildResult<NodeId> {
        let axis = self.flow_axis()?;
        let id = self.create(None, None, ElementKind::Plain)?;
        let node = self.get_node_mut(id)?;
        match axis {
            Dimension::Width => node.set_width(extent),
            Dimension::Height => node.set_height(extent),
        };
        node.set_style("flex-shrink", "0");
        debug!("Added fixed spacer {} along {}", id, axis.as_str());
        Ok(id)
    }

    fn flow_axis(&self) -> BuildResult<Dimension> {
        let parent = self.cursor.top();
        self.get_node(parent)?
            .flow()
            .main_axis()
            .ok_or(BuildError::SpacerOutsideFlow(parent))
    }

    /// Returns the innermost open form, if any.
    pub(crate) fn enclosing_form(&self) -> Option<NodeId> {
        self.cursor
            .open()
            .find(|id| matches!(self.tree.node(*id).map(Node::kind), Some(ElementKind::Form)))
    }

    fn close(&mut self, id: NodeId) {
        match self.cursor.pop() {
            Some(top) if top == id => {}
            other => warn!("Cursor out of sync: closing {} but popped {:?}", id, other),
        }
    }
}

/// An open node. Dropping the guard closes the node again.
///
/// Dereferences to the [`Application`], so nested nodes are created through
/// the guard itself.
pub struct Scope<'a> {
    app: &'a mut Application,
    id: NodeId,
}

impl Scope<'_> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &Node {
        &self.app.tree[self.id]
    }

    pub fn node_mut(&mut self) -> &mut Node {
        &mut self.app.tree[self.id]
    }

    pub fn name(&self) -> &str {
        self.app.tree.name(self.id).unwrap_or_default()
    }

    pub fn size(&self) -> [Expression; 2] {
        self.node().size()
    }
}

impl Deref for Scope<'_> {
    type Target = Application;

    fn deref(&self) -> &Application {
        &*self.app
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Application {
        &mut *self.app
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.app.close(self.id);
    }
}
