// crates/rectweb-core/src/tree.rs
//! Append-only node arena plus the construction cursor.

use std::collections::{BTreeMap, HashSet};
use std::ops::{Index, IndexMut};
use tracing::debug;

use crate::elements::{ElementKind, Node, NodeId};
use crate::{BuildError, BuildResult};

#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub node: Node,
    pub name: String,
    pub class_name: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Owns every node of a document. Nodes are never removed; children keep
/// their insertion order, which is also their markup order.
#[derive(Debug, Clone)]
pub struct Tree {
    entries: Vec<TreeEntry>,
    names: HashSet<String>,
    labels: BTreeMap<NodeId, NodeId>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates a tree holding only the synthetic body node.
    pub fn new() -> Self {
        let root = TreeEntry {
            node: Node::new(NodeId::ROOT, ElementKind::Plain),
            name: "body".to_string(),
            class_name: None,
            parent: None,
            children: Vec::new(),
        };
        // Reserved: the root's geometry is read through `document.body`.
        let names = HashSet::from([root.name.clone()]);
        Self {
            entries: vec![root],
            names,
            labels: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Appends a new node as the last child of `parent`.
    pub fn insert(
        &mut self,
        parent: NodeId,
        name: Option<&str>,
        class_name: Option<&str>,
        kind: ElementKind,
    ) -> BuildResult<NodeId> {
        if self.get(parent).is_none() {
            return Err(BuildError::UnknownNode(parent));
        }

        let index = u32::try_from(self.entries.len()).map_err(|_| BuildError::UnknownNode(parent))?;
        let id = NodeId::new(index);

        let name = match name {
            Some(name) => {
                if !is_valid_name(name) {
                    return Err(BuildError::InvalidName(name.to_string()));
                }
                if self.names.contains(name) {
                    return Err(BuildError::DuplicateName(name.to_string()));
                }
                name.to_string()
            }
            None => self.generated_name(id),
        };

        debug!("Creating {} '{}' under {}", id, name, parent);

        self.names.insert(name.clone());
        self.entries.push(TreeEntry {
            node: Node::new(id, kind),
            name,
            class_name: class_name.map(str::to_string),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.entries[parent.index()].children.push(id);

        Ok(id)
    }

    fn generated_name(&self, id: NodeId) -> String {
        let base = format!("rect_{}", id.index());
        if !self.names.contains(&base) {
            return base;
        }
        (1..)
            .map(|suffix| format!("{}_{}", base, suffix))
            .find(|candidate| !self.names.contains(candidate))
            .unwrap_or(base)
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeEntry> {
        self.entries.get(id.index())
    }

    pub fn entry(&self, id: NodeId) -> BuildResult<&TreeEntry> {
        self.get(id).ok_or(BuildError::UnknownNode(id))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.get(id).map(|entry| &entry.node)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.entries.get_mut(id.index()).map(|entry| &mut entry.node)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|entry| entry.name.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|entry| entry.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|entry| entry.children.as_slice()).unwrap_or(&[])
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.entries
            .iter()
            .skip(1)
            .find(|entry| entry.name == name)
            .map(|entry| entry.node.id())
    }

    /// Number of nodes, not counting the body.
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn link_label(&mut self, label: NodeId, input: NodeId) {
        self.labels.insert(label, input);
    }

    pub fn label_target(&self, label: NodeId) -> Option<NodeId> {
        self.labels.get(&label).copied()
    }

    /// Every node below `start` (exclusive) in pre-order.
    pub fn descendants(&self, start: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(start).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }
}

/// Panics if the id was not minted by this tree, like slice indexing.
impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.entries[id.index()].node
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.entries[id.index()].node
    }
}

pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}

/// Names double as element ids and script identifiers.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Stack of currently open nodes. The top is the parent of the next node.
/// The body sits at the bottom and is never popped.
#[derive(Debug, Clone)]
pub struct Cursor {
    stack: Vec<NodeId>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self { stack: vec![NodeId::ROOT] }
    }

    pub fn push(&mut self, id: NodeId) {
        self.stack.push(id);
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    pub fn top(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }

    /// Open nodes above the body.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Open nodes from the innermost outwards.
    pub fn open(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.stack.iter().rev().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = Tree::new();
        let header = tree.insert(tree.root(), Some("header"), None, ElementKind::Plain).unwrap();
        let main = tree.insert(tree.root(), Some("main"), None, ElementKind::Plain).unwrap();
        let menu = tree.insert(header, Some("menu"), Some("nav"), ElementKind::Plain).unwrap();

        assert_eq!(tree.children(tree.root()), &[header, main]);
        assert_eq!(tree.parent(menu), Some(header));
        assert_eq!(tree.get(menu).unwrap().class_name.as_deref(), Some("nav"));
        assert_eq!(tree.len(), 3);

        let order: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(order, vec![header, menu, main]);
    }

    #[test]
    fn test_names_are_validated_and_unique() {
        let mut tree = Tree::new();
        tree.insert(tree.root(), Some("menu"), None, ElementKind::Plain).unwrap();

        assert_eq!(
            tree.insert(tree.root(), Some("menu"), None, ElementKind::Plain),
            Err(BuildError::DuplicateName("menu".to_string()))
        );
        assert_eq!(
            tree.insert(tree.root(), Some("main-content"), None, ElementKind::Plain),
            Err(BuildError::InvalidName("main-content".to_string()))
        );
        assert!(matches!(
            tree.insert(tree.root(), Some("1st"), None, ElementKind::Plain),
            Err(BuildError::InvalidName(_))
        ));
    }

    #[test]
    fn test_body_name_is_reserved() {
        let mut tree = Tree::new();
        assert_eq!(
            tree.insert(tree.root(), Some("body"), None, ElementKind::Plain),
            Err(BuildError::DuplicateName("body".to_string()))
        );
        assert_eq!(tree.find("body"), None);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_generated_names_avoid_taken_ones() {
        let mut tree = Tree::new();
        tree.insert(tree.root(), Some("rect_2"), None, ElementKind::Plain).unwrap();
        let second = tree.insert(tree.root(), None, None, ElementKind::Plain).unwrap();
        let third = tree.insert(tree.root(), None, None, ElementKind::Plain).unwrap();

        assert_eq!(tree.name(second), Some("rect_2_1"));
        assert_eq!(tree.name(third), Some("rect_3"));
        assert_eq!(tree.find("rect_3"), Some(third));
    }

    #[test]
    fn test_unknown_parent() {
        let mut tree = Tree::new();
        let missing = NodeId::new(42);
        assert_eq!(
            tree.insert(missing, None, None, ElementKind::Plain),
            Err(BuildError::UnknownNode(missing))
        );
    }

    #[test]
    fn test_cursor_never_pops_the_body() {
        let mut cursor = Cursor::new();
        cursor.push(NodeId::new(1));
        cursor.push(NodeId::new(2));
        assert_eq!(cursor.top(), NodeId::new(2));
        assert_eq!(cursor.depth(), 2);

        assert_eq!(cursor.pop(), Some(NodeId::new(2)));
        assert_eq!(cursor.pop(), Some(NodeId::new(1)));
        assert_eq!(cursor.pop(), None);
        assert_eq!(cursor.top(), NodeId::ROOT);
    }
}
