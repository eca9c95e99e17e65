use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult, InvalidOperation};
use crate::domain::kind::BookmarkKind;
use crate::domain::position::format_position;

/// Handle of a node inside a [`BookmarkTree`].
///
/// Generational: a handle to a released node never aliases a newer node.
pub type NodeId = Index;

/// One entry of a bookmark hierarchy.
///
/// Structure (`parent`, `children`) is only changed through [`BookmarkTree`];
/// everything else is plain data without validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkNode {
    kind: BookmarkKind,
    /// Non-owning back reference, None for the root and detached nodes
    parent: Option<NodeId>,
    /// Display order, caller-controlled
    children: Vec<NodeId>,
    url: String,
    title: String,
    description: String,
    keyword: String,
    expanded: bool,
}

impl BookmarkNode {
    pub fn new(kind: BookmarkKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            url: String::new(),
            title: String::new(),
            description: String::new(),
            keyword: String::new(),
            expanded: false,
        }
    }

    pub fn kind(&self) -> BookmarkKind {
        self.kind
    }

    /// Changing the kind does not revalidate url or children.
    pub fn set_kind(&mut self, kind: BookmarkKind) {
        self.kind = kind;
    }

    pub fn is_root(&self) -> bool {
        self.kind == BookmarkKind::Root
    }

    pub fn is_folder(&self) -> bool {
        self.kind == BookmarkKind::Folder
    }

    pub fn is_url(&self) -> bool {
        self.kind == BookmarkKind::Url
    }

    pub fn is_separator(&self) -> bool {
        self.kind == BookmarkKind::Separator
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Search-bar shortcut for this bookmark, empty if unset.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }
}

/// Arena-based bookmark hierarchy.
///
/// The tree owns every node it created, attached or not. Parents own their
/// children through the `children` list; the `parent` field is only a lookup
/// aid. Nodes are created detached and attached explicitly, and detached
/// subtrees stay alive until [`BookmarkTree::release`] frees them.
#[derive(Debug, Clone)]
pub struct BookmarkTree {
    /// Arena storage for all nodes, attached or detached
    arena: Arena<BookmarkNode>,
    /// The single root, created with the tree
    root: NodeId,
}

impl Default for BookmarkTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(BookmarkNode::new(BookmarkKind::Root));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached node. Attaching it is a separate [`add_child`] call.
    ///
    /// There is no parent argument: construction never attaches, so a node
    /// built as `(kind, parent)` elsewhere maps to `create_node(kind)`
    /// followed by `add_child(parent, id, None)`.
    ///
    /// [`add_child`]: BookmarkTree::add_child
    #[instrument(level = "trace", skip(self))]
    pub fn create_node(&mut self, kind: BookmarkKind) -> NodeId {
        self.arena.insert(BookmarkNode::new(kind))
    }

    pub fn get(&self, id: NodeId) -> Option<&BookmarkNode> {
        self.arena.get(id)
    }

    pub fn node(&self, id: NodeId) -> DomainResult<&BookmarkNode> {
        self.arena.get(id).ok_or(DomainError::NodeNotFound(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> DomainResult<&mut BookmarkNode> {
        self.arena.get_mut(id).ok_or(DomainError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    pub fn parent(&self, id: NodeId) -> DomainResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> DomainResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// Position of `child` among the children of `parent`.
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.get(parent)?.children.iter().position(|&c| c == child)
    }

    /// True if `node` is `ancestor` or lies somewhere below it.
    #[instrument(level = "trace", skip(self))]
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(idx) = current {
            if idx == ancestor {
                return true;
            }
            current = self.get(idx).and_then(|n| n.parent);
        }
        false
    }

    /// Insert `child` under `parent` at `index`, appending when the index is
    /// absent or past the end. Returns the position actually used.
    ///
    /// # Errors
    ///
    /// * `AlreadyAttached` if `child` still has a parent
    /// * `RootNotAttachable` if `child` is the tree root
    /// * `WouldCycle` if `parent` is `child` or one of its descendants
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: Option<usize>,
    ) -> DomainResult<usize> {
        self.node(parent)?;
        if child == self.root {
            return Err(InvalidOperation::RootNotAttachable.into());
        }
        if let Some(current) = self.node(child)?.parent {
            return Err(InvalidOperation::AlreadyAttached {
                child,
                parent: current,
            }
            .into());
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(InvalidOperation::WouldCycle { parent, child }.into());
        }

        let siblings = &mut self.node_mut(parent)?.children;
        let position = index.map_or(siblings.len(), |i| i.min(siblings.len()));
        siblings.insert(position, child);
        self.node_mut(child)?.parent = Some(parent);

        debug!("attached {:?} under {:?} at {}", child, parent, position);
        Ok(position)
    }

    /// Detach `child` from `parent` and return its former position.
    ///
    /// The detached subtree is left intact: its own children keep pointing at
    /// it as their parent.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomainResult<usize> {
        self.node(child)?;
        let siblings = &mut self.node_mut(parent)?.children;
        let position = siblings
            .iter()
            .position(|&c| c == child)
            .ok_or(InvalidOperation::NotAChild { parent, child })?;
        siblings.remove(position);
        self.node_mut(child)?.parent = None;

        debug!("detached {:?} from {:?} at {}", child, parent, position);
        Ok(position)
    }

    /// Detach `node` from wherever it is and attach it under `new_parent`.
    ///
    /// `index` refers to the sibling list after `node` was removed from it.
    /// Nothing changes when the move is rejected.
    #[instrument(level = "trace", skip(self))]
    pub fn move_node(
        &mut self,
        node: NodeId,
        new_parent: NodeId,
        index: Option<usize>,
    ) -> DomainResult<usize> {
        self.node(new_parent)?;
        if node == self.root {
            return Err(InvalidOperation::RootNotAttachable.into());
        }
        if self.is_ancestor_or_self(node, new_parent) {
            return Err(InvalidOperation::WouldCycle {
                parent: new_parent,
                child: node,
            }
            .into());
        }
        if let Some(old_parent) = self.node(node)?.parent {
            self.remove_child(old_parent, node)?;
        }
        self.add_child(new_parent, node, index)
    }

    /// Free a detached node and its whole subtree. Returns the number of nodes
    /// released.
    #[instrument(level = "trace", skip(self))]
    pub fn release(&mut self, node: NodeId) -> DomainResult<usize> {
        if node == self.root {
            return Err(InvalidOperation::ReleaseRoot.into());
        }
        if self.node(node)?.parent.is_some() {
            return Err(InvalidOperation::StillAttached(node).into());
        }

        let doomed: Vec<NodeId> = self.iter_from(node).map(|(idx, _)| idx).collect();
        for idx in &doomed {
            self.arena.remove(*idx);
        }
        debug!("released {} node(s) starting at {:?}", doomed.len(), node);
        Ok(doomed.len())
    }

    /// Number of live nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// A tree always holds its root.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of nodes reachable from the root.
    pub fn attached_len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order walk of the subtree starting at `start`.
    pub fn iter_from(&self, start: NodeId) -> TreeIterator<'_> {
        TreeIterator::new(self, start)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, self.root)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: NodeId) -> usize {
        if let Some(node) = self.get(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Follow child indexes from the root. An empty path is the root itself.
    #[instrument(level = "trace", skip(self))]
    pub fn resolve_position(&self, position: &[usize]) -> DomainResult<NodeId> {
        let mut current = self.root;
        for &i in position {
            current = *self
                .children(current)?
                .get(i)
                .ok_or_else(|| DomainError::InvalidPosition {
                    position: format_position(position),
                })?;
        }
        Ok(current)
    }

    /// Index path from the root to `id`, or None if `id` is not reachable from
    /// the root.
    pub fn position_of(&self, id: NodeId) -> DomainResult<Option<Vec<usize>>> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent {
            let i = self
                .index_of(parent, current)
                .ok_or(DomainError::NodeNotFound(current))?;
            path.push(i);
            current = parent;
        }
        if current != self.root {
            return Ok(None);
        }
        path.reverse();
        Ok(Some(path))
    }
}

pub struct TreeIterator<'a> {
    tree: &'a BookmarkTree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a BookmarkTree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a BookmarkNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a BookmarkTree,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a BookmarkTree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push((start, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a BookmarkNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
