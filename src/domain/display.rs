//! Text rendering of bookmark trees via `termtree`.

use termtree::Tree;

use crate::domain::arena::{BookmarkNode, BookmarkTree, NodeId};
use crate::domain::kind::BookmarkKind;
use crate::domain::position::format_position;

const SEPARATOR_LABEL: &str = "────────";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append `<url>` to URL bookmarks
    pub show_urls: bool,
    /// Prefix every line with the node's dotted position
    pub show_positions: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_urls: true,
            show_positions: false,
        }
    }
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for BookmarkTree {
    fn to_tree_string(&self) -> Tree<String> {
        render_subtree(self, self.root(), RenderOptions::default())
    }
}

/// One-line label for a node.
pub fn node_label(node: &BookmarkNode, show_urls: bool) -> String {
    match node.kind() {
        BookmarkKind::Root => "Bookmarks".to_string(),
        BookmarkKind::Folder => format!("{}/", node.title()),
        BookmarkKind::Separator => SEPARATOR_LABEL.to_string(),
        BookmarkKind::Url => {
            let title = if node.title().is_empty() {
                node.url()
            } else {
                node.title()
            };
            let mut label = title.to_string();
            if show_urls {
                label.push_str(&format!(" <{}>", node.url()));
            }
            if !node.keyword().is_empty() {
                label.push_str(&format!(" [{}]", node.keyword()));
            }
            label
        }
        BookmarkKind::Invalid => format!("? {}", node.title()),
    }
}

/// Render `start` and everything below it. A stale id renders as a marker.
///
/// Positions are only shown when `start` is reachable from the root.
pub fn render_subtree(tree: &BookmarkTree, start: NodeId, options: RenderOptions) -> Tree<String> {
    fn label(node: &BookmarkNode, position: Option<&[usize]>, options: RenderOptions) -> String {
        let text = node_label(node, options.show_urls);
        match position {
            Some(p) if options.show_positions => format!("[{}] {}", format_position(p), text),
            _ => text,
        }
    }

    fn build(
        tree: &BookmarkTree,
        idx: NodeId,
        mut position: Option<&mut Vec<usize>>,
        options: RenderOptions,
        parent_tree: &mut Tree<String>,
    ) {
        let Some(node) = tree.get(idx) else {
            return;
        };
        for (i, &child_idx) in node.children().iter().enumerate() {
            if let Some(child) = tree.get(child_idx) {
                if let Some(p) = position.as_deref_mut() {
                    p.push(i);
                }
                let child_position = position.as_deref().map(Vec::as_slice);
                let mut child_tree = Tree::new(label(child, child_position, options));
                build(tree, child_idx, position.as_deref_mut(), options, &mut child_tree);
                parent_tree.push(child_tree);
                if let Some(p) = position.as_deref_mut() {
                    p.pop();
                }
            }
        }
    }

    match tree.get(start) {
        Some(node) => {
            let mut position = tree.position_of(start).ok().flatten();
            let mut rendered = Tree::new(label(node, position.as_deref(), options));
            build(tree, start, position.as_mut(), options, &mut rendered);
            rendered
        }
        None => Tree::new("<missing node>".to_string()),
    }
}
