//! JSON bookmarks document.
//!
//! ```json
//! {
//!   "version": 1,
//!   "roots": {
//!     "bookmark_bar": { "type": "folder", "title": "Bookmarks Toolbar", "children": [...] },
//!     "bookmark_menu": { "type": "folder", "title": "Bookmarks Menu" },
//!     "other": { "type": "folder", "title": "Unsorted Bookmarks" }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{BookmarkKind, BookmarkTree, DomainResult, NodeId};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarksDocument {
    pub version: u32,
    pub roots: Roots,
}

/// The three standard folders directly below the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roots {
    pub bookmark_bar: ItemRecord,
    pub bookmark_menu: ItemRecord,
    pub other: ItemRecord,
}

/// Serialized form of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "type")]
    pub kind: BookmarkKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub keyword: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub expanded: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ItemRecord>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Snapshot `id` and its subtree.
pub fn record_from_node(tree: &BookmarkTree, id: NodeId) -> DomainResult<ItemRecord> {
    let node = tree.node(id)?;
    let children = node
        .children()
        .iter()
        .map(|&child| record_from_node(tree, child))
        .collect::<DomainResult<Vec<_>>>()?;
    Ok(ItemRecord {
        kind: node.kind(),
        title: node.title().to_string(),
        url: node.url().to_string(),
        description: node.description().to_string(),
        keyword: node.keyword().to_string(),
        expanded: node.is_expanded(),
        children,
    })
}

/// Build nodes for `record` and append them under `parent`.
///
/// Records that are not url, folder or separator are skipped, as are the
/// children of anything but a folder. Returns the new node, or None when the
/// record was skipped.
pub fn attach_record(
    tree: &mut BookmarkTree,
    parent: NodeId,
    record: &ItemRecord,
) -> DomainResult<Option<NodeId>> {
    match record.kind {
        BookmarkKind::Url | BookmarkKind::Folder | BookmarkKind::Separator => {}
        other => {
            warn!("skipping bookmark item of type '{}' ({})", other, record.title);
            return Ok(None);
        }
    }

    let id = tree.create_node(record.kind);
    {
        let node = tree.node_mut(id)?;
        node.set_title(record.title.as_str());
        node.set_url(record.url.as_str());
        node.set_description(record.description.as_str());
        node.set_keyword(record.keyword.as_str());
        node.set_expanded(record.expanded);
    }
    tree.add_child(parent, id, None)?;

    if record.kind == BookmarkKind::Folder {
        for child in &record.children {
            attach_record(tree, id, child)?;
        }
    } else if !record.children.is_empty() {
        warn!(
            "ignoring {} child item(s) of non-folder '{}'",
            record.children.len(),
            record.title
        );
    }
    Ok(Some(id))
}
