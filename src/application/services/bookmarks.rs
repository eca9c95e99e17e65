//! Bookmark store service
//!
//! Owns one bookmark tree with its three standard folders, persists it as a
//! JSON document and answers lookups by URL, text and keyword.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::error_ext::JsonResultExt;
use crate::application::format::{
    attach_record, record_from_node, BookmarksDocument, ItemRecord, Roots, FORMAT_VERSION,
};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    format_position, parse_position, BookmarkKind, BookmarkNode, BookmarkTree, DomainResult,
    NodeId,
};
use crate::infrastructure::traits::FileSystem;

pub const TOOLBAR_TITLE: &str = "Bookmarks Toolbar";
pub const MENU_TITLE: &str = "Bookmarks Menu";
pub const UNSORTED_TITLE: &str = "Unsorted Bookmarks";

/// The folders every store keeps directly below its root, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardFolders {
    pub toolbar: NodeId,
    pub menu: NodeId,
    pub unsorted: NodeId,
}

impl StandardFolders {
    fn contains(&self, id: NodeId) -> bool {
        id == self.toolbar || id == self.menu || id == self.unsorted
    }
}

/// Service owning the bookmark tree of one bookmarks file.
pub struct BookmarksService {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    backup: bool,
    tree: BookmarkTree,
    folders: StandardFolders,
}

impl BookmarksService {
    /// Create an empty store (standard folders only) bound to `path`.
    /// Nothing is written until [`save`](Self::save).
    pub fn new(
        fs: Arc<dyn FileSystem>,
        path: impl Into<PathBuf>,
        backup: bool,
    ) -> ApplicationResult<Self> {
        let mut tree = BookmarkTree::new();
        let folders = StandardFolders {
            toolbar: append_standard_folder(&mut tree, TOOLBAR_TITLE)?,
            menu: append_standard_folder(&mut tree, MENU_TITLE)?,
            unsorted: append_standard_folder(&mut tree, UNSORTED_TITLE)?,
        };
        Ok(Self {
            fs,
            path: path.into(),
            backup,
            tree,
            folders,
        })
    }

    /// Load the store from `path`. A missing file yields an empty store.
    #[instrument(level = "debug", skip(fs))]
    pub fn load(fs: Arc<dyn FileSystem>, path: &Path, backup: bool) -> ApplicationResult<Self> {
        if !fs.exists(path) {
            info!("no bookmarks file at {}, starting empty", path.display());
            return Self::new(fs, path, backup);
        }
        let content = fs
            .read_to_string(path)
            .with_path_context("read bookmarks", path)?;
        let document: BookmarksDocument =
            serde_json::from_str(&content).with_format_context(path)?;
        if document.version != FORMAT_VERSION {
            return Err(ApplicationError::UnsupportedVersion {
                path: path.to_path_buf(),
                version: document.version,
            });
        }

        let mut tree = BookmarkTree::new();
        let folders = StandardFolders {
            toolbar: load_standard_folder(&mut tree, &document.roots.bookmark_bar, TOOLBAR_TITLE)?,
            menu: load_standard_folder(&mut tree, &document.roots.bookmark_menu, MENU_TITLE)?,
            unsorted: load_standard_folder(&mut tree, &document.roots.other, UNSORTED_TITLE)?,
        };
        debug!("loaded {} bookmark nodes", tree.attached_len());

        Ok(Self {
            fs,
            path: path.to_path_buf(),
            backup,
            tree,
            folders,
        })
    }

    /// Snapshot the store as a document.
    ///
    /// Fails with [`ApplicationError::Format`] when the tree holds something
    /// [`load`](Self::load) would drop: a standard folder that is no longer a
    /// folder, an item that is not a url, folder or separator, or a non-folder
    /// with children.
    pub fn to_document(&self) -> ApplicationResult<BookmarksDocument> {
        self.check_storable()?;
        Ok(BookmarksDocument {
            version: FORMAT_VERSION,
            roots: Roots {
                bookmark_bar: record_from_node(&self.tree, self.folders.toolbar)?,
                bookmark_menu: record_from_node(&self.tree, self.folders.menu)?,
                other: record_from_node(&self.tree, self.folders.unsorted)?,
            },
        })
    }

    pub fn to_json(&self) -> ApplicationResult<String> {
        serde_json::to_string_pretty(&self.to_document()?).with_format_context(&self.path)
    }

    /// Write the store to its file, keeping the previous version as `.bak`
    /// when backups are enabled.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> ApplicationResult<()> {
        let json = self.to_json()?;
        self.fs
            .ensure_parent(&self.path)
            .with_path_context("create directory for", &self.path)?;
        if self.backup && self.fs.exists(&self.path) {
            let backup = self.backup_path();
            self.fs
                .copy(&self.path, &backup)
                .with_path_context("back up bookmarks to", &backup)?;
        }
        self.fs
            .write_replace(&self.path, &json)
            .with_path_context("write bookmarks", &self.path)?;
        info!("saved bookmarks to {}", self.path.display());
        Ok(())
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tree(&self) -> &BookmarkTree {
        &self.tree
    }

    pub fn standard_folders(&self) -> StandardFolders {
        self.folders
    }

    pub fn toolbar_folder(&self) -> NodeId {
        self.folders.toolbar
    }

    pub fn menu_folder(&self) -> NodeId {
        self.folders.menu
    }

    pub fn unsorted_folder(&self) -> NodeId {
        self.folders.unsorted
    }

    pub fn is_standard_folder(&self, id: NodeId) -> bool {
        self.folders.contains(id)
    }

    pub fn node(&self, id: NodeId) -> ApplicationResult<&BookmarkNode> {
        Ok(self.tree.node(id)?)
    }

    /// Edit a node's data in place. Structure is only changed through the
    /// add/remove/move operations.
    pub fn node_mut(&mut self, id: NodeId) -> ApplicationResult<&mut BookmarkNode> {
        Ok(self.tree.node_mut(id)?)
    }

    /// Resolve a dotted position such as `0.3` to a node.
    pub fn resolve(&self, position: &str) -> ApplicationResult<NodeId> {
        let path = parse_position(position)?;
        Ok(self.tree.resolve_position(&path)?)
    }

    /// Dotted position of an attached node, `?` for detached ones.
    pub fn position_string(&self, id: NodeId) -> ApplicationResult<String> {
        Ok(self
            .tree
            .position_of(id)?
            .map(|p| format_position(&p))
            .unwrap_or_else(|| "?".to_string()))
    }

    /// Create a detached node; attach it with [`add_bookmark`](Self::add_bookmark).
    pub fn create_node(&mut self, kind: BookmarkKind) -> NodeId {
        self.tree.create_node(kind)
    }

    /// Insert `node` into the folder `parent` at `index` (appending when out
    /// of range). Returns the position used.
    #[instrument(level = "debug", skip(self))]
    pub fn add_bookmark(
        &mut self,
        parent: NodeId,
        node: NodeId,
        index: Option<usize>,
    ) -> ApplicationResult<usize> {
        self.require_folder(parent)?;
        Ok(self.tree.add_child(parent, node, index)?)
    }

    pub fn add_url(
        &mut self,
        parent: NodeId,
        url: &str,
        title: &str,
        index: Option<usize>,
    ) -> ApplicationResult<NodeId> {
        let id = self.tree.create_node(BookmarkKind::Url);
        {
            let node = self.tree.node_mut(id)?;
            node.set_url(url);
            node.set_title(title);
        }
        self.attach_new(parent, id, index)
    }

    pub fn add_folder(
        &mut self,
        parent: NodeId,
        title: &str,
        index: Option<usize>,
    ) -> ApplicationResult<NodeId> {
        let id = self.tree.create_node(BookmarkKind::Folder);
        self.tree.node_mut(id)?.set_title(title);
        self.attach_new(parent, id, index)
    }

    pub fn add_separator(
        &mut self,
        parent: NodeId,
        index: Option<usize>,
    ) -> ApplicationResult<NodeId> {
        let id = self.tree.create_node(BookmarkKind::Separator);
        self.attach_new(parent, id, index)
    }

    /// Attach a freshly created node, releasing it again if attaching fails.
    fn attach_new(
        &mut self,
        parent: NodeId,
        id: NodeId,
        index: Option<usize>,
    ) -> ApplicationResult<NodeId> {
        if let Err(e) = self.add_bookmark(parent, id, index) {
            self.tree.release(id)?;
            return Err(e);
        }
        Ok(id)
    }

    /// Detach `node` and free it with its subtree. Returns the number of nodes
    /// removed.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_bookmark(&mut self, node: NodeId) -> ApplicationResult<usize> {
        self.reject_standard_folder(node)?;
        if let Some(parent) = self.tree.parent(node)? {
            self.tree.remove_child(parent, node)?;
        }
        Ok(self.tree.release(node)?)
    }

    /// Move `node` into the folder `new_parent`.
    #[instrument(level = "debug", skip(self))]
    pub fn move_bookmark(
        &mut self,
        node: NodeId,
        new_parent: NodeId,
        index: Option<usize>,
    ) -> ApplicationResult<usize> {
        self.reject_standard_folder(node)?;
        self.require_folder(new_parent)?;
        Ok(self.tree.move_node(node, new_parent, index)?)
    }

    /// URL bookmarks whose title or URL contains `text`, ignoring case.
    pub fn search(&self, text: &str) -> Vec<NodeId> {
        let needle = text.to_lowercase();
        self.url_nodes()
            .filter(|(_, node)| {
                node.title().to_lowercase().contains(&needle)
                    || node.url().to_lowercase().contains(&needle)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// URL bookmarks pointing exactly at `url`.
    pub fn search_url(&self, url: &str) -> Vec<NodeId> {
        self.url_nodes()
            .filter(|(_, node)| node.url() == url)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.url_nodes().any(|(_, node)| node.url() == url)
    }

    /// First URL bookmark, in display order, whose keyword is `keyword`.
    pub fn search_keyword(&self, keyword: &str) -> Option<NodeId> {
        if keyword.is_empty() {
            return None;
        }
        self.url_nodes()
            .find(|(_, node)| node.keyword() == keyword)
            .map(|(id, _)| id)
    }

    fn url_nodes(&self) -> impl Iterator<Item = (NodeId, &BookmarkNode)> {
        self.tree.iter().filter(|(_, node)| node.is_url())
    }

    fn check_storable(&self) -> ApplicationResult<()> {
        let folders = self.folders;
        for folder in [folders.toolbar, folders.menu, folders.unsorted] {
            for (id, node) in self.tree.iter_from(folder) {
                let kind_ok = if id == folder {
                    node.is_folder()
                } else {
                    matches!(
                        node.kind(),
                        BookmarkKind::Url | BookmarkKind::Folder | BookmarkKind::Separator
                    )
                };
                let problem = if !kind_ok {
                    format!("'{}' item", node.kind())
                } else if !node.is_folder() && !node.children().is_empty() {
                    format!("'{}' item with children", node.kind())
                } else {
                    continue;
                };
                return Err(ApplicationError::Format {
                    path: self.path.clone(),
                    message: format!(
                        "cannot store {} at [{}]",
                        problem,
                        self.position_string(id)?
                    ),
                });
            }
        }
        Ok(())
    }

    fn require_folder(&self, id: NodeId) -> ApplicationResult<()> {
        if self.tree.node(id)?.is_folder() {
            Ok(())
        } else {
            Err(ApplicationError::NotAFolder(self.position_string(id)?))
        }
    }

    fn reject_standard_folder(&self, id: NodeId) -> ApplicationResult<()> {
        if self.is_standard_folder(id) {
            let title = self.tree.node(id)?.title().to_string();
            return Err(ApplicationError::StandardFolder(title));
        }
        Ok(())
    }
}

fn append_standard_folder(tree: &mut BookmarkTree, title: &str) -> DomainResult<NodeId> {
    let root = tree.root();
    let id = tree.create_node(BookmarkKind::Folder);
    tree.node_mut(id)?.set_title(title);
    tree.add_child(root, id, None)?;
    Ok(id)
}

fn load_standard_folder(
    tree: &mut BookmarkTree,
    record: &ItemRecord,
    default_title: &str,
) -> ApplicationResult<NodeId> {
    if record.kind != BookmarkKind::Folder {
        warn!(
            "standard folder '{}' stored as '{}', loading it as a folder",
            default_title, record.kind
        );
    }
    let root = tree.root();
    let id = tree.create_node(BookmarkKind::Folder);
    {
        let node = tree.node_mut(id)?;
        node.set_title(if record.title.is_empty() {
            default_title
        } else {
            record.title.as_str()
        });
        node.set_description(record.description.as_str());
        node.set_expanded(record.expanded);
    }
    tree.add_child(root, id, None)?;
    for child in &record.children {
        attach_record(tree, id, child)?;
    }
    Ok(id)
}
