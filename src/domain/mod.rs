//! Domain layer: the bookmark tree and its rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod display;
pub mod error;
pub mod kind;
pub mod position;

pub use arena::{BookmarkNode, BookmarkTree, NodeId, PostOrderIterator, TreeIterator};
pub use display::{node_label, render_subtree, RenderOptions, TreeNodeConvert};
pub use error::{DomainError, DomainResult, InvalidOperation};
pub use kind::BookmarkKind;
pub use position::{format_position, parse_position, ROOT_POSITION};

/// Expand `~` and `$VAR` in a path-like string, leaving it unchanged on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
