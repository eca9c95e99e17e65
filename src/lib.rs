//! Ordered, typed bookmark hierarchies.
//!
//! The [`domain`] layer holds the tree itself: nodes of kind root, folder,
//! URL or separator, created detached and attached explicitly at a chosen
//! position. The [`application`] layer adds a JSON-backed bookmark store with
//! search, and [`cli`] exposes it as the `bmtree` command.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{BookmarkKind, BookmarkNode, BookmarkTree, DomainError, InvalidOperation, NodeId};
