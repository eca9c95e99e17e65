//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Structural precondition violations on a bookmark tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidOperation {
    #[error("node {child:?} already has parent {parent:?}, remove it first")]
    AlreadyAttached { child: Index, parent: Index },

    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: Index, child: Index },

    #[error("the root node cannot be attached to another node")]
    RootNotAttachable,

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: Index, child: Index },

    #[error("node {0:?} is still attached, detach it before releasing")]
    StillAttached(Index),

    #[error("the root node cannot be released")]
    ReleaseRoot,
}

/// Domain errors represent violations of the tree's structure rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid operation: {0}")]
    InvalidOperation(#[from] InvalidOperation),

    #[error("node not found: {0:?}")]
    NodeNotFound(Index),

    #[error("no node at position {position}")]
    InvalidPosition { position: String },
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
