//! Node kind discriminator and its string encoding.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a bookmark entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookmarkKind {
    Root,
    Url,
    Folder,
    Separator,
    Invalid,
}

impl BookmarkKind {
    /// All kinds, in declaration order.
    pub const ALL: [BookmarkKind; 5] = [
        BookmarkKind::Root,
        BookmarkKind::Url,
        BookmarkKind::Folder,
        BookmarkKind::Separator,
        BookmarkKind::Invalid,
    ];

    /// Parse the persisted type string.
    ///
    /// Total: anything unknown (including wrong case) becomes `Invalid`.
    pub fn from_type_str(s: &str) -> Self {
        match s {
            "root" => BookmarkKind::Root,
            "url" => BookmarkKind::Url,
            "folder" => BookmarkKind::Folder,
            "separator" => BookmarkKind::Separator,
            _ => BookmarkKind::Invalid,
        }
    }

    /// Persisted type string. `Invalid` yields the sentinel `"invalid"`.
    pub fn as_str(self) -> &'static str {
        match self {
            BookmarkKind::Root => "root",
            BookmarkKind::Url => "url",
            BookmarkKind::Folder => "folder",
            BookmarkKind::Separator => "separator",
            BookmarkKind::Invalid => "invalid",
        }
    }

    pub fn is_valid(self) -> bool {
        self != BookmarkKind::Invalid
    }
}

impl fmt::Display for BookmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookmarkKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_type_str(s))
    }
}

impl From<String> for BookmarkKind {
    fn from(s: String) -> Self {
        Self::from_type_str(&s)
    }
}

impl From<BookmarkKind> for String {
    fn from(kind: BookmarkKind) -> Self {
        kind.as_str().to_string()
    }
}
