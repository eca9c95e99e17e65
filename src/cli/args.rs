//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Manage a bookmark hierarchy stored as JSON
///
/// Nodes are addressed by dotted positions from the root: `0` is the toolbar
/// folder, `0.2` its third child, `.` the root itself.
#[derive(Parser, Debug)]
#[command(name = "bmtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Bookmarks file (default: from config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a bookmarks file with the standard folders
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the hierarchy
    Tree {
        /// Start at this position (default: root)
        position: Option<String>,
        /// Hide URLs
        #[arg(long)]
        no_urls: bool,
        /// Hide positions
        #[arg(long)]
        no_positions: bool,
    },

    /// Show all fields of one node
    Show {
        position: String,
    },

    /// Add a bookmark, folder or separator
    Add {
        #[command(subcommand)]
        command: AddCommands,
    },

    /// Change the data of a node
    Edit {
        position: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        keyword: Option<String>,
        /// Folder shown expanded
        #[arg(long)]
        expanded: Option<bool>,
    },

    /// Remove a node and everything below it
    Remove {
        position: String,
    },

    /// Move a node into another folder
    Move {
        position: String,
        /// Target folder
        parent: String,
        /// Position inside the target folder (default: append)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Find bookmarks whose title or URL contains TEXT
    Search {
        text: String,
    },

    /// Print the URL bound to a keyword
    Keyword {
        keyword: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum AddCommands {
    /// Add a URL bookmark
    Url {
        /// Target folder
        parent: String,
        url: String,
        /// Title (default: the URL)
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Search-bar shortcut
        #[arg(short, long)]
        keyword: Option<String>,
        /// Position inside the folder (default: append)
        #[arg(short, long)]
        index: Option<usize>,
    },
    /// Add a folder
    Folder {
        /// Target folder
        parent: String,
        title: String,
        /// Position inside the folder (default: append)
        #[arg(short, long)]
        index: Option<usize>,
    },
    /// Add a separator
    Separator {
        /// Target folder
        parent: String,
        /// Position inside the folder (default: append)
        #[arg(short, long)]
        index: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,
    /// Create global config template
    Init,
    /// Show config path
    Path,
}
