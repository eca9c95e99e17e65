//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print a field name (cyan) and its value
pub fn field(name: &str, value: &(impl std::fmt::Display + ?Sized)) {
    println!("{:>12} {}", name.cyan(), value);
}

/// Print a search hit: dotted position (dimmed) and label
pub fn hit(position: &str, label: &str) {
    println!("{} {}", format!("[{position}]").dimmed(), label);
}

/// Print plain output (no color, for data the user may pipe)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
