//! Stage banners on stderr

use console::style;
use std::fmt::Display;

/// Announce a pipeline stage
pub fn stage(name: &str, detail: impl Display) {
    eprintln!("{} {}", style(name).cyan().bold(), detail);
}

/// Report a successful result
pub fn success(name: &str, detail: impl Display) {
    eprintln!("  {} {}", style(name).green().bold(), detail);
}

/// Report a skipped stage
pub fn skipped(name: &str, reason: &str) {
    eprintln!("{} {}", style(name).dim(), style(reason).dim());
}
