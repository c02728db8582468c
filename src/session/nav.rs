//! Dashboard section navigation.
//!
//! Highlighting only. Nothing here feeds access control.

use crate::paths::{self, matches_prefix};

/// Authenticated root the sections hang off.
pub const APP_ROOT: &str = paths::APP_PATH;

/// One top-level dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSection {
    /// Path segment under [`APP_ROOT`]; empty for the overview.
    pub key: &'static str,
    pub label: &'static str,
}

pub const SECTIONS: &[NavSection] = &[
    NavSection { key: "", label: "Overview" },
    NavSection { key: "upload", label: "Upload" },
    NavSection { key: "clips", label: "Clips" },
    NavSection { key: "billing", label: "Billing" },
    NavSection { key: "settings", label: "Settings" },
];

impl NavSection {
    #[must_use]
    pub fn href(&self) -> String {
        if self.key.is_empty() { APP_ROOT.to_owned() } else { format!("{APP_ROOT}/{}", self.key) }
    }
}

/// Which section `path` belongs to.
///
/// `Some("")` is the overview (the root itself, or an unknown child of it);
/// `None` means the path is outside the dashboard entirely.
#[must_use]
pub fn derive_tab(path: &str) -> Option<&'static str> {
    if !matches_prefix(path, APP_ROOT) {
        return None;
    }

    let first = path[APP_ROOT.len()..]
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();

    let section = SECTIONS
        .iter()
        .find(|s| !s.key.is_empty() && s.key == first)
        .map_or("", |s| s.key);
    Some(section)
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
