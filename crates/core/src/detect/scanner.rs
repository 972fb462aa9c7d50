//! Source tree scanning for the application entry point
//!
//! This is a plain text search, not a parse: a marker inside a comment or a
//! string literal counts as a hit, and the package is taken from the first line
//! starting with `package `.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Marker identifying the companion framework's application class
pub const DEFAULT_ENTRY_MARKER: &str = "@SpringBootApplication";

/// Extension of the source files that may carry the marker
pub const DEFAULT_SOURCE_EXTENSION: &str = ".java";

const PACKAGE_KEYWORD: &str = "package ";

/// A source file carrying the marker, with its declared package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMatch {
    pub path: PathBuf,
    pub package: String,
}

/// Depth-first marker search over a source root
#[derive(Debug, Clone)]
pub struct SourceScanner {
    extension: String,
    marker: String,
}

impl Default for SourceScanner {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_EXTENSION, DEFAULT_ENTRY_MARKER)
    }
}

impl SourceScanner {
    pub fn new(extension: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            marker: marker.into(),
        }
    }

    /// Lazily yield every marker file under `root` in lexical traversal order
    ///
    /// A missing root and unreadable entries yield nothing.
    pub fn scan<'a>(&'a self, root: &Path) -> impl Iterator<Item = EntryMatch> + 'a {
        WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(&self.extension))
            .filter_map(|entry| self.inspect(entry.path()))
    }

    /// First marker file under `root`, if any
    pub fn first_match(&self, root: &Path) -> Option<EntryMatch> {
        self.scan(root).next()
    }

    fn inspect(&self, path: &Path) -> Option<EntryMatch> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Skipping unreadable source file {:?}: {}", path, e);
                return None;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        if !content.contains(&self.marker) {
            return None;
        }

        tracing::debug!("Found entry marker in {:?}", path);
        grab_package_name(&content).map(|package| EntryMatch {
            path: path.to_path_buf(),
            package,
        })
    }
}

/// Package named by the first `package` line of `content`
pub fn grab_package_name(content: &str) -> Option<String> {
    content
        .split('\n')
        .map(str::trim)
        .find_map(|line| line.strip_prefix(PACKAGE_KEYWORD))
        .map(|rest| {
            let rest = rest.trim();
            rest.strip_suffix(';').unwrap_or(rest).to_string()
        })
}
