use std::path::{Path, PathBuf};

use globset::GlobSet;
use ignore::WalkBuilder;
use tracing::{debug, warn};

/// File extensions recognised as ANTLR v3 grammars.
pub const GRAMMAR_EXTENSIONS: &[&str] = &["g", "g3"];

pub fn is_grammar_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| GRAMMAR_EXTENSIONS.contains(&ext))
}

/// Discovers grammar files below a root, honouring `.gitignore`,
/// `.grammarlintignore` and the configured ignore patterns.
pub struct FileWalker {
    root: PathBuf,
    exclude: Option<GlobSet>,
    /// Directory `exclude` patterns are relative to; defaults to `root`.
    project_root: Option<PathBuf>,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            exclude: None,
            project_root: None,
        }
    }

    /// Skip files whose root-relative path matches `exclude`.
    pub fn with_exclude(mut self, exclude: GlobSet) -> Self {
        self.exclude = Some(exclude);
        self
    }

    /// Match `exclude` against paths relative to `project_root` instead of
    /// the walked root.
    pub fn with_project_root(mut self, project_root: &Path) -> Self {
        self.project_root = Some(project_root.to_path_buf());
        self
    }

    /// Grammar files in a stable, sorted order.
    pub fn walk(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return vec![self.root.clone()];
        }

        let mut paths = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(".grammarlintignore")
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            if !is_grammar_file(&path) || self.is_excluded(&path) {
                continue;
            }
            paths.push(path);
        }

        paths.sort();
        debug!(root = %self.root.display(), files = paths.len(), "discovered grammar files");
        paths
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Some(exclude) = &self.exclude else {
            return false;
        };
        let base = self.project_root.as_ref().unwrap_or(&self.root);
        let relative = path.strip_prefix(base).unwrap_or(path);
        exclude.is_match(relative)
    }
}
