//! Directory tree snapshot of the application output directory.
//!
//! Only directories are recorded. Files are listed later, when components
//! are emitted, so a file added or removed between scan and emission is
//! reflected in the components but a directory is not.

use crate::bundler::error::{Context, Error, ErrorExt, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One directory of the scanned tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirNode {
    /// Display name (the root is named by the caller).
    pub name: String,
    /// Absolute path of the directory.
    pub path: PathBuf,
    /// Subdirectories, sorted by file name.
    pub children: Vec<DirNode>,
}

impl DirNode {
    /// Number of directories below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Nesting depth below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }
}

/// Scans `root` into a [`DirNode`] tree.
///
/// Returns `Ok(None)` when `root` exists but is not a directory. Children are
/// sorted by file name. Symbolic links to directories are followed and keep
/// the link's path; a link that leads back to one of its ancestors is a loop
/// error. The scan aborts on the first entry that cannot be read.
pub fn collect_dirs(root: &Path, root_name: &str) -> Result<Option<DirNode>> {
    let metadata = std::fs::metadata(root).fs_context("reading app directory", root)?;
    if !metadata.is_dir() {
        return Ok(None);
    }

    // Pre-order walk; stack[d] is the open node at depth d
    let mut stack: Vec<DirNode> = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_type().is_dir());

    for entry in walker {
        let entry = entry?;
        let depth = entry.depth();

        while stack.len() > depth {
            close_top(&mut stack);
        }

        let name = if depth == 0 {
            root_name.to_string()
        } else {
            entry
                .file_name()
                .to_str()
                .with_context(|| {
                    format!("directory name is not valid UTF-8: {}", entry.path().display())
                })?
                .to_string()
        };

        stack.push(DirNode {
            name,
            path: entry.path().to_path_buf(),
            children: Vec::new(),
        });
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }

    stack
        .pop()
        .map(Some)
        .ok_or_else(|| Error::GenericError(format!("{} yielded no entries", root.display())))
}

fn close_top(stack: &mut Vec<DirNode>) {
    if let Some(node) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_tree_mirrors_directories_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("app.exe"), b"exe").unwrap();
        fs::create_dir_all(root.join("locales")).unwrap();
        fs::write(root.join("locales/en.pak"), b"en").unwrap();
        fs::create_dir_all(root.join("resources/app/assets")).unwrap();

        let tree = collect_dirs(root, "").unwrap().unwrap();

        assert_eq!(tree.name, "");
        assert_eq!(tree.path, root);
        let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["locales", "resources"]);
        assert!(tree.children[0].children.is_empty());
        assert_eq!(tree.children[1].children[0].name, "app");
        assert_eq!(tree.children[1].children[0].children[0].name, "assets");
        assert_eq!(
            tree.children[1].children[0].children[0].path,
            root.join("resources/app/assets")
        );
        assert_eq!(tree.descendant_count(), 4);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_children_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }

        let tree = collect_dirs(dir.path(), "").unwrap().unwrap();
        let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_siblings_after_deep_branch_attach_to_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
        fs::create_dir(dir.path().join("d")).unwrap();

        let tree = collect_dirs(dir.path(), "").unwrap().unwrap();
        let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "d"]);
        assert_eq!(tree.descendant_count(), 4);
    }

    #[test]
    fn test_file_root_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();

        assert!(collect_dirs(&file, "").unwrap().is_none());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_dirs(&dir.path().join("missing"), "").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlinks_are_followed() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        fs::create_dir(outside.path().join("x64")).unwrap();
        fs::write(outside.path().join("x64/lib.dll"), b"dll").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("plugins")).unwrap();

        let tree = collect_dirs(dir.path(), "").unwrap().unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].name, "plugins");
        assert_eq!(tree.children[0].path, dir.path().join("plugins"));
        assert_eq!(tree.children[0].children[0].name, "x64");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("real/loop")).unwrap();

        let err = collect_dirs(dir.path(), "").unwrap_err();
        assert!(matches!(err, Error::WalkdirError(ref e) if e.loop_ancestor().is_some()));
    }
}
