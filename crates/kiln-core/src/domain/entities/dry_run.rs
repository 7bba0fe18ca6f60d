//! Dry-run manifest: the would-be filesystem changes of one generation pass,
//! and the box-drawing tree they are previewed as.
//!
//! ```text
//! my-app/
//! ├── public/
//! └── src/
//!     ├── App.tsx
//!     └── main.tsx
//!
//! 2 files
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path, PathBuf};

/// A single recorded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunEntry {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub is_dir: bool,
    /// Byte size of `content`; zero for directories.
    pub size: usize,
    pub content: String,
}

/// Flat, ordered record of every operation a generation pass would perform.
#[derive(Debug, Clone)]
pub struct DryRunManifest {
    root: PathBuf,
    entries: Vec<DryRunEntry>,
}

impl DryRunManifest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record a file write. `path` may be absolute (under the root) or
    /// already relative.
    pub fn add_file(&mut self, path: &Path, content: &str) {
        let path = self.relativize(path);
        self.entries.push(DryRunEntry {
            path,
            is_dir: false,
            size: content.len(),
            content: content.to_owned(),
        });
    }

    /// Record a directory creation. The root itself is never recorded.
    pub fn add_dir(&mut self, path: &Path) {
        let path = self.relativize(path);
        if path.as_os_str().is_empty() {
            return;
        }
        self.entries.push(DryRunEntry {
            path,
            is_dir: true,
            size: 0,
            content: String::new(),
        });
    }

    pub fn entries(&self) -> &[DryRunEntry] {
        &self.entries
    }

    /// Number of distinct file paths recorded.
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.is_dir)
            .map(|e| e.path.as_path())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Render the recorded entries as a directory tree.
    pub fn render(&self) -> String {
        let tree = self.build_tree();

        let root_name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".into());

        let mut out = format!("{root_name}/\n");
        render_children(&tree, "", &mut out);

        let files = self.file_count();
        let noun = if files == 1 { "file" } else { "files" };
        out.push_str(&format!("\n{files} {noun}\n"));
        out
    }

    /// Whether `path` (relative) is a directory in the reconstructed tree.
    ///
    /// Returns `None` for paths that were never recorded, either explicitly
    /// or as the parent of a recorded entry.
    pub fn is_dir(&self, path: &Path) -> Option<bool> {
        let tree = self.build_tree();
        let mut node = &tree;
        let mut found = false;
        for segment in segments(path) {
            node = node.children.get(&segment)?;
            found = true;
        }
        found.then_some(node.is_dir)
    }

    fn relativize(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    fn build_tree(&self) -> Node {
        let mut root = Node::dir();
        for entry in &self.entries {
            let parts = segments(&entry.path);
            let Some((leaf, parents)) = parts.split_last() else {
                continue;
            };

            let mut node = &mut root;
            for part in parents {
                node = node.children.entry(part.clone()).or_insert_with(Node::dir);
                node.is_dir = true;
            }

            let leaf = node.children.entry(leaf.clone()).or_insert_with(|| Node {
                is_dir: entry.is_dir,
                children: BTreeMap::new(),
            });
            // A path seen as a directory stays one.
            leaf.is_dir |= entry.is_dir;
        }
        root
    }
}

#[derive(Debug)]
struct Node {
    is_dir: bool,
    children: BTreeMap<String, Node>,
}

impl Node {
    fn dir() -> Self {
        Self {
            is_dir: true,
            children: BTreeMap::new(),
        }
    }
}

fn segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

fn render_children(node: &Node, prefix: &str, out: &mut String) {
    let mut children: Vec<(&String, &Node)> = node.children.iter().collect();
    // Directories first, then files; alphabetical within each group.
    children.sort_by(|(a_name, a), (b_name, b)| {
        b.is_dir.cmp(&a.is_dir).then_with(|| a_name.cmp(b_name))
    });

    let last_index = children.len().saturating_sub(1);
    for (i, (name, child)) in children.into_iter().enumerate() {
        let is_last = i == last_index;
        let connector = if is_last { "└── " } else { "├── " };
        let suffix = if child.is_dir { "/" } else { "" };
        out.push_str(&format!("{prefix}{connector}{name}{suffix}\n"));

        if child.is_dir && !child.children.is_empty() {
            let guide = if is_last { "    " } else { "│   " };
            render_children(child, &format!("{prefix}{guide}"), out);
        }
    }
}
