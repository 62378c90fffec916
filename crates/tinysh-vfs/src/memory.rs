//! In-memory VFS implementation.
//!
//! The tree lives in an arena: every node is stored once in a `Vec<Node>`
//! and directories map child names to [`NodeId`]s. Nodes are never removed
//! or re-parented, so ids stay valid for the life of the VFS and the tree
//! cannot contain cycles.

use std::collections::BTreeMap;

use tinysh_types::error::{Result, ShellError};

use crate::path::{resolve, split_parent};
use crate::{EntryKind, VfsEntry};

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root directory.
    pub const ROOT: NodeId = NodeId(0);

    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directory or file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory { children: BTreeMap<String, NodeId> },
    File { content: String },
}

impl Node {
    fn empty_dir() -> Self {
        Self::Directory {
            children: BTreeMap::new(),
        }
    }

    fn empty_file() -> Self {
        Self::File {
            content: String::new(),
        }
    }

    /// The entry kind of this node.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Directory { .. } => EntryKind::Directory,
            Self::File { .. } => EntryKind::File,
        }
    }
}

/// A fully in-memory virtual file system.
#[derive(Debug, Clone)]
pub struct MemoryVfs {
    nodes: Vec<Node>,
}

impl MemoryVfs {
    /// Create a new VFS containing only the root directory.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::empty_dir()],
        }
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Borrow a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Kind of the node with this id.
    pub fn kind(&self, id: NodeId) -> Option<EntryKind> {
        self.node(id).map(Node::kind)
    }

    /// Content of a file node. `None` for directories and unknown ids.
    pub fn file(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id.0)? {
            Node::File { content } => Some(content),
            Node::Directory { .. } => None,
        }
    }

    /// Mutable content of a file node.
    pub fn file_mut(&mut self, id: NodeId) -> Option<&mut String> {
        match self.nodes.get_mut(id.0)? {
            Node::File { content } => Some(content),
            Node::Directory { .. } => None,
        }
    }

    /// Walk an already-resolved absolute path from the root.
    ///
    /// Stops at the first missing component, or at a file that would need
    /// to be descended into.
    pub fn lookup(&self, abs_path: &str) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for segment in abs_path.split('/').filter(|s| !s.is_empty()) {
            match &self.nodes[current.0] {
                Node::Directory { children } => current = *children.get(segment)?,
                Node::File { .. } => return None,
            }
        }
        Some(current)
    }

    /// Resolve `path` against `cwd` and look it up.
    pub fn find(&self, cwd: &str, path: &str) -> Option<NodeId> {
        self.lookup(&resolve(cwd, path))
    }

    /// Create an empty directory at `path`.
    ///
    /// Fails with `NotADirectory` when the parent is missing or is a file,
    /// and with `AlreadyExists` when the name is taken.
    pub fn make_dir(&mut self, cwd: &str, path: &str) -> Result<NodeId> {
        let resolved = resolve(cwd, path);
        let (parent_path, leaf) = split_parent(&resolved);
        if leaf.is_empty() {
            return Err(ShellError::AlreadyExists(resolved));
        }
        let parent = self.directory(parent_path)?;
        if self.child(parent, leaf).is_some() {
            return Err(ShellError::AlreadyExists(resolved));
        }
        let id = self.attach(parent, leaf, Node::empty_dir());
        log::debug!("mkdir {resolved} -> node {}", id.0);
        Ok(id)
    }

    /// Create `path` and any missing ancestors. Existing directories along
    /// the way are reused; a file in the way fails with `NotADirectory`.
    pub fn make_dir_all(&mut self, cwd: &str, path: &str) -> Result<NodeId> {
        let resolved = resolve(cwd, path);
        let mut current = NodeId::ROOT;
        let mut walked = String::new();
        for segment in resolved.split('/').filter(|s| !s.is_empty()) {
            walked.push('/');
            walked.push_str(segment);
            current = match self.child(current, segment) {
                Some(id) if self.kind(id) == Some(EntryKind::Directory) => id,
                Some(_) => return Err(ShellError::NotADirectory(walked)),
                None => self.attach(current, segment, Node::empty_dir()),
            };
        }
        Ok(current)
    }

    /// Resolve `path` to a file node, creating an empty file when `create`
    /// is set and the name is free.
    ///
    /// Fails with `NotADirectory` when the parent is missing or is a file,
    /// and with `NotAFile` when the target is missing (without `create`) or
    /// is a directory.
    pub fn open(&mut self, cwd: &str, path: &str, create: bool) -> Result<NodeId> {
        let resolved = resolve(cwd, path);
        let (parent_path, leaf) = split_parent(&resolved);
        if leaf.is_empty() {
            return Err(ShellError::NotAFile(resolved));
        }
        let parent = self.directory(parent_path)?;
        match self.child(parent, leaf) {
            Some(id) if self.file(id).is_some() => Ok(id),
            Some(_) => Err(ShellError::NotAFile(resolved)),
            None if create => {
                let id = self.attach(parent, leaf, Node::empty_file());
                log::debug!("created {resolved} -> node {}", id.0);
                Ok(id)
            },
            None => Err(ShellError::NotAFile(resolved)),
        }
    }

    /// Create (or truncate) the file at `path` and set its content.
    pub fn write_file(&mut self, cwd: &str, path: &str, content: &str) -> Result<NodeId> {
        let id = self.open(cwd, path, true)?;
        if let Some(buf) = self.file_mut(id) {
            buf.clear();
            buf.push_str(content);
        }
        Ok(id)
    }

    /// List a directory node, sorted by name.
    pub fn readdir(&self, id: NodeId) -> Option<Vec<VfsEntry>> {
        let Node::Directory { children } = self.nodes.get(id.0)? else {
            return None;
        };
        let entries = children
            .iter()
            .map(|(name, &child)| {
                let node = &self.nodes[child.0];
                VfsEntry {
                    name: name.clone(),
                    kind: node.kind(),
                    size: match node {
                        Node::File { content } => content.len() as u64,
                        Node::Directory { .. } => 0,
                    },
                }
            })
            .collect();
        Some(entries)
    }

    /// Resolve `path` against `cwd` and list it.
    pub fn list(&self, cwd: &str, path: &str) -> Result<Vec<VfsEntry>> {
        let resolved = resolve(cwd, path);
        self.lookup(&resolved)
            .and_then(|id| self.readdir(id))
            .ok_or(ShellError::NotADirectory(resolved))
    }

    /// Whether `path` resolves to a directory.
    pub fn is_dir(&self, cwd: &str, path: &str) -> bool {
        self.find(cwd, path)
            .is_some_and(|id| self.kind(id) == Some(EntryKind::Directory))
    }

    fn directory(&self, abs_path: &str) -> Result<NodeId> {
        self.lookup(abs_path)
            .filter(|&id| self.kind(id) == Some(EntryKind::Directory))
            .ok_or_else(|| ShellError::NotADirectory(abs_path.to_string()))
    }

    fn child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        match &self.nodes[dir.0] {
            Node::Directory { children } => children.get(name).copied(),
            Node::File { .. } => None,
        }
    }

    /// Append `node` to the arena and link it under `parent`.
    ///
    /// `parent` must be a directory.
    fn attach(&mut self, parent: NodeId, name: &str, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        if let Node::Directory { children } = &mut self.nodes[parent.0] {
            children.insert(name.to_string(), id);
        }
        id
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> MemoryVfs {
        let mut vfs = MemoryVfs::new();
        vfs.make_dir("/", "home").unwrap();
        vfs.make_dir("/home", "friends").unwrap();
        vfs.write_file("/home", "about", "this is about me").unwrap();
        vfs
    }

    #[test]
    fn root_is_directory() {
        let vfs = MemoryVfs::new();
        assert_eq!(vfs.find("/", "/"), Some(NodeId::ROOT));
        assert_eq!(vfs.kind(NodeId::ROOT), Some(EntryKind::Directory));
    }

    #[test]
    fn find_relative_and_absolute() {
        let vfs = demo();
        let abs = vfs.find("/", "/home/about").unwrap();
        let rel = vfs.find("/home/friends", "../about").unwrap();
        assert_eq!(abs, rel);
        assert_eq!(vfs.file(abs), Some("this is about me"));
    }

    #[test]
    fn find_missing_short_circuits() {
        let vfs = demo();
        assert!(vfs.find("/", "/nope/deeper/still").is_none());
    }

    #[test]
    fn find_through_file_is_none() {
        let vfs = demo();
        assert!(vfs.find("/", "/home/about/x").is_none());
    }

    #[test]
    fn make_dir_under_missing_parent_fails() {
        let mut vfs = MemoryVfs::new();
        let err = vfs.make_dir("/", "/a/b").unwrap_err();
        assert!(matches!(err, ShellError::NotADirectory(p) if p == "/a"));
    }

    #[test]
    fn make_dir_twice_fails() {
        let mut vfs = demo();
        let err = vfs.make_dir("/home", "friends").unwrap_err();
        assert!(matches!(err, ShellError::AlreadyExists(p) if p == "/home/friends"));
    }

    #[test]
    fn make_dir_over_file_fails() {
        let mut vfs = demo();
        assert!(matches!(
            vfs.make_dir("/", "/home/about").unwrap_err(),
            ShellError::AlreadyExists(_)
        ));
    }

    #[test]
    fn make_dir_root_fails() {
        let mut vfs = MemoryVfs::new();
        assert!(matches!(
            vfs.make_dir("/", "/").unwrap_err(),
            ShellError::AlreadyExists(_)
        ));
    }

    #[test]
    fn make_dir_all_creates_ancestors() {
        let mut vfs = demo();
        let id = vfs.make_dir_all("/", "/home/a/b/c").unwrap();
        assert_eq!(vfs.find("/home", "a/b/c"), Some(id));
        assert_eq!(vfs.make_dir_all("/home", "a/b/c").unwrap(), id);
        assert_eq!(vfs.make_dir_all("/", "/").unwrap(), NodeId::ROOT);
    }

    #[test]
    fn make_dir_all_through_file_fails() {
        let mut vfs = demo();
        let err = vfs.make_dir_all("/", "/home/about/x").unwrap_err();
        assert!(matches!(err, ShellError::NotADirectory(p) if p == "/home/about"));
    }

    #[test]
    fn open_create_then_reopen_same_node() {
        let mut vfs = demo();
        let created = vfs.open("/", "/home/x.txt", true).unwrap();
        vfs.file_mut(created).unwrap().push_str("hello");
        let reopened = vfs.open("/", "/home/x.txt", false).unwrap();
        assert_eq!(created, reopened);
        assert_eq!(vfs.file(reopened), Some("hello"));
    }

    #[test]
    fn make_dir_under_file_is_not_a_directory() {
        let mut vfs = demo();
        vfs.open("/", "/home/x.txt", true).unwrap();
        let err = vfs.make_dir("/", "/home/x.txt/y").unwrap_err();
        assert!(matches!(err, ShellError::NotADirectory(_)));
    }

    #[test]
    fn open_missing_without_create_fails() {
        let mut vfs = demo();
        assert!(matches!(
            vfs.open("/", "/home/ghost", false).unwrap_err(),
            ShellError::NotAFile(p) if p == "/home/ghost"
        ));
        assert!(vfs.find("/", "/home/ghost").is_none());
    }

    #[test]
    fn open_directory_fails() {
        let mut vfs = demo();
        assert!(matches!(
            vfs.open("/", "/home/friends", true).unwrap_err(),
            ShellError::NotAFile(_)
        ));
    }

    #[test]
    fn open_missing_parent_fails() {
        let mut vfs = demo();
        assert!(matches!(
            vfs.open("/", "/nope/file", true).unwrap_err(),
            ShellError::NotADirectory(_)
        ));
    }

    #[test]
    fn open_root_fails() {
        let mut vfs = demo();
        assert!(matches!(
            vfs.open("/", "/", true).unwrap_err(),
            ShellError::NotAFile(_)
        ));
    }

    #[test]
    fn write_file_truncates() {
        let mut vfs = demo();
        vfs.write_file("/home", "about", "new").unwrap();
        let id = vfs.find("/", "/home/about").unwrap();
        assert_eq!(vfs.file(id), Some("new"));
    }

    #[test]
    fn readdir_sorted_with_kinds() {
        let mut vfs = demo();
        vfs.write_file("/home", ".hidden", "x").unwrap();
        let entries = vfs.list("/", "/home").unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![".hidden", "about", "friends"]);
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[1].size, 16);
        assert_eq!(entries[2].kind, EntryKind::Directory);
        assert_eq!(entries[2].size, 0);
    }

    #[test]
    fn list_on_file_fails() {
        let vfs = demo();
        assert!(matches!(
            vfs.list("/home", "about").unwrap_err(),
            ShellError::NotADirectory(p) if p == "/home/about"
        ));
    }

    #[test]
    fn file_accessors_reject_directories() {
        let mut vfs = demo();
        let dir = vfs.find("/", "/home").unwrap();
        assert!(vfs.file(dir).is_none());
        assert!(vfs.file_mut(dir).is_none());
        assert!(vfs.readdir(vfs.find("/", "/home/about").unwrap()).is_none());
    }

    #[test]
    fn is_dir_checks_kind() {
        let vfs = demo();
        assert!(vfs.is_dir("/", "home"));
        assert!(!vfs.is_dir("/", "home/about"));
        assert!(!vfs.is_dir("/", "missing"));
    }

    #[test]
    fn unicode_and_spaces_in_names() {
        let mut vfs = MemoryVfs::new();
        vfs.write_file("/", "file with spaces.txt", "ok").unwrap();
        vfs.write_file("/", "\u{1F600}.txt", "smiley").unwrap();
        let a = vfs.find("/", "/file with spaces.txt").unwrap();
        let b = vfs.find("/", "/\u{1F600}.txt").unwrap();
        assert_eq!(vfs.file(a), Some("ok"));
        assert_eq!(vfs.file(b), Some("smiley"));
    }

    #[test]
    fn deeply_nested_dirs() {
        let mut vfs = MemoryVfs::new();
        let mut path = String::new();
        for i in 0..50 {
            path.push_str(&format!("/d{i}"));
            vfs.make_dir("/", &path).unwrap();
        }
        assert!(vfs.is_dir("/", &path));
        assert_eq!(vfs.node_count(), 51);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn write_then_find_roundtrips(
                dir in "[a-z]{1,8}",
                file in "[a-z]{1,8}",
                data in "[ -~]{0,64}",
            ) {
                let mut vfs = MemoryVfs::new();
                vfs.make_dir("/", &dir).unwrap();
                let path = format!("/{dir}/{file}");
                vfs.write_file("/", &path, &data).unwrap();
                let id = vfs.find(&format!("/{dir}"), &file).unwrap();
                prop_assert_eq!(vfs.file(id), Some(data.as_str()));
            }

            #[test]
            fn nested_mkdir_then_find(segments in proptest::collection::vec("[a-z]{1,6}", 1..5)) {
                let mut vfs = MemoryVfs::new();
                let mut partial = String::new();
                for seg in &segments {
                    partial.push('/');
                    partial.push_str(seg);
                    match vfs.make_dir("/", &partial) {
                        Ok(_) | Err(ShellError::AlreadyExists(_)) => {},
                        Err(e) => prop_assert!(false, "unexpected error: {e}"),
                    }
                }
                prop_assert!(vfs.is_dir("/", &partial));
            }
        }
    }
}
