//! Virtual file system for tinysh.
//!
//! The tree is a [`MemoryVfs`] arena of directory and file nodes addressed by
//! [`NodeId`]. Paths are resolved purely syntactically by [`path::resolve`]
//! before any lookup. Open files are referenced through small integer
//! [`Handle`]s allocated by a [`HandleTable`].

pub mod handle;
pub mod memory;
pub mod path;

pub use handle::{Handle, HandleTable};
pub use memory::{MemoryVfs, Node, NodeId};
pub use path::{basename, resolve, split_parent};

/// Kind of a VFS entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    /// Single-letter tag used by long listings (`d` / `f`).
    pub fn tag(self) -> char {
        match self {
            Self::Directory => 'd',
            Self::File => 'f',
        }
    }
}

/// A single directory entry as returned by [`MemoryVfs::readdir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Content length in bytes (0 for directories).
    pub size: u64,
}
