//! Handle table: small integers standing in for open file nodes.

use std::fmt;

use tinysh_types::error::{Result, ShellError};

use crate::memory::NodeId;

/// An open-file handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(usize);

impl Handle {
    /// Build a handle from its raw slot index.
    pub fn from_raw(index: usize) -> Self {
        Self(index)
    }

    /// Raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps handles to the nodes they were opened on.
///
/// Freed slots are reused lowest-first, so live handle numbers stay compact.
#[derive(Debug, Default)]
pub struct HandleTable {
    slots: Vec<Option<NodeId>>,
}

impl HandleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the lowest free slot to `node`.
    pub fn acquire(&mut self, node: NodeId) -> Handle {
        if let Some(i) = self.slots.iter().position(Option::is_none) {
            self.slots[i] = Some(node);
            return Handle(i);
        }
        self.slots.push(Some(node));
        Handle(self.slots.len() - 1)
    }

    /// The node behind `handle`.
    pub fn lookup(&self, handle: Handle) -> Result<NodeId> {
        self.slots
            .get(handle.0)
            .copied()
            .flatten()
            .ok_or(ShellError::InvalidHandle(handle.0))
    }

    /// Unbind `handle`. Closing a closed or unknown handle is a no-op.
    ///
    /// Returns whether the handle was open.
    pub fn close(&mut self, handle: Handle) -> bool {
        match self.slots.get_mut(handle.0) {
            Some(slot @ Some(_)) => {
                *slot = None;
                true
            },
            _ => false,
        }
    }

    /// Whether `handle` is currently bound.
    pub fn is_open(&self, handle: Handle) -> bool {
        matches!(self.slots.get(handle.0), Some(Some(_)))
    }

    /// Number of bound handles.
    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
