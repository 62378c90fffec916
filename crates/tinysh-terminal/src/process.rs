//! Execution contexts: one short-lived process per command invocation.
//!
//! A process only records which handles it opened. The [`Environment`]
//! built for the invocation releases the process when it is dropped and
//! closes whatever the command left open.
//!
//! [`Environment`]: crate::Environment

use std::fmt;

use tinysh_vfs::Handle;

/// Process id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(usize);

impl Pid {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bookkeeping for one command invocation.
#[derive(Debug)]
pub struct Process {
    pid: Pid,
    handles: Vec<Handle>,
}

impl Process {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Handles opened by this process and not yet closed, in open order.
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    fn track(&mut self, handle: Handle) {
        if !self.handles.contains(&handle) {
            self.handles.push(handle);
        }
    }

    fn untrack(&mut self, handle: Handle) {
        self.handles.retain(|&h| h != handle);
    }
}

/// Live processes, indexed by pid. Pids are reused lowest-first.
#[derive(Debug, Default)]
pub struct ProcessTable {
    slots: Vec<Option<Process>>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new process with no open handles.
    pub fn spawn(&mut self) -> Pid {
        let index = match self.slots.iter().position(Option::is_none) {
            Some(i) => i,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            },
        };
        let pid = Pid(index);
        self.slots[index] = Some(Process {
            pid,
            handles: Vec::new(),
        });
        pid
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.slots.get(pid.0)?.as_ref()
    }

    /// Record that `pid` opened `handle`.
    pub fn track(&mut self, pid: Pid, handle: Handle) {
        if let Some(Some(process)) = self.slots.get_mut(pid.0) {
            process.track(handle);
        }
    }

    /// Record that `pid` closed `handle`.
    pub fn untrack(&mut self, pid: Pid, handle: Handle) {
        if let Some(Some(process)) = self.slots.get_mut(pid.0) {
            process.untrack(handle);
        }
    }

    /// Remove a process from the table, returning its record.
    pub fn release(&mut self, pid: Pid) -> Option<Process> {
        self.slots.get_mut(pid.0)?.take()
    }

    /// Number of processes that have not been released.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_release_reuses_pid() {
        let mut table = ProcessTable::new();
        let a = table.spawn();
        let b = table.spawn();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert!(table.release(a).is_some());
        assert_eq!(table.spawn(), a);
        assert_eq!(table.live_count(), 2);
    }

    #[test]
    fn release_twice_is_none() {
        let mut table = ProcessTable::new();
        let pid = table.spawn();
        assert!(table.release(pid).is_some());
        assert!(table.release(pid).is_none());
        assert_eq!(table.live_count(), 0);
    }

    #[test]
    fn track_and_untrack_handles() {
        let mut table = ProcessTable::new();
        let pid = table.spawn();
        table.track(pid, Handle::from_raw(0));
        table.track(pid, Handle::from_raw(3));
        table.track(pid, Handle::from_raw(0));
        assert_eq!(
            table.get(pid).unwrap().handles(),
            &[Handle::from_raw(0), Handle::from_raw(3)]
        );
        table.untrack(pid, Handle::from_raw(0));
        assert_eq!(table.get(pid).unwrap().handles(), &[Handle::from_raw(3)]);
    }

    #[test]
    fn tracking_unknown_pid_is_ignored() {
        let mut table = ProcessTable::new();
        let pid = table.spawn();
        table.release(pid);
        table.track(pid, Handle::from_raw(1));
        assert!(table.get(pid).is_none());
    }
}
