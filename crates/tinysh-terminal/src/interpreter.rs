//! Command trait, registry, and the per-invocation environment.
//!
//! Every command runs against an [`Environment`]: an explicit view of the
//! session state (working directory, VFS, handle table, output stream) bound
//! to a freshly spawned process. Dropping the environment ends the process
//! and closes every handle it still holds.

use std::collections::HashMap;

use tinysh_types::error::{Result, ShellError};
use tinysh_vfs::{EntryKind, Handle, HandleTable, MemoryVfs, NodeId, VfsEntry, resolve};

use crate::output::OutputStream;
use crate::process::{Pid, ProcessTable};

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Text written to the output stream as one or more lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to clear the output stream.
    Clear,
    /// Signal to end the session.
    Exit,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "ls \[-la\] \[path\]").
    fn usage(&self) -> &str;

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Adapter turning a closure into a [`Command`].
pub struct FnCommand<F> {
    name: String,
    func: F,
}

impl<F> FnCommand<F>
where
    F: Fn(&[&str], &mut Environment<'_>) -> Result<CommandOutput>,
{
    pub fn new(name: &str, func: F) -> Self {
        Self {
            name: name.to_string(),
            func,
        }
    }
}

impl<F> Command for FnCommand<F>
where
    F: Fn(&[&str], &mut Environment<'_>) -> Result<CommandOutput>,
{
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        "user command"
    }
    fn usage(&self) -> &str {
        &self.name
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        (self.func)(args, env)
    }
}

/// Registry of available commands.
///
/// Built-ins and embedder commands share one namespace; registering a name
/// twice replaces the earlier command.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let name = cmd.name().to_string();
        if self.commands.insert(name.clone(), cmd).is_some() {
            log::debug!("command '{name}' overridden");
        }
    }

    /// Register a closure under `name`.
    pub fn register_fn<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&[&str], &mut Environment<'_>) -> Result<CommandOutput> + 'static,
    {
        self.register(Box::new(FnCommand::new(name, func)));
    }

    /// Look up a command by exact name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Return a sorted list of (name, description) pairs.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        let mut cmds: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name(), c.description()))
            .collect();
        cmds.sort_by_key(|(name, _)| *name);
        cmds
    }

    /// Return sorted completions for a partial command name.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .commands
            .keys()
            .filter(|name| name.starts_with(partial))
            .cloned()
            .collect();
        names.sort();
        names
    }
}

/// Session state that commands operate on.
#[derive(Debug)]
pub struct ShellState {
    pub(crate) cwd: String,
    pub(crate) vfs: MemoryVfs,
    pub(crate) handles: HandleTable,
    pub(crate) processes: ProcessTable,
    pub(crate) output: OutputStream,
}

impl ShellState {
    pub(crate) fn new(cwd: String, vfs: MemoryVfs) -> Self {
        Self {
            cwd,
            vfs,
            handles: HandleTable::new(),
            processes: ProcessTable::new(),
            output: OutputStream::new(),
        }
    }
}

/// The standard-I/O facade handed to a running command.
///
/// Creating an environment spawns a process; every handle opened through it
/// is tracked by that process. When the environment is dropped (normal
/// return, error return, or unwinding) the remaining handles are closed and
/// the process is released.
pub struct Environment<'a> {
    state: &'a mut ShellState,
    registry: &'a CommandRegistry,
    history: &'a [String],
    pid: Pid,
}

impl<'a> Environment<'a> {
    pub(crate) fn new(
        state: &'a mut ShellState,
        registry: &'a CommandRegistry,
        history: &'a [String],
    ) -> Self {
        let pid = state.processes.spawn();
        Self {
            state,
            registry,
            history,
            pid,
        }
    }

    /// Id of the process this environment belongs to.
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Current working directory.
    pub fn cwd(&self) -> &str {
        &self.state.cwd
    }

    /// Replace the working directory. The path must already be resolved.
    pub fn set_cwd(&mut self, path: String) {
        self.state.cwd = path;
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &str) -> String {
        resolve(&self.state.cwd, path)
    }

    // -- File I/O --

    /// Open a file, optionally creating it, and return a handle owned by
    /// this process.
    pub fn open(&mut self, path: &str, create: bool) -> Result<Handle> {
        let node = self.state.vfs.open(&self.state.cwd, path, create)?;
        let handle = self.state.handles.acquire(node);
        self.state.processes.track(self.pid, handle);
        log::debug!("pid {}: open {path} -> handle {handle}", self.pid);
        Ok(handle)
    }

    /// Read the whole content of an open file.
    pub fn read(&self, handle: Handle) -> Result<String> {
        let node = self.state.handles.lookup(handle)?;
        self.state
            .vfs
            .file(node)
            .map(str::to_string)
            .ok_or(ShellError::InvalidHandle(handle.index()))
    }

    /// Append text to an open file.
    pub fn write(&mut self, handle: Handle, text: &str) -> Result<()> {
        let node = self.state.handles.lookup(handle)?;
        let content = self
            .state
            .vfs
            .file_mut(node)
            .ok_or(ShellError::InvalidHandle(handle.index()))?;
        content.push_str(text);
        Ok(())
    }

    /// Discard the content of an open file.
    pub fn truncate(&mut self, handle: Handle) -> Result<()> {
        let node = self.state.handles.lookup(handle)?;
        if let Some(content) = self.state.vfs.file_mut(node) {
            content.clear();
        }
        Ok(())
    }

    /// Close a handle. Closing an already-closed handle is a no-op.
    pub fn close(&mut self, handle: Handle) {
        self.state.handles.close(handle);
        self.state.processes.untrack(self.pid, handle);
    }

    /// Handles this process has open, in open order.
    pub fn open_handles(&self) -> &[Handle] {
        self.state
            .processes
            .get(self.pid)
            .map(|p| p.handles())
            .unwrap_or(&[])
    }

    // -- Output --

    /// Write text to the output stream.
    pub fn print(&mut self, text: &str) {
        self.state.output.write(text);
    }

    /// Write a line to the output stream.
    pub fn println(&mut self, text: &str) {
        self.state.output.write_line(text);
    }

    // -- Directory introspection --

    /// Look up a node relative to the working directory.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.state.vfs.find(&self.state.cwd, path)
    }

    /// Kind of the node at `path`, if it exists.
    pub fn kind(&self, path: &str) -> Option<EntryKind> {
        self.find(path).and_then(|id| self.state.vfs.kind(id))
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.state.vfs.is_dir(&self.state.cwd, path)
    }

    /// List a directory relative to the working directory.
    pub fn list(&self, path: &str) -> Result<Vec<VfsEntry>> {
        self.state.vfs.list(&self.state.cwd, path)
    }

    /// Create a directory relative to the working directory.
    pub fn make_dir(&mut self, path: &str) -> Result<()> {
        self.state.vfs.make_dir(&self.state.cwd, path)?;
        Ok(())
    }

    /// Read-only access to the whole VFS.
    pub fn vfs(&self) -> &MemoryVfs {
        &self.state.vfs
    }

    // -- Shell introspection --

    /// Registered commands as sorted (name, description) pairs.
    pub fn commands(&self) -> Vec<(&str, &str)> {
        self.registry.list_commands()
    }

    /// Look up a registered command.
    pub fn command(&self, name: &str) -> Option<&dyn Command> {
        self.registry.get(name)
    }

    /// Previously submitted command lines, oldest first.
    pub fn history(&self) -> &[String] {
        self.history
    }
}

impl Drop for Environment<'_> {
    fn drop(&mut self) {
        let Some(process) = self.state.processes.release(self.pid) else {
            return;
        };
        let reclaimed = process
            .handles()
            .iter()
            .filter(|&&h| self.state.handles.close(h))
            .count();
        if reclaimed > 0 {
            log::debug!("pid {}: reclaimed {reclaimed} open handle(s)", self.pid);
        }
    }
}
