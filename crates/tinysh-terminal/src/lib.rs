//! Command interpreter and terminal subsystem.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. A [`Shell`] owns the session
//! state, turns edit events into command lines, tokenizes them, and runs each
//! command inside its own execution context.

mod commands;
pub mod editor;
mod interpreter;
pub mod output;
pub mod process;
mod shell;
pub mod tokenizer;

/// Register all built-in commands into a registry.
pub use commands::register_builtins;
/// Line buffer with cursor and history.
pub use editor::{EditOutcome, LineEditor};
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (text or a signal).
pub use interpreter::CommandOutput;
/// Registry of available commands.
pub use interpreter::CommandRegistry;
/// Per-invocation stdio facade passed to every command.
pub use interpreter::Environment;
/// Closure adapter for [`Command`].
pub use interpreter::FnCommand;
/// Append-only text buffer read by the presentation layer.
pub use output::OutputStream;
/// Process ids for execution contexts.
pub use process::Pid;
/// One interactive shell session.
pub use shell::Shell;
/// Quote-aware command-line tokenizer.
pub use tokenizer::tokenize;
