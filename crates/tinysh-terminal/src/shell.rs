//! Shell session: the state, registry, and editor behind one prompt.

use tinysh_types::config::ShellConfig;
use tinysh_types::error::{Result, ShellError};
use tinysh_types::input::EditEvent;
use tinysh_vfs::{MemoryVfs, basename, resolve};

use crate::commands::register_builtins;
use crate::editor::{EditOutcome, LineEditor};
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment, ShellState};
use crate::output::OutputStream;
use crate::tokenizer::tokenize;

type ExitCallback = Box<dyn FnMut(&mut OutputStream)>;

/// One interactive shell session.
///
/// Owns every piece of mutable state, so independent sessions never share a
/// working directory, file tree, or handle table.
pub struct Shell {
    state: ShellState,
    registry: CommandRegistry,
    editor: LineEditor,
    config: ShellConfig,
    on_exit: Option<ExitCallback>,
    exited: bool,
}

impl Shell {
    /// Create a session with the built-in commands registered and the
    /// configured home directory as the working directory.
    pub fn new(config: ShellConfig) -> Result<Self> {
        let home = resolve("/", &config.home);
        let mut vfs = MemoryVfs::new();
        vfs.make_dir_all("/", &home)?;
        let prompt = format!("{}{}", basename(&home), config.prompt_suffix);
        let state = ShellState::new(home, vfs);

        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);

        let editor = LineEditor::new(&prompt, config.history_limit);

        Ok(Self {
            state,
            registry,
            editor,
            config,
            on_exit: None,
            exited: false,
        })
    }

    // -- Registration --

    /// Register a command, replacing any command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.registry.register(cmd);
    }

    /// Register a closure as a command.
    pub fn register_fn<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&[&str], &mut Environment<'_>) -> Result<CommandOutput> + 'static,
    {
        self.registry.register_fn(name, func);
    }

    /// Set the callback invoked when `exit` runs.
    pub fn on_exit<F>(&mut self, callback: F)
    where
        F: FnMut(&mut OutputStream) + 'static,
    {
        self.on_exit = Some(Box::new(callback));
    }

    /// Run `f` inside an execution context before the first input event.
    ///
    /// Handles left open by `f` are closed when it returns.
    pub fn init<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Environment<'_>) -> Result<()>,
    {
        let mut env = Environment::new(&mut self.state, &self.registry, self.editor.history());
        f(&mut env)
    }

    /// Run the configured startup command lines.
    pub fn run_startup(&mut self) {
        let lines = self.config.startup.clone();
        for line in &lines {
            log::debug!("startup: {line}");
            if let Err(e) = self.run_line(line) {
                self.state.output.write_line(&format!("error: {e}"));
            }
        }
    }

    // -- Dispatch --

    /// Run the command `name` with `args`.
    ///
    /// Unknown commands and user-facing failures are reported on the output
    /// stream. Other errors are returned after the execution context has been
    /// torn down.
    pub fn exec(&mut self, name: &str, args: &[&str]) -> Result<()> {
        let Some(cmd) = self.registry.get(name) else {
            let err = ShellError::CommandNotFound(name.to_string());
            self.state.output.write_line(&err.to_string());
            return Ok(());
        };
        log::debug!("exec {name} {args:?}");
        let result = {
            let mut env =
                Environment::new(&mut self.state, &self.registry, self.editor.history());
            cmd.execute(args, &mut env)
        };
        match result {
            Ok(output) => {
                self.apply_output(output);
                Ok(())
            },
            Err(e) if e.is_user_facing() => {
                self.state.output.write_line(&e.to_string());
                Ok(())
            },
            Err(e) => {
                log::warn!("{name}: {e}");
                Err(e)
            },
        }
    }

    /// Tokenize and run one command line. A malformed line is rejected
    /// before anything is dispatched.
    pub fn run_line(&mut self, line: &str) -> Result<()> {
        let tokens = tokenize(line)?;
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(());
        };
        if name.is_empty() {
            return Ok(());
        }
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.exec(name, &args)
    }

    /// Feed one edit event from the presentation layer.
    pub fn handle_event(&mut self, event: EditEvent) {
        let EditOutcome::Submitted { line, command } = self.editor.apply(event) else {
            return;
        };
        self.state.output.write_line(&line);
        if !command.is_empty() {
            self.editor.push_history(&command);
            if let Err(e) = self.run_line(&command) {
                self.state.output.write_line(&format!("error: {e}"));
            }
        }
        let prompt = self.prompt();
        self.editor.reset(&prompt);
    }

    fn apply_output(&mut self, output: CommandOutput) {
        match output {
            CommandOutput::Text(text) => self.state.output.write_line(&text),
            CommandOutput::None => {},
            CommandOutput::Clear => self.state.output.clear(),
            CommandOutput::Exit => {
                self.exited = true;
                if let Some(callback) = self.on_exit.as_mut() {
                    callback(&mut self.state.output);
                }
            },
        }
    }

    // -- Introspection --

    /// Prompt prefix for the current working directory.
    pub fn prompt(&self) -> String {
        format!("{}{}", basename(&self.state.cwd), self.config.prompt_suffix)
    }

    pub fn cwd(&self) -> &str {
        &self.state.cwd
    }

    pub fn output(&self) -> &OutputStream {
        &self.state.output
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn vfs(&self) -> &MemoryVfs {
        &self.state.vfs
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Command names starting with `prefix`, sorted.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.registry.completions(prefix)
    }

    /// Number of handles currently open in the session.
    pub fn open_handle_count(&self) -> usize {
        self.state.handles.open_count()
    }

    /// Number of execution contexts that have not been torn down.
    pub fn live_process_count(&self) -> usize {
        self.state.processes.live_count()
    }

    /// Whether `exit` has run.
    pub fn has_exited(&self) -> bool {
        self.exited
    }
}
