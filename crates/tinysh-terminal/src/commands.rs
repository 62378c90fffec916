//! Built-in commands for the tinysh terminal.

use tinysh_types::error::{Result, ShellError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(HelpCmd));
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(CdCmd));
    reg.register(Box::new(PwdCmd));
    reg.register(Box::new(CatCmd));
    reg.register(Box::new(MkdirCmd));
    reg.register(Box::new(TouchCmd));
    reg.register(Box::new(EchoCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(ExitCmd));
    reg.register(Box::new(HistoryCmd));
    reg.register(Box::new(HowdyCmd));
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "List available commands"
    }
    fn usage(&self) -> &str {
        "help [command]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if let Some(&name) = args.first() {
            let cmd = env
                .command(name)
                .ok_or_else(|| ShellError::CommandNotFound(name.to_string()))?;
            return Ok(CommandOutput::Text(format!(
                "{}\nusage: {}",
                cmd.description(),
                cmd.usage()
            )));
        }
        let cmds = env.commands();
        let width = cmds.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        let lines: Vec<String> = cmds
            .iter()
            .map(|(name, desc)| format!("{name:<width$}  {desc}"))
            .collect();
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq)]
struct LsOptions<'a> {
    list: bool,
    all: bool,
    target: Option<&'a str>,
}

impl<'a> LsOptions<'a> {
    /// Flags toggle options; any other argument replaces the target.
    fn parse(args: &[&'a str]) -> Self {
        let mut opts = Self::default();
        for &arg in args {
            match arg {
                "--list" => opts.list = true,
                "--all" => opts.all = true,
                _ if arg.starts_with('-') => {
                    for flag in arg.chars().skip(1) {
                        match flag {
                            'l' => opts.list = true,
                            'a' => opts.all = true,
                            _ => {},
                        }
                    }
                },
                _ => opts.target = Some(arg),
            }
        }
        opts
    }
}

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List directory contents"
    }
    fn usage(&self) -> &str {
        "ls [-la] [path]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let opts = LsOptions::parse(args);
        let entries = env.list(opts.target.unwrap_or("."))?;
        let lines: Vec<String> = entries
            .iter()
            .filter(|e| opts.all || !e.name.starts_with('.'))
            .map(|e| {
                if opts.list {
                    format!("{}  {}", e.kind.tag(), e.name)
                } else {
                    e.name.clone()
                }
            })
            .collect();
        if lines.is_empty() {
            return Ok(CommandOutput::None);
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change working directory"
    }
    fn usage(&self) -> &str {
        "cd [path]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(&path) = args.first() else {
            return Ok(CommandOutput::None);
        };
        let target = env.resolve(path);
        if !env.is_dir(&target) {
            return Err(ShellError::NotADirectory(target));
        }
        env.set_cwd(target);
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.cwd().to_string()))
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Display file contents"
    }
    fn usage(&self) -> &str {
        "cat <file>"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let path = args
            .first()
            .ok_or_else(|| ShellError::MissingArgument("path".to_string()))?;
        let handle = env.open(path, false)?;
        let content = env.read(handle)?;
        env.close(handle);
        Ok(CommandOutput::Text(content))
    }
}

// ---------------------------------------------------------------------------
// mkdir
// ---------------------------------------------------------------------------

struct MkdirCmd;
impl Command for MkdirCmd {
    fn name(&self) -> &str {
        "mkdir"
    }
    fn description(&self) -> &str {
        "Create directory"
    }
    fn usage(&self) -> &str {
        "mkdir <path>"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let path = args
            .first()
            .ok_or_else(|| ShellError::MissingArgument("path".to_string()))?;
        env.make_dir(path)?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// touch
// ---------------------------------------------------------------------------

struct TouchCmd;
impl Command for TouchCmd {
    fn name(&self) -> &str {
        "touch"
    }
    fn description(&self) -> &str {
        "Create empty file"
    }
    fn usage(&self) -> &str {
        "touch <file>"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let path = args
            .first()
            .ok_or_else(|| ShellError::MissingArgument("path".to_string()))?;
        let handle = env.open(path, true)?;
        env.close(handle);
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Print text"
    }
    fn usage(&self) -> &str {
        "echo [text...]"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(args.join(" ")))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn description(&self) -> &str {
        "End the session"
    }
    fn usage(&self) -> &str {
        "exit"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Exit)
    }
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

struct HistoryCmd;
impl Command for HistoryCmd {
    fn name(&self) -> &str {
        "history"
    }
    fn description(&self) -> &str {
        "Show submitted commands"
    }
    fn usage(&self) -> &str {
        "history"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let history = env.history();
        if history.is_empty() {
            return Ok(CommandOutput::None);
        }
        let lines: Vec<String> = history
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>4}  {line}", i + 1))
            .collect();
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// howdy
// ---------------------------------------------------------------------------

struct HowdyCmd;
impl Command for HowdyCmd {
    fn name(&self) -> &str {
        "howdy"
    }
    fn description(&self) -> &str {
        "Say hello"
    }
    fn usage(&self) -> &str {
        "howdy"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text("hi there!".to_string()))
    }
}
