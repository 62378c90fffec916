//! tinysh interactive entry point.
//!
//! Reads command lines from stdin, feeds them to the shell as edit events,
//! and prints whatever the shell appends to its output stream. Logs go to
//! stderr; set `RUST_LOG=debug` to see dispatch and handle reclaim.

mod pager;
mod vfs_setup;

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;

use pager::{OutputCursor, skip_echo};
use tinysh_terminal::Shell;
use tinysh_types::config::ShellConfig;
use tinysh_types::input::EditEvent;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("Starting tinysh (home {})", config.home);

    let mut shell = Shell::new(config)?;
    if shell.config().seed_demo_files {
        shell.init(vfs_setup::populate_demo_vfs)?;
    }

    let exited = Rc::new(Cell::new(false));
    let flag = Rc::clone(&exited);
    shell.on_exit(move |_out| flag.set(true));

    let mut cursor = OutputCursor::new(shell.output());
    shell.run_startup();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    write!(stdout, "{}", cursor.poll(shell.output()).text)?;
    while !exited.get() {
        write!(stdout, "{}", shell.editor().text())?;
        stdout.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(stdout)?;
            break;
        };
        for ch in line.chars() {
            shell.handle_event(EditEvent::Insert(ch));
        }
        shell.handle_event(EditEvent::Submit);

        let delta = cursor.poll(shell.output());
        if delta.cleared {
            write!(stdout, "\x1b[2J\x1b[H{}", delta.text)?;
        } else {
            write!(stdout, "{}", skip_echo(delta.text))?;
        }
    }
    stdout.flush()?;

    log::info!("tinysh exiting");
    Ok(())
}

/// Config path from the first CLI argument or `TINYSH_CONFIG`; defaults
/// otherwise.
fn load_config() -> Result<ShellConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TINYSH_CONFIG").ok());
    match path {
        Some(path) => {
            let config = ShellConfig::load(Path::new(&path))?;
            log::info!("Loaded config from {path}");
            Ok(config)
        },
        None => Ok(ShellConfig::default()),
    }
}
