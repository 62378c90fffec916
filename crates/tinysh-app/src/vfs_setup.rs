use tinysh_terminal::Environment;
use tinysh_types::error::Result;

/// Create the demo file tree through the stdio facade.
pub fn populate_demo_vfs(env: &mut Environment<'_>) -> Result<()> {
    for dir in ["/home", "/home/friends"] {
        if !env.is_dir(dir) {
            env.make_dir(dir)?;
        }
    }
    write_file(env, "/home/about", "this is about me")?;
    write_file(env, "/home/friends/Rachael", "this is about Rachael")?;
    log::debug!("seeded demo files");
    Ok(())
}

fn write_file(env: &mut Environment<'_>, path: &str, content: &str) -> Result<()> {
    let handle = env.open(path, true)?;
    env.truncate(handle)?;
    env.write(handle, content)?;
    env.close(handle);
    Ok(())
}
