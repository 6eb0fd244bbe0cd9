//! Hand-off of files to external programs.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{CoreError, CoreResult};

/// Starts external programs for a file.
///
/// Both methods return as soon as the program has been handed off; they never
/// wait for it to exit.
pub trait Launcher {
    /// Opens `path` with the platform's default application.
    fn open_default(&self, path: &Path) -> CoreResult<()>;

    /// Runs the executable at `path` as a detached process.
    fn launch_executable(&self, path: &Path) -> CoreResult<()>;
}

/// Launcher backed by the platform opener and direct process spawning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open_default(&self, path: &Path) -> CoreResult<()> {
        open::that_detached(path).map_err(|e| {
            tracing::warn!("open: default handler failed for {}: {e}", path.display());
            CoreError::LaunchFailed(format!("{}: {e}", path.display()))
        })
    }

    fn launch_executable(&self, path: &Path) -> CoreResult<()> {
        spawn_detached(path).map(|_pid| ()).map_err(|e| {
            tracing::warn!("open: could not start {}: {e}", path.display());
            CoreError::LaunchFailed(format!("{}: {e}", path.display()))
        })
    }
}

/// Spawns `path` with null stdio and returns its pid.
///
/// A background thread waits on the child so it never lingers as a zombie.
fn spawn_detached(path: &Path) -> io::Result<u32> {
    let mut command = Command::new(path);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(dir) = path.parent() {
        command.current_dir(dir);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let mut child = command.spawn()?;
    let pid = child.id();
    let name = path.display().to_string();
    thread::Builder::new()
        .name("colfm-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => tracing::debug!("open: {name} exited with {status}"),
            Err(e) => tracing::debug!("open: waiting on {name} failed: {e}"),
        })?;
    Ok(pid)
}
