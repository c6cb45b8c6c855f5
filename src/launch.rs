use crate::naming::now;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LaunchReport {
    pub path: PathBuf,
    pub launched_at: OffsetDateTime,
    pub error: Option<String>,
}

impl LaunchReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// No sleep after the last launch; a failure does not stop the sequence.
pub fn launch_sequence<F>(paths: &[PathBuf], delay: Duration, mut launch: F) -> Vec<LaunchReport>
where
    F: FnMut(&Path) -> Result<(), String>,
{
    let mut reports = Vec::with_capacity(paths.len());

    for (idx, path) in paths.iter().enumerate() {
        let launched_at = now();
        let error = launch(path).err();
        debug!(path = %path.display(), ok = error.is_none(), "launched item");

        reports.push(LaunchReport {
            path: path.clone(),
            launched_at,
            error,
        });

        if idx + 1 < paths.len() && !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    reports
}

pub fn launch_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("{} does not exist", path.display()));
    }

    let mut cmd = if is_executable(path) {
        Command::new(path)
    } else {
        opener_command(path)
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| format!("launch {}: {e}", path.display()))
}

pub fn open_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("{} does not exist", path.display()));
    }

    let status = opener_command(path)
        .stdin(Stdio::null())
        .status()
        .map_err(|e| format!("open {}: {e}", path.display()))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("open {}: opener exited with {status}", path.display()))
    }
}

fn opener_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg("start").arg("").arg(path);
        return cmd;
    }

    let program = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    let mut cmd = Command::new(program);
    cmd.arg(path);
    cmd
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

// Windows hands everything to `start`, which runs executables itself.
#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}
