use crate::naming::{generate_log_filename, marker_timestamp, now};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, warn};

pub const DEFAULT_LOG_DIR: &str = "data/log";

const LAUNCHING_NOTE: &str = "正在启动...";

#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub log_dir: PathBuf,
    pub echo: bool,
    pub shell: Option<String>,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            echo: false,
            shell: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub log_path: PathBuf,
    pub exit_code: i32,
    pub started_at: OffsetDateTime,
    pub duration: Duration,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("run command {command:?}: {source}")]
    Spawn {
        command: String,
        log_path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("background run for {} panicked", .path.display())]
    Panicked { path: PathBuf },
}

impl RunError {
    pub fn log_path(&self) -> &Path {
        match self {
            RunError::Spawn { log_path, .. } => log_path,
            RunError::Io { path, .. } | RunError::Panicked { path } => path,
        }
    }

    fn io(context: &'static str, path: &Path) -> impl FnOnce(io::Error) -> RunError {
        let path = path.to_path_buf();
        move |source| RunError::Io {
            context,
            path,
            source,
        }
    }
}

/// Dropping it leaves the thread running; `wait` joins it.
#[derive(Debug)]
pub struct AsyncRun {
    path: PathBuf,
    handle: JoinHandle<Result<RunOutcome, RunError>>,
}

impl AsyncRun {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn wait(self) -> Result<RunOutcome, RunError> {
        let path = self.path;
        self.handle
            .join()
            .unwrap_or(Err(RunError::Panicked { path }))
    }

    pub fn detach(self) -> PathBuf {
        self.path
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    options: RunnerOptions,
}

impl CommandRunner {
    pub fn new(options: RunnerOptions) -> Self {
        Self { options }
    }

    pub fn log_dir(&self) -> &Path {
        &self.options.log_dir
    }

    /// A non-zero exit code is still `Ok`.
    pub fn run_sync(&self, command: &str) -> Result<RunOutcome, RunError> {
        let path = self.next_log_path(command)?;
        self.run_sync_to(command, &path, false)
    }

    pub fn run_sync_to(
        &self,
        command: &str,
        path: &Path,
        append: bool,
    ) -> Result<RunOutcome, RunError> {
        let started_at = now();
        let wall = Instant::now();

        let mut log = open_log(path, append)?;
        if !append {
            write_flushed(&mut log, &start_marker(command, started_at))
                .map_err(RunError::io("write log", path))?;
        }

        let exit_code = match self.capture(command, path, &mut log) {
            Ok(code) => code,
            Err(err) => {
                drop(log);
                record_failure(path, &err);
                return Err(err);
            }
        };

        write_flushed(&mut log, &end_marker(exit_code, now()))
            .map_err(RunError::io("write log", path))?;

        debug!(command, exit_code, path = %path.display(), "command finished");

        Ok(RunOutcome {
            log_path: path.to_path_buf(),
            exit_code,
            started_at,
            duration: wall.elapsed(),
        })
    }

    pub fn run_async(&self, command: &str) -> Result<AsyncRun, RunError> {
        let path = self.next_log_path(command)?;

        let mut log = open_log(&path, false)?;
        let preamble = format!(
            "{}\n{LAUNCHING_NOTE}\n",
            launching_marker(command, now())
        );
        write_flushed(&mut log, &preamble).map_err(RunError::io("write log", &path))?;
        drop(log);

        let runner = self.clone();
        let owned_command = command.to_string();
        let thread_path = path.clone();
        let handle = thread::Builder::new()
            .name("launchpad-run".to_string())
            .spawn(move || runner.run_sync_to(&owned_command, &thread_path, true))
            .map_err(RunError::io("start background run for", &path))?;

        debug!(command, path = %path.display(), "command launched in background");
        Ok(AsyncRun { path, handle })
    }

    fn next_log_path(&self, command: &str) -> Result<PathBuf, RunError> {
        let dir = &self.options.log_dir;
        fs::create_dir_all(dir).map_err(RunError::io("create log directory", dir))?;
        Ok(dir.join(generate_log_filename(command)))
    }

    fn capture(&self, command: &str, path: &Path, log: &mut File) -> Result<i32, RunError> {
        let (reader, writer) = io::pipe().map_err(RunError::io("create output pipe for", path))?;
        let stderr_writer = writer
            .try_clone()
            .map_err(RunError::io("create output pipe for", path))?;

        let mut shell = self.shell_command(command);
        shell
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer);

        let spawned = shell.spawn();
        // The Command still owns our copies of the write end; the reader only
        // sees EOF once they are gone.
        drop(shell);
        let mut child = spawned.map_err(|source| RunError::Spawn {
            command: command.to_string(),
            log_path: path.to_path_buf(),
            source,
        })?;

        debug!(command, pid = child.id(), "spawned command");

        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        let mut write_error = None;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, command, "stopped reading command output");
                    break;
                }
            }

            let text = String::from_utf8_lossy(&buf);
            let line = text.trim_end();

            if self.options.echo {
                let _ = writeln!(io::stdout().lock(), "{line}");
            }

            // Keep draining after a failed write so the child never blocks on
            // a full pipe.
            if write_error.is_none()
                && let Err(err) = write_flushed(log, line)
            {
                write_error = Some(err);
            }
        }

        let status = child
            .wait()
            .map_err(RunError::io("wait for command logging to", path))?;

        if let Some(source) = write_error {
            return Err(RunError::Io {
                context: "write log",
                path: path.to_path_buf(),
                source,
            });
        }

        Ok(status.code().unwrap_or(-1))
    }

    fn shell_command(&self, command: &str) -> Command {
        let default_shell = if cfg!(windows) { "cmd" } else { "/bin/sh" };
        let program = self
            .options
            .shell
            .as_deref()
            .filter(|shell| !shell.trim().is_empty())
            .unwrap_or(default_shell);

        let mut cmd = Command::new(program);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.arg("/C").raw_arg(command);
        }

        #[cfg(not(windows))]
        cmd.arg("-c").arg(command);

        cmd
    }
}

fn open_log(path: &Path, append: bool) -> Result<File, RunError> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path).map_err(RunError::io("open log", path))
}

fn write_flushed(log: &mut File, line: &str) -> io::Result<()> {
    log.write_all(line.as_bytes())?;
    log.write_all(b"\n")?;
    log.flush()
}

fn record_failure(path: &Path, err: &RunError) {
    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut log| write_flushed(&mut log, &error_marker(err)));

    if let Err(write_err) = result {
        debug!(error = %write_err, path = %path.display(), "could not record failure in log");
    }
}

fn start_marker(command: &str, at: OffsetDateTime) -> String {
    format!("=== 开始执行命令 [{}]: {command} ===", marker_timestamp(at))
}

fn launching_marker(command: &str, at: OffsetDateTime) -> String {
    format!("=== 准备执行命令 [{}]: {command} ===", marker_timestamp(at))
}

fn end_marker(exit_code: i32, at: OffsetDateTime) -> String {
    format!(
        "=== 命令执行完成 [{}] 退出代码: {exit_code} ===",
        marker_timestamp(at)
    )
}

fn error_marker(err: &RunError) -> String {
    let detail = match err {
        RunError::Spawn { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    format!("=== 执行出错: {detail} ===")
}
