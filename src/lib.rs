pub mod activity;
pub mod app_error;
pub mod cli;
pub mod config;
pub mod launch;
pub mod launchpad;
pub mod locator;
pub mod naming;
pub mod output;
pub mod runner;
pub mod tailer;
pub mod version;

pub fn run() -> i32 {
    match cli::run_cli() {
        Ok(()) => app_error::ExitCode::Success as i32,
        Err(err) => {
            eprintln!("{} {err}", output::failure("x"));
            err.code()
        }
    }
}
