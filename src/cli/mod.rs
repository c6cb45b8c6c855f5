use crate::activity::{ActivityLog, DEFAULT_TAIL_CHARS};
use crate::app_error::AppError;
use crate::config::{self, DEFAULT_CONFIG_PATH, DEFAULT_CONFIG_TEMPLATE, Settings};
use crate::launch;
use crate::launchpad::{ItemEvent, Launchpad, Store};
use crate::locator;
use crate::naming::{clock_timestamp, derive_base_name, generate_log_filename};
use crate::output::{self, ItemRow};
use crate::runner::{CommandRunner, RunError, RunOutcome};
use crate::tailer::{LogTailer, WriterSink};
use crate::version;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Generator, generate};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    name = "launchpad",
    version = version::VALUE,
    about = "Launch files and shell commands, with a log file per run",
    styles = clap_styles()
)]
struct Cli {
    #[arg(long = "no-color", global = true)]
    no_color: bool,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write a launchpad.yml template
    Init(InitArgs),
    /// Check launchpad.yml for mistakes
    Validate(ValidateArgs),
    /// Run a shell command and wait for it, logging its output
    Run(RunArgs),
    /// Start a shell command in the background and follow its log
    Start(StartArgs),
    /// Find the log files recorded for a command
    Logs(LogsArgs),
    /// Follow a log file as it grows
    Tail(TailArgs),
    /// Show the log file name a command maps to
    Name(CommandWords),
    /// Manage registered files
    #[command(subcommand)]
    Item(ItemCommand),
    /// Manage saved commands
    #[command(subcommand)]
    Cmd(CmdCommand),
    /// Launch registered files, checked ones in checked order by default
    Launch(LaunchArgs),
    /// Open a file or directory with the default handler
    Open(OpenArgs),
    /// Show the end of the activity log
    Activity(ActivityArgs),
    Version,
    Completion(CompletionArgs),
}

#[derive(Debug, Args)]
struct InitArgs {
    #[arg(long)]
    force: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CommandWords {
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

#[derive(Debug, Args)]
struct RunArgs {
    #[arg(long = "no-echo")]
    no_echo: bool,
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    words: CommandWords,
}

#[derive(Debug, Args)]
struct StartArgs {
    /// Wait for the command without streaming its log
    #[arg(long = "no-follow")]
    no_follow: bool,
    #[command(flatten)]
    words: CommandWords,
}

#[derive(Debug, Args)]
struct LogsArgs {
    #[arg(long)]
    all: bool,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    open: bool,
    #[command(flatten)]
    words: CommandWords,
}

#[derive(Debug, Args)]
struct TailArgs {
    #[arg(required_unless_present = "command")]
    path: Option<PathBuf>,
    /// Follow the latest log of this command instead of a path
    #[arg(long, conflicts_with = "path")]
    command: Option<String>,
    /// Print what is there and exit
    #[arg(long)]
    once: bool,
}

#[derive(Debug, Subcommand)]
enum ItemCommand {
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    Remove {
        position: usize,
    },
    /// Check items; each one joins the end of the checked order
    Check {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    Uncheck {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    Clear,
    List {
        #[arg(long)]
        json: bool,
    },
    /// Launch items right away, in the order given
    Launch {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
}

#[derive(Debug, Subcommand)]
enum CmdCommand {
    Add(CommandWords),
    Remove {
        position: usize,
    },
    List {
        #[arg(long)]
        json: bool,
    },
    /// Run a saved command and wait for it
    Run {
        position: usize,
    },
    /// Show the latest log of a saved command
    Log {
        position: usize,
        #[arg(long)]
        open: bool,
    },
}

#[derive(Debug, Args)]
struct LaunchArgs {
    /// Launch every item in list order instead of the checked ones
    #[arg(long)]
    all: bool,
    /// Pause between launches, e.g. 500ms or 2s
    #[arg(long)]
    delay: Option<String>,
}

#[derive(Debug, Args)]
struct OpenArgs {
    path: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ActivityArgs {
    #[arg(long, default_value_t = DEFAULT_TAIL_CHARS)]
    chars: usize,
}

#[derive(Debug, Args)]
struct CompletionArgs {
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

fn clap_styles() -> Styles {
    Styles::plain()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Cyan.on_default())
        .valid(AnsiColor::Cyan.on_default())
        .invalid(AnsiColor::Yellow.on_default())
}

struct Context {
    settings: Settings,
    activity: ActivityLog,
}

impl Context {
    fn store(&self) -> Store {
        Store::new(&self.settings.state_file)
    }

    fn load_pad(&self) -> Result<(Store, Launchpad), AppError> {
        let store = self.store();
        let pad = store.load().map_err(AppError::internal)?;
        Ok((store, pad))
    }

    /// Activity logging never fails the action it describes.
    fn note(&self, message: &str) {
        if let Err(err) = self.activity.append(message) {
            eprintln!("{} {err}", output::warning("warn"));
        }
    }
}

pub fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    output::configure(cli.no_color);
    init_tracing(cli.verbose);

    let config_path = cli.config.clone();
    let explicit_config = config_path.is_some();
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let context = || -> Result<Context, AppError> {
        let settings = load_settings(&config_path, explicit_config)?;
        Ok(Context {
            activity: ActivityLog::new(settings.activity_log()),
            settings,
        })
    };

    match cli.command {
        Commands::Init(args) => run_init(&config_path, args),
        Commands::Validate(args) => run_validate(&config_path, args),
        Commands::Run(args) => run_run(&context()?, args),
        Commands::Start(args) => run_start(&context()?, args),
        Commands::Logs(args) => run_logs(&context()?, args),
        Commands::Tail(args) => run_tail(&context()?, args),
        Commands::Name(words) => run_name(words),
        Commands::Item(cmd) => run_item(&context()?, cmd),
        Commands::Cmd(cmd) => run_cmd(&context()?, cmd),
        Commands::Launch(args) => run_launch(&context()?, args),
        Commands::Open(args) => run_open(&context()?, args),
        Commands::Activity(args) => run_activity(&context()?, args),
        Commands::Version => {
            println!("{}", version::VALUE);
            Ok(())
        }
        Commands::Completion(args) => run_completion(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn load_settings(path: &Path, explicit: bool) -> Result<Settings, AppError> {
    if !path.exists() {
        if explicit {
            return Err(AppError::usage(format!(
                "config file {} not found",
                output::path(&path.display().to_string())
            )));
        }
        return Ok(Settings::default());
    }

    let cfg = config::load(path).map_err(|err| {
        if err.starts_with("read config:") {
            AppError::internal(err)
        } else {
            AppError::usage(err)
        }
    })?;
    cfg.resolve().map_err(AppError::usage)
}

fn run_init(config_path: &Path, args: InitArgs) -> Result<(), AppError> {
    if config_path.exists() && !args.force {
        return Err(AppError::usage(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    fs::write(config_path, DEFAULT_CONFIG_TEMPLATE)
        .map_err(|e| AppError::internal(format!("write {}: {e}", config_path.display())))?;

    println!(
        "created {}",
        output::path(&config_path.display().to_string())
    );
    Ok(())
}

fn run_validate(config_path: &Path, args: ValidateArgs) -> Result<(), AppError> {
    #[derive(Serialize)]
    struct Issue<'a> {
        field: &'a str,
        message: &'a str,
    }

    #[derive(Serialize)]
    struct ValidateOutput<'a> {
        valid: bool,
        config: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        issues: Option<Vec<Issue<'a>>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<&'a str>,
    }

    let config_text = config_path.display().to_string();

    let cfg = match config::parse(config_path) {
        Ok(cfg) => cfg,
        Err(err) => {
            if args.json {
                print_json(&ValidateOutput {
                    valid: false,
                    config: &config_text,
                    issues: None,
                    error: Some(&err),
                })?;
            }
            return Err(AppError::usage(err));
        }
    };

    match config::validate(&cfg) {
        Ok(()) => {
            if args.json {
                print_json(&ValidateOutput {
                    valid: true,
                    config: &config_text,
                    issues: None,
                    error: None,
                })?;
            } else {
                println!("valid {}", output::path(&config_text));
            }
            Ok(())
        }
        Err(err) => {
            let message = err.to_string();
            if args.json {
                let issues = err
                    .issues
                    .iter()
                    .map(|issue| Issue {
                        field: &issue.field,
                        message: &issue.message,
                    })
                    .collect();
                print_json(&ValidateOutput {
                    valid: false,
                    config: &config_text,
                    issues: Some(issues),
                    error: Some(&message),
                })?;
            }
            Err(AppError::usage(message))
        }
    }
}

fn command_text(words: &CommandWords) -> Result<String, AppError> {
    let command = words.command.join(" ");
    let command = command.trim();
    if command.is_empty() {
        return Err(AppError::usage("command must not be empty"));
    }
    Ok(command.to_string())
}

fn run_name(words: CommandWords) -> Result<(), AppError> {
    let command = command_text(&words)?;
    println!("{}", derive_base_name(&command));
    println!(
        "  {} {}",
        output::muted("next log:"),
        generate_log_filename(&command)
    );
    Ok(())
}

#[derive(Serialize)]
struct RunJsonPayload<'a> {
    command: &'a str,
    base_name: String,
    log_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
    #[serde(with = "time::serde::rfc3339::option")]
    started_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn run_run(ctx: &Context, args: RunArgs) -> Result<(), AppError> {
    let command = command_text(&args.words)?;
    let mut options = ctx.settings.runner_options();
    options.echo = options.echo && !args.no_echo && !args.json;

    let result = CommandRunner::new(options).run_sync(&command);
    record_run(ctx, &command, &result);

    if args.json {
        let payload = match &result {
            Ok(outcome) => RunJsonPayload {
                command: &command,
                base_name: derive_base_name(&command),
                log_path: outcome.log_path.display().to_string(),
                exit_code: Some(outcome.exit_code),
                started_at: Some(outcome.started_at),
                duration_ms: Some(outcome.duration.as_millis()),
                error: None,
            },
            Err(err) => RunJsonPayload {
                command: &command,
                base_name: derive_base_name(&command),
                log_path: err.log_path().display().to_string(),
                exit_code: None,
                started_at: None,
                duration_ms: None,
                error: Some(err.to_string()),
            },
        };
        print_json(&payload)?;
    }

    let outcome = result?;
    finish_run(&outcome, !args.json)
}

fn record_run(ctx: &Context, command: &str, result: &Result<RunOutcome, RunError>) {
    match result {
        Ok(outcome) => ctx.note(&format!(
            "启动命令: {command}，日志: {}",
            outcome.log_path.display()
        )),
        Err(err) => ctx.note(&format!("命令启动失败: {command} 错误: {err}")),
    }
}

fn finish_run(outcome: &RunOutcome, report: bool) -> Result<(), AppError> {
    let log_text = outcome.log_path.display().to_string();

    if !outcome.success() {
        return Err(AppError::runtime(format!(
            "command exited with code {} (log: {log_text})",
            outcome.exit_code
        )));
    }

    if report {
        println!(
            "{} finished in {} (log: {})",
            output::success("ok"),
            output::number(&output::format_duration(outcome.duration)),
            output::path(&log_text)
        );
    }
    Ok(())
}

fn run_start(ctx: &Context, args: StartArgs) -> Result<(), AppError> {
    let command = command_text(&args.words)?;
    let mut options = ctx.settings.runner_options();
    // The tailer shows the output; echoing as well would print it twice.
    options.echo = false;

    let run = match CommandRunner::new(options).run_async(&command) {
        Ok(run) => run,
        Err(err) => {
            ctx.note(&format!("命令启动失败: {command} 错误: {err}"));
            return Err(err.into());
        }
    };

    println!(
        "{} started, log: {}",
        output::info("->"),
        output::path(&run.path().display().to_string())
    );

    if !args.no_follow {
        let mut tailer = LogTailer::new(WriterSink::new(io::stdout()));
        tailer.set_current_log_file(run.path());
        tailer.follow(ctx.settings.poll_interval, || run.is_finished());
    }

    let result = run.wait();
    record_run(ctx, &command, &result);
    finish_run(&result?, true)
}

#[derive(Serialize)]
struct LogsJson<'a> {
    command: &'a str,
    base_name: &'a str,
    logs: &'a [locator::LogEntry],
}

fn run_logs(ctx: &Context, args: LogsArgs) -> Result<(), AppError> {
    let command = command_text(&args.words)?;
    show_logs(ctx, &command, args.all, args.json, args.open)
}

fn show_logs(
    ctx: &Context,
    command: &str,
    all: bool,
    as_json: bool,
    open: bool,
) -> Result<(), AppError> {
    let base_name = derive_base_name(command);
    let mut entries = locator::list_logs(command, &ctx.settings.log_dir).map_err(|e| {
        AppError::internal(format!(
            "list {}: {e}",
            ctx.settings.log_dir.display()
        ))
    })?;

    if !all {
        entries.truncate(1);
    }

    if as_json {
        print_json(&LogsJson {
            command,
            base_name: &base_name,
            logs: &entries,
        })?;
    } else {
        output::print_logs(io::stdout().lock(), command, &base_name, &entries)
            .map_err(|e| AppError::internal(format!("print logs: {e}")))?;
    }

    if open && let Some(latest) = entries.first() {
        launch::open_path(&latest.path).map_err(AppError::runtime)?;
        ctx.note(&format!("打开日志文件: {}", latest.path.display()));
    }

    Ok(())
}

fn run_tail(ctx: &Context, args: TailArgs) -> Result<(), AppError> {
    let path = match (args.path, args.command) {
        (Some(path), _) => path,
        (None, Some(command)) => locator::find_latest(&command, &ctx.settings.log_dir)
            .map_err(|e| AppError::internal(format!("find log: {e}")))?
            .ok_or_else(|| AppError::runtime(format!("no log file found for {command:?}")))?,
        (None, None) => return Err(AppError::usage("a log path or --command is required")),
    };

    if !path.is_file() {
        return Err(AppError::usage(format!(
            "log file {} not found",
            output::path(&path.display().to_string())
        )));
    }

    let mut tailer = LogTailer::new(WriterSink::new(io::stdout()));
    tailer.set_current_log_file(&path);
    if args.once {
        tailer.flush_pending();
        return Ok(());
    }

    // Runs until interrupted.
    tailer.follow(ctx.settings.poll_interval, || false);
    Ok(())
}

fn to_index(position: usize, len: usize, what: &str) -> Result<usize, AppError> {
    if position == 0 || position > len {
        return Err(AppError::usage(format!(
            "no {what} at position {position} (have {len})"
        )));
    }
    Ok(position - 1)
}

fn run_item(ctx: &Context, cmd: ItemCommand) -> Result<(), AppError> {
    let (store, mut pad) = ctx.load_pad()?;

    match cmd {
        ItemCommand::Add { paths } => {
            // Nothing is added unless every path is acceptable.
            let mut accepted: Vec<PathBuf> = Vec::with_capacity(paths.len());
            for path in paths {
                if !path.exists() {
                    return Err(AppError::usage(format!(
                        "{} does not exist",
                        path.display()
                    )));
                }
                let absolute = std::path::absolute(&path).unwrap_or(path);
                if accepted.contains(&absolute)
                    || pad.items().iter().any(|item| item.path == absolute)
                {
                    return Err(AppError::usage(format!(
                        "{} is already registered",
                        absolute.display()
                    )));
                }
                accepted.push(absolute);
            }

            for absolute in accepted {
                pad.add_item(&absolute).map_err(AppError::usage)?;
                println!(
                    "{} added {}",
                    output::success("ok"),
                    output::path(&absolute.display().to_string())
                );
            }
        }
        ItemCommand::Remove { position } => {
            let index = to_index(position, pad.items().len(), "item")?;
            if let Some(item) = pad.remove_item(index) {
                println!("{} removed {}", output::success("ok"), item.name());
            }
        }
        ItemCommand::Check { positions } => {
            for position in positions {
                let index = to_index(position, pad.items().len(), "item")?;
                pad.apply(ItemEvent::Checked(index))
                    .map_err(AppError::usage)?;
            }
        }
        ItemCommand::Uncheck { positions } => {
            for position in positions {
                let index = to_index(position, pad.items().len(), "item")?;
                pad.apply(ItemEvent::Unchecked(index))
                    .map_err(AppError::usage)?;
            }
        }
        ItemCommand::Clear => pad.clear_checked(),
        ItemCommand::List { json } => return list_items(&pad, json),
        ItemCommand::Launch { positions } => {
            let order = positions
                .into_iter()
                .map(|position| to_index(position, pad.items().len(), "item"))
                .collect::<Result<Vec<_>, _>>()?;
            return launch_items(ctx, &store, &mut pad, &order, ctx.settings.delay);
        }
    }

    store.save(&pad).map_err(AppError::internal)?;
    list_items(&pad, false)
}

fn list_items(pad: &Launchpad, as_json: bool) -> Result<(), AppError> {
    let rows: Vec<ItemRow> = pad
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| ItemRow {
            position: index + 1,
            name: item.name(),
            path: item.path.display().to_string(),
            checked_number: pad.display_number(index),
            last_launch: item.last_launch.clone(),
        })
        .collect();

    if as_json {
        #[derive(Serialize)]
        struct ItemJson<'a> {
            position: usize,
            name: &'a str,
            path: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            checked_order: Option<usize>,
            #[serde(skip_serializing_if = "Option::is_none")]
            last_launch: Option<&'a str>,
        }

        let items: Vec<ItemJson<'_>> = rows
            .iter()
            .map(|row| ItemJson {
                position: row.position,
                name: &row.name,
                path: &row.path,
                checked_order: row.checked_number,
                last_launch: row.last_launch.as_deref(),
            })
            .collect();
        return print_json(&items);
    }

    output::print_items(io::stdout().lock(), &rows)
        .map_err(|e| AppError::internal(format!("print items: {e}")))
}

fn run_cmd(ctx: &Context, cmd: CmdCommand) -> Result<(), AppError> {
    let (store, mut pad) = ctx.load_pad()?;

    match cmd {
        CmdCommand::Add(words) => {
            let command = command_text(&words)?;
            pad.add_command(&command).map_err(AppError::usage)?;
            store.save(&pad).map_err(AppError::internal)?;
            println!("{} saved {}", output::success("ok"), output::accent(&command));
            Ok(())
        }
        CmdCommand::Remove { position } => {
            let index = to_index(position, pad.commands().len(), "command")?;
            if let Some(command) = pad.remove_command(index) {
                store.save(&pad).map_err(AppError::internal)?;
                println!("{} removed {}", output::success("ok"), output::accent(&command));
            }
            Ok(())
        }
        CmdCommand::List { json } => {
            if json {
                return print_json(&pad.commands());
            }
            output::print_commands(io::stdout().lock(), pad.commands())
                .map_err(|e| AppError::internal(format!("print commands: {e}")))
        }
        CmdCommand::Run { position } => {
            let index = to_index(position, pad.commands().len(), "command")?;
            let command = pad.commands()[index].clone();
            let result = CommandRunner::new(ctx.settings.runner_options()).run_sync(&command);
            record_run(ctx, &command, &result);
            finish_run(&result?, true)
        }
        CmdCommand::Log { position, open } => {
            let index = to_index(position, pad.commands().len(), "command")?;
            let command = pad.commands()[index].clone();
            show_logs(ctx, &command, false, false, open)
        }
    }
}

fn run_launch(ctx: &Context, args: LaunchArgs) -> Result<(), AppError> {
    let delay = match args.delay.as_deref() {
        Some(text) => {
            config::parse_duration(text).map_err(|e| AppError::usage(format!("--delay: {e}")))?
        }
        None => ctx.settings.delay,
    };

    let (store, mut pad) = ctx.load_pad()?;
    let order: Vec<usize> = if args.all {
        (0..pad.items().len()).collect()
    } else {
        pad.checked_in_order()
    };

    if order.is_empty() {
        println!("{} {}", output::info("i"), output::muted("Nothing to launch."));
        return Ok(());
    }

    launch_items(ctx, &store, &mut pad, &order, delay)
}

fn launch_items(
    ctx: &Context,
    store: &Store,
    pad: &mut Launchpad,
    order: &[usize],
    delay: Duration,
) -> Result<(), AppError> {
    let paths: Vec<PathBuf> = order
        .iter()
        .map(|index| pad.items()[*index].path.clone())
        .collect();
    let reports = launch::launch_sequence(&paths, delay, launch::launch_path);

    let mut failures = Vec::new();
    for (index, report) in order.iter().zip(&reports) {
        let shown = report.path.display().to_string();
        match &report.error {
            None => {
                pad.record_launch(*index, clock_timestamp(report.launched_at));
                ctx.note(&format!("启动: {shown}"));
                println!("{} launched {}", output::success("ok"), output::path(&shown));
            }
            Some(err) => {
                ctx.note(&format!("启动失败: {shown} 错误: {err}"));
                eprintln!("{} {err}", output::failure("x"));
                failures.push(shown);
            }
        }
    }

    store.save(pad).map_err(AppError::internal)?;

    if failures.is_empty() {
        Ok(())
    } else {
        Err(AppError::runtime(format!(
            "failed to launch {} of {}: {}",
            failures.len(),
            reports.len(),
            failures.join(", ")
        )))
    }
}

fn run_open(ctx: &Context, args: OpenArgs) -> Result<(), AppError> {
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));
    let path = std::path::absolute(&path).unwrap_or(path);
    launch::open_path(&path).map_err(AppError::runtime)?;
    ctx.note(&format!("打开: {}", path.display()));
    Ok(())
}

fn run_activity(ctx: &Context, args: ActivityArgs) -> Result<(), AppError> {
    match ctx.activity.tail(args.chars).map_err(AppError::internal)? {
        Some(text) => {
            print!("{text}");
            io::stdout()
                .flush()
                .map_err(|e| AppError::internal(format!("write output: {e}")))
        }
        None => {
            println!("{} {}", output::info("i"), output::muted("No activity yet."));
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)
        .map_err(|e| AppError::internal(format!("encode json: {e}")))?;
    writeln!(stdout).map_err(|e| AppError::internal(format!("write output: {e}")))
}

fn run_completion(args: CompletionArgs) -> Result<(), AppError> {
    let mut cmd = Cli::command();
    let mut stdout = io::stdout().lock();

    match args.shell {
        Shell::Bash => generate_completion(clap_complete::shells::Bash, &mut cmd, &mut stdout),
        Shell::Zsh => generate_completion(clap_complete::shells::Zsh, &mut cmd, &mut stdout),
        Shell::Fish => generate_completion(clap_complete::shells::Fish, &mut cmd, &mut stdout),
        Shell::Powershell => {
            generate_completion(clap_complete::shells::PowerShell, &mut cmd, &mut stdout)
        }
    }
    .map_err(|e| AppError::internal(format!("generate completion: {e}")))
}

fn generate_completion<G: Generator>(
    generator: G,
    cmd: &mut clap::Command,
    writer: &mut impl Write,
) -> Result<(), io::Error> {
    generate(generator, cmd, "launchpad", writer);
    writer.flush()
}
