use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn launchpad(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("launchpad");
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}

fn stdout_json(cmd: &mut Command, code: i32) -> Value {
    let out = cmd.assert().code(code).get_output().stdout.clone();
    serde_json::from_slice(&out).expect("json output")
}

#[test]
fn name_prints_base_name_and_next_log() {
    let dir = tempdir().expect("tempdir");

    launchpad(dir.path())
        .args(["name", "--", "cat", "/etc/hosts"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cat_;etc;hosts\n"))
        .stdout(predicate::str::contains("next log: cat_;etc;hosts_"));
}

#[cfg(unix)]
#[test]
fn run_writes_a_log_and_records_activity() {
    let dir = tempdir().expect("tempdir");

    launchpad(dir.path())
        .args(["run", "--no-echo", "--", "echo", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok finished in"));

    let log_dir = dir.path().join("data").join("log");
    let logs: Vec<_> = fs::read_dir(&log_dir)
        .expect("log dir")
        .map(|entry| entry.expect("entry").file_name().into_string().expect("utf8"))
        .filter(|name| name.starts_with("echo_hi_"))
        .collect();
    assert_eq!(logs.len(), 1);

    let text = fs::read_to_string(log_dir.join(&logs[0])).expect("read log");
    assert!(text.contains("=== 开始执行命令 ["));
    assert!(text.contains("\nhi\n"));
    assert!(text.contains("退出代码: 0 ==="));

    let activity = fs::read_to_string(log_dir.join("launcher.log")).expect("activity log");
    assert!(activity.contains("启动命令: echo hi"));
}

#[cfg(unix)]
#[test]
fn run_json_reports_exit_code_and_fails() {
    let dir = tempdir().expect("tempdir");

    let parsed = stdout_json(
        launchpad(dir.path()).args(["run", "--json", "--", "exit", "3"]),
        1,
    );
    assert_eq!(parsed["command"], "exit 3");
    assert_eq!(parsed["base_name"], "exit_3");
    assert_eq!(parsed["exit_code"], 3);
    assert!(parsed["log_path"].as_str().expect("log path").ends_with(".log"));
    assert!(parsed["started_at"].as_str().is_some());
}

#[cfg(unix)]
#[test]
fn failing_run_exits_with_runtime_code() {
    let dir = tempdir().expect("tempdir");

    launchpad(dir.path())
        .args(["run", "--no-echo", "--", "false"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("command exited with code 1"));
}

#[test]
fn logs_for_unknown_command_reports_none() {
    let dir = tempdir().expect("tempdir");

    launchpad(dir.path())
        .args(["logs", "--", "never", "ran"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No log file found for never ran"))
        .stdout(predicate::str::contains("base name: never_ran"));
}

#[cfg(unix)]
#[test]
fn logs_json_lists_latest_run() {
    let dir = tempdir().expect("tempdir");

    launchpad(dir.path())
        .args(["run", "--no-echo", "--", "echo", "again"])
        .assert()
        .success();

    let parsed = stdout_json(
        launchpad(dir.path()).args(["logs", "--json", "--", "echo", "again"]),
        0,
    );
    assert_eq!(parsed["base_name"], "echo_again");
    let logs = parsed["logs"].as_array().expect("logs");
    assert_eq!(logs.len(), 1);
    assert!(
        logs[0]["file_name"]
            .as_str()
            .expect("file name")
            .starts_with("echo_again_")
    );
}

#[test]
fn tail_once_prints_existing_content() {
    let dir = tempdir().expect("tempdir");
    let log = dir.path().join("some.log");
    fs::write(&log, "first line\nsecond line\n").expect("write log");

    launchpad(dir.path())
        .args(["tail", "--once"])
        .arg(&log)
        .assert()
        .success()
        .stdout("first line\nsecond line\n");
}

#[test]
fn validate_json_reports_valid_config() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("launchpad.yml"),
        "version: 1\nlog_dir: logs\ndelay: 500ms\n",
    )
    .expect("write config");

    let parsed = stdout_json(launchpad(dir.path()).args(["validate", "--json"]), 0);
    assert_eq!(parsed["valid"], true);
    assert_eq!(parsed["config"], "./launchpad.yml");
    assert!(parsed.get("issues").is_none());
    assert!(parsed.get("error").is_none());
}

#[test]
fn validate_json_reports_invalid_config_and_fails() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("launchpad.yml"),
        "version: 1\npoll_interval: 1ms\n",
    )
    .expect("write config");

    let parsed = stdout_json(launchpad(dir.path()).args(["validate", "--json"]), 2);
    assert_eq!(parsed["valid"], false);
    assert_eq!(parsed["issues"][0]["field"], "poll_interval");
    assert!(parsed["error"].as_str().is_some());
}

#[test]
fn explicit_missing_config_is_a_usage_error() {
    let dir = tempdir().expect("tempdir");

    launchpad(dir.path())
        .args(["--config", "missing.yml", "logs", "--", "ls"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = tempdir().expect("tempdir");

    launchpad(dir.path()).arg("init").assert().success();
    assert!(dir.path().join("launchpad.yml").exists());

    launchpad(dir.path()).arg("init").assert().code(2);
    launchpad(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn saved_commands_persist() {
    let dir = tempdir().expect("tempdir");

    launchpad(dir.path())
        .args(["cmd", "add", "--", "ls", "-la"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved ls -la"));

    let parsed = stdout_json(launchpad(dir.path()).args(["cmd", "list", "--json"]), 0);
    assert_eq!(parsed, serde_json::json!(["ls -la"]));
    assert!(dir.path().join("data").join("launcher_data.json").exists());

    launchpad(dir.path())
        .args(["cmd", "remove", "2"])
        .assert()
        .code(2);
}

#[test]
fn checked_items_are_numbered_in_check_order() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("a.txt"), "a").expect("write");
    fs::write(dir.path().join("b.txt"), "b").expect("write");

    launchpad(dir.path())
        .args(["item", "add", "a.txt", "b.txt"])
        .assert()
        .success();
    launchpad(dir.path())
        .args(["item", "check", "2", "1"])
        .assert()
        .success();

    let parsed = stdout_json(launchpad(dir.path()).args(["item", "list", "--json"]), 0);
    assert_eq!(parsed[0]["name"], "a.txt");
    assert_eq!(parsed[0]["checked_order"], 2);
    assert_eq!(parsed[1]["checked_order"], 1);

    launchpad(dir.path())
        .args(["item", "check", "9"])
        .assert()
        .code(2);
}

#[test]
fn launch_without_checked_items_does_nothing() {
    let dir = tempdir().expect("tempdir");

    launchpad(dir.path())
        .arg("launch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to launch."));
}

#[test]
fn item_add_is_all_or_nothing() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("a.txt"), "a").expect("write");
    fs::write(dir.path().join("b.txt"), "b").expect("write");

    launchpad(dir.path())
        .args(["item", "add", "a.txt", "b.txt", "missing.txt"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("added").not())
        .stderr(predicate::str::contains("missing.txt does not exist"));

    let parsed = stdout_json(launchpad(dir.path()).args(["item", "list", "--json"]), 0);
    assert_eq!(parsed, serde_json::json!([]));

    launchpad(dir.path())
        .args(["item", "add", "a.txt", "a.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already registered"));
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\nexit 0\n").expect("write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

#[cfg(unix)]
fn activity_lines(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("data").join("log").join("launcher.log"))
        .expect("activity log")
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(unix)]
#[test]
fn item_launch_starts_one_item_and_records_it() {
    let dir = tempdir().expect("tempdir");
    write_script(dir.path(), "first.sh");
    write_script(dir.path(), "second.sh");

    launchpad(dir.path())
        .args(["item", "add", "first.sh", "second.sh"])
        .assert()
        .success();

    launchpad(dir.path())
        .args(["item", "launch", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("launched"))
        .stdout(predicate::str::contains("second.sh"))
        .stdout(predicate::str::contains("first.sh").not());

    let parsed = stdout_json(launchpad(dir.path()).args(["item", "list", "--json"]), 0);
    assert!(parsed[0].get("last_launch").is_none());
    assert!(parsed[1]["last_launch"].as_str().is_some());

    let activity = activity_lines(dir.path());
    assert_eq!(activity.len(), 1);
    assert!(activity[0].contains(" 启动: "));
    assert!(activity[0].ends_with("second.sh"));

    launchpad(dir.path())
        .args(["item", "launch", "3"])
        .assert()
        .code(2);
}

#[cfg(unix)]
#[test]
fn launch_follows_checked_order() {
    let dir = tempdir().expect("tempdir");
    write_script(dir.path(), "a.sh");
    write_script(dir.path(), "b.sh");
    write_script(dir.path(), "c.sh");

    launchpad(dir.path())
        .args(["item", "add", "a.sh", "b.sh", "c.sh"])
        .assert()
        .success();
    launchpad(dir.path())
        .args(["item", "check", "3", "1"])
        .assert()
        .success();

    launchpad(dir.path())
        .args(["launch", "--delay", "50ms"])
        .assert()
        .success();

    let activity = activity_lines(dir.path());
    assert_eq!(activity.len(), 2, "{activity:?}");
    assert!(activity[0].ends_with("c.sh"));
    assert!(activity[1].ends_with("a.sh"));

    let parsed = stdout_json(launchpad(dir.path()).args(["item", "list", "--json"]), 0);
    assert!(parsed[0]["last_launch"].as_str().is_some());
    assert!(parsed[1].get("last_launch").is_none());
    assert!(parsed[2]["last_launch"].as_str().is_some());
}

#[cfg(unix)]
#[test]
fn start_follows_output_once_and_reports_success() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("launchpad.yml"),
        "version: 1\npoll_interval: 100ms\n",
    )
    .expect("write config");

    let out = launchpad(dir.path())
        .args(["start", "--", "echo", "tail-me"])
        .assert()
        .success()
        .stdout(predicate::str::contains("started, log:"))
        .stdout(predicate::str::contains("=== 准备执行命令 ["))
        .stdout(predicate::str::contains("退出代码: 0 ==="))
        .stdout(predicate::str::contains("ok finished in"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(out).expect("utf8");
    assert_eq!(text.lines().filter(|line| *line == "tail-me").count(), 1);
    assert_eq!(text.matches("=== 准备执行命令 [").count(), 1);

    let activity = activity_lines(dir.path());
    assert!(activity.iter().any(|line| line.contains("启动命令: echo tail-me")));
}

#[cfg(unix)]
#[test]
fn start_reports_failing_exit_code() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("launchpad.yml"),
        "version: 1\npoll_interval: 100ms\n",
    )
    .expect("write config");

    launchpad(dir.path())
        .args(["start", "--no-follow", "--", "exit", "4"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("started, log:"))
        .stderr(predicate::str::contains("command exited with code 4"));
}

#[cfg(unix)]
#[test]
fn saved_command_runs_and_shows_its_log() {
    let dir = tempdir().expect("tempdir");

    launchpad(dir.path())
        .args(["cmd", "add", "--", "echo", "saved-run"])
        .assert()
        .success();

    launchpad(dir.path())
        .args(["cmd", "run", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved-run\n"))
        .stdout(predicate::str::contains("ok finished in"));

    launchpad(dir.path())
        .args(["cmd", "log", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("logs for echo saved-run"))
        .stdout(predicate::str::contains("echo_saved-run_"));

    launchpad(dir.path())
        .args(["cmd", "run", "2"])
        .assert()
        .code(2);
}
