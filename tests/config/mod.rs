use launchpad_cli::config::{
    self, Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_LAUNCH_DELAY, Settings, load, parse_duration,
    validate,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

fn versioned() -> Config {
    Config {
        version: config::CURRENT_VERSION,
        ..Config::default()
    }
}

#[test]
fn validate_accepts_minimal_config() {
    assert!(validate(&versioned()).is_ok());
}

#[test]
fn validate_rejects_wrong_version() {
    let err = validate(&Config::default()).expect_err("version 0 must fail");
    assert!(err.to_string().contains("version"));
}

#[test]
fn validate_collects_every_issue() {
    let cfg = Config {
        delay: "soon".to_string(),
        poll_interval: "10ms".to_string(),
        log_dir: "   ".to_string(),
        ..versioned()
    };

    let err = validate(&cfg).expect_err("expected validation errors");
    let fields: Vec<&str> = err.issues.iter().map(|issue| issue.field.as_str()).collect();
    assert_eq!(fields, ["delay", "poll_interval", "log_dir"]);
}

#[test]
fn validate_caps_launch_delay() {
    let cfg = Config {
        delay: "2h".to_string(),
        ..versioned()
    };
    let err = validate(&cfg).expect_err("delay too long");
    assert!(err.to_string().contains("must not exceed 1h"));
}

#[test]
fn resolve_uses_defaults_for_empty_fields() {
    let settings = versioned().resolve().expect("resolve");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.log_dir, PathBuf::from("data/log"));
    assert_eq!(settings.state_file, PathBuf::from("data/launcher_data.json"));
    assert_eq!(settings.delay, DEFAULT_LAUNCH_DELAY);
    assert!(settings.echo);
    assert_eq!(settings.shell, None);
}

#[test]
fn resolve_applies_overrides() {
    let cfg = Config {
        log_dir: "logs".to_string(),
        delay: "250ms".to_string(),
        poll_interval: "2s".to_string(),
        echo: Some(false),
        shell: " /bin/bash ".to_string(),
        ..versioned()
    };

    let settings = cfg.resolve().expect("resolve");
    assert_eq!(settings.log_dir, PathBuf::from("logs"));
    assert_eq!(settings.delay, Duration::from_millis(250));
    assert_eq!(settings.poll_interval, Duration::from_secs(2));
    assert!(!settings.echo);
    assert_eq!(settings.shell.as_deref(), Some("/bin/bash"));
    assert_eq!(settings.activity_log(), PathBuf::from("logs/launcher.log"));

    let options = settings.runner_options();
    assert_eq!(options.log_dir, PathBuf::from("logs"));
    assert!(!options.echo);
}

#[test]
fn resolve_reports_bad_duration_field() {
    let cfg = Config {
        poll_interval: "often".to_string(),
        ..versioned()
    };
    let err = cfg.resolve().expect_err("bad duration");
    assert!(err.starts_with("poll_interval:"), "{err}");
}

#[test]
fn parse_duration_trims_input() {
    assert_eq!(parse_duration(" 3s ").expect("parse"), Duration::from_secs(3));
    assert!(parse_duration("three").is_err());
}

#[test]
fn default_template_loads() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("launchpad.yml");
    fs::write(&path, DEFAULT_CONFIG_TEMPLATE).expect("write config");

    let cfg = load(&path).expect("load template");
    let settings = cfg.resolve().expect("resolve");
    assert_eq!(settings.delay, Duration::from_secs(1));
    assert_eq!(settings.poll_interval, Duration::from_secs(1));
    assert!(settings.echo);
}

#[test]
fn load_rejects_unknown_field() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("launchpad.yml");
    fs::write(&path, "version: 1\nlog_dir: data/log\nunexpected: true\n").expect("write config");

    let err = load(&path).expect_err("unknown field");
    assert!(err.contains("parse config yaml"), "{err}");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempdir().expect("tempdir");
    let err = load(&dir.path().join("nope.yml")).expect_err("missing file");
    assert!(err.contains("read config"));
}
