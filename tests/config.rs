use std::fs;
use std::time::Duration;

use td::config::{Config, CONFIG_FILE};

#[test]
fn load_from_defaults_on_invalid_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "api = 123").expect("write invalid config");

    let cfg = Config::load_from(dir.path());
    assert_eq!(cfg.api.base_url, "http://127.0.0.1:5000/tasks");
    assert_eq!(cfg.api.timeout, "30s");
}

#[test]
fn load_from_defaults_on_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");

    let cfg = Config::load_from(dir.path());
    assert_eq!(cfg.api.base_url, "http://127.0.0.1:5000/tasks");
}

#[test]
fn load_from_parses_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let content = r#"
[api]
base_url = "https://todo.example.net/tasks"
timeout = "90s"
"#;
    fs::write(dir.path().join(CONFIG_FILE), content.trim()).expect("write config");

    let cfg = Config::load_from(dir.path());
    assert_eq!(cfg.api.base_url, "https://todo.example.net/tasks");
    assert_eq!(cfg.timeout().expect("timeout"), Duration::from_secs(90));
}

#[test]
fn bad_timeout_is_invalid_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let content = r#"
[api]
timeout = "soon"
"#;
    fs::write(dir.path().join(CONFIG_FILE), content.trim()).expect("write config");

    let cfg = Config::load_from(dir.path());
    let err = cfg.timeout().expect_err("invalid timeout");
    assert_eq!(err.exit_code(), td::error::exit_codes::USER_ERROR);
}
