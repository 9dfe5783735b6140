use std::fs;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

const LINK: &str =
    "vless://b831381d-6324-4d53-ad4f-8cda48b30811@example.com:443?type=ws&path=%2Fpath&host=example.com#WS+Node";

fn temp_path(name: &str) -> std::path::PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let id = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut path = std::env::temp_dir();
    path.push(format!("vlessconv_{}_{}_{}", ts, id, name));
    path
}

fn vlessconv(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_vlessconv"))
        .args(args)
        .output()
        .expect("run vlessconv")
}

#[test]
fn convert_prints_pretty_config() {
    let output = vlessconv(&["convert", LINK]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("{\n  \"inbounds\""));
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(value["outbounds"][0]["tag"], "WS Node");
}

#[test]
fn convert_json_record_for_bad_link() {
    let output = vlessconv(&["convert", "not-a-vless-link", "--json"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"isValid\":false"));
    assert!(stdout.contains("\"config\":null"));
}

#[test]
fn convert_writes_output_file() {
    let path = temp_path("config.json");
    let output = vlessconv(&["convert", LINK, "--output", path.to_str().unwrap()]);
    assert!(output.status.success());
    let written = fs::read_to_string(&path).expect("read output");
    assert!(written.contains("\"wsSettings\""));
    let _ = fs::remove_file(&path);
}

#[test]
fn check_json_success() {
    let output = vlessconv(&["check", LINK, "--json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"ok\":true"));
    assert!(stdout.contains("WS Node"));
}

#[test]
fn batch_reports_each_line() {
    let path = temp_path("links.txt");
    fs::write(&path, format!("# mine\n{}\nbroken\n", LINK)).expect("write links");
    let output = vlessconv(&["batch", "--file", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1: ok WS Node"));
    assert!(stdout.contains("2: error"));
    let _ = fs::remove_file(&path);
}

#[test]
fn bad_settings_file_fails() {
    let path = temp_path("settings.yaml");
    fs::write(&path, "log_level: loud\n").expect("write settings");
    let output = vlessconv(&["--config", path.to_str().unwrap(), "check", LINK]);
    assert!(!output.status.success());
    let _ = fs::remove_file(&path);
}

#[test]
fn bad_log_level_flag_fails() {
    let output = vlessconv(&["--log-level", "loud", "check", LINK]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown log level"));
}
