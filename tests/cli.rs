use std::path::Path;
use std::process::{Command, Output};

fn flowfinder(args: &[&str]) -> Output {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    Command::new(env!("CARGO_BIN_EXE_flowfinder"))
        .args(args)
        .arg("--data-dir")
        .arg(data)
        .args(["--log-level", "off"])
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn plans_route_over_sample_venue() {
    let output = flowfinder(&["route", "1", "6"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["status"], "found");
    assert_eq!(json["total_cost"], 122.0);
    assert_eq!(json["steps"][0]["from_name"], "Main gate");
}

#[test]
fn unreachable_node_exits_successfully() {
    let output = flowfinder(&["route", "1", "7"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "no_path");
}

#[test]
fn invalid_input_exits_with_failure() {
    let output = flowfinder(&["route", "2", "2"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("different nodes"));
}

#[test]
fn closed_spot_still_routes_to_nearest_node() {
    let output = flowfinder(&["spot-route", "--from-node", "1", "--to-spot", "4"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["destination"]["resolution"]["kind"], "nearest");
    assert_eq!(json["destination"]["node"], 6);
}

#[test]
fn failure_is_reported_once() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let output = Command::new(env!("CARGO_BIN_EXE_flowfinder"))
        .args(["route", "2", "2", "--log-level", "info", "--data-dir"])
        .arg(data)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("different nodes").count(), 1);
}
