use assert_cmd::Command;
use chrono::{DateTime, Duration, TimeZone, Utc};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn ecoscore(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ecoscore").expect("binary should compile");
    cmd.env("HOME", dir)
        .env_remove("RUST_LOG")
        .arg("--config-dir")
        .arg(dir);
    cmd
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("fixed timestamp is valid")
}

fn stamp(offset_ms: i64) -> String {
    (start() + Duration::milliseconds(offset_ms)).to_rfc3339()
}

/// Six quick hover-then-click steps along a straight pointer path.
fn decisive_session(user: &str) -> Vec<Value> {
    let mut events = Vec::new();
    for step in 0..6i64 {
        let base = step * 2_000;
        events.push(json!({
            "userId": user, "actionType": "move", "target": "body",
            "timestamp": stamp(base),
            "metadata": { "x": step as f64 * 20.0, "y": 0.0 }
        }));
        events.push(json!({
            "userId": user, "actionType": "hover", "target": "#nextBtn",
            "timestamp": stamp(base + 100)
        }));
        events.push(json!({
            "userId": user, "actionType": "click", "target": "#nextBtn",
            "timestamp": stamp(base + 400)
        }));
    }
    events
}

fn trip(id: &str, user: &str, vehicle: &str, distance: f64, duration: f64, created_at: &str) -> Value {
    json!({
        "id": id, "userId": user, "vehicle": vehicle,
        "distance": distance, "duration": duration, "createdAt": created_at
    })
}

/// Workspace with an empty config and a dataset of trips and telemetry.
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("ecoscore.toml"), "").expect("config should write");

    let dataset = json!({
        "trips": [
            trip("t1", "alice", "car", 3.0, 10.0, "2025-01-10T08:00:00Z"),
            trip("t2", "alice", "bike", 8.0, 20.0, "2025-01-20T17:30:00Z"),
            trip("t3", "bob", "public_transport", 20.0, 30.0, "2025-02-03T08:15:00Z"),
            trip("t4", "carol", "vliegtuig", 900.0, 120.0, "2025-02-14T06:00:00Z"),
        ],
        "telemetry": decisive_session("alice"),
    });
    let path = dir.path().join("data.json");
    fs::write(&path, serde_json::to_string_pretty(&dataset).expect("dataset should serialize"))
        .expect("dataset should write");
    (dir, path)
}

#[test]
fn trips_lists_recomputed_scores() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("trips")
        .arg(&dataset)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("| t1 | alice | Car | 3 | 10 | 32 | Eco Neutral |"))
        .stdout(predicate::str::contains("| t2 | alice | Bike | 8 | 20 | 100 | Eco Warrior |"))
        .stdout(predicate::str::contains("| t4 | carol | Airplane | 900 | 120 | 5 | Climate Criminal |"));
}

#[test]
fn trips_filters_by_user_in_json() {
    let (dir, dataset) = workspace();
    let output = ecoscore(dir.path())
        .arg("trips")
        .arg(&dataset)
        .args(["--user", "bob", "--format", "json"])
        .output()
        .expect("command should run");
    assert_eq!(output.status.code(), Some(0));

    let trips: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    let trips = trips.as_array().expect("trips should be an array");
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0]["id"], "t3");
    assert_eq!(trips[0]["efficiency_score"], 85);
}

#[test]
fn analyze_tags_a_decisive_user() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("analyze")
        .arg(&dataset)
        .args(["--user", "alice"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# Behavioral Profile: alice"))
        .stdout(predicate::str::contains("- Impulsive"))
        .stdout(predicate::str::contains("- Efficient"))
        .stdout(predicate::str::contains("Analyzed 18 events"));
}

#[test]
fn analyze_without_write_leaves_dataset_untouched() {
    let (dir, dataset) = workspace();
    let before = fs::read_to_string(&dataset).expect("dataset should read");
    ecoscore(dir.path())
        .arg("analyze")
        .arg(&dataset)
        .args(["--user", "alice", "--format", "json"])
        .assert()
        .code(0);
    assert_eq!(fs::read_to_string(&dataset).expect("dataset should read"), before);
}

#[test]
fn analyze_write_persists_profile() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("analyze")
        .arg(&dataset)
        .args(["--user", "alice", "--write", "--format", "json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"population_size\": 1"));

    let saved: Value = serde_json::from_str(&fs::read_to_string(&dataset).expect("dataset should read"))
        .expect("dataset should stay valid json");
    let profile = &saved["profiles"]["alice"];
    assert_eq!(profile["data_points"], 18);
    assert_eq!(profile["analysis_version"], 1);
    assert!(profile["tags"]
        .as_array()
        .expect("tags should be an array")
        .contains(&json!("Impulsive")));
    assert_eq!(saved["trips"].as_array().map(Vec::len), Some(4));
}

#[test]
fn analyze_since_narrows_the_window() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("analyze")
        .arg(&dataset)
        .args(["--user", "alice", "--since"])
        .arg(stamp(10_000))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Analyzed 3 events"));
}

#[test]
fn analyze_unknown_user_warns() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("analyze")
        .arg(&dataset)
        .args(["--user", "nobody"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("- Normal"))
        .stderr(predicate::str::contains("no telemetry events"));
}

#[test]
fn analyze_rejects_malformed_since() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("analyze")
        .arg(&dataset)
        .args(["--user", "alice", "--since", "yesterday"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--since 'yesterday'"));
}

#[test]
fn stats_aggregates_the_dataset() {
    let (dir, dataset) = workspace();
    let output = ecoscore(dir.path())
        .arg("stats")
        .arg(&dataset)
        .args(["--format", "json"])
        .output()
        .expect("command should run");
    assert_eq!(output.status.code(), Some(0));

    let stats: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(stats["total_trips"], 4);
    assert_eq!(stats["distinct_users"], 3);
    assert_eq!(stats["average_efficiency"], 55.5);
    assert_eq!(stats["rankings"][0]["user_id"], "bob");
    assert_eq!(stats["monthly"][1]["month"], "2025-02");
}

#[test]
fn stats_filters_by_tier_and_date() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("stats")
        .arg(&dataset)
        .args(["--tier", "warrior", "--from", "2025-02-01T00:00:00Z"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("- trips: 1"))
        .stdout(predicate::str::contains("1. bob (avg 85.0, 1 trips, 20.0 km)"));
}

#[test]
fn stats_rejects_unknown_vehicle_filter() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("stats")
        .arg(&dataset)
        .args(["--vehicle", "hovercraft"])
        .assert()
        .code(2);
}

#[test]
fn missing_dataset_is_a_runtime_failure() {
    let (dir, _) = workspace();
    ecoscore(dir.path())
        .arg("trips")
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn malformed_dataset_is_a_runtime_failure() {
    let (dir, dataset) = workspace();
    fs::write(&dataset, "{ \"trips\": [ {").expect("dataset should write");
    ecoscore(dir.path())
        .arg("stats")
        .arg(&dataset)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("json error"));
}

#[test]
fn submit_scores_and_stores_the_trip() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("submit")
        .arg(&dataset)
        .args(["--user", "dana", "--vehicle", "car", "--distance", "3", "--duration", "10"])
        .args(["--origin", "Gent", "--destination", "Brugge"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("| t5 | dana | Car | 3 | 10 | 32 | Eco Neutral |"));

    let saved: Value = serde_json::from_str(&fs::read_to_string(&dataset).expect("dataset should read"))
        .expect("dataset should stay valid json");
    let trips = saved["trips"].as_array().expect("trips should be an array");
    assert_eq!(trips.len(), 5);
    assert_eq!(trips[4]["origin"], "Gent");
    assert_eq!(saved["annotations"]["t5"]["efficiency_score"], 32);
    assert_eq!(saved["annotations"]["t5"]["color"], "orange");
}

#[test]
fn submit_rejects_invalid_trip_without_writing() {
    let (dir, dataset) = workspace();
    let before = fs::read_to_string(&dataset).expect("dataset should read");
    ecoscore(dir.path())
        .arg("submit")
        .arg(&dataset)
        .args(["--user", "dana", "--vehicle", "bike", "--distance", "4", "--duration", "-5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("duration must be a finite, non-negative number"));
    assert_eq!(fs::read_to_string(&dataset).expect("dataset should read"), before);
}

#[test]
fn submit_rejects_taken_id() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("submit")
        .arg(&dataset)
        .args(["--id", "t1", "--user", "dana", "--vehicle", "walking"])
        .args(["--distance", "1", "--duration", "12"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("duplicate trip id: t1"));
}

#[test]
fn ingest_then_analyze_uses_the_new_events() {
    let (dir, dataset) = workspace();
    let batch = dir.path().join("batch.json");
    let events: Vec<Value> = decisive_session("ignored")
        .into_iter()
        .map(|mut event| {
            event
                .as_object_mut()
                .expect("event should be an object")
                .remove("userId");
            event
        })
        .collect();
    fs::write(&batch, json!({ "events": events }).to_string()).expect("batch should write");

    ecoscore(dir.path())
        .arg("ingest")
        .arg(&dataset)
        .arg(&batch)
        .args(["--user", "erin"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("ingested 18 events"));

    ecoscore(dir.path())
        .arg("analyze")
        .arg(&dataset)
        .args(["--user", "erin"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Analyzed 18 events"))
        .stdout(predicate::str::contains("- Impulsive"));
}

#[test]
fn ingest_rejects_empty_batch() {
    let (dir, dataset) = workspace();
    let batch = dir.path().join("batch.json");
    fs::write(&batch, "[]").expect("batch should write");
    ecoscore(dir.path())
        .arg("ingest")
        .arg(&dataset)
        .arg(&batch)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least one event"));
}

#[test]
fn analyze_write_skips_users_without_telemetry() {
    let (dir, dataset) = workspace();
    ecoscore(dir.path())
        .arg("analyze")
        .arg(&dataset)
        .args(["--user", "alice", "--write"])
        .assert()
        .code(0);

    ecoscore(dir.path())
        .arg("analyze")
        .arg(&dataset)
        .args(["--user", "typo-user", "--write", "--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"population_size\": 1"));

    let saved: Value = serde_json::from_str(&fs::read_to_string(&dataset).expect("dataset should read"))
        .expect("dataset should stay valid json");
    let profiles = saved["profiles"].as_object().expect("profiles should be an object");
    assert_eq!(profiles.len(), 1);
    assert!(profiles.contains_key("alice"));
}
