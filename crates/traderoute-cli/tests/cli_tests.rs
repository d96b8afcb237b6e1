//! Integration tests for the `traderoute-cli` binary.
//!
//! Each test writes a small SQLite dataset into a temporary directory and
//! drives the binary through `assert_cmd`.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use tempfile::{tempdir, TempDir};

const FIXTURE_SQL: &str = r#"
    CREATE TABLE terrain (terrain TEXT PRIMARY KEY, travel_speed REAL NOT NULL);
    CREATE TABLE regions (region_num INTEGER PRIMARY KEY, name TEXT);
    CREATE TABLE trade_routes (
        origin INTEGER NOT NULL,
        destination INTEGER NOT NULL,
        distance REAL NOT NULL,
        route_type TEXT NOT NULL,
        terrain_type TEXT NOT NULL
    );
    INSERT INTO terrain VALUES ('plains', 1.0), ('mountains', 0.5);
    INSERT INTO regions VALUES
        (1, 'Aldmoor'), (2, 'Brightwater'), (3, 'Caldera'), (4, 'Dunhollow');
    INSERT INTO trade_routes VALUES
        (1, 2, 100.0, 'land', 'plains'),
        (2, 3, 200.0, 'sea', 'plains'),
        (1, 3, 200.0, 'land', 'mountains');
"#;

/// Temporary directory holding `trade_routes.db`.
struct TestEnv {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let temp_dir = tempdir().expect("create temp dir");
        let db_path = temp_dir.path().join("trade_routes.db");
        let conn = Connection::open(&db_path).expect("open fixture db");
        conn.execute_batch(FIXTURE_SQL).expect("apply fixture sql");
        Self { temp_dir, db_path }
    }

    fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Command pointed at the fixture with logging quietened.
    fn command(&self) -> Command {
        let mut cmd = cli();
        cmd.arg("--data").arg(&self.db_path);
        cmd
    }
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("traderoute-cli");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("TRADEROUTE_DATA");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run binary");
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// =============================================================================
// route
// =============================================================================

#[test]
fn route_prints_path_and_total_travel_time() {
    let env = TestEnv::new();
    env.command()
        .args(["route", "--from", "1", "--to", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: Aldmoor (1) -> Caldera (3) (2 hops, algorithm: dijkstra)",
        ))
        .stdout(predicate::str::contains("1: Brightwater (2) [+5.00, 5.00]"))
        .stdout(predicate::str::contains("Total travel time: 7.00"));
}

#[test]
fn route_json_output_lists_steps() {
    let env = TestEnv::new();
    let value = stdout_json(
        env.command()
            .args(["--format", "json", "route", "--from", "1", "--to", "3"]),
    );

    assert_eq!(value["reachable"], true);
    assert_eq!(value["total_cost"], 7.0);
    let ids: Vec<_> = value["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .map(|step| step["id"].as_i64().expect("numeric id"))
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn unreachable_goal_exits_with_status_two() {
    let env = TestEnv::new();
    env.command()
        .args(["route", "--from", "1", "--to", "4"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "No route: Dunhollow (4) is unreachable from Aldmoor (1)",
        ));
}

#[test]
fn unreachable_goal_in_json_reports_not_reachable() {
    let env = TestEnv::new();
    let output = env
        .command()
        .args(["--format", "json", "route", "--from", "4", "--to", "1"])
        .output()
        .expect("run binary");
    assert_eq!(output.status.code(), Some(2));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON");
    assert_eq!(value["reachable"], false);
    assert!(value["total_cost"].is_null());
}

#[test]
fn unknown_region_is_an_error() {
    let env = TestEnv::new();
    env.command()
        .args(["route", "--from", "1", "--to", "99"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "target region 99 is not part of the trade network",
        ));
}

#[test]
fn rescan_algorithm_finds_the_same_route() {
    let env = TestEnv::new();
    env.command()
        .args(["route", "--from", "1", "--to", "3", "--algorithm", "rescan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("algorithm: rescan"))
        .stdout(predicate::str::contains("Total travel time: 7.00"));
}

#[test]
fn unknown_algorithm_is_rejected_by_the_parser() {
    let env = TestEnv::new();
    env.command()
        .args(["route", "--from", "1", "--to", "3", "--algorithm", "astar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown algorithm 'astar'"));
}

#[test]
fn caravan_speed_flag_changes_land_weights() {
    let env = TestEnv::new();
    // 100 / 10 + 200 / 100 = 12 beats the mountain pass at 200 / (10 * 0.5) = 40.
    env.command()
        .args(["route", "--from", "1", "--to", "3", "--caravan-speed", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total travel time: 12.00"));
}

#[test]
fn config_file_sets_base_speeds() {
    let env = TestEnv::new();
    let config_path = env.dir().join("travel.json");
    fs::write(&config_path, r#"{ "caravan_speed": 50.0 }"#).expect("write config");

    // The mountain pass is now 200 / 25 = 8; via Brightwater 2 + 2 = 4.
    env.command()
        .arg("--config")
        .arg(&config_path)
        .args(["route", "--from", "1", "--to", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total travel time: 4.00"));
}

#[test]
fn non_positive_speed_is_rejected() {
    let env = TestEnv::new();
    env.command()
        .args(["route", "--from", "1", "--to", "3", "--sailing-speed", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid travel configuration"));
}

#[test]
fn enhanced_format_tags_route_steps() {
    let env = TestEnv::new();
    env.command()
        .args(["--format", "enhanced", "route", "--from", "1", "--to", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("START Aldmoor #1"))
        .stdout(predicate::str::contains("GOAL  Caldera #3 +2.00 (at 7.00)"));
}

// =============================================================================
// dataset resolution
// =============================================================================

#[test]
fn missing_dataset_is_reported() {
    let dir = tempdir().expect("temp dir");
    cli()
        .arg("--data")
        .arg(dir.path().join("absent.db"))
        .args(["route", "--from", "1", "--to", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to locate the trade route dataset"))
        .stderr(predicate::str::contains("dataset not found"));
}

#[test]
fn data_directory_resolves_default_filename() {
    let env = TestEnv::new();
    cli()
        .arg("--data")
        .arg(env.dir())
        .args(["route", "--from", "2", "--to", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total travel time: 5.00"));
}

#[test]
fn environment_variable_locates_dataset() {
    let env = TestEnv::new();
    cli()
        .env("TRADEROUTE_DATA", env.dir())
        .args(["route", "--from", "1", "--to", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total travel time: 5.00"));
}

#[test]
fn json_dataset_is_accepted() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("network.json");
    fs::write(
        &path,
        r#"{
            "terrain": [{ "terrain": "plains", "travel_speed": 1.0 }],
            "regions": [{ "region_num": 10, "name": "Eastwatch" }, { "region_num": 20 }],
            "trade_routes": [{
                "origin": 10, "destination": 20, "distance": 300.0,
                "route_type": "sea", "terrain_type": "plains"
            }]
        }"#,
    )
    .expect("write dataset");

    cli()
        .arg("--data")
        .arg(&path)
        .args(["route", "--from", "20", "--to", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route: 20 -> Eastwatch (10)"))
        .stdout(predicate::str::contains("Total travel time: 3.00"));
}

// =============================================================================
// regions and terrain
// =============================================================================

#[test]
fn regions_lists_names_and_route_counts() {
    let env = TestEnv::new();
    env.command()
        .arg("regions")
        .assert()
        .success()
        .stdout(predicate::str::contains("     2  Brightwater (2 routes)"))
        .stdout(predicate::str::contains("     4  Dunhollow (0 routes)"));
}

#[test]
fn terrain_lists_speed_table_sorted() {
    let env = TestEnv::new();
    env.command()
        .arg("terrain")
        .assert()
        .success()
        .stdout("mountains        0.50\nplains           1.00\n");
}

#[test]
fn terrain_json_output() {
    let env = TestEnv::new();
    let value = stdout_json(env.command().args(["--format", "json", "terrain"]));
    assert_eq!(value[0]["terrain"], "mountains");
    assert_eq!(value[1]["travel_speed"], 1.0);
}
