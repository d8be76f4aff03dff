use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/navdata")
        .canonicalize()
        .expect("fixture navdata present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("navroute-cli");
    cmd.env("RUST_LOG", "error").env_remove("NAVROUTE_DATA_DIR");
    cmd
}

fn prepare_command() -> Command {
    let mut cmd = cli();
    cmd.arg("--data-dir").arg(fixture_dir());
    cmd
}

#[test]
fn text_format_prints_long_and_short_routes() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "MANIK", "--to", "CASPE"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route: MANIK -> CASPE (3 hops, 445.5 NM"))
        .stdout(predicate::str::contains(
            "long:  MANIK UN872 INBOM UM744 UREDI UM744 CASPE",
        ))
        .stdout(predicate::str::contains("short: MANIK UN872 INBOM UM744 CASPE"));
}

#[test]
fn short_format_prints_collapsed_route() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "short", "route", "--from", "MANIK", "--to", "ODEMI"])
        .args(["--to-near", "37.5,-8.4"]);

    cmd.assert()
        .success()
        .stdout("MANIK UZ218 TROIA UN872 ODEMI\n");
}

#[test]
fn long_format_prints_every_hop() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "MANIK", "--to", "ODEMI", "--to-near", "37.5,-8.4"])
        .args(["--format", "long"]);

    cmd.assert()
        .success()
        .stdout("MANIK UZ218 FTM UZ218 TROIA UN872 ODEMI\n");
}

#[test]
fn json_format_outputs_summary() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "json", "route", "--from", "MANIK", "--to", "CASPE"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(value["start"], "MANIK");
    assert_eq!(value["goal"], "CASPE");
    assert_eq!(value["hops"], 3);
    assert_eq!(value["legs"][0]["designator"], "UN872");
}

#[test]
fn dijkstra_algorithm_is_supported() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "MANIK", "--to", "CASPE", "--algorithm", "dijkstra"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: dijkstra"));
}

#[test]
fn direct_legs_render_with_dct() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "long", "route", "--from", "TOSDI", "--to", "MANIK"]);

    cmd.assert().success().stdout("TOSDI DCT MANIK\n");
}

#[test]
fn unknown_waypoint_error_is_friendly() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "MANIC", "--to", "CASPE"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown waypoint 'MANIC'"))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn ambiguous_goal_asks_for_location() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "MANIK", "--to", "ODEMI"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Waypoint 'ODEMI' matches 2 locations"))
        .stderr(predicate::str::contains("--to-near"));
}

#[test]
fn unreachable_goal_reports_no_route() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "MANIK", "--to", "ODEMI", "--to-near", "52.0,5.0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No route found between MANIK and ODEMI"));
}

#[test]
fn expansion_limit_is_reported() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "MANIK", "--to", "CASPE", "--max-expansions", "1"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("exceeded 1 node expansions"));
}

#[test]
fn malformed_location_is_rejected_by_parser() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "MANIK", "--to", "ODEMI", "--to-near", "north"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--to-near"));
}

#[test]
fn data_dir_falls_back_to_environment() {
    let mut cmd = cli();
    cmd.env("NAVROUTE_DATA_DIR", fixture_dir())
        .args(["--format", "short", "route", "--from", "MANIK", "--to", "CASPE"]);

    cmd.assert()
        .success()
        .stdout("MANIK UN872 INBOM UM744 CASPE\n");
}

#[test]
fn missing_navdata_is_reported_with_context() {
    let temp_dir = tempdir().expect("create temp dir");
    let mut cmd = cli();
    cmd.arg("--data-dir")
        .arg(temp_dir.path())
        .args(["route", "--from", "A", "--to", "B"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load navdata"))
        .stderr(predicate::str::contains("Waypoints.txt"));
}

#[test]
fn lenient_flag_skips_broken_segments() {
    let temp_dir = tempdir().expect("create temp dir");
    fs::write(
        temp_dir.path().join("Waypoints.txt"),
        "ALPHA,10.0,10.0\nBRAVO,10.0,11.0\n",
    )
    .expect("write waypoints");
    fs::write(
        temp_dir.path().join("ats.txt"),
        concat!(
            "A,UA1,2\n",
            "S,ALPHA,10.0,10.0,BRAVO,10.0,11.0,0,0,60.0\n",
            "S,BRAVO,10.0,11.0,GHOST,12.0,12.0,0,0,90.0\n",
        ),
    )
    .expect("write airways");

    let mut strict = cli();
    strict
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["route", "--from", "ALPHA", "--to", "BRAVO"]);
    strict
        .assert()
        .failure()
        .stderr(predicate::str::contains("GHOST"));

    let mut lenient = cli();
    lenient
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--lenient", "--format", "long", "route", "--from", "ALPHA", "--to", "BRAVO"]);
    lenient.assert().success().stdout("ALPHA UA1 BRAVO\n");
}
