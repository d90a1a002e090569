use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Temporary database location for one test
struct CliTestEnvironment {
    _temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestEnvironment {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let db_path = temp_dir.path().join("cli_test.db");
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Command with plain output acting as `alice` on this environment's database
    fn cmd(&self) -> Command {
        self.cmd_as("alice")
    }

    fn cmd_as(&self, user: &str) -> Command {
        let mut cmd = Command::cargo_bin("waypoint").expect("Failed to find waypoint binary");
        cmd.env_remove("WAYPOINT_USER")
            .arg("--no-color")
            .arg("--user")
            .arg(user)
            .arg("--database-file")
            .arg(&self.db_path);
        cmd
    }

    /// Creates the standard three-day Kyoto trip (days 1-3)
    fn create_kyoto_trip(&self) {
        self.cmd()
            .args([
                "trip",
                "create",
                "Spring in Kyoto",
                "--destination",
                "Kyoto, Japan",
                "--start",
                "2024-06-01",
                "--end",
                "2024-06-03",
            ])
            .assert()
            .success();
    }

    fn add_activity(&self, day_id: &str, title: &str) {
        self.cmd()
            .args(["activity", "add", day_id, title])
            .assert()
            .success();
    }
}

#[test]
fn test_cli_create_trip_generates_days() {
    let env = CliTestEnvironment::new();

    env.cmd()
        .args([
            "trip",
            "create",
            "Spring in Kyoto",
            "--destination",
            "Kyoto, Japan",
            "--start",
            "2024-06-01",
            "--end",
            "2024-06-03",
            "--budget",
            "1500",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created trip with ID: 1 (3 days)"))
        .stdout(predicate::str::contains("# 1. Spring in Kyoto"))
        .stdout(predicate::str::contains("### Day 1 · Sat 2024-06-01"))
        .stdout(predicate::str::contains("### Day 3 · Mon 2024-06-03"));
}

#[test]
fn test_cli_create_single_day_trip() {
    let env = CliTestEnvironment::new();

    env.cmd()
        .args([
            "trip",
            "create",
            "Day trip",
            "--destination",
            "Nara, Japan",
            "--start",
            "2024-06-05",
            "--end",
            "2024-06-05",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 days)"));
}

#[test]
fn test_cli_create_trip_rejects_reversed_dates() {
    let env = CliTestEnvironment::new();

    env.cmd()
        .args([
            "trip",
            "create",
            "Backwards",
            "--destination",
            "Kyoto, Japan",
            "--start",
            "2024-06-03",
            "--end",
            "2024-06-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create trip"))
        .stderr(predicate::str::contains("end_date"));

    env.cmd()
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_max_trip_days_limit() {
    let env = CliTestEnvironment::new();

    env.cmd()
        .args([
            "--max-trip-days",
            "2",
            "trip",
            "create",
            "Too long",
            "--destination",
            "Kyoto, Japan",
            "--start",
            "2024-06-01",
            "--end",
            "2024-06-03",
        ])
        .assert()
        .failure();
}

#[test]
fn test_cli_require_cover_image() {
    let env = CliTestEnvironment::new();

    env.cmd()
        .args([
            "--require-cover-image",
            "trip",
            "create",
            "No cover",
            "--destination",
            "Kyoto, Japan",
            "--start",
            "2024-06-01",
            "--end",
            "2024-06-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cover_image"));

    env.cmd()
        .args([
            "--require-cover-image",
            "trip",
            "create",
            "With cover",
            "--destination",
            "Kyoto, Japan",
            "--start",
            "2024-06-01",
            "--end",
            "2024-06-01",
            "--cover-image",
            "https://example.com/kyoto.jpg",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_list_is_scoped_to_user() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();

    env.cmd()
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Trips for alice"))
        .stdout(predicate::str::contains("Spring in Kyoto"));

    env.cmd_as("bob")
        .args(["trip", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_default_command_lists_trips() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();

    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Spring in Kyoto"));
}

#[test]
fn test_cli_user_from_environment() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();

    Command::cargo_bin("waypoint")
        .expect("Failed to find waypoint binary")
        .env("WAYPOINT_USER", "alice")
        .arg("--no-color")
        .arg("--database-file")
        .arg(&env.db_path)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Trips for alice"));
}

#[test]
fn test_cli_show_missing_trip_fails() {
    let env = CliTestEnvironment::new();

    env.cmd()
        .args(["trip", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Trip with ID 42 not found"));
}

#[test]
fn test_cli_update_dates_reports_changes() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();
    env.add_activity("3", "Philosopher's Path");

    env.cmd()
        .args(["trip", "update", "1", "--end", "2024-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes made:"))
        .stdout(predicate::str::contains("Removed 1 days with 1 activities"))
        .stdout(predicate::str::contains("Philosopher's Path").not());

    env.cmd()
        .args(["trip", "update", "1", "--end", "2024-06-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2 days"))
        .stdout(predicate::str::contains("### Day 4 · Tue 2024-06-04"));
}

#[test]
fn test_cli_update_can_clear_budget() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();

    env.cmd()
        .args(["trip", "update", "1", "--budget", "900"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget set to 900.00"));

    env.cmd()
        .args(["trip", "update", "1", "--clear-budget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget removed"));

    env.cmd()
        .args(["trip", "update", "1", "--budget", "5", "--clear-budget"])
        .assert()
        .failure();
}

#[test]
fn test_cli_update_trip_without_changes_fails() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();

    env.cmd()
        .args(["trip", "update", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("update"));
}

#[test]
fn test_cli_delete_trip_requires_confirmation() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();

    env.cmd()
        .args(["trip", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    env.cmd()
        .args(["trip", "show", "1"])
        .assert()
        .success();

    env.cmd()
        .args(["trip", "delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted trip 'Spring in Kyoto' (ID: 1) with 3 days and 0 activities",
        ));

    env.cmd().args(["trip", "show", "1"]).assert().failure();
}

#[test]
fn test_cli_day_show_and_update() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();

    env.cmd()
        .args(["day", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Day 2 · Sun 2024-06-02 (day ID: 2)"))
        .stdout(predicate::str::contains("No activities planned."));

    env.cmd()
        .args(["day", "update", "2", "--title", "Arashiyama", "--notes", "Early start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated day with ID: 2"))
        .stdout(predicate::str::contains("Renamed to 'Arashiyama'"))
        .stdout(predicate::str::contains("Early start"));
}

#[test]
fn test_cli_activity_lifecycle() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();

    env.cmd()
        .args([
            "activity",
            "add",
            "1",
            "Fushimi Inari",
            "--start",
            "08:00",
            "--end",
            "10:30",
            "--cost",
            "0",
            "--category",
            "activity",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added activity with ID: 1 to day 1"))
        .stdout(predicate::str::contains("**Fushimi Inari**"));

    env.add_activity("1", "Nishiki Market");
    env.add_activity("1", "Gion stroll");

    env.cmd()
        .args(["activity", "reorder", "1", "3,1,2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **Gion stroll**"))
        .stdout(predicate::str::contains("2. 08:00–10:30 **Fushimi Inari**"))
        .stdout(predicate::str::contains("3. **Nishiki Market**"));

    env.cmd()
        .args(["activity", "move", "3", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3. **Gion stroll**"));

    env.cmd()
        .args(["activity", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted activity 'Fushimi Inari' (ID: 1)"));

    env.cmd()
        .args(["day", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **Nishiki Market**"))
        .stdout(predicate::str::contains("2. **Gion stroll**"));
}

#[test]
fn test_cli_reorder_rejects_partial_list() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();
    env.add_activity("1", "Nishiki Market");
    env.add_activity("1", "Gion stroll");

    env.cmd()
        .args(["activity", "reorder", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("activity_ids"));

    env.cmd()
        .args(["activity", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **Nishiki Market**"));
}

#[test]
fn test_cli_add_activity_rejects_unknown_category() {
    let env = CliTestEnvironment::new();
    env.create_kyoto_trip();

    env.cmd()
        .args(["activity", "add", "1", "Karaoke", "--category", "nightlife"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("category"));
}

#[test]
fn test_cli_add_activity_to_missing_day() {
    let env = CliTestEnvironment::new();

    env.cmd()
        .args(["activity", "add", "9", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Itinerary day with ID 9 not found"));
}
