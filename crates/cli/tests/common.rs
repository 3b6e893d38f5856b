use std::{
    env,
    path::PathBuf,
    process::{self, Child, Stdio},
};

use assert_cmd::Command;

pub fn _temp_db_path() -> PathBuf {
    env::temp_dir()
        .join(format!("ballotbox-cli-{}", uuid::Uuid::new_v4()))
        .join("ballots.json")
}

pub fn _ballotbox(db_path: &PathBuf) -> Command {
    let data_dir = db_path.parent().unwrap();

    let mut cmd = Command::cargo_bin("ballotbox").unwrap();
    cmd.env("BALLOTBOX_DATA_DIR", data_dir)
        .env_remove("BALLOTBOX_IDENTITY")
        .env_remove("BALLOTBOX_DB_PATH")
        .arg("--db-path")
        .arg(db_path);
    cmd
}

/// Runs `create` and returns the ballot id and capability token it printed.
pub fn _create(db_path: &PathBuf, duration_ms: u64, options: &[&str]) -> (String, String) {
    let mut cmd = _ballotbox(db_path);
    cmd.args(["create", "--title", "Lunch", "--as", "creator"])
        .args(["--duration-ms", &duration_ms.to_string()]);
    for option in options {
        cmd.args(["--option", *option]);
    }

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    let field = |name: &str| {
        stdout
            .lines()
            .find_map(|line| line.strip_prefix(name))
            .unwrap()
            .trim()
            .to_string()
    };

    (field("ballot:"), field("capability:"))
}

pub fn _stdout(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

/// Starts `ballotbox vote` as a child process without waiting for it.
pub fn _spawn_vote(db_path: &PathBuf, ballot: &str, option: &str, voter: &str) -> Child {
    process::Command::new(assert_cmd::cargo::cargo_bin("ballotbox"))
        .env("BALLOTBOX_DATA_DIR", db_path.parent().unwrap())
        .env_remove("BALLOTBOX_IDENTITY")
        .env_remove("BALLOTBOX_DB_PATH")
        .arg("--db-path")
        .arg(db_path)
        .args(["vote", "--ballot", ballot, "--option", option, "--as", voter])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap()
}
