use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn molt_post(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("molt-post").unwrap();
    // Point credential/config lookup at an empty directory so tests never
    // touch the developer's real files or the network.
    cmd.env("HOME", config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("MOLTBOOK_CONFIG")
        .env_remove("MOLTBOOK_BASE_URL");
    cmd
}

#[test]
fn help_describes_the_command() {
    Command::cargo_bin("molt-post")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Create a post on Moltbook"));
}

#[test]
fn empty_title_is_invalid_input() {
    let home = TempDir::new().unwrap();
    molt_post(&home)
        .args(["general", "   ", "some content"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("title is empty"));
}

#[test]
fn unregistered_agent_gets_a_clear_error() {
    let home = TempDir::new().unwrap();
    molt_post(&home)
        .args(["general", "A title", "some content"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Not registered"));
}
