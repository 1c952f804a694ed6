#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use eef_conformance::{spawn_node, spawn_node_with_version, spawn_stub, unreachable_url};
use eef_node_api::NewPoolRequest;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// `eef` with a clean environment: no inherited node URL, no colours.
fn eef_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin("eef"));
    cmd.env_remove("EEF_NODE_URL")
        .env_remove("EEF_NODE__URL")
        .env_remove("EEF_NODE__TIMEOUT_SECS")
        .env_remove("EEF_CONFIG")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0");
    cmd
}

fn eef_at(url: &str) -> Command {
    let mut cmd = eef_cmd();
    cmd.env("EEF_NODE_URL", url);
    cmd
}

fn indexable(tag: &str) -> NewPoolRequest {
    NewPoolRequest {
        tag: Some(tag.into()),
        indexable: true,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Local validation: no network, no config needed
// ---------------------------------------------------------------------------

#[test]
fn head_and_tail_together_are_rejected() {
    eef_cmd()
        .args(["pool", "list", "--head", "3", "--tail", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "head and tail options can't be both used at once.",
        ));
}

#[test]
fn indexable_pool_with_reader_key_is_rejected() {
    let node = spawn_node();
    eef_at(&node.url)
        .args(["pool", "new", "lobby", "-m", "mk", "-r", "rk", "--indexable", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "pool with reader key cannot be indexable.",
        ));
    assert_eq!(node.requests(), 0);
}

#[test]
fn reader_key_without_master_key_is_rejected() {
    let node = spawn_node();
    eef_at(&node.url)
        .args(["pool", "new", "lobby", "--reader-key", "rk", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "pool with reader key must have master key.",
        ));
    assert_eq!(node.requests(), 0);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn missing_config_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    eef_cmd()
        .env("EEF_CONFIG", &path)
        .args(["node"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("eef config does not exist"));
}

#[test]
fn config_without_url_is_invalid() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, "[node]\nname = x\n").unwrap();
    eef_cmd()
        .env("EEF_CONFIG", &path)
        .args(["node"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid eef config format"));
}

#[test]
fn node_url_is_read_from_config_file() {
    let node = spawn_node();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, format!("[node]\nurl = {}\n", node.url)).unwrap();
    eef_cmd()
        .env("EEF_CONFIG", &path)
        .args(["node"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "evade84-node 0.1.0 (compatible): conformance-node at {}.",
            node.url
        )));
}

#[test]
fn node_url_env_override_beats_config_file() {
    let node = spawn_node();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, format!("[node]\nurl = {}\n", unreachable_url())).unwrap();
    eef_cmd()
        .env("EEF_CONFIG", &path)
        .env("EEF_NODE__URL", &node.url)
        .args(["node"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("conformance-node at {}.", node.url)));
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

#[test]
fn incompatible_node_is_annotated_not_failed() {
    let node = spawn_node_with_version("7.7.7");
    eef_at(&node.url)
        .arg("node")
        .assert()
        .success()
        .stdout(predicate::str::contains("evade84-node 7.7.7 (incompatible)"));
}

#[test]
fn unreachable_node_fails_with_url() {
    let url = unreachable_url();
    eef_at(&url)
        .arg("node")
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "could not connect to the node ({url})."
        )));
}

#[test]
fn unexpected_status_fails() {
    let url = spawn_stub(503, "{}");
    eef_at(&url)
        .arg("node")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "invalid response code from the node: 503.",
        ));
}

// ---------------------------------------------------------------------------
// Pools
// ---------------------------------------------------------------------------

#[test]
fn pool_new_with_confirmation() {
    let node = spawn_node();
    eef_at(&node.url)
        .args(["pool", "new", "lobby", "-d", "Say hi."])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are going to create a new pool:"))
        .stdout(predicate::str::contains("Created a new pool: "));
    assert_eq!(node.requests(), 1);
}

#[test]
fn pool_new_declined() {
    let node = spawn_node();
    eef_at(&node.url)
        .args(["pool", "new", "lobby"])
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: aborted."));
    assert_eq!(node.requests(), 0);
}

#[test]
fn pool_list_shows_indexable_pools() {
    let node = spawn_node();
    let pool = node.seed_pool(NewPoolRequest {
        description: Some("Say hi.".into()),
        ..indexable("lobby")
    });
    eef_at(&node.url)
        .args(["pool", "list", "--head", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing first 1 indexable pools:"))
        .stdout(predicate::str::contains(format!("{}:", pool.address)))
        .stdout(predicate::str::contains("tag: lobby"));
}

#[test]
fn pool_list_on_empty_node() {
    let node = spawn_node();
    eef_at(&node.url)
        .args(["pool", "list"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "There are no indexable pools at this node.\n",
        ));
}

#[test]
fn pool_info_unknown_pool() {
    let node = spawn_node();
    eef_at(&node.url)
        .args(["pool", "info", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pool not found."));
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[test]
fn pool_read_on_empty_pool() {
    let node = spawn_node();
    let pool = node.seed_pool(indexable("quiet"));
    eef_at(&node.url)
        .args(["pool", "read", &pool.address])
        .assert()
        .success()
        .stdout(predicate::str::diff("Pool does not have any messages.\n"));
}

#[test]
fn pool_read_from_stub_with_empty_page() {
    let url = spawn_stub(200, r#"{"total":0,"messages":[]}"#);
    eef_at(&url)
        .args(["pool", "read", "anything", "--tail", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pool does not have any messages."));
}

#[test]
fn write_then_read() {
    let node = spawn_node();
    let pool = node.seed_pool(indexable("lobby"));

    eef_at(&node.url)
        .args(["pool", "write", &pool.address, "hello there", "--from", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Wrote a new message to the pool:\nbob: hello there",
        ));

    node.seed_message(&pool.address, "anonymous", None);

    eef_at(&node.url)
        .args(["pool", "read", &pool.address, "-t", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Reading pool {} last 2 messages:",
            pool.address
        )))
        .stdout(predicate::str::contains("bob: hello there\n<no signature>: anonymous"));
}

#[test]
fn protected_pool_denies_without_key() {
    let node = spawn_node();
    let pool = node.seed_pool(NewPoolRequest {
        master_key: Some("mk".into()),
        reader_key: Some("rk".into()),
        ..Default::default()
    });
    eef_at(&node.url)
        .args(["pool", "read", &pool.address])
        .assert()
        .failure()
        .stderr(predicate::str::contains("access denied: invalid key."));

    eef_at(&node.url)
        .args(["pool", "read", &pool.address, "--reader-key", "rk"])
        .assert()
        .success();
}
