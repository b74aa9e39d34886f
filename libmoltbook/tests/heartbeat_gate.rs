use chrono::Utc;
use libmoltbook::heartbeat::HeartbeatGate;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn not_due_immediately_after_recording_a_check() {
    let dir = TempDir::new().unwrap();
    let gate = HeartbeatGate::new(dir.path().join("heartbeat-state.json"));

    gate.record_check().unwrap();
    assert!(!gate.should_check(2).unwrap());
}

#[test]
fn due_when_the_stored_stamp_is_three_hours_old() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("heartbeat-state.json");
    let stale = Utc::now().timestamp() - 3 * 3600;
    std::fs::write(
        &path,
        serde_json::to_string(&json!({ "lastMoltbookCheck": stale })).unwrap(),
    )
    .unwrap();

    let gate = HeartbeatGate::new(&path);
    assert!(gate.should_check(2).unwrap());
    assert_eq!(gate.last_check().unwrap(), stale);
}

#[test]
fn never_checked_is_always_due() {
    let dir = TempDir::new().unwrap();
    let gate = HeartbeatGate::new(dir.path().join("heartbeat-state.json"));
    assert!(gate.should_check(24).unwrap());
}
