use libmoltbook::credentials::{CredentialStore, Credentials};
use libmoltbook::error::MoltbookError;
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::new(dir.path().join("credentials.json"));

    let mut creds = Credentials::new("moltbook_sk_abc123");
    creds.handle = Some("crabby".to_string());
    creds.profile_url = Some("https://www.moltbook.com/u/crabby".to_string());
    store.save(&creds).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.api_key, "moltbook_sk_abc123");
    assert_eq!(loaded.handle.as_deref(), Some("crabby"));
    assert_eq!(
        loaded.profile_url.as_deref(),
        Some("https://www.moltbook.com/u/crabby")
    );
}

#[test]
fn missing_file_is_not_registered() {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::new(dir.path().join("credentials.json"));
    match store.load() {
        Err(MoltbookError::NotRegistered { path }) => {
            assert!(path.ends_with("credentials.json"));
        }
        other => panic!("expected NotRegistered, got {other:?}"),
    }
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::new(dir.path().join("deep").join("credentials.json"));
    store.save(&Credentials::new("k")).unwrap();
    assert_eq!(store.load().unwrap().api_key, "k");
}

#[test]
fn legacy_snake_case_file_is_readable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(
        &path,
        r#"{"api_key": "legacy-key", "profile_url": "https://www.moltbook.com/u/old"}"#,
    )
    .unwrap();

    let loaded = CredentialStore::new(&path).load().unwrap();
    assert_eq!(loaded.api_key, "legacy-key");
    assert_eq!(
        loaded.profile_url.as_deref(),
        Some("https://www.moltbook.com/u/old")
    );
}

#[test]
fn corrupt_file_is_a_credential_error_not_io() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, "{not json").unwrap();
    match CredentialStore::new(&path).load() {
        Err(MoltbookError::Credentials(message)) => {
            assert!(message.contains("credentials.json"));
        }
        other => panic!("expected Credentials error, got {other:?}"),
    }
}

#[test]
fn save_replaces_previous_contents_without_leftover_temp_file() {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::new(dir.path().join("credentials.json"));
    store.save(&Credentials::new("first")).unwrap();
    store.save(&Credentials::new("second")).unwrap();
    assert_eq!(store.load().unwrap().api_key, "second");

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec!["credentials.json"]);
}

#[test]
#[serial]
fn default_path_lives_under_the_config_directory() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let store = CredentialStore::at_default_path().unwrap();
    assert!(store.path().ends_with("moltbook/credentials.json"));

    std::env::remove_var("XDG_CONFIG_HOME");
}
