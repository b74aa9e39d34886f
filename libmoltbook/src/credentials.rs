//! Credential file handling
//!
//! Registration issues the API key exactly once; this module is the durable
//! home for it, a JSON file at `~/.config/moltbook/credentials.json`. Older
//! writers used snake_case keys and newer ones camelCase, so the reader
//! merges both stylings, with the canonical camelCase spelling winning when
//! a file somehow contains both.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MoltbookError, Result};

/// Keys that may appear in either styling. Left: canonical camelCase,
/// right: legacy snake_case.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("apiKey", "api_key"),
    ("profileUrl", "profile_url"),
    ("verificationCode", "verification_code"),
    ("claimUrl", "claim_url"),
];

/// Stored identity of a registered agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            handle: None,
            profile_url: None,
            claim_url: None,
            verification_code: None,
            verified: None,
        }
    }
}

/// Reads and writes the credential file.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store over an explicit file path (tests, unusual layouts).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the fixed default location,
    /// `~/.config/moltbook/credentials.json`.
    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(default_credentials_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads credentials. A missing file is the "never registered" state
    /// and gets its own error kind so callers can prompt for registration
    /// instead of surfacing a raw IO failure.
    pub fn load(&self) -> Result<Credentials> {
        if !self.path.exists() {
            return Err(MoltbookError::NotRegistered {
                path: self.path.clone(),
            });
        }
        let content = fs::read_to_string(&self.path)?;
        let raw: Value = serde_json::from_str(&content).map_err(|e| {
            MoltbookError::Credentials(format!(
                "malformed credential file {}: {e}",
                self.path.display()
            ))
        })?;
        let merged = merge_key_stylings(raw)?;
        serde_json::from_value(merged).map_err(|e| {
            MoltbookError::Credentials(format!(
                "credential file {} is missing required fields: {e}",
                self.path.display()
            ))
        })
    }

    /// Persists credentials: parent directory is created if absent, and the
    /// content goes through a temp file + rename so an interrupted write
    /// never clobbers a previous key.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(credentials).map_err(|e| {
            MoltbookError::Credentials(format!("failed to serialize credentials: {e}"))
        })?;
        write_atomically(&self.path, &json)?;
        debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }
}

/// Default location of the credential file.
pub fn default_credentials_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| MoltbookError::Config("cannot resolve config directory".to_string()))?;
    Ok(config_dir.join("moltbook").join("credentials.json"))
}

/// Temp-file-then-rename write in the target's directory.
pub(crate) fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Folds legacy snake_case keys into their canonical camelCase spelling.
/// When both spellings are present the canonical one wins.
fn merge_key_stylings(raw: Value) -> Result<Value> {
    let Value::Object(mut map) = raw else {
        return Err(MoltbookError::Credentials(
            "credential file is not a JSON object".to_string(),
        ));
    };
    for (canonical, legacy) in KEY_ALIASES {
        if let Some(value) = map.remove(*legacy) {
            map.entry(canonical.to_string()).or_insert(value);
        }
    }
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(raw: Value) -> Credentials {
        serde_json::from_value(merge_key_stylings(raw).unwrap()).unwrap()
    }

    #[test]
    fn snake_case_api_key_is_normalized() {
        let creds = normalize(json!({"api_key": "x"}));
        assert_eq!(creds.api_key, "x");
    }

    #[test]
    fn canonical_key_wins_over_legacy_duplicate() {
        let creds = normalize(json!({
            "apiKey": "canonical",
            "api_key": "legacy",
            "profile_url": "https://www.moltbook.com/u/crabby"
        }));
        assert_eq!(creds.api_key, "canonical");
        assert_eq!(
            creds.profile_url.as_deref(),
            Some("https://www.moltbook.com/u/crabby")
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut creds = Credentials::new("k");
        creds.profile_url = Some("https://example.com".to_string());
        let value = serde_json::to_value(&creds).unwrap();
        assert_eq!(value["apiKey"], "k");
        assert_eq!(value["profileUrl"], "https://example.com");
        assert!(value.get("api_key").is_none());
        // Absent optionals are omitted, not written as null.
        assert!(value.get("handle").is_none());
    }

    #[test]
    fn non_object_file_is_a_credential_error() {
        let err = merge_key_stylings(json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, MoltbookError::Credentials(_)));
    }
}
