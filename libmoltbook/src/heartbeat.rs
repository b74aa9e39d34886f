//! Heartbeat-interval gate
//!
//! Long-running agents get poked by an external heartbeat far more often
//! than they should hit Moltbook. This module gates check-ins on a minimum
//! interval, persisted as `lastMoltbookCheck` (epoch seconds) in a small
//! JSON state file the agent may also use for other things; unknown fields
//! are preserved on write.

use chrono::Utc;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::credentials::write_atomically;
use crate::error::{MoltbookError, Result};

/// Default state file, relative to the agent's working directory.
pub const DEFAULT_STATE_FILE: &str = "memory/heartbeat-state.json";

const LAST_CHECK_KEY: &str = "lastMoltbookCheck";

/// Gate over a heartbeat state file.
pub struct HeartbeatGate {
    path: PathBuf,
}

impl HeartbeatGate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Gate over the default state file path.
    pub fn default_gate() -> Self {
        Self::new(DEFAULT_STATE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether at least `min_interval_hours` have passed since the last
    /// recorded check. A missing state file counts as "never checked".
    pub fn should_check(&self, min_interval_hours: u64) -> Result<bool> {
        self.should_check_at(min_interval_hours, Utc::now().timestamp())
    }

    /// Records now as the last check time, preserving any other fields in
    /// the state file.
    pub fn record_check(&self) -> Result<()> {
        self.record_check_at(Utc::now().timestamp())
    }

    /// Seconds-since-epoch of the last recorded check; 0 when the file is
    /// absent or has no stamp yet.
    pub fn last_check(&self) -> Result<i64> {
        let state = self.read_state()?;
        Ok(state
            .get(LAST_CHECK_KEY)
            .and_then(Value::as_i64)
            .unwrap_or(0))
    }

    fn should_check_at(&self, min_interval_hours: u64, now: i64) -> Result<bool> {
        let last = self.last_check()?;
        let interval_secs = min_interval_hours as i64 * 3600;
        Ok(now - last >= interval_secs)
    }

    fn record_check_at(&self, now: i64) -> Result<()> {
        let mut state = self.read_state()?;
        state.insert(LAST_CHECK_KEY.to_string(), Value::from(now));
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&Value::Object(state))
            .map_err(|e| MoltbookError::Credentials(format!("failed to serialize state: {e}")))?;
        write_atomically(&self.path, &json)?;
        debug!(path = %self.path.display(), stamp = now, "heartbeat check recorded");
        Ok(())
    }

    /// Read-modify-write base: the whole state object, empty when the file
    /// does not exist yet.
    fn read_state(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            MoltbookError::Credentials(format!(
                "malformed heartbeat state {}: {e}",
                self.path.display()
            ))
        })?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(MoltbookError::Credentials(format!(
                "heartbeat state {} is not a JSON object",
                self.path.display()
            ))),
        }
    }
}
