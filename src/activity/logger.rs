use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::schema::LoggingConfig;
use crate::handlers::ActionReport;

// ---------------------------------------------------------------------------
// Activity log entry (JSONL)
// ---------------------------------------------------------------------------

/// A single line of `~/.inferencia/activity-log.jsonl`.
///
/// Records what was asked and how it ended, never the text sent or the
/// result received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    /// Action name, e.g. `"sentimento"`.
    pub action: String,
    /// Endpoint path, e.g. `"/sentimento"`.
    pub endpoint: String,
    /// `"success"`, `"failure"`, `"transport_error"` or `"validation_error"`.
    pub outcome: String,
    #[serde(default)]
    pub latency_ms: u64,
    /// Tokens reported by the API, when it reported any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tokens: Option<u64>,
}

impl ActivityEntry {
    pub fn from_report(report: &ActionReport) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action: report.action.as_str().to_string(),
            endpoint: report.action.endpoint().to_string(),
            outcome: report.outcome.as_str().to_string(),
            latency_ms: report.latency_ms,
            tokens: report.tokens,
        }
    }
}

// ---------------------------------------------------------------------------
// Log handle
// ---------------------------------------------------------------------------

/// Append-only JSONL activity log.
///
/// Write failures are swallowed: logging must never turn a successful action
/// into a failed one.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: Option<PathBuf>,
}

impl ActivityLog {
    /// Log at the default location, or a disabled log if `config.enabled`
    /// is off or the home directory is unknown.
    pub fn from_config(config: &LoggingConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        Self {
            path: default_log_path(),
        }
    }

    /// Log at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn record(&self, report: &ActionReport) {
        let _ = self.append(&ActivityEntry::from_report(report));
    }

    fn append(&self, entry: &ActivityEntry) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{json}")?;

        Ok(())
    }

    /// Read every entry. Malformed lines are skipped; a missing file is an
    /// empty log.
    pub fn read_all(&self) -> Vec<ActivityEntry> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let Ok(file) = fs::File::open(path) else {
            return Vec::new();
        };

        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str::<ActivityEntry>(&line).ok())
            .collect()
    }

    /// Entries from the last `days` days, or all of them when `None`.
    pub fn read_since_days(&self, days: Option<u32>) -> Vec<ActivityEntry> {
        let entries = self.read_all();

        let Some(days) = days else {
            return entries;
        };

        let cutoff = (Utc::now() - chrono::Duration::days(i64::from(days))).to_rfc3339();

        entries
            .into_iter()
            .filter(|e| e.timestamp >= cutoff)
            .collect()
    }
}

/// `~/.inferencia/activity-log.jsonl`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".inferencia").join("activity-log.jsonl"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{Action, ActionOutcome};

    fn report(action: Action, outcome: ActionOutcome) -> ActionReport {
        ActionReport {
            action,
            outcome,
            latency_ms: 12,
            tokens: Some(4),
        }
    }

    #[test]
    fn record_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let log = ActivityLog::at(dir.path().join("nested").join("log.jsonl"));

        log.record(&report(Action::AnalyzeSentiment, ActionOutcome::Success));
        log.record(&report(Action::GenerateText, ActionOutcome::Failure));

        let entries = log.read_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "sentimento");
        assert_eq!(entries[0].endpoint, "/sentimento");
        assert_eq!(entries[0].outcome, "success");
        assert_eq!(entries[1].outcome, "failure");
        assert_eq!(entries[1].tokens, Some(4));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        fs::write(&path, "not json\n").unwrap();
        let log = ActivityLog::at(&path);
        log.record(&report(Action::CheckStatus, ActionOutcome::Success));
        assert_eq!(log.read_all().len(), 1);
    }

    #[test]
    fn disabled_log_is_silent() {
        let log = ActivityLog::disabled();
        log.record(&report(Action::CheckStatus, ActionOutcome::Success));
        assert!(log.read_all().is_empty());
        assert!(log.path().is_none());
    }

    #[test]
    fn window_filters_old_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        let old = ActivityEntry {
            timestamp: "2000-01-01T00:00:00+00:00".to_string(),
            action: "status".to_string(),
            endpoint: "/status".to_string(),
            outcome: "success".to_string(),
            latency_ms: 1,
            tokens: None,
        };
        fs::write(&path, format!("{}\n", serde_json::to_string(&old).unwrap())).unwrap();
        let log = ActivityLog::at(&path);
        log.record(&report(Action::CheckStatus, ActionOutcome::Success));

        assert_eq!(log.read_since_days(None).len(), 2);
        assert_eq!(log.read_since_days(Some(7)).len(), 1);
    }
}
