//! Activity reporter: per-action aggregation for `inferencia historico`.

use std::collections::BTreeMap;

use super::logger::ActivityEntry;

/// Aggregate over a set of log entries.
#[derive(Debug, Default)]
pub struct ActivitySummary {
    pub total_actions: usize,
    pub total_tokens: u64,
    pub actions: Vec<ActionStat>,
}

/// Counts for one action name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionStat {
    pub action: String,
    pub count: usize,
    pub success: usize,
    pub failure: usize,
    pub transport_error: usize,
    pub validation_error: usize,
    /// Mean latency of calls that reached the network.
    pub avg_latency_ms: f64,
}

impl ActionStat {
    pub fn success_pct(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.success as f64 / self.count as f64) * 100.0
        }
    }
}

/// Build the summary. Actions are sorted by count, most used first.
pub fn summarize(entries: &[ActivityEntry]) -> ActivitySummary {
    let mut by_action: BTreeMap<&str, (ActionStat, u64, usize)> = BTreeMap::new();

    for entry in entries {
        let (stat, latency_sum, timed) = by_action.entry(entry.action.as_str()).or_default();
        stat.action = entry.action.clone();
        stat.count += 1;
        match entry.outcome.as_str() {
            "success" => stat.success += 1,
            "failure" => stat.failure += 1,
            "transport_error" => stat.transport_error += 1,
            "validation_error" => stat.validation_error += 1,
            _ => {}
        }
        // Validation errors never leave the client, so they carry no latency.
        if entry.outcome != "validation_error" {
            *latency_sum += entry.latency_ms;
            *timed += 1;
        }
    }

    let mut actions: Vec<ActionStat> = by_action
        .into_values()
        .map(|(mut stat, latency_sum, timed)| {
            if timed > 0 {
                stat.avg_latency_ms = latency_sum as f64 / timed as f64;
            }
            stat
        })
        .collect();
    actions.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.action.cmp(&b.action)));

    ActivitySummary {
        total_actions: entries.len(),
        total_tokens: entries.iter().filter_map(|e| e.tokens).sum(),
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(action: &str, outcome: &str, latency_ms: u64, tokens: Option<u64>) -> ActivityEntry {
        ActivityEntry {
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            action: action.to_string(),
            endpoint: format!("/{action}"),
            outcome: outcome.to_string(),
            latency_ms,
            tokens,
        }
    }

    #[test]
    fn empty_log_summarizes_to_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_actions, 0);
        assert!(summary.actions.is_empty());
    }

    #[test]
    fn groups_and_counts_outcomes() {
        let entries = vec![
            entry("sentimento", "success", 100, Some(4)),
            entry("sentimento", "failure", 300, None),
            entry("sentimento", "validation_error", 0, None),
            entry("gerar", "transport_error", 50, None),
        ];
        let summary = summarize(&entries);
        assert_eq!(summary.total_actions, 4);
        assert_eq!(summary.total_tokens, 4);

        let first = &summary.actions[0];
        assert_eq!(first.action, "sentimento");
        assert_eq!(first.count, 3);
        assert_eq!(first.success, 1);
        assert_eq!(first.failure, 1);
        assert_eq!(first.validation_error, 1);
        assert!((first.avg_latency_ms - 200.0).abs() < f64::EPSILON);
        assert!((first.success_pct() - 100.0 / 3.0).abs() < 1e-9);

        assert_eq!(summary.actions[1].action, "gerar");
        assert_eq!(summary.actions[1].transport_error, 1);
    }
}
