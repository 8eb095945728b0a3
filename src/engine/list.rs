// ABOUTME: Container listing summaries and line-oriented JSON parsing.
// ABOUTME: One summary per `{{json .}}` line; malformed lines are skipped.

use crate::types::ContainerId;
use serde::{Deserialize, Serialize};

/// Snapshot of one container as reported by a list query.
///
/// Field names mirror the runtime's `{{json .}}` output. Every field is
/// the runtime-native string representation; nothing is reinterpreted.
/// Produced fresh on every list call and never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContainerSummary {
    pub command: String,
    pub created_at: String,
    #[serde(rename = "ID")]
    pub id: ContainerId,
    pub image: String,
    pub labels: String,
    pub local_volumes: String,
    pub mounts: String,
    pub names: String,
    pub networks: String,
    pub ports: String,
    pub running_for: String,
    pub size: String,
    pub state: String,
    pub status: String,
}

/// Parse line-oriented JSON listing output into summaries.
///
/// The runtime's output ends with a line terminator, so the final empty
/// line is discarded rather than parsed as an empty object. Each
/// remaining line parses independently; a malformed line is skipped with
/// a warning so one garbage line cannot disable listing altogether.
pub(crate) fn parse_summaries(stdout: &str) -> Vec<ContainerSummary> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("skipping malformed listing line: {} ({})", line, e);
                None
            }
        })
        .collect()
}
