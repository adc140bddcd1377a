use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Preparation state of a single order item.
///
/// The textual form (`pending`, `in_progress`, `ready`, `served`) is what is
/// stored and what callers filter on; matching is exact and case-sensitive.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus{
    Pending,
    InProgress,
    Ready,
    Served
}

impl WorkStatus {
    pub const ALL: [WorkStatus; 4] = [
        WorkStatus::Pending,
        WorkStatus::InProgress,
        WorkStatus::Ready,
        WorkStatus::Served
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::Pending => "pending",
            WorkStatus::InProgress => "in_progress",
            WorkStatus::Ready => "ready",
            WorkStatus::Served => "served"
        }
    }
}

impl FromStr for WorkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("{} is not a valid work item status", s))
    }
}

impl Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
