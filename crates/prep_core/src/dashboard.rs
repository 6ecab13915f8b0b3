//! Interview overview: filtering and counters over configured interview entries.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Upcoming,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub id: u32,
    pub company: String,
    pub subject: String,
    pub recruiter: String,
    pub date: String,
    pub time: String,
    pub status: InterviewStatus,
    #[serde(default)]
    pub has_insights: bool,
    /// Round label such as "Technical" or "Final Round".
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Upcoming,
    Completed,
}

impl StatusFilter {
    fn accepts(self, status: InterviewStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Upcoming => status == InterviewStatus::Upcoming,
            StatusFilter::Completed => status == InterviewStatus::Completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "upcoming" => Ok(StatusFilter::Upcoming),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown status filter {other:?}")),
        }
    }
}

/// Search text and status selection; an immutable value passed to `DashboardView::build`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardFilter {
    pub query: String,
    pub status: StatusFilter,
}

impl DashboardFilter {
    pub fn new(query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    fn matches(&self, entry: &InterviewSummary, needle: &str) -> bool {
        let text_match = needle.is_empty()
            || entry.company.to_lowercase().contains(needle)
            || entry.subject.to_lowercase().contains(needle);
        text_match && self.status.accepts(entry.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardView {
    pub rows: Vec<InterviewSummary>,
    /// Upcoming interviews among all entries, regardless of filter.
    pub upcoming_total: usize,
    /// Upcoming interviews among the visible rows.
    pub upcoming_visible: usize,
    pub completed_total: usize,
    pub with_insights: usize,
}

impl DashboardView {
    pub fn build(entries: &[InterviewSummary], filter: &DashboardFilter) -> Self {
        let needle = filter.query.trim().to_lowercase();
        let rows: Vec<InterviewSummary> = entries
            .iter()
            .filter(|entry| filter.matches(entry, &needle))
            .cloned()
            .collect();

        let count = |status: InterviewStatus| {
            entries.iter().filter(|e| e.status == status).count()
        };
        Self {
            upcoming_visible: rows
                .iter()
                .filter(|e| e.status == InterviewStatus::Upcoming)
                .count(),
            upcoming_total: count(InterviewStatus::Upcoming),
            completed_total: count(InterviewStatus::Completed),
            with_insights: entries.iter().filter(|e| e.has_insights).count(),
            rows,
        }
    }
}
