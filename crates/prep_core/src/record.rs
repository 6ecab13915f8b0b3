use std::fmt;

use serde::{Deserialize, Serialize};

/// Root document returned by the interview research endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub interview_info: InterviewInfo,
    pub research_data: ResearchData,
}

impl InterviewRecord {
    pub fn company_name(&self) -> &str {
        &self.interview_info.company_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewInfo {
    pub company_name: String,
    pub role: String,
    #[serde(rename = "type")]
    pub category: InterviewCategory,
    /// ISO-8601 timestamp as sent by the service.
    pub interview_date: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchData {
    pub company_summary: CompanySummary,
    pub interview_preparation: InterviewPreparation,
    pub competitive_analysis: CompetitiveAnalysis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub overview: String,
    pub industry: String,
    pub size: String,
    pub culture: String,
    pub recent_news: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewPreparation {
    pub company_specific_questions: Vec<String>,
    pub role_specific_insights: String,
    pub interview_tips: String,
    pub research_sources: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitiveAnalysis {
    pub competitors: String,
    pub market_position: String,
    pub growth_trends: String,
}

/// Interview round tag. Only the exact upper-case tags map to known variants;
/// any other spelling is kept verbatim in `Other` so it re-encodes unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterviewCategory {
    Tech,
    Hr,
    Final,
    Other(String),
}

impl InterviewCategory {
    pub fn as_str(&self) -> &str {
        match self {
            InterviewCategory::Tech => "TECH",
            InterviewCategory::Hr => "HR",
            InterviewCategory::Final => "FINAL",
            InterviewCategory::Other(tag) => tag,
        }
    }
}

impl From<String> for InterviewCategory {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "TECH" => InterviewCategory::Tech,
            "HR" => InterviewCategory::Hr,
            "FINAL" => InterviewCategory::Final,
            _ => InterviewCategory::Other(tag),
        }
    }
}

impl From<InterviewCategory> for String {
    fn from(category: InterviewCategory) -> Self {
        match category {
            InterviewCategory::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InterviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of the `/health` probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Which research document a page asks for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResearchTarget {
    /// `GET /interview-research`
    #[default]
    Latest,
    /// `GET /interview-research/company/{name}`
    Company(String),
}

impl fmt::Display for ResearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResearchTarget::Latest => write!(f, "latest interview"),
            ResearchTarget::Company(name) => write!(f, "company {name:?}"),
        }
    }
}
