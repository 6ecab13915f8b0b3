use chrono::DateTime;
use prep_core::{
    AppViewModel, DashboardFilter, DashboardView, InterviewRecord, InterviewStatus,
    InterviewSummary, LoadError, LoadErrorKind, PageView, ResearchTarget, StatusFilter,
};

/// One drawable element; the terminal backend decides how it looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    Heading(String),
    Section(String),
    Field { label: &'static str, value: String },
    Bullet(String),
    Text(String),
    Progress(String),
    ErrorPanel {
        title: String,
        detail: String,
        can_retry: bool,
    },
    Blank,
}

pub fn render_page(view: &AppViewModel) -> Vec<RenderCommand> {
    match &view.page {
        PageView::Inactive => Vec::new(),
        PageView::Loading { target } => vec![RenderCommand::Progress(format!(
            "Loading interview research for {}...",
            target_label(target)
        ))],
        PageView::Loaded { record } => render_record(record),
        PageView::Failed {
            target,
            error,
            can_retry,
        } => vec![RenderCommand::ErrorPanel {
            title: error_title(error),
            detail: format!("{} ({})", error.message, target_label(target)),
            can_retry: *can_retry,
        }],
    }
}

fn render_record(record: &InterviewRecord) -> Vec<RenderCommand> {
    let info = &record.interview_info;
    let research = &record.research_data;
    let summary = &research.company_summary;
    let prep = &research.interview_preparation;
    let market = &research.competitive_analysis;

    let mut cmds = vec![
        RenderCommand::Heading(format!("{} | {}", info.company_name, info.role)),
        RenderCommand::Field {
            label: "Interview",
            value: info.category.to_string(),
        },
        RenderCommand::Field {
            label: "When",
            value: format_interview_date(&info.interview_date),
        },
        RenderCommand::Field {
            label: "Skills",
            value: if info.skills.is_empty() {
                "-".to_string()
            } else {
                info.skills.join(", ")
            },
        },
        RenderCommand::Blank,
        RenderCommand::Section("Company overview".to_string()),
        RenderCommand::Text(summary.overview.clone()),
        RenderCommand::Field {
            label: "Industry",
            value: summary.industry.clone(),
        },
        RenderCommand::Field {
            label: "Size",
            value: summary.size.clone(),
        },
        RenderCommand::Field {
            label: "Culture",
            value: summary.culture.clone(),
        },
        RenderCommand::Field {
            label: "Recent news",
            value: summary.recent_news.clone(),
        },
        RenderCommand::Blank,
        RenderCommand::Section("Interview preparation".to_string()),
    ];

    if prep.company_specific_questions.is_empty() {
        cmds.push(RenderCommand::Text("No company specific questions yet.".to_string()));
    }
    cmds.extend(
        prep.company_specific_questions
            .iter()
            .map(|q| RenderCommand::Bullet(q.clone())),
    );
    cmds.extend([
        RenderCommand::Field {
            label: "Role insights",
            value: prep.role_specific_insights.clone(),
        },
        RenderCommand::Field {
            label: "Tips",
            value: prep.interview_tips.clone(),
        },
        RenderCommand::Field {
            label: "Sources",
            value: prep.research_sources.clone(),
        },
        RenderCommand::Blank,
        RenderCommand::Section("Competitive analysis".to_string()),
        RenderCommand::Field {
            label: "Competitors",
            value: market.competitors.clone(),
        },
        RenderCommand::Field {
            label: "Market position",
            value: market.market_position.clone(),
        },
        RenderCommand::Field {
            label: "Growth trends",
            value: market.growth_trends.clone(),
        },
    ]);
    cmds
}

pub fn render_dashboard(view: &DashboardView, filter: &DashboardFilter) -> Vec<RenderCommand> {
    let mut cmds = vec![
        RenderCommand::Heading("Dashboard".to_string()),
        RenderCommand::Text(format!(
            "{} upcoming | {} completed | {} with insights",
            view.upcoming_total, view.completed_total, view.with_insights
        )),
    ];

    let status = match filter.status {
        StatusFilter::All => "all",
        StatusFilter::Upcoming => "upcoming",
        StatusFilter::Completed => "completed",
    };
    let query = filter.query.trim();
    cmds.push(RenderCommand::Text(if query.is_empty() {
        format!("Showing {} ({} upcoming)", status, view.upcoming_visible)
    } else {
        format!(
            "Showing {} matching {:?} ({} upcoming)",
            status, query, view.upcoming_visible
        )
    }));
    cmds.push(RenderCommand::Blank);

    if view.rows.is_empty() {
        cmds.push(RenderCommand::Text("No interviews found.".to_string()));
    }
    cmds.extend(view.rows.iter().map(|row| RenderCommand::Bullet(format_row(row))));
    cmds
}

fn format_row(row: &InterviewSummary) -> String {
    let status = match row.status {
        InterviewStatus::Upcoming => "upcoming",
        InterviewStatus::Completed => "completed",
    };
    let insights = if row.has_insights { " [insights]" } else { "" };
    format!(
        "[#{id}] {date} {time} {company}: {subject} ({kind}, {status}, {recruiter}){insights}",
        id = row.id,
        date = row.date,
        time = row.time,
        company = row.company,
        subject = row.subject,
        kind = row.kind,
        recruiter = row.recruiter,
    )
}

fn error_title(error: &LoadError) -> String {
    match error.kind {
        LoadErrorKind::Network => "Could not reach the research service".to_string(),
        LoadErrorKind::HttpStatus(code) => format!("Research service answered HTTP {code}"),
        LoadErrorKind::Decode => "Research service sent an unexpected response".to_string(),
        LoadErrorKind::Timeout => "Research service did not answer in time".to_string(),
    }
}

fn target_label(target: &ResearchTarget) -> String {
    match target {
        ResearchTarget::Latest => "your next interview".to_string(),
        ResearchTarget::Company(name) => name.clone(),
    }
}

/// Falls back to the raw value when the timestamp does not parse.
pub fn format_interview_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(when) => when.format("%a %d %b %Y, %H:%M (UTC%:z)").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use prep_core::{
        CompanySummary, CompetitiveAnalysis, InterviewCategory, InterviewInfo,
        InterviewPreparation, ResearchData,
    };

    use super::*;

    fn record() -> InterviewRecord {
        let text = |s: &str| s.to_string();
        InterviewRecord {
            interview_info: InterviewInfo {
                company_name: text("Acme"),
                role: text("SRE"),
                category: InterviewCategory::Tech,
                interview_date: text("2025-01-01T10:00:00Z"),
                skills: vec![text("Linux"), text("Go")],
            },
            research_data: ResearchData {
                company_summary: CompanySummary {
                    overview: text("Makes anvils"),
                    industry: text("Manufacturing"),
                    size: text("500"),
                    culture: text("Blunt"),
                    recent_news: text("Rocket skates"),
                },
                interview_preparation: InterviewPreparation {
                    company_specific_questions: vec![text("Why anvils?")],
                    role_specific_insights: text("On-call heavy"),
                    interview_tips: text("Know your SLOs"),
                    research_sources: text("acme.example"),
                },
                competitive_analysis: CompetitiveAnalysis {
                    competitors: text("Ajax"),
                    market_position: text("Leader"),
                    growth_trends: text("Flat"),
                },
            },
        }
    }

    fn view(page: PageView) -> AppViewModel {
        AppViewModel {
            activation: Some(1),
            page,
        }
    }

    #[test]
    fn loading_renders_only_progress() {
        let cmds = render_page(&view(PageView::Loading {
            target: ResearchTarget::Company("Acme".to_string()),
        }));

        assert_eq!(
            cmds,
            vec![RenderCommand::Progress(
                "Loading interview research for Acme...".to_string()
            )]
        );
    }

    #[test]
    fn loaded_page_shows_header_and_questions() {
        let cmds = render_page(&view(PageView::Loaded { record: record() }));

        assert_eq!(cmds[0], RenderCommand::Heading("Acme | SRE".to_string()));
        assert!(cmds.contains(&RenderCommand::Field {
            label: "Skills",
            value: "Linux, Go".to_string(),
        }));
        assert!(cmds.contains(&RenderCommand::Bullet("Why anvils?".to_string())));
        assert!(cmds.contains(&RenderCommand::Field {
            label: "When",
            value: "Wed 01 Jan 2025, 10:00 (UTC+00:00)".to_string(),
        }));
    }

    #[test]
    fn failure_renders_error_panel_with_status() {
        let cmds = render_page(&view(PageView::Failed {
            target: ResearchTarget::Latest,
            error: LoadError::new(LoadErrorKind::HttpStatus(500), "500 Internal Server Error"),
            can_retry: true,
        }));

        assert_eq!(
            cmds,
            vec![RenderCommand::ErrorPanel {
                title: "Research service answered HTTP 500".to_string(),
                detail: "500 Internal Server Error (your next interview)".to_string(),
                can_retry: true,
            }]
        );
    }

    #[test]
    fn unparseable_date_is_shown_verbatim() {
        assert_eq!(format_interview_date("soon"), "soon");
    }

    #[test]
    fn dashboard_lists_rows_and_counters() {
        let rows = vec![InterviewSummary {
            id: 2,
            company: "StartupXYZ".to_string(),
            subject: "Technical Interview".to_string(),
            recruiter: "Mike Chen".to_string(),
            date: "2024-07-30".to_string(),
            time: "10:30 AM".to_string(),
            status: InterviewStatus::Upcoming,
            has_insights: false,
            kind: "Technical".to_string(),
        }];
        let filter = DashboardFilter::new("startup", StatusFilter::All);
        let dashboard = DashboardView::build(&rows, &filter);

        let cmds = render_dashboard(&dashboard, &filter);

        assert_eq!(
            cmds[1],
            RenderCommand::Text("1 upcoming | 0 completed | 0 with insights".to_string())
        );
        assert_eq!(
            cmds.last(),
            Some(&RenderCommand::Bullet(
                "[#2] 2024-07-30 10:30 AM StartupXYZ: Technical Interview \
                 (Technical, upcoming, Mike Chen)"
                    .to_string()
            ))
        );
    }
}
