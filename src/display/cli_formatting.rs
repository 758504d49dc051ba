use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::browse::PaginationViewModel;
use crate::types::{Project, Talent, TalentProfile};
use crate::utils::text::truncate_string;

use super::data_formatting::{clean_url, creators_label, format_project_date, project_type_label};

const SUMMARY_WIDTH: usize = 60;

#[derive(Tabled)]
struct TalentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Skills")]
    skills: String,
    #[tabled(rename = "Availability")]
    availability: String,
    #[tabled(rename = "Cohort")]
    cohort: String,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    project_type: String,
    #[tabled(rename = "Tech Stack")]
    tech: String,
    #[tabled(rename = "By")]
    creators: String,
    #[tabled(rename = "Created")]
    created: String,
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// One colored line per talent
pub fn format_talent_line(talent: &Talent) -> String {
    let name = talent.name.as_deref().unwrap_or("(unnamed)");
    let mut line = name.bold().to_string();

    if let Some(role) = &talent.role {
        line.push_str(&format!(" - {}", role.cyan()));
    }
    if let Some(cohort) = &talent.cohort {
        line.push_str(&format!(" {}", format!("[{cohort}]").magenta()));
    }
    if let Some(availability) = &talent.availability {
        line.push_str(&format!(" {}", availability.green()));
    }
    if !talent.skills.is_empty() {
        let skills = truncate_string(&talent.skills.join(", "), SUMMARY_WIDTH);
        line.push_str(&format!("\n    {}", skills.dimmed()));
    }
    line
}

/// One colored line per project
pub fn format_project_line(project: &Project) -> String {
    let title = project.title.as_deref().unwrap_or("(untitled)");
    let mut line = title.bold().to_string();

    if let Some(code) = &project.project_type {
        line.push_str(&format!(" {}", format!("[{}]", project_type_label(code)).yellow()));
    }
    line.push_str(&format!(" by {}", creators_label(&project.created_by).cyan()));
    if let Some(date) = project.created_at.as_deref().and_then(format_project_date) {
        line.push_str(&format!(" {}", date.dimmed()));
    }
    if !project.tech_stack.is_empty() {
        let tech = truncate_string(&project.tech_stack.join(", "), SUMMARY_WIDTH);
        line.push_str(&format!("\n    {}", tech.dimmed()));
    }
    line
}

pub fn talent_table(talents: &[Talent]) -> String {
    let rows: Vec<TalentRow> = talents
        .iter()
        .map(|t| TalentRow {
            id: or_dash(t.id.as_deref()),
            name: or_dash(t.name.as_deref()),
            role: or_dash(t.role.as_deref()),
            skills: truncate_string(&t.skills.join(", "), SUMMARY_WIDTH),
            availability: or_dash(t.availability.as_deref()),
            cohort: or_dash(t.cohort.as_deref()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn project_table(projects: &[Project]) -> String {
    let rows: Vec<ProjectRow> = projects
        .iter()
        .map(|p| ProjectRow {
            title: or_dash(p.title.as_deref()),
            project_type: p
                .project_type
                .as_deref()
                .map(project_type_label)
                .unwrap_or_else(|| "-".to_string()),
            tech: truncate_string(&p.tech_stack.join(", "), SUMMARY_WIDTH),
            creators: creators_label(&p.created_by),
            created: p
                .created_at
                .as_deref()
                .and_then(format_project_date)
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Full profile for the detail view
pub fn format_profile(profile: &TalentProfile) -> String {
    let mut out = String::new();
    let name = profile.name.as_deref().unwrap_or("(unnamed)");
    out.push_str(&format!("{}\n", name.bold()));

    let field = |label: &str, value: Option<&str>| -> String {
        match value {
            Some(v) if !v.trim().is_empty() => format!("{} {}\n", format!("{label}:").cyan(), v),
            _ => String::new(),
        }
    };

    out.push_str(&field("Role", profile.role.as_deref()));
    out.push_str(&field("Cohort", profile.cohort.as_deref()));
    out.push_str(&field("Availability", profile.availability.as_deref()));

    if !profile.skills.is_empty() {
        out.push_str(&field("Skills", Some(profile.skills.join(", ").as_str())));
    }
    if !profile.soft_skills.is_empty() {
        out.push_str(&field(
            "Soft skills",
            Some(profile.soft_skills.join(", ").as_str()),
        ));
    }

    if let Some(summary) = profile.brief_summary.as_deref().filter(|s| !s.trim().is_empty()) {
        out.push_str(&format!("\n{}\n{}\n", "Summary".cyan().bold(), summary.trim()));
    }
    if let Some(education) = profile
        .education_summary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        out.push_str(&format!("\n{}\n{}\n", "Education".cyan().bold(), education.trim()));
    }

    let portfolio = clean_url(profile.portfolio_url.as_deref());
    let cv = clean_url(profile.cv_url.as_deref());
    if portfolio.is_some() || cv.is_some() {
        out.push('\n');
        out.push_str(&field("Portfolio", portfolio));
        out.push_str(&field("CV", cv));
    }

    out.trim_end().to_string()
}

/// `Page 2 of 3 (45 talents)`, or nothing when everything fits on one page
pub fn format_page_footer(pagination: &PaginationViewModel, noun: &str) -> Option<String> {
    if !pagination.visible {
        return None;
    }
    Some(
        format!(
            "Page {} of {} ({} {})",
            pagination.current_page, pagination.total_pages, pagination.total_items, noun
        )
        .dimmed()
        .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            title: Some("Farm Ledger".to_string()),
            project_type: Some("FINTECH".to_string()),
            tech_stack: vec!["React".to_string(), "Node.js".to_string()],
            created_at: Some("2026-01-26T10:00:00Z".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_project_line_uses_label_and_anonymous() {
        let line = format_project_line(&project());
        assert!(line.contains("Farm Ledger"));
        assert!(line.contains("[Fintech]"));
        assert!(line.contains("Anonymous"));
        assert!(line.contains("Jan 26, 2026"));
        assert!(line.contains("React, Node.js"));
    }

    #[test]
    fn test_talent_line_skips_missing_fields() {
        let talent = Talent {
            name: Some("Ama Mensah".to_string()),
            ..Default::default()
        };
        let line = format_talent_line(&talent);
        assert!(line.contains("Ama Mensah"));
        assert!(!line.contains('['));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_tables_have_headers() {
        let table = project_table(&[project()]);
        assert!(table.contains("Title"));
        assert!(table.contains("Tech Stack"));
        assert!(table.contains("Jan 26, 2026"));

        let talents = talent_table(&[Talent {
            name: Some("Kofi".to_string()),
            ..Default::default()
        }]);
        assert!(talents.contains("Availability"));
        assert!(talents.contains("Kofi"));
    }

    #[test]
    fn test_profile_hides_placeholder_links() {
        let profile = TalentProfile {
            name: Some("Ama".to_string()),
            portfolio_url: Some("#".to_string()),
            cv_url: Some(" https://a.dev/cv.pdf ".to_string()),
            ..Default::default()
        };
        let text = format_profile(&profile);
        assert!(text.contains("https://a.dev/cv.pdf"));
        assert!(!text.contains("Portfolio"));
    }

    #[test]
    fn test_page_footer_only_when_paged() {
        let mut pagination = PaginationViewModel {
            current_page: 1,
            total_pages: 1,
            total_items: 15,
            page_numbers: vec![1],
            has_previous: false,
            has_next: false,
            visible: false,
        };
        assert!(format_page_footer(&pagination, "talents").is_none());

        pagination.current_page = 2;
        pagination.total_pages = 3;
        pagination.total_items = 45;
        pagination.visible = true;
        let footer = format_page_footer(&pagination, "talents").unwrap();
        assert!(footer.contains("Page 2 of 3 (45 talents)"));
    }
}
