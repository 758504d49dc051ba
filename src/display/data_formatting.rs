use jiff::tz::TimeZone;

use crate::query::sort::parse_created_at;

/// Format a project creation stamp for display
///
/// Accepts RFC 3339 timestamps and bare dates; the date is shown in UTC.
/// Returns `None` when the stamp cannot be parsed.
///
/// # Examples
///
/// ```
/// use talentdir::display::format_project_date;
///
/// assert_eq!(format_project_date("2026-01-26T15:04:05Z").as_deref(), Some("Jan 26, 2026"));
/// assert_eq!(format_project_date("2025-03-07").as_deref(), Some("Mar 7, 2025"));
/// assert_eq!(format_project_date("yesterday"), None);
/// ```
pub fn format_project_date(raw: &str) -> Option<String> {
    let ts = parse_created_at(raw)?;
    Some(ts.to_zoned(TimeZone::UTC).strftime("%b %-d, %Y").to_string())
}

/// Creator names joined for display, or `Anonymous` when there are none
pub fn creators_label(created_by: &[String]) -> String {
    let names: Vec<&str> = created_by
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        "Anonymous".to_string()
    } else {
        names.join(", ")
    }
}

/// A usable link, or `None` for blank and placeholder (`#`) values
pub fn clean_url(url: Option<&str>) -> Option<&str> {
    let trimmed = url?.trim();
    (!trimmed.is_empty() && trimmed != "#").then_some(trimmed)
}

/// Human label for a project category code; unknown codes are shown as sent
pub fn project_type_label(code: &str) -> String {
    code.parse::<crate::types::ProjectType>()
        .map(|t| t.label().to_string())
        .unwrap_or_else(|_| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_project_date_uses_utc_day() {
        assert_eq!(
            format_project_date("2026-01-26T23:30:00-05:00").as_deref(),
            Some("Jan 27, 2026")
        );
    }

    #[test]
    fn test_creators_label() {
        assert_eq!(creators_label(&[]), "Anonymous");
        assert_eq!(creators_label(&["  ".to_string()]), "Anonymous");
        assert_eq!(
            creators_label(&["Ama".to_string(), "Kofi".to_string()]),
            "Ama, Kofi"
        );
    }

    #[test]
    fn test_clean_url() {
        assert_eq!(clean_url(Some(" https://a.dev ")), Some("https://a.dev"));
        assert_eq!(clean_url(Some("#")), None);
        assert_eq!(clean_url(Some("   ")), None);
        assert_eq!(clean_url(None), None);
    }

    #[test]
    fn test_project_type_label() {
        assert_eq!(project_type_label("HEALTH_FITNESS"), "Health/Fitness");
        assert_eq!(project_type_label("MARKERTING"), "Marketing");
        assert_eq!(project_type_label("SPACE"), "SPACE");
    }
}
