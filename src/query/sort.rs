//! Sort functions for directory records.
//!
//! Talents list alphabetically; projects list newest first.

use std::cmp::Ordering;

use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::enum_display_fromstr;
use crate::error::DirectoryError;
use crate::types::{Project, Talent};
use crate::utils::text::cmp_case_insensitive;

/// Sort order for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Newest,
}

impl SortField {
    pub const ALL_STRINGS: &[&str] = &["name", "newest"];
}

enum_display_fromstr!(
    SortField,
    DirectoryError::InvalidSortField,
    {
        Name => "name",
        Newest => "newest",
    }
);

/// Keys a record exposes for sorting
pub trait Sortable {
    fn display_name(&self) -> Option<&str>;
    fn created(&self) -> Option<Timestamp>;
}

impl Sortable for Talent {
    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn created(&self) -> Option<Timestamp> {
        None
    }
}

impl Sortable for Project {
    fn display_name(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn created(&self) -> Option<Timestamp> {
        self.created_at.as_deref().and_then(parse_created_at)
    }
}

/// Parse an API creation stamp: a full RFC 3339 timestamp or a bare date
pub fn parse_created_at(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts);
    }
    let date: Date = raw.parse().ok()?;
    date.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp())
}

/// Sort by name, ignoring case. Unnamed records go last.
pub fn sort_by_name<R: Sortable>(records: &mut [R]) {
    records.sort_by(|a, b| match (a.display_name(), b.display_name()) {
        (Some(na), Some(nb)) => cmp_case_insensitive(na, nb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Sort by creation time (newest first). Undated records go last, by name.
pub fn sort_by_newest<R: Sortable>(records: &mut [R]) {
    records.sort_by(|a, b| match (a.created(), b.created()) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => match (a.display_name(), b.display_name()) {
            (Some(na), Some(nb)) => cmp_case_insensitive(na, nb),
            _ => Ordering::Equal,
        },
    });
}

/// Sort records by the specified field
pub fn sort_records<R: Sortable>(records: &mut [R], sort_by: SortField) {
    match sort_by {
        SortField::Name => sort_by_name(records),
        SortField::Newest => sort_by_newest(records),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn named(name: &str) -> Talent {
        Talent {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn dated(title: &str, created_at: Option<&str>) -> Project {
        Project {
            title: Some(title.to_string()),
            created_at: created_at.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut talents = vec![named("kwame"), Talent::default(), named("Abena"), named("efua")];
        sort_by_name(&mut talents);

        let names: Vec<_> = talents.iter().map(|t| t.name.as_deref()).collect();
        assert_eq!(names, vec![Some("Abena"), Some("efua"), Some("kwame"), None]);
    }

    #[test]
    fn test_sort_by_newest() {
        let mut projects = vec![
            dated("old", Some("2024-01-01T00:00:00Z")),
            dated("undated", None),
            dated("new", Some("2025-12-01T08:30:00.000Z")),
            dated("mid", Some("2024-06-01")),
        ];
        sort_by_newest(&mut projects);

        let titles: Vec<_> = projects.iter().map(|p| p.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["new", "mid", "old", "undated"]);
    }

    #[test]
    fn test_unparseable_date_counts_as_undated() {
        let mut projects = vec![
            dated("garbled", Some("last tuesday")),
            dated("dated", Some("2024-01-01T00:00:00Z")),
        ];
        sort_records(&mut projects, SortField::Newest);
        assert_eq!(projects[0].title.as_deref(), Some("dated"));
    }

    #[test]
    fn test_parse_created_at() {
        assert!(parse_created_at("2026-01-26T10:00:00Z").is_some());
        assert!(parse_created_at(" 2026-01-26 ").is_some());
        assert!(parse_created_at("26/01/2026").is_none());
    }

    #[test]
    fn test_sort_field_from_str() {
        assert_eq!(SortField::from_str("NAME").unwrap(), SortField::Name);
        assert_eq!(SortField::from_str("newest").unwrap(), SortField::Newest);
        assert!(SortField::from_str("priority").is_err());
        assert_eq!(SortField::Newest.to_string(), "newest");
        assert_eq!(SortField::default(), SortField::Name);
    }
}
