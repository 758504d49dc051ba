use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::enum_display_fromstr;
use crate::error::DirectoryError;

/// Field the free-text talent search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Name,
    Role,
    Skills,
}

enum_display_fromstr!(
    SearchField,
    DirectoryError::InvalidSearchField,
    {
        Name => "name",
        Role => "role",
        Skills => "skills",
    }
);

pub const VALID_SEARCH_FIELDS: &[&str] = &["name", "role", "skills"];

/// Whether a facet holds a set of values or at most one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    Multi,
    Single,
}

impl FacetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FacetKind::Multi => "multi-select",
            FacetKind::Single => "single-select",
        }
    }
}

/// A named filter dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
    Skills,
    Roles,
    ProjectTypes,
    TechStack,
    Availability,
    Cohort,
    Category,
}

enum_display_fromstr!(
    Facet,
    DirectoryError::InvalidFacet,
    {
        Skills => "skills",
        Roles => "roles",
        ProjectTypes => "projectTypes",
        TechStack => "techStack",
        Availability => "availability",
        Cohort => "cohort",
        Category => "category",
    }
);

impl Facet {
    pub const ALL: [Facet; 7] = [
        Facet::Skills,
        Facet::Roles,
        Facet::ProjectTypes,
        Facet::TechStack,
        Facet::Availability,
        Facet::Cohort,
        Facet::Category,
    ];

    pub fn kind(self) -> FacetKind {
        match self {
            Facet::Skills | Facet::Roles | Facet::ProjectTypes | Facet::TechStack => {
                FacetKind::Multi
            }
            Facet::Availability | Facet::Cohort | Facet::Category => FacetKind::Single,
        }
    }

    /// Name of the query parameter the API expects for this facet
    pub fn param_name(self) -> &'static str {
        match self {
            Facet::Skills => "skills",
            Facet::Roles => "role",
            Facet::ProjectTypes => "projectType",
            Facet::TechStack => "techStack",
            Facet::Availability => "availability",
            Facet::Cohort => "cohort",
            Facet::Category => "category",
        }
    }

    /// Human label used for chips and headings
    pub fn label(self) -> &'static str {
        match self {
            Facet::Skills => "Skills",
            Facet::Roles => "Roles",
            Facet::ProjectTypes => "Project Type",
            Facet::TechStack => "Tech Stack",
            Facet::Availability => "Availability",
            Facet::Cohort => "Cohort",
            Facet::Category => "Category",
        }
    }
}

/// Known project categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    PortfolioPersonal,
    Ecommerce,
    Fintech,
    SaasProductivity,
    SocialCommunication,
    EntertainmentMedia,
    Edtech,
    HealthFitness,
    AiMachineLearning,
    Web3Blockchain,
    UtilitiesTools,
    OpenSource,
    Advertisement,
    Gaming,
    Marketing,
}

// The API spells the marketing code "MARKERTING"; keep it as sent.
enum_display_fromstr!(
    ProjectType,
    DirectoryError::InvalidProjectType,
    {
        PortfolioPersonal => "PORTFOLIO_PERSONAL",
        Ecommerce => "ECOMMERCE",
        Fintech => "FINTECH",
        SaasProductivity => "SAAS_PRODUCTIVITY",
        SocialCommunication => "SOCIAL_COMMUNICATION",
        EntertainmentMedia => "ENTERTAINMENT_MEDIA",
        Edtech => "EDTECH",
        HealthFitness => "HEALTH_FITNESS",
        AiMachineLearning => "AI_MACHINE_LEARNING",
        Web3Blockchain => "WEB3_BLOCKCHAIN",
        UtilitiesTools => "UTILITIES_TOOLS",
        OpenSource => "OPEN_SOURCE",
        Advertisement => "ADVERTISEMENT",
        Gaming => "GAMING",
        Marketing => "MARKERTING",
    }
);

impl ProjectType {
    pub fn label(self) -> &'static str {
        match self {
            ProjectType::PortfolioPersonal => "Portfolio/Personal",
            ProjectType::Ecommerce => "E-commerce",
            ProjectType::Fintech => "Fintech",
            ProjectType::SaasProductivity => "SaaS/Productivity",
            ProjectType::SocialCommunication => "Social/Communication",
            ProjectType::EntertainmentMedia => "Entertainment/Media",
            ProjectType::Edtech => "EdTech",
            ProjectType::HealthFitness => "Health/Fitness",
            ProjectType::AiMachineLearning => "AI/Machine Learning",
            ProjectType::Web3Blockchain => "Web3/Blockchain",
            ProjectType::UtilitiesTools => "Utilities/Tools",
            ProjectType::OpenSource => "Open Source",
            ProjectType::Advertisement => "Advertisement",
            ProjectType::Gaming => "Gaming",
            ProjectType::Marketing => "Marketing",
        }
    }
}

/// Accept ids sent either as JSON strings or numbers
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

/// Read a list field, treating `null` the same as a missing key
fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lightweight talent record as returned by the list endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talent {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "id_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(
        default,
        deserialize_with = "vec_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub skills: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohort: Option<String>,

    #[serde(
        default,
        deserialize_with = "vec_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub images: Vec<String>,
}

/// Full talent profile fetched on demand for the detail view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentProfile {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "id_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohort: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief_summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_summary: Option<String>,

    #[serde(
        default,
        deserialize_with = "vec_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub soft_skills: Vec<String>,

    #[serde(
        default,
        deserialize_with = "vec_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub skills: Vec<String>,

    #[serde(
        default,
        deserialize_with = "vec_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub images: Vec<String>,

    #[serde(
        default,
        rename = "portFolio",
        alias = "portfolio",
        skip_serializing_if = "Option::is_none"
    )]
    pub portfolio_url: Option<String>,

    #[serde(default, rename = "cv", skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
}

/// Pair of outbound links attached to a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectLinks {
    #[serde(default, rename = "gitHub", skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<String>,
}

/// Project record as returned by `/projects`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "id_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "vec_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tech_stack: Vec<String>,

    /// Raw category code; unknown codes are kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "vec_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub created_by: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(
        default,
        deserialize_with = "vec_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub images: Vec<String>,

    #[serde(
        default,
        deserialize_with = "vec_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<ProjectLinks>,
}

impl Project {
    /// Parsed category, if the code is one we know
    pub fn known_type(&self) -> Option<ProjectType> {
        self.project_type.as_deref()?.parse().ok()
    }
}

/// Which listable entity a catalog serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Talent,
    Project,
}

impl EntityKind {
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Talent => "talents",
            EntityKind::Project => "projects",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Talent => write!(f, "talent"),
            EntityKind::Project => write!(f, "project"),
        }
    }
}
