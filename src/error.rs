use thiserror::Error;

use crate::types::Facet;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("facet '{facet}' is {actual}, not {expected}")]
    FacetKind {
        facet: Facet,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("invalid search field '{0}', expected one of: name, role, skills")]
    InvalidSearchField(String),

    #[error("unknown facet '{0}'")]
    InvalidFacet(String),

    #[error("invalid sort field '{0}', expected one of: name, newest")]
    InvalidSortField(String),

    #[error("unknown project type '{0}'")]
    InvalidProjectType(String),

    /// A listing or profile could not be loaded; carries the user-facing message
    #[error("{0}")]
    FetchFailed(String),

    #[error("{0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
