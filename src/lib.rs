pub mod browse;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod macros;
pub mod paging;
pub mod query;
pub mod remote;
pub mod types;
pub mod utils;

pub use browse::{BrowseAction, BrowseState, BrowseViewModel, Browser};
pub use catalog::{Catalog, ProjectCatalog, TalentCatalog};
pub use config::Config;
pub use error::{DirectoryError, Result};
pub use fetch::{DetailController, ListController, ListSnapshot, ListStatus};
pub use filter::{FilterCriteria, FilterStore};
pub use paging::Pager;
pub use remote::{HttpClient, ListRequest, RemoteClient};
pub use types::{Facet, Project, SearchField, Talent, TalentProfile};
