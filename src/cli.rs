use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::query::SortField;
use crate::types::{ProjectType, SearchField, VALID_SEARCH_FIELDS};

#[derive(Parser)]
#[command(name = "talentdir")]
#[command(about = "Search and browse the talent and project directory")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Path to the config file (default: platform config directory)
    #[arg(long, global = true, env = "TALENTDIR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the API base URL for this invocation
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,
}

/// How command results are printed
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

impl OutputOptions {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse talents
    #[command(visible_alias = "t")]
    Talents {
        #[command(subcommand)]
        action: TalentsAction,
    },

    /// Browse projects
    #[command(visible_alias = "p")]
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum TalentsAction {
    /// List talents matching the given criteria
    Ls {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Field the search runs against: name, role, skills (default: name)
        #[arg(long, default_value = "name", value_parser = parse_search_field)]
        field: SearchField,

        /// Require one of these skills (repeatable)
        #[arg(long = "skill", action = clap::ArgAction::Append)]
        skills: Vec<String>,

        /// Require one of these roles (repeatable)
        #[arg(long = "role", action = clap::ArgAction::Append)]
        roles: Vec<String>,

        /// Availability, e.g. "Full-time"
        #[arg(long)]
        availability: Option<String>,

        /// Cohort, e.g. "Cohort 5"
        #[arg(long)]
        cohort: Option<String>,

        /// Page to show (1-indexed)
        #[arg(long, default_value = "1", value_parser = parse_page)]
        page: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a talent's full profile
    Show {
        /// Talent ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectsAction {
    /// List projects matching the given criteria
    Ls {
        /// Free-text search over title, description, tech stack and creators
        #[arg(short, long)]
        search: Option<String>,

        /// Project type code, e.g. FINTECH (repeatable)
        #[arg(
            short = 't',
            long = "type",
            action = clap::ArgAction::Append,
            value_parser = parse_project_type
        )]
        types: Vec<ProjectType>,

        /// Require one of these technologies (repeatable)
        #[arg(long = "tech", action = clap::ArgAction::Append)]
        tech: Vec<String>,

        /// Sort order: name, newest (default: newest)
        #[arg(long, default_value = "newest", value_parser = parse_sort_field)]
        sort: SortField,

        /// Page to show (1-indexed)
        #[arg(long, default_value = "1", value_parser = parse_page)]
        page: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the config file location
    Path {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            ProjectListOptions, TalentListOptions, cmd_config_init, cmd_config_path,
            cmd_config_show, cmd_projects_ls, cmd_talent_show, cmd_talents_ls,
        };

        let global = self.global;
        match self.command {
            Commands::Talents { action } => match action {
                TalentsAction::Ls {
                    search,
                    field,
                    skills,
                    roles,
                    availability,
                    cohort,
                    page,
                    json,
                } => {
                    let opts = TalentListOptions {
                        search,
                        field,
                        skills,
                        roles,
                        availability,
                        cohort,
                        page,
                    };
                    cmd_talents_ls(&global, opts, OutputOptions::new(json)).await
                }
                TalentsAction::Show { id, json } => {
                    cmd_talent_show(&global, &id, OutputOptions::new(json)).await
                }
            },

            Commands::Projects { action } => match action {
                ProjectsAction::Ls {
                    search,
                    types,
                    tech,
                    sort,
                    page,
                    json,
                } => {
                    let opts = ProjectListOptions {
                        search,
                        types,
                        tech,
                        sort,
                        page,
                    };
                    cmd_projects_ls(&global, opts, OutputOptions::new(json)).await
                }
            },

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(&global, OutputOptions::new(json)),
                ConfigAction::Path { json } => cmd_config_path(&global, OutputOptions::new(json)),
                ConfigAction::Init { force, json } => {
                    cmd_config_init(&global, force, OutputOptions::new(json))
                }
            },
        }
    }
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_search_field(s: &str) -> Result<SearchField, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "search field",
        VALID_SEARCH_FIELDS,
    )
}

fn parse_sort_field(s: &str) -> Result<SortField, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "sort field",
        SortField::ALL_STRINGS,
    )
}

fn parse_project_type(s: &str) -> Result<ProjectType, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid project type '{s}'. \
             Known codes include: PORTFOLIO_PERSONAL, ECOMMERCE, FINTECH, EDTECH, GAMING"
        )
    })
}

fn parse_page(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("Invalid page '{s}'. Must be a positive integer")),
        Ok(n) => Ok(n),
    }
}
