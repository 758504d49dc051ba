pub mod cli_formatting;
pub mod data_formatting;

pub use cli_formatting::*;
pub use data_formatting::*;
