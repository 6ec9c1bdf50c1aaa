//! CLI domain: parse, route, output, and presentation only.
//! No resolution logic; a single route table dispatches to the engine and adapters.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use presentation::{format_resolve_report_text, format_table_summary_text, ResolveReport};
pub use route::RunContext;
