//! CLI parse: clap types for sizehint. No behavior; definitions only.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Sizehint CLI - width hints for storefront image URLs
#[derive(Parser)]
#[command(name = "sizehint")]
#[command(about = "Resolve display widths and annotate image URLs with a w= parameter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/ is read from here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the width for one usage context
    #[command(group(ArgGroup::new("context").required(true).args(["area", "role", "path"])))]
    Resolve {
        /// Catalog display area identifier
        #[arg(long)]
        area: Option<String>,
        /// Block image type (role) identifier
        #[arg(long)]
        role: Option<String>,
        /// Width set on the block itself (with --role)
        #[arg(long, requires = "role")]
        width: Option<u32>,
        /// Raw media URL
        #[arg(long)]
        path: Option<String>,
    },
    /// Append w=<width> to a URL
    Annotate {
        /// URL to annotate
        url: String,
        /// Width to stamp
        #[arg(long)]
        width: u32,
    },
    /// Annotate catalog product img srcs in an HTML fragment (file or stdin)
    #[command(group(ArgGroup::new("sizing").required(true).multiple(true).args(["width", "role"])))]
    RewriteHtml {
        /// HTML file (reads stdin when omitted)
        file: Option<PathBuf>,
        /// Explicit block width
        #[arg(long)]
        width: Option<u32>,
        /// Block image type used when no explicit width applies
        #[arg(long)]
        role: Option<String>,
    },
    /// Run the media directive filter on a rendered URL
    Media {
        /// URL produced by the media directive
        rendered: String,
        /// The directive's url argument as written in the content
        #[arg(long, default_value = "")]
        directive: String,
    },
    /// Validate the effective rule tables and configuration
    CheckTables,
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective merged configuration as TOML
    Show,
}
