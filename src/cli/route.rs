//! CLI route: single route table and run context. Dispatches to the engine, adapters and presentation.

use crate::adapters::{AdapterDeps, BlockImage, BlockImageRewriter, MediaDirectiveFilter};
use crate::annotate::try_annotate;
use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_html_rewrite_result, format_resolve_report_json, format_resolve_report_text,
    format_rewrite_result, format_table_summary_json, format_table_summary_text, ResolveReport,
};
use crate::config::{ConfigLoader, SizehintConfig};
use crate::error::SizehintError;
use crate::types::UsageContext;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: loaded configuration and output format.
pub struct RunContext {
    config: SizehintConfig,
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
    format: String,
}

impl RunContext {
    /// Create run context around an already loaded configuration.
    pub fn from_config(
        config: SizehintConfig,
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        format: &str,
    ) -> Self {
        Self {
            config,
            workspace_root,
            config_path,
            format: format.to_string(),
        }
    }

    pub fn config(&self) -> &SizehintConfig {
        &self.config
    }

    fn json(&self) -> bool {
        self.format == "json"
    }

    /// Adapters are wired per command so `check-tables` can report bad tables instead of failing.
    fn deps(&self) -> Result<AdapterDeps, SizehintError> {
        AdapterDeps::from_config(&self.config)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, SizehintError> {
        match command {
            Commands::Resolve {
                area,
                role,
                width,
                path,
            } => {
                let context = match (area, role, path) {
                    (Some(area), _, _) => UsageContext::area(area.as_str()),
                    (_, Some(role), _) => UsageContext::role(role.as_str(), *width),
                    (_, _, Some(path)) => UsageContext::path(path.as_str()),
                    _ => {
                        return Err(SizehintError::InvalidArgument(
                            "one of --area, --role or --path is required".to_string(),
                        ))
                    }
                };
                self.handle_resolve(context)
            }
            Commands::Annotate { url, width } => {
                let output = match try_annotate(url, *width) {
                    Ok(annotated) => annotated,
                    Err(reason) => {
                        info!(url = %url, reason = %reason, "URL left unchanged");
                        url.clone()
                    }
                };
                format_rewrite_result(url, &output, &self.format)
            }
            Commands::RewriteHtml { file, width, role } => {
                self.handle_rewrite_html(file.as_deref(), *width, role.as_deref())
            }
            Commands::Media {
                rendered,
                directive,
            } => {
                let filter = MediaDirectiveFilter::new(self.deps()?);
                let output = filter.after_media_directive(rendered, directive);
                format_rewrite_result(rendered, &output, &self.format)
            }
            Commands::CheckTables => self.handle_check_tables(),
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    fn handle_resolve(&self, context: UsageContext) -> Result<String, SizehintError> {
        let deps = self.deps()?;
        let resolution = deps.resolver.resolve(&context, deps.source.as_ref());
        let report = ResolveReport::new(context, resolution);
        if self.json() {
            format_resolve_report_json(&report)
        } else {
            Ok(format_resolve_report_text(&report))
        }
    }

    fn handle_rewrite_html(
        &self,
        file: Option<&Path>,
        width: Option<u32>,
        role: Option<&str>,
    ) -> Result<String, SizehintError> {
        let html = match file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        let block = BlockImage {
            width,
            image_type: role.map(str::to_string),
        };
        let rewriter = BlockImageRewriter::new(self.deps()?);
        let output = rewriter.after_to_html(&block, &html);
        format_html_rewrite_result(&html, &output, &self.format)
    }

    fn handle_check_tables(&self) -> Result<String, SizehintError> {
        let tables = self.config.rule_tables();
        let errors = self.config.validate().err().unwrap_or_default();
        let out = if self.json() {
            format_table_summary_json(&tables, &errors)?
        } else {
            format_table_summary_text(&tables, &errors)
        };
        if errors.is_empty() {
            Ok(out)
        } else {
            Err(SizehintError::ConfigError(out))
        }
    }

    fn handle_config_command(&self, command: &ConfigCommands) -> Result<String, SizehintError> {
        match command {
            ConfigCommands::Show => {
                if self.json() {
                    return Ok(serde_json::to_string_pretty(&self.config)?);
                }
                let source = match (&self.config_path, ConfigLoader::global_config_path()) {
                    (Some(path), _) => format!("# config file: {}", path.display()),
                    (None, Some(global)) => format!(
                        "# workspace: {}\n# global config: {}",
                        self.workspace_root.display(),
                        global.display()
                    ),
                    (None, None) => format!("# workspace: {}", self.workspace_root.display()),
                };
                let body = self
                    .config
                    .to_toml()
                    .map_err(|e| SizehintError::ConfigError(e.to_string()))?;
                Ok(format!("{}\n{}", source, body))
            }
        }
    }
}
