//! Merge rules: defaults, override order, conflict handling.
//!
//! Sources are layered in this order, later sources winning per key:
//! defaults, global file, workspace `config.toml`, workspace `{env}.toml`,
//! `SIZEHINT__*` environment variables. Rule table conflicts introduced by
//! the merged result are rejected later by `SizehintConfig::validate`.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("view.catalog_namespace", crate::view_config::CATALOG_NAMESPACE)?
        .set_default("logging.level", "info")?
        .set_default("logging.output", "stderr")
}
