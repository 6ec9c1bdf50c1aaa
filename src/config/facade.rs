//! ConfigLoader: the single entry point for building a `SizehintConfig`.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::SizehintConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};

/// Loads configuration from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `workspace_root` from every source.
    pub fn load(workspace_root: &Path) -> Result<SizehintConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Load configuration from one explicit file (plus defaults). The file must exist.
    pub fn load_from_file(path: &Path) -> Result<SizehintConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()?
            .try_deserialize()
    }

    /// Location of the global configuration file, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
