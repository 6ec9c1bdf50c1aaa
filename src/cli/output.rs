//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::SizehintError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &SizehintError) -> String {
    match e {
        SizehintError::TableError(inner) => format!("Rule tables rejected: {}", inner),
        other => other.to_string(),
    }
}
