//! CLI presentation: text and json formatters per command.

use crate::annotate::count_catalog_srcs;
use crate::config::ValidationError;
use crate::error::SizehintError;
use crate::rules::{RuleTable, RuleTables};
use crate::types::{Resolution, Unresolved, UsageContext, Width, WidthSource};
use serde::Serialize;

/// Flattened view of one resolution, for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveReport {
    pub context: UsageContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Width>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<WidthSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Unresolved>,
}

impl ResolveReport {
    pub fn new(context: UsageContext, resolution: Resolution) -> Self {
        match resolution {
            Ok(resolved) => Self {
                context,
                width: Some(resolved.width),
                source: Some(resolved.source),
                reason: None,
            },
            Err(reason) => Self {
                context,
                width: None,
                source: None,
                reason: Some(reason),
            },
        }
    }
}

pub fn format_resolve_report_text(report: &ResolveReport) -> String {
    match (&report.width, &report.source, &report.reason) {
        (Some(width), Some(source), _) => format!(
            "{}: {} (from {})",
            report.context.identifier(),
            width,
            source
        ),
        (_, _, Some(reason)) => format!("{}: unresolved ({})", report.context.identifier(), reason),
        _ => format!("{}: unresolved", report.context.identifier()),
    }
}

pub fn format_resolve_report_json(report: &ResolveReport) -> Result<String, SizehintError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// One URL or HTML result in the requested format.
pub fn format_rewrite_result(
    input: &str,
    output: &str,
    format: &str,
) -> Result<String, SizehintError> {
    if format == "json" {
        let out = serde_json::json!({
            "input": input,
            "output": output,
            "changed": input != output,
        });
        Ok(serde_json::to_string_pretty(&out)?)
    } else {
        Ok(output.to_string())
    }
}

/// Rewritten HTML; the json form also counts the catalog `src` attributes
/// found in the input.
pub fn format_html_rewrite_result(
    input: &str,
    output: &str,
    format: &str,
) -> Result<String, SizehintError> {
    if format == "json" {
        let out = serde_json::json!({
            "output": output,
            "catalog_srcs": count_catalog_srcs(input),
            "changed": input != output,
        });
        Ok(serde_json::to_string_pretty(&out)?)
    } else {
        Ok(output.to_string())
    }
}

fn table_line(label: &str, table: &RuleTable) -> String {
    format!(
        "  {}: {} ({}), {} rules{}",
        label,
        table.name,
        table.version,
        table.rules.len(),
        if table.is_total() { ", total" } else { "" }
    )
}

pub fn format_table_summary_text(tables: &RuleTables, errors: &[ValidationError]) -> String {
    let mut s = String::from("Rule tables:");
    s.push_str(&format!(
        "\n  area_overrides: {} entries",
        tables.area_overrides.len()
    ));
    s.push_str(&format!(
        "\n  config_mapping: {} entries",
        tables.config_mapping.len()
    ));
    s.push('\n');
    s.push_str(&table_line("area_patterns", &tables.area_patterns));
    s.push('\n');
    s.push_str(&table_line("path_patterns", &tables.path_patterns));

    if errors.is_empty() {
        s.push_str("\n\nAll checks passed");
    } else {
        s.push_str(&format!("\n\nErrors ({}):", errors.len()));
        for e in errors {
            s.push_str(&format!("\n  - {}", e));
        }
    }
    s
}

pub fn format_table_summary_json(
    tables: &RuleTables,
    errors: &[ValidationError],
) -> Result<String, SizehintError> {
    let out = serde_json::json!({
        "tables": tables,
        "valid": errors.is_empty(),
        "errors": errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
    });
    Ok(serde_json::to_string_pretty(&out)?)
}
