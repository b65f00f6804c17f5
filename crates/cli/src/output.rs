// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use rr_core::{format_elapsed, RunSummary};
use rr_engine::TableStatus;
use serde::Serialize;
use std::time::Duration;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `value` as pretty JSON, or the text rendering.
pub fn print<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text(value)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

pub fn format_summary(summary: &RunSummary) -> String {
    let elapsed = Duration::try_from_secs_f64(summary.elapsed_secs).unwrap_or_default();
    let mut out = String::new();
    out.push_str(&format!("Run {}\n", summary.run_id));
    out.push_str(&format!("  total:     {}\n", summary.total));
    out.push_str(&format!("  success:   {}\n", summary.success));
    out.push_str(&format!("  failed:    {}\n", summary.failed));
    out.push_str(&format!("  skipped:   {}\n", summary.skipped));
    if summary.retried > 0 {
        out.push_str(&format!(
            "  retried:   {} ({} recovered)\n",
            summary.retried, summary.recovered
        ));
    }
    if summary.restarts > 0 {
        out.push_str(&format!("  restarts:  {}\n", summary.restarts));
    }
    out.push_str(&format!("  success rate: {:.1}%\n", summary.success_rate));
    out.push_str(&format!("  elapsed:   {}\n", format_elapsed(elapsed)));
    if summary.failed_after_retry > 0 {
        out.push_str(&format!(
            "\n{} record(s) still failed; run again to retry them\n",
            summary.failed_after_retry
        ));
    }
    out
}

pub fn format_status(status: &TableStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!("total:     {}\n", status.total));
    out.push_str(&format!("resolved:  {}\n", status.resolved));
    out.push_str(&format!("pending:   {}\n", status.pending));
    out.push_str(&format!("failed:    {}\n", status.failed));
    out.push_str(&format!("skipped:   {}\n", status.skipped));
    out.push_str(&format!("blank key: {}\n", status.blank_key));
    out
}
