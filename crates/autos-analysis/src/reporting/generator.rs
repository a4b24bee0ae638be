use crate::config::AggregateOrder;
use crate::types::{AnalysisResult, BrandAggregate, PipelineSummary};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

// ============================================================================
// Report Types
// ============================================================================

/// Report of one pipeline run, used for `--json` output and the
/// human-readable summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    pub summary: PipelineSummary,
    /// Share a brand had to exceed to be aggregated
    pub brand_share_threshold: f64,
    pub sorted_by: AggregateOrder,
    pub brands: Vec<BrandAggregate>,
}

// ============================================================================
// Report Generator
// ============================================================================

pub struct ReportGenerator;

impl ReportGenerator {
    /// Build a report from pipeline results.
    pub fn build_report(input_file: &str, result: &AnalysisResult) -> AnalysisReport {
        AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            summary: result.summary.clone(),
            brand_share_threshold: result.brands.threshold,
            sorted_by: result.brands.order,
            brands: result.brands.brands.clone(),
        }
    }

    /// Render the brand aggregates as a fixed-width table.
    pub fn render_brand_table(brands: &[BrandAggregate]) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{:<16} {:>9} {:>8} {:>12} {:>14}",
            "Brand", "Listings", "Share", "Mean price", "Mean mileage"
        );
        let _ = writeln!(out, "{}", "-".repeat(63));

        for brand in brands {
            let _ = writeln!(
                out,
                "{:<16} {:>9} {:>7.1}% {:>12} {:>14}",
                truncate_str(&brand.brand, 16),
                brand.listings,
                brand.share * 100.0,
                brand.mean_price,
                brand.mean_mileage
            );
        }

        out
    }

    /// Render the full human-readable summary.
    pub fn render_summary(report: &AnalysisReport) -> String {
        let summary = &report.summary;
        let mut out = String::new();

        let _ = writeln!(out, "{}", "=".repeat(63));
        let _ = writeln!(out, "USED-CAR LISTINGS BY BRAND");
        let _ = writeln!(out, "{}", "=".repeat(63));
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Input: {} ({} rows x {} columns)",
            report.input_file, summary.rows_before, summary.columns_before
        );
        let _ = writeln!(
            out,
            "Cleaned: {} rows x {} columns ({} rows removed, {:.1}%)",
            summary.rows_after,
            summary.columns_after,
            summary.rows_removed(),
            summary.rows_removed_percentage()
        );
        if !summary.dropped_columns.is_empty() {
            let _ = writeln!(out, "Dropped columns: {}", summary.dropped_columns.join(", "));
        }
        let _ = writeln!(out, "Duration: {}ms", summary.duration_ms);
        let _ = writeln!(out);

        let order = match report.sorted_by {
            AggregateOrder::MeanPrice => "mean price",
            AggregateOrder::MeanMileage => "mean mileage",
        };
        let _ = writeln!(
            out,
            "Brands above {:.0}% of listings, by {}:",
            report.brand_share_threshold * 100.0,
            order
        );
        let _ = writeln!(out);

        if report.brands.is_empty() {
            let _ = writeln!(out, "  (no brand exceeds the threshold)");
        } else {
            out.push_str(&Self::render_brand_table(&report.brands));
        }
        let _ = writeln!(out, "{}", "=".repeat(63));

        out
    }
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
