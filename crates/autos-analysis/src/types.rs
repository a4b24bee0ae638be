use crate::config::AggregateOrder;
use crate::pipeline::PipelineStage;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Mean statistics for one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandAggregate {
    pub brand: String,
    /// Number of listings for this brand in the filtered table
    pub listings: usize,
    /// Share of all filtered listings (0.0 - 1.0)
    pub share: f64,
    /// Arithmetic mean of `price`, truncated
    pub mean_price: i64,
    /// Arithmetic mean of `odometer_km`, truncated
    pub mean_mileage: i64,
}

/// Brand aggregates over the filtered listings, already ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSummary {
    /// Rows in the table the shares were computed over
    pub total_listings: usize,
    /// Share a brand had to exceed to be included
    pub threshold: f64,
    pub order: AggregateOrder,
    pub brands: Vec<BrandAggregate>,
}

impl BrandSummary {
    /// Look up a brand by name.
    pub fn get(&self, brand: &str) -> Option<&BrandAggregate> {
        self.brands.iter().find(|b| b.brand == brand)
    }

    pub fn brand_names(&self) -> Vec<&str> {
        self.brands.iter().map(|b| b.brand.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

/// Table shape after one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: PipelineStage,
    pub rows: usize,
    pub columns: usize,
}

/// Summary of what the pipeline did to the table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Total execution time in milliseconds
    pub duration_ms: u64,
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    /// Columns present in the input but not in the cleaned table
    pub dropped_columns: Vec<String>,
    /// Rename targets that never appeared
    pub missing_columns: Vec<String>,
    /// Shape after each stage, in execution order
    pub stages: Vec<StageRecord>,
}

impl PipelineSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: PipelineStage, df: &DataFrame) {
        self.stages.push(StageRecord {
            stage,
            rows: df.height(),
            columns: df.width(),
        });
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Percentage of input rows removed by the range filter.
    pub fn rows_removed_percentage(&self) -> f32 {
        if self.rows_before == 0 {
            0.0
        } else {
            (self.rows_removed() as f32 / self.rows_before as f32) * 100.0
        }
    }
}

/// Output of a full pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// The normalized, coerced and filtered listings
    pub cleaned: DataFrame,
    pub brands: BrandSummary,
    pub summary: PipelineSummary,
}
