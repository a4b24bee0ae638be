//! Main analysis pipeline.
//!
//! `Pipeline` composes the stages `load → normalize → coerce → filter →
//! aggregate`. Each stage receives the previous table snapshot and returns
//! a new one; nothing is shared between runs, so re-running over the same
//! file yields the same result.

use crate::aggregator::aggregate_by_brand;
use crate::cleaner::{coerce_fields, filter_ranges, missing_renamed_columns, normalize_schema};
use crate::config::PipelineConfig;
use crate::error::{AnalysisError, Result, ResultExt};
use crate::loader::load_listings;
use crate::pipeline::progress::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate,
};
use crate::schema::target_name;
use crate::types::{AnalysisResult, PipelineSummary};
use crate::utils::{column_names, has_column};
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// The listings analysis pipeline.
///
/// Use [`Pipeline::builder()`] to create a pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use autos_analysis::{Pipeline, PipelineConfig};
///
/// let result = Pipeline::builder()
///     .config(PipelineConfig::builder().input_path("autos.csv").build()?)
///     .on_progress(|update| println!("[{:.0}%] {}", update.progress * 100.0, update.message))
///     .build()?
///     .run()?;
///
/// for brand in &result.brands.brands {
///     println!("{}: {} / {}km", brand.brand, brand.mean_price, brand.mean_mileage);
/// }
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured input file and process it.
    ///
    /// # Errors
    ///
    /// Fails on the first fatal error: an unreadable or undecodable file, a
    /// missing required column, or a value that cannot be coerced.
    pub fn run(&self) -> Result<AnalysisResult> {
        let start_time = Instant::now();

        self.report_progress(ProgressUpdate::new(
            PipelineStage::Loading,
            0.0,
            format!("Loading {}", self.config.input_path.display()),
        ));

        let df = match load_listings(&self.config.input_path, &self.config.encoding) {
            Ok(df) => df,
            Err(e) => return Err(self.fail(e)),
        };

        self.report_progress(
            ProgressUpdate::new(PipelineStage::Loading, 1.0, "Listings loaded").with_rows(df.height()),
        );

        let mut result = self.process(df)?;
        result.summary.duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(result)
    }

    /// Process an already-loaded listings table.
    pub fn process(&self, df: DataFrame) -> Result<AnalysisResult> {
        match self.process_internal(df) {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Aggregated {} brands",
                    result.brands.brands.len()
                )));
                Ok(result)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&self, e: AnalysisError) -> AnalysisError {
        self.report_progress(ProgressUpdate::failed(e.to_string()));
        error!("Pipeline error: {}", e);
        e
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn process_internal(&self, df: DataFrame) -> Result<AnalysisResult> {
        let start_time = Instant::now();
        info!("Starting listings pipeline...");

        let mut summary = PipelineSummary::new();
        summary.rows_before = df.height();
        summary.columns_before = df.width();
        summary.record(PipelineStage::Loading, &df);
        let input_columns = column_names(&df);

        // Step 1: Normalize schema
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Normalizing,
            0.0,
            "Renaming columns...",
        ));
        info!("Step 1: Normalizing schema...");

        let df = normalize_schema(&df).context("Normalizing schema")?;

        summary.missing_columns = missing_renamed_columns(&df)
            .into_iter()
            .map(String::from)
            .collect();
        if !summary.missing_columns.is_empty() {
            warn!("Columns missing after rename: {:?}", summary.missing_columns);
        }
        summary.record(PipelineStage::Normalizing, &df);
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Normalizing,
            1.0,
            format!("{} columns retained", df.width()),
        ));

        // Step 2: Coerce decorated fields
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Coercing,
            0.0,
            "Coercing price and mileage...",
        ));
        info!("Step 2: Coercing numeric fields...");

        let df = coerce_fields(&df).context("Coercing fields")?;

        summary.record(PipelineStage::Coercing, &df);
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Coercing,
            1.0,
            "Numeric fields coerced",
        ));

        // Step 3: Range filter
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Filtering,
            0.0,
            "Filtering price and registration year...",
        ));
        info!("Step 3: Filtering implausible rows...");

        let rows_before_filter = df.height();
        let df = filter_ranges(&df, &self.config.bounds).context("Filtering ranges")?;
        let rows_removed = rows_before_filter.saturating_sub(df.height());
        info!(
            "Removed {} of {} rows outside price/year bounds",
            rows_removed, rows_before_filter
        );

        summary.record(PipelineStage::Filtering, &df);
        self.report_progress(
            ProgressUpdate::new(
                PipelineStage::Filtering,
                1.0,
                format!("Removed {} rows", rows_removed),
            )
            .with_rows(df.height()),
        );

        // Step 4: Aggregate
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Aggregating,
            0.0,
            "Aggregating by brand...",
        ));
        info!("Step 4: Aggregating by brand...");

        let brands = aggregate_by_brand(
            &df,
            self.config.brand_share_threshold,
            self.config.sort_by,
        )
        .context("Aggregating by brand")?;

        summary.record(PipelineStage::Aggregating, &df);
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Aggregating,
            1.0,
            format!("{} brands above threshold", brands.brands.len()),
        ));

        summary.rows_after = df.height();
        summary.columns_after = df.width();
        summary.dropped_columns = input_columns
            .into_iter()
            .filter(|name| !has_column(&df, name) && target_name(name).is_none())
            .collect();
        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        debug!(
            "Pipeline finished: {} -> {} rows, {} -> {} columns",
            summary.rows_before, summary.rows_after, summary.columns_before, summary.columns_after
        );

        Ok(AnalysisResult {
            cleaned: df,
            brands,
            summary,
        })
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
