//! Report generation module.
//!
//! Reports are transient: they are printed as a table or as JSON on
//! stdout and never written to disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use autos_analysis::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_report("autos.csv", &result);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! println!("{}", ReportGenerator::render_brand_table(&report.brands));
//! ```

mod generator;

pub use generator::{AnalysisReport, ReportGenerator};
