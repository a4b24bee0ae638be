//! Per-brand mean price and mean mileage.
//!
//! Only brands holding strictly more than the threshold share of the
//! filtered listings are aggregated. The brand universe is derived from
//! the same table being averaged, so every aggregated group is non-empty.
//!
//! Rows with a null brand stay in the denominator of every share. Shares
//! are therefore fractions of the whole filtered table, not of the rows
//! that name a brand, and need not sum to one.

use crate::config::AggregateOrder;
use crate::error::Result;
use crate::schema::{BRAND_COLUMN, MILEAGE_COLUMN, PRICE_COLUMN};
use crate::types::{BrandAggregate, BrandSummary};
use crate::utils::require_column;
use polars::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// Compute mean price and mean mileage for each common brand.
///
/// Shares are taken over every row of `df`, including rows without a
/// brand; those rows never form a group of their own. Means are truncated
/// toward zero.
pub fn aggregate_by_brand(
    df: &DataFrame,
    threshold: f64,
    order: AggregateOrder,
) -> Result<BrandSummary> {
    require_column(df, BRAND_COLUMN)?;
    require_column(df, PRICE_COLUMN)?;
    require_column(df, MILEAGE_COLUMN)?;

    let total = df.height();

    let grouped = df
        .clone()
        .lazy()
        .filter(col(BRAND_COLUMN).is_not_null())
        .group_by([col(BRAND_COLUMN)])
        .agg([
            len().cast(DataType::UInt64).alias("listings"),
            col(PRICE_COLUMN).cast(DataType::Float64).mean().alias("mean_price"),
            col(MILEAGE_COLUMN).cast(DataType::Float64).mean().alias("mean_mileage"),
        ])
        .collect()?;

    let brands = grouped.column(BRAND_COLUMN)?.as_materialized_series().str()?;
    let counts = grouped.column("listings")?.as_materialized_series().u64()?;
    let mean_prices = grouped.column("mean_price")?.as_materialized_series().f64()?;
    let mean_mileages = grouped.column("mean_mileage")?.as_materialized_series().f64()?;

    let mut aggregates = Vec::new();
    for (((brand, count), price), mileage) in brands
        .into_iter()
        .zip(counts.into_iter())
        .zip(mean_prices.into_iter())
        .zip(mean_mileages.into_iter())
    {
        let (Some(brand), Some(count)) = (brand, count) else {
            continue;
        };
        let listings = count as usize;
        let share = listings as f64 / total as f64;
        if share <= threshold {
            debug!("Skipping '{}' ({:.2}% of listings)", brand, share * 100.0);
            continue;
        }

        aggregates.push(BrandAggregate {
            brand: brand.to_string(),
            listings,
            share,
            mean_price: price.unwrap_or_default().trunc() as i64,
            mean_mileage: mileage.unwrap_or_default().trunc() as i64,
        });
    }

    sort_aggregates(&mut aggregates, order);
    debug!(
        "Aggregated {} brands above {:.0}% share",
        aggregates.len(),
        threshold * 100.0
    );

    Ok(BrandSummary {
        total_listings: total,
        threshold,
        order,
        brands: aggregates,
    })
}

/// Sort descending by the chosen metric, then by brand name.
pub fn sort_aggregates(aggregates: &mut [BrandAggregate], order: AggregateOrder) {
    aggregates.sort_by(|a, b| {
        let by_metric: Ordering = match order {
            AggregateOrder::MeanPrice => b.mean_price.cmp(&a.mean_price),
            AggregateOrder::MeanMileage => b.mean_mileage.cmp(&a.mean_mileage),
        };
        by_metric.then_with(|| a.brand.cmp(&b.brand))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frame(rows: &[(&str, i64, i64)]) -> DataFrame {
        let brands: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let prices: Vec<i64> = rows.iter().map(|r| r.1).collect();
        let mileages: Vec<i64> = rows.iter().map(|r| r.2).collect();
        df!("brand" => brands, "price" => prices, "odometer_km" => mileages).unwrap()
    }

    #[test]
    fn test_audi_mean_price() {
        let df = frame(&[
            ("audi", 1_000, 150_000),
            ("audi", 2_000, 125_000),
            ("audi", 3_000, 100_000),
        ]);
        let summary = aggregate_by_brand(&df, 0.05, AggregateOrder::MeanPrice).unwrap();

        let audi = summary.get("audi").unwrap();
        assert_eq!(audi.mean_price, 2_000);
        assert_eq!(audi.mean_mileage, 125_000);
        assert_eq!(audi.listings, 3);
        assert_eq!(summary.total_listings, 3);
    }

    #[test]
    fn test_means_truncate() {
        let df = frame(&[("bmw", 1, 10), ("bmw", 2, 10), ("bmw", 2, 11)]);
        let summary = aggregate_by_brand(&df, 0.05, AggregateOrder::MeanPrice).unwrap();

        let bmw = summary.get("bmw").unwrap();
        assert_eq!(bmw.mean_price, 1); // 5 / 3
        assert_eq!(bmw.mean_mileage, 10); // 31 / 3
    }

    #[test]
    fn test_exact_threshold_share_excluded() {
        // "fiat" holds exactly 1 of 20 listings = 5.0%
        let mut rows = vec![("fiat", 500, 90_000)];
        rows.extend(std::iter::repeat_n(("opel", 1_500, 120_000), 19));
        let df = frame(&rows);

        let summary = aggregate_by_brand(&df, 0.05, AggregateOrder::MeanPrice).unwrap();
        assert_eq!(summary.brand_names(), vec!["opel"]);
    }

    #[test]
    fn test_just_above_threshold_included() {
        // 2 of 20 = 10%
        let mut rows = vec![("fiat", 500, 90_000), ("fiat", 700, 80_000)];
        rows.extend(std::iter::repeat_n(("opel", 1_500, 120_000), 18));
        let df = frame(&rows);

        let summary = aggregate_by_brand(&df, 0.05, AggregateOrder::MeanPrice).unwrap();
        assert_eq!(summary.brand_names(), vec!["opel", "fiat"]);
        assert_eq!(summary.get("fiat").unwrap().mean_price, 600);
    }

    #[test]
    fn test_sort_by_mileage() {
        let df = frame(&[
            ("audi", 9_000, 100_000),
            ("ford", 3_000, 140_000),
            ("bmw", 8_000, 130_000),
        ]);

        let by_price = aggregate_by_brand(&df, 0.05, AggregateOrder::MeanPrice).unwrap();
        assert_eq!(by_price.brand_names(), vec!["audi", "bmw", "ford"]);

        let by_mileage = aggregate_by_brand(&df, 0.05, AggregateOrder::MeanMileage).unwrap();
        assert_eq!(by_mileage.brand_names(), vec!["ford", "bmw", "audi"]);
    }

    #[test]
    fn test_ties_ordered_by_name() {
        let df = frame(&[("seat", 1_000, 1), ("audi", 1_000, 1)]);
        let summary = aggregate_by_brand(&df, 0.05, AggregateOrder::MeanPrice).unwrap();
        assert_eq!(summary.brand_names(), vec!["audi", "seat"]);
    }

    #[test]
    fn test_null_brand_counts_toward_total() {
        let df = df!(
            "brand" => [Some("audi"), None, None, None],
            "price" => [100i64, 200, 300, 400],
            "odometer_km" => [1i64, 2, 3, 4]
        )
        .unwrap();

        let summary = aggregate_by_brand(&df, 0.3, AggregateOrder::MeanPrice).unwrap();
        assert!(summary.is_empty()); // audi holds 25%

        let summary = aggregate_by_brand(&df, 0.2, AggregateOrder::MeanPrice).unwrap();
        assert_eq!(summary.brand_names(), vec!["audi"]);
        assert_eq!(summary.get("audi").unwrap().share, 0.25);
    }

    #[test]
    fn test_empty_table() {
        let df = frame(&[]);
        let summary = aggregate_by_brand(&df, 0.05, AggregateOrder::MeanPrice).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total_listings, 0);
    }
}
