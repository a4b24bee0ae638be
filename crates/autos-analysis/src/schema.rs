//! Static analytical decisions for the used-car listings dataset.
//!
//! The rename table, the degenerate-column list and the range thresholds
//! were chosen once by inspecting the eBay Kleinanzeigen sample. They are
//! kept here as plain data so the decisions stay auditable and separate
//! from the code that applies them. None of them is recomputed from the
//! data at run time.

/// Default input file, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "autos.csv";

/// Character encoding of the source file.
pub const DEFAULT_ENCODING: &str = "latin-1";

/// Header of the source file, in file order.
pub const SOURCE_COLUMNS: [&str; 20] = [
    "dateCrawled",
    "name",
    "seller",
    "offerType",
    "price",
    "abtest",
    "vehicleType",
    "yearOfRegistration",
    "gearbox",
    "powerPS",
    "model",
    "odometer",
    "monthOfRegistration",
    "fuelType",
    "brand",
    "notRepairedDamage",
    "dateCreated",
    "nrOfPictures",
    "postalCode",
    "lastSeen",
];

/// Source name to target name, one entry per retained column.
pub const COLUMN_RENAMES: [(&str, &str); 17] = [
    ("dateCrawled", "date_crawled"),
    ("name", "name"),
    ("price", "price"),
    ("abtest", "abtest"),
    ("vehicleType", "vehicle_type"),
    ("yearOfRegistration", "registration_year"),
    ("gearbox", "gear_box"),
    ("powerPS", "power_ps"),
    ("model", "model"),
    ("odometer", "odometer_km"),
    ("monthOfRegistration", "registration_month"),
    ("fuelType", "fuel_type"),
    ("brand", "brand"),
    ("notRepairedDamage", "unrepaired_damage"),
    ("dateCreated", "ad_created"),
    ("postalCode", "postal_code"),
    ("lastSeen", "last_seen"),
];

/// A column dropped because nearly every row holds the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateColumn {
    /// Name in the source header.
    pub source: &'static str,
    /// Snake-case name the column would carry after renaming.
    pub target: &'static str,
    /// What was observed in the sample.
    pub observation: &'static str,
}

/// `seller` and `offerType` hold one value in 49,999 of 50,000 rows;
/// `nrOfPictures` is zero everywhere.
pub const DEGENERATE_COLUMNS: [DegenerateColumn; 3] = [
    DegenerateColumn {
        source: "seller",
        target: "seller",
        observation: "single value in all but one row",
    },
    DegenerateColumn {
        source: "offerType",
        target: "offer_type",
        observation: "single value in all but one row",
    },
    DegenerateColumn {
        source: "nrOfPictures",
        target: "num_photos",
        observation: "zero in every row",
    },
];

/// A numeric field stored as text with a literal decoration around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoratedField {
    /// Column name after renaming.
    pub column: &'static str,
    /// Literal currency symbol or unit suffix.
    pub decoration: &'static str,
}

pub const DECORATED_FIELDS: [DecoratedField; 2] = [
    DecoratedField {
        column: PRICE_COLUMN,
        decoration: "$",
    },
    DecoratedField {
        column: MILEAGE_COLUMN,
        decoration: "km",
    },
];

/// Thousands separator used by both decorated fields.
pub const THOUSANDS_SEPARATOR: char = ',';

/// Undecorated integer columns, parsed as-is.
///
/// Only the columns the range filter reads. `registration_month` and
/// `power_ps` stay text, blanks included.
pub const INTEGER_FIELDS: [&str; 1] = [REGISTRATION_YEAR_COLUMN];

pub const PRICE_COLUMN: &str = "price";
pub const MILEAGE_COLUMN: &str = "odometer_km";
pub const REGISTRATION_YEAR_COLUMN: &str = "registration_year";
pub const BRAND_COLUMN: &str = "brand";

/// Zero-priced listings are test or placeholder ads.
pub const PRICE_MIN: i64 = 1;

/// Sorted prices climb steadily to here, then jump to implausible values.
pub const PRICE_MAX: i64 = 351_000;

/// Earliest plausible first registration of a car.
pub const REGISTRATION_YEAR_MIN: i64 = 1900;

/// Crawl year. A car cannot be registered after it was seen listed.
pub const REGISTRATION_YEAR_MAX: i64 = 2016;

/// Brands must hold strictly more than this share of listings to be aggregated.
pub const BRAND_SHARE_THRESHOLD: f64 = 0.05;

/// Target name for a source column, if the column is retained.
pub fn target_name(source: &str) -> Option<&'static str> {
    COLUMN_RENAMES
        .iter()
        .find(|(from, _)| *from == source)
        .map(|(_, to)| *to)
}

/// The degenerate column a name refers to, in either naming convention.
pub fn degenerate_column(name: &str) -> Option<DegenerateColumn> {
    DEGENERATE_COLUMNS
        .iter()
        .find(|c| c.source == name || c.target == name)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_renames_cover_every_retained_source_column() {
        let retained: Vec<&str> = SOURCE_COLUMNS
            .iter()
            .copied()
            .filter(|c| degenerate_column(c).is_none())
            .collect();
        assert_eq!(retained.len(), COLUMN_RENAMES.len());
        for source in retained {
            assert!(target_name(source).is_some(), "{source} has no target name");
        }
    }

    #[test]
    fn test_rename_targets_are_unique() {
        let targets: HashSet<&str> = COLUMN_RENAMES.iter().map(|(_, to)| *to).collect();
        assert_eq!(targets.len(), COLUMN_RENAMES.len());
    }

    #[test]
    fn test_degenerate_columns_never_renamed() {
        for column in DEGENERATE_COLUMNS {
            assert_eq!(target_name(column.source), None);
            assert!(COLUMN_RENAMES.iter().all(|(_, to)| *to != column.target));
        }
    }

    #[test]
    fn test_degenerate_lookup_by_either_name() {
        let by_source = degenerate_column("nrOfPictures").unwrap();
        let by_target = degenerate_column("num_photos").unwrap();
        assert_eq!(by_source, by_target);
        assert_eq!(by_source.observation, "zero in every row");
        assert!(degenerate_column("price").is_none());
        assert!(DEGENERATE_COLUMNS.iter().all(|c| !c.observation.is_empty()));
    }

    #[test]
    fn test_working_columns_are_rename_targets() {
        let targets: HashSet<&str> = COLUMN_RENAMES.iter().map(|(_, to)| *to).collect();
        for field in DECORATED_FIELDS {
            assert!(targets.contains(field.column));
        }
        for field in INTEGER_FIELDS {
            assert!(targets.contains(field));
        }
        assert!(targets.contains(BRAND_COLUMN));
    }

    #[test]
    fn test_thresholds() {
        assert!(PRICE_MIN <= PRICE_MAX);
        assert!(REGISTRATION_YEAR_MIN <= REGISTRATION_YEAR_MAX);
        assert!(BRAND_SHARE_THRESHOLD > 0.0 && BRAND_SHARE_THRESHOLD < 1.0);
    }
}
