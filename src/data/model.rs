use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` flag of a launch
// ---------------------------------------------------------------------------

/// Launch result, stored in the source data as `class` 1 / 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Map the numeric `class` flag onto an outcome.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The numeric `class` flag (used as the scatter y-axis).
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// RawLaunchRow – one row as it appears on disk
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";

/// Columns every dataset must provide. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_BOOSTER_CATEGORY,
    COL_CLASS,
];

/// Untyped row shared by the CSV and JSON loaders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    pub site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
    #[serde(rename = "class")]
    pub class: i64,
}

// ---------------------------------------------------------------------------
// LaunchRecord – one validated row
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub booster_version_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    /// Validate a raw row. `row` is the zero-based data row, for error messages.
    pub fn from_raw(raw: RawLaunchRow, row: usize) -> Result<Self, DatasetError> {
        let outcome = Outcome::from_class(raw.class).ok_or(DatasetError::InvalidClass {
            row,
            value: raw.class,
        })?;
        if !raw.payload_mass_kg.is_finite() {
            return Err(DatasetError::InvalidPayload {
                row,
                value: raw.payload_mass_kg,
            });
        }
        Ok(LaunchRecord {
            site: raw.site,
            payload_mass_kg: raw.payload_mass_kg,
            booster_version_category: raw.booster_version_category,
            outcome,
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed bounds and category indices.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches, in file order.
    pub records: Vec<LaunchRecord>,
    /// Smallest payload mass in the dataset.
    pub min_payload: f64,
    /// Largest payload mass in the dataset.
    pub max_payload: f64,
    /// Distinct launch sites in order of first appearance.
    pub sites: Vec<String>,
    /// Distinct booster version categories in order of first appearance.
    pub booster_categories: Vec<String>,
}

impl LaunchDataset {
    /// Build bounds and indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();

        for rec in &records {
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
            if !booster_categories.contains(&rec.booster_version_category) {
                booster_categories.push(rec.booster_version_category.clone());
            }
        }

        Ok(LaunchDataset {
            records,
            min_payload,
            max_payload,
            sites,
            booster_categories,
        })
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::data::filter::PayloadRange;
    use proptest::prelude::*;

    pub fn launch(site: &str, payload: f64, booster: &str, class: i64) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            booster_version_category: booster.to_string(),
            outcome: Outcome::from_class(class).expect("fixture class must be 0 or 1"),
        }
    }

    /// A small dataset shaped like the real launch table.
    pub fn sample_records() -> Vec<LaunchRecord> {
        vec![
            launch("CCAFS LC-40", 0.0, "v1.0", 0),
            launch("CCAFS LC-40", 525.0, "v1.0", 0),
            launch("CCAFS LC-40", 2395.0, "FT", 1),
            launch("VAFB SLC-4E", 500.0, "v1.1", 0),
            launch("VAFB SLC-4E", 9600.0, "FT", 1),
            launch("KSC LC-39A", 2490.0, "FT", 1),
            launch("KSC LC-39A", 5300.0, "FT", 1),
            launch("KSC LC-39A", 6070.0, "B4", 0),
            launch("CCAFS SLC-40", 3000.0, "B5", 1),
            launch("CCAFS SLC-40", 2000.0, "B4", 0),
        ]
    }

    pub fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(sample_records()).expect("fixture dataset is valid")
    }

    const ARB_SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];
    const ARB_BOOSTERS: [&str; 5] = ["v1.0", "v1.1", "FT", "B4", "B5"];

    /// Payloads are whole hundreds of kg so equal payloads turn up often.
    pub fn arb_record() -> impl Strategy<Value = LaunchRecord> {
        (0..ARB_SITES.len(), 0u32..=100, 0..ARB_BOOSTERS.len(), 0i64..=1).prop_map(
            |(site, hundreds, booster, class)| {
                launch(ARB_SITES[site], f64::from(hundreds) * 100.0, ARB_BOOSTERS[booster], class)
            },
        )
    }

    pub fn arb_records() -> impl Strategy<Value = Vec<LaunchRecord>> {
        prop::collection::vec(arb_record(), 1..60)
    }

    /// Ranges with `low <= high` covering the generated payloads and a bit beyond.
    pub fn arb_range() -> impl Strategy<Value = PayloadRange> {
        (0u32..=110, 0u32..=110).prop_map(|(a, b)| {
            PayloadRange::new(f64::from(a.min(b)) * 100.0, f64::from(a.max(b)) * 100.0)
        })
    }
}
