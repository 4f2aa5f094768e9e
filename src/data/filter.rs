use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Site selector
// ---------------------------------------------------------------------------

/// Value of the site dropdown. `All` means no site filter is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Whether a record passes this selector.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => record.site == *s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Closed payload interval `[low, high]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// `low <= high` and both ends are real numbers.
    pub fn is_valid(&self) -> bool {
        self.low <= self.high
    }

    /// Whether any payload in `[min, max]` can fall inside this range.
    pub fn overlaps(&self, min: f64, max: f64) -> bool {
        self.low <= max && min <= self.high
    }

    /// Inclusive at both ends, matching the range slider.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// The two dashboard inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub selected_site: SiteSelection,
    pub payload_range: PayloadRange,
}

/// Initialise a [`FilterState`] that shows everything: all sites and the
/// dataset's full payload span.
pub fn init_filter_state(dataset: &LaunchDataset) -> FilterState {
    FilterState {
        selected_site: SiteSelection::All,
        payload_range: PayloadRange::new(dataset.min_payload, dataset.max_payload),
    }
}

/// Return the records whose payload lies in `[low, high]`, in input order.
///
/// An inverted or NaN interval matches nothing.
pub fn filter_by_payload(records: &[LaunchRecord], low: f64, high: f64) -> Vec<&LaunchRecord> {
    let range = PayloadRange::new(low, high);
    records
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .collect()
}
