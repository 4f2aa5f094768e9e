//! Aggregations behind the two dashboard charts.
//!
//! Both functions are pure: the result depends only on the records and the
//! filter values passed in.

use std::fmt;

use super::filter::{PayloadRange, SiteSelection, filter_by_payload};
use super::model::{LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Proportion result
// ---------------------------------------------------------------------------

/// Outcome bucket used by the single-site breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeLabel {
    Failed,
    Success,
}

impl From<Outcome> for OutcomeLabel {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => OutcomeLabel::Success,
            Outcome::Failure => OutcomeLabel::Failed,
        }
    }
}

impl fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeLabel::Success => write!(f, "Success"),
            OutcomeLabel::Failed => write!(f, "Failed"),
        }
    }
}

/// What a proportion segment stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentKey {
    /// Successful launches at one site (all-sites view).
    Site(String),
    /// Success or failure count at the selected site.
    Outcome(OutcomeLabel),
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKey::Site(s) => write!(f, "{s}"),
            SegmentKey::Outcome(o) => write!(f, "{o}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub key: SegmentKey,
    pub count: u64,
}

/// Result of [`compute_proportions`].
///
/// In the all-sites view every segment is a site and its value is the
/// number of successful launches there. With a site selected the segments
/// are exactly `Failed` and `Success` and carry fixed colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProportionResult {
    pub title: String,
    pub segments: Vec<Segment>,
}

#[cfg(test)]
impl ProportionResult {
    pub fn total(&self) -> u64 {
        self.segments.iter().map(|s| s.count).sum()
    }

    pub fn count_for(&self, key: &SegmentKey) -> Option<u64> {
        self.segments.iter().find(|s| s.key == *key).map(|s| s.count)
    }
}

/// Break launches down for the pie chart.
///
/// * `All`: one segment per site (first-appearance order) counting successes.
/// * `Site(s)`: exactly two segments, `Failed` then `Success`, counting the
///   launches at `s`. Zero counts are kept. An unknown site yields two zero
///   segments.
pub fn compute_proportions(records: &[LaunchRecord], selected_site: &SiteSelection) -> ProportionResult {
    match selected_site {
        SiteSelection::All => {
            let mut segments: Vec<Segment> = Vec::new();
            for rec in records {
                let pos = match segments
                    .iter()
                    .position(|s| matches!(&s.key, SegmentKey::Site(site) if *site == rec.site))
                {
                    Some(pos) => pos,
                    None => {
                        segments.push(Segment {
                            key: SegmentKey::Site(rec.site.clone()),
                            count: 0,
                        });
                        segments.len() - 1
                    }
                };
                segments[pos].count += u64::from(rec.outcome.class());
            }
            ProportionResult {
                title: "Success for all sites".to_string(),
                segments,
            }
        }
        SiteSelection::Site(site) => {
            let mut failed = 0u64;
            let mut success = 0u64;
            for rec in records.iter().filter(|r| r.site == *site) {
                match OutcomeLabel::from(rec.outcome) {
                    OutcomeLabel::Failed => failed += 1,
                    OutcomeLabel::Success => success += 1,
                }
            }
            ProportionResult {
                title: format!("Success for {site}"),
                segments: vec![
                    Segment {
                        key: SegmentKey::Outcome(OutcomeLabel::Failed),
                        count: failed,
                    },
                    Segment {
                        key: SegmentKey::Outcome(OutcomeLabel::Success),
                        count: success,
                    },
                ],
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter result
// ---------------------------------------------------------------------------

/// Result of [`compute_scatter`]: the launches to plot, in input order.
/// Points are coloured by `booster_version_category`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterResult {
    pub title: String,
    pub records: Vec<LaunchRecord>,
}

impl ScatterResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Launches inside `payload_range`, restricted to the selected site.
pub fn compute_scatter(
    records: &[LaunchRecord],
    selected_site: &SiteSelection,
    payload_range: PayloadRange,
) -> ScatterResult {
    if !payload_range.is_valid() {
        log::warn!(
            "Ignoring invalid payload range [{}, {}]",
            payload_range.low,
            payload_range.high
        );
    }

    let records: Vec<LaunchRecord> = filter_by_payload(records, payload_range.low, payload_range.high)
        .into_iter()
        .filter(|rec| selected_site.matches(rec))
        .cloned()
        .collect();

    let title = match selected_site {
        SiteSelection::All => "Payload and Success for All sites".to_string(),
        SiteSelection::Site(site) => format!("Payload and Success for {site}"),
    };

    ScatterResult { title, records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchDataset;
    use crate::data::model::fixtures::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn full_range_scatter_is_identity(records in arb_records()) {
            let ds = LaunchDataset::from_records(records.clone()).unwrap();
            let result = compute_scatter(
                &records,
                &SiteSelection::All,
                PayloadRange::new(ds.min_payload, ds.max_payload),
            );
            prop_assert_eq!(result.records, records);
        }

        #[test]
        fn site_split_sums_to_launches_at_site(
            records in arb_records(),
            pick in any::<prop::sample::Index>(),
        ) {
            let site = records[pick.index(records.len())].site.clone();
            let at_site: Vec<&LaunchRecord> = records.iter().filter(|r| r.site == site).collect();
            let successes = at_site.iter().filter(|r| r.outcome == Outcome::Success).count() as u64;

            let result = compute_proportions(&records, &SiteSelection::Site(site.clone()));
            prop_assert_eq!(result.segments.len(), 2);
            prop_assert_eq!(result.total(), at_site.len() as u64);
            prop_assert_eq!(
                result.count_for(&SegmentKey::Outcome(OutcomeLabel::Success)),
                Some(successes)
            );
        }

        #[test]
        fn all_sites_segments_follow_dataset_sites(records in arb_records()) {
            let ds = LaunchDataset::from_records(records.clone()).unwrap();
            let result = compute_proportions(&records, &SiteSelection::All);
            let keys: Vec<SegmentKey> = result.segments.iter().map(|s| s.key.clone()).collect();
            let expected: Vec<SegmentKey> = ds.sites.iter().cloned().map(SegmentKey::Site).collect();
            prop_assert_eq!(keys, expected);
            let successes = records.iter().filter(|r| r.outcome == Outcome::Success).count() as u64;
            prop_assert_eq!(result.total(), successes);
        }

        #[test]
        fn scatter_is_deterministic_and_respects_filters(
            records in arb_records(),
            range in arb_range(),
            pick in any::<prop::sample::Index>(),
        ) {
            let selection = SiteSelection::Site(records[pick.index(records.len())].site.clone());
            let first = compute_scatter(&records, &selection, range);
            let second = compute_scatter(&records, &selection, range);
            prop_assert_eq!(&first, &second);
            prop_assert!(first
                .records
                .iter()
                .all(|r| selection.matches(r) && range.contains(r.payload_mass_kg)));
        }
    }

    fn ksc() -> SiteSelection {
        SiteSelection::Site("KSC LC-39A".to_string())
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let records = sample_records();
        let result = compute_proportions(&records, &SiteSelection::All);

        assert_eq!(result.title, "Success for all sites");
        let counts: Vec<(String, u64)> = result
            .segments
            .iter()
            .map(|s| (s.key.to_string(), s.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("CCAFS LC-40".to_string(), 1),
                ("VAFB SLC-4E".to_string(), 1),
                ("KSC LC-39A".to_string(), 2),
                ("CCAFS SLC-40".to_string(), 1),
            ]
        );
        assert!(result
            .segments
            .iter()
            .all(|s| matches!(s.key, SegmentKey::Site(_))));
    }

    #[test]
    fn all_sites_keeps_site_without_successes() {
        let records = vec![
            launch("A", 1.0, "FT", 0),
            launch("B", 2.0, "FT", 1),
        ];
        let result = compute_proportions(&records, &SiteSelection::All);
        assert_eq!(result.count_for(&SegmentKey::Site("A".into())), Some(0));
        assert_eq!(result.count_for(&SegmentKey::Site("B".into())), Some(1));
    }

    #[test]
    fn single_site_splits_success_and_failure() {
        let records = sample_records();
        let result = compute_proportions(&records, &ksc());

        assert_eq!(result.title, "Success for KSC LC-39A");
        assert_eq!(result.segments.len(), 2);
        assert_eq!(
            result.count_for(&SegmentKey::Outcome(OutcomeLabel::Success)),
            Some(2)
        );
        assert_eq!(
            result.count_for(&SegmentKey::Outcome(OutcomeLabel::Failed)),
            Some(1)
        );
        let at_site = records.iter().filter(|r| r.site == "KSC LC-39A").count() as u64;
        assert_eq!(result.total(), at_site);
    }

    #[test]
    fn single_site_keeps_zero_bucket() {
        let records = vec![launch("A", 1.0, "FT", 1), launch("A", 2.0, "FT", 1)];
        let result = compute_proportions(&records, &SiteSelection::Site("A".into()));
        assert_eq!(
            result.count_for(&SegmentKey::Outcome(OutcomeLabel::Failed)),
            Some(0)
        );
        assert_eq!(result.total(), 2);
    }

    #[test]
    fn unknown_site_yields_zero_totals() {
        let records = sample_records();
        let result = compute_proportions(&records, &SiteSelection::Site("Boca Chica".into()));
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.total(), 0);
        assert_eq!(result.title, "Success for Boca Chica");
    }

    #[test]
    fn full_range_scatter_returns_everything() {
        let ds = sample_dataset();
        let result = compute_scatter(
            &ds.records,
            &SiteSelection::All,
            PayloadRange::new(ds.min_payload, ds.max_payload),
        );
        assert_eq!(result.title, "Payload and Success for All sites");
        assert_eq!(result.records, ds.records);
    }

    #[test]
    fn scatter_range_across_all_sites() {
        let records = sample_records();
        let result = compute_scatter(&records, &SiteSelection::All, PayloadRange::new(2000.0, 3000.0));
        assert!(!result.is_empty());
        assert!(result
            .records
            .iter()
            .all(|r| (2000.0..=3000.0).contains(&r.payload_mass_kg)));
        let sites: Vec<&str> = result.records.iter().map(|r| r.site.as_str()).collect();
        assert_eq!(
            sites,
            vec!["CCAFS LC-40", "KSC LC-39A", "CCAFS SLC-40", "CCAFS SLC-40"]
        );
    }

    #[test]
    fn scatter_restricts_to_selected_site() {
        let records = sample_records();
        let result = compute_scatter(&records, &ksc(), PayloadRange::new(0.0, 10000.0));
        assert_eq!(result.title, "Payload and Success for KSC LC-39A");
        assert_eq!(result.len(), 3);
        assert!(result.records.iter().all(|r| r.site == "KSC LC-39A"));
    }

    #[test]
    fn scatter_with_no_matches_is_empty() {
        let records = vec![
            launch("VAFB SLC-4E", 9600.0, "FT", 1),
            launch("VAFB SLC-4E", 3000.0, "v1.1", 0),
            launch("KSC LC-39A", 200.0, "FT", 1),
        ];
        let result = compute_scatter(
            &records,
            &SiteSelection::Site("VAFB SLC-4E".into()),
            PayloadRange::new(0.0, 500.0),
        );
        assert!(result.is_empty());
        assert_eq!(result.title, "Payload and Success for VAFB SLC-4E");
    }

    #[test]
    fn aggregators_are_deterministic() {
        let records = sample_records();
        let range = PayloadRange::new(500.0, 6000.0);
        assert_eq!(
            compute_proportions(&records, &ksc()),
            compute_proportions(&records, &ksc())
        );
        assert_eq!(
            compute_proportions(&records, &SiteSelection::All),
            compute_proportions(&records, &SiteSelection::All)
        );
        assert_eq!(
            compute_scatter(&records, &SiteSelection::All, range),
            compute_scatter(&records, &SiteSelection::All, range)
        );
    }
}
