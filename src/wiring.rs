//! Which dashboard inputs feed which chart.
//!
//! Every chart is produced by a [`Subscription`]: a list of inputs, a pure
//! computation and the output slot it fills. The table is fixed at compile
//! time; [`subscribers`] answers "what must be recomputed when this input
//! changes".

use crate::chart::{ChartColors, PieChart, ScatterChart, build_pie_chart, build_scatter_chart};
use crate::data::aggregate::{ScatterResult, compute_proportions, compute_scatter};
use crate::data::filter::{FilterState, PayloadRange, SiteSelection};
use crate::data::model::LaunchDataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputId {
    SiteDropdown,
    PayloadSlider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputId {
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

/// A computed chart, ready for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutput {
    Pie(PieChart),
    Scatter {
        chart: ScatterChart,
        /// Launches behind the chart, for the table view.
        result: ScatterResult,
    },
}

pub type Compute = fn(&LaunchDataset, &ChartColors, &FilterState) -> ChartOutput;

pub struct Subscription {
    pub inputs: &'static [InputId],
    pub output: OutputId,
    pub compute: Compute,
}

pub static SUBSCRIPTIONS: &[Subscription] = &[
    Subscription {
        inputs: &[InputId::SiteDropdown],
        output: OutputId::SuccessPieChart,
        compute: success_pie_chart,
    },
    Subscription {
        inputs: &[InputId::SiteDropdown, InputId::PayloadSlider],
        output: OutputId::SuccessPayloadScatterChart,
        compute: success_payload_scatter_chart,
    },
];

/// Subscriptions that listen on `input`.
pub fn subscribers(input: InputId) -> impl Iterator<Item = &'static Subscription> {
    SUBSCRIPTIONS
        .iter()
        .filter(move |sub| sub.inputs.contains(&input))
}

fn success_pie_chart(dataset: &LaunchDataset, colors: &ChartColors, filters: &FilterState) -> ChartOutput {
    let result = compute_proportions(&dataset.records, &filters.selected_site);
    ChartOutput::Pie(build_pie_chart(&result, colors))
}

fn success_payload_scatter_chart(
    dataset: &LaunchDataset,
    colors: &ChartColors,
    filters: &FilterState,
) -> ChartOutput {
    let result = compute_scatter(&dataset.records, &filters.selected_site, filters.payload_range);
    ChartOutput::Scatter {
        chart: build_scatter_chart(&result, colors),
        result,
    }
}

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    SiteChanged(SiteSelection),
    PayloadRangeChanged(PayloadRange),
}

impl FilterEvent {
    /// The input this event comes from.
    pub fn source(&self) -> InputId {
        match self {
            FilterEvent::SiteChanged(_) => InputId::SiteDropdown,
            FilterEvent::PayloadRangeChanged(_) => InputId::PayloadSlider,
        }
    }

    /// Write the event into `filters`. Returns `false` when nothing changed.
    pub fn apply(self, filters: &mut FilterState) -> bool {
        match self {
            FilterEvent::SiteChanged(site) => {
                if filters.selected_site == site {
                    return false;
                }
                filters.selected_site = site;
            }
            FilterEvent::PayloadRangeChanged(range) => {
                if filters.payload_range == range {
                    return false;
                }
                filters.payload_range = range;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::init_filter_state;
    use crate::data::model::fixtures::*;

    #[test]
    fn site_dropdown_feeds_both_charts() {
        let outputs: Vec<OutputId> = subscribers(InputId::SiteDropdown).map(|s| s.output).collect();
        assert_eq!(
            outputs,
            vec![OutputId::SuccessPieChart, OutputId::SuccessPayloadScatterChart]
        );
    }

    #[test]
    fn payload_slider_feeds_only_scatter() {
        let outputs: Vec<OutputId> = subscribers(InputId::PayloadSlider).map(|s| s.output).collect();
        assert_eq!(outputs, vec![OutputId::SuccessPayloadScatterChart]);
    }

    #[test]
    fn computations_produce_matching_output_kinds() {
        let ds = sample_dataset();
        let colors = ChartColors::for_dataset(&ds);
        let filters = init_filter_state(&ds);
        for sub in SUBSCRIPTIONS {
            let out = (sub.compute)(&ds, &colors, &filters);
            match (sub.output, out) {
                (OutputId::SuccessPieChart, ChartOutput::Pie(pie)) => {
                    assert_eq!(pie.title, "Success for all sites");
                }
                (OutputId::SuccessPayloadScatterChart, ChartOutput::Scatter { chart, result }) => {
                    assert_eq!(result.len(), ds.len());
                    assert_eq!(chart.point_count(), ds.len());
                }
                (id, other) => panic!("{id:?} produced {other:?}"),
            }
        }
    }

    #[test]
    fn events_report_source_and_change() {
        let ds = sample_dataset();
        let mut filters = init_filter_state(&ds);

        let ev = FilterEvent::SiteChanged(SiteSelection::All);
        assert_eq!(ev.source(), InputId::SiteDropdown);
        assert!(!ev.apply(&mut filters));

        let ev = FilterEvent::PayloadRangeChanged(PayloadRange::new(1000.0, 2000.0));
        assert_eq!(ev.source(), InputId::PayloadSlider);
        assert!(ev.clone().apply(&mut filters));
        assert!(!ev.apply(&mut filters));
        assert_eq!(filters.payload_range, PayloadRange::new(1000.0, 2000.0));
    }
}
