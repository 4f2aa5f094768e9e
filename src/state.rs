use std::collections::BTreeMap;
use std::path::Path;

use crate::chart::{ChartColors, PieChart, ScatterChart};
use crate::config::DashboardConfig;
use crate::data::aggregate::ScatterResult;
use crate::data::filter::{FilterState, PayloadRange, SiteSelection, init_filter_state};
use crate::data::model::LaunchDataset;
use crate::layout::DashboardLayout;
use crate::wiring::{ChartOutput, FilterEvent, InputId, OutputId, SUBSCRIPTIONS, subscribers};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset. Read-only until a new file is opened.
    pub dataset: LaunchDataset,

    /// Colours fixed for the current dataset.
    pub colors: ChartColors,

    /// Page tree rendered by the UI.
    pub layout: DashboardLayout,

    /// Current dropdown and slider values.
    pub filters: FilterState,

    /// Latest result of every subscription.
    pub outputs: BTreeMap<OutputId, ChartOutput>,

    /// Text typed into the searchable site dropdown.
    pub site_search: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: LaunchDataset) -> Self {
        let mut state = AppState {
            colors: ChartColors::for_dataset(&dataset),
            layout: DashboardLayout::build(&config, &dataset),
            filters: init_filter_state(&dataset),
            config,
            dataset,
            outputs: BTreeMap::new(),
            site_search: String::new(),
            status_message: None,
        };
        state.recompute_all();
        state
    }

    /// Ingest a newly loaded dataset, reset filters and recompute every chart.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.colors = ChartColors::for_dataset(&dataset);
        self.layout = DashboardLayout::build(&self.config, &dataset);
        self.filters = init_filter_state(&dataset);
        self.dataset = dataset;
        self.site_search.clear();
        self.status_message = None;
        self.recompute_all();
    }

    /// Load a file and replace the dataset. On failure the current dataset
    /// stays and the error is shown in the status bar.
    pub fn open_file(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn site_changed(&mut self, site: SiteSelection) {
        self.dispatch(FilterEvent::SiteChanged(site));
    }

    pub fn payload_range_changed(&mut self, low: f64, high: f64) {
        self.dispatch(FilterEvent::PayloadRangeChanged(PayloadRange::new(low, high)));
    }

    /// Apply an input event and recompute the charts that listen on it.
    pub fn dispatch(&mut self, event: FilterEvent) {
        let source = event.source();
        match &event {
            FilterEvent::SiteChanged(SiteSelection::Site(site)) if !self.dataset.has_site(site) => {
                log::warn!("Unknown launch site '{site}' selected");
            }
            FilterEvent::PayloadRangeChanged(range)
                if range.is_valid()
                    && !range.overlaps(self.dataset.min_payload, self.dataset.max_payload) =>
            {
                log::warn!(
                    "Payload range [{}, {}] lies outside the dataset's [{}, {}]",
                    range.low,
                    range.high,
                    self.dataset.min_payload,
                    self.dataset.max_payload
                );
            }
            _ => {}
        }
        if !event.apply(&mut self.filters) {
            return;
        }
        self.recompute(source);
    }

    fn recompute(&mut self, input: InputId) {
        for sub in subscribers(input) {
            log::debug!("{input:?} changed, recomputing {:?}", sub.output);
            let out = (sub.compute)(&self.dataset, &self.colors, &self.filters);
            self.outputs.insert(sub.output, out);
        }
    }

    fn recompute_all(&mut self) {
        self.outputs.clear();
        for sub in SUBSCRIPTIONS {
            let out = (sub.compute)(&self.dataset, &self.colors, &self.filters);
            self.outputs.insert(sub.output, out);
        }
    }

    pub fn pie_chart(&self, id: OutputId) -> Option<&PieChart> {
        match self.outputs.get(&id) {
            Some(ChartOutput::Pie(pie)) => Some(pie),
            _ => None,
        }
    }

    pub fn scatter_chart(&self, id: OutputId) -> Option<(&ScatterChart, &ScatterResult)> {
        match self.outputs.get(&id) {
            Some(ChartOutput::Scatter { chart, result }) => Some((chart, result)),
            _ => None,
        }
    }
}
