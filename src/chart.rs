use eframe::egui::Color32;

use crate::color::{ColorMap, outcome_color};
use crate::data::aggregate::{ProportionResult, ScatterResult, SegmentKey};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Chart specifications handed to the renderer
// ---------------------------------------------------------------------------

/// Axis labels and legend visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct Styling {
    pub x_label: Option<&'static str>,
    pub y_label: Option<&'static str>,
    pub show_legend: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
    pub styling: Styling,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of slice `i` in `[0, 1]`; zero when the chart has no data.
    pub fn fraction(&self, i: usize) -> f64 {
        let total = self.total();
        match self.slices.get(i) {
            Some(slice) if total > 0.0 => slice.value / total,
            _ => 0.0,
        }
    }
}

/// One legend group of the scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub name: String,
    pub color: Color32,
    /// `[payload_mass_kg, class]`
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub series: Vec<ScatterSeries>,
    pub styling: Styling,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Colours fixed at dataset load.
#[derive(Debug, Clone)]
pub struct ChartColors {
    pub sites: ColorMap,
    pub boosters: ColorMap,
}

impl ChartColors {
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        ChartColors {
            sites: ColorMap::new(&dataset.sites),
            boosters: ColorMap::new(&dataset.booster_categories),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn build_pie_chart(result: &ProportionResult, colors: &ChartColors) -> PieChart {
    let slices = result
        .segments
        .iter()
        .map(|seg| {
            let color = match &seg.key {
                SegmentKey::Site(site) => colors.sites.color_for(site),
                SegmentKey::Outcome(label) => outcome_color(*label),
            };
            PieSlice {
                label: seg.key.to_string(),
                value: seg.count as f64,
                color,
            }
        })
        .collect();

    PieChart {
        title: result.title.clone(),
        slices,
        styling: Styling {
            x_label: None,
            y_label: None,
            show_legend: true,
        },
    }
}

/// Group scatter points by booster version category. Series follow the
/// first appearance of each category in the result.
pub fn build_scatter_chart(result: &ScatterResult, colors: &ChartColors) -> ScatterChart {
    let mut series: Vec<ScatterSeries> = Vec::new();

    for rec in &result.records {
        let point = [rec.payload_mass_kg, f64::from(rec.outcome.class())];
        match series
            .iter_mut()
            .find(|s| s.name == rec.booster_version_category)
        {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                name: rec.booster_version_category.clone(),
                color: colors.boosters.color_for(&rec.booster_version_category),
                points: vec![point],
            }),
        }
    }

    ScatterChart {
        title: result.title.clone(),
        series,
        styling: Styling {
            x_label: Some("Payload Mass (kg)"),
            y_label: Some("class"),
            show_legend: true,
        },
    }
}
