//! The dashboard page as a typed tree.
//!
//! ```text
//!  Heading
//!  Break
//!  Dropdown(SiteDropdown)
//!  Graph(SuccessPieChart)
//!  Break
//!  Paragraph "Payload range (Kg):"
//!  RangeSlider(PayloadSlider)
//!  Graph(SuccessPayloadScatterChart)
//!  LaunchTable(SuccessPayloadScatterChart)
//!  Break
//! ```

use eframe::egui::Color32;

use crate::color::HEADING_COLOR;
use crate::config::{DashboardConfig, SliderMark};
use crate::data::filter::SiteSelection;
use crate::data::model::LaunchDataset;
use crate::wiring::{InputId, OutputId};

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub text: String,
    pub color: Color32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOption {
    pub label: String,
    pub value: SiteSelection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dropdown {
    pub id: InputId,
    pub options: Vec<DropdownOption>,
    pub placeholder: &'static str,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeSlider {
    pub id: InputId,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading(Heading),
    Break,
    Paragraph(String),
    Dropdown(Dropdown),
    RangeSlider(RangeSlider),
    Graph(OutputId),
    /// Table of the launches behind a scatter output.
    LaunchTable(OutputId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLayout {
    pub children: Vec<Node>,
}

impl DashboardLayout {
    /// Build the page for a dataset. Site options follow the dataset's
    /// first-appearance order, after the "All Sites" entry.
    pub fn build(config: &DashboardConfig, dataset: &LaunchDataset) -> Self {
        let mut options = vec![DropdownOption {
            label: SiteSelection::All.to_string(),
            value: SiteSelection::All,
        }];
        options.extend(dataset.sites.iter().map(|site| DropdownOption {
            label: site.clone(),
            value: SiteSelection::Site(site.clone()),
        }));

        let children = vec![
            Node::Heading(Heading {
                text: config.title.clone(),
                color: HEADING_COLOR,
                size: 40.0,
            }),
            Node::Break,
            Node::Dropdown(Dropdown {
                id: InputId::SiteDropdown,
                options,
                placeholder: "Select a Launch Site here",
                searchable: true,
            }),
            Node::Graph(OutputId::SuccessPieChart),
            Node::Break,
            Node::Paragraph("Payload range (Kg):".to_string()),
            Node::RangeSlider(RangeSlider {
                id: InputId::PayloadSlider,
                min: config.slider.min,
                max: config.slider.max,
                step: config.slider.step,
                marks: config.slider.marks.clone(),
            }),
            Node::Graph(OutputId::SuccessPayloadScatterChart),
            Node::LaunchTable(OutputId::SuccessPayloadScatterChart),
            Node::Break,
        ];

        DashboardLayout { children }
    }
}
