use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::aggregate::OutcomeLabel;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed outcome colours
// ---------------------------------------------------------------------------

/// CSS `purple`.
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(128, 0, 128);
/// CSS `orange`.
pub const FAILED_COLOR: Color32 = Color32::from_rgb(255, 165, 0);
/// `#503D36`, the dashboard heading colour.
pub const HEADING_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

/// Colour of an outcome bucket. Fixed so the single-site pie keeps the same
/// colours whichever site is selected.
pub fn outcome_color(label: OutcomeLabel) -> Color32 {
    match label {
        OutcomeLabel::Success => SUCCESS_COLOR,
        OutcomeLabel::Failed => FAILED_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of one dimension (sites, booster versions) to
/// distinct colours. Built once per dataset so colours stay put while
/// filters change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from category labels. Colours follow label order.
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<String, Color32> = categories
            .iter()
            .zip(palette)
            .map(|(v, c): (&String, Color32)| (v.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}
