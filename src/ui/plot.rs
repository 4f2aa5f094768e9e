use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieChart, ScatterChart};
use crate::state::AppState;
use crate::wiring::OutputId;

const CHART_HEIGHT: f32 = 360.0;

/// Render whichever chart the output slot currently holds.
pub fn graph(ui: &mut Ui, id: OutputId, state: &AppState) {
    if let Some(pie) = state.pie_chart(id) {
        pie_chart(ui, id, pie);
    } else if let Some((chart, _)) = state.scatter_chart(id) {
        scatter_chart(ui, id, chart);
    }
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(title).size(18.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Polygon fills are convex, so slices are cut into wedges of at most this angle.
const MAX_WEDGE: f64 = FRAC_PI_2;
const ARC_STEP: f64 = TAU / 180.0;

/// Points of a circular wedge from `start` to `end` (radians, clockwise from 12 o'clock).
fn wedge(start: f64, end: f64) -> Vec<[f64; 2]> {
    let mut points = vec![[0.0, 0.0]];
    let steps = ((end - start) / ARC_STEP).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let a = start + (end - start) * i as f64 / steps as f64;
        points.push([a.sin(), a.cos()]);
    }
    points
}

/// Text drawn over the pie: a percentage at the middle of each non-empty
/// slice, or a single "No data" note at the centre when the total is zero.
fn pie_labels(pie: &PieChart) -> Vec<([f64; 2], String)> {
    if pie.total() <= 0.0 {
        return vec![([0.0, 0.0], "No data".to_string())];
    }
    let mut labels = Vec::new();
    let mut start = 0.0;
    for i in 0..pie.slices.len() {
        let sweep = pie.fraction(i) * TAU;
        if sweep > 0.0 {
            let mid = start + sweep / 2.0;
            labels.push((
                [0.65 * mid.sin(), 0.65 * mid.cos()],
                format!("{:.1}%", pie.fraction(i) * 100.0),
            ));
        }
        start += sweep;
    }
    labels
}

pub fn pie_chart(ui: &mut Ui, id: OutputId, pie: &PieChart) {
    chart_title(ui, &pie.title);
    let empty = pie.total() <= 0.0;

    let mut plot = Plot::new(("graph", id))
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.4)
        .include_x(1.4)
        .include_y(-1.1)
        .include_y(1.1);
    if pie.styling.show_legend {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        let mut start = 0.0;
        for (i, slice) in pie.slices.iter().enumerate() {
            let sweep = pie.fraction(i) * TAU;
            if sweep <= 0.0 {
                continue;
            }
            let end = start + sweep;

            let mut from = start;
            while from < end {
                let to = (from + MAX_WEDGE).min(end);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(wedge(from, to)))
                        .fill_color(slice.color)
                        .name(&slice.label),
                );
                from = to;
            }
            start = end;
        }

        for ([x, y], text) in pie_labels(pie) {
            let text = if empty {
                RichText::new(text).italics()
            } else {
                RichText::new(text).color(Color32::WHITE).strong()
            };
            plot_ui.text(Text::new(PlotPoint::new(x, y), text));
        }
    });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

pub fn scatter_chart(ui: &mut Ui, id: OutputId, chart: &ScatterChart) {
    chart_title(ui, &chart.title);

    let mut plot = Plot::new(("graph", id))
        .height(CHART_HEIGHT)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if let Some(label) = chart.styling.x_label {
        plot = plot.x_axis_label(label);
    }
    if let Some(label) = chart.styling.y_label {
        plot = plot.y_axis_label(label);
    }
    if chart.styling.show_legend {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for series in &chart.series {
            let points: PlotPoints = series.points.iter().copied().collect();
            plot_ui.points(
                Points::new(points)
                    .radius(4.0)
                    .color(series.color)
                    .name(&series.name),
            );
        }
    });

    if chart.point_count() == 0 {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new("No launches in the selected payload range").italics());
        });
    }
}
