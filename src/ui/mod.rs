use eframe::egui::Ui;

use crate::layout::Node;
use crate::state::AppState;

pub mod panels;
pub mod plot;
pub mod table;

/// Render the page tree top to bottom.
pub fn render_layout(ui: &mut Ui, state: &mut AppState) {
    // Clone so widgets can mutate state while we walk the tree.
    let layout = state.layout.clone();

    for node in &layout.children {
        match node {
            Node::Heading(heading) => panels::heading(ui, heading),
            Node::Break => ui.add_space(12.0),
            Node::Paragraph(text) => {
                ui.label(text);
            }
            Node::Dropdown(dropdown) => panels::site_dropdown(ui, dropdown, state),
            Node::RangeSlider(slider) => panels::payload_slider(ui, slider, state),
            Node::Graph(id) => plot::graph(ui, *id, state),
            Node::LaunchTable(id) => table::launch_table(ui, *id, state),
        }
    }
}
