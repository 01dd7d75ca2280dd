use egui::{CentralPanel, Frame, Grid, RichText, ScrollArea, TopBottomPanel, Ui};

use crate::chart::figure::{Figure, FigureText};
use crate::chart::style::{self, SEASHELL};
use crate::data::RawTable;
use crate::ui::plots::{color32, panel_plot};
use crate::ui::viewdata::ViewFrame;
use crate::view::ViewOption;

pub const PAGE_TITLE: &str = "Teen Depression Visualization";
const HEADING: &str = "Teen Depression and Social Media Use";
const DESCRIPTION: &str = "This app displays two linked charts: one showing UK data by social media usage, and another showing trends over time in the US.";

/// Horizontal radio selector. Returns true when the selection changed.
pub fn view_selector(ui: &mut Ui, selected: &mut ViewOption) -> bool {
    let mut changed = false;
    ui.horizontal_wrapped(|ui| {
        ui.label("Select view:");
        for option in ViewOption::ALL {
            changed |= ui.radio_value(selected, option, option.label()).changed();
        }
    });
    changed
}

fn figure_text(ui: &mut Ui, text: &FigureText) {
    let size = text.size_pt * 1.3;
    ui.vertical_centered(|ui| {
        for line in &text.lines {
            let mut rich = RichText::new(line).size(size).color(color32(text.color));
            if text.bold {
                rich = rich.strong();
            }
            ui.label(rich);
        }
    });
}

/// Both panels side by side, each under its title and subtitle.
pub fn figure_view(ui: &mut Ui, figure: &Figure) {
    let height = (ui.available_width() * 0.4).clamp(320.0, 560.0);
    Frame::default()
        .fill(color32(figure.background))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.columns(2, |cols| {
                for (i, col) in cols.iter_mut().enumerate() {
                    // texts are ordered title, subtitle per panel
                    for text in figure.texts.iter().skip(i * 2).take(2) {
                        figure_text(col, text);
                    }
                    col.add_space(8.0);
                    panel_plot(col, &format!("panel_{i}"), &figure.panels[i], height);
                }
            });
        });
}

pub fn data_table(ui: &mut Ui, table: &RawTable) {
    ScrollArea::horizontal().show(ui, |ui| {
        Grid::new("uk_table")
            .striped(true)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                for header in &table.headers {
                    ui.label(RichText::new(header).strong());
                }
                ui.end_row();
                for row in &table.rows {
                    for cell in row {
                        ui.label(cell);
                    }
                    ui.end_row();
                }
            });
    });
}

/// === Main window ===
/// Returns true when the view selection changed this frame.
pub fn main_window(
    ctx: &egui::Context,
    selected: &mut ViewOption,
    frame: Result<&ViewFrame, &str>,
) -> bool {
    let mut changed = false;
    TopBottomPanel::top("top").show(ctx, |ui| {
        ui.heading(HEADING);
        ui.label(DESCRIPTION);
        ui.add_space(4.0);
        changed = view_selector(ui, selected);
    });

    CentralPanel::default()
        .frame(Frame::central_panel(&ctx.style()).fill(color32(SEASHELL)))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| match frame {
                Ok(frame) => {
                    figure_view(ui, &frame.figure);
                    ui.separator();
                    ui.heading("Underlying Data (UK)");
                    match &frame.table {
                        Ok(table) => data_table(ui, table),
                        Err(err) => {
                            ui.colored_label(color32(style::ALERT_RED), err.to_string());
                        }
                    }
                }
                Err(message) => {
                    ui.colored_label(color32(style::ALERT_RED), message);
                }
            });
        });
    changed
}
