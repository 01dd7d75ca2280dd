use egui::text::{LayoutJob, TextFormat};
use egui::{Align, Align2, Color32, FontId, RichText, Stroke};
use egui_plot::{
    Arrows, GridMark, Line, LineStyle, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints,
    Points, Polygon, Text,
};

use crate::chart::annotation::PlacedAnnotation;
use crate::chart::figure::{Panel, Tick, VAlign};
use crate::chart::style::{self, Rgb};

pub fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

fn color32_alpha(c: Rgb, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(c.0, c.1, c.2, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Tick marks at exactly the panel's tick values.
fn fixed_marks(ticks: &[Tick]) -> Vec<GridMark> {
    let step = ticks
        .windows(2)
        .map(|w| (w[1].value - w[0].value).abs())
        .fold(f64::INFINITY, f64::min);
    let step_size = if step.is_finite() && step > 0.0 { step } else { 1.0 };
    ticks
        .iter()
        .map(|t| GridMark {
            value: t.value,
            step_size,
        })
        .collect()
}

/// Highlighted annotation text as one centred layout job.
pub fn annotation_job(ann: &PlacedAnnotation) -> LayoutJob {
    let size = style::ANNOTATION_PT * 1.3;
    let mut job = LayoutJob::default();
    job.halign = Align::Center;
    for (i, line) in ann.lines.iter().enumerate() {
        if i > 0 {
            job.append("\n", 0.0, TextFormat::simple(FontId::proportional(size), Color32::TRANSPARENT));
        }
        for run in line {
            let format = match run.highlight {
                Some(c) => TextFormat {
                    font_id: FontId::proportional(size),
                    color: color32(c),
                    underline: Stroke::new(1.0, color32(c)),
                    ..Default::default()
                },
                None => TextFormat::simple(FontId::proportional(size), color32(style::GREY30)),
            };
            job.append(&run.text, 0.0, format);
        }
    }
    job
}

fn anchor_for(valign: VAlign) -> Align2 {
    match valign {
        VAlign::Top => Align2::CENTER_TOP,
        VAlign::Bottom => Align2::CENTER_BOTTOM,
    }
}

/// One chart panel as an interactive plot with fixed bounds.
pub fn panel_plot(ui: &mut egui::Ui, id: &str, panel: &Panel, height: f32) {
    let x_ticks = panel.x_ticks.clone();
    let y_ticks = panel.y_ticks.clone();
    let x_marks = fixed_marks(&panel.x_ticks);
    let y_marks = fixed_marks(&panel.y_ticks);
    let limits = panel.limits;

    let mut plot = Plot::new(id)
        .height(height)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .show_background(false)
        .show_axes(panel.axes_visible)
        .x_grid_spacer(move |_input| x_marks.clone())
        .y_grid_spacer(move |_input| y_marks.clone())
        .x_axis_formatter(move |mark, _range| label_at(&x_ticks, mark.value))
        .y_axis_formatter(move |mark, _range| label_at(&y_ticks, mark.value));
    if let Some(label) = &panel.x_label {
        plot = plot.x_axis_label(RichText::new(label).color(color32(style::GREY30)));
    }
    if let Some(label) = &panel.y_label {
        plot = plot.y_axis_label(RichText::new(label).color(color32(style::GREY30)));
    }

    plot.show(ui, |plot_ui| {
        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
            [limits.x.0, limits.y.0],
            [limits.x.1, limits.y.1],
        ));

        for band in &panel.bands {
            let (x0, x1) = band.x_range;
            let (y0, y1) = limits.y;
            let corners: PlotPoints = vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]].into();
            plot_ui.polygon(
                Polygon::new("band", corners)
                    .fill_color(color32_alpha(band.color, band.alpha))
                    .stroke(Stroke::NONE),
            );
        }

        for guide in &panel.guides {
            let pts: PlotPoints = vec![[guide.x_range.0, guide.y], [guide.x_range.1, guide.y]].into();
            plot_ui.line(
                Line::new("guide", pts)
                    .color(color32_alpha(guide.color, guide.alpha))
                    .width(guide.width)
                    .style(LineStyle::dotted_dense()),
            );
        }

        for series in &panel.series {
            let color = color32(series.color);
            for segment in &series.segments {
                let pts: PlotPoints = segment.iter().map(|(x, y)| [*x, *y]).collect();
                plot_ui.line(Line::new(series.name.as_str(), pts).color(color).width(1.5));
            }
            if let Some((x, y)) = series.end_marker {
                plot_ui.points(
                    Points::new(series.name.as_str(), vec![[x, y]])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0)
                        .color(color),
                );
            }
            if let Some(label) = &series.end_label {
                plot_ui.text(
                    Text::new(
                        "end label",
                        PlotPoint::new(label.position.0, label.position.1),
                        RichText::new(&label.text).size(style::END_LABEL_PT * 1.3),
                    )
                    .color(color)
                    .anchor(Align2::LEFT_CENTER),
                );
            }
        }

        for ann in &panel.annotations {
            if let Some(arrow) = &ann.arrow {
                let color = color32_alpha(arrow.color, arrow.alpha);
                let pts: PlotPoints = arrow.path.iter().map(|(x, y)| [*x, *y]).collect();
                plot_ui.line(Line::new("arrow", pts).color(color).width(arrow.width));
                if let [.., tail, tip] = arrow.path.as_slice() {
                    plot_ui.arrows(
                        Arrows::new(
                            "arrow head",
                            vec![[tail.0, tail.1]],
                            vec![[tip.0, tip.1]],
                        )
                        .color(color)
                        .tip_length(8.0),
                    );
                }
            }
            plot_ui.text(
                Text::new(
                    "annotation",
                    PlotPoint::new(ann.position.0, ann.position.1),
                    annotation_job(ann),
                )
                .anchor(anchor_for(ann.valign)),
            );
        }
    });
}

fn label_at(ticks: &[Tick], value: f64) -> String {
    ticks
        .iter()
        .find(|t| (t.value - value).abs() < 1e-6)
        .map(|t| t.label.clone())
        .unwrap_or_default()
}
