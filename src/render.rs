//! Static rendering of a [`Figure`] with plotters (PNG or SVG).

use std::path::Path;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use crate::chart::annotation::PlacedAnnotation;
use crate::chart::figure::{Figure, VAlign};
use crate::chart::style::{self, Rgb};

const Y_LABEL_AREA: f64 = 60.0;
const X_LABEL_AREA: f64 = 45.0;
const MARKER_RADIUS: f64 = 4.0;
const LINE_WIDTH: f64 = 1.5;
const ARROW_HEAD: f64 = 8.0;

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Writes the figure to `path`. `.svg` selects the SVG backend, anything else a bitmap.
pub fn render_to_file(fig: &Figure, path: &Path, size: (u32, u32)) -> Result<()> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_figure(&root, fig)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_figure(&root, fig)?;
        root.present()?;
    }
    info!("wrote {}", path.display());
    Ok(())
}

/// Draws the whole figure onto `root`, scaling the figure's nominal pixel size to fit.
pub fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, fig: &Figure) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&rgb(fig.background))?;
    let (w, _) = root.dim_in_pixel();
    let scale = w as f64 / fig.pixel_size().0.max(1) as f64;
    let pt = |size: f32| size as f64 * fig.dpi / 72.0 * scale;

    for index in 0..fig.panels.len() {
        draw_panel(root, fig, index, scale, &pt)?;
    }

    let (w, h) = root.dim_in_pixel();
    for text in &fig.texts {
        let mut font = ("sans-serif", pt(text.size_pt)).into_font();
        if text.bold {
            font = font.style(FontStyle::Bold);
        }
        let style = font
            .color(&rgb(text.color))
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let line_h = pt(text.size_pt) * 1.25;
        let x = (text.position.0 * w as f64) as i32;
        let bottom = (1.0 - text.position.1) * h as f64;
        let n = text.lines.len();
        for (i, line) in text.lines.iter().enumerate() {
            let y = bottom - (n - 1 - i) as f64 * line_h;
            root.draw(&Text::new(line.as_str(), (x, y as i32), style.clone()))?;
        }
    }
    Ok(())
}

fn draw_panel<DB>(
    root: &DrawingArea<DB, Shift>,
    fig: &Figure,
    index: usize,
    scale: f64,
    pt: &dyn Fn(f32) -> f64,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let panel = &fig.panels[index];
    let rect = fig.panel_rect(index);
    let (w, h) = root.dim_in_pixel();
    let (w, h) = (w as f64, h as f64);
    let px = rect.left * w;
    let py = (1.0 - rect.bottom - rect.height) * h;
    let pw = rect.width * w;
    let ph = rect.height * h;

    if !panel.axes_visible {
        let limits = panel.limits;
        let to_px = |p: (f64, f64)| {
            let (fx, fy) = limits.to_fraction(p);
            ((px + fx * pw) as i32, (py + (1.0 - fy) * ph) as i32)
        };
        for ann in &panel.annotations {
            draw_annotation(root, ann, &to_px, pt, scale)?;
        }
        return Ok(());
    }

    let yl = Y_LABEL_AREA * scale;
    let xl = X_LABEL_AREA * scale;
    let area = root.clone().shrink(
        ((px - yl).max(0.0) as i32, py as i32),
        ((pw + yl) as i32, (ph + xl) as i32),
    );

    let (x0, x1) = panel.limits.x;
    let (y0, y1) = panel.limits.y;
    let mut chart = ChartBuilder::on(&area)
        .x_label_area_size(xl as u32)
        .y_label_area_size(yl as u32)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let tick_font = ("sans-serif", pt(style::TICK_PT))
        .into_font()
        .color(&rgb(style::GREY30));
    let desc_font = ("sans-serif", pt(style::AXIS_LABEL_PT))
        .into_font()
        .color(&rgb(style::GREY30));
    let x_fmt = |v: &f64| panel.x_tick_label(*v).unwrap_or_default().to_string();
    let y_fmt = |v: &f64| panel.y_tick_label(*v).unwrap_or_default().to_string();

    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(TRANSPARENT)
        .x_labels(key_count(&panel.x_ticks, panel.limits.x))
        .y_labels(key_count(&panel.y_ticks, panel.limits.y))
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .label_style(tick_font)
        .axis_desc_style(desc_font)
        .x_desc(panel.x_label.clone().unwrap_or_default())
        .y_desc(panel.y_label.clone().unwrap_or_default())
        .draw()?;

    for band in &panel.bands {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(band.x_range.0, y0), (band.x_range.1, y1)],
            rgb(band.color).mix(band.alpha as f64).filled(),
        )))?;
    }

    for guide in &panel.guides {
        let width = ((guide.width as f64 * scale).round() as u32).max(1);
        chart.draw_series(DashedLineSeries::new(
            vec![(guide.x_range.0, guide.y), (guide.x_range.1, guide.y)],
            2,
            3,
            rgb(guide.color)
                .mix(guide.alpha as f64)
                .stroke_width(width),
        ))?;
    }

    let line_w = ((LINE_WIDTH * scale).round() as u32).max(1);
    for series in &panel.series {
        let color = rgb(series.color);
        for segment in &series.segments {
            chart.draw_series(LineSeries::new(
                segment.iter().copied(),
                color.stroke_width(line_w),
            ))?;
        }
        if let Some(end) = series.end_marker {
            chart.draw_series(std::iter::once(Circle::new(
                end,
                (MARKER_RADIUS * scale) as i32,
                color.filled(),
            )))?;
        }
        if let Some(label) = &series.end_label {
            let style = ("sans-serif", pt(style::END_LABEL_PT))
                .into_font()
                .color(&color)
                .pos(Pos::new(HPos::Left, VPos::Center));
            let at = chart.backend_coord(&label.position);
            root.draw(&Text::new(label.text.as_str(), at, style))?;
        }
    }

    let to_px = |p: (f64, f64)| chart.backend_coord(&p);
    for ann in &panel.annotations {
        draw_annotation(root, ann, &to_px, pt, scale)?;
    }
    Ok(())
}

/// Enough axis keys that every tick value is among them.
fn key_count(ticks: &[crate::chart::figure::Tick], (lo, hi): (f64, f64)) -> usize {
    let gap = ticks
        .windows(2)
        .map(|w| (w[1].value - w[0].value).abs())
        .filter(|g| *g > 0.0)
        .fold(f64::INFINITY, f64::min);
    if !gap.is_finite() {
        return 2;
    }
    (((hi - lo) / gap).ceil() as usize + 2).min(100)
}

fn draw_annotation<DB>(
    root: &DrawingArea<DB, Shift>,
    ann: &PlacedAnnotation,
    to_px: &dyn Fn((f64, f64)) -> (i32, i32),
    pt: &dyn Fn(f32) -> f64,
    scale: f64,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    if let Some(arrow) = &ann.arrow {
        let color = rgb(arrow.color).mix(arrow.alpha as f64);
        let width = ((arrow.width as f64 * scale).round() as u32).max(1);
        let pts: Vec<(i32, i32)> = arrow.path.iter().map(|p| to_px(*p)).collect();
        root.draw(&PathElement::new(pts.clone(), color.stroke_width(width)))?;
        if let [.., tail, tip] = pts.as_slice() {
            for wing in arrow_head(*tail, *tip, ARROW_HEAD * scale) {
                root.draw(&PathElement::new(vec![wing, *tip], color.stroke_width(width)))?;
            }
        }
    }

    let size = pt(style::ANNOTATION_PT);
    let plain = ("sans-serif", size).into_font().color(&rgb(style::GREY30));
    let line_h = size * 1.25;
    let block_h = line_h * ann.lines.len() as f64;
    let (ax, ay) = to_px(ann.position);
    let top = match ann.valign {
        VAlign::Top => ay as f64,
        VAlign::Bottom => ay as f64 - block_h,
    };

    for (i, line) in ann.lines.iter().enumerate() {
        let styles: Vec<TextStyle> = line
            .iter()
            .map(|run| match run.highlight {
                Some(c) => ("sans-serif", size)
                    .into_font()
                    .style(FontStyle::Bold)
                    .color(&rgb(c)),
                None => plain.clone(),
            })
            .collect();
        let mut widths = Vec::with_capacity(line.len());
        for (run, style) in line.iter().zip(&styles) {
            widths.push(root.estimate_text_size(&run.text, style)?.0 as f64);
        }
        let total: f64 = widths.iter().sum();
        let mut x = ax as f64 - total / 2.0;
        let y = (top + i as f64 * line_h) as i32;
        for ((run, style), width) in line.iter().zip(styles).zip(widths) {
            let style = style.pos(Pos::new(HPos::Left, VPos::Top));
            root.draw(&Text::new(run.text.as_str(), (x as i32, y), style))?;
            x += width;
        }
    }
    Ok(())
}

/// Two wing points of a `->` head at `tip`, pointing along `tail -> tip`.
fn arrow_head(tail: (i32, i32), tip: (i32, i32), len: f64) -> [(i32, i32); 2] {
    let (dx, dy) = ((tip.0 - tail.0) as f64, (tip.1 - tail.1) as f64);
    let norm = dx.hypot(dy).max(1e-9);
    let (ux, uy) = (dx / norm, dy / norm);
    let spread = 25f64.to_radians();
    let wing = |sign: f64| {
        let (s, c) = (sign * spread).sin_cos();
        let (rx, ry) = (ux * c - uy * s, ux * s + uy * c);
        (
            (tip.0 as f64 - rx * len).round() as i32,
            (tip.1 as f64 - ry * len).round() as i32,
        )
    };
    [wing(1.0), wing(-1.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_head_wings_trail_the_tip() {
        let [a, b] = arrow_head((0, 0), (100, 0), 10.0);
        assert!(a.0 < 100 && b.0 < 100);
        assert_eq!(a.1, -b.1);
    }

    #[test]
    fn key_count_covers_unit_ticks() {
        let ticks: Vec<_> = (0..5)
            .map(|i| crate::chart::figure::Tick::numeric(i as f64))
            .collect();
        assert_eq!(key_count(&ticks, (-0.5, 5.0)), 8);
        assert_eq!(key_count(&[], (0.0, 1.0)), 2);
    }
}
