//! Backend-independent description of the two-panel figure.

use super::annotation::{AnnotationSpec, PlacedAnnotation, place};
use super::style::{GRAY, Rgb, SEASHELL};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Bottom,
}

/// Axis limits of a panel in data coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Limits {
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }

    /// Data point to axes fraction (0..1 on both axes inside the limits).
    pub fn to_fraction(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            (x - self.x.0) / span(self.x),
            (y - self.y.0) / span(self.y),
        )
    }

    pub fn at_fraction(&self, (fx, fy): (f64, f64)) -> (f64, f64) {
        (
            self.x.0 + fx * span(self.x),
            self.y.0 + fy * span(self.y),
        )
    }
}

fn span((lo, hi): (f64, f64)) -> f64 {
    let d = hi - lo;
    if d.abs() < f64::EPSILON { 1.0 } else { d }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Tick {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }

    pub fn numeric(value: f64) -> Self {
        Self::new(value, format!("{value}"))
    }
}

/// Text placed next to the last point of a series.
#[derive(Clone, Debug, PartialEq)]
pub struct EndLabel {
    pub text: String,
    pub position: (f64, f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Rgb,
    /// Contiguous runs of finite points; a missing value starts a new run.
    pub segments: Vec<Vec<(f64, f64)>>,
    pub end_marker: Option<(f64, f64)>,
    pub end_label: Option<EndLabel>,
}

impl Series {
    /// Builds a series from `(x, value)` pairs, marking and labelling the last
    /// point `label_dx` to its right when that point has a value.
    pub fn from_points(
        name: impl Into<String>,
        label: impl Into<String>,
        color: Rgb,
        points: impl IntoIterator<Item = (f64, Option<f64>)>,
        label_dx: f64,
    ) -> Self {
        let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut current = Vec::new();
        let mut last = None;
        for (x, y) in points {
            last = Some((x, y));
            match y.filter(|v| v.is_finite()) {
                Some(y) => current.push((x, y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        let end = last.and_then(|(x, y)| y.filter(|v| v.is_finite()).map(|y| (x, y)));
        let label = label.into();
        Self {
            name: name.into(),
            color,
            segments,
            end_marker: end,
            end_label: end.map(|(x, y)| EndLabel {
                text: label,
                position: (x + label_dx, y),
            }),
        }
    }
}

/// Dotted horizontal reference line.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideLine {
    pub y: f64,
    pub x_range: (f64, f64),
    pub color: Rgb,
    pub width: f32,
    pub alpha: f32,
}

impl GuideLine {
    pub fn dotted(y: f64, x_range: (f64, f64)) -> Self {
        Self {
            y,
            x_range,
            color: GRAY,
            width: 0.7,
            alpha: 0.4,
        }
    }
}

/// Shaded vertical band spanning the full y range.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    pub x_range: (f64, f64),
    pub color: Rgb,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub limits: Limits,
    pub axes_visible: bool,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub series: Vec<Series>,
    pub guides: Vec<GuideLine>,
    pub bands: Vec<Band>,
    pub annotations: Vec<PlacedAnnotation>,
}

impl Panel {
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            axes_visible: true,
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            x_label: None,
            y_label: None,
            series: Vec::new(),
            guides: Vec::new(),
            bands: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Places an annotation against the current limits.
    pub fn annotate(&mut self, spec: &AnnotationSpec) {
        self.annotations.push(place(spec, &self.limits));
    }

    /// Label of the tick at `value`, if any.
    pub fn x_tick_label(&self, value: f64) -> Option<&str> {
        tick_label(&self.x_ticks, value)
    }

    pub fn y_tick_label(&self, value: f64) -> Option<&str> {
        tick_label(&self.y_ticks, value)
    }
}

fn tick_label(ticks: &[Tick], value: f64) -> Option<&str> {
    ticks
        .iter()
        .find(|t| (t.value - value).abs() < 1e-6)
        .map(|t| t.label.as_str())
}

/// Text positioned in figure fractions (origin bottom-left).
#[derive(Clone, Debug, PartialEq)]
pub struct FigureText {
    pub position: (f64, f64),
    pub lines: Vec<String>,
    pub size_pt: f32,
    pub bold: bool,
    pub color: Rgb,
}

/// Spacing of the two panels, in figure fractions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubplotParams {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    /// Gap between panels as a fraction of the mean panel width.
    pub wspace: f64,
}

impl Default for SubplotParams {
    fn default() -> Self {
        Self {
            left: 0.08,
            right: 0.95,
            top: 0.82,
            bottom: 0.15,
            wspace: 0.3,
        }
    }
}

/// Panel rectangle `(left, bottom, width, height)` in figure fractions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    /// Inches.
    pub size: (f64, f64),
    pub dpi: f64,
    pub background: Rgb,
    pub subplots: SubplotParams,
    pub panels: [Panel; 2],
    pub texts: Vec<FigureText>,
}

impl Figure {
    pub fn new(panels: [Panel; 2]) -> Self {
        Self {
            size: (12.0, 6.0),
            dpi: 100.0,
            background: SEASHELL,
            subplots: SubplotParams::default(),
            panels,
            texts: Vec::new(),
        }
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.size.0 * self.dpi).round() as u32,
            (self.size.1 * self.dpi).round() as u32,
        )
    }

    pub fn panel_rect(&self, index: usize) -> Rect {
        let p = self.subplots;
        let n = self.panels.len() as f64;
        let width = (p.right - p.left) / (n + p.wspace * (n - 1.0));
        Rect {
            left: p.left + index as f64 * width * (1.0 + p.wspace),
            bottom: p.bottom,
            width,
            height: p.top - p.bottom,
        }
    }
}
