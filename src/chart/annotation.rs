//! Annotation overlay: text with `{highlighted}` spans and an optional curved arrow.

use super::figure::{Limits, VAlign};
use super::style::{ALERT_RED, Rgb};

/// Where the arrow leaves the text block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowPosition {
    Bottom,
    Top,
    None,
}

/// A run of text; highlighted runs carry their colour and are drawn bold.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub highlight: Option<Rgb>,
}

/// One line of the annotation text.
pub type TextLine = Vec<TextRun>;

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationSpec {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub colors: Vec<Rgb>,
    pub dx: f64,
    pub dy: f64,
    pub curve: f64,
    pub arrow_position: ArrowPosition,
    pub line_width: f32,
    pub alpha: f32,
    pub show_arrow: bool,
}

impl AnnotationSpec {
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            colors: vec![ALERT_RED],
            dx: 0.5,
            dy: 5.0,
            curve: 0.2,
            arrow_position: ArrowPosition::Bottom,
            line_width: 1.0,
            alpha: 1.0,
            show_arrow: true,
        }
    }

    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    pub fn colors(mut self, colors: &[Rgb]) -> Self {
        self.colors = colors.to_vec();
        self
    }

    pub fn curve(mut self, curve: f64) -> Self {
        self.curve = curve;
        self
    }

    pub fn arrow_from(mut self, position: ArrowPosition) -> Self {
        self.arrow_position = position;
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn without_arrow(mut self) -> Self {
        self.show_arrow = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    /// Polyline in data coordinates, tail first, head last.
    pub path: Vec<(f64, f64)>,
    pub color: Rgb,
    pub width: f32,
    pub alpha: f32,
}

/// An annotation resolved against a panel's limits.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedAnnotation {
    pub position: (f64, f64),
    pub valign: VAlign,
    pub lines: Vec<TextLine>,
    pub arrow: Option<Arrow>,
}

const ARC_SEGMENTS: usize = 24;

/// Splits `{…}`-delimited text into lines of runs. Highlight colours are
/// assigned by span order; a single colour is reused for every span.
pub fn parse_highlights(text: &str, colors: &[Rgb]) -> Vec<TextLine> {
    let mut span = 0usize;
    let mut lines = Vec::new();
    let mut open = false;
    for raw_line in text.split('\n') {
        let mut line: TextLine = Vec::new();
        let mut buf = String::new();
        for ch in raw_line.chars() {
            match ch {
                '{' if !open => {
                    push_run(&mut line, &mut buf, None);
                    open = true;
                }
                '}' if open => {
                    push_run(&mut line, &mut buf, Some(color_at(colors, span)));
                    span += 1;
                    open = false;
                }
                _ => buf.push(ch),
            }
        }
        // a span left open carries its colour onto the next line
        let highlight = open.then(|| color_at(colors, span));
        push_run(&mut line, &mut buf, highlight);
        lines.push(line);
    }
    lines
}

fn color_at(colors: &[Rgb], i: usize) -> Rgb {
    colors
        .get(i)
        .or_else(|| colors.first())
        .copied()
        .unwrap_or(ALERT_RED)
}

fn push_run(line: &mut TextLine, buf: &mut String, highlight: Option<Rgb>) {
    if buf.is_empty() {
        return;
    }
    line.push(TextRun {
        text: std::mem::take(buf),
        highlight,
    });
}

/// Text without the highlight markup.
pub fn plain_text(lines: &[TextLine]) -> String {
    lines
        .iter()
        .map(|l| l.iter().map(|r| r.text.as_str()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolves an annotation: text at the offset anchor, arrow back to the data point.
pub fn place(spec: &AnnotationSpec, limits: &Limits) -> PlacedAnnotation {
    let text_x = spec.x + spec.dx;
    let text_y = spec.y + spec.dy;

    let valign = if spec.arrow_position == ArrowPosition::Bottom {
        VAlign::Bottom
    } else {
        VAlign::Top
    };
    let padding = if spec.arrow_position == ArrowPosition::Top {
        0.5
    } else {
        -0.5
    };

    let arrow = spec.show_arrow.then(|| Arrow {
        path: arc3_path(
            (text_x, text_y + padding),
            (spec.x, spec.y + 0.5),
            spec.curve,
            limits,
            ARC_SEGMENTS,
        ),
        color: spec.colors.first().copied().unwrap_or(ALERT_RED),
        width: spec.line_width,
        alpha: spec.alpha,
    });

    PlacedAnnotation {
        position: (text_x, text_y),
        valign,
        lines: parse_highlights(&spec.text, &spec.colors),
        arrow,
    }
}

/// Quadratic curve from `a` to `b` whose control point is the chord midpoint
/// displaced by `rad` times the perpendicular chord. Computed in axes-fraction
/// space so the bend does not depend on the data scale.
pub fn arc3_path(
    a: (f64, f64),
    b: (f64, f64),
    rad: f64,
    limits: &Limits,
    segments: usize,
) -> Vec<(f64, f64)> {
    let (x1, y1) = limits.to_fraction(a);
    let (x2, y2) = limits.to_fraction(b);
    let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    let (dx, dy) = (x2 - x1, y2 - y1);
    let (cx, cy) = (mx + rad * dy, my - rad * dx);

    let n = segments.max(1);
    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            let u = 1.0 - t;
            let x = u * u * x1 + 2.0 * u * t * cx + t * t * x2;
            let y = u * u * y1 + 2.0 * u * t * cy + t * t * y2;
            limits.at_fraction((x, y))
        })
        .collect()
}
