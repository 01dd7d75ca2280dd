//! Builds the two-panel figure for a view. Nothing here draws; `render` and
//! `ui` turn a [`Figure`] into pixels.
pub mod annotation;
pub mod figure;
pub mod style;

use tracing::warn;

use crate::data::{UkDataset, UsDataset, UsGroup, UsageBucket};
use crate::view::ViewOption;

use annotation::{AnnotationSpec, ArrowPosition};
use figure::{Band, FigureText, GuideLine, Limits, Panel, Series, Tick};
use style::{ALERT_RED, ALL, BOYS, GIRLS, GRAY, GREY10, GREY30};

pub use figure::Figure;

pub const UK_X_LABEL: &str = "Social media use in hours/weekday";
pub const US_Y_LABEL: &str = "Percent of US teens with at least one MDE in the year";

const END_LABEL_DX_UK: f64 = 0.2;
const END_LABEL_DX_US: f64 = 0.6;
const US_BAND: (f64, f64) = (2010.0, 2015.0);

pub fn build_figure(view: ViewOption, uk: &UkDataset, us: &UsDataset) -> Figure {
    let mut fig = Figure::new([uk_panel(view, uk), us_panel(view, us)]);
    fig.texts = figure_texts();
    fig
}

fn figure_texts() -> Vec<FigureText> {
    let title = |x, text: &str| FigureText {
        position: (x, 0.93),
        lines: vec![text.to_string()],
        size_pt: style::TITLE_PT,
        bold: true,
        color: GREY10,
    };
    let subtitle = |x, y, lines: &[&str]| FigureText {
        position: (x, y),
        lines: lines.iter().map(|l| l.to_string()).collect(),
        size_pt: style::SUBTITLE_PT,
        bold: false,
        color: GREY30,
    };
    vec![
        title(0.25, "Depression by Level of Social Media Use, U.K."),
        subtitle(
            0.25,
            0.84,
            &[
                "Percent of UK teens depressed as a function of hours per weekday on social media.",
                "Teens who are heavy users of social media are more depressed than light users and",
                "nonusers \u{2014} especially girls.",
            ],
        ),
        title(0.75, "Major Depression Among Teens, U.S."),
        subtitle(
            0.75,
            0.86,
            &[
                "Percent of US teens (ages 12\u{2013}17) who had at least one major depressive episode",
                "in the past year. Source: U.S. National Survey on Drug Use and Health",
            ],
        ),
    ]
}

fn uk_panel(view: ViewOption, uk: &UkDataset) -> Panel {
    let axis = view.uk_axis();
    let n = UsageBucket::ALL.len() as f64;
    let mut panel = Panel::new(Limits::new((-0.5, n), axis.limits));

    for &category in view.uk_categories() {
        let Some(values) = uk.series(category) else {
            continue;
        };
        let points = values.iter().enumerate().map(|(i, v)| (i as f64, *v));
        panel.series.push(Series::from_points(
            category,
            category,
            style::series_color(category),
            points,
            END_LABEL_DX_UK,
        ));
    }

    panel.x_ticks = UsageBucket::ALL
        .iter()
        .map(|b| Tick::new(b.index() as f64, b.label()))
        .collect();
    panel.y_ticks = axis.ticks.iter().map(|&t| Tick::numeric(t)).collect();
    panel.guides = axis
        .ticks
        .iter()
        .map(|&y| GuideLine::dotted(y, (0.0, n - 1.0)))
        .collect();
    panel.x_label = Some(UK_X_LABEL.to_string());
    panel.y_label = Some(axis.label.to_string());

    for spec in uk_annotations(view, uk) {
        panel.annotate(&spec);
    }
    panel
}

/// Value of a UK column at a bucket, warning when the annotation anchor is missing.
fn uk_anchor(uk: &UkDataset, column: &str, bucket: UsageBucket) -> Option<f64> {
    let v = uk.value(column, bucket);
    if v.is_none() {
        warn!("no `{column}` value for `{}`; annotation skipped", bucket.label());
    }
    v
}

fn uk_annotations(view: ViewOption, uk: &UkDataset) -> Vec<AnnotationSpec> {
    use UsageBucket::*;
    let x = |b: UsageBucket| b.index() as f64;
    let mut out = Vec::new();

    match view {
        ViewOption::AllTeens => {
            if let Some(y) = uk_anchor(uk, "All", ThreeToFive) {
                out.push(
                    AnnotationSpec::new(
                        x(ThreeToFive),
                        y,
                        "{Significant increase} in \nteen depression when \n{Social Media} usage \nexceeded 3 hours a day.",
                    )
                    .offset(-2.0, 11.0)
                    .colors(&[ALL, ALL])
                    .alpha(0.8),
                );
            }
        }
        ViewOption::SplitByGender => {
            if let Some(y) = uk_anchor(uk, "Girls", ThreeToFive) {
                out.push(
                    AnnotationSpec::new(
                        x(ThreeToFive),
                        y,
                        "{Sharp increase} for girls \nas usage increases.",
                    )
                    .offset(-2.0, 8.0)
                    .colors(&[GIRLS])
                    .alpha(0.8),
                );
                out.push(
                    AnnotationSpec::new(
                        x(OverFive),
                        y,
                        "{Gap between} \ngenders c.25% at \nheaviest use point.",
                    )
                    .offset(-1.0, -5.8)
                    .colors(&[BOYS])
                    .arrow_from(ArrowPosition::Top)
                    .curve(-0.2)
                    .alpha(0.8),
                );
            }
        }
        ViewOption::AllCategories => {
            if let Some(y) = uk_anchor(uk, "Girls", ThreeToFive) {
                out.push(
                    AnnotationSpec::new(
                        x(ThreeToFive),
                        y,
                        "Although a great starting point, \nthe {All line} hides a {significant insight}: \n{the disparity of impact by gender}.",
                    )
                    .offset(-1.5, 7.0)
                    .colors(&[GIRLS, GIRLS, ALL])
                    .without_arrow()
                    .alpha(0.8),
                );
            }
        }
        ViewOption::PercentByGender => {
            if uk.has_column("Girls %") {
                if let Some(y) = uk_anchor(uk, "Boys %", UnderOne) {
                    out.push(
                        AnnotationSpec::new(
                            x(OverFive),
                            y,
                            "{Almost 70%} of the >5 h \ncategory were girls. {c.40%} \nexperienced clinically relevant \nsymptoms of depression.",
                        )
                        .offset(-0.5, -10.0)
                        .colors(&[GIRLS, GIRLS])
                        .arrow_from(ArrowPosition::Top)
                        .alpha(0.8),
                    );
                }
            }
        }
    }
    out
}

fn us_panel(view: ViewOption, us: &UsDataset) -> Panel {
    if view.is_uk_only() {
        let mut panel = Panel::new(Limits::new((0.0, 1.0), (0.0, 1.0)));
        panel.axes_visible = false;
        panel.annotate(
            &AnnotationSpec::new(0.5, 0.5, "{Data not available} for US trends \nin this view.")
                .offset(0.0, 0.0)
                .colors(&[ALERT_RED])
                .arrow_from(ArrowPosition::None)
                .without_arrow(),
        );
        return panel;
    }

    let years = us.years();
    let (Some(&first), Some(&last)) = (years.first(), years.last()) else {
        warn!("US dataset has no rows for {}", view.label());
        let mut panel = Panel::new(Limits::new((0.0, 1.0), (0.0, 1.0)));
        panel.y_label = Some(US_Y_LABEL.to_string());
        return panel;
    };
    let x_limits = (first as f64, last as f64 + 1.0);

    let mut series = Vec::new();
    for &group in view.us_categories() {
        let Some(row) = us.row(group) else {
            warn!("US dataset has no `{}` row", group.key());
            continue;
        };
        let points = years.iter().zip(row).map(|(y, v)| (*y as f64, *v));
        series.push(Series::from_points(
            group.key(),
            group.label(),
            style::series_color(group.key()),
            points,
            END_LABEL_DX_US,
        ));
    }

    let guide_ys: Vec<f64> = (5..35).step_by(5).map(f64::from).collect();
    let y_limits = us_y_limits(&series, &guide_ys);

    let mut panel = Panel::new(Limits::new(x_limits, y_limits));
    panel.series = series;
    panel.guides = guide_ys
        .iter()
        .map(|&y| GuideLine::dotted(y, x_limits))
        .collect();
    panel.bands.push(Band {
        x_range: US_BAND,
        color: GRAY,
        alpha: 0.1,
    });
    panel.x_ticks = years
        .iter()
        .enumerate()
        .map(|(i, y)| {
            let label = if i % 2 == 0 { y.to_string() } else { String::new() };
            Tick::new(*y as f64, label)
        })
        .collect();
    panel.y_ticks = multiples_of(5.0, y_limits);
    panel.y_label = Some(US_Y_LABEL.to_string());

    for spec in us_annotations(view, us) {
        panel.annotate(&spec);
    }
    panel
}

/// Autoscaled y range covering the series and guide lines with 5% margins.
fn us_y_limits(series: &[Series], guides: &[f64]) -> (f64, f64) {
    let ys = series
        .iter()
        .flat_map(|s| s.segments.iter().flatten().map(|(_, y)| *y))
        .chain(guides.iter().copied());
    let (lo, hi) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

fn multiples_of(step: f64, (lo, hi): (f64, f64)) -> Vec<Tick> {
    let mut v = (lo / step).ceil() * step;
    let mut out = Vec::new();
    while v <= hi {
        out.push(Tick::numeric(v));
        v += step;
    }
    out
}

fn us_anchor(us: &UsDataset, group: UsGroup, year: i32) -> Option<f64> {
    let v = us.value(group, year);
    if v.is_none() {
        warn!("no `{}` value for {year}; annotation skipped", group.key());
    }
    v
}

fn us_annotations(view: ViewOption, us: &UsDataset) -> Vec<AnnotationSpec> {
    let mut out = Vec::new();
    match view {
        ViewOption::AllTeens => {
            if let Some(y) = us_anchor(us, UsGroup::All, 2013) {
                out.push(
                    AnnotationSpec::new(
                        2013.0,
                        y,
                        "Noticeable {increase} in\nsymptoms from 2010\nto 2015 as smartphone\nadoption accelerates.",
                    )
                    .offset(-3.0, 9.5)
                    .colors(&[ALL])
                    .alpha(0.8),
                );
            }
        }
        ViewOption::SplitByGender => {
            if let Some(y) = us_anchor(us, UsGroup::Female, 2013) {
                out.push(
                    AnnotationSpec::new(
                        2013.0,
                        y,
                        "{Girls} experienced a much sharper rise\nthan boys from 2010 to 2015.",
                    )
                    .offset(-2.0, 6.0)
                    .colors(&[GIRLS])
                    .alpha(0.8),
                );
            }
        }
        ViewOption::AllCategories => {
            if let Some(y) = us_anchor(us, UsGroup::Female, 2021) {
                out.push(
                    AnnotationSpec::new(2021.0, y, "Growing {gap} evident\nbetween boys and girls")
                        .offset(-7.0, -5.0)
                        .colors(&[GIRLS])
                        .arrow_from(ArrowPosition::Top)
                        .curve(-0.2)
                        .alpha(0.3),
                );
            }
            if let Some(y) = us_anchor(us, UsGroup::Male, 2021) {
                out.push(
                    AnnotationSpec::new(2021.0, y, "{ }")
                        .offset(-7.0, 10.75)
                        .colors(&[BOYS])
                        .alpha(0.3),
                );
            }
        }
        ViewOption::PercentByGender => {}
    }
    out
}
