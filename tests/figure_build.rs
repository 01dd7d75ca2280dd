use teendepviz::chart::annotation::plain_text;
use teendepviz::chart::figure::VAlign;
use teendepviz::chart::style::{ALL, BOYS, GIRLS};
use teendepviz::chart::{UK_X_LABEL, US_Y_LABEL, build_figure};
use teendepviz::data::{DataError, UkDataset, UsDataset, UsageBucket};
use teendepviz::ui::viewdata::{DataSources, ViewFrame};
use teendepviz::view::ViewOption;

fn sources() -> DataSources {
    let dir = env!("CARGO_MANIFEST_DIR");
    DataSources {
        uk_csv: format!("{dir}/data/data_social_media_use.csv"),
        us_csv: format!("{dir}/data/flat_data.csv"),
    }
}

fn frame(view: ViewOption) -> ViewFrame {
    ViewFrame::load(view, &sources()).expect("bundled data loads")
}

#[test]
fn all_teens_plots_one_series_per_panel() {
    let fig = frame(ViewOption::AllTeens).figure;
    let [uk, us] = &fig.panels;

    assert_eq!(uk.series.len(), 1);
    assert_eq!(uk.series[0].name, "All");
    assert_eq!(uk.series[0].color, ALL);
    assert_eq!(uk.series[0].segments[0].len(), 5);
    let (x, _) = uk.series[0].end_marker.unwrap();
    assert_eq!(x, 4.0);
    assert_eq!(uk.series[0].end_label.as_ref().unwrap().position.0, 4.2);

    assert_eq!(us.series.len(), 1);
    assert_eq!(us.series[0].end_label.as_ref().unwrap().text, "All");
    let label_x = us.series[0].end_label.as_ref().unwrap().position.0;
    assert!((label_x - 2021.6).abs() < 1e-9);
}

#[test]
fn uk_axis_layout() {
    let fig = frame(ViewOption::AllTeens).figure;
    let uk = &fig.panels[0];
    assert_eq!(uk.limits.x, (-0.5, 5.0));
    assert_eq!(uk.limits.y, (0.0, 45.0));
    let labels: Vec<&str> = uk.x_ticks.iter().map(|t| t.label.as_str()).collect();
    let expected: Vec<&str> = UsageBucket::ALL.iter().map(|b| b.label()).collect();
    assert_eq!(labels, expected);
    assert_eq!(uk.y_tick_label(20.0), Some("20"));
    assert_eq!(uk.guides.len(), 4);
    assert!(uk.guides.iter().all(|g| g.x_range == (0.0, 4.0)));
    assert_eq!(uk.x_label.as_deref(), Some(UK_X_LABEL));
    assert_eq!(uk.y_label.as_deref(), Some("Clinically relevant symptoms (%)"));
}

#[test]
fn us_axis_layout() {
    let fig = frame(ViewOption::SplitByGender).figure;
    let us = &fig.panels[1];
    assert!(us.axes_visible);
    assert_eq!(us.limits.x, (2004.0, 2022.0));
    assert_eq!(us.x_tick_label(2004.0), Some("2004"));
    assert_eq!(us.x_tick_label(2005.0), Some(""));
    assert_eq!(us.x_tick_label(2006.0), Some("2006"));
    assert_eq!(us.bands.len(), 1);
    assert_eq!(us.bands[0].x_range, (2010.0, 2015.0));
    let guide_ys: Vec<f64> = us.guides.iter().map(|g| g.y).collect();
    assert_eq!(guide_ys, [5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);
    assert!(us.guides.iter().all(|g| g.x_range == (2004.0, 2022.0)));
    // autoscaled range covers both data and guides
    assert!(us.limits.y.0 < 4.3 && us.limits.y.1 > 30.0);
    assert_eq!(us.y_label.as_deref(), Some(US_Y_LABEL));
}

#[test]
fn split_by_gender_draws_boys_then_girls_with_two_uk_notes() {
    let fig = frame(ViewOption::SplitByGender).figure;
    let [uk, us] = &fig.panels;
    let names: Vec<&str> = uk.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Boys", "Girls"]);
    assert_eq!(uk.series[1].color, GIRLS);

    assert_eq!(uk.annotations.len(), 2);
    let girls_3 = 26.5;
    assert_eq!(uk.annotations[0].position, (1.0, girls_3 + 8.0));
    let gap = &uk.annotations[1];
    assert_eq!(gap.valign, VAlign::Top);
    assert_eq!(gap.arrow.as_ref().unwrap().color, BOYS);

    let us_labels: Vec<&str> = us
        .series
        .iter()
        .map(|s| s.end_label.as_ref().unwrap().text.as_str())
        .collect();
    assert_eq!(us_labels, ["Boys", "Girls"]);
    assert_eq!(us.annotations.len(), 1);
    assert!(plain_text(&us.annotations[0].lines).starts_with("Girls experienced"));
}

#[test]
fn all_categories_note_has_no_arrow_and_us_has_gap_pair() {
    let fig = frame(ViewOption::AllCategories).figure;
    let [uk, us] = &fig.panels;
    assert_eq!(uk.series.len(), 3);
    assert_eq!(uk.annotations.len(), 1);
    assert!(uk.annotations[0].arrow.is_none());

    assert_eq!(us.series.len(), 3);
    assert_eq!(us.annotations.len(), 2);
    for ann in &us.annotations {
        let arrow = ann.arrow.as_ref().expect("both US notes have arrows");
        assert_eq!(arrow.alpha, 0.3);
    }
    assert_eq!(us.annotations[0].position.0, 2014.0);
}

#[test]
fn percent_view_is_uk_only() {
    let fig = frame(ViewOption::PercentByGender).figure;
    let [uk, us] = &fig.panels;
    let names: Vec<&str> = uk.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Girls %", "Boys %"]);
    // share columns take the colour of their group
    assert_eq!(uk.series[0].color, GIRLS);
    assert_eq!(uk.series[1].color, BOYS);
    assert_eq!(uk.limits.y, (20.0, 75.0));
    assert_eq!(uk.guides.len(), 5);
    assert_eq!(uk.y_label.as_deref(), Some("Percent per category by user"));
    assert_eq!(uk.annotations.len(), 1);

    assert!(!us.axes_visible);
    assert!(us.series.is_empty());
    assert_eq!(us.annotations.len(), 1);
    assert_eq!(
        plain_text(&us.annotations[0].lines),
        "Data not available for US trends \nin this view."
    );
}

#[test]
fn missing_columns_are_skipped_not_fatal() {
    let uk = UkDataset::from_reader(
        "Social media use in hours/weekday,Boys\nNo usage,9\n>5 h,14\n".as_bytes(),
    )
    .unwrap();
    let us = UsDataset::default();
    let fig = build_figure(ViewOption::SplitByGender, &uk, &us);
    let [uk_panel, us_panel] = &fig.panels;
    assert_eq!(uk_panel.series.len(), 1);
    // missing buckets break the line into two runs
    assert_eq!(uk_panel.series[0].segments.len(), 2);
    // anchor column `Girls` is absent, so no notes
    assert!(uk_panel.annotations.is_empty());
    assert!(us_panel.series.is_empty());
}

#[test]
fn figure_geometry() {
    let fig = frame(ViewOption::AllTeens).figure;
    assert_eq!(fig.pixel_size(), (1200, 600));
    let left = fig.panel_rect(0);
    let right = fig.panel_rect(1);
    assert!((left.left - 0.08).abs() < 1e-12);
    assert!((right.left + right.width - 0.95).abs() < 1e-12);
    let gap = right.left - (left.left + left.width);
    assert!((gap - 0.3 * left.width).abs() < 1e-12);
    assert_eq!(fig.texts.len(), 4);
    assert_eq!(fig.texts[0].lines[0], "Depression by Level of Social Media Use, U.K.");
    assert!(fig.texts[2].bold);
}

#[test]
fn table_shows_all_rows_for_every_view() {
    for view in ViewOption::ALL {
        let frame = frame(view);
        let table = frame.table.as_ref().expect("bundled data has every column");
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.rows.len(), 5);
    }
}

#[test]
fn missing_table_column_keeps_the_chart() {
    let uk = UkDataset::from_reader(
        "Social media use in hours/weekday,All,Girls,Boys,Girls %\n\
         No usage,11.2,14.1,8.4,58.0\n\
         >5 h,30.1,38.1,21.9,62.0\n"
            .as_bytes(),
    )
    .unwrap();
    let frame = ViewFrame::build(ViewOption::AllTeens, &uk, &UsDataset::default());
    assert!(matches!(&frame.table, Err(DataError::MissingColumn(c)) if c == "Boys %"));
    let uk_panel = &frame.figure.panels[0];
    assert_eq!(uk_panel.series.len(), 1);
    assert_eq!(uk_panel.series[0].name, "All");
}

#[test]
fn nan_us_anchor_skips_the_note() {
    let us = UsDataset::from_reader(
        "Category,Year,Value\nALL TOTAL,2012,9.1\nALL TOTAL,2013,NaN\nALL TOTAL,2014,11.4\n"
            .as_bytes(),
        ViewOption::AllTeens.us_categories(),
    )
    .unwrap();
    let uk = UkDataset::default();
    let fig = build_figure(ViewOption::AllTeens, &uk, &us);
    let us_panel = &fig.panels[1];
    assert!(us_panel.annotations.is_empty());
    // the gap splits the line instead of plotting NaN
    assert_eq!(us_panel.series[0].segments.len(), 2);
}
