use std::fs;
use std::path::PathBuf;

use teendepviz::headless::{output_path, run};
use teendepviz::ui::viewdata::DataSources;
use teendepviz::view::ViewOption;

fn sources() -> DataSources {
    let dir = env!("CARGO_MANIFEST_DIR");
    DataSources {
        uk_csv: format!("{dir}/data/data_social_media_use.csv"),
        us_csv: format!("{dir}/data/flat_data.csv"),
    }
}

fn unique_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!(
        "teendepviz_headless_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    p
}

#[test]
fn all_views_render_to_svg() {
    let out = unique_dir("svg");
    let (written, table) = run(&ViewOption::ALL, &sources(), &out, "svg", (1200, 600))
        .expect("headless run succeeds");

    assert_eq!(written.len(), 4);
    for view in ViewOption::ALL {
        let path = output_path(&out, view, "svg");
        assert!(written.contains(&path));
        let svg = fs::read_to_string(&path).expect("svg written");
        assert!(svg.contains("<svg"), "{}", path.display());
        assert!(svg.contains("</svg>"));
    }

    let header = table.lines().next().expect("table has a header");
    assert!(header.starts_with("Social media use in hours/weekday"));
    assert!(header.trim_end().ends_with("Boys %"));
    assert_eq!(table.lines().count(), 7);

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn single_view_renders_png() {
    let out = unique_dir("png");
    let (written, _) = run(
        &[ViewOption::PercentByGender],
        &sources(),
        &out,
        "png",
        (600, 300),
    )
    .expect("headless run succeeds");

    assert_eq!(written, [output_path(&out, ViewOption::PercentByGender, "png")]);
    let bytes = fs::read(&written[0]).expect("png written");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn missing_input_fails_with_context() {
    let out = unique_dir("missing");
    let bad = DataSources {
        uk_csv: "no/such/file.csv".into(),
        ..sources()
    };
    let err = run(&[ViewOption::AllTeens], &bad, &out, "svg", (600, 300)).unwrap_err();
    assert!(format!("{err:#}").contains("building view `all-teens`"));
    let _ = fs::remove_dir_all(&out);
}
