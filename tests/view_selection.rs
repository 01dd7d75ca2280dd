use clap::ValueEnum;
use teendepviz::data::UsGroup;
use teendepviz::headless::output_path;
use teendepviz::view::ViewOption;

#[test]
fn selector_defaults_to_all_teens() {
    assert_eq!(ViewOption::default(), ViewOption::AllTeens);
    assert_eq!(ViewOption::ALL[0], ViewOption::AllTeens);
}

#[test]
fn category_lists_per_view() {
    assert_eq!(ViewOption::AllTeens.uk_categories(), ["All"]);
    assert_eq!(ViewOption::AllTeens.us_categories(), [UsGroup::All]);

    assert_eq!(ViewOption::SplitByGender.uk_categories(), ["Boys", "Girls"]);
    assert_eq!(
        ViewOption::SplitByGender.us_categories(),
        [UsGroup::Male, UsGroup::Female]
    );

    assert_eq!(
        ViewOption::AllCategories.uk_categories(),
        ["All", "Boys", "Girls"]
    );
    assert_eq!(
        ViewOption::AllCategories.us_categories(),
        [UsGroup::All, UsGroup::Male, UsGroup::Female]
    );

    assert_eq!(
        ViewOption::PercentByGender.uk_categories(),
        ["Girls %", "Boys %"]
    );
    assert!(ViewOption::PercentByGender.us_categories().is_empty());
    assert!(ViewOption::PercentByGender.is_uk_only());
}

#[test]
fn only_percent_view_changes_the_uk_axis() {
    for view in ViewOption::ALL {
        let axis = view.uk_axis();
        if view == ViewOption::PercentByGender {
            assert_eq!(axis.ticks, [30.0, 40.0, 50.0, 60.0, 70.0]);
            assert_eq!(axis.limits, (20.0, 75.0));
        } else {
            assert_eq!(axis.ticks, [10.0, 20.0, 30.0, 40.0]);
            assert_eq!(axis.limits, (0.0, 45.0));
        }
    }
}

#[test]
fn cli_names_match_slugs() {
    for view in ViewOption::ALL {
        let parsed = ViewOption::from_str(view.slug(), false).expect("slug parses");
        assert_eq!(parsed, view);
    }
}

#[test]
fn labels_match_selector_text() {
    let labels: Vec<&str> = ViewOption::ALL.iter().map(|v| v.label()).collect();
    assert_eq!(
        labels,
        [
            "All Teens",
            "Split by Gender",
            "All Categories",
            "Percent per category by Gender (UK Only)"
        ]
    );
}

#[test]
fn headless_output_names_use_slug() {
    let p = output_path(std::path::Path::new("out"), ViewOption::SplitByGender, "svg");
    assert_eq!(p, std::path::Path::new("out/teen_depression_split-by-gender.svg"));
}
