use teendepviz::data::{DataError, UsDataset, UsGroup};

const SAMPLE: &str = "\
Category,Year,Value
FEMALE TOTAL,2012,13.7
ALL TOTAL,2011,8.2
ALL TOTAL,2012,9.1
MALE TOTAL,2012,4.7
AGED 12-13,2010,7.3
ALL TOTAL,2010,8.0
FEMALE TOTAL,2010,11.7
";

const ALL_GROUPS: [UsGroup; 3] = [UsGroup::All, UsGroup::Male, UsGroup::Female];

#[test]
fn pivot_sorts_years_and_fills_gaps() {
    let us = UsDataset::from_reader(SAMPLE.as_bytes(), &ALL_GROUPS).unwrap();
    assert_eq!(us.years(), &[2010, 2011, 2012]);
    assert_eq!(us.row(UsGroup::All).unwrap(), &[Some(8.0), Some(8.2), Some(9.1)]);
    assert_eq!(us.row(UsGroup::Female).unwrap(), &[Some(11.7), None, Some(13.7)]);
    assert_eq!(us.row(UsGroup::Male).unwrap(), &[None, None, Some(4.7)]);
    assert_eq!(us.value(UsGroup::All, 2011), Some(8.2));
    assert_eq!(us.value(UsGroup::All, 1999), None);
}

#[test]
fn filter_keeps_only_requested_groups() {
    let us = UsDataset::from_reader(SAMPLE.as_bytes(), &[UsGroup::Male]).unwrap();
    assert_eq!(us.groups().collect::<Vec<_>>(), [UsGroup::Male]);
    // years come from the filtered rows only
    assert_eq!(us.years(), &[2012]);
    assert!(us.row(UsGroup::All).is_none());
}

#[test]
fn empty_selection_yields_empty_table() {
    let us = UsDataset::from_reader(SAMPLE.as_bytes(), &[]).unwrap();
    assert!(us.is_empty());
    assert!(us.years().is_empty());
}

#[test]
fn blank_value_is_missing() {
    let csv = "Category,Year,Value\nALL TOTAL,2020,\nALL TOTAL,2021,20.1\n";
    let us = UsDataset::from_reader(csv.as_bytes(), &ALL_GROUPS).unwrap();
    assert_eq!(us.row(UsGroup::All).unwrap(), &[None, Some(20.1)]);
}

#[test]
fn duplicate_group_year_is_rejected() {
    let csv = "Category,Year,Value\nALL TOTAL,2020,1\nALL TOTAL,2020,2\n";
    let err = UsDataset::from_reader(csv.as_bytes(), &ALL_GROUPS).unwrap_err();
    assert!(matches!(err, DataError::Duplicate(ref k) if k == "ALL TOTAL 2020"), "{err}");
}

#[test]
fn missing_column_is_reported() {
    let err = UsDataset::from_reader("Category,Value\nALL TOTAL,1\n".as_bytes(), &ALL_GROUPS)
        .unwrap_err();
    assert!(matches!(err, DataError::MissingColumn(c) if c == "Year"));
}

#[test]
fn group_keys_and_labels() {
    assert_eq!(UsGroup::from_key("FEMALE TOTAL"), Some(UsGroup::Female));
    assert_eq!(UsGroup::Female.label(), "Girls");
    assert_eq!(UsGroup::Male.label(), "Boys");
    assert_eq!(UsGroup::All.key(), "ALL TOTAL");
    assert_eq!(UsGroup::from_key("AGED 12-13"), None);
}

#[test]
fn bundled_sample_covers_2004_to_2021() {
    let path = format!("{}/data/flat_data.csv", env!("CARGO_MANIFEST_DIR"));
    let us = UsDataset::load(path, &ALL_GROUPS).expect("bundled US data");
    assert_eq!(us.years().first(), Some(&2004));
    assert_eq!(us.years().last(), Some(&2021));
    for group in ALL_GROUPS {
        let row = us.row(group).unwrap();
        assert!(row.iter().all(Option::is_some), "{group:?} has gaps");
    }
}

#[test]
fn nan_and_blank_values_are_missing() {
    let csv = "Category,Year,Value\nALL TOTAL,2012,9.1\nALL TOTAL,2013,NaN\nALL TOTAL,2014,\n";
    let us = UsDataset::from_reader(csv.as_bytes(), &ALL_GROUPS).unwrap();
    assert_eq!(us.years(), &[2012, 2013, 2014]);
    assert_eq!(us.row(UsGroup::All).unwrap(), &[Some(9.1), None, None]);
    assert_eq!(us.value(UsGroup::All, 2013), None);
}

#[test]
fn non_numeric_value_reports_its_line() {
    let csv = "Category,Year,Value\nALL TOTAL,2012,9.1\nMALE TOTAL,2013,n/a\n";
    let err = UsDataset::from_reader(csv.as_bytes(), &ALL_GROUPS).unwrap_err();
    assert!(matches!(err, DataError::NotANumber { row: 3, .. }));
}
