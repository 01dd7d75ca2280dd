use serde::{Deserialize, Serialize};

use crate::data::UsGroup;

/// The four dashboard views offered by the selector.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ViewOption {
    #[default]
    AllTeens,
    SplitByGender,
    AllCategories,
    PercentByGender,
}

/// y axis of the UK panel.
#[derive(Clone, Debug, PartialEq)]
pub struct UkAxis {
    pub ticks: Vec<f64>,
    pub limits: (f64, f64),
    pub label: &'static str,
}

impl ViewOption {
    pub const ALL: [ViewOption; 4] = [
        ViewOption::AllTeens,
        ViewOption::SplitByGender,
        ViewOption::AllCategories,
        ViewOption::PercentByGender,
    ];

    /// Selector label.
    pub fn label(self) -> &'static str {
        match self {
            ViewOption::AllTeens => "All Teens",
            ViewOption::SplitByGender => "Split by Gender",
            ViewOption::AllCategories => "All Categories",
            ViewOption::PercentByGender => "Percent per category by Gender (UK Only)",
        }
    }

    /// Kebab-case name used on the command line, in config and in output file names.
    pub fn slug(self) -> &'static str {
        match self {
            ViewOption::AllTeens => "all-teens",
            ViewOption::SplitByGender => "split-by-gender",
            ViewOption::AllCategories => "all-categories",
            ViewOption::PercentByGender => "percent-by-gender",
        }
    }

    /// UK value columns plotted, in draw order.
    pub fn uk_categories(self) -> &'static [&'static str] {
        match self {
            ViewOption::AllTeens => &["All"],
            ViewOption::SplitByGender => &["Boys", "Girls"],
            ViewOption::AllCategories => &["All", "Boys", "Girls"],
            ViewOption::PercentByGender => &["Girls %", "Boys %"],
        }
    }

    /// US groups plotted, in draw order. Empty when the view is UK-only.
    pub fn us_categories(self) -> &'static [UsGroup] {
        match self {
            ViewOption::AllTeens => &[UsGroup::All],
            ViewOption::SplitByGender => &[UsGroup::Male, UsGroup::Female],
            ViewOption::AllCategories => &[UsGroup::All, UsGroup::Male, UsGroup::Female],
            ViewOption::PercentByGender => &[],
        }
    }

    pub fn is_uk_only(self) -> bool {
        self.us_categories().is_empty()
    }

    pub fn uk_axis(self) -> UkAxis {
        if self == ViewOption::PercentByGender {
            UkAxis {
                ticks: vec![30.0, 40.0, 50.0, 60.0, 70.0],
                limits: (20.0, 75.0),
                label: "Percent per category by user",
            }
        } else {
            UkAxis {
                ticks: vec![10.0, 20.0, 30.0, 40.0],
                limits: (0.0, 45.0),
                label: "Clinically relevant symptoms (%)",
            }
        }
    }
}

impl std::fmt::Display for ViewOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
