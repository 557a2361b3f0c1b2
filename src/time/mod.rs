//! Stored time snapshots of a case.

pub mod bracket;
pub mod selector;

use std::fmt;

pub use bracket::{BracketConfig, TimeBracket, select_bracket};
pub use selector::TimeSelector;

/// One stored instant of the case.
///
/// `index` is the ordinal position among all stored snapshots, sorted by
/// `value`. `name` is the directory name the snapshot was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSnapshot {
    pub index: usize,
    pub value: f64,
    pub name: String,
}

impl TimeSnapshot {
    pub fn new(index: usize, value: f64, name: &str) -> Self {
        Self {
            index,
            value,
            name: name.to_string(),
        }
    }

    /// Builds ordered snapshots from `values`, naming them like time
    /// directories (`90`, `0.5`).
    pub fn from_values(values: &[f64]) -> Vec<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, v)| Self::new(i, v, &time_name(v)))
            .collect()
    }
}

impl fmt::Display for TimeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Directory name of a time value: shortest text that parses back exactly.
pub fn time_name(value: f64) -> String {
    format!("{}", value)
}
