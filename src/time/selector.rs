use std::str::FromStr;

use crate::error::CaseError;
use crate::time::TimeSnapshot;
use anyhow::{Result, anyhow};
use tracing::debug;

/// Relative tolerance used when matching a requested time to a snapshot.
const MATCH_TOL: f64 = 1e-6;

/// Restricts the snapshots a tool runs on.
#[derive(Debug, Clone, Default)]
pub struct TimeSelector {
    /// Comma separated values and inclusive `a:b` ranges, e.g. `0,90:180`.
    /// `:b` and `a:` are open-ended.
    pub times: Option<String>,
    /// Only the last snapshot
    pub latest_time: bool,
    /// Drop the snapshot at time `0`
    pub no_zero_time: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TimeRange {
    Exact(f64),
    Between(Option<f64>, Option<f64>),
}

impl TimeRange {
    fn contains(&self, t: f64) -> bool {
        match *self {
            TimeRange::Exact(v) => is_same_time(v, t),
            TimeRange::Between(lo, hi) => {
                lo.is_none_or(|lo| t >= lo || is_same_time(lo, t))
                    && hi.is_none_or(|hi| t <= hi || is_same_time(hi, t))
            }
        }
    }
}

impl FromStr for TimeRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |v: &str| -> Result<Option<f64>> {
            let v = v.trim();
            if v.is_empty() {
                Ok(None)
            } else {
                v.parse::<f64>()
                    .map(Some)
                    .map_err(|_| anyhow!("invalid time value '{v}'"))
            }
        };

        match s.split_once(':') {
            Some((lo, hi)) => Ok(TimeRange::Between(parse(lo)?, parse(hi)?)),
            None => parse(s)?
                .map(TimeRange::Exact)
                .ok_or_else(|| anyhow!("empty time value")),
        }
    }
}

fn is_same_time(a: f64, b: f64) -> bool {
    (a - b).abs() <= MATCH_TOL * a.abs().max(b.abs()).max(1.)
}

impl TimeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects from `all` (ordered by value). Selected snapshots keep their
    /// original `index`.
    pub fn select(&self, all: &[TimeSnapshot]) -> Result<Vec<TimeSnapshot>> {
        let ranges = match &self.times {
            Some(spec) => spec
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(TimeRange::from_str)
                .collect::<Result<Vec<_>>>()
                .map_err(|e| CaseError::InvalidInput(format!("--time {spec}: {e}")))?,
            None => Vec::new(),
        };

        let mut selected: Vec<TimeSnapshot> = all
            .iter()
            .filter(|t| !(self.no_zero_time && is_same_time(t.value, 0.)))
            .filter(|t| ranges.is_empty() || ranges.iter().any(|r| r.contains(t.value)))
            .cloned()
            .collect();

        if self.latest_time {
            selected = selected.pop().into_iter().collect();
        }

        if selected.is_empty() {
            return Err(CaseError::InvalidInput(format!(
                "no time snapshots selected out of {}",
                all.len()
            ))
            .into());
        }
        debug!(
            "Selected times: {}",
            selected.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(" ")
        );

        Ok(selected)
    }
}
