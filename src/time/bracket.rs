//! Selection of the two stored snapshots around a requested time.
//!
//! The time axis may encode an azimuth in degrees (rotating-domain cases), so
//! a target beyond the last snapshot wraps around to the first one shifted by
//! one period.

use crate::error::CaseError;
use crate::time::TimeSnapshot;
use anyhow::Result;

pub struct BracketConfig {
    /// Distance below which a target counts as sitting on a snapshot
    pub tolerance: f64,
    /// Length of the periodic time axis (degrees for angle-indexed cases)
    pub period: f64,
}

impl BracketConfig {
    pub fn new() -> Self {
        Self {
            tolerance: 1e-3,
            period: 360.0,
        }
    }
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower `(i0, t0)` and upper `(i1, t1)` snapshots around `target`.
///
/// `i0` and `i1` are positions in the slice given to [`select_bracket`].
/// After a wraparound `t1` is the first time plus one period and `target`
/// may have been shifted by one period too. When `on_time` is set only
/// `i0`/`t0` are meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeBracket {
    pub i0: usize,
    pub t0: f64,
    pub i1: usize,
    pub t1: f64,
    pub target: f64,
    pub on_time: bool,
}

impl TimeBracket {
    /// Interpolation weight of the upper snapshot.
    pub fn weight(&self) -> f64 {
        if self.on_time {
            0.
        } else {
            (self.target - self.t0) / (self.t1 - self.t0)
        }
    }
}

/// Finds the snapshots bracketing `target` in the ordered `times`.
pub fn select_bracket(
    times: &[TimeSnapshot],
    target: f64,
    config: &BracketConfig,
) -> Result<TimeBracket> {
    let Some(last) = times.last() else {
        return Err(CaseError::InvalidInput("no time snapshots to select from".to_string()).into());
    };

    let (mut i0, mut t0) = (0, -1.0);
    let (mut i1, mut t1) = (0, -1.0);
    for (pos, snap) in times.iter().enumerate() {
        if snap.value <= target {
            i0 = pos;
            t0 = snap.value;
        } else {
            i1 = pos;
            t1 = snap.value;
            break;
        }
    }

    let mut target = target;
    if i1 <= i0 {
        i0 = times.len() - 1;
        t0 = last.value;
        i1 = 0;
        t1 = times[0].value + config.period;
        if target < t0 {
            target += config.period;
        }
    }

    let mut on_time = false;
    if (t0 - target).abs() < config.tolerance {
        on_time = true;
    }
    if (t1 - target).abs() < config.tolerance {
        i0 = i1;
        t0 = t1;
        on_time = true;
    }

    if !on_time && t1 <= t0 {
        return Err(CaseError::InvalidInput(format!(
            "degenerate time bracket [{t0}, {t1}] for target {target}"
        ))
        .into());
    }

    Ok(TimeBracket {
        i0,
        t0,
        i1,
        t1,
        target,
        on_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::case_error;

    fn degrees() -> Vec<TimeSnapshot> {
        TimeSnapshot::from_values(&[0., 90., 180., 270.])
    }

    #[test]
    fn test_inside_range() -> Result<()> {
        let b = select_bracket(&degrees(), 45., &BracketConfig::new())?;
        assert_eq!((b.i0, b.i1), (0, 1));
        assert_eq!((b.t0, b.t1), (0., 90.));
        assert!(!b.on_time);
        assert!((b.weight() - 0.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_wraparound_past_last() -> Result<()> {
        let b = select_bracket(&degrees(), 315., &BracketConfig::new())?;
        assert_eq!((b.i0, b.i1), (3, 0));
        assert_eq!((b.t0, b.t1), (270., 360.));
        assert_eq!(b.target, 315.);
        assert!((b.weight() - 0.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_wraparound_before_first() -> Result<()> {
        let times = TimeSnapshot::from_values(&[10., 100., 190., 280.]);
        let b = select_bracket(&times, 5., &BracketConfig::new())?;
        assert_eq!((b.i0, b.i1), (3, 0));
        assert_eq!((b.t0, b.t1), (280., 370.));
        assert_eq!(b.target, 365.);
        assert!((b.weight() - 85. / 90.).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_on_lower_snapshot() -> Result<()> {
        let b = select_bracket(&degrees(), 90.0005, &BracketConfig::new())?;
        assert!(b.on_time);
        assert_eq!(b.i0, 1);
        assert_eq!(b.t0, 90.);
        assert_eq!(b.weight(), 0.);
        Ok(())
    }

    #[test]
    fn test_on_upper_snapshot_collapses() -> Result<()> {
        let b = select_bracket(&degrees(), 179.9995, &BracketConfig::new())?;
        assert!(b.on_time);
        assert_eq!(b.i0, 2);
        assert_eq!(b.t0, 180.);
        Ok(())
    }

    #[test]
    fn test_on_wrapped_first_snapshot() -> Result<()> {
        let b = select_bracket(&degrees(), 360., &BracketConfig::new())?;
        assert!(b.on_time);
        assert_eq!(b.i0, 0);
        assert_eq!(b.t0, 360.);
        Ok(())
    }

    #[test]
    fn test_last_snapshot_exactly() -> Result<()> {
        let b = select_bracket(&degrees(), 270., &BracketConfig::new())?;
        assert!(b.on_time);
        assert_eq!(b.i0, 3);
        Ok(())
    }

    #[test]
    fn test_single_snapshot() -> Result<()> {
        let times = TimeSnapshot::from_values(&[30.]);
        let b = select_bracket(&times, 30., &BracketConfig::new())?;
        assert!(b.on_time);
        assert_eq!(b.i0, 0);
        let b = select_bracket(&times, 120., &BracketConfig::new())?;
        assert!(!b.on_time);
        assert_eq!((b.t0, b.t1), (30., 390.));
        assert!((b.weight() - 0.25).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_custom_tolerance_and_period() -> Result<()> {
        let times = TimeSnapshot::from_values(&[0., 1., 2.]);
        let config = BracketConfig {
            tolerance: 1e-6,
            period: 3.,
        };
        let b = select_bracket(&times, 2.5, &config)?;
        assert_eq!((b.t0, b.t1), (2., 3.));
        assert!((b.weight() - 0.5).abs() < 1e-12);
        let b = select_bracket(&times, 1.0005, &config)?;
        assert!(!b.on_time);
        Ok(())
    }

    #[test]
    fn test_empty_times() {
        let err = select_bracket(&[], 1., &BracketConfig::new()).unwrap_err();
        assert!(matches!(case_error(&err), Some(CaseError::InvalidInput(_))));
    }

    #[test]
    fn test_target_always_bracketed() -> Result<()> {
        let values = [0., 0.7, 3., 10.5, 11., 40., 41.25, 100.];
        let times = TimeSnapshot::from_values(&values);
        let config = BracketConfig::new();
        let mut target = 0.;
        while target <= 100. {
            let b = select_bracket(&times, target, &config)?;
            if b.on_time {
                assert!((b.t0 - b.target).abs() < config.tolerance);
            } else {
                assert!(b.t0 <= b.target && b.target <= b.t1, "{target}: {b:?}");
                assert_eq!(b.i1, b.i0 + 1);
                let p = b.weight();
                assert!((0. ..=1.).contains(&p));
            }
            target += 0.37;
        }
        Ok(())
    }
}
