//! Chartable valuation series.
//!
//! A [`Trajectory`] samples a case's patrimony over a [`Timeline`]: at each
//! date the starting snapshot is projected and its aggregate and
//! per-possession values recorded. Rendering is left to the caller.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::case::Case;
use crate::config::ReconcileConfig;
use crate::reconcile::CaseStatus;
use crate::time::Timeline;

/// Values of one case at one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub date: NaiveDate,
    /// Sum of projected book values.
    pub aggregate: i64,
    /// Book value per held possession name; same-named possessions are
    /// summed.
    pub possessions: BTreeMap<String, i64>,
}

/// A sampled valuation series for one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trajectory {
    pub case: String,
    pub points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// `(date, value)` pairs for one possession. Dates where the possession
    /// is absent are skipped.
    #[must_use]
    pub fn series(&self, possession: &str) -> Vec<(NaiveDate, i64)> {
        self.points
            .iter()
            .filter_map(|point| point.possessions.get(possession).map(|v| (point.date, *v)))
            .collect()
    }

    /// `(date, aggregate)` pairs.
    #[must_use]
    pub fn aggregate_series(&self) -> Vec<(NaiveDate, i64)> {
        self.points.iter().map(|point| (point.date, point.aggregate)).collect()
    }
}

/// Planned and done trajectories of one reconciled case, sampled on the same
/// dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwinTrajectory {
    pub case: String,
    pub status: CaseStatus,
    pub planned: Option<Trajectory>,
    pub done: Option<Trajectory>,
}

/// Samples `case` from its start to its end.
#[must_use]
pub fn sample(case: &Case, config: &ReconcileConfig) -> Trajectory {
    sample_between(case, case.start(), case.end(), config)
}

/// Samples `case` over `[from, to]`.
#[must_use]
pub fn sample_between(
    case: &Case,
    from: NaiveDate,
    to: NaiveDate,
    config: &ReconcileConfig,
) -> Trajectory {
    let timeline = Timeline::new(from, to, config.sample_interval, config.max_samples);
    let points = timeline
        .dates()
        .into_iter()
        .map(|date| {
            let snapshot = case.patrimoine().project_to(date);
            let mut possessions = BTreeMap::new();
            for possession in snapshot.held() {
                let value: &mut i64 = possessions.entry(possession.name().to_string()).or_default();
                *value = value.saturating_add(possession.book_value());
            }
            TrajectoryPoint {
                date,
                aggregate: snapshot.aggregate_book_value(),
                possessions,
            }
        })
        .collect();

    Trajectory {
        case: case.name().to_string(),
        points,
    }
}
