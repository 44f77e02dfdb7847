//! Objectives attached to a planned case.
//!
//! An objective is checked against the done patrimony of the matching case.
//! Shapes are pluggable through the [`Objective`] trait; the built-in ones are
//! "aggregate at least X by date D" and "possession P worth at least X by
//! date D".

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::patrimoine::Patrimoine;

/// Result of checking one objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectiveOutcome {
    Met,
    Missed {
        reason: String,
    },
}

impl ObjectiveOutcome {
    #[must_use]
    pub const fn is_met(&self) -> bool {
        matches!(self, Self::Met)
    }
}

/// A target the done trajectory must reach.
pub trait Objective: fmt::Debug + Send + Sync {
    /// Human-readable statement of the objective.
    fn describe(&self) -> String;

    /// Instant by which the objective must hold.
    fn at(&self) -> NaiveDate;

    /// Checks the objective against a done patrimony.
    fn check(&self, done: &Patrimoine) -> ObjectiveOutcome;
}

pub type SharedObjective = Arc<dyn Objective>;

/// Aggregate book value must be at least `target` at `at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateThreshold {
    pub target: i64,
    pub at: NaiveDate,
}

impl AggregateThreshold {
    #[must_use]
    pub const fn new(target: i64, at: NaiveDate) -> Self {
        Self { target, at }
    }
}

impl Objective for AggregateThreshold {
    fn describe(&self) -> String {
        format!("aggregate >= {} on {}", self.target, self.at)
    }

    fn at(&self) -> NaiveDate {
        self.at
    }

    fn check(&self, done: &Patrimoine) -> ObjectiveOutcome {
        let actual = done.project_to(self.at).aggregate_book_value();
        if actual >= self.target {
            ObjectiveOutcome::Met
        } else {
            ObjectiveOutcome::Missed {
                reason: format!("aggregate on {} is {actual}", self.at),
            }
        }
    }
}

/// The named possession must exist and be worth at least `target` at `at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossessionThreshold {
    pub possession: String,
    pub target: i64,
    pub at: NaiveDate,
}

impl PossessionThreshold {
    #[must_use]
    pub fn new(possession: impl Into<String>, target: i64, at: NaiveDate) -> Self {
        Self {
            possession: possession.into(),
            target,
            at,
        }
    }
}

impl Objective for PossessionThreshold {
    fn describe(&self) -> String {
        format!("'{}' >= {} on {}", self.possession, self.target, self.at)
    }

    fn at(&self) -> NaiveDate {
        self.at
    }

    fn check(&self, done: &Patrimoine) -> ObjectiveOutcome {
        let snapshot = done.project_to(self.at);
        let Some(possession) = snapshot.held().find(|p| p.name() == self.possession) else {
            return ObjectiveOutcome::Missed {
                reason: format!("possession '{}' is absent on {}", self.possession, self.at),
            };
        };
        let actual = possession.book_value();
        if actual >= self.target {
            ObjectiveOutcome::Met
        } else {
            ObjectiveOutcome::Missed {
                reason: format!("'{}' on {} is {actual}", self.possession, self.at),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patrimoine::Personne;
    use crate::possession::{Argent, Materiel, SharedPossession};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn done() -> Patrimoine {
        let t = d(2025, 1, 1);
        let possessions: Vec<SharedPossession> = vec![
            Arc::new(Argent::new("Compte", t, 3000)),
            Arc::new(Materiel::new("Terrain", t, 1000, 0.1).unwrap()),
        ];
        Patrimoine::new("Zety", Personne::new("Zety"), t, possessions)
    }

    #[test]
    fn test_aggregate_threshold_projects_to_its_date() {
        // 3000 + 1000 * 1.1 in 2026.
        assert!(AggregateThreshold::new(4100, d(2026, 1, 1)).check(&done()).is_met());
        let missed = AggregateThreshold::new(5000, d(2026, 1, 1)).check(&done());
        assert_eq!(
            missed,
            ObjectiveOutcome::Missed {
                reason: "aggregate on 2026-01-01 is 4100".to_string()
            }
        );
    }

    #[test]
    fn test_possession_threshold() {
        let met = PossessionThreshold::new("Terrain", 1200, d(2027, 6, 1));
        assert!(met.check(&done()).is_met());

        let missed = PossessionThreshold::new("Terrain", 1300, d(2027, 6, 1));
        assert!(!missed.check(&done()).is_met());
    }

    #[test]
    fn test_absent_possession_fails() {
        let objective = PossessionThreshold::new("Voiture", 0, d(2025, 1, 1));
        let ObjectiveOutcome::Missed { reason } = objective.check(&done()) else {
            panic!("expected a missed objective");
        };
        assert!(reason.contains("absent"));
    }

    #[test]
    fn test_later_acquisition_does_not_count_early() {
        let t = d(2025, 1, 1);
        let heritage: SharedPossession = Arc::new(Argent::new("Héritage", d(2026, 6, 1), 10_000));
        let done = Patrimoine::new("Zety", Personne::new("Zety"), t, vec![heritage]);

        assert!(!AggregateThreshold::new(5000, d(2025, 6, 1)).check(&done).is_met());
        assert!(AggregateThreshold::new(5000, d(2026, 6, 1)).check(&done).is_met());

        let ObjectiveOutcome::Missed { reason } =
            PossessionThreshold::new("Héritage", 1, d(2025, 6, 1)).check(&done)
        else {
            panic!("expected a missed objective");
        };
        assert!(reason.contains("absent on 2025-06-01"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            AggregateThreshold::new(5000, d(2025, 12, 31)).describe(),
            "aggregate >= 5000 on 2025-12-31"
        );
        assert_eq!(
            PossessionThreshold::new("Compte", 10, d(2025, 12, 31)).describe(),
            "'Compte' >= 10 on 2025-12-31"
        );
    }
}
