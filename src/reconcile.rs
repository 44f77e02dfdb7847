//! Reconciliation of a planned scenario with what was actually done.
//!
//! Cases are paired by name. Every objective declared on a planned case is
//! checked against the done case of the same name; the first one that fails
//! aborts reconciliation with `ObjectiveNotMet`. Unpaired cases are carried
//! through:
//! - planned only: [`CaseStatus::NotYetRealized`]
//! - done only: [`CaseStatus::UnplannedActual`]
//!
//! The output merges each pair into one case whose patrimony holds both
//! versions of every possession under distinct labels, alongside the
//! original cases for twin trajectory sampling.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::case::{Case, CaseSet};
use crate::config::ReconcileConfig;
use crate::error::{PatriResult, ReconcileError, ValidationError};
use crate::objective::ObjectiveOutcome;
use crate::patrimoine::Patrimoine;
use crate::possession::{Labeled, SharedPossession};
use crate::trajectory::{self, TwinTrajectory};

/// How a reconciled case was paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Present in both scenarios; objectives were checked.
    Matched,
    /// Planned, with nothing done yet.
    NotYetRealized,
    /// Done without a matching plan.
    UnplannedActual,
}

/// One reconciled case and its sources.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    /// Case name shared by both sides.
    pub name: String,
    pub status: CaseStatus,
    /// The planned case as built, before labeling.
    pub planned: Option<Case>,
    /// The done case as built, before labeling.
    pub done: Option<Case>,
}

impl CaseOutcome {
    /// Twin trajectories sampled on the union of both cases' periods.
    #[must_use]
    pub fn trajectories(&self, config: &ReconcileConfig) -> TwinTrajectory {
        let cases = self.planned.iter().chain(self.done.iter());
        let from = cases.clone().map(Case::start).min();
        let to = cases.map(Case::end).max();

        let (planned, done) = match (from, to) {
            (Some(from), Some(to)) => (
                self.planned
                    .as_ref()
                    .map(|case| trajectory::sample_between(case, from, to, config)),
                self.done
                    .as_ref()
                    .map(|case| trajectory::sample_between(case, from, to, config)),
            ),
            _ => (None, None),
        };

        TwinTrajectory {
            case: self.name.clone(),
            status: self.status,
            planned,
            done,
        }
    }
}

/// Output of [`Reconciler::reconcile`].
#[derive(Debug, Clone)]
pub struct Reconciliation {
    merged: CaseSet,
    outcomes: Vec<CaseOutcome>,
}

impl Reconciliation {
    /// The merged case set, one case per name.
    #[must_use]
    pub const fn merged(&self) -> &CaseSet {
        &self.merged
    }

    /// Outcomes in case-name order.
    #[must_use]
    pub fn outcomes(&self) -> &[CaseOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&CaseOutcome> {
        self.outcomes.iter().find(|outcome| outcome.name == name)
    }

    /// Twin trajectories for every case.
    #[must_use]
    pub fn trajectories(&self, config: &ReconcileConfig) -> Vec<TwinTrajectory> {
        self.outcomes
            .iter()
            .map(|outcome| outcome.trajectories(config))
            .collect()
    }

    /// Twin trajectories as JSON, for external charting.
    pub fn to_json(&self, config: &ReconcileConfig) -> PatriResult<String> {
        Ok(serde_json::to_string(&self.trajectories(config))?)
    }
}

/// Merges a planned and a done case set.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    /// Creates a reconciler.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidConfig` if `config` does not validate.
    pub fn new(config: ReconcileConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Reconciles `planned` with `done`.
    ///
    /// # Errors
    ///
    /// - `ReconcileError::ObjectiveNotMet` for the first failing objective,
    ///   in case-name then declaration order.
    /// - `ReconcileError::MissingCase` when `require_done_for_objectives` is
    ///   set and a planned case with objectives has no done counterpart.
    pub fn reconcile(&self, planned: &CaseSet, done: &CaseSet) -> PatriResult<Reconciliation> {
        self.check_objectives(planned, done)?;

        let names: BTreeSet<&str> = planned.names().chain(done.names()).collect();
        let mut merged = Vec::with_capacity(names.len());
        let mut outcomes = Vec::with_capacity(names.len());

        for name in names {
            let planned_case = planned.get(name);
            let done_case = done.get(name);

            let (status, case) = match (planned_case, done_case) {
                (Some(p), Some(d)) => (CaseStatus::Matched, self.merge(p, d)?),
                (Some(p), None) => {
                    warn!(case = name, "planned case has no done counterpart");
                    (CaseStatus::NotYetRealized, self.relabel(p, &self.config.planned_label)?)
                }
                (None, Some(d)) => {
                    warn!(case = name, "done case was not planned");
                    (CaseStatus::UnplannedActual, self.relabel(d, &self.config.done_label)?)
                }
                (None, None) => continue,
            };

            debug!(case = name, ?status, "reconciled case");
            merged.push(case);
            outcomes.push(CaseOutcome {
                name: name.to_string(),
                status,
                planned: planned_case.cloned(),
                done: done_case.cloned(),
            });
        }

        let reconciliation = Reconciliation {
            merged: CaseSet::new(merged)?,
            outcomes,
        };
        info!(
            cases = reconciliation.outcomes.len(),
            matched = reconciliation
                .outcomes
                .iter()
                .filter(|o| o.status == CaseStatus::Matched)
                .count(),
            "reconciliation complete"
        );
        Ok(reconciliation)
    }

    fn check_objectives(&self, planned: &CaseSet, done: &CaseSet) -> Result<(), ReconcileError> {
        for planned_case in planned.iter() {
            let Some(done_case) = done.get(planned_case.name()) else {
                if self.config.require_done_for_objectives && !planned_case.objectives().is_empty() {
                    return Err(ReconcileError::MissingCase {
                        name: planned_case.name().to_string(),
                    });
                }
                continue;
            };

            for objective in planned_case.objectives() {
                if let ObjectiveOutcome::Missed { reason } = objective.check(done_case.patrimoine()) {
                    let description = objective.describe();
                    warn!(
                        case = planned_case.name(),
                        objective = %description,
                        %reason,
                        "objective not met"
                    );
                    return Err(ReconcileError::ObjectiveNotMet {
                        case: planned_case.name().to_string(),
                        objective: description,
                        reason,
                    });
                }
            }
        }
        Ok(())
    }

    /// One case holding both versions of every possession, dated to the
    /// planned start.
    fn merge(&self, planned: &Case, done: &Case) -> PatriResult<Case> {
        let at = planned.start();
        let possessions = labeled(planned.patrimoine(), &self.config.planned_label, at)
            .chain(labeled(done.patrimoine(), &self.config.done_label, at));

        let patrimoine = Patrimoine::new(
            planned.patrimoine().name(),
            planned.patrimoine().owner().clone(),
            at,
            possessions,
        );
        Ok(Case::builder()
            .name(planned.name())
            .patrimoine(patrimoine)
            .end(planned.end().max(done.end()))
            .objectives(planned.objectives().iter().cloned())
            .build()?)
    }

    fn relabel(&self, case: &Case, label: &str) -> PatriResult<Case> {
        let source = case.patrimoine();
        let patrimoine = Patrimoine::new(
            source.name(),
            source.owner().clone(),
            source.at(),
            labeled(source, label, source.at()),
        );
        Ok(Case::builder()
            .name(case.name())
            .patrimoine(patrimoine)
            .end(case.end())
            .objectives(case.objectives().iter().cloned())
            .build()?)
    }
}

fn labeled<'a>(
    patrimoine: &'a Patrimoine,
    label: &'a str,
    at: chrono::NaiveDate,
) -> impl Iterator<Item = SharedPossession> + 'a {
    patrimoine.possessions().iter().map(move |p| {
        let dated = if p.created_at() == at { p.clone() } else { p.project(at) };
        std::sync::Arc::new(Labeled::new(label, dated)) as SharedPossession
    })
}

/// Reconciles with the default configuration.
pub fn reconcile(planned: &CaseSet, done: &CaseSet) -> PatriResult<Reconciliation> {
    Reconciler::default().reconcile(planned, done)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::objective::{AggregateThreshold, PossessionThreshold};
    use crate::patrimoine::Personne;
    use crate::possession::{Argent, Materiel};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn cash_case(name: &str, amount: i64) -> Case {
        let t = d(2025, 1, 1);
        Case::builder()
            .name(name)
            .patrimoine(Patrimoine::new(
                name,
                Personne::new("Zety"),
                t,
                vec![Arc::new(Argent::new("Compte", t, amount)) as SharedPossession],
            ))
            .end(d(2025, 12, 31))
            .build()
            .unwrap()
    }

    fn planned_with_goal(target: i64) -> CaseSet {
        let t = d(2025, 1, 1);
        let case = Case::builder()
            .name("Zety")
            .patrimoine(Patrimoine::new(
                "Zety",
                Personne::new("Zety"),
                t,
                vec![Arc::new(Argent::new("Compte", t, 5000)) as SharedPossession],
            ))
            .end(d(2025, 12, 31))
            .objective(Arc::new(AggregateThreshold::new(target, d(2025, 6, 1))))
            .build()
            .unwrap();
        CaseSet::new(vec![case]).unwrap()
    }

    #[test]
    fn test_missed_objective_fails() {
        let done = CaseSet::new(vec![cash_case("Zety", 4000)]).unwrap();
        let err = reconcile(&planned_with_goal(5000), &done).unwrap_err();
        assert!(err.is_objective_not_met());
        let msg = err.to_string();
        assert!(msg.contains("Objective"));
        assert!(msg.contains("aggregate >= 5000"));
        assert!(msg.contains("4000"));
    }

    #[test]
    fn test_met_objective_merges_both_trajectories() {
        let done = CaseSet::new(vec![cash_case("Zety", 5000)]).unwrap();
        let reconciliation = reconcile(&planned_with_goal(5000), &done).unwrap();

        let outcome = reconciliation.outcome("Zety").unwrap();
        assert_eq!(outcome.status, CaseStatus::Matched);

        let merged = reconciliation.merged().get("Zety").unwrap();
        let names: Vec<&str> = merged
            .patrimoine()
            .possessions()
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["Prévu: Compte", "Réalisé: Compte"]);
        assert_eq!(merged.objectives().len(), 1);

        let twin = outcome.trajectories(&ReconcileConfig::default());
        assert!(twin.planned.is_some());
        assert!(twin.done.is_some());
        assert_eq!(
            twin.planned.unwrap().points.len(),
            twin.done.unwrap().points.len()
        );
    }

    #[test]
    fn test_planned_only_case_is_not_a_failure() {
        let done = CaseSet::default();
        let reconciliation = reconcile(&planned_with_goal(1_000_000), &done).unwrap();
        assert_eq!(
            reconciliation.outcome("Zety").unwrap().status,
            CaseStatus::NotYetRealized
        );
    }

    #[test]
    fn test_done_only_case_is_carried() {
        let planned = CaseSet::default();
        let done = CaseSet::new(vec![cash_case("Imprévu", 10)]).unwrap();
        let reconciliation = reconcile(&planned, &done).unwrap();

        let outcome = reconciliation.outcome("Imprévu").unwrap();
        assert_eq!(outcome.status, CaseStatus::UnplannedActual);
        assert!(outcome.planned.is_none());
        let merged = reconciliation.merged().get("Imprévu").unwrap();
        assert_eq!(merged.patrimoine().possessions()[0].name(), "Réalisé: Compte");
    }

    #[test]
    fn test_require_done_for_objectives() {
        let reconciler = Reconciler::new(ReconcileConfig {
            require_done_for_objectives: true,
            ..ReconcileConfig::default()
        })
        .unwrap();
        let err = reconciler
            .reconcile(&planned_with_goal(1), &CaseSet::default())
            .unwrap_err();
        assert!(!err.is_objective_not_met());
        assert!(err.is_malformed_scenario());
    }

    #[test]
    fn test_possession_objective_absent_in_done() {
        let t = d(2025, 1, 1);
        let planned = CaseSet::new(vec![Case::builder()
            .name("Zety")
            .patrimoine(Patrimoine::new("Zety", Personne::new("Zety"), t, Vec::new()))
            .objective(Arc::new(PossessionThreshold::new("Voiture", 1, t)))
            .build()
            .unwrap()])
        .unwrap();
        let done = CaseSet::new(vec![cash_case("Zety", 100)]).unwrap();

        let err = reconcile(&planned, &done).unwrap_err();
        assert!(err.is_objective_not_met());
        assert!(err.to_string().contains("absent"));
    }

    #[test]
    fn test_merge_dates_done_possessions_to_planned_start() {
        let planned = CaseSet::new(vec![cash_case("Zety", 1)]).unwrap();
        let done_start = d(2024, 1, 1);
        let done = CaseSet::new(vec![Case::builder()
            .name("Zety")
            .patrimoine(Patrimoine::new(
                "Zety",
                Personne::new("Zety"),
                done_start,
                vec![Arc::new(Materiel::new("Voiture", done_start, 1000, 0.1).unwrap()) as SharedPossession],
            ))
            .end(d(2026, 1, 1))
            .build()
            .unwrap()])
        .unwrap();

        let reconciliation = reconcile(&planned, &done).unwrap();
        let merged = reconciliation.merged().get("Zety").unwrap();
        assert_eq!(merged.start(), d(2025, 1, 1));
        assert_eq!(merged.end(), d(2026, 1, 1));
        let voiture = merged.patrimoine().possession("Réalisé: Voiture").unwrap();
        assert_eq!(voiture.book_value(), 1100);
    }

    #[test]
    fn test_later_acquisition_does_not_meet_earlier_objective() {
        let t = d(2025, 1, 1);
        let done = CaseSet::new(vec![Case::builder()
            .name("Zety")
            .patrimoine(Patrimoine::new(
                "Zety",
                Personne::new("Zety"),
                t,
                vec![Arc::new(Argent::new("Héritage", d(2026, 6, 1), 10_000)) as SharedPossession],
            ))
            .end(d(2026, 12, 31))
            .build()
            .unwrap()])
        .unwrap();

        let err = reconcile(&planned_with_goal(5000), &done).unwrap_err();
        assert!(err.is_objective_not_met());
        assert!(err.to_string().contains("is 0"));

        let reconciliation = reconcile(&CaseSet::default(), &done).unwrap();
        let twin = reconciliation
            .outcome("Zety")
            .unwrap()
            .trajectories(&ReconcileConfig::default());
        let series = twin.done.unwrap().aggregate_series();
        assert_eq!(series.first(), Some(&(d(2025, 1, 1), 0)));
        assert!(series.contains(&(d(2025, 6, 1), 0)));
        assert!(series.contains(&(d(2026, 6, 1), 10_000)));
    }

    #[test]
    fn test_to_json() {
        let done = CaseSet::new(vec![cash_case("Zety", 5000)]).unwrap();
        let reconciliation = reconcile(&planned_with_goal(5000), &done).unwrap();
        let json = reconciliation.to_json(&ReconcileConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["status"], "matched");
        assert_eq!(value[0]["done"]["points"][0]["aggregate"], 5000);
    }
}
