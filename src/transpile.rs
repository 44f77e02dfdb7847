//! Builds cases and case sets from parse-tree nodes.
//!
//! Each call to [`build_case_set`] is one evaluation pass with its own
//! [`VariableScope`]: shared variables go in the root frame and every case
//! opens a nested frame for its own declarations.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::ast::{CaseDecl, CaseSetDecl, ObjectiveDecl, PossessionDecl};
use crate::case::{Case, CaseSet};
use crate::error::{EvaluationError, PatriResult};
use crate::eval::{self, DateEvaluator, NumericEvaluator};
use crate::objective::{AggregateThreshold, PossessionThreshold, SharedObjective};
use crate::patrimoine::{Patrimoine, Personne};
use crate::possession::{Argent, Dette, FluxArgent, Materiel, SharedPossession};
use crate::scope::VariableScope;

/// File suffix of a source aggregating several cases.
pub const CASE_SET_EXTENSION: &str = ".tout.md";

/// File suffix of a source describing a single case.
pub const CASE_EXTENSION: &str = ".cas.md";

/// What a source file describes, by its file-name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    CaseSet,
    Case,
    Unknown,
}

impl SourceKind {
    /// Classifies an already-resolved path.
    #[must_use]
    pub fn of_path(path: impl AsRef<Path>) -> Self {
        let Some(file_name) = path.as_ref().file_name() else {
            return Self::Unknown;
        };
        let file_name = file_name.to_string_lossy();
        if file_name.ends_with(CASE_SET_EXTENSION) {
            Self::CaseSet
        } else if file_name.ends_with(CASE_EXTENSION) {
            Self::Case
        } else {
            Self::Unknown
        }
    }
}

/// Builds a whole scenario in a fresh scope.
///
/// # Errors
///
/// Aborts on the first evaluation or validation failure; no partial case set
/// is returned.
pub fn build_case_set(decl: &CaseSetDecl) -> PatriResult<CaseSet> {
    let mut scope = VariableScope::new();
    for variable in &decl.variables {
        eval::declare(&mut scope, variable)?;
    }

    let mut cases = Vec::with_capacity(decl.cases.len());
    for case_decl in &decl.cases {
        scope.push_frame();
        let case = build_case(&mut scope, case_decl);
        scope.pop_frame();
        cases.push(case?);
    }

    let case_set = CaseSet::new(cases)?;
    debug!(cases = case_set.len(), "built case set");
    Ok(case_set)
}

/// Parses a JSON-encoded [`CaseSetDecl`] and builds it.
pub fn case_set_from_json(json: &str) -> PatriResult<CaseSet> {
    let decl: CaseSetDecl = serde_json::from_str(json)?;
    build_case_set(&decl)
}

/// Builds a single-case source in a fresh scope.
pub fn build_single_case(decl: &CaseDecl) -> PatriResult<Case> {
    let mut scope = VariableScope::new();
    build_case(&mut scope, decl)
}

/// Builds one case, declaring its variables in the innermost frame of
/// `scope`.
///
/// Possessions created on or before the case start are re-dated to the
/// start; later acquisitions keep their own creation date.
pub fn build_case(scope: &mut VariableScope, decl: &CaseDecl) -> PatriResult<Case> {
    for variable in &decl.variables {
        eval::declare(scope, variable)?;
    }

    let dates = DateEvaluator::new(scope);
    let start = dates.evaluate(&decl.start)?;
    let end = dates.evaluate(&decl.end)?;

    let possessions = decl
        .possessions
        .iter()
        .map(|p| {
            let possession = build_possession(scope, p)?;
            Ok(if possession.created_at() <= start {
                possession.project(start)
            } else {
                possession
            })
        })
        .collect::<PatriResult<Vec<_>>>()?;

    let objectives = decl
        .objectives
        .iter()
        .map(|o| build_objective(scope, o))
        .collect::<PatriResult<Vec<_>>>()?;

    let patrimoine = Patrimoine::new(decl.name.clone(), Personne::new(decl.owner.clone()), start, possessions);
    let case = Case::builder()
        .name(decl.name.clone())
        .patrimoine(patrimoine)
        .end(end)
        .objectives(objectives)
        .build()?;

    debug!(
        case = case.name(),
        %start,
        %end,
        possessions = case.patrimoine().possessions().len(),
        objectives = case.objectives().len(),
        "built case"
    );
    Ok(case)
}

/// Evaluates a possession declaration.
pub fn build_possession(scope: &VariableScope, decl: &PossessionDecl) -> PatriResult<SharedPossession> {
    let dates = DateEvaluator::new(scope);
    let numbers = NumericEvaluator::new(scope);

    let possession: SharedPossession = match decl {
        PossessionDecl::Materiel {
            name,
            created_at,
            value,
            rate,
        } => Arc::new(Materiel::new(
            name.clone(),
            dates.evaluate(created_at)?,
            numbers.evaluate_amount(value)?,
            numbers.evaluate(rate)?,
        )?),

        PossessionDecl::Argent {
            name,
            created_at,
            value,
        } => Arc::new(Argent::new(
            name.clone(),
            dates.evaluate(created_at)?,
            numbers.evaluate_amount(value)?,
        )),

        PossessionDecl::Dette {
            name,
            created_at,
            value,
        } => Arc::new(Dette::new(
            name.clone(),
            dates.evaluate(created_at)?,
            numbers.evaluate_amount(value)?,
        )),

        PossessionDecl::FluxArgent {
            name,
            start,
            end,
            amount,
            day_of_month,
            initial,
        } => {
            let day = numbers.evaluate_amount(day_of_month)?;
            let day = u32::try_from(day).map_err(|_| {
                EvaluationError::invalid_date(format!("day of month {day} is out of range"))
            })?;
            let initial = match initial {
                Some(expr) => numbers.evaluate_amount(expr)?,
                None => 0,
            };
            Arc::new(FluxArgent::new(
                name.clone(),
                dates.evaluate(start)?,
                dates.evaluate(end)?,
                initial,
                numbers.evaluate_amount(amount)?,
                day,
            )?)
        }
    };
    Ok(possession)
}

/// Evaluates an objective declaration.
pub fn build_objective(scope: &VariableScope, decl: &ObjectiveDecl) -> PatriResult<SharedObjective> {
    let dates = DateEvaluator::new(scope);
    let numbers = NumericEvaluator::new(scope);

    let objective: SharedObjective = match decl {
        ObjectiveDecl::Aggregate { target, at } => Arc::new(AggregateThreshold::new(
            numbers.evaluate_amount(target)?,
            dates.evaluate(at)?,
        )),
        ObjectiveDecl::Possession {
            possession,
            target,
            at,
        } => Arc::new(PossessionThreshold::new(
            possession.clone(),
            numbers.evaluate_amount(target)?,
            dates.evaluate(at)?,
        )),
    };
    Ok(objective)
}
