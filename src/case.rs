//! Cases and case sets.
//!
//! A [`Case`] names a patrimony snapshot, the date its simulation runs to, and
//! the objectives it must meet. A [`CaseSet`] holds every case of one
//! scenario (planned or done), keyed by case name.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{ReconcileError, ValidationError};
use crate::objective::SharedObjective;
use crate::patrimoine::Patrimoine;

/// A named scenario snapshot.
#[derive(Debug, Clone)]
pub struct Case {
    name: String,
    patrimoine: Patrimoine,
    end: NaiveDate,
    objectives: Vec<SharedObjective>,
}

impl Case {
    /// Returns a builder for constructing a case.
    #[must_use]
    pub fn builder() -> CaseBuilder {
        CaseBuilder::default()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn patrimoine(&self) -> &Patrimoine {
        &self.patrimoine
    }

    /// First simulated instant, the patrimony's own instant.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.patrimoine.at()
    }

    /// Last simulated instant.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn objectives(&self) -> &[SharedObjective] {
        &self.objectives
    }
}

/// Builder for [`Case`].
///
/// # Example
/// ```rust,ignore
/// let case = Case::builder()
///     .name("Zety")
///     .patrimoine(patrimoine)
///     .end(fin)
///     .objective(Arc::new(AggregateThreshold::new(5000, fin)))
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaseBuilder {
    name: Option<String>,
    patrimoine: Option<Patrimoine>,
    end: Option<NaiveDate>,
    objectives: Vec<SharedObjective>,
}

impl CaseBuilder {
    /// Set the case name (required).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the starting snapshot (required).
    #[must_use]
    pub fn patrimoine(mut self, patrimoine: Patrimoine) -> Self {
        self.patrimoine = Some(patrimoine);
        self
    }

    /// Set the simulation end (default: the snapshot's instant).
    #[must_use]
    pub fn end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Add an objective.
    #[must_use]
    pub fn objective(mut self, objective: SharedObjective) -> Self {
        self.objectives.push(objective);
        self
    }

    /// Add several objectives.
    #[must_use]
    pub fn objectives(mut self, objectives: impl IntoIterator<Item = SharedObjective>) -> Self {
        self.objectives.extend(objectives);
        self
    }

    /// Build the case.
    ///
    /// Returns `ValidationError::MissingField` if the name or patrimony is not
    /// set, or if the name is blank, and `ValidationError::UntrimmedName` if
    /// the name has surrounding whitespace. Names are kept verbatim so that
    /// case keys match the declared names.
    pub fn build(self) -> Result<Case, ValidationError> {
        let name = self.name.ok_or_else(|| ValidationError::MissingField {
            field: "name".to_string(),
        })?;
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "name".to_string(),
            });
        }
        if name.trim() != name {
            return Err(ValidationError::UntrimmedName { name });
        }

        let patrimoine = self.patrimoine.ok_or_else(|| ValidationError::MissingField {
            field: "patrimoine".to_string(),
        })?;
        let end = self.end.unwrap_or_else(|| patrimoine.at());

        Ok(Case {
            name,
            patrimoine,
            end,
            objectives: self.objectives,
        })
    }
}

/// Every case of one scenario, keyed by case name.
#[derive(Debug, Clone, Default)]
pub struct CaseSet {
    cases: BTreeMap<String, Case>,
}

impl CaseSet {
    /// Builds a case set.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::DuplicateCase` if two cases share a name.
    pub fn new(cases: impl IntoIterator<Item = Case>) -> Result<Self, ValidationError> {
        let mut map = BTreeMap::new();
        for case in cases {
            if map.contains_key(case.name()) {
                return Err(ValidationError::DuplicateCase {
                    name: case.name().to_string(),
                });
            }
            map.insert(case.name().to_string(), case);
        }
        Ok(Self { cases: map })
    }

    /// Case by case name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Case> {
        self.cases.get(name)
    }

    /// Case whose patrimony has exactly this name. Absence is not an error.
    #[must_use]
    pub fn find(&self, patrimoine_name: &str) -> Option<&Case> {
        self.cases
            .values()
            .find(|case| case.patrimoine().name() == patrimoine_name)
    }

    /// Like [`Self::find`], for callers that treat absence as fatal.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::MissingCase` if no case matches.
    pub fn require(&self, patrimoine_name: &str) -> Result<&Case, ReconcileError> {
        self.find(patrimoine_name)
            .ok_or_else(|| ReconcileError::MissingCase {
                name: patrimoine_name.to_string(),
            })
    }

    /// Cases in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.values()
    }

    /// Case names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
