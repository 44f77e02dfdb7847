//! Net-worth snapshots.
//!
//! A [`Patrimoine`] is an owner, an instant and the possessions held at that
//! instant. It is immutable: moving to another instant builds a new snapshot
//! with [`Patrimoine::project_to`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::possession::SharedPossession;

/// The person a patrimony belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Personne {
    pub name: String,
}

impl Personne {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Personne {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A snapshot of net worth at one instant.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use patrilang::{Argent, Patrimoine, Personne, SharedPossession};
///
/// let t = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let patrimoine = Patrimoine::new(
///     "Zety",
///     Personne::new("Zety"),
///     t,
///     vec![
///         Arc::new(Argent::new("A", t, 100)) as SharedPossession,
///         Arc::new(Argent::new("B", t, 250)) as SharedPossession,
///     ],
/// );
/// assert_eq!(patrimoine.aggregate_book_value(), 350);
/// ```
#[derive(Debug, Clone)]
pub struct Patrimoine {
    name: String,
    owner: Personne,
    at: NaiveDate,
    possessions: Vec<SharedPossession>,
}

impl Patrimoine {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        owner: Personne,
        at: NaiveDate,
        possessions: impl IntoIterator<Item = SharedPossession>,
    ) -> Self {
        Self {
            name: name.into(),
            owner,
            at,
            possessions: possessions.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn owner(&self) -> &Personne {
        &self.owner
    }

    #[must_use]
    pub const fn at(&self) -> NaiveDate {
        self.at
    }

    #[must_use]
    pub fn possessions(&self) -> &[SharedPossession] {
        &self.possessions
    }

    /// First possession with the given name.
    #[must_use]
    pub fn possession(&self, name: &str) -> Option<&SharedPossession> {
        self.possessions.iter().find(|p| p.name() == name)
    }

    /// Possessions already acquired at [`Self::at`]. Later acquisitions stay
    /// in the snapshot but are not held yet.
    pub fn held(&self) -> impl Iterator<Item = &SharedPossession> {
        self.possessions.iter().filter(move |p| p.is_held_at(self.at))
    }

    /// Sum of each held possession's book value as currently held.
    ///
    /// Possessions are not re-projected to [`Self::at`]; a snapshot is
    /// expected to be built from possessions already dated to its instant.
    #[must_use]
    pub fn aggregate_book_value(&self) -> i64 {
        self.held()
            .fold(0_i64, |total, p| total.saturating_add(p.book_value()))
    }

    /// A new snapshot at `target` whose possessions carry their projected
    /// book values. Possessions acquired after `target` are kept unchanged.
    #[must_use]
    pub fn project_to(&self, target: NaiveDate) -> Self {
        Self {
            name: self.name.clone(),
            owner: self.owner.clone(),
            at: target,
            possessions: self.possessions.iter().map(|p| p.project(target)).collect(),
        }
    }

    /// Serializable view of this snapshot.
    #[must_use]
    pub fn summary(&self) -> PatrimoineSummary {
        PatrimoineSummary {
            name: self.name.clone(),
            owner: self.owner.clone(),
            at: self.at,
            aggregate_book_value: self.aggregate_book_value(),
            possessions: self
                .possessions
                .iter()
                .map(|p| PossessionSummary {
                    name: p.name().to_string(),
                    kind: p.kind().to_string(),
                    created_at: p.created_at(),
                    book_value: p.book_value(),
                })
                .collect(),
        }
    }
}

/// One possession as it appears in a [`PatrimoineSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossessionSummary {
    pub name: String,
    pub kind: String,
    pub created_at: NaiveDate,
    pub book_value: i64,
}

/// Plain-data view of a [`Patrimoine`], for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrimoineSummary {
    pub name: String,
    pub owner: Personne,
    pub at: NaiveDate,
    pub aggregate_book_value: i64,
    pub possessions: Vec<PossessionSummary>,
}
