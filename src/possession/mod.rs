//! Possessions: assets and liabilities with a projectable book value.
//!
//! Every kind implements [`Possession`]. Aggregation and evaluation only
//! ever talk to the trait, so a new kind is a new implementation and nothing
//! else changes.

mod argent;
mod flux;
mod labeled;
mod materiel;

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

pub use argent::{Argent, Dette};
pub use flux::FluxArgent;
pub use labeled::Labeled;
pub use materiel::Materiel;

/// An asset or liability held in a [`crate::Patrimoine`].
pub trait Possession: fmt::Debug + Send + Sync {
    /// Display name, unique within a patrimony by convention only.
    fn name(&self) -> &str;

    /// The instant this possession's book value refers to.
    fn created_at(&self) -> NaiveDate;

    /// Book value as currently held.
    fn book_value(&self) -> i64;

    /// Book value projected to `target` under this kind's valuation law.
    /// Zero before `created_at`: the possession is not held yet.
    fn book_value_at(&self, target: NaiveDate) -> i64;

    /// The same possession re-dated to `target`, holding
    /// `book_value_at(target)` as its book value. A `target` before
    /// `created_at` returns the possession unchanged.
    fn project(&self, target: NaiveDate) -> SharedPossession;

    /// Whether the possession is held at `at`.
    fn is_held_at(&self, at: NaiveDate) -> bool {
        self.created_at() <= at
    }

    /// Short kind tag used in serialized output.
    fn kind(&self) -> &'static str;
}

/// Possessions are shared immutably between snapshots.
pub type SharedPossession = Arc<dyn Possession>;
