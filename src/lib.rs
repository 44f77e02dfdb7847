//! # PatriLang - Patrimony Planning and Reconciliation
//!
//! PatriLang evaluates declarative descriptions of a person's patrimony
//! (possessions, their valuation rules, and objectives over time) and
//! reconciles a planned scenario with what was actually done.
//!
//! ## Core Concepts
//!
//! - **Variable scope**: typed `date` / `number` variables, one frame per case
//! - **Possession**: a valued holding that can be re-dated with `project`
//! - **Patrimoine**: an owner's possessions at one instant
//! - **Case / CaseSet**: named snapshots with an end date and objectives
//! - **Reconciliation**: planned vs. done, with objectives checked and both
//!   trajectories kept side by side
//!
//! ## Usage
//!
//! ```
//! use patrilang::{Materiel, Patrimoine, Personne, Possession, SharedPossession};
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! let t0 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let t1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//!
//! let ordinateur = Materiel::new("Ordinateur", t0, 2000, -0.1).unwrap();
//! assert_eq!(ordinateur.book_value_at(t1), 1800);
//!
//! let patrimoine = Patrimoine::new(
//!     "Zety",
//!     Personne::new("Zety"),
//!     t0,
//!     vec![Arc::new(ordinateur) as SharedPossession],
//! );
//! assert_eq!(patrimoine.project_to(t1).aggregate_book_value(), 1800);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod error;
pub mod time;
pub mod value;

// Evaluation
pub mod ast;
pub mod eval;
pub mod scope;

// Patrimony model
pub mod case;
pub mod objective;
pub mod patrimoine;
pub mod possession;

// Building and reconciliation
pub mod config;
pub mod reconcile;
pub mod runtime;
pub mod trajectory;
pub mod transpile;

// Re-export primary types at crate root for convenience
pub use case::{Case, CaseBuilder, CaseSet};
pub use config::ReconcileConfig;
pub use error::{EvaluationError, PatriError, PatriResult, ReconcileError, ValidationError};
pub use eval::{DateEvaluator, NumericEvaluator};
pub use objective::{
    AggregateThreshold, Objective, ObjectiveOutcome, PossessionThreshold, SharedObjective,
};
pub use patrimoine::{Patrimoine, PatrimoineSummary, Personne, PossessionSummary};
pub use possession::{Argent, Dette, FluxArgent, Labeled, Materiel, Possession, SharedPossession};
pub use reconcile::{reconcile, CaseOutcome, CaseStatus, Reconciler, Reconciliation};
pub use runtime::{build_and_reconcile, build_both, RuntimeConfig};
pub use scope::{Variable, VariableScope};
pub use time::{DateDelta, SampleInterval, Timeline, DATE_MAX, DATE_MIN};
pub use trajectory::{Trajectory, TrajectoryPoint, TwinTrajectory};
pub use transpile::{build_case_set, SourceKind};
pub use value::{Value, VariableType};
