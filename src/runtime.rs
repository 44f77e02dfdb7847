//! Threaded scenario building.
//!
//! The planned and done scenarios are independent evaluation passes, each
//! with its own variable scope, so they are built on two worker threads and
//! joined before reconciliation. Results come back over a bounded channel
//! tagged with the side they belong to.

use std::thread;

use crossbeam_channel::{bounded, Sender};
use tracing::{debug, warn};

use crate::ast::CaseSetDecl;
use crate::case::CaseSet;
use crate::config::ReconcileConfig;
use crate::error::{PatriError, PatriResult};
use crate::reconcile::{Reconciler, Reconciliation};
use crate::transpile;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Prefix of worker thread names.
    pub thread_name_prefix: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "patrilang".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Planned,
    Done,
}

impl Side {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Done => "done",
        }
    }
}

/// Builds the planned and done case sets concurrently.
///
/// # Errors
///
/// Returns the planned side's error if both fail, otherwise whichever side
/// failed. A worker that cannot be spawned or that panics yields
/// `PatriError::Internal`.
pub fn build_both(
    planned: CaseSetDecl,
    done: CaseSetDecl,
    config: &RuntimeConfig,
) -> PatriResult<(CaseSet, CaseSet)> {
    let (tx, rx) = bounded::<(Side, PatriResult<CaseSet>)>(2);

    let mut handles = Vec::with_capacity(2);
    for (side, decl) in [(Side::Planned, planned), (Side::Done, done)] {
        let tx = tx.clone();
        let thread_name = format!("{}-{}", config.thread_name_prefix, side.as_str());
        let handle = thread::Builder::new()
            .name(thread_name)
            .spawn(move || build_side(side, &decl, &tx))
            .map_err(|e| PatriError::internal(format!("failed to spawn {} worker: {e}", side.as_str())))?;
        handles.push(handle);
    }
    drop(tx);

    let mut planned_result = None;
    let mut done_result = None;
    for (side, result) in rx.iter() {
        debug!(side = side.as_str(), ok = result.is_ok(), "scenario built");
        match side {
            Side::Planned => planned_result = Some(result),
            Side::Done => done_result = Some(result),
        }
    }

    for handle in handles {
        if handle.join().is_err() {
            return Err(PatriError::internal("scenario worker panicked"));
        }
    }

    let planned = planned_result.ok_or_else(|| PatriError::internal("planned worker sent no result"))?;
    let done = done_result.ok_or_else(|| PatriError::internal("done worker sent no result"))?;
    Ok((planned?, done?))
}

/// Worker body: builds one side and hands the result back. Returns whether
/// the result was delivered.
fn build_side(side: Side, decl: &CaseSetDecl, tx: &Sender<(Side, PatriResult<CaseSet>)>) -> bool {
    let result = transpile::build_case_set(decl);
    if tx.send((side, result)).is_err() {
        warn!(side = side.as_str(), "scenario result dropped, receiver is gone");
        return false;
    }
    true
}

/// Builds both scenarios concurrently, then reconciles them.
pub fn build_and_reconcile(
    planned: CaseSetDecl,
    done: CaseSetDecl,
    runtime: &RuntimeConfig,
    config: ReconcileConfig,
) -> PatriResult<Reconciliation> {
    let reconciler = Reconciler::new(config)?;
    let (planned, done) = build_both(planned, done, runtime)?;
    reconciler.reconcile(&planned, &done)
}
