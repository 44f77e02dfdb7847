//! Error types for PatriLang.
//!
//! All errors are strongly typed using thiserror so callers can pattern
//! match on the failure. The one distinction callers routinely branch on is
//! "an objective was missed" versus "the scenario itself is malformed"; see
//! [`PatriError::is_objective_not_met`].

use thiserror::Error;

use crate::value::VariableType;

/// Errors raised while resolving variables or evaluating expressions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable {
        name: String,
    },

    #[error("Variable '{name}' is already declared in this scope")]
    DuplicateVariable {
        name: String,
    },

    #[error("Variable '{name}' has type {actual}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: VariableType,
        actual: VariableType,
    },

    #[error("Invalid date: {reason}")]
    InvalidDate {
        reason: String,
    },

    #[error("Invalid number: {reason}")]
    InvalidNumber {
        reason: String,
    },

    #[error("Division by zero")]
    DivisionByZero,
}

impl EvaluationError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            reason: reason.into(),
        }
    }

    /// Creates an invalid number error.
    #[must_use]
    pub fn invalid_number(reason: impl Into<String>) -> Self {
        Self::InvalidNumber {
            reason: reason.into(),
        }
    }
}

/// Errors raised by the reconciler.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReconcileError {
    /// The message always starts with "Objective".
    #[error("Objective '{objective}' of case '{case}' not met: {reason}")]
    ObjectiveNotMet {
        case: String,
        objective: String,
        reason: String,
    },

    #[error("Case '{name}' not found")]
    MissingCase {
        name: String,
    },
}

/// Validation errors for builders and configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing")]
    MissingField {
        field: String,
    },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },

    #[error("Case name '{name}' has leading or trailing whitespace")]
    UntrimmedName {
        name: String,
    },

    #[error("Case '{name}' is declared more than once")]
    DuplicateCase {
        name: String,
    },

    #[error("Appreciation rate {rate} is not a finite number")]
    InvalidRate {
        rate: f64,
    },
}

/// Top-level error type for PatriLang.
#[derive(Debug, Error)]
pub enum PatriError {
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Reconciliation error: {0}")]
    Reconcile(#[from] ReconcileError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PatriError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if a declared objective was not met.
    #[must_use]
    pub const fn is_objective_not_met(&self) -> bool {
        matches!(self, Self::Reconcile(ReconcileError::ObjectiveNotMet { .. }))
    }

    /// Returns true if the scenario itself is malformed: bad variables,
    /// dates or expressions, invalid declarations, or a required case that
    /// does not exist.
    #[must_use]
    pub const fn is_malformed_scenario(&self) -> bool {
        matches!(
            self,
            Self::Evaluation(_)
                | Self::Validation(_)
                | Self::Reconcile(ReconcileError::MissingCase { .. })
        )
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Errors are never retried internally. Re-running only helps once the
    /// source files have changed, which is the caller's business.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Result type alias for PatriLang operations.
pub type PatriResult<T> = Result<T, PatriError>;
