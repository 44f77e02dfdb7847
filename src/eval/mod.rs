//! Expression evaluation over a [`VariableScope`].
//!
//! - [`NumericEvaluator`] reduces arithmetic trees to `f64`.
//! - [`DateEvaluator`] resolves a base date and applies an optional delta.
//! - [`declare`] evaluates a declaration and binds it in the innermost frame.

mod date;
mod numeric;

pub use date::DateEvaluator;
pub use numeric::NumericEvaluator;

use crate::ast::{VariableDecl, VariableExpr};
use crate::error::EvaluationError;
use crate::scope::VariableScope;
use crate::value::Value;

/// Evaluates `decl` and binds the result in the innermost frame of `scope`.
///
/// # Errors
///
/// Propagates evaluation failures and `DuplicateVariable`.
pub fn declare(scope: &mut VariableScope, decl: &VariableDecl) -> Result<Value, EvaluationError> {
    let value = match &decl.value {
        VariableExpr::Date(node) => Value::Date(DateEvaluator::new(scope).evaluate(node)?),
        VariableExpr::Number(expr) => Value::Number(NumericEvaluator::new(scope).evaluate(expr)?),
    };
    scope.declare(decl.name.clone(), value)?;
    tracing::debug!(name = %decl.name, %value, "declared variable");
    Ok(value)
}

/// Truncates toward zero into an `i64`, the way integral parts of dates and
/// currency amounts are read. `None` for non-finite or out-of-range input.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn truncate(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value.trunc() as i64)
}
