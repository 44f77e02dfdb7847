//! Lexically nested variable scopes.
//!
//! A scope is a stack of frames. Declarations go into the innermost frame;
//! lookups walk frames innermost to outermost. A scope belongs to exactly one
//! evaluation pass and is dropped when that pass completes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::value::{Value, VariableType};

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: Value,
}

impl Variable {
    pub const fn variable_type(&self) -> VariableType {
        self.value.variable_type()
    }
}

/// Variable bindings for one evaluation pass.
///
/// # Examples
///
/// ```
/// use patrilang::{Value, VariableScope, VariableType};
///
/// let mut scope = VariableScope::new();
/// scope.declare("taux", Value::Number(0.1)).unwrap();
///
/// assert_eq!(scope.get("taux", VariableType::Number).unwrap().as_number(), Some(0.1));
/// assert!(scope.get("taux", VariableType::Date).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct VariableScope {
    frames: Vec<HashMap<String, Variable>>,
}

impl Default for VariableScope {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableScope {
    /// Creates a scope with a single, empty root frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![HashMap::new()],
        }
    }

    /// Opens a nested frame.
    pub fn push_frame(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Closes the innermost frame. The root frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of open frames, root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Binds `name` in the innermost frame.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::DuplicateVariable` if the innermost frame
    /// already binds `name`. Shadowing an outer frame is allowed.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) -> Result<(), EvaluationError> {
        let name = name.into();
        let frame = self.innermost_mut();
        if frame.contains_key(&name) {
            return Err(EvaluationError::DuplicateVariable { name });
        }
        frame.insert(name.clone(), Variable { name, value });
        Ok(())
    }

    /// Resolves `name`, requiring it to hold a value of `expected` type.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::UndefinedVariable` if no frame binds `name`,
    /// or `EvaluationError::TypeMismatch` if the bound value has another type.
    pub fn get(&self, name: &str, expected: VariableType) -> Result<Value, EvaluationError> {
        let variable = self.lookup(name).ok_or_else(|| EvaluationError::UndefinedVariable {
            name: name.to_string(),
        })?;

        let actual = variable.variable_type();
        if actual != expected {
            return Err(EvaluationError::TypeMismatch {
                name: name.to_string(),
                expected,
                actual,
            });
        }
        Ok(variable.value)
    }

    /// Finds a variable without any type requirement.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Check if a name is already bound in the innermost frame.
    #[must_use]
    pub fn has_in_current_frame(&self, name: &str) -> bool {
        self.frames.last().is_some_and(|frame| frame.contains_key(name))
    }

    fn innermost_mut(&mut self) -> &mut HashMap<String, Variable> {
        if self.frames.is_empty() {
            self.frames.push(HashMap::new());
        }
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}
