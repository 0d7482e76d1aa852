//! Form state management module.
//!
//! This module contains the generic form controller shared by every form
//! screen:
//! - `FormState`: field values, per-field errors, change and submit handling
//! - Field value and change event types
//! - Constructors for the login, register, article, comment and search forms

mod field;
mod screens;

pub use field::{text, Errors, FieldEvent, FieldValue, FileRef, Values, SUBMIT_KEY};
pub use screens::*;

use crate::validation::{self, Rule};
use log::*;
use std::fmt::Display;
use std::future::Future;

/// Result of a submit attempt.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SubmitOutcome<T> {
    /// Every field was valid and the callback resolved.
    Submitted(T),
    /// At least one field has an error; the callback was not invoked.
    Invalid,
    /// The callback rejected; its message is stored under `submit`.
    Rejected,
    /// The form has no fields; nothing was submitted.
    Empty,
}

/// State of one form screen.
///
#[derive(Debug, Clone)]
pub struct FormState {
    initial: Values,
    values: Values,
    errors: Errors,
    validator: Rule,
}

impl FormState {
    /// Return a new instance with the given initial values, validated by the
    /// default validation engine.
    ///
    pub fn new(initial: Values) -> Self {
        FormState::with_validator(initial, validation::validate)
    }

    /// Return a new instance using a custom validator.
    ///
    pub fn with_validator(initial: Values, validator: Rule) -> Self {
        FormState {
            values: initial.clone(),
            initial,
            errors: Errors::new(),
            validator,
        }
    }

    pub fn get_values(&self) -> &Values {
        &self.values
    }

    pub fn get_value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text of the field, empty when absent or not textual.
    ///
    pub fn get_text(&self, name: &str) -> &str {
        text(&self.values, name)
    }

    pub fn get_errors(&self) -> &Errors {
        &self.errors
    }

    pub fn get_error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Store the value carried by `event` and re-validate that field only,
    /// against the updated values. Events for undeclared fields are ignored.
    ///
    pub fn on_field_change(&mut self, name: &str, event: FieldEvent) -> &mut Self {
        if !self.values.contains_key(name) {
            warn!("Ignoring change of undeclared field '{}'", name);
            return self;
        }
        let value = event.into_value();
        self.values.insert(name.to_owned(), value.clone());
        self.errors = (self.validator)(&self.errors, name, &value, &self.values);
        self
    }

    /// Validate every field into a fresh error map and replace the current
    /// one. Returns whether the form is valid.
    ///
    pub fn validate_all(&mut self) -> bool {
        let errors = self
            .values
            .iter()
            .fold(Errors::new(), |errors, (name, value)| {
                (self.validator)(&errors, name, value, &self.values)
            });
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate every field and, when all are valid, hand a snapshot of the
    /// values to `submit`. A rejection is stored under `submit`; values are
    /// kept so the form can be submitted again.
    ///
    pub async fn on_submit<F, Fut, T, E>(&mut self, submit: F) -> SubmitOutcome<T>
    where
        F: FnOnce(Values) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        if !self.validate_all() {
            debug!("Submit blocked by {} invalid field(s)", self.errors.len());
            return SubmitOutcome::Invalid;
        }
        if self.values.is_empty() {
            return SubmitOutcome::Empty;
        }

        match submit(self.values.clone()).await {
            Ok(result) => SubmitOutcome::Submitted(result),
            Err(e) => {
                let message = e.to_string();
                error!("Form submission failed: {}", message);
                self.errors.insert(SUBMIT_KEY.to_owned(), message);
                SubmitOutcome::Rejected
            }
        }
    }

    /// Restore the initial values and clear every error.
    ///
    pub fn reset(&mut self) -> &mut Self {
        self.values = self.initial.clone();
        self.errors.clear();
        self
    }
}
