use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::features::reports::store::StoreError;
use crate::shared::constants::{DATECHECK_ERROR, INTERNAL_ERROR, NOT_FOUND_ERROR, VALIDATION_ERROR};

/// Failure kind of a report operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    DateConflict,
    NotFound,
    Store,
}

impl ErrorKind {
    /// Key the presentation layer uses to look up its message
    pub fn message_key(self) -> &'static str {
        match self {
            ErrorKind::Validation => VALIDATION_ERROR,
            ErrorKind::DateConflict => DATECHECK_ERROR,
            ErrorKind::NotFound => NOT_FOUND_ERROR,
            ErrorKind::Store => INTERNAL_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("既に登録されている日付です")]
    DateConflict {
        employee_code: String,
        report_date: NaiveDate,
    },

    #[error("Report {0} not found")]
    NotFound(Uuid),

    #[error("Report store error: {0}")]
    Store(StoreError),
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Validation(_) => ErrorKind::Validation,
            ReportError::DateConflict { .. } => ErrorKind::DateConflict,
            ReportError::NotFound(_) => ErrorKind::NotFound,
            ReportError::Store(_) => ErrorKind::Store,
        }
    }

    /// Flatten field errors into "field: message" lines, ordered by field name
    pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
        let mut fields: Vec<(String, Vec<String>)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        fields
            .into_iter()
            .flat_map(|(field, messages)| {
                messages
                    .into_iter()
                    .map(move |message| format!("{}: {}", field, message))
            })
            .collect()
    }
}

impl From<StoreError> for ReportError {
    fn from(err: StoreError) -> Self {
        match err {
            // Backstop for the check-then-write window between concurrent submissions
            StoreError::Duplicate {
                employee_code,
                report_date,
            } => ReportError::DateConflict {
                employee_code,
                report_date,
            },
            other => ReportError::Store(other),
        }
    }
}
