//! Wizard transition errors.

use thiserror::Error;

use crate::submit::PayloadError;
use paywise_shared::AppError;

/// A transition the wizard cannot perform in its current phase.
///
/// Distinct from validation errors: these indicate the caller drove the state
/// machine out of order, not that the user typed something wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The transfer was already accepted; the wizard is terminal.
    #[error("the transfer was already submitted")]
    AlreadyCompleted,
    /// A submission call is still in flight.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    /// Submission was requested away from the review step.
    #[error("submission is only available from the review step")]
    NotOnReviewStep,
    /// The draft could not be turned into a payload.
    #[error("draft cannot be submitted: {0}")]
    InvalidDraft(#[from] PayloadError),
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        Self::BusinessRule(err.to_string())
    }
}
