//! Wizard state types for the transfer flow.
//!
//! The wizard progresses through four steps:
//! - Method (1) → Recipient (2) → Amount (3) → Review (4)
//!
//! `next` advances only when the current step validates clean; `back` always
//! regresses. Submission phases are layered on the review step: a submit
//! attempt moves Editing → Submitting → Done or Failed; Failed may retry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::submit::{SubmissionError, TransferReceipt};
use crate::validation::ErrorMap;

/// A step of the transfer wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Step 1: source account and payout method selection.
    Method,
    /// Step 2: recipient details for the selected method.
    Recipient,
    /// Step 3: amount, currency, and schedule.
    Amount,
    /// Step 4: review and submit.
    Review,
}

impl WizardStep {
    /// 1-based step number as shown in the progress indicator.
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::Method => 1,
            Self::Recipient => 2,
            Self::Amount => 3,
            Self::Review => 4,
        }
    }

    /// The following step; `None` at the review step.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Method => Some(Self::Recipient),
            Self::Recipient => Some(Self::Amount),
            Self::Amount => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// The preceding step; `None` at the method step.
    #[must_use]
    pub const fn previous(&self) -> Option<Self> {
        match self {
            Self::Method => None,
            Self::Recipient => Some(Self::Method),
            Self::Amount => Some(Self::Recipient),
            Self::Review => Some(Self::Amount),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Method => "method",
            Self::Recipient => "recipient",
            Self::Amount => "amount",
            Self::Review => "review",
        };
        write!(f, "{name}")
    }
}

/// Submission phase, layered on the review step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPhase {
    /// Draft is editable; no submission attempted (or the last one failed and
    /// was acknowledged).
    Editing,
    /// The submission call is in flight; the wizard is non-interactive.
    Submitting,
    /// The transfer was accepted. Terminal: a new wizard instance is required
    /// for another transfer.
    Done {
        /// Receipt returned by the submission endpoint.
        receipt: TransferReceipt,
    },
    /// The submission was rejected or failed. Recoverable: `submit` may be
    /// retried with the draft intact.
    Failed {
        /// The endpoint's failure, displayed verbatim.
        reason: SubmissionError,
    },
}

impl SubmitPhase {
    /// Returns true if the wizard accepts further transitions.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Editing | Self::Failed { .. })
    }
}

/// Wizard state owned exclusively by the controller.
#[derive(Debug, Clone)]
pub struct WizardState {
    /// Current step.
    pub step: WizardStep,
    /// Field-scoped errors from the last blocked transition.
    pub errors: ErrorMap,
    /// Submission phase.
    pub phase: SubmitPhase,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::Method,
            errors: ErrorMap::new(),
            phase: SubmitPhase::Editing,
        }
    }
}

impl WizardState {
    /// Returns true if a submission call is currently in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmitPhase::Submitting)
    }
}
