//! Four-step transfer wizard.

mod controller;
mod error;
mod types;

#[cfg(test)]
mod tests;

pub use controller::WizardController;
pub use error::WizardError;
pub use types::{SubmitPhase, WizardState, WizardStep};
