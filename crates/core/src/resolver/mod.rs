//! Debounced asynchronous recipient identifier lookup.
//!
//! A worker task owns the debounce and in-flight state machine: after the
//! input reaches a minimum length and the debounce window elapses with no
//! further edits, exactly one lookup is issued. Edits inside the window
//! restart it. An edit during an in-flight lookup does not cancel the network
//! call, but the result is applied only if the input at completion still
//! matches the input that triggered the call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use paywise_shared::config::ResolverConfig;
use paywise_shared::AppError;

/// Display data returned for a successfully resolved identifier.
///
/// A display hint only; the backend re-verifies the recipient on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIdentifier {
    /// Display name of the account holder.
    pub name: String,
    /// Whether the account has passed identity verification.
    pub verified: bool,
}

/// Errors from the external lookup service.
///
/// "No such account" is not an error; it is `Ok(None)` from the service and
/// becomes [`ResolutionState::NotFound`].
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The lookup service could not be reached or answered abnormally.
    #[error("Lookup service unavailable: {0}")]
    Unavailable(String),
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        Self::LookupService(err.to_string())
    }
}

/// Current state of identifier resolution for the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ResolutionState {
    /// No lookup has been attempted for the current input.
    Idle,
    /// A lookup is in flight for `input`.
    Pending {
        /// The input that triggered the lookup.
        input: String,
    },
    /// The identifier exists.
    Resolved {
        /// The input that was resolved.
        input: String,
        /// Display name of the account holder.
        name: String,
        /// Whether the account is identity-verified.
        verified: bool,
    },
    /// No account matches the identifier.
    NotFound {
        /// The input that was looked up.
        input: String,
    },
    /// The lookup service failed.
    Failed {
        /// The input that was being looked up.
        input: String,
        /// Service error message.
        message: String,
    },
}

impl ResolutionState {
    /// Returns true if this state is a successful resolution of `input`.
    #[must_use]
    pub fn is_resolved_for(&self, input: &str) -> bool {
        matches!(self, Self::Resolved { input: resolved, .. } if resolved == input)
    }

    /// The input this state refers to, if any.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Pending { input }
            | Self::Resolved { input, .. }
            | Self::NotFound { input }
            | Self::Failed { input, .. } => Some(input),
        }
    }
}

/// External identifier lookup service.
#[async_trait]
pub trait IdentifierLookup: Send + Sync {
    /// Looks up a platform account handle.
    ///
    /// Returns `Ok(None)` when no account matches.
    async fn resolve(&self, input: &str) -> Result<Option<ResolvedIdentifier>, LookupError>;
}

/// Resolver tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct ResolverSettings {
    /// Quiet window after the last edit before a lookup is issued.
    pub debounce: Duration,
    /// Minimum identifier length before any lookup is attempted.
    pub min_input_len: usize,
}

impl From<&ResolverConfig> for ResolverSettings {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            min_input_len: config.min_input_len,
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from(&ResolverConfig::default())
    }
}

/// Handle to the resolver worker.
///
/// Dropping the handle aborts the worker; any in-flight lookup is abandoned.
#[derive(Debug)]
pub struct IdentifierResolver {
    edits: mpsc::UnboundedSender<String>,
    state: watch::Receiver<ResolutionState>,
    worker: JoinHandle<()>,
}

impl IdentifierResolver {
    /// Spawns the resolver worker on the current tokio runtime.
    #[must_use]
    pub fn spawn(lookup: Arc<dyn IdentifierLookup>, settings: ResolverSettings) -> Self {
        let (edits_tx, edits_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ResolutionState::Idle);
        let worker = tokio::spawn(run_worker(lookup, settings, edits_rx, state_tx));
        Self {
            edits: edits_tx,
            state: state_rx,
            worker,
        }
    }

    /// Records a keystroke; restarts the debounce window.
    pub fn note_edit(&self, value: &str) {
        let _ = self.edits.send(value.to_string());
    }

    /// Snapshot of the current resolution state.
    #[must_use]
    pub fn state(&self) -> ResolutionState {
        self.state.borrow().clone()
    }

    /// Subscribes to resolution state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResolutionState> {
        self.state.clone()
    }
}

impl Drop for IdentifierResolver {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

/// The resolver state machine. At most one lookup is ever in flight.
async fn run_worker(
    lookup: Arc<dyn IdentifierLookup>,
    settings: ResolverSettings,
    mut edits: mpsc::UnboundedReceiver<String>,
    state: watch::Sender<ResolutionState>,
) {
    'idle: loop {
        let Some(mut latest) = edits.recv().await else {
            return;
        };

        'active: loop {
            if latest.chars().count() < settings.min_input_len {
                let _ = state.send(ResolutionState::Idle);
                continue 'idle;
            }

            // Debounce window; any edit restarts it.
            let deadline = Instant::now() + settings.debounce;
            loop {
                tokio::select! {
                    edit = edits.recv() => match edit {
                        Some(value) => {
                            latest = value;
                            continue 'active;
                        }
                        None => return,
                    },
                    () = time::sleep_until(deadline) => break,
                }
            }

            let issued = latest.clone();
            debug!(input = %issued, "Issuing identifier lookup");
            let _ = state.send(ResolutionState::Pending {
                input: issued.clone(),
            });

            let mut lookup_fut = lookup.resolve(&issued);

            // In flight: keep accepting edits, never cancel the call.
            loop {
                tokio::select! {
                    result = &mut lookup_fut => {
                        if issued != latest {
                            // Input changed while in flight; the result no
                            // longer matches what the user typed.
                            debug!(input = %issued, "Dropping stale lookup result");
                            continue 'active;
                        }
                        let next = match result {
                            Ok(Some(found)) => ResolutionState::Resolved {
                                input: issued.clone(),
                                name: found.name,
                                verified: found.verified,
                            },
                            Ok(None) => ResolutionState::NotFound {
                                input: issued.clone(),
                            },
                            Err(err) => {
                                warn!(input = %issued, error = %err, "Identifier lookup failed");
                                ResolutionState::Failed {
                                    input: issued.clone(),
                                    message: err.to_string(),
                                }
                            }
                        };
                        let _ = state.send(next);
                        continue 'idle;
                    }
                    edit = edits.recv() => match edit {
                        Some(value) => latest = value,
                        None => return,
                    },
                }
            }
        }
    }
}
