//! Lifecycle of a single recipe generation attempt.
//!
//! [`RecipeController`] owns the current input and the [`GenerationAttempt`]
//! record. At most one attempt is in flight at a time: triggers that arrive
//! while one is pending are ignored, not queued.

use log::{debug, error, info, warn};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ChefError;
use crate::model::Recipe;
use crate::providers::RecipeProvider;

/// Message shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "오류가 발생했습니다. 다시 시도해주세요.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// One request/response cycle, replaced wholesale on every trigger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationAttempt {
    /// Input captured when the attempt was triggered
    pub input_text: String,
    pub status: Status,
    pub recipe: Option<Recipe>,
    pub error_message: Option<String>,
}

/// What [`RecipeController::start_generation`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// An attempt ran and settled with the given status
    Completed(Status),
    /// Input was empty or whitespace only
    IgnoredEmpty,
    /// Another attempt was still pending
    IgnoredPending,
}

#[derive(Debug, Default)]
struct State {
    input: String,
    attempt: GenerationAttempt,
}

pub struct RecipeController {
    provider: Arc<dyn RecipeProvider>,
    state: Mutex<State>,
}

impl RecipeController {
    pub fn new(provider: Arc<dyn RecipeProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(State::default()),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Replace the current input text. Does not affect an attempt in flight.
    pub fn set_input(&self, text: impl Into<String>) {
        self.lock().input = text.into();
    }

    pub fn input(&self) -> String {
        self.lock().input.clone()
    }

    pub fn status(&self) -> Status {
        self.lock().attempt.status
    }

    pub fn recipe(&self) -> Option<Recipe> {
        self.lock().attempt.recipe.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().attempt.error_message.clone()
    }

    /// Copy of the current attempt record
    pub fn snapshot(&self) -> GenerationAttempt {
        self.lock().attempt.clone()
    }

    /// Run one generation attempt for the current input.
    ///
    /// No-op while another attempt is pending or when the input is blank.
    /// Otherwise resets the attempt to pending, calls the provider once, and
    /// settles to success or error. Pending is cleared even if this future is
    /// dropped before the provider answers.
    pub async fn start_generation(&self) -> StartOutcome {
        let input = {
            let mut state = self.lock();
            if state.attempt.status == Status::Pending {
                warn!("Generation already in progress, ignoring trigger");
                return StartOutcome::IgnoredPending;
            }
            if state.input.trim().is_empty() {
                debug!("Empty ingredient input, ignoring trigger");
                return StartOutcome::IgnoredEmpty;
            }
            let input = state.input.clone();
            state.attempt = GenerationAttempt {
                input_text: input.clone(),
                status: Status::Pending,
                recipe: None,
                error_message: None,
            };
            input
        };

        let guard = PendingGuard {
            state: &self.state,
            settled: false,
        };
        debug!(
            "Generating recipe with {} for: {}",
            self.provider.provider_name(),
            input
        );
        let result = self.provider.generate(&input).await;
        StartOutcome::Completed(guard.settle(result))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        lock_state(&self.state)
    }
}

fn lock_state(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The message to show for a failure, falling back when it has none
pub fn user_message(err: &dyn Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Settles the pending attempt exactly once, on completion or on drop.
struct PendingGuard<'a> {
    state: &'a Mutex<State>,
    settled: bool,
}

impl PendingGuard<'_> {
    fn settle(mut self, result: Result<Recipe, ChefError>) -> Status {
        let mut state = lock_state(self.state);
        let attempt = &mut state.attempt;
        match result {
            Ok(recipe) => {
                info!("Recipe ready: {}", recipe.recipe_name);
                attempt.recipe = Some(recipe);
                attempt.error_message = None;
                attempt.status = Status::Success;
            }
            Err(err) => {
                if err.is_recoverable() {
                    warn!("Recipe generation failed: {:?}", err);
                } else {
                    error!("Recipe provider is misconfigured: {}", err);
                }
                attempt.recipe = None;
                attempt.error_message = Some(user_message(&err));
                attempt.status = Status::Error;
            }
        }
        self.settled = true;
        attempt.status
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = lock_state(self.state);
        if state.attempt.status == Status::Pending {
            warn!("Generation attempt abandoned before it settled");
            state.attempt.status = Status::Error;
            state.attempt.error_message = Some(FALLBACK_ERROR_MESSAGE.to_string());
        }
    }
}
