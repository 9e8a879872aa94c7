use std::time::Duration;

use super::store::TokenStore;
use crate::{names, quiz::QuizOutcome};

/// One-shot hand-off of a quiz outcome from the quiz page to the result
/// page. An outcome can be read exactly once; afterwards (or after it
/// expires) the token resolves to nothing.
#[derive(Clone)]
pub struct OutcomeChannel {
    outcomes: TokenStore<QuizOutcome>,
}

impl Default for OutcomeChannel {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(names::OUTCOME_TTL_SECS),
            names::MAX_PENDING_OUTCOMES,
        )
    }
}

impl OutcomeChannel {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            outcomes: TokenStore::new(ttl, capacity),
        }
    }

    pub fn put(&self, outcome: QuizOutcome) -> String {
        self.outcomes.insert(outcome)
    }

    pub fn take(&self, token: &str) -> Option<QuizOutcome> {
        self.outcomes.take(token)
    }
}
