use std::time::Duration;

use super::store::TokenStore;
use crate::{names, quiz::QuizFlow};

/// Quiz attempts in progress, keyed by the `quiz_session` cookie.
#[derive(Clone)]
pub struct QuizSessions {
    flows: TokenStore<QuizFlow>,
}

impl Default for QuizSessions {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(names::QUIZ_SESSION_TTL_SECS),
            names::MAX_QUIZ_SESSIONS,
        )
    }
}

impl QuizSessions {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            flows: TokenStore::new(ttl, capacity),
        }
    }

    pub fn start(&self, flow: QuizFlow) -> String {
        self.flows.insert(flow)
    }

    pub fn update<R>(&self, token: &str, f: impl FnOnce(&mut QuizFlow) -> R) -> Option<R> {
        self.flows.update(token, f)
    }

    pub fn discard(&self, token: &str) {
        self.flows.remove(token);
    }

    #[cfg(test)]
    pub fn active(&self) -> usize {
        self.flows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flows_are_isolated_per_token() {
        let sessions = QuizSessions::default();
        let a = sessions.start(QuizFlow::new(3));
        let b = sessions.start(QuizFlow::new(3));

        sessions.update(&a, |flow| flow.select(0, 'A')).unwrap().unwrap();

        assert_eq!(sessions.update(&a, |flow| flow.answer(0)), Some(Some('A')));
        assert_eq!(sessions.update(&b, |flow| flow.answer(0)), Some(None));
    }

    #[test]
    fn discarded_flow_is_gone() {
        let sessions = QuizSessions::default();
        let token = sessions.start(QuizFlow::new(1));
        sessions.discard(&token);
        assert_eq!(sessions.update(&token, |flow| flow.current()), None);
        assert_eq!(sessions.active(), 0);
    }

    #[test]
    fn abandoned_attempts_are_capped() {
        let sessions = QuizSessions::new(Duration::from_secs(60), 3);
        let first = sessions.start(QuizFlow::new(1));
        std::thread::sleep(Duration::from_millis(2));
        for _ in 0..10 {
            sessions.start(QuizFlow::new(1));
        }

        assert_eq!(sessions.active(), 3);
        assert_eq!(sessions.update(&first, |flow| flow.current()), None);
    }
}
