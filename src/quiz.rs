use std::collections::BTreeMap;

use rust_i18n::t;
use thiserror::Error;

use crate::models::QuestionBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("answer required")]
    AnswerRequired,
    #[error("not every question has been answered")]
    Incomplete,
    #[error("already at the last question")]
    NoNextQuestion,
    #[error("question {0} does not exist")]
    UnknownQuestion(usize),
}

impl QuizError {
    pub fn message(&self, locale: &str) -> String {
        match self {
            QuizError::AnswerRequired => t!("quiz.answer_required", locale = locale),
            QuizError::Incomplete => t!("quiz.incomplete", locale = locale),
            QuizError::NoNextQuestion => t!("quiz.no_next", locale = locale),
            QuizError::UnknownQuestion(_) => t!("quiz.unknown_question", locale = locale),
        }
        .to_string()
    }
}

/// Verdict of one quiz attempt. `wrong_indices` is in bank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub success: bool,
    pub wrong_indices: Vec<usize>,
}

/// Navigation and answer state of a single quiz attempt.
///
/// The answer map only ever holds explicitly selected options; selecting
/// again for the same question overwrites the previous label.
#[derive(Debug, Clone)]
pub struct QuizFlow {
    total: usize,
    current: usize,
    answers: BTreeMap<usize, char>,
    error: Option<QuizError>,
}

impl QuizFlow {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            current: 0,
            answers: BTreeMap::new(),
            error: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total
    }

    pub fn answer(&self, index: usize) -> Option<char> {
        self.answers.get(&index).copied()
    }

    pub fn current_answer(&self) -> Option<char> {
        self.answer(self.current)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Pending validation error, cleared by the next successful action.
    pub fn error(&self) -> Option<QuizError> {
        self.error
    }

    pub fn select(&mut self, index: usize, label: char) -> Result<(), QuizError> {
        if index >= self.total {
            return Err(QuizError::UnknownQuestion(index));
        }
        self.answers.insert(index, label);
        self.error = None;
        Ok(())
    }

    pub fn advance(&mut self) -> Result<(), QuizError> {
        if self.current_answer().is_none() {
            return Err(self.fail(QuizError::AnswerRequired));
        }
        if self.is_last() {
            return Err(self.fail(QuizError::NoNextQuestion));
        }
        self.current += 1;
        self.error = None;
        Ok(())
    }

    pub fn retreat(&mut self) {
        self.current = self.current.saturating_sub(1);
        self.error = None;
    }

    /// Scores the attempt against `bank`, comparing labels exactly.
    pub fn submit(&mut self, bank: &QuestionBank) -> Result<QuizOutcome, QuizError> {
        if self.current_answer().is_none() {
            return Err(self.fail(QuizError::AnswerRequired));
        }
        if self.answers.len() < self.total {
            return Err(self.fail(QuizError::Incomplete));
        }

        let wrong_indices: Vec<usize> = bank
            .iter()
            .enumerate()
            .filter(|(idx, q)| self.answer(*idx) != Some(q.answer))
            .map(|(idx, _)| idx)
            .collect();

        self.error = None;
        Ok(QuizOutcome {
            success: wrong_indices.is_empty(),
            wrong_indices,
        })
    }

    fn fail(&mut self, error: QuizError) -> QuizError {
        self.error = Some(error);
        error
    }
}
