use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

/// Pickup locations a participant can choose when claiming the prize.
///
/// Placeholder configuration: these are stand-in site names until the
/// campaign's real address list is supplied. Replace the entries here; the
/// form and its validation read only this list.
pub const PICKUP_SITES: &[&str] = &[
    "市残疾人联合会服务大厅",
    "城东街道社区服务中心",
    "城西街道社区服务中心",
    "南湖街道社区服务中心",
    "北关街道社区服务中心",
    "开发区党群服务中心",
];

pub fn is_pickup_site(site: &str) -> bool {
    PICKUP_SITES.contains(&site)
}

#[derive(Deserialize)]
struct RawQuestion {
    question: String,
    options: Vec<String>,
    answer: String,
    explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    pub label: char,
    /// Full option text as shown to the user, label included ("B. ...").
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub question: String,
    pub options: Vec<QuestionOption>,
    pub answer: char,
    pub explanation: String,
}

impl Question {
    pub fn has_label(&self, label: char) -> bool {
        self.options.iter().any(|opt| opt.label == label)
    }
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error("question bank is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("question bank has no questions")]
    Empty,
    #[error("question {index}: option {option:?} does not start with a label like \"A.\"")]
    MissingLabel { index: usize, option: String },
    #[error("question {index}: option label '{label}' is used twice")]
    DuplicateLabel { index: usize, label: char },
    #[error("question {index}: answer {answer:?} is not one of the option labels")]
    UnknownAnswer { index: usize, answer: String },
}

/// Static, ordered list of quiz questions. Questions are identified by
/// their position in the bank.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// The bank compiled into the binary.
    pub fn embedded() -> Result<Self, BankError> {
        Self::from_json(include_str!("../data/questions.json"))
    }

    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let raw: Vec<RawQuestion> = serde_json::from_str(json)?;
        if raw.is_empty() {
            return Err(BankError::Empty);
        }

        let questions = raw
            .into_iter()
            .enumerate()
            .map(|(index, q)| parse_question(index, q))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("loaded {} questions", questions.len());
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

fn parse_question(index: usize, raw: RawQuestion) -> Result<Question, BankError> {
    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(raw.options.len());

    for text in raw.options {
        let mut chars = text.chars();
        let label = match (chars.next(), chars.next()) {
            (Some(label), Some('.')) if !label.is_whitespace() => label,
            _ => return Err(BankError::MissingLabel { index, option: text }),
        };
        if !seen.insert(label) {
            return Err(BankError::DuplicateLabel { index, label });
        }
        options.push(QuestionOption { label, text });
    }

    let mut answer_chars = raw.answer.chars();
    let answer = match (answer_chars.next(), answer_chars.next()) {
        (Some(label), None) if seen.contains(&label) => label,
        _ => {
            return Err(BankError::UnknownAnswer {
                index,
                answer: raw.answer,
            })
        }
    };

    Ok(Question {
        question: raw.question,
        options,
        answer,
        explanation: raw.explanation,
    })
}
