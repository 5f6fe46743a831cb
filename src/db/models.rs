use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::db::types::{QuestionType, SubmissionStatus};

pub(crate) const UNTITLED_QUIZ: &str = "Untitled Quiz";

/// Everything fetched for one page load; filters never re-read it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Corpus {
    pub(crate) submissions: Vec<SubmissionRecord>,
    pub(crate) quizzes: Vec<QuizRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionRecord {
    #[serde(alias = "_id")]
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) quiz: Option<QuizRef>,
    #[serde(default, alias = "user")]
    pub(crate) participant: Option<ParticipantRecord>,
    #[serde(default)]
    pub(crate) answers: Vec<Answer>,
    #[serde(default)]
    pub(crate) percentage: f64,
    #[serde(default, alias = "timeTaken")]
    pub(crate) time_taken_seconds: f64,
    #[serde(default, deserialize_with = "status_or_unknown")]
    pub(crate) status: SubmissionStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) submitted_at: OffsetDateTime,
    #[serde(default)]
    pub(crate) question_set_submissions: Vec<QuestionSetSubmission>,
}

impl SubmissionRecord {
    pub(crate) fn quiz_id(&self) -> Option<&str> {
        self.quiz.as_ref().map(|quiz| quiz.id.as_str())
    }

    pub(crate) fn participant_id(&self) -> Option<&str> {
        self.participant.as_ref().map(|participant| participant.id.as_str())
    }

    pub(crate) fn question_set(&self, order: u32) -> Option<&QuestionSetSubmission> {
        self.question_set_submissions.iter().find(|entry| entry.question_set_order == order)
    }
}

/// `null` and a missing status both land outside the completed subset.
fn status_or_unknown<'de, D>(deserializer: D) -> Result<SubmissionStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SubmissionStatus>::deserialize(deserializer)?.unwrap_or_default())
}

/// Quiz reference as embedded in a submission. Unpopulated references arrive as a bare id.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawReference<QuizDocument>")]
pub(crate) struct QuizRef {
    pub(crate) id: String,
    pub(crate) title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawReference<ParticipantDocument>")]
pub(crate) struct ParticipantRecord {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) access_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReference<T> {
    Id(String),
    Document(T),
}

#[derive(Debug, Deserialize)]
struct QuizDocument {
    #[serde(alias = "_id")]
    id: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantDocument {
    #[serde(alias = "_id")]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    access_code: String,
}

impl From<RawReference<QuizDocument>> for QuizRef {
    fn from(raw: RawReference<QuizDocument>) -> Self {
        match raw {
            RawReference::Id(id) => Self { id, title: None },
            RawReference::Document(doc) => Self { id: doc.id, title: doc.title },
        }
    }
}

impl From<RawReference<ParticipantDocument>> for ParticipantRecord {
    fn from(raw: RawReference<ParticipantDocument>) -> Self {
        match raw {
            RawReference::Id(id) => Self { id, email: String::new(), access_code: String::new() },
            RawReference::Document(doc) => {
                Self { id: doc.id, email: doc.email, access_code: doc.access_code }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Answer {
    pub(crate) question_id: String,
    #[serde(default, alias = "answer")]
    pub(crate) given_value: Option<AnswerValue>,
    #[serde(default)]
    pub(crate) is_correct: bool,
}

impl Answer {
    /// Null, missing and empty-string answers are skips.
    pub(crate) fn is_skipped(&self) -> bool {
        match &self.given_value {
            None => true,
            Some(AnswerValue::Text(text)) => text.is_empty(),
            Some(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub(crate) enum AnswerValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Choices(Vec<String>),
    /// Any other JSON shape (objects, numeric arrays); still an answered question.
    Other(Value),
}

impl AnswerValue {
    /// Frequency-table key; multi-select answers collapse to `a,b`.
    pub(crate) fn normalized(&self) -> String {
        match self {
            AnswerValue::Flag(flag) => flag.to_string(),
            AnswerValue::Number(number) => number.to_string(),
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::Choices(choices) => choices.join(","),
            AnswerValue::Other(Value::Array(items)) => {
                items.iter().map(json_label).collect::<Vec<_>>().join(",")
            }
            AnswerValue::Other(value) => value.to_string(),
        }
    }
}

fn json_label(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionSetSubmission {
    pub(crate) question_set_order: u32,
    #[serde(default)]
    pub(crate) score: f64,
    #[serde(default)]
    pub(crate) percentage: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) submitted_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawQuizRecord")]
pub(crate) struct QuizRecord {
    pub(crate) id: String,
    pub(crate) title: Option<String>,
    pub(crate) source: QuestionSource,
}

impl QuizRecord {
    pub(crate) fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED_QUIZ)
    }
}

/// A quiz carries either one flat list or ordered batches, never both.
#[derive(Debug, Clone)]
pub(crate) enum QuestionSource {
    Flat(Vec<QuestionRecord>),
    Batched(Vec<QuestionSet>),
}

impl QuestionSource {
    pub(crate) fn questions(&self) -> Box<dyn Iterator<Item = &QuestionRecord> + '_> {
        match self {
            QuestionSource::Flat(questions) => Box::new(questions.iter()),
            QuestionSource::Batched(sets) => Box::new(sets.iter().flat_map(|set| set.questions.iter())),
        }
    }

    pub(crate) fn question_count(&self) -> usize {
        self.questions().count()
    }

    pub(crate) fn question_set_orders(&self) -> Vec<u32> {
        match self {
            QuestionSource::Flat(_) => Vec::new(),
            QuestionSource::Batched(sets) => {
                let mut orders: Vec<u32> = sets.iter().map(|set| set.order).collect();
                orders.sort_unstable();
                orders
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionSet {
    #[serde(alias = "questionSetOrder")]
    pub(crate) order: u32,
    #[serde(default)]
    pub(crate) questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionRecord {
    #[serde(alias = "_id")]
    pub(crate) id: String,
    #[serde(default, alias = "text", alias = "question")]
    pub(crate) question_text: String,
    #[serde(rename = "type")]
    pub(crate) question_type: QuestionType,
    #[serde(default)]
    pub(crate) options: Vec<String>,
    #[serde(default)]
    pub(crate) correct_answer: Option<CorrectAnswer>,
    #[serde(default)]
    pub(crate) points: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum CorrectAnswer {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl CorrectAnswer {
    pub(crate) fn display(&self) -> String {
        match self {
            CorrectAnswer::Flag(true) => "True".to_string(),
            CorrectAnswer::Flag(false) => "False".to_string(),
            CorrectAnswer::Text(text) => text.clone(),
            CorrectAnswer::List(items) => items.join(", "),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuizRecord {
    #[serde(alias = "_id")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    questions: Vec<QuestionRecord>,
    #[serde(default)]
    question_sets: Vec<QuestionSet>,
}

impl From<RawQuizRecord> for QuizRecord {
    fn from(raw: RawQuizRecord) -> Self {
        let source = if raw.question_sets.is_empty() {
            QuestionSource::Flat(raw.questions)
        } else {
            QuestionSource::Batched(raw.question_sets)
        };
        Self { id: raw.id, title: raw.title, source }
    }
}
