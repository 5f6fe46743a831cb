use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::db::models::{
    Answer, AnswerValue, CorrectAnswer, ParticipantRecord, QuestionRecord, QuestionSet,
    QuestionSetSubmission, QuestionSource, QuizRecord, QuizRef, SubmissionRecord,
};
use crate::db::types::{QuestionType, SubmissionStatus};

pub(crate) fn as_of() -> OffsetDateTime {
    datetime!(2026-10-14 12:00 UTC)
}

pub(crate) struct SubmissionBuilder {
    record: SubmissionRecord,
}

pub(crate) fn submission(id: &str) -> SubmissionBuilder {
    SubmissionBuilder::orphan(id).quiz("quiz-1", Some("Basics")).participant("u1")
}

impl SubmissionBuilder {
    /// No quiz reference and no participant.
    pub(crate) fn orphan(id: &str) -> Self {
        Self {
            record: SubmissionRecord {
                id: id.to_string(),
                quiz: None,
                participant: None,
                answers: Vec::new(),
                percentage: 0.0,
                time_taken_seconds: 0.0,
                status: SubmissionStatus::Completed,
                submitted_at: as_of() - Duration::hours(1),
                question_set_submissions: Vec::new(),
            },
        }
    }

    pub(crate) fn quiz(mut self, id: &str, title: Option<&str>) -> Self {
        self.record.quiz = Some(QuizRef { id: id.to_string(), title: title.map(str::to_string) });
        self
    }

    pub(crate) fn participant(mut self, id: &str) -> Self {
        self.record.participant = Some(ParticipantRecord {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            access_code: format!("AC-{id}"),
        });
        self
    }

    pub(crate) fn no_participant(mut self) -> Self {
        self.record.participant = None;
        self
    }

    pub(crate) fn status(mut self, status: SubmissionStatus) -> Self {
        self.record.status = status;
        self
    }

    pub(crate) fn percentage(mut self, percentage: f64) -> Self {
        self.record.percentage = percentage;
        self
    }

    pub(crate) fn time_taken(mut self, seconds: f64) -> Self {
        self.record.time_taken_seconds = seconds;
        self
    }

    pub(crate) fn at(mut self, submitted_at: OffsetDateTime) -> Self {
        self.record.submitted_at = submitted_at;
        self
    }

    pub(crate) fn days_ago(self, days: i64) -> Self {
        self.at(as_of() - Duration::days(days))
    }

    pub(crate) fn seconds_earlier(mut self, seconds: i64) -> Self {
        self.record.submitted_at -= Duration::seconds(seconds);
        self
    }

    pub(crate) fn answer(mut self, question_id: &str, value: Option<AnswerValue>, correct: bool) -> Self {
        self.record.answers.push(Answer {
            question_id: question_id.to_string(),
            given_value: value,
            is_correct: correct,
        });
        self
    }

    pub(crate) fn question_set(
        mut self,
        order: u32,
        score: f64,
        percentage: f64,
        submitted_at: OffsetDateTime,
    ) -> Self {
        self.record.question_set_submissions.push(QuestionSetSubmission {
            question_set_order: order,
            score,
            percentage,
            submitted_at,
        });
        self
    }

    pub(crate) fn build(self) -> SubmissionRecord {
        self.record
    }
}

pub(crate) fn text(value: &str) -> Option<AnswerValue> {
    Some(AnswerValue::Text(value.to_string()))
}

pub(crate) fn question(id: &str, prompt: &str, correct: Option<CorrectAnswer>) -> QuestionRecord {
    QuestionRecord {
        id: id.to_string(),
        question_text: prompt.to_string(),
        question_type: QuestionType::MultipleChoice,
        options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        correct_answer: correct,
        points: 1.0,
    }
}

pub(crate) fn flat_quiz(id: &str, title: Option<&str>, questions: Vec<QuestionRecord>) -> QuizRecord {
    QuizRecord {
        id: id.to_string(),
        title: title.map(str::to_string),
        source: QuestionSource::Flat(questions),
    }
}

pub(crate) fn batched_quiz(
    id: &str,
    title: Option<&str>,
    sets: Vec<(u32, Vec<QuestionRecord>)>,
) -> QuizRecord {
    let sets = sets
        .into_iter()
        .map(|(order, questions)| QuestionSet { order, questions })
        .collect();
    QuizRecord { id: id.to_string(), title: title.map(str::to_string), source: QuestionSource::Batched(sets) }
}
