use std::collections::HashMap;

use crate::db::models::{QuestionRecord, QuizRecord};

/// A question together with the quiz it was found in.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IndexedQuestion<'a> {
    pub(crate) quiz_id: &'a str,
    pub(crate) quiz_title: &'a str,
    pub(crate) question: &'a QuestionRecord,
}

/// Lookup by question id over flat and batched quizzes alike.
#[derive(Debug, Default)]
pub(crate) struct QuestionIndex<'a> {
    entries: HashMap<&'a str, IndexedQuestion<'a>>,
}

impl<'a> QuestionIndex<'a> {
    /// A question id seen in several quizzes resolves to the last one inserted.
    pub(crate) fn build(quizzes: &'a [QuizRecord]) -> Self {
        let mut entries = HashMap::new();

        for quiz in quizzes {
            for question in quiz.source.questions() {
                let entry = IndexedQuestion {
                    quiz_id: quiz.id.as_str(),
                    quiz_title: quiz.display_title(),
                    question,
                };
                if let Some(previous) = entries.insert(question.id.as_str(), entry) {
                    tracing::debug!(
                        question_id = %question.id,
                        previous_quiz = %previous.quiz_id,
                        quiz_id = %quiz.id,
                        "question id reused across quizzes; keeping the later quiz"
                    );
                }
            }
        }

        Self { entries }
    }

    pub(crate) fn get(&self, question_id: &str) -> Option<&IndexedQuestion<'a>> {
        self.entries.get(question_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
