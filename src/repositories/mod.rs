//! Store accessors. A failing store yields an empty list, never an error.

mod json_file;

use std::path::PathBuf;

use crate::core::config::Settings;
use crate::db::models::{Corpus, QuizRecord, SubmissionRecord};

pub(crate) trait SubmissionStore {
    fn list_submissions(&self) -> Vec<SubmissionRecord>;
}

pub(crate) trait QuizStore {
    fn list_quizzes(&self) -> Vec<QuizRecord>;
}

/// Snapshot files exported from the quiz platform.
#[derive(Debug, Clone)]
pub(crate) struct JsonFileStore {
    submissions_path: PathBuf,
    quizzes_path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(submissions_path: impl Into<PathBuf>, quizzes_path: impl Into<PathBuf>) -> Self {
        Self { submissions_path: submissions_path.into(), quizzes_path: quizzes_path.into() }
    }

    pub(crate) fn from_settings(settings: &Settings) -> Self {
        let corpus = settings.corpus();
        Self::new(corpus.submissions_path.clone(), corpus.quizzes_path.clone())
    }
}

impl SubmissionStore for JsonFileStore {
    fn list_submissions(&self) -> Vec<SubmissionRecord> {
        json_file::read_records(&self.submissions_path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Submission store unavailable; using empty list");
            Vec::new()
        })
    }
}

impl QuizStore for JsonFileStore {
    fn list_quizzes(&self) -> Vec<QuizRecord> {
        json_file::read_records(&self.quizzes_path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Quiz store unavailable; using empty list");
            Vec::new()
        })
    }
}

/// Fetches both collections once.
pub(crate) fn load_corpus(submissions: &dyn SubmissionStore, quizzes: &dyn QuizStore) -> Corpus {
    let corpus =
        Corpus { submissions: submissions.list_submissions(), quizzes: quizzes.list_quizzes() };
    tracing::info!(
        submissions = corpus.submissions.len(),
        quizzes = corpus.quizzes.len(),
        "Corpus loaded"
    );
    corpus
}
