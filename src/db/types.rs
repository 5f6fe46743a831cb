use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum SubmissionStatus {
    Scheduled,
    InProgress,
    AutoGraded,
    Completed,
    Abandoned,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SubmissionStatus {
    /// Graded attempts: the only ones that feed score and time averages.
    pub(crate) fn is_completed(self) -> bool {
        matches!(self, SubmissionStatus::AutoGraded | SubmissionStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Essay,
    FillBlank,
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_kebab_case_and_tolerates_unknown() {
        let parsed: Vec<SubmissionStatus> =
            serde_json::from_str(r#"["auto-graded","in-progress","graded-later"]"#)
                .expect("statuses");
        assert_eq!(
            parsed,
            vec![SubmissionStatus::AutoGraded, SubmissionStatus::InProgress, SubmissionStatus::Unknown]
        );
    }

    #[test]
    fn only_graded_statuses_count_as_completed() {
        assert!(SubmissionStatus::AutoGraded.is_completed());
        assert!(SubmissionStatus::Completed.is_completed());
        assert!(!SubmissionStatus::Scheduled.is_completed());
        assert!(!SubmissionStatus::InProgress.is_completed());
        assert!(!SubmissionStatus::Abandoned.is_completed());
        assert!(!SubmissionStatus::Unknown.is_completed());
    }
}
