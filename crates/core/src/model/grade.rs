use serde::Deserialize;

/// Per-question breakdown in a grading response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerDetail {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Grading result returned by the server.
///
/// The client renders this verbatim; it never grades locally. Field names
/// match the server response exactly. Older servers omit `details`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GradeReport {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub passed: bool,
    #[serde(default)]
    pub details: Vec<AnswerDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_server_response() {
        let json = r#"{
            "score": 4,
            "total": 5,
            "percentage": 80,
            "passed": true,
            "details": [
                {
                    "question": "What is ownership?",
                    "user_answer": "A memory model",
                    "correct_answer": "A memory model",
                    "is_correct": true
                }
            ]
        }"#;

        let report: GradeReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.score, 4);
        assert_eq!(report.percentage, 80);
        assert!(report.passed);
        assert_eq!(report.details.len(), 1);
        assert!(report.details[0].is_correct);
    }

    #[test]
    fn deserializes_response_without_details() {
        let json = r#"{"score": 2, "total": 5, "percentage": 40, "passed": false}"#;
        let report: GradeReport = serde_json::from_str(json).unwrap();
        assert!(!report.passed);
        assert!(report.details.is_empty());
    }
}
