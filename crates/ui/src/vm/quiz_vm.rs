use focus_core::model::{AnswerId, GradeReport, QuizError, QuizSheet};
use services::{ApiError, QuizSubmitError, QuizSubmitService};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(AnswerId),
    Next,
    Previous,
    Submit,
}

/// State behind the quiz page: the sheet, the inline validation message, and
/// the grading result once the server has answered.
pub struct QuizVm {
    sheet: QuizSheet,
    message: Option<String>,
    report: Option<GradeReport>,
}

impl QuizVm {
    #[must_use]
    pub fn new(sheet: QuizSheet) -> Self {
        Self {
            sheet,
            message: None,
            report: None,
        }
    }

    #[must_use]
    pub fn sheet(&self) -> &QuizSheet {
        &self.sheet
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn report(&self) -> Option<&GradeReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.report.is_some()
    }

    pub fn select(&mut self, answer: AnswerId) {
        match self.sheet.select_answer(answer) {
            Ok(()) => self.message = None,
            Err(_) => {
                self.message = Some("That choice is not part of this question.".into());
            }
        }
    }

    pub fn next(&mut self) {
        match self.sheet.next() {
            Ok(()) => self.message = None,
            Err(QuizError::CurrentUnanswered) => {
                self.message = Some("Please answer this question before moving on.".into());
            }
            Err(_) => {}
        }
    }

    pub fn previous(&mut self) {
        self.sheet.previous();
        self.message = None;
    }

    /// Submit the sheet for grading and fold the outcome back into view state.
    ///
    /// Incomplete sheets and API failures become inline messages; an in-flight
    /// rejection is dropped silently, matching a double-clicked submit button.
    pub async fn submit(&mut self, service: &QuizSubmitService) {
        match service.submit(&self.sheet).await {
            Ok(report) => {
                self.report = Some(report);
                self.message = None;
            }
            Err(QuizSubmitError::InFlight) => {}
            Err(QuizSubmitError::Unanswered { .. }) => {
                self.message = Some("Please answer all questions before submitting.".into());
            }
            Err(QuizSubmitError::Api(ApiError::Rejected(message))) => {
                self.message = Some(message);
            }
            Err(_) => {
                self.message = Some("Could not submit the quiz. Please try again.".into());
            }
        }
    }
}
