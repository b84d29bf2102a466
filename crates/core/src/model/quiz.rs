use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::{AnswerId, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("question {question} has no answer choices")]
    NoChoices { question: QuestionId },

    #[error("current question has no recorded answer")]
    CurrentUnanswered,

    #[error("answer {answer} is not a choice for question {question}")]
    UnknownChoice {
        question: QuestionId,
        answer: AnswerId,
    },

    #[error("no question with id {question}")]
    UnknownQuestion { question: QuestionId },
}

/// One selectable answer within a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerChoice {
    id: AnswerId,
    text: String,
}

impl AnswerChoice {
    #[must_use]
    pub fn new(id: AnswerId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Server-supplied question. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    answers: Vec<AnswerChoice>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuizError::NoChoices` for a question without answer choices.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        answers: Vec<AnswerChoice>,
    ) -> Result<Self, QuizError> {
        if answers.is_empty() {
            return Err(QuizError::NoChoices { question: id });
        }
        Ok(Self {
            id,
            text: text.into(),
            answers,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerChoice] {
        &self.answers
    }
}

/// Progress of a quiz attempt, always derived from the answer map so
/// out-of-order answering counts correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub answered: usize,
    pub total: usize,
}

impl QuizProgress {
    /// Answered share as a percentage in `[0, 100]`.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.answered as f64 / self.total as f64) * 100.0
    }
}

/// In-memory quiz attempt: a fixed question list, a cursor, and one recorded
/// answer per question (last selection wins).
#[derive(Debug, Clone)]
pub struct QuizSheet {
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<QuestionId, AnswerId>,
}

impl QuizSheet {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` when no questions are provided.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        Ok(Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question the cursor is on. The cursor is always in bounds.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<QuestionId, AnswerId> {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, question: &QuestionId) -> Option<&AnswerId> {
        self.answers.get(question)
    }

    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        self.answers.contains_key(self.current_question().id())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Questions still without an answer.
    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.questions.len() - self.answers.len()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            answered: self.answers.len(),
            total: self.questions.len(),
        }
    }

    /// Record an answer for the current question, overwriting any prior one.
    /// Never advances the cursor.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownChoice` when the id is not one of the
    /// current question's choices.
    pub fn select_answer(&mut self, answer: AnswerId) -> Result<(), QuizError> {
        let question_id = self.current_question().id().clone();
        self.record_answer(&question_id, answer)
    }

    /// Record an answer for any question by id, overwriting any prior one.
    ///
    /// Every question's inputs stay live even when its card is hidden, so an
    /// answer can land on a question the cursor is not on.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownQuestion` for an id outside this sheet and
    /// `QuizError::UnknownChoice` when the answer is not one of that
    /// question's choices.
    pub fn record_answer(
        &mut self,
        question: &QuestionId,
        answer: AnswerId,
    ) -> Result<(), QuizError> {
        let Some(target) = self.questions.iter().find(|q| q.id() == question) else {
            return Err(QuizError::UnknownQuestion {
                question: question.clone(),
            });
        };
        if !target.answers().iter().any(|choice| *choice.id() == answer) {
            return Err(QuizError::UnknownChoice {
                question: question.clone(),
                answer,
            });
        }
        self.answers.insert(question.clone(), answer);
        Ok(())
    }

    /// Advance to the next question, bounded at the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::CurrentUnanswered` (with the cursor unchanged) when
    /// the current question has no recorded answer.
    pub fn next(&mut self) -> Result<(), QuizError> {
        if !self.is_current_answered() {
            return Err(QuizError::CurrentUnanswered);
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
        Ok(())
    }

    /// Go back one question, bounded at the first one. No answer requirement.
    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_question(n: usize) -> Question {
        let choices = ["a", "b", "c", "d"]
            .iter()
            .map(|id| AnswerChoice::new(AnswerId::new(*id), format!("Choice {id}")))
            .collect();
        Question::new(QuestionId::new(format!("q{n}")), format!("Question {n}?"), choices)
            .unwrap()
    }

    fn build_sheet(len: usize) -> QuizSheet {
        QuizSheet::new((1..=len).map(build_question).collect()).unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        assert!(matches!(QuizSheet::new(Vec::new()), Err(QuizError::Empty)));
    }

    #[test]
    fn question_without_choices_is_rejected() {
        let err = Question::new(QuestionId::new("q1"), "Q?", Vec::new()).unwrap_err();
        assert!(matches!(err, QuizError::NoChoices { .. }));
    }

    #[test]
    fn next_is_blocked_until_current_is_answered() {
        let mut sheet = build_sheet(3);

        let err = sheet.next().unwrap_err();
        assert_eq!(err, QuizError::CurrentUnanswered);
        assert_eq!(sheet.current_index(), 0);

        sheet.select_answer(AnswerId::new("a")).unwrap();
        sheet.next().unwrap();
        assert_eq!(sheet.current_index(), 1);
    }

    #[test]
    fn next_is_bounded_at_the_last_question() {
        let mut sheet = build_sheet(2);
        sheet.select_answer(AnswerId::new("a")).unwrap();
        sheet.next().unwrap();
        sheet.select_answer(AnswerId::new("b")).unwrap();
        sheet.next().unwrap();
        assert_eq!(sheet.current_index(), 1);
    }

    #[test]
    fn previous_needs_no_answer_and_is_bounded() {
        let mut sheet = build_sheet(2);
        sheet.previous();
        assert_eq!(sheet.current_index(), 0);

        sheet.select_answer(AnswerId::new("c")).unwrap();
        sheet.next().unwrap();
        sheet.previous();
        assert_eq!(sheet.current_index(), 0);
    }

    #[test]
    fn selecting_again_overwrites_without_advancing() {
        let mut sheet = build_sheet(2);
        sheet.select_answer(AnswerId::new("a")).unwrap();
        sheet.select_answer(AnswerId::new("d")).unwrap();

        assert_eq!(sheet.current_index(), 0);
        assert_eq!(sheet.answered_count(), 1);
        assert_eq!(
            sheet.answer_for(&QuestionId::new("q1")),
            Some(&AnswerId::new("d"))
        );
    }

    #[test]
    fn unknown_choice_is_rejected_and_nothing_is_recorded() {
        let mut sheet = build_sheet(1);
        let err = sheet.select_answer(AnswerId::new("z")).unwrap_err();
        assert!(matches!(err, QuizError::UnknownChoice { .. }));
        assert_eq!(sheet.answered_count(), 0);
    }

    #[test]
    fn record_answer_reaches_questions_off_cursor() {
        let mut sheet = build_sheet(3);
        sheet
            .record_answer(&QuestionId::new("q3"), AnswerId::new("b"))
            .unwrap();

        assert_eq!(sheet.current_index(), 0);
        assert_eq!(sheet.answered_count(), 1);
        assert!(!sheet.is_current_answered());

        let err = sheet
            .record_answer(&QuestionId::new("q9"), AnswerId::new("a"))
            .unwrap_err();
        assert!(matches!(err, QuizError::UnknownQuestion { .. }));
    }

    #[test]
    fn progress_follows_the_answer_map_not_the_cursor() {
        let mut sheet = build_sheet(4);

        // Answer q1, skip ahead with previous/next games, then answer q3.
        sheet.select_answer(AnswerId::new("a")).unwrap();
        sheet.next().unwrap();
        sheet.next().unwrap_err();
        sheet.select_answer(AnswerId::new("b")).unwrap();
        sheet.next().unwrap();
        sheet.select_answer(AnswerId::new("c")).unwrap();
        sheet.previous();
        sheet.previous();

        let progress = sheet.progress();
        assert_eq!(progress.answered, 3);
        assert_eq!(progress.total, 4);
        assert!((progress.percent() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overwriting_answers_keeps_progress_stable() {
        let mut sheet = build_sheet(3);
        sheet.select_answer(AnswerId::new("a")).unwrap();
        sheet.select_answer(AnswerId::new("b")).unwrap();
        assert!((sheet.progress().percent() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn completeness_requires_every_question() {
        let mut sheet = build_sheet(3);
        sheet.select_answer(AnswerId::new("a")).unwrap();
        sheet.next().unwrap();
        sheet.next().unwrap_err();
        assert!(!sheet.is_complete());
        assert_eq!(sheet.unanswered_count(), 2);

        sheet.select_answer(AnswerId::new("b")).unwrap();
        sheet.next().unwrap();
        sheet.select_answer(AnswerId::new("c")).unwrap();
        assert!(sheet.is_complete());
        assert_eq!(sheet.unanswered_count(), 0);
    }
}
