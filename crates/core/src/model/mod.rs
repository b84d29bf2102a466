mod grade;
mod ids;
pub mod quiz;
pub mod timer;

pub use grade::{AnswerDetail, GradeReport};
pub use ids::{AnswerId, QuestionId, TaskId};

pub use quiz::{AnswerChoice, Question, QuizError, QuizProgress, QuizSheet};
pub use timer::{
    CompletedSession, FocusTimer, TickOutcome, TimerConfig, TimerError, TimerMode, TimerPhase,
};
