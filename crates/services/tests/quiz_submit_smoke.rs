use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use focus_core::model::{
    AnswerChoice, AnswerId, GradeReport, Question, QuestionId, QuizSheet,
};
use services::{ApiError, QuizApi, QuizSubmitError, QuizSubmitService};

/// Fake grading endpoint that parks each call on a gate so tests can hold a
/// submission in flight.
struct GatedApi {
    calls: AtomicUsize,
    gate: Notify,
    fail_next: AtomicBool,
}

impl GatedApi {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Notify::new(),
            fail_next: AtomicBool::new(false),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuizApi for GatedApi {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        Ok(Vec::new())
    }

    async fn grade(
        &self,
        answers: &BTreeMap<QuestionId, AnswerId>,
    ) -> Result<GradeReport, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }

        let total = u32::try_from(answers.len()).unwrap();
        Ok(GradeReport {
            score: total,
            total,
            percentage: 100,
            passed: true,
            details: Vec::new(),
        })
    }
}

fn build_sheet(len: usize) -> QuizSheet {
    let questions = (1..=len)
        .map(|n| {
            let choices = vec![
                AnswerChoice::new(AnswerId::new("a"), "Choice a"),
                AnswerChoice::new(AnswerId::new("b"), "Choice b"),
            ];
            Question::new(QuestionId::new(format!("q{n}")), format!("Question {n}?"), choices)
                .unwrap()
        })
        .collect();
    QuizSheet::new(questions).unwrap()
}

fn answer_all(sheet: &mut QuizSheet) {
    for n in 1..=sheet.total_questions() {
        sheet
            .record_answer(&QuestionId::new(format!("q{n}")), AnswerId::new("a"))
            .unwrap();
    }
}

#[tokio::test]
async fn incomplete_sheet_is_rejected_before_any_request() {
    let api = GatedApi::new();
    let service = QuizSubmitService::new(api.clone());

    // Three questions, only q1 and q3 answered.
    let mut sheet = build_sheet(3);
    sheet
        .record_answer(&QuestionId::new("q1"), AnswerId::new("a"))
        .unwrap();
    sheet
        .record_answer(&QuestionId::new("q3"), AnswerId::new("b"))
        .unwrap();

    let err = service.submit(&sheet).await.unwrap_err();
    assert!(matches!(err, QuizSubmitError::Unanswered { missing: 1 }));
    assert_eq!(api.call_count(), 0);
    assert_eq!(sheet.answered_count(), 2);
}

#[tokio::test]
async fn concurrent_submit_is_rejected_until_the_first_resolves() {
    let api = GatedApi::new();
    let service = QuizSubmitService::new(api.clone());

    let mut sheet = build_sheet(2);
    answer_all(&mut sheet);

    let first = {
        let service = service.clone();
        let sheet = sheet.clone();
        tokio::spawn(async move { service.submit(&sheet).await })
    };

    // Wait for the first submission to reach the (gated) endpoint.
    while api.call_count() == 0 {
        tokio::task::yield_now().await;
    }

    let err = service.submit(&sheet).await.unwrap_err();
    assert!(matches!(err, QuizSubmitError::InFlight));
    assert_eq!(api.call_count(), 1);

    api.gate.notify_one();
    let report = first.await.unwrap().unwrap();
    assert_eq!(report.total, 2);

    // Guard released: the next submission goes through.
    api.gate.notify_one();
    service.submit(&sheet).await.unwrap();
    assert_eq!(api.call_count(), 2);
}

#[tokio::test]
async fn cancelled_submission_releases_the_guard_for_retry() {
    let api = GatedApi::new();
    let service = QuizSubmitService::new(api.clone());

    let mut sheet = build_sheet(2);
    answer_all(&mut sheet);

    let first = {
        let service = service.clone();
        let sheet = sheet.clone();
        tokio::spawn(async move { service.submit(&sheet).await })
    };
    while api.call_count() == 0 {
        tokio::task::yield_now().await;
    }

    // Drop the submit future while the request is still parked at the gate,
    // the same way a view teardown cancels its spawned task.
    first.abort();
    let _ = first.await;

    api.gate.notify_one();
    let report = service.submit(&sheet).await.unwrap();
    assert!(report.passed);
    assert_eq!(api.call_count(), 2);
}

#[tokio::test]
async fn failed_submission_releases_the_guard_for_retry() {
    let api = GatedApi::new();
    let service = QuizSubmitService::new(api.clone());

    let mut sheet = build_sheet(2);
    answer_all(&mut sheet);

    api.fail_next.store(true, Ordering::SeqCst);
    api.gate.notify_one();
    let err = service.submit(&sheet).await.unwrap_err();
    assert!(matches!(err, QuizSubmitError::Api(ApiError::Status(_))));

    api.gate.notify_one();
    let report = service.submit(&sheet).await.unwrap();
    assert!(report.passed);
    assert_eq!(api.call_count(), 2);
}
