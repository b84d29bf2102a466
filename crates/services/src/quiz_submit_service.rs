use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use focus_core::model::{GradeReport, QuizSheet};

use crate::api::QuizApi;
use crate::error::QuizSubmitError;

/// Submits a finished quiz sheet for grading.
///
/// A single-flight guard blocks concurrent submissions: while one request is
/// outstanding, further calls fail with `QuizSubmitError::InFlight`. The guard
/// is released on success, on failure, and when the submit future is dropped
/// mid-flight (a cancelled view task), so a submission always stays retryable.
#[derive(Clone)]
pub struct QuizSubmitService {
    api: Arc<dyn QuizApi>,
    in_flight: Arc<AtomicBool>,
}

/// Releases the single-flight flag on drop, which covers early returns and a
/// submit future that is cancelled while the request is outstanding.
struct FlightGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

impl QuizSubmitService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>) -> Self {
        Self {
            api,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Submit all recorded answers for grading.
    ///
    /// # Errors
    ///
    /// Returns `QuizSubmitError::InFlight` while another submission is
    /// outstanding, `QuizSubmitError::Unanswered` (before any network call)
    /// when the sheet is incomplete, and `QuizSubmitError::Api` for server or
    /// transport failures.
    pub async fn submit(&self, sheet: &QuizSheet) -> Result<GradeReport, QuizSubmitError> {
        if !sheet.is_complete() {
            return Err(QuizSubmitError::Unanswered {
                missing: sheet.unanswered_count(),
            });
        }

        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(QuizSubmitError::InFlight);
        }
        let _guard = FlightGuard {
            in_flight: Arc::clone(&self.in_flight),
        };

        Ok(self.api.grade(sheet.answers()).await?)
    }
}
