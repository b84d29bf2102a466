use std::sync::Arc;

use focus_core::model::{CompletedSession, TaskId, TimerMode};

use crate::api::{FocusLogApi, SessionLogRequest};
use crate::error::ApiError;

/// Records completed work sessions with the server.
///
/// This is a best-effort side channel: callers fire-and-forget, nothing is
/// retried, and a failure only produces a diagnostic log entry.
#[derive(Clone)]
pub struct FocusLogService {
    api: Arc<dyn FocusLogApi>,
}

impl FocusLogService {
    #[must_use]
    pub fn new(api: Arc<dyn FocusLogApi>) -> Self {
        Self { api }
    }

    /// Log a completed session, returning the updated streak when the server
    /// reports one.
    ///
    /// Break completions are never sent; they resolve to `Ok(None)` locally.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures, non-2xx statuses, and
    /// `success: false` bodies. Failures are also logged here so callers can
    /// drop the result.
    pub async fn log_completed(
        &self,
        session: &CompletedSession,
        task_id: Option<&TaskId>,
    ) -> Result<Option<u32>, ApiError> {
        if session.mode != TimerMode::Work {
            return Ok(None);
        }

        let request = SessionLogRequest {
            mode: session.mode,
            duration: session.duration_minutes,
            task_id: task_id.cloned(),
        };

        let result = self.log_inner(&request).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "failed to log focus session");
        }
        result
    }

    async fn log_inner(&self, request: &SessionLogRequest) -> Result<Option<u32>, ApiError> {
        let response = self.api.log_session(request).await?;
        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "session log rejected".into());
            return Err(ApiError::Rejected(message));
        }
        Ok(response.streak)
    }
}
