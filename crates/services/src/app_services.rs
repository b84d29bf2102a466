use std::sync::Arc;

use focus_core::model::TimerConfig;

use crate::Clock;
use crate::api::QuizApi;
use crate::focus_log_service::FocusLogService;
use crate::http::{ApiConfig, CsrfToken, HttpApi};
use crate::quiz_submit_service::QuizSubmitService;

/// Assembles the client services around one shared HTTP client.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    timer_config: TimerConfig,
    focus_log: Arc<FocusLogService>,
    quiz_submit: Arc<QuizSubmitService>,
    quiz_api: Arc<dyn QuizApi>,
}

impl AppServices {
    #[must_use]
    pub fn new(
        api_config: ApiConfig,
        csrf_token: Option<CsrfToken>,
        timer_config: TimerConfig,
        clock: Clock,
    ) -> Self {
        let http = Arc::new(HttpApi::new(api_config, csrf_token));
        let focus_log = Arc::new(FocusLogService::new(http.clone()));
        let quiz_submit = Arc::new(QuizSubmitService::new(http.clone()));

        Self {
            clock,
            timer_config,
            focus_log,
            quiz_submit,
            quiz_api: http,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn timer_config(&self) -> TimerConfig {
        self.timer_config
    }

    #[must_use]
    pub fn focus_log(&self) -> Arc<FocusLogService> {
        Arc::clone(&self.focus_log)
    }

    #[must_use]
    pub fn quiz_submit(&self) -> Arc<QuizSubmitService> {
        Arc::clone(&self.quiz_submit)
    }

    #[must_use]
    pub fn quiz_api(&self) -> Arc<dyn QuizApi> {
        Arc::clone(&self.quiz_api)
    }
}
