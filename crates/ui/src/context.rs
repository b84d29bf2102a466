use std::sync::Arc;

use focus_core::model::TimerConfig;
use services::api::QuizApi;
use services::{Clock, FocusLogService, QuizSubmitService};

/// What the composition root (`crates/app`) provides to the UI.
pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn timer_config(&self) -> TimerConfig;

    fn focus_log(&self) -> Arc<FocusLogService>;
    fn quiz_submit(&self) -> Arc<QuizSubmitService>;
    fn quiz_api(&self) -> Arc<dyn QuizApi>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    timer_config: TimerConfig,

    focus_log: Arc<FocusLogService>,
    quiz_submit: Arc<QuizSubmitService>,
    quiz_api: Arc<dyn QuizApi>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            timer_config: app.timer_config(),
            focus_log: app.focus_log(),
            quiz_submit: app.quiz_submit(),
            quiz_api: app.quiz_api(),
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

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
