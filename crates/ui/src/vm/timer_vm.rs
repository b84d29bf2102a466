use focus_core::Clock;
use focus_core::model::{
    CompletedSession, FocusTimer, TickOutcome, TimerConfig, TimerMode,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerIntent {
    Start,
    Pause,
    Reset,
    /// Ask to switch mode; destructive, so it only stages the change until
    /// `ConfirmMode` or `CancelMode`.
    RequestMode(TimerMode),
    ConfirmMode,
    CancelMode,
    DismissNotice,
}

/// What the view must do with its tick task after an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    None,
    StartTick,
}

/// State behind the focus page: the timer plus the bits of presentation state
/// that survive renders (pending mode switch, completion notice, streak).
///
/// Transition logic lives here so it is testable without a DOM; the view only
/// dispatches intents and renders.
pub struct TimerVm {
    timer: FocusTimer,
    pending_mode: Option<TimerMode>,
    notice: Option<String>,
    streak: Option<u32>,
    last_completed: Option<CompletedSession>,
}

impl TimerVm {
    #[must_use]
    pub fn new(config: TimerConfig, clock: Clock) -> Self {
        Self {
            timer: FocusTimer::new(config, clock),
            pending_mode: None,
            notice: None,
            streak: None,
            last_completed: None,
        }
    }

    #[must_use]
    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub fn pending_mode(&self) -> Option<TimerMode> {
        self.pending_mode
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn streak(&self) -> Option<u32> {
        self.streak
    }

    pub fn set_streak(&mut self, streak: u32) {
        self.streak = Some(streak);
    }

    #[must_use]
    pub fn last_completed(&self) -> Option<&CompletedSession> {
        self.last_completed.as_ref()
    }

    /// Intents whose tick task must be cancelled before the state mutates,
    /// so a stale callback can never land on the new counter.
    #[must_use]
    pub fn stops_tick(intent: TimerIntent) -> bool {
        matches!(
            intent,
            TimerIntent::Pause | TimerIntent::Reset | TimerIntent::ConfirmMode
        )
    }

    pub fn apply(&mut self, intent: TimerIntent) -> TimerCommand {
        match intent {
            TimerIntent::Start => {
                if self.timer.start() {
                    self.notice = None;
                    return TimerCommand::StartTick;
                }
            }
            TimerIntent::Pause => {
                self.timer.pause();
            }
            TimerIntent::Reset => {
                self.timer.reset();
            }
            TimerIntent::RequestMode(mode) => {
                if mode != self.timer.mode() {
                    self.pending_mode = Some(mode);
                }
            }
            TimerIntent::ConfirmMode => {
                if let Some(mode) = self.pending_mode.take() {
                    self.timer.change_mode(mode);
                }
            }
            TimerIntent::CancelMode => {
                self.pending_mode = None;
            }
            TimerIntent::DismissNotice => {
                self.notice = None;
            }
        }
        TimerCommand::None
    }

    /// One-second tick from the view's schedule.
    ///
    /// On a run-down the completion notice is set first, then the timer is
    /// re-armed at full duration in the same mode, and the completed session
    /// is handed back so the view can fire the log request.
    pub fn tick(&mut self) -> Option<CompletedSession> {
        match self.timer.tick() {
            TickOutcome::Completed(session) => {
                self.notice = Some(match session.mode {
                    TimerMode::Work => "Focus session complete!".to_string(),
                    TimerMode::ShortBreak | TimerMode::LongBreak => {
                        "Break complete!".to_string()
                    }
                });
                self.last_completed = Some(session.clone());
                self.timer.reset();
                Some(session)
            }
            TickOutcome::Running { .. } | TickOutcome::Ignored => None,
        }
    }
}
