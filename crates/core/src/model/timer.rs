use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::time::Clock;

/// Short breaks are always five minutes; only work and long-break lengths are
/// user-configurable.
pub const SHORT_BREAK_MINUTES: u32 = 5;

const DEFAULT_WORK_MINUTES: u32 = 25;
const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimerError {
    #[error("{which} duration must be at least one minute")]
    ZeroDuration { which: &'static str },
}

/// The three countdown modes of the focus cycle.
///
/// Serialized names match the server's session-log wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerMode {
    #[serde(rename = "pomodoro")]
    Work,
    #[serde(rename = "short_break")]
    ShortBreak,
    #[serde(rename = "long_break")]
    LongBreak,
}

impl TimerMode {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Work => "Focus",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    #[must_use]
    pub fn all() -> [TimerMode; 3] {
        [TimerMode::Work, TimerMode::ShortBreak, TimerMode::LongBreak]
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-user timer durations, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    work_minutes: u32,
    long_break_minutes: u32,
}

impl TimerConfig {
    /// Build a config from the user's settings.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::ZeroDuration` when either duration is zero.
    pub fn new(work_minutes: u32, long_break_minutes: u32) -> Result<Self, TimerError> {
        if work_minutes == 0 {
            return Err(TimerError::ZeroDuration { which: "work" });
        }
        if long_break_minutes == 0 {
            return Err(TimerError::ZeroDuration { which: "long break" });
        }
        Ok(Self {
            work_minutes,
            long_break_minutes,
        })
    }

    #[must_use]
    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    #[must_use]
    pub fn long_break_minutes(&self) -> u32 {
        self.long_break_minutes
    }

    /// Resolved duration for a mode.
    #[must_use]
    pub fn duration_minutes(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_minutes,
            TimerMode::ShortBreak => SHORT_BREAK_MINUTES,
            TimerMode::LongBreak => self.long_break_minutes,
        }
    }

    /// Short blurb shown under the timer for a mode.
    #[must_use]
    pub fn description(&self, mode: TimerMode) -> String {
        match mode {
            TimerMode::Work => format!("Stay focused for {} minutes", self.work_minutes),
            TimerMode::ShortBreak => format!("Refresh for {SHORT_BREAK_MINUTES} minutes"),
            TimerMode::LongBreak => {
                format!("Take a deep {}-minute rest", self.long_break_minutes)
            }
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

/// Record of a countdown that ran all the way to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSession {
    pub mode: TimerMode,
    pub duration_minutes: u32,
    pub completed_at: DateTime<Utc>,
}

/// Outcome of advancing the timer by one second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed. A tick that arrives after a
    /// pause, reset, or mode change lands here instead of on the new state.
    Ignored,
    Running { remaining_seconds: u32 },
    Completed(CompletedSession),
}

/// Single active countdown, one mode at a time.
///
/// Pure state machine: the caller owns the one-second schedule and feeds
/// `tick()`. Completion stops the countdown with `remaining_seconds` at zero;
/// re-arming for the next run is the caller's `reset()`.
#[derive(Debug, Clone)]
pub struct FocusTimer {
    config: TimerConfig,
    clock: Clock,
    mode: TimerMode,
    phase: TimerPhase,
    remaining_seconds: u32,
    initial_seconds: u32,
}

impl FocusTimer {
    /// Fresh timer in Work mode, idle, at full duration.
    #[must_use]
    pub fn new(config: TimerConfig, clock: Clock) -> Self {
        let initial = config.duration_minutes(TimerMode::Work) * 60;
        Self {
            config,
            clock,
            mode: TimerMode::Work,
            phase: TimerPhase::Idle,
            remaining_seconds: initial,
            initial_seconds: initial,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn initial_seconds(&self) -> u32 {
        self.initial_seconds
    }

    /// Fraction of the countdown already elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.initial_seconds == 0 {
            return 0.0;
        }
        f64::from(self.initial_seconds - self.remaining_seconds) / f64::from(self.initial_seconds)
    }

    /// Idle/Paused -> Running. Returns false (no-op) when already running.
    pub fn start(&mut self) -> bool {
        if self.phase == TimerPhase::Running {
            return false;
        }
        self.phase = TimerPhase::Running;
        true
    }

    /// Running -> Paused, keeping `remaining_seconds` intact.
    /// Returns false (no-op) in any other phase.
    pub fn pause(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.phase = TimerPhase::Paused;
        true
    }

    /// Any phase -> Idle at the current mode's full duration.
    pub fn reset(&mut self) {
        self.load_mode(self.mode);
    }

    /// Any phase -> Idle in `mode` at its full duration. Discards progress;
    /// asking the user first is the caller's job.
    pub fn change_mode(&mut self, mode: TimerMode) {
        self.load_mode(mode);
    }

    fn load_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.phase = TimerPhase::Idle;
        self.initial_seconds = self.config.duration_minutes(mode) * 60;
        self.remaining_seconds = self.initial_seconds;
    }

    /// Advance the countdown by one second.
    ///
    /// On reaching zero the phase drops to Idle and `remaining_seconds` stays
    /// at zero, so a run-down yields exactly one `Completed` and later ticks
    /// are `Ignored`.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != TimerPhase::Running {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return TickOutcome::Running {
                remaining_seconds: self.remaining_seconds,
            };
        }

        self.phase = TimerPhase::Idle;
        TickOutcome::Completed(CompletedSession {
            mode: self.mode,
            duration_minutes: self.config.duration_minutes(self.mode),
            completed_at: self.clock.now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{fixed_clock, fixed_now};

    fn work_timer(minutes: u32) -> FocusTimer {
        let config = TimerConfig::new(minutes, 15).unwrap();
        FocusTimer::new(config, fixed_clock())
    }

    #[test]
    fn new_timer_is_idle_in_work_mode_at_full_duration() {
        let timer = work_timer(25);
        assert_eq!(timer.mode(), TimerMode::Work);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining_seconds(), 25 * 60);
        assert_eq!(timer.initial_seconds(), 25 * 60);
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn zero_duration_config_is_rejected() {
        let err = TimerConfig::new(0, 15).unwrap_err();
        assert!(matches!(err, TimerError::ZeroDuration { which: "work" }));
        let err = TimerConfig::new(25, 0).unwrap_err();
        assert!(matches!(
            err,
            TimerError::ZeroDuration {
                which: "long break"
            }
        ));
    }

    #[test]
    fn start_is_a_noop_while_running() {
        let mut timer = work_timer(25);
        assert!(timer.start());
        assert!(!timer.start());
        assert_eq!(timer.phase(), TimerPhase::Running);
    }

    #[test]
    fn full_run_down_completes_exactly_once_and_stays_at_zero() {
        let mut timer = work_timer(25);
        timer.start();

        let mut completions = 0;
        for _ in 0..1500 {
            if let TickOutcome::Completed(session) = timer.tick() {
                completions += 1;
                assert_eq!(session.mode, TimerMode::Work);
                assert_eq!(session.duration_minutes, 25);
                assert_eq!(session.completed_at, fixed_now());
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(timer.remaining_seconds(), 0);
        assert_eq!(timer.phase(), TimerPhase::Idle);

        // Extra ticks after completion never go negative or re-complete.
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn pause_and_resume_preserve_remaining_seconds() {
        let mut timer = work_timer(25);
        timer.start();
        for _ in 0..90 {
            timer.tick();
        }
        let before = timer.remaining_seconds();

        assert!(timer.pause());
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert_eq!(timer.remaining_seconds(), before);

        assert!(timer.start());
        assert_eq!(timer.remaining_seconds(), before);
    }

    #[test]
    fn pause_is_a_noop_unless_running() {
        let mut timer = work_timer(25);
        assert!(!timer.pause());
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }

    #[test]
    fn reset_restores_full_duration_for_current_mode() {
        let mut timer = work_timer(25);
        timer.start();
        for _ in 0..60 {
            timer.tick();
        }

        timer.reset();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining_seconds(), 25 * 60);
    }

    #[test]
    fn mode_change_loads_new_duration_and_stops_the_run() {
        let mut timer = work_timer(25);
        timer.start();
        for _ in 0..10 {
            timer.tick();
        }

        timer.change_mode(TimerMode::LongBreak);
        assert_eq!(timer.mode(), TimerMode::LongBreak);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining_seconds(), 15 * 60);
        assert_eq!(timer.initial_seconds(), 15 * 60);

        // A tick scheduled before the change must not touch the new counter.
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert_eq!(timer.remaining_seconds(), 15 * 60);
    }

    #[test]
    fn short_break_duration_is_fixed() {
        let config = TimerConfig::new(40, 30).unwrap();
        assert_eq!(
            config.duration_minutes(TimerMode::ShortBreak),
            SHORT_BREAK_MINUTES
        );
    }

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let mut timer = work_timer(1);
        timer.start();
        for _ in 0..30 {
            timer.tick();
        }
        assert!((timer.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn remaining_never_exceeds_initial() {
        let mut timer = work_timer(2);
        timer.start();
        for _ in 0..200 {
            timer.tick();
            assert!(timer.remaining_seconds() <= timer.initial_seconds());
        }
    }

    #[test]
    fn mode_serializes_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&TimerMode::Work).unwrap(),
            "\"pomodoro\""
        );
        assert_eq!(
            serde_json::to_string(&TimerMode::LongBreak).unwrap(),
            "\"long_break\""
        );
    }
}
