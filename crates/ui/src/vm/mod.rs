mod quiz_vm;
mod time_fmt;
mod timer_vm;

pub use quiz_vm::{QuizIntent, QuizVm};
pub use time_fmt::{format_countdown, format_datetime};
pub use timer_vm::{TimerCommand, TimerIntent, TimerVm};
