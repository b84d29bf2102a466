use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;

use focus_core::model::{TimerMode, TimerPhase};

use crate::context::AppContext;
use crate::vm::{TimerCommand, TimerIntent, TimerVm, format_countdown, format_datetime};

#[component]
pub fn FocusView() -> Element {
    let ctx = use_context::<AppContext>();
    let focus_log = ctx.focus_log();
    let mut vm = use_signal(|| TimerVm::new(ctx.timer_config(), ctx.clock()));
    let mut tick_task = use_signal(|| None::<Task>);

    let stop_tick = use_callback(move |()| {
        if let Some(task) = tick_task.write().take() {
            task.cancel();
        }
    });

    let dispatch = {
        let focus_log = focus_log.clone();
        use_callback(move |intent: TimerIntent| {
            // Stop the schedule before the state mutates so a stale tick can
            // never land on the new counter.
            if TimerVm::stops_tick(intent) {
                stop_tick.call(());
            }

            let command = vm.write().apply(intent);
            if command != TimerCommand::StartTick {
                return;
            }

            stop_tick.call(());
            let focus_log = focus_log.clone();
            let handle = spawn(async move {
                loop {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    let completed = vm.write().tick();
                    if let Some(session) = completed {
                        // Fire-and-forget: the log request never blocks the
                        // timer, and a failure stays a diagnostic.
                        let focus_log = focus_log.clone();
                        spawn(async move {
                            if let Ok(Some(streak)) =
                                focus_log.log_completed(&session, None).await
                            {
                                vm.write().set_streak(streak);
                            }
                        });
                        break;
                    }
                    if !vm.read().is_running() {
                        break;
                    }
                }
            });
            tick_task.set(Some(handle));
        })
    };

    use_drop(move || {
        if let Some(task) = tick_task.write().take() {
            task.cancel();
        }
    });

    let vm_guard = vm.read();
    let timer = vm_guard.timer();
    let mode = timer.mode();
    let phase = timer.phase();
    let countdown = format_countdown(timer.remaining_seconds());
    let description = timer.config().description(mode);
    let progress_width = format!("{:.1}%", timer.progress() * 100.0);
    let pending_mode = vm_guard.pending_mode();
    let notice = vm_guard.notice().map(str::to_string);
    let streak_label = vm_guard
        .streak()
        .map(|streak| format!("{streak} days"));
    let last_session = vm_guard.last_completed().map(|session| {
        format!(
            "Last session: {} · {}",
            session.mode.label(),
            format_datetime(session.completed_at)
        )
    });
    drop(vm_guard);

    rsx! {
        div { class: "page focus-page",
            h2 { "Focus Timer" }

            div { class: "focus-modes",
                for candidate in TimerMode::all() {
                    button {
                        class: if candidate == mode { "focus-mode-btn active" } else { "focus-mode-btn" },
                        onclick: move |_| dispatch.call(TimerIntent::RequestMode(candidate)),
                        "{candidate.label()}"
                    }
                }
            }

            if let Some(pending) = pending_mode {
                div { class: "focus-confirm",
                    p { "Change mode to {pending.label()}? Current progress will be lost." }
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| dispatch.call(TimerIntent::ConfirmMode),
                        "Change Mode"
                    }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| dispatch.call(TimerIntent::CancelMode),
                        "Keep Going"
                    }
                }
            }

            div { class: "focus-card",
                p { class: "timer-display", "{countdown}" }
                p { class: "mode-description", "{description}" }
                div { class: "timer-progress-track",
                    div { class: "timer-progress-bar", style: "width: {progress_width};" }
                }

                div { class: "timer-controls",
                    if phase == TimerPhase::Running {
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| dispatch.call(TimerIntent::Pause),
                            "Pause"
                        }
                    } else {
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| dispatch.call(TimerIntent::Start),
                            "Start"
                        }
                    }
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| dispatch.call(TimerIntent::Reset),
                        "Reset"
                    }
                }
            }

            if let Some(text) = notice {
                div { class: "focus-notice",
                    p { "{text}" }
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| dispatch.call(TimerIntent::DismissNotice),
                        "Dismiss"
                    }
                }
            }

            footer { class: "focus-footer",
                if let Some(streak) = streak_label {
                    span { class: "streak-days", "Streak: {streak}" }
                }
                if let Some(last) = last_session {
                    span { class: "last-session", "{last}" }
                }
            }
        }
    }
}
