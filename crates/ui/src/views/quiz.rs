use dioxus::prelude::*;

use focus_core::model::{AnswerId, GradeReport, QuizSheet};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizVm};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_api = ctx.quiz_api();
    let submit_service = ctx.quiz_submit();

    let mut vm = use_signal(|| None::<QuizVm>);

    let resource = use_resource(move || {
        let quiz_api = quiz_api.clone();
        async move {
            let questions = quiz_api
                .fetch_questions()
                .await
                .map_err(|_| ViewError::Unknown)?;
            let sheet = QuizSheet::new(questions).map_err(|_| ViewError::NoQuiz)?;
            vm.set(Some(QuizVm::new(sheet)));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(resource);

    let dispatch = {
        let submit_service = submit_service.clone();
        use_callback(move |intent: QuizIntent| match intent {
            QuizIntent::Select(answer) => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.select(answer);
                }
            }
            QuizIntent::Next => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.next();
                }
            }
            QuizIntent::Previous => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.previous();
                }
            }
            QuizIntent::Submit => {
                let submit_service = submit_service.clone();
                spawn(async move {
                    // Take the vm out while the request is in flight so the
                    // borrow does not live across the await.
                    let taken = vm.write().take();
                    let Some(mut value) = taken else { return };
                    value.submit(&submit_service).await;
                    *vm.write() = Some(value);
                });
            }
        })
    };

    rsx! {
        div { class: "page quiz-page",
            h2 { "Quiz" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "quiz-message", "{err.message()}" }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(report) = vm.read().as_ref().and_then(QuizVm::report).cloned() {
                        QuizResult { report }
                    } else {
                        QuizForm { vm, on_intent: dispatch }
                    }
                },
            }
        }
    }
}

#[component]
fn QuizForm(vm: Signal<Option<QuizVm>>, on_intent: Callback<QuizIntent>) -> Element {
    let vm_guard = vm.read();
    let Some(vm_value) = vm_guard.as_ref() else {
        // Briefly empty while a submission holds the vm.
        return rsx! {
            p { "Submitting..." }
        };
    };

    let sheet = vm_value.sheet();
    let question = sheet.current_question();
    let question_id = question.id().clone();
    let selected = sheet.answer_for(&question_id).cloned();
    let progress = sheet.progress();
    let progress_width = format!("{:.0}%", progress.percent());
    let indicator = format!(
        "Question {} of {}",
        sheet.current_index() + 1,
        sheet.total_questions()
    );
    let answered_label = format!("{}/{} answered", progress.answered, progress.total);
    let at_first = sheet.current_index() == 0;
    let at_last = sheet.current_index() + 1 == sheet.total_questions();
    let message = vm_value.message().map(str::to_string);
    let question_text = question.text().to_string();
    let choices: Vec<_> = question
        .answers()
        .iter()
        .map(|choice| (choice.id().clone(), choice.text().to_string()))
        .collect();
    drop(vm_guard);

    rsx! {
        div { class: "quiz-progress",
            span { class: "question-indicator", "{indicator}" }
            span { class: "progress-text", "{answered_label}" }
            div { class: "quiz-progress-track",
                div { class: "quiz-progress-bar", style: "width: {progress_width};" }
            }
        }

        div { class: "question-card",
            h3 { "{question_text}" }
            div { class: "question-choices",
                for (choice_id, choice_text) in choices {
                    ChoiceButton {
                        choice_id: choice_id.clone(),
                        choice_text,
                        selected: selected.as_ref() == Some(&choice_id),
                        on_intent,
                    }
                }
            }
        }

        if let Some(text) = message {
            p { class: "quiz-message", "{text}" }
        }

        div { class: "quiz-nav",
            button {
                class: "btn btn-secondary prev-btn",
                disabled: at_first,
                onclick: move |_| on_intent.call(QuizIntent::Previous),
                "Previous"
            }
            if at_last {
                button {
                    class: "btn btn-primary submit-btn",
                    onclick: move |_| on_intent.call(QuizIntent::Submit),
                    "Submit Quiz"
                }
            } else {
                button {
                    class: "btn btn-primary next-btn",
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    "Next"
                }
            }
        }
    }
}

#[component]
fn ChoiceButton(
    choice_id: AnswerId,
    choice_text: String,
    selected: bool,
    on_intent: Callback<QuizIntent>,
) -> Element {
    let id = choice_id.clone();
    rsx! {
        button {
            class: if selected { "choice-btn selected" } else { "choice-btn" },
            onclick: move |_| on_intent.call(QuizIntent::Select(id.clone())),
            "{choice_text}"
        }
    }
}

#[component]
fn QuizResult(report: GradeReport) -> Element {
    let verdict = if report.passed {
        "Passed"
    } else {
        "Keep practicing"
    };
    let verdict_class = if report.passed {
        "quiz-verdict passed"
    } else {
        "quiz-verdict failed"
    };

    rsx! {
        div { class: "quiz-result",
            h3 { "Your Score" }
            p { class: "quiz-score", "{report.score}/{report.total} ({report.percentage}%)" }
            p { class: "{verdict_class}", "{verdict}" }

            if !report.details.is_empty() {
                ul { class: "quiz-details",
                    for detail in report.details.iter().cloned() {
                        li {
                            class: if detail.is_correct { "quiz-detail correct" } else { "quiz-detail incorrect" },
                            p { class: "detail-question", "{detail.question}" }
                            p { class: "detail-answer", "Your answer: {detail.user_answer}" }
                            if !detail.is_correct {
                                p { class: "detail-correct", "Correct answer: {detail.correct_answer}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
