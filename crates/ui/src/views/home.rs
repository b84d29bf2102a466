use dioxus::prelude::*;
use dioxus_router::Link;

use focus_core::model::TimerMode;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let config = ctx.timer_config();

    rsx! {
        div { class: "page home-page",
            h2 { "Welcome back" }
            p { class: "home-subtitle",
                "Pick a focus mode to start a study block, or take the quiz for your latest upload."
            }
            div { class: "home-cards",
                for mode in TimerMode::all() {
                    div { class: "home-card",
                        h3 { "{mode.label()}" }
                        p { "{config.description(mode)}" }
                    }
                }
            }
            div { class: "home-actions",
                Link { class: "btn btn-primary", to: Route::Focus {}, "Start a Session" }
                Link { class: "btn btn-secondary", to: Route::Quiz {}, "Take the Quiz" }
            }
        }
    }
}
