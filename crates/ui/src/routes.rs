use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{FocusView, HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/focus", FocusView)] Focus {},
        #[route("/quiz", QuizView)] Quiz {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Focus Flow" }
            ul {
                li { Link { to: Route::Home {}, "Dashboard" } }
                li { Link { to: Route::Focus {}, "Focus Timer" } }
                li { Link { to: Route::Quiz {}, "Quiz" } }
            }
        }
    }
}
