mod focus;
mod home;
mod quiz;
mod state;

pub use focus::FocusView;
pub use home::HomeView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
