#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod error;
pub mod focus_log_service;
pub mod http;
pub mod quiz_submit_service;

pub use focus_core::Clock;

pub use api::{FocusLogApi, QuizApi, SessionLogRequest, SessionLogResponse};
pub use app_services::AppServices;
pub use error::{ApiError, QuizSubmitError};
pub use focus_log_service::FocusLogService;
pub use http::{ApiConfig, CsrfToken, HttpApi};
pub use quiz_submit_service::QuizSubmitService;
