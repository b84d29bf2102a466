use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use focus_core::model::TimerConfig;
use services::api::QuizApi;
use services::{
    ApiConfig, AppServices, Clock, CsrfToken, FocusLogService, QuizSubmitService,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMinutes { flag: &'static str, raw: String },
    InvalidBaseUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMinutes { flag, raw } => {
                write!(f, "invalid {flag} value: {raw} (expected minutes >= 1)")
            }
            ArgsError::InvalidBaseUrl { raw } => write!(f, "invalid --base-url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn timer_config(&self) -> TimerConfig {
        self.services.timer_config()
    }

    fn focus_log(&self) -> Arc<FocusLogService> {
        self.services.focus_log()
    }

    fn quiz_submit(&self) -> Arc<QuizSubmitService> {
        self.services.quiz_submit()
    }

    fn quiz_api(&self) -> Arc<dyn QuizApi> {
        self.services.quiz_api()
    }
}

#[derive(Debug)]
struct Args {
    base_url: String,
    csrf_token: Option<CsrfToken>,
    timer_config: TimerConfig,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--base-url <url>] [--csrf-token <token>] \
         [--work-minutes <n>] [--long-break-minutes <n>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --base-url http://127.0.0.1:5000");
    eprintln!("  --work-minutes 25");
    eprintln!("  --long-break-minutes 15");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FOCUSFLOW_BASE_URL, FOCUSFLOW_CSRF_TOKEN,");
    eprintln!("  FOCUSFLOW_WORK_MINUTES, FOCUSFLOW_LONG_BREAK_MINUTES");
}

fn env_minutes(var: &'static str) -> Result<Option<u32>, ArgsError> {
    match std::env::var(var) {
        Ok(raw) => parse_minutes(var, raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_minutes(source: &'static str, raw: String) -> Result<u32, ArgsError> {
    match raw.parse::<u32>() {
        Ok(parsed) if parsed >= 1 => Ok(parsed),
        _ => Err(ArgsError::InvalidMinutes { flag: source, raw }),
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let defaults = TimerConfig::default();
        let mut base_url = std::env::var("FOCUSFLOW_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".into());
        let mut csrf_token = std::env::var("FOCUSFLOW_CSRF_TOKEN").ok().map(CsrfToken::new);
        let mut work_minutes =
            env_minutes("FOCUSFLOW_WORK_MINUTES")?.unwrap_or_else(|| defaults.work_minutes());
        let mut long_break_minutes = env_minutes("FOCUSFLOW_LONG_BREAK_MINUTES")?
            .unwrap_or_else(|| defaults.long_break_minutes());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => {
                    let value = require_value(args, "--base-url")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBaseUrl { raw: value });
                    }
                    base_url = value;
                }
                "--csrf-token" => {
                    csrf_token = Some(CsrfToken::new(require_value(args, "--csrf-token")?));
                }
                "--work-minutes" => {
                    let value = require_value(args, "--work-minutes")?;
                    work_minutes = parse_minutes("--work-minutes", value)?;
                }
                "--long-break-minutes" => {
                    let value = require_value(args, "--long-break-minutes")?;
                    long_break_minutes = parse_minutes("--long-break-minutes", value)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let timer_config =
            TimerConfig::new(work_minutes, long_break_minutes).unwrap_or_default();

        Ok(Self {
            base_url,
            csrf_token,
            timer_config,
        })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut iter = std::env::args().skip(1);
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if parsed.csrf_token.is_none() {
        tracing::warn!("FOCUSFLOW_CSRF_TOKEN not set; the server may reject mutating requests");
    }

    let services = AppServices::new(
        ApiConfig::new(parsed.base_url),
        parsed.csrf_token,
        parsed.timer_config,
        Clock::default_clock(),
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    // Explicitly disable it so the app doesn't behave like a modal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Focus Flow")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info".into()),
        )
        .init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
