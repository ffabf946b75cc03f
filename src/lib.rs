// Financial Adventure - Core Library
// Stage classification, life events, chart model and tips, shared by the
// terminal UI and the headless `classify` command

pub mod inputs;
pub mod stages;
pub mod events;
pub mod charts;
pub mod tips;
pub mod notify;
pub mod planner;
pub mod assessment;
pub mod config;
pub mod app;

// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use inputs::{Field, FinancialInputs, InputError, format_amount, parse_field};
pub use stages::{Stage, classify, classify_inputs, critical_mass, net_worth};
pub use events::{Adjustment, EventOutcome, RandomEvent, RANDOM_EVENTS, apply_delta};
pub use charts::{ChartData, ChartError, Slice, coverage_months};
pub use tips::{TipTimer, TIPS};
pub use notify::{Notification, Notifications};
pub use assessment::{Assessment, AssessmentReport};
pub use config::{AppConfig, LayoutMode};
pub use app::{Action, App, Control, Tab};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
