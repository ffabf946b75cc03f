// 🗂️ Application State - everything the screen shows, owned in one place
// Handlers take the state, the action and the current time; no globals

use crate::assessment::Assessment;
use crate::config::{AppConfig, LayoutMode};
use crate::events::{self, EventOutcome};
use crate::inputs::{parse_field, Field, FinancialInputs, InputError};
use crate::notify::Notifications;
use crate::tips::TipTimer;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{info, warn};

pub const INPUT_ERROR_TITLE: &str = "Input Error";
pub const INPUT_ERROR_MESSAGE: &str = "Please enter valid numeric values.";

// ============================================================================
// TABS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Input,
    Results,
    Charts,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Input, Tab::Results, Tab::Charts];

    pub fn title(&self) -> &str {
        match self {
            Tab::Input => "Input",
            Tab::Results => "Results",
            Tab::Charts => "Charts",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Input => 0,
            Tab::Results => 1,
            Tab::Charts => 2,
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Type(char),
    Backspace,
    NextField,
    PreviousField,
    Submit,
    RandomEvent,
    SelectTab(Tab),
    DismissOrQuit,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

// ============================================================================
// APP
// ============================================================================

pub struct App {
    pub config: AppConfig,
    /// Raw text of the four entries, in `Field::ALL` order
    pub entries: [String; 4],
    pub focus: Field,
    pub current_tab: Tab,
    pub assessment: Option<Assessment>,
    pub last_event: Option<EventOutcome>,
    pub notifications: Notifications,
    tip_timer: TipTimer,
    rng: ChaCha8Rng,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        let tip_timer = TipTimer::new(config.tip_interval());

        App {
            config,
            entries: Default::default(),
            focus: Field::Income,
            current_tab: Tab::Input,
            assessment: None,
            last_event: None,
            notifications: Notifications::new(),
            tip_timer,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn layout(&self) -> LayoutMode {
        self.config.layout
    }

    pub fn entry(&self, field: Field) -> &str {
        &self.entries[field.index()]
    }

    pub fn set_entry(&mut self, field: Field, text: &str) {
        self.entries[field.index()] = text.to_string();
    }

    pub fn tip_timer(&self) -> &TipTimer {
        &self.tip_timer
    }

    /// Apply one user action at time `now` (offset from start)
    pub fn dispatch(&mut self, action: Action, now: Duration) -> Control {
        match action {
            Action::Type(ch) => self.entries[self.focus.index()].push(ch),
            Action::Backspace => {
                self.entries[self.focus.index()].pop();
            }
            Action::NextField => self.focus = self.focus.next(),
            Action::PreviousField => self.focus = self.focus.previous(),
            Action::Submit => self.submit(now),
            Action::RandomEvent => self.trigger_random_event(now),
            Action::SelectTab(tab) => self.current_tab = tab,
            Action::DismissOrQuit => {
                if self.notifications.is_empty() {
                    return Control::Quit;
                }
                self.notifications.dismiss_all();
            }
            Action::Quit => return Control::Quit,
        }
        Control::Continue
    }

    /// Timer work: expire popups and surface a tip when one is due
    pub fn tick(&mut self, now: Duration) {
        self.notifications.prune(now);

        if let Some(tip) = self.tip_timer.poll(now, &mut self.rng) {
            info!(tip, "showing financial tip");
            self.popup("Financial Tip", tip, now);
        }
    }

    pub fn parse_inputs(&self) -> Result<FinancialInputs, InputError> {
        FinancialInputs::parse(
            self.entry(Field::Income),
            self.entry(Field::Expenses),
            self.entry(Field::Savings),
            self.entry(Field::Liabilities),
        )
    }

    /// Classify the current entries. Bad input keeps the previous result.
    pub fn submit(&mut self, now: Duration) {
        match self.parse_inputs() {
            Ok(inputs) => {
                let assessment = Assessment::new(inputs);
                info!(
                    stage = assessment.stage.name(),
                    net_worth = %assessment.net_worth,
                    "classified submission"
                );
                self.assessment = Some(assessment);
                if self.layout() == LayoutMode::Tabbed {
                    self.current_tab = Tab::Results;
                }
            }
            Err(e) => self.input_error(e, now),
        }
    }

    /// Pick a random event and write the adjusted savings and liabilities
    /// back into the form. The stage is recomputed on the next submit.
    pub fn trigger_random_event(&mut self, now: Duration) {
        let savings = parse_field(Field::Savings, self.entry(Field::Savings));
        let liabilities = parse_field(Field::Liabilities, self.entry(Field::Liabilities));

        let (savings, liabilities) = match (savings, liabilities) {
            (Ok(s), Ok(l)) => (s, l),
            (Err(e), _) | (_, Err(e)) => {
                self.input_error(e, now);
                return;
            }
        };

        let event = events::pick(&mut self.rng);
        let outcome = EventOutcome::new(event, savings, liabilities);
        info!(
            event = event.title,
            delta = event.delta,
            savings = outcome.after.savings,
            liabilities = outcome.after.liabilities,
            "random event applied"
        );

        self.set_entry(Field::Savings, &outcome.after.savings.to_string());
        self.set_entry(Field::Liabilities, &outcome.after.liabilities.to_string());

        let impact = outcome.impact_message(&self.config.currency);
        self.popup("Event Impact", &impact, now);
        self.popup("Suggestions", outcome.suggestion(), now);
        self.last_event = Some(outcome);
    }

    fn input_error(&mut self, err: InputError, now: Duration) {
        warn!(error = %err, "rejected input");
        let message = format!("{}\n{}", INPUT_ERROR_MESSAGE, err);
        self.focus = err.field();
        self.popup(INPUT_ERROR_TITLE, &message, now);
    }

    fn popup(&mut self, title: &str, message: &str, now: Duration) {
        let duration = self.config.popup_duration();
        self.notifications.push(title, message, now, duration);
    }
}

// ============================================================================
// TESTS
// ============================================================================
