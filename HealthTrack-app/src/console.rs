//! Line-oriented console session driving the screens

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

use healthtrack_data::repository::{
    FixedSugarReadings, PressureRepository, PressureRepositoryTrait, RepositoryError,
};
use healthtrack_domain::entities::pressure::{PressureField, SaveState};
use healthtrack_domain::entities::sugar::SelectorOption;
use healthtrack_domain::navigation::{Navigator, Route};
use healthtrack_domain::services::{
    PressureForm, PressureSaver, RepositorySaver, SaveOutcome, SimulatedSaver, SugarView,
    SugarViewError,
};

use crate::config::{AppConfig, SaverKind};
use crate::render;
use crate::router::Router;

/// Accepted by the `date` command
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const HELP: &str = "commands: open <home|addpressure|pressure|sugar|addsugar>, \
set <systolic|diastolic|notes> <text>, focus <field>, blur <field>, \
date <YYYY-MM-DD HH:MM>, save, retry, select <select|Random|Fasting>, add, show, back, help, quit";

/// Console errors
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("'{command}' is not available on the {route} screen")]
    WrongScreen { command: &'static str, route: Route },

    #[error(transparent)]
    SugarView(#[from] SugarViewError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Could not encode readings: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(Route),
    Set(PressureField, String),
    Focus(PressureField),
    Blur(PressureField),
    Date(NaiveDateTime),
    Save,
    Retry,
    Select(SelectorOption),
    Add,
    Show,
    Back,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let field = |text: &str| {
            text.parse::<PressureField>()
                .map_err(ConsoleError::InvalidArgument)
        };

        match verb {
            "open" => rest
                .parse::<Route>()
                .map(Command::Open)
                .map_err(ConsoleError::InvalidArgument),
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                match field(name)? {
                    PressureField::Date => Err(ConsoleError::InvalidArgument(
                        "use 'date' to pick the reading time".to_string(),
                    )),
                    target => Ok(Command::Set(target, value.trim().to_string())),
                }
            }
            "focus" => Ok(Command::Focus(field(rest)?)),
            "blur" => Ok(Command::Blur(field(rest)?)),
            "date" => NaiveDateTime::parse_from_str(rest, DATE_INPUT_FORMAT)
                .map(Command::Date)
                .map_err(|e| ConsoleError::InvalidArgument(format!("{}: {}", rest, e))),
            "save" => Ok(Command::Save),
            "retry" => Ok(Command::Retry),
            "select" => rest
                .parse::<SelectorOption>()
                .map(Command::Select)
                .map_err(ConsoleError::InvalidArgument),
            "add" => Ok(Command::Add),
            "show" => Ok(Command::Show),
            "back" => Ok(Command::Back),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ConsoleError::UnknownCommand(other.to_string())),
        }
    }
}

/// Screen currently mounted by the session
enum Screen {
    Pressure(Box<PressureForm>),
    Sugar(SugarView),
    Placeholder { route: Route, message: Option<String> },
}

impl Screen {
    fn route(&self) -> Route {
        match self {
            Screen::Pressure(_) => Route::AddPressure,
            Screen::Sugar(_) => Route::SugarReadings,
            Screen::Placeholder { route, .. } => *route,
        }
    }
}

/// A console session: router, mounted screen and the collaborators behind it
pub struct Session {
    config: AppConfig,
    router: Arc<Router>,
    repository: PressureRepository,
    screen: Screen,
    finished: bool,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self::with_repository(config, PressureRepository::new())
    }

    /// Session whose memory saver writes to `repository`
    pub fn with_repository(config: AppConfig, repository: PressureRepository) -> Self {
        Self {
            config,
            router: Arc::new(Router::default()),
            repository,
            screen: Screen::Placeholder {
                route: Route::Home,
                message: None,
            },
            finished: false,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current_route(&self) -> Route {
        self.screen.route()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Parse and run one console line
    pub async fn handle_line(&mut self, line: &str) -> Result<Vec<String>, ConsoleError> {
        if line.trim().is_empty() {
            return Ok(Vec::new());
        }
        let command = line.parse::<Command>()?;
        self.execute(command).await
    }

    /// Run one command and return the lines to print
    pub async fn execute(&mut self, command: Command) -> Result<Vec<String>, ConsoleError> {
        debug!(?command, "Console command");
        let mut output = Vec::new();

        match command {
            Command::Open(route) => self.router.navigate(route, None),
            Command::Back => match &self.screen {
                Screen::Pressure(form) => form.go_back(),
                Screen::Sugar(view) => view.go_back(),
                Screen::Placeholder { .. } => self.router.go_back(),
            },
            Command::Help => output.push(HELP.to_string()),
            Command::Quit => {
                self.finished = true;
                return Ok(vec!["bye".to_string()]);
            }
            Command::Show => {}
            Command::Set(field, text) => {
                let form = self.pressure_form("set")?;
                match field {
                    PressureField::Systolic => form.set_systolic(&text),
                    PressureField::Diastolic => form.set_diastolic(&text),
                    _ => form.set_notes(&text),
                }
            }
            Command::Focus(field) => self.pressure_form("focus")?.focus(field),
            Command::Blur(field) => self.pressure_form("blur")?.blur(field),
            Command::Date(picked) => {
                let form = self.pressure_form("date")?;
                form.show_date_picker();
                form.confirm_date(picked);
            }
            Command::Save => {
                let outcome = self.pressure_form("save")?.save().await;
                output.extend(describe_outcome(&outcome));
            }
            Command::Retry => {
                let outcome = self.pressure_form("retry")?.retry().await;
                output.extend(describe_outcome(&outcome));
            }
            Command::Select(option) => self.sugar_view("select")?.select(option),
            Command::Add => self.sugar_view("add")?.add_reading(),
        }

        self.sync_screen();
        output.extend(self.render().await?);
        Ok(output)
    }

    fn pressure_form(&mut self, command: &'static str) -> Result<&mut PressureForm, ConsoleError> {
        let route = self.screen.route();
        match &mut self.screen {
            Screen::Pressure(form) => Ok(form.as_mut()),
            _ => Err(ConsoleError::WrongScreen { command, route }),
        }
    }

    fn sugar_view(&mut self, command: &'static str) -> Result<&mut SugarView, ConsoleError> {
        let route = self.screen.route();
        match &mut self.screen {
            Screen::Sugar(view) => Ok(view),
            _ => Err(ConsoleError::WrongScreen { command, route }),
        }
    }

    /// Mount whatever the router now shows; the replaced screen is dropped
    fn sync_screen(&mut self) {
        let route = self.router.current_route();
        if route == self.screen.route() {
            return;
        }

        let navigator: Arc<dyn Navigator> = self.router.clone();
        let message = self.router.take_message();
        info!(%route, "Mounting screen");

        self.screen = match route {
            Route::AddPressure => {
                let form = PressureForm::mount(self.saver(), navigator)
                    .with_success_hold(self.config.success_hold);
                tokio::spawn(log_transitions(form.subscribe()));
                Screen::Pressure(Box::new(form))
            }
            Route::SugarReadings => {
                Screen::Sugar(SugarView::mount(Arc::new(FixedSugarReadings), navigator, message))
            }
            other => Screen::Placeholder {
                route: other,
                message,
            },
        };
    }

    fn saver(&self) -> Arc<dyn PressureSaver> {
        match self.config.saver {
            SaverKind::Simulated => Arc::new(SimulatedSaver::new(self.config.save_latency)),
            SaverKind::Memory => Arc::new(RepositorySaver::new(self.repository.clone())),
        }
    }

    async fn render(&mut self) -> Result<Vec<String>, ConsoleError> {
        let lines = match &mut self.screen {
            Screen::Pressure(form) => render::render_pressure(form),
            Screen::Sugar(view) => render::render_sugar(view)?,
            Screen::Placeholder { route, message } => {
                let readings = if *route == Route::PressureReadings {
                    self.repository.get_all().await?
                } else {
                    Vec::new()
                };
                render::render_placeholder(*route, message.take().as_deref(), &readings)?
            }
        };
        Ok(lines)
    }
}

fn describe_outcome(outcome: &SaveOutcome) -> Vec<String> {
    match outcome {
        SaveOutcome::Rejected => vec!["Please fix the highlighted fields".to_string()],
        SaveOutcome::Busy => vec!["A save is already running".to_string()],
        SaveOutcome::Navigated(reading) => {
            vec![format!("Saved {}/{} mmHg", reading.systolic, reading.diastolic)]
        }
        SaveOutcome::Failed(err) => vec![err.to_string()],
        SaveOutcome::Cancelled => vec!["Save abandoned".to_string()],
        SaveOutcome::NothingToRetry => vec!["Nothing to retry".to_string()],
    }
}

/// Log every save state change until the form goes away
async fn log_transitions(mut rx: watch::Receiver<SaveState>) {
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        info!(?state, "Pressure form state");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("open sugar".parse::<Command>().unwrap(), Command::Open(Route::SugarReadings));
        assert_eq!(
            "set notes  after a long walk ".parse::<Command>().unwrap(),
            Command::Set(PressureField::Notes, "after a long walk".to_string())
        );
        assert_eq!(
            "set systolic".parse::<Command>().unwrap(),
            Command::Set(PressureField::Systolic, String::new())
        );
        assert_eq!(
            "select Fasting".parse::<Command>().unwrap(),
            Command::Select(SelectorOption::Variant(
                healthtrack_domain::entities::sugar::SugarVariant::Fasting
            ))
        );
        assert!(matches!("date 2024-10-01 14:05".parse::<Command>(), Ok(Command::Date(_))));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("dance".parse::<Command>(), Err(ConsoleError::UnknownCommand(_))));
        assert!(matches!("open nowhere".parse::<Command>(), Err(ConsoleError::InvalidArgument(_))));
        assert!(matches!("set date today".parse::<Command>(), Err(ConsoleError::InvalidArgument(_))));
        assert!(matches!("date tomorrow".parse::<Command>(), Err(ConsoleError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_form_commands_need_form_screen() {
        let mut session = Session::new(AppConfig::default());
        let err = session.handle_line("save").await.unwrap_err();
        assert!(matches!(err, ConsoleError::WrongScreen { command: "save", route: Route::Home }));
    }
}
