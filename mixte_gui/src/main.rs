//! Construction Mixte - course application
//!
//! Iced front end of the composite construction course: a login screen
//! behind the email allow-list, then one page per course (slabs, columns,
//! beams) with its calculators. Runs natively and in the browser (wasm32).

mod events;
mod store;
mod ui;

use std::collections::HashMap;

use chrono::Utc;
use iced::widget::{column, container, row, rule, stack};
use iced::{Element, Length, Subscription, Task};

use mixte_core::access::{AccessGate, Session};
use mixte_core::calculations::{CalculatorKind, Course, Report};
use mixte_core::format::NumberFormat;
use mixte_core::forms::FormValues;
use mixte_core::protection::{EventGuard, GuardEvent, Notification, Watermark};
use mixte_core::Config;

use store::Store;
use ui::modal::ModalType;

/// Refresh rate of the notification while it is on screen
const NOTIFICATION_TICK_MS: u64 = 100;

/// Fields of the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    LastName,
    FirstName,
    Email,
}

/// Text typed in the login form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
}

impl LoginForm {
    /// Names guessed from the OS account, email left blank
    #[cfg(not(target_arch = "wasm32"))]
    fn prefilled() -> Self {
        let realname = whoami::realname();
        let mut parts = realname.split_whitespace();
        let first_name = parts.next().unwrap_or_default().to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");
        Self {
            last_name,
            first_name,
            email: String::new(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn prefilled() -> Self {
        Self::default()
    }
}

/// Page currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Home,
    Course(Course),
}

#[derive(Debug, Clone)]
pub enum Message {
    // Login
    LoginFieldChanged(LoginField, String),
    SubmitLogin,
    RequestLogout,

    // Navigation
    OpenHome,
    OpenCourse(Course),
    SelectCalculator(CalculatorKind),

    // Calculator form
    FieldChanged(&'static str, String),
    Calculate,
    ResetForm,

    // Modal
    ModalConfirm,
    ModalCancel,

    // Protection
    Guard(GuardEvent),
    Tick,
}

pub struct App {
    config: Config,
    gate: AccessGate<Store>,
    guard: EventGuard,
    notification: Notification,
    number_format: NumberFormat,

    screen: Screen,
    session: Option<Session>,
    login: LoginForm,

    /// Calculator shown on each course page
    selected: HashMap<Course, CalculatorKind>,
    forms: HashMap<CalculatorKind, FormValues>,
    reports: HashMap<CalculatorKind, Report>,

    modal: Option<ModalType>,
    status: String,
}

impl App {
    fn new() -> Self {
        let (config, status) = load_config();
        let mut gate = AccessGate::from_config(store::open(&config), &config.access);
        let session = gate.current_session(Utc::now());
        let screen = if session.is_some() { Screen::Home } else { Screen::Login };

        let forms = CalculatorKind::ALL
            .iter()
            .map(|kind| (*kind, FormValues::initial(kind.fields())))
            .collect();

        Self {
            guard: EventGuard::from_config(&config.protection),
            notification: Notification::new(config.protection.notification_duration()),
            number_format: config.display.number_format(),
            gate,
            config,
            screen,
            session,
            login: LoginForm::prefilled(),
            selected: HashMap::new(),
            forms,
            reports: HashMap::new(),
            modal: None,
            status,
        }
    }

    fn title(&self) -> String {
        match self.screen {
            Screen::Course(course) => format!("Construction Mixte - {}", course.title()),
            _ => "Construction Mixte".to_string(),
        }
    }

    /// Calculator displayed for a course, the first one until another is picked
    pub fn calculator(&self, course: Course) -> Option<CalculatorKind> {
        self.selected
            .get(&course)
            .copied()
            .or_else(|| course.calculators().first().copied())
    }

    pub fn form(&self, kind: CalculatorKind) -> Option<&FormValues> {
        self.forms.get(&kind)
    }

    pub fn report(&self, kind: CalculatorKind) -> Option<&Report> {
        self.reports.get(&kind)
    }

    pub fn number_format(&self) -> NumberFormat {
        self.number_format
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoginFieldChanged(field, value) => {
                match field {
                    LoginField::LastName => self.login.last_name = value,
                    LoginField::FirstName => self.login.first_name = value,
                    LoginField::Email => self.login.email = value,
                }
            }
            Message::SubmitLogin => self.submit_login(),
            Message::RequestLogout => {
                self.modal = Some(ModalType::ConfirmLogout);
            }

            Message::OpenHome => {
                if self.ensure_session(&format!("/{}/index.html", self.config.access.content_root)) {
                    self.screen = Screen::Home;
                }
            }
            Message::OpenCourse(course) => {
                if self.ensure_session(&course_page(&self.config, course)) {
                    self.screen = Screen::Course(course);
                    self.status = format!("{} - {} calculators", course.title(), course.calculators().len());
                }
            }
            Message::SelectCalculator(kind) => {
                self.selected.insert(kind.course(), kind);
            }

            Message::FieldChanged(id, value) => {
                if let Screen::Course(course) = self.screen {
                    if let Some(kind) = self.calculator(course) {
                        self.forms
                            .entry(kind)
                            .or_insert_with(|| FormValues::initial(kind.fields()))
                            .set(id, value);
                    }
                }
            }
            Message::Calculate => self.calculate(),
            Message::ResetForm => {
                if let Screen::Course(course) = self.screen {
                    if let Some(kind) = self.calculator(course) {
                        self.forms.insert(kind, FormValues::initial(kind.fields()));
                        self.reports.remove(&kind);
                        self.status = format!("{} reset", kind.title());
                    }
                }
            }

            Message::ModalConfirm => {
                if self.modal.take() == Some(ModalType::ConfirmLogout) {
                    self.logout();
                }
            }
            Message::ModalCancel => {
                self.modal = None;
            }

            Message::Guard(event) => {
                let decision = self.guard.handle(&event);
                if decision.notifies() {
                    self.notification.raise(Utc::now());
                }
            }
            Message::Tick => {
                self.notification.tick(Utc::now());
            }
        }
        Task::none()
    }

    fn submit_login(&mut self) {
        let form = &self.login;
        match self.gate.login(&form.last_name, &form.first_name, &form.email, Utc::now()) {
            Ok(session) => {
                self.status = format!("Welcome {}", session.display_name());
                self.session = Some(session);
                self.login.email.clear();
                self.screen = Screen::Home;
            }
            Err(e) => self.modal = Some(ModalType::from_login_error(&e)),
        }
    }

    fn logout(&mut self) {
        if let Err(e) = self.gate.logout() {
            tracing::warn!(error = %e, "logout could not clear the session");
        }
        self.session = None;
        self.reports.clear();
        self.screen = Screen::Login;
        self.status = "Logged out".to_string();
    }

    /// Gate check for `page`; an expired session goes back to the login screen
    fn ensure_session(&mut self, page: &str) -> bool {
        match self.gate.require_session(Utc::now(), page) {
            Ok(session) => {
                self.session = Some(session);
                true
            }
            Err(redirect) => {
                tracing::info!(page, redirect = %redirect, "session required");
                self.session = None;
                self.screen = Screen::Login;
                self.status = "Session expired - please log in again".to_string();
                false
            }
        }
    }

    fn calculate(&mut self) {
        let Screen::Course(course) = self.screen else {
            return;
        };
        let Some(kind) = self.calculator(course) else {
            return;
        };
        if !self.ensure_session(&course_page(&self.config, course)) {
            return;
        }

        let values = self
            .forms
            .entry(kind)
            .or_insert_with(|| FormValues::initial(kind.fields()));
        match kind.run(values) {
            Ok(report) => {
                self.status = format!("{}: {}", kind.title(), report.verdict.badge());
                self.reports.insert(kind, report);
            }
            Err(e) => {
                self.reports.remove(&kind);
                self.status = format!("{}: {}", kind.title(), e.error_code());
                self.modal = Some(ModalType::from_calc_error(&e));
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let guard = iced::event::listen_with(|event, status, _window| {
            events::guard_event(&event, status).map(Message::Guard)
        });

        if self.notification.is_visible(Utc::now()) {
            let tick = iced::time::every(std::time::Duration::from_millis(NOTIFICATION_TICK_MS))
                .map(|_| Message::Tick);
            Subscription::batch([guard, tick])
        } else {
            guard
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let page: Element<'_, Message> = match self.screen {
            Screen::Login => ui::login::view(&self.login),
            Screen::Home => self.view_frame(ui::home::view(&self.reports), None),
            Screen::Course(course) => self.view_frame(self.view_course(course), Some(course)),
        };

        let mut layers = stack![page];

        if self.config.protection.watermark {
            if let Some(watermark) = Watermark::for_session(self.session.as_ref()) {
                layers = layers.push(ui::overlay::view_watermark(watermark));
            }
        }

        if let Some(message) = self.notification.current(Utc::now()) {
            layers = layers.push(ui::overlay::view_notification(message));
        }

        if let Some(ref modal) = self.modal {
            layers = layers
                .push(ui::modal::view_backdrop())
                .push(ui::modal::view_modal(modal));
        }

        layers.into()
    }

    /// Header, course tabs and status bar around a page
    fn view_frame<'a>(&'a self, body: Element<'a, Message>, course: Option<Course>) -> Element<'a, Message> {
        let remaining = self.session.as_ref().map(|s| s.remaining(Utc::now()));

        column![
            ui::toolbar::view_header(self.session.as_ref()),
            ui::toolbar::view_toolbar(course),
            container(body).height(Length::Fill),
            rule::horizontal(1),
            ui::status_bar::view_status_bar(remaining, &self.status),
        ]
        .spacing(4)
        .padding(10)
        .into()
    }

    fn view_course(&self, course: Course) -> Element<'_, Message> {
        let selected = self.calculator(course);

        row![
            ui::items_panel::view_items_panel(course, selected, &self.reports, 220.0),
            ui::input_panel::view_input_panel(self, selected),
            ui::results_panel::view_results_panel(self, selected),
        ]
        .spacing(10)
        .height(Length::Fill)
        .into()
    }
}

/// Entry page of a course folder, as checked by the gate
fn course_page(config: &Config, course: Course) -> String {
    format!("/{}/{}/index.html", config.access.content_root, course.folder())
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> (Config, String) {
    match Config::load() {
        Ok(config) => (config, "Ready".to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "using default configuration");
            (Config::default(), format!("Configuration ignored: {}", config_error_text(&e)))
        }
    }
}

/// No config file in the browser, defaults apply
#[cfg(target_arch = "wasm32")]
fn load_config() -> (Config, String) {
    (Config::default(), "Ready".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn config_error_text(e: &mixte_core::CalcError) -> String {
    match e {
        mixte_core::CalcError::ConfigError { message } => message.clone(),
        other => other.to_string(),
    }
}

pub fn main() -> iced::Result {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    #[cfg(not(target_arch = "wasm32"))]
    mixte_core::logging::init_logging(mixte_core::logging::Verbosity::Normal);

    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .subscription(App::subscription)
        .window_size(iced::Size::new(1280.0, 820.0))
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_page_uses_content_root() {
        let mut config = Config::default();
        assert_eq!(course_page(&config, Course::Beams), "/cours/poutres/index.html");
        config.access.content_root = "lessons".to_string();
        assert_eq!(course_page(&config, Course::Slabs), "/lessons/planchers/index.html");
    }
}
