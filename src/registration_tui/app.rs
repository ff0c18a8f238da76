//! Main TUI application state and logic

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use super::components::{Form, FormField, FormFieldType, StatusDisplay, StatusType};
use super::events::AppEvent;
use super::pickers;
use super::traits::FormHandler;
use super::ui::{centered_rect, dropdown_rect, Styles};
use crate::client::{HttpRegistrationClient, RegistrationSink};
use crate::config::Config;
use crate::form::{self, FormState, SubmitOutcome};
use crate::models::Field;

const INTRO: &str = "Enter your details and your vehicle below to take part in the \
    show contest. Fields marked * are required.";
const CONSENT_LABEL: &str = "By checking this box, you confirm that you are 18 years or older.";
const KEY_HINTS: &str =
    "Tab/Shift-Tab: move | Enter: select | Space: toggle | Ctrl-S: register | Esc: quit";
const MAX_CONTENT_WIDTH: u16 = 90;
const DROPDOWN_HEIGHT: u16 = 10;

/// What each input on the page is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A field owned by the form controller
    Contact(Field),
    City,
    State,
    Phone,
    ModelYear,
    Make,
    Consent,
    Register,
}

/// Inputs in focus order
pub const LAYOUT: [Slot; 12] = [
    Slot::Contact(Field::FirstName),
    Slot::Contact(Field::LastName),
    Slot::City,
    Slot::State,
    Slot::Contact(Field::Email),
    Slot::Phone,
    Slot::ModelYear,
    Slot::Make,
    Slot::Contact(Field::VehicleModel),
    Slot::Contact(Field::OtherNotes),
    Slot::Consent,
    Slot::Register,
];

/// Rows of the page: (column widths in percent, row height)
const ROWS: [(&[u16], u16); 8] = [
    (&[50, 50], 3),
    (&[50, 50], 3),
    (&[100], 3),
    (&[67, 33], 3),
    (&[50, 50], 3),
    (&[100], 4),
    (&[100], 3),
    (&[100], 3),
];

/// Blocking popup shown after a submission reaches the network
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub status_type: StatusType,
}

/// Main TUI application state
pub struct App {
    pub config: Config,
    /// Controller state for the five submitted fields
    pub form: FormState,
    /// On-screen inputs, indexed like [`LAYOUT`]
    pub inputs: Form,
    pub status: StatusDisplay,
    pub notification: Option<Notification>,
    pub should_quit: bool,
    sink: Arc<dyn RegistrationSink>,
    field_areas: Vec<Rect>,
}

fn build_input(slot: Slot) -> FormField {
    match slot {
        Slot::Contact(field @ Field::OtherNotes) => {
            FormField::new(field.label(), FormFieldType::TextArea)
        }
        Slot::Contact(field @ Field::Email) => FormField::new(field.label(), FormFieldType::Text)
            .with_placeholder("you@example.com")
            .required(),
        Slot::Contact(field) if field.is_required() => {
            FormField::new(field.label(), FormFieldType::Text).required()
        }
        Slot::Contact(field) => FormField::new(field.label(), FormFieldType::Text),
        Slot::City => FormField::new("City", FormFieldType::Text),
        Slot::State => FormField::new("State", FormFieldType::Dropdown)
            .with_placeholder("Select a state")
            .with_dropdown_options(pickers::us_states()),
        Slot::Phone => FormField::new("Phone Number", FormFieldType::Text)
            .with_placeholder("(555) 555-5555"),
        Slot::ModelYear => FormField::new("Year", FormFieldType::Dropdown)
            .with_placeholder("Model year")
            .with_dropdown_options(pickers::current_model_years()),
        Slot::Make => FormField::new("Make", FormFieldType::Dropdown)
            .with_placeholder("Select a make")
            .with_dropdown_options(pickers::vehicle_makes()),
        Slot::Consent => FormField::new(CONSENT_LABEL, FormFieldType::Checkbox),
        Slot::Register => FormField::new("Register", FormFieldType::Button),
    }
}

/// Position of `slot` in [`LAYOUT`]
pub fn slot_index(slot: Slot) -> usize {
    LAYOUT.iter().position(|s| *s == slot).unwrap_or(0)
}

impl App {
    /// Create the application with the HTTP client described by `config`
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpRegistrationClient::new(&config)?;
        Ok(Self::with_sink(config, Arc::new(client)))
    }

    /// Create the application around an arbitrary registration sink
    pub fn with_sink(config: Config, sink: Arc<dyn RegistrationSink>) -> Self {
        Self {
            config,
            form: FormState::new(),
            inputs: Form::new(LAYOUT.iter().map(|slot| build_input(*slot)).collect()),
            status: StatusDisplay::new().with_timestamps(),
            notification: None,
            should_quit: false,
            sink,
            field_areas: Vec::new(),
        }
    }

    pub fn current_slot(&self) -> Slot {
        LAYOUT
            .get(self.inputs.get_current_field())
            .copied()
            .unwrap_or(Slot::Register)
    }

    pub fn focus(&mut self, slot: Slot) {
        self.inputs.set_current_field(slot_index(slot));
    }

    /// Value currently held by a placeholder picker or input
    pub fn selected_value(&self, slot: Slot) -> &str {
        self.inputs.fields[slot_index(slot)].selected_value()
    }

    pub fn consent_checked(&self) -> bool {
        self.inputs.fields[slot_index(Slot::Consent)].checked
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Registration form ready, posting to {}", self.config.endpoint);

        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Event::Key(key) = event::read()? {
                if let Some(app_event) = self.handle_key_event(key) {
                    if app_event == AppEvent::Submit {
                        self.status.set_loading("Submitting registration...".to_string());
                        terminal.draw(|f| self.draw(f))?;
                    }
                    self.process_event(app_event).await;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Translate a key press into edits and, where needed, an app event
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<AppEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(AppEvent::Quit);
        }

        if self.notification.is_some() {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                    Some(AppEvent::DismissNotification)
                }
                _ => None,
            };
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => Some(AppEvent::Submit),
                _ => None,
            };
        }

        let field_type = self.inputs.current()?.field_type;

        match key.code {
            KeyCode::Esc => {
                if let Some(input) = self.inputs.current_mut() {
                    if input.show_dropdown {
                        input.show_dropdown = false;
                        return None;
                    }
                }
                return Some(AppEvent::Quit);
            }
            KeyCode::Tab => self.inputs.next_field(),
            KeyCode::BackTab => self.inputs.previous_field(),
            KeyCode::Up if field_type == FormFieldType::Dropdown => {
                if let Some(input) = self.inputs.current_mut() {
                    input.dropdown_up();
                }
            }
            KeyCode::Down if field_type == FormFieldType::Dropdown => {
                if let Some(input) = self.inputs.current_mut() {
                    input.dropdown_down();
                }
            }
            KeyCode::Up => self.inputs.previous_field(),
            KeyCode::Down => self.inputs.next_field(),
            KeyCode::Enter => return self.handle_enter(field_type),
            KeyCode::Left => {
                if let Some(input) = self.inputs.current_mut() {
                    input.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(input) = self.inputs.current_mut() {
                    input.move_cursor_right();
                }
            }
            KeyCode::Home => {
                if let Some(input) = self.inputs.current_mut() {
                    input.move_cursor_to_start();
                }
            }
            KeyCode::End => {
                if let Some(input) = self.inputs.current_mut() {
                    input.move_cursor_to_end();
                }
            }
            KeyCode::Backspace => {
                self.inputs.handle_backspace();
                self.sync_current_input();
            }
            KeyCode::Delete => {
                self.inputs.handle_delete();
                self.sync_current_input();
            }
            KeyCode::Char(c) => {
                self.inputs.handle_char_input(c);
                self.sync_current_input();
            }
            _ => {}
        }

        None
    }

    fn handle_enter(&mut self, field_type: FormFieldType) -> Option<AppEvent> {
        match field_type {
            FormFieldType::Button => return Some(AppEvent::Submit),
            FormFieldType::Checkbox => {
                if let Some(input) = self.inputs.current_mut() {
                    input.toggle();
                }
            }
            FormFieldType::Dropdown => {
                let input = self.inputs.current_mut()?;
                input.select_dropdown_value();
                let message = format!("{} set to {}", input.label, input.value);
                self.inputs.next_field();
                return Some(AppEvent::ShowStatus(message));
            }
            FormFieldType::TextArea => {
                self.inputs.handle_char_input('\n');
                self.sync_current_input();
            }
            FormFieldType::Text => self.inputs.next_field(),
        }
        None
    }

    /// Apply an app event
    pub async fn process_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.should_quit = true,
            AppEvent::Submit => {
                self.submit().await;
            }
            AppEvent::DismissNotification => self.notification = None,
            AppEvent::ShowStatus(message) => self.status.set_info(message),
        }
    }

    /// Feed the focused input's text into the controller
    fn sync_current_input(&mut self) {
        if let Slot::Contact(field) = self.current_slot() {
            let value = self
                .inputs
                .current()
                .map(|input| input.value.clone())
                .unwrap_or_default();
            self.form = std::mem::take(&mut self.form).update(field, value);
            self.refresh_errors();
        }
    }

    /// Mirror controller values and inline errors onto the inputs
    fn sync_inputs_from_form(&mut self) {
        for (slot, input) in LAYOUT.iter().zip(self.inputs.fields.iter_mut()) {
            if let Slot::Contact(field) = slot {
                let value = self.form.value(*field);
                if input.value != value {
                    input.set_value(value);
                }
            }
        }
        self.refresh_errors();
    }

    fn refresh_errors(&mut self) {
        for (slot, input) in LAYOUT.iter().zip(self.inputs.fields.iter_mut()) {
            if let Slot::Contact(field) = slot {
                input.validation_error = self.form.field_error(*field).map(str::to_string);
            }
        }
    }

    /// Submit the current form through the sink and report the outcome
    pub async fn submit(&mut self) -> SubmitOutcome {
        debug!(
            "Submitting; city={:?} state={:?} phone={:?} year={:?} make={:?} consent={}",
            self.selected_value(Slot::City),
            self.selected_value(Slot::State),
            self.selected_value(Slot::Phone),
            self.selected_value(Slot::ModelYear),
            self.selected_value(Slot::Make),
            self.consent_checked()
        );

        let state = std::mem::take(&mut self.form);
        let (state, outcome) = form::submit(state, self.sink.as_ref()).await;
        self.form = state;
        self.sync_inputs_from_form();

        let status_type = match outcome {
            SubmitOutcome::Rejected(field) => {
                self.status
                    .set_warning(format!("Please check {} before registering", field.label()));
                self.focus(Slot::Contact(field));
                return outcome;
            }
            SubmitOutcome::Succeeded => {
                self.status.set_success(form::SUCCESS_MESSAGE.to_string());
                self.focus(Slot::Contact(Field::FirstName));
                StatusType::Success
            }
            SubmitOutcome::Failed { status } => {
                self.status
                    .set_error(format!("{} (HTTP {})", form::FAILURE_MESSAGE, status));
                StatusType::Error
            }
            SubmitOutcome::Errored(ref reason) => {
                self.status
                    .set_error(format!("{} ({})", form::ERROR_MESSAGE, reason));
                StatusType::Error
            }
        };

        if let Some(message) = outcome.notification() {
            self.notification = Some(Notification {
                message: message.to_string(),
                status_type,
            });
        }

        outcome
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();
        let content = content_area(size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(content);

        self.draw_header(f, chunks[0]);

        let intro = Paragraph::new(INTRO)
            .style(Styles::default())
            .wrap(Wrap { trim: true });
        f.render_widget(intro, chunks[1]);

        self.draw_fields(f, chunks[2]);
        self.status.render(f, chunks[3], KEY_HINTS);

        if let Some(ref notification) = self.notification {
            draw_notification(f, size, notification);
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new("Contest Registration")
            .alignment(Alignment::Center)
            .style(Styles::title())
            .block(
                Block::default()
                    .title("PSC")
                    .borders(Borders::ALL)
                    .style(Styles::header()),
            );
        f.render_widget(header, area);
    }

    fn draw_fields(&mut self, f: &mut Frame, area: Rect) {
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                ROWS.iter()
                    .map(|(_, height)| Constraint::Length(*height))
                    .chain(std::iter::once(Constraint::Min(0)))
                    .collect::<Vec<_>>(),
            )
            .split(area);

        self.field_areas.clear();
        for ((columns, _), row_area) in ROWS.iter().zip(row_areas.iter()) {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    columns
                        .iter()
                        .map(|pct| Constraint::Percentage(*pct))
                        .collect::<Vec<_>>(),
                )
                .split(*row_area);
            self.field_areas.extend(cells.iter().copied());
        }

        for (input, cell) in self.inputs.fields.iter().zip(self.field_areas.iter()) {
            input.render(f, *cell);
        }

        let current = self.inputs.get_current_field();
        if let (Some(anchor), Some(input)) = (
            self.field_areas.get(current).copied(),
            self.inputs.fields.get_mut(current),
        ) {
            if input.field_type == FormFieldType::Dropdown && input.show_dropdown {
                let list_area = dropdown_rect(anchor, area, DROPDOWN_HEIGHT);
                f.render_widget(Clear, list_area);
                input.render_dropdown(f, list_area);
            }
        }
    }
}

/// Narrow very wide terminals to a readable form width
fn content_area(area: Rect) -> Rect {
    if area.width <= MAX_CONTENT_WIDTH {
        return area;
    }
    Rect {
        x: area.x + (area.width - MAX_CONTENT_WIDTH) / 2,
        width: MAX_CONTENT_WIDTH,
        ..area
    }
}

fn draw_notification(f: &mut Frame, area: Rect, notification: &Notification) {
    let popup_area = centered_rect(60, 25, area);
    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(format!(
        "{}\n\nPress Enter to continue",
        notification.message
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title("Notice")
            .borders(Borders::ALL)
            .border_style(notification.status_type.style()),
    );

    f.render_widget(popup, popup_area);
}
