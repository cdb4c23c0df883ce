use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyEvent};

use api_types::expense::Expense;
use engine::Money;

use crate::{
    client::Client,
    config::AppConfig,
    controller::{
        Controller, DeleteOutcome, ExpenseApi, ExpenseDraft, ExpenseListView, SubmitOutcome,
    },
    error::{AppError, Result},
    ui,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    Category,
    Date,
    Description,
}

#[derive(Debug)]
pub struct FormState {
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
    pub focus: FormField,
}

impl FormState {
    fn new() -> Self {
        Self {
            amount: String::new(),
            category: String::new(),
            date: today(),
            description: String::new(),
            focus: FormField::Amount,
        }
    }

    /// Clears every field and restores today's date as the default.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            amount: self.amount.clone(),
            category: self.category.clone(),
            date: self.date.clone(),
            description: self.description.clone(),
        }
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Amount => &mut self.amount,
            FormField::Category => &mut self.category,
            FormField::Date => &mut self.date,
            FormField::Description => &mut self.description,
        }
    }

    fn advance_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Amount => FormField::Category,
            FormField::Category => FormField::Date,
            FormField::Date => FormField::Description,
            FormField::Description => FormField::Amount,
        };
    }
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListStatus {
    #[default]
    Loaded,
    Empty,
    Error,
}

/// The rendered list: a pure projection of the last successful fetch.
#[derive(Debug, Default)]
pub struct ListState {
    pub expenses: Vec<Expense>,
    pub total: Money,
    pub status: ListStatus,
}

impl ExpenseListView for ListState {
    fn render(&mut self, expenses: &[Expense], total: Money) {
        self.expenses = expenses.to_vec();
        self.total = total;
        self.status = ListStatus::Loaded;
    }

    fn render_empty(&mut self) {
        self.expenses.clear();
        self.total = Money::ZERO;
        self.status = ListStatus::Empty;
    }

    fn render_error(&mut self) {
        self.expenses.clear();
        self.total = Money::ZERO;
        self.status = ListStatus::Error;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Blocks until the user answers; only a confirmation issues the request.
    ConfirmDelete { id: i32 },
    /// Blocks until dismissed.
    Alert { message: String },
}

#[derive(Debug)]
pub struct AppState {
    pub form: FormState,
    pub list: ListState,
    pub selected: usize,
    pub modal: Option<Modal>,
}

pub struct App<C> {
    controller: Controller<C>,
    pub state: AppState,
    should_quit: bool,
}

impl App<Client> {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        Ok(Self::with_api(client))
    }
}

impl<C: ExpenseApi> App<C> {
    pub fn with_api(api: C) -> Self {
        Self {
            controller: Controller::new(api),
            state: AppState {
                form: FormState::new(),
                list: ListState::default(),
                selected: 0,
                modal: None,
            },
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        self.controller.load(&mut self.state.list).await;

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        let action = ui::keymap::map_key(key);

        if let Some(modal) = self.state.modal.clone() {
            self.handle_modal_key(modal, action).await;
            return;
        }

        match action {
            ui::keymap::AppAction::Quit => {
                self.should_quit = true;
            }
            ui::keymap::AppAction::Cancel => {
                self.should_quit = true;
            }
            ui::keymap::AppAction::NextField => {
                self.state.form.advance_focus();
            }
            ui::keymap::AppAction::Submit => {
                self.submit().await;
            }
            ui::keymap::AppAction::Backspace => {
                self.state.form.active_field_mut().pop();
            }
            ui::keymap::AppAction::Up => {
                self.state.selected = self.state.selected.saturating_sub(1);
            }
            ui::keymap::AppAction::Down => {
                if !self.state.list.expenses.is_empty() {
                    self.state.selected =
                        (self.state.selected + 1).min(self.state.list.expenses.len() - 1);
                }
            }
            ui::keymap::AppAction::Delete => {
                self.request_delete();
            }
            ui::keymap::AppAction::Refresh => {
                self.controller.load(&mut self.state.list).await;
                self.state.selected = 0;
            }
            ui::keymap::AppAction::Input(ch) => {
                self.state.form.active_field_mut().push(ch);
            }
            ui::keymap::AppAction::None => {}
        }
    }

    async fn handle_modal_key(&mut self, modal: Modal, action: ui::keymap::AppAction) {
        match modal {
            Modal::Alert { .. } => {
                // A blocking alert: any dismiss key closes it, nothing else
                // gets through.
                if matches!(
                    action,
                    ui::keymap::AppAction::Submit | ui::keymap::AppAction::Cancel
                ) {
                    self.state.modal = None;
                }
            }
            Modal::ConfirmDelete { id } => match action {
                ui::keymap::AppAction::Submit | ui::keymap::AppAction::Input('y') => {
                    self.state.modal = None;
                    self.delete(id).await;
                }
                ui::keymap::AppAction::Cancel | ui::keymap::AppAction::Input('n') => {
                    self.state.modal = None;
                }
                _ => {}
            },
        }
    }

    /// Opens the confirmation modal for the selected row. The request is
    /// only issued once the user confirms.
    fn request_delete(&mut self) {
        if self.state.list.status != ListStatus::Loaded {
            return;
        }
        if let Some(expense) = self.state.list.expenses.get(self.state.selected) {
            self.state.modal = Some(Modal::ConfirmDelete { id: expense.id });
        }
    }

    async fn submit(&mut self) {
        let draft = self.state.form.draft();
        match self.controller.submit(&mut self.state.list, &draft).await {
            SubmitOutcome::Saved => {
                self.state.form.reset();
                self.state.selected = 0;
            }
            SubmitOutcome::Rejected(message) => {
                self.state.modal = Some(Modal::Alert {
                    message: format!("Error adding expense: {message}"),
                });
            }
        }
    }

    async fn delete(&mut self, id: i32) {
        match self.controller.delete(&mut self.state.list, id).await {
            DeleteOutcome::Deleted => {
                self.state.selected = 0;
            }
            DeleteOutcome::Failed => {
                self.state.modal = Some(Modal::Alert {
                    message: "Error deleting expense".to_string(),
                });
            }
        }
    }
}
