//! The expense list controller: fetch, render, submit, delete.
//!
//! The controller itself is stateless. Everything it renders comes from the
//! last successful fetch, and every mutation converges back to [`load`] as
//! the single source of rendered truth; the list is never patched locally.
//!
//! [`load`]: Controller::load

use api_types::expense::{Expense, ExpenseNew};
use engine::Money;

use crate::client::ClientError;

/// Network side of the controller, implemented by the reqwest
/// [`Client`](crate::client::Client) and by stubs in tests.
pub trait ExpenseApi {
    async fn list(&self) -> Result<Vec<Expense>, ClientError>;
    async fn create(&self, payload: &ExpenseNew) -> Result<Expense, ClientError>;
    async fn delete(&self, id: i32) -> Result<(), ClientError>;
}

/// Rendering side of the controller. The TUI list state implements this;
/// tests use a recording double.
pub trait ExpenseListView {
    /// Replaces the rendered rows with `expenses` and their computed total.
    fn render(&mut self, expenses: &[Expense], total: Money);
    /// Replaces the rendered rows with a single "no expenses found" row and
    /// a zero total.
    fn render_empty(&mut self);
    /// Replaces the rendered rows with a single error row.
    fn render_error(&mut self);
}

/// The form's raw field values at submit time.
#[derive(Clone, Debug, Default)]
pub struct ExpenseDraft {
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Created; the list was re-fetched and the form should be reset.
    Saved,
    /// Rejected with a message for the user; the form is left untouched and
    /// the list is not reloaded.
    Rejected(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Deleted; the list was re-fetched.
    Deleted,
    /// Failed; the list is not reloaded. Detail goes to the log, the caller
    /// only shows a generic alert.
    Failed,
}

/// Sums the listed amounts in cents, saturating at the numeric bounds so an
/// absurd total clamps visibly instead of dropping an addend.
pub fn total_amount(expenses: &[Expense]) -> Money {
    expenses.iter().fold(Money::ZERO, |acc, expense| {
        let amount = Money::from_decimal(expense.amount).unwrap_or(Money::ZERO);
        acc.saturating_add(amount)
    })
}

pub struct Controller<C> {
    api: C,
}

impl<C: ExpenseApi> Controller<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    #[allow(dead_code)]
    pub fn api(&self) -> &C {
        &self.api
    }

    /// Fetches the full list and re-renders it.
    ///
    /// Failures are absorbed: an error row is rendered in place and the
    /// detail goes to the log. The page stays usable.
    pub async fn load<V: ExpenseListView>(&self, view: &mut V) {
        match self.api.list().await {
            Ok(expenses) if expenses.is_empty() => view.render_empty(),
            Ok(expenses) => {
                let total = total_amount(&expenses);
                view.render(&expenses, total);
            }
            Err(err) => {
                tracing::error!("error loading expenses: {err}");
                view.render_error();
            }
        }
    }

    /// Creates an expense from the form's current values.
    ///
    /// On success the list is re-fetched; on failure the server's message
    /// (or the transport error's) comes back for the user and nothing is
    /// reloaded.
    pub async fn submit<V: ExpenseListView>(
        &self,
        view: &mut V,
        draft: &ExpenseDraft,
    ) -> SubmitOutcome {
        // Field-type level enforcement: the amount field only holds a
        // decimal number.
        let amount = match draft.amount.parse::<Money>() {
            Ok(amount) => amount,
            Err(err) => return SubmitOutcome::Rejected(err.to_string()),
        };

        let description = draft.description.trim();
        let payload = ExpenseNew {
            amount: amount.to_decimal(),
            category: draft.category.clone(),
            date: draft.date.clone(),
            description: (!description.is_empty()).then(|| description.to_string()),
        };

        match self.api.create(&payload).await {
            Ok(_) => {
                self.load(view).await;
                SubmitOutcome::Saved
            }
            Err(err) => SubmitOutcome::Rejected(err.to_string()),
        }
    }

    /// Deletes an expense by id. Confirmation happens before this is called;
    /// a declined confirmation never reaches the controller.
    pub async fn delete<V: ExpenseListView>(&self, view: &mut V, id: i32) -> DeleteOutcome {
        match self.api.delete(id).await {
            Ok(()) => {
                self.load(view).await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::error!("error deleting expense {id}: {err}");
                DeleteOutcome::Failed
            }
        }
    }
}
