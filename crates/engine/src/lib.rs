use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryOrder, prelude::*};

pub use error::EngineError;
pub use expense::Expense;
pub use money::Money;

mod error;
pub mod expense;
mod money;

type ResultEngine<T> = Result<T, EngineError>;

/// Storage-backed expense operations.
///
/// The engine holds no in-memory copy of the records: every read goes to the
/// database, so a listing is always a projection of the stored state.
#[derive(Clone, Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// Validates and stores a new expense, returning the record with its
    /// assigned id.
    ///
    /// Validation mirrors what the API promises: `amount` must be a finite
    /// positive number (rounded to cents), `category` must be non-empty and
    /// `date` must parse as `%Y-%m-%d`. An empty `description` is stored as
    /// absent.
    pub async fn add_expense(
        &self,
        amount: f64,
        category: &str,
        date: &str,
        description: Option<&str>,
    ) -> ResultEngine<Expense> {
        let category = category.trim();
        if category.is_empty() {
            return Err(EngineError::MissingField("category".to_string()));
        }

        let amount = Money::from_decimal(amount)?;
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be positive".to_string(),
            ));
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|err| EngineError::InvalidDate(format!("{date}: {err}")))?;

        let description = description
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(ToString::to_string);

        let model = expense::ActiveModel {
            id: ActiveValue::NotSet,
            amount_cents: ActiveValue::Set(amount.cents()),
            category: ActiveValue::Set(category.to_string()),
            date: ActiveValue::Set(date),
            description: ActiveValue::Set(description),
        };
        let inserted = model.insert(&self.database).await?;

        Ok(inserted.into())
    }

    /// Returns every expense, newest first.
    ///
    /// Ordered by date descending; same-day records fall back to id
    /// descending so the latest insert renders first.
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = expense::Entity::find()
            .order_by_desc(expense::Column::Date)
            .order_by_desc(expense::Column::Id)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Expense::from).collect())
    }

    /// Deletes the expense with the given id.
    pub async fn delete_expense(&self, id: i32) -> ResultEngine<()> {
        let result = expense::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(format!("expense {id}")));
        }

        Ok(())
    }
}
