use api_types::expense::{Expense, ExpenseNew};
use reqwest::Url;

use serde::Deserialize;
use thiserror::Error;

use crate::{
    controller::ExpenseApi,
    error::{AppError, Result},
};

/// Failure modes of a request, carrying the server's `error` message where
/// one was returned. The `Display` form is what gets surfaced in alerts.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }
}

async fn error_for(res: reqwest::Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        404 => ClientError::NotFound(body),
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}

impl ExpenseApi for Client {
    async fn list(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        let endpoint = self.endpoint("api/expenses")?;

        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<Vec<Expense>>()
                .await
                .map_err(ClientError::Transport);
        }

        Err(error_for(res).await)
    }

    async fn create(&self, payload: &ExpenseNew) -> std::result::Result<Expense, ClientError> {
        let endpoint = self.endpoint("api/expenses")?;

        let res = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Expense>().await.map_err(ClientError::Transport);
        }

        Err(error_for(res).await)
    }

    async fn delete(&self, id: i32) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("api/expenses/{id}"))?;

        let res = self
            .http
            .delete(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }

        Err(error_for(res).await)
    }
}
