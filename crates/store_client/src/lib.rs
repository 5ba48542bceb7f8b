//! Client for the hosted table store.
//!
//! The store exposes a PostgREST-compatible REST surface; this crate wraps the
//! five operations the application consumes (list, get-one, insert, update,
//! delete-by-id-set) behind a typed employee API. Requests authenticate with
//! the project API key on every call.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::domain::{Employee, EmployeeDraft, EmployeeId};
use shared::error::ApiError;

pub mod error;
pub mod query;

pub use error::StoreError;
pub use reqwest::StatusCode;
use query::{Filter, Order};

const EMPLOYEE_TABLE: &str = "Employee";
const ID_COLUMN: &str = "id";

/// Connection settings for one store project.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://xyzcompany.supabase.co`.
    pub base_url: String,
    /// Project API key, sent as both `apikey` and bearer token.
    pub api_key: String,
}

/// Handle for issuing table operations. Cheap to clone; the underlying HTTP
/// client pools connections.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    /// Starts a request against one table.
    pub fn table<'a>(&'a self, table: &'a str) -> TableRequest<'a> {
        TableRequest {
            client: self,
            table,
            order: None,
            filters: Vec::new(),
        }
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    // -- Typed employee surface -------------------------------------------

    /// Fetches the full employee collection, ordered by id ascending.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        self.table(EMPLOYEE_TABLE)
            .order(Order::asc(ID_COLUMN))
            .rows()
            .await
    }

    /// Fetches exactly one employee by id.
    pub async fn get_employee(&self, id: &EmployeeId) -> Result<Employee, StoreError> {
        self.table(EMPLOYEE_TABLE)
            .filter(Filter::eq(ID_COLUMN, id.as_str()))
            .single(id.as_str())
            .await
    }

    /// Inserts a new employee and returns the stored row (id assigned by the
    /// store).
    pub async fn insert_employee(&self, draft: &EmployeeDraft) -> Result<Employee, StoreError> {
        self.table(EMPLOYEE_TABLE).insert(draft).await
    }

    /// Updates every editable field of an existing employee.
    pub async fn update_employee(
        &self,
        id: &EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<(), StoreError> {
        self.table(EMPLOYEE_TABLE)
            .filter(Filter::eq(ID_COLUMN, id.as_str()))
            .update(draft)
            .await
    }

    /// Deletes every employee whose id is in the set. A single-row delete is
    /// the one-element case. An empty set is a no-op.
    pub async fn delete_employees(&self, ids: &[EmployeeId]) -> Result<(), StoreError> {
        if ids.is_empty() {
            tracing::debug!("delete_employees called with empty id set, skipping request");
            return Ok(());
        }
        self.table(EMPLOYEE_TABLE)
            .filter(Filter::in_set(
                ID_COLUMN,
                ids.iter().map(|id| id.0.clone()),
            ))
            .delete()
            .await
    }
}

/// One pending table operation: filters and ordering accumulate, then a
/// terminal method sends the request.
pub struct TableRequest<'a> {
    client: &'a StoreClient,
    table: &'a str,
    order: Option<Order>,
    filters: Vec<Filter>,
}

impl TableRequest<'_> {
    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.to_param()));
        }
        pairs.extend(self.filters.iter().map(Filter::to_pair));
        pairs
    }

    /// `GET`: all matching rows.
    pub async fn rows<T: DeserializeOwned>(self) -> Result<Vec<T>, StoreError> {
        let request = self
            .client
            .http
            .get(self.client.endpoint(self.table))
            .query(&self.query_pairs());
        let response = self.client.authorize(request).send().await?;
        decode_rows(response).await
    }

    /// `GET` expecting exactly one matching row.
    pub async fn single<T: DeserializeOwned>(self, id: &str) -> Result<T, StoreError> {
        let table = self.table.to_string();
        let mut rows: Vec<T> = self.rows().await?;
        if rows.len() != 1 {
            return Err(StoreError::RowCount {
                table,
                id: id.to_string(),
                count: rows.len(),
            });
        }
        Ok(rows.remove(0))
    }

    /// `POST` one row, returning the stored representation.
    pub async fn insert<B: Serialize, T: DeserializeOwned>(self, body: &B) -> Result<T, StoreError> {
        let request = self
            .client
            .http
            .post(self.client.endpoint(self.table))
            .header("Prefer", "return=representation")
            .query(&self.query_pairs())
            .json(body);
        let response = self.client.authorize(request).send().await?;
        let mut rows: Vec<T> = decode_rows(response).await?;
        if rows.is_empty() {
            return Err(StoreError::RowCount {
                table: self.table.to_string(),
                id: "<new>".to_string(),
                count: 0,
            });
        }
        Ok(rows.remove(0))
    }

    /// `PATCH` every matching row.
    pub async fn update<B: Serialize>(self, body: &B) -> Result<(), StoreError> {
        let request = self
            .client
            .http
            .patch(self.client.endpoint(self.table))
            .query(&self.query_pairs())
            .json(body);
        let response = self.client.authorize(request).send().await?;
        check_status(response).await.map(drop)
    }

    /// `DELETE` every matching row.
    pub async fn delete(self) -> Result<(), StoreError> {
        let request = self
            .client
            .http
            .delete(self.client.endpoint(self.table))
            .query(&self.query_pairs());
        let response = self.client.authorize(request).send().await?;
        check_status(response).await.map(drop)
    }
}

/// Maps non-success statuses to `StoreError::Rejected`, decoding the store's
/// error envelope when present.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let body: Option<ApiError> = serde_json::from_str(&text).ok();
    let message = body
        .as_ref()
        .map(|err| err.message.clone())
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.to_string()
            } else {
                text.clone()
            }
        });
    tracing::warn!(%status, message, "store request rejected");
    Err(StoreError::Rejected {
        status,
        message,
        body,
    })
}

async fn decode_rows<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Vec<T>, StoreError> {
    let response = check_status(response).await?;
    response.json().await.map_err(StoreError::Decode)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
