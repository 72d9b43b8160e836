//! Implements the HTTP-backed ledger store.
//!
//! The backend speaks a small JSON API: every response is wrapped in an
//! envelope of `{ success, data, message }`, records carry opaque string
//! ids assigned by the backend, and list filtering is pushed down as
//! query parameters. Not-found outcomes travel inside the envelope;
//! network and decoding failures surface as [Error::Transport].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
    Error,
    models::{
        Category, CategoryId, CategoryName, NewCategory, NewTransaction, Transaction,
        TransactionId, TransactionType,
    },
    query::{DateRange, TransactionQuery},
    stores::{CategoryStore, TransactionStore},
    totals::Totals,
};

/// Connection settings for a remote ledger backend.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the backend, e.g. `https://ledger.example.com/api`.
    pub base_url: String,
    /// Timeout applied to each request. The transport owns the timeout;
    /// store operations define none of their own.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Connection settings for `base_url` with the default 30 second
    /// timeout.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Shared HTTP plumbing for the remote stores.
///
/// Clone one handle per store; clones share the underlying connection
/// pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the backend described by `config`.
    ///
    /// # Errors
    /// Returns [Error::Transport] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &RemoteConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<ApiEnvelope<T>, Error> {
        let response = self
            .http
            .get(self.url(path))
            .query(params)
            .send()
            .await
            .map_err(transport_error)?;

        read_envelope(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, Error> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        read_envelope(response).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, Error> {
        let response = self
            .http
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        read_envelope(response).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<ApiEnvelope<T>, Error> {
        let response = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;

        read_envelope(response).await
    }
}

fn transport_error(error: reqwest::Error) -> Error {
    Error::Transport(error.to_string())
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiEnvelope<T>, Error> {
    let status = response.status();

    if !status.is_success() {
        return Err(Error::Transport(format!("backend returned {status}")));
    }

    response.json().await.map_err(transport_error)
}

/// The wrapper every backend response arrives in.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: String,
}

impl<T> ApiEnvelope<T> {
    /// The payload of a read that must name an existing record.
    fn required(self) -> Result<T, Error> {
        match self.data {
            Some(data) if self.success => Ok(data),
            _ => Err(Error::NotFound),
        }
    }

    /// The payload of a request the backend must not silently decline.
    fn accepted(self) -> Result<T, Error> {
        match self.data {
            Some(data) if self.success => Ok(data),
            _ => {
                warn!(message = %self.message, "backend declined the request");
                Err(Error::Backend(self.message))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TransactionDto {
    #[serde(default)]
    id: String,
    amount: f64,
    category: String,
    #[serde(rename = "type")]
    kind: TransactionType,
    date: String,
    #[serde(default)]
    note: String,
    #[serde(rename = "photoUrl")]
    photo_url: Option<String>,
}

impl TransactionDto {
    fn from_new(draft: &NewTransaction) -> Self {
        Self {
            id: String::new(),
            amount: draft.amount,
            category: draft.category.to_string(),
            kind: draft.kind,
            date: draft.date.clone(),
            note: draft.note.clone(),
            photo_url: draft.photo_ref.clone(),
        }
    }

    fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id.clone(),
            amount: transaction.amount,
            category: transaction.category.to_string(),
            kind: transaction.kind,
            date: transaction.date.clone(),
            note: transaction.note.clone(),
            photo_url: transaction.photo_ref.clone(),
        }
    }

    fn into_transaction(self) -> Transaction {
        Transaction {
            id: self.id,
            amount: self.amount,
            category: CategoryName::new_unchecked(&self.category),
            kind: self.kind,
            date: self.date,
            note: self.note,
            photo_ref: self.photo_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CategoryDto {
    #[serde(default)]
    id: String,
    name: String,
    color: Option<i32>,
    icon: Option<String>,
}

impl CategoryDto {
    fn from_new(draft: &NewCategory) -> Self {
        Self {
            id: String::new(),
            name: draft.name.to_string(),
            color: draft.color,
            icon: draft.icon.clone(),
        }
    }

    fn from_category(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.to_string(),
            color: category.color,
            icon: category.icon.clone(),
        }
    }

    fn into_category(self) -> Category {
        Category {
            id: self.id,
            name: CategoryName::new_unchecked(&self.name),
            color: self.color,
            icon: self.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TotalsDto {
    income: f64,
    expense: f64,
    balance: f64,
}

/// Build the pushed-down query parameters for a transaction listing.
///
/// Absent or empty query fields are omitted entirely; category ids are
/// comma-joined in a deterministic order.
fn list_params(query: &TransactionQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    if let Some(text) = query
        .text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
    {
        params.push(("text", text.to_string()));
    }

    if let Some(kind) = query.kind {
        params.push(("type", kind.to_string()));
    }

    if !query.category_ids.is_empty() {
        let mut ids: Vec<&str> = query.category_ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        params.push(("categoryIds", ids.join(",")));
    }

    if let Some(range) = query.date_range {
        push_range_params(range, &mut params);
    }

    params
}

fn push_range_params(range: DateRange, params: &mut Vec<(&'static str, String)>) {
    if let Some(from) = range.from {
        params.push(("from", from.to_string()));
    }

    if let Some(to) = range.to {
        params.push(("to", to.to_string()));
    }
}

/// Stores transactions on a remote JSON backend.
#[derive(Debug, Clone)]
pub struct RemoteTransactionStore {
    api: ApiClient,
}

impl RemoteTransactionStore {
    /// Create a new store speaking to the backend behind `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TransactionStore for RemoteTransactionStore {
    async fn list(&self, query: Option<&TransactionQuery>) -> Result<Vec<Transaction>, Error> {
        let params = query.map(list_params).unwrap_or_default();
        let envelope: ApiEnvelope<Vec<TransactionDto>> =
            self.api.get_json("transactions", &params).await?;

        let dtos = envelope.accepted()?;

        Ok(dtos.into_iter().map(TransactionDto::into_transaction).collect())
    }

    async fn get(&self, id: &TransactionId) -> Result<Transaction, Error> {
        let envelope: ApiEnvelope<TransactionDto> =
            self.api.get_json(&format!("transactions/{id}"), &[]).await?;

        envelope.required().map(TransactionDto::into_transaction)
    }

    async fn insert(&self, draft: NewTransaction) -> Result<Transaction, Error> {
        let draft = draft.normalize()?;
        let dto = TransactionDto::from_new(&draft);
        let envelope: ApiEnvelope<TransactionDto> =
            self.api.post_json("transactions", &dto).await?;

        envelope.accepted().map(TransactionDto::into_transaction)
    }

    async fn update(&self, transaction: Transaction) -> Result<bool, Error> {
        let transaction = transaction.normalize()?;
        let dto = TransactionDto::from_transaction(&transaction);
        let envelope: ApiEnvelope<TransactionDto> = self
            .api
            .put_json(&format!("transactions/{}", transaction.id), &dto)
            .await?;

        Ok(envelope.success)
    }

    async fn delete(&self, id: &TransactionId) -> Result<bool, Error> {
        let envelope: ApiEnvelope<serde_json::Value> =
            self.api.delete_json(&format!("transactions/{id}")).await?;

        Ok(envelope.success)
    }

    async fn totals(&self, range: Option<DateRange>) -> Result<Totals, Error> {
        let mut params = Vec::new();

        if let Some(range) = range {
            push_range_params(range, &mut params);
        }

        let envelope: ApiEnvelope<TotalsDto> = self.api.get_json("totals", &params).await?;
        let dto = envelope.accepted()?;

        Ok(Totals {
            income: dto.income,
            expense: dto.expense,
            balance: dto.balance,
        })
    }
}

/// Stores categories on a remote JSON backend.
#[derive(Debug, Clone)]
pub struct RemoteCategoryStore {
    api: ApiClient,
}

impl RemoteCategoryStore {
    /// Create a new store speaking to the backend behind `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CategoryStore for RemoteCategoryStore {
    async fn list(&self) -> Result<Vec<Category>, Error> {
        let envelope: ApiEnvelope<Vec<CategoryDto>> =
            self.api.get_json("categories", &[]).await?;

        let dtos = envelope.accepted()?;

        Ok(dtos.into_iter().map(CategoryDto::into_category).collect())
    }

    async fn get(&self, id: &CategoryId) -> Result<Category, Error> {
        let envelope: ApiEnvelope<CategoryDto> =
            self.api.get_json(&format!("categories/{id}"), &[]).await?;

        envelope.required().map(CategoryDto::into_category)
    }

    async fn insert(&self, draft: NewCategory) -> Result<Category, Error> {
        let dto = CategoryDto::from_new(&draft);
        let envelope: ApiEnvelope<CategoryDto> = self.api.post_json("categories", &dto).await?;

        envelope.accepted().map(CategoryDto::into_category)
    }

    async fn update(&self, category: Category) -> Result<bool, Error> {
        if category.id.is_empty() {
            return Err(Error::MissingId);
        }

        let dto = CategoryDto::from_category(&category);
        let envelope: ApiEnvelope<CategoryDto> = self
            .api
            .put_json(&format!("categories/{}", category.id), &dto)
            .await?;

        Ok(envelope.success)
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, Error> {
        let envelope: ApiEnvelope<serde_json::Value> =
            self.api.delete_json(&format!("categories/{id}")).await?;

        Ok(envelope.success)
    }
}


#[cfg(test)]
mod dto_tests {
    use crate::models::{CategoryName, NewTransaction, TransactionType};

    use super::{ApiEnvelope, CategoryDto, TransactionDto};

    #[test]
    fn transaction_dto_deserializes_the_wire_shape() {
        let json = r#"{
            "success": true,
            "data": {
                "id": "65a1b2c3",
                "amount": -6500.0,
                "category": "Food",
                "type": "EXPENSE",
                "date": "05 Jan 2025",
                "note": "lunch",
                "photoUrl": null
            },
            "message": "ok"
        }"#;

        let envelope: ApiEnvelope<TransactionDto> = serde_json::from_str(json).unwrap();
        let transaction = envelope.required().unwrap().into_transaction();

        assert_eq!(transaction.id, "65a1b2c3");
        assert_eq!(transaction.amount, -6500.0);
        assert_eq!(transaction.category.as_ref(), "Food");
        assert_eq!(transaction.kind, TransactionType::Expense);
        assert_eq!(transaction.date, "05 Jan 2025");
        assert_eq!(transaction.note, "lunch");
        assert_eq!(transaction.photo_ref, None);
    }

    #[test]
    fn missing_note_and_message_fall_back_to_empty() {
        let json = r#"{
            "success": true,
            "data": {
                "id": "65a1b2c3",
                "amount": 850.0,
                "category": "Salary",
                "type": "INCOME",
                "date": "2025-01-15",
                "photoUrl": "https://cdn.example.com/x.jpg"
            }
        }"#;

        let envelope: ApiEnvelope<TransactionDto> = serde_json::from_str(json).unwrap();

        assert_eq!(envelope.message, "");

        let transaction = envelope.required().unwrap().into_transaction();
        assert_eq!(transaction.note, "");
        assert_eq!(
            transaction.photo_ref.as_deref(),
            Some("https://cdn.example.com/x.jpg")
        );
    }

    #[test]
    fn unsuccessful_single_reads_report_not_found() {
        let json = r#"{ "success": false, "data": null, "message": "no such record" }"#;

        let envelope: ApiEnvelope<TransactionDto> = serde_json::from_str(json).unwrap();

        assert_eq!(envelope.required().err(), Some(crate::Error::NotFound));
    }

    #[test]
    fn drafts_serialize_with_the_wire_field_names() {
        let draft = NewTransaction::new(
            -120.0,
            CategoryName::new_unchecked("Food"),
            TransactionType::Expense,
            "05 Jan 2025",
        )
        .photo_ref(Some("https://cdn.example.com/x.jpg".to_string()));

        let value = serde_json::to_value(TransactionDto::from_new(&draft)).unwrap();

        assert_eq!(value["type"], "EXPENSE");
        assert_eq!(value["photoUrl"], "https://cdn.example.com/x.jpg");
        assert_eq!(value["category"], "Food");
    }

    #[test]
    fn category_dto_round_trips() {
        let json = r#"{ "id": "c9", "name": "Transport", "color": -65536, "icon": "bus" }"#;

        let dto: CategoryDto = serde_json::from_str(json).unwrap();
        let category = dto.clone().into_category();

        assert_eq!(category.id, "c9");
        assert_eq!(category.name.as_ref(), "Transport");
        assert_eq!(category.color, Some(-65536));
        assert_eq!(category.icon.as_deref(), Some("bus"));
        assert_eq!(CategoryDto::from_category(&category), dto);
    }
}
