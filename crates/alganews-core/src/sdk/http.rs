//! reqwest-backed [`AlgaNewsApi`].

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::cash_flow::{
    CategoryInput, CategoryQuery, CategorySummary, EntryDetailed, EntryInput, EntryQuery,
    EntrySummary,
};
use super::metric::MonthlyRevenueExpense;
use super::payment::{
    PaymentDetailed, PaymentInput, PaymentPreview, PaymentQuery, PaymentSummary, PreviewInput,
};
use super::post::{PostQuery, PostSummary};
use super::user::{UserDetailed, UserInput, UserSummary};
use super::{AlgaNewsApi, ApiError, ApiResult, Id, Page};
use crate::auth::TokenStore;
use crate::config::ApiConfig;

/// HTTP client for the AlgaNews API.
///
/// Every request carries the access token currently held by the token store.
#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl HttpApi {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, &config.base_url, tokens))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "api request");
        let builder = self.client.request(method, url);
        match self.tokens.access_token() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                warn!("failed to read access token: {e:#}");
                builder
            }
        }
    }

    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &body);
        debug!(status = status.as_u16(), kind = ?err.kind(), "api error response");
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn execute(&self, builder: RequestBuilder) -> ApiResult<()> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> ApiResult<T> {
        self.fetch(self.request(Method::GET, path).query(params)).await
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.fetch(self.request(method, path).json(body)).await
    }
}

impl AlgaNewsApi for HttpApi {
    async fn list_users(&self) -> ApiResult<Vec<UserSummary>> {
        self.get("/users", &[]).await
    }

    async fn get_user(&self, id: Id) -> ApiResult<UserDetailed> {
        self.get(&format!("/users/{id}"), &[]).await
    }

    async fn create_user(&self, input: UserInput) -> ApiResult<UserDetailed> {
        self.send_json(Method::POST, "/users", &input).await
    }

    async fn update_user(&self, id: Id, input: UserInput) -> ApiResult<UserDetailed> {
        self.send_json(Method::PUT, &format!("/users/{id}"), &input)
            .await
    }

    async fn activate_user(&self, id: Id) -> ApiResult<()> {
        self.execute(self.request(Method::PUT, &format!("/users/{id}/activation")))
            .await
    }

    async fn deactivate_user(&self, id: Id) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/users/{id}/activation")))
            .await
    }

    async fn list_payments(&self, query: PaymentQuery) -> ApiResult<Page<PaymentSummary>> {
        self.get("/payments", &query.to_params()).await
    }

    async fn get_payment(&self, id: Id) -> ApiResult<PaymentDetailed> {
        self.get(&format!("/payments/{id}"), &[]).await
    }

    async fn schedule_payment(&self, input: PaymentInput) -> ApiResult<PaymentDetailed> {
        self.send_json(Method::POST, "/payments", &input).await
    }

    async fn remove_payment(&self, id: Id) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/payments/{id}")))
            .await
    }

    async fn approve_payments(&self, ids: Vec<Id>) -> ApiResult<()> {
        self.execute(
            self.request(Method::PUT, "/payments/bulk-approvals")
                .json(&ids),
        )
        .await
    }

    async fn preview_payment(&self, input: PreviewInput) -> ApiResult<PaymentPreview> {
        self.send_json(Method::POST, "/payments/previews", &input)
            .await
    }

    async fn list_entries(&self, query: EntryQuery) -> ApiResult<Vec<EntrySummary>> {
        self.get("/cashflow/entries", &query.to_params()).await
    }

    async fn get_entry(&self, id: Id) -> ApiResult<EntryDetailed> {
        self.get(&format!("/cashflow/entries/{id}"), &[]).await
    }

    async fn create_entry(&self, input: EntryInput) -> ApiResult<EntryDetailed> {
        self.send_json(Method::POST, "/cashflow/entries", &input)
            .await
    }

    async fn update_entry(&self, id: Id, input: EntryInput) -> ApiResult<EntryDetailed> {
        self.send_json(Method::PUT, &format!("/cashflow/entries/{id}"), &input)
            .await
    }

    async fn remove_entry(&self, id: Id) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/cashflow/entries/{id}")))
            .await
    }

    async fn remove_entries(&self, ids: Vec<Id>) -> ApiResult<()> {
        self.execute(
            self.request(Method::POST, "/cashflow/entries/bulk-removals")
                .json(&ids),
        )
        .await
    }

    async fn list_categories(&self, query: CategoryQuery) -> ApiResult<Vec<CategorySummary>> {
        self.get("/cashflow/categories", &query.to_params()).await
    }

    async fn create_category(&self, input: CategoryInput) -> ApiResult<CategorySummary> {
        self.send_json(Method::POST, "/cashflow/categories", &input)
            .await
    }

    async fn remove_category(&self, id: Id) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/cashflow/categories/{id}")))
            .await
    }

    async fn monthly_revenues_expenses(&self) -> ApiResult<Vec<MonthlyRevenueExpense>> {
        self.get("/metrics/monthly-revenues-expenses", &[]).await
    }

    async fn list_posts(&self, query: PostQuery) -> ApiResult<Page<PostSummary>> {
        self.get("/posts", &query.to_params()).await
    }
}
