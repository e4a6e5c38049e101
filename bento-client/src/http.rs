//! HTTP client for network-based API calls

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::dto::{HealthStatus, OrderView, PlaceOrderRequest, UpdateStatusRequest};
use shared::error::ApiResponse;
use shared::models::{MenuItemRef, Order, OrderStatus, Restaurant};

use crate::{ClientConfig, ClientError, ClientResult};

/// Error envelope returned by the order server
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    code: u16,
    message: String,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

/// HTTP client for making network requests to the order server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.put(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Error responses carry the server's `{code, message, details}`
    /// envelope; anything unparseable falls back to a status-based error.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
                return Err(ClientError::Api {
                    code: body.code,
                    message: body.message,
                    details: body.details,
                });
            }
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    /// Unwrap the data field of a success envelope
    fn expect_data<T>(response: ApiResponse<T>, what: &str) -> ClientResult<T> {
        response
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {what} data")))
    }

    // ========== Health API ==========

    /// Check server health (no envelope, no auth)
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.get("/health").await
    }

    // ========== Catalog API ==========

    /// List all restaurants
    pub async fn restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        let response = self
            .get::<ApiResponse<Vec<Restaurant>>>("/api/restaurants")
            .await?;
        Self::expect_data(response, "restaurant")
    }

    /// Get one restaurant
    pub async fn restaurant(&self, id: &str) -> ClientResult<Restaurant> {
        let response = self
            .get::<ApiResponse<Restaurant>>(&format!("/api/restaurants/{id}"))
            .await?;
        Self::expect_data(response, "restaurant")
    }

    /// Menu for one restaurant
    pub async fn menu(&self, restaurant_id: &str) -> ClientResult<Vec<MenuItemRef>> {
        let response = self
            .get::<ApiResponse<Vec<MenuItemRef>>>(&format!("/api/restaurants/{restaurant_id}/menu"))
            .await?;
        Self::expect_data(response, "menu")
    }

    // ========== Order API ==========

    /// Submit an order
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> ClientResult<Order> {
        let response = self
            .post::<ApiResponse<Order>, _>("/api/orders", request)
            .await?;
        Self::expect_data(response, "order")
    }

    /// Orders belonging to the authenticated user, newest first
    pub async fn my_orders(&self) -> ClientResult<Vec<OrderView>> {
        let response = self
            .get::<ApiResponse<Vec<OrderView>>>("/api/orders/myorders")
            .await?;
        Self::expect_data(response, "order list")
    }

    /// Every order in the system, newest first (admin only)
    pub async fn all_orders(&self) -> ClientResult<Vec<OrderView>> {
        let response = self.get::<ApiResponse<Vec<OrderView>>>("/api/orders").await?;
        Self::expect_data(response, "order list")
    }

    /// Advance an order's fulfillment status (admin only)
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> ClientResult<Order> {
        let request = UpdateStatusRequest { status };
        let response = self
            .put::<ApiResponse<Order>, _>(&format!("/api/orders/{order_id}/status"), &request)
            .await?;
        Self::expect_data(response, "order")
    }
}
