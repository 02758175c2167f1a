//! # HTTP Storefront API
//!
//! [`StorefrontApi`] over the backend's REST endpoints using `reqwest`.
//!
//! ## Endpoints (relative to `api.base_url`)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    products/{id}                     → Product                     │
//! │  GET    products/search/suggestions?q=    → ProductSuggestion[]         │
//! │  GET    cart                              → Cart                        │
//! │  POST   cart/add          AddToCartRequest → Cart                       │
//! │  PUT    cart/items/{lineId}  {quantity}   → Cart                        │
//! │  DELETE cart/items/{lineId}               → Cart                        │
//! │  DELETE cart                              → (ignored)                   │
//! │  GET    orders                            → Order[]                     │
//! │                                                                         │
//! │  Every request: X-Session-Id, plus Authorization: Bearer when set.      │
//! │  Bodies may be bare or wrapped as { "data": ... }, never both.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use woodnest_core::validation::validate_product;
use woodnest_core::{
    AddToCartRequest, Cart, Order, Product, ProductSuggestion, UpdateCartItemRequest,
};

use crate::api::StorefrontApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Header carrying the guest cart session.
pub const SESSION_HEADER: &str = "X-Session-Id";

/// Decodes a response body that is either bare or wrapped as `{ "data": ... }`.
///
/// A top-level `data` key selects the payload outright; a payload that fails
/// to decode is an error, never a second attempt against the whole body.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    let mut body: Value = serde_json::from_slice(bytes)?;
    let wrapped = body.as_object_mut().and_then(|fields| fields.remove("data"));
    let payload = wrapped.unwrap_or(body);
    Ok(serde_json::from_value(payload)?)
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// REST client for the storefront backend.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    client: reqwest::Client,
    base_url: Url,
    session_id: String,
    auth_token: Option<String>,
}

impl HttpStorefrontApi {
    /// Builds a client from validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            session_id: config.session_id().to_string(),
            auth_token: config.api.auth_token.clone(),
        })
    }

    /// Resolves path segments under the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, path = url.path(), "Storefront request");
        let builder = self
            .client
            .request(method, url)
            .header(SESSION_HEADER, &self.session_id);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and checks the status, mapping failures to `Remote`.
    async fn send(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        warn!(status = status.as_u16(), %path, %message, "Storefront request failed");
        Err(ClientError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        decode_body(&bytes)
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn fetch_product(&self, product_id: &str) -> ClientResult<Product> {
        let url = self.endpoint(&["products", product_id])?;
        let product: Product = self.send_json(self.request(Method::GET, url)).await?;
        validate_product(&product)?;
        Ok(product)
    }

    async fn search_suggestions(&self, query: &str) -> ClientResult<Vec<ProductSuggestion>> {
        let mut url = self.endpoint(&["products", "search", "suggestions"])?;
        url.query_pairs_mut().append_pair("q", query);
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn fetch_cart(&self) -> ClientResult<Cart> {
        let url = self.endpoint(&["cart"])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn add_to_cart(&self, request: &AddToCartRequest) -> ClientResult<Cart> {
        let url = self.endpoint(&["cart", "add"])?;
        self.send_json(self.request(Method::POST, url).json(request))
            .await
    }

    async fn update_cart_item(
        &self,
        line_id: &str,
        request: &UpdateCartItemRequest,
    ) -> ClientResult<Cart> {
        let url = self.endpoint(&["cart", "items", line_id])?;
        self.send_json(self.request(Method::PUT, url).json(request))
            .await
    }

    async fn remove_cart_item(&self, line_id: &str) -> ClientResult<Cart> {
        let url = self.endpoint(&["cart", "items", line_id])?;
        self.send_json(self.request(Method::DELETE, url)).await
    }

    async fn clear_cart(&self) -> ClientResult<()> {
        let url = self.endpoint(&["cart"])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn fetch_orders(&self) -> ClientResult<Vec<Order>> {
        let url = self.endpoint(&["orders"])?;
        self.send_json(self.request(Method::GET, url)).await
    }
}
