//! HTTP cart gateway.
//!
//! Routes, relative to the configured base URL:
//!
//! - `GET {base}/api/cart/{user}?page={page}&size={size}`
//! - `PUT {base}/api/cart`
//! - `DELETE {base}/api/cart/items/{line_item}`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request, Response, Url};
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, warn};

use storefront::{
    cart::CartPage,
    gateway::{BoxError, CartGateway, CartItemUpdate, GatewayError},
    ids::LineItemId,
    pagination::PageRequest,
    session::Session,
};

use crate::config::ApiConfig;

mod wire;

use wire::{CartItemRequest, CartPageResponse};

/// Errors building the HTTP gateway.
#[derive(Debug, Error)]
pub enum HttpGatewayError {
    /// The base URL is not an absolute URL.
    #[error("invalid API base URL {url:?}")]
    InvalidBaseUrl {
        /// Configured base URL.
        url: String,

        /// Parse failure.
        #[source]
        source: BoxError,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Cart gateway backed by the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpCartGateway {
    base_url: String,
    http: Client,
    currency: &'static Currency,
}

impl HttpCartGateway {
    /// Create a gateway for the configured backend, pricing items in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute or the client cannot
    /// be built.
    pub fn new(config: &ApiConfig, currency: &'static Currency) -> Result<Self, HttpGatewayError> {
        Url::parse(&config.api_url).map_err(|source| HttpGatewayError::InvalidBaseUrl {
            url: config.api_url.clone(),
            source: Box::new(source),
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(HttpGatewayError::Client)?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            http,
            currency,
        })
    }

    fn fetch_page_request(
        &self,
        session: &Session,
        request: PageRequest,
    ) -> Result<Request, GatewayError> {
        self.http
            .get(format!("{}/api/cart/{}", self.base_url, session.user_id))
            .query(&[("page", request.page), ("size", request.size)])
            .bearer_auth(session.token.as_str())
            .build()
            .map_err(transport)
    }

    fn update_item_request(
        &self,
        session: &Session,
        update: CartItemUpdate,
    ) -> Result<Request, GatewayError> {
        self.http
            .put(format!("{}/api/cart", self.base_url))
            .bearer_auth(session.token.as_str())
            .json(&CartItemRequest::from(update))
            .build()
            .map_err(transport)
    }

    fn delete_item_request(
        &self,
        session: &Session,
        id: LineItemId,
    ) -> Result<Request, GatewayError> {
        self.http
            .delete(format!("{}/api/cart/items/{id}", self.base_url))
            .bearer_auth(session.token.as_str())
            .build()
            .map_err(transport)
    }

    async fn send(&self, request: Request) -> Result<Response, GatewayError> {
        let method = request.method().clone();
        let url = request.url().clone();

        debug!(%method, %url, "sending cart request");

        let response = self.http.execute(request).await.map_err(transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            warn!(%method, %url, %status, "cart request failed");

            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl CartGateway for HttpCartGateway {
    async fn fetch_page(
        &self,
        session: &Session,
        request: PageRequest,
    ) -> Result<CartPage, GatewayError> {
        let response = self
            .send(self.fetch_page_request(session, request)?)
            .await?;

        let body: CartPageResponse = response
            .json()
            .await
            .map_err(|error| GatewayError::Decode(Box::new(error)))?;

        body.into_page(self.currency)
            .map_err(|error| GatewayError::Decode(Box::new(error)))
    }

    async fn update_item(
        &self,
        session: &Session,
        update: CartItemUpdate,
    ) -> Result<(), GatewayError> {
        self.send(self.update_item_request(session, update)?)
            .await?;

        Ok(())
    }

    async fn delete_item(&self, session: &Session, id: LineItemId) -> Result<(), GatewayError> {
        self.send(self.delete_item_request(session, id)?).await?;

        Ok(())
    }
}

fn transport(error: reqwest::Error) -> GatewayError {
    GatewayError::Transport(Box::new(error))
}
