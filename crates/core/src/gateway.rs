//! Remote cart gateway.

use std::error::Error as StdError;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::{
    cart::CartPage,
    ids::{ColorId, LineItemId, ProductId, SizeId, UserId},
    pagination::PageRequest,
    session::Session,
};

/// Boxed error from the transport layer.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failures talking to the cart backend. All are retryable by the user.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("cart backend unreachable")]
    Transport(#[source] BoxError),

    /// The backend answered with a non-success status.
    #[error("cart backend responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,

        /// Response body, empty if it could not be read.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("cart backend response could not be decoded")]
    Decode(#[source] BoxError),
}

/// Absolute quantity update for one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItemUpdate {
    /// Owner of the cart.
    pub user_id: UserId,

    /// Product in the line.
    pub product_id: ProductId,

    /// New quantity, not a delta.
    pub quantity: u32,

    /// Color variant of the line.
    pub color_id: ColorId,

    /// Size variant of the line.
    pub size_id: SizeId,
}

/// Remote cart operations. Every call is scoped to the given session's user.
#[automock]
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Fetch one page of the session user's cart.
    async fn fetch_page(
        &self,
        session: &Session,
        request: PageRequest,
    ) -> Result<CartPage, GatewayError>;

    /// Create or update a cart line with an absolute quantity.
    async fn update_item(
        &self,
        session: &Session,
        update: CartItemUpdate,
    ) -> Result<(), GatewayError>;

    /// Delete a cart line.
    async fn delete_item(&self, session: &Session, id: LineItemId) -> Result<(), GatewayError>;
}
