//! Wiring a cart controller from client configuration.

use std::{ffi::OsString, sync::Arc};

use thiserror::Error;
use tracing::info;

use storefront::{
    context::CartContext,
    controller::CartController,
    session::{Session, SessionError},
};

use crate::{
    config::{ClientConfig, ConfigError},
    http::{HttpCartGateway, HttpGatewayError},
};

/// Errors building a cart controller.
#[derive(Debug, Error)]
pub enum ClientInitError {
    /// Arguments or environment variables could not be parsed.
    #[error(transparent)]
    Arguments(#[from] clap::Error),

    /// Parsed settings are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The session token could not be decoded.
    #[error("invalid session token")]
    Session(#[from] SessionError),

    /// The HTTP gateway could not be built.
    #[error(transparent)]
    Gateway(#[from] HttpGatewayError),
}

/// Load configuration from `args` and the environment, then build a cart
/// controller for the user identified by `token`.
///
/// # Errors
///
/// Returns an error if the arguments do not parse, or for any reason
/// [`cart_controller`] fails.
pub fn cart_controller_from_args<I, T>(
    args: I,
    token: &str,
) -> Result<CartController, ClientInitError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config = ClientConfig::load_from(args)?;

    cart_controller(&config, token)
}

/// Build a cart controller for the signed-in user identified by `token`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the token cannot be
/// decoded or the HTTP gateway cannot be built.
pub fn cart_controller(
    config: &ClientConfig,
    token: &str,
) -> Result<CartController, ClientInitError> {
    let storefront = config.storefront()?;
    let session = Session::decode(token)?;
    let gateway = HttpCartGateway::new(&config.api, storefront.currency)?;

    info!(
        user_id = %session.user_id,
        api_url = %config.api.api_url,
        page_size = storefront.page_size,
        "cart controller ready"
    );

    Ok(CartController::new(
        Arc::new(gateway),
        CartContext::new(session, storefront),
    ))
}
