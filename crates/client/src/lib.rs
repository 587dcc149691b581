//! Storefront cart client.
//!
//! Configuration, logging and the HTTP implementation of the cart gateway
//! used by [`storefront::controller::CartController`].

pub mod config;
pub mod context;
pub mod http;
pub mod observability;
