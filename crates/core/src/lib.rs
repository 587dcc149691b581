//! Storefront
//!
//! Client-side cart state for a storefront backed by a paginated REST API:
//! line items, selection for checkout, derived totals, the checkout wizard and
//! the session guard in front of it.

pub mod cart;
pub mod checkout;
pub mod context;
pub mod controller;
pub mod gateway;
pub mod ids;
pub mod pagination;
pub mod prelude;
pub mod pricing;
pub mod selection;
pub mod session;

mod transaction;
