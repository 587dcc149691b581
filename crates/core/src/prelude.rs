//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartLineItem, CartPage, MIN_QUANTITY},
    checkout::{
        CheckoutAction, CheckoutError, CheckoutItem, CheckoutSelection, CheckoutStep,
        CheckoutWizard,
    },
    context::{CartContext, SpecificationDefaults, StorefrontConfig},
    controller::{CartController, CartError, Notice, NoticeLevel},
    gateway::{CartGateway, CartItemUpdate, GatewayError},
    ids::{ColorId, LineItemId, ProductId, SizeId, UserId},
    pagination::{PageRequest, Pagination},
    pricing::{TaxRate, Totals, TotalsError},
    selection::{Selection, SelectionEntry},
    session::{AuthGate, BearerToken, GateDecision, Role, Session, SessionError},
};
