//! Cart page controller.
//!
//! Owns the displayed cart page, the selection mapping and the notices shown
//! to the user, and keeps them consistent across fetches, quantity changes and
//! deletions. Every mutating operation borrows the controller mutably for its
//! whole duration, so operations on one cart never interleave.

use std::{fmt, mem, sync::Arc};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::CartPage,
    checkout::{CheckoutItem, CheckoutSelection},
    context::CartContext,
    gateway::{CartGateway, CartItemUpdate, GatewayError},
    ids::LineItemId,
    pagination::PageRequest,
    pricing::{Totals, TotalsError},
    selection::Selection,
    transaction::Transaction,
};

/// Errors returned by cart controller operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The backend call failed; local state is unchanged.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The item is not on the displayed page.
    #[error("line item {0} is not on the current page")]
    UnknownLineItem(LineItemId),

    /// The quantity change would leave the item below one.
    #[error("quantity {current} of line item {id} cannot change by {delta}")]
    InvalidQuantity {
        /// Item whose quantity was to change.
        id: LineItemId,

        /// Quantity before the change.
        current: u32,

        /// Requested change.
        delta: i32,
    },

    /// [`CartController::confirm_delete`] without a prior request.
    #[error("no deletion is awaiting confirmation")]
    NoPendingDelete,

    /// Checkout was requested with nothing selected.
    #[error("no items are selected for checkout")]
    EmptySelection,

    /// Totals could not be derived.
    #[error(transparent)]
    Totals(#[from] TotalsError),
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// An action succeeded.
    Info,

    /// An action was refused locally.
    Warning,

    /// A backend call failed.
    Error,
}

/// A transient message for the user, e.g. a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,

    /// Text shown to the user.
    pub message: String,
}

/// Reconciles a paginated remote cart with local selection state.
///
/// Notices queue up until [`Self::take_notices`] drains them; callers that
/// surface notices should drain after every operation.
pub struct CartController {
    gateway: Arc<dyn CartGateway>,
    context: CartContext,
    page: CartPage,
    selection: Selection,
    pending_delete: Option<LineItemId>,
    error: Option<String>,
    notices: Vec<Notice>,
}

impl fmt::Debug for CartController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartController")
            .field("context", &self.context)
            .field("page", &self.page)
            .field("selection", &self.selection)
            .field("pending_delete", &self.pending_delete)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl CartController {
    /// Create a controller showing an empty first page. Call
    /// [`Self::load_page`] to fetch content.
    pub fn new(gateway: Arc<dyn CartGateway>, context: CartContext) -> Self {
        let page = CartPage::empty(context.config.page_size, context.config.currency);

        Self {
            gateway,
            context,
            page,
            selection: Selection::new(),
            pending_delete: None,
            error: None,
            notices: Vec::new(),
        }
    }

    /// Replace session and configuration. Switching to a different user
    /// discards everything fetched or selected for the previous one.
    pub fn refresh_context(&mut self, context: CartContext) {
        if context.session.user_id != self.context.session.user_id {
            info!(
                from = %self.context.session.user_id,
                to = %context.session.user_id,
                "cart user changed, resetting state"
            );

            self.page = CartPage::empty(context.config.page_size, context.config.currency);
            self.selection = Selection::new();
            self.pending_delete = None;
            self.error = None;
        }

        self.context = context;
    }

    /// Fetch and display a page. A successful fetch drops any deletion awaiting
    /// confirmation. On failure the current page stays displayed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Gateway`] if the fetch fails.
    pub async fn load_page(&mut self, page: u32) -> Result<(), CartError> {
        let request = PageRequest::new(page, self.context.config.page_size);

        debug!(user = %self.context.session.user_id, ?request, "loading cart page");

        let fetched = self
            .gateway
            .fetch_page(&self.context.session, request)
            .await;

        match fetched {
            Ok(fetched) => {
                info!(
                    page = fetched.pagination.page,
                    items = fetched.len(),
                    total = fetched.pagination.total_elements,
                    "cart page loaded"
                );

                if let Some(id) = self.pending_delete.take() {
                    debug!(%id, "pending deletion dropped on page change");
                }

                self.page = fetched;
                self.error = None;

                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());

                Err(self.fail("Could not load your cart", error))
            }
        }
    }

    /// Select every item on the page, or deselect them all if they already are.
    /// Returns the resulting select-all state.
    pub fn toggle_select_all_for_current_page(&mut self) -> bool {
        if self.select_all() {
            self.selection.deselect_page(&self.page);
        } else {
            self.selection.select_page(&self.page);
        }

        self.select_all()
    }

    /// Flip selection of one item on the current page. Returns `true` if it is
    /// now selected.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownLineItem`] if the item is not displayed.
    pub fn toggle_item_selection(&mut self, id: LineItemId) -> Result<bool, CartError> {
        let item = self.page.item(id).ok_or(CartError::UnknownLineItem(id))?;

        Ok(self.selection.toggle(item))
    }

    /// Whether the decrement control for an item should be enabled.
    pub fn can_decrement(&self, id: LineItemId) -> bool {
        self.page
            .item(id)
            .and_then(|item| item.quantity_after(-1))
            .is_some()
    }

    /// Change an item's quantity by `delta`, confirming with the backend
    /// before touching local state.
    ///
    /// # Errors
    ///
    /// - [`CartError::UnknownLineItem`]: the item is not displayed.
    /// - [`CartError::InvalidQuantity`]: the result would be below one; no
    ///   request is sent.
    /// - [`CartError::Gateway`]: the backend rejected the update.
    pub async fn change_quantity(&mut self, id: LineItemId, delta: i32) -> Result<(), CartError> {
        let item = self.page.item(id).ok_or(CartError::UnknownLineItem(id))?;

        let Some(quantity) = item.quantity_after(delta) else {
            debug!(%id, current = item.quantity, delta, "quantity change rejected locally");

            return Err(CartError::InvalidQuantity {
                id,
                current: item.quantity,
                delta,
            });
        };

        if delta == 0 {
            return Ok(());
        }

        let defaults = self.context.config.specification_defaults;

        let update = CartItemUpdate {
            user_id: self.context.session.user_id,
            product_id: item.product_id,
            quantity,
            color_id: item.color_id.unwrap_or(defaults.color_id),
            size_id: item.size_id.unwrap_or(defaults.size_id),
        };

        let confirmed = Transaction::begin("change_quantity", update)
            .confirm(self.gateway.update_item(&self.context.session, update))
            .await;

        let confirmed = match confirmed {
            Ok(confirmed) => confirmed,
            Err(error) => return Err(self.fail("Could not update quantity", error)),
        };

        confirmed.commit(self, |cart, update, ()| {
            if let Some(item) = cart.page.item_mut(id) {
                item.quantity = update.quantity;
                cart.selection.sync(item);
            }
        });

        Ok(())
    }

    /// First phase of deletion: remember which item the user wants removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownLineItem`] if the item is not displayed.
    pub fn request_delete(&mut self, id: LineItemId) -> Result<(), CartError> {
        if self.page.item(id).is_none() {
            return Err(CartError::UnknownLineItem(id));
        }

        self.pending_delete = Some(id);

        Ok(())
    }

    /// Abandon a requested deletion, returning the item it was for.
    pub fn cancel_delete(&mut self) -> Option<LineItemId> {
        self.pending_delete.take()
    }

    /// Second phase of deletion: delete the requested item remotely, then
    /// locally. An emptied page other than the first falls back to the
    /// preceding page; an emptied first page is refetched if items remain.
    ///
    /// # Errors
    ///
    /// - [`CartError::NoPendingDelete`]: nothing was requested.
    /// - [`CartError::Gateway`]: the backend rejected the deletion; the
    ///   request stays pending so it can be retried.
    pub async fn confirm_delete(&mut self) -> Result<(), CartError> {
        let id = self.pending_delete.ok_or(CartError::NoPendingDelete)?;

        let confirmed = Transaction::begin("delete_item", id)
            .confirm(self.gateway.delete_item(&self.context.session, id))
            .await;

        let confirmed = match confirmed {
            Ok(confirmed) => confirmed,
            Err(error) => return Err(self.fail("Could not remove item", error)),
        };

        confirmed.commit(self, |cart, id, ()| {
            cart.pending_delete = None;

            if cart.page.remove(id).is_some() {
                cart.page.pagination = cart.page.pagination.after_removal();
            }

            cart.selection.remove(id);
            cart.notify(NoticeLevel::Info, "Item removed from cart");
        });

        if self.page.is_empty() {
            let pagination = self.page.pagination;

            let refetch = match pagination.previous() {
                Some(previous) => Some(previous.page),
                None => (pagination.total_elements > 0).then_some(pagination.page),
            };

            if let Some(page) = refetch
                && let Err(error) = self.load_page(page).await
            {
                debug!("refetch after deletion failed: {error}");
            }
        }

        Ok(())
    }

    /// Products and quantities to hand to checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptySelection`] if nothing is selected.
    pub fn checkout_selection(&mut self) -> Result<CheckoutSelection, CartError> {
        if self.selection.is_empty() {
            self.notify(
                NoticeLevel::Warning,
                "Select at least one item before checking out",
            );

            return Err(CartError::EmptySelection);
        }

        let mut entries: Vec<_> = self.selection.entries().copied().collect();
        entries.sort_by_key(|entry| entry.line_item_id);

        Ok(CheckoutSelection {
            items: entries
                .iter()
                .map(|entry| CheckoutItem {
                    product_id: entry.product_id,
                    quantity: entry.quantity,
                })
                .collect(),
            line_item_ids: entries.iter().map(|entry| entry.line_item_id).collect(),
        })
    }

    /// Totals over the selection, derived on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the arithmetic overflows or currencies are mixed.
    pub fn totals(&self) -> Result<Totals, TotalsError> {
        Totals::derive(
            self.selection.entries(),
            self.context.config.tax_rate,
            self.context.config.currency,
        )
    }

    /// Whether every item on the displayed page is selected.
    pub fn select_all(&self) -> bool {
        self.selection.covers(&self.page)
    }

    /// Whether an item is selected, on this page or another.
    pub fn is_selected(&self, id: LineItemId) -> bool {
        self.selection.contains(id)
    }

    /// The displayed page.
    pub fn page(&self) -> &CartPage {
        &self.page
    }

    /// Selected items across all pages.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Session and settings in use.
    pub fn context(&self) -> &CartContext {
        &self.context
    }

    /// Item awaiting [`Self::confirm_delete`], if any.
    pub fn pending_delete(&self) -> Option<LineItemId> {
        self.pending_delete
    }

    /// Error from the last failed fetch, cleared by the next successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Drain notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    fn fail(&mut self, action: &str, error: GatewayError) -> CartError {
        warn!(user = %self.context.session.user_id, "{action}: {error}");

        self.notify(NoticeLevel::Error, format!("{action}. Please try again."));

        CartError::Gateway(error)
    }
}
