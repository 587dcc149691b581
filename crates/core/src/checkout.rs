//! Checkout
//!
//! The hand-off from the cart and the linear wizard that consumes it.

use std::fmt;

use thiserror::Error;

use crate::ids::{LineItemId, ProductId};

/// A product and quantity handed to checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutItem {
    /// Product to order.
    pub product_id: ProductId,

    /// Units to order.
    pub quantity: u32,
}

/// Everything checkout needs from the cart, passed by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSelection {
    /// Products and quantities, ordered by line item id.
    pub items: Vec<CheckoutItem>,

    /// Cart lines the items came from, in the same order.
    pub line_item_ids: Vec<LineItemId>,
}

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Contact details.
    Information,

    /// Delivery address and method.
    Shipping,

    /// Payment details.
    Payment,

    /// Final check before the order is placed.
    Review,

    /// Order placed. Terminal.
    Confirmation,
}

impl CheckoutStep {
    const fn next(self) -> Option<Self> {
        match self {
            Self::Information => Some(Self::Shipping),
            Self::Shipping => Some(Self::Payment),
            Self::Payment => Some(Self::Review),
            Self::Review | Self::Confirmation => None,
        }
    }

    const fn previous(self) -> Option<Self> {
        match self {
            Self::Shipping => Some(Self::Information),
            Self::Payment => Some(Self::Shipping),
            Self::Review => Some(Self::Payment),
            Self::Information | Self::Confirmation => None,
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Information => "information",
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Review => "review",
            Self::Confirmation => "confirmation",
        })
    }
}

/// Wizard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutAction {
    /// [`CheckoutWizard::advance`]
    Continue,

    /// [`CheckoutWizard::back`]
    Back,

    /// [`CheckoutWizard::place_order`]
    PlaceOrder,
}

/// Errors raised by the checkout wizard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The action is not allowed from the current step.
    #[error("cannot {action:?} from the {from} step")]
    InvalidTransition {
        /// Step the wizard was on.
        from: CheckoutStep,

        /// Rejected action.
        action: CheckoutAction,
    },

    /// Checkout was started without any items.
    #[error("checkout needs at least one selected item")]
    EmptySelection,
}

/// Linear checkout wizard: information, shipping, payment, review, then a
/// terminal confirmation.
#[derive(Debug, Clone)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    selection: CheckoutSelection,
}

impl CheckoutWizard {
    /// Start checkout for a cart hand-off.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptySelection`] if nothing was handed off.
    pub fn start(selection: CheckoutSelection) -> Result<Self, CheckoutError> {
        if selection.items.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }

        Ok(Self {
            step: CheckoutStep::Information,
            selection,
        })
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The cart hand-off this checkout was started with.
    pub fn selection(&self) -> &CheckoutSelection {
        &self.selection
    }

    /// Whether the order has been placed.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Confirmation
    }

    /// Move one step forward. Review only leaves through [`Self::place_order`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] from review or confirmation.
    pub fn advance(&mut self) -> Result<CheckoutStep, CheckoutError> {
        self.transition(CheckoutAction::Continue, self.step.next())
    }

    /// Move one step back.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] from information or confirmation.
    pub fn back(&mut self) -> Result<CheckoutStep, CheckoutError> {
        self.transition(CheckoutAction::Back, self.step.previous())
    }

    /// Confirm the order from the review step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] from any other step.
    pub fn place_order(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let target = (self.step == CheckoutStep::Review).then_some(CheckoutStep::Confirmation);

        self.transition(CheckoutAction::PlaceOrder, target)
    }

    fn transition(
        &mut self,
        action: CheckoutAction,
        target: Option<CheckoutStep>,
    ) -> Result<CheckoutStep, CheckoutError> {
        let to = target.ok_or(CheckoutError::InvalidTransition {
            from: self.step,
            action,
        })?;

        self.step = to;

        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn selection() -> CheckoutSelection {
        CheckoutSelection {
            items: vec![CheckoutItem {
                product_id: ProductId::new(1),
                quantity: 2,
            }],
            line_item_ids: vec![LineItemId::new(10)],
        }
    }

    #[test]
    fn empty_selection_cannot_start() {
        let result = CheckoutWizard::start(CheckoutSelection {
            items: Vec::new(),
            line_item_ids: Vec::new(),
        });

        assert!(matches!(result, Err(CheckoutError::EmptySelection)));
    }

    #[test]
    fn walks_forward_to_confirmation() -> TestResult {
        let mut wizard = CheckoutWizard::start(selection())?;

        assert_eq!(wizard.advance()?, CheckoutStep::Shipping);
        assert_eq!(wizard.advance()?, CheckoutStep::Payment);
        assert_eq!(wizard.advance()?, CheckoutStep::Review);
        assert_eq!(wizard.place_order()?, CheckoutStep::Confirmation);
        assert!(wizard.is_complete());

        Ok(())
    }

    #[test]
    fn review_does_not_continue_without_placing_order() -> TestResult {
        let mut wizard = CheckoutWizard::start(selection())?;

        for _ in 0..3 {
            wizard.advance()?;
        }

        assert_eq!(
            wizard.advance(),
            Err(CheckoutError::InvalidTransition {
                from: CheckoutStep::Review,
                action: CheckoutAction::Continue,
            })
        );
        assert_eq!(wizard.step(), CheckoutStep::Review);

        Ok(())
    }

    #[test]
    fn back_moves_one_step() -> TestResult {
        let mut wizard = CheckoutWizard::start(selection())?;

        wizard.advance()?;
        wizard.advance()?;

        assert_eq!(wizard.back()?, CheckoutStep::Shipping);
        assert_eq!(wizard.back()?, CheckoutStep::Information);
        assert!(wizard.back().is_err(), "information has no previous step");

        Ok(())
    }

    #[test]
    fn confirmation_is_terminal() -> TestResult {
        let mut wizard = CheckoutWizard::start(selection())?;

        for _ in 0..3 {
            wizard.advance()?;
        }
        wizard.place_order()?;

        assert!(wizard.back().is_err(), "confirmation cannot go back");
        assert!(wizard.advance().is_err(), "confirmation cannot continue");
        assert!(wizard.place_order().is_err(), "order is placed only once");

        Ok(())
    }

    #[test]
    fn place_order_only_from_review() -> TestResult {
        let mut wizard = CheckoutWizard::start(selection())?;

        assert_eq!(
            wizard.place_order(),
            Err(CheckoutError::InvalidTransition {
                from: CheckoutStep::Information,
                action: CheckoutAction::PlaceOrder,
            })
        );

        Ok(())
    }
}
