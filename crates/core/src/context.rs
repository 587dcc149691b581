//! Cart Context

use rusty_money::iso::{self, Currency};

use crate::{
    ids::{ColorId, SizeId},
    pricing::TaxRate,
    session::Session,
};

/// Default page size for cart listings.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Variant ids used when a line item does not name its own color or size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecificationDefaults {
    /// Color sent for lines without one.
    pub color_id: ColorId,

    /// Size sent for lines without one.
    pub size_id: SizeId,
}

impl Default for SpecificationDefaults {
    fn default() -> Self {
        Self {
            color_id: ColorId::new(1),
            size_id: SizeId::new(1),
        }
    }
}

/// Storefront settings shared by cart operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorefrontConfig {
    /// Cart lines per page.
    pub page_size: u32,

    /// Tax applied to the selected subtotal.
    pub tax_rate: TaxRate,

    /// Currency every price is expressed in.
    pub currency: &'static Currency,

    /// Variants used when a line names none.
    pub specification_defaults: SpecificationDefaults,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            tax_rate: TaxRate::default(),
            currency: iso::PHP,
            specification_defaults: SpecificationDefaults::default(),
        }
    }
}

/// Everything a cart controller needs besides its gateway.
#[derive(Debug, Clone)]
pub struct CartContext {
    /// Signed-in user every request is scoped to.
    pub session: Session,

    /// Storefront settings.
    pub config: StorefrontConfig,
}

impl CartContext {
    /// Bundle a session with its settings.
    pub fn new(session: Session, config: StorefrontConfig) -> Self {
        Self { session, config }
    }
}
