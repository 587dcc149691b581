//! Cart Config

use clap::Args;
use rust_decimal::Decimal;

/// Cart listing and pricing settings.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// Number of cart lines per page
    #[arg(long, env = "STOREFRONT_PAGE_SIZE", default_value_t = 5_u32)]
    pub page_size: u32,

    /// Tax rate as a fraction of the selected subtotal
    #[arg(long, env = "STOREFRONT_TAX_RATE", default_value = "0.12")]
    pub tax_rate: Decimal,

    /// ISO 4217 currency code for prices
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "PHP")]
    pub currency: String,

    /// Color variant used when a cart line names none
    #[arg(long, env = "STOREFRONT_DEFAULT_COLOR_ID", default_value_t = 1_u64)]
    pub default_color_id: u64,

    /// Size variant used when a cart line names none
    #[arg(long, env = "STOREFRONT_DEFAULT_SIZE_ID", default_value_t = 1_u64)]
    pub default_size_id: u64,
}
