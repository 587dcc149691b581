//! Client configuration module

use std::ffi::OsString;

use clap::Parser;
use rust_decimal::Decimal;
use rusty_money::iso;
use thiserror::Error;
use tracing::warn;

use storefront::{
    context::{SpecificationDefaults, StorefrontConfig},
    ids::{ColorId, SizeId},
    pricing::TaxRate,
};

pub use self::{
    api::ApiConfig,
    cart::CartConfig,
    logging::{LogFormat, LoggingConfig},
};

mod api;
mod cart;
mod logging;

/// Settings that parsed but cannot drive the cart.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The currency code is not an ISO 4217 code.
    #[error("unknown currency code {0:?}")]
    UnknownCurrency(String),

    /// The tax rate is outside `[0, 1]`.
    #[error("tax rate {0} must be between 0 and 1")]
    InvalidTaxRate(Decimal),

    /// Pages must hold at least one line.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Storefront cart client configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart client", long_about = None)]
pub struct ClientConfig {
    /// Cart backend connection settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Cart listing and pricing settings.
    #[command(flatten)]
    pub cart: CartConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Parse `args`, taking anything they omit from the environment. A `.env`
    /// file in the working directory is read into the environment first.
    ///
    /// # Errors
    ///
    /// Returns an error if an argument or variable is malformed.
    pub fn load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if let Err(error) = dotenvy::dotenv()
            && !error.not_found()
        {
            warn!(%error, "ignoring unreadable .env file");
        }

        Self::try_parse_from(args)
    }

    /// Validated settings for the cart core.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown currency, a tax rate outside `[0, 1]`
    /// or a zero page size.
    pub fn storefront(&self) -> Result<StorefrontConfig, ConfigError> {
        let currency = iso::find(&self.cart.currency.to_uppercase())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.cart.currency.clone()))?;

        if self.cart.tax_rate < Decimal::ZERO || self.cart.tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidTaxRate(self.cart.tax_rate));
        }

        if self.cart.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        Ok(StorefrontConfig {
            page_size: self.cart.page_size,
            tax_rate: TaxRate::from_fraction(self.cart.tax_rate),
            currency,
            specification_defaults: SpecificationDefaults {
                color_id: ColorId::new(self.cart.default_color_id),
                size_id: SizeId::new(self.cart.default_size_id),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn parse(args: &[&str]) -> Result<ClientConfig, clap::Error> {
        ClientConfig::load_from(std::iter::once("storefront").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_storefront_defaults() -> TestResult {
        let config = parse(&[
            "--api-url",
            "http://shop.test",
            "--page-size",
            "5",
            "--tax-rate",
            "0.12",
            "--currency",
            "php",
            "--default-color-id",
            "1",
            "--default-size-id",
            "1",
        ])?;

        assert_eq!(config.storefront()?, StorefrontConfig::default());
        assert_eq!(config.api.api_url, "http://shop.test");

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() -> TestResult {
        let config = parse(&["--currency", "XXXX"])?;

        assert_eq!(
            config.storefront(),
            Err(ConfigError::UnknownCurrency("XXXX".to_string()))
        );

        Ok(())
    }

    #[test]
    fn tax_rate_above_one_is_rejected() -> TestResult {
        let config = parse(&["--currency", "PHP", "--tax-rate", "12"])?;

        assert_eq!(
            config.storefront(),
            Err(ConfigError::InvalidTaxRate(Decimal::from(12)))
        );

        Ok(())
    }

    #[test]
    fn zero_page_size_is_rejected() -> TestResult {
        let config = parse(&["--currency", "PHP", "--tax-rate", "0.1", "--page-size", "0"])?;

        assert_eq!(config.storefront(), Err(ConfigError::ZeroPageSize));

        Ok(())
    }

    #[test]
    fn malformed_argument_is_reported() {
        let result = parse(&["--page-size", "many"]);

        assert!(result.is_err(), "non-numeric page size must not parse");
    }

    #[test]
    fn log_format_parses_json() -> TestResult {
        let config = parse(&["--log-format", "json"])?;

        assert_eq!(config.logging.log_format, LogFormat::Json);

        Ok(())
    }
}
