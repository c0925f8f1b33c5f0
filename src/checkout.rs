//! Checkout totals
//!
//! Shipping and tax layered on top of the cart's derived subtotal. The cart
//! itself never stores any of these figures; checkout recomputes them from
//! current rows every time.

use percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::Cart,
    prices::Price,
    pricing::{self, TotalError},
};

/// Errors from checkout summary computation.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The tax rate could not be safely applied to the subtotal.
    #[error("tax conversion overflowed or was not finite")]
    TaxConversion,

    /// Summary arithmetic overflowed the minor-unit range.
    #[error(transparent)]
    Total(#[from] TotalError),
}

/// How the order ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Ground shipping; free at or above the configured threshold.
    Standard,

    /// Two-day shipping.
    Express,

    /// Next-day shipping.
    Overnight,
}

/// Checkout rate table: the tax rate, per-method shipping prices and the
/// free-shipping threshold for standard delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutRates {
    /// Sales tax rate as a decimal fraction (0.08 is 8%).
    pub tax_rate: f64,

    /// Standard shipping price.
    pub standard: Price,

    /// Express shipping price.
    pub express: Price,

    /// Overnight shipping price.
    pub overnight: Price,

    /// Subtotal at or above which standard shipping is free.
    pub free_standard_over: Option<Price>,
}

impl Default for CheckoutRates {
    fn default() -> Self {
        CheckoutRates {
            tax_rate: 0.08,
            standard: Price::new(500),
            express: Price::new(1500),
            overnight: Price::new(3000),
            free_standard_over: Some(Price::new(10_000)),
        }
    }
}

impl CheckoutRates {
    /// Shipping price in minor units for a method at a given subtotal.
    fn shipping_minor(&self, method: ShippingMethod, subtotal_minor: u64) -> u64 {
        match method {
            ShippingMethod::Standard => match self.free_standard_over {
                Some(threshold) if subtotal_minor >= threshold.minor() => 0,
                _ => self.standard.minor(),
            },
            ShippingMethod::Express => self.express.minor(),
            ShippingMethod::Overnight => self.overnight.minor(),
        }
    }
}

/// A priced order: the cart subtotal with shipping and tax on top.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    subtotal: Money<'static, Currency>,
    shipping: Money<'static, Currency>,
    tax: Money<'static, Currency>,
    total: Money<'static, Currency>,
}

impl OrderSummary {
    /// Item subtotal before shipping and tax.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Shipping charge for the chosen method.
    #[must_use]
    pub fn shipping(&self) -> Money<'static, Currency> {
        self.shipping
    }

    /// Sales tax on the item subtotal.
    #[must_use]
    pub fn tax(&self) -> Money<'static, Currency> {
        self.tax
    }

    /// Grand total: subtotal + shipping + tax.
    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }
}

/// Prices a cart for checkout.
///
/// Tax applies to the item subtotal only, never to shipping, and is rounded
/// to the nearest minor unit with ties away from zero.
///
/// # Errors
///
/// - [`CheckoutError::Total`]: summary arithmetic overflowed the minor-unit range.
/// - [`CheckoutError::TaxConversion`]: the tax rate was not a finite fraction
///   or could not be applied to the subtotal.
pub fn summarize(
    cart: &Cart,
    rates: &CheckoutRates,
    method: ShippingMethod,
) -> Result<OrderSummary, CheckoutError> {
    let currency = cart.currency();

    let subtotal_minor = pricing::subtotal_minor(cart.items())?;
    let shipping_minor = rates.shipping_minor(method, subtotal_minor);
    let tax_minor = tax_on_minor(rates.tax_rate, subtotal_minor)?;

    let total_minor = subtotal_minor
        .checked_add(shipping_minor)
        .and_then(|sum| sum.checked_add(tax_minor))
        .ok_or(TotalError::Overflow)?;

    Ok(OrderSummary {
        subtotal: pricing::money_from_minor(subtotal_minor, currency)?,
        shipping: pricing::money_from_minor(shipping_minor, currency)?,
        tax: pricing::money_from_minor(tax_minor, currency)?,
        total: pricing::money_from_minor(total_minor, currency)?,
    })
}

/// Calculate the tax amount in minor units for a rate and a subtotal.
fn tax_on_minor(rate: f64, minor: u64) -> Result<u64, CheckoutError> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(CheckoutError::TaxConversion);
    }

    let percent = Percentage::from_decimal(rate);

    let Some(rate) = Decimal::from_f64_retain(percent.value()) else {
        return Err(CheckoutError::TaxConversion);
    };

    let Some(minor) = Decimal::from_u64(minor) else {
        unreachable!("always returns `Some` for every `u64`")
    };

    let Some(applied) = rate.checked_mul(minor) else {
        return Err(CheckoutError::TaxConversion);
    };

    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let Some(rounded) = rounded.to_u64() else {
        return Err(CheckoutError::TaxConversion);
    };

    Ok(rounded)
}
