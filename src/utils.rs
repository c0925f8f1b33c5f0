//! Utils

use clap::Parser;

use crate::checkout::ShippingMethod;

/// Arguments for the cart demos
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Directory durable cart state is written to
    #[clap(short, long)]
    pub state_dir: Option<String>,

    /// Shipping method to quote (standard, express or overnight)
    #[clap(short = 'm', long, default_value = "standard")]
    pub shipping: String,
}

impl DemoArgs {
    /// Resolves the shipping flag, defaulting to standard delivery.
    #[must_use]
    pub fn shipping_method(&self) -> ShippingMethod {
        match self.shipping.as_str() {
            "express" => ShippingMethod::Express,
            "overnight" => ShippingMethod::Overnight,
            _ => ShippingMethod::Standard,
        }
    }
}
