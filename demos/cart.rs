//! Cart Demo
//!
//! Adds a few catalog products to a durable cart and prints the receipt.
//!
//! Use `-m` to choose the shipping method
//! Use `-s` to choose where durable state lives

use std::io;

use anyhow::Result;
use clap::Parser;

use satchel::{
    config::StoreConfig,
    fixtures,
    items::{Customization, LineItem},
    persistence::FileStore,
    receipt::Receipt,
    store::Store,
    utils::DemoArgs,
};

/// Cart Demo
pub fn main() -> Result<()> {
    let args = DemoArgs::parse();

    let dir = args
        .state_dir
        .clone()
        .unwrap_or_else(|| "target/satchel-demo".to_string());

    let backend = FileStore::open(dir)?;
    let mut store = Store::open(StoreConfig::default(), backend)?;

    store.clear_cart();
    store.add_to_cart(LineItem::new(fixtures::oversized_hoodie(), 2, "Black", "M"));
    store.add_to_cart(LineItem::new(fixtures::graphic_hoodie(), 1, "Navy", "L"));
    store.add_to_cart(
        LineItem::new(fixtures::minimal_hoodie(), 1, "Gray", "S").with_customization(
            Customization {
                base_color: Some("#7B2FF7".to_string()),
                ..Customization::default()
            },
        ),
    );

    let receipt = Receipt::for_cart(store.cart(), &store.config().rates, args.shipping_method())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    Ok(())
}
