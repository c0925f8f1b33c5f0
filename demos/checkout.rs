//! Checkout Demo
//!
//! Drives a full session against an in-memory store: subscribes to change
//! events, mutates the cart and quotes every shipping method.
//!
//! Use `-m` to choose the shipping method highlighted at the end

use std::{cell::RefCell, rc::Rc};

use anyhow::Result;
use clap::Parser;

use satchel::{
    checkout::{ShippingMethod, summarize},
    config::StoreConfig,
    fixtures,
    items::LineItem,
    persistence::MemoryStore,
    store::Store,
    utils::DemoArgs,
};

/// Checkout Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoArgs::parse();

    let mut store = Store::open(StoreConfig::default(), MemoryStore::new())?;

    let events = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&events);
    store.subscribe(move |event| log.borrow_mut().push(event));

    store.add_to_cart(LineItem::single(fixtures::oversized_hoodie(), "Black", "M"));
    store.add_to_cart(LineItem::single(fixtures::oversized_hoodie(), "Black", "M"));
    store.add_to_cart(LineItem::single(fixtures::graphic_hoodie(), "Navy", "L"));
    store.toggle_wishlist("hd-002");

    println!("rows: {}, units: {}", store.cart().len(), store.cart_count());
    println!("subtotal: {}", store.cart_total()?);
    println!("events seen: {}", events.borrow().len());
    println!();

    for method in [
        ShippingMethod::Standard,
        ShippingMethod::Express,
        ShippingMethod::Overnight,
    ] {
        let summary = summarize(store.cart(), &store.config().rates, method)?;

        println!(
            "{method:?}: shipping {} + tax {} = {}",
            summary.shipping(),
            summary.tax(),
            summary.total()
        );
    }

    let chosen = summarize(store.cart(), &store.config().rates, args.shipping_method())?;

    println!();
    println!("amount due: {}", chosen.total());

    Ok(())
}
