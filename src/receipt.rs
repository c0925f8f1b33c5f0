//! Receipt

use std::io;

use tabled::{Table, Tabled, settings::Style};

use crate::{
    cart::Cart,
    checkout::{CheckoutError, CheckoutRates, OrderSummary, ShippingMethod, summarize},
    pricing::{self, TotalError},
};

/// One rendered receipt row.
#[derive(Debug, Tabled)]
struct LineRow {
    #[tabled(rename = "Item")]
    name: String,

    #[tabled(rename = "Variant")]
    variant: String,

    #[tabled(rename = "Qty")]
    quantity: u32,

    #[tabled(rename = "Unit")]
    unit: String,

    #[tabled(rename = "Total")]
    total: String,
}

/// An itemized cart summary ready for display.
#[derive(Debug)]
pub struct Receipt {
    rows: Vec<LineRow>,
    summary: OrderSummary,
}

impl Receipt {
    /// Prices a cart and lays its rows out for display.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if summary arithmetic fails.
    pub fn for_cart(
        cart: &Cart,
        rates: &CheckoutRates,
        method: ShippingMethod,
    ) -> Result<Self, CheckoutError> {
        let currency = cart.currency();

        let rows = cart
            .items()
            .iter()
            .map(|item| -> Result<LineRow, CheckoutError> {
                let unit = pricing::money_from_minor(item.product.price.minor(), currency)?;
                let line_minor = item.total_minor().ok_or(TotalError::Overflow)?;
                let line = pricing::money_from_minor(line_minor, currency)?;

                Ok(LineRow {
                    name: item.product.name.clone(),
                    variant: format!("{} / {}", item.color, item.size),
                    quantity: item.quantity,
                    unit: unit.to_string(),
                    total: line.to_string(),
                })
            })
            .collect::<Result<Vec<_>, CheckoutError>>()?;

        let summary = summarize(cart, rates, method)?;

        Ok(Receipt { rows, summary })
    }

    /// The priced totals under the item table.
    #[must_use]
    pub fn summary(&self) -> &OrderSummary {
        &self.summary
    }

    /// Renders the receipt as an item table followed by the totals block.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if the writer fails.
    pub fn write_to(&self, writer: &mut impl io::Write) -> io::Result<()> {
        let mut table = Table::new(&self.rows);
        table.with(Style::sharp());

        writeln!(writer, "{table}")?;
        writeln!(writer)?;
        writeln!(writer, "Subtotal: {}", self.summary.subtotal())?;
        writeln!(writer, "Shipping: {}", self.summary.shipping())?;
        writeln!(writer, "Tax:      {}", self.summary.tax())?;
        writeln!(writer, "Total:    {}", self.summary.total())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::{fixtures, items::LineItem};

    use super::*;

    fn scenario_cart() -> Cart {
        let mut cart = Cart::new(iso::USD);

        cart.add(LineItem::new(fixtures::oversized_hoodie(), 2, "Black", "M"));
        cart.add(LineItem::new(fixtures::graphic_hoodie(), 1, "Navy", "L"));

        cart
    }

    #[test]
    fn receipt_summary_matches_checkout() -> TestResult {
        let cart = scenario_cart();

        let receipt =
            Receipt::for_cart(&cart, &CheckoutRates::default(), ShippingMethod::Standard)?;

        assert_eq!(
            receipt.summary().subtotal(),
            Money::from_minor(27_700, iso::USD)
        );
        assert_eq!(
            receipt.summary().total(),
            Money::from_minor(29_916, iso::USD)
        );

        Ok(())
    }

    #[test]
    fn rendered_receipt_lists_every_row() -> TestResult {
        let cart = scenario_cart();

        let receipt =
            Receipt::for_cart(&cart, &CheckoutRates::default(), ShippingMethod::Standard)?;

        let mut rendered = Vec::new();
        receipt.write_to(&mut rendered)?;

        let rendered = String::from_utf8(rendered)?;

        assert!(rendered.contains("Oversized Hoodie"), "missing first row");
        assert!(rendered.contains("Graphic Hoodie"), "missing second row");
        assert!(rendered.contains("Black / M"), "missing variant column");
        assert!(rendered.contains("Subtotal"), "missing totals block");

        Ok(())
    }
}
