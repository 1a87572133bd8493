//! Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as raised by an "add to cart" event, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    /// Opaque product identifier
    pub id: String,

    /// Display label
    pub name: String,

    /// Unit price, currency-agnostic
    pub unit_price: Decimal,

    /// Opaque image reference
    pub image: String,
}

impl NewCartLine {
    /// Creates a new cart line payload.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            image: image.into(),
        }
    }
}

/// One distinct purchasable item in a cart and the quantity wanted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Opaque product identifier, unique within a cart
    pub id: String,

    /// Display label
    pub name: String,

    /// Unit price, stored as an exact JSON number
    #[serde(rename = "price", with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,

    /// Opaque image reference
    pub image: String,

    /// Quantity, always at least one while the line is in a cart
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line for `item` with a quantity of one.
    pub fn from_new(item: NewCartLine) -> Self {
        Self {
            id: item.id,
            name: item.name,
            unit_price: item.unit_price,
            image: item.image,
            quantity: 1,
        }
    }

    /// Returns `unit_price × quantity`.
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

impl From<NewCartLine> for CartLine {
    fn from(item: NewCartLine) -> Self {
        Self::from_new(item)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_new_starts_at_quantity_one() {
        let line = CartLine::from(NewCartLine::new("mug", "Mug", dec!(7.50), "/mug.png"));

        assert_eq!(line.quantity, 1);
        assert_eq!(line.id, "mug");
        assert_eq!(line.unit_price, dec!(7.50));
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let mut line = CartLine::from_new(NewCartLine::new("a", "A", dec!(19.99), ""));
        line.quantity = 3;

        assert_eq!(line.line_total(), dec!(59.97));
    }

    #[test]
    fn serializes_with_storefront_field_names() -> TestResult {
        let line = CartLine {
            id: "a".to_string(),
            name: "Headphones".to_string(),
            unit_price: dec!(10),
            image: "/img/a.jpg".to_string(),
            quantity: 2,
        };

        let value = serde_json::to_value(&line)?;

        assert_eq!(
            value,
            serde_json::json!({
                "id": "a",
                "name": "Headphones",
                "price": 10,
                "image": "/img/a.jpg",
                "quantity": 2,
            })
        );

        Ok(())
    }

    #[test]
    fn deserializes_fractional_prices_exactly() -> TestResult {
        let line: CartLine = serde_json::from_str(
            r#"{"id":"a","name":"A","price":19.99,"image":"","quantity":1}"#,
        )?;

        assert_eq!(line.unit_price, dec!(19.99));

        Ok(())
    }
}
