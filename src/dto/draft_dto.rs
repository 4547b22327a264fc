use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::model::line_item::LineItem;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub product_name: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,

    #[validate(range(min = 1))]
    pub quantity: u32,

    #[validate(custom(function = "validate_unit_price"))]
    pub unit_price: Decimal,
}

/// Client and line items of a new quotation or invoice request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    #[validate(length(min = 1, max = 200))]
    pub client_name: String,

    #[validate(length(min = 1), nested)]
    pub items: Vec<LineItemRequest>,
}

impl DraftRequest {
    pub fn into_line_items(self) -> Vec<LineItem> {
        self.items.into_iter().map(LineItem::from).collect()
    }
}

impl From<LineItemRequest> for LineItem {
    fn from(req: LineItemRequest) -> Self {
        LineItem {
            product_name: req.product_name.trim().to_string(),
            description: req.description.trim().to_string(),
            quantity: req.quantity,
            unit_price: req.unit_price,
        }
    }
}

/// Highest accepted unit price. Keeps `quantity × unit_price` far from the
/// `Decimal` range for any `u32` quantity.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

fn validate_unit_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("negative_unit_price"));
    }
    if *value > MAX_UNIT_PRICE {
        return Err(ValidationError::new("unit_price_too_large"));
    }
    Ok(())
}
