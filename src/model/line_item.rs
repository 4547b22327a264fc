use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// One priced product/service row of a quotation or invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineItem {
    /// Unrounded `quantity × unit_price`, `None` on overflow.
    pub fn amount(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// Sum of all line amounts, rounded half away from zero to two decimals.
/// `None` when the amounts do not fit in a `Decimal`.
pub fn total_amount(items: &[LineItem]) -> Option<Decimal> {
    let sum = items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.amount()?))?;
    let mut total = sum.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    total.rescale(2);
    Some(total)
}
