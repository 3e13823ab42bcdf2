//! Order request as seen by the planner.

use serde::{Deserialize, Serialize};

use crate::math::mul_fixed;

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy base with quote. Input coin is the quote asset.
    Bid,
    /// Sell base for quote. Input coin is the base asset.
    Ask,
}

/// Which pool coin, if any, is the settlement unit that fees are paid in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeCoin {
    /// Fees are paid in a coin that is neither base nor quote.
    #[default]
    Distinct,
    /// The pool's base coin is the settlement unit.
    Base,
    /// The pool's quote coin is the settlement unit.
    Quote,
}

/// Immutable, caller-supplied order parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Base-asset units.
    pub quantity: u64,
    /// Quote per base, billionths.
    pub price: u64,
    pub side: OrderSide,
    #[serde(default)]
    pub pool_whitelisted: bool,
    #[serde(default)]
    pub fee_coin: FeeCoin,
}

impl Order {
    pub fn new(side: OrderSide, quantity: u64, price: u64) -> Self {
        Self {
            quantity,
            price,
            side,
            pool_whitelisted: false,
            fee_coin: FeeCoin::Distinct,
        }
    }

    pub fn whitelisted(mut self, whitelisted: bool) -> Self {
        self.pool_whitelisted = whitelisted;
        self
    }

    pub fn with_fee_coin(mut self, fee_coin: FeeCoin) -> Self {
        self.fee_coin = fee_coin;
        self
    }

    /// Principal the order needs, in input-coin units.
    pub fn amount(&self) -> u64 {
        order_amount(self.side, self.quantity, self.price)
    }

    /// True when the coin this order spends is also the fee settlement unit.
    pub fn input_coin_pays_fee(&self) -> bool {
        matches!(
            (self.side, self.fee_coin),
            (OrderSide::Bid, FeeCoin::Quote) | (OrderSide::Ask, FeeCoin::Base)
        )
    }
}

/// Quote value for bids, base quantity for asks.
pub fn order_amount(side: OrderSide, quantity: u64, price: u64) -> u64 {
    match side {
        OrderSide::Bid => mul_fixed(quantity, price),
        OrderSide::Ask => quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::SCALE;

    #[test]
    fn order_amount_bid_is_quote_value() {
        assert_eq!(order_amount(OrderSide::Bid, 10, 100 * SCALE), 1000);
        assert_eq!(order_amount(OrderSide::Bid, 3, SCALE / 2), 1);
    }

    #[test]
    fn order_amount_ask_is_quantity() {
        assert_eq!(order_amount(OrderSide::Ask, 10, 100 * SCALE), 10);
        assert_eq!(order_amount(OrderSide::Ask, 10, 0), 10);
    }

    #[test]
    fn order_amount_zero_inputs() {
        assert_eq!(order_amount(OrderSide::Bid, 0, SCALE), 0);
        assert_eq!(order_amount(OrderSide::Bid, 10, 0), 0);
        assert_eq!(order_amount(OrderSide::Ask, 0, SCALE), 0);
    }

    #[test]
    fn input_coin_pays_fee_matrix() {
        let bid = Order::new(OrderSide::Bid, 1, SCALE);
        let ask = Order::new(OrderSide::Ask, 1, SCALE);

        assert!(!bid.input_coin_pays_fee());
        assert!(bid.clone().with_fee_coin(FeeCoin::Quote).input_coin_pays_fee());
        assert!(!bid.with_fee_coin(FeeCoin::Base).input_coin_pays_fee());

        assert!(!ask.input_coin_pays_fee());
        assert!(ask.clone().with_fee_coin(FeeCoin::Base).input_coin_pays_fee());
        assert!(!ask.with_fee_coin(FeeCoin::Quote).input_coin_pays_fee());
    }

    #[test]
    fn order_deserializes_with_defaults() {
        let json = r#"{"quantity": 10, "price": 100000000000, "side": "bid"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.side, OrderSide::Bid);
        assert!(!order.pool_whitelisted);
        assert_eq!(order.fee_coin, FeeCoin::Distinct);
        assert_eq!(order.amount(), 1000);
    }
}
