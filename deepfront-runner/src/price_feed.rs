use deepfront_core::{PriceFeed, PriceQuote};

/// A price feed that always returns the quote it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPriceFeed {
    quote: PriceQuote,
}

impl StaticPriceFeed {
    pub fn new(quote: PriceQuote) -> Self {
        Self { quote }
    }

    pub fn set(&mut self, quote: PriceQuote) {
        self.quote = quote;
    }
}

impl PriceFeed for StaticPriceFeed {
    fn quote(&self) -> PriceQuote {
        self.quote
    }
}
