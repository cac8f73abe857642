use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use ethers::types::U256;
use tracing::{trace, warn};

use crate::currency::{stablecoin_amount_out, Currency, CurrencyAmount, Price};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// Which routing backend the caller favors. Price derivation uses the
/// cheapest, cache-friendly preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterPreference {
    Api,
    Client,
    Price,
}

/// Instantaneous exchange rate implied by a route, ignoring slippage, as the
/// raw numerator/denominator pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidPrice {
    pub numerator: U256,
    pub denominator: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub mid_price: MidPrice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub routes: Vec<Route>,
}

/// External routing service computing an optimal swap path and its implied
/// price. `Ok(None)` means no route was found.
#[async_trait]
pub trait TradeRouter: Debug {
    type Error: std::error::Error + Send + Sync;

    async fn best_trade(
        &self,
        trade_type: TradeType,
        amount_out: &CurrencyAmount,
        currency_in: &Currency,
        preference: RouterPreference,
    ) -> Result<Option<Trade>, Self::Error>;
}

/// Derives the stablecoin-denominated price of a currency by routing an
/// exact-output trade into a large stablecoin amount, and keeps the last good
/// price so transient routing failures never blank out downstream consumers.
///
/// The cache is single-writer, single-reader state owned by this instance.
#[derive(Debug)]
pub struct StablecoinPriceOracle<R: TradeRouter> {
    router: R,
    last_price: Option<Arc<Price>>,
}

impl<R> StablecoinPriceOracle<R>
where
    R: TradeRouter + Send + Sync,
{
    pub fn new(router: R) -> Self {
        Self {
            router,
            last_price: None,
        }
    }

    /// Price of `currency` in the chain's stablecoin.
    ///
    /// Returns the previous allocation untouched when the new computation
    /// yields nothing, or when it yields a price equal to the last one on
    /// both value and base currency, so consumers can use pointer identity
    /// to skip no-op updates.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn stablecoin_price(&mut self, currency: &Currency) -> Option<Arc<Price>> {
        match self.compute(currency).await {
            None => self.last_price.clone(),
            Some(price) => {
                if let Some(last) = &self.last_price {
                    if price.equal_to(last) && price.base.equals(&last.base) {
                        return self.last_price.clone();
                    }
                }
                trace!(
                    "new {} price for {}: {}/{}",
                    price.quote.symbol,
                    price.base.symbol(),
                    price.numerator,
                    price.denominator
                );
                let price = Arc::new(price);
                self.last_price = Some(Arc::clone(&price));
                Some(price)
            }
        }
    }

    /// Value of an arbitrary currency amount in the chain's stablecoin, via
    /// the derived price. `None` when no price can be derived.
    pub async fn stablecoin_value(&mut self, amount: &CurrencyAmount) -> Option<CurrencyAmount> {
        let price = self.stablecoin_price(&amount.currency).await?;
        price.quote(amount).ok()
    }

    async fn compute(&self, currency: &Currency) -> Option<Price> {
        let amount_out = stablecoin_amount_out(currency.chain_id())?;
        let stablecoin = match &amount_out.currency {
            Currency::Token(token) => token.clone(),
            Currency::Native { .. } => return None,
        };

        // The stablecoin prices itself at 1:1; no routing round-trip.
        if currency.wrapped().equals(&stablecoin) {
            return Some(Price::new(
                Currency::Token(stablecoin.clone()),
                stablecoin,
                1u64.into(),
                1u64.into(),
            ));
        }

        let trade = match self
            .router
            .best_trade(
                TradeType::ExactOutput,
                &amount_out,
                currency,
                RouterPreference::Price,
            )
            .await
        {
            Ok(trade) => trade,
            Err(err) => {
                warn!("price routing failed for {}: {:?}", currency.symbol(), err);
                None
            }
        }?;

        let route = trade.routes.first()?;
        Some(Price::new(
            currency.clone(),
            stablecoin,
            route.mid_price.denominator,
            route.mid_price.numerator,
        ))
    }
}
