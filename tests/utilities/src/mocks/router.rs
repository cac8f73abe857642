use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use dex_gateway::currency::{Currency, CurrencyAmount};
use dex_gateway::price_oracle::{RouterPreference, Trade, TradeRouter, TradeType};

#[derive(Debug, thiserror::Error)]
pub enum MockRouterError {
    #[error("mock router error: routing unavailable")]
    Unavailable,
}

/// Serves a programmed sequence of routing responses and counts how often it
/// is consulted. Once the sequence runs dry it reports "no route".
#[derive(Debug)]
pub struct MockRouter {
    responses: Mutex<VecDeque<Result<Option<Trade>, MockRouterError>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockRouter {
    pub fn new(responses: Vec<Result<Option<Trade>, MockRouterError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl TradeRouter for MockRouter {
    type Error = MockRouterError;

    async fn best_trade(
        &self,
        trade_type: TradeType,
        _: &CurrencyAmount,
        _: &Currency,
        preference: RouterPreference,
    ) -> Result<Option<Trade>, Self::Error> {
        assert_eq!(trade_type, TradeType::ExactOutput);
        assert_eq!(preference, RouterPreference::Price);

        *self.calls.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}
