use async_trait::async_trait;
use ethers::providers::{FromErr, Middleware, MockProvider, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Block, BlockId, NameOrAddress, TxHash, U256};
use std::sync::{Arc, Mutex};

// Middleware mock.

#[derive(Debug, thiserror::Error)]
pub enum MockMiddlewareError {
    #[error("mock middleware error: estimate gas")]
    EstimateGas,

    #[error("mock middleware error: get gas price")]
    GetGasPrice,

    #[error("mock middleware error: get block")]
    GetBlock,

    #[error("mock middleware error: get transaction count")]
    GetTransactionCount,
}

impl FromErr<MockMiddlewareError> for MockMiddlewareError {
    fn from(err: MockMiddlewareError) -> MockMiddlewareError {
        err
    }
}

/// Each RPC surface is programmed through a public field; `None` makes the
/// corresponding call fail. Calls are recorded in order so tests can assert
/// on sequencing (e.g. that no nonce fetch follows a fee failure).
#[derive(Debug)]
pub struct MockMiddleware {
    provider: (Provider<MockProvider>, MockProvider),
    pub estimate_gas: Option<U256>,
    pub gas_price: Option<U256>,
    /// `None` fails the block fetch; `Some(None)` yields a block without a
    /// base fee (a pre-EIP-1559 chain).
    pub base_fee: Option<Option<U256>>,
    pub transaction_count: Option<U256>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl MockMiddleware {
    pub fn new() -> Self {
        Self {
            provider: Provider::mocked(),
            estimate_gas: None,
            gas_price: None,
            base_fee: None,
            transaction_count: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle on the call log, valid after the mock is moved into an adapter.
    pub fn call_log(&self) -> Arc<Mutex<Vec<&'static str>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Middleware for MockMiddleware {
    type Error = MockMiddlewareError;
    type Provider = MockProvider;
    type Inner = Self;

    fn inner(&self) -> &Self::Inner {
        unreachable!()
    }

    fn provider(&self) -> &Provider<Self::Provider> {
        &self.provider.0
    }

    async fn estimate_gas(
        &self,
        _: &TypedTransaction,
        _: Option<BlockId>,
    ) -> Result<U256, Self::Error> {
        self.record("estimate_gas");
        self.estimate_gas.ok_or(MockMiddlewareError::EstimateGas)
    }

    async fn get_gas_price(&self) -> Result<U256, Self::Error> {
        self.record("get_gas_price");
        self.gas_price.ok_or(MockMiddlewareError::GetGasPrice)
    }

    async fn get_block<T: Into<BlockId> + Send + Sync>(
        &self,
        _: T,
    ) -> Result<Option<Block<TxHash>>, Self::Error> {
        self.record("get_block");
        let base_fee_per_gas = self.base_fee.ok_or(MockMiddlewareError::GetBlock)?;
        Ok(Some(Block::<TxHash> {
            base_fee_per_gas,
            ..Default::default()
        }))
    }

    async fn get_transaction_count<T: Into<NameOrAddress> + Send + Sync>(
        &self,
        _: T,
        _: Option<BlockId>,
    ) -> Result<U256, Self::Error> {
        self.record("get_transaction_count");
        self.transaction_count
            .ok_or(MockMiddlewareError::GetTransactionCount)
    }
}
