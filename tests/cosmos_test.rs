use ethers::types::{Eip1559TransactionRequest, H160, U256};

use dex_gateway::cosmos::{address_to_bech32, CosmosWalletAdapter, EnableOutcome, Error};
use dex_gateway::{Chain, Transaction, Value};

use utilities::{
    assert_err, assert_ok,
    mocks::{
        cosmos_wallet::{EnableBehavior, MockCosmosWallet},
        middleware::{MockMiddleware, MockMiddlewareError},
    },
    ACCOUNT1, ACCOUNT2,
};

type MockAdapterError = Error<MockMiddleware, MockCosmosWallet>;

const BASE_FEE: u64 = 2_000_000_000;
const PRIORITY_FEE: u64 = 1_500_000_000;

fn transaction() -> Transaction {
    Transaction {
        from: (&ACCOUNT1).into(),
        to: (&ACCOUNT2).into(),
        value: Value::Number(U256::from(5000u64)),
        call_data: None,
    }
}

fn funded_middleware() -> MockMiddleware {
    let mut middleware = MockMiddleware::new();
    middleware.estimate_gas = Some(U256::from(21_000u64));
    middleware.gas_price = Some(U256::from(BASE_FEE));
    middleware.base_fee = Some(Some(U256::from(BASE_FEE)));
    middleware.transaction_count = Some(U256::from(7u64));
    middleware
}

fn bech32_account1() -> String {
    let address: H160 = (&ACCOUNT1).into();
    address_to_bech32(address, "evmos").unwrap()
}

#[tokio::test]
async fn test_adapter_requires_a_cosmos_pathway() {
    utilities::setup_tracing();

    let result = CosmosWalletAdapter::new(
        MockMiddleware::new(),
        MockCosmosWallet::new(),
        Chain::fuji(),
    );
    assert_err!(result, MockAdapterError::NoCosmosPathway(43113));

    let result = CosmosWalletAdapter::new(
        MockMiddleware::new(),
        MockCosmosWallet::new(),
        Chain::evmos(),
    );
    assert_ok!(result);
}

#[tokio::test]
async fn test_enable_classifies_without_propagating() {
    utilities::setup_tracing();

    // Wallet enables.
    {
        let mut wallet = MockCosmosWallet::new();
        wallet.enable = EnableBehavior::Enabled;
        let enabled_chains = wallet.enabled_chains();
        let adapter =
            CosmosWalletAdapter::new(MockMiddleware::new(), wallet, Chain::evmos()).unwrap();

        let outcome = adapter.enable().await;
        assert_eq!(outcome, EnableOutcome::Enabled);
        assert!(outcome.is_enabled());
        assert_eq!(*enabled_chains.lock().unwrap(), vec!["evmos_9001-2"]);
    }

    // User declines: distinguishable from a broken wallet.
    {
        let mut wallet = MockCosmosWallet::new();
        wallet.enable = EnableBehavior::Declined;
        let adapter =
            CosmosWalletAdapter::new(MockMiddleware::new(), wallet, Chain::evmos()).unwrap();
        assert_eq!(adapter.enable().await, EnableOutcome::Declined);
    }

    // Wallet errors out: swallowed, reported as unavailable.
    {
        let mut wallet = MockCosmosWallet::new();
        wallet.enable = EnableBehavior::Broken;
        let adapter =
            CosmosWalletAdapter::new(MockMiddleware::new(), wallet, Chain::evmos()).unwrap();
        assert_eq!(adapter.enable().await, EnableOutcome::Unavailable);
    }
}

#[tokio::test]
async fn test_account_translates_bech32_to_evm() {
    utilities::setup_tracing();

    let wallet = MockCosmosWallet::with_account(&bech32_account1());
    let adapter = CosmosWalletAdapter::new(MockMiddleware::new(), wallet, Chain::evmos()).unwrap();

    let bech32_address = adapter.bech32_account().await.unwrap();
    assert_eq!(bech32_address, bech32_account1());

    let address = adapter.account().await.unwrap();
    let expected: H160 = (&ACCOUNT1).into();
    assert_eq!(address, expected);
}

#[tokio::test]
async fn test_account_with_no_accounts_is_an_error() {
    utilities::setup_tracing();

    let mut wallet = MockCosmosWallet::new();
    wallet.accounts = Some(vec![]);
    let adapter = CosmosWalletAdapter::new(MockMiddleware::new(), wallet, Chain::evmos()).unwrap();

    let result = adapter.account().await;
    assert_err!(result, MockAdapterError::NoAccounts);
}

#[tokio::test]
async fn test_build_transaction_materializes_every_field() {
    utilities::setup_tracing();

    let middleware = funded_middleware();
    let calls = middleware.call_log();
    let wallet = MockCosmosWallet::with_account(&bech32_account1());
    let adapter = CosmosWalletAdapter::new(middleware, wallet, Chain::evmos()).unwrap();

    let request = adapter.build_transaction(&transaction()).await.unwrap();

    assert_eq!(request.chain_id, Some(9001u64.into()));
    assert_eq!(request.nonce, Some(U256::from(7u64)));
    assert_eq!(request.gas, Some(U256::from(21_000u64)));
    assert_eq!(
        request.max_priority_fee_per_gas,
        Some(U256::from(PRIORITY_FEE))
    );
    assert_eq!(
        request.max_fee_per_gas,
        Some(U256::from(2 * BASE_FEE + PRIORITY_FEE))
    );
    assert!(request.access_list.0.is_empty());

    // Construction is strictly sequential.
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "estimate_gas",
            "get_gas_price",
            "get_block",
            "get_transaction_count"
        ]
    );
}

#[tokio::test]
async fn test_build_transaction_rejects_missing_fee_fields_before_nonce() {
    utilities::setup_tracing();

    // The latest block carries no base fee, so neither EIP-1559 field can be
    // derived; the nonce must never be fetched even though it is available.
    let mut middleware = funded_middleware();
    middleware.base_fee = Some(None);
    let calls = middleware.call_log();
    let wallet = MockCosmosWallet::with_account(&bech32_account1());
    let adapter = CosmosWalletAdapter::new(middleware, wallet, Chain::evmos()).unwrap();

    let result = adapter.build_transaction(&transaction()).await;
    assert_err!(result, MockAdapterError::MissingFeeData);

    let calls = calls.lock().unwrap();
    assert!(!calls.contains(&"get_transaction_count"));
    assert_eq!(*calls, vec!["estimate_gas", "get_gas_price", "get_block"]);
}

#[tokio::test]
async fn test_build_transaction_aborts_on_gas_estimation_failure() {
    utilities::setup_tracing();

    let mut middleware = funded_middleware();
    middleware.estimate_gas = None;
    let calls = middleware.call_log();
    let wallet = MockCosmosWallet::with_account(&bech32_account1());
    let adapter = CosmosWalletAdapter::new(middleware, wallet, Chain::evmos()).unwrap();

    let result = adapter.build_transaction(&transaction()).await;
    assert_err!(
        result,
        MockAdapterError::Middleware(MockMiddlewareError::EstimateGas)
    );
    assert_eq!(*calls.lock().unwrap(), vec!["estimate_gas"]);
}

#[tokio::test]
async fn test_sign_transaction_delegates_to_the_wallet() {
    utilities::setup_tracing();

    let mut wallet = MockCosmosWallet::with_account(&bech32_account1());
    wallet.signature = Some(vec![0xab, 0xcd].into());
    let last_sign = wallet.last_sign();
    let adapter = CosmosWalletAdapter::new(funded_middleware(), wallet, Chain::evmos()).unwrap();

    let expected_request = adapter.build_transaction(&transaction()).await.unwrap();
    let signature = adapter.sign_transaction(&transaction()).await.unwrap();
    assert_eq!(signature, ethers::types::Bytes::from(vec![0xab, 0xcd]));

    let call = last_sign.lock().unwrap().clone().unwrap();
    assert_eq!(call.cosmos_chain_id, "evmos_9001-2");
    assert_eq!(call.signer, bech32_account1());
    assert_eq!(call.mode, dex_gateway::cosmos::SignMode::Transaction);

    // The payload is the fully materialized request.
    let payload: Eip1559TransactionRequest = serde_json::from_str(&call.payload).unwrap();
    assert_eq!(payload, expected_request);
}
