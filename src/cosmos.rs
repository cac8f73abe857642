use std::fmt::Debug;

use async_trait::async_trait;
use bech32::{FromBase32, ToBase32, Variant};
use ethers::providers::Middleware;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{
    Address, BlockId, BlockNumber, Bytes, Eip1559TransactionRequest, NameOrAddress, U256,
};
use tracing::{trace, warn};

use crate::chain::Chain;
use crate::transaction::Transaction;

/// Default priority fee used when the chain does not advertise one, following
/// the convention of ethers' `getFeeData` (1.5 gwei).
const DEFAULT_MAX_PRIORITY_FEE: u64 = 1_500_000_000;

/// Signing mode discriminant passed through to the wallet's raw signing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignMode {
    Transaction,
    Message,
}

impl SignMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignMode::Transaction => "transaction",
            SignMode::Message => "message",
        }
    }
}

/// An account exposed by the alternate wallet's offline signer. The address
/// is in the wallet's native bech32 form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosmosAccount {
    pub address: String,
    pub pub_key: Bytes,
}

/// Failure of an enable request, classified so that a user decline is
/// distinguishable from a broken or absent wallet.
#[derive(Debug, thiserror::Error)]
pub enum EnableError<E> {
    #[error("enable request declined")]
    Declined,

    #[error("{0}")]
    Backend(E),
}

/// A Keplr-style wallet injected alongside the standard connector pathway:
/// enabled per Cosmos chain id, listing bech32 accounts, and signing
/// EVM payloads through a raw call keyed by chain id, signer and mode.
#[async_trait]
pub trait CosmosWallet: Debug {
    type Error: std::error::Error + Send + Sync;

    async fn enable(&self, cosmos_chain_id: &str) -> Result<(), EnableError<Self::Error>>;

    async fn accounts(&self, cosmos_chain_id: &str) -> Result<Vec<CosmosAccount>, Self::Error>;

    async fn sign_ethereum(
        &self,
        cosmos_chain_id: &str,
        signer: &str,
        payload: &str,
        mode: SignMode,
    ) -> Result<Bytes, Self::Error>;
}

/// Result of attempting to activate the alternate wallet. Never carries the
/// underlying error; `Unavailable` covers an absent or failing wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableOutcome {
    Enabled,
    Declined,
    Unavailable,
}

impl EnableOutcome {
    pub fn is_enabled(&self) -> bool {
        matches!(self, EnableOutcome::Enabled)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("bech32: {0}")]
    Bech32(#[from] bech32::Error),

    #[error("unexpected bech32 prefix (expected {expected}, got {actual})")]
    Prefix { expected: String, actual: String },

    #[error("bech32 payload is not a 20-byte address")]
    Payload,
}

/// Translates a bech32 account address into its EVM 20-byte form, enforcing
/// the chain's account prefix.
pub fn address_from_bech32(address: &str, expected_prefix: &str) -> Result<Address, AddressError> {
    let (prefix, data, _) = bech32::decode(address)?;
    if prefix != expected_prefix {
        return Err(AddressError::Prefix {
            expected: expected_prefix.to_string(),
            actual: prefix,
        });
    }
    let bytes = Vec::<u8>::from_base32(&data)?;
    if bytes.len() != Address::len_bytes() {
        return Err(AddressError::Payload);
    }
    Ok(Address::from_slice(&bytes))
}

pub fn address_to_bech32(address: Address, prefix: &str) -> Result<String, AddressError> {
    Ok(bech32::encode(
        prefix,
        address.as_bytes().to_base32(),
        Variant::Bech32,
    )?)
}

/// Fee fields in the shape of ethers' `getFeeData`. Both EIP-1559 fields are
/// absent on chains whose latest block carries no base fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeData {
    pub gas_price: U256,
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error<M: Middleware, W: CosmosWallet> {
    #[error("middleware: {0}")]
    Middleware(M::Error),

    #[error("wallet: {0}")]
    Wallet(W::Error),

    #[error("chain {0} has no alternate wallet pathway")]
    NoCosmosPathway(u64),

    #[error("fee estimation failed: the chain did not provide EIP-1559 fee fields")]
    MissingFeeData,

    #[error("the wallet returned no accounts")]
    NoAccounts,

    #[error("address translation: {0}")]
    Address(#[from] AddressError),

    #[error("could not serialize the transaction payload: {0}")]
    SerializePayload(serde_json::Error),
}

/// Second signing pathway outside the connector abstraction: accounts come
/// from the alternate wallet, transactions are materialized manually against
/// the JSON-RPC provider and handed back to the wallet's native signer.
#[derive(Debug)]
pub struct CosmosWalletAdapter<M: Middleware, W: CosmosWallet> {
    provider: M,
    wallet: W,
    chain: Chain,
    cosmos_id: &'static str,
    bech32_prefix: &'static str,
}

impl<M, W> CosmosWalletAdapter<M, W>
where
    M: Middleware + Send + Sync,
    W: CosmosWallet + Send + Sync,
{
    pub fn new(provider: M, wallet: W, chain: Chain) -> Result<Self, Error<M, W>> {
        let (cosmos_id, bech32_prefix) = match (chain.cosmos_id, chain.bech32_prefix) {
            (Some(cosmos_id), Some(prefix)) => (cosmos_id, prefix),
            _ => return Err(Error::NoCosmosPathway(chain.id)),
        };

        Ok(Self {
            provider,
            wallet,
            chain,
            cosmos_id,
            bech32_prefix,
        })
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Attempts to activate the wallet for the adapter's chain. Failures are
    /// classified, never propagated.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn enable(&self) -> EnableOutcome {
        match self.wallet.enable(self.cosmos_id).await {
            Ok(()) => EnableOutcome::Enabled,
            Err(EnableError::Declined) => {
                trace!("wallet enable declined for {}", self.cosmos_id);
                EnableOutcome::Declined
            }
            Err(EnableError::Backend(err)) => {
                warn!("wallet enable failed for {}: {:?}", self.cosmos_id, err);
                EnableOutcome::Unavailable
            }
        }
    }

    /// First offline-signer account in the wallet's native bech32 form.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn bech32_account(&self) -> Result<String, Error<M, W>> {
        let accounts = self
            .wallet
            .accounts(self.cosmos_id)
            .await
            .map_err(Error::Wallet)?;

        let first = accounts.into_iter().next().ok_or(Error::NoAccounts)?;
        Ok(first.address)
    }

    /// First offline-signer account translated to the EVM address form.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn account(&self) -> Result<Address, Error<M, W>> {
        let bech32_address = self.bech32_account().await?;
        Ok(address_from_bech32(&bech32_address, self.bech32_prefix)?)
    }

    /// Fee fields derived from the provider: the legacy gas price always, the
    /// EIP-1559 pair only when the latest block carries a base fee.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn fee_data(&self) -> Result<FeeData, Error<M, W>> {
        let gas_price = self
            .provider
            .get_gas_price()
            .await
            .map_err(Error::Middleware)?;

        let base_fee = self
            .provider
            .get_block(BlockId::Number(BlockNumber::Latest))
            .await
            .map_err(Error::Middleware)?
            .and_then(|block| block.base_fee_per_gas);

        let fee_data = match base_fee {
            Some(base_fee) => {
                let max_priority_fee = U256::from(DEFAULT_MAX_PRIORITY_FEE);
                FeeData {
                    gas_price,
                    max_fee_per_gas: Some(base_fee * U256::from(2) + max_priority_fee),
                    max_priority_fee_per_gas: Some(max_priority_fee),
                }
            }
            None => FeeData {
                gas_price,
                max_fee_per_gas: None,
                max_priority_fee_per_gas: None,
            },
        };

        trace!("fee data: {:?}", fee_data);
        Ok(fee_data)
    }

    /// Materializes a type-2 transaction request: gas estimate, fee data,
    /// sender nonce, explicit empty access list. Strictly sequential; a
    /// missing fee field aborts the build before the nonce is ever fetched.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn build_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Eip1559TransactionRequest, Error<M, W>> {
        let chain_id = self.chain.chain_id();

        let probe = TypedTransaction::Eip1559(transaction.to_call_request(chain_id));
        let gas_limit = self
            .provider
            .estimate_gas(&probe, None)
            .await
            .map_err(Error::Middleware)?;

        let fee_data = self.fee_data().await?;
        let (max_priority_fee, max_fee) = match (
            fee_data.max_priority_fee_per_gas,
            fee_data.max_fee_per_gas,
        ) {
            (Some(max_priority_fee), Some(max_fee)) => (max_priority_fee, max_fee),
            _ => return Err(Error::MissingFeeData),
        };

        let nonce = self.get_nonce(transaction.from).await?;

        let mut request = transaction.to_eip_1559_transaction_request(
            chain_id,
            nonce,
            max_priority_fee,
            max_fee,
        );
        request.gas = Some(gas_limit);

        trace!("built transaction request => {:?}", request);
        Ok(request)
    }

    /// Builds the transaction and hands the serialized request to the
    /// wallet's native signer.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn sign_transaction(&self, transaction: &Transaction) -> Result<Bytes, Error<M, W>> {
        let request = self.build_transaction(transaction).await?;
        let signer = self.bech32_account().await?;
        let payload = serde_json::to_string(&request).map_err(Error::SerializePayload)?;

        self.wallet
            .sign_ethereum(self.cosmos_id, &signer, &payload, SignMode::Transaction)
            .await
            .map_err(Error::Wallet)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn get_nonce(&self, address: Address) -> Result<U256, Error<M, W>> {
        self.provider
            .get_transaction_count(
                NameOrAddress::Address(address),
                Some(BlockId::Number(BlockNumber::Pending)),
            )
            .await
            .map_err(Error::Middleware)
    }
}
