use async_trait::async_trait;
use ethers::types::Bytes;
use std::sync::{Arc, Mutex};

use dex_gateway::cosmos::{CosmosAccount, CosmosWallet, EnableError, SignMode};

#[derive(Debug, thiserror::Error)]
pub enum MockCosmosWalletError {
    #[error("mock cosmos wallet error: enable")]
    Enable,

    #[error("mock cosmos wallet error: accounts")]
    Accounts,

    #[error("mock cosmos wallet error: sign")]
    Sign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableBehavior {
    Enabled,
    Declined,
    Broken,
}

/// Arguments of the last `sign_ethereum` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignCall {
    pub cosmos_chain_id: String,
    pub signer: String,
    pub payload: String,
    pub mode: SignMode,
}

#[derive(Debug)]
pub struct MockCosmosWallet {
    pub enable: EnableBehavior,
    pub accounts: Option<Vec<CosmosAccount>>,
    pub signature: Option<Bytes>,
    enabled_chains: Arc<Mutex<Vec<String>>>,
    last_sign: Arc<Mutex<Option<SignCall>>>,
}

impl MockCosmosWallet {
    pub fn new() -> Self {
        Self {
            enable: EnableBehavior::Broken,
            accounts: None,
            signature: None,
            enabled_chains: Arc::new(Mutex::new(Vec::new())),
            last_sign: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_account(address: &str) -> Self {
        let mut wallet = Self::new();
        wallet.enable = EnableBehavior::Enabled;
        wallet.accounts = Some(vec![CosmosAccount {
            address: address.to_string(),
            pub_key: Bytes::default(),
        }]);
        wallet
    }

    pub fn enabled_chains(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.enabled_chains)
    }

    pub fn last_sign(&self) -> Arc<Mutex<Option<SignCall>>> {
        Arc::clone(&self.last_sign)
    }
}

impl Default for MockCosmosWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CosmosWallet for MockCosmosWallet {
    type Error = MockCosmosWalletError;

    async fn enable(&self, cosmos_chain_id: &str) -> Result<(), EnableError<Self::Error>> {
        self.enabled_chains
            .lock()
            .unwrap()
            .push(cosmos_chain_id.to_string());
        match self.enable {
            EnableBehavior::Enabled => Ok(()),
            EnableBehavior::Declined => Err(EnableError::Declined),
            EnableBehavior::Broken => Err(EnableError::Backend(MockCosmosWalletError::Enable)),
        }
    }

    async fn accounts(&self, _: &str) -> Result<Vec<CosmosAccount>, Self::Error> {
        self.accounts
            .clone()
            .ok_or(MockCosmosWalletError::Accounts)
    }

    async fn sign_ethereum(
        &self,
        cosmos_chain_id: &str,
        signer: &str,
        payload: &str,
        mode: SignMode,
    ) -> Result<Bytes, Self::Error> {
        *self.last_sign.lock().unwrap() = Some(SignCall {
            cosmos_chain_id: cosmos_chain_id.to_string(),
            signer: signer.to_string(),
            payload: payload.to_string(),
            mode,
        });
        self.signature.clone().ok_or(MockCosmosWalletError::Sign)
    }
}
