use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use crate::chain::Chain;
use crate::wallet::{WalletFlags, WalletVendor};

/// The wallet-integration backends the application supports. Each maps to
/// exactly one connector instance held by the registry for its whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    Injected,
    CoinbaseWallet,
    WalletConnect,
    Network,
    GnosisSafe,
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("no wallet is injected in this environment")]
    NoInjectedWallet,

    #[error("chain {chain_id} has no configured RPC endpoint")]
    UnsupportedChain { chain_id: u64 },

    #[error("not running inside a Safe app context")]
    SafeContextUnavailable,
}

/// One wallet-integration backend. Activation binds the connector to a chain;
/// deactivation releases it. Connectors model activation state, not the
/// vendor's network handshake.
#[async_trait]
pub trait Connector: Debug + Send + Sync {
    async fn activate(&self, chain: &Chain) -> Result<(), ConnectorError>;

    async fn deactivate(&self) -> Result<(), ConnectorError>;
}

/// Browser-injected wallet. The vendor is classified once, on activation, and
/// held until the connector deactivates.
#[derive(Debug)]
pub struct InjectedConnector {
    flags: Option<WalletFlags>,
    detected: Mutex<Option<WalletVendor>>,
}

impl InjectedConnector {
    pub fn new(flags: Option<WalletFlags>) -> InjectedConnector {
        InjectedConnector {
            flags,
            detected: Mutex::new(None),
        }
    }

    /// The vendor detected at activation time, if any.
    pub fn vendor(&self) -> Option<WalletVendor> {
        *self.detected.lock().unwrap()
    }
}

#[async_trait]
impl Connector for InjectedConnector {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn activate(&self, chain: &Chain) -> Result<(), ConnectorError> {
        let flags = self.flags.as_ref().ok_or(ConnectorError::NoInjectedWallet)?;
        let vendor = WalletVendor::detect(flags);
        trace!("activating injected connector ({:?}) on chain {}", vendor, chain.id);
        *self.detected.lock().unwrap() = Some(vendor);
        Ok(())
    }

    async fn deactivate(&self) -> Result<(), ConnectorError> {
        *self.detected.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Debug)]
pub struct CoinbaseWalletConnector {
    pub app_name: String,
    active_chain: Mutex<Option<u64>>,
}

impl CoinbaseWalletConnector {
    pub fn new(app_name: &str) -> CoinbaseWalletConnector {
        CoinbaseWalletConnector {
            app_name: app_name.to_string(),
            active_chain: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Connector for CoinbaseWalletConnector {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn activate(&self, chain: &Chain) -> Result<(), ConnectorError> {
        *self.active_chain.lock().unwrap() = Some(chain.id);
        Ok(())
    }

    async fn deactivate(&self) -> Result<(), ConnectorError> {
        *self.active_chain.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Debug)]
pub struct WalletConnectConnector {
    rpc_urls: HashMap<u64, Url>,
    active_chain: Mutex<Option<u64>>,
}

impl WalletConnectConnector {
    pub fn new(rpc_urls: HashMap<u64, Url>) -> WalletConnectConnector {
        WalletConnectConnector {
            rpc_urls,
            active_chain: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Connector for WalletConnectConnector {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn activate(&self, chain: &Chain) -> Result<(), ConnectorError> {
        if !self.rpc_urls.contains_key(&chain.id) {
            return Err(ConnectorError::UnsupportedChain { chain_id: chain.id });
        }
        *self.active_chain.lock().unwrap() = Some(chain.id);
        Ok(())
    }

    async fn deactivate(&self) -> Result<(), ConnectorError> {
        *self.active_chain.lock().unwrap() = None;
        Ok(())
    }
}

/// Read-only connector backed by plain RPC endpoints, used before any wallet
/// is connected.
#[derive(Debug)]
pub struct NetworkConnector {
    rpc_urls: HashMap<u64, Url>,
    active_chain: Mutex<Option<u64>>,
}

impl NetworkConnector {
    pub fn new(rpc_urls: HashMap<u64, Url>) -> NetworkConnector {
        NetworkConnector {
            rpc_urls,
            active_chain: Mutex::new(None),
        }
    }

    pub fn rpc_url(&self, chain_id: u64) -> Option<&Url> {
        self.rpc_urls.get(&chain_id)
    }
}

#[async_trait]
impl Connector for NetworkConnector {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn activate(&self, chain: &Chain) -> Result<(), ConnectorError> {
        if !self.rpc_urls.contains_key(&chain.id) {
            return Err(ConnectorError::UnsupportedChain { chain_id: chain.id });
        }
        *self.active_chain.lock().unwrap() = Some(chain.id);
        Ok(())
    }

    async fn deactivate(&self) -> Result<(), ConnectorError> {
        *self.active_chain.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Debug)]
pub struct GnosisSafeConnector {
    in_safe_context: bool,
}

impl GnosisSafeConnector {
    pub fn new(in_safe_context: bool) -> GnosisSafeConnector {
        GnosisSafeConnector { in_safe_context }
    }
}

#[async_trait]
impl Connector for GnosisSafeConnector {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn activate(&self, _: &Chain) -> Result<(), ConnectorError> {
        if !self.in_safe_context {
            return Err(ConnectorError::SafeContextUnavailable);
        }
        Ok(())
    }

    async fn deactivate(&self) -> Result<(), ConnectorError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Connection {
    kind: ConnectionType,
    connector: Arc<dyn Connector>,
}

impl Connection {
    pub fn kind(&self) -> ConnectionType {
        self.kind
    }

    pub fn connector(&self) -> &Arc<dyn Connector> {
        &self.connector
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unsupported connector")]
    UnsupportedConnector,
}

/// The fixed set of supported connections, one per `ConnectionType`. Built
/// once at application start and passed down explicitly.
#[derive(Debug)]
pub struct ConnectionRegistry {
    gnosis_safe: Connection,
    injected: Connection,
    coinbase_wallet: Connection,
    wallet_connect: Connection,
    network: Connection,
}

impl ConnectionRegistry {
    pub fn new(
        injected_flags: Option<WalletFlags>,
        rpc_urls: HashMap<u64, Url>,
        app_name: &str,
        in_safe_context: bool,
    ) -> ConnectionRegistry {
        ConnectionRegistry {
            gnosis_safe: Connection {
                kind: ConnectionType::GnosisSafe,
                connector: Arc::new(GnosisSafeConnector::new(in_safe_context)),
            },
            injected: Connection {
                kind: ConnectionType::Injected,
                connector: Arc::new(InjectedConnector::new(injected_flags)),
            },
            coinbase_wallet: Connection {
                kind: ConnectionType::CoinbaseWallet,
                connector: Arc::new(CoinbaseWalletConnector::new(app_name)),
            },
            wallet_connect: Connection {
                kind: ConnectionType::WalletConnect,
                connector: Arc::new(WalletConnectConnector::new(rpc_urls.clone())),
            },
            network: Connection {
                kind: ConnectionType::Network,
                connector: Arc::new(NetworkConnector::new(rpc_urls)),
            },
        }
    }

    fn connections(&self) -> [&Connection; 5] {
        [
            &self.gnosis_safe,
            &self.injected,
            &self.coinbase_wallet,
            &self.wallet_connect,
            &self.network,
        ]
    }

    /// The singleton connection for a backend type.
    pub fn connection(&self, kind: ConnectionType) -> &Connection {
        match kind {
            ConnectionType::Injected => &self.injected,
            ConnectionType::CoinbaseWallet => &self.coinbase_wallet,
            ConnectionType::WalletConnect => &self.wallet_connect,
            ConnectionType::Network => &self.network,
            ConnectionType::GnosisSafe => &self.gnosis_safe,
        }
    }

    /// Finds the connection owning a connector instance by identity. An
    /// instance the registry does not own is an error.
    pub fn connection_for(
        &self,
        connector: &Arc<dyn Connector>,
    ) -> Result<&Connection, RegistryError> {
        self.connections()
            .into_iter()
            .find(|connection| Arc::ptr_eq(&connection.connector, connector))
            .ok_or(RegistryError::UnsupportedConnector)
    }

    /// User-facing backend name. The injected backend only reads "MetaMask"
    /// when the MetaMask extension itself is present.
    pub fn connection_name(kind: ConnectionType, has_metamask_extension: bool) -> &'static str {
        match kind {
            ConnectionType::Injected if has_metamask_extension => "MetaMask",
            ConnectionType::Injected => "Browser Wallet",
            ConnectionType::CoinbaseWallet => "Coinbase Wallet",
            ConnectionType::WalletConnect => "WalletConnect",
            ConnectionType::Network => "Network",
            ConnectionType::GnosisSafe => "Gnosis Safe",
        }
    }
}
