use clap::Parser;
use serde::Deserialize;
use url::Url;

const DEFAULT_CHAIN_ID: u64 = 9001;
const DEFAULT_RPC_URL: &str = "https://eth.bd.evmos.org:8545";
const DEFAULT_SUBGRAPH_URL: &str =
    "https://subgraph.satsuma-prod.com/orbital-apes/forge-token-prices/api";
const DEFAULT_DATABASE_PATH: &str = "settings.json";

#[derive(Parser, Debug, Default)]
#[command(name = "gateway_config", about = "Configuration for the DEX gateway")]
struct GatewayEnvCLIConfig {
    /// Path to the gateway config file
    #[arg(long, env)]
    gateway_config: Option<String>,

    /// EVM chain id served by default
    #[arg(long, env)]
    gateway_chain_id: Option<u64>,

    /// JSON-RPC endpoint used for gas, fee and nonce queries
    #[arg(long, env)]
    gateway_rpc_url: Option<String>,

    /// GraphQL endpoint of the exchange subgraph
    #[arg(long, env)]
    gateway_subgraph_url: Option<String>,

    /// Path of the persisted user-settings database
    #[arg(long, env)]
    gateway_database_path: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GatewayFileConfig {
    pub gateway_chain_id: Option<u64>,
    pub gateway_rpc_url: Option<String>,
    pub gateway_subgraph_url: Option<String>,
    pub gateway_database_path: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    ReadFile(std::io::Error),

    #[error("could not parse config file: {0}")]
    ParseFile(serde_json::Error),

    #[error("invalid {field} URL: {source}")]
    InvalidUrl {
        field: &'static str,
        source: url::ParseError,
    },
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub chain_id: u64,
    pub rpc_url: Url,
    pub subgraph_url: Url,
    pub database_path: String,
}

impl GatewayConfig {
    /// CLI and environment values override the optional JSON config file,
    /// which overrides the defaults.
    pub fn initialize() -> Result<Self, ConfigError> {
        Self::assemble(GatewayEnvCLIConfig::parse())
    }

    fn assemble(env_cli_config: GatewayEnvCLIConfig) -> Result<Self, ConfigError> {
        let file_config = match env_cli_config.gateway_config {
            Some(config_path) => {
                let contents = std::fs::read_to_string(config_path).map_err(ConfigError::ReadFile)?;
                serde_json::from_str::<GatewayFileConfig>(&contents)
                    .map_err(ConfigError::ParseFile)?
            }
            None => GatewayFileConfig::default(),
        };

        let chain_id = env_cli_config
            .gateway_chain_id
            .or(file_config.gateway_chain_id)
            .unwrap_or(DEFAULT_CHAIN_ID);

        let rpc_url = env_cli_config
            .gateway_rpc_url
            .or(file_config.gateway_rpc_url)
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let rpc_url = Url::parse(&rpc_url).map_err(|source| ConfigError::InvalidUrl {
            field: "rpc",
            source,
        })?;

        let subgraph_url = env_cli_config
            .gateway_subgraph_url
            .or(file_config.gateway_subgraph_url)
            .unwrap_or_else(|| DEFAULT_SUBGRAPH_URL.to_string());
        let subgraph_url = Url::parse(&subgraph_url).map_err(|source| ConfigError::InvalidUrl {
            field: "subgraph",
            source,
        })?;

        let database_path = env_cli_config
            .gateway_database_path
            .or(file_config.gateway_database_path)
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        Ok(GatewayConfig {
            chain_id,
            rpc_url,
            subgraph_url,
            database_path,
        })
    }
}
