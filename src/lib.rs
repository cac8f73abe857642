pub mod addresses;
pub mod chain;
pub mod config;
pub mod connection;
pub mod cosmos;
pub mod currency;
pub mod database;
pub mod navigation;
pub mod price_oracle;
pub mod subgraph;
pub mod transaction;
pub mod wallet;

pub use chain::Chain;
pub use connection::{ConnectionRegistry, ConnectionType};
pub use cosmos::{CosmosWalletAdapter, EnableOutcome, Error};
pub use price_oracle::StablecoinPriceOracle;
pub use subgraph::SubgraphClient;
pub use transaction::{Transaction, Value};
