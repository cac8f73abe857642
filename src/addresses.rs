use std::collections::HashMap;

use ethers::types::Address;
use once_cell::sync::Lazy;

use crate::chain::{Chain, FUJI};

/// Chain id to deployed contract address. Absence of a chain id means the
/// contract is not deployed on that chain.
pub type AddressMap = HashMap<u64, Address>;

/// Logical role of a deployed contract, resolved per chain through the static
/// tables below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractRole {
    V2Factory,
    V2Router,
    V3CoreFactory,
    V3Migrator,
    Multicall,
    SwapRouter,
    Quoter,
    NonfungiblePositionManager,
    TickLens,
    GovernanceToken,
    Timelock,
}

fn parse(s: &str) -> Address {
    s.parse().expect("hardcoded contract address")
}

/// Builds a map with the same address on every supported chain.
fn same_address_map(s: &str) -> AddressMap {
    let address = parse(s);
    Chain::all().map(|chain| (chain.id, address)).collect()
}

fn fuji_only(s: &str) -> AddressMap {
    HashMap::from([(FUJI.id, parse(s))])
}

static V2_FACTORY_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| same_address_map("0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"));

static V2_ROUTER_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| same_address_map("0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D"));

static GOVERNANCE_TOKEN_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| same_address_map("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984"));

static TIMELOCK_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| same_address_map("0x1a9C8182C09F50C8318d769245beA52c32BE35BC"));

static V3_CORE_FACTORY_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| fuji_only("0x43bDe47a34801f6aB2d66016Aef723Ba1b3A62b3"));

static V3_MIGRATOR_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| fuji_only("0x021d2b456b66e6b54fCef45CA2De298D533faC6B"));

static MULTICALL_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| fuji_only("0xBeFe898407483f0f2fF605971FBD8Cf8FbD8B160"));

static SWAP_ROUTER_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| fuji_only("0xd55586A56F208daeb184647aD17466c404ee1A51"));

static QUOTER_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| fuji_only("0x92b5f5EAe221BC6FeD88259cd2805A9C842c29bF"));

static NONFUNGIBLE_POSITION_MANAGER_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| fuji_only("0x0Ca5659fE0fD4a10bde2Ca4d78156B78e9F1de1a"));

static TICK_LENS_ADDRESSES: Lazy<AddressMap> =
    Lazy::new(|| fuji_only("0x4A3be35489fa980D75B4b96B7b7F8a14748F0172"));

/// The full per-chain address table for a contract role.
pub fn addresses(role: ContractRole) -> &'static AddressMap {
    match role {
        ContractRole::V2Factory => &V2_FACTORY_ADDRESSES,
        ContractRole::V2Router => &V2_ROUTER_ADDRESSES,
        ContractRole::V3CoreFactory => &V3_CORE_FACTORY_ADDRESSES,
        ContractRole::V3Migrator => &V3_MIGRATOR_ADDRESSES,
        ContractRole::Multicall => &MULTICALL_ADDRESSES,
        ContractRole::SwapRouter => &SWAP_ROUTER_ADDRESSES,
        ContractRole::Quoter => &QUOTER_ADDRESSES,
        ContractRole::NonfungiblePositionManager => &NONFUNGIBLE_POSITION_MANAGER_ADDRESSES,
        ContractRole::TickLens => &TICK_LENS_ADDRESSES,
        ContractRole::GovernanceToken => &GOVERNANCE_TOKEN_ADDRESSES,
        ContractRole::Timelock => &TIMELOCK_ADDRESSES,
    }
}

/// Resolves a contract role on a chain. `None` means the contract is not
/// deployed there.
pub fn address_for(role: ContractRole, chain_id: u64) -> Option<Address> {
    addresses(role).get(&chain_id).copied()
}
