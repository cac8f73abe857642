use ethers::types::U64;

/// A supported network. EVM-compatible Cosmos zones carry a Cosmos chain
/// identifier and a bech32 account prefix alongside the numeric EVM chain id;
/// plain EVM networks leave both unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    pub id: u64,
    pub cosmos_id: Option<&'static str>,
    pub bech32_prefix: Option<&'static str>,
}

pub const EVMOS: Chain = Chain {
    id: 9001,
    cosmos_id: Some("evmos_9001-2"),
    bech32_prefix: Some("evmos"),
};

pub const FUJI: Chain = Chain {
    id: 43113,
    cosmos_id: None,
    bech32_prefix: None,
};

const SUPPORTED: [Chain; 2] = [EVMOS, FUJI];

impl Chain {
    pub fn evmos() -> Chain {
        EVMOS
    }

    pub fn fuji() -> Chain {
        FUJI
    }

    /// Looks up a supported chain by its numeric id. `None` means the chain
    /// is unsupported.
    pub fn from_id<T: Into<u64>>(id: T) -> Option<Chain> {
        let id = id.into();
        SUPPORTED.into_iter().find(|chain| chain.id == id)
    }

    pub fn all() -> impl Iterator<Item = Chain> {
        SUPPORTED.into_iter()
    }

    pub fn chain_id(&self) -> U64 {
        U64::from(self.id)
    }

    /// Whether the chain has an alternate (Cosmos-side) wallet pathway.
    pub fn has_cosmos_wallet(&self) -> bool {
        self.cosmos_id.is_some()
    }
}
