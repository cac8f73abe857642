/// Presence flags declared by a browser-injected wallet object. `None` at the
/// call sites below means no wallet is injected at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletFlags {
    pub is_metamask: bool,
    pub is_brave_wallet: bool,
    pub is_coinbase_wallet: bool,
}

pub fn is_injected(flags: Option<&WalletFlags>) -> bool {
    flags.is_some()
}

pub fn is_brave_wallet(flags: Option<&WalletFlags>) -> bool {
    flags.map(|f| f.is_brave_wallet).unwrap_or(false)
}

/// True only for the MetaMask extension itself. Brave's built-in wallet also
/// sets the MetaMask flag, so it must be excluded explicitly.
pub fn is_metamask_wallet(flags: Option<&WalletFlags>) -> bool {
    flags.map(|f| f.is_metamask).unwrap_or(false) && !is_brave_wallet(flags)
}

pub fn is_coinbase_wallet(flags: Option<&WalletFlags>) -> bool {
    flags.map(|f| f.is_coinbase_wallet).unwrap_or(false)
}

/// Concrete wallet vendor behind the injected object, classified once when a
/// connection is established rather than re-probed at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletVendor {
    Brave,
    MetaMask,
    CoinbaseWallet,
    GenericInjected,
}

impl WalletVendor {
    pub fn detect(flags: &WalletFlags) -> WalletVendor {
        // Order matters: the Brave case must win over the MetaMask flag.
        if flags.is_brave_wallet {
            WalletVendor::Brave
        } else if flags.is_metamask {
            WalletVendor::MetaMask
        } else if flags.is_coinbase_wallet {
            WalletVendor::CoinbaseWallet
        } else {
            WalletVendor::GenericInjected
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WalletVendor::Brave => "Brave Wallet",
            WalletVendor::MetaMask => "MetaMask",
            WalletVendor::CoinbaseWallet => "Coinbase Wallet",
            WalletVendor::GenericInjected => "Browser Wallet",
        }
    }
}
