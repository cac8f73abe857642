use ethers::types::{Address, U256, U512};
use serde::{Deserialize, Serialize};

use crate::chain::{EVMOS, FUJI};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
}

impl Token {
    pub fn new(chain_id: u64, address: Address, decimals: u8, symbol: &str) -> Token {
        Token {
            chain_id,
            address,
            decimals,
            symbol: symbol.to_string(),
        }
    }

    /// Identity comparison: same chain, same deployment.
    pub fn equals(&self, other: &Token) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

/// Either the chain's native currency or an ERC-20 token. The native currency
/// carries its canonical wrapped token so that pool-level comparisons can
/// always be made on the wrapped form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Native {
        chain_id: u64,
        decimals: u8,
        symbol: String,
        wrapped: Token,
    },
    Token(Token),
}

impl Currency {
    pub fn chain_id(&self) -> u64 {
        match self {
            Currency::Native { chain_id, .. } => *chain_id,
            Currency::Token(token) => token.chain_id,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Currency::Native { decimals, .. } => *decimals,
            Currency::Token(token) => token.decimals,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Currency::Native { symbol, .. } => symbol,
            Currency::Token(token) => &token.symbol,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native { .. })
    }

    /// The wrapped form of the currency. For tokens this is the token itself.
    pub fn wrapped(&self) -> &Token {
        match self {
            Currency::Native { wrapped, .. } => wrapped,
            Currency::Token(token) => token,
        }
    }

    /// Identity comparison: a native currency never equals a token, even its
    /// own wrapped form.
    pub fn equals(&self, other: &Currency) -> bool {
        match (self, other) {
            (Currency::Native { chain_id: a, .. }, Currency::Native { chain_id: b, .. }) => a == b,
            (Currency::Token(a), Currency::Token(b)) => a.equals(b),
            _ => false,
        }
    }
}

impl From<Token> for Currency {
    fn from(token: Token) -> Currency {
        Currency::Token(token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub currency: Currency,
    /// Amount in the currency's smallest unit.
    pub raw: U256,
}

impl CurrencyAmount {
    pub fn from_raw(currency: Currency, raw: U256) -> CurrencyAmount {
        CurrencyAmount { currency, raw }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("amount currency does not match the price's base currency")]
    CurrencyMismatch,

    #[error("price denominator is zero")]
    ZeroDenominator,

    #[error("quoted amount overflows")]
    Overflow,
}

/// Exchange rate between a base currency and a quote token, kept as the exact
/// numerator/denominator pair (raw quote units per raw base unit) delivered by
/// a route's mid-price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub base: Currency,
    pub quote: Token,
    pub denominator: U256,
    pub numerator: U256,
}

impl Price {
    pub fn new(base: Currency, quote: Token, denominator: U256, numerator: U256) -> Price {
        Price {
            base,
            quote,
            denominator,
            numerator,
        }
    }

    /// Value equality via cross-multiplication, so 1/2 equals 2/4. Does not
    /// compare the currency pair.
    pub fn equal_to(&self, other: &Price) -> bool {
        self.numerator.full_mul(other.denominator) == other.numerator.full_mul(self.denominator)
    }

    /// Converts an amount of the base currency into the quote token, rounding
    /// down.
    pub fn quote(&self, amount: &CurrencyAmount) -> Result<CurrencyAmount, PriceError> {
        if !amount.currency.equals(&self.base) {
            return Err(PriceError::CurrencyMismatch);
        }
        if self.denominator.is_zero() {
            return Err(PriceError::ZeroDenominator);
        }

        let quoted = amount.raw.full_mul(self.numerator) / U512::from(self.denominator);
        let raw = U256::try_from(quoted).map_err(|_| PriceError::Overflow)?;

        Ok(CurrencyAmount::from_raw(
            Currency::Token(self.quote.clone()),
            raw,
        ))
    }
}

fn token(chain_id: u64, address: &str, decimals: u8, symbol: &str) -> Token {
    Token::new(
        chain_id,
        address.parse().expect("hardcoded token address"),
        decimals,
        symbol,
    )
}

pub fn usdc_evmos() -> Token {
    token(
        EVMOS.id,
        "0x15C3Eb3B621d1Bff62CbA1c9536B7c1AE9149b57",
        6,
        "axlUSDC",
    )
}

pub fn usdc_fuji() -> Token {
    token(
        FUJI.id,
        "0x5425890298aed601595a70AB815c96711a31Bc65",
        6,
        "USDC",
    )
}

pub fn wrapped_native(chain_id: u64) -> Option<Token> {
    match chain_id {
        id if id == EVMOS.id => Some(token(
            id,
            "0xD4949664cD82660AaE99bEdc034a0deA8A0bd517",
            18,
            "WEVMOS",
        )),
        id if id == FUJI.id => Some(token(
            id,
            "0xd00ae08403B9bbb9124bB305C09058E32C39A48c",
            18,
            "WAVAX",
        )),
        _ => None,
    }
}

pub fn native_currency(chain_id: u64) -> Option<Currency> {
    let wrapped = wrapped_native(chain_id)?;
    let symbol = match chain_id {
        id if id == EVMOS.id => "EVMOS",
        _ => "AVAX",
    };
    Some(Currency::Native {
        chain_id,
        decimals: 18,
        symbol: symbol.to_string(),
        wrapped,
    })
}

/// Stablecoin amounts used when deriving the spot price of a currency. The
/// amounts are large enough to filter out low-liquidity pairs.
// TODO: the Evmos table still quotes against the bridged axlUSDC deployment;
// revisit once native USDC liquidity is deep enough.
pub fn stablecoin_amount_out(chain_id: u64) -> Option<CurrencyAmount> {
    let (stablecoin, units) = match chain_id {
        id if id == EVMOS.id => (usdc_evmos(), 100_000u64),
        id if id == FUJI.id => (usdc_fuji(), 10_000u64),
        _ => return None,
    };

    let raw = U256::from(units) * U256::exp10(stablecoin.decimals as usize);
    Some(CurrencyAmount::from_raw(Currency::Token(stablecoin), raw))
}
