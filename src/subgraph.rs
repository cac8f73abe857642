use reqwest::header::CACHE_CONTROL;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::trace;
use url::Url;

const POOL_INFO_QUERY: &str = "\
query PoolInfo($poolAddr: String!) {
  pool(id: $poolAddr) {
    id
    token0
    token1
    fee
    blockNumber
    blockTimestamp
    transactionHash
  }
}";

const TOKEN_PRICE_QUERY: &str = "\
query TokenPrice($tokenId0: String!, $tokenId1: String!, $duration: Int!) {
  candles(
    where: { duration: $duration, token0: $tokenId0, token1: $tokenId1 }
    orderBy: timestamp
    orderDirection: desc
  ) {
    id
    timestamp
    open
    close
    low
    high
    token0
    token1
  }
}";

#[derive(Debug, thiserror::Error)]
pub enum SubgraphError {
    #[error("POST request error: {0}")]
    Request(reqwest::Error),

    #[error("invalid status code: {0}")]
    StatusCode(reqwest::StatusCode),

    #[error("could not parse the request's response: {0}")]
    ParseResponse(serde_json::Error),

    #[error("could not parse numeric field `{field}` from {value:?}")]
    ParseField { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// Result of one query: whatever data arrived, alongside whatever errors
/// arrived. Partial data is never discarded because of an error.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome<T> {
    pub data: Option<T>,
    pub errors: Vec<GraphQlError>,
}

impl<T> QueryOutcome<T> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Pool metadata as indexed by the subgraph. Fields arrive as strings and are
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInfo {
    pub id: String,
    pub token0: String,
    pub token1: String,
    pub fee: String,
    pub block_number: String,
    pub block_timestamp: String,
    pub transaction_hash: String,
}

#[derive(Debug, Deserialize)]
struct PoolData {
    pool: Option<PoolInfo>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawCandle {
    timestamp: String,
    open: String,
    close: String,
    low: String,
    high: String,
}

/// One OHLC candle with numeric fields parsed and normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp: u64,
    /// Same instant as `timestamp`, kept under the name charting consumers
    /// expect.
    pub time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Deserialize)]
struct CandleData {
    candles: Vec<RawCandle>,
}

/// Parses a subgraph decimal string. Zero-like values (including negative
/// zero) normalize to literal `0.0`; NaN and infinities are rejected rather
/// than propagated.
fn parse_numeric(field: &'static str, value: &str) -> Result<f64, SubgraphError> {
    let parse_error = || SubgraphError::ParseField {
        field,
        value: value.to_string(),
    };

    let parsed: f64 = value.trim().parse().map_err(|_| parse_error())?;
    if !parsed.is_finite() {
        return Err(parse_error());
    }

    Ok(if parsed == 0.0 { 0.0 } else { parsed })
}

fn parse_timestamp(value: &str) -> Result<u64, SubgraphError> {
    value.trim().parse().map_err(|_| SubgraphError::ParseField {
        field: "timestamp",
        value: value.to_string(),
    })
}

impl Candle {
    fn from_raw(raw: &RawCandle) -> Result<Candle, SubgraphError> {
        let timestamp = parse_timestamp(&raw.timestamp)?;
        Ok(Candle {
            timestamp,
            time: timestamp,
            open: parse_numeric("open", &raw.open)?,
            high: parse_numeric("high", &raw.high)?,
            low: parse_numeric("low", &raw.low)?,
            close: parse_numeric("close", &raw.close)?,
        })
    }
}

fn candles_outcome(envelope: Envelope<CandleData>) -> Result<QueryOutcome<Vec<Candle>>, SubgraphError> {
    let data = match envelope.data {
        Some(data) => Some(
            data.candles
                .iter()
                .map(Candle::from_raw)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    Ok(QueryOutcome {
        data,
        errors: envelope.errors,
    })
}

/// Client for the exchange's subgraph. Every request goes to the network;
/// nothing is cached locally.
#[derive(Debug, Clone)]
pub struct SubgraphClient {
    url: Url,
    client: reqwest::Client,
}

impl SubgraphClient {
    pub fn new(url: Url) -> SubgraphClient {
        SubgraphClient {
            url,
            client: reqwest::Client::new(),
        }
    }

    /// Pool metadata by pool address.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn pool_info(
        &self,
        pool_addr: &str,
    ) -> Result<QueryOutcome<PoolInfo>, SubgraphError> {
        let envelope: Envelope<PoolData> = self
            .execute(POOL_INFO_QUERY, json!({ "poolAddr": pool_addr }))
            .await?;

        Ok(QueryOutcome {
            data: envelope.data.and_then(|data| data.pool),
            errors: envelope.errors,
        })
    }

    /// OHLC candles for a token pair at a given duration, newest first.
    #[tracing::instrument(level = "trace", skip_all)]
    pub async fn token_prices(
        &self,
        token_id0: &str,
        token_id1: &str,
        duration: u32,
    ) -> Result<QueryOutcome<Vec<Candle>>, SubgraphError> {
        let envelope: Envelope<CandleData> = self
            .execute(
                TOKEN_PRICE_QUERY,
                json!({
                    "tokenId0": token_id0,
                    "tokenId1": token_id1,
                    "duration": duration,
                }),
            )
            .await?;

        candles_outcome(envelope)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<Envelope<T>, SubgraphError> {
        let body = json!({ "query": query, "variables": variables });

        let res = self
            .client
            .post(self.url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .json(&body)
            .send()
            .await
            .map_err(SubgraphError::Request)?;
        if res.status() != StatusCode::OK {
            return Err(SubgraphError::StatusCode(res.status()));
        }

        let bytes = res.bytes().await.map_err(SubgraphError::Request)?;
        let envelope = serde_json::from_slice(&bytes).map_err(SubgraphError::ParseResponse)?;
        trace!("subgraph response received ({} bytes)", bytes.len());
        Ok(envelope)
    }
}
