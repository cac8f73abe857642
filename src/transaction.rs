use ethers::core::types::Bytes;
use ethers::types::transaction::eip2930::AccessList;
use ethers::types::{Address, Eip1559TransactionRequest, NameOrAddress, U256, U64};
use serde::{Deserialize, Serialize};

/// The caller-supplied part of a transaction. Chain id, nonce, gas limit and
/// fee fields are filled in at signing time; the materialized request is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: Address,
    pub to: Address,
    pub value: Value,
    pub call_data: Option<Bytes>, // smart contract payload
}

impl Transaction {
    /// Request used for gas estimation, before nonce and fees are known.
    pub fn to_call_request(&self, chain_id: U64) -> Eip1559TransactionRequest {
        Eip1559TransactionRequest {
            chain_id: Some(chain_id),
            from: Some(self.from),
            to: Some(NameOrAddress::Address(self.to)),
            gas: None,
            value: self.value.into(),
            data: self.call_data.clone(),
            nonce: None,
            access_list: AccessList::default(),
            max_priority_fee_per_gas: None,
            max_fee_per_gas: None,
        }
    }

    pub fn to_eip_1559_transaction_request(
        &self,
        chain_id: U64,
        nonce: U256,
        max_priority_fee_per_gas: U256,
        max_fee_per_gas: U256,
    ) -> Eip1559TransactionRequest {
        Eip1559TransactionRequest {
            chain_id: Some(chain_id),
            from: Some(self.from),
            to: Some(NameOrAddress::Address(self.to)),
            gas: None, // must be set after
            value: self.value.into(),
            data: self.call_data.clone(),
            nonce: Some(nonce),
            access_list: AccessList::default(),
            max_priority_fee_per_gas: Some(max_priority_fee_per_gas),
            max_fee_per_gas: Some(max_fee_per_gas),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Number(U256), // in wei
    Nothing,
}

impl From<Value> for Option<U256> {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(v) => Some(v),
            Value::Nothing => Some(0.into()),
        }
    }
}
