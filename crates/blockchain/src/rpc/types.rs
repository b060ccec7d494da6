// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use strum::{AsRefStr, Display, EnumString};

/// A response structure received from an HTTP JSON-RPC blockchain node request.
#[derive(Debug, Deserialize)]
pub struct RpcNodeHttpResponse<T>
where
    T: DeserializeOwned,
{
    /// JSON-RPC version identifier.
    pub jsonrpc: Option<String>,
    /// Request identifier returned by the server.
    pub id: Option<serde_json::Value>,
    /// Deserialized result, absent when the node returned an error.
    #[serde(bound(deserialize = ""))]
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// The JSON-RPC error object.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// The block parameter of state queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BlockTag {
    Latest,
    Pending,
}

/// A transaction handed to the node for signing and submission via `eth_sendTransaction`.
///
/// Quantities serialize as `0x` prefixed hex, as the JSON-RPC API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub gas: U256,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gas_price: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub nonce: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<U256>,
}

/// Sender, gas and value of a transaction, independent of its target and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxParams {
    pub from: Address,
    pub gas: U256,
    pub gas_price: Option<U256>,
    pub nonce: Option<U256>,
    pub value: Option<U256>,
}

impl TxParams {
    /// Builds the [`TransactionRequest`] calling `to` with `data`.
    #[must_use]
    pub fn into_request(self, to: Address, data: Bytes) -> TransactionRequest {
        TransactionRequest {
            from: self.from,
            to,
            data,
            gas: self.gas,
            gas_price: self.gas_price,
            nonce: self.nonce,
            value: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_parse_error_response() {
        let response: RpcNodeHttpResponse<String> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted","data":"0x"}}"#,
        )
        .unwrap();
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, 3);
    }

    #[rstest]
    fn test_parse_result_response() {
        let response: RpcNodeHttpResponse<String> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":7,"result":"0x01"}"#).unwrap();
        assert_eq!(response.result.as_deref(), Some("0x01"));
        assert!(response.error.is_none());
    }

    #[rstest]
    fn test_transaction_request_serializes_hex_quantities() {
        let tx = TransactionRequest {
            from: address!("0x0000000000000000000000000000000000000001"),
            to: address!("0x0000000000000000000000000000000000000002"),
            data: Bytes::from(vec![0xab, 0xcd]),
            gas: U256::from(500_000u64),
            gas_price: None,
            nonce: Some(U256::from(7u64)),
            value: None,
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["gas"], "0x7a120");
        assert_eq!(json["nonce"], "0x7");
        assert_eq!(json["data"], "0xabcd");
        assert!(json.get("gasPrice").is_none());
        assert!(json.get("value").is_none());
    }

    #[rstest]
    fn test_block_tag_display() {
        assert_eq!(BlockTag::Pending.to_string(), "pending");
        assert_eq!(BlockTag::Latest.as_ref(), "latest");
    }
}
