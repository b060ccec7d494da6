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

use std::{
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use alloy::primitives::{Address, B256, TxHash, U256};
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::rpc::{
    RpcClient,
    error::BlockchainRpcClientError,
    types::{BlockTag, RpcNodeHttpResponse, TransactionRequest},
    utils::{decode_hex_response, parse_hex_quantity, parse_storage_word},
};

/// Maximum number of response characters echoed back in parse errors.
const RESPONSE_PREVIEW_LEN: usize = 500;

/// Client for making HTTP-based JSON-RPC requests to blockchain nodes.
#[derive(Debug)]
pub struct HttpRpcClient {
    /// The HTTP URL for the blockchain node's RPC endpoint.
    http_rpc_url: String,
    /// The HTTP client for making RPC http-based requests.
    http_client: reqwest::Client,
    next_request_id: AtomicU64,
}

impl HttpRpcClient {
    /// Creates a new HTTP RPC client for the given endpoint, bounding every request by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        http_rpc_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BlockchainRpcClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                BlockchainRpcClientError::ClientError(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http_rpc_url: http_rpc_url.into(),
            http_client,
            next_request_id: AtomicU64::new(1),
        })
    }

    /// Creates a JSON-RPC 2.0 request object with a fresh request id.
    #[must_use]
    pub fn construct_rpc_request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> serde_json::Value {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        })
    }

    /// Creates a properly formatted `eth_call` JSON-RPC request object targeting a specific contract address with encoded function data.
    #[must_use]
    pub fn construct_eth_call(&self, to: &Address, call_data: &[u8]) -> serde_json::Value {
        let call = serde_json::json!({
            "to": to.to_string(),
            "data": format!("0x{}", hex::encode(call_data)),
        });
        self.construct_rpc_request("eth_call", serde_json::json!([call, BlockTag::Latest.as_ref()]))
    }

    /// Generic method that sends a JSON-RPC request and returns the raw response in bytes.
    async fn send_rpc_request(
        &self,
        rpc_request: &serde_json::Value,
    ) -> Result<Bytes, BlockchainRpcClientError> {
        let response = self
            .http_client
            .post(&self.http_rpc_url)
            .json(rpc_request)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        response.bytes().await.map_err(|e| map_transport_error(&e))
    }

    /// Executes a JSON-RPC request and deserializes the `result` field into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the node returns an error object,
    /// or the response cannot be parsed.
    pub async fn execute_rpc<T: DeserializeOwned>(
        &self,
        rpc_request: serde_json::Value,
    ) -> Result<T, BlockchainRpcClientError> {
        let bytes = self.send_rpc_request(&rpc_request).await?;

        match serde_json::from_slice::<RpcNodeHttpResponse<T>>(bytes.as_ref()) {
            Ok(parsed) => {
                if let Some(error) = parsed.error {
                    Err(BlockchainRpcClientError::from_rpc_error(
                        error.code,
                        &error.message,
                    ))
                } else if let Some(result) = parsed.result {
                    Ok(result)
                } else {
                    Err(BlockchainRpcClientError::MessageParsingError(
                        "Response missing both result and error fields".to_string(),
                    ))
                }
            }
            Err(e) => {
                let raw_response = String::from_utf8_lossy(bytes.as_ref());
                let preview = if raw_response.len() > RESPONSE_PREVIEW_LEN {
                    format!(
                        "{}... (truncated, {} bytes total)",
                        raw_response
                            .chars()
                            .take(RESPONSE_PREVIEW_LEN)
                            .collect::<String>(),
                        raw_response.len()
                    )
                } else {
                    raw_response.to_string()
                };

                Err(BlockchainRpcClientError::MessageParsingError(format!(
                    "Failed to parse RPC response: {e}\nRaw response: {preview}"
                )))
            }
        }
    }
}

fn map_transport_error(e: &reqwest::Error) -> BlockchainRpcClientError {
    if e.is_timeout() {
        BlockchainRpcClientError::Timeout(e.to_string())
    } else {
        BlockchainRpcClientError::ClientError(e.to_string())
    }
}

#[async_trait::async_trait]
impl RpcClient for HttpRpcClient {
    fn url(&self) -> &str {
        &self.http_rpc_url
    }

    async fn network_id(&self) -> Result<String, BlockchainRpcClientError> {
        let request = self.construct_rpc_request("net_version", serde_json::json!([]));
        // Some nodes answer with a number rather than the specified decimal string.
        let value = self.execute_rpc::<serde_json::Value>(request).await?;
        match value {
            serde_json::Value::String(id) => Ok(id),
            serde_json::Value::Number(id) => Ok(id.to_string()),
            other => Err(BlockchainRpcClientError::MessageParsingError(format!(
                "Unexpected net_version result: {other}"
            ))),
        }
    }

    async fn call(
        &self,
        to: &Address,
        call_data: &[u8],
    ) -> Result<Vec<u8>, BlockchainRpcClientError> {
        let request = self.construct_eth_call(to, call_data);
        let encoded_response = self.execute_rpc::<String>(request).await?;
        decode_hex_response(&encoded_response)
    }

    async fn get_balance(&self, address: &Address) -> Result<U256, BlockchainRpcClientError> {
        let request = self.construct_rpc_request(
            "eth_getBalance",
            serde_json::json!([address.to_string(), BlockTag::Latest.as_ref()]),
        );
        let quantity = self.execute_rpc::<String>(request).await?;
        parse_hex_quantity(&quantity)
    }

    async fn get_storage_at(
        &self,
        address: &Address,
        slot: B256,
    ) -> Result<B256, BlockchainRpcClientError> {
        let request = self.construct_rpc_request(
            "eth_getStorageAt",
            serde_json::json!([address.to_string(), slot.to_string(), BlockTag::Latest.as_ref()]),
        );
        let word = self.execute_rpc::<String>(request).await?;
        parse_storage_word(&word)
    }

    async fn get_transaction_count(
        &self,
        address: &Address,
        block: BlockTag,
    ) -> Result<U256, BlockchainRpcClientError> {
        let request = self.construct_rpc_request(
            "eth_getTransactionCount",
            serde_json::json!([address.to_string(), block.as_ref()]),
        );
        let quantity = self.execute_rpc::<String>(request).await?;
        parse_hex_quantity(&quantity)
    }

    async fn send_transaction(
        &self,
        tx: &TransactionRequest,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        let tx_json = serde_json::to_value(tx).map_err(|e| {
            BlockchainRpcClientError::InvalidParameters(format!(
                "Failed to serialize transaction: {e}"
            ))
        })?;
        let request = self.construct_rpc_request("eth_sendTransaction", serde_json::json!([tx_json]));
        let hash = self.execute_rpc::<String>(request).await?;

        TxHash::from_str(&hash).map_err(|e| {
            BlockchainRpcClientError::MessageParsingError(format!(
                "Invalid transaction hash '{hash}': {e}"
            ))
        })
    }
}
