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

//! RPC client abstractions for blockchain network communication.
//!
//! A connection to a network is a shared [`RpcClient`] handle. The same handle may back
//! several contract facades, and is reused by discovery when the caller's native connection
//! already targets the network being probed.

use std::{fmt::Debug, sync::Arc};

use alloy::primitives::{Address, B256, TxHash, U256};

use crate::rpc::{
    error::BlockchainRpcClientError,
    types::{BlockTag, TransactionRequest},
};

pub mod error;
pub mod http;
pub mod types;
pub mod utils;

/// A shared connection to a network's JSON-RPC endpoint.
pub type SharedRpcClient = Arc<dyn RpcClient>;

/// The subset of the Ethereum JSON-RPC API used by the client.
#[async_trait::async_trait]
pub trait RpcClient: Send + Sync + Debug {
    /// Returns the endpoint this client is connected to.
    fn url(&self) -> &str;

    /// Returns the network identifier (`net_version`).
    async fn network_id(&self) -> Result<String, BlockchainRpcClientError>;

    /// Executes a read-only call against the latest block and returns the raw return data.
    async fn call(
        &self,
        to: &Address,
        call_data: &[u8],
    ) -> Result<Vec<u8>, BlockchainRpcClientError>;

    /// Returns the native asset balance of `address` in wei.
    async fn get_balance(&self, address: &Address) -> Result<U256, BlockchainRpcClientError>;

    /// Returns the 32-byte word stored at `slot` of `address`.
    async fn get_storage_at(
        &self,
        address: &Address,
        slot: B256,
    ) -> Result<B256, BlockchainRpcClientError>;

    /// Returns the number of transactions sent from `address` as of `block`.
    async fn get_transaction_count(
        &self,
        address: &Address,
        block: BlockTag,
    ) -> Result<U256, BlockchainRpcClientError>;

    /// Hands a transaction to the node for signing and submission, returning its hash.
    async fn send_transaction(
        &self,
        tx: &TransactionRequest,
    ) -> Result<TxHash, BlockchainRpcClientError>;
}
