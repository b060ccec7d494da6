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

use alloy::{
    primitives::{Address, TxHash},
    sol_types::SolCall,
};

use crate::rpc::{SharedRpcClient, error::BlockchainRpcClientError, types::TxParams};

/// Base contract functionality for interacting with blockchain contracts.
///
/// This struct provides common RPC execution patterns that can be reused
/// by specific contract implementations like the DAT, ERC20 and whitelist bindings.
#[derive(Debug, Clone)]
pub struct BaseContract {
    /// The RPC client used to communicate with the blockchain node.
    client: SharedRpcClient,
}

impl BaseContract {
    /// Creates a new base contract interface with the specified RPC client.
    #[must_use]
    pub const fn new(client: SharedRpcClient) -> Self {
        Self { client }
    }

    /// Gets a reference to the RPC client.
    #[must_use]
    pub const fn client(&self) -> &SharedRpcClient {
        &self.client
    }

    /// Executes a single read-only contract call and decodes its return value.
    ///
    /// An empty response means no contract code lives at `contract_address`.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails, the target is not a contract, or decoding fails.
    pub async fn execute_call<C: SolCall>(
        &self,
        contract_address: &Address,
        call: &C,
    ) -> Result<C::Return, BlockchainRpcClientError> {
        let bytes = self
            .client
            .call(contract_address, &call.abi_encode())
            .await?;

        if bytes.is_empty() {
            return Err(BlockchainRpcClientError::NoContract(format!(
                "{contract_address} (calling {})",
                C::SIGNATURE
            )));
        }

        C::abi_decode_returns(&bytes).map_err(|e| {
            BlockchainRpcClientError::AbiDecodingError(format!(
                "Error decoding {} return value with error {e}",
                C::SIGNATURE
            ))
        })
    }

    /// Submits a state-changing call from the sender described by `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub async fn send_call<C: SolCall>(
        &self,
        contract_address: &Address,
        call: &C,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        let tx = params.into_request(*contract_address, call.abi_encode().into());

        let hash = self.client.send_transaction(&tx).await?;
        tracing::info!(
            "Submitted {} to {contract_address} from {}: {hash}",
            C::SIGNATURE,
            tx.from
        );
        Ok(hash)
    }
}
