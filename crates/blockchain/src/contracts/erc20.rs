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
    primitives::{Address, B256, TxHash, U256},
    sol,
};

use crate::{
    contracts::base::BaseContract,
    rpc::{SharedRpcClient, error::BlockchainRpcClientError, types::TxParams},
};

sol! {
    contract ERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
    }
}

// Early tokens (e.g. SAI, MKR) return `bytes32` from `name()` and `symbol()`.
sol! {
    contract ERC20Bytes32 {
        function name() external view returns (bytes32);
        function symbol() external view returns (bytes32);
    }
}

/// Represents the essential metadata information for an ERC20 token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// The full name of the token.
    pub name: String,
    /// The ticker symbol of the token.
    pub symbol: String,
    /// The number of decimal places the token uses for representing fractional amounts.
    pub decimals: u8,
}

/// Interface for interacting with ERC20 token contracts on a blockchain.
///
/// Name and symbol are read through the standard `string` interface first and, when the
/// response cannot be decoded as a string, through the legacy `bytes32` interface.
#[derive(Debug, Clone)]
pub struct Erc20Contract {
    base: BaseContract,
}

impl Erc20Contract {
    /// Creates a new ERC20 contract interface with the specified RPC client.
    #[must_use]
    pub const fn new(client: SharedRpcClient) -> Self {
        Self {
            base: BaseContract::new(client),
        }
    }

    /// Fetches complete token information (name, symbol, decimals) from an ERC20 contract.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the contract calls fail.
    pub async fn fetch_token_info(
        &self,
        token_address: &Address,
    ) -> Result<TokenInfo, BlockchainRpcClientError> {
        let (name, symbol, decimals) = tokio::try_join!(
            self.fetch_name(token_address),
            self.fetch_symbol(token_address),
            self.fetch_decimals(token_address),
        )?;

        Ok(TokenInfo {
            name,
            symbol,
            decimals,
        })
    }

    /// Fetches the name of an ERC20 token.
    ///
    /// # Errors
    ///
    /// Returns an error if neither interface variant yields a name.
    pub async fn fetch_name(&self, token_address: &Address) -> Result<String, BlockchainRpcClientError> {
        match self.base.execute_call(token_address, &ERC20::nameCall {}).await {
            Err(BlockchainRpcClientError::AbiDecodingError(e)) => {
                tracing::debug!("Decoding name() of {token_address} as string failed, trying bytes32: {e}");
                let raw = self
                    .base
                    .execute_call(token_address, &ERC20Bytes32::nameCall {})
                    .await?;
                Ok(bytes32_to_string(&raw))
            }
            result => result,
        }
    }

    /// Fetches the symbol of an ERC20 token.
    ///
    /// # Errors
    ///
    /// Returns an error if neither interface variant yields a symbol.
    pub async fn fetch_symbol(
        &self,
        token_address: &Address,
    ) -> Result<String, BlockchainRpcClientError> {
        match self.base.execute_call(token_address, &ERC20::symbolCall {}).await {
            Err(BlockchainRpcClientError::AbiDecodingError(e)) => {
                tracing::debug!("Decoding symbol() of {token_address} as string failed, trying bytes32: {e}");
                let raw = self
                    .base
                    .execute_call(token_address, &ERC20Bytes32::symbolCall {})
                    .await?;
                Ok(bytes32_to_string(&raw))
            }
            result => result,
        }
    }

    /// Fetches the number of decimals used by an ERC20 token.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn fetch_decimals(&self, token_address: &Address) -> Result<u8, BlockchainRpcClientError> {
        self.base
            .execute_call(token_address, &ERC20::decimalsCall {})
            .await
    }

    /// Fetches the raw token balance of `account`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn balance_of(
        &self,
        token_address: &Address,
        account: Address,
    ) -> Result<U256, BlockchainRpcClientError> {
        self.base
            .execute_call(token_address, &ERC20::balanceOfCall { account })
            .await
    }

    /// Fetches the raw amount `spender` may transfer on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn allowance(
        &self,
        token_address: &Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, BlockchainRpcClientError> {
        self.base
            .execute_call(token_address, &ERC20::allowanceCall { owner, spender })
            .await
    }

    /// Submits `approve(spender, value)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub async fn approve(
        &self,
        token_address: &Address,
        spender: Address,
        value: U256,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        self.base
            .send_call(token_address, &ERC20::approveCall { spender, value }, params)
            .await
    }
}

/// Decodes a `bytes32` encoded string, dropping the trailing NUL padding.
#[must_use]
pub fn bytes32_to_string(raw: &B256) -> String {
    String::from_utf8_lossy(raw.as_slice())
        .trim_end_matches('\0')
        .to_string()
}
