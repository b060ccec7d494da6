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

//! EIP-1967 proxy storage slot readers.

use alloy::primitives::{Address, B256, U256, keccak256};

use crate::rpc::{SharedRpcClient, error::BlockchainRpcClientError};

pub const IMPLEMENTATION_LABEL: &str = "eip1967.proxy.implementation";
pub const ADMIN_LABEL: &str = "eip1967.proxy.admin";

/// Returns the storage slot for `label`: `keccak256(label) - 1`.
#[must_use]
pub fn slot(label: &str) -> B256 {
    let hashed = U256::from_be_slice(keccak256(label.as_bytes()).as_slice());
    B256::from(hashed - U256::from(1u8))
}

/// Extracts the address held in the low 20 bytes of a storage word, `None` when unset.
#[must_use]
pub fn word_to_address(word: B256) -> Option<Address> {
    let address = Address::from_word(word);
    (!address.is_zero()).then_some(address)
}

/// Reads the implementation and admin addresses of a transparent upgradeable proxy.
#[derive(Debug, Clone)]
pub struct ProxyContract {
    client: SharedRpcClient,
}

impl ProxyContract {
    /// Creates a new proxy reader with the specified RPC client.
    #[must_use]
    pub const fn new(client: SharedRpcClient) -> Self {
        Self { client }
    }

    /// Fetches the implementation address behind `proxy`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read fails.
    pub async fn implementation(
        &self,
        proxy: &Address,
    ) -> Result<Option<Address>, BlockchainRpcClientError> {
        self.read_slot(proxy, IMPLEMENTATION_LABEL).await
    }

    /// Fetches the admin address of `proxy`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read fails.
    pub async fn admin(&self, proxy: &Address) -> Result<Option<Address>, BlockchainRpcClientError> {
        self.read_slot(proxy, ADMIN_LABEL).await
    }

    async fn read_slot(
        &self,
        proxy: &Address,
        label: &str,
    ) -> Result<Option<Address>, BlockchainRpcClientError> {
        let word = self.client.get_storage_at(proxy, slot(label)).await?;
        Ok(word_to_address(word))
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        IMPLEMENTATION_LABEL,
        b256!("0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc")
    )]
    #[case(
        ADMIN_LABEL,
        b256!("0xb53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103")
    )]
    fn test_slot(#[case] label: &str, #[case] expected: B256) {
        assert_eq!(slot(label), expected);
    }

    #[rstest]
    fn test_word_to_address() {
        let word = b256!("0x000000000000000000000000a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
        assert_eq!(
            word_to_address(word),
            Some(address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"))
        );
        assert_eq!(word_to_address(B256::ZERO), None);
    }
}
