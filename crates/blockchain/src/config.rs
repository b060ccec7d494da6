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

use std::time::Duration;

use alloy::primitives::{Address, U256};

/// Gas limit attached to every write unless overridden.
pub const DEFAULT_GAS: u64 = 500_000;

/// Configuration for [`Corg`](crate::corg::Corg) facades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorgConfig {
    /// The gas limit attached to transactions.
    pub default_gas: U256,
    /// The gas price attached to transactions, `None` lets the node decide.
    pub gas_price: Option<U256>,
    /// The name reported for the native asset in native-asset mode.
    pub native_currency_name: String,
    /// The symbol reported for the native asset in native-asset mode.
    pub native_currency_symbol: String,
    /// The timeout applied to every RPC request on connections opened by the client.
    pub request_timeout: Duration,
}

impl CorgConfig {
    /// Creates a new [`CorgConfig`] instance.
    #[must_use]
    pub fn new(
        default_gas: Option<U256>,
        gas_price: Option<U256>,
        native_currency_name: Option<String>,
        native_currency_symbol: Option<String>,
        request_timeout: Option<Duration>,
    ) -> Self {
        let default = Self::default();
        Self {
            default_gas: default_gas.unwrap_or(default.default_gas),
            gas_price,
            native_currency_name: native_currency_name.unwrap_or(default.native_currency_name),
            native_currency_symbol: native_currency_symbol
                .unwrap_or(default.native_currency_symbol),
            request_timeout: request_timeout.unwrap_or(default.request_timeout),
        }
    }
}

impl Default for CorgConfig {
    fn default() -> Self {
        Self {
            default_gas: U256::from(DEFAULT_GAS),
            gas_price: None,
            native_currency_name: "Ether".to_string(),
            native_currency_symbol: "ETH".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Configuration for contract discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Upper bound on the time spent probing a single network; a timeout counts as no match.
    pub probe_timeout: Duration,
}

impl DiscoveryConfig {
    /// Creates a new [`DiscoveryConfig`] instance.
    #[must_use]
    pub fn new(probe_timeout: Option<Duration>) -> Self {
        Self {
            probe_timeout: probe_timeout.unwrap_or(Self::default().probe_timeout),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(10),
        }
    }
}

/// Per-call overrides for transactions submitted by the facade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// The sender, defaults to the address of the loaded account snapshot.
    pub from: Option<Address>,
    pub gas: Option<U256>,
    pub gas_price: Option<U256>,
    pub nonce: Option<U256>,
    /// The native value attached, overriding the value derived for native-asset buys and payments.
    pub value: Option<U256>,
}

impl CallOptions {
    #[must_use]
    pub fn from(from: Address) -> Self {
        Self {
            from: Some(from),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_corg_config_defaults() {
        let config = CorgConfig::new(None, None, None, None, None);
        assert_eq!(config, CorgConfig::default());
        assert_eq!(config.default_gas, U256::from(500_000u64));
        assert_eq!(config.native_currency_symbol, "ETH");
    }

    #[rstest]
    fn test_corg_config_overrides() {
        let config = CorgConfig::new(
            Some(U256::from(1u8)),
            Some(U256::from(2u8)),
            Some("Matic".to_string()),
            Some("MATIC".to_string()),
            Some(Duration::from_secs(5)),
        );
        assert_eq!(config.default_gas, U256::from(1u8));
        assert_eq!(config.gas_price, Some(U256::from(2u8)));
        assert_eq!(config.native_currency_name, "Matic");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn test_discovery_config() {
        assert_eq!(DiscoveryConfig::default().probe_timeout, Duration::from_secs(10));
        assert_eq!(
            DiscoveryConfig::new(Some(Duration::from_millis(250))).probe_timeout,
            Duration::from_millis(250)
        );
    }
}
