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

use std::sync::Arc;

use alloy::primitives::Address;
use corg_model::network::{NetworkEndpoint, NetworkRegistry};
use futures::future::join_all;

use crate::{
    config::{CorgConfig, DiscoveryConfig},
    contracts::dat::DatContract,
    corg::{Corg, NetworkInfo},
    discovery::probe::ConnectionProbe,
    error::CorgError,
    factories::RpcClientFactory,
    rpc::SharedRpcClient,
};

/// Locates a DAT across the networks of a registry.
///
/// Every network is probed concurrently and all probes are joined before deciding, so the
/// network returned is the first hosting the contract in registry order, whatever the
/// latency of each endpoint.
#[derive(Debug, Clone)]
pub struct CorgNetworkSearch {
    registry: NetworkRegistry,
    probe: ConnectionProbe,
    config: DiscoveryConfig,
    corg_config: CorgConfig,
}

impl CorgNetworkSearch {
    /// Creates a new [`CorgNetworkSearch`] instance.
    #[must_use]
    pub fn new(
        registry: NetworkRegistry,
        factory: Arc<dyn RpcClientFactory>,
        config: DiscoveryConfig,
        corg_config: CorgConfig,
    ) -> Self {
        Self {
            registry,
            probe: ConnectionProbe::new(factory),
            config,
            corg_config,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Returns an uninitialized facade for the DAT at `address` on the first registry network
    /// hosting it, or `None` when no network does.
    ///
    /// Probe failures and timeouts count as "not hosted here" and are only traced.
    pub async fn discover(&self, native: &SharedRpcClient, address: Address) -> Option<Corg> {
        let probes = self.registry.iter().map(|endpoint| async move {
            let probe = self.probe_network(endpoint, native, address);
            match tokio::time::timeout(self.config.probe_timeout, probe).await {
                Ok(Ok(corg)) => Some(corg),
                Ok(Err(e)) => {
                    tracing::debug!("{address} not found on '{}': {e}", endpoint.name);
                    None
                }
                Err(_) => {
                    tracing::debug!(
                        "Probe of '{}' timed out after {:?}",
                        endpoint.name,
                        self.config.probe_timeout
                    );
                    None
                }
            }
        });

        let found = join_all(probes).await.into_iter().flatten().next();
        match &found {
            Some(corg) => tracing::info!(
                "Discovered {address} on '{}'",
                corg.network().map_or("unknown", |network| network.name.as_str())
            ),
            None => tracing::info!("{address} not recognised on any supported network"),
        }
        found
    }

    /// Same as [`Self::discover`], failing when no network hosts the contract.
    ///
    /// # Errors
    ///
    /// Returns [`CorgError::DiscoveryNotFound`] if no registry network hosts a DAT at `address`.
    pub async fn discover_required(
        &self,
        native: &SharedRpcClient,
        address: Address,
    ) -> Result<Corg, CorgError> {
        self.discover(native, address)
            .await
            .ok_or(CorgError::DiscoveryNotFound(address))
    }

    async fn probe_network(
        &self,
        endpoint: &NetworkEndpoint,
        native: &SharedRpcClient,
        address: Address,
    ) -> anyhow::Result<Corg> {
        let connection = self.probe.connect(endpoint, native).await?;

        // An immutable read every DAT generation answers
        DatContract::new(connection.client.clone())
            .currency_address(&address)
            .await?;

        let network = NetworkInfo {
            name: connection.name,
            is_network_match: connection.is_network_match,
        };
        Ok(Corg::new(
            connection.client,
            address,
            Some(network),
            self.corg_config.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use corg_model::stubs::{DAT_ADDRESS, network_registry};
    use rstest::rstest;

    use super::*;
    use crate::stubs::{MockChain, MockDat, MockRpcClientFactory};

    fn search(registry: NetworkRegistry, factory: MockRpcClientFactory) -> CorgNetworkSearch {
        CorgNetworkSearch::new(
            registry,
            Arc::new(factory),
            DiscoveryConfig::new(Some(Duration::from_millis(500))),
            CorgConfig::default(),
        )
    }

    fn chain_with_dat(network_id: &str) -> MockChain {
        MockChain::new(network_id).with_dat(DAT_ADDRESS, MockDat::native())
    }

    #[rstest]
    #[tokio::test]
    async fn test_first_network_in_registry_order_wins_despite_latency(
        network_registry: NetworkRegistry,
    ) {
        let factory = MockRpcClientFactory::new()
            .with_network("local", chain_with_dat("1337"))
            .with_network("mainnet", chain_with_dat("1"))
            .with_network("ropsten", chain_with_dat("3"))
            .with_latency("local", Duration::from_millis(100));
        let native = factory.native_client("ropsten");
        let search = search(network_registry, factory);

        let corg = search.discover(&native, DAT_ADDRESS).await.unwrap();
        let network = corg.network().unwrap();
        assert_eq!(network.name, "local");
        assert!(!network.is_network_match);
    }

    #[rstest]
    #[tokio::test]
    async fn test_native_connection_reused_on_match(network_registry: NetworkRegistry) {
        let factory = MockRpcClientFactory::new()
            .with_network("local", MockChain::new("1337"))
            .with_network("mainnet", chain_with_dat("1"))
            .with_network("ropsten", MockChain::new("3"));
        let native = factory.native_client("mainnet");
        let search = search(network_registry, factory);

        let corg = search.discover(&native, DAT_ADDRESS).await.unwrap();
        assert_eq!(corg.network().unwrap().name, "mainnet");
        assert!(corg.network().unwrap().is_network_match);
        assert!(Arc::ptr_eq(corg.client(), &native));
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_address_is_not_found(network_registry: NetworkRegistry) {
        let factory = MockRpcClientFactory::new()
            .with_network("local", MockChain::new("1337"))
            .with_network("mainnet", MockChain::new("1"))
            .with_network("ropsten", MockChain::new("3"));
        let native = factory.native_client("local");
        let search = search(network_registry, factory);

        assert!(search.discover(&native, DAT_ADDRESS).await.is_none());
        assert!(matches!(
            search.discover_required(&native, DAT_ADDRESS).await,
            Err(CorgError::DiscoveryNotFound(address)) if address == DAT_ADDRESS
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_failing_and_slow_networks_are_skipped(network_registry: NetworkRegistry) {
        let factory = MockRpcClientFactory::new()
            .with_network("local", chain_with_dat("1337"))
            .with_network("mainnet", chain_with_dat("1"))
            .with_network("ropsten", chain_with_dat("3"))
            .with_failure("local")
            .with_latency("mainnet", Duration::from_secs(5));
        let native = factory.native_client("ropsten");
        let search = search(network_registry, factory);

        let corg = search.discover(&native, DAT_ADDRESS).await.unwrap();
        assert_eq!(corg.network().unwrap().name, "ropsten");
    }

    #[rstest]
    #[tokio::test]
    async fn test_unregistered_endpoint_is_skipped(network_registry: NetworkRegistry) {
        // No mock network behind "ropsten"
        let factory = MockRpcClientFactory::new()
            .with_network("local", MockChain::new("1337"))
            .with_network("mainnet", chain_with_dat("1"));
        let native = factory.native_client("local");
        let search = search(network_registry, factory);

        let corg = search.discover(&native, DAT_ADDRESS).await.unwrap();
        assert_eq!(corg.network().unwrap().name, "mainnet");
    }
}
