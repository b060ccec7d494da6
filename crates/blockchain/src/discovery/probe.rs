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

use corg_model::network::NetworkEndpoint;

use crate::{factories::RpcClientFactory, rpc::SharedRpcClient};

/// A connection to a candidate network, chosen by [`ConnectionProbe::connect`].
#[derive(Debug, Clone)]
pub struct NetworkConnection {
    pub name: String,
    pub client: SharedRpcClient,
    /// Whether `client` is the caller's own connection.
    pub is_network_match: bool,
}

/// Decides whether the caller's connection already targets a candidate network.
#[derive(Debug, Clone)]
pub struct ConnectionProbe {
    factory: Arc<dyn RpcClientFactory>,
}

impl ConnectionProbe {
    /// Creates a new [`ConnectionProbe`] instance opening trial connections with `factory`.
    #[must_use]
    pub fn new(factory: Arc<dyn RpcClientFactory>) -> Self {
        Self { factory }
    }

    /// Returns whether `candidate` and `native` report the same network identifier.
    ///
    /// Any RPC failure on either side is a non-match.
    pub async fn matches(&self, candidate: &SharedRpcClient, native: &SharedRpcClient) -> bool {
        let (candidate_id, native_id) = tokio::join!(candidate.network_id(), native.network_id());

        match (candidate_id, native_id) {
            (Ok(candidate_id), Ok(native_id)) => candidate_id == native_id,
            (Err(e), _) | (_, Err(e)) => {
                tracing::debug!("Network id query failed on {}: {e}", candidate.url());
                false
            }
        }
    }

    /// Opens a trial connection to `endpoint` and returns the caller's own connection when
    /// it targets the same network, the trial connection otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the trial connection cannot be constructed.
    pub async fn connect(
        &self,
        endpoint: &NetworkEndpoint,
        native: &SharedRpcClient,
    ) -> anyhow::Result<NetworkConnection> {
        let candidate = self.factory.create(endpoint).inspect_err(|e| {
            tracing::warn!("Cannot open a connection to '{}': {e}", endpoint.name);
        })?;
        let is_network_match = self.matches(&candidate, native).await;
        tracing::debug!("Network '{}' matches native connection: {is_network_match}", endpoint.name);

        let client = if is_network_match {
            native.clone()
        } else {
            candidate
        };

        Ok(NetworkConnection {
            name: endpoint.name.clone(),
            client,
            is_network_match,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        factories::HttpRpcClientFactory,
        stubs::{MockChain, MockRpcClientFactory},
    };

    fn factory() -> MockRpcClientFactory {
        MockRpcClientFactory::new()
            .with_network("local", MockChain::new("1337"))
            .with_network("mainnet", MockChain::new("1"))
            .with_network("broken", MockChain::new("1"))
            .with_failure("broken")
    }

    #[rstest]
    #[tokio::test]
    async fn test_connect_reuses_native_connection_on_match() {
        let factory = factory();
        let native = factory.native_client("mainnet");
        let probe = ConnectionProbe::new(Arc::new(factory));

        let connection = probe
            .connect(&NetworkEndpoint::new("mainnet", "mock://mainnet"), &native)
            .await
            .unwrap();

        assert!(connection.is_network_match);
        assert!(Arc::ptr_eq(&connection.client, &native));
    }

    #[rstest]
    #[tokio::test]
    async fn test_connect_opens_fresh_connection_on_mismatch() {
        let factory = factory();
        let native = factory.native_client("mainnet");
        let probe = ConnectionProbe::new(Arc::new(factory));

        let connection = probe
            .connect(&NetworkEndpoint::new("local", "mock://local"), &native)
            .await
            .unwrap();

        assert!(!connection.is_network_match);
        assert_eq!(connection.client.url(), "mock://local");
    }

    #[rstest]
    #[tokio::test]
    async fn test_failed_network_id_is_not_a_match() {
        let factory = factory();
        let native = factory.native_client("mainnet");
        let broken = factory.native_client("broken");
        let probe = ConnectionProbe::new(Arc::new(factory));

        // Same network id on paper, but the query fails.
        assert!(!probe.matches(&broken, &native).await);
        assert!(!probe.matches(&native, &broken).await);
    }

    #[rstest]
    #[tokio::test]
    async fn test_connect_fails_for_unknown_endpoint() {
        let factory = factory();
        let native = factory.native_client("mainnet");
        let probe = ConnectionProbe::new(Arc::new(factory));

        assert!(
            probe
                .connect(&NetworkEndpoint::new("ropsten", "mock://ropsten"), &native)
                .await
                .is_err()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_connect_fails_for_websocket_provider() {
        let native = factory().native_client("mainnet");
        let probe = ConnectionProbe::new(Arc::new(HttpRpcClientFactory::default()));

        let result = probe
            .connect(
                &NetworkEndpoint::new("mainnet", "wss://mainnet.infura.io/ws/v3/demo"),
                &native,
            )
            .await;

        assert!(result.is_err());
    }
}
