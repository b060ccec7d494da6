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

//! Factories opening RPC connections to registry networks.

use std::{fmt::Debug, sync::Arc, time::Duration};

use corg_model::network::NetworkEndpoint;

use crate::{
    config::CorgConfig,
    rpc::{SharedRpcClient, http::HttpRpcClient},
};

/// Opens a connection to a network endpoint.
pub trait RpcClientFactory: Send + Sync + Debug {
    /// Creates a client connected to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be constructed.
    fn create(&self, endpoint: &NetworkEndpoint) -> anyhow::Result<SharedRpcClient>;
}

/// Factory for creating HTTP JSON-RPC clients.
#[derive(Debug, Clone)]
pub struct HttpRpcClientFactory {
    request_timeout: Duration,
}

impl HttpRpcClientFactory {
    /// Creates a new [`HttpRpcClientFactory`] instance.
    #[must_use]
    pub const fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }
}

impl Default for HttpRpcClientFactory {
    fn default() -> Self {
        Self::new(CorgConfig::default().request_timeout)
    }
}

impl RpcClientFactory for HttpRpcClientFactory {
    fn create(&self, endpoint: &NetworkEndpoint) -> anyhow::Result<SharedRpcClient> {
        let url = reqwest::Url::parse(&endpoint.provider_uri).map_err(|e| {
            anyhow::anyhow!(
                "Invalid provider URI '{}' for network '{}': {e}",
                endpoint.provider_uri,
                endpoint.name
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!(
                "Unsupported provider scheme '{}' for network '{}', expected http or https",
                url.scheme(),
                endpoint.name
            );
        }

        let client = HttpRpcClient::new(endpoint.provider_uri.clone(), self.request_timeout)?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use corg_model::network::NetworkRegistry;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_http_factory_creates_client_for_endpoint() {
        let factory = HttpRpcClientFactory::default();
        let endpoint = NetworkEndpoint::new("local", "http://localhost:8545");

        let client = factory.create(&endpoint).unwrap();
        assert_eq!(client.url(), "http://localhost:8545");
    }

    #[rstest]
    #[case("https://mainnet.infura.io/v3/project")]
    #[case("HTTP://127.0.0.1:7545")]
    fn test_http_factory_accepts_http_schemes(#[case] provider_uri: &str) {
        let factory = HttpRpcClientFactory::default();
        assert!(factory.create(&NetworkEndpoint::new("net", provider_uri)).is_ok());
    }

    #[rstest]
    fn test_http_factory_rejects_websocket_providers() {
        let registry = NetworkRegistry::from_json_str(
            r#"[
                {"name": "local", "provider": "ws://localhost:8545"},
                {"name": "mainnet", "provider": "wss://mainnet.infura.io/ws/v3/project"},
                {"name": "ropsten", "provider": "wss://ropsten.infura.io/ws/v3/project"}
            ]"#,
        )
        .unwrap();
        let factory = HttpRpcClientFactory::default();

        for endpoint in registry.iter() {
            let err = factory.create(endpoint).unwrap_err();
            assert!(
                err.to_string().contains("Unsupported provider scheme"),
                "{endpoint}: {err}"
            );
        }
    }

    #[rstest]
    fn test_http_factory_rejects_malformed_uri() {
        let factory = HttpRpcClientFactory::default();
        assert!(
            factory
                .create(&NetworkEndpoint::new("local", "not a url"))
                .is_err()
        );
    }
}
