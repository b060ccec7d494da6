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

//! Candidate networks searched during contract discovery.
//!
//! The registry is an *ordered* list: when the same address hosts a compatible contract on
//! more than one network, the entry listed first wins.

use std::{
    collections::HashSet,
    fmt::{Display, Formatter},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

/// A single candidate network endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkEndpoint {
    /// The unique name of the network (e.g. `mainnet`).
    pub name: String,
    /// The JSON-RPC provider URI used to open a fresh connection.
    #[serde(alias = "provider")]
    pub provider_uri: String,
}

pub type SharedNetworkEndpoint = Arc<NetworkEndpoint>;

impl NetworkEndpoint {
    /// Creates a new [`NetworkEndpoint`] instance.
    #[must_use]
    pub fn new(name: impl Into<String>, provider_uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider_uri: provider_uri.into(),
        }
    }
}

impl Display for NetworkEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "NetworkEndpoint(name={})", self.name)
    }
}

/// An ordered, validated list of candidate networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRegistry {
    networks: Vec<SharedNetworkEndpoint>,
}

#[derive(Deserialize)]
struct RegistryFile {
    networks: Vec<NetworkEndpoint>,
}

impl NetworkRegistry {
    /// Creates a new [`NetworkRegistry`] preserving the order of `networks`.
    ///
    /// # Errors
    ///
    /// Returns an error if a name or provider URI is empty, or if two entries share a name.
    pub fn new(networks: Vec<NetworkEndpoint>) -> anyhow::Result<Self> {
        let mut names = HashSet::with_capacity(networks.len());
        for network in &networks {
            anyhow::ensure!(!network.name.trim().is_empty(), "Network name was empty");
            anyhow::ensure!(
                !network.provider_uri.trim().is_empty(),
                "Provider URI for network '{}' was empty",
                network.name
            );
            anyhow::ensure!(
                names.insert(network.name.as_str()),
                "Duplicate network name '{}'",
                network.name
            );
        }

        Ok(Self {
            networks: networks.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parses a registry from TOML with a top-level `[[networks]]` array.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or fails validation.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let file: RegistryFile = toml::from_str(s)?;
        Self::new(file.networks)
    }

    /// Parses a registry from a JSON array of `{name, provider_uri}` objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or fails validation.
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let networks: Vec<NetworkEndpoint> = serde_json::from_str(s)?;
        Self::new(networks)
    }

    /// Returns a registry with the local development node only.
    #[must_use]
    pub fn local() -> Self {
        Self {
            networks: vec![Arc::new(NetworkEndpoint::new(
                "local",
                "http://localhost:8545",
            ))],
        }
    }

    /// Returns the default registry: the local node followed by the Infura hosted networks.
    #[must_use]
    pub fn default_networks(project_id: &str) -> Self {
        let hosted = ["mainnet", "ropsten"].map(|name| {
            Arc::new(NetworkEndpoint::new(
                name,
                format!("https://{name}.infura.io/v3/{project_id}"),
            ))
        });

        let mut networks = Self::local().networks;
        networks.extend(hosted);
        Self { networks }
    }

    /// Returns a new registry holding only the networks matching `predicate`, in order.
    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&NetworkEndpoint) -> bool) -> Self {
        Self {
            networks: self
                .networks
                .iter()
                .filter(|network| predicate(network))
                .cloned()
                .collect(),
        }
    }

    /// Returns the network with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SharedNetworkEndpoint> {
        self.networks.iter().find(|network| network.name == name)
    }

    /// Returns an iterator over the networks in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &SharedNetworkEndpoint> {
        self.networks.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_registry_preserves_order() {
        let registry = NetworkRegistry::new(vec![
            NetworkEndpoint::new("b", "http://b"),
            NetworkEndpoint::new("a", "http://a"),
        ])
        .unwrap();

        let names: Vec<&str> = registry.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[rstest]
    fn test_registry_rejects_duplicate_names() {
        let result = NetworkRegistry::new(vec![
            NetworkEndpoint::new("local", "http://a"),
            NetworkEndpoint::new("local", "http://b"),
        ]);
        assert!(result.unwrap_err().to_string().contains("Duplicate"));
    }

    #[rstest]
    #[case("", "http://a")]
    #[case("local", "  ")]
    fn test_registry_rejects_empty_fields(#[case] name: &str, #[case] uri: &str) {
        assert!(NetworkRegistry::new(vec![NetworkEndpoint::new(name, uri)]).is_err());
    }

    #[rstest]
    fn test_from_toml_str() {
        let registry = NetworkRegistry::from_toml_str(
            r#"
            [[networks]]
            name = "local"
            provider_uri = "http://localhost:8545"

            [[networks]]
            name = "mainnet"
            provider = "https://mainnet.example.org"
            "#,
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("mainnet").unwrap().provider_uri,
            "https://mainnet.example.org"
        );
    }

    #[rstest]
    fn test_from_json_str() {
        let registry = NetworkRegistry::from_json_str(
            r#"[{"name":"local","provider":"http://localhost:8545"}]"#,
        )
        .unwrap();
        assert_eq!(registry.iter().next().unwrap().name, "local");
    }

    #[rstest]
    fn test_default_networks() {
        let registry = NetworkRegistry::default_networks("abc");
        let names: Vec<&str> = registry.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["local", "mainnet", "ropsten"]);
        assert_eq!(
            registry.get("ropsten").unwrap().provider_uri,
            "https://ropsten.infura.io/v3/abc"
        );
    }

    #[rstest]
    fn test_filter_keeps_order() {
        let registry = NetworkRegistry::default_networks("abc").filter(|n| n.name != "mainnet");
        let names: Vec<&str> = registry.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["local", "ropsten"]);
    }
}
