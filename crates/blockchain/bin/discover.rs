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

//! Locates a DAT across the configured networks and prints its state.
//!
//! Usage: `corg-discover <dat-address> [networks.toml]`
//!
//! Without a networks file the registry is built from `INFURA_PROJECT_ID`, or holds only the
//! local development node when that variable is unset. The caller's own connection is read
//! from `CORG_PROVIDER_URI` (default `http://localhost:8545`).

use std::{env, sync::Arc};

use alloy::primitives::Address;
use corg_blockchain::{
    CorgConfig, CorgNetworkSearch, DiscoveryConfig, HttpRpcClient, HttpRpcClientFactory,
    SharedRpcClient, logging::init_tracing,
};
use corg_model::network::NetworkRegistry;

const DEFAULT_PROVIDER_URI: &str = "http://localhost:8545";

fn load_registry(path: Option<&String>) -> anyhow::Result<NetworkRegistry> {
    if let Some(path) = path {
        tracing::info!("Loading networks from {path}");
        return NetworkRegistry::from_toml_str(&std::fs::read_to_string(path)?);
    }

    match env::var("INFURA_PROJECT_ID") {
        Ok(project_id) => Ok(NetworkRegistry::default_networks(&project_id)),
        Err(_) => {
            tracing::warn!("INFURA_PROJECT_ID not set, searching the local node only");
            Ok(NetworkRegistry::local())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let args: Vec<String> = env::args().collect();
    let Some(address) = args.get(1) else {
        anyhow::bail!("Usage: corg-discover <dat-address> [networks.toml]");
    };
    let address: Address = address.parse()?;

    let registry = load_registry(args.get(2))?;
    let config = CorgConfig::default();
    let provider_uri =
        env::var("CORG_PROVIDER_URI").unwrap_or_else(|_| DEFAULT_PROVIDER_URI.to_string());
    let native: SharedRpcClient = Arc::new(HttpRpcClient::new(
        provider_uri,
        config.request_timeout,
    )?);

    let search = CorgNetworkSearch::new(
        registry,
        Arc::new(HttpRpcClientFactory::new(config.request_timeout)),
        DiscoveryConfig::default(),
        config,
    );

    let corg = search.discover_required(&native, address).await?;
    let metadata = corg.init().await?;
    let info = corg.refresh_org_info().await?;

    if let Some(network) = corg.network() {
        println!(
            "Network: {} (native connection: {})",
            network.name,
            network.is_network_match
        );
    }
    println!(
        "{} ({}) version {}",
        info.name,
        info.symbol,
        metadata.version.as_deref().unwrap_or("unknown")
    );
    println!(
        "Currency: {} ({}), {} decimals",
        metadata.currency.name,
        metadata.currency.symbol,
        metadata.currency.decimals
    );
    println!("State: {}", info.state);
    println!(
        "Supply: {} total, {} burned",
        info.total_supply,
        info.burned_supply
    );
    println!("Mint price: {}", info.metrics.mint_price);
    println!("Redeem price: {}", info.metrics.redeem_price);
    println!("Market cap: {}", info.metrics.market_cap);
    if let Some(sentiment) = &info.metrics.market_sentiment {
        println!("Market sentiment: {sentiment}");
    }

    Ok(())
}
