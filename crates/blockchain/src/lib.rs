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

//! Client for continuous organization (bonding-curve) contracts on EVM networks.
//!
//! The `corg-blockchain` crate provides:
//!
//! - A JSON-RPC client abstraction with an HTTP implementation.
//! - Static ABI bindings for the DAT, its ERC20 reserve currency and its whitelist.
//! - Multi-network contract discovery, probing every candidate network concurrently and
//!   choosing the first match in registry order.
//! - The [`Corg`] facade holding metadata, organization and account snapshots, and
//!   building buy, sell, pay and burn transactions.
//!
//! # Feature flags
//!
//! - `stubs`: Enables a mock RPC client emulating the contracts, for use in testing scenarios.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod contracts;
pub mod corg;
pub mod discovery;
pub mod error;
pub mod factories;
pub mod logging;
pub mod rpc;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

// Re-exports
pub use crate::{
    config::{CallOptions, CorgConfig, DiscoveryConfig},
    contracts::dat::SellEstimate,
    corg::{Corg, NetworkInfo},
    discovery::{probe::ConnectionProbe, search::CorgNetworkSearch},
    error::CorgError,
    factories::{HttpRpcClientFactory, RpcClientFactory},
    rpc::{RpcClient, SharedRpcClient, error::BlockchainRpcClientError, http::HttpRpcClient},
};
