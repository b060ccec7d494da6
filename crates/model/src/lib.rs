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

//! Domain model for continuous organization (bonding-curve) contracts.
//!
//! The `corg-model` crate holds the pure, I/O free part of the client:
//!
//! - The ordered network registry used for contract discovery.
//! - The numeric codec translating on-chain fixed-point integers to and from
//!   arbitrary-precision decimals.
//! - Metadata, organization and account snapshot types.
//! - The financial metrics (mint price, redeem price, market cap, market sentiment)
//!   derived from those snapshots.
//!
//! # Feature flags
//!
//! - `stubs`: Enables type stubs for use in testing scenarios.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod enums;
pub mod metrics;
pub mod network;
pub mod numeric;
pub mod org;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

pub use crate::{
    enums::LifecycleState,
    metrics::MarketSentiment,
    network::{NetworkEndpoint, NetworkRegistry},
    numeric::NumericError,
    org::{AccountInfo, AccountWhitelistInfo, CurrencyInfo, OrgInfo, OrgMetadata, WhitelistInfo},
};
