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

use alloy::primitives::Address;
use corg_model::numeric::NumericError;
use thiserror::Error;

use crate::rpc::error::BlockchainRpcClientError;

/// Errors surfaced by discovery and the [`Corg`](crate::corg::Corg) facade.
#[derive(Debug, Error)]
pub enum CorgError {
    /// The address hosts no compatible contract on any candidate network.
    #[error("Contract {0} not recognised on any supported network")]
    DiscoveryNotFound(Address),
    /// A read required to build the metadata snapshot failed.
    #[error("Failed to load metadata: {0}")]
    MetadataLoad(#[source] BlockchainRpcClientError),
    /// A metadata value was read but cannot be interpreted, such as a zero slope denominator.
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(#[source] NumericError),
    /// The estimate for a buy or sell came back as zero.
    #[error("0 expected value")]
    ZeroExpectedValue,
    #[error(transparent)]
    InvalidNumericInput(#[from] NumericError),
    /// An argument other than an amount was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The operation needs the metadata snapshot and `init` has not completed.
    #[error("Facade not initialized, call `init` first")]
    NotInitialized,
    /// No sender was given and no account snapshot is loaded.
    #[error("No default account, refresh account info or pass a sender")]
    NoDefaultAccount,
    /// The operation only applies to ERC20 reserve currencies.
    #[error("`{0}` is not available for organizations funded with the native asset")]
    NativeCurrency(&'static str),
    #[error(transparent)]
    Rpc(#[from] BlockchainRpcClientError),
}
