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

//! Bindings for the decentralized autonomous trust (DAT), the bonding-curve contract
//! at the heart of a continuous organization.

use alloy::{
    primitives::{Address, TxHash, U256},
    sol,
    sol_types::SolCall,
};
use corg_model::enums::LifecycleState;

use crate::{
    contracts::base::BaseContract,
    rpc::{SharedRpcClient, error::BlockchainRpcClientError, types::TxParams},
};

sol! {
    interface IDat {
        function decimals() external view returns (uint8);
        function name() external view returns (string);
        function symbol() external view returns (string);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function burnedSupply() external view returns (uint256);
        function beneficiary() external view returns (address);
        function control() external view returns (address);
        function feeCollector() external view returns (address);
        function autoBurn() external view returns (bool);
        function buybackReserve() external view returns (uint256);
        function feeBasisPoints() external view returns (uint256);
        function revenueCommitmentBasisPoints() external view returns (uint256);
        function investmentReserveBasisPoints() external view returns (uint256);
        function minInvestment() external view returns (uint256);
        function openUntilAtLeast() external view returns (uint256);
        function state() external view returns (uint256);
        function buySlopeNum() external view returns (uint256);
        function buySlopeDen() external view returns (uint256);
        function initGoal() external view returns (uint256);
        function initReserve() external view returns (uint256);
        function currency() external view returns (address);
        function currencyAddress() external view returns (address);
        function whitelist() external view returns (address);
        function whitelistAddress() external view returns (address);
        function version() external view returns (string);

        function estimateBuyValue(uint256 currencyValue) external view returns (uint256);
        function estimateSellValue(uint256 quantityToSell) external view returns (uint256);
        function estimatePayValue(uint256 currencyValue) external view returns (uint256);

        function buy(address to, uint256 currencyValue, uint256 minTokensBought) external payable;
        function sell(address to, uint256 quantityToSell, uint256 minCurrencyReturned) external;
        function pay(address to, uint256 currencyValue) external payable;
        function burn(uint256 amount) external;
    }
}

/// Result of a sell estimate.
///
/// Selling more than the circulating supply makes the contract revert, which is an expected
/// outcome for user supplied amounts rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SellEstimate<T = U256> {
    Value(T),
    ExceedsSupply,
}

impl<T> SellEstimate<T> {
    /// Maps the estimated value, keeping [`SellEstimate::ExceedsSupply`] as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SellEstimate<U> {
        match self {
            Self::Value(value) => SellEstimate::Value(f(value)),
            Self::ExceedsSupply => SellEstimate::ExceedsSupply,
        }
    }

    /// Returns the estimated value, or zero when the amount exceeds the supply.
    pub fn value_or_zero(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Value(value) => value,
            Self::ExceedsSupply => T::default(),
        }
    }
}

/// Interface for interacting with DAT contracts.
#[derive(Debug, Clone)]
pub struct DatContract {
    base: BaseContract,
}

impl DatContract {
    /// Creates a new DAT contract interface with the specified RPC client.
    #[must_use]
    pub const fn new(client: SharedRpcClient) -> Self {
        Self {
            base: BaseContract::new(client),
        }
    }

    /// Executes a read-only DAT call.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or its return value cannot be decoded.
    pub async fn read<C: SolCall>(
        &self,
        dat: &Address,
        call: &C,
    ) -> Result<C::Return, BlockchainRpcClientError> {
        self.base.execute_call(dat, call).await
    }

    /// Fetches the reserve currency address, falling back to the legacy `currencyAddress()`.
    ///
    /// A zero address denotes an organization funded with the native asset.
    ///
    /// # Errors
    ///
    /// Returns the legacy call's error when both calls fail.
    pub async fn currency_address(&self, dat: &Address) -> Result<Address, BlockchainRpcClientError> {
        match self.read(dat, &IDat::currencyCall {}).await {
            Ok(address) => Ok(address),
            Err(e) => {
                tracing::debug!("currency() failed on {dat}, trying currencyAddress(): {e}");
                self.read(dat, &IDat::currencyAddressCall {}).await
            }
        }
    }

    /// Fetches the whitelist address, falling back to the legacy `whitelistAddress()`.
    ///
    /// # Errors
    ///
    /// Returns the legacy call's error when both calls fail.
    pub async fn whitelist_address(
        &self,
        dat: &Address,
    ) -> Result<Address, BlockchainRpcClientError> {
        match self.read(dat, &IDat::whitelistCall {}).await {
            Ok(address) => Ok(address),
            Err(e) => {
                tracing::debug!("whitelist() failed on {dat}, trying whitelistAddress(): {e}");
                self.read(dat, &IDat::whitelistAddressCall {}).await
            }
        }
    }

    /// Fetches the lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the state id is unknown.
    pub async fn state(&self, dat: &Address) -> Result<LifecycleState, BlockchainRpcClientError> {
        let state_id = self.read(dat, &IDat::stateCall {}).await?;
        u64::try_from(state_id)
            .ok()
            .and_then(LifecycleState::from_state_id)
            .ok_or_else(|| {
                BlockchainRpcClientError::AbiDecodingError(format!("Unknown DAT state {state_id}"))
            })
    }

    /// Fetches the contract version, `None` for deployments without `version()`.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failures.
    pub async fn version(&self, dat: &Address) -> Result<Option<String>, BlockchainRpcClientError> {
        match self.read(dat, &IDat::versionCall {}).await {
            Ok(version) => Ok(Some(version)),
            Err(
                BlockchainRpcClientError::ExecutionReverted(_)
                | BlockchainRpcClientError::NoContract(_)
                | BlockchainRpcClientError::AbiDecodingError(_),
            ) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Estimates the tokens minted for `currency_value` raw currency units.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn estimate_buy_value(
        &self,
        dat: &Address,
        currency_value: U256,
    ) -> Result<U256, BlockchainRpcClientError> {
        self.read(
            dat,
            &IDat::estimateBuyValueCall {
                currencyValue: currency_value,
            },
        )
        .await
    }

    /// Estimates the currency returned for selling `quantity` raw tokens.
    ///
    /// A revert is reported as [`SellEstimate::ExceedsSupply`] only when `quantity` is above
    /// the total supply.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, including reverts with any other cause.
    pub async fn estimate_sell_value(
        &self,
        dat: &Address,
        quantity: U256,
    ) -> Result<SellEstimate, BlockchainRpcClientError> {
        let call = IDat::estimateSellValueCall {
            quantityToSell: quantity,
        };
        match self.read(dat, &call).await {
            Ok(value) => Ok(SellEstimate::Value(value)),
            Err(BlockchainRpcClientError::ExecutionReverted(reason)) => {
                let total_supply = self.read(dat, &IDat::totalSupplyCall {}).await?;
                if quantity > total_supply {
                    tracing::debug!(
                        "Sell estimate for {quantity} reverted above total supply {total_supply}"
                    );
                    Ok(SellEstimate::ExceedsSupply)
                } else {
                    Err(BlockchainRpcClientError::ExecutionReverted(reason))
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Estimates the tokens issued to the beneficiary when paying `currency_value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn estimate_pay_value(
        &self,
        dat: &Address,
        currency_value: U256,
    ) -> Result<U256, BlockchainRpcClientError> {
        self.read(
            dat,
            &IDat::estimatePayValueCall {
                currencyValue: currency_value,
            },
        )
        .await
    }

    /// Submits `buy(to, currencyValue, minTokensBought)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub async fn buy(
        &self,
        dat: &Address,
        to: Address,
        currency_value: U256,
        min_tokens_bought: U256,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        let call = IDat::buyCall {
            to,
            currencyValue: currency_value,
            minTokensBought: min_tokens_bought,
        };
        self.base.send_call(dat, &call, params).await
    }

    /// Submits `sell(to, quantityToSell, minCurrencyReturned)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub async fn sell(
        &self,
        dat: &Address,
        to: Address,
        quantity: U256,
        min_currency_returned: U256,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        let call = IDat::sellCall {
            to,
            quantityToSell: quantity,
            minCurrencyReturned: min_currency_returned,
        };
        self.base.send_call(dat, &call, params).await
    }

    /// Submits `pay(to, currencyValue)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub async fn pay(
        &self,
        dat: &Address,
        to: Address,
        currency_value: U256,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        let call = IDat::payCall {
            to,
            currencyValue: currency_value,
        };
        self.base.send_call(dat, &call, params).await
    }

    /// Submits `burn(amount)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub async fn burn(
        &self,
        dat: &Address,
        amount: U256,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        self.base
            .send_call(dat, &IDat::burnCall { amount }, params)
            .await
    }
}
