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

//! Bindings for the whitelist (KYC and lockup) contract attached to a DAT.

use alloy::{
    primitives::{Address, TxHash, U256},
    sol,
};
use corg_model::org::{AccountWhitelistInfo, WhitelistInfo};

use crate::{
    contracts::base::BaseContract,
    rpc::{SharedRpcClient, error::BlockchainRpcClientError, types::TxParams},
};

sol! {
    interface IWhitelist {
        function approved(address account) external view returns (bool);
        function approve(address account, bool isApproved) external;

        function authorizedWalletToUserId(address wallet) external view returns (address);
        function getAuthorizedUserIdInfo(address userId) external view returns (
            uint256 jurisdictionId,
            uint256 totalTokensLocked,
            uint256 startIndex,
            uint256 endIndex
        );
        function approveNewUsers(address[] accounts, uint256[] jurisdictionIds) external;

        function owner() external view returns (address);
        function startDate() external view returns (uint256);
        function lockupGranularity() external view returns (uint256);
        function isOperator(address account) external view returns (bool);
        function addOperator(address account) external;
        function configWhitelist(uint256 newStartDate, uint256 newLockupGranularity) external;
        function transferOwnership(address newOwner) external;
    }
}

/// Interface for interacting with whitelist contracts.
#[derive(Debug, Clone)]
pub struct WhitelistContract {
    base: BaseContract,
}

impl WhitelistContract {
    /// Creates a new whitelist contract interface with the specified RPC client.
    #[must_use]
    pub const fn new(client: SharedRpcClient) -> Self {
        Self {
            base: BaseContract::new(client),
        }
    }

    /// Fetches the whitelist configuration (owner, start date, lockup granularity).
    ///
    /// # Errors
    ///
    /// Returns an error if any of the calls fail.
    pub async fn fetch_config(
        &self,
        whitelist: &Address,
    ) -> Result<WhitelistInfo, BlockchainRpcClientError> {
        let (owner, start_date, lockup_granularity) = tokio::try_join!(
            self.base.execute_call(whitelist, &IWhitelist::ownerCall {}),
            self.base.execute_call(whitelist, &IWhitelist::startDateCall {}),
            self.base
                .execute_call(whitelist, &IWhitelist::lockupGranularityCall {}),
        )?;

        Ok(WhitelistInfo {
            owner: Some(owner),
            start_date,
            lockup_granularity,
        })
    }

    /// Fetches the whitelist status of `account`.
    ///
    /// Whitelists without user ids only expose `approved(address)`, which is used as a fallback.
    ///
    /// # Errors
    ///
    /// Returns the legacy call's error when both interfaces fail.
    pub async fn fetch_account_info(
        &self,
        whitelist: &Address,
        account: Address,
    ) -> Result<AccountWhitelistInfo, BlockchainRpcClientError> {
        match self.fetch_user_info(whitelist, account).await {
            Ok(info) => Ok(info),
            Err(e) => {
                tracing::debug!("User id lookup failed on {whitelist}, trying approved(): {e}");
                let approved = self
                    .base
                    .execute_call(whitelist, &IWhitelist::approvedCall { account })
                    .await?;
                Ok(AccountWhitelistInfo {
                    kyc_approved: approved,
                    ..Default::default()
                })
            }
        }
    }

    async fn fetch_user_info(
        &self,
        whitelist: &Address,
        account: Address,
    ) -> Result<AccountWhitelistInfo, BlockchainRpcClientError> {
        let user_id = self
            .base
            .execute_call(
                whitelist,
                &IWhitelist::authorizedWalletToUserIdCall { wallet: account },
            )
            .await?;

        if user_id.is_zero() {
            return Ok(AccountWhitelistInfo::default());
        }

        let info = self
            .base
            .execute_call(
                whitelist,
                &IWhitelist::getAuthorizedUserIdInfoCall { userId: user_id },
            )
            .await?;

        Ok(AccountWhitelistInfo {
            user_id: Some(user_id),
            kyc_approved: !info.jurisdictionId.is_zero(),
            jurisdiction_id: info.jurisdictionId,
            total_tokens_locked: info.totalTokensLocked,
            start_index: info.startIndex,
            end_index: info.endIndex,
        })
    }

    /// Returns whether `account` is a whitelist operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn is_operator(
        &self,
        whitelist: &Address,
        account: Address,
    ) -> Result<bool, BlockchainRpcClientError> {
        self.base
            .execute_call(whitelist, &IWhitelist::isOperatorCall { account })
            .await
    }

    /// Submits the legacy `approve(account, isApproved)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub async fn approve(
        &self,
        whitelist: &Address,
        account: Address,
        is_approved: bool,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        let call = IWhitelist::approveCall {
            account,
            isApproved: is_approved,
        };
        self.base.send_call(whitelist, &call, params).await
    }

    /// Submits `approveNewUsers(accounts, jurisdictionIds)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lists differ in length or the node rejects the transaction.
    pub async fn approve_new_users(
        &self,
        whitelist: &Address,
        accounts: Vec<Address>,
        jurisdiction_ids: Vec<U256>,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        if accounts.len() != jurisdiction_ids.len() {
            return Err(BlockchainRpcClientError::InvalidParameters(format!(
                "{} accounts but {} jurisdiction ids",
                accounts.len(),
                jurisdiction_ids.len()
            )));
        }

        let call = IWhitelist::approveNewUsersCall {
            accounts,
            jurisdictionIds: jurisdiction_ids,
        };
        self.base.send_call(whitelist, &call, params).await
    }

    /// Submits `addOperator(account)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub async fn add_operator(
        &self,
        whitelist: &Address,
        account: Address,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        self.base
            .send_call(whitelist, &IWhitelist::addOperatorCall { account }, params)
            .await
    }

    /// Submits `configWhitelist(startDate, lockupGranularity)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub async fn config_whitelist(
        &self,
        whitelist: &Address,
        start_date: U256,
        lockup_granularity: U256,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        let call = IWhitelist::configWhitelistCall {
            newStartDate: start_date,
            newLockupGranularity: lockup_granularity,
        };
        self.base.send_call(whitelist, &call, params).await
    }

    /// Submits `transferOwnership(newOwner)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub async fn transfer_ownership(
        &self,
        whitelist: &Address,
        new_owner: Address,
        params: TxParams,
    ) -> Result<TxHash, BlockchainRpcClientError> {
        self.base
            .send_call(
                whitelist,
                &IWhitelist::transferOwnershipCall {
                    newOwner: new_owner,
                },
                params,
            )
            .await
    }
}
