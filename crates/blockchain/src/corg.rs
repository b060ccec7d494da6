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

//! The stateful facade over a single continuous organization.
//!
//! A [`Corg`] goes through `init` once (and again whenever the caller wants fresh metadata),
//! then any number of organization and account refreshes interleaved with estimates and
//! writes. Each snapshot is built off to the side and swapped in whole, readers holding an
//! `Arc` from before a refresh keep a consistent view.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use arc_swap::ArcSwapOption;
use bigdecimal::{BigDecimal, Zero};
use corg_model::{
    numeric::{basis_points_to_ratio, from_decimal, ratio, to_human, to_on_chain},
    org::{AccountInfo, AccountWhitelistInfo, CurrencyInfo, OrgInfo, OrgMetadata, WhitelistInfo},
};
use rust_decimal::Decimal;

use crate::{
    config::{CallOptions, CorgConfig},
    contracts::{
        dat::{DatContract, IDat, SellEstimate},
        erc20::Erc20Contract,
        proxy::ProxyContract,
        whitelist::WhitelistContract,
    },
    error::CorgError,
    rpc::{
        SharedRpcClient,
        error::BlockchainRpcClientError,
        types::{BlockTag, TxParams},
    },
};

/// The network a facade was discovered on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub name: String,
    /// Whether the facade runs on the caller's own connection.
    pub is_network_match: bool,
}

/// Client facade for a DAT and its currency and whitelist contracts.
#[derive(Debug)]
pub struct Corg {
    client: SharedRpcClient,
    address: Address,
    network: Option<NetworkInfo>,
    config: CorgConfig,
    dat: DatContract,
    erc20: Erc20Contract,
    whitelist: WhitelistContract,
    proxy: ProxyContract,
    metadata: ArcSwapOption<OrgMetadata>,
    org_info: ArcSwapOption<OrgInfo>,
    account: ArcSwapOption<AccountInfo>,
}

impl Corg {
    /// Creates a new uninitialized [`Corg`] for the DAT at `address`.
    #[must_use]
    pub fn new(
        client: SharedRpcClient,
        address: Address,
        network: Option<NetworkInfo>,
        config: CorgConfig,
    ) -> Self {
        Self {
            dat: DatContract::new(client.clone()),
            erc20: Erc20Contract::new(client.clone()),
            whitelist: WhitelistContract::new(client.clone()),
            proxy: ProxyContract::new(client.clone()),
            client,
            address,
            network,
            config,
            metadata: ArcSwapOption::empty(),
            org_info: ArcSwapOption::empty(),
            account: ArcSwapOption::empty(),
        }
    }

    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub const fn client(&self) -> &SharedRpcClient {
        &self.client
    }

    #[must_use]
    pub const fn network(&self) -> Option<&NetworkInfo> {
        self.network.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &CorgConfig {
        &self.config
    }

    /// Returns the metadata snapshot, `None` before `init`.
    #[must_use]
    pub fn metadata(&self) -> Option<Arc<OrgMetadata>> {
        self.metadata.load_full()
    }

    /// Returns the organization snapshot of the last `refresh_org_info`.
    #[must_use]
    pub fn org_info(&self) -> Option<Arc<OrgInfo>> {
        self.org_info.load_full()
    }

    /// Returns the account snapshot of the last `refresh_account_info`.
    #[must_use]
    pub fn account_info(&self) -> Option<Arc<AccountInfo>> {
        self.account.load_full()
    }

    /// Loads the deployment-time configuration of the organization.
    ///
    /// Running it again replaces the metadata snapshot wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`CorgError::MetadataLoad`] if a required read fails, or
    /// [`CorgError::InvalidMetadata`] if the slope or a basis-point setting is out of range.
    pub async fn init(&self) -> Result<Arc<OrgMetadata>, CorgError> {
        let metadata = Arc::new(self.load_metadata().await?);
        tracing::debug!(
            "Loaded metadata of {}: currency {}, version {:?}",
            self.address,
            metadata.currency,
            metadata.version
        );

        self.metadata.store(Some(metadata.clone()));
        Ok(metadata)
    }

    async fn load_metadata(&self) -> Result<OrgMetadata, CorgError> {
        let dat = &self.address;

        let (currency_address, whitelist_address) = tokio::try_join!(
            self.dat.currency_address(dat),
            self.dat.whitelist_address(dat),
        )
        .map_err(CorgError::MetadataLoad)?;

        let (
            decimals,
            buy_slope_num,
            buy_slope_den,
            init_goal,
            init_reserve,
            investment_reserve_bps,
            revenue_commitment_bps,
            currency,
            proxy_implementation,
            proxy_admin,
            version,
        ) = tokio::try_join!(
            self.dat.read(dat, &IDat::decimalsCall {}),
            self.dat.read(dat, &IDat::buySlopeNumCall {}),
            self.dat.read(dat, &IDat::buySlopeDenCall {}),
            self.dat.read(dat, &IDat::initGoalCall {}),
            self.dat.read(dat, &IDat::initReserveCall {}),
            self.dat.read(dat, &IDat::investmentReserveBasisPointsCall {}),
            self.dat.read(dat, &IDat::revenueCommitmentBasisPointsCall {}),
            self.load_currency(currency_address),
            self.proxy.implementation(dat),
            self.proxy.admin(dat),
            self.dat.version(dat),
        )
        .map_err(CorgError::MetadataLoad)?;

        Ok(OrgMetadata {
            address: self.address,
            decimals,
            currency,
            whitelist_address,
            buy_slope_num,
            buy_slope_den,
            buy_slope: ratio(buy_slope_num, buy_slope_den)
                .map_err(CorgError::InvalidMetadata)?,
            init_goal: to_human(init_goal, decimals),
            init_reserve: to_human(init_reserve, decimals),
            investment_reserve: basis_points_to_ratio(investment_reserve_bps)
                .map_err(CorgError::InvalidMetadata)?,
            revenue_commitment: basis_points_to_ratio(revenue_commitment_bps)
                .map_err(CorgError::InvalidMetadata)?,
            proxy_implementation,
            proxy_admin,
            version,
        })
    }

    async fn load_currency(
        &self,
        currency_address: Address,
    ) -> Result<CurrencyInfo, BlockchainRpcClientError> {
        if currency_address.is_zero() {
            return Ok(CurrencyInfo::native(
                self.config.native_currency_name.clone(),
                self.config.native_currency_symbol.clone(),
            ));
        }

        let info = self.erc20.fetch_token_info(&currency_address).await?;
        Ok(CurrencyInfo::erc20(
            currency_address,
            info.decimals,
            info.name,
            info.symbol,
        ))
    }

    /// Reads the live state of the organization and swaps in a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if `init` has not completed or a read fails.
    pub async fn refresh_org_info(&self) -> Result<Arc<OrgInfo>, CorgError> {
        let metadata = self.require_metadata()?;
        let dat = &self.address;

        let (
            total_supply,
            burned_supply,
            name,
            symbol,
            beneficiary,
            control,
            fee_collector,
            auto_burn,
            buyback_reserve,
            fee_bps,
            min_investment,
            open_until_at_least,
            state,
            whitelist,
        ) = tokio::try_join!(
            self.dat.read(dat, &IDat::totalSupplyCall {}),
            self.dat.read(dat, &IDat::burnedSupplyCall {}),
            self.dat.read(dat, &IDat::nameCall {}),
            self.dat.read(dat, &IDat::symbolCall {}),
            self.dat.read(dat, &IDat::beneficiaryCall {}),
            self.dat.read(dat, &IDat::controlCall {}),
            self.dat.read(dat, &IDat::feeCollectorCall {}),
            self.dat.read(dat, &IDat::autoBurnCall {}),
            self.dat.read(dat, &IDat::buybackReserveCall {}),
            self.dat.read(dat, &IDat::feeBasisPointsCall {}),
            self.dat.read(dat, &IDat::minInvestmentCall {}),
            self.dat.read(dat, &IDat::openUntilAtLeastCall {}),
            self.dat.state(dat),
            self.load_whitelist_config(&metadata.whitelist_address),
        )?;

        let currency_decimals = metadata.currency.decimals;
        let total_supply = to_human(total_supply, metadata.decimals);
        let burned_supply = to_human(burned_supply, metadata.decimals);
        let buyback_reserve = to_human(buyback_reserve, currency_decimals);

        let metrics = metadata
            .curve_snapshot(
                state,
                total_supply.clone(),
                burned_supply.clone(),
                buyback_reserve.clone(),
            )
            .metrics();

        let info = Arc::new(OrgInfo {
            total_supply,
            burned_supply,
            name,
            symbol,
            beneficiary,
            control,
            fee_collector,
            auto_burn,
            buyback_reserve,
            fee: basis_points_to_ratio(fee_bps)?,
            min_investment: to_human(min_investment, currency_decimals),
            open_until_at_least,
            state,
            whitelist,
            metrics,
        });

        self.org_info.store(Some(info.clone()));
        Ok(info)
    }

    async fn load_whitelist_config(
        &self,
        whitelist: &Address,
    ) -> Result<WhitelistInfo, BlockchainRpcClientError> {
        match self.whitelist.fetch_config(whitelist).await {
            Ok(info) => Ok(info),
            Err(e) => {
                tracing::debug!("Whitelist {whitelist} configuration unavailable: {e}");
                Ok(WhitelistInfo::default())
            }
        }
    }

    /// Reads balances and whitelist status of `account` and swaps in a new account snapshot.
    ///
    /// The refreshed account becomes the default sender and recipient of writes.
    ///
    /// # Errors
    ///
    /// Returns an error if `init` has not completed or a read fails.
    pub async fn refresh_account_info(&self, account: Address) -> Result<Arc<AccountInfo>, CorgError> {
        let metadata = self.require_metadata()?;
        let currency = metadata.currency.address;

        let balance_call = IDat::balanceOfCall { account };
        let (native_balance, token_balance, currency_balance, allowance, whitelist) = tokio::try_join!(
            self.client.get_balance(&account),
            self.dat.read(&self.address, &balance_call),
            self.load_currency_balance(currency, account),
            self.load_allowance(currency, account),
            self.load_account_whitelist(&metadata.whitelist_address, account),
        )?;

        let currency_decimals = metadata.currency.decimals;
        let info = Arc::new(AccountInfo {
            address: account,
            native_balance: to_human(native_balance, CurrencyInfo::NATIVE_DECIMALS),
            token_balance: to_human(token_balance, metadata.decimals),
            currency_balance: currency_balance.map(|raw| to_human(raw, currency_decimals)),
            allowance: allowance.map(|raw| to_human(raw, currency_decimals)),
            whitelist,
        });

        self.account.store(Some(info.clone()));
        Ok(info)
    }

    async fn load_currency_balance(
        &self,
        currency: Option<Address>,
        account: Address,
    ) -> Result<Option<U256>, BlockchainRpcClientError> {
        match currency {
            Some(token) => self.erc20.balance_of(&token, account).await.map(Some),
            None => Ok(None),
        }
    }

    async fn load_allowance(
        &self,
        currency: Option<Address>,
        account: Address,
    ) -> Result<Option<U256>, BlockchainRpcClientError> {
        match currency {
            Some(token) => self
                .erc20
                .allowance(&token, account, self.address)
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    async fn load_account_whitelist(
        &self,
        whitelist: &Address,
        account: Address,
    ) -> Result<AccountWhitelistInfo, BlockchainRpcClientError> {
        match self.whitelist.fetch_account_info(whitelist, account).await {
            Ok(info) => Ok(info),
            Err(e) => {
                tracing::debug!("Whitelist status of {account} unavailable: {e}");
                Ok(AccountWhitelistInfo::default())
            }
        }
    }

    /// Estimates the tokens bought for `currency_value` currency units.
    ///
    /// # Errors
    ///
    /// Returns an error if `init` has not completed, the amount cannot be encoded or the call fails.
    pub async fn estimate_buy_value(&self, currency_value: &BigDecimal) -> Result<BigDecimal, CorgError> {
        let metadata = self.require_metadata()?;
        let raw = to_on_chain(currency_value, metadata.currency.decimals)?;
        if raw.is_zero() {
            return Ok(BigDecimal::zero());
        }

        let tokens = self.dat.estimate_buy_value(&self.address, raw).await?;
        Ok(to_human(tokens, metadata.decimals))
    }

    /// Estimates the currency returned for selling `quantity` tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if `init` has not completed, the amount cannot be encoded or the call
    /// fails for any reason other than the quantity exceeding the supply.
    pub async fn estimate_sell_value(
        &self,
        quantity: &BigDecimal,
    ) -> Result<SellEstimate<BigDecimal>, CorgError> {
        let metadata = self.require_metadata()?;
        let raw = to_on_chain(quantity, metadata.decimals)?;
        if raw.is_zero() {
            return Ok(SellEstimate::Value(BigDecimal::zero()));
        }

        let estimate = self.dat.estimate_sell_value(&self.address, raw).await?;
        Ok(estimate.map(|value| to_human(value, metadata.currency.decimals)))
    }

    /// Estimates the tokens issued when paying `currency_value` currency units.
    ///
    /// # Errors
    ///
    /// Returns an error if `init` has not completed, the amount cannot be encoded or the call fails.
    pub async fn estimate_pay_value(&self, currency_value: &BigDecimal) -> Result<BigDecimal, CorgError> {
        let metadata = self.require_metadata()?;
        let raw = to_on_chain(currency_value, metadata.currency.decimals)?;
        if raw.is_zero() {
            return Ok(BigDecimal::zero());
        }

        let tokens = self.dat.estimate_pay_value(&self.address, raw).await?;
        Ok(to_human(tokens, metadata.decimals))
    }

    /// Buys tokens with `currency_value` currency units, accepting up to `max_slip_percent`
    /// fewer tokens than currently estimated.
    ///
    /// A zero or absent `recipient` receives the tokens on the sender's behalf.
    ///
    /// # Errors
    ///
    /// Returns an error if the estimate is zero, no sender can be resolved, or the node
    /// rejects the transaction.
    pub async fn buy(
        &self,
        currency_value: &BigDecimal,
        max_slip_percent: Decimal,
        recipient: Option<Address>,
        options: Option<CallOptions>,
    ) -> Result<TxHash, CorgError> {
        let metadata = self.require_metadata()?;
        let raw = to_on_chain(currency_value, metadata.currency.decimals)?;

        let expected = self.dat.estimate_buy_value(&self.address, raw).await?;
        let min_tokens = min_expected_value(expected, max_slip_percent)?;

        let native_value = metadata.currency.is_native().then_some(raw);
        let params = self.tx_params(options, native_value)?;
        let to = resolve_recipient(recipient, params.from);

        Ok(self
            .dat
            .buy(&self.address, to, raw, min_tokens, params)
            .await?)
    }

    /// Sells `quantity` tokens, accepting up to `max_slip_percent` less currency than currently
    /// estimated.
    ///
    /// # Errors
    ///
    /// Returns an error if the estimate is zero (including a quantity above the supply), no
    /// sender can be resolved, or the node rejects the transaction.
    pub async fn sell(
        &self,
        quantity: &BigDecimal,
        max_slip_percent: Decimal,
        recipient: Option<Address>,
        options: Option<CallOptions>,
    ) -> Result<TxHash, CorgError> {
        let metadata = self.require_metadata()?;
        let raw = to_on_chain(quantity, metadata.decimals)?;

        let expected = self
            .dat
            .estimate_sell_value(&self.address, raw)
            .await?
            .value_or_zero();
        let min_currency = min_expected_value(expected, max_slip_percent)?;

        let params = self.tx_params(options, None)?;
        let to = resolve_recipient(recipient, params.from);

        Ok(self
            .dat
            .sell(&self.address, to, raw, min_currency, params)
            .await?)
    }

    /// Pays `currency_value` currency units to the organization on behalf of `recipient`.
    ///
    /// # Errors
    ///
    /// Returns an error if no sender can be resolved or the node rejects the transaction.
    pub async fn pay(
        &self,
        currency_value: &BigDecimal,
        recipient: Option<Address>,
        options: Option<CallOptions>,
    ) -> Result<TxHash, CorgError> {
        let metadata = self.require_metadata()?;
        let raw = to_on_chain(currency_value, metadata.currency.decimals)?;

        let native_value = metadata.currency.is_native().then_some(raw);
        let params = self.tx_params(options, native_value)?;
        let to = resolve_recipient(recipient, params.from);

        Ok(self.dat.pay(&self.address, to, raw, params).await?)
    }

    /// Burns `quantity` tokens of the sender.
    ///
    /// # Errors
    ///
    /// Returns an error if no sender can be resolved or the node rejects the transaction.
    pub async fn burn(
        &self,
        quantity: &BigDecimal,
        options: Option<CallOptions>,
    ) -> Result<TxHash, CorgError> {
        let metadata = self.require_metadata()?;
        let raw = to_on_chain(quantity, metadata.decimals)?;
        let params = self.tx_params(options, None)?;

        Ok(self.dat.burn(&self.address, raw, params).await?)
    }

    /// Approves the DAT to spend an unlimited amount of the sender's currency.
    ///
    /// # Errors
    ///
    /// Returns [`CorgError::NativeCurrency`] in native-asset mode, or an error if the node
    /// rejects the transaction.
    pub async fn approve(&self, options: Option<CallOptions>) -> Result<TxHash, CorgError> {
        let metadata = self.require_metadata()?;
        let currency = metadata
            .currency
            .address
            .ok_or(CorgError::NativeCurrency("approve"))?;
        let params = self.tx_params(options, None)?;

        Ok(self
            .erc20
            .approve(&currency, self.address, U256::MAX, params)
            .await?)
    }

    /// Sets the approval of `account` on a whitelist without user ids.
    ///
    /// # Errors
    ///
    /// Returns an error if no sender can be resolved or the node rejects the transaction.
    pub async fn kyc(
        &self,
        account: Address,
        approved: bool,
        options: Option<CallOptions>,
    ) -> Result<TxHash, CorgError> {
        let metadata = self.require_metadata()?;
        let params = self.tx_params(options, None)?;

        Ok(self
            .whitelist
            .approve(&metadata.whitelist_address, account, approved, params)
            .await?)
    }

    /// Registers `accounts` as new users, each with the jurisdiction at the same index.
    ///
    /// # Errors
    ///
    /// Returns an error if the lists differ in length, no sender can be resolved, or the node
    /// rejects the transaction.
    pub async fn approve_new_users(
        &self,
        accounts: Vec<Address>,
        jurisdiction_ids: Vec<U256>,
        options: Option<CallOptions>,
    ) -> Result<TxHash, CorgError> {
        let metadata = self.require_metadata()?;
        let params = self.tx_params(options, None)?;

        Ok(self
            .whitelist
            .approve_new_users(&metadata.whitelist_address, accounts, jurisdiction_ids, params)
            .await?)
    }

    /// Returns whether `account` is a whitelist operator.
    ///
    /// # Errors
    ///
    /// Returns an error if `init` has not completed or the call fails.
    pub async fn is_whitelist_operator(&self, account: Address) -> Result<bool, CorgError> {
        let metadata = self.require_metadata()?;
        Ok(self
            .whitelist
            .is_operator(&metadata.whitelist_address, account)
            .await?)
    }

    /// Grants the whitelist operator role to `account`.
    ///
    /// # Errors
    ///
    /// Returns an error if no sender can be resolved or the node rejects the transaction.
    pub async fn add_whitelist_operator(
        &self,
        account: Address,
        options: Option<CallOptions>,
    ) -> Result<TxHash, CorgError> {
        let metadata = self.require_metadata()?;
        let params = self.tx_params(options, None)?;

        Ok(self
            .whitelist
            .add_operator(&metadata.whitelist_address, account, params)
            .await?)
    }

    /// Sets the lockup start date (unix seconds) and granularity (seconds) of the whitelist.
    ///
    /// # Errors
    ///
    /// Returns an error if no sender can be resolved or the node rejects the transaction.
    pub async fn config_whitelist(
        &self,
        start_date: U256,
        lockup_granularity: U256,
        options: Option<CallOptions>,
    ) -> Result<TxHash, CorgError> {
        let metadata = self.require_metadata()?;
        let params = self.tx_params(options, None)?;

        Ok(self
            .whitelist
            .config_whitelist(
                &metadata.whitelist_address,
                start_date,
                lockup_granularity,
                params,
            )
            .await?)
    }

    /// Transfers ownership of the whitelist to `new_owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if no sender can be resolved or the node rejects the transaction.
    pub async fn transfer_whitelist_ownership(
        &self,
        new_owner: Address,
        options: Option<CallOptions>,
    ) -> Result<TxHash, CorgError> {
        let metadata = self.require_metadata()?;
        let params = self.tx_params(options, None)?;

        Ok(self
            .whitelist
            .transfer_ownership(&metadata.whitelist_address, new_owner, params)
            .await?)
    }

    /// Returns the currency balance of `account`, its native balance in native-asset mode.
    ///
    /// # Errors
    ///
    /// Returns an error if `init` has not completed or the read fails.
    pub async fn get_currency_balance_of(&self, account: Address) -> Result<BigDecimal, CorgError> {
        let metadata = self.require_metadata()?;
        let raw = match metadata.currency.address {
            Some(token) => self.erc20.balance_of(&token, account).await?,
            None => self.client.get_balance(&account).await?,
        };
        Ok(to_human(raw, metadata.currency.decimals))
    }

    /// Returns the next nonce of `account`, pending transactions included.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn get_account_nonce(&self, account: Address) -> Result<U256, CorgError> {
        Ok(self
            .client
            .get_transaction_count(&account, BlockTag::Pending)
            .await?)
    }

    fn require_metadata(&self) -> Result<Arc<OrgMetadata>, CorgError> {
        self.metadata.load_full().ok_or(CorgError::NotInitialized)
    }

    fn tx_params(
        &self,
        options: Option<CallOptions>,
        native_value: Option<U256>,
    ) -> Result<TxParams, CorgError> {
        let options = options.unwrap_or_default();
        let from = match options.from {
            Some(from) => from,
            None => self
                .account
                .load_full()
                .map(|account| account.address)
                .ok_or(CorgError::NoDefaultAccount)?,
        };

        Ok(TxParams {
            from,
            gas: options.gas.unwrap_or(self.config.default_gas),
            gas_price: options.gas_price.or(self.config.gas_price),
            nonce: options.nonce,
            value: options.value.or(native_value),
        })
    }
}

fn resolve_recipient(recipient: Option<Address>, sender: Address) -> Address {
    recipient
        .filter(|recipient| !recipient.is_zero())
        .unwrap_or(sender)
}

/// Returns the minimum raw amount accepted for an `expected` raw estimate:
/// `expected * (100 - max_slip_percent) / 100`, truncated and floored at one unit.
///
/// # Errors
///
/// Returns [`CorgError::ZeroExpectedValue`] if `expected` is zero, or
/// [`CorgError::InvalidArgument`] if `max_slip_percent` is outside `[0, 100]`.
pub fn min_expected_value(expected: U256, max_slip_percent: Decimal) -> Result<U256, CorgError> {
    if expected.is_zero() {
        return Err(CorgError::ZeroExpectedValue);
    }
    if max_slip_percent.is_sign_negative() || max_slip_percent > Decimal::ONE_HUNDRED {
        return Err(CorgError::InvalidArgument(format!(
            "Slippage must be within [0, 100], was {max_slip_percent}"
        )));
    }

    let kept = from_decimal(Decimal::ONE_HUNDRED - max_slip_percent);
    let minimum = to_human(expected, 0) * kept / BigDecimal::from(100);
    let minimum = to_on_chain(&minimum, 0)?;

    Ok(minimum.max(U256::from(1u8)))
}
