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

//! Snapshot types for a continuous organization and the accounts interacting with it.
//!
//! Amounts are held in human units: token amounts are scaled by the DAT decimals and
//! currency amounts by the currency decimals.

use std::fmt::{Display, Formatter};

use alloy_primitives::{Address, U256};
use bigdecimal::BigDecimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    enums::LifecycleState,
    metrics::{CurveMetrics, CurveSnapshot, MarketSentiment},
    numeric::pow10,
};

/// The reserve currency of an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// The ERC20 address, or `None` when the organization is funded with the native asset.
    pub address: Option<Address>,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
}

impl CurrencyInfo {
    /// Number of decimals of the native asset.
    pub const NATIVE_DECIMALS: u8 = 18;

    /// Creates a new ERC20 backed [`CurrencyInfo`] instance.
    #[must_use]
    pub fn erc20(address: Address, decimals: u8, name: String, symbol: String) -> Self {
        Self {
            address: Some(address),
            decimals,
            name,
            symbol,
        }
    }

    /// Creates a new [`CurrencyInfo`] for the native asset.
    #[must_use]
    pub fn native(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            address: None,
            decimals: Self::NATIVE_DECIMALS,
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    #[must_use]
    pub const fn is_native(&self) -> bool {
        self.address.is_none()
    }
}

impl Display for CurrencyInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.address {
            Some(address) => write!(f, "{}({address})", self.symbol),
            None => write!(f, "{}(native)", self.symbol),
        }
    }
}

/// Configuration values fixed at deployment, loaded once per `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMetadata {
    /// The DAT contract address.
    pub address: Address,
    /// Decimals of the organization token.
    pub decimals: u8,
    pub currency: CurrencyInfo,
    pub whitelist_address: Address,
    pub buy_slope_num: U256,
    pub buy_slope_den: U256,
    /// The raw `buy_slope_num / buy_slope_den` ratio.
    pub buy_slope: BigDecimal,
    pub init_goal: BigDecimal,
    pub init_reserve: BigDecimal,
    pub investment_reserve: Decimal,
    pub revenue_commitment: Decimal,
    pub proxy_implementation: Option<Address>,
    pub proxy_admin: Option<Address>,
    /// The DAT `version()`, `None` for deployments predating it.
    pub version: Option<String>,
}

impl OrgMetadata {
    /// Returns the buy slope in human units (currency per token, per token of supply).
    ///
    /// The raw slope prices raw currency per raw token, so the human slope is
    /// `buy_slope * 10^(2 * decimals - currency.decimals)`.
    #[must_use]
    pub fn human_buy_slope(&self) -> BigDecimal {
        let exponent = 2 * i64::from(self.decimals) - i64::from(self.currency.decimals);
        &self.buy_slope * pow10(exponent)
    }

    /// Builds the curve inputs for the given live values.
    #[must_use]
    pub fn curve_snapshot(
        &self,
        state: LifecycleState,
        total_supply: BigDecimal,
        burned_supply: BigDecimal,
        buyback_reserve: BigDecimal,
    ) -> CurveSnapshot {
        CurveSnapshot {
            state,
            total_supply,
            burned_supply,
            buyback_reserve,
            init_goal: self.init_goal.clone(),
            init_reserve: self.init_reserve.clone(),
            buy_slope: self.human_buy_slope(),
        }
    }
}

/// Whitelist configuration of an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistInfo {
    pub owner: Option<Address>,
    pub start_date: U256,
    pub lockup_granularity: U256,
}

/// The mutable state of an organization at the time of the last refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgInfo {
    pub total_supply: BigDecimal,
    pub burned_supply: BigDecimal,
    pub name: String,
    pub symbol: String,
    pub beneficiary: Address,
    pub control: Address,
    pub fee_collector: Address,
    pub auto_burn: bool,
    /// Buyback reserve in currency units.
    pub buyback_reserve: BigDecimal,
    pub fee: Decimal,
    /// Minimum investment in currency units.
    pub min_investment: BigDecimal,
    /// Unix timestamp (seconds) before which the organization cannot be closed.
    pub open_until_at_least: U256,
    pub state: LifecycleState,
    pub whitelist: WhitelistInfo,
    #[serde(flatten)]
    pub metrics: CurveMetrics,
}

impl OrgInfo {
    #[must_use]
    pub fn mint_price(&self) -> &BigDecimal {
        &self.metrics.mint_price
    }

    #[must_use]
    pub fn last_token_price(&self) -> &BigDecimal {
        &self.metrics.last_token_price
    }

    #[must_use]
    pub fn market_cap(&self) -> &BigDecimal {
        &self.metrics.market_cap
    }

    #[must_use]
    pub fn redeem_price(&self) -> &BigDecimal {
        &self.metrics.redeem_price
    }

    #[must_use]
    pub fn market_sentiment(&self) -> Option<&MarketSentiment> {
        self.metrics.market_sentiment.as_ref()
    }
}

/// Whitelist status of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountWhitelistInfo {
    /// The user id the wallet is authorized under, `None` when unknown.
    pub user_id: Option<Address>,
    /// The jurisdiction of the user, `0` when unknown.
    pub jurisdiction_id: U256,
    pub total_tokens_locked: U256,
    pub start_index: U256,
    pub end_index: U256,
    /// Whether the account may hold and trade tokens.
    pub kyc_approved: bool,
}

/// Balances and whitelist status of a single account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub address: Address,
    /// Native asset balance (18 decimals).
    pub native_balance: BigDecimal,
    /// Organization token balance.
    pub token_balance: BigDecimal,
    /// ERC20 currency balance, `None` in native-asset mode.
    pub currency_balance: Option<BigDecimal>,
    /// ERC20 allowance granted to the DAT, `None` in native-asset mode.
    pub allowance: Option<BigDecimal>,
    pub whitelist: AccountWhitelistInfo,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;
    use crate::stubs::{org_metadata, usdc_currency};

    #[rstest]
    fn test_native_currency() {
        let currency = CurrencyInfo::native("Ether", "ETH");
        assert!(currency.is_native());
        assert_eq!(currency.decimals, 18);
        assert_eq!(currency.to_string(), "ETH(native)");
    }

    #[rstest]
    fn test_erc20_currency(usdc_currency: CurrencyInfo) {
        assert!(!usdc_currency.is_native());
        assert_eq!(usdc_currency.decimals, 6);
        assert!(usdc_currency.to_string().starts_with("USDC(0x"));
    }

    #[rstest]
    fn test_human_buy_slope_scales_by_decimals(org_metadata: OrgMetadata) {
        // 1 / 1e32 with 18 token decimals and 6 currency decimals.
        assert_eq!(
            org_metadata.human_buy_slope(),
            BigDecimal::from_str("0.01").unwrap()
        );
    }

    #[rstest]
    fn test_curve_snapshot_uses_metadata(org_metadata: OrgMetadata) {
        let snapshot = org_metadata.curve_snapshot(
            LifecycleState::Run,
            BigDecimal::from(100),
            BigDecimal::from(0),
            BigDecimal::from(0),
        );
        assert_eq!(snapshot.init_reserve, org_metadata.init_reserve);
        assert_eq!(snapshot.buy_slope, org_metadata.human_buy_slope());
        // (100 - 42) * 0.01
        assert_eq!(snapshot.mint_price(), BigDecimal::from_str("0.58").unwrap());
    }
}
