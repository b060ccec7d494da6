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

//! Type stubs to facilitate testing.

use alloy_primitives::{Address, U256, address};
use bigdecimal::BigDecimal;
use rstest::fixture;
use rust_decimal::Decimal;

use crate::{
    network::{NetworkEndpoint, NetworkRegistry},
    numeric::ratio,
    org::{CurrencyInfo, OrgMetadata},
};

pub const DAT_ADDRESS: Address = address!("0x00000000000000000000000000000000000d47a0");
pub const USDC_ADDRESS: Address = address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
pub const WHITELIST_ADDRESS: Address = address!("0x0000000000000000000000000000000000000b17");

#[fixture]
pub fn usdc_currency() -> CurrencyInfo {
    CurrencyInfo::erc20(USDC_ADDRESS, 6, "USD Coin".to_string(), "USDC".to_string())
}

#[fixture]
pub fn native_currency() -> CurrencyInfo {
    CurrencyInfo::native("Ether", "ETH")
}

/// A USDC funded organization with a `1 / 1e32` buy slope and a 42 token initial reserve.
#[fixture]
pub fn org_metadata(usdc_currency: CurrencyInfo) -> OrgMetadata {
    let buy_slope_num = U256::from(1u8);
    let buy_slope_den = U256::from(10u8).pow(U256::from(32u8));

    OrgMetadata {
        address: DAT_ADDRESS,
        decimals: 18,
        currency: usdc_currency,
        whitelist_address: WHITELIST_ADDRESS,
        buy_slope_num,
        buy_slope_den,
        buy_slope: ratio(buy_slope_num, buy_slope_den).unwrap(),
        init_goal: BigDecimal::from(0),
        init_reserve: BigDecimal::from(42),
        investment_reserve: Decimal::new(1, 1),
        revenue_commitment: Decimal::new(1, 1),
        proxy_implementation: None,
        proxy_admin: None,
        version: Some("2".to_string()),
    }
}

#[fixture]
pub fn network_registry() -> NetworkRegistry {
    NetworkRegistry::new(vec![
        NetworkEndpoint::new("local", "http://127.0.0.1:8545"),
        NetworkEndpoint::new("mainnet", "http://mainnet.test"),
        NetworkEndpoint::new("ropsten", "http://ropsten.test"),
    ])
    .unwrap()
}
