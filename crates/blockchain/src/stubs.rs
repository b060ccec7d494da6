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

//! Mock RPC client emulating a chain of continuous organization contracts, for testing.
//!
//! Calldata is decoded with the `sol!` generated call enums and answered from in-memory
//! contract state. Transactions are applied to that state, so a buy followed by an account
//! refresh observes the minted tokens.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use alloy::{
    primitives::{Address, B256, TxHash, U256, address},
    sol_types::{SolCall, SolInterface},
};
use corg_model::{
    enums::LifecycleState,
    network::NetworkEndpoint,
    numeric::BASIS_POINTS_DEN,
    stubs::{DAT_ADDRESS, USDC_ADDRESS, WHITELIST_ADDRESS},
};
use rstest::fixture;

use crate::{
    contracts::{
        dat::IDat::{self, IDatCalls},
        erc20::{
            ERC20::{self, ERC20Calls},
            ERC20Bytes32,
        },
        proxy::{ADMIN_LABEL, IMPLEMENTATION_LABEL, slot},
        whitelist::IWhitelist::{self, IWhitelistCalls},
    },
    factories::RpcClientFactory,
    rpc::{
        RpcClient, SharedRpcClient,
        error::BlockchainRpcClientError,
        types::{BlockTag, TransactionRequest},
    },
};

pub const BUYER: Address = address!("0x00000000000000000000000000000000000b0b00");
pub const BENEFICIARY: Address = address!("0x000000000000000000000000000000000000be7e");
pub const CONTROL: Address = address!("0x00000000000000000000000000000000000c0471");
pub const FEE_COLLECTOR: Address = address!("0x0000000000000000000000000000000000000fee");
pub const WHITELIST_OWNER: Address = address!("0x0000000000000000000000000000000000000a11");
pub const PROXY_IMPLEMENTATION: Address = address!("0x00000000000000000000000000000000000001a1");
pub const PROXY_ADMIN: Address = address!("0x00000000000000000000000000000000000001ad");

pub type SharedMockChain = Arc<Mutex<MockChain>>;

type MockResult<T> = Result<T, BlockchainRpcClientError>;

fn revert(reason: &str) -> BlockchainRpcClientError {
    BlockchainRpcClientError::ExecutionReverted(reason.to_string())
}

fn pow10(exponent: u8) -> U256 {
    U256::from(10u8).pow(U256::from(exponent))
}

/// Integer square root, rounded down.
fn isqrt(value: U256) -> U256 {
    if value < U256::from(2u8) {
        return value;
    }

    let mut x = value;
    let mut y = (value >> 1) + (value & U256::from(1u8));
    while y < x {
        x = y;
        y = (x + value / x) >> 1;
    }
    x
}

fn string_to_bytes32(value: &str) -> B256 {
    let bytes = value.as_bytes();
    let len = bytes.len().min(32);
    let mut word = [0u8; 32];
    word[..len].copy_from_slice(&bytes[..len]);
    B256::from(word)
}

/// In-memory state of a DAT contract.
///
/// Estimates follow the running curve `tokens = sqrt(2 * value / slope + s²) - s`, with `s` the
/// supply on the curve net of the initial reserve. Fees and the investment split are ignored.
#[derive(Debug, Clone)]
pub struct MockDat {
    /// The reserve currency, zero for the native asset.
    pub currency: Address,
    pub whitelist: Address,
    /// Only answers the legacy `currencyAddress()` and `whitelistAddress()` getters and has no
    /// `version()`.
    pub legacy: bool,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    pub total_supply: U256,
    pub burned_supply: U256,
    pub buyback_reserve: U256,
    pub beneficiary: Address,
    pub control: Address,
    pub fee_collector: Address,
    pub auto_burn: bool,
    pub fee_bps: U256,
    pub revenue_commitment_bps: U256,
    pub investment_reserve_bps: U256,
    pub min_investment: U256,
    pub open_until_at_least: U256,
    pub state: LifecycleState,
    pub buy_slope_num: U256,
    pub buy_slope_den: U256,
    pub init_goal: U256,
    pub init_reserve: U256,
    pub version: Option<String>,
    pub balances: HashMap<Address, U256>,
    /// Reverts every sell estimate with this reason, as a paused or faulty deployment would.
    pub sell_revert: Option<String>,
}

impl MockDat {
    /// A running organization funded with the native asset, with an empty curve and a
    /// `1 / 1e20` buy slope.
    #[must_use]
    pub fn native() -> Self {
        Self {
            currency: Address::ZERO,
            whitelist: WHITELIST_ADDRESS,
            legacy: false,
            decimals: 18,
            name: "Native Fair".to_string(),
            symbol: "NFAIR".to_string(),
            total_supply: U256::ZERO,
            burned_supply: U256::ZERO,
            buyback_reserve: U256::ZERO,
            beneficiary: BENEFICIARY,
            control: CONTROL,
            fee_collector: FEE_COLLECTOR,
            auto_burn: false,
            fee_bps: U256::ZERO,
            revenue_commitment_bps: U256::from(1_000u64),
            investment_reserve_bps: U256::from(1_000u64),
            min_investment: U256::from(100u64),
            open_until_at_least: U256::ZERO,
            state: LifecycleState::Run,
            buy_slope_num: U256::from(1u8),
            buy_slope_den: pow10(20),
            init_goal: U256::ZERO,
            init_reserve: U256::ZERO,
            version: Some("3".to_string()),
            balances: HashMap::new(),
            sell_revert: None,
        }
    }

    /// A running organization funded with a 6 decimals ERC20 at `currency`.
    ///
    /// The 42 tokens of initial reserve are held by the beneficiary, the buyback reserve holds
    /// 21 currency units and the buy slope is `1 / 1e32`.
    #[must_use]
    pub fn usdc(currency: Address) -> Self {
        let init_reserve = U256::from(42u8) * pow10(18);
        Self {
            currency,
            name: "Fair Demo".to_string(),
            symbol: "FDEMO".to_string(),
            total_supply: init_reserve,
            buyback_reserve: U256::from(21u8) * pow10(6),
            min_investment: U256::from(1u8) * pow10(6),
            buy_slope_den: pow10(32),
            init_reserve,
            version: Some("2".to_string()),
            balances: HashMap::from([(BENEFICIARY, init_reserve)]),
            ..Self::native()
        }
    }

    #[must_use]
    pub fn legacy(mut self) -> Self {
        self.legacy = true;
        self.version = None;
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: LifecycleState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_supply(mut self, total: U256, burned: U256, buyback_reserve: U256) -> Self {
        self.total_supply = total;
        self.burned_supply = burned;
        self.buyback_reserve = buyback_reserve;
        self
    }

    #[must_use]
    pub fn with_sell_revert(mut self, reason: &str) -> Self {
        self.sell_revert = Some(reason.to_string());
        self
    }

    #[must_use]
    pub fn with_balance(mut self, account: Address, amount: U256) -> Self {
        self.balances.insert(account, amount);
        self
    }

    fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn estimate_buy(&self, currency_value: U256) -> MockResult<U256> {
        if currency_value.is_zero() {
            return Ok(U256::ZERO);
        }

        let supply = (self.total_supply + self.burned_supply).saturating_sub(self.init_reserve);
        let squared = currency_value
            .checked_mul(U256::from(2u8))
            .and_then(|v| v.checked_mul(self.buy_slope_den))
            .map(|v| v / self.buy_slope_num)
            .and_then(|v| v.checked_add(supply * supply))
            .ok_or_else(|| revert("overflow"))?;
        Ok(isqrt(squared) - supply)
    }

    fn estimate_sell(&self, quantity: U256) -> MockResult<U256> {
        if let Some(reason) = &self.sell_revert {
            return Err(revert(reason));
        }
        if quantity > self.total_supply {
            return Err(revert("QUANTITY_EXCEEDS_SUPPLY"));
        }
        if quantity.is_zero() {
            return Ok(U256::ZERO);
        }
        Ok(self.buyback_reserve * quantity / self.total_supply)
    }

    fn estimate_pay(&self, currency_value: U256) -> MockResult<U256> {
        let tokens = self.estimate_buy(currency_value)?;
        Ok(tokens * self.revenue_commitment_bps / U256::from(BASIS_POINTS_DEN))
    }

    fn mint(&mut self, to: Address, amount: U256) {
        *self.balances.entry(to).or_default() += amount;
        self.total_supply += amount;
    }

    fn debit(&mut self, from: Address, amount: U256) -> MockResult<()> {
        let balance = self.balance_of(&from);
        if amount > balance {
            return Err(revert("INSUFFICIENT_BALANCE"));
        }
        self.balances.insert(from, balance - amount);
        self.total_supply -= amount;
        Ok(())
    }

    fn handle_call(&self, data: &[u8]) -> MockResult<Vec<u8>> {
        let call = IDatCalls::abi_decode(data).map_err(|e| revert(&e.to_string()))?;

        let encoded = match call {
            IDatCalls::currency(_) | IDatCalls::whitelist(_) | IDatCalls::version(_)
                if self.legacy =>
            {
                return Err(revert("unsupported by legacy deployment"));
            }
            IDatCalls::decimals(_) => IDat::decimalsCall::abi_encode_returns(&self.decimals),
            IDatCalls::name(_) => IDat::nameCall::abi_encode_returns(&self.name),
            IDatCalls::symbol(_) => IDat::symbolCall::abi_encode_returns(&self.symbol),
            IDatCalls::totalSupply(_) => {
                IDat::totalSupplyCall::abi_encode_returns(&self.total_supply)
            }
            IDatCalls::balanceOf(call) => {
                IDat::balanceOfCall::abi_encode_returns(&self.balance_of(&call.account))
            }
            IDatCalls::burnedSupply(_) => {
                IDat::burnedSupplyCall::abi_encode_returns(&self.burned_supply)
            }
            IDatCalls::beneficiary(_) => {
                IDat::beneficiaryCall::abi_encode_returns(&self.beneficiary)
            }
            IDatCalls::control(_) => IDat::controlCall::abi_encode_returns(&self.control),
            IDatCalls::feeCollector(_) => {
                IDat::feeCollectorCall::abi_encode_returns(&self.fee_collector)
            }
            IDatCalls::autoBurn(_) => IDat::autoBurnCall::abi_encode_returns(&self.auto_burn),
            IDatCalls::buybackReserve(_) => {
                IDat::buybackReserveCall::abi_encode_returns(&self.buyback_reserve)
            }
            IDatCalls::feeBasisPoints(_) => {
                IDat::feeBasisPointsCall::abi_encode_returns(&self.fee_bps)
            }
            IDatCalls::revenueCommitmentBasisPoints(_) => {
                IDat::revenueCommitmentBasisPointsCall::abi_encode_returns(
                    &self.revenue_commitment_bps,
                )
            }
            IDatCalls::investmentReserveBasisPoints(_) => {
                IDat::investmentReserveBasisPointsCall::abi_encode_returns(
                    &self.investment_reserve_bps,
                )
            }
            IDatCalls::minInvestment(_) => {
                IDat::minInvestmentCall::abi_encode_returns(&self.min_investment)
            }
            IDatCalls::openUntilAtLeast(_) => {
                IDat::openUntilAtLeastCall::abi_encode_returns(&self.open_until_at_least)
            }
            IDatCalls::state(_) => {
                IDat::stateCall::abi_encode_returns(&U256::from(self.state as u8))
            }
            IDatCalls::buySlopeNum(_) => {
                IDat::buySlopeNumCall::abi_encode_returns(&self.buy_slope_num)
            }
            IDatCalls::buySlopeDen(_) => {
                IDat::buySlopeDenCall::abi_encode_returns(&self.buy_slope_den)
            }
            IDatCalls::initGoal(_) => IDat::initGoalCall::abi_encode_returns(&self.init_goal),
            IDatCalls::initReserve(_) => {
                IDat::initReserveCall::abi_encode_returns(&self.init_reserve)
            }
            IDatCalls::currency(_) => IDat::currencyCall::abi_encode_returns(&self.currency),
            IDatCalls::currencyAddress(_) => {
                IDat::currencyAddressCall::abi_encode_returns(&self.currency)
            }
            IDatCalls::whitelist(_) => IDat::whitelistCall::abi_encode_returns(&self.whitelist),
            IDatCalls::whitelistAddress(_) => {
                IDat::whitelistAddressCall::abi_encode_returns(&self.whitelist)
            }
            IDatCalls::version(_) => match &self.version {
                Some(version) => IDat::versionCall::abi_encode_returns(version),
                None => return Err(revert("no version")),
            },
            IDatCalls::estimateBuyValue(call) => IDat::estimateBuyValueCall::abi_encode_returns(
                &self.estimate_buy(call.currencyValue)?,
            ),
            IDatCalls::estimateSellValue(call) => {
                IDat::estimateSellValueCall::abi_encode_returns(
                    &self.estimate_sell(call.quantityToSell)?,
                )
            }
            IDatCalls::estimatePayValue(call) => IDat::estimatePayValueCall::abi_encode_returns(
                &self.estimate_pay(call.currencyValue)?,
            ),
            IDatCalls::buy(_) | IDatCalls::sell(_) | IDatCalls::pay(_) | IDatCalls::burn(_) => {
                return Err(revert("state-changing call"));
            }
        };
        Ok(encoded)
    }

    fn apply(&mut self, from: Address, value: Option<U256>, data: &[u8]) -> MockResult<()> {
        let call = IDatCalls::abi_decode(data).map_err(|e| revert(&e.to_string()))?;
        let value = value.unwrap_or_default();

        match call {
            IDatCalls::buy(call) => {
                if self.currency.is_zero() && value != call.currencyValue {
                    return Err(revert("INCORRECT_MSG_VALUE"));
                }
                let tokens = self.estimate_buy(call.currencyValue)?;
                if tokens.is_zero() || tokens < call.minTokensBought {
                    return Err(revert("PRICE_SLIPPAGE"));
                }
                self.mint(call.to, tokens);
                self.buyback_reserve += call.currencyValue;
            }
            IDatCalls::sell(call) => {
                let currency_value = self.estimate_sell(call.quantityToSell)?;
                if currency_value < call.minCurrencyReturned {
                    return Err(revert("PRICE_SLIPPAGE"));
                }
                self.debit(from, call.quantityToSell)?;
                self.buyback_reserve -= currency_value;
            }
            IDatCalls::pay(call) => {
                if self.currency.is_zero() && value != call.currencyValue {
                    return Err(revert("INCORRECT_MSG_VALUE"));
                }
                let tokens = self.estimate_pay(call.currencyValue)?;
                self.mint(call.to, tokens);
            }
            IDatCalls::burn(call) => {
                self.debit(from, call.amount)?;
                self.burned_supply += call.amount;
            }
            _ => return Err(revert("view function")),
        }
        Ok(())
    }
}

/// In-memory state of an ERC20 token.
#[derive(Debug, Clone)]
pub struct MockErc20 {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Answers `name()` and `symbol()` as `bytes32`.
    pub bytes32_metadata: bool,
    pub balances: HashMap<Address, U256>,
    pub allowances: HashMap<(Address, Address), U256>,
}

impl MockErc20 {
    #[must_use]
    pub fn new(name: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            bytes32_metadata: false,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    #[must_use]
    pub fn bytes32_metadata(mut self) -> Self {
        self.bytes32_metadata = true;
        self
    }

    #[must_use]
    pub fn with_balance(mut self, account: Address, amount: U256) -> Self {
        self.balances.insert(account, amount);
        self
    }

    #[must_use]
    pub fn with_allowance(mut self, owner: Address, spender: Address, amount: U256) -> Self {
        self.allowances.insert((owner, spender), amount);
        self
    }

    fn handle_call(&self, data: &[u8]) -> MockResult<Vec<u8>> {
        let call = ERC20Calls::abi_decode(data).map_err(|e| revert(&e.to_string()))?;

        let encoded = match call {
            ERC20Calls::name(_) if self.bytes32_metadata => {
                ERC20Bytes32::nameCall::abi_encode_returns(&string_to_bytes32(&self.name))
            }
            ERC20Calls::symbol(_) if self.bytes32_metadata => {
                ERC20Bytes32::symbolCall::abi_encode_returns(&string_to_bytes32(&self.symbol))
            }
            ERC20Calls::name(_) => ERC20::nameCall::abi_encode_returns(&self.name),
            ERC20Calls::symbol(_) => ERC20::symbolCall::abi_encode_returns(&self.symbol),
            ERC20Calls::decimals(_) => ERC20::decimalsCall::abi_encode_returns(&self.decimals),
            ERC20Calls::balanceOf(call) => ERC20::balanceOfCall::abi_encode_returns(
                &self.balances.get(&call.account).copied().unwrap_or_default(),
            ),
            ERC20Calls::allowance(call) => ERC20::allowanceCall::abi_encode_returns(
                &self
                    .allowances
                    .get(&(call.owner, call.spender))
                    .copied()
                    .unwrap_or_default(),
            ),
            ERC20Calls::approve(_) => return Err(revert("state-changing call")),
        };
        Ok(encoded)
    }

    fn apply(&mut self, from: Address, data: &[u8]) -> MockResult<()> {
        match ERC20Calls::abi_decode(data).map_err(|e| revert(&e.to_string()))? {
            ERC20Calls::approve(call) => {
                self.allowances.insert((from, call.spender), call.value);
                Ok(())
            }
            _ => Err(revert("view function")),
        }
    }
}

/// A user registered on a v2 whitelist.
#[derive(Debug, Clone)]
pub struct MockWhitelistUser {
    pub user_id: Address,
    pub jurisdiction_id: U256,
    pub total_tokens_locked: U256,
    pub start_index: U256,
    pub end_index: U256,
}

/// In-memory state of a whitelist contract.
#[derive(Debug, Clone)]
pub struct MockWhitelist {
    pub owner: Address,
    pub start_date: U256,
    pub lockup_granularity: U256,
    /// Only exposes `approved(address)` and ownership; user ids and lockups revert.
    pub legacy: bool,
    pub operators: HashSet<Address>,
    pub approved: HashSet<Address>,
    pub users: HashMap<Address, MockWhitelistUser>,
}

impl MockWhitelist {
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            start_date: U256::from(1_600_000_000u64),
            lockup_granularity: U256::from(86_400u64),
            legacy: false,
            operators: HashSet::from([owner]),
            approved: HashSet::new(),
            users: HashMap::new(),
        }
    }

    #[must_use]
    pub fn legacy(mut self) -> Self {
        self.legacy = true;
        self
    }

    #[must_use]
    pub fn with_user(mut self, wallet: Address, user_id: Address, jurisdiction_id: u64) -> Self {
        self.users.insert(
            wallet,
            MockWhitelistUser {
                user_id,
                jurisdiction_id: U256::from(jurisdiction_id),
                total_tokens_locked: U256::ZERO,
                start_index: U256::ZERO,
                end_index: U256::ZERO,
            },
        );
        self
    }

    #[must_use]
    pub fn with_approved(mut self, account: Address) -> Self {
        self.approved.insert(account);
        self
    }

    fn handle_call(&self, data: &[u8]) -> MockResult<Vec<u8>> {
        let call = IWhitelistCalls::abi_decode(data).map_err(|e| revert(&e.to_string()))?;

        let encoded = match call {
            IWhitelistCalls::authorizedWalletToUserId(_)
            | IWhitelistCalls::getAuthorizedUserIdInfo(_)
            | IWhitelistCalls::startDate(_)
            | IWhitelistCalls::lockupGranularity(_)
                if self.legacy =>
            {
                return Err(revert("unsupported by legacy whitelist"));
            }
            IWhitelistCalls::approved(call) => IWhitelist::approvedCall::abi_encode_returns(
                &self.approved.contains(&call.account),
            ),
            IWhitelistCalls::authorizedWalletToUserId(call) => {
                let user_id = self
                    .users
                    .get(&call.wallet)
                    .map(|user| user.user_id)
                    .unwrap_or_default();
                IWhitelist::authorizedWalletToUserIdCall::abi_encode_returns(&user_id)
            }
            IWhitelistCalls::getAuthorizedUserIdInfo(call) => {
                let user = self
                    .users
                    .values()
                    .find(|user| user.user_id == call.userId)
                    .ok_or_else(|| revert("unknown user id"))?;
                IWhitelist::getAuthorizedUserIdInfoCall::abi_encode_returns(
                    &IWhitelist::getAuthorizedUserIdInfoReturn {
                        jurisdictionId: user.jurisdiction_id,
                        totalTokensLocked: user.total_tokens_locked,
                        startIndex: user.start_index,
                        endIndex: user.end_index,
                    },
                )
            }
            IWhitelistCalls::owner(_) => IWhitelist::ownerCall::abi_encode_returns(&self.owner),
            IWhitelistCalls::startDate(_) => {
                IWhitelist::startDateCall::abi_encode_returns(&self.start_date)
            }
            IWhitelistCalls::lockupGranularity(_) => {
                IWhitelist::lockupGranularityCall::abi_encode_returns(&self.lockup_granularity)
            }
            IWhitelistCalls::isOperator(call) => IWhitelist::isOperatorCall::abi_encode_returns(
                &self.operators.contains(&call.account),
            ),
            _ => return Err(revert("state-changing call")),
        };
        Ok(encoded)
    }

    fn apply(&mut self, from: Address, data: &[u8]) -> MockResult<()> {
        let call = IWhitelistCalls::abi_decode(data).map_err(|e| revert(&e.to_string()))?;

        match call {
            IWhitelistCalls::approve(call) => {
                self.require_operator(from)?;
                if call.isApproved {
                    self.approved.insert(call.account);
                } else {
                    self.approved.remove(&call.account);
                }
            }
            IWhitelistCalls::approveNewUsers(call) => {
                self.require_operator(from)?;
                if self.legacy {
                    return Err(revert("unsupported by legacy whitelist"));
                }
                for (account, jurisdiction_id) in call.accounts.into_iter().zip(call.jurisdictionIds)
                {
                    self.users.insert(
                        account,
                        MockWhitelistUser {
                            user_id: account,
                            jurisdiction_id,
                            total_tokens_locked: U256::ZERO,
                            start_index: U256::ZERO,
                            end_index: U256::ZERO,
                        },
                    );
                }
            }
            IWhitelistCalls::addOperator(call) => {
                self.require_owner(from)?;
                self.operators.insert(call.account);
            }
            IWhitelistCalls::configWhitelist(call) => {
                self.require_owner(from)?;
                self.start_date = call.newStartDate;
                self.lockup_granularity = call.newLockupGranularity;
            }
            IWhitelistCalls::transferOwnership(call) => {
                self.require_owner(from)?;
                self.owner = call.newOwner;
            }
            _ => return Err(revert("view function")),
        }
        Ok(())
    }

    fn require_owner(&self, from: Address) -> MockResult<()> {
        if from == self.owner {
            Ok(())
        } else {
            Err(revert("Ownable: caller is not the owner"))
        }
    }

    fn require_operator(&self, from: Address) -> MockResult<()> {
        if self.operators.contains(&from) {
            Ok(())
        } else {
            Err(revert("OperatorRole: caller does not have the Operator role"))
        }
    }
}

/// The state of one emulated network.
#[derive(Debug, Clone)]
pub struct MockChain {
    pub network_id: String,
    pub dats: HashMap<Address, MockDat>,
    pub erc20s: HashMap<Address, MockErc20>,
    pub whitelists: HashMap<Address, MockWhitelist>,
    pub native_balances: HashMap<Address, U256>,
    pub storage: HashMap<(Address, B256), B256>,
    pub nonces: HashMap<Address, U256>,
    pub sent_transactions: Vec<TransactionRequest>,
}

impl MockChain {
    #[must_use]
    pub fn new(network_id: &str) -> Self {
        Self {
            network_id: network_id.to_string(),
            dats: HashMap::new(),
            erc20s: HashMap::new(),
            whitelists: HashMap::new(),
            native_balances: HashMap::new(),
            storage: HashMap::new(),
            nonces: HashMap::new(),
            sent_transactions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dat(mut self, address: Address, dat: MockDat) -> Self {
        self.dats.insert(address, dat);
        self
    }

    #[must_use]
    pub fn with_erc20(mut self, address: Address, token: MockErc20) -> Self {
        self.erc20s.insert(address, token);
        self
    }

    #[must_use]
    pub fn with_whitelist(mut self, address: Address, whitelist: MockWhitelist) -> Self {
        self.whitelists.insert(address, whitelist);
        self
    }

    #[must_use]
    pub fn with_native_balance(mut self, account: Address, amount: U256) -> Self {
        self.native_balances.insert(account, amount);
        self
    }

    #[must_use]
    pub fn with_nonce(mut self, account: Address, nonce: u64) -> Self {
        self.nonces.insert(account, U256::from(nonce));
        self
    }

    /// Writes the EIP-1967 implementation and admin slots of `proxy`.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Address, implementation: Address, admin: Address) -> Self {
        self.storage
            .insert((proxy, slot(IMPLEMENTATION_LABEL)), implementation.into_word());
        self.storage
            .insert((proxy, slot(ADMIN_LABEL)), admin.into_word());
        self
    }

    fn call(&self, to: &Address, data: &[u8]) -> MockResult<Vec<u8>> {
        if let Some(dat) = self.dats.get(to) {
            dat.handle_call(data)
        } else if let Some(token) = self.erc20s.get(to) {
            token.handle_call(data)
        } else if let Some(whitelist) = self.whitelists.get(to) {
            whitelist.handle_call(data)
        } else {
            // Calls to accounts without code succeed with empty return data
            Ok(Vec::new())
        }
    }

    fn apply(&mut self, tx: &TransactionRequest) -> MockResult<TxHash> {
        if let Some(dat) = self.dats.get_mut(&tx.to) {
            dat.apply(tx.from, tx.value, &tx.data)?;
        } else if let Some(token) = self.erc20s.get_mut(&tx.to) {
            token.apply(tx.from, &tx.data)?;
        } else if let Some(whitelist) = self.whitelists.get_mut(&tx.to) {
            whitelist.apply(tx.from, &tx.data)?;
        }

        *self.nonces.entry(tx.from).or_default() += U256::from(1u8);
        self.sent_transactions.push(tx.clone());
        Ok(B256::from(U256::from(self.sent_transactions.len())))
    }
}

/// An [`RpcClient`] answering from a [`MockChain`].
#[derive(Debug)]
pub struct MockRpcClient {
    url: String,
    chain: SharedMockChain,
    latency: Option<Duration>,
    failing: bool,
}

impl MockRpcClient {
    #[must_use]
    pub fn new(url: &str, chain: MockChain) -> Self {
        Self::shared(url, Arc::new(Mutex::new(chain)))
    }

    /// Creates a client over state shared with other clients of the same network.
    #[must_use]
    pub fn shared(url: &str, chain: SharedMockChain) -> Self {
        Self {
            url: url.to_string(),
            chain,
            latency: None,
            failing: false,
        }
    }

    /// Delays every request by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fails every request as an unreachable endpoint would.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    #[must_use]
    pub fn chain(&self) -> SharedMockChain {
        self.chain.clone()
    }

    #[must_use]
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.chain.lock().unwrap().sent_transactions.clone()
    }

    async fn enter(&self) -> MockResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing {
            return Err(BlockchainRpcClientError::ClientError(format!(
                "Connection refused: {}",
                self.url
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RpcClient for MockRpcClient {
    fn url(&self) -> &str {
        &self.url
    }

    async fn network_id(&self) -> MockResult<String> {
        self.enter().await?;
        Ok(self.chain.lock().unwrap().network_id.clone())
    }

    async fn call(&self, to: &Address, call_data: &[u8]) -> MockResult<Vec<u8>> {
        self.enter().await?;
        self.chain.lock().unwrap().call(to, call_data)
    }

    async fn get_balance(&self, address: &Address) -> MockResult<U256> {
        self.enter().await?;
        let chain = self.chain.lock().unwrap();
        Ok(chain.native_balances.get(address).copied().unwrap_or_default())
    }

    async fn get_storage_at(&self, address: &Address, slot: B256) -> MockResult<B256> {
        self.enter().await?;
        let chain = self.chain.lock().unwrap();
        Ok(chain.storage.get(&(*address, slot)).copied().unwrap_or_default())
    }

    async fn get_transaction_count(&self, address: &Address, _block: BlockTag) -> MockResult<U256> {
        self.enter().await?;
        let chain = self.chain.lock().unwrap();
        Ok(chain.nonces.get(address).copied().unwrap_or_default())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> MockResult<TxHash> {
        self.enter().await?;
        self.chain.lock().unwrap().apply(tx)
    }
}

#[derive(Debug, Clone)]
struct MockNetwork {
    chain: SharedMockChain,
    latency: Option<Duration>,
    failing: bool,
}

impl MockNetwork {
    fn client(&self, url: &str) -> MockRpcClient {
        let mut client = MockRpcClient::shared(url, self.chain.clone());
        client.latency = self.latency;
        client.failing = self.failing;
        client
    }
}

/// A [`RpcClientFactory`] connecting registry entries to mock chains by network name.
#[derive(Debug, Default)]
pub struct MockRpcClientFactory {
    networks: HashMap<String, MockNetwork>,
}

impl MockRpcClientFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_network(mut self, name: &str, chain: MockChain) -> Self {
        self.networks.insert(
            name.to_string(),
            MockNetwork {
                chain: Arc::new(Mutex::new(chain)),
                latency: None,
                failing: false,
            },
        );
        self
    }

    /// Delays every request to the network `name`.
    ///
    /// # Panics
    ///
    /// Panics if no network `name` was registered.
    #[must_use]
    pub fn with_latency(mut self, name: &str, latency: Duration) -> Self {
        self.networks.get_mut(name).unwrap().latency = Some(latency);
        self
    }

    /// Makes every request to the network `name` fail.
    ///
    /// # Panics
    ///
    /// Panics if no network `name` was registered.
    #[must_use]
    pub fn with_failure(mut self, name: &str) -> Self {
        self.networks.get_mut(name).unwrap().failing = true;
        self
    }

    /// Returns a client of the network `name`, standing in for the caller's own connection.
    ///
    /// # Panics
    ///
    /// Panics if no network `name` was registered.
    #[must_use]
    pub fn native_client(&self, name: &str) -> SharedRpcClient {
        Arc::new(self.networks[name].client(&format!("mock://{name}/native")))
    }
}

impl RpcClientFactory for MockRpcClientFactory {
    fn create(&self, endpoint: &NetworkEndpoint) -> anyhow::Result<SharedRpcClient> {
        let network = self
            .networks
            .get(&endpoint.name)
            .ok_or_else(|| anyhow::anyhow!("No mock network named '{}'", endpoint.name))?;
        Ok(Arc::new(network.client(&endpoint.provider_uri)))
    }
}

/// A chain hosting a native-asset organization at [`DAT_ADDRESS`], with a funded [`BUYER`].
#[fixture]
pub fn native_chain() -> MockChain {
    MockChain::new("1337")
        .with_dat(DAT_ADDRESS, MockDat::native())
        .with_whitelist(
            WHITELIST_ADDRESS,
            MockWhitelist::new(WHITELIST_OWNER).with_user(BUYER, BUYER, 4),
        )
        .with_native_balance(BUYER, U256::from(5u8) * pow10(18))
}

/// A chain hosting a USDC funded organization at [`DAT_ADDRESS`], behind an EIP-1967 proxy.
#[fixture]
pub fn usdc_chain() -> MockChain {
    MockChain::new("1")
        .with_dat(DAT_ADDRESS, MockDat::usdc(USDC_ADDRESS))
        .with_erc20(
            USDC_ADDRESS,
            MockErc20::new("USD Coin", "USDC", 6)
                .with_balance(BUYER, U256::from(1_000u64) * pow10(6)),
        )
        .with_whitelist(WHITELIST_ADDRESS, MockWhitelist::new(WHITELIST_OWNER))
        .with_native_balance(BUYER, pow10(18))
        .with_proxy(DAT_ADDRESS, PROXY_IMPLEMENTATION, PROXY_ADMIN)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(3, 1)]
    #[case(4, 2)]
    #[case(99, 9)]
    #[case(100, 10)]
    fn test_isqrt(#[case] value: u64, #[case] expected: u64) {
        assert_eq!(isqrt(U256::from(value)), U256::from(expected));
    }

    #[rstest]
    fn test_isqrt_max() {
        let root = isqrt(U256::MAX);
        assert!(root * root <= U256::MAX);
        assert_eq!(root, U256::from(u128::MAX));
    }

    #[rstest]
    fn test_native_buy_estimate_on_empty_curve() {
        // sqrt(2 * 1e13 * 1e20)
        let estimate = MockDat::native()
            .estimate_buy(U256::from(10_000_000_000_000u64))
            .unwrap();
        assert_eq!(estimate, U256::from(44_721_359_549_995_793u64));
    }

    #[rstest]
    fn test_sell_above_supply_reverts() {
        let dat = MockDat::usdc(USDC_ADDRESS);
        assert!(dat.estimate_sell(dat.total_supply + U256::from(1u8)).is_err());
    }
}
