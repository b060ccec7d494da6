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

//! Financial metrics derived from a bonding curve snapshot.
//!
//! All values are in human units. With `t` the total supply, `b` the burned supply,
//! `r` the buyback reserve, `r0` the initial reserve and `s` the buy slope:
//!
//! | Metric             | INIT / CANCEL      | Otherwise                              |
//! |--------------------|--------------------|----------------------------------------|
//! | mint price         | `init_goal * s / 2`| `(t + b - r0) * s`                     |
//! | redeem price       | mint price (INIT)  | `b²r / (t(b+t)²) + 2r / (b+t)`         |
//! | market sentiment   | n/a                | `s·t·(b+t)³ / (r·(b² + 2bt + 2t²))` (RUN) |

use std::fmt::{Display, Formatter};

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::enums::LifecycleState;

/// The market sentiment of a running organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSentiment {
    Finite(BigDecimal),
    /// The buyback reserve is empty.
    Infinite,
}

impl MarketSentiment {
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }
}

impl Display for MarketSentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{value}"),
            Self::Infinite => write!(f, "Infinity"),
        }
    }
}

/// The curve inputs every metric is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveSnapshot {
    pub state: LifecycleState,
    pub total_supply: BigDecimal,
    pub burned_supply: BigDecimal,
    pub buyback_reserve: BigDecimal,
    pub init_goal: BigDecimal,
    pub init_reserve: BigDecimal,
    pub buy_slope: BigDecimal,
}

/// The metrics computed from a [`CurveSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveMetrics {
    pub mint_price: BigDecimal,
    pub last_token_price: BigDecimal,
    pub market_cap: BigDecimal,
    pub redeem_price: BigDecimal,
    pub market_sentiment: Option<MarketSentiment>,
}

impl CurveSnapshot {
    /// Returns the price of the next token minted on the curve.
    #[must_use]
    pub fn mint_price(&self) -> BigDecimal {
        if self.state.uses_init_pricing() {
            &self.init_goal * &self.buy_slope / BigDecimal::from(2)
        } else {
            self.last_token_price()
        }
    }

    /// Returns the running-curve price `(t + b - r0) * s` whatever the current state.
    #[must_use]
    pub fn last_token_price(&self) -> BigDecimal {
        (self.supply_on_curve() - &self.init_reserve) * &self.buy_slope
    }

    /// Returns `total_supply * mint_price`.
    #[must_use]
    pub fn market_cap(&self) -> BigDecimal {
        &self.total_supply * self.mint_price()
    }

    /// Returns the per-token value of the buyback reserve, zero when nothing is in circulation.
    #[must_use]
    pub fn redeem_price(&self) -> BigDecimal {
        if self.state == LifecycleState::Init {
            return self.mint_price();
        }

        let t = &self.total_supply;
        let b = &self.burned_supply;
        let r = &self.buyback_reserve;
        let supply = self.supply_on_curve();
        if supply.is_zero() || t.is_zero() {
            return BigDecimal::zero();
        }

        let burned_term = b * b * r / (t * &supply * &supply);
        let reserve_term = BigDecimal::from(2) * r / &supply;
        burned_term + reserve_term
    }

    /// Returns the market sentiment, or `None` outside the RUN state.
    #[must_use]
    pub fn market_sentiment(&self) -> Option<MarketSentiment> {
        if self.state != LifecycleState::Run {
            return None;
        }

        let t = &self.total_supply;
        let b = &self.burned_supply;
        let two = BigDecimal::from(2);
        let supply = self.supply_on_curve();

        let den = &self.buyback_reserve * (b * b + &two * b * t + &two * t * t);
        if den.is_zero() {
            return Some(MarketSentiment::Infinite);
        }

        let num = &self.buy_slope * t * &supply * &supply * &supply;
        Some(MarketSentiment::Finite(num / den))
    }

    /// Computes every metric at once.
    #[must_use]
    pub fn metrics(&self) -> CurveMetrics {
        CurveMetrics {
            mint_price: self.mint_price(),
            last_token_price: self.last_token_price(),
            market_cap: self.market_cap(),
            redeem_price: self.redeem_price(),
            market_sentiment: self.market_sentiment(),
        }
    }

    fn supply_on_curve(&self) -> BigDecimal {
        &self.total_supply + &self.burned_supply
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::{fixture, rstest};

    use super::*;

    fn bd(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[fixture]
    fn running_curve() -> CurveSnapshot {
        CurveSnapshot {
            state: LifecycleState::Run,
            total_supply: bd("100"),
            burned_supply: bd("0"),
            buyback_reserve: bd("0"),
            init_goal: bd("0"),
            init_reserve: bd("0"),
            buy_slope: bd("2"),
        }
    }

    #[rstest]
    fn test_mint_price_running(running_curve: CurveSnapshot) {
        assert_eq!(running_curve.mint_price(), bd("200"));
        assert_eq!(running_curve.last_token_price(), bd("200"));
        assert_eq!(running_curve.market_cap(), bd("20000"));
    }

    #[rstest]
    #[case(LifecycleState::Init)]
    #[case(LifecycleState::Cancel)]
    fn test_mint_price_init_pricing(running_curve: CurveSnapshot, #[case] state: LifecycleState) {
        let curve = CurveSnapshot {
            state,
            init_goal: bd("1000"),
            buy_slope: bd("0.002"),
            ..running_curve
        };
        assert_eq!(curve.mint_price(), bd("1"));
        // The running price ignores the lifecycle state.
        assert_eq!(curve.last_token_price(), bd("0.2"));
    }

    #[rstest]
    fn test_mint_price_subtracts_init_reserve(running_curve: CurveSnapshot) {
        let curve = CurveSnapshot {
            init_reserve: bd("40"),
            burned_supply: bd("10"),
            ..running_curve
        };
        assert_eq!(curve.mint_price(), bd("140"));
    }

    #[rstest]
    fn test_redeem_price_in_init_equals_mint_price(running_curve: CurveSnapshot) {
        let curve = CurveSnapshot {
            state: LifecycleState::Init,
            init_goal: bd("10"),
            ..running_curve
        };
        assert_eq!(curve.redeem_price(), curve.mint_price());
        assert_eq!(curve.redeem_price(), bd("10"));
    }

    #[rstest]
    #[case("1", "1", "4", "5")]
    #[case("4", "0", "8", "4")]
    #[case("0", "0", "8", "0")]
    #[case("0", "5", "8", "0")]
    fn test_redeem_price_running(
        running_curve: CurveSnapshot,
        #[case] total: &str,
        #[case] burned: &str,
        #[case] reserve: &str,
        #[case] expected: &str,
    ) {
        let curve = CurveSnapshot {
            total_supply: bd(total),
            burned_supply: bd(burned),
            buyback_reserve: bd(reserve),
            ..running_curve
        };
        assert_eq!(curve.redeem_price(), bd(expected));
    }

    #[rstest]
    fn test_market_sentiment_infinite_without_reserve(running_curve: CurveSnapshot) {
        let sentiment = running_curve.market_sentiment().unwrap();
        assert!(sentiment.is_infinite());
        assert_eq!(sentiment.to_string(), "Infinity");
    }

    #[rstest]
    fn test_market_sentiment_finite(running_curve: CurveSnapshot) {
        let curve = CurveSnapshot {
            total_supply: bd("1"),
            burned_supply: bd("1"),
            buyback_reserve: bd("4"),
            ..running_curve
        };
        assert_eq!(
            curve.market_sentiment(),
            Some(MarketSentiment::Finite(bd("0.8")))
        );
    }

    #[rstest]
    #[case(LifecycleState::Init)]
    #[case(LifecycleState::Close)]
    #[case(LifecycleState::Cancel)]
    fn test_market_sentiment_only_when_running(
        running_curve: CurveSnapshot,
        #[case] state: LifecycleState,
    ) {
        let curve = CurveSnapshot {
            state,
            ..running_curve
        };
        assert_eq!(curve.market_sentiment(), None);
    }

    #[rstest]
    fn test_metrics_bundle(running_curve: CurveSnapshot) {
        let metrics = running_curve.metrics();
        assert_eq!(metrics.mint_price, bd("200"));
        assert_eq!(metrics.market_cap, bd("20000"));
        assert_eq!(metrics.redeem_price, BigDecimal::zero());
        assert_eq!(metrics.market_sentiment, Some(MarketSentiment::Infinite));
    }
}
