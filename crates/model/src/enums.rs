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

//! Enumerations for the continuous organization domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, FromRepr};

/// The lifecycle state of a continuous organization contract.
///
/// The discriminants match the `uint` returned by the contract's `state()` method.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    FromRepr,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LifecycleState {
    /// Raising towards the initial goal; tokens are not yet tradable on the curve.
    Init = 0,
    /// The bonding curve is live.
    Run = 1,
    /// The organization has been closed by its control account.
    Close = 2,
    /// The initialization phase was cancelled before reaching its goal.
    Cancel = 3,
}

impl LifecycleState {
    /// Returns the lifecycle state for the given on-chain state id, or `None` if unknown.
    #[must_use]
    pub fn from_state_id(state_id: u64) -> Option<Self> {
        u8::try_from(state_id).ok().and_then(Self::from_repr)
    }

    /// Returns whether pricing follows the initialization formulas for this state.
    #[must_use]
    pub const fn uses_init_pricing(&self) -> bool {
        matches!(self, Self::Init | Self::Cancel)
    }
}
