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

use std::env;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directives.
pub const RUST_LOG: &str = "RUST_LOG";

/// Initialize tracing.
///
/// Discovery, contract calls and submitted transactions are traced through the `tracing`
/// macros. Output is enabled and filtered by passing a configuration using the `RUST_LOG`
/// environment variable, e.g. `RUST_LOG=corg_blockchain=debug`.
///
/// Should only be called once, ideally at the beginning of the run. Library code never
/// calls it.
///
/// # Errors
///
/// Returns an error if tracing subscriber fails to initialize.
pub fn init_tracing() -> anyhow::Result<()> {
    // Skip tracing initialization if `RUST_LOG` is not set
    if let Ok(v) = env::var(RUST_LOG) {
        let env_filter = EnvFilter::new(v.clone());

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))?;

        println!("Initialized tracing logs with {RUST_LOG}={v}");
    }
    Ok(())
}
