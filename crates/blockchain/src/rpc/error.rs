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

use thiserror::Error;

/// JSON-RPC error code used by nodes for reverted executions (EIP-1474).
pub const EXECUTION_REVERTED_CODE: i64 = 3;

/// Represents errors that can occur when interacting with a blockchain RPC client.
#[derive(Debug, Clone, Error)]
pub enum BlockchainRpcClientError {
    /// Occurs when the RPC client encounters a client-level error, such as connection failures.
    #[error("Client error: {0}")]
    ClientError(String),
    /// Occurs when a request does not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// Occurs when input parameters to an RPC call are invalid.
    #[error("Invalid RPC parameters: {0}")]
    InvalidParameters(String),
    /// Occurs when decoding contract ABI data fails.
    #[error("Decoding error: {0}")]
    AbiDecodingError(String),
    /// Occurs when parsing an RPC message fails.
    #[error("Parsing error: {0}")]
    MessageParsingError(String),
    /// Occurs when the node returns a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },
    /// Occurs when a call or transaction reverts during execution.
    #[error("Execution reverted: {0}")]
    ExecutionReverted(String),
    /// Occurs when the target address holds no contract code.
    #[error("No contract deployed at {0}")]
    NoContract(String),
}

impl BlockchainRpcClientError {
    /// Classifies a JSON-RPC error object, separating reverted executions from other failures.
    #[must_use]
    pub fn from_rpc_error(code: i64, message: &str) -> Self {
        if code == EXECUTION_REVERTED_CODE || message.to_lowercase().contains("revert") {
            Self::ExecutionReverted(message.to_string())
        } else {
            Self::RpcError {
                code,
                message: message.to_string(),
            }
        }
    }

    #[must_use]
    pub const fn is_reverted(&self) -> bool {
        matches!(self, Self::ExecutionReverted(_))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(3, "execution reverted", true)]
    #[case(-32000, "VM Exception while processing transaction: revert", true)]
    #[case(-32000, "insufficient funds for gas", false)]
    #[case(-32601, "Method not found", false)]
    fn test_from_rpc_error(#[case] code: i64, #[case] message: &str, #[case] reverted: bool) {
        assert_eq!(
            BlockchainRpcClientError::from_rpc_error(code, message).is_reverted(),
            reverted
        );
    }
}
