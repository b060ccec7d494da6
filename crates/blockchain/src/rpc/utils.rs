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

use std::str::FromStr;

use alloy::primitives::{B256, U256};

use crate::rpc::error::BlockchainRpcClientError;

/// Decodes a hexadecimal string response from a blockchain RPC call.
///
/// # Errors
///
/// Returns an `BlockchainRpcClientError::AbiDecodingError` if the hex decoding fails.
pub fn decode_hex_response(encoded_response: &str) -> Result<Vec<u8>, BlockchainRpcClientError> {
    // Remove the "0x" prefix if present
    let encoded_str = encoded_response
        .strip_prefix("0x")
        .unwrap_or(encoded_response);
    hex::decode(encoded_str).map_err(|e| {
        BlockchainRpcClientError::AbiDecodingError(format!("Error decoding hex response: {e}"))
    })
}

/// Parses a JSON-RPC hex quantity such as `"0x1bc16d674ec80000"`.
///
/// # Errors
///
/// Returns an error if the value is not a valid 256-bit hex quantity.
pub fn parse_hex_quantity(quantity: &str) -> Result<U256, BlockchainRpcClientError> {
    let digits = quantity.strip_prefix("0x").unwrap_or(quantity);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(|e| {
        BlockchainRpcClientError::MessageParsingError(format!(
            "Invalid hex quantity '{quantity}': {e}"
        ))
    })
}

/// Parses a storage word, left-padding values that some nodes return without leading zeros.
///
/// # Errors
///
/// Returns an error if the value is not hex or longer than 32 bytes.
pub fn parse_storage_word(word: &str) -> Result<B256, BlockchainRpcClientError> {
    let digits = word.strip_prefix("0x").unwrap_or(word);
    if digits.len() > 64 {
        return Err(BlockchainRpcClientError::MessageParsingError(format!(
            "Storage word '{word}' exceeds 32 bytes"
        )));
    }

    B256::from_str(&format!("{digits:0>64}")).map_err(|e| {
        BlockchainRpcClientError::MessageParsingError(format!("Invalid storage word '{word}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0x", vec![])]
    #[case("0xabcd", vec![0xab, 0xcd])]
    #[case("0102", vec![0x01, 0x02])]
    fn test_decode_hex_response(#[case] input: &str, #[case] expected: Vec<u8>) {
        assert_eq!(decode_hex_response(input).unwrap(), expected);
    }

    #[rstest]
    fn test_decode_hex_response_invalid() {
        assert!(matches!(
            decode_hex_response("0xzz"),
            Err(BlockchainRpcClientError::AbiDecodingError(_))
        ));
    }

    #[rstest]
    #[case("0x0", 0)]
    #[case("0x", 0)]
    #[case("0x7a120", 500_000)]
    #[case("0x1bc16d674ec80000", 2_000_000_000_000_000_000)]
    fn test_parse_hex_quantity(#[case] input: &str, #[case] expected: u128) {
        assert_eq!(parse_hex_quantity(input).unwrap(), U256::from(expected));
    }

    #[rstest]
    fn test_parse_storage_word_pads_short_values() {
        let word = parse_storage_word("0x1234").unwrap();
        assert_eq!(word.0[30], 0x12);
        assert_eq!(word.0[31], 0x34);
        assert!(word.0[..30].iter().all(|b| *b == 0));
    }

    #[rstest]
    fn test_parse_storage_word_rejects_oversized() {
        let oversized = format!("0x{}", "f".repeat(66));
        assert!(parse_storage_word(&oversized).is_err());
    }
}
