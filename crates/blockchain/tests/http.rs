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

//! Integration tests for the HTTP JSON-RPC client using a mock node.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use alloy::{
    primitives::{Address, B256, U256, address},
    sol_types::SolCall,
};
use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use corg_blockchain::{
    contracts::{
        dat::{DatContract, IDat, SellEstimate},
        proxy::ProxyContract,
    },
    rpc::{
        RpcClient, SharedRpcClient,
        error::BlockchainRpcClientError,
        http::HttpRpcClient,
        types::{BlockTag, TxParams},
    },
};
use corg_model::enums::LifecycleState;
use rstest::rstest;
use serde_json::{Value, json};
use tokio::sync::Mutex;

const DAT: Address = address!("0x00000000000000000000000000000000000d47a0");
const SENDER: Address = address!("0x00000000000000000000000000000000000b0b00");
const IMPLEMENTATION_WORD: &str =
    "0x000000000000000000000000a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
const TOTAL_SUPPLY: u64 = 1_000_000;
const TX_HASH: &str = "0x8e3b2f0a6c5d4e1f9a7b3c2d1e0f9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c4d3e2f";

#[derive(Clone, Default)]
struct TestServerState {
    requests: Arc<Mutex<Vec<Value>>>,
}

fn rpc_result(id: &Value, result: Value) -> Response {
    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result })).into_response()
}

fn rpc_error(id: &Value, code: i64, message: &str) -> Response {
    Json(json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message, "data": "0x" }
    }))
    .into_response()
}

fn encoded(bytes: &[u8]) -> Value {
    Value::String(format!("0x{}", hex::encode(bytes)))
}

fn handle_eth_call(id: &Value, params: &Value) -> Response {
    let to = params[0]["to"].as_str().unwrap_or_default().to_lowercase();
    if to != DAT.to_string().to_lowercase() {
        return rpc_result(id, json!("0x"));
    }

    let data = params[0]["data"].as_str().unwrap_or_default();
    let data = hex::decode(data.trim_start_matches("0x")).unwrap();
    let selector: [u8; 4] = data[..4].try_into().unwrap();

    if selector == IDat::stateCall::SELECTOR {
        rpc_result(
            id,
            encoded(&IDat::stateCall::abi_encode_returns(&U256::from(1u8))),
        )
    } else if selector == IDat::symbolCall::SELECTOR {
        rpc_result(
            id,
            encoded(&IDat::symbolCall::abi_encode_returns(&"FAIR".to_string())),
        )
    } else if selector == IDat::totalSupplyCall::SELECTOR {
        rpc_result(
            id,
            encoded(&IDat::totalSupplyCall::abi_encode_returns(&U256::from(TOTAL_SUPPLY))),
        )
    } else if selector == IDat::estimateSellValueCall::SELECTOR {
        rpc_error(id, 3, "execution reverted")
    } else {
        rpc_error(id, -32000, "VM Exception while processing transaction: revert")
    }
}

async fn handle_rpc(State(state): State<TestServerState>, Json(request): Json<Value>) -> Response {
    state.requests.lock().await.push(request.clone());

    let id = &request["id"];
    let params = &request["params"];

    match request["method"].as_str().unwrap_or_default() {
        "net_version" => rpc_result(id, json!("1")),
        "eth_call" => handle_eth_call(id, params),
        "eth_getBalance" => rpc_result(id, json!("0xde0b6b3a7640000")),
        "eth_getStorageAt" => rpc_result(id, json!(IMPLEMENTATION_WORD)),
        "eth_getTransactionCount" => {
            if params[1] == "pending" {
                rpc_result(id, json!("0x2a"))
            } else {
                // Stalls past the client timeout
                tokio::time::sleep(Duration::from_secs(2)).await;
                rpc_result(id, json!("0x0"))
            }
        }
        "eth_sendTransaction" => rpc_result(id, json!(TX_HASH)),
        _ => rpc_error(id, -32601, "Method not found"),
    }
}

async fn handle_numeric_net_version(Json(request): Json<Value>) -> impl IntoResponse {
    Json(json!({ "jsonrpc": "2.0", "id": request["id"], "result": 1337 }))
}

async fn handle_garbage() -> impl IntoResponse {
    "<html>502 Bad Gateway</html>"
}

fn create_test_router(state: TestServerState) -> Router {
    Router::new()
        .route("/", post(handle_rpc))
        .route("/numeric", post(handle_numeric_net_version))
        .route("/garbage", post(handle_garbage))
        .with_state(state)
}

async fn start_test_server()
-> Result<(SocketAddr, TestServerState), Box<dyn std::error::Error + Send + Sync>> {
    // Bind to port 0 to let the OS assign an available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = TestServerState::default();
    let router = create_test_router(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok((addr, state))
}

fn client_for(addr: SocketAddr, path: &str) -> HttpRpcClient {
    HttpRpcClient::new(format!("http://{addr}{path}"), Duration::from_millis(500)).unwrap()
}

#[rstest]
#[tokio::test]
async fn test_network_id() {
    let (addr, _state) = start_test_server().await.unwrap();

    assert_eq!(client_for(addr, "/").network_id().await.unwrap(), "1");
    // Some nodes answer with a number
    assert_eq!(client_for(addr, "/numeric").network_id().await.unwrap(), "1337");
}

#[rstest]
#[tokio::test]
async fn test_eth_call_decodes_return_values() {
    let (addr, state) = start_test_server().await.unwrap();
    let client: SharedRpcClient = Arc::new(client_for(addr, "/"));
    let dat = DatContract::new(client);

    assert_eq!(dat.state(&DAT).await.unwrap(), LifecycleState::Run);
    assert_eq!(dat.read(&DAT, &IDat::symbolCall {}).await.unwrap(), "FAIR");

    let requests = state.requests.lock().await;
    assert_eq!(requests[0]["method"], "eth_call");
    assert_eq!(requests[0]["params"][1], "latest");
    assert_eq!(
        requests[0]["params"][0]["data"],
        format!("0x{}", hex::encode(IDat::stateCall::SELECTOR))
    );
}

#[rstest]
#[tokio::test]
async fn test_reverted_sell_estimate_exceeds_supply() {
    let (addr, _state) = start_test_server().await.unwrap();
    let dat = DatContract::new(Arc::new(client_for(addr, "/")));

    let estimate = dat.estimate_sell_value(&DAT, U256::MAX).await.unwrap();

    assert_eq!(estimate, SellEstimate::ExceedsSupply);
}

#[rstest]
#[tokio::test]
async fn test_reverted_sell_estimate_within_supply_propagates() {
    let (addr, _state) = start_test_server().await.unwrap();
    let dat = DatContract::new(Arc::new(client_for(addr, "/")));

    let result = dat
        .estimate_sell_value(&DAT, U256::from(TOTAL_SUPPLY))
        .await;

    assert!(matches!(
        result,
        Err(BlockchainRpcClientError::ExecutionReverted(_))
    ));
}

#[rstest]
#[tokio::test]
async fn test_revert_message_maps_to_execution_reverted() {
    let (addr, _state) = start_test_server().await.unwrap();
    let dat = DatContract::new(Arc::new(client_for(addr, "/")));

    let result = dat.read(&DAT, &IDat::nameCall {}).await;

    assert!(matches!(
        result,
        Err(BlockchainRpcClientError::ExecutionReverted(_))
    ));
}

#[rstest]
#[tokio::test]
async fn test_empty_return_data_is_no_contract() {
    let (addr, _state) = start_test_server().await.unwrap();
    let dat = DatContract::new(Arc::new(client_for(addr, "/")));

    let result = dat.currency_address(&SENDER).await;

    assert!(matches!(result, Err(BlockchainRpcClientError::NoContract(_))));
}

#[rstest]
#[tokio::test]
async fn test_get_balance_and_storage() {
    let (addr, _state) = start_test_server().await.unwrap();
    let client: SharedRpcClient = Arc::new(client_for(addr, "/"));

    let balance = client.get_balance(&SENDER).await.unwrap();
    assert_eq!(balance, U256::from(1_000_000_000_000_000_000u64));

    let implementation = ProxyContract::new(client).implementation(&DAT).await.unwrap();
    assert_eq!(
        implementation,
        Some(address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"))
    );
}

#[rstest]
#[tokio::test]
async fn test_send_transaction() {
    let (addr, state) = start_test_server().await.unwrap();
    let dat = DatContract::new(Arc::new(client_for(addr, "/")));
    let params = TxParams {
        from: SENDER,
        gas: U256::from(500_000u64),
        gas_price: None,
        nonce: None,
        value: Some(U256::from(1_000u64)),
    };

    let hash = dat
        .buy(&DAT, SENDER, U256::from(1_000u64), U256::from(1u8), params)
        .await
        .unwrap();

    assert_eq!(hash, TX_HASH.parse::<B256>().unwrap());
    let requests = state.requests.lock().await;
    let tx = &requests[0]["params"][0];
    assert_eq!(requests[0]["method"], "eth_sendTransaction");
    assert_eq!(tx["gas"], "0x7a120");
    assert_eq!(tx["value"], "0x3e8");
    assert!(tx.get("gasPrice").is_none());
    assert!(
        tx["data"]
            .as_str()
            .unwrap()
            .starts_with(&format!("0x{}", hex::encode(IDat::buyCall::SELECTOR)))
    );
}

#[rstest]
#[tokio::test]
async fn test_pending_transaction_count() {
    let (addr, _state) = start_test_server().await.unwrap();

    let count = client_for(addr, "/")
        .get_transaction_count(&SENDER, BlockTag::Pending)
        .await
        .unwrap();

    assert_eq!(count, U256::from(42u8));
}

#[rstest]
#[tokio::test]
async fn test_request_timeout() {
    let (addr, _state) = start_test_server().await.unwrap();

    let result = client_for(addr, "/")
        .get_transaction_count(&SENDER, BlockTag::Latest)
        .await;

    assert!(matches!(result, Err(BlockchainRpcClientError::Timeout(_))));
}

#[rstest]
#[tokio::test]
async fn test_rpc_error_object() {
    let (addr, _state) = start_test_server().await.unwrap();
    let client = client_for(addr, "/");

    let request = client.construct_rpc_request("eth_unknown", json!([]));
    let result = client.execute_rpc::<String>(request).await;

    assert!(matches!(
        result,
        Err(BlockchainRpcClientError::RpcError { code: -32601, .. })
    ));
}

#[rstest]
#[tokio::test]
async fn test_unparseable_response() {
    let (addr, _state) = start_test_server().await.unwrap();

    let result = client_for(addr, "/garbage").network_id().await;

    match result {
        Err(BlockchainRpcClientError::MessageParsingError(message)) => {
            assert!(message.contains("502 Bad Gateway"));
        }
        other => panic!("Expected a parsing error, was {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn test_unreachable_node() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client_for(addr, "/").network_id().await;

    assert!(matches!(result, Err(BlockchainRpcClientError::ClientError(_))));
}
