use rsk_rpc_compat::rpc::{spawn_rpc_server, MockRpc, NodeOptions};
use rsk_rpc_compat::{dial, Address, Bytes, RskClient, TransportConfig};

/// Address of the deployed test contract.
#[allow(unused)]
pub fn contract_address() -> Address {
    "0x0000000000000000000000000000000001000006"
        .parse()
        .unwrap()
}

/// Runtime code of a contract that stores its first calldata word.
#[allow(unused)]
pub fn contract_code() -> Bytes {
    "0x60003560005500".parse().unwrap()
}

/// An account that never gets code.
#[allow(unused)]
pub fn plain_account() -> Address {
    Address::repeat_byte(0x11)
}

/// Spawns a mock node with the test contract deployed and dials it.
#[allow(unused)]
pub async fn create_node_and_client(options: NodeOptions) -> (MockRpc, RskClient) {
    let server = spawn_rpc_server(options).await.unwrap();
    server.ledger.deploy(contract_address(), contract_code());
    println!("Server started at {}", server.url());

    let client = dial(&server.url(), &TransportConfig::default()).unwrap();

    (server, client)
}
