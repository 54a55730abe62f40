//! End-to-end scenarios exercising the invocation driver against an
//! in-memory entity store, one per named case in §8.

use oracle_codec::{encode_i64, encode_preamble, encode_u64};
use oracle_entities::{ids, EntityKind, GlobalState, Message, Nebn, Network};
use oracle_core::{encode_message_body, Call, InvocationDriver, NetworkIdScheme};
use oracle_store::{EntityStore, InMemoryEntityStore};

fn driver() -> InvocationDriver {
    InvocationDriver::new(NetworkIdScheme::ChainId)
}

fn encode_string(s: &str) -> Vec<u8> {
    let mut out = encode_u64(s.len() as u64);
    out.extend_from_slice(s.as_bytes());
    out
}

fn call(tx_hash: &str, tag: u8, body: Vec<u8>) -> Call {
    let mut payload = encode_preamble(&[tag; 16]).to_vec();
    payload.extend(body);
    Call {
        tx_hash: tx_hash.to_string(),
        submitter: "0xsubmitter".to_string(),
        payload,
        block_number: 1,
    }
}

fn load_state(store: &InMemoryEntityStore) -> GlobalState {
    serde_json::from_value(
        store
            .load(EntityKind::GlobalState, ids::CANONICAL_GLOBAL_STATE_ID)
            .unwrap()
            .expect("canonical GlobalState committed"),
    )
    .unwrap()
}

fn load_network(store: &InMemoryEntityStore, id: &str) -> Network {
    serde_json::from_value(
        store
            .load(EntityKind::Network, id)
            .unwrap()
            .unwrap_or_else(|| panic!("network {id} not found")),
    )
    .unwrap()
}

fn load_message(store: &InMemoryEntityStore, id: &str) -> Message {
    serde_json::from_value(
        store
            .load(EntityKind::Message, id)
            .unwrap()
            .unwrap_or_else(|| panic!("message {id} not found")),
    )
    .unwrap()
}

fn load_nebn(store: &InMemoryEntityStore, id: &str) -> Nebn {
    serde_json::from_value(
        store
            .load(EntityKind::NetworkEpochBlockNumber, id)
            .unwrap()
            .unwrap_or_else(|| panic!("NEBN {id} not found")),
    )
    .unwrap()
}

#[test]
fn s1_empty_active_set_set_block_numbers() {
    let store = InMemoryEntityStore::new();
    let d = driver();
    let call = call("0xs1", 0, Vec::new());

    let payload = d.process_call(&store, &call).unwrap();
    assert!(payload.valid);
    assert!(store
        .load(EntityKind::Epoch, &ids::epoch_id(1))
        .unwrap()
        .is_none());
    let state = load_state(&store);
    assert_eq!(state.latest_valid_epoch, None);
}

fn register_eth_and_gno(store: &InMemoryEntityStore) {
    let d = driver();
    let mut body = encode_u64(0); // removeCount
    body.extend(encode_u64(2)); // addCount
    body.extend(encode_string("eth"));
    body.extend(encode_string("gno"));

    let result = d.process_call(store, &call("0xs2", 3, body)).unwrap();
    assert!(result.valid);
}

#[test]
fn s2_register_two_networks() {
    let store = InMemoryEntityStore::new();
    register_eth_and_gno(&store);

    let state = load_state(&store);
    assert_eq!(state.network_count, 2);
    assert_eq!(state.active_network_count, 2);
    assert_eq!(state.network_array_head.as_deref(), Some("eth"));

    let eth = load_network(&store, "eth");
    assert_eq!(eth.next_array_element.as_deref(), Some("gno"));
    let gno = load_network(&store, "gno");
    assert_eq!(gno.next_array_element, None);
}

fn set_block_numbers(store: &InMemoryEntityStore, tx_hash: &str, accelerations: &[i64]) {
    let d = driver();
    let mut body = vec![0x01u8; 32];
    for &a in accelerations {
        body.extend(encode_i64(a));
    }
    let result = d.process_call(store, &call(tx_hash, 0, body)).unwrap();
    assert!(result.valid, "{:?}", result.error_message);
}

#[test]
fn s3_set_block_numbers_after_registration() {
    let store = InMemoryEntityStore::new();
    register_eth_and_gno(&store);
    set_block_numbers(&store, "0xs3", &[5, -3]);

    assert!(store
        .load(EntityKind::Epoch, &ids::epoch_id(1))
        .unwrap()
        .is_some());

    let eth = load_nebn(&store, &ids::nebn_id(1, "eth"));
    assert_eq!((eth.acceleration, eth.delta, eth.block_number), (5, 5, 5));

    let gno = load_nebn(&store, &ids::nebn_id(1, "gno"));
    assert_eq!((gno.acceleration, gno.delta, gno.block_number), (-3, -3, -3));
}

#[test]
fn s4_subsequent_epoch_accumulates() {
    let store = InMemoryEntityStore::new();
    register_eth_and_gno(&store);
    set_block_numbers(&store, "0xs3", &[5, -3]);
    set_block_numbers(&store, "0xs4", &[2, 4]);

    let eth = load_nebn(&store, &ids::nebn_id(2, "eth"));
    assert_eq!((eth.acceleration, eth.delta, eth.block_number), (2, 7, 12));

    let gno = load_nebn(&store, &ids::nebn_id(2, "gno"));
    assert_eq!((gno.acceleration, gno.delta, gno.block_number), (4, 1, -2));
}

#[test]
fn s5_remove_network_via_swap_and_pop() {
    let store = InMemoryEntityStore::new();
    register_eth_and_gno(&store);

    let d = driver();
    let mut body = encode_u64(1); // removeCount
    body.extend(encode_u64(0)); // removeIndex 0 -> "eth"
    body.extend(encode_u64(0)); // addCount
    let result = d.process_call(&store, &call("0xs5", 3, body)).unwrap();
    assert!(result.valid);

    let state = load_state(&store);
    assert_eq!(state.active_network_count, 1);
    assert_eq!(state.network_array_head.as_deref(), Some("gno"));

    let eth = load_network(&store, "eth");
    assert_eq!(eth.removed_at.as_deref(), Some("0xs5-0-0"));
}

#[test]
fn s6_truncated_payload_rolls_back() {
    let store = InMemoryEntityStore::new();
    register_eth_and_gno(&store);
    let state_before = load_state(&store);

    // SetBlockNumbersForEpoch needs a 32-byte merkle root; give it 10.
    let body = vec![0u8; 10];
    let d = driver();
    let result = d.process_call(&store, &call("0xs6", 0, body)).unwrap();

    assert!(!result.valid);
    assert_eq!(result.error_message.as_deref(), Some("truncation"));

    let state_after = load_state(&store);
    assert_eq!(state_before, state_after);
}

#[test]
fn decoded_messages_re_encode_to_their_consumed_bytes() {
    let store = InMemoryEntityStore::new();
    register_eth_and_gno(&store);
    set_block_numbers(&store, "0xs3", &[5, -3]);

    // SetBlockNumbersForEpoch (tag 0) is round-trippable: re-encoding the
    // decoded body must reproduce exactly the bytes the driver consumed.
    let set_block_numbers_message = load_message(&store, "0xs3-0-0");
    assert_eq!(
        encode_message_body(&set_block_numbers_message.body),
        Some(set_block_numbers_message.data.clone())
    );

    // RegisterNetworks (tag 3) loses its removeIndex positions once decoded
    // into removed-network ids, so it is explicitly not round-trippable.
    let register_message = load_message(&store, "0xs2-0-0");
    assert_eq!(encode_message_body(&register_message.body), None);
}
