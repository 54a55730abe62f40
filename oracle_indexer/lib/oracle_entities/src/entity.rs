use serde::{Deserialize, Serialize};

/// The seven entity kinds of §3, used to key the `EntityStore`/`StoreCache`
/// maps without an enum-per-kind match at the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    GlobalState,
    Network,
    Epoch,
    NetworkEpochBlockNumber,
    Payload,
    MessageBlock,
    Message,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::GlobalState => "GlobalState",
            EntityKind::Network => "Network",
            EntityKind::Epoch => "Epoch",
            EntityKind::NetworkEpochBlockNumber => "NetworkEpochBlockNumber",
            EntityKind::Payload => "Payload",
            EntityKind::MessageBlock => "MessageBlock",
            EntityKind::Message => "Message",
        }
    }
}

/// Implemented by every entity so the generic cache/store machinery can
/// route by kind + id without a handwritten dispatch table per kind.
pub trait Entity: Clone + std::fmt::Debug + Serialize + for<'de> Deserialize<'de> {
    const KIND: EntityKind;
    fn id(&self) -> &str;
    /// A fresh, default-initialized entity keyed by `id`, for the
    /// `StoreCache` get-or-create path (§4.3).
    fn new_with_id(id: &str) -> Self;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalState {
    pub id: String,
    pub network_count: u64,
    pub active_network_count: u64,
    pub network_array_head: Option<String>,
    pub latest_valid_epoch: Option<String>,
    pub encoding_version: u32,
    pub permission_list: Vec<String>,
}

impl GlobalState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl Entity for GlobalState {
    const KIND: EntityKind = EntityKind::GlobalState;
    fn id(&self) -> &str {
        &self.id
    }
    fn new_with_id(id: &str) -> Self {
        GlobalState::new(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub chain_id: String,
    pub alias: Option<String>,
    pub added_at: String,
    pub last_updated_at: String,
    pub removed_at: Option<String>,
    pub next_array_element: Option<String>,
    pub array_index: Option<u32>,
    pub state: Option<String>,
    pub latest_valid_block_number: Option<String>,
}

impl Entity for Network {
    const KIND: EntityKind = EntityKind::Network;
    fn id(&self) -> &str {
        &self.chain_id
    }
    fn new_with_id(id: &str) -> Self {
        Network {
            chain_id: id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Epoch {
    pub id: String,
    pub epoch_number: u128,
}

impl Entity for Epoch {
    const KIND: EntityKind = EntityKind::Epoch;
    fn id(&self) -> &str {
        &self.id
    }
    fn new_with_id(id: &str) -> Self {
        Epoch {
            id: id.to_string(),
            epoch_number: id.parse().unwrap_or(0),
        }
    }
}

/// `NetworkEpochBlockNumber`, abbreviated NEBN throughout this crate and
/// the driver, per the glossary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nebn {
    pub id: String,
    pub acceleration: i128,
    pub delta: i128,
    pub block_number: i128,
    pub epoch_number: u128,
    pub network: String,
    pub epoch: String,
    pub previous_block_number: Option<String>,
}

impl Entity for Nebn {
    const KIND: EntityKind = EntityKind::NetworkEpochBlockNumber;
    fn id(&self) -> &str {
        &self.id
    }
    fn new_with_id(id: &str) -> Self {
        Nebn {
            id: id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub tx_hash: String,
    pub data: Vec<u8>,
    pub submitter: String,
    pub valid: bool,
    pub created_at: u64,
    pub error_message: Option<String>,
}

impl Entity for Payload {
    const KIND: EntityKind = EntityKind::Payload;
    fn id(&self) -> &str {
        &self.tx_hash
    }
    fn new_with_id(id: &str) -> Self {
        Payload {
            tx_hash: id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageBlock {
    pub id: String,
    pub data: Vec<u8>,
    pub payload: String,
}

impl Entity for MessageBlock {
    const KIND: EntityKind = EntityKind::MessageBlock;
    fn id(&self) -> &str {
        &self.id
    }
    fn new_with_id(id: &str) -> Self {
        MessageBlock {
            id: id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessageBody {
    SetBlockNumbersForEpoch {
        epoch: Option<String>,
        merkle_root: Option<[u8; 32]>,
        accelerations: Vec<i64>,
    },
    CorrectEpochs,
    UpdateVersions {
        old_version: u32,
        new_version: u32,
    },
    RegisterNetworks {
        removed: Vec<String>,
        added: Vec<String>,
    },
    RegisterNetworksAndAliases {
        removed: Vec<String>,
        added: Vec<(String, String)>,
    },
    ChangePermissions {
        address: [u8; 20],
        valid_through: u64,
        old_permissions: Vec<String>,
        new_permissions: Vec<String>,
    },
    ResetState,
}

/// One successfully decoded tag slot. Common fields `(id, block, data)`
/// wrap the variant body, per the design note in §9.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub block: String,
    pub data: Vec<u8>,
    pub body: MessageBody,
}

impl Entity for Message {
    const KIND: EntityKind = EntityKind::Message;
    fn id(&self) -> &str {
        &self.id
    }
    /// Messages are always constructed with an explicit body by the
    /// executors; this default (never persisted as-is) only exists to
    /// satisfy the trait's uniform get-or-create shape.
    fn new_with_id(id: &str) -> Self {
        Message {
            id: id.to_string(),
            block: String::new(),
            data: Vec::new(),
            body: MessageBody::ResetState,
        }
    }
}
