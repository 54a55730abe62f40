//! One file per message tag (§4.5), each implementing [`MessageExecutor`].
//! [`registry`] wires all seven into the table the driver dispatches
//! through.

mod change_permissions;
mod correct_epochs;
mod register_networks;
mod register_networks_and_aliases;
mod reset_state;
mod set_block_numbers_for_epoch;
mod shared;
mod update_versions;

use std::collections::HashMap;

use crate::executor::MessageExecutor;

pub use change_permissions::ChangePermissions;
pub use correct_epochs::CorrectEpochs;
pub use register_networks::RegisterNetworks;
pub use register_networks_and_aliases::RegisterNetworksAndAliases;
pub use reset_state::{ResetState, INITIAL_ENCODING_VERSION};
pub use set_block_numbers_for_epoch::SetBlockNumbersForEpoch;
pub use update_versions::UpdateVersions;

/// Builds the tag -> executor table the driver dispatches preamble slots
/// through. Tags without an entry are unknown and terminate the current
/// message block (§7).
pub fn registry() -> HashMap<u8, Box<dyn MessageExecutor + Send + Sync>> {
    let mut map: HashMap<u8, Box<dyn MessageExecutor + Send + Sync>> = HashMap::new();
    map.insert(0, Box::new(SetBlockNumbersForEpoch));
    map.insert(1, Box::new(CorrectEpochs));
    map.insert(2, Box::new(UpdateVersions));
    map.insert(3, Box::new(RegisterNetworks));
    map.insert(4, Box::new(RegisterNetworksAndAliases));
    map.insert(5, Box::new(ChangePermissions));
    map.insert(6, Box::new(ResetState));
    map
}
