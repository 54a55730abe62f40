//! Re-encoding of round-trippable message bodies (§8 Invariant 1): for tags
//! whose `MessageBody` retains every byte the decoder consumed,
//! `encode_message_body` reconstructs exactly the bytes the driver advanced
//! the cursor past. `RegisterNetworks`/`RegisterNetworksAndAliases` are not
//! round-trippable: their wire form encodes `removeIndex` positions that
//! `MessageBody` resolves away into removed network ids and doesn't retain.

use oracle_codec::{encode_i64, encode_u64};
use oracle_entities::MessageBody;

/// Returns the bytes that decode back to `body`, or `None` if `body`'s tag
/// doesn't retain enough information to reconstruct its original encoding.
pub fn encode_message_body(body: &MessageBody) -> Option<Vec<u8>> {
    match body {
        MessageBody::SetBlockNumbersForEpoch {
            merkle_root,
            accelerations,
            ..
        } => match merkle_root {
            None => Some(Vec::new()),
            Some(root) => {
                let mut out = root.to_vec();
                for &acceleration in accelerations {
                    out.extend(encode_i64(acceleration));
                }
                Some(out)
            }
        },
        MessageBody::CorrectEpochs => Some(Vec::new()),
        MessageBody::UpdateVersions { new_version, .. } => Some(encode_u64(*new_version as u64)),
        MessageBody::RegisterNetworks { .. } => None,
        MessageBody::RegisterNetworksAndAliases { .. } => None,
        MessageBody::ChangePermissions {
            address,
            valid_through,
            old_permissions,
            new_permissions,
        } => {
            let mut out = address.to_vec();
            out.extend(encode_u64(*valid_through));
            out.extend(encode_string_list(old_permissions));
            out.extend(encode_string_list(new_permissions));
            Some(out)
        }
        MessageBody::ResetState => Some(Vec::new()),
    }
}

fn encode_string_list(strings: &[String]) -> Vec<u8> {
    let mut out = encode_u64(strings.len() as u64);
    for s in strings {
        out.extend(encode_u64(s.len() as u64));
        out.extend_from_slice(s.as_bytes());
    }
    out
}
