//! Interaction strategy.
//!
//! The content checksum over the canonical participant/type data is the one
//! and only key: zero hits is a clean not-found, one hit is a match. More
//! than one hit means the store holds several interactions with identical
//! canonical content, an integrity anomaly. The default answer is ambiguous;
//! [`ResolverConfig::allow_checksum_collision_fallback`] opts into the
//! degraded first-match behavior, and every use of it is logged at error
//! level.

use tracing::{error, warn};

use crate::checksum::ContentChecksum;
use crate::config::ResolverConfig;
use crate::error::ResolveResult;
use crate::record::{Interaction, Record, RecordAc, RecordKind};
use crate::resolver::{Ambiguity, Resolution};
use crate::storage::StoreGateway;

pub(super) fn resolve(
    candidate: &Interaction,
    store: &dyn StoreGateway,
    config: &ResolverConfig,
) -> ResolveResult<Resolution> {
    let checksum = ContentChecksum::of(candidate);
    let hits = store.interactions_by_checksum(checksum)?;
    let acs: Vec<&RecordAc> = hits.iter().filter_map(|r| r.ac()).collect();

    match acs.as_slice() {
        [] => Ok(Resolution::NotFound),
        [ac] => Ok(Resolution::Found((*ac).clone())),
        [first, ..] => {
            warn!(
                target: "curamatch::resolve",
                checksum = %checksum,
                count = acs.len(),
                "several stored interactions share one content checksum"
            );
            if config.allow_checksum_collision_fallback {
                error!(
                    target: "curamatch::resolve",
                    checksum = %checksum,
                    winner = %first,
                    "collision fallback engaged: preferring the first match in accession order"
                );
                Ok(Resolution::Found((*first).clone()))
            } else {
                Ok(Resolution::Ambiguous(Ambiguity::MultipleMatches {
                    kind: RecordKind::Interaction,
                    key: format!("checksum {checksum}"),
                    count: acs.len(),
                }))
            }
        }
    }
}
