//! Biological-source strategy.
//!
//! Identity is the full (taxon id, cell type, tissue) triple: the taxon id
//! selects the stored candidates, and the culture terms narrow them. A plain
//! organism and the same organism narrowed to a cell line are distinct
//! records.

use crate::ambiguity::{narrow, settle};
use crate::error::ResolveResult;
use crate::record::{BioSource, RecordKind};
use crate::resolver::Resolution;
use crate::storage::StoreGateway;

pub(super) fn resolve(candidate: &BioSource, store: &dyn StoreGateway) -> ResolveResult<Resolution> {
    let hits = store.biosources_by_taxon(candidate.taxon_id)?;
    let survivors = narrow(hits.iter().collect(), |stored: &BioSource| {
        candidate.same_culture_terms(stored)
    });
    Ok(settle(
        RecordKind::BioSource,
        &format!("taxon {}", candidate.taxon_id),
        &survivors,
    ))
}
