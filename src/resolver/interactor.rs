//! Interactor strategy.
//!
//! Three keys, strongest first. An own-namespace cross-reference is an
//! explicit self-claim ("I am EBI-X") and resolves exactly. External identity
//! cross-references (uniprot/chebi/ensembl-class accessions) are tried one at
//! a time against same-kind stored records, with the `no-external-update`
//! curation lock and sequence equality as tie-breaks and the parent lineage
//! as a final guard. A candidate claiming no identity at all falls back to
//! its label, a weaker key, since nothing stops two different molecules from
//! sharing one label.

use tracing::{debug, warn};

use crate::ambiguity::{narrow, settle};
use crate::config::ResolverConfig;
use crate::error::ResolveResult;
use crate::identity::IdentityFilter;
use crate::record::{vocab, Interactor, Record, RecordAc, RecordKind};
use crate::resolver::{Ambiguity, Resolution};
use crate::storage::StoreGateway;

pub(super) fn resolve(
    candidate: &Interactor,
    store: &dyn StoreGateway,
    config: &ResolverConfig,
) -> ResolveResult<Resolution> {
    if let Some(resolution) = resolve_own_namespace(candidate, store, config)? {
        return Ok(resolution);
    }
    if candidate
        .core
        .select_xrefs(&IdentityFilter::identity_only())
        .is_empty()
    {
        return resolve_by_label(candidate, store);
    }
    resolve_external_identity(candidate, store)
}

/// The exact fast path: a cross-reference whose primary id lives in our own
/// accession namespace names the stored record directly.
fn resolve_own_namespace(
    candidate: &Interactor,
    store: &dyn StoreGateway,
    config: &ResolverConfig,
) -> ResolveResult<Option<Resolution>> {
    let lineage = IdentityFilter::lineage();
    for xref in &candidate.core.xrefs {
        // A parent pointer into our own namespace names a different record,
        // never this one.
        if !config.is_own_accession(&xref.primary_id) || lineage.matches(xref) {
            continue;
        }
        let ac = RecordAc::new(xref.primary_id.clone());
        if let Some(stored) = store.interactor_by_ac(&ac)? {
            let found = stored.ac().cloned().unwrap_or(ac);
            return Ok(Some(Resolution::Found(found)));
        }
        debug!(
            target: "curamatch::resolve",
            label = %candidate.core.short_label,
            ac = %ac,
            "own-namespace cross-reference points at no stored interactor, ignoring it"
        );
    }
    Ok(None)
}

/// Tries each external identity cross-reference in turn; the first one whose
/// stored matches survive the tie-breaks decides.
fn resolve_external_identity(
    candidate: &Interactor,
    store: &dyn StoreGateway,
) -> ResolveResult<Resolution> {
    let filter = IdentityFilter::external_identity();
    for xref in candidate.core.select_xrefs(&filter) {
        let hits = store.interactors_by_xref(&xref.primary_id, &filter)?;
        let same_kind = narrow(hits.iter().collect(), |stored: &Interactor| {
            stored.kind == candidate.kind
        });
        let matched: &Interactor = if same_kind.is_empty() {
            continue;
        } else if same_kind.len() == 1 {
            same_kind[0]
        } else if candidate
            .core
            .has_annotation_topic(vocab::NO_EXTERNAL_UPDATE_TOPIC)
        {
            // A curation-locked candidate only matches a stored record that
            // is also locked, and for polymers only one with the identical
            // sequence.
            let locked = narrow(same_kind, |stored| {
                stored
                    .core
                    .has_annotation_topic(vocab::NO_EXTERNAL_UPDATE_TOPIC)
            });
            let survivors = if candidate.kind.is_polymer() {
                narrow(locked, |stored| stored.sequence == candidate.sequence)
            } else {
                locked
            };
            match survivors.len() {
                0 => continue,
                1 => survivors[0],
                count => {
                    return Ok(Resolution::Ambiguous(Ambiguity::MultipleMatches {
                        kind: RecordKind::Interactor,
                        key: format!("xref {}", xref.primary_id),
                        count,
                    }))
                }
            }
        } else {
            warn!(
                target: "curamatch::resolve",
                xref = %xref.primary_id,
                count = same_kind.len(),
                "several stored interactors share one identity cross-reference, accepting the first in accession order"
            );
            same_kind[0]
        };

        // An isoform or chain is only the same record as a match with exactly
        // the same set of parents.
        let parents = candidate.parent_ids();
        if !parents.is_empty() && matched.parent_ids() != parents {
            debug!(
                target: "curamatch::resolve",
                label = %candidate.core.short_label,
                matched = %matched.core.short_label,
                "identity match rejected, parent lineages differ"
            );
            return Ok(Resolution::NotFound);
        }

        return Ok(matched
            .ac()
            .cloned()
            .map_or(Resolution::NotFound, Resolution::Found));
    }
    Ok(Resolution::NotFound)
}

fn resolve_by_label(candidate: &Interactor, store: &dyn StoreGateway) -> ResolveResult<Resolution> {
    debug!(
        target: "curamatch::resolve",
        label = %candidate.core.short_label,
        kind = %candidate.kind,
        "interactor carries no identity cross-references, falling back to the label key"
    );
    let hits = store.interactors_by_label(&candidate.core.short_label)?;
    let refs: Vec<&Interactor> = hits.iter().collect();
    Ok(settle(
        RecordKind::Interactor,
        &format!("label {}", candidate.core.short_label),
        &refs,
    ))
}
