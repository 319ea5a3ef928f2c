//! Institution strategy.
//!
//! The owning institution is by far the most common candidate (every record
//! the store's own curators touch names it), so a configured owner accession
//! short-circuits the lookup entirely. Everything else resolves by identity
//! cross-reference, with an exact label match as the fallback.

use std::collections::BTreeMap;

use crate::ambiguity::settle;
use crate::config::ResolverConfig;
use crate::error::ResolveResult;
use crate::identity::IdentityFilter;
use crate::record::{Institution, Record, RecordAc, RecordKind};
use crate::resolver::Resolution;
use crate::storage::StoreGateway;

pub(super) fn resolve(
    candidate: &Institution,
    store: &dyn StoreGateway,
    config: &ResolverConfig,
) -> ResolveResult<Resolution> {
    if let Some(owner_ac) = &config.owner_ac {
        if candidate
            .core
            .short_label
            .eq_ignore_ascii_case(&config.owner_label)
        {
            return Ok(Resolution::Found(owner_ac.clone()));
        }
    }

    let filter = IdentityFilter::identity_only();
    let selected = candidate.core.select_xrefs(&filter);
    if !selected.is_empty() {
        let mut by_ac: BTreeMap<RecordAc, Institution> = BTreeMap::new();
        for xref in &selected {
            for hit in store.institutions_by_xref(&xref.primary_id, &filter)? {
                if let Some(ac) = hit.ac().cloned() {
                    by_ac.insert(ac, hit);
                }
            }
        }
        if !by_ac.is_empty() {
            let ids: Vec<&str> = selected.iter().map(|x| x.primary_id.as_str()).collect();
            let survivors: Vec<&Institution> = by_ac.values().collect();
            return Ok(settle(
                RecordKind::Institution,
                &format!("xref {}", ids.join("/")),
                &survivors,
            ));
        }
    }

    let label = &candidate.core.short_label;
    let hits = store.institutions_by_label(label)?;
    let refs: Vec<&Institution> = hits.iter().collect();
    Ok(settle(RecordKind::Institution, &format!("label {label}"), &refs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CrossReference, TermRef};
    use crate::storage::InMemoryStore;

    fn config() -> ResolverConfig {
        ResolverConfig::new("EBI-", "ebi")
    }

    fn stored(label: &str, ac: &str) -> Institution {
        let mut record = Institution::new(label);
        record.core.set_ac(RecordAc::new(ac));
        record
    }

    fn psi_mi_xref(primary_id: &str) -> CrossReference {
        CrossReference::identity(TermRef::new("psi-mi"), primary_id)
    }

    #[test]
    fn test_owner_short_circuit_skips_the_store() {
        // The store does not even hold the owner; the configured accession
        // answers directly.
        let store = InMemoryStore::new();
        let config = config().with_owner_ac(RecordAc::new("EBI-10"));

        let outcome = resolve(&Institution::new("EBI"), &store, &config).unwrap();
        assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-10")));
    }

    #[test]
    fn test_owner_short_circuit_requires_configured_accession() {
        let store = InMemoryStore::new();
        store.insert_institution(stored("ebi", "EBI-10")).unwrap();

        // Without an owner accession the owner label resolves like any other
        // candidate, through the store.
        let outcome = resolve(&Institution::new("ebi"), &store, &config()).unwrap();
        assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-10")));
    }

    #[test]
    fn test_found_by_identity_xref() {
        let store = InMemoryStore::new();
        let mut mint = stored("mint", "EBI-20");
        mint.core.add_xref(psi_mi_xref("MI:0471"));
        store.insert_institution(mint).unwrap();

        let mut candidate = Institution::new("the mint institute");
        candidate.core.add_xref(psi_mi_xref("MI:0471"));
        let outcome = resolve(&candidate, &store, &config()).unwrap();
        assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-20")));
    }

    #[test]
    fn test_label_fallback_when_xrefs_miss() {
        let store = InMemoryStore::new();
        store.insert_institution(stored("mint", "EBI-20")).unwrap();

        let mut candidate = Institution::new("mint");
        candidate.core.add_xref(psi_mi_xref("MI:9999"));
        let outcome = resolve(&candidate, &store, &config()).unwrap();
        assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-20")));
    }

    #[test]
    fn test_unqualified_xrefs_are_not_identity_claims() {
        let store = InMemoryStore::new();
        let mut mint = stored("mint", "EBI-20");
        mint.core.add_xref(psi_mi_xref("MI:0471"));
        store.insert_institution(mint).unwrap();

        let mut candidate = Institution::new("unrelated");
        candidate
            .core
            .add_xref(CrossReference::new(TermRef::new("psi-mi"), None, "MI:0471"));
        let outcome = resolve(&candidate, &store, &config()).unwrap();
        assert_eq!(outcome, Resolution::NotFound);
    }

    #[test]
    fn test_shared_xref_is_ambiguous() {
        let store = InMemoryStore::new();
        for (label, ac) in [("mint", "EBI-20"), ("mint-copy", "EBI-21")] {
            let mut record = stored(label, ac);
            record.core.add_xref(psi_mi_xref("MI:0471"));
            store.insert_institution(record).unwrap();
        }

        let mut candidate = Institution::new("mint");
        candidate.core.add_xref(psi_mi_xref("MI:0471"));
        let outcome = resolve(&candidate, &store, &config()).unwrap();
        assert!(outcome.is_ambiguous());
    }

    #[test]
    fn test_not_found() {
        let store = InMemoryStore::new();
        let outcome = resolve(&Institution::new("mint"), &store, &config()).unwrap();
        assert_eq!(outcome, Resolution::NotFound);
    }
}
