//! Controlled-vocabulary term strategy.
//!
//! A controlled identifier is the strongest key and is never overruled: when
//! the candidate carries one that the store does not know, a label that
//! happens to match some other term is a curation data-entry problem and is
//! surfaced as [`Ambiguity::IdentifierLabelConflict`], not silently matched.
//! Identity/secondary cross-references stand in when no identifier is
//! assigned, and the bare label only counts for candidates that claim no
//! identity at all.

use std::collections::BTreeMap;

use crate::ambiguity::settle;
use crate::error::ResolveResult;
use crate::identity::IdentityFilter;
use crate::record::{CvTerm, Record, RecordAc, RecordKind};
use crate::resolver::{Ambiguity, Resolution};
use crate::storage::StoreGateway;

pub(super) fn resolve(candidate: &CvTerm, store: &dyn StoreGateway) -> ResolveResult<Resolution> {
    if let Some(identifier) = candidate.identifier.as_deref() {
        let hits = store.cv_terms_by_identifier(candidate.class, identifier)?;
        if hits.is_empty() {
            return conflict_or_not_found(candidate, identifier, store);
        }
        let refs: Vec<&CvTerm> = hits.iter().collect();
        return Ok(settle(
            RecordKind::CvTerm,
            &format!("identifier {identifier}"),
            &refs,
        ));
    }

    let filter = IdentityFilter::identity_or_secondary();
    let selected = candidate.core.select_xrefs(&filter);
    if !selected.is_empty() {
        let mut by_ac: BTreeMap<RecordAc, CvTerm> = BTreeMap::new();
        for xref in &selected {
            for hit in store.cv_terms_by_xref(candidate.class, &xref.primary_id, &filter)? {
                if let Some(ac) = hit.ac().cloned() {
                    by_ac.insert(ac, hit);
                }
            }
        }
        let ids: Vec<&str> = selected.iter().map(|x| x.primary_id.as_str()).collect();
        let survivors: Vec<&CvTerm> = by_ac.values().collect();
        return Ok(settle(
            RecordKind::CvTerm,
            &format!("xref {}", ids.join("/")),
            &survivors,
        ));
    }

    let label = &candidate.core.short_label;
    let hits = store.cv_terms_by_label(candidate.class, label)?;
    let refs: Vec<&CvTerm> = hits.iter().collect();
    Ok(settle(RecordKind::CvTerm, &format!("label {label}"), &refs))
}

/// The candidate's identifier matched nothing. If its label matches some
/// stored term anyway, that term is by construction a different one; report
/// the conflict instead of guessing.
fn conflict_or_not_found(
    candidate: &CvTerm,
    identifier: &str,
    store: &dyn StoreGateway,
) -> ResolveResult<Resolution> {
    let label_hits = store.cv_terms_by_label(candidate.class, &candidate.core.short_label)?;
    match label_hits.iter().find_map(|t| t.ac().cloned()) {
        Some(label_match) => Ok(Resolution::Ambiguous(Ambiguity::IdentifierLabelConflict {
            identifier: identifier.to_string(),
            label: candidate.core.short_label.clone(),
            label_match,
        })),
        None => Ok(Resolution::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CrossReference, CvClass, TermRef};
    use crate::storage::InMemoryStore;

    fn stored(class: CvClass, label: &str, identifier: &str, ac: &str) -> CvTerm {
        let mut record = CvTerm::with_identifier(class, label, identifier);
        record.core.set_ac(RecordAc::new(ac));
        record
    }

    #[test]
    fn test_found_by_identifier() {
        let store = InMemoryStore::new();
        store
            .insert_cv_term(stored(CvClass::InteractionDetection, "two hybrid", "MI:0018", "EBI-30"))
            .unwrap();

        let candidate =
            CvTerm::with_identifier(CvClass::InteractionDetection, "2h", "mi:0018");
        let outcome = resolve(&candidate, &store).unwrap();
        assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-30")));
    }

    #[test]
    fn test_identifier_lookup_is_class_scoped() {
        let store = InMemoryStore::new();
        store
            .insert_cv_term(stored(CvClass::InteractionDetection, "two hybrid", "MI:0018", "EBI-30"))
            .unwrap();

        let candidate =
            CvTerm::with_identifier(CvClass::ParticipantIdentification, "two hybrid", "MI:0018");
        let outcome = resolve(&candidate, &store).unwrap();
        assert_eq!(outcome, Resolution::NotFound);
    }

    #[test]
    fn test_unknown_identifier_with_matching_label_is_a_conflict() {
        let store = InMemoryStore::new();
        store
            .insert_cv_term(stored(CvClass::InteractionDetection, "two hybrid", "MI:0018", "EBI-30"))
            .unwrap();

        let candidate =
            CvTerm::with_identifier(CvClass::InteractionDetection, "two hybrid", "MI:9999");
        let outcome = resolve(&candidate, &store).unwrap();
        let Resolution::Ambiguous(Ambiguity::IdentifierLabelConflict {
            identifier,
            label,
            label_match,
        }) = outcome
        else {
            panic!("expected identifier/label conflict, got {outcome:?}");
        };
        assert_eq!(identifier, "MI:9999");
        assert_eq!(label, "two hybrid");
        assert_eq!(label_match, RecordAc::new("EBI-30"));
    }

    #[test]
    fn test_unknown_identifier_and_unknown_label_is_not_found() {
        let store = InMemoryStore::new();
        store
            .insert_cv_term(stored(CvClass::InteractionDetection, "two hybrid", "MI:0018", "EBI-30"))
            .unwrap();

        let candidate =
            CvTerm::with_identifier(CvClass::InteractionDetection, "brand new method", "MI:9999");
        assert_eq!(resolve(&candidate, &store).unwrap(), Resolution::NotFound);
    }

    #[test]
    fn test_found_by_identity_xref_when_identifier_absent() {
        let store = InMemoryStore::new();
        let mut hela = CvTerm::new(CvClass::CellType, "hela");
        hela.core.set_ac(RecordAc::new("EBI-40"));
        hela.core
            .add_xref(CrossReference::identity(TermRef::new("cabri"), "ACC-57"));
        store.insert_cv_term(hela).unwrap();

        let mut candidate = CvTerm::new(CvClass::CellType, "hela cervix carcinoma");
        candidate
            .core
            .add_xref(CrossReference::identity(TermRef::new("cabri"), "ACC-57"));
        let outcome = resolve(&candidate, &store).unwrap();
        assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-40")));
    }

    #[test]
    fn test_identity_xref_candidate_never_falls_back_to_label() {
        let store = InMemoryStore::new();
        let mut hela = CvTerm::new(CvClass::CellType, "hela");
        hela.core.set_ac(RecordAc::new("EBI-40"));
        store.insert_cv_term(hela).unwrap();

        // Same label as the stored term, but the candidate claims an identity
        // the store cannot corroborate.
        let mut candidate = CvTerm::new(CvClass::CellType, "hela");
        candidate
            .core
            .add_xref(CrossReference::identity(TermRef::new("cabri"), "ACC-57"));
        assert_eq!(resolve(&candidate, &store).unwrap(), Resolution::NotFound);
    }

    #[test]
    fn test_bare_candidate_resolves_by_label() {
        let store = InMemoryStore::new();
        let mut liver = CvTerm::new(CvClass::Tissue, "liver");
        liver.core.set_ac(RecordAc::new("EBI-41"));
        store.insert_cv_term(liver).unwrap();

        let outcome = resolve(&CvTerm::new(CvClass::Tissue, "Liver"), &store).unwrap();
        assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-41")));
    }

    #[test]
    fn test_non_identity_xrefs_do_not_gate_the_label_fallback() {
        let store = InMemoryStore::new();
        let mut liver = CvTerm::new(CvClass::Tissue, "liver");
        liver.core.set_ac(RecordAc::new("EBI-41"));
        store.insert_cv_term(liver).unwrap();

        // A see-also pointer is not an identity claim; the label still
        // decides.
        let mut candidate = CvTerm::new(CvClass::Tissue, "liver");
        candidate.core.add_xref(CrossReference::new(
            TermRef::new("see-also-db"),
            Some(TermRef::new("see-also")),
            "SA-1",
        ));
        let outcome = resolve(&candidate, &store).unwrap();
        assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-41")));
    }

    #[test]
    fn test_duplicate_identifiers_are_ambiguous() {
        let store = InMemoryStore::new();
        store
            .insert_cv_term(stored(CvClass::InteractionDetection, "two hybrid", "MI:0018", "EBI-30"))
            .unwrap();
        store
            .insert_cv_term(stored(CvClass::InteractionDetection, "2h", "MI:0018", "EBI-31"))
            .unwrap();

        let candidate =
            CvTerm::with_identifier(CvClass::InteractionDetection, "two hybrid", "MI:0018");
        assert!(resolve(&candidate, &store).unwrap().is_ambiguous());
    }
}
