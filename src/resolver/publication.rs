//! Publication strategy.
//!
//! Publications are keyed store-wide by short label (by convention the
//! PubMed id), so resolution is a single exact label lookup. An empty label
//! is a precondition failure: there is nothing to resolve against.

use crate::ambiguity::settle;
use crate::error::{PreconditionError, ResolveResult};
use crate::record::{Publication, RecordKind};
use crate::resolver::Resolution;
use crate::storage::StoreGateway;

pub(super) fn resolve(
    candidate: &Publication,
    store: &dyn StoreGateway,
) -> ResolveResult<Resolution> {
    let label = candidate.core.short_label.trim();
    if label.is_empty() {
        return Err(PreconditionError::PublicationWithoutLabel.into());
    }

    let hits = store.publications_by_label(label)?;
    let refs: Vec<&Publication> = hits.iter().collect();
    Ok(settle(
        RecordKind::Publication,
        &format!("label {label}"),
        &refs,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordAc;
    use crate::storage::InMemoryStore;

    fn stored(label: &str, ac: &str) -> Publication {
        let mut record = Publication::new(label);
        record.core.set_ac(RecordAc::new(ac));
        record
    }

    #[test]
    fn test_found_by_label() {
        let store = InMemoryStore::new();
        store.insert_publication(stored("15630443", "EBI-5")).unwrap();

        let outcome = resolve(&Publication::new("15630443"), &store).unwrap();
        assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-5")));
    }

    #[test]
    fn test_label_match_is_case_insensitive() {
        let store = InMemoryStore::new();
        store.insert_publication(stored("Unassigned-604", "EBI-5")).unwrap();

        let outcome = resolve(&Publication::new("unassigned-604"), &store).unwrap();
        assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-5")));
    }

    #[test]
    fn test_not_found() {
        let store = InMemoryStore::new();
        store.insert_publication(stored("15630443", "EBI-5")).unwrap();

        let outcome = resolve(&Publication::new("99999999"), &store).unwrap();
        assert_eq!(outcome, Resolution::NotFound);
    }

    #[test]
    fn test_duplicate_labels_are_ambiguous() {
        let store = InMemoryStore::new();
        store.insert_publication(stored("15630443", "EBI-5")).unwrap();
        store.insert_publication(stored("15630443", "EBI-6")).unwrap();

        let outcome = resolve(&Publication::new("15630443"), &store).unwrap();
        assert!(outcome.is_ambiguous());
    }

    #[test]
    fn test_empty_label_is_a_precondition_error() {
        let store = InMemoryStore::new();
        let err = resolve(&Publication::new("   "), &store).unwrap_err();
        assert!(err.is_precondition());
    }
}
