//! The read-only store query gateway.
//!
//! Strategies never touch the object-relational layer directly: everything
//! they can ask of the store is a finder method on [`StoreGateway`]. Keeping
//! the trait narrow and read-only lets the resolver run against an in-memory
//! fake in tests and guarantees resolution cannot mutate the store.

use thiserror::Error;

use crate::checksum::ContentChecksum;
use crate::identity::IdentityFilter;
use crate::record::{
    BioSource, CvClass, CvTerm, Experiment, Institution, Interaction, Interactor, Publication,
    RecordAc,
};

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed to execute a query.
    #[error("store backend error: {0}")]
    Backend(String),

    /// An insert carried an accession the store already holds.
    #[error("duplicate accession: {0}")]
    DuplicateAccession(RecordAc),

    /// An insert carried no accession. Stored records must be addressable.
    #[error("record '{0}' has no accession")]
    MissingAccession(String),
}

/// Read-only query capability over the curated store.
///
/// Methods returning more than one record must return them in ascending
/// accession order; that ordering is the resolver's determinism contract
/// for a fixed store snapshot. All returned records carry their accessions.
///
/// Note that resolve-then-insert is not atomic: two sessions can resolve the
/// same new candidate to not-found and both insert. The store schema should
/// enforce uniqueness (e.g. on the interaction checksum column) as the
/// backstop; the resolver cannot close that race from the read side.
pub trait StoreGateway: Send + Sync {
    /// Finds institutions carrying a cross-reference with the given primary
    /// id under the filter.
    fn institutions_by_xref(
        &self,
        primary_id: &str,
        filter: &IdentityFilter,
    ) -> Result<Vec<Institution>, StoreError>;

    /// Finds institutions by short label (case-insensitive exact match).
    fn institutions_by_label(&self, label: &str) -> Result<Vec<Institution>, StoreError>;

    /// Finds publications by short label (case-insensitive exact match).
    fn publications_by_label(&self, label: &str) -> Result<Vec<Publication>, StoreError>;

    /// Finds cv terms of a class by controlled identifier.
    fn cv_terms_by_identifier(
        &self,
        class: CvClass,
        identifier: &str,
    ) -> Result<Vec<CvTerm>, StoreError>;

    /// Finds cv terms of a class carrying a cross-reference with the given
    /// primary id under the filter.
    fn cv_terms_by_xref(
        &self,
        class: CvClass,
        primary_id: &str,
        filter: &IdentityFilter,
    ) -> Result<Vec<CvTerm>, StoreError>;

    /// Finds cv terms of a class by short label (case-insensitive exact
    /// match).
    fn cv_terms_by_label(&self, class: CvClass, label: &str) -> Result<Vec<CvTerm>, StoreError>;

    /// Finds experiments by publication key, host taxon, and the two method
    /// identifiers.
    fn experiments_by_publication_key(
        &self,
        publication_key: &str,
        taxon_id: i64,
        detection_identifier: &str,
        identification_identifier: &str,
    ) -> Result<Vec<Experiment>, StoreError>;

    /// Finds experiments by short label (case-insensitive) and the two
    /// method identifiers. The publication-less fallback key.
    fn experiments_by_label(
        &self,
        label: &str,
        detection_identifier: &str,
        identification_identifier: &str,
    ) -> Result<Vec<Experiment>, StoreError>;

    /// Finds interactions whose stored content checksum equals the given one.
    fn interactions_by_checksum(
        &self,
        checksum: ContentChecksum,
    ) -> Result<Vec<Interaction>, StoreError>;

    /// Fetches an interactor by accession.
    fn interactor_by_ac(&self, ac: &RecordAc) -> Result<Option<Interactor>, StoreError>;

    /// Finds interactors carrying a cross-reference with the given primary id
    /// under the filter.
    fn interactors_by_xref(
        &self,
        primary_id: &str,
        filter: &IdentityFilter,
    ) -> Result<Vec<Interactor>, StoreError>;

    /// Finds interactors of any kind by short label (case-insensitive exact
    /// match).
    fn interactors_by_label(&self, label: &str) -> Result<Vec<Interactor>, StoreError>;

    /// Finds biological sources by taxon id.
    fn biosources_by_taxon(&self, taxon_id: i64) -> Result<Vec<BioSource>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test: ensure the gateway is object-safe.
    fn _assert_gateway_object_safe(_: &dyn StoreGateway) {}

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Backend("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));

        let err = StoreError::DuplicateAccession(RecordAc::new("EBI-1"));
        assert!(err.to_string().contains("EBI-1"));

        let err = StoreError::MissingAccession("p53_human".to_string());
        assert!(err.to_string().contains("p53_human"));
    }
}
