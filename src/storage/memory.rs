//! In-memory store backend.
//!
//! A thread-safe reference implementation of [`StoreGateway`] for embedded
//! use and tests. Records live in maps keyed by accession, so every
//! multi-result query comes back in ascending accession order by
//! construction. Interaction checksums are computed once at insert time,
//! mirroring the stored-hash column of a real schema.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard};

use crate::checksum::ContentChecksum;
use crate::identity::IdentityFilter;
use crate::record::{
    BioSource, CvClass, CvTerm, Experiment, Institution, Interaction, Interactor, Publication,
    Record, RecordAc,
};
use crate::storage::traits::{StoreError, StoreGateway};

fn lock_err(context: &'static str) -> StoreError {
    StoreError::Backend(format!("poisoned lock: {context}"))
}

fn normalize_key(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

#[derive(Debug, Default)]
struct StoreState {
    institutions: BTreeMap<RecordAc, Institution>,
    publications: BTreeMap<RecordAc, Publication>,
    cv_terms: BTreeMap<RecordAc, CvTerm>,
    experiments: BTreeMap<RecordAc, Experiment>,
    interactions: BTreeMap<RecordAc, Interaction>,
    interaction_checksums: BTreeMap<RecordAc, ContentChecksum>,
    interactors: BTreeMap<RecordAc, Interactor>,
    biosources: BTreeMap<RecordAc, BioSource>,
}

fn insert_keyed<T: Record>(
    map: &mut BTreeMap<RecordAc, T>,
    record: T,
) -> Result<RecordAc, StoreError> {
    let ac = record
        .ac()
        .cloned()
        .ok_or_else(|| StoreError::MissingAccession(record.short_label().to_string()))?;
    if map.contains_key(&ac) {
        return Err(StoreError::DuplicateAccession(ac));
    }
    map.insert(ac.clone(), record);
    Ok(ac)
}

/// Thread-safe in-memory store.
///
/// # Examples
///
/// ```
/// use curamatch::{InMemoryStore, Institution, RecordAc, StoreGateway};
///
/// let store = InMemoryStore::new();
/// let mut ebi = Institution::new("ebi");
/// ebi.core.set_ac(RecordAc::new("EBI-10"));
/// store.insert_institution(ebi).unwrap();
///
/// let found = store.institutions_by_label("EBI").unwrap();
/// assert_eq!(found.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, context: &'static str) -> Result<RwLockReadGuard<'_, StoreState>, StoreError> {
        self.state.read().map_err(|_| lock_err(context))
    }

    /// Inserts an institution. The record must carry an accession.
    pub fn insert_institution(&self, record: Institution) -> Result<(), StoreError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("institution.insert"))?;
        insert_keyed(&mut state.institutions, record)?;
        Ok(())
    }

    /// Inserts a publication. The record must carry an accession.
    pub fn insert_publication(&self, record: Publication) -> Result<(), StoreError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("publication.insert"))?;
        insert_keyed(&mut state.publications, record)?;
        Ok(())
    }

    /// Inserts a cv term. The record must carry an accession.
    pub fn insert_cv_term(&self, record: CvTerm) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| lock_err("cv_term.insert"))?;
        insert_keyed(&mut state.cv_terms, record)?;
        Ok(())
    }

    /// Inserts an experiment. The record must carry an accession.
    pub fn insert_experiment(&self, record: Experiment) -> Result<(), StoreError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("experiment.insert"))?;
        insert_keyed(&mut state.experiments, record)?;
        Ok(())
    }

    /// Inserts an interaction and records its content checksum.
    pub fn insert_interaction(&self, record: Interaction) -> Result<(), StoreError> {
        let checksum = ContentChecksum::of(&record);
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("interaction.insert"))?;
        let ac = insert_keyed(&mut state.interactions, record)?;
        state.interaction_checksums.insert(ac, checksum);
        Ok(())
    }

    /// Inserts an interactor. The record must carry an accession.
    pub fn insert_interactor(&self, record: Interactor) -> Result<(), StoreError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("interactor.insert"))?;
        insert_keyed(&mut state.interactors, record)?;
        Ok(())
    }

    /// Inserts a biological source. The record must carry an accession.
    pub fn insert_biosource(&self, record: BioSource) -> Result<(), StoreError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("biosource.insert"))?;
        insert_keyed(&mut state.biosources, record)?;
        Ok(())
    }
}

impl StoreGateway for InMemoryStore {
    fn institutions_by_xref(
        &self,
        primary_id: &str,
        filter: &IdentityFilter,
    ) -> Result<Vec<Institution>, StoreError> {
        let state = self.read("institution.by_xref")?;
        Ok(state
            .institutions
            .values()
            .filter(|r| has_xref(&r.core.xrefs, primary_id, filter))
            .cloned()
            .collect())
    }

    fn institutions_by_label(&self, label: &str) -> Result<Vec<Institution>, StoreError> {
        let key = normalize_key(label);
        let state = self.read("institution.by_label")?;
        Ok(state
            .institutions
            .values()
            .filter(|r| normalize_key(&r.core.short_label) == key)
            .cloned()
            .collect())
    }

    fn publications_by_label(&self, label: &str) -> Result<Vec<Publication>, StoreError> {
        let key = normalize_key(label);
        let state = self.read("publication.by_label")?;
        Ok(state
            .publications
            .values()
            .filter(|r| normalize_key(&r.core.short_label) == key)
            .cloned()
            .collect())
    }

    fn cv_terms_by_identifier(
        &self,
        class: CvClass,
        identifier: &str,
    ) -> Result<Vec<CvTerm>, StoreError> {
        let state = self.read("cv_term.by_identifier")?;
        Ok(state
            .cv_terms
            .values()
            .filter(|r| {
                r.class == class
                    && r.identifier
                        .as_deref()
                        .map_or(false, |id| id.eq_ignore_ascii_case(identifier))
            })
            .cloned()
            .collect())
    }

    fn cv_terms_by_xref(
        &self,
        class: CvClass,
        primary_id: &str,
        filter: &IdentityFilter,
    ) -> Result<Vec<CvTerm>, StoreError> {
        let state = self.read("cv_term.by_xref")?;
        Ok(state
            .cv_terms
            .values()
            .filter(|r| r.class == class && has_xref(&r.core.xrefs, primary_id, filter))
            .cloned()
            .collect())
    }

    fn cv_terms_by_label(&self, class: CvClass, label: &str) -> Result<Vec<CvTerm>, StoreError> {
        let key = normalize_key(label);
        let state = self.read("cv_term.by_label")?;
        Ok(state
            .cv_terms
            .values()
            .filter(|r| r.class == class && normalize_key(&r.core.short_label) == key)
            .cloned()
            .collect())
    }

    fn experiments_by_publication_key(
        &self,
        publication_key: &str,
        taxon_id: i64,
        detection_identifier: &str,
        identification_identifier: &str,
    ) -> Result<Vec<Experiment>, StoreError> {
        let state = self.read("experiment.by_publication_key")?;
        Ok(state
            .experiments
            .values()
            .filter(|r| {
                r.publication_key()
                    .map_or(false, |key| key.eq_ignore_ascii_case(publication_key))
                    && r.biosource.as_ref().map_or(false, |b| b.taxon_id == taxon_id)
                    && has_method(r.detection_method.as_ref(), detection_identifier)
                    && has_method(r.identification_method.as_ref(), identification_identifier)
            })
            .cloned()
            .collect())
    }

    fn experiments_by_label(
        &self,
        label: &str,
        detection_identifier: &str,
        identification_identifier: &str,
    ) -> Result<Vec<Experiment>, StoreError> {
        let key = normalize_key(label);
        let state = self.read("experiment.by_label")?;
        Ok(state
            .experiments
            .values()
            .filter(|r| {
                normalize_key(&r.core.short_label) == key
                    && has_method(r.detection_method.as_ref(), detection_identifier)
                    && has_method(r.identification_method.as_ref(), identification_identifier)
            })
            .cloned()
            .collect())
    }

    fn interactions_by_checksum(
        &self,
        checksum: ContentChecksum,
    ) -> Result<Vec<Interaction>, StoreError> {
        let state = self.read("interaction.by_checksum")?;
        Ok(state
            .interaction_checksums
            .iter()
            .filter(|(_, stored)| **stored == checksum)
            .filter_map(|(ac, _)| state.interactions.get(ac))
            .cloned()
            .collect())
    }

    fn interactor_by_ac(&self, ac: &RecordAc) -> Result<Option<Interactor>, StoreError> {
        let state = self.read("interactor.by_ac")?;
        Ok(state.interactors.get(ac).cloned())
    }

    fn interactors_by_xref(
        &self,
        primary_id: &str,
        filter: &IdentityFilter,
    ) -> Result<Vec<Interactor>, StoreError> {
        let state = self.read("interactor.by_xref")?;
        Ok(state
            .interactors
            .values()
            .filter(|r| has_xref(&r.core.xrefs, primary_id, filter))
            .cloned()
            .collect())
    }

    fn interactors_by_label(&self, label: &str) -> Result<Vec<Interactor>, StoreError> {
        let key = normalize_key(label);
        let state = self.read("interactor.by_label")?;
        Ok(state
            .interactors
            .values()
            .filter(|r| normalize_key(&r.core.short_label) == key)
            .cloned()
            .collect())
    }

    fn biosources_by_taxon(&self, taxon_id: i64) -> Result<Vec<BioSource>, StoreError> {
        let state = self.read("biosource.by_taxon")?;
        Ok(state
            .biosources
            .values()
            .filter(|r| r.taxon_id == taxon_id)
            .cloned()
            .collect())
    }
}

fn has_xref(
    xrefs: &[crate::record::CrossReference],
    primary_id: &str,
    filter: &IdentityFilter,
) -> bool {
    filter.select(xrefs).iter().any(|x| x.primary_id == primary_id)
}

fn has_method(method: Option<&CvTerm>, identifier: &str) -> bool {
    method
        .and_then(|m| m.identifier.as_deref())
        .map_or(false, |id| id.eq_ignore_ascii_case(identifier))
}
