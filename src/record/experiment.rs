//! Experiments.

use serde::{Deserialize, Serialize};

use crate::record::{vocab, BioSource, CvTerm, Publication, Record, RecordCore};

/// An experiment: a set of observations made under one publication, one host
/// organism, and one pair of detection/identification methods.
///
/// The experiment strategy keys on exactly those four things, so they are
/// modelled as dedicated fields rather than xrefs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Shared record fields.
    pub core: RecordCore,

    /// The publication this experiment was curated from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication: Option<Publication>,

    /// Host organism the experiment was performed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biosource: Option<BioSource>,

    /// Interaction detection method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection_method: Option<CvTerm>,

    /// Participant identification method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification_method: Option<CvTerm>,
}

impl Experiment {
    /// Creates an experiment with the given short label and nothing else.
    ///
    /// A resolvable experiment additionally needs a biological source and
    /// both method terms; the strategy rejects candidates missing them before
    /// any query is issued.
    #[must_use]
    pub fn new(short_label: impl Into<String>) -> Self {
        Self {
            core: RecordCore::new(short_label),
            publication: None,
            biosource: None,
            detection_method: None,
            identification_method: None,
        }
    }

    /// Sets the publication.
    pub fn set_publication(&mut self, publication: Publication) {
        self.publication = Some(publication);
    }

    /// Sets the host organism.
    pub fn set_biosource(&mut self, biosource: BioSource) {
        self.biosource = Some(biosource);
    }

    /// Sets the interaction detection method.
    pub fn set_detection_method(&mut self, method: CvTerm) {
        self.detection_method = Some(method);
    }

    /// Sets the participant identification method.
    pub fn set_identification_method(&mut self, method: CvTerm) {
        self.identification_method = Some(method);
    }

    /// Returns the key that ties this experiment to its publication.
    ///
    /// The attached publication's short label wins when present and
    /// non-empty; otherwise the primary id of the first pubmed or
    /// primary-reference cross-reference stands in. `None` means the
    /// experiment has no publication evidence at all and must be resolved
    /// through the weaker label fallback.
    #[must_use]
    pub fn publication_key(&self) -> Option<&str> {
        if let Some(publication) = &self.publication {
            let label = publication.core.short_label.trim();
            if !label.is_empty() {
                return Some(label);
            }
        }
        self.core
            .xrefs
            .iter()
            .find(|x| {
                x.database.is_term(vocab::PUBMED_MI, vocab::PUBMED_LABEL)
                    || x.qualifier.as_ref().map_or(false, |q| {
                        q.is_term(vocab::PRIMARY_REFERENCE_MI, vocab::PRIMARY_REFERENCE_LABEL)
                    })
            })
            .map(|x| x.primary_id.as_str())
    }
}

impl Record for Experiment {
    fn core(&self) -> &RecordCore {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CrossReference, TermRef};

    #[test]
    fn test_publication_key_prefers_publication_label() {
        let mut experiment = Experiment::new("kerrien-2006-1");
        experiment.set_publication(Publication::new("15630443"));
        experiment.core.add_xref(CrossReference::new(
            TermRef::with_identifier(vocab::PUBMED_LABEL, vocab::PUBMED_MI),
            None,
            "99999999",
        ));
        assert_eq!(experiment.publication_key(), Some("15630443"));
    }

    #[test]
    fn test_publication_key_falls_back_to_pubmed_xref() {
        let mut experiment = Experiment::new("kerrien-2006-1");
        experiment.core.add_xref(CrossReference::new(
            TermRef::with_identifier(vocab::PUBMED_LABEL, vocab::PUBMED_MI),
            None,
            "15630443",
        ));
        assert_eq!(experiment.publication_key(), Some("15630443"));
    }

    #[test]
    fn test_publication_key_accepts_primary_reference_qualifier() {
        let mut experiment = Experiment::new("kerrien-2006-1");
        experiment.core.add_xref(CrossReference::new(
            TermRef::new("some-other-db"),
            Some(TermRef::with_identifier(
                vocab::PRIMARY_REFERENCE_LABEL,
                vocab::PRIMARY_REFERENCE_MI,
            )),
            "DOC-1",
        ));
        assert_eq!(experiment.publication_key(), Some("DOC-1"));
    }

    #[test]
    fn test_publication_key_ignores_empty_publication_label() {
        let mut experiment = Experiment::new("kerrien-2006-1");
        experiment.set_publication(Publication::new("  "));
        assert_eq!(experiment.publication_key(), None);
    }

    #[test]
    fn test_publication_key_none_without_evidence() {
        assert_eq!(Experiment::new("kerrien-2006-1").publication_key(), None);
    }
}
