//! Experiment strategy.
//!
//! The primary key is composite: publication key, host taxon, and the two
//! method identifiers. Candidates missing the taxon or either method
//! identifier are rejected before any query: those fields are curation
//! requirements, and without them the key is meaningless. Same-key hits are
//! narrowed by culture-term equality and then by the annotation-set
//! discriminator.

use tracing::debug;

use crate::ambiguity::{narrow, settle};
use crate::error::{PreconditionError, ResolveResult};
use crate::record::{CvTerm, Experiment, RecordKind};
use crate::resolver::Resolution;
use crate::storage::StoreGateway;

pub(super) fn resolve(candidate: &Experiment, store: &dyn StoreGateway) -> ResolveResult<Resolution> {
    let biosource = candidate.biosource.as_ref().ok_or_else(|| {
        PreconditionError::ExperimentWithoutBioSource {
            label: candidate.core.short_label.clone(),
        }
    })?;
    let detection = method_identifier(candidate.detection_method.as_ref()).ok_or_else(|| {
        PreconditionError::ExperimentWithoutDetectionMethod {
            label: candidate.core.short_label.clone(),
        }
    })?;
    let identification =
        method_identifier(candidate.identification_method.as_ref()).ok_or_else(|| {
            PreconditionError::ExperimentWithoutIdentificationMethod {
                label: candidate.core.short_label.clone(),
            }
        })?;

    let (hits, key) = match candidate.publication_key() {
        Some(publication_key) => {
            let hits = store.experiments_by_publication_key(
                publication_key,
                biosource.taxon_id,
                detection,
                identification,
            )?;
            (hits, format!("publication {publication_key}"))
        }
        None => {
            debug!(
                target: "curamatch::resolve",
                label = %candidate.core.short_label,
                "experiment carries no publication evidence, falling back to the label key"
            );
            let hits =
                store.experiments_by_label(&candidate.core.short_label, detection, identification)?;
            (hits, format!("label {}", candidate.core.short_label))
        }
    };

    // Same-key candidates must also agree on the host's culture terms and on
    // the annotation set: a candidate without annotations only matches a
    // stored experiment without any, and an annotated candidate requires the
    // exact same (topic, text) pairs.
    let survivors = narrow(hits.iter().collect(), |stored: &Experiment| {
        stored
            .biosource
            .as_ref()
            .map_or(false, |b| biosource.same_culture_terms(b))
    });
    let survivors = if candidate.core.annotations.is_empty() {
        narrow(survivors, |stored| stored.core.annotations.is_empty())
    } else {
        narrow(survivors, |stored| {
            candidate.core.same_annotations(&stored.core)
        })
    };

    Ok(settle(RecordKind::Experiment, &key, &survivors))
}

fn method_identifier(method: Option<&CvTerm>) -> Option<&str> {
    method.and_then(|m| m.identifier.as_deref())
}
