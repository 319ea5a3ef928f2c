//! Biological sources.

use serde::{Deserialize, Serialize};

use crate::record::{same_optional_term, CvTerm, Record, RecordCore};

/// A biological source: an organism, optionally narrowed to a cell type and
/// a tissue.
///
/// Identity is the full (taxon id, cell type, tissue) triple: `9606` alone
/// and `9606 + HeLa` are distinct sources.
///
/// # Examples
///
/// ```
/// use curamatch::BioSource;
///
/// let human = BioSource::new("human", 9606);
/// assert_eq!(human.taxon_id, 9606);
/// assert!(human.cell_type.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BioSource {
    /// Shared record fields.
    pub core: RecordCore,

    /// NCBI taxonomy identifier.
    pub taxon_id: i64,

    /// Cell type, when the source is narrowed to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<CvTerm>,

    /// Tissue, when the source is narrowed to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tissue: Option<CvTerm>,
}

impl BioSource {
    /// Creates a biological source for the given taxon.
    #[must_use]
    pub fn new(short_label: impl Into<String>, taxon_id: i64) -> Self {
        Self {
            core: RecordCore::new(short_label),
            taxon_id,
            cell_type: None,
            tissue: None,
        }
    }

    /// Sets the cell type.
    pub fn set_cell_type(&mut self, cell_type: CvTerm) {
        self.cell_type = Some(cell_type);
    }

    /// Sets the tissue.
    pub fn set_tissue(&mut self, tissue: CvTerm) {
        self.tissue = Some(tissue);
    }

    /// Compares this candidate's cell-type and tissue terms against a stored
    /// source's. Absent terms must be absent on both sides; present terms are
    /// compared by the candidate-sided term-equivalence rule.
    ///
    /// The taxon id is deliberately not part of this check; callers compare
    /// it where their key demands it.
    #[must_use]
    pub fn same_culture_terms(&self, stored: &Self) -> bool {
        same_optional_term(self.cell_type.as_ref(), stored.cell_type.as_ref())
            && same_optional_term(self.tissue.as_ref(), stored.tissue.as_ref())
    }
}

impl Record for BioSource {
    fn core(&self) -> &RecordCore {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CvClass;

    #[test]
    fn test_same_culture_terms() {
        let plain = BioSource::new("human", 9606);
        assert!(plain.same_culture_terms(&BioSource::new("human", 9606)));

        let mut hela = BioSource::new("human-hela", 9606);
        hela.set_cell_type(CvTerm::with_identifier(CvClass::CellType, "hela", "EFO:0001185"));

        assert!(!plain.same_culture_terms(&hela));
        assert!(!hela.same_culture_terms(&plain));
        assert!(hela.same_culture_terms(&hela.clone()));
    }
}
