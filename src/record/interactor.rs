//! Interactors: the molecules that participate in interactions.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::IdentityFilter;
use crate::record::{Record, RecordCore};

/// The molecular kind of an interactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractorKind {
    /// A protein or peptide.
    Protein,
    /// A nucleic acid (DNA or RNA).
    NucleicAcid,
    /// A small molecule.
    SmallMolecule,
    /// A gene.
    Gene,
}

impl InteractorKind {
    /// Returns true for kinds that carry a residue sequence.
    #[must_use]
    pub const fn is_polymer(&self) -> bool {
        matches!(self, Self::Protein | Self::NucleicAcid)
    }
}

impl fmt::Display for InteractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protein => write!(f, "protein"),
            Self::NucleicAcid => write!(f, "nucleic acid"),
            Self::SmallMolecule => write!(f, "small molecule"),
            Self::Gene => write!(f, "gene"),
        }
    }
}

/// An interactor: a protein, nucleic acid, small molecule, or gene.
///
/// # Examples
///
/// ```
/// use curamatch::{Interactor, InteractorKind};
///
/// let mut p53 = Interactor::new("p53_human", InteractorKind::Protein);
/// p53.set_sequence("MEEPQSDPSV");
/// assert!(p53.kind.is_polymer());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interactor {
    /// Shared record fields.
    pub core: RecordCore,

    /// Molecular kind.
    pub kind: InteractorKind,

    /// Residue sequence, for polymer kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
}

impl Interactor {
    /// Creates an interactor with the given short label and kind.
    #[must_use]
    pub fn new(short_label: impl Into<String>, kind: InteractorKind) -> Self {
        Self {
            core: RecordCore::new(short_label),
            kind,
            sequence: None,
        }
    }

    /// Sets the residue sequence.
    pub fn set_sequence(&mut self, sequence: impl Into<String>) {
        self.sequence = Some(sequence.into());
    }

    /// Returns the primary ids of this interactor's lineage parents: the
    /// cross-references qualified as `isoform-parent` or `chain-parent`.
    ///
    /// An isoform or chain is only the same record as a stored match when
    /// both point at exactly the same parents.
    #[must_use]
    pub fn parent_ids(&self) -> BTreeSet<&str> {
        self.core
            .select_xrefs(&IdentityFilter::lineage())
            .iter()
            .map(|x| x.primary_id.as_str())
            .collect()
    }
}

impl Record for Interactor {
    fn core(&self) -> &RecordCore {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{vocab, CrossReference, TermRef};

    fn parent_xref(qualifier_label: &str, qualifier_mi: &str, primary_id: &str) -> CrossReference {
        CrossReference::new(
            TermRef::with_identifier(vocab::UNIPROTKB_LABEL, vocab::UNIPROTKB_MI),
            Some(TermRef::with_identifier(qualifier_label, qualifier_mi)),
            primary_id,
        )
    }

    #[test]
    fn test_polymer_kinds() {
        assert!(InteractorKind::Protein.is_polymer());
        assert!(InteractorKind::NucleicAcid.is_polymer());
        assert!(!InteractorKind::SmallMolecule.is_polymer());
        assert!(!InteractorKind::Gene.is_polymer());
    }

    #[test]
    fn test_parent_ids_selects_lineage_xrefs_only() {
        let mut isoform = Interactor::new("p53_human-2", InteractorKind::Protein);
        isoform.core.add_xref(CrossReference::identity(
            TermRef::with_identifier(vocab::UNIPROTKB_LABEL, vocab::UNIPROTKB_MI),
            "P04637-2",
        ));
        isoform.core.add_xref(parent_xref(
            vocab::ISOFORM_PARENT_LABEL,
            vocab::ISOFORM_PARENT_MI,
            "P04637",
        ));
        isoform.core.add_xref(parent_xref(
            vocab::CHAIN_PARENT_LABEL,
            vocab::CHAIN_PARENT_MI,
            "EBI-100",
        ));

        let parents = isoform.parent_ids();
        assert_eq!(parents.len(), 2);
        assert!(parents.contains("P04637"));
        assert!(parents.contains("EBI-100"));
        assert!(!parents.contains("P04637-2"));
    }

    #[test]
    fn test_parent_ids_empty_without_lineage_xrefs() {
        let mut plain = Interactor::new("p53_human", InteractorKind::Protein);
        plain.core.add_xref(CrossReference::identity(
            TermRef::with_identifier(vocab::UNIPROTKB_LABEL, vocab::UNIPROTKB_MI),
            "P04637",
        ));
        assert!(plain.parent_ids().is_empty());
    }
}
